// src/services/access_policy.rs
//
// Política de acesso: perfil -> permissões -> menu. Funções puras,
// recalculadas a cada requisição a partir do perfil gravado no banco.

use crate::models::access::{AccessProfile, MenuIcon, MenuItem, Permissions, Role, RoleAccessPreview};

pub fn permissions_for(role: Role) -> Permissions {
    match role {
        Role::SuperAdmin => Permissions {
            can_access_dashboard: true,
            can_access_assets: true,
            can_access_users: true,
            can_access_settings: true,
            can_access_tickets: true,
            can_access_all_schools: true,
        },
        Role::Admin => Permissions {
            can_access_dashboard: true,
            can_access_assets: true,
            can_access_users: true,
            can_access_settings: false,
            can_access_tickets: true,
            can_access_all_schools: true,
        },
        Role::GestorEscolar => Permissions {
            can_access_dashboard: true,
            can_access_assets: true,
            can_access_users: false,
            can_access_settings: false,
            can_access_tickets: true,
            can_access_all_schools: false,
        },
        Role::Solicitante => Permissions {
            can_access_dashboard: false,
            can_access_assets: true,
            can_access_users: false,
            can_access_settings: false,
            can_access_tickets: true,
            can_access_all_schools: false,
        },
    }
}

/// Versão textual: qualquer perfil fora do conjunto canônico fica sem acesso.
pub fn permissions_for_role(role: &str) -> Permissions {
    role.parse::<Role>()
        .map(permissions_for)
        .unwrap_or(Permissions::NONE)
}

// Permissão que libera cada entrada do menu
#[derive(Clone, Copy)]
enum MenuGate {
    Dashboard,
    Assets,
    AllSchools,
    Tickets,
    Users,
    Settings,
}

impl MenuGate {
    fn allows(self, p: &Permissions) -> bool {
        match self {
            MenuGate::Dashboard => p.can_access_dashboard,
            MenuGate::Assets => p.can_access_assets,
            MenuGate::AllSchools => p.can_access_all_schools,
            MenuGate::Tickets => p.can_access_tickets,
            MenuGate::Users => p.can_access_users,
            MenuGate::Settings => p.can_access_settings,
        }
    }
}

// Ordem fixa do menu lateral
const MENU: [(&str, &str, MenuIcon, MenuGate); 6] = [
    ("Dashboard", "/dashboard", MenuIcon::LayoutDashboard, MenuGate::Dashboard),
    ("Patrimônio", "/assets", MenuIcon::Package, MenuGate::Assets),
    ("Escolas", "/schools", MenuIcon::School, MenuGate::AllSchools),
    ("Chamados", "/tickets", MenuIcon::Ticket, MenuGate::Tickets),
    ("Usuários", "/users", MenuIcon::Users, MenuGate::Users),
    ("Configurações", "/settings", MenuIcon::Settings, MenuGate::Settings),
];

pub fn menu_for(permissions: &Permissions) -> Vec<MenuItem> {
    MENU.iter()
        .filter(|(_, _, _, gate)| gate.allows(permissions))
        .map(|(label, route, icon, _)| MenuItem {
            label: label.to_string(),
            route: route.to_string(),
            icon: *icon,
        })
        .collect()
}

pub fn access_profile(role: Role) -> AccessProfile {
    let permissions = permissions_for(role);
    AccessProfile {
        role,
        menu: menu_for(&permissions),
        permissions,
    }
}

/// Prévia a partir do texto do perfil, sem exigir um perfil canônico.
pub fn role_preview(role: &str) -> RoleAccessPreview {
    let permissions = permissions_for_role(role);
    RoleAccessPreview {
        role: role.to_string(),
        recognized: role.parse::<Role>().is_ok(),
        menu: menu_for(&permissions),
        permissions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn routes(menu: &[MenuItem]) -> Vec<&str> {
        menu.iter().map(|item| item.route.as_str()).collect()
    }

    #[test]
    fn unknown_roles_fail_closed() {
        for role in ["TECNICO", "GESTOR", "DIRETOR", "AUDITOR", "super_admin", ""] {
            assert_eq!(permissions_for_role(role), Permissions::NONE, "perfil {role}");
        }
    }

    #[test]
    fn canonical_role_strings_match_the_enum_mapping() {
        for role in Role::ALL {
            assert_eq!(permissions_for_role(role.as_str()), permissions_for(role));
        }
    }

    #[test]
    fn only_super_admin_reaches_settings() {
        let with_settings: Vec<Role> = Role::ALL
            .into_iter()
            .filter(|role| permissions_for(*role).can_access_settings)
            .collect();
        assert_eq!(with_settings, vec![Role::SuperAdmin]);
    }

    #[test]
    fn school_roles_are_bound_to_one_school() {
        assert!(!permissions_for(Role::GestorEscolar).can_access_all_schools);
        assert!(!permissions_for(Role::Solicitante).can_access_all_schools);
        assert!(permissions_for(Role::Admin).can_access_all_schools);
    }

    #[test]
    fn super_admin_menu_keeps_the_fixed_order() {
        let menu = menu_for(&permissions_for(Role::SuperAdmin));
        assert_eq!(
            routes(&menu),
            vec!["/dashboard", "/assets", "/schools", "/tickets", "/users", "/settings"]
        );
    }

    #[test]
    fn school_manager_menu_hides_schools_users_and_settings() {
        let menu = menu_for(&permissions_for(Role::GestorEscolar));
        assert_eq!(routes(&menu), vec!["/dashboard", "/assets", "/tickets"]);
        assert_eq!(menu[1].icon, MenuIcon::Package);
    }

    #[test]
    fn requester_menu_has_no_dashboard() {
        let menu = menu_for(&permissions_for(Role::Solicitante));
        assert_eq!(routes(&menu), vec!["/assets", "/tickets"]);
    }

    #[test]
    fn no_permissions_means_empty_menu() {
        assert!(menu_for(&Permissions::NONE).is_empty());
    }

    #[test]
    fn access_profile_bundles_role_permissions_and_menu() {
        let profile = access_profile(Role::Admin);
        assert_eq!(profile.role, Role::Admin);
        assert!(!profile.permissions.can_access_settings);
        assert_eq!(profile.menu.len(), 5);
    }

    #[test]
    fn preview_of_divergent_role_is_empty() {
        let preview = role_preview("TECNICO");
        assert!(!preview.recognized);
        assert_eq!(preview.permissions, Permissions::NONE);
        assert!(preview.menu.is_empty());

        let preview = role_preview("SOLICITANTE");
        assert!(preview.recognized);
        assert_eq!(routes(&preview.menu), vec!["/assets", "/tickets"]);
    }
}
