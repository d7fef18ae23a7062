// src/models/access.rs

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

// Conjunto fechado de perfis. Qualquer outro valor (TECNICO, GESTOR, DIRETOR,
// AUDITOR...) é tratado como desconhecido e não recebe nenhuma permissão.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")] // Banco
#[serde(rename_all = "SCREAMING_SNAKE_CASE")] // JSON
pub enum Role {
    SuperAdmin,    // Vira "SUPER_ADMIN"
    Admin,         // Vira "ADMIN"
    GestorEscolar, // Vira "GESTOR_ESCOLAR"
    Solicitante,   // Vira "SOLICITANTE"
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::GestorEscolar,
        Role::Solicitante,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Admin => "ADMIN",
            Role::GestorEscolar => "GESTOR_ESCOLAR",
            Role::Solicitante => "SOLICITANTE",
        }
    }

    /// Perfis administrativos podem existir sem escola vinculada.
    pub fn is_administrative(&self) -> bool {
        matches!(self, Role::SuperAdmin | Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

// Registro de permissões consumido pela UI e pelos guardiões de rota.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    pub can_access_dashboard: bool,
    pub can_access_assets: bool,
    pub can_access_users: bool,
    pub can_access_settings: bool,
    pub can_access_tickets: bool,
    pub can_access_all_schools: bool,
}

impl Permissions {
    /// Registro "fail-closed" usado para perfis desconhecidos.
    pub const NONE: Permissions = Permissions {
        can_access_dashboard: false,
        can_access_assets: false,
        can_access_users: false,
        can_access_settings: false,
        can_access_tickets: false,
        can_access_all_schools: false,
    };
}

// Ícones do menu. A UI resolve cada variante para o seu componente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum MenuIcon {
    LayoutDashboard,
    Package,
    School,
    Ticket,
    Users,
    Settings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MenuItem {
    #[schema(example = "Patrimônio")]
    pub label: String,
    #[schema(example = "/assets")]
    pub route: String,
    pub icon: MenuIcon,
}

// Resposta do GET /api/me/access
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessProfile {
    pub role: Role,
    pub permissions: Permissions,
    pub menu: Vec<MenuItem>,
}

// Prévia de acesso para um perfil informado como texto (tela de usuários).
// Perfis fora do conjunto canônico voltam sem permissões e com menu vazio.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleAccessPreview {
    #[schema(example = "GESTOR_ESCOLAR")]
    pub role: String,
    pub recognized: bool,
    pub permissions: Permissions,
    pub menu: Vec<MenuItem>,
}
