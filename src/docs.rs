// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::common;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::get_me,
        handlers::auth::get_my_access,
        handlers::auth::preview_role_access,

        // --- Dashboard ---
        handlers::dashboard::get_super_admin,
        handlers::dashboard::get_admin,
        handlers::dashboard::get_school,

        // --- Reports ---
        handlers::reports::get_inventory,
        handlers::reports::get_consolidated,
        handlers::reports::get_by_category,
        handlers::reports::list_schools,

        // --- QR Code ---
        handlers::qrcode::get_asset_png,
        handlers::qrcode::get_asset_svg,

        // --- Tenancy ---
        handlers::tenancy::list_tenants,
        handlers::tenancy::create_tenant,
        handlers::tenancy::get_tenant,
        handlers::tenancy::update_tenant,
        handlers::tenancy::delete_tenant,

        // --- Users ---
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::get_user,
        handlers::users::update_user,
        handlers::users::delete_user,

        // --- Assets ---
        handlers::assets::list_assets,
        handlers::assets::create_asset,
        handlers::assets::get_asset,
        handlers::assets::update_asset,
        handlers::assets::delete_asset,

        // --- Tickets ---
        handlers::tickets::list_tickets,
        handlers::tickets::create_ticket,
        handlers::tickets::get_ticket,
        handlers::tickets::update_ticket,
        handlers::tickets::delete_ticket,

        // --- Settings ---
        handlers::settings::list_settings,
        handlers::settings::get_setting,
        handlers::settings::update_setting,

        // --- Public ---
        handlers::public::get_public_asset,
        handlers::public::create_public_ticket,
    ),
    components(
        schemas(
            // --- Erros ---
            common::outcome::ErrorKind,
            common::outcome::ErrorPayload,

            // --- Access ---
            models::access::Role,
            models::access::Permissions,
            models::access::MenuIcon,
            models::access::MenuItem,
            models::access::AccessProfile,
            models::access::RoleAccessPreview,

            // --- Auth ---
            models::auth::User,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::CreateUserPayload,
            models::auth::UpdateUserPayload,

            // --- Tenancy ---
            models::tenancy::TenantType,
            models::tenancy::Tenant,
            models::tenancy::TenantRef,
            models::tenancy::CreateTenantPayload,
            models::tenancy::UpdateTenantPayload,

            // --- Assets ---
            models::asset::AssetStatus,
            models::asset::AssetCategory,
            models::asset::Asset,
            models::asset::PublicAssetView,
            models::asset::CreateAssetPayload,
            models::asset::UpdateAssetPayload,

            // --- Tickets ---
            models::ticket::TicketStatus,
            models::ticket::TicketPriority,
            models::ticket::TicketCategory,
            models::ticket::Ticket,
            models::ticket::CreateTicketPayload,
            models::ticket::PublicTicketPayload,
            models::ticket::UpdateTicketPayload,

            // --- Dashboard ---
            models::dashboard::StatusCounts,
            models::dashboard::SuperAdminDashboard,
            models::dashboard::AdminDashboard,
            models::dashboard::SchoolDashboard,

            // --- Reports ---
            models::reports::ReportAssetLine,
            models::reports::CategoryGroup,
            models::reports::InventoryReport,
            models::reports::ConsolidatedRow,
            models::reports::ConsolidatedTotals,
            models::reports::ConsolidatedReport,
            models::reports::TenantGroup,
            models::reports::CategoryReport,
            models::reports::SchoolListEntry,

            // --- Settings ---
            models::settings::SystemConfig,
            models::settings::InstitutionConfig,
            models::settings::PatrimonyConfig,
            models::settings::QrImageFormat,
            models::settings::QrCodeConfig,
        )
    ),
    tags(
        (name = "Auth", description = "Login, sessão e permissões"),
        (name = "Dashboard", description = "Indicadores por perfil"),
        (name = "Reports", description = "Inventário, consolidado e relatórios por categoria"),
        (name = "QR Code", description = "Etiquetas de patrimônio"),
        (name = "Tenancy", description = "Secretaria, regionais e escolas"),
        (name = "Users", description = "Gestão de usuários"),
        (name = "Assets", description = "Cadastro de bens patrimoniais"),
        (name = "Tickets", description = "Chamados de manutenção, suporte e baixa"),
        (name = "Settings", description = "Configurações do sistema"),
        (name = "Public", description = "Página pública aberta pelo QR Code")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
