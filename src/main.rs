//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;


use crate::config::{AppConfig, AppState};
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG controla o nível; sem ela, "info"
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = AppConfig::from_env()?;
    let app_state = AppState::new(config).await?;

    sqlx::migrate!().run(&app_state.db_pool).await?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let listener = TcpListener::bind(&app_state.config.server_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, build_router(app_state)).await?;
    Ok(())
}

pub fn build_router(app_state: AppState) -> Router {
    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/api/auth/login", post(handlers::auth::login));

    // Página aberta pelo QR Code, sem token
    let public_routes = Router::new()
        .route("/public/assets/{id}", get(handlers::public::get_public_asset))
        .route("/public/assets/{id}/tickets", post(handlers::public::create_public_ticket));

    let session_routes = Router::new()
        .route("/api/me", get(handlers::auth::get_me))
        .route("/api/me/access", get(handlers::auth::get_my_access))
        .route("/api/access/roles/{role}", get(handlers::auth::preview_role_access));

    let dashboard_routes = Router::new()
        .route("/api/dashboard/super-admin", get(handlers::dashboard::get_super_admin))
        .route("/api/dashboard/admin", get(handlers::dashboard::get_admin))
        .route("/api/dashboard/school/{tenant_id}", get(handlers::dashboard::get_school));

    let report_routes = Router::new()
        .route("/api/reports/inventory/{tenant_id}", get(handlers::reports::get_inventory))
        .route("/api/reports/consolidated", get(handlers::reports::get_consolidated))
        .route("/api/reports/category/{category}", get(handlers::reports::get_by_category))
        .route("/api/reports/schools", get(handlers::reports::list_schools));

    let qrcode_routes = Router::new()
        .route("/api/qrcode/asset/{id}", get(handlers::qrcode::get_asset_png))
        .route("/api/qrcode/asset/{id}/svg", get(handlers::qrcode::get_asset_svg));

    let tenancy_routes = Router::new()
        .route("/api/tenants"
               ,get(handlers::tenancy::list_tenants)
               .post(handlers::tenancy::create_tenant)
        )
        .route("/api/tenants/{id}"
               ,get(handlers::tenancy::get_tenant)
               .put(handlers::tenancy::update_tenant)
               .delete(handlers::tenancy::delete_tenant)
        );

    let user_routes = Router::new()
        .route("/api/users"
               ,get(handlers::users::list_users)
               .post(handlers::users::create_user)
        )
        .route("/api/users/{id}"
               ,get(handlers::users::get_user)
               .put(handlers::users::update_user)
               .delete(handlers::users::delete_user)
        );

    let asset_routes = Router::new()
        .route("/api/assets"
               ,get(handlers::assets::list_assets)
               .post(handlers::assets::create_asset)
        )
        .route("/api/assets/{id}"
               ,get(handlers::assets::get_asset)
               .put(handlers::assets::update_asset)
               .delete(handlers::assets::delete_asset)
        );

    let ticket_routes = Router::new()
        .route("/api/tickets"
               ,get(handlers::tickets::list_tickets)
               .post(handlers::tickets::create_ticket)
        )
        .route("/api/tickets/{id}"
               ,get(handlers::tickets::get_ticket)
               .put(handlers::tickets::update_ticket)
               .delete(handlers::tickets::delete_ticket)
        );

    let settings_routes = Router::new()
        .route("/api/settings", get(handlers::settings::list_settings))
        .route("/api/settings/{key}"
               ,get(handlers::settings::get_setting)
               .put(handlers::settings::update_setting)
        );

    // Tudo que exige sessão passa pelo auth_guard; as permissões de perfil
    // ficam nos extratores de cada handler
    let protected_routes = Router::new()
        .merge(session_routes)
        .merge(dashboard_routes)
        .merge(report_routes)
        .merge(qrcode_routes)
        .merge(tenancy_routes)
        .merge(user_routes)
        .merge(asset_routes)
        .merge(ticket_routes)
        .merge(settings_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(auth_routes)
        .merge(public_routes)
        .merge(protected_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}
