pub mod tenancy_repo;
pub use tenancy_repo::TenantRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
pub mod asset_repo;
pub use asset_repo::AssetRepository;
pub mod ticket_repo;
pub use ticket_repo::TicketRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
pub mod settings_repo;
pub use settings_repo::SettingsRepository;
