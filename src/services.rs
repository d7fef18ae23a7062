pub mod access_policy;
pub mod asset_service;
pub mod auth;
pub mod dashboard_service;
pub mod qrcode_service;
pub mod report_service;
pub mod settings_service;
pub mod tenancy_service;
pub mod ticket_service;
pub mod user_service;
