pub mod assets;
pub mod auth;
pub mod dashboard;
pub mod public;
pub mod qrcode;
pub mod reports;
pub mod settings;
pub mod tenancy;
pub mod tickets;
pub mod users;
