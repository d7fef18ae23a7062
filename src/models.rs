pub mod access;
pub mod asset;
pub mod auth;
pub mod dashboard;
pub mod reports;
pub mod settings;
pub mod tenancy;
pub mod ticket;
