pub mod admin_service;
pub mod auth;
pub mod roster_service;
