//! Request middleware: admin authentication.

pub mod auth;

pub use auth::AdminUser;
