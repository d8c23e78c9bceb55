//! API routes

pub mod auth;
pub mod feedback;
pub mod health;
pub mod preview;
pub mod projects;
