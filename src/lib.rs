//! Library exports for todoapp, shared between the binary and tests.

pub mod attachments;
pub mod auth;
pub mod client;
pub mod config;
pub mod models;
pub mod providers;
pub mod routes;
pub mod startup;
pub mod state;
pub mod store;
pub mod todos;
pub mod utils;
