pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod events;
pub mod guide;
pub mod handlers;
pub mod middleware;
pub mod routing;

#[cfg(test)]
pub mod testing;
