//! Persistence for user accounts (`persons` table) with a thin HTTP surface.

pub mod app;
pub mod config;
pub mod db;
pub mod state;
pub mod store;
pub mod users;
