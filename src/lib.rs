//! Admin service for the travel agency dashboard: catalog management, client
//! demands and special packages, with all derived prices computed here
//! before anything reaches the backend.

pub mod backend;
pub mod config;
pub mod models;
pub mod routes;
pub mod services;
