pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod search;
pub mod source;
