pub mod api_docs;
pub mod app;
pub mod bootstrap;
pub mod config;
pub mod entities;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod redis_service;
pub mod repositories;
pub mod routes;
pub mod scholar;
pub mod state;
pub mod statistics;
pub mod utils;
