pub mod config;
pub mod document;
pub mod error;
pub mod fetch;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod routes;
pub mod seo;
pub mod state;
