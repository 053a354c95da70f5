//! Unsplash REST client.
//!
//! Wraps the provider's photo endpoints (random, search, detail, download
//! tracking) using [`reqwest`] and exposes them to the query service as a
//! [`pixgrid_core::source::PhotoSource`].

pub mod api;
pub mod config;
pub mod models;

pub use api::{UnsplashApiError, UnsplashClient};
pub use config::UnsplashConfig;
