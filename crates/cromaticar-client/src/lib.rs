//! # Cromaticar Client
//!
//! HTTP access to the Cromaticar catalog API.
//!
//! [`CatalogClient`] implements [`cromaticar_core::CatalogSource`] over
//! `reqwest`; [`ClientConfig`] resolves where the API lives.

pub mod client;
pub mod config;

pub use client::CatalogClient;
pub use config::{ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
