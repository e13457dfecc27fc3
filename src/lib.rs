//! Library exports for the URL shortener
//!
//! Exposes internal components for integration tests and embedding.

pub mod config;
pub mod error;
pub mod generator;
pub mod handler;
pub mod model;
pub mod route;
pub mod store;
