//! Environment-driven configuration
//!
//! Every setting has a default so the binary runs with no environment at
//! all; a `.env` file is loaded by the entrypoint before this is read.

use std::env;

use crate::generator::DEFAULT_CODE_LENGTH;

/// Runtime configuration collected once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP server binds to. Env: `PORT` (default 8080).
    pub port: u16,

    /// Path of the database file. Env: `DATABASE_PATH` (default "linklet.db").
    pub database_path: String,

    /// Number of characters in generated short codes. Env: `CODE_LENGTH`
    /// (default 6).
    pub code_length: usize,
}

impl Config {
    /// Reads configuration from the environment, falling back to defaults
    /// for anything absent or unparsable.
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(8080);

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "linklet.db".to_string());

        let code_length = env::var("CODE_LENGTH")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_CODE_LENGTH);

        Self {
            port,
            database_path,
            code_length,
        }
    }
}
