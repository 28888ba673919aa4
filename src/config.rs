//! # Configuration Management
//!
//! Configuration comes from the environment ("12-factor app"), with a `.env`
//! file loaded first when present.
//!
//! ## Environment Variables
//! - `HOST`: Server bind address (default: 127.0.0.1)
//! - `PORT`: Server port (default: 8080)
//! - `DATABASE_URL`: SQLite database connection string
//! - `JWT_SECRET`: HMAC secret used to sign session tokens
//! - `JWT_EXPIRES_IN`: Token lifetime in seconds (default: 604800, one week;
//!   at most ten years)
//! - `BCRYPT_COST`: Work factor for password hashing (default: 10)
//! - `CORS_ORIGIN`: Allowed browser origin (default: any)

use anyhow::{bail, Context, Result};
use std::env;

/// Secret used by debug builds when `JWT_SECRET` is not set.
const DEV_JWT_SECRET: &str = "twitter-lite-dev-secret";

/// Longest accepted token lifetime: ten years, in seconds.
const MAX_JWT_EXPIRES_IN: i64 = 10 * 365 * 24 * 60 * 60;

/// Application configuration
///
/// `Debug` is implemented by hand so the JWT secret never reaches the logs.
#[derive(Clone)]
pub struct Config {
    /// Server host/IP address to bind to
    pub host: String,

    /// Server port number
    pub port: u16,

    /// SQLite database connection URL
    /// Format: "sqlite:filename.db?mode=rwc"
    pub database_url: String,

    /// HMAC secret for signing and verifying tokens
    pub jwt_secret: String,

    /// Token lifetime in seconds
    pub jwt_expires_in: i64,

    /// bcrypt work factor
    pub bcrypt_cost: u32,

    /// Allowed CORS origin; `None` allows any origin
    pub cors_origin: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expires_in", &self.jwt_expires_in)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("cors_origin", &self.cors_origin)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Falls back to defaults for everything except `JWT_SECRET`, which is
    /// mandatory in release builds.
    ///
    /// ## Example .env file
    /// ```text
    /// HOST=127.0.0.1
    /// PORT=8080
    /// DATABASE_URL=sqlite:twitter_lite.db?mode=rwc
    /// JWT_SECRET=change-me
    /// JWT_EXPIRES_IN=604800
    /// ```
    pub fn from_env() -> Result<Self> {
        // Missing .env is fine
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using development secret");
                DEV_JWT_SECRET.to_string()
            }
            _ => bail!("JWT_SECRET must be set"),
        };

        let jwt_expires_in: i64 = env::var("JWT_EXPIRES_IN")
            .unwrap_or_else(|_| "604800".to_string())
            .parse()
            .context("JWT_EXPIRES_IN must be a number of seconds")?;
        check_jwt_expires_in(jwt_expires_in)?;

        let bcrypt_cost: u32 = env::var("BCRYPT_COST")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("BCRYPT_COST must be a number")?;
        if !(4..=31).contains(&bcrypt_cost) {
            bail!("BCRYPT_COST must be between 4 and 31");
        }

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),

            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid port number")?,

            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:twitter_lite.db?mode=rwc".to_string()),

            jwt_secret,
            jwt_expires_in,
            bcrypt_cost,

            cors_origin: env::var("CORS_ORIGIN").ok().filter(|origin| !origin.is_empty()),
        })
    }

    /// Get the socket address to bind the server to, e.g. "127.0.0.1:8080"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn check_jwt_expires_in(seconds: i64) -> Result<()> {
    if !(1..=MAX_JWT_EXPIRES_IN).contains(&seconds) {
        bail!("JWT_EXPIRES_IN must be between 1 and {} seconds", MAX_JWT_EXPIRES_IN);
    }
    Ok(())
}
