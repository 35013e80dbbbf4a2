use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    str::FromStr,
};

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 5271);
const DEFAULT_UPLOADS_DIR: &str = "uploads";
const DEFAULT_STATIC_DIR: &str = "public";
const DEFAULT_LESSON_RATE: f64 = 30.0;
const DEFAULT_ADMIN_EMAIL: &str = "admin@lessonboard.local";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5271,http://127.0.0.1:5271";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_address: SocketAddr,

    pub uploads_dir: String,
    pub static_dir: String,

    /// Price of a lesson when the teacher has no custom rate.
    pub default_lesson_rate: f64,

    pub admin_email: String,
    pub admin_password: String,

    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let default_lesson_rate = check_rate(
            "DEFAULT_LESSON_RATE",
            parse_var("DEFAULT_LESSON_RATE", DEFAULT_LESSON_RATE)?,
        )?;

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            bind_address: parse_var("BIND_ADDRESS", DEFAULT_BIND_ADDRESS)?,
            uploads_dir: var_or("UPLOADS_DIR", DEFAULT_UPLOADS_DIR),
            static_dir: var_or("STATIC_DIR", DEFAULT_STATIC_DIR),
            default_lesson_rate,
            admin_email: var_or("ADMIN_EMAIL", DEFAULT_ADMIN_EMAIL),
            admin_password: var_or("ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD),
            cors_origins: var_or("CORS_ORIGINS", DEFAULT_CORS_ORIGINS)
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
        })
    }
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Reads and parses an optional variable, falling back to `default` when unset.
fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}

/// Rejects rates that cannot be charged: negative, NaN or infinite.
fn check_rate(name: &str, rate: f64) -> Result<f64, ConfigError> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: rate.to_string(),
        });
    }
    Ok(rate)
}
