use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// See `.env.example` for the variables the server reads.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but cannot be parsed.
    #[error("Invalid value '{value}' for environment variable {name}")]
    InvalidEnvVar {
        /// Variable name
        name: String,
        /// The raw value that failed to parse
        value: String,
    },

    /// The rate limiter rejected its own settings.
    #[error("Invalid rate limit configuration")]
    InvalidRateLimit,
}
