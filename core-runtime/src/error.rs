use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required environment variable is unset or empty.
    #[error("Missing {description} in environment ({variable})")]
    MissingVariable {
        variable: String,
        description: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
