use thiserror::Error;

pub type Result<T> = std::result::Result<T, MetaError>;

#[derive(Error, Debug)]
pub enum MetaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] Box<reqwest::Error>),
    #[error("Row {row}: missing required field `{field}`")]
    MissingField { row: usize, field: &'static str },
    #[error("Row {row}: invalid value {value:?} for field `{field}`")]
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
    },
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Fetch error: {0}")]
    Fetch(String),
}

impl From<reqwest::Error> for MetaError {
    fn from(err: reqwest::Error) -> Self {
        MetaError::Http(Box::new(err))
    }
}
