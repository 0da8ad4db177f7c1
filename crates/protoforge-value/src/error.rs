use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("YAML parsing error: {0}")]
    Decode(#[from] serde_yaml::Error),

    #[error("Encoding error: {0}")]
    Encode(String),
}
