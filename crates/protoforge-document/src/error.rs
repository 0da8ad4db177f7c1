use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode document: {0}")]
    Decode(#[from] protoforge_value::Error),

    #[error("Failed to encode prototype: {0}")]
    Encode(String),
}
