use std::path::PathBuf;

use thiserror::Error;

/// Failures at the crate boundary: reading requests and config, writing
/// generated files. Code generation itself cannot fail.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// A file could not be read or written
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON request did not parse
    #[error("JSON parse error ({context}): {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A YAML request or config did not parse
    #[error("YAML parse error ({context}): {source}")]
    YamlParse {
        context: String,
        #[source]
        source: serde_yaml::Error,
    },
}

impl CodegenError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CodegenError::Io {
            path: path.into(),
            source,
        }
    }
}
