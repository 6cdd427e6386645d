//! Error types for conversion and site generation

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A link or image fragment could not be split into label and url.
    #[error("malformed inline element: {fragment}")]
    MalformedInline { fragment: String },

    #[error("invalid node: {0}")]
    InvalidNode(&'static str),

    #[error("failed to find a `# ` title line")]
    MissingTitle,

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("failed to render {}: {source}", .path.display())]
    Page {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
