use std::path::PathBuf;

/// Every failure the adapter can report before it reaches the host boundary.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An asset file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Asset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The adapter config file exists but is malformed
    #[error("config error: {0}")]
    Config(String),

    /// A level file could not be parsed into surfaces
    #[error("level {}: {message}", path.display())]
    Level { path: PathBuf, message: String },

    /// The texture atlas could not be encoded or written
    #[error("texture dump failed: {0}")]
    Texture(#[from] image::ImageError),

    /// The engine backend could not be brought up
    #[error("engine error: {0}")]
    Engine(String),
}

pub type Result<T> = std::result::Result<T, Error>;
