// One error type for the whole layer.

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Blur size, device scale, or a config value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Backing-store allocation or compositing failed for this paint.
    #[error("Rendering failure: {0}")]
    RenderingFailure(String),

    /// The config file could not be read or written to disk.
    #[error("Config read error: {0}")]
    ConfigRead(#[from] std::io::Error),

    /// The config file is not valid TOML for `LayerConfig`.
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// `LayerConfig` could not be serialized back to TOML.
    #[error("Config write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}

impl Error {
    pub fn invalid<T: ToString>(msg: T) -> Self {
        Error::InvalidConfiguration(msg.to_string())
    }

    pub fn rendering<T: ToString>(msg: T) -> Self {
        Error::RenderingFailure(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
