//! Adapter configuration, read from an optional TOML file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// File looked up in the host's working directory.
pub const CONFIG_FILE: &str = "gmsm64.toml";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Unmodified US ROM image the engine extracts its assets from
    pub rom_path: PathBuf,
    /// libsm64 shared library
    pub library_path: PathBuf,
    /// Static collision mesh installed at init
    pub level_path: Option<PathBuf>,
    /// Write the decoded texture atlas to `texture_dump_path` at init
    pub dump_texture: bool,
    pub texture_dump_path: PathBuf,
    /// Host X axis points the other way from the engine's
    pub mirror_x: bool,
    /// `env_logger` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rom_path: PathBuf::from("sm64.us.z64"),
            library_path: PathBuf::from(default_library_name()),
            level_path: None,
            dump_texture: true,
            texture_dump_path: PathBuf::from("mario_texture.png"),
            mirror_x: true,
            log_filter: "info".to_string(),
        }
    }
}

fn default_library_name() -> &'static str {
    #[cfg(target_os = "windows")]
    return "sm64.dll";

    #[cfg(target_os = "macos")]
    return "libsm64.dylib";

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    return "libsm64.so";
}

impl Config {
    pub fn from_toml(src: &str) -> Result<Self> {
        toml::from_str(src).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load `path`, falling back to defaults if it does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(src) => {
                log::debug!("Loading config from {}", path.display());
                Self::from_toml(&src)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(Error::Asset {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
