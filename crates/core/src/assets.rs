//! Files the adapter reads or writes: the ROM, the texture atlas dump and
//! level collision meshes.

use std::path::Path;

use image::RgbaImage;
use serde::Deserialize;

use crate::engine::{SM64_TEXTURE_HEIGHT, SM64_TEXTURE_WIDTH};
use crate::error::{Error, Result};
use crate::surface::Surface;

/// Read a whole file into a fresh buffer.
pub fn read_asset(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| Error::Asset {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

/// Write the engine's decoded RGBA texture atlas as a PNG.
pub fn dump_texture(path: impl AsRef<Path>, rgba: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let img = RgbaImage::from_raw(SM64_TEXTURE_WIDTH, SM64_TEXTURE_HEIGHT, rgba.to_vec())
        .ok_or_else(|| {
            Error::Engine(format!(
                "texture atlas is {} bytes, expected {}x{} RGBA",
                rgba.len(),
                SM64_TEXTURE_WIDTH,
                SM64_TEXTURE_HEIGHT
            ))
        })?;
    img.save(path)?;
    log::info!(
        "Dumped {}x{} texture atlas to {}",
        SM64_TEXTURE_WIDTH,
        SM64_TEXTURE_HEIGHT,
        path.display()
    );
    Ok(())
}

#[derive(Deserialize)]
struct LevelFile {
    #[serde(default, rename = "surface")]
    surfaces: Vec<Surface>,
}

/// Parse level TOML: a list of `[[surface]]` tables with `type`, `force`,
/// `terrain` and `vertices = [[x, y, z], [x, y, z], [x, y, z]]`.
pub fn parse_level(path: &Path, src: &str) -> Result<Vec<Surface>> {
    let level: LevelFile = toml::from_str(src).map_err(|e| Error::Level {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(level.surfaces)
}

pub fn load_level(path: impl AsRef<Path>) -> Result<Vec<Surface>> {
    let path = path.as_ref();
    let raw = read_asset(path)?;
    let src = String::from_utf8(raw).map_err(|e| Error::Level {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let surfaces = parse_level(path, &src)?;
    log::info!("Loaded {} surfaces from {}", surfaces.len(), path.display());
    Ok(surfaces)
}
