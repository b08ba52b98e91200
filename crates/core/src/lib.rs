//! Host-agnostic core of the libsm64 adapter: the static surface registry,
//! the engine seam and the session that ties them together.

pub mod assets;
pub mod config;
pub mod engine;
pub mod error;
pub mod host;
pub mod session;
pub mod sound;
pub mod surface;

#[cfg(test)]
pub(crate) mod testing;

pub use config::Config;
pub use engine::{Buttons, Engine, MarioGeometry, MarioInputs, MarioState};
pub use error::{Error, Result};
pub use host::{host_count, host_flag, host_index, host_mario_id};
pub use session::{GeometryChannel, Mario, Session};
pub use surface::{Surface, SurfaceRegistry};
