//! The host passes and receives nothing but doubles. These are the
//! conversions between those scalars and session calls; the exported
//! functions are thin wrappers over them.

use crate::engine::Engine;
use crate::session::{GeometryChannel, Session};
use crate::surface::Surface;

/// Host scalars carry indices as doubles. Negative and NaN have no index.
#[inline]
pub fn host_index(value: f64) -> Option<usize> {
    if value >= 0.0 {
        Some(value as usize)
    } else {
        None
    }
}

/// Remove counts are truncated; anything negative means "all".
#[inline]
pub fn host_count(value: f64) -> isize {
    if value < 0.0 {
        -1
    } else {
        value as isize
    }
}

#[inline]
pub fn host_flag(value: f64) -> bool {
    value as i32 != 0
}

#[inline]
pub fn host_mario_id(value: f64) -> i32 {
    value as i32
}

impl<E: Engine> Session<E> {
    /// Returns the new registry length.
    pub fn host_add_static_surface(
        &mut self,
        surface_type: f64,
        force: f64,
        terrain: f64,
        coords: [f64; 9],
    ) -> f64 {
        let surface = Surface::from_host(surface_type, force, terrain, coords);
        self.add_static_surface(surface) as f64
    }

    /// Always 1.
    pub fn host_remove_static_surfaces(&mut self, count: f64) -> f64 {
        self.remove_static_surfaces(host_count(count));
        1.0
    }

    /// Returns the number of surfaces installed.
    pub fn host_load_static_surfaces(&mut self) -> f64 {
        self.load_static_surfaces() as f64
    }

    /// Vertex component of a registry surface, 0 if either index is out of
    /// range.
    pub fn host_static_surface(&self, index: f64, component: f64) -> f64 {
        match (host_index(index), host_index(component)) {
            (Some(i), Some(j)) => self.static_surface_component(i, j).map_or(0.0, f64::from),
            _ => 0.0,
        }
    }

    /// `vertex` is the flat offset of a vertex in its buffer and `axis` is
    /// added on top. Unknown ids and out-of-range offsets read 0.
    pub fn host_geometry(&self, id: f64, channel: GeometryChannel, vertex: f64, axis: usize) -> f64 {
        host_index(vertex)
            .and_then(|v| v.checked_add(axis))
            .and_then(|index| self.geometry_component(host_mario_id(id), channel, index))
            .map_or(0.0, f64::from)
    }
}
