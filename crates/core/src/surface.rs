use serde::Deserialize;

pub const SURFACE_DEFAULT: i16 = 0x0000;
pub const SURFACE_BURNING: i16 = 0x0001;
pub const SURFACE_HANGABLE: i16 = 0x0005;
pub const SURFACE_SLOW: i16 = 0x0009;
pub const SURFACE_DEATH_PLANE: i16 = 0x000A;
pub const SURFACE_VERY_SLIPPERY: i16 = 0x0013;
pub const SURFACE_SLIPPERY: i16 = 0x0014;
pub const SURFACE_NOT_SLIPPERY: i16 = 0x0015;

pub const TERRAIN_GRASS: u16 = 0x0000;
pub const TERRAIN_STONE: u16 = 0x0001;
pub const TERRAIN_SNOW: u16 = 0x0002;
pub const TERRAIN_SAND: u16 = 0x0003;
pub const TERRAIN_SPOOKY: u16 = 0x0004;
pub const TERRAIN_WATER: u16 = 0x0005;
pub const TERRAIN_SLIDE: u16 = 0x0006;

/// Flattened vertex components per surface (3 vertices x 3 axes).
pub const SURFACE_COMPONENTS: usize = 9;

/// One static collision triangle. Same layout as libsm64's `SM64Surface`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Surface {
    #[serde(rename = "type")]
    pub surface_type: i16,
    pub force: i16,
    pub terrain: u16,
    pub vertices: [[i32; 3]; 3],
}

impl Surface {
    /// Build a surface from host scalars. Codes are narrowed, coordinates
    /// truncated toward zero; `as` saturates anything out of range.
    pub fn from_host(surface_type: f64, force: f64, terrain: f64, coords: [f64; 9]) -> Self {
        let mut vertices = [[0i32; 3]; 3];
        for (i, c) in coords.iter().enumerate() {
            vertices[i / 3][i % 3] = *c as i32;
        }
        Self {
            surface_type: surface_type as i16,
            force: force as i16,
            terrain: terrain as u16,
            vertices,
        }
    }

    /// Component `j` of the flattened vertex list, `None` past the ninth.
    #[inline]
    pub fn component(&self, j: usize) -> Option<i32> {
        if j < SURFACE_COMPONENTS {
            Some(self.vertices[j / 3][j % 3])
        } else {
            None
        }
    }
}

/// The authoritative, append-ordered list of static collision surfaces.
///
/// The engine keeps its own copy, which is only refreshed by an explicit
/// load; nothing here touches the engine.
#[derive(Debug, Default)]
pub struct SurfaceRegistry {
    surfaces: Vec<Surface>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.surfaces.capacity()
    }

    pub fn as_slice(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Append at the end, returning the new length.
    pub fn push(&mut self, surface: Surface) -> usize {
        self.surfaces.push(surface);
        self.surfaces.len()
    }

    /// Drop `count` surfaces from the end. A negative count drops all of
    /// them. Storage is released once the registry is empty.
    pub fn remove(&mut self, count: isize) -> usize {
        let keep = if count < 0 {
            0
        } else {
            self.surfaces.len().saturating_sub(count as usize)
        };
        self.surfaces.truncate(keep);
        if self.surfaces.is_empty() {
            self.surfaces = Vec::new();
        }
        self.surfaces.len()
    }

    /// Vertex component `j` of surface `index`, or `None` if either is out
    /// of range.
    pub fn component(&self, index: usize, j: usize) -> Option<i32> {
        self.surfaces.get(index).and_then(|s| s.component(j))
    }
}

#[cfg(test)]
mod tests {
    use super::{Surface, SurfaceRegistry, TERRAIN_STONE};

    fn tri(seed: i32) -> Surface {
        Surface {
            surface_type: 0,
            force: 0,
            terrain: TERRAIN_STONE,
            vertices: [[seed, 0, 0], [seed + 1, 0, 0], [seed, 0, 1]],
        }
    }

    #[test]
    fn push_returns_running_length() {
        let mut reg = SurfaceRegistry::new();
        for n in 1..=20 {
            assert_eq!(reg.push(tri(n as i32)), n);
        }
        assert_eq!(reg.len(), 20);
        assert_eq!(reg.as_slice()[7], tri(8));
    }

    #[test]
    fn from_host_truncates_toward_zero() {
        let s = Surface::from_host(
            1.0,
            2.9,
            5.0,
            [1.9, -1.9, 0.5, 100.0, -0.2, 7.99, -3000.5, 3000.5, 0.0],
        );
        assert_eq!(s.surface_type, 1);
        assert_eq!(s.force, 2);
        assert_eq!(s.terrain, 5);
        assert_eq!(s.vertices, [[1, -1, 0], [100, 0, 7], [-3000, 3000, 0]]);
    }

    #[test]
    fn from_host_saturates_codes() {
        let s = Surface::from_host(1e9, -1e9, -4.0, [0.0; 9]);
        assert_eq!(s.surface_type, i16::MAX);
        assert_eq!(s.force, i16::MIN);
        assert_eq!(s.terrain, 0);
    }

    #[test]
    fn partial_remove_keeps_prefix() {
        let mut reg = SurfaceRegistry::new();
        for n in 0..6 {
            reg.push(tri(n * 10));
        }
        assert_eq!(reg.remove(2), 4);
        let expected: Vec<Surface> = (0..4).map(|n| tri(n * 10)).collect();
        assert_eq!(reg.as_slice(), expected.as_slice());
    }

    #[test]
    fn over_remove_releases_storage() {
        let mut reg = SurfaceRegistry::new();
        for n in 0..3 {
            reg.push(tri(n));
        }
        assert_eq!(reg.remove(5), 0);
        assert!(reg.is_empty());
        assert_eq!(reg.capacity(), 0);
        assert_eq!(reg.component(0, 0), None);

        assert_eq!(reg.push(tri(42)), 1);
        assert_eq!(reg.as_slice(), &[tri(42)]);
    }

    #[test]
    fn negative_remove_clears() {
        let mut reg = SurfaceRegistry::new();
        reg.push(tri(1));
        reg.push(tri(2));
        assert_eq!(reg.remove(-1), 0);
        assert_eq!(reg.capacity(), 0);
    }

    #[test]
    fn remove_zero_is_noop() {
        let mut reg = SurfaceRegistry::new();
        reg.push(tri(1));
        assert_eq!(reg.remove(0), 1);
        assert_eq!(reg.as_slice(), &[tri(1)]);
    }

    #[test]
    fn component_bounds() {
        let mut reg = SurfaceRegistry::new();
        reg.push(Surface::from_host(0.0, 0.0, 0.0, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]));
        for j in 0..9 {
            assert_eq!(reg.component(0, j), Some(j as i32 + 1));
        }
        assert_eq!(reg.component(0, 9), None);
        assert_eq!(reg.component(1, 0), None);
        assert_eq!(reg.component(usize::MAX, usize::MAX), None);
    }
}
