//! Runtime binding to the libsm64 shared library.

use std::path::{Path, PathBuf};

use gmsm64_core::{Engine, MarioGeometry, MarioInputs, MarioState, Surface};
use libloading::Library;

#[derive(thiserror::Error, Debug)]
pub enum BindingError {
    #[error("failed to load {}: {source}", path.display())]
    Library {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("missing symbol {name}: {source}")]
    Symbol {
        name: &'static str,
        #[source]
        source: libloading::Error,
    },
}

/// `SM64MarioGeometryBuffers`: borrowed pointers into a `MarioGeometry`.
#[repr(C)]
struct GeometryBuffers {
    position: *mut f32,
    normal: *mut f32,
    color: *mut f32,
    uv: *mut f32,
    num_triangles_used: u16,
}

macro_rules! sm64_api {
    ($($name:ident: fn($($arg:ty),*) $(-> $ret:ty)?;)*) => {
        struct Api {
            $($name: unsafe extern "C" fn($($arg),*) $(-> $ret)?,)*
        }

        impl Api {
            unsafe fn resolve(lib: &Library) -> Result<Self, BindingError> {
                Ok(Self {
                    $($name: *lib
                        .get::<unsafe extern "C" fn($($arg),*) $(-> $ret)?>(stringify!($name).as_bytes())
                        .map_err(|source| BindingError::Symbol { name: stringify!($name), source })?,)*
                })
            }
        }
    };
}

sm64_api! {
    sm64_global_init: fn(*const u8, *mut u8);
    sm64_global_terminate: fn();
    sm64_audio_init: fn(*const u8);
    sm64_static_surfaces_load: fn(*const Surface, u32);
    sm64_mario_create: fn(f32, f32, f32) -> i32;
    sm64_mario_tick: fn(i32, *const MarioInputs, *mut MarioState, *mut GeometryBuffers);
    sm64_mario_delete: fn(i32);
    sm64_set_mario_position: fn(i32, f32, f32, f32);
    sm64_set_mario_velocity: fn(i32, f32, f32, f32);
    sm64_set_mario_forward_velocity: fn(i32, f32);
    sm64_set_mario_faceangle: fn(i32, f32);
    sm64_set_mario_health: fn(i32, u16);
    sm64_set_mario_action: fn(i32, u32);
    sm64_set_mario_animation: fn(i32, i32);
    sm64_set_mario_anim_frame: fn(i32, i16);
    sm64_set_mario_invincibility: fn(i32, i16);
    sm64_mario_take_damage: fn(i32, u32, u32, f32, f32, f32);
    sm64_mario_heal: fn(i32, u8);
    sm64_play_sound_global: fn(i32);
    sm64_play_music: fn(u8, u16, u16);
    sm64_stop_background_music: fn(u16);
}

const UNLOAD_SYMBOL: &[u8] = b"sm64_static_surfaces_unload";

/// libsm64 loaded from disk. The library stays mapped for as long as this
/// value lives.
pub struct Libsm64 {
    api: Api,
    /// Older builds have no separate unload; their load replaces in place.
    unload: Option<unsafe extern "C" fn()>,
    _lib: Library,
}

impl Libsm64 {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BindingError> {
        let path = path.as_ref();
        let lib = unsafe { Library::new(path) }.map_err(|source| BindingError::Library {
            path: path.to_path_buf(),
            source,
        })?;
        let api = unsafe { Api::resolve(&lib)? };
        let unload = unsafe { lib.get::<unsafe extern "C" fn()>(UNLOAD_SYMBOL) }
            .ok()
            .map(|sym| *sym);
        if unload.is_none() {
            log::debug!("{} has no static surface unload, load replaces in place", path.display());
        }
        log::info!("Loaded libsm64 from {}", path.display());
        Ok(Self { api, unload, _lib: lib })
    }
}

impl Engine for Libsm64 {
    fn global_init(&mut self, rom: &[u8], texture: &mut [u8]) {
        unsafe { (self.api.sm64_global_init)(rom.as_ptr(), texture.as_mut_ptr()) }
    }

    fn global_terminate(&mut self) {
        unsafe { (self.api.sm64_global_terminate)() }
    }

    fn audio_init(&mut self, rom: &[u8]) {
        unsafe { (self.api.sm64_audio_init)(rom.as_ptr()) }
    }

    fn static_surfaces_load(&mut self, surfaces: &[Surface]) {
        unsafe { (self.api.sm64_static_surfaces_load)(surfaces.as_ptr(), surfaces.len() as u32) }
    }

    fn static_surfaces_unload(&mut self) {
        if let Some(unload) = self.unload {
            unsafe { unload() }
        }
    }

    fn mario_create(&mut self, x: f32, y: f32, z: f32) -> i32 {
        unsafe { (self.api.sm64_mario_create)(x, y, z) }
    }

    fn mario_delete(&mut self, id: i32) {
        unsafe { (self.api.sm64_mario_delete)(id) }
    }

    fn mario_tick(
        &mut self,
        id: i32,
        inputs: &MarioInputs,
        state: &mut MarioState,
        geometry: &mut MarioGeometry,
    ) {
        let mut buffers = GeometryBuffers {
            position: geometry.position.as_mut_ptr(),
            normal: geometry.normal.as_mut_ptr(),
            color: geometry.color.as_mut_ptr(),
            uv: geometry.uv.as_mut_ptr(),
            num_triangles_used: 0,
        };
        unsafe { (self.api.sm64_mario_tick)(id, inputs, state, &mut buffers) };
        geometry.triangles_used = buffers.num_triangles_used;
    }

    fn set_mario_position(&mut self, id: i32, x: f32, y: f32, z: f32) {
        unsafe { (self.api.sm64_set_mario_position)(id, x, y, z) }
    }

    fn set_mario_velocity(&mut self, id: i32, x: f32, y: f32, z: f32) {
        unsafe { (self.api.sm64_set_mario_velocity)(id, x, y, z) }
    }

    fn set_mario_forward_velocity(&mut self, id: i32, vel: f32) {
        unsafe { (self.api.sm64_set_mario_forward_velocity)(id, vel) }
    }

    fn set_mario_faceangle(&mut self, id: i32, angle: f32) {
        unsafe { (self.api.sm64_set_mario_faceangle)(id, angle) }
    }

    fn set_mario_health(&mut self, id: i32, health: u16) {
        unsafe { (self.api.sm64_set_mario_health)(id, health) }
    }

    fn set_mario_action(&mut self, id: i32, action: u32) {
        unsafe { (self.api.sm64_set_mario_action)(id, action) }
    }

    fn set_mario_animation(&mut self, id: i32, anim_id: i32) {
        unsafe { (self.api.sm64_set_mario_animation)(id, anim_id) }
    }

    fn set_mario_anim_frame(&mut self, id: i32, frame: i16) {
        unsafe { (self.api.sm64_set_mario_anim_frame)(id, frame) }
    }

    fn set_mario_invincibility(&mut self, id: i32, timer: i16) {
        unsafe { (self.api.sm64_set_mario_invincibility)(id, timer) }
    }

    fn mario_take_damage(&mut self, id: i32, damage: u32, subtype: u32, x: f32, y: f32, z: f32) {
        unsafe { (self.api.sm64_mario_take_damage)(id, damage, subtype, x, y, z) }
    }

    fn mario_heal(&mut self, id: i32, heal_counter: u8) {
        unsafe { (self.api.sm64_mario_heal)(id, heal_counter) }
    }

    fn play_sound_global(&mut self, sound_bits: i32) {
        unsafe { (self.api.sm64_play_sound_global)(sound_bits) }
    }

    fn play_music(&mut self, player: u8, seq_args: u16, fade_timer: u16) {
        unsafe { (self.api.sm64_play_music)(player, seq_args, fade_timer) }
    }

    fn stop_background_music(&mut self, seq_id: u16) {
        unsafe { (self.api.sm64_stop_background_music)(seq_id) }
    }
}
