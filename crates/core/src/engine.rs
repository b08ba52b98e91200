use crate::surface::Surface;

pub const SM64_TEXTURE_WIDTH: u32 = 64 * 11;
pub const SM64_TEXTURE_HEIGHT: u32 = 64;
pub const SM64_GEO_MAX_TRIANGLES: usize = 1024;

/// Bytes in the decoded RGBA texture atlas.
pub const TEXTURE_ATLAS_BYTES: usize = 4 * (SM64_TEXTURE_WIDTH * SM64_TEXTURE_HEIGHT) as usize;

bitflags::bitflags! {
    #[repr(transparent)]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct Buttons: u8 {
        const A = 1 << 0;
        const B = 1 << 1;
        const Z = 1 << 2;
    }
}

/// Same layout as `SM64MarioInputs`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MarioInputs {
    pub cam_look_x: f32,
    pub cam_look_z: f32,
    pub stick_x: f32,
    pub stick_y: f32,
    pub button_a: u8,
    pub button_b: u8,
    pub button_z: u8,
}

impl MarioInputs {
    pub fn set_buttons(&mut self, buttons: Buttons) {
        self.button_a = buttons.contains(Buttons::A) as u8;
        self.button_b = buttons.contains(Buttons::B) as u8;
        self.button_z = buttons.contains(Buttons::Z) as u8;
    }
}

/// Same layout as `SM64MarioState`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MarioState {
    pub position: [f32; 3],
    pub velocity: [f32; 3],
    pub face_angle: f32,
    pub health: i16,
    pub action: u32,
    pub flags: u32,
    pub particle_flags: u32,
    pub invinc_timer: i16,
}

/// Owned vertex buffers the engine fills on every tick.
#[derive(Clone, Debug)]
pub struct MarioGeometry {
    pub position: Vec<f32>,
    pub normal: Vec<f32>,
    pub color: Vec<f32>,
    pub uv: Vec<f32>,
    pub triangles_used: u16,
}

impl Default for MarioGeometry {
    fn default() -> Self {
        Self {
            position: vec![0.0; 9 * SM64_GEO_MAX_TRIANGLES],
            normal: vec![0.0; 9 * SM64_GEO_MAX_TRIANGLES],
            color: vec![0.0; 9 * SM64_GEO_MAX_TRIANGLES],
            uv: vec![0.0; 6 * SM64_GEO_MAX_TRIANGLES],
            triangles_used: 0,
        }
    }
}

/// Every libsm64 entry point the adapter drives.
///
/// Positions and velocities here are always in engine space. Engine-side
/// failures are not reported back; the library has no channel for them.
pub trait Engine {
    fn global_init(&mut self, rom: &[u8], texture: &mut [u8]);
    fn global_terminate(&mut self);
    fn audio_init(&mut self, rom: &[u8]);

    /// Replace the engine's static geometry with `surfaces`.
    fn static_surfaces_load(&mut self, surfaces: &[Surface]);
    /// Drop every static surface the engine holds.
    fn static_surfaces_unload(&mut self);

    /// Returns the new Mario's id, or a negative value if there is no
    /// floor under the spawn point.
    fn mario_create(&mut self, x: f32, y: f32, z: f32) -> i32;
    fn mario_delete(&mut self, id: i32);
    fn mario_tick(
        &mut self,
        id: i32,
        inputs: &MarioInputs,
        state: &mut MarioState,
        geometry: &mut MarioGeometry,
    );

    fn set_mario_position(&mut self, id: i32, x: f32, y: f32, z: f32);
    fn set_mario_velocity(&mut self, id: i32, x: f32, y: f32, z: f32);
    fn set_mario_forward_velocity(&mut self, id: i32, vel: f32);
    fn set_mario_faceangle(&mut self, id: i32, angle: f32);
    fn set_mario_health(&mut self, id: i32, health: u16);
    fn set_mario_action(&mut self, id: i32, action: u32);
    fn set_mario_animation(&mut self, id: i32, anim_id: i32);
    fn set_mario_anim_frame(&mut self, id: i32, frame: i16);
    fn set_mario_invincibility(&mut self, id: i32, timer: i16);
    fn mario_take_damage(&mut self, id: i32, damage: u32, subtype: u32, x: f32, y: f32, z: f32);
    fn mario_heal(&mut self, id: i32, heal_counter: u8);

    fn play_sound_global(&mut self, sound_bits: i32);
    fn play_music(&mut self, player: u8, seq_args: u16, fade_timer: u16);
    fn stop_background_music(&mut self, seq_id: u16);
}
