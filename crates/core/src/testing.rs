//! A fake engine that records every call, for session tests.

use std::cell::Cell;
use std::rc::Rc;

use crate::engine::{Engine, MarioGeometry, MarioInputs, MarioState};
use crate::surface::Surface;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    GlobalInit { rom_len: usize, texture_len: usize },
    GlobalTerminate,
    AudioInit { rom_len: usize },
    Load(Vec<Surface>),
    Unload,
    Create([f32; 3]),
    Delete(i32),
    Tick { id: i32, inputs: MarioInputs },
    SetPosition(i32, [f32; 3]),
    SetVelocity(i32, [f32; 3]),
    SetForwardVelocity(i32, f32),
    SetFaceAngle(i32, f32),
    SetHealth(i32, u16),
    SetAction(i32, u32),
    SetAnimation(i32, i32),
    SetAnimFrame(i32, i16),
    SetInvincibility(i32, i16),
    TakeDamage { id: i32, damage: u32, subtype: u32, pos: [f32; 3] },
    Heal(i32, u8),
    PlaySound(i32),
    PlayMusic(u8, u16, u16),
    StopMusic(u16),
}

/// Ticks copy `next_state` into the caller's state and fill the first
/// `next_triangles` triangles of each buffer with a ramp.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub calls: Vec<Call>,
    pub next_id: i32,
    pub next_state: MarioState,
    pub next_triangles: u16,
    /// Bumped on every global terminate; outlives the engine.
    pub terminations: Option<Rc<Cell<u32>>>,
}

impl RecordingEngine {
    pub fn loads(&self) -> Vec<&Vec<Surface>> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Load(s) => Some(s),
                _ => None,
            })
            .collect()
    }
}

impl Engine for RecordingEngine {
    fn global_init(&mut self, rom: &[u8], texture: &mut [u8]) {
        for (i, px) in texture.iter_mut().enumerate() {
            *px = (i % 251) as u8;
        }
        self.calls.push(Call::GlobalInit {
            rom_len: rom.len(),
            texture_len: texture.len(),
        });
    }

    fn global_terminate(&mut self) {
        if let Some(count) = &self.terminations {
            count.set(count.get() + 1);
        }
        self.calls.push(Call::GlobalTerminate);
    }

    fn audio_init(&mut self, rom: &[u8]) {
        self.calls.push(Call::AudioInit { rom_len: rom.len() });
    }

    fn static_surfaces_load(&mut self, surfaces: &[Surface]) {
        self.calls.push(Call::Load(surfaces.to_vec()));
    }

    fn static_surfaces_unload(&mut self) {
        self.calls.push(Call::Unload);
    }

    fn mario_create(&mut self, x: f32, y: f32, z: f32) -> i32 {
        self.calls.push(Call::Create([x, y, z]));
        let id = self.next_id;
        if id >= 0 {
            self.next_id += 1;
        }
        id
    }

    fn mario_delete(&mut self, id: i32) {
        self.calls.push(Call::Delete(id));
    }

    fn mario_tick(
        &mut self,
        id: i32,
        inputs: &MarioInputs,
        state: &mut MarioState,
        geometry: &mut MarioGeometry,
    ) {
        self.calls.push(Call::Tick { id, inputs: *inputs });
        *state = self.next_state;
        let n = self.next_triangles as usize;
        for i in 0..n * 9 {
            geometry.position[i] = i as f32;
            geometry.normal[i] = i as f32 * 0.5;
            geometry.color[i] = 0.5;
        }
        for i in 0..n * 6 {
            geometry.uv[i] = i as f32 * 0.25;
        }
        geometry.triangles_used = self.next_triangles;
    }

    fn set_mario_position(&mut self, id: i32, x: f32, y: f32, z: f32) {
        self.calls.push(Call::SetPosition(id, [x, y, z]));
    }

    fn set_mario_velocity(&mut self, id: i32, x: f32, y: f32, z: f32) {
        self.calls.push(Call::SetVelocity(id, [x, y, z]));
    }

    fn set_mario_forward_velocity(&mut self, id: i32, vel: f32) {
        self.calls.push(Call::SetForwardVelocity(id, vel));
    }

    fn set_mario_faceangle(&mut self, id: i32, angle: f32) {
        self.calls.push(Call::SetFaceAngle(id, angle));
    }

    fn set_mario_health(&mut self, id: i32, health: u16) {
        self.calls.push(Call::SetHealth(id, health));
    }

    fn set_mario_action(&mut self, id: i32, action: u32) {
        self.calls.push(Call::SetAction(id, action));
    }

    fn set_mario_animation(&mut self, id: i32, anim_id: i32) {
        self.calls.push(Call::SetAnimation(id, anim_id));
    }

    fn set_mario_anim_frame(&mut self, id: i32, frame: i16) {
        self.calls.push(Call::SetAnimFrame(id, frame));
    }

    fn set_mario_invincibility(&mut self, id: i32, timer: i16) {
        self.calls.push(Call::SetInvincibility(id, timer));
    }

    fn mario_take_damage(&mut self, id: i32, damage: u32, subtype: u32, x: f32, y: f32, z: f32) {
        self.calls.push(Call::TakeDamage {
            id,
            damage,
            subtype,
            pos: [x, y, z],
        });
    }

    fn mario_heal(&mut self, id: i32, heal_counter: u8) {
        self.calls.push(Call::Heal(id, heal_counter));
    }

    fn play_sound_global(&mut self, sound_bits: i32) {
        self.calls.push(Call::PlaySound(sound_bits));
    }

    fn play_music(&mut self, player: u8, seq_args: u16, fade_timer: u16) {
        self.calls.push(Call::PlayMusic(player, seq_args, fade_timer));
    }

    fn stop_background_music(&mut self, seq_id: u16) {
        self.calls.push(Call::StopMusic(seq_id));
    }
}
