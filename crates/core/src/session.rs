//! The adapter context: one engine, its static surface registry and every
//! live Mario, created by [`Session::init`] and torn down by
//! [`Session::terminate`] or on drop.

use std::collections::HashMap;

use crate::assets;
use crate::config::Config;
use crate::engine::{Buttons, Engine, MarioGeometry, MarioInputs, MarioState, TEXTURE_ATLAS_BYTES};
use crate::error::Result;
use crate::surface::{Surface, SurfaceRegistry};

/// One simulated character and the buffers its ticks write into.
#[derive(Clone, Debug, Default)]
pub struct Mario {
    pub inputs: MarioInputs,
    pub state: MarioState,
    pub geometry: MarioGeometry,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GeometryChannel {
    Position,
    Normal,
    Color,
    Uv,
}

pub struct Session<E: Engine> {
    engine: E,
    registry: SurfaceRegistry,
    marios: HashMap<i32, Mario>,
    mirror_x: bool,
    terminated: bool,
}

impl<E: Engine> Session<E> {
    /// Read the ROM (and level, if configured), bring up the engine and
    /// install the level's static geometry. Nothing reaches the engine if
    /// either file cannot be read.
    pub fn init(mut engine: E, config: &Config) -> Result<Self> {
        let rom = assets::read_asset(&config.rom_path)?;
        let level = match &config.level_path {
            Some(path) => Some(assets::load_level(path)?),
            None => None,
        };

        let mut texture = vec![0u8; TEXTURE_ATLAS_BYTES];
        engine.global_terminate();
        engine.global_init(&rom, &mut texture);
        engine.audio_init(&rom);

        if config.dump_texture {
            if let Err(e) = assets::dump_texture(&config.texture_dump_path, &texture) {
                log::warn!("{e}");
            }
        }

        if let Some(surfaces) = level {
            engine.static_surfaces_load(&surfaces);
        }

        log::info!("Engine initialized from {}", config.rom_path.display());

        Ok(Self {
            engine,
            registry: SurfaceRegistry::new(),
            marios: HashMap::new(),
            mirror_x: config.mirror_x,
            terminated: false,
        })
    }

    /// Delete every live Mario and shut the engine down. Only the first
    /// call reaches the engine.
    pub fn terminate(&mut self) {
        if self.terminated {
            return;
        }
        let mut ids: Vec<i32> = self.marios.drain().map(|(id, _)| id).collect();
        ids.sort_unstable();
        for id in ids {
            self.engine.mario_delete(id);
        }
        self.engine.global_terminate();
        self.terminated = true;
        log::info!("Engine terminated");
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn registry(&self) -> &SurfaceRegistry {
        &self.registry
    }

    /// Host and engine X axes are mirrored when `mirror_x` is set; the
    /// mapping is its own inverse.
    #[inline]
    fn flip(&self, v: [f32; 3]) -> [f32; 3] {
        if self.mirror_x {
            [-v[0], v[1], v[2]]
        } else {
            v
        }
    }

    #[inline]
    fn flip_angle(&self, angle: f32) -> f32 {
        if self.mirror_x {
            -angle
        } else {
            angle
        }
    }

    // Static surfaces

    pub fn add_static_surface(&mut self, surface: Surface) -> usize {
        self.registry.push(surface)
    }

    /// Negative `count` removes everything.
    pub fn remove_static_surfaces(&mut self, count: isize) -> usize {
        self.registry.remove(count)
    }

    /// Replace the engine's static geometry with the registry contents.
    pub fn load_static_surfaces(&mut self) -> usize {
        self.engine.static_surfaces_unload();
        self.engine.static_surfaces_load(self.registry.as_slice());
        log::debug!("Loaded {} static surfaces", self.registry.len());
        self.registry.len()
    }

    pub fn static_surface_component(&self, index: usize, j: usize) -> Option<i32> {
        self.registry.component(index, j)
    }

    // Marios

    /// Spawn at a host-space position. Negative ids mean the engine refused
    /// (no floor below) and nothing is tracked.
    pub fn create_mario(&mut self, position: [f32; 3]) -> i32 {
        let [x, y, z] = self.flip(position);
        let id = self.engine.mario_create(x, y, z);
        if id < 0 {
            log::warn!("Mario spawn at {:?} rejected by engine", position);
            return id;
        }
        self.marios.insert(id, Mario::default());
        log::debug!("Created Mario {id}");
        id
    }

    pub fn delete_mario(&mut self, id: i32) -> bool {
        if self.marios.remove(&id).is_none() {
            return false;
        }
        self.engine.mario_delete(id);
        true
    }

    pub fn mario(&self, id: i32) -> Option<&Mario> {
        self.marios.get(&id)
    }

    pub fn mario_count(&self) -> usize {
        self.marios.len()
    }

    /// Store inputs for the next tick. The camera look vector is taken from
    /// the last ticked position towards the camera.
    pub fn set_mario_input(
        &mut self,
        id: i32,
        buttons: Buttons,
        cam_x: f32,
        cam_z: f32,
        stick_x: f32,
        stick_y: f32,
    ) -> bool {
        let cam = self.flip([cam_x, 0.0, cam_z]);
        let Some(mario) = self.marios.get_mut(&id) else {
            return false;
        };
        let inputs = &mut mario.inputs;
        inputs.set_buttons(buttons);
        inputs.cam_look_x = mario.state.position[0] - cam[0];
        inputs.cam_look_z = mario.state.position[2] - cam[2];
        inputs.stick_x = stick_x;
        inputs.stick_y = stick_y;
        true
    }

    pub fn tick_mario(&mut self, id: i32) -> bool {
        let Some(mario) = self.marios.get_mut(&id) else {
            return false;
        };
        self.engine
            .mario_tick(id, &mario.inputs, &mut mario.state, &mut mario.geometry);
        true
    }

    pub fn mario_state(&self, id: i32) -> Option<&MarioState> {
        self.marios.get(&id).map(|m| &m.state)
    }

    pub fn mario_position(&self, id: i32) -> Option<[f32; 3]> {
        self.mario_state(id).map(|s| self.flip(s.position))
    }

    pub fn mario_velocity(&self, id: i32) -> Option<[f32; 3]> {
        self.mario_state(id).map(|s| self.flip(s.velocity))
    }

    pub fn mario_face_angle(&self, id: i32) -> Option<f32> {
        self.mario_state(id).map(|s| self.flip_angle(s.face_angle))
    }

    /// Flat index into one of the geometry buffers, converted to host
    /// space. Anything past the triangles used by the last tick is `None`.
    pub fn geometry_component(&self, id: i32, channel: GeometryChannel, index: usize) -> Option<f32> {
        let geometry = &self.marios.get(&id)?.geometry;
        let used = geometry.triangles_used as usize;
        let (buf, limit) = match channel {
            GeometryChannel::Position => (&geometry.position, used * 9),
            GeometryChannel::Normal => (&geometry.normal, used * 9),
            GeometryChannel::Color => (&geometry.color, used * 9),
            GeometryChannel::Uv => (&geometry.uv, used * 6),
        };
        if index >= limit {
            return None;
        }
        let v = *buf.get(index)?;
        Some(match channel {
            GeometryChannel::Position | GeometryChannel::Normal if self.mirror_x && index % 3 == 0 => -v,
            GeometryChannel::Color => v * 255.0,
            _ => v,
        })
    }

    fn tracked(&self, id: i32) -> bool {
        self.marios.contains_key(&id)
    }

    pub fn set_mario_position(&mut self, id: i32, position: [f32; 3]) -> bool {
        if !self.tracked(id) {
            return false;
        }
        let [x, y, z] = self.flip(position);
        self.engine.set_mario_position(id, x, y, z);
        true
    }

    pub fn set_mario_velocity(&mut self, id: i32, velocity: [f32; 3]) -> bool {
        if !self.tracked(id) {
            return false;
        }
        let [x, y, z] = self.flip(velocity);
        self.engine.set_mario_velocity(id, x, y, z);
        true
    }

    pub fn set_mario_forward_velocity(&mut self, id: i32, vel: f32) -> bool {
        if !self.tracked(id) {
            return false;
        }
        self.engine.set_mario_forward_velocity(id, vel);
        true
    }

    pub fn set_mario_face_angle(&mut self, id: i32, angle: f32) -> bool {
        if !self.tracked(id) {
            return false;
        }
        let angle = self.flip_angle(angle);
        self.engine.set_mario_faceangle(id, angle);
        true
    }

    pub fn set_mario_health(&mut self, id: i32, health: u16) -> bool {
        if !self.tracked(id) {
            return false;
        }
        self.engine.set_mario_health(id, health);
        true
    }

    pub fn set_mario_action(&mut self, id: i32, action: u32) -> bool {
        if !self.tracked(id) {
            return false;
        }
        self.engine.set_mario_action(id, action);
        true
    }

    pub fn set_mario_animation(&mut self, id: i32, anim_id: i32) -> bool {
        if !self.tracked(id) {
            return false;
        }
        self.engine.set_mario_animation(id, anim_id);
        true
    }

    pub fn set_mario_anim_frame(&mut self, id: i32, frame: i16) -> bool {
        if !self.tracked(id) {
            return false;
        }
        self.engine.set_mario_anim_frame(id, frame);
        true
    }

    pub fn set_mario_invincibility(&mut self, id: i32, timer: i16) -> bool {
        if !self.tracked(id) {
            return false;
        }
        self.engine.set_mario_invincibility(id, timer);
        true
    }

    /// `source` is the host-space point the hit came from.
    pub fn mario_take_damage(&mut self, id: i32, damage: u32, subtype: u32, source: [f32; 3]) -> bool {
        if !self.tracked(id) {
            return false;
        }
        let [x, y, z] = self.flip(source);
        self.engine.mario_take_damage(id, damage, subtype, x, y, z);
        true
    }

    pub fn mario_heal(&mut self, id: i32, heal_counter: u8) -> bool {
        if !self.tracked(id) {
            return false;
        }
        self.engine.mario_heal(id, heal_counter);
        true
    }

    // Audio

    pub fn play_sound_global(&mut self, sound_bits: i32) {
        self.engine.play_sound_global(sound_bits);
    }

    pub fn play_music(&mut self, player: u8, seq_args: u16, fade_timer: u16) {
        self.engine.play_music(player, seq_args, fade_timer);
    }

    pub fn stop_background_music(&mut self, seq_id: u16) {
        self.engine.stop_background_music(seq_id);
    }
}

impl<E: Engine> Drop for Session<E> {
    fn drop(&mut self) {
        self.terminate();
    }
}
