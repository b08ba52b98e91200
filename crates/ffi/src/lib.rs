//! GameMaker-facing exports. Every function takes and returns `f64`; the
//! session lives in one process-wide slot between calls.

#![allow(non_snake_case)]

mod libsm64;

use gmsm64_core::config::CONFIG_FILE;
use gmsm64_core::sound::sound_arg_load;
use gmsm64_core::{host_flag, host_mario_id, Buttons, Config, GeometryChannel, Session};
use parking_lot::Mutex;

use crate::libsm64::{BindingError, Libsm64};

static SESSION: Mutex<Option<Session<Libsm64>>> = parking_lot::const_mutex(None);

#[derive(thiserror::Error, Debug)]
enum InitError {
    #[error(transparent)]
    Binding(#[from] BindingError),
    #[error(transparent)]
    Core(#[from] gmsm64_core::Error),
}

fn init_logging(filter: &str) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).try_init();
}

fn open_session(config: &Config) -> Result<Session<Libsm64>, InitError> {
    let engine = Libsm64::open(&config.library_path)?;
    Ok(Session::init(engine, config)?)
}

/// Reads on a missing session or unknown Mario come back as 0.
fn read(f: impl FnOnce(&Session<Libsm64>) -> Option<f64>) -> f64 {
    SESSION.lock().as_ref().and_then(f).unwrap_or(0.0)
}

fn write(f: impl FnOnce(&mut Session<Libsm64>)) -> f64 {
    if let Some(session) = SESSION.lock().as_mut() {
        f(session);
    }
    1.0
}

// Lifecycle

#[no_mangle]
pub extern "C" fn gm8_libsm64_init() -> f64 {
    let config = Config::load_or_default(CONFIG_FILE);
    init_logging(config.as_ref().map_or("info", |c| c.log_filter.as_str()));
    let config = match config {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            return 0.0;
        }
    };

    let mut slot = SESSION.lock();
    if let Some(mut old) = slot.take() {
        old.terminate();
    }
    match open_session(&config) {
        Ok(session) => {
            *slot = Some(session);
            1.0
        }
        Err(e) => {
            log::error!("init failed: {e}");
            0.0
        }
    }
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_terminate() -> f64 {
    if let Some(mut session) = SESSION.lock().take() {
        session.terminate();
    }
    1.0
}

// Static surfaces

#[no_mangle]
pub extern "C" fn gm8_libsm64_remove_static_surfaces(count: f64) -> f64 {
    write(|s| {
        s.host_remove_static_surfaces(count);
    })
}

#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn gm8_libsm64_add_static_surface(
    surface_type: f64,
    force: f64,
    terrain: f64,
    v00: f64,
    v01: f64,
    v02: f64,
    v10: f64,
    v11: f64,
    v12: f64,
    v20: f64,
    v21: f64,
    v22: f64,
) -> f64 {
    let coords = [v00, v01, v02, v10, v11, v12, v20, v21, v22];
    SESSION
        .lock()
        .as_mut()
        .map_or(0.0, |s| s.host_add_static_surface(surface_type, force, terrain, coords))
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_load_static_surfaces() -> f64 {
    SESSION
        .lock()
        .as_mut()
        .map_or(0.0, |s| s.host_load_static_surfaces())
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_get_static_surface(index: f64, component: f64) -> f64 {
    read(|s| Some(s.host_static_surface(index, component)))
}

// Mario lifecycle and input

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_create(x: f64, y: f64, z: f64) -> f64 {
    SESSION
        .lock()
        .as_mut()
        .map_or(-1.0, |s| f64::from(s.create_mario([x as f32, y as f32, z as f32])))
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_delete(id: f64) -> f64 {
    write(|s| {
        s.delete_mario(host_mario_id(id));
    })
}

#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn gm8_libsm64_mario_set_input(
    id: f64,
    a: f64,
    b: f64,
    z: f64,
    cam_x: f64,
    cam_z: f64,
    stick_x: f64,
    stick_y: f64,
) -> f64 {
    let mut buttons = Buttons::empty();
    buttons.set(Buttons::A, host_flag(a));
    buttons.set(Buttons::B, host_flag(b));
    buttons.set(Buttons::Z, host_flag(z));
    write(|s| {
        s.set_mario_input(
            host_mario_id(id),
            buttons,
            cam_x as f32,
            cam_z as f32,
            stick_x as f32,
            stick_y as f32,
        );
    })
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_tick(id: f64) -> f64 {
    write(|s| {
        s.tick_mario(host_mario_id(id));
    })
}

// Mario state reads

fn position_axis(id: f64, axis: usize) -> f64 {
    read(|s| s.mario_position(host_mario_id(id)).map(|p| f64::from(p[axis])))
}

fn velocity_axis(id: f64, axis: usize) -> f64 {
    read(|s| s.mario_velocity(host_mario_id(id)).map(|v| f64::from(v[axis])))
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_get_posX(id: f64) -> f64 {
    position_axis(id, 0)
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_get_posY(id: f64) -> f64 {
    position_axis(id, 1)
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_get_posZ(id: f64) -> f64 {
    position_axis(id, 2)
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_get_velX(id: f64) -> f64 {
    velocity_axis(id, 0)
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_get_velY(id: f64) -> f64 {
    velocity_axis(id, 1)
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_get_velZ(id: f64) -> f64 {
    velocity_axis(id, 2)
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_get_face_angle(id: f64) -> f64 {
    read(|s| s.mario_face_angle(host_mario_id(id)).map(f64::from))
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_get_health(id: f64) -> f64 {
    read(|s| s.mario_state(host_mario_id(id)).map(|st| f64::from(st.health)))
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_get_action(id: f64) -> f64 {
    read(|s| s.mario_state(host_mario_id(id)).map(|st| f64::from(st.action)))
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_get_flags(id: f64) -> f64 {
    read(|s| s.mario_state(host_mario_id(id)).map(|st| f64::from(st.flags)))
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_get_particle_flags(id: f64) -> f64 {
    read(|s| s.mario_state(host_mario_id(id)).map(|st| f64::from(st.particle_flags)))
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_get_invinc_timer(id: f64) -> f64 {
    read(|s| s.mario_state(host_mario_id(id)).map(|st| f64::from(st.invinc_timer)))
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_get_triangles_used(id: f64) -> f64 {
    read(|s| s.mario(host_mario_id(id)).map(|m| f64::from(m.geometry.triangles_used)))
}

// Mario geometry reads

fn geometry(id: f64, channel: GeometryChannel, vertex: f64, axis: usize) -> f64 {
    read(|s| Some(s.host_geometry(id, channel, vertex, axis)))
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_get_geometry_posX(id: f64, vertex: f64) -> f64 {
    geometry(id, GeometryChannel::Position, vertex, 0)
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_get_geometry_posY(id: f64, vertex: f64) -> f64 {
    geometry(id, GeometryChannel::Position, vertex, 1)
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_get_geometry_posZ(id: f64, vertex: f64) -> f64 {
    geometry(id, GeometryChannel::Position, vertex, 2)
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_get_geometry_normalX(id: f64, vertex: f64) -> f64 {
    geometry(id, GeometryChannel::Normal, vertex, 0)
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_get_geometry_normalY(id: f64, vertex: f64) -> f64 {
    geometry(id, GeometryChannel::Normal, vertex, 1)
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_get_geometry_normalZ(id: f64, vertex: f64) -> f64 {
    geometry(id, GeometryChannel::Normal, vertex, 2)
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_get_geometry_colorRed(id: f64, vertex: f64) -> f64 {
    geometry(id, GeometryChannel::Color, vertex, 0)
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_get_geometry_colorGreen(id: f64, vertex: f64) -> f64 {
    geometry(id, GeometryChannel::Color, vertex, 1)
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_get_geometry_colorBlue(id: f64, vertex: f64) -> f64 {
    geometry(id, GeometryChannel::Color, vertex, 2)
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_get_geometry_uvX(id: f64, vertex: f64) -> f64 {
    geometry(id, GeometryChannel::Uv, vertex, 0)
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_get_geometry_uvY(id: f64, vertex: f64) -> f64 {
    geometry(id, GeometryChannel::Uv, vertex, 1)
}

// Mario state writes

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_set_pos(id: f64, x: f64, y: f64, z: f64) -> f64 {
    write(|s| {
        s.set_mario_position(host_mario_id(id), [x as f32, y as f32, z as f32]);
    })
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_set_vel(id: f64, x: f64, y: f64, z: f64) -> f64 {
    write(|s| {
        s.set_mario_velocity(host_mario_id(id), [x as f32, y as f32, z as f32]);
    })
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_set_forward_vel(id: f64, vel: f64) -> f64 {
    write(|s| {
        s.set_mario_forward_velocity(host_mario_id(id), vel as f32);
    })
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_set_face_angle(id: f64, angle: f64) -> f64 {
    write(|s| {
        s.set_mario_face_angle(host_mario_id(id), angle as f32);
    })
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_set_health(id: f64, health: f64) -> f64 {
    write(|s| {
        s.set_mario_health(host_mario_id(id), health as u16);
    })
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_set_action(id: f64, action: f64) -> f64 {
    write(|s| {
        s.set_mario_action(host_mario_id(id), action as u32);
    })
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_set_animation(id: f64, anim_id: f64) -> f64 {
    write(|s| {
        s.set_mario_animation(host_mario_id(id), anim_id as i32);
    })
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_set_anim_frame(id: f64, frame: f64) -> f64 {
    write(|s| {
        s.set_mario_anim_frame(host_mario_id(id), frame as i16);
    })
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_set_invincibility(id: f64, timer: f64) -> f64 {
    write(|s| {
        s.set_mario_invincibility(host_mario_id(id), timer as i16);
    })
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_take_damage(
    id: f64,
    damage: f64,
    subtype: f64,
    x: f64,
    y: f64,
    z: f64,
) -> f64 {
    write(|s| {
        s.mario_take_damage(
            host_mario_id(id),
            damage as u32,
            subtype as u32,
            [x as f32, y as f32, z as f32],
        );
    })
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_mario_heal(id: f64, heal_counter: f64) -> f64 {
    write(|s| {
        s.mario_heal(host_mario_id(id), heal_counter as u8);
    })
}

// Audio

#[no_mangle]
pub extern "C" fn gm8_libsm64_play_sound_global(sound_bits: f64) -> f64 {
    // Sound bits use the full 32 bits; go through u32 so the top bank
    // nibble wraps instead of saturating.
    let bits = sound_bits as u32 as i32;
    write(|s| s.play_sound_global(bits))
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_play_music(player: f64, seq_args: f64, fade_timer: f64) -> f64 {
    write(|s| s.play_music(player as u8, seq_args as u16, fade_timer as u16))
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_stop_background_music(seq_id: f64) -> f64 {
    write(|s| s.stop_background_music(seq_id as u16))
}

#[no_mangle]
pub extern "C" fn gm8_libsm64_sound_arg_load(
    bank: f64,
    play_flags: f64,
    sound_id: f64,
    priority: f64,
    flags2: f64,
) -> f64 {
    f64::from(sound_arg_load(
        bank as u32,
        play_flags as u32,
        sound_id as u32,
        priority as u32,
        flags2 as u32,
    ))
}
