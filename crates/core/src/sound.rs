/// Pack sound parameters the way libsm64's `SOUND_ARG_LOAD` macro does.
#[inline]
pub const fn sound_arg_load(bank: u32, play_flags: u32, sound_id: u32, priority: u32, flags2: u32) -> u32 {
    (bank << 28) | (play_flags << 24) | (sound_id << 16) | (priority << 8) | (flags2 << 4) | 1
}

pub const SOUND_BANK_ACTION: u32 = 0;
pub const SOUND_BANK_MOVING: u32 = 1;
pub const SOUND_BANK_MARIO_VOICE: u32 = 2;
pub const SOUND_BANK_GENERAL: u32 = 3;
pub const SOUND_BANK_ENV: u32 = 4;
pub const SOUND_BANK_OBJ: u32 = 5;
pub const SOUND_BANK_AIR: u32 = 6;
pub const SOUND_BANK_MENU: u32 = 7;

pub const SOUND_NO_VOLUME_LOSS: u32 = 0x1000000;
pub const SOUND_VIBRATO: u32 = 0x2000000;
pub const SOUND_NO_PRIORITY_LOSS: u32 = 0x4000000;
pub const SOUND_CONSTANT_FREQUENCY: u32 = 0x8000000;

pub const SOUND_MARIO_YAH_WAH_HOO: u32 = sound_arg_load(SOUND_BANK_MARIO_VOICE, 0, 0x00, 0x80, 8);
pub const SOUND_MARIO_HOOHOO: u32 = sound_arg_load(SOUND_BANK_MARIO_VOICE, 0, 0x03, 0x80, 8);
pub const SOUND_GENERAL_COIN: u32 = sound_arg_load(SOUND_BANK_GENERAL, 8, 0x11, 0x80, 8);
pub const SOUND_MENU_STAR_SOUND: u32 = sound_arg_load(SOUND_BANK_MENU, 0, 0x1E, 0xFF, 8);
