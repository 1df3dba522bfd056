//! Simulation constants and tuning parameters.

/// Number of consoles in the default console bank (4x4 grid).
pub const CONSOLE_COUNT: usize = 16;

/// Console slots that are never usable.
pub const DISABLED_CONSOLES: [usize; 2] = [11, 13];

/// Length of one game in seconds.
pub const TIME_LIMIT_SECS: f64 = 300.0;

/// Frames per second the driver renders at.
pub const FRAME_RATE: u32 = 10;

/// Seconds per frame at the default frame rate.
pub const FRAME_DT: f64 = 1.0 / FRAME_RATE as f64;

// --- Enforcement sequence ---

/// Visible countdown before the squad moves in.
pub const ENFORCEMENT_COUNTDOWN_SECS: f64 = 3.0;

/// Silence between the squad's arrival and the verdict.
pub const ARRIVAL_PAUSE_SECS: f64 = 1.0;

/// How long a stormed console rests before it can be repopulated.
pub const REST_SECS: f64 = 3.0;

/// Upper bound on waiting for a channel to go idle.
pub const MAX_SOUND_WAIT_SECS: f64 = 30.0;

// --- Level progression ---

/// Levels on which two suspects arrive instead of one.
pub const DOUBLE_SUSPECT_LEVELS: [u32; 3] = [4, 7, 12];

/// New guests introduced per level (suspects + innocents).
pub const GUESTS_PER_LEVEL: u32 = 2;

/// From this level on, one innocent is rotated out per level.
pub const ROTATION_TIER_1_LEVEL: u32 = 3;

/// Nominal second rotation tier. Shadowed by tier 1, so never reached.
pub const ROTATION_TIER_2_LEVEL: u32 = 8;

// --- Audio ---

/// Reserved channels after the console channels (coffee break + sfx).
pub const RESERVED_CHANNELS: usize = 2;
