/// Game tuning parameters for Gem Hunt
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Field (positions are percentages of the play area)
    pub const SPAWN_MIN: f32 = 5.0;
    pub const SPAWN_MAX: f32 = 90.0;
    pub const BOUNCE_MIN: f32 = 2.0;
    pub const BOUNCE_MAX: f32 = 93.0;
    pub const FIELD_CENTER: f32 = 50.0;
    pub const FIELD_SIZE_PX: f32 = 800.0;

    // Difficulty curve
    pub const BASE_COUNT_DESKTOP: u32 = 20;
    pub const BASE_COUNT_MOBILE: u32 = 15;
    pub const COUNT_CAP_DESKTOP: u32 = 200;
    pub const COUNT_CAP_MOBILE: u32 = 150;
    pub const COUNT_GROWTH: f32 = 1.6;
    pub const BASE_SPEED: f32 = 5.0;
    pub const SPEED_GROWTH: f32 = 1.8;
    pub const SPEED_CAP: f32 = 50.0;
    pub const TARGET_BASE_SIZE: f32 = 50.0; // px
    pub const TARGET_SHRINK_PER_ROUND: f32 = 2.5;
    pub const TARGET_MIN_DESKTOP: f32 = 10.0;
    pub const TARGET_MIN_MOBILE: f32 = 15.0;
    pub const DECOY_BASE_SIZE: f32 = 35.0; // px
    pub const DECOY_SHRINK_PER_ROUND: f32 = 1.2;
    pub const DECOY_MIN_DESKTOP: f32 = 15.0;
    pub const DECOY_MIN_MOBILE: f32 = 20.0;
    pub const LARGE_TEXT_SCALE: f32 = 1.2;
    pub const SIZE_JITTER_MIN: f32 = 0.7;
    pub const SIZE_JITTER_MAX: f32 = 1.3;

    // Power-ups
    pub const POWERUP_SIZE: f32 = 40.0; // px
    pub const FIELD_POWERUP_CAP: u32 = 2;
    pub const FIELD_POWERUP_ROUNDS_PER_EXTRA: u32 = 5;
    pub const ZOOM_SCALE: f32 = 2.5;
    pub const ZOOM_DURATION: f32 = 5.0; // seconds
    pub const FREEZE_DURATION: f32 = 3.0;
    pub const PANEL_FLASH_DURATION: f32 = 1.0;

    // Particles
    pub const BURST_COUNT: usize = 12;
    pub const PARTICLE_SPEED_MIN: f32 = 2.0;
    pub const PARTICLE_SPEED_MAX: f32 = 5.0;
    pub const PARTICLE_LIFE: u32 = 60; // ticks

    // Round flow
    pub const FOUND_DISPLAY_DELAY: f32 = 1.0; // pause before round completes
    pub const ROUND_BASE_POINTS: f32 = 1000.0;
    pub const ROUND_MIN_POINTS: f32 = 100.0;
    pub const COMBO_MULTIPLIER: f32 = 1.2;
    pub const ROUND_BONUS: f32 = 1.1;

    // Modes
    pub const CLASSIC_ROUNDS: u32 = 20;
    pub const TIME_TRIAL_BUDGET_MS: f32 = 60_000.0;

    // Physics
    pub const MOTION_TICK: f32 = 0.05; // 20 Hz decoy integration
    pub const PARTICLE_TICK: f32 = 0.016; // ~60 Hz particle decay
    pub const FIXED_DT: f32 = 0.0166;
    pub const MAX_DT: f32 = 0.1; // Clamp to prevent large jumps
}
