use crate::config::{Accessibility, DeviceClass};
use crate::params::Params;

/// Per-round difficulty parameters, derived and never stored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    pub object_count: u32,
    pub movement_speed: f32,
    pub target_size: f32, // px
    pub decoy_size: f32,  // px
    pub has_movement: bool,
}

impl Default for Difficulty {
    fn default() -> Self {
        difficulty_for(1, DeviceClass::Desktop, &Accessibility::default())
    }
}

/// Evaluate the difficulty curve for a round.
///
/// Pure and deterministic; recomputed whenever the round or the
/// accessibility snapshot changes. Rounds <= 0 disable movement rather
/// than erroring.
pub fn difficulty_for(round: i32, device: DeviceClass, access: &Accessibility) -> Difficulty {
    let (base_count, count_cap, target_min, decoy_min) = match device {
        DeviceClass::Mobile => (
            Params::BASE_COUNT_MOBILE,
            Params::COUNT_CAP_MOBILE,
            Params::TARGET_MIN_MOBILE,
            Params::DECOY_MIN_MOBILE,
        ),
        DeviceClass::Desktop => (
            Params::BASE_COUNT_DESKTOP,
            Params::COUNT_CAP_DESKTOP,
            Params::TARGET_MIN_DESKTOP,
            Params::DECOY_MIN_DESKTOP,
        ),
    };

    let growth = (round - 1) as f32;
    let object_count =
        ((base_count as f32 * Params::COUNT_GROWTH.powf(growth)).floor() as u32).min(count_cap);

    let mut movement_speed =
        (Params::BASE_SPEED * Params::SPEED_GROWTH.powf(growth)).min(Params::SPEED_CAP);
    if access.reduced_motion {
        movement_speed /= 2.0;
    }

    let mut target_size =
        (Params::TARGET_BASE_SIZE - round as f32 * Params::TARGET_SHRINK_PER_ROUND).max(target_min);
    if access.large_text {
        target_size *= Params::LARGE_TEXT_SCALE;
    }

    let decoy_size =
        (Params::DECOY_BASE_SIZE - round as f32 * Params::DECOY_SHRINK_PER_ROUND).max(decoy_min);

    Difficulty {
        object_count,
        movement_speed,
        target_size,
        decoy_size,
        has_movement: round > 0,
    }
}
