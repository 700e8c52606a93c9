pub mod achievements;
pub mod components;
pub mod config;
pub mod difficulty;
pub mod geom;
pub mod modes;
pub mod params;
pub mod resources;
pub mod session;
pub mod spawn;
pub mod systems;

pub use achievements::*;
pub use components::*;
pub use config::*;
pub use difficulty::*;
pub use geom::*;
pub use modes::*;
pub use params::*;
pub use resources::*;
pub use session::*;
pub use spawn::*;

use hecs::World;
use systems::*;

/// Run the deterministic gem-hunt simulation for one frame.
///
/// Events are cleared once per call and accumulate across the inner
/// micro-steps, so a round completion that lands early in the frame
/// still reaches the caller.
#[allow(clippy::too_many_arguments)]
pub fn step(
    world: &mut World,
    time: &mut Time,
    config: &Config,
    round: &mut Round,
    effects: &mut Effects,
    stats: &mut SessionStats,
    events: &mut Events,
    queue: &mut ActivationQueue,
    rng: &mut GameRng,
) {
    // Clamp dt to prevent large jumps
    let clamped_dt = time.dt.min(Params::MAX_DT);

    events.clear();

    // Fixed micro-steps for stable ticking
    let mut remaining_dt = clamped_dt;
    while remaining_dt > 0.0 {
        let step_dt = remaining_dt.min(Params::FIXED_DT);
        remaining_dt -= step_dt;

        let step_time = Time {
            dt: step_dt,
            now: time.now + (clamped_dt - remaining_dt),
        };

        // 1. Resolve queued activations (taps, clicks, key presses)
        resolve_activations(
            world, &step_time, config, round, effects, stats, events, queue, rng,
        );

        // 2. Integrate decoy motion on its 50 ms cadence
        update_motion(world, &step_time, round, effects);

        // 3. Decay particles on their ~16 ms cadence
        update_particles(world, &step_time, round);

        // 4. Drop lapsed power-up effect windows
        expire_effects(&step_time, effects);

        // 5. Finish the round once the found pause is over
        complete_round(&step_time, round, stats, events);
    }

    // Update time
    time.now += clamped_dt;
}
