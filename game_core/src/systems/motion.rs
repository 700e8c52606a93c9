use hecs::World;

use crate::components::Decoy;
use crate::params::Params;
use crate::resources::{Effects, Round, Time};

/// Advance decoy positions on the fixed 50 ms motion tick.
///
/// The tick only runs while the round is live: running phase, movement
/// enabled for the difficulty, and no freeze window active. When any of
/// those fail the accumulator resets, so motion restarts on a fresh tick
/// instead of replaying banked time.
pub fn update_motion(world: &mut World, time: &Time, round: &mut Round, effects: &Effects) {
    let live = round.is_running()
        && round.difficulty.has_movement
        && !effects.freeze_active(time.now);
    if !live {
        round.motion_accum = 0.0;
        return;
    }

    round.motion_accum += time.dt;
    while round.motion_accum >= Params::MOTION_TICK {
        round.motion_accum -= Params::MOTION_TICK;
        integrate_decoys(world, round.difficulty.movement_speed);
    }
}

/// One motion tick: move each decoy by its velocity scaled by the round
/// speed, reflecting off the field bounds. Only the overflowing axis
/// flips; the bounce keeps the same magnitude. Targets carry no velocity
/// and are never touched.
fn integrate_decoys(world: &mut World, speed: f32) {
    for (_entity, decoy) in world.query_mut::<&mut Decoy>() {
        decoy.pos += decoy.vel * speed;

        if decoy.pos.x < Params::BOUNCE_MIN || decoy.pos.x > Params::BOUNCE_MAX {
            decoy.vel.x = -decoy.vel.x;
            decoy.pos.x = decoy.pos.x.clamp(Params::BOUNCE_MIN, Params::BOUNCE_MAX);
        }
        if decoy.pos.y < Params::BOUNCE_MIN || decoy.pos.y > Params::BOUNCE_MAX {
            decoy.vel.y = -decoy.vel.y;
            decoy.pos.y = decoy.pos.y.clamp(Params::BOUNCE_MIN, Params::BOUNCE_MAX);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Accessibility, DeviceClass};
    use crate::difficulty::difficulty_for;
    use crate::resources::Phase;
    use crate::spawn::create_decoy;
    use glam::Vec2;

    fn setup_round(now: f32) -> Round {
        let mut round = Round::new();
        let difficulty = difficulty_for(1, DeviceClass::Desktop, &Accessibility::default());
        round.begin(1, difficulty, now);
        round
    }

    fn tick(world: &mut World, round: &mut Round, effects: &Effects, now: f32) {
        let time = Time::new(Params::MOTION_TICK, now);
        update_motion(world, &time, round, effects);
    }

    #[test]
    fn test_decoy_moves_by_velocity_times_speed() {
        let mut world = World::new();
        let mut round = setup_round(0.0);
        let effects = Effects::new();
        create_decoy(&mut world, Vec2::new(50.0, 50.0), Vec2::new(0.5, -0.2), 30.0, 0.1);

        tick(&mut world, &mut round, &effects, 0.05);

        for (_e, decoy) in world.query::<&Decoy>().iter() {
            // speed 5 at round 1: 50 + 0.5*5 = 52.5, 50 - 0.2*5 = 49
            assert!((decoy.pos.x - 52.5).abs() < 1e-4);
            assert!((decoy.pos.y - 49.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_positions_stay_in_bounds_over_many_ticks() {
        let mut world = World::new();
        let mut round = setup_round(0.0);
        let effects = Effects::new();
        create_decoy(&mut world, Vec2::new(6.0, 88.0), Vec2::new(-0.9, 0.9), 30.0, 0.3);
        create_decoy(&mut world, Vec2::new(50.0, 50.0), Vec2::new(1.0, -1.0), 30.0, 0.7);

        for i in 0..200 {
            tick(&mut world, &mut round, &effects, i as f32 * 0.05);
        }

        for (_e, decoy) in world.query::<&Decoy>().iter() {
            assert!(
                decoy.pos.x >= 2.0 && decoy.pos.x <= 93.0,
                "x out of bounds: {}",
                decoy.pos.x
            );
            assert!(
                decoy.pos.y >= 2.0 && decoy.pos.y <= 93.0,
                "y out of bounds: {}",
                decoy.pos.y
            );
        }
    }

    #[test]
    fn test_bounce_flips_only_the_overflowing_axis() {
        let mut world = World::new();
        let mut round = setup_round(0.0);
        let effects = Effects::new();
        // Heading off the right edge, drifting down slightly
        create_decoy(&mut world, Vec2::new(92.0, 50.0), Vec2::new(1.0, 0.1), 30.0, 0.5);

        tick(&mut world, &mut round, &effects, 0.05);

        for (_e, decoy) in world.query::<&Decoy>().iter() {
            assert!(decoy.vel.x < 0.0, "X velocity reflects off the right edge");
            assert!(
                (decoy.vel.x + 1.0).abs() < 1e-6,
                "Reflection keeps the magnitude"
            );
            assert!(decoy.vel.y > 0.0, "Y velocity is untouched");
            assert_eq!(decoy.pos.x, 93.0, "Position clamps back to the bound");
        }
    }

    #[test]
    fn test_freeze_holds_positions_and_resumes() {
        let mut world = World::new();
        let mut round = setup_round(0.0);
        let mut effects = Effects::new();
        create_decoy(&mut world, Vec2::new(50.0, 50.0), Vec2::new(1.0, 0.0), 30.0, 0.5);

        effects.start_freeze(0.0);

        // Inside the 3s freeze window nothing moves
        let mut now = 0.0;
        while now < 2.8 {
            now += 0.05;
            tick(&mut world, &mut round, &effects, now);
        }
        for (_e, decoy) in world.query::<&Decoy>().iter() {
            assert_eq!(decoy.pos, Vec2::new(50.0, 50.0), "Frozen decoys hold still");
            assert_eq!(decoy.vel, Vec2::new(1.0, 0.0), "Freeze preserves velocity");
        }

        // Past the deadline motion resumes without any external signal
        tick(&mut world, &mut round, &effects, 3.1);
        for (_e, decoy) in world.query::<&Decoy>().iter() {
            assert!(decoy.pos.x > 50.0, "Motion resumes after the freeze lapses");
        }
    }

    #[test]
    fn test_no_motion_once_target_found() {
        let mut world = World::new();
        let mut round = setup_round(0.0);
        let effects = Effects::new();
        create_decoy(&mut world, Vec2::new(50.0, 50.0), Vec2::new(1.0, 0.0), 30.0, 0.5);

        round.phase = Phase::Found;
        round.motion_accum = 0.04;
        tick(&mut world, &mut round, &effects, 0.05);

        for (_e, decoy) in world.query::<&Decoy>().iter() {
            assert_eq!(decoy.pos.x, 50.0);
        }
        assert_eq!(
            round.motion_accum, 0.0,
            "Accumulator resets when the loop is torn down"
        );
    }

    #[test]
    fn test_no_motion_for_degenerate_round() {
        let mut world = World::new();
        let mut round = Round::new();
        let effects = Effects::new();
        let difficulty = difficulty_for(0, DeviceClass::Desktop, &Accessibility::default());
        round.begin(0, difficulty, 0.0);
        create_decoy(&mut world, Vec2::new(50.0, 50.0), Vec2::new(1.0, 1.0), 30.0, 0.5);

        for i in 0..10 {
            tick(&mut world, &mut round, &effects, i as f32 * 0.05);
        }

        for (_e, decoy) in world.query::<&Decoy>().iter() {
            assert_eq!(decoy.pos, Vec2::new(50.0, 50.0), "Round 0 disables movement");
        }
    }
}
