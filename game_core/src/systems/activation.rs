use glam::Vec2;
use hecs::World;

use crate::components::{Decoy, FieldPowerUp, Target};
use crate::config::Config;
use crate::geom::Aabb;
use crate::resources::{ActivationQueue, Cue, Effects, Events, GameRng, Round, Time};
use crate::session::SessionStats;
use crate::systems::particles::{spawn_burst, BURST_MISS, BURST_VICTORY};
use crate::systems::powerups::activate_powerup;

/// Drain the activation queue and resolve each tap against the field.
///
/// Guards, in order: two-contact gestures are pinches, not taps; inputs
/// stamped with a superseded round generation are stale; and once the
/// target is found (or the round is otherwise not running) all input is
/// ignored. The first valid target hit wins; later activations in the
/// same drain see the Found phase and drop out.
#[allow(clippy::too_many_arguments)]
pub fn resolve_activations(
    world: &mut World,
    time: &Time,
    config: &Config,
    round: &mut Round,
    effects: &mut Effects,
    stats: &mut SessionStats,
    events: &mut Events,
    queue: &mut ActivationQueue,
    rng: &mut GameRng,
) {
    for activation in queue.pop_activations() {
        if activation.contacts >= 2 {
            continue;
        }
        if activation.generation != round.generation {
            continue;
        }
        if !round.is_running() {
            continue;
        }
        resolve_point(
            world,
            time,
            config,
            round,
            effects,
            stats,
            events,
            rng,
            activation.pos,
        );
    }
}

fn object_box(center: Vec2, size_px: f32, config: &Config) -> Aabb {
    let half = config.half_extent_pct(size_px);
    Aabb::from_center_size(center, Vec2::splat(half * 2.0))
}

/// Hit-test one point, top of the z-order first: uncollected field
/// power-ups, then the target (spawned last, it wins object overlaps),
/// then decoys. Decoy ordering is irrelevant since any decoy hit is the
/// same miss.
#[allow(clippy::too_many_arguments)]
fn resolve_point(
    world: &mut World,
    time: &Time,
    config: &Config,
    round: &mut Round,
    effects: &mut Effects,
    stats: &mut SessionStats,
    events: &mut Events,
    rng: &mut GameRng,
    point: Vec2,
) {
    // Field power-ups sit above the object layer
    let powerup_hit = {
        let mut hit = None;
        for (entity, powerup) in world.query::<&FieldPowerUp>().iter() {
            if powerup.collected {
                continue;
            }
            if object_box(powerup.pos, crate::params::Params::POWERUP_SIZE, config)
                .contains(point)
            {
                hit = Some((entity, powerup.kind, powerup.pos));
                break;
            }
        }
        hit
    };
    if let Some((entity, kind, pos)) = powerup_hit {
        for (e, powerup) in world.query_mut::<&mut FieldPowerUp>() {
            if e == entity {
                powerup.collected = true;
                break;
            }
        }
        stats.record_powerup();
        activate_powerup(world, time, events, effects, rng, kind, pos);
        return;
    }

    // The target, with its hit box scaled up while zoom is active
    let target_hit = {
        let scale = if effects.zoom_active(time.now) {
            config.zoom_scale
        } else {
            1.0
        };
        let mut hit = None;
        for (_e, target) in world.query::<&Target>().iter() {
            if object_box(target.pos, target.size * scale, config).contains(point) {
                hit = Some(target.pos);
                break;
            }
        }
        hit
    };
    if let Some(target_pos) = target_hit {
        round.mark_found(time.now, config.found_display_delay);
        events.target_found = true;
        events.cues.push(Cue::Success);
        spawn_burst(world, target_pos, BURST_VICTORY, rng);
        return;
    }

    // Any decoy: a miss
    let decoy_hit = {
        let mut hit = None;
        for (_e, decoy) in world.query::<&Decoy>().iter() {
            if object_box(decoy.pos, decoy.size, config).contains(point) {
                hit = Some(decoy.pos);
                break;
            }
        }
        hit
    };
    if let Some(decoy_pos) = decoy_hit {
        stats.record_miss();
        events.decoy_hits.push(decoy_pos);
        events.cues.push(Cue::Error);
        spawn_burst(world, decoy_pos, BURST_MISS, rng);
    }
    // Empty field: nothing happens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Particle, PowerUpKind};
    use crate::config::{Accessibility, DeviceClass};
    use crate::difficulty::difficulty_for;
    use crate::resources::Phase;
    use crate::spawn::{create_decoy, create_field_powerup, create_target};

    struct Fixture {
        world: World,
        config: Config,
        round: Round,
        effects: Effects,
        stats: SessionStats,
        events: Events,
        queue: ActivationQueue,
        rng: GameRng,
    }

    fn setup() -> Fixture {
        let mut round = Round::new();
        let difficulty = difficulty_for(1, DeviceClass::Desktop, &Accessibility::default());
        round.begin(1, difficulty, 0.0);
        Fixture {
            world: World::new(),
            config: Config::new(),
            round,
            effects: Effects::new(),
            stats: SessionStats::new(),
            events: Events::new(),
            queue: ActivationQueue::new(),
            rng: GameRng::new(5),
        }
    }

    fn resolve(f: &mut Fixture, now: f32) {
        let time = Time::new(0.016, now);
        resolve_activations(
            &mut f.world,
            &time,
            &f.config,
            &mut f.round,
            &mut f.effects,
            &mut f.stats,
            &mut f.events,
            &mut f.queue,
            &mut f.rng,
        );
    }

    #[test]
    fn test_target_hit_latches_found_and_records_elapsed() {
        let mut f = setup();
        create_target(&mut f.world, Vec2::new(50.0, 50.0), 47.5);
        f.round.started_at = 0.0;
        f.queue
            .push_activation(Vec2::new(50.0, 50.0), 1, f.round.generation);

        resolve(&mut f, 0.75);

        assert!(f.events.target_found);
        assert_eq!(f.round.phase, Phase::Found);
        assert!((f.round.elapsed_ms - 750.0).abs() < 1e-2);
        assert_eq!(f.events.cues, vec![Cue::Success]);
        assert_eq!(
            f.world.query::<&Particle>().iter().count(),
            12,
            "Victory burst spawned"
        );
        assert!(
            f.events.round_complete.is_none(),
            "Completion waits for the display delay"
        );
    }

    #[test]
    fn test_decoy_hit_is_a_miss_and_round_continues() {
        let mut f = setup();
        create_decoy(&mut f.world, Vec2::new(30.0, 30.0), Vec2::ZERO, 33.8, 0.5);
        create_target(&mut f.world, Vec2::new(70.0, 70.0), 47.5);
        f.queue
            .push_activation(Vec2::new(30.0, 30.0), 1, f.round.generation);

        resolve(&mut f, 0.5);

        assert!(!f.events.target_found);
        assert_eq!(f.stats.mistakes, 1);
        assert_eq!(f.events.decoy_hits, vec![Vec2::new(30.0, 30.0)]);
        assert_eq!(f.events.cues, vec![Cue::Error]);
        assert!(f.round.is_running(), "A miss never ends the round");
    }

    #[test]
    fn test_two_contact_tap_is_rejected() {
        let mut f = setup();
        create_target(&mut f.world, Vec2::new(50.0, 50.0), 47.5);
        f.queue
            .push_activation(Vec2::new(50.0, 50.0), 2, f.round.generation);

        resolve(&mut f, 0.5);

        assert!(!f.events.target_found, "Pinch gestures never count as taps");
        assert!(f.round.is_running());
    }

    #[test]
    fn test_stale_generation_is_dropped() {
        let mut f = setup();
        create_target(&mut f.world, Vec2::new(50.0, 50.0), 47.5);
        f.queue
            .push_activation(Vec2::new(50.0, 50.0), 1, f.round.generation - 1);

        resolve(&mut f, 0.5);

        assert!(
            !f.events.target_found,
            "Inputs from a superseded round self-cancel"
        );
    }

    #[test]
    fn test_input_rejected_once_found() {
        let mut f = setup();
        create_target(&mut f.world, Vec2::new(50.0, 50.0), 47.5);
        let generation = f.round.generation;
        f.queue.push_activation(Vec2::new(50.0, 50.0), 1, generation);
        f.queue.push_activation(Vec2::new(50.0, 50.0), 1, generation);

        resolve(&mut f, 0.5);

        assert!(f.events.target_found);
        assert_eq!(
            f.events.cues,
            vec![Cue::Success],
            "Second tap in the same drain is ignored"
        );

        // And a later tap after the latch does nothing either
        f.queue.push_activation(Vec2::new(50.0, 50.0), 1, generation);
        resolve(&mut f, 0.6);
        assert_eq!(f.stats.mistakes, 0);
        assert_eq!(f.events.cues, vec![Cue::Success]);
    }

    #[test]
    fn test_target_wins_overlap_with_decoy() {
        let mut f = setup();
        // Decoy directly under the target position
        create_decoy(&mut f.world, Vec2::new(50.0, 50.0), Vec2::ZERO, 33.8, 0.2);
        create_target(&mut f.world, Vec2::new(50.0, 50.0), 47.5);
        f.queue
            .push_activation(Vec2::new(50.0, 50.0), 1, f.round.generation);

        resolve(&mut f, 0.5);

        assert!(f.events.target_found, "Target sits on top of decoys");
        assert_eq!(f.stats.mistakes, 0);
    }

    #[test]
    fn test_field_powerup_sits_above_objects_and_collects_once() {
        let mut f = setup();
        create_field_powerup(&mut f.world, PowerUpKind::Freeze, Vec2::new(50.0, 50.0));
        create_target(&mut f.world, Vec2::new(50.0, 50.0), 47.5);
        let generation = f.round.generation;
        f.queue.push_activation(Vec2::new(50.0, 50.0), 1, generation);

        resolve(&mut f, 0.5);

        assert!(!f.events.target_found, "Power-up layer is on top");
        assert!(f.effects.freeze_active(0.5));
        assert_eq!(f.stats.powerups_collected, 1);

        // Second tap falls through to the target: the power-up is inert now
        f.queue.push_activation(Vec2::new(50.0, 50.0), 1, generation);
        resolve(&mut f, 0.6);
        assert!(f.events.target_found, "Collected power-ups stop intercepting");
        assert_eq!(f.stats.powerups_collected, 1);
    }

    #[test]
    fn test_zoom_scales_the_target_hit_box() {
        let mut f = setup();
        // 47.5 px on an 800 px field: half extent ~2.97%; zoomed ~7.42%
        create_target(&mut f.world, Vec2::new(50.0, 50.0), 47.5);
        let generation = f.round.generation;

        // 5% off center: outside the normal box
        f.queue.push_activation(Vec2::new(55.0, 50.0), 1, generation);
        resolve(&mut f, 0.1);
        assert!(!f.events.target_found, "Outside the unzoomed hit box");

        f.effects.start_zoom(0.2);
        f.queue.push_activation(Vec2::new(55.0, 50.0), 1, generation);
        resolve(&mut f, 0.3);
        assert!(f.events.target_found, "Zoom widens the target hit box");
    }

    #[test]
    fn test_empty_field_tap_is_a_no_op() {
        let mut f = setup();
        create_target(&mut f.world, Vec2::new(80.0, 80.0), 47.5);
        f.queue
            .push_activation(Vec2::new(10.0, 10.0), 1, f.round.generation);

        resolve(&mut f, 0.5);

        assert!(!f.events.target_found);
        assert_eq!(f.stats.mistakes, 0, "Background taps are free");
        assert!(f.events.cues.is_empty());
    }
}
