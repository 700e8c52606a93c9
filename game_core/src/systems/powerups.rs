use glam::Vec2;
use hecs::World;

use crate::components::{PowerUpKind, Target};
use crate::params::Params;
use crate::resources::{
    Cue, Effects, Events, GameRng, PowerUpActivated, Quadrant, Round, SidePanel, Time,
};
use crate::session::SessionStats;
use crate::systems::particles::{spawn_burst, BURST_POWERUP};

/// Lapse any timed effect whose deadline has passed
pub fn expire_effects(time: &Time, effects: &mut Effects) {
    effects.expire(time.now);
}

/// Apply a power-up at `origin`.
///
/// Zoom and freeze (re)start their windows in the effect registry; hint
/// reveals the target's quadrant as a one-shot event. Every activation
/// emits a burst and an audio cue.
pub fn activate_powerup(
    world: &mut World,
    time: &Time,
    events: &mut Events,
    effects: &mut Effects,
    rng: &mut GameRng,
    kind: PowerUpKind,
    origin: Vec2,
) {
    match kind {
        PowerUpKind::Zoom => effects.start_zoom(time.now),
        PowerUpKind::Freeze => effects.start_freeze(time.now),
        PowerUpKind::Hint => {
            if let Some((_e, target)) = world.query::<&Target>().iter().next() {
                events.hint = Some(Quadrant::for_pos(target.pos));
            }
        }
    }

    events.powerups.push(PowerUpActivated { kind, origin });
    events.cues.push(Cue::PowerUp);
    spawn_burst(world, origin, BURST_POWERUP, rng);
}

/// Activate a side-panel slot by index. Gated like field power-ups:
/// only while the round is running and unresolved, and not while the
/// slot's previous use is still flashing. Panel bursts spawn at the
/// field center since slots have no field position.
#[allow(clippy::too_many_arguments)]
pub fn activate_panel_slot(
    world: &mut World,
    time: &Time,
    round: &Round,
    effects: &mut Effects,
    panel: &mut SidePanel,
    stats: &mut SessionStats,
    events: &mut Events,
    rng: &mut GameRng,
    index: usize,
) {
    if !round.is_running() {
        return;
    }
    let kind = match panel.slots.get(index) {
        Some(slot) if !slot.is_used(time.now) => slot.kind,
        _ => return,
    };

    panel.mark_used(index, time.now);
    stats.record_powerup();
    let center = Vec2::splat(Params::FIELD_CENTER);
    activate_powerup(world, time, events, effects, rng, kind, center);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Accessibility, DeviceClass};
    use crate::difficulty::difficulty_for;
    use crate::resources::Phase;
    use crate::spawn::create_target;

    fn setup() -> (World, Events, Effects, GameRng) {
        (
            World::new(),
            Events::new(),
            Effects::new(),
            GameRng::new(99),
        )
    }

    fn running_round(now: f32) -> Round {
        let mut round = Round::new();
        let difficulty = difficulty_for(1, DeviceClass::Desktop, &Accessibility::default());
        round.begin(1, difficulty, now);
        round
    }

    #[test]
    fn test_zoom_starts_window_and_expires() {
        let (mut world, mut events, mut effects, mut rng) = setup();
        let time = Time::new(0.016, 10.0);

        activate_powerup(
            &mut world,
            &time,
            &mut events,
            &mut effects,
            &mut rng,
            PowerUpKind::Zoom,
            Vec2::new(20.0, 20.0),
        );

        assert!(effects.zoom_active(10.0));
        assert!(effects.zoom_active(14.9), "Zoom lasts 5 seconds");
        assert!(!effects.zoom_active(15.0));

        expire_effects(&Time::new(0.016, 15.1), &mut effects);
        assert!(effects.zoom_until.is_none());
    }

    #[test]
    fn test_freeze_starts_three_second_window() {
        let (mut world, mut events, mut effects, mut rng) = setup();
        let time = Time::new(0.016, 0.0);

        activate_powerup(
            &mut world,
            &time,
            &mut events,
            &mut effects,
            &mut rng,
            PowerUpKind::Freeze,
            Vec2::new(20.0, 20.0),
        );

        assert!(effects.freeze_active(2.9));
        assert!(!effects.freeze_active(3.0));
    }

    #[test]
    fn test_hint_reveals_target_quadrant() {
        let (mut world, mut events, mut effects, mut rng) = setup();
        create_target(&mut world, Vec2::new(70.0, 30.0), 47.5);
        let time = Time::new(0.016, 0.0);

        activate_powerup(
            &mut world,
            &time,
            &mut events,
            &mut effects,
            &mut rng,
            PowerUpKind::Hint,
            Vec2::new(20.0, 20.0),
        );

        let quadrant = events.hint.expect("Hint must report a quadrant");
        assert_eq!(quadrant.label(), "right top");
        assert!(
            effects.zoom_until.is_none() && effects.freeze_until.is_none(),
            "Hint leaves no render state behind"
        );
    }

    #[test]
    fn test_activation_emits_burst_cue_and_event() {
        let (mut world, mut events, mut effects, mut rng) = setup();
        let time = Time::new(0.016, 0.0);
        let origin = Vec2::new(33.0, 44.0);

        activate_powerup(
            &mut world,
            &time,
            &mut events,
            &mut effects,
            &mut rng,
            PowerUpKind::Zoom,
            origin,
        );

        assert_eq!(events.powerups.len(), 1);
        assert_eq!(events.powerups[0].origin, origin);
        assert_eq!(events.cues, vec![Cue::PowerUp]);
        assert_eq!(
            world.query::<&crate::components::Particle>().iter().count(),
            12,
            "Activation bursts 12 particles"
        );
    }

    #[test]
    fn test_panel_slot_activates_once_per_flash_window() {
        let (mut world, mut events, mut effects, mut rng) = setup();
        let round = running_round(0.0);
        let mut panel = SidePanel::new();
        let mut stats = SessionStats::new();
        let time = Time::new(0.016, 0.0);

        activate_panel_slot(
            &mut world, &time, &round, &mut effects, &mut panel, &mut stats, &mut events,
            &mut rng, 0,
        );
        assert!(effects.zoom_active(0.0), "Slot 0 is zoom");
        assert_eq!(stats.powerups_collected, 1);

        // Same slot again inside the flash window does nothing
        activate_panel_slot(
            &mut world, &time, &round, &mut effects, &mut panel, &mut stats, &mut events,
            &mut rng, 0,
        );
        assert_eq!(stats.powerups_collected, 1, "Flashing slot is inert");

        // After the flash lapses the slot is reusable
        let later = Time::new(0.016, 2.0);
        activate_panel_slot(
            &mut world, &later, &round, &mut effects, &mut panel, &mut stats, &mut events,
            &mut rng, 0,
        );
        assert_eq!(stats.powerups_collected, 2, "Panel slots are reusable");
    }

    #[test]
    fn test_panel_slot_rejected_when_round_resolved() {
        let (mut world, mut events, mut effects, mut rng) = setup();
        let mut round = running_round(0.0);
        round.phase = Phase::Found;
        let mut panel = SidePanel::new();
        let mut stats = SessionStats::new();
        let time = Time::new(0.016, 0.0);

        activate_panel_slot(
            &mut world, &time, &round, &mut effects, &mut panel, &mut stats, &mut events,
            &mut rng, 1,
        );

        assert!(!effects.freeze_active(0.0), "No effect after the find");
        assert_eq!(stats.powerups_collected, 0);
    }
}
