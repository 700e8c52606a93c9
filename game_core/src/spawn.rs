use glam::Vec2;
use hecs::World;
use rand::Rng;

use crate::components::*;
use crate::config::Config;
use crate::difficulty::{difficulty_for, Difficulty};
use crate::params::Params;
use crate::resources::{Effects, GameRng, Round, SidePanel, Time};

/// Helper to create a decoy entity
pub fn create_decoy(world: &mut World, pos: Vec2, vel: Vec2, size: f32, shade: f32) -> hecs::Entity {
    world.spawn((Decoy::new(pos, vel, size, shade),))
}

/// Helper to create the target entity
pub fn create_target(world: &mut World, pos: Vec2, size: f32) -> hecs::Entity {
    world.spawn((Target::new(pos, size),))
}

/// Helper to create a field power-up entity
pub fn create_field_powerup(world: &mut World, kind: PowerUpKind, pos: Vec2) -> hecs::Entity {
    world.spawn((FieldPowerUp::new(kind, pos),))
}

fn random_pos(rng: &mut GameRng) -> Vec2 {
    Vec2::new(
        rng.0.gen_range(Params::SPAWN_MIN..Params::SPAWN_MAX),
        rng.0.gen_range(Params::SPAWN_MIN..Params::SPAWN_MAX),
    )
}

/// Spawn the round's population: object_count - 1 decoys, then the single
/// target. The target spawns last so it sits on top where objects overlap.
pub fn spawn_population(world: &mut World, difficulty: &Difficulty, rng: &mut GameRng) {
    let decoy_count = difficulty.object_count.saturating_sub(1);
    for _ in 0..decoy_count {
        let pos = random_pos(rng);
        let vel = Vec2::new(rng.0.gen_range(-1.0..1.0), rng.0.gen_range(-1.0..1.0));
        let jitter = rng
            .0
            .gen_range(Params::SIZE_JITTER_MIN..Params::SIZE_JITTER_MAX);
        let shade = rng.0.gen_range(0.0..1.0);
        create_decoy(world, pos, vel, difficulty.decoy_size * jitter, shade);
    }

    let target_pos = random_pos(rng);
    create_target(world, target_pos, difficulty.target_size);
}

/// How many in-field power-ups a round gets (0 for degenerate rounds)
pub fn field_powerup_count(round: u32) -> u32 {
    if round == 0 {
        return 0;
    }
    (round / Params::FIELD_POWERUP_ROUNDS_PER_EXTRA + 1).min(Params::FIELD_POWERUP_CAP)
}

/// Spawn the round's in-field power-ups, kinds cycling by index
pub fn spawn_field_powerups(world: &mut World, round: u32, rng: &mut GameRng) {
    for i in 0..field_powerup_count(round) {
        let pos = random_pos(rng);
        create_field_powerup(world, PowerUpKind::for_index(i), pos);
    }
}

fn despawn_all<C: hecs::Component>(world: &mut World) {
    let entities: Vec<_> = world.query::<&C>().iter().map(|(e, _)| e).collect();
    for entity in entities {
        let _ = world.despawn(entity);
    }
}

/// Tear down the previous round and build the next one.
///
/// Everything is regenerated: objects, field power-ups, and leftover
/// particles are despawned, the side panel and timed effects reset, and
/// the round generation counter advances so queued activations from the
/// superseded round are dropped.
#[allow(clippy::too_many_arguments)]
pub fn begin_round(
    world: &mut World,
    time: &Time,
    config: &Config,
    round: &mut Round,
    effects: &mut Effects,
    panel: &mut SidePanel,
    rng: &mut GameRng,
    number: u32,
) {
    despawn_all::<Decoy>(world);
    despawn_all::<Target>(world);
    despawn_all::<FieldPowerUp>(world);
    despawn_all::<Particle>(world);

    let difficulty = difficulty_for(number as i32, config.device, &config.access);
    spawn_field_powerups(world, number, rng);
    spawn_population(world, &difficulty, rng);

    effects.clear();
    panel.reset();
    round.begin(number, difficulty, time.now);
}
