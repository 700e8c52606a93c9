use glam::Vec2;
use hecs::World;
use rand::Rng;

use crate::components::Particle;
use crate::params::Params;
use crate::resources::{GameRng, Round, Time};

/// Burst colors: power-up pickups, target finds, wrong guesses
pub const BURST_POWERUP: [u8; 3] = [0x10, 0xb9, 0x81];
pub const BURST_VICTORY: [u8; 3] = [0xf5, 0x9e, 0x0b];
pub const BURST_MISS: [u8; 3] = [0xef, 0x44, 0x44];

/// Spawn a 12-particle radial burst: evenly spaced angles, random speed
pub fn spawn_burst(world: &mut World, pos: Vec2, color: [u8; 3], rng: &mut GameRng) {
    for i in 0..Params::BURST_COUNT {
        let angle = std::f32::consts::TAU * i as f32 / Params::BURST_COUNT as f32;
        let speed = rng
            .0
            .gen_range(Params::PARTICLE_SPEED_MIN..Params::PARTICLE_SPEED_MAX);
        let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        world.spawn((Particle::new(pos, vel, Params::PARTICLE_LIFE, color),));
    }
}

/// Decay particles on the fixed ~16 ms tick.
///
/// Purely cosmetic: scoring and hit tests never read particles, and the
/// tick keeps running through freeze windows. The accumulator resets when
/// no particles remain, so a later burst starts on a fresh tick.
pub fn update_particles(world: &mut World, time: &Time, round: &mut Round) {
    let any = world.query::<&Particle>().iter().next().is_some();
    if !any {
        round.particle_accum = 0.0;
        return;
    }

    round.particle_accum += time.dt;
    while round.particle_accum >= Params::PARTICLE_TICK {
        round.particle_accum -= Params::PARTICLE_TICK;
        decay_tick(world);
    }
}

fn decay_tick(world: &mut World) {
    let mut expired = Vec::new();
    for (entity, particle) in world.query_mut::<&mut Particle>() {
        particle.pos += particle.vel;
        particle.life = particle.life.saturating_sub(1);
        if particle.life == 0 {
            expired.push(entity);
        }
    }
    for entity in expired {
        let _ = world.despawn(entity);
    }
}
