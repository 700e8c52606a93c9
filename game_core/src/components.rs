use glam::Vec2;

/// Decoy component - a moving avocado the player must not click
#[derive(Debug, Clone, Copy)]
pub struct Decoy {
    pub pos: Vec2,  // field percent, [0,100]
    pub vel: Vec2,  // components in [-1,1], not normalized
    pub size: f32,  // px, with per-object jitter applied
    pub shade: f32, // color variant in [0,1)
}

impl Decoy {
    pub fn new(pos: Vec2, vel: Vec2, size: f32, shade: f32) -> Self {
        Self {
            pos,
            vel,
            size,
            shade,
        }
    }
}

/// Target component - the gem. Carries no velocity; the target never moves.
#[derive(Debug, Clone, Copy)]
pub struct Target {
    pub pos: Vec2,
    pub size: f32,
}

impl Target {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self { pos, size }
    }
}

/// Power-up variety
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Zoom,
    Freeze,
    Hint,
}

impl PowerUpKind {
    /// Field power-up kinds cycle in this order by spawn index
    pub fn for_index(i: u32) -> Self {
        match i % 3 {
            0 => Self::Zoom,
            1 => Self::Freeze,
            _ => Self::Hint,
        }
    }
}

/// In-field power-up, one-shot: once collected it stays inert for the round
#[derive(Debug, Clone, Copy)]
pub struct FieldPowerUp {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub collected: bool,
}

impl FieldPowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            collected: false,
        }
    }
}

/// Decorative burst unit. Opacity for rendering is life / max_life.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: u32,
    pub max_life: u32,
    pub color: [u8; 3],
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, life: u32, color: [u8; 3]) -> Self {
        Self {
            pos,
            vel,
            life,
            max_life: life,
            color,
        }
    }

    pub fn alpha(&self) -> f32 {
        self.life as f32 / self.max_life as f32
    }
}
