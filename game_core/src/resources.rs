use glam::Vec2;

use crate::components::PowerUpKind;
use crate::difficulty::Difficulty;
use crate::params::Params;

/// Time resource for tracking simulation time
#[derive(Debug, Clone, Copy)]
pub struct Time {
    pub dt: f32,  // Delta time for this step
    pub now: f32, // Total elapsed time
}

impl Time {
    pub fn new(dt: f32, now: f32) -> Self {
        Self { dt, now }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self {
            dt: 0.016,
            now: 0.0,
        }
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Coarse target location revealed by the hint power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    LeftTop,
    RightTop,
    LeftBottom,
    RightBottom,
}

impl Quadrant {
    pub fn for_pos(pos: Vec2) -> Self {
        match (pos.x >= Params::FIELD_CENTER, pos.y >= Params::FIELD_CENTER) {
            (false, false) => Self::LeftTop,
            (true, false) => Self::RightTop,
            (false, true) => Self::LeftBottom,
            (true, true) => Self::RightBottom,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::LeftTop => "left top",
            Self::RightTop => "right top",
            Self::LeftBottom => "left bottom",
            Self::RightBottom => "right bottom",
        }
    }
}

/// Audio cue requested by the simulation; playback belongs to the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Success,
    Error,
    Click,
    PowerUp,
}

/// Payload of the single round-complete event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundComplete {
    pub elapsed_ms: f32,
    pub points: u64,
}

/// Power-up activation notice for rendering and announcements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUpActivated {
    pub kind: PowerUpKind,
    pub origin: Vec2,
}

/// Events that occurred during this step
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub target_found: bool,
    pub decoy_hits: Vec<Vec2>,
    pub round_complete: Option<RoundComplete>,
    pub powerups: Vec<PowerUpActivated>,
    pub hint: Option<Quadrant>,
    pub cues: Vec<Cue>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.target_found = false;
        self.decoy_hits.clear();
        self.round_complete = None;
        self.powerups.clear();
        self.hint = None;
        self.cues.clear();
    }
}

/// One pointer/touch/keyboard activation in field percent coordinates.
/// `generation` stamps the round the input was produced for; stale
/// activations from a superseded round are dropped on drain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Activation {
    pub pos: Vec2,
    pub contacts: u8,
    pub generation: u32,
}

/// Queue of activations awaiting resolution at the next step
#[derive(Debug, Clone, Default)]
pub struct ActivationQueue {
    pub inputs: Vec<Activation>,
}

impl ActivationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.inputs.clear();
    }

    pub fn push_activation(&mut self, pos: Vec2, contacts: u8, generation: u32) {
        self.inputs.push(Activation {
            pos,
            contacts,
            generation,
        });
    }

    pub fn pop_activations(&mut self) -> Vec<Activation> {
        let inputs = self.inputs.clone();
        self.inputs.clear();
        inputs
    }
}

/// Round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Found,
    Done,
}

/// Per-round state: phase, timing, and the fixed-tick accumulators.
///
/// `generation` increments on every round start so queued activations
/// from an earlier round can be recognized and discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct Round {
    pub phase: Phase,
    pub number: u32,
    pub generation: u32,
    pub difficulty: Difficulty,
    pub started_at: f32,
    pub elapsed_ms: f32,
    pub complete_at: f32,
    pub motion_accum: f32,
    pub particle_accum: f32,
}

impl Round {
    pub fn new() -> Self {
        Self {
            difficulty: Difficulty::default(),
            ..Default::default()
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn begin(&mut self, number: u32, difficulty: Difficulty, now: f32) {
        self.phase = Phase::Running;
        self.number = number;
        self.generation = self.generation.wrapping_add(1);
        self.difficulty = difficulty;
        self.started_at = now;
        self.elapsed_ms = 0.0;
        self.complete_at = 0.0;
        self.motion_accum = 0.0;
        self.particle_accum = 0.0;
    }

    /// Latch the find: record elapsed time and schedule the completion
    /// after the display delay. Further input is rejected from here on.
    pub fn mark_found(&mut self, now: f32, delay: f32) {
        self.phase = Phase::Found;
        self.elapsed_ms = (now - self.started_at) * 1000.0;
        self.complete_at = now + delay;
    }
}

/// Effect expiry registry. Starting an effect replaces any pending
/// deadline of the same type, so a late revert can never cancel a
/// newer activation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Effects {
    pub zoom_until: Option<f32>,
    pub freeze_until: Option<f32>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_zoom(&mut self, now: f32) {
        self.zoom_until = Some(now + Params::ZOOM_DURATION);
    }

    pub fn start_freeze(&mut self, now: f32) {
        self.freeze_until = Some(now + Params::FREEZE_DURATION);
    }

    pub fn zoom_active(&self, now: f32) -> bool {
        self.zoom_until.is_some_and(|t| now < t)
    }

    pub fn freeze_active(&self, now: f32) -> bool {
        self.freeze_until.is_some_and(|t| now < t)
    }

    pub fn expire(&mut self, now: f32) {
        if self.zoom_until.is_some_and(|t| now >= t) {
            self.zoom_until = None;
        }
        if self.freeze_until.is_some_and(|t| now >= t) {
            self.freeze_until = None;
        }
    }

    pub fn clear(&mut self) {
        self.zoom_until = None;
        self.freeze_until = None;
    }
}

/// One reusable side-panel slot
#[derive(Debug, Clone, Copy)]
pub struct PanelSlot {
    pub kind: PowerUpKind,
    pub used_until: Option<f32>,
}

impl PanelSlot {
    pub fn is_used(&self, now: f32) -> bool {
        self.used_until.is_some_and(|t| now < t)
    }
}

/// The three fixed side-panel power-ups, alive for the whole session.
/// Slots flag `used` transiently after an activation and reset at round
/// start, so each is reusable every round.
#[derive(Debug, Clone, Copy)]
pub struct SidePanel {
    pub slots: [PanelSlot; 3],
}

impl Default for SidePanel {
    fn default() -> Self {
        Self {
            slots: [
                PanelSlot {
                    kind: PowerUpKind::Zoom,
                    used_until: None,
                },
                PanelSlot {
                    kind: PowerUpKind::Freeze,
                    used_until: None,
                },
                PanelSlot {
                    kind: PowerUpKind::Hint,
                    used_until: None,
                },
            ],
        }
    }
}

impl SidePanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.used_until = None;
        }
    }

    pub fn mark_used(&mut self, index: usize, now: f32) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.used_until = Some(now + Params::PANEL_FLASH_DURATION);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadrant_right_top() {
        let q = Quadrant::for_pos(Vec2::new(70.0, 30.0));
        assert_eq!(q, Quadrant::RightTop);
        assert_eq!(q.label(), "right top");
    }

    #[test]
    fn test_quadrant_all_corners() {
        assert_eq!(
            Quadrant::for_pos(Vec2::new(10.0, 10.0)),
            Quadrant::LeftTop
        );
        assert_eq!(
            Quadrant::for_pos(Vec2::new(10.0, 80.0)),
            Quadrant::LeftBottom
        );
        assert_eq!(
            Quadrant::for_pos(Vec2::new(80.0, 80.0)),
            Quadrant::RightBottom
        );
    }

    #[test]
    fn test_events_clear() {
        let mut events = Events::new();
        events.target_found = true;
        events.decoy_hits.push(Vec2::new(1.0, 2.0));
        events.round_complete = Some(RoundComplete {
            elapsed_ms: 500.0,
            points: 550,
        });
        events.hint = Some(Quadrant::LeftTop);
        events.cues.push(Cue::Success);

        events.clear();

        assert!(!events.target_found);
        assert!(events.decoy_hits.is_empty());
        assert!(events.round_complete.is_none());
        assert!(events.hint.is_none());
        assert!(events.cues.is_empty());
    }

    #[test]
    fn test_activation_queue_push_and_pop() {
        let mut queue = ActivationQueue::new();
        queue.push_activation(Vec2::new(10.0, 20.0), 1, 1);
        queue.push_activation(Vec2::new(30.0, 40.0), 2, 1);

        let drained = queue.pop_activations();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].pos, Vec2::new(10.0, 20.0));
        assert_eq!(drained[1].contacts, 2);
        assert!(queue.inputs.is_empty(), "Pop drains the queue");
    }

    #[test]
    fn test_round_begin_bumps_generation() {
        let mut round = Round::new();
        let gen0 = round.generation;
        round.begin(1, Difficulty::default(), 0.0);
        assert_eq!(round.generation, gen0 + 1);
        assert!(round.is_running());
        round.begin(2, Difficulty::default(), 10.0);
        assert_eq!(round.generation, gen0 + 2);
        assert_eq!(round.started_at, 10.0);
    }

    #[test]
    fn test_round_mark_found_records_elapsed() {
        let mut round = Round::new();
        round.begin(1, Difficulty::default(), 2.0);
        round.mark_found(3.5, 1.0);
        assert_eq!(round.phase, Phase::Found);
        assert!((round.elapsed_ms - 1500.0).abs() < 1e-3);
        assert!((round.complete_at - 4.5).abs() < 1e-6);
    }

    #[test]
    fn test_effects_restart_replaces_deadline() {
        let mut effects = Effects::new();
        effects.start_zoom(0.0);
        assert!(effects.zoom_active(4.9));
        // Re-activate at 3s; the window now runs to 8s
        effects.start_zoom(3.0);
        assert!(effects.zoom_active(6.0), "Restart extends the window");
        assert!(!effects.zoom_active(8.1));
    }

    #[test]
    fn test_effects_expire() {
        let mut effects = Effects::new();
        effects.start_freeze(0.0);
        effects.expire(1.0);
        assert!(effects.freeze_until.is_some(), "Still inside the window");
        effects.expire(3.0);
        assert!(effects.freeze_until.is_none(), "Deadline lapsed");
    }

    #[test]
    fn test_side_panel_reuse() {
        let mut panel = SidePanel::new();
        assert_eq!(panel.slots[0].kind, PowerUpKind::Zoom);
        panel.mark_used(1, 0.0);
        assert!(panel.slots[1].is_used(0.5));
        assert!(!panel.slots[1].is_used(1.5), "Flash window lapsed");
        panel.mark_used(2, 0.0);
        panel.reset();
        assert!(!panel.slots[2].is_used(0.0), "Reset clears used flags");
    }
}
