use crate::params::Params;

/// Running totals for one game session.
///
/// Mutated in exactly three places: `apply_round` on the round-complete
/// handoff, `record_miss` on a decoy hit, and `record_powerup` on an
/// activation. Misses never touch the combo.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionStats {
    pub score: u64,
    pub combo: u32,
    pub best_combo: u32,
    pub total_time_ms: f32,
    pub rounds_completed: u32,
    pub powerups_collected: u32,
    pub mistakes: u32,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points a completion at `elapsed_ms` would award right now:
    /// `floor(max(1000 - elapsed_ms, 100) * 1.2^combo * 1.1^round)`.
    /// The combo in the exponent is the streak *before* this round counts.
    pub fn round_points(&self, elapsed_ms: f32, round_number: u32) -> u64 {
        let base = (Params::ROUND_BASE_POINTS - elapsed_ms).max(Params::ROUND_MIN_POINTS);
        let combo_bonus = Params::COMBO_MULTIPLIER.powi(self.combo as i32);
        let round_bonus = Params::ROUND_BONUS.powi(round_number as i32);
        (base * combo_bonus * round_bonus).floor() as u64
    }

    /// Fold a completed round into the totals and return the points it
    /// was worth.
    pub fn apply_round(&mut self, elapsed_ms: f32, round_number: u32) -> u64 {
        let points = self.round_points(elapsed_ms, round_number);
        self.score += points;
        self.total_time_ms += elapsed_ms;
        self.combo += 1;
        self.best_combo = self.best_combo.max(self.combo);
        self.rounds_completed += 1;
        points
    }

    pub fn record_powerup(&mut self) {
        self.powerups_collected += 1;
    }

    pub fn record_miss(&mut self) {
        self.mistakes += 1;
    }

    /// Mean round time, `None` before the first completion
    pub fn average_round_ms(&self) -> Option<f32> {
        if self.rounds_completed == 0 {
            return None;
        }
        Some(self.total_time_ms / self.rounds_completed as f32)
    }
}
