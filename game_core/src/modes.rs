use crate::params::Params;

/// Selectable game modes. Classic runs a fixed number of rounds against
/// a stopwatch; Time Trial runs unbounded rounds against a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    #[default]
    Classic,
    TimeTrial,
}

impl GameMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::TimeTrial => "Time Trial",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Classic => "Find the gem in 20 rounds",
            Self::TimeTrial => "Score as much as possible in 60 seconds",
        }
    }

    /// Round cap, `None` when rounds are unbounded
    pub fn max_rounds(&self) -> Option<u32> {
        match self {
            Self::Classic => Some(Params::CLASSIC_ROUNDS),
            Self::TimeTrial => None,
        }
    }

    /// Countdown budget, `None` for stopwatch modes
    pub fn time_budget_ms(&self) -> Option<f32> {
        match self {
            Self::Classic => None,
            Self::TimeTrial => Some(Params::TIME_TRIAL_BUDGET_MS),
        }
    }

    pub fn is_timed(&self) -> bool {
        self.time_budget_ms().is_some()
    }

    /// Whether completing `round_number` ends the game
    pub fn is_final_round(&self, round_number: u32) -> bool {
        self.max_rounds().is_some_and(|max| round_number >= max)
    }
}
