use crate::session::SessionStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementId {
    FirstSteps,
    SpeedDemon,
    ComboMaster,
    PowerPlayer,
    PerfectRound,
    Persistent,
    HighScorer,
    Efficient,
}

impl AchievementId {
    /// Pure check against the session totals; evaluated at game completion
    pub fn earned(&self, stats: &SessionStats) -> bool {
        match self {
            Self::FirstSteps => stats.rounds_completed >= 1,
            Self::SpeedDemon => stats.average_round_ms().is_some_and(|avg| avg < 3000.0),
            Self::ComboMaster => stats.best_combo >= 10,
            Self::PowerPlayer => stats.powerups_collected >= 5,
            Self::PerfectRound => stats.mistakes == 0,
            Self::Persistent => stats.rounds_completed >= 20,
            Self::HighScorer => stats.score >= 50_000,
            Self::Efficient => stats.average_round_ms().is_some_and(|avg| avg < 5000.0),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Achievement {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

pub const ACHIEVEMENTS: [Achievement; 8] = [
    Achievement {
        id: AchievementId::FirstSteps,
        title: "First Steps",
        description: "Complete your first round",
        icon: "\u{1F3AF}",
    },
    Achievement {
        id: AchievementId::SpeedDemon,
        title: "Speed Demon",
        description: "Complete a round in under 3 seconds",
        icon: "\u{26A1}",
    },
    Achievement {
        id: AchievementId::ComboMaster,
        title: "Combo Master",
        description: "Achieve a 10x combo",
        icon: "\u{1F525}",
    },
    Achievement {
        id: AchievementId::PowerPlayer,
        title: "Power Player",
        description: "Collect 5 power-ups in one game",
        icon: "\u{1F48E}",
    },
    Achievement {
        id: AchievementId::PerfectRound,
        title: "Perfect Round",
        description: "Complete a round without mistakes",
        icon: "\u{2B50}",
    },
    Achievement {
        id: AchievementId::Persistent,
        title: "Persistent",
        description: "Complete all 20 rounds",
        icon: "\u{1F3C6}",
    },
    Achievement {
        id: AchievementId::HighScorer,
        title: "High Scorer",
        description: "Score over 50,000 points",
        icon: "\u{1F4B0}",
    },
    Achievement {
        id: AchievementId::Efficient,
        title: "Efficient",
        description: "Average under 5 seconds per round",
        icon: "\u{23F1}",
    },
];

/// All achievements the session has earned, in catalog order
pub fn earned_achievements(stats: &SessionStats) -> Vec<&'static Achievement> {
    ACHIEVEMENTS
        .iter()
        .filter(|achievement| achievement.id.earned(stats))
        .collect()
}
