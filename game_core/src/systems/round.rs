use crate::resources::{Events, Phase, Round, RoundComplete, Time};
use crate::session::SessionStats;

/// Close out a found round once its display delay lapses.
///
/// The Found -> Done transition happens exactly once, so the
/// `round_complete` event fires at most once per round no matter how
/// many steps run afterwards.
pub fn complete_round(
    time: &Time,
    round: &mut Round,
    stats: &mut SessionStats,
    events: &mut Events,
) {
    if round.phase != Phase::Found {
        return;
    }
    if time.now < round.complete_at {
        return;
    }

    let points = stats.apply_round(round.elapsed_ms, round.number);
    round.phase = Phase::Done;
    events.round_complete = Some(RoundComplete {
        elapsed_ms: round.elapsed_ms,
        points,
    });
}
