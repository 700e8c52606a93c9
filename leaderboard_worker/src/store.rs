use js_sys::Date;
use proto::{ScoreRow, ScoreSubmission};
use worker::*;

/// Storage key for the whole score table
const ROWS_KEY: &str = "rows";

/// Hard cap on stored rows; the table is trimmed from the bottom
const MAX_ROWS: usize = 1000;

pub const DEFAULT_LIMIT: usize = 10;

/// The score table, kept sorted by score descending. Small enough to
/// load and persist wholesale under a single storage key.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ScoreBoard {
    rows: Vec<ScoreRow>,
}

impl ScoreBoard {
    pub fn insert(&mut self, row: ScoreRow) {
        self.rows.push(row);
        // Stable sort keeps earlier submissions ahead on ties
        self.rows.sort_by(|a, b| b.score.cmp(&a.score));
        self.rows.truncate(MAX_ROWS);
    }

    pub fn top(&self, limit: usize) -> &[ScoreRow] {
        &self.rows[..self.rows.len().min(limit)]
    }

    /// A user's best row; usernames compare case-insensitively
    pub fn best_for(&self, username: &str) -> Option<&ScoreRow> {
        self.rows
            .iter()
            .find(|row| row.username.eq_ignore_ascii_case(username))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Durable Object holding the leaderboard. One global instance serves
/// every request the router forwards to it.
#[durable_object]
pub struct LeaderboardDO {
    state: State,
    #[allow(dead_code)]
    env: Env,
}

impl DurableObject for LeaderboardDO {
    fn new(state: State, env: Env) -> Self {
        Self { state, env }
    }

    async fn fetch(&self, mut req: Request) -> Result<Response> {
        let url = req.url()?;
        let path = url.path().to_string();

        match (req.method(), path.as_str()) {
            (Method::Post, "/api/scores") => self.insert_score(&mut req).await,
            (Method::Get, "/api/scores") => {
                let limit = url
                    .query_pairs()
                    .find(|(key, _)| key == "limit")
                    .and_then(|(_, value)| value.parse::<usize>().ok())
                    .unwrap_or(DEFAULT_LIMIT);
                self.top_scores(limit).await
            }
            (Method::Get, path) if path.starts_with("/api/scores/") => {
                let username = decode_segment(path.trim_start_matches("/api/scores/"));
                self.best_score(&username).await
            }
            _ => Response::error("Not found", 404),
        }
    }
}

impl LeaderboardDO {
    async fn load(&self) -> ScoreBoard {
        // A missing key is just an empty board
        self.state
            .storage()
            .get::<ScoreBoard>(ROWS_KEY)
            .await
            .unwrap_or_default()
    }

    async fn save(&self, board: &ScoreBoard) -> Result<()> {
        self.state.storage().put(ROWS_KEY, board).await
    }

    async fn insert_score(&self, req: &mut Request) -> Result<Response> {
        let submission: ScoreSubmission = match req.json().await {
            Ok(submission) => submission,
            Err(err) => {
                console_error!("Rejecting malformed score submission: {err:?}");
                return Response::error("Invalid score submission", 400);
            }
        };

        let row = ScoreRow::from_submission(submission, Date::now());
        let mut board = self.load().await;
        board.insert(row.clone());
        self.save(&board).await?;

        console_log!(
            "Stored score {} for {} ({} rows total)",
            row.score,
            row.username,
            board.len()
        );
        Response::from_json(&row)
    }

    async fn top_scores(&self, limit: usize) -> Result<Response> {
        let board = self.load().await;
        Response::from_json(&board.top(limit))
    }

    async fn best_score(&self, username: &str) -> Result<Response> {
        let board = self.load().await;
        match board.best_for(username) {
            Some(row) => Response::from_json(row),
            None => Response::error("No scores for that user", 404),
        }
    }
}

/// Best-effort percent-decoding for the username path segment
fn decode_segment(segment: &str) -> String {
    js_sys::decode_uri_component(segment)
        .map(String::from)
        .unwrap_or_else(|_| segment.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(username: &str, score: u64) -> ScoreRow {
        ScoreRow {
            username: username.to_string(),
            score,
            total_time: 30_000,
            best_combo: 4,
            created_at: 0.0,
        }
    }

    #[test]
    fn test_board_keeps_descending_score_order() {
        let mut board = ScoreBoard::default();
        board.insert(row("ruby", 300));
        board.insert(row("opal", 900));
        board.insert(row("jade", 600));

        let top: Vec<u64> = board.top(10).iter().map(|r| r.score).collect();
        assert_eq!(top, vec![900, 600, 300]);
    }

    #[test]
    fn test_top_respects_the_limit() {
        let mut board = ScoreBoard::default();
        for i in 0..25 {
            board.insert(row("player", i * 10));
        }
        assert_eq!(board.top(10).len(), 10);
        assert_eq!(board.top(0).len(), 0);
        assert_eq!(board.top(100).len(), 25, "Limit past the end is fine");
    }

    #[test]
    fn test_best_for_ignores_case_and_prefers_highest() {
        let mut board = ScoreBoard::default();
        board.insert(row("Opal", 400));
        board.insert(row("opal", 900));
        board.insert(row("jade", 600));

        let best = board.best_for("OPAL").expect("user has rows");
        assert_eq!(best.score, 900);
        assert!(board.best_for("nobody").is_none());
    }

    #[test]
    fn test_ties_keep_submission_order() {
        let mut board = ScoreBoard::default();
        board.insert(row("first", 500));
        board.insert(row("second", 500));

        assert_eq!(board.top(2)[0].username, "first");
        assert_eq!(board.top(2)[1].username, "second");
    }
}
