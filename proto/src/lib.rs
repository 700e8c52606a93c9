//! Leaderboard wire types shared by the client and the worker
//!
//! Everything travels as JSON over the REST API

use serde::{Deserialize, Serialize};

/// Body of `POST /api/scores`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub username: String,
    pub score: u64,
    /// Total play time in milliseconds
    pub total_time: u64,
    pub best_combo: u32,
}

/// One stored leaderboard row, as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub username: String,
    pub score: u64,
    pub total_time: u64,
    pub best_combo: u32,
    /// Milliseconds since the epoch, stamped by the worker on insert
    pub created_at: f64,
}

impl ScoreRow {
    pub fn from_submission(submission: ScoreSubmission, created_at: f64) -> Self {
        Self {
            username: submission.username,
            score: submission.score,
            total_time: submission.total_time,
            best_combo: submission.best_combo,
            created_at,
        }
    }

    /// Deserialize a stored row from a JSON response body
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl ScoreSubmission {
    /// Serialize to the JSON request body
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from a JSON request body
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_round_trips_as_json() {
        let submission = ScoreSubmission {
            username: "gemfinder".to_string(),
            score: 12_345,
            total_time: 48_200,
            best_combo: 7,
        };
        let json = submission.to_json().expect("Serialization should succeed");
        let decoded =
            ScoreSubmission::from_json(&json).expect("Deserialization should succeed");
        assert_eq!(decoded, submission);
    }

    #[test]
    fn test_submission_rejects_malformed_body() {
        assert!(ScoreSubmission::from_json("{\"username\": 3}").is_err());
        assert!(ScoreSubmission::from_json("not json").is_err());
    }

    #[test]
    fn test_row_parses_worker_response() {
        let json = concat!(
            "{\"username\":\"gemfinder\",\"score\":999,",
            "\"total_time\":60000,\"best_combo\":3,",
            "\"created_at\":1700000000000.0}"
        );
        let row = ScoreRow::from_json(json).expect("Deserialization should succeed");
        assert_eq!(row.score, 999);
        assert_eq!(row.best_combo, 3);
    }

    #[test]
    fn test_row_from_submission_stamps_creation_time() {
        let submission = ScoreSubmission {
            username: "gemfinder".to_string(),
            score: 999,
            total_time: 60_000,
            best_combo: 3,
        };
        let row = ScoreRow::from_submission(submission, 1_700_000_000_000.0);
        assert_eq!(row.username, "gemfinder");
        assert_eq!(row.score, 999);
        assert_eq!(row.created_at, 1_700_000_000_000.0);
    }
}
