//! Move history records.
//!
//! Every applied move leaves a `MoveRecord` in the state's history. Moves
//! that depend on what happened just before them (count-times moves, round
//! robins, move progressions) read the trailing records of the current phase.

use serde::{Deserialize, Serialize};

use super::phase::PhaseId;
use super::player::PlayerIndex;

/// A recorded move with the metadata moves need to inspect history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Registered name of the move that was applied.
    pub name: String,

    /// Phase the game was in when the move was proposed.
    pub phase: PhaseId,

    /// Who proposed it. Fix-up moves are proposed by the admin.
    pub proposer: PlayerIndex,

    /// State version produced by applying the move.
    pub version: u64,
}

impl MoveRecord {
    /// Create a new move record.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        phase: PhaseId,
        proposer: PlayerIndex,
        version: u64,
    ) -> Self {
        Self {
            name: name.into(),
            phase,
            proposer,
            version,
        }
    }
}
