//! Opaque phase identifiers.

use serde::{Deserialize, Serialize};

/// Opaque phase identifier. Games define their own phases.
///
/// The library never interprets phase IDs - they're only compared for
/// equality by the legality gate and written by `StartPhase`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhaseId(pub u32);

impl PhaseId {
    /// Create a new phase ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PhaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Phase {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_id() {
        let phase = PhaseId::new(5);
        assert_eq!(phase.raw(), 5);
        assert_eq!(format!("{}", phase), "Phase 5");
        assert_eq!(PhaseId::default(), PhaseId::new(0));
    }
}
