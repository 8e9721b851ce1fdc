//! Repeat-until layers.
//!
//! - `ApplyUntil`: legal until a condition is met
//! - `ApplyUntilCount`: the condition is a count reaching its target
//! - `ApplyCountTimes`: the count is this move's own consecutive
//!   applications in the current phase
//!
//! These are fix-up moves that may be applied several times in a row. The
//! layers are extension traits: a move gets them for free by implementing
//! the capabilities they build on, then forwards its `legal` (and, for
//! counts, its `condition_met` or `count`) to the layer methods.
//!
//! A layer cannot override `Move` methods, so the move itself must return
//! `true` from `fallback_is_fix_up` and `allow_multiple_in_progression`.
//!
//! ```
//! use rust_moves::core::{MoveError, PropertyBag, State};
//! use rust_moves::moves::{
//!     ApplyCountTimes, ApplyUntil, ApplyUntilCount, Base, ConditionMetter, Counter, Move,
//!     TargetCounter,
//! };
//! use rust_moves::core::PlayerIndex;
//!
//! type S = State<PropertyBag, PropertyBag>;
//!
//! #[derive(Clone, Debug, Default)]
//! struct RollDice {
//!     base: Base,
//! }
//!
//! impl Move<PropertyBag, PropertyBag> for RollDice {
//!     fn base(&self) -> &Base { &self.base }
//!     fn base_mut(&mut self) -> &mut Base { &mut self.base }
//!     fn legal(&self, state: &S, proposer: PlayerIndex) -> Result<(), MoveError> {
//!         self.apply_until_legal(state, proposer)
//!     }
//!     fn fallback_name(&self) -> String { self.count_times_fallback_name() }
//!     fn fallback_is_fix_up(&self) -> bool { true }
//!     fn allow_multiple_in_progression(&self) -> bool { true }
//! }
//! impl TargetCounter<PropertyBag, PropertyBag> for RollDice {}
//! impl Counter<PropertyBag, PropertyBag> for RollDice {
//!     fn count(&self, state: &S) -> Result<i64, MoveError> { Ok(self.count_times(state)) }
//! }
//! impl ConditionMetter<PropertyBag, PropertyBag> for RollDice {
//!     fn condition_met(&self, state: &S) -> Result<bool, MoveError> { self.count_reached(state) }
//! }
//!
//! let roll = RollDice::default();
//! assert_eq!(roll.fallback_name(), "Apply 1 Times");
//! assert!(roll.is_fix_up());
//! ```

use crate::core::error::{checked_count, IllegalMove, MoveError};
use crate::core::player::PlayerIndex;
use crate::core::state::{State, SubState};

use super::capabilities::{ConditionMetter, Counter};

/// Legal until `condition_met` says stop.
///
/// Implementors override `Move::fallback_is_fix_up` and
/// `Move::allow_multiple_in_progression` to return `true`; this layer has no
/// way to supply them.
pub trait ApplyUntil<G: SubState, P: SubState>: ConditionMetter<G, P> {
    /// The base gate, then `ConditionAlreadyMet` once the condition holds.
    fn apply_until_legal(
        &self,
        state: &State<G, P>,
        _proposer: PlayerIndex,
    ) -> Result<(), MoveError> {
        self.base().legal(&self.name(), state)?;
        if self.condition_met(state)? {
            return Err(IllegalMove::ConditionAlreadyMet.into());
        }
        Ok(())
    }
}

impl<G: SubState, P: SubState, T: ConditionMetter<G, P> + ?Sized> ApplyUntil<G, P> for T {}

/// Stop when `count` equals `target_count`.
///
/// Each application must move the count one step closer to the target
/// without overshooting; termination is up to the move.
pub trait ApplyUntilCount<G: SubState, P: SubState>: Counter<G, P> {
    /// Whether the count has reached its target.
    ///
    /// Negative counts or targets are configuration errors.
    fn count_reached(&self, state: &State<G, P>) -> Result<bool, MoveError> {
        let target = checked_count("target count", self.target_count(state))?;
        let count = checked_count("count", self.count(state)?)?;
        Ok(count == target)
    }

    /// Check count and target against an example state.
    fn validate_counts(&self, state: &State<G, P>) -> Result<(), MoveError> {
        checked_count("target count", self.target_count(state))?;
        checked_count("count", self.count(state)?)?;
        Ok(())
    }

    fn apply_until_count_fallback_name(&self) -> String {
        format!("Apply Until Count of {}", self.configuration().target_count())
    }
}

impl<G: SubState, P: SubState, T: Counter<G, P> + ?Sized> ApplyUntilCount<G, P> for T {}

/// Count this move's own consecutive applications in the current phase.
pub trait ApplyCountTimes<G: SubState, P: SubState>: ApplyUntilCount<G, P> {
    fn count_times(&self, state: &State<G, P>) -> i64 {
        state.consecutive_applications(&self.name()) as i64
    }

    fn count_times_fallback_name(&self) -> String {
        format!("Apply {} Times", self.configuration().target_count())
    }
}

impl<G: SubState, P: SubState, T: ApplyUntilCount<G, P> + ?Sized> ApplyCountTimes<G, P> for T {}
