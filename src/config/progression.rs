//! Move progressions: the order moves must be applied in within a phase.
//!
//! A progression is a pattern built from groups:
//! - `Move(name)`: one application of the named move, or the whole run of
//!   them if that move allows multiple applications in a progression
//! - `Serial(groups)`: every group, in order
//! - `Parallel(groups)`: every group exactly once, in any order
//! - `Optional(group)`: the group, or nothing
//!
//! A move is legal with respect to a progression when the names recorded so
//! far in the current phase, followed by the move's own name, form a prefix
//! of something the pattern can produce.
//!
//! Runs are matched greedily from the left: a repeatable move takes every
//! consecutive application, so two adjacent groups for the same repeatable
//! move need a `No Op` between them.
//!
//! ```
//! use rust_moves::config::{progression_matches, ProgressionGroup};
//!
//! let pattern = vec![
//!     ProgressionGroup::from("Deal"),
//!     ProgressionGroup::optional("Discard"),
//!     ProgressionGroup::from("Draw"),
//! ];
//! let repeats = |name: &str| name == "Deal";
//!
//! assert!(progression_matches(&pattern, &["Deal", "Deal", "Draw"], repeats));
//! assert!(!progression_matches(&pattern, &["Draw"], repeats));
//! ```

use log::trace;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A node of a move progression pattern.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressionGroup {
    Move(String),
    Serial(Vec<ProgressionGroup>),
    Parallel(Vec<ProgressionGroup>),
    Optional(Box<ProgressionGroup>),
}

impl ProgressionGroup {
    /// A serial group of single moves, in order.
    pub fn moves<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        ProgressionGroup::Serial(
            names
                .into_iter()
                .map(|name| ProgressionGroup::Move(name.into()))
                .collect(),
        )
    }

    pub fn serial(groups: impl IntoIterator<Item = ProgressionGroup>) -> Self {
        ProgressionGroup::Serial(groups.into_iter().collect())
    }

    pub fn parallel(groups: impl IntoIterator<Item = ProgressionGroup>) -> Self {
        ProgressionGroup::Parallel(groups.into_iter().collect())
    }

    pub fn optional(group: impl Into<ProgressionGroup>) -> Self {
        ProgressionGroup::Optional(Box::new(group.into()))
    }

    /// Every move name in the group, in pattern order, without repeats.
    #[must_use]
    pub fn move_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            ProgressionGroup::Move(name) => {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
            ProgressionGroup::Serial(groups) | ProgressionGroup::Parallel(groups) => {
                for group in groups {
                    group.collect_names(names);
                }
            }
            ProgressionGroup::Optional(group) => group.collect_names(names),
        }
    }
}

impl From<&str> for ProgressionGroup {
    fn from(name: &str) -> Self {
        ProgressionGroup::Move(name.to_string())
    }
}

impl From<String> for ProgressionGroup {
    fn from(name: String) -> Self {
        ProgressionGroup::Move(name)
    }
}

/// Tape positions a group can end at, starting from one position.
#[derive(Debug, Default)]
struct Reach {
    /// Positions right after a complete match of the group.
    ends: SmallVec<[usize; 4]>,
    /// The tape ran out partway through a possible match.
    prefix: bool,
}

impl Reach {
    fn add_end(&mut self, end: usize) {
        if !self.ends.contains(&end) {
            self.ends.push(end);
        }
    }

    fn merge(&mut self, other: Reach) {
        self.prefix |= other.prefix;
        for end in other.ends {
            self.add_end(end);
        }
    }
}

struct Matcher<'t, F> {
    tape: &'t [&'t str],
    repeats: F,
}

impl<'t, F: Fn(&str) -> bool> Matcher<'t, F> {
    fn reach(&self, group: &ProgressionGroup, start: usize) -> Reach {
        if start == self.tape.len() {
            return Reach {
                ends: SmallVec::new(),
                prefix: true,
            };
        }

        match group {
            ProgressionGroup::Move(name) => self.reach_move(name, start),
            ProgressionGroup::Serial(groups) => self.reach_serial(groups, start),
            ProgressionGroup::Parallel(groups) => self.reach_parallel(groups, start),
            ProgressionGroup::Optional(group) => {
                let mut reach = self.reach(group, start);
                reach.add_end(start);
                reach
            }
        }
    }

    fn reach_move(&self, name: &str, start: usize) -> Reach {
        let mut reach = Reach::default();
        if self.tape[start] != name {
            return reach;
        }

        // A repeatable move swallows its whole run; later groups never
        // share it.
        let mut end = start + 1;
        if (self.repeats)(name) {
            while end < self.tape.len() && self.tape[end] == name {
                end += 1;
            }
            reach.prefix = end == self.tape.len();
        }
        reach.add_end(end);
        reach
    }

    fn reach_serial(&self, groups: &[ProgressionGroup], start: usize) -> Reach {
        let mut frontier: SmallVec<[usize; 4]> = SmallVec::new();
        frontier.push(start);
        let mut prefix = false;

        for group in groups {
            let mut next = Reach::default();
            for &position in &frontier {
                next.merge(self.reach(group, position));
            }
            prefix |= next.prefix;
            frontier = next.ends;
            if frontier.is_empty() {
                break;
            }
        }

        Reach {
            ends: frontier,
            prefix,
        }
    }

    fn reach_parallel(&self, groups: &[ProgressionGroup], start: usize) -> Reach {
        // Groups are tracked in a u64 mask; anything past that is ignored.
        let groups = &groups[..groups.len().min(64)];
        let full = if groups.len() == 64 {
            u64::MAX
        } else {
            (1u64 << groups.len()) - 1
        };

        let mut reach = Reach::default();
        let mut seen = FxHashSet::default();
        let mut pending = vec![(start, 0u64)];

        while let Some((position, used)) = pending.pop() {
            if !seen.insert((position, used)) {
                continue;
            }
            if used == full {
                reach.add_end(position);
                continue;
            }
            for (i, group) in groups.iter().enumerate() {
                let bit = 1u64 << i;
                if used & bit != 0 {
                    continue;
                }
                let child = self.reach(group, position);
                reach.prefix |= child.prefix;
                for end in child.ends {
                    pending.push((end, used | bit));
                }
            }
        }
        reach
    }
}

/// Whether `tape` is a prefix of something `pattern` (a serial sequence of
/// groups) can produce.
///
/// `repeats(name)` tells whether a move may match a run of consecutive
/// applications rather than exactly one.
pub fn progression_matches<F: Fn(&str) -> bool>(
    pattern: &[ProgressionGroup],
    tape: &[&str],
    repeats: F,
) -> bool {
    let matcher = Matcher { tape, repeats };
    let reach = matcher.reach_serial(pattern, 0);
    let matched = reach.prefix || reach.ends.contains(&tape.len());
    trace!("progression match of {:?}: {}", tape, matched);
    matched
}

/// Names of the moves that could legally come after `history`.
pub fn expected_next<F: Fn(&str) -> bool>(
    pattern: &[ProgressionGroup],
    history: &[&str],
    repeats: F,
) -> Vec<String> {
    let mut names: Vec<&str> = Vec::new();
    for group in pattern {
        for name in group.move_names() {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }

    let mut tape: Vec<&str> = history.to_vec();
    names
        .into_iter()
        .filter(|name| {
            tape.push(*name);
            let matched = progression_matches(pattern, &tape, &repeats);
            tape.pop();
            matched
        })
        .map(str::to_string)
        .collect()
}
