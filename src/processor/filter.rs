//! Level selection for SHARPpy output
//!
//! Walks the table once, forward only, applying two rules per input index:
//!
//! 1. Ceiling: a level with pressure at or below the ceiling ends the walk.
//!    Nothing after it is considered, even levels that would pass.
//! 2. Ascent: a level whose height is not above the height of the previous
//!    *input* level is dropped. The comparison is against the previous input
//!    row whether or not that row was itself dropped.
//!
//! Everything else is yielded in input order.

use crate::config::FilterPolicy;
use crate::models::SoundingLevel;
use tracing::{debug, info};

/// Outcome for a single input level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelDecision {
    Emit,
    NonAscending,
    Ceiling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterState {
    Scanning,
    Done,
}

/// Decide what happens to the level at `index`
///
/// An index past the end of the table is terminal, like the ceiling.
pub fn classify_level(
    levels: &[SoundingLevel],
    index: usize,
    policy: &FilterPolicy,
) -> LevelDecision {
    let Some(level) = levels.get(index) else {
        return LevelDecision::Ceiling;
    };

    if level.pressure_mb <= policy.pressure_ceiling_mb {
        return LevelDecision::Ceiling;
    }

    match index.checked_sub(1).and_then(|prev| levels.get(prev)) {
        Some(previous) if level.height_m <= previous.height_m => LevelDecision::NonAscending,
        _ => LevelDecision::Emit,
    }
}

/// Iterator over the levels that survive the ceiling and ascent rules
#[derive(Debug)]
pub struct LevelFilter<'a> {
    levels: &'a [SoundingLevel],
    policy: FilterPolicy,
    index: usize,
    state: FilterState,
    non_ascending: usize,
    ceiling_index: Option<usize>,
}

impl<'a> LevelFilter<'a> {
    pub fn new(levels: &'a [SoundingLevel], policy: FilterPolicy) -> Self {
        Self {
            levels,
            policy,
            index: 0,
            state: FilterState::Scanning,
            non_ascending: 0,
            ceiling_index: None,
        }
    }

    /// Levels dropped so far by the ascent rule
    pub fn non_ascending(&self) -> usize {
        self.non_ascending
    }

    /// Input index that hit the ceiling, if the walk stopped there
    pub fn ceiling_index(&self) -> Option<usize> {
        self.ceiling_index
    }
}

impl<'a> Iterator for LevelFilter<'a> {
    type Item = &'a SoundingLevel;

    fn next(&mut self) -> Option<Self::Item> {
        while self.state == FilterState::Scanning {
            let index = self.index;
            let Some(level) = self.levels.get(index) else {
                self.state = FilterState::Done;
                break;
            };
            self.index += 1;

            match classify_level(self.levels, index, &self.policy) {
                LevelDecision::Emit => return Some(level),
                LevelDecision::NonAscending => {
                    debug!(
                        "Dropping level {}: height {} m not above previous {} m",
                        index,
                        level.height_m,
                        self.levels
                            .get(index.wrapping_sub(1))
                            .map_or(f64::NAN, |p| p.height_m)
                    );
                    self.non_ascending += 1;
                }
                LevelDecision::Ceiling => {
                    info!(
                        "Reached {} mb ceiling at level {} ({} mb), stopping output",
                        self.policy.pressure_ceiling_mb, index, level.pressure_mb
                    );
                    self.ceiling_index = Some(index);
                    self.state = FilterState::Done;
                }
            }
        }
        None
    }
}
