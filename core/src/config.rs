use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Longest solution any round may accept.
    pub max_depth: usize,
    /// Length limit of the first iterative-deepening round.
    pub initial_depth: usize,
    /// Amount the limit grows by between rounds.
    pub depth_step: usize,
    /// Slots in the visited-state table.
    pub cache_capacity: usize,
    pub dominance_pruning: bool,
    /// Nodes between two progress reports.
    pub progress_interval: u64,
}

impl SearchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_depth > MAX_DEPTH {
            return Err(PuzzleError::InvalidConfig(
                "max_depth exceeds the move history capacity",
            ));
        }
        if self.depth_step == 0 {
            return Err(PuzzleError::InvalidConfig("depth_step must be positive"));
        }
        if self.cache_capacity == 0 {
            return Err(PuzzleError::InvalidConfig(
                "cache_capacity must be positive",
            ));
        }
        if self.progress_interval == 0 {
            return Err(PuzzleError::InvalidConfig(
                "progress_interval must be positive",
            ));
        }
        Ok(())
    }

    /// Length limits of the successive rounds, the last one being `max_depth`.
    pub fn round_limits(&self) -> impl Iterator<Item = usize> + use<> {
        let max_depth = self.max_depth;
        let step = self.depth_step.max(1);
        let first = self.initial_depth.min(max_depth);
        core::iter::successors(Some(first), move |&limit| {
            (limit < max_depth).then(|| (limit + step).min(max_depth))
        })
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            initial_depth: 10,
            depth_step: 5,
            cache_capacity: 1 << 22,
            dominance_pruning: true,
            progress_interval: 1 << 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn default_is_valid() {
        assert_eq!(SearchConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_depth_beyond_history() {
        let config = SearchConfig {
            max_depth: MAX_DEPTH + 1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PuzzleError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_zero_step() {
        let config = SearchConfig {
            depth_step: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn round_limits_end_at_max_depth() {
        let config = SearchConfig {
            max_depth: 23,
            initial_depth: 10,
            depth_step: 5,
            ..Default::default()
        };
        assert_eq!(config.round_limits().collect::<Vec<_>>(), [10, 15, 20, 23]);
    }

    #[test]
    fn initial_depth_is_capped() {
        let config = SearchConfig {
            max_depth: 4,
            initial_depth: 10,
            ..Default::default()
        };
        assert_eq!(config.round_limits().collect::<Vec<_>>(), [4]);
    }
}
