//! Matching configuration.

/// Knobs for a [`Matcher`](super::Matcher) run.
///
/// None of them changes which matches are found, only how much work is
/// repeated while finding them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchConfig {
    /// Memoize container sub-searches per matching state (default: on).
    pub(crate) replay_cache: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchConfig {
    /// Create a configuration with defaults.
    pub const fn new() -> Self {
        Self { replay_cache: true }
    }

    /// Enable or disable the replay cache for container sub-searches.
    pub fn replay_cache(mut self, enabled: bool) -> Self {
        self.replay_cache = enabled;
        self
    }

    pub fn get_replay_cache(&self) -> bool {
        self.replay_cache
    }
}
