//! Matching entry points.

use std::fmt;

use treematch_core::{NodeReferences, TreeNode};

use super::adapters::Distinct;
use super::config::MatchConfig;
use super::eval::{Env, evaluate};
use super::predicate::PropertyPredicate;
use super::state::MatchingState;
use super::trace::{NoopTracer, Tracer};
use crate::query::QueryNode;

static DEFAULT_CONFIG: MatchConfig = MatchConfig::new();

/// Matches queries against subject trees.
///
/// A matcher holds no per-run state; the linked tree and all caches of a run
/// live in the [`Matches`] iterator it returns.
pub struct Matcher<'m, N> {
    config: MatchConfig,
    predicate: Option<Box<dyn PropertyPredicate<N> + 'm>>,
    tracer: &'m dyn Tracer,
}

/// Builder for [`Matcher`] instances.
pub struct MatcherBuilder<'m, N> {
    config: MatchConfig,
    predicate: Option<Box<dyn PropertyPredicate<N> + 'm>>,
    tracer: &'m dyn Tracer,
}

impl<'m, N> Default for MatcherBuilder<'m, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'m, N> MatcherBuilder<'m, N> {
    pub fn new() -> Self {
        Self {
            config: MatchConfig::default(),
            predicate: None,
            tracer: &NoopTracer,
        }
    }

    /// Set the configuration.
    pub fn config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Enable or disable the replay cache.
    pub fn replay_cache(mut self, enabled: bool) -> Self {
        self.config = self.config.replay_cache(enabled);
        self
    }

    /// Check property filters with `predicate` instead of the node's own
    /// `property_matches`.
    pub fn property_predicate(mut self, predicate: impl PropertyPredicate<N> + 'm) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Report evaluation steps to `tracer`.
    pub fn tracer(mut self, tracer: &'m dyn Tracer) -> Self {
        self.tracer = tracer;
        self
    }

    /// Build the matcher.
    pub fn build(self) -> Matcher<'m, N> {
        Matcher {
            config: self.config,
            predicate: self.predicate,
            tracer: self.tracer,
        }
    }
}

impl<'m, N> Matcher<'m, N> {
    /// Create a matcher builder.
    pub fn builder() -> MatcherBuilder<'m, N> {
        MatcherBuilder::new()
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }
}

impl<'m, N: TreeNode> Matcher<'m, N> {
    /// True iff `query` matches `subject` at least once.
    ///
    /// Stops at the first match found.
    pub fn has_match(&self, query: &QueryNode, subject: &N) -> bool {
        self.enumerate_matches(query, subject).next().is_some()
    }

    /// All distinct capture bindings of `query` against `subject`, lazily and
    /// in discovery order.
    pub fn enumerate_matches<'a>(&'a self, query: &'a QueryNode, subject: &'a N) -> Matches<'a, N>
    where
        'm: 'a,
    {
        let env = Env {
            config: &self.config,
            predicate: self.predicate.as_deref().map(|p| p as &dyn PropertyPredicate<N>),
            tracer: self.tracer,
        };
        Matches::new(query, subject, env)
    }
}

impl<N> fmt::Debug for Matcher<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("config", &self.config)
            .field("predicate", &self.predicate.is_some())
            .finish_non_exhaustive()
    }
}

/// Lazy sequence of distinct capture bindings, one per match.
pub struct Matches<'a, N> {
    inner: Distinct<Box<dyn Iterator<Item = NodeReferences<'a, N>> + 'a>>,
    tracer: &'a dyn Tracer,
}

impl<'a, N: TreeNode + 'a> Matches<'a, N> {
    fn new(query: &'a QueryNode, subject: &'a N, env: Env<'a, N>) -> Self {
        let results: Box<dyn Iterator<Item = NodeReferences<'a, N>> + 'a> = Box::new(
            MatchingState::from_root(subject)
                .flat_map(move |state| evaluate(query, state, env))
                .map(MatchingState::into_references),
        );
        Self {
            inner: Distinct::new(results),
            tracer: env.tracer,
        }
    }
}

impl<'a, N: TreeNode + 'a> Iterator for Matches<'a, N> {
    type Item = NodeReferences<'a, N>;

    fn next(&mut self) -> Option<Self::Item> {
        let references = self.inner.next()?;
        self.tracer.trace_match(
            &mut references
                .iter()
                .map(|(name, node)| (name, node.node_type())),
        );
        Some(references)
    }
}

/// [`Matcher::has_match`] with the default configuration.
pub fn has_match<N: TreeNode>(query: &QueryNode, subject: &N) -> bool {
    enumerate_matches(query, subject).next().is_some()
}

/// [`Matcher::enumerate_matches`] with the default configuration.
pub fn enumerate_matches<'a, N: TreeNode + 'a>(
    query: &'a QueryNode,
    subject: &'a N,
) -> Matches<'a, N> {
    let env = Env {
        config: &DEFAULT_CONFIG,
        predicate: None,
        tracer: &NoopTracer,
    };
    Matches::new(query, subject, env)
}
