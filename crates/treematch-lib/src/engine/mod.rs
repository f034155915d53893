//! Query matching engine.
//!
//! The subject tree is flattened once per run into a [`LinkedTree`], then the
//! query is evaluated recursively over immutable [`MatchingState`]s. All
//! sequences are lazy; container sub-searches are memoized per state through
//! a replay cache.

mod adapters;
mod config;
mod eval;
mod linked;
mod matcher;
mod predicate;
mod replay;
mod state;
pub mod trace;

#[cfg(test)]
mod matcher_tests;

pub use adapters::{Distinct, OrElse};
pub use config::MatchConfig;
pub use linked::{LinkedTree, Neighbors, NodeId, Within};
pub use matcher::{Matcher, MatcherBuilder, Matches, enumerate_matches, has_match};
pub use predicate::{PropertyFn, PropertyPredicate};
pub use replay::{Replay, ReplayIter};
pub use state::MatchingState;
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
