//! Query trees: the patterns matched against subject trees.
//!
//! A query is a closed sum of four node kinds:
//! - **Single**: one subject node by type and properties, optionally
//!   captured, with a nested query for its children
//! - **All**: every child query matches, in order or in any order
//! - **Any**: at least one child query matches (or none, if optional)
//! - **Exact**: the child queries cover the sibling sequence contiguously
//!
//! Queries are built bottom-up with [`QueryNode::single`] and the container
//! constructors. They are immutable once built.

mod builder;
mod node;
mod printer;

#[cfg(test)]
mod node_tests;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

pub use builder::SingleBuilder;
pub use node::{AllQuery, AnyQuery, ExactQuery, QueryNode, SingleQuery};

/// Matching discipline of a container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerMode {
    /// Every child matches, each no earlier than the previous one ended.
    #[default]
    Ordered,
    /// Every child matches somewhere in scope.
    Unordered,
    /// At least one child matches.
    Any,
    /// Zero or more children match.
    Optional,
    /// Children match the sibling sequence exactly, with nothing left over.
    Exact,
}

impl ContainerMode {
    pub const ALL: [ContainerMode; 5] = [
        ContainerMode::Ordered,
        ContainerMode::Unordered,
        ContainerMode::Any,
        ContainerMode::Optional,
        ContainerMode::Exact,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContainerMode::Ordered => "ordered",
            ContainerMode::Unordered => "unordered",
            ContainerMode::Any => "any",
            ContainerMode::Optional => "optional",
            ContainerMode::Exact => "exact",
        }
    }
}

impl FromStr for ContainerMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContainerMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| Error::UnknownContainerMode { mode: s.to_owned() })
    }
}

impl fmt::Display for ContainerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
