//! Compact textual form of query trees.
//!
//! ```text
//! root{exact[>a@X, b(v="1"), optional[c]]}
//! ```
//!
//! A Single prints as an optional `>` (direct), its type or `_`, its
//! properties in parentheses, an optional `@capture`, and its nested query in
//! braces unless that query is the empty default. Containers print as
//! `mode[child, ...]`.

use std::fmt;

use super::node::{QueryNode, SingleQuery};
use super::ContainerMode;

impl fmt::Display for QueryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryNode::Single(single) => fmt::Display::fmt(single, f),
            container => {
                let mode = container.container_mode().unwrap_or_default();
                write!(f, "{mode}[")?;
                for (i, child) in container.container_children().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    fmt::Display::fmt(child, f)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl fmt::Display for SingleQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_direct() {
            f.write_str(">")?;
        }
        f.write_str(self.node_type().unwrap_or("_"))?;

        if let Some(properties) = self.properties() {
            f.write_str("(")?;
            for (i, (key, value)) in properties.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            f.write_str(")")?;
        }

        if let Some(capture) = self.capture() {
            write!(f, "@{capture}")?;
        }

        if !is_trivial(self.children()) {
            write!(f, "{{{}}}", self.children())?;
        }
        Ok(())
    }
}

fn is_trivial(query: &QueryNode) -> bool {
    query.container_mode() == Some(ContainerMode::Ordered) && query.container_children().is_empty()
}
