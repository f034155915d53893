//! Tracing infrastructure for debugging a matching run.
//!
//! # Design: Zero-Cost Abstraction
//!
//! When `NoopTracer` is used every trait method is an `#[inline(always)]`
//! empty function, and arguments that would be costly to build are handed
//! over lazily (see [`Tracer::trace_match`]), so a run without tracing pays
//! only for a virtual call.
//!
//! # Design: Shared Tracer
//!
//! Evaluation is a tree of lazy iterators that all hold the same tracer, so
//! the methods take `&self`. `PrintTracer` keeps its lines in a `RefCell`.

use std::cell::RefCell;

use treematch_core::Colors;

use crate::query::{QueryNode, SingleQuery};

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Accepted candidates and produced matches.
    #[default]
    Default,
    /// Also rejected candidates and replay cache traffic.
    Verbose,
}

/// Instrumentation hooks called during evaluation.
///
/// - `trace_candidate` - after a Single query tested a subject node
/// - `trace_cache` - when a container looks up a memoized sub-search
/// - `trace_match` - when a distinct match is handed to the caller
pub trait Tracer {
    /// Called after a candidate was tested against a Single query.
    ///
    /// `path` is the candidate's sibling index path below the matched root.
    fn trace_candidate(&self, query: &SingleQuery, node_type: &str, path: &[u32], accepted: bool);

    /// Called when a container looks up the sub-search of `query`.
    fn trace_cache(&self, query: &QueryNode, hit: bool);

    /// Called for every distinct match, with its `(capture, node type)` pairs.
    fn trace_match(&self, captures: &mut dyn Iterator<Item = (&str, &str)>);
}

/// No-op tracer that gets optimized away completely.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_candidate(
        &self,
        _query: &SingleQuery,
        _node_type: &str,
        _path: &[u32],
        _accepted: bool,
    ) {
    }

    #[inline(always)]
    fn trace_cache(&self, _query: &QueryNode, _hit: bool) {}

    #[inline(always)]
    fn trace_match(&self, _captures: &mut dyn Iterator<Item = (&str, &str)>) {}
}

/// Tracer that collects formatted lines.
pub struct PrintTracer {
    /// Verbosity level for output filtering.
    verbosity: Verbosity,
    /// Collected trace lines.
    lines: RefCell<Vec<String>>,
    /// Color palette.
    colors: Colors,
}

impl PrintTracer {
    pub fn new(verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            verbosity,
            lines: RefCell::new(Vec::new()),
            colors,
        }
    }

    /// Snapshot of the lines collected so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// All lines joined, one per row.
    pub fn render(&self) -> String {
        self.lines.borrow().join("\n")
    }

    /// Print all lines to stderr.
    pub fn print(&self) {
        for line in self.lines.borrow().iter() {
            eprintln!("{line}");
        }
    }

    fn push(&self, keyword: &str, rest: String) {
        self.lines.borrow_mut().push(format!("{keyword:<6} {rest}"));
    }

    fn format_path(&self, path: &[u32]) -> String {
        let mut out = String::new();
        for index in path {
            out.push('/');
            out.push_str(&index.to_string());
        }
        if out.is_empty() {
            out.push('/');
        }
        self.colors.paint(self.colors.dim, &out)
    }
}

impl Tracer for PrintTracer {
    fn trace_candidate(&self, query: &SingleQuery, node_type: &str, path: &[u32], accepted: bool) {
        let c = &self.colors;
        if accepted {
            let mut rest = format!(
                "{} {}",
                c.paint(c.blue, node_type),
                self.format_path(path)
            );
            if let Some(capture) = query.capture() {
                rest.push(' ');
                rest.push_str(&c.paint(c.green, &format!("@{capture}")));
            }
            self.push("match", rest);
        } else if self.verbosity == Verbosity::Verbose {
            let rest = format!("{} {}", c.paint(c.red, node_type), self.format_path(path));
            self.push("reject", rest);
        }
    }

    fn trace_cache(&self, query: &QueryNode, hit: bool) {
        if self.verbosity != Verbosity::Verbose {
            return;
        }
        let outcome = if hit { "hit " } else { "miss" };
        let rest = format!("{} {query}", self.colors.paint(self.colors.dim, outcome));
        self.push("cache", rest);
    }

    fn trace_match(&self, captures: &mut dyn Iterator<Item = (&str, &str)>) {
        let c = &self.colors;
        let captures: Vec<String> = captures
            .map(|(name, node_type)| {
                format!("{}: {}", c.paint(c.green, name), c.paint(c.blue, node_type))
            })
            .collect();
        self.push("result", format!("{{{}}}", captures.join(", ")));
    }
}
