//! Recursive evaluation of query nodes.
//!
//! Every variant maps a start state to a lazy sequence of states, one per way
//! the query can consume siblings at or after the start cursor. Each state is
//! positioned just past what was consumed and carries the updated bindings.
//! Nothing is pulled before the caller asks, so a consumer that stops after
//! the first item never pays for the rest of the search.

use std::cell::RefCell;
use std::collections::HashMap;
use std::iter;
use std::rc::Rc;

use treematch_core::{NodeReferences, TreeNode};

use super::adapters::{Distinct, OrElse};
use super::config::MatchConfig;
use super::linked::NodeId;
use super::predicate::PropertyPredicate;
use super::replay::Replay;
use super::state::MatchingState;
use super::trace::Tracer;
use crate::query::{AllQuery, AnyQuery, ExactQuery, QueryNode, SingleQuery};

/// Lazy sequence of search states.
pub(crate) type States<'a, N> = Box<dyn Iterator<Item = MatchingState<'a, N>> + 'a>;

/// Everything an evaluation needs besides the query and the state.
pub(crate) struct Env<'a, N> {
    pub(crate) config: &'a MatchConfig,
    pub(crate) predicate: Option<&'a dyn PropertyPredicate<N>>,
    pub(crate) tracer: &'a dyn Tracer,
}

impl<N> Clone for Env<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for Env<'_, N> {}

pub(crate) fn evaluate<'a, N: TreeNode + 'a>(
    query: &'a QueryNode,
    state: MatchingState<'a, N>,
    env: Env<'a, N>,
) -> States<'a, N> {
    match query {
        QueryNode::Single(single) => evaluate_single(single, state, env),
        QueryNode::All(all) => evaluate_all(all, state, env),
        QueryNode::Any(any) => evaluate_any(any, state, env),
        QueryNode::Exact(exact) => evaluate_exact(exact, state, env),
    }
}

fn evaluate_single<'a, N: TreeNode + 'a>(
    single: &'a SingleQuery,
    state: MatchingState<'a, N>,
    env: Env<'a, N>,
) -> States<'a, N> {
    let candidates: Box<dyn Iterator<Item = NodeId> + 'a> = if single.is_direct() {
        Box::new(state.stream_direct_children())
    } else {
        Box::new(state.stream_within())
    };

    // Without captures below, all nested results carry the bindings of the
    // start state, so the first one stands for all of them.
    let enumerate = single.has_references();
    let outer = state.clone();

    Box::new(
        candidates
            .filter(move |&candidate| accepts(single, &state, candidate, env))
            .flat_map(move |candidate| {
                let child_state = outer.build_child_state(single.capture_name(), candidate);
                let nested = evaluate(single.children(), child_state, env)
                    .map(MatchingState::into_references);
                let nested: Box<dyn Iterator<Item = NodeReferences<'a, N>> + 'a> = if enumerate {
                    Box::new(Distinct::new(nested))
                } else {
                    Box::new(nested.take(1))
                };

                let next = outer.neighbor_of(candidate);
                nested.map(move |references| next.with_references(references))
            }),
    )
}

fn accepts<'a, N: TreeNode>(
    single: &SingleQuery,
    state: &MatchingState<'a, N>,
    candidate: NodeId,
    env: Env<'a, N>,
) -> bool {
    let node = state.node(candidate);
    let references = state.references();

    let matched = match env.predicate {
        Some(predicate) => {
            node.matches(single.node_type(), None, references)
                && single.properties().is_none_or(|required| {
                    required
                        .iter()
                        .all(|(key, expected)| predicate.test(node, key, expected, references))
                })
        }
        None => node.matches(single.node_type(), single.properties(), references),
    };

    // A capture name already bound elsewhere only accepts the same node again.
    let consistent = single.capture().is_none_or(|name| {
        references
            .get(name)
            .is_none_or(|bound| std::ptr::eq(bound, node))
    });

    let accepted = matched && consistent;
    env.tracer
        .trace_candidate(single, node.node_type(), state.tree().path(candidate), accepted);
    accepted
}

fn evaluate_all<'a, N: TreeNode + 'a>(
    all: &'a AllQuery,
    state: MatchingState<'a, N>,
    env: Env<'a, N>,
) -> States<'a, N> {
    let start = state.clone();
    let ordered = all.is_ordered();

    all.children()
        .iter()
        .fold(Box::new(iter::once(state)) as States<'a, N>, |running, child| {
            let memo = Memo::new(child, env);
            let step: States<'a, N> = if ordered {
                Box::new(running.flat_map(move |candidate| memo.evaluate(candidate)))
            } else {
                // Restart at the container start, keeping the bindings, and
                // never let the covered region retreat.
                let start = start.clone();
                Box::new(running.flat_map(move |candidate| {
                    memo.evaluate(candidate.with_start(&start))
                        .map(move |found| found.with_max_cursor(&candidate))
                }))
            };
            Box::new(Distinct::new(step)) as States<'a, N>
        })
}

fn evaluate_any<'a, N: TreeNode + 'a>(
    any: &'a AnyQuery,
    state: MatchingState<'a, N>,
    env: Env<'a, N>,
) -> States<'a, N> {
    if any.children().is_empty() {
        return Box::new(iter::once(state));
    }

    let fallback = any.is_optional().then(|| state.clone());

    // Each child extends the states found so far. It is tried from the
    // container start, once with no bindings added and once with the bindings
    // of every earlier result, so children match regardless of each other's
    // position.
    let none: States<'a, N> = Box::new(iter::empty());
    let mut found = Replay::new(none);
    for child in any.children() {
        let start = state.clone();
        let seeds = iter::once(state.clone())
            .chain(found.replay())
            .map(move |seed| seed.with_start(&start));
        let extended = Distinct::new(seeds).flat_map(move |seed| evaluate(child, seed, env));

        let accumulated: States<'a, N> = Box::new(Distinct::new(found.replay().chain(extended)));
        found = Replay::new(accumulated);
    }

    Box::new(OrElse::new(found.replay(), fallback))
}

fn evaluate_exact<'a, N: TreeNode + 'a>(
    exact: &'a ExactQuery,
    state: MatchingState<'a, N>,
    env: Env<'a, N>,
) -> States<'a, N> {
    let mut running: States<'a, N> = Box::new(iter::once(state));
    let mut exact_end = true;

    for child in exact.children() {
        // Two primitives in a row: the child consumes exactly the next sibling.
        let match_one = exact_end && child.is_single();
        let memo = Memo::new(child, env);

        let step = running.flat_map(move |candidate| -> States<'a, N> {
            let expected = match (match_one, candidate.cursor()) {
                (false, _) => None,
                (true, Some(cursor)) => Some(candidate.tree().direct_neighbor(cursor)),
                (true, None) => return Box::new(iter::empty()),
            };
            let results = memo
                .evaluate(candidate)
                .map(|found| found.with_direct_child());
            match expected {
                Some(expected) => Box::new(results.filter(move |found| found.cursor() == expected)),
                None => Box::new(results),
            }
        });
        running = Box::new(Distinct::new(step));
        exact_end = child.is_primitive();
    }

    if exact_end {
        Box::new(running.filter(|found| found.cursor().is_none()))
    } else {
        running
    }
}

/// Per-container memo of one child query's sub-searches, keyed by state.
struct Memo<'a, N> {
    query: &'a QueryNode,
    env: Env<'a, N>,
    entries: Option<Rc<RefCell<HashMap<MatchingState<'a, N>, Replay<States<'a, N>>>>>>,
}

impl<'a, N: TreeNode + 'a> Memo<'a, N> {
    fn new(query: &'a QueryNode, env: Env<'a, N>) -> Self {
        let entries = env
            .config
            .replay_cache
            .then(|| Rc::new(RefCell::new(HashMap::new())));
        Self {
            query,
            env,
            entries,
        }
    }

    fn evaluate(&self, state: MatchingState<'a, N>) -> States<'a, N> {
        let Some(entries) = &self.entries else {
            return evaluate(self.query, state, self.env);
        };

        let mut entries = entries.borrow_mut();
        let replay = match entries.get(&state) {
            Some(replay) => {
                self.env.tracer.trace_cache(self.query, true);
                replay.clone()
            }
            None => {
                self.env.tracer.trace_cache(self.query, false);
                let replay = Replay::new(evaluate(self.query, state.clone(), self.env));
                entries.insert(state, replay.clone());
                replay
            }
        };
        Box::new(replay.replay())
    }
}
