//! Breadth-first shortest-connection search.
//!
//! Nodes live in a per-search arena and point at their parent by index, so a
//! path is recovered by walking indices back to the root. Because the
//! frontier is FIFO and a person is enqueued at most once, the first time the
//! target is dequeued its path has the minimum number of movie hops.

use crate::dataset::Dataset;
use crate::error::GraphError;
use crate::graph::neighbors;
use crate::model::{MovieId, PersonId};
use serde::Serialize;
use std::collections::{HashSet, VecDeque};

// ============================================================================
// Results
// ============================================================================

/// One hop: `person` was reached through `movie`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Step {
    pub movie: MovieId,
    pub person: PersonId,
}

impl Step {
    pub fn new(movie: impl Into<String>, person: impl Into<String>) -> Self {
        Self {
            movie: MovieId::new(movie),
            person: PersonId::new(person),
        }
    }
}

/// Source-to-target sequence of hops. Empty when source and target coincide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Path {
    steps: Vec<Step>,
}

impl Path {
    pub fn from_steps(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Degrees of separation (number of movie hops).
    pub fn degrees(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }
}

impl<'p> IntoIterator for &'p Path {
    type Item = &'p Step;
    type IntoIter = std::slice::Iter<'p, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// People expanded before the search ended.
    pub explored: usize,
    /// Largest frontier size observed.
    pub frontier_peak: usize,
    /// Depth of the last node taken off the frontier.
    pub depth: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    /// `None` when the target is not reachable from the source.
    pub path: Option<Path>,
    pub stats: SearchStats,
}

// ============================================================================
// Limits
// ============================================================================

/// Optional bounds on a single search. The default is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Stop with [`GraphError::SearchLimitReached`] after expanding this many people.
    pub max_explored: Option<usize>,
    /// Do not expand people this many hops (or more) away from the source.
    pub max_depth: Option<usize>,
}

impl SearchLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_explored(mut self, max_explored: usize) -> Self {
        self.max_explored = Some(max_explored);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

// ============================================================================
// Search State
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct Node<'a> {
    state: &'a PersonId,
    parent: Option<usize>,
    action: Option<&'a MovieId>,
    depth: usize,
}

/// FIFO queue of arena indices with O(1) state membership.
#[derive(Debug, Default)]
struct Frontier<'a> {
    queue: VecDeque<usize>,
    states: HashSet<&'a PersonId>,
}

impl<'a> Frontier<'a> {
    fn add(&mut self, index: usize, state: &'a PersonId) {
        self.queue.push_back(index);
        self.states.insert(state);
    }

    fn contains_state(&self, state: &PersonId) -> bool {
        self.states.contains(state)
    }

    fn remove(&mut self, arena: &[Node<'a>]) -> Option<usize> {
        let index = self.queue.pop_front()?;
        self.states.remove(arena[index].state);
        Some(index)
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

fn reconstruct(arena: &[Node<'_>], mut index: usize) -> Path {
    let mut steps = Vec::new();
    while let (Some(parent), Some(movie)) = (arena[index].parent, arena[index].action) {
        steps.push(Step {
            movie: movie.clone(),
            person: arena[index].state.clone(),
        });
        index = parent;
    }
    steps.reverse();
    Path { steps }
}

// ============================================================================
// Searcher
// ============================================================================

/// Runs shortest-connection searches against one dataset.
///
/// Each call allocates its own arena, frontier and explored set.
#[derive(Debug, Clone, Copy)]
pub struct Searcher<'a> {
    dataset: &'a Dataset,
    limits: SearchLimits,
}

impl<'a> Searcher<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            limits: SearchLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Shortest path from `source` to `target`, or `None` if they are not connected.
    pub fn shortest_path(
        &self,
        source: &PersonId,
        target: &PersonId,
    ) -> Result<Option<Path>, GraphError> {
        Ok(self.search(source, target)?.path)
    }

    /// Like [`Searcher::shortest_path`], also returning search statistics.
    pub fn search(&self, source: &PersonId, target: &PersonId) -> Result<SearchReport, GraphError> {
        let dataset: &'a Dataset = self.dataset;
        let source: &'a PersonId = &dataset.require_person(source)?.id;
        let target: &'a PersonId = &dataset.require_person(target)?.id;

        let mut arena: Vec<Node<'a>> = vec![Node {
            state: source,
            parent: None,
            action: None,
            depth: 0,
        }];
        let mut frontier = Frontier::default();
        frontier.add(0, source);
        let mut explored: HashSet<&'a PersonId> = HashSet::new();
        let mut stats = SearchStats {
            frontier_peak: 1,
            ..SearchStats::default()
        };
        let mut pruned = false;

        let path = loop {
            let Some(index) = frontier.remove(&arena) else {
                break None;
            };
            let node = arena[index];
            stats.depth = node.depth;

            if node.state == target {
                break Some(reconstruct(&arena, index));
            }

            if let Some(limit) = self.limits.max_explored {
                if explored.len() >= limit {
                    return Err(GraphError::SearchLimitReached {
                        explored: explored.len(),
                        limit,
                    });
                }
            }
            explored.insert(node.state);

            if self.limits.max_depth.is_some_and(|max| node.depth >= max) {
                // Only a cut edge to someone never reached counts as truncation.
                pruned |= neighbors(dataset, node.state)?
                    .into_iter()
                    .any(|(_, person)| !explored.contains(person) && !frontier.contains_state(person));
                continue;
            }

            for (movie, person) in neighbors(dataset, node.state)? {
                if explored.contains(person) || frontier.contains_state(person) {
                    continue;
                }
                arena.push(Node {
                    state: person,
                    parent: Some(index),
                    action: Some(movie),
                    depth: node.depth + 1,
                });
                frontier.add(arena.len() - 1, person);
            }
            stats.frontier_peak = stats.frontier_peak.max(frontier.len());
        };
        stats.explored = explored.len();

        tracing::debug!(
            source = %source,
            target = %target,
            explored = stats.explored,
            frontier_peak = stats.frontier_peak,
            degrees = path.as_ref().map(Path::degrees),
            "co-star search finished"
        );

        if path.is_none() && pruned {
            if let Some(max_depth) = self.limits.max_depth {
                return Err(GraphError::DepthLimitReached { max_depth });
            }
        }

        Ok(SearchReport { path, stats })
    }
}

/// Unbounded shortest-path search; see [`Searcher`].
pub fn shortest_path(
    dataset: &Dataset,
    source: &PersonId,
    target: &PersonId,
) -> Result<Option<Path>, GraphError> {
    Searcher::new(dataset).shortest_path(source, target)
}
