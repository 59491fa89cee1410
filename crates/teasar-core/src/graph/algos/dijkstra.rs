use crate::error::Result;
use crate::graph::types::{CsGraph, ShortestPaths};
use crate::{bail_invalid, ensure_vertex};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Wrapper for BinaryHeap to use as min-heap (ordered by accumulated cost,
/// then by vertex index so equal costs pop in a fixed order)
#[derive(Debug, Clone, Copy)]
pub struct HeapEntry {
    pub vertex: usize,
    pub cost: f64,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.vertex.cmp(&other.vertex))
    }
}

/// State tracked during a Dijkstra search
struct DijkstraState {
    distances: Vec<f64>,
    predecessors: Vec<Option<usize>>,
    sources: Option<Vec<Option<usize>>>,
    settled: Vec<bool>,
    settled_count: usize,
    heap: BinaryHeap<Reverse<HeapEntry>>,
    limit: f64,
}

impl DijkstraState {
    fn new(n: usize, limit: f64, track_sources: bool) -> Self {
        Self {
            distances: vec![f64::INFINITY; n],
            predecessors: vec![None; n],
            sources: track_sources.then(|| vec![None; n]),
            settled: vec![false; n],
            settled_count: 0,
            heap: BinaryHeap::new(),
            limit,
        }
    }

    fn seed(&mut self, source: usize) {
        if self.distances[source] == 0.0 {
            return;
        }
        self.distances[source] = 0.0;
        if let Some(sources) = self.sources.as_mut() {
            sources[source] = Some(source);
        }
        self.heap.push(Reverse(HeapEntry {
            vertex: source,
            cost: 0.0,
        }));
    }

    fn run(&mut self, graph: &CsGraph) {
        while let Some(Reverse(HeapEntry { vertex, cost })) = self.heap.pop() {
            if self.settled[vertex] {
                continue;
            }
            self.settled[vertex] = true;
            self.settled_count += 1;

            for (next, weight) in graph.neighbors(vertex) {
                let next_cost = cost + weight;
                if next_cost > self.limit || next_cost >= self.distances[next] {
                    continue;
                }
                self.distances[next] = next_cost;
                self.predecessors[next] = Some(vertex);
                if let Some(sources) = self.sources.as_mut() {
                    sources[next] = sources[vertex];
                }
                self.heap.push(Reverse(HeapEntry {
                    vertex: next,
                    cost: next_cost,
                }));
            }
        }
    }

    fn finish(self) -> ShortestPaths {
        ShortestPaths {
            distances: self.distances,
            predecessors: self.predecessors,
            sources: self.sources,
            settled: self.settled_count,
        }
    }
}

fn resolve_limit(limit: Option<f64>) -> Result<f64> {
    match limit {
        None => Ok(f64::INFINITY),
        Some(l) if l.is_nan() || l < 0.0 => bail_invalid!("search limit", l),
        Some(l) => Ok(l),
    }
}

/// Single-source shortest paths from `source`.
///
/// With a `limit`, vertices farther than `limit` stay unreached; vertices at
/// exactly `limit` are kept.
pub fn dijkstra(graph: &CsGraph, source: usize, limit: Option<f64>) -> Result<ShortestPaths> {
    let n = graph.vertex_count();
    ensure_vertex!("source", source, n);

    let mut state = DijkstraState::new(n, resolve_limit(limit)?, false);
    state.seed(source);
    state.run(graph);
    Ok(state.finish())
}

/// Multi-source shortest paths: the distance from each vertex to its nearest
/// source, with `sources[v]` naming that source.
pub fn dijkstra_multi(
    graph: &CsGraph,
    sources: &[usize],
    limit: Option<f64>,
) -> Result<ShortestPaths> {
    let n = graph.vertex_count();
    for &source in sources {
        ensure_vertex!("source", source, n);
    }

    let mut state = DijkstraState::new(n, resolve_limit(limit)?, true);
    for &source in sources {
        state.seed(source);
    }
    state.run(graph);
    Ok(state.finish())
}

#[cfg(test)]
mod tests;
