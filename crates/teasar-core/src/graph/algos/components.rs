//! Connected-component labelling over the undirected graph.

use petgraph::unionfind::UnionFind;

use crate::graph::types::CsGraph;

/// Component label per vertex, with component sizes.
///
/// Labels are numbered by first appearance in vertex order, so the
/// component containing vertex 0 is label 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentLabels {
    pub labels: Vec<usize>,
    pub sizes: Vec<usize>,
}

impl ComponentLabels {
    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    /// Boolean mask selecting the vertices of component `label`
    pub fn mask(&self, label: usize) -> Vec<bool> {
        self.labels.iter().map(|&l| l == label).collect()
    }

    /// Label of the largest component (lowest label on ties)
    pub fn largest(&self) -> Option<usize> {
        self.sizes
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
            .map(|(label, _)| label)
    }
}

/// Label the connected components of `graph`
pub fn connected_components(graph: &CsGraph) -> ComponentLabels {
    let n = graph.vertex_count();
    let mut sets = UnionFind::<usize>::new(n);
    for u in 0..n {
        for (v, _) in graph.neighbors(u) {
            if u < v {
                sets.union(u, v);
            }
        }
    }

    let mut label_of_rep: Vec<Option<usize>> = vec![None; n];
    let mut labels = Vec::with_capacity(n);
    let mut sizes = Vec::new();
    for v in 0..n {
        let rep = sets.find_mut(v);
        let label = *label_of_rep[rep].get_or_insert_with(|| {
            sizes.push(0);
            sizes.len() - 1
        });
        sizes[label] += 1;
        labels.push(label);
    }

    ComponentLabels { labels, sizes }
}

/// Mask of the largest connected component (all false for an empty graph)
pub fn largest_component_mask(graph: &CsGraph) -> Vec<bool> {
    let components = connected_components(graph);
    match components.largest() {
        Some(label) => components.mask(label),
        None => Vec::new(),
    }
}
