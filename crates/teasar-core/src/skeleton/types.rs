//! Skeleton result types

use std::time::Duration;

use serde::Serialize;

/// Ordered vertex indices from a target to the skeleton vertex it joins
pub type Path = Vec<usize>;

/// Nearest skeleton vertex of one covered graph vertex
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapEntry {
    pub vertex: usize,
    pub nearest: usize,
    pub distance: f64,
}

/// Dense vertex to nearest-skeleton-vertex map.
///
/// Vertices never covered by an invalidation sweep stay unassigned.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexMap {
    nearest: Vec<Option<usize>>,
    distances: Vec<f64>,
}

impl VertexMap {
    /// Unassigned map over `n` vertices
    pub fn new(n: usize) -> Self {
        Self {
            nearest: vec![None; n],
            distances: vec![f64::INFINITY; n],
        }
    }

    pub fn len(&self) -> usize {
        self.nearest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nearest.is_empty()
    }

    /// Nearest skeleton vertex and its distance, if `v` was covered
    pub fn get(&self, v: usize) -> Option<(usize, f64)> {
        self.nearest[v].map(|nearest| (nearest, self.distances[v]))
    }

    pub fn nearest(&self) -> &[Option<usize>] {
        &self.nearest
    }

    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Record `source` for `v` if it is strictly closer than the current
    /// entry. Returns whether the entry changed.
    pub fn offer(&mut self, v: usize, source: usize, distance: f64) -> bool {
        if distance < self.distances[v] {
            self.distances[v] = distance;
            self.nearest[v] = Some(source);
            true
        } else {
            false
        }
    }

    /// Copy in entries from another component; already assigned vertices
    /// keep their entry. Returns how many entries were rejected.
    pub fn merge_disjoint(&mut self, entries: &[MapEntry]) -> usize {
        let mut rejected = 0;
        for entry in entries {
            if self.nearest[entry.vertex].is_some() {
                rejected += 1;
                continue;
            }
            self.nearest[entry.vertex] = Some(entry.nearest);
            self.distances[entry.vertex] = entry.distance;
        }
        rejected
    }

    /// Assigned entries in vertex order
    pub fn entries(&self) -> impl Iterator<Item = MapEntry> + '_ {
        self.nearest
            .iter()
            .zip(&self.distances)
            .enumerate()
            .filter_map(|(vertex, (nearest, &distance))| {
                nearest.map(|nearest| MapEntry {
                    vertex,
                    nearest,
                    distance,
                })
            })
    }

    pub fn assigned_count(&self) -> usize {
        self.nearest.iter().filter(|n| n.is_some()).count()
    }
}

/// Accumulated durations of each phase of the invalidation loop
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PhaseTiming {
    pub target_selection: Duration,
    pub branch_search: Duration,
    pub path_recovery: Duration,
    pub sweep: Duration,
    pub invalidation: Duration,
    pub iterations: usize,
    pub total: Duration,
}

/// Skeleton of one connected component
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentSkeleton {
    /// Component label from connected-component labelling
    pub label: usize,
    pub root: usize,
    pub paths: Vec<Path>,
    /// Shortest-path length of each path, parallel to `paths`
    pub path_lengths: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapping: Option<Vec<MapEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<PhaseTiming>,
}

impl ComponentSkeleton {
    pub fn total_length(&self) -> f64 {
        self.path_lengths.iter().sum()
    }

    /// Distinct vertices on the skeleton, root included
    pub fn vertex_count(&self) -> usize {
        let mut vertices: Vec<usize> = self.paths.iter().flatten().copied().collect();
        vertices.push(self.root);
        vertices.sort_unstable();
        vertices.dedup();
        vertices.len()
    }
}

/// A component left out of the result under the skip policy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedComponent {
    pub label: usize,
    pub error_type: &'static str,
    pub message: String,
}

/// Whole-graph skeletonization output, components in label order
#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonResult {
    pub components: Vec<ComponentSkeleton>,
    pub vertex_map: Option<VertexMap>,
    pub skipped: Vec<SkippedComponent>,
}

impl SkeletonResult {
    pub fn new(n: usize, with_map: bool) -> Self {
        Self {
            components: Vec::new(),
            vertex_map: with_map.then(|| VertexMap::new(n)),
            skipped: Vec::new(),
        }
    }

    /// Append a component, merging its map entries into the whole-graph map
    pub fn push(&mut self, component: ComponentSkeleton) {
        if let (Some(map), Some(entries)) = (self.vertex_map.as_mut(), &component.mapping) {
            let rejected = map.merge_disjoint(entries);
            if rejected > 0 {
                tracing::warn!(
                    component = component.label,
                    rejected,
                    "map entries already assigned by another component"
                );
            }
        }
        self.components.push(component);
    }

    /// Paths of every component
    pub fn all_paths(&self) -> Vec<&[Path]> {
        self.components.iter().map(|c| c.paths.as_slice()).collect()
    }

    pub fn roots(&self) -> Vec<usize> {
        self.components.iter().map(|c| c.root).collect()
    }

    pub fn path_lengths(&self) -> Vec<&[f64]> {
        self.components
            .iter()
            .map(|c| c.path_lengths.as_slice())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
