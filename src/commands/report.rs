//! JSON report of a skeletonization run

use serde::Serialize;
use teasar_core::logging::SearchMetrics;
use teasar_core::skeleton::{
    ComponentSkeleton, CoverageCounter, Path, PhaseTiming, SkippedComponent, SpatialSkeleton,
    VertexMap,
};

#[derive(Debug, Serialize)]
pub struct ComponentReport<'a> {
    pub label: usize,
    pub root: usize,
    pub paths: &'a [Path],
    pub path_lengths: &'a [f64],
    pub total_length: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<&'a PhaseTiming>,
}

impl<'a> From<&'a ComponentSkeleton> for ComponentReport<'a> {
    fn from(component: &'a ComponentSkeleton) -> Self {
        Self {
            label: component.label,
            root: component.root,
            paths: &component.paths,
            path_lengths: &component.path_lengths,
            total_length: component.total_length(),
            timing: component.timing.as_ref(),
        }
    }
}

/// Dense map; unassigned vertices are `null` in both arrays
#[derive(Debug, Serialize)]
pub struct MapReport {
    pub nearest: Vec<Option<usize>>,
    pub distance: Vec<Option<f64>>,
}

impl From<&VertexMap> for MapReport {
    fn from(map: &VertexMap) -> Self {
        Self {
            nearest: map.nearest().to_vec(),
            distance: map
                .nearest()
                .iter()
                .zip(map.distances())
                .map(|(nearest, &d)| nearest.map(|_| d))
                .collect(),
        }
    }
}

/// Vertices left valid after root selection, and how many were invalidated
#[derive(Debug, Serialize)]
pub struct CoverageReport {
    pub to_cover: usize,
    pub covered: usize,
    pub components: usize,
}

impl From<&CoverageCounter> for CoverageReport {
    fn from(counter: &CoverageCounter) -> Self {
        Self {
            to_cover: counter.to_cover(),
            covered: counter.covered(),
            components: counter.components(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchReport {
    pub branch_searches: u64,
    pub sweeps: u64,
    pub settled: u64,
}

impl From<&SearchMetrics> for SearchReport {
    fn from(metrics: &SearchMetrics) -> Self {
        Self {
            branch_searches: metrics.branch_searches(),
            sweeps: metrics.sweeps(),
            settled: metrics.settled(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SkeletonReport<'a> {
    pub mesh: String,
    pub mode: &'static str,
    pub vertices: usize,
    pub invalidation_d: f64,
    pub roots: Vec<usize>,
    pub path_lengths: Vec<&'a [f64]>,
    pub components: Vec<ComponentReport<'a>>,
    pub skipped: &'a [SkippedComponent],
    /// Assembled skeleton; `null` when no component produced a path
    pub skeleton: Option<SpatialSkeleton>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertex_map: Option<MapReport>,
    pub coverage: CoverageReport,
    pub search: SearchReport,
}
