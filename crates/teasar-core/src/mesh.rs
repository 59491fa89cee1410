//! Mesh input files
//!
//! A mesh is stored as JSON:
//!
//! ```json
//! { "vertices": [[0, 0, 0], [1, 0, 0], [0, 1, 0]], "faces": [[0, 1, 2]] }
//! ```
//!
//! Connectivity is given either as `edges` (pairs) or as triangle `faces`,
//! never both.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TeasarError};
use crate::graph::build::vertex_dimension;
use crate::graph::{create_spatial_graph, faces_to_edges, CsGraph, EdgeWeighting};

/// Vertices plus edge or face connectivity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshFile {
    pub vertices: Vec<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<[usize; 2]>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faces: Option<Vec<[usize; 3]>>,
}

impl MeshFile {
    /// Read a mesh from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| TeasarError::io_operation("read mesh", path.display(), e))?;
        let mesh = Self::from_json_str(&content).map_err(|e| match e {
            TeasarError::Json(err) => {
                TeasarError::invalid_mesh(format!("{}: {}", path.display(), err))
            }
            other => other,
        })?;
        tracing::debug!(
            path = %path.display(),
            vertices = mesh.vertices.len(),
            "loaded mesh"
        );
        Ok(mesh)
    }

    /// Parse a mesh from JSON text and check its shape
    pub fn from_json_str(content: &str) -> Result<Self> {
        let mesh: MeshFile = serde_json::from_str(content)?;
        mesh.validate()?;
        Ok(mesh)
    }

    /// Vertex dimension K (0 for an empty mesh)
    pub fn dimension(&self) -> Result<usize> {
        vertex_dimension(&self.vertices)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn validate(&self) -> Result<()> {
        self.dimension()?;
        match (&self.edges, &self.faces) {
            (Some(_), Some(_)) => Err(TeasarError::invalid_mesh(
                "mesh has both edges and faces; provide exactly one",
            )),
            (None, None) => Err(TeasarError::invalid_mesh(
                "mesh has neither edges nor faces",
            )),
            _ => Ok(()),
        }
    }

    /// Undirected edge list, derived from the faces when no edges are given
    pub fn edge_list(&self) -> Result<Vec<[usize; 2]>> {
        self.validate()?;
        match (&self.edges, &self.faces) {
            (Some(edges), None) => Ok(edges.clone()),
            (None, Some(faces)) => Ok(faces_to_edges(faces)),
            _ => Err(TeasarError::invalid_mesh("mesh connectivity is ambiguous")),
        }
    }

    /// Build the weighted graph of this mesh
    pub fn to_graph(&self, weighting: EdgeWeighting) -> Result<CsGraph> {
        create_spatial_graph(&self.vertices, &self.edge_list()?, weighting)
    }
}
