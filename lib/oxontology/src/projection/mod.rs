//! Projection of ontologies to RDF graphs, and partial reconstruction from them.
//!
//! The forward direction follows the [OWL 2 mapping to RDF graphs](https://www.w3.org/TR/owl2-mapping-to-rdf/):
//! each axiom emits its main triple(s), nested expressions are flattened into
//! blank-node structures and annotations are reified on the main triple.
//!
//! The reverse direction only reads back the ontology header, imports,
//! declarations and ontology annotations. Axiom bodies are not reconstructed.

mod forward;
mod reverse;

pub use forward::GraphProjector;
pub use reverse::GraphReader;

use crate::error::ConstructionError;
use crate::ontology::Ontology;
use oxrdf::{BlankNode, Dataset, Graph};

/// Projection configuration.
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Whether declaration axioms are emitted.
    pub include_declarations: bool,
    /// Whether axiom annotations are reified with `owl:Axiom` nodes. When disabled they are dropped.
    pub reify_annotations: bool,
    blank_node_prefix: String,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            include_declarations: true,
            reify_annotations: true,
            blank_node_prefix: "b".into(),
        }
    }
}

impl ProjectionConfig {
    /// Creates a new projection configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn include_declarations(mut self, value: bool) -> Self {
        self.include_declarations = value;
        self
    }

    #[must_use]
    pub fn reify_annotations(mut self, value: bool) -> Self {
        self.reify_annotations = value;
        self
    }

    /// Sets the prefix of generated blank node identifiers, which are `{prefix}{counter}`.
    pub fn with_blank_node_prefix(
        mut self,
        prefix: impl Into<String>,
    ) -> Result<Self, ConstructionError> {
        let prefix = prefix.into();
        BlankNode::new(format!("{prefix}0")).map_err(|e| {
            ConstructionError::new("ProjectionConfig", "blankNodePrefix", e.to_string())
        })?;
        self.blank_node_prefix = prefix;
        Ok(self)
    }

    pub fn blank_node_prefix(&self) -> &str {
        &self.blank_node_prefix
    }
}

impl Ontology {
    /// Projects this ontology to an RDF graph with the default configuration.
    pub fn to_graph(&self) -> Graph {
        GraphProjector::new().project(self)
    }

    /// Projects this ontology to a dataset whose graph name is the ontology IRI.
    pub fn to_dataset(&self) -> Dataset {
        GraphProjector::new().project_to_dataset(self)
    }

    /// Reads the header, imports, declarations and ontology annotations of a graph.
    pub fn from_graph(graph: &Graph) -> Result<Self, crate::error::ProjectionError> {
        GraphReader::new(graph).read()
    }
}
