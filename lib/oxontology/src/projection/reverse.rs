use crate::annotation::{Annotation, AnnotationValue};
use crate::axiom::Axiom;
use crate::entity::{AnnotationProperty, Entity, EntityKind};
use crate::error::ProjectionError;
use crate::event::{EventSink, default_sink};
use crate::ontology::Ontology;
use crate::vocab::{dc, owl, rdf, rdfs};
use oxrdf::{Graph, NamedNode, NamedNodeRef, SubjectRef, TermRef};
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// Annotation properties always looked up on the ontology subject.
const STANDARD_ANNOTATION_PROPERTIES: &[NamedNodeRef<'static>] = &[
    rdfs::LABEL,
    rdfs::COMMENT,
    rdfs::SEE_ALSO,
    rdfs::IS_DEFINED_BY,
    owl::VERSION_INFO,
    owl::PRIOR_VERSION,
    owl::BACKWARD_COMPATIBLE_WITH,
    owl::INCOMPATIBLE_WITH,
    owl::DEPRECATED,
    dc::TITLE,
    dc::CREATOR,
    dc::DESCRIPTION,
];

/// Reads the header, imports, declarations and ontology annotations of an RDF graph.
///
/// Class, property and assertion axioms are not reconstructed: callers needing the
/// full structure should read the OWL/XML form instead.
pub struct GraphReader<'a> {
    graph: &'a Graph,
    sink: Arc<dyn EventSink>,
}

impl<'a> GraphReader<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self {
            graph,
            sink: default_sink(),
        }
    }

    /// Sets the sink receiving notifications.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Reads the ontology.
    ///
    /// Fails if no subject is typed `owl:Ontology` or if several named subjects are.
    pub fn read(&self) -> Result<Ontology, ProjectionError> {
        let subject = self.ontology_subject()?;
        let mut ontology = Ontology::new(match subject {
            SubjectRef::NamedNode(iri) => Some(iri.into_owned()),
            SubjectRef::BlankNode(_) => None,
        });

        if let Some(TermRef::NamedNode(version)) =
            self.graph.object_for_subject_predicate(subject, owl::VERSION_IRI)
        {
            ontology.set_version_iri(Some(version.into_owned()));
        }
        for import in self.graph.objects_for_subject_predicate(subject, owl::IMPORTS) {
            if let TermRef::NamedNode(import) = import {
                ontology.add_import(import.into_owned());
            }
        }

        let mut declared = 0;
        for kind in EntityKind::ALL {
            for entity in self
                .graph
                .subjects_for_predicate_object(rdf::TYPE, kind.rdf_type())
            {
                if let SubjectRef::NamedNode(iri) = entity {
                    ontology.add_axiom(Axiom::Declaration(Entity::new(kind, iri.into_owned())));
                    declared += 1;
                }
            }
        }

        for property in self.annotation_properties() {
            for value in self.graph.objects_for_subject_predicate(subject, property.as_ref()) {
                if let Some(value) = AnnotationValue::from_term(value) {
                    ontology.add_annotation(Annotation::new(
                        AnnotationProperty::new(property.clone()),
                        value,
                    ));
                }
            }
        }

        self.sink.info(&format!(
            "Read ontology header with {} import(s), {declared} declaration(s) and {} annotation(s)",
            ontology.imports().len(),
            ontology.annotations().len()
        ));
        Ok(ontology)
    }

    fn ontology_subject(&self) -> Result<SubjectRef<'a>, ProjectionError> {
        let mut named = Vec::new();
        let mut anonymous = Vec::new();
        for subject in self
            .graph
            .subjects_for_predicate_object(rdf::TYPE, owl::ONTOLOGY)
        {
            match subject {
                SubjectRef::NamedNode(iri) => named.push(iri),
                SubjectRef::BlankNode(_) => anonymous.push(subject),
            }
        }
        match (named.as_slice(), anonymous.first()) {
            ([iri], _) => Ok(SubjectRef::NamedNode(*iri)),
            ([first, second, ..], _) => Err(ProjectionError::AmbiguousOntology {
                first: first.into_owned(),
                second: second.into_owned(),
            }),
            ([], Some(node)) => {
                if anonymous.len() > 1 {
                    self.sink.warning(&format!(
                        "{} anonymous ontologies found, only the first one is read",
                        anonymous.len()
                    ));
                }
                Ok(*node)
            }
            ([], None) => Err(ProjectionError::MissingOntology),
        }
    }

    /// The standard annotation properties followed by the declared ones.
    fn annotation_properties(&self) -> Vec<NamedNode> {
        let mut seen = FxHashSet::default();
        STANDARD_ANNOTATION_PROPERTIES
            .iter()
            .map(|p| p.into_owned())
            .chain(
                self.graph
                    .subjects_for_predicate_object(rdf::TYPE, owl::ANNOTATION_PROPERTY)
                    .filter_map(|s| match s {
                        SubjectRef::NamedNode(iri) => Some(iri.into_owned()),
                        SubjectRef::BlankNode(_) => None,
                    }),
            )
            .filter(|p| seen.insert(p.clone()))
            .collect()
    }
}
