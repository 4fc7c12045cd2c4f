#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod annotation;
mod axiom;
mod entity;
pub mod error;
mod event;
mod expression;
mod iri;
mod literal;
mod navigation;
mod ontology;
pub mod owlxml;
pub mod projection;
pub mod rule;
pub mod skos;
pub mod time;
pub mod validator;
pub mod vocab;

pub use crate::annotation::{Annotation, AnnotationSubject, AnnotationValue};
pub use crate::axiom::{AnnotatedAxiom, Axiom, AxiomCategory, HasKey};
pub use crate::entity::{
    AnnotationProperty, AnonymousIndividual, Class, DataProperty, Datatype, Entity, EntityKind,
    Individual, NamedIndividual, ObjectProperty,
};
pub use crate::error::{
    ConstructionError, OwlError, OwlResult, OwlXmlError, ProjectionError, RuleError, TimeError,
};
pub use crate::event::{EventSink, NoopSink, TracingSink};
pub use crate::expression::{
    ClassExpression, DataRange, FacetRestriction, Identified, Identity, Members,
    ObjectPropertyExpression, StructuralKey, deduplicate,
};
pub use crate::iri::{
    AbbreviatedIri, EntityName, Prefix, STANDARD_PREFIXES, WELL_KNOWN_PREFIXES,
    well_known_namespace,
};
pub use crate::literal::OwlLiteral;
pub use crate::ontology::Ontology;
pub use crate::owlxml::{OwlXmlConfig, OwlXmlReader, OwlXmlWriter};
pub use crate::projection::{GraphProjector, GraphReader, ProjectionConfig};
pub use crate::validator::{
    Issue, IssueSeverity, ValidationContext, ValidationReport, ValidationRule, Validator,
    ValidatorConfig,
};
