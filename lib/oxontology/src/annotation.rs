//! Annotations on axioms, ontologies and other annotations.

use crate::entity::{AnnotationProperty, AnonymousIndividual};
use crate::iri::{EntityName, Prefix};
use crate::literal::OwlLiteral;
use oxrdf::{Term, TermRef};
use std::fmt;

/// The value of an annotation: an IRI, a literal or an anonymous individual.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnnotationValue {
    Iri(EntityName),
    Literal(OwlLiteral),
    Anonymous(AnonymousIndividual),
}

impl AnnotationValue {
    pub fn as_literal(&self) -> Option<&OwlLiteral> {
        match self {
            Self::Literal(l) => Some(l),
            _ => None,
        }
    }

    /// The RDF term for this value.
    pub fn to_term(&self, prefixes: &[Prefix]) -> Term {
        match self {
            Self::Iri(name) => name.resolve(prefixes).into(),
            Self::Literal(literal) => literal.to_rdf(prefixes).into(),
            Self::Anonymous(individual) => individual.to_blank_node().into(),
        }
    }

    /// Reads a value back from an RDF term.
    pub fn from_term(term: TermRef<'_>) -> Option<Self> {
        match term {
            TermRef::NamedNode(node) => Some(Self::Iri(node.into())),
            TermRef::BlankNode(node) => AnonymousIndividual::new(node.as_str())
                .ok()
                .map(Self::Anonymous),
            TermRef::Literal(literal) => {
                Some(Self::Literal(OwlLiteral::from_rdf(&literal.into_owned())))
            }
        }
    }
}

impl fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(name) => write!(f, "{name}"),
            Self::Literal(literal) => write!(f, "{literal}"),
            Self::Anonymous(individual) => write!(f, "{individual}"),
        }
    }
}

impl From<OwlLiteral> for AnnotationValue {
    fn from(literal: OwlLiteral) -> Self {
        Self::Literal(literal)
    }
}

impl From<EntityName> for AnnotationValue {
    fn from(name: EntityName) -> Self {
        Self::Iri(name)
    }
}

/// The subject of an annotation assertion: an IRI or an anonymous individual.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnnotationSubject {
    Iri(EntityName),
    Anonymous(AnonymousIndividual),
}

impl fmt::Display for AnnotationSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(name) => write!(f, "{name}"),
            Self::Anonymous(individual) => write!(f, "{individual}"),
        }
    }
}

impl From<EntityName> for AnnotationSubject {
    fn from(name: EntityName) -> Self {
        Self::Iri(name)
    }
}

/// `Annotation(property value)`, possibly itself annotated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    property: AnnotationProperty,
    value: AnnotationValue,
    annotations: Vec<Annotation>,
}

impl Annotation {
    pub fn new(property: impl Into<AnnotationProperty>, value: impl Into<AnnotationValue>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            annotations: Vec::new(),
        }
    }

    /// Attaches annotations to this annotation.
    #[must_use]
    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    #[inline]
    pub fn property(&self) -> &AnnotationProperty {
        &self.property
    }

    #[inline]
    pub fn value(&self) -> &AnnotationValue {
        &self.value
    }

    #[inline]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Annotation(")?;
        for annotation in &self.annotations {
            write!(f, "{annotation} ")?;
        }
        write!(f, "{} {})", self.property, self.value)
    }
}
