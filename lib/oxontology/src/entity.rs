//! OWL 2 entities (classes, datatypes, properties, individuals).

use crate::error::ConstructionError;
use crate::iri::{EntityName, Prefix};
use crate::vocab::{owl, rdfs};
use oxrdf::{BlankNode, NamedNode, NamedNodeRef};
use std::fmt;

macro_rules! named_entity {
    ($(#[$attr:meta])* $name:ident, $element:literal) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(EntityName);

        impl $name {
            /// The OWL/XML element name of this entity kind.
            pub const ELEMENT: &'static str = $element;

            #[inline]
            pub fn new(name: impl Into<EntityName>) -> Self {
                Self(name.into())
            }

            /// Creates the entity from a full IRI string.
            pub fn from_iri(iri: impl Into<String>) -> Result<Self, ConstructionError> {
                Ok(Self(EntityName::iri(iri)?))
            }

            /// Creates the entity from a `prefix:localName` pair.
            pub fn from_abbreviated(
                prefix: impl Into<String>,
                local_name: impl Into<String>,
            ) -> Result<Self, ConstructionError> {
                Ok(Self(EntityName::abbreviated(prefix, local_name)?))
            }

            #[inline]
            pub fn name(&self) -> &EntityName {
                &self.0
            }

            /// Resolves the entity name to a full IRI.
            #[inline]
            pub fn resolve(&self, prefixes: &[Prefix]) -> NamedNode {
                self.0.resolve(prefixes)
            }

            #[inline]
            pub fn into_name(self) -> EntityName {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<EntityName> for $name {
            #[inline]
            fn from(name: EntityName) -> Self {
                Self(name)
            }
        }

        impl From<NamedNode> for $name {
            #[inline]
            fn from(iri: NamedNode) -> Self {
                Self(iri.into())
            }
        }

        impl From<NamedNodeRef<'_>> for $name {
            #[inline]
            fn from(iri: NamedNodeRef<'_>) -> Self {
                Self(iri.into())
            }
        }
    };
}

named_entity!(
    /// An OWL class (`owl:Class`).
    ///
    /// Classes are sets of individuals.
    Class,
    "Class"
);
named_entity!(
    /// A datatype (`rdfs:Datatype`).
    Datatype,
    "Datatype"
);
named_entity!(
    /// An object property (`owl:ObjectProperty`), relating individuals to individuals.
    ObjectProperty,
    "ObjectProperty"
);
named_entity!(
    /// A data property (`owl:DatatypeProperty`), relating individuals to literals.
    DataProperty,
    "DataProperty"
);
named_entity!(
    /// An annotation property (`owl:AnnotationProperty`).
    AnnotationProperty,
    "AnnotationProperty"
);
named_entity!(
    /// A named individual (`owl:NamedIndividual`).
    NamedIndividual,
    "NamedIndividual"
);

impl Class {
    /// `owl:Thing`
    pub fn thing() -> Self {
        Self::new(owl::THING)
    }

    /// `owl:Nothing`
    pub fn nothing() -> Self {
        Self::new(owl::NOTHING)
    }
}

/// An anonymous individual, identified by a node ID local to the ontology.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnonymousIndividual(String);

impl AnonymousIndividual {
    pub const ELEMENT: &'static str = "AnonymousIndividual";

    /// Creates an anonymous individual from its node ID.
    pub fn new(node_id: impl Into<String>) -> Result<Self, ConstructionError> {
        let node_id = node_id.into();
        let node_id = node_id.strip_prefix("_:").map(str::to_owned).unwrap_or(node_id);
        BlankNode::new(node_id.as_str())
            .map_err(|e| ConstructionError::new("AnonymousIndividual", "nodeID", e.to_string()))?;
        Ok(Self(node_id))
    }

    #[inline]
    pub fn node_id(&self) -> &str {
        &self.0
    }

    /// The blank node carrying this individual in RDF.
    pub fn to_blank_node(&self) -> BlankNode {
        BlankNode::new_unchecked(self.0.as_str())
    }
}

impl fmt::Display for AnonymousIndividual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.0)
    }
}

/// An individual, named or anonymous.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Individual {
    Named(NamedIndividual),
    Anonymous(AnonymousIndividual),
}

impl Individual {
    /// The named individual, if this individual is named.
    pub fn as_named(&self) -> Option<&NamedIndividual> {
        match self {
            Self::Named(i) => Some(i),
            Self::Anonymous(_) => None,
        }
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(i) => write!(f, "{i}"),
            Self::Anonymous(i) => write!(f, "{i}"),
        }
    }
}

impl From<NamedIndividual> for Individual {
    #[inline]
    fn from(individual: NamedIndividual) -> Self {
        Self::Named(individual)
    }
}

impl From<AnonymousIndividual> for Individual {
    #[inline]
    fn from(individual: AnonymousIndividual) -> Self {
        Self::Anonymous(individual)
    }
}

/// The kind of an entity, as used in declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Class,
    Datatype,
    ObjectProperty,
    DataProperty,
    AnnotationProperty,
    NamedIndividual,
}

impl EntityKind {
    pub const ALL: [Self; 6] = [
        Self::Class,
        Self::Datatype,
        Self::ObjectProperty,
        Self::DataProperty,
        Self::AnnotationProperty,
        Self::NamedIndividual,
    ];

    /// The OWL/XML element name.
    pub fn element_name(self) -> &'static str {
        match self {
            Self::Class => Class::ELEMENT,
            Self::Datatype => Datatype::ELEMENT,
            Self::ObjectProperty => ObjectProperty::ELEMENT,
            Self::DataProperty => DataProperty::ELEMENT,
            Self::AnnotationProperty => AnnotationProperty::ELEMENT,
            Self::NamedIndividual => NamedIndividual::ELEMENT,
        }
    }

    /// The `rdf:type` object used to declare entities of this kind.
    pub fn rdf_type(self) -> NamedNodeRef<'static> {
        match self {
            Self::Class => owl::CLASS,
            Self::Datatype => rdfs::DATATYPE,
            Self::ObjectProperty => owl::OBJECT_PROPERTY,
            Self::DataProperty => owl::DATATYPE_PROPERTY,
            Self::AnnotationProperty => owl::ANNOTATION_PROPERTY,
            Self::NamedIndividual => owl::NAMED_INDIVIDUAL,
        }
    }
}

/// An OWL entity of any kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Entity {
    Class(Class),
    Datatype(Datatype),
    ObjectProperty(ObjectProperty),
    DataProperty(DataProperty),
    AnnotationProperty(AnnotationProperty),
    NamedIndividual(NamedIndividual),
}

impl Entity {
    /// Builds an entity of the given kind.
    pub fn new(kind: EntityKind, name: impl Into<EntityName>) -> Self {
        let name = name.into();
        match kind {
            EntityKind::Class => Self::Class(name.into()),
            EntityKind::Datatype => Self::Datatype(name.into()),
            EntityKind::ObjectProperty => Self::ObjectProperty(name.into()),
            EntityKind::DataProperty => Self::DataProperty(name.into()),
            EntityKind::AnnotationProperty => Self::AnnotationProperty(name.into()),
            EntityKind::NamedIndividual => Self::NamedIndividual(name.into()),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Class(_) => EntityKind::Class,
            Self::Datatype(_) => EntityKind::Datatype,
            Self::ObjectProperty(_) => EntityKind::ObjectProperty,
            Self::DataProperty(_) => EntityKind::DataProperty,
            Self::AnnotationProperty(_) => EntityKind::AnnotationProperty,
            Self::NamedIndividual(_) => EntityKind::NamedIndividual,
        }
    }

    pub fn name(&self) -> &EntityName {
        match self {
            Self::Class(e) => e.name(),
            Self::Datatype(e) => e.name(),
            Self::ObjectProperty(e) => e.name(),
            Self::DataProperty(e) => e.name(),
            Self::AnnotationProperty(e) => e.name(),
            Self::NamedIndividual(e) => e.name(),
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind().element_name(), self.name())
    }
}

macro_rules! entity_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Entity {
                #[inline]
                fn from(entity: $variant) -> Self {
                    Self::$variant(entity)
                }
            }
        )*
    };
}

entity_from!(Class, Datatype, ObjectProperty, DataProperty, AnnotationProperty, NamedIndividual);
