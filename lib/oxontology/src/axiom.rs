//! OWL 2 axiom types.
//!
//! Axioms are the basic statements in an OWL 2 ontology. An [`Axiom`] is the bare
//! structural statement and an [`AnnotatedAxiom`] attaches its annotations.

use crate::annotation::{Annotation, AnnotationSubject, AnnotationValue};
use crate::entity::{
    AnnotationProperty, Class, DataProperty, Datatype, Entity, Individual,
};
use crate::error::ConstructionError;
use crate::expression::{ClassExpression, DataRange, Members, ObjectPropertyExpression};
use crate::iri::EntityName;
use crate::literal::OwlLiteral;
use std::fmt;

/// The list an axiom belongs to inside an [`Ontology`](crate::Ontology).
///
/// The variant order is the order axioms are written in OWL/XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AxiomCategory {
    Declaration,
    Class,
    ObjectProperty,
    DataProperty,
    DatatypeDefinition,
    HasKey,
    Assertion,
    Annotation,
}

impl AxiomCategory {
    pub const ALL: [Self; 8] = [
        Self::Declaration,
        Self::Class,
        Self::ObjectProperty,
        Self::DataProperty,
        Self::DatatypeDefinition,
        Self::HasKey,
        Self::Assertion,
        Self::Annotation,
    ];
}

/// `HasKey(C (P1 ... Pm) (D1 ... Dn))` with m + n ≥ 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HasKey {
    class: ClassExpression,
    object_properties: Vec<ObjectPropertyExpression>,
    data_properties: Vec<DataProperty>,
}

impl HasKey {
    pub fn new(
        class: ClassExpression,
        object_properties: Vec<ObjectPropertyExpression>,
        data_properties: Vec<DataProperty>,
    ) -> Result<Self, ConstructionError> {
        if object_properties.is_empty() && data_properties.is_empty() {
            return Err(ConstructionError::too_few("HasKey", "properties", 1, 0));
        }
        Ok(Self {
            class,
            object_properties,
            data_properties,
        })
    }

    #[inline]
    pub fn class(&self) -> &ClassExpression {
        &self.class
    }

    #[inline]
    pub fn object_properties(&self) -> &[ObjectPropertyExpression] {
        &self.object_properties
    }

    #[inline]
    pub fn data_properties(&self) -> &[DataProperty] {
        &self.data_properties
    }
}

/// An OWL 2 axiom.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Axiom {
    /// Declaration(Entity)
    Declaration(Entity),

    // === Class Axioms ===
    /// SubClassOf(sub, super)
    SubClassOf {
        sub_class: ClassExpression,
        super_class: ClassExpression,
    },

    /// EquivalentClasses(C1, C2, ...)
    EquivalentClasses(Members<ClassExpression>),

    /// DisjointClasses(C1, C2, ...)
    DisjointClasses(Members<ClassExpression>),

    /// DisjointUnion(C, C1, ..., Cn)
    DisjointUnion {
        class: Class,
        disjoint_classes: Members<ClassExpression>,
    },

    // === Object Property Axioms ===
    /// SubObjectPropertyOf(sub, super)
    SubObjectPropertyOf {
        sub_property: ObjectPropertyExpression,
        super_property: ObjectPropertyExpression,
    },

    /// SubObjectPropertyOf(ObjectPropertyChain(P1 ... Pn), P)
    SubObjectPropertyChainOf {
        chain: Members<ObjectPropertyExpression>,
        super_property: ObjectPropertyExpression,
    },

    /// EquivalentObjectProperties(P1, P2, ...)
    EquivalentObjectProperties(Members<ObjectPropertyExpression>),

    /// DisjointObjectProperties(P1, P2, ...)
    DisjointObjectProperties(Members<ObjectPropertyExpression>),

    /// InverseObjectProperties(P1, P2)
    InverseObjectProperties(ObjectPropertyExpression, ObjectPropertyExpression),

    /// ObjectPropertyDomain(P, C)
    ObjectPropertyDomain {
        property: ObjectPropertyExpression,
        domain: ClassExpression,
    },

    /// ObjectPropertyRange(P, C)
    ObjectPropertyRange {
        property: ObjectPropertyExpression,
        range: ClassExpression,
    },

    /// FunctionalObjectProperty(P)
    FunctionalObjectProperty(ObjectPropertyExpression),

    /// InverseFunctionalObjectProperty(P)
    InverseFunctionalObjectProperty(ObjectPropertyExpression),

    /// ReflexiveObjectProperty(P)
    ReflexiveObjectProperty(ObjectPropertyExpression),

    /// IrreflexiveObjectProperty(P)
    IrreflexiveObjectProperty(ObjectPropertyExpression),

    /// SymmetricObjectProperty(P)
    SymmetricObjectProperty(ObjectPropertyExpression),

    /// AsymmetricObjectProperty(P)
    AsymmetricObjectProperty(ObjectPropertyExpression),

    /// TransitiveObjectProperty(P)
    TransitiveObjectProperty(ObjectPropertyExpression),

    // === Data Property Axioms ===
    /// SubDataPropertyOf(sub, super)
    SubDataPropertyOf {
        sub_property: DataProperty,
        super_property: DataProperty,
    },

    /// EquivalentDataProperties(P1, P2, ...)
    EquivalentDataProperties(Members<DataProperty>),

    /// DisjointDataProperties(P1, P2, ...)
    DisjointDataProperties(Members<DataProperty>),

    /// DataPropertyDomain(P, C)
    DataPropertyDomain {
        property: DataProperty,
        domain: ClassExpression,
    },

    /// DataPropertyRange(P, D)
    DataPropertyRange {
        property: DataProperty,
        range: DataRange,
    },

    /// FunctionalDataProperty(P)
    FunctionalDataProperty(DataProperty),

    /// DatatypeDefinition(DT, D)
    DatatypeDefinition { datatype: Datatype, range: DataRange },

    /// HasKey(C (P1 ... Pm) (D1 ... Dn))
    HasKey(HasKey),

    // === Assertions ===
    /// SameIndividual(a1, a2, ...)
    SameIndividual(Members<Individual>),

    /// DifferentIndividuals(a1, a2, ...)
    DifferentIndividuals(Members<Individual>),

    /// ClassAssertion(C, a)
    ClassAssertion {
        class: ClassExpression,
        individual: Individual,
    },

    /// ObjectPropertyAssertion(P, a, b)
    ObjectPropertyAssertion {
        property: ObjectPropertyExpression,
        source: Individual,
        target: Individual,
    },

    /// NegativeObjectPropertyAssertion(P, a, b)
    NegativeObjectPropertyAssertion {
        property: ObjectPropertyExpression,
        source: Individual,
        target: Individual,
    },

    /// DataPropertyAssertion(P, a, v)
    DataPropertyAssertion {
        property: DataProperty,
        source: Individual,
        target: OwlLiteral,
    },

    /// NegativeDataPropertyAssertion(P, a, v)
    NegativeDataPropertyAssertion {
        property: DataProperty,
        source: Individual,
        target: OwlLiteral,
    },

    // === Annotation Axioms ===
    /// AnnotationAssertion(AP, s, v)
    AnnotationAssertion {
        property: AnnotationProperty,
        subject: AnnotationSubject,
        value: AnnotationValue,
    },

    /// SubAnnotationPropertyOf(sub, super)
    SubAnnotationPropertyOf {
        sub_property: AnnotationProperty,
        super_property: AnnotationProperty,
    },

    /// AnnotationPropertyDomain(AP, IRI)
    AnnotationPropertyDomain {
        property: AnnotationProperty,
        domain: EntityName,
    },

    /// AnnotationPropertyRange(AP, IRI)
    AnnotationPropertyRange {
        property: AnnotationProperty,
        range: EntityName,
    },
}

impl Axiom {
    pub fn declaration(entity: impl Into<Entity>) -> Self {
        Self::Declaration(entity.into())
    }

    /// Creates a SubClassOf axiom.
    pub fn sub_class_of(
        sub: impl Into<ClassExpression>,
        sup: impl Into<ClassExpression>,
    ) -> Self {
        Self::SubClassOf {
            sub_class: sub.into(),
            super_class: sup.into(),
        }
    }

    /// Creates an EquivalentClasses axiom, requires at least 2 classes.
    pub fn equivalent_classes(classes: Vec<ClassExpression>) -> Result<Self, ConstructionError> {
        Ok(Self::EquivalentClasses(Members::new(
            "EquivalentClasses",
            "classExpressions",
            2,
            classes,
        )?))
    }

    /// Creates a DisjointClasses axiom, requires at least 2 classes.
    pub fn disjoint_classes(classes: Vec<ClassExpression>) -> Result<Self, ConstructionError> {
        Ok(Self::DisjointClasses(Members::new(
            "DisjointClasses",
            "classExpressions",
            2,
            classes,
        )?))
    }

    /// Creates a DisjointUnion axiom, requires at least 2 disjoint classes.
    pub fn disjoint_union(
        class: impl Into<Class>,
        disjoint_classes: Vec<ClassExpression>,
    ) -> Result<Self, ConstructionError> {
        Ok(Self::DisjointUnion {
            class: class.into(),
            disjoint_classes: Members::new("DisjointUnion", "classExpressions", 2, disjoint_classes)?,
        })
    }

    /// Creates a property chain inclusion, requires a chain of at least 2 properties.
    pub fn sub_object_property_chain_of(
        chain: Vec<ObjectPropertyExpression>,
        super_property: impl Into<ObjectPropertyExpression>,
    ) -> Result<Self, ConstructionError> {
        Ok(Self::SubObjectPropertyChainOf {
            chain: Members::new("SubObjectPropertyOf", "ObjectPropertyChain", 2, chain)?,
            super_property: super_property.into(),
        })
    }

    pub fn equivalent_object_properties(
        properties: Vec<ObjectPropertyExpression>,
    ) -> Result<Self, ConstructionError> {
        Ok(Self::EquivalentObjectProperties(Members::new(
            "EquivalentObjectProperties",
            "objectPropertyExpressions",
            2,
            properties,
        )?))
    }

    pub fn disjoint_object_properties(
        properties: Vec<ObjectPropertyExpression>,
    ) -> Result<Self, ConstructionError> {
        Ok(Self::DisjointObjectProperties(Members::new(
            "DisjointObjectProperties",
            "objectPropertyExpressions",
            2,
            properties,
        )?))
    }

    pub fn equivalent_data_properties(
        properties: Vec<DataProperty>,
    ) -> Result<Self, ConstructionError> {
        Ok(Self::EquivalentDataProperties(Members::new(
            "EquivalentDataProperties",
            "dataPropertyExpressions",
            2,
            properties,
        )?))
    }

    pub fn disjoint_data_properties(
        properties: Vec<DataProperty>,
    ) -> Result<Self, ConstructionError> {
        Ok(Self::DisjointDataProperties(Members::new(
            "DisjointDataProperties",
            "dataPropertyExpressions",
            2,
            properties,
        )?))
    }

    pub fn has_key(
        class: impl Into<ClassExpression>,
        object_properties: Vec<ObjectPropertyExpression>,
        data_properties: Vec<DataProperty>,
    ) -> Result<Self, ConstructionError> {
        Ok(Self::HasKey(HasKey::new(
            class.into(),
            object_properties,
            data_properties,
        )?))
    }

    /// Creates a SameIndividual axiom, requires at least 2 individuals.
    pub fn same_individual(individuals: Vec<Individual>) -> Result<Self, ConstructionError> {
        Ok(Self::SameIndividual(Members::new(
            "SameIndividual",
            "individuals",
            2,
            individuals,
        )?))
    }

    /// Creates a DifferentIndividuals axiom, requires at least 2 individuals.
    pub fn different_individuals(individuals: Vec<Individual>) -> Result<Self, ConstructionError> {
        Ok(Self::DifferentIndividuals(Members::new(
            "DifferentIndividuals",
            "individuals",
            2,
            individuals,
        )?))
    }

    /// Creates a ClassAssertion axiom.
    pub fn class_assertion(
        class: impl Into<ClassExpression>,
        individual: impl Into<Individual>,
    ) -> Self {
        Self::ClassAssertion {
            class: class.into(),
            individual: individual.into(),
        }
    }

    pub fn object_property_assertion(
        property: impl Into<ObjectPropertyExpression>,
        source: impl Into<Individual>,
        target: impl Into<Individual>,
    ) -> Self {
        Self::ObjectPropertyAssertion {
            property: property.into(),
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn data_property_assertion(
        property: impl Into<DataProperty>,
        source: impl Into<Individual>,
        target: OwlLiteral,
    ) -> Self {
        Self::DataPropertyAssertion {
            property: property.into(),
            source: source.into(),
            target,
        }
    }

    pub fn annotation_assertion(
        property: impl Into<AnnotationProperty>,
        subject: impl Into<AnnotationSubject>,
        value: impl Into<AnnotationValue>,
    ) -> Self {
        Self::AnnotationAssertion {
            property: property.into(),
            subject: subject.into(),
            value: value.into(),
        }
    }

    /// The ontology list this axiom belongs to.
    pub fn category(&self) -> AxiomCategory {
        match self {
            Self::Declaration(_) => AxiomCategory::Declaration,
            Self::SubClassOf { .. }
            | Self::EquivalentClasses(_)
            | Self::DisjointClasses(_)
            | Self::DisjointUnion { .. } => AxiomCategory::Class,
            Self::SubObjectPropertyOf { .. }
            | Self::SubObjectPropertyChainOf { .. }
            | Self::EquivalentObjectProperties(_)
            | Self::DisjointObjectProperties(_)
            | Self::InverseObjectProperties(..)
            | Self::ObjectPropertyDomain { .. }
            | Self::ObjectPropertyRange { .. }
            | Self::FunctionalObjectProperty(_)
            | Self::InverseFunctionalObjectProperty(_)
            | Self::ReflexiveObjectProperty(_)
            | Self::IrreflexiveObjectProperty(_)
            | Self::SymmetricObjectProperty(_)
            | Self::AsymmetricObjectProperty(_)
            | Self::TransitiveObjectProperty(_) => AxiomCategory::ObjectProperty,
            Self::SubDataPropertyOf { .. }
            | Self::EquivalentDataProperties(_)
            | Self::DisjointDataProperties(_)
            | Self::DataPropertyDomain { .. }
            | Self::DataPropertyRange { .. }
            | Self::FunctionalDataProperty(_) => AxiomCategory::DataProperty,
            Self::DatatypeDefinition { .. } => AxiomCategory::DatatypeDefinition,
            Self::HasKey(_) => AxiomCategory::HasKey,
            Self::SameIndividual(_)
            | Self::DifferentIndividuals(_)
            | Self::ClassAssertion { .. }
            | Self::ObjectPropertyAssertion { .. }
            | Self::NegativeObjectPropertyAssertion { .. }
            | Self::DataPropertyAssertion { .. }
            | Self::NegativeDataPropertyAssertion { .. } => AxiomCategory::Assertion,
            Self::AnnotationAssertion { .. }
            | Self::SubAnnotationPropertyOf { .. }
            | Self::AnnotationPropertyDomain { .. }
            | Self::AnnotationPropertyRange { .. } => AxiomCategory::Annotation,
        }
    }

    /// The OWL/XML element name, which is also the functional-syntax keyword.
    pub fn element_name(&self) -> &'static str {
        match self {
            Self::Declaration(_) => "Declaration",
            Self::SubClassOf { .. } => "SubClassOf",
            Self::EquivalentClasses(_) => "EquivalentClasses",
            Self::DisjointClasses(_) => "DisjointClasses",
            Self::DisjointUnion { .. } => "DisjointUnion",
            Self::SubObjectPropertyOf { .. } | Self::SubObjectPropertyChainOf { .. } => {
                "SubObjectPropertyOf"
            }
            Self::EquivalentObjectProperties(_) => "EquivalentObjectProperties",
            Self::DisjointObjectProperties(_) => "DisjointObjectProperties",
            Self::InverseObjectProperties(..) => "InverseObjectProperties",
            Self::ObjectPropertyDomain { .. } => "ObjectPropertyDomain",
            Self::ObjectPropertyRange { .. } => "ObjectPropertyRange",
            Self::FunctionalObjectProperty(_) => "FunctionalObjectProperty",
            Self::InverseFunctionalObjectProperty(_) => "InverseFunctionalObjectProperty",
            Self::ReflexiveObjectProperty(_) => "ReflexiveObjectProperty",
            Self::IrreflexiveObjectProperty(_) => "IrreflexiveObjectProperty",
            Self::SymmetricObjectProperty(_) => "SymmetricObjectProperty",
            Self::AsymmetricObjectProperty(_) => "AsymmetricObjectProperty",
            Self::TransitiveObjectProperty(_) => "TransitiveObjectProperty",
            Self::SubDataPropertyOf { .. } => "SubDataPropertyOf",
            Self::EquivalentDataProperties(_) => "EquivalentDataProperties",
            Self::DisjointDataProperties(_) => "DisjointDataProperties",
            Self::DataPropertyDomain { .. } => "DataPropertyDomain",
            Self::DataPropertyRange { .. } => "DataPropertyRange",
            Self::FunctionalDataProperty(_) => "FunctionalDataProperty",
            Self::DatatypeDefinition { .. } => "DatatypeDefinition",
            Self::HasKey(_) => "HasKey",
            Self::SameIndividual(_) => "SameIndividual",
            Self::DifferentIndividuals(_) => "DifferentIndividuals",
            Self::ClassAssertion { .. } => "ClassAssertion",
            Self::ObjectPropertyAssertion { .. } => "ObjectPropertyAssertion",
            Self::NegativeObjectPropertyAssertion { .. } => "NegativeObjectPropertyAssertion",
            Self::DataPropertyAssertion { .. } => "DataPropertyAssertion",
            Self::NegativeDataPropertyAssertion { .. } => "NegativeDataPropertyAssertion",
            Self::AnnotationAssertion { .. } => "AnnotationAssertion",
            Self::SubAnnotationPropertyOf { .. } => "SubAnnotationPropertyOf",
            Self::AnnotationPropertyDomain { .. } => "AnnotationPropertyDomain",
            Self::AnnotationPropertyRange { .. } => "AnnotationPropertyRange",
        }
    }

    /// Writes the space separated arguments of the functional-syntax form.
    fn fmt_arguments(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declaration(entity) => write!(f, "{entity}"),
            Self::SubClassOf {
                sub_class,
                super_class,
            } => write!(f, "{sub_class} {super_class}"),
            Self::EquivalentClasses(classes) | Self::DisjointClasses(classes) => {
                write_spaced(f, classes.as_slice())
            }
            Self::DisjointUnion {
                class,
                disjoint_classes,
            } => {
                write!(f, "{class} ")?;
                write_spaced(f, disjoint_classes.as_slice())
            }
            Self::SubObjectPropertyOf {
                sub_property,
                super_property,
            } => write!(f, "{sub_property} {super_property}"),
            Self::SubObjectPropertyChainOf {
                chain,
                super_property,
            } => {
                f.write_str("ObjectPropertyChain(")?;
                write_spaced(f, chain.as_slice())?;
                write!(f, ") {super_property}")
            }
            Self::EquivalentObjectProperties(properties)
            | Self::DisjointObjectProperties(properties) => {
                write_spaced(f, properties.as_slice())
            }
            Self::InverseObjectProperties(first, second) => write!(f, "{first} {second}"),
            Self::ObjectPropertyDomain {
                property,
                domain: class,
            }
            | Self::ObjectPropertyRange {
                property,
                range: class,
            } => write!(f, "{property} {class}"),
            Self::FunctionalObjectProperty(property)
            | Self::InverseFunctionalObjectProperty(property)
            | Self::ReflexiveObjectProperty(property)
            | Self::IrreflexiveObjectProperty(property)
            | Self::SymmetricObjectProperty(property)
            | Self::AsymmetricObjectProperty(property)
            | Self::TransitiveObjectProperty(property) => write!(f, "{property}"),
            Self::SubDataPropertyOf {
                sub_property,
                super_property,
            } => write!(f, "{sub_property} {super_property}"),
            Self::EquivalentDataProperties(properties)
            | Self::DisjointDataProperties(properties) => write_spaced(f, properties.as_slice()),
            Self::DataPropertyDomain { property, domain } => write!(f, "{property} {domain}"),
            Self::DataPropertyRange { property, range } => write!(f, "{property} {range}"),
            Self::FunctionalDataProperty(property) => write!(f, "{property}"),
            Self::DatatypeDefinition { datatype, range } => write!(f, "{datatype} {range}"),
            Self::HasKey(key) => {
                write!(f, "{} (", key.class)?;
                write_spaced(f, &key.object_properties)?;
                f.write_str(") (")?;
                write_spaced(f, &key.data_properties)?;
                f.write_str(")")
            }
            Self::SameIndividual(individuals) | Self::DifferentIndividuals(individuals) => {
                write_spaced(f, individuals.as_slice())
            }
            Self::ClassAssertion { class, individual } => write!(f, "{class} {individual}"),
            Self::ObjectPropertyAssertion {
                property,
                source,
                target,
            }
            | Self::NegativeObjectPropertyAssertion {
                property,
                source,
                target,
            } => write!(f, "{property} {source} {target}"),
            Self::DataPropertyAssertion {
                property,
                source,
                target,
            }
            | Self::NegativeDataPropertyAssertion {
                property,
                source,
                target,
            } => write!(f, "{property} {source} {target}"),
            Self::AnnotationAssertion {
                property,
                subject,
                value,
            } => write!(f, "{property} {subject} {value}"),
            Self::SubAnnotationPropertyOf {
                sub_property,
                super_property,
            } => write!(f, "{sub_property} {super_property}"),
            Self::AnnotationPropertyDomain {
                property,
                domain: iri,
            }
            | Self::AnnotationPropertyRange {
                property,
                range: iri,
            } => write!(f, "{property} {iri}"),
        }
    }
}

fn write_spaced<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Axiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.element_name())?;
        self.fmt_arguments(f)?;
        f.write_str(")")
    }
}

/// An axiom together with its annotations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotatedAxiom {
    axiom: Axiom,
    annotations: Vec<Annotation>,
}

impl AnnotatedAxiom {
    pub fn new(axiom: Axiom, annotations: Vec<Annotation>) -> Self {
        Self { axiom, annotations }
    }

    #[inline]
    pub fn axiom(&self) -> &Axiom {
        &self.axiom
    }

    #[inline]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    #[inline]
    pub fn category(&self) -> AxiomCategory {
        self.axiom.category()
    }

    pub fn into_parts(self) -> (Axiom, Vec<Annotation>) {
        (self.axiom, self.annotations)
    }
}

impl From<Axiom> for AnnotatedAxiom {
    fn from(axiom: Axiom) -> Self {
        Self::new(axiom, Vec::new())
    }
}

impl fmt::Display for AnnotatedAxiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.axiom.element_name())?;
        for annotation in &self.annotations {
            write!(f, "{annotation} ")?;
        }
        self.axiom.fmt_arguments(f)?;
        f.write_str(")")
    }
}

impl crate::expression::Identified for Axiom {
    fn identity(&self, prefixes: &[crate::iri::Prefix]) -> crate::expression::Identity {
        crate::expression::Identity::Structural(crate::owlxml::canonical_axiom_body(self, prefixes))
    }
}

impl crate::expression::Identified for AnnotatedAxiom {
    fn identity(&self, prefixes: &[crate::iri::Prefix]) -> crate::expression::Identity {
        crate::expression::Identity::Structural(crate::owlxml::canonical_axiom(self, prefixes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::NamedIndividual;
    use oxrdf::NamedNode;

    fn class(local: &str) -> ClassExpression {
        ClassExpression::class(NamedNode::new_unchecked(format!("http://example.org/{local}")))
    }

    fn individual(local: &str) -> Individual {
        NamedIndividual::new(NamedNode::new_unchecked(format!("http://example.org/{local}"))).into()
    }

    #[test]
    fn nary_axioms_require_two_members() {
        assert!(Axiom::disjoint_classes(vec![class("A")]).is_err());
        assert!(Axiom::equivalent_classes(vec![]).is_err());
        assert!(Axiom::same_individual(vec![individual("a")]).is_err());
        assert!(Axiom::different_individuals(vec![individual("a")]).is_err());
        assert!(Axiom::disjoint_union(Class::thing(), vec![class("A")]).is_err());
        assert!(Axiom::has_key(class("A"), vec![], vec![]).is_err());
        let err = Axiom::disjoint_classes(vec![class("A")]).unwrap_err();
        assert_eq!(err.type_name(), "DisjointClasses");
        assert!(Axiom::disjoint_classes(vec![class("A"), class("B")]).is_ok());
    }

    #[test]
    fn categories_follow_the_axiom_family() {
        assert_eq!(
            Axiom::sub_class_of(class("A"), class("B")).category(),
            AxiomCategory::Class
        );
        assert_eq!(
            Axiom::class_assertion(class("A"), individual("a")).category(),
            AxiomCategory::Assertion
        );
        assert_eq!(
            Axiom::declaration(Class::thing()).category(),
            AxiomCategory::Declaration
        );
    }

    #[test]
    fn axioms_deduplicate_on_resolved_names() {
        use crate::expression::deduplicate;
        use crate::iri::Prefix;
        use crate::vocab::rdfs;

        let prefixes = [Prefix::new("ex", "http://example.org/").unwrap()];
        let abbreviated =
            |local: &str| ClassExpression::class(EntityName::abbreviated("ex", local).unwrap());
        let axioms: Vec<AnnotatedAxiom> = vec![
            Axiom::sub_class_of(abbreviated("A"), abbreviated("B")).into(),
            Axiom::sub_class_of(class("A"), class("B")).into(),
            Axiom::sub_class_of(class("B"), class("A")).into(),
            AnnotatedAxiom::new(
                Axiom::sub_class_of(class("A"), abbreviated("B")),
                vec![Annotation::new(
                    AnnotationProperty::new(rdfs::COMMENT),
                    OwlLiteral::new_simple("kept"),
                )],
            ),
        ];
        let once = deduplicate(axioms.clone(), &prefixes);
        assert_eq!(
            once,
            vec![axioms[0].clone(), axioms[2].clone(), axioms[3].clone()]
        );
        assert_eq!(deduplicate(once.clone(), &prefixes), once);
        assert_eq!(deduplicate(axioms.clone(), &[]).len(), 4);

        let bare: Vec<Axiom> = axioms.iter().map(|a| a.axiom().clone()).collect();
        assert_eq!(
            deduplicate(bare.clone(), &prefixes),
            vec![bare[0].clone(), bare[2].clone()]
        );
    }

    #[test]
    fn functional_syntax_rendering() {
        let axiom = Axiom::disjoint_classes(vec![class("A"), class("B")]).unwrap();
        assert_eq!(
            axiom.to_string(),
            "DisjointClasses(<http://example.org/A> <http://example.org/B>)"
        );
    }
}
