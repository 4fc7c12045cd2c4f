//! OWL 2 class expressions, object property expressions, and data ranges.

use crate::entity::{Class, DataProperty, Datatype, Individual, ObjectProperty};
use crate::error::ConstructionError;
use crate::iri::Prefix;
use crate::literal::OwlLiteral;
use oxrdf::NamedNode;
use rustc_hash::FxHashSet;
use std::fmt;
use std::ops::Deref;

/// A list of operands with a guaranteed minimum length.
///
/// It can only be built through the validating constructors of the expressions and axioms using it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Members<T>(Vec<T>);

impl<T> Members<T> {
    pub(crate) fn new(
        type_name: &'static str,
        parameter: &'static str,
        minimum: usize,
        items: Vec<T>,
    ) -> Result<Self, ConstructionError> {
        if items.len() < minimum {
            return Err(ConstructionError::too_few(
                type_name,
                parameter,
                minimum,
                items.len(),
            ));
        }
        Ok(Self(items))
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> Deref for Members<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<'a, T> IntoIterator for &'a Members<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// An object property expression: a named property or the inverse of one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectPropertyExpression {
    /// A named object property
    ObjectProperty(ObjectProperty),
    /// ObjectInverseOf(P)
    ObjectInverseOf(ObjectProperty),
}

impl ObjectPropertyExpression {
    /// Returns the named property underneath this expression.
    pub fn property(&self) -> &ObjectProperty {
        match self {
            Self::ObjectProperty(p) | Self::ObjectInverseOf(p) => p,
        }
    }

    pub fn is_inverse(&self) -> bool {
        matches!(self, Self::ObjectInverseOf(_))
    }
}

impl From<ObjectProperty> for ObjectPropertyExpression {
    fn from(property: ObjectProperty) -> Self {
        Self::ObjectProperty(property)
    }
}

impl fmt::Display for ObjectPropertyExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ObjectProperty(p) => write!(f, "{p}"),
            Self::ObjectInverseOf(p) => write!(f, "ObjectInverseOf({p})"),
        }
    }
}

/// An OWL 2 class expression.
///
/// Class expressions describe sets of individuals through various constructors.
/// Restrictions are plain struct variants; operand lists go through the validating
/// constructors ([`ClassExpression::object_intersection_of`]...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassExpression {
    /// A named class
    Class(Class),

    /// ObjectIntersectionOf(C1, ..., Cn), n ≥ 2
    ObjectIntersectionOf(Members<ClassExpression>),

    /// ObjectUnionOf(C1, ..., Cn), n ≥ 2
    ObjectUnionOf(Members<ClassExpression>),

    /// ObjectComplementOf(C)
    ObjectComplementOf(Box<ClassExpression>),

    /// ObjectOneOf(a1, ..., an), n ≥ 1
    ObjectOneOf(Members<Individual>),

    /// ObjectSomeValuesFrom(P, C)
    ObjectSomeValuesFrom {
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },

    /// ObjectAllValuesFrom(P, C)
    ObjectAllValuesFrom {
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },

    /// ObjectHasValue(P, a)
    ObjectHasValue {
        property: ObjectPropertyExpression,
        individual: Individual,
    },

    /// ObjectHasSelf(P)
    ObjectHasSelf(ObjectPropertyExpression),

    /// ObjectMinCardinality(n, P [C])
    ObjectMinCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Box<ClassExpression>>,
    },

    /// ObjectMaxCardinality(n, P [C])
    ObjectMaxCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Box<ClassExpression>>,
    },

    /// ObjectExactCardinality(n, P [C])
    ObjectExactCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Box<ClassExpression>>,
    },

    /// DataSomeValuesFrom(P, D)
    DataSomeValuesFrom {
        property: DataProperty,
        filler: DataRange,
    },

    /// DataAllValuesFrom(P, D)
    DataAllValuesFrom {
        property: DataProperty,
        filler: DataRange,
    },

    /// DataHasValue(P, v)
    DataHasValue {
        property: DataProperty,
        value: OwlLiteral,
    },

    /// DataMinCardinality(n, P [D])
    DataMinCardinality {
        cardinality: u32,
        property: DataProperty,
        filler: Option<DataRange>,
    },

    /// DataMaxCardinality(n, P [D])
    DataMaxCardinality {
        cardinality: u32,
        property: DataProperty,
        filler: Option<DataRange>,
    },

    /// DataExactCardinality(n, P [D])
    DataExactCardinality {
        cardinality: u32,
        property: DataProperty,
        filler: Option<DataRange>,
    },
}

impl ClassExpression {
    /// Creates a named class expression.
    pub fn class(c: impl Into<Class>) -> Self {
        Self::Class(c.into())
    }

    /// ObjectIntersectionOf, requires at least 2 operands.
    pub fn object_intersection_of(
        operands: Vec<ClassExpression>,
    ) -> Result<Self, ConstructionError> {
        Ok(Self::ObjectIntersectionOf(Members::new(
            "ObjectIntersectionOf",
            "classExpressions",
            2,
            operands,
        )?))
    }

    /// ObjectUnionOf, requires at least 2 operands.
    pub fn object_union_of(operands: Vec<ClassExpression>) -> Result<Self, ConstructionError> {
        Ok(Self::ObjectUnionOf(Members::new(
            "ObjectUnionOf",
            "classExpressions",
            2,
            operands,
        )?))
    }

    pub fn object_complement_of(operand: ClassExpression) -> Self {
        Self::ObjectComplementOf(Box::new(operand))
    }

    /// ObjectOneOf, requires at least 1 individual.
    pub fn object_one_of(individuals: Vec<Individual>) -> Result<Self, ConstructionError> {
        Ok(Self::ObjectOneOf(Members::new(
            "ObjectOneOf",
            "individuals",
            1,
            individuals,
        )?))
    }

    pub fn object_some_values_from(
        property: impl Into<ObjectPropertyExpression>,
        filler: ClassExpression,
    ) -> Self {
        Self::ObjectSomeValuesFrom {
            property: property.into(),
            filler: Box::new(filler),
        }
    }

    pub fn object_all_values_from(
        property: impl Into<ObjectPropertyExpression>,
        filler: ClassExpression,
    ) -> Self {
        Self::ObjectAllValuesFrom {
            property: property.into(),
            filler: Box::new(filler),
        }
    }

    /// Returns the named class, if this expression is atomic.
    pub fn as_class(&self) -> Option<&Class> {
        match self {
            Self::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_named(&self) -> bool {
        matches!(self, Self::Class(_))
    }

    /// The OWL/XML element name of this expression.
    pub fn element_name(&self) -> &'static str {
        match self {
            Self::Class(_) => Class::ELEMENT,
            Self::ObjectIntersectionOf(_) => "ObjectIntersectionOf",
            Self::ObjectUnionOf(_) => "ObjectUnionOf",
            Self::ObjectComplementOf(_) => "ObjectComplementOf",
            Self::ObjectOneOf(_) => "ObjectOneOf",
            Self::ObjectSomeValuesFrom { .. } => "ObjectSomeValuesFrom",
            Self::ObjectAllValuesFrom { .. } => "ObjectAllValuesFrom",
            Self::ObjectHasValue { .. } => "ObjectHasValue",
            Self::ObjectHasSelf(_) => "ObjectHasSelf",
            Self::ObjectMinCardinality { .. } => "ObjectMinCardinality",
            Self::ObjectMaxCardinality { .. } => "ObjectMaxCardinality",
            Self::ObjectExactCardinality { .. } => "ObjectExactCardinality",
            Self::DataSomeValuesFrom { .. } => "DataSomeValuesFrom",
            Self::DataAllValuesFrom { .. } => "DataAllValuesFrom",
            Self::DataHasValue { .. } => "DataHasValue",
            Self::DataMinCardinality { .. } => "DataMinCardinality",
            Self::DataMaxCardinality { .. } => "DataMaxCardinality",
            Self::DataExactCardinality { .. } => "DataExactCardinality",
        }
    }

    /// Collects the named classes mentioned anywhere in this expression.
    pub fn named_classes(&self) -> Vec<&Class> {
        let mut classes = Vec::new();
        self.collect_named_classes(&mut classes);
        classes
    }

    fn collect_named_classes<'a>(&'a self, classes: &mut Vec<&'a Class>) {
        match self {
            Self::Class(c) => classes.push(c),
            Self::ObjectIntersectionOf(operands) | Self::ObjectUnionOf(operands) => {
                for operand in operands {
                    operand.collect_named_classes(classes);
                }
            }
            Self::ObjectComplementOf(operand)
            | Self::ObjectSomeValuesFrom {
                filler: operand, ..
            }
            | Self::ObjectAllValuesFrom {
                filler: operand, ..
            } => operand.collect_named_classes(classes),
            Self::ObjectMinCardinality {
                filler: Some(operand),
                ..
            }
            | Self::ObjectMaxCardinality {
                filler: Some(operand),
                ..
            }
            | Self::ObjectExactCardinality {
                filler: Some(operand),
                ..
            } => operand.collect_named_classes(classes),
            _ => (),
        }
    }
}

impl From<Class> for ClassExpression {
    fn from(class: Class) -> Self {
        Self::Class(class)
    }
}

impl fmt::Display for ClassExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.element_name();
        match self {
            Self::Class(c) => write!(f, "{c}"),
            Self::ObjectIntersectionOf(operands) | Self::ObjectUnionOf(operands) => {
                write_list(f, name, operands.as_slice())
            }
            Self::ObjectComplementOf(operand) => write!(f, "{name}({operand})"),
            Self::ObjectOneOf(individuals) => write_list(f, name, individuals.as_slice()),
            Self::ObjectSomeValuesFrom { property, filler }
            | Self::ObjectAllValuesFrom { property, filler } => {
                write!(f, "{name}({property} {filler})")
            }
            Self::ObjectHasValue {
                property,
                individual,
            } => write!(f, "{name}({property} {individual})"),
            Self::ObjectHasSelf(property) => write!(f, "{name}({property})"),
            Self::ObjectMinCardinality {
                cardinality,
                property,
                filler,
            }
            | Self::ObjectMaxCardinality {
                cardinality,
                property,
                filler,
            }
            | Self::ObjectExactCardinality {
                cardinality,
                property,
                filler,
            } => match filler {
                Some(filler) => write!(f, "{name}({cardinality} {property} {filler})"),
                None => write!(f, "{name}({cardinality} {property})"),
            },
            Self::DataSomeValuesFrom { property, filler }
            | Self::DataAllValuesFrom { property, filler } => {
                write!(f, "{name}({property} {filler})")
            }
            Self::DataHasValue { property, value } => write!(f, "{name}({property} {value})"),
            Self::DataMinCardinality {
                cardinality,
                property,
                filler,
            }
            | Self::DataMaxCardinality {
                cardinality,
                property,
                filler,
            }
            | Self::DataExactCardinality {
                cardinality,
                property,
                filler,
            } => match filler {
                Some(filler) => write!(f, "{name}({cardinality} {property} {filler})"),
                None => write!(f, "{name}({cardinality} {property})"),
            },
        }
    }
}

/// A facet restriction inside a [`DataRange::DatatypeRestriction`], e.g. `xsd:minInclusive 5`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FacetRestriction {
    pub facet: NamedNode,
    pub value: OwlLiteral,
}

impl fmt::Display for FacetRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.facet, self.value)
    }
}

/// An OWL 2 data range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataRange {
    /// A named datatype
    Datatype(Datatype),

    /// DataIntersectionOf(D1, ..., Dn), n ≥ 2
    DataIntersectionOf(Members<DataRange>),

    /// DataUnionOf(D1, ..., Dn), n ≥ 2
    DataUnionOf(Members<DataRange>),

    /// DataComplementOf(D)
    DataComplementOf(Box<DataRange>),

    /// DataOneOf(v1, ..., vn), n ≥ 1
    DataOneOf(Members<OwlLiteral>),

    /// DatatypeRestriction(DT F1 v1 ... Fn vn), n ≥ 1
    DatatypeRestriction {
        datatype: Datatype,
        restrictions: Members<FacetRestriction>,
    },
}

impl DataRange {
    pub fn datatype(datatype: impl Into<Datatype>) -> Self {
        Self::Datatype(datatype.into())
    }

    /// DataIntersectionOf, requires at least 2 operands.
    pub fn data_intersection_of(operands: Vec<DataRange>) -> Result<Self, ConstructionError> {
        Ok(Self::DataIntersectionOf(Members::new(
            "DataIntersectionOf",
            "dataRanges",
            2,
            operands,
        )?))
    }

    /// DataUnionOf, requires at least 2 operands.
    pub fn data_union_of(operands: Vec<DataRange>) -> Result<Self, ConstructionError> {
        Ok(Self::DataUnionOf(Members::new(
            "DataUnionOf",
            "dataRanges",
            2,
            operands,
        )?))
    }

    pub fn data_complement_of(operand: DataRange) -> Self {
        Self::DataComplementOf(Box::new(operand))
    }

    /// DataOneOf, requires at least 1 literal.
    pub fn data_one_of(literals: Vec<OwlLiteral>) -> Result<Self, ConstructionError> {
        Ok(Self::DataOneOf(Members::new(
            "DataOneOf",
            "literals",
            1,
            literals,
        )?))
    }

    /// DatatypeRestriction, requires at least 1 facet restriction.
    pub fn datatype_restriction(
        datatype: impl Into<Datatype>,
        restrictions: Vec<FacetRestriction>,
    ) -> Result<Self, ConstructionError> {
        Ok(Self::DatatypeRestriction {
            datatype: datatype.into(),
            restrictions: Members::new("DatatypeRestriction", "facetRestrictions", 1, restrictions)?,
        })
    }

    /// The OWL/XML element name of this data range.
    pub fn element_name(&self) -> &'static str {
        match self {
            Self::Datatype(_) => Datatype::ELEMENT,
            Self::DataIntersectionOf(_) => "DataIntersectionOf",
            Self::DataUnionOf(_) => "DataUnionOf",
            Self::DataComplementOf(_) => "DataComplementOf",
            Self::DataOneOf(_) => "DataOneOf",
            Self::DatatypeRestriction { .. } => "DatatypeRestriction",
        }
    }
}

impl From<Datatype> for DataRange {
    fn from(datatype: Datatype) -> Self {
        Self::Datatype(datatype)
    }
}

impl fmt::Display for DataRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.element_name();
        match self {
            Self::Datatype(d) => write!(f, "{d}"),
            Self::DataIntersectionOf(operands) | Self::DataUnionOf(operands) => {
                write_list(f, name, operands.as_slice())
            }
            Self::DataComplementOf(operand) => write!(f, "{name}({operand})"),
            Self::DataOneOf(literals) => write_list(f, name, literals.as_slice()),
            Self::DatatypeRestriction {
                datatype,
                restrictions,
            } => {
                write!(f, "{name}({datatype}")?;
                for restriction in restrictions {
                    write!(f, " {restriction}")?;
                }
                f.write_str(")")
            }
        }
    }
}

pub(crate) fn write_list<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    items: &[T],
) -> fmt::Result {
    write!(f, "{name}(")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str(")")
}

/// The identity used by [`deduplicate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Identity {
    /// A named term, identified by its resolved IRI.
    Iri(NamedNode),
    /// An anonymous individual, identified by its node ID.
    Anonymous(String),
    /// A composite value, identified by its structure with every name resolved.
    Structural(StructuralKey),
}

/// The OWL/XML structure of a composite value, with every name written as a full IRI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructuralKey(pub(crate) crate::owlxml::Element);

/// Values that collapse to one logical item when they share an [`Identity`].
pub trait Identified {
    fn identity(&self, prefixes: &[Prefix]) -> Identity;
}

macro_rules! identified_by_name {
    ($($t:ty),*) => {
        $(
            impl Identified for $t {
                fn identity(&self, prefixes: &[Prefix]) -> Identity {
                    Identity::Iri(self.resolve(prefixes))
                }
            }
        )*
    };
}

identified_by_name!(
    Class,
    Datatype,
    ObjectProperty,
    DataProperty,
    crate::entity::AnnotationProperty,
    crate::entity::NamedIndividual
);

impl Identified for Individual {
    fn identity(&self, prefixes: &[Prefix]) -> Identity {
        match self {
            Self::Named(i) => i.identity(prefixes),
            Self::Anonymous(i) => Identity::Anonymous(i.node_id().to_owned()),
        }
    }
}

impl Identified for crate::entity::Entity {
    fn identity(&self, prefixes: &[Prefix]) -> Identity {
        Identity::Structural(crate::owlxml::canonical_entity(self, prefixes))
    }
}

impl Identified for ClassExpression {
    fn identity(&self, prefixes: &[Prefix]) -> Identity {
        match self {
            Self::Class(c) => c.identity(prefixes),
            _ => Identity::Structural(crate::owlxml::canonical_class_expression(self, prefixes)),
        }
    }
}

impl Identified for ObjectPropertyExpression {
    fn identity(&self, prefixes: &[Prefix]) -> Identity {
        match self {
            Self::ObjectProperty(p) => p.identity(prefixes),
            Self::ObjectInverseOf(_) => Identity::Structural(
                crate::owlxml::canonical_object_property_expression(self, prefixes),
            ),
        }
    }
}

impl Identified for DataRange {
    fn identity(&self, prefixes: &[Prefix]) -> Identity {
        match self {
            Self::Datatype(d) => d.identity(prefixes),
            _ => Identity::Structural(crate::owlxml::canonical_data_range(self, prefixes)),
        }
    }
}

/// Removes the items sharing an identity with an earlier item, keeping first-seen order.
///
/// Named terms are compared by resolved IRI, so `owl:Thing` and
/// `<http://www.w3.org/2002/07/owl#Thing>` collapse into one item.
pub fn deduplicate<T: Identified>(items: impl IntoIterator<Item = T>, prefixes: &[Prefix]) -> Vec<T> {
    let mut seen = FxHashSet::default();
    items
        .into_iter()
        .filter(|item| seen.insert(item.identity(prefixes)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::NamedIndividual;
    use crate::iri::EntityName;

    fn class(local: &str) -> ClassExpression {
        ClassExpression::class(NamedNode::new_unchecked(format!("http://example.org/{local}")))
    }

    #[test]
    fn nary_constructors_enforce_their_minimum() {
        assert!(ClassExpression::object_intersection_of(vec![class("A")]).is_err());
        assert!(ClassExpression::object_union_of(vec![]).is_err());
        assert!(ClassExpression::object_one_of(vec![]).is_err());
        assert!(DataRange::data_one_of(vec![]).is_err());
        let err = ClassExpression::object_union_of(vec![class("A")]).unwrap_err();
        assert_eq!(err.type_name(), "ObjectUnionOf");
        assert_eq!(err.parameter(), "classExpressions");
        assert!(ClassExpression::object_union_of(vec![class("A"), class("B")]).is_ok());
    }

    #[test]
    fn functional_syntax_rendering() {
        let expression = ClassExpression::ObjectMinCardinality {
            cardinality: 2,
            property: ObjectPropertyExpression::ObjectInverseOf(ObjectProperty::new(
                NamedNode::new_unchecked("http://example.org/p"),
            )),
            filler: Some(Box::new(class("A"))),
        };
        assert_eq!(
            expression.to_string(),
            "ObjectMinCardinality(2 ObjectInverseOf(<http://example.org/p>) <http://example.org/A>)"
        );
    }

    #[test]
    fn deduplication_uses_resolved_iris_and_keeps_order() {
        let abbreviated = ClassExpression::class(EntityName::abbreviated("owl", "Thing").unwrap());
        let full = ClassExpression::class(Class::thing());
        let items = vec![class("B"), abbreviated.clone(), class("A"), full, class("B")];
        let once = deduplicate(items.clone(), &[]);
        assert_eq!(once, vec![class("B"), abbreviated, class("A")]);
        assert!(once.len() <= items.len());
        assert_eq!(deduplicate(once.clone(), &[]), once);
    }

    #[test]
    fn composite_expressions_deduplicate_on_resolved_names() {
        let prefixes = [Prefix::new("ex", "http://example.org/").unwrap()];
        let abbreviated =
            |local: &str| ClassExpression::class(EntityName::abbreviated("ex", local).unwrap());
        let union = |a: ClassExpression, b: ClassExpression| {
            ClassExpression::object_union_of(vec![a, b]).unwrap()
        };
        let some = |property: EntityName, filler: ClassExpression| {
            ClassExpression::ObjectSomeValuesFrom {
                property: ObjectProperty::new(property).into(),
                filler: Box::new(filler),
            }
        };
        let p = || EntityName::abbreviated("ex", "p").unwrap();
        let full_p = || EntityName::from(NamedNode::new_unchecked("http://example.org/p"));
        let items = vec![
            union(abbreviated("A"), abbreviated("B")),
            some(p(), class("A")),
            union(class("A"), class("B")),
            union(class("B"), class("A")),
            some(full_p(), abbreviated("A")),
            union(abbreviated("A"), abbreviated("B")),
        ];
        let once = deduplicate(items.clone(), &prefixes);
        assert_eq!(once, vec![items[0].clone(), items[1].clone(), items[3].clone()]);
        assert!(once.len() <= items.len());
        assert_eq!(deduplicate(once.clone(), &prefixes), once);

        // Unknown prefixes are kept as written, so nothing collapses.
        assert_eq!(deduplicate(items.clone(), &[]).len(), 5);
    }

    #[test]
    fn data_ranges_deduplicate_on_resolved_names() {
        let abbreviated = |local: &str| {
            DataRange::Datatype(Datatype::new(EntityName::abbreviated("xsd", local).unwrap()))
        };
        let full = |local: &str| {
            DataRange::Datatype(Datatype::new(NamedNode::new_unchecked(format!(
                "http://www.w3.org/2001/XMLSchema#{local}"
            ))))
        };
        let items = vec![
            DataRange::data_union_of(vec![abbreviated("integer"), abbreviated("string")]).unwrap(),
            DataRange::data_union_of(vec![full("integer"), full("string")]).unwrap(),
            DataRange::data_complement_of(full("integer")),
            DataRange::data_complement_of(abbreviated("integer")),
        ];
        let once = deduplicate(items.clone(), &[]);
        assert_eq!(once, vec![items[0].clone(), items[2].clone()]);
        assert_eq!(deduplicate(once.clone(), &[]), once);
    }

    #[test]
    fn anonymous_individuals_are_kept_apart_from_named_ones() {
        let named = Individual::Named(NamedIndividual::new(NamedNode::new_unchecked(
            "http://example.org/a",
        )));
        let anonymous =
            Individual::Anonymous(crate::entity::AnonymousIndividual::new("a").unwrap());
        assert_eq!(deduplicate(vec![named, anonymous], &[]).len(), 2);
    }
}
