use super::OwlXmlConfig;
use super::tree::Element;
use crate::annotation::{Annotation, AnnotationSubject, AnnotationValue};
use crate::axiom::{AnnotatedAxiom, Axiom, AxiomCategory};
use crate::entity::{
    AnnotationProperty, AnonymousIndividual, Class, DataProperty, Datatype, Entity, Individual,
    NamedIndividual, ObjectProperty,
};
use crate::error::OwlXmlError;
use crate::expression::{ClassExpression, DataRange, ObjectPropertyExpression, StructuralKey};
use crate::iri::{EntityName, Prefix, STANDARD_PREFIXES};
use crate::literal::OwlLiteral;
use crate::ontology::Ontology;
use crate::vocab::owl;

/// Writes ontologies, axioms and expressions as OWL/XML.
///
/// ```
/// use oxontology::{ClassExpression, DataProperty, OwlXmlConfig, OwlXmlWriter};
///
/// let expression = ClassExpression::DataMaxCardinality {
///     cardinality: 1,
///     property: DataProperty::from_iri("http://purl.org/dc/elements/1.1/description")?,
///     filler: None,
/// };
/// assert_eq!(
///     OwlXmlWriter::new(OwlXmlConfig::compact()).class_expression(&expression)?,
///     "<DataMaxCardinality cardinality=\"1\"><DataProperty IRI=\"http://purl.org/dc/elements/1.1/description\" /></DataMaxCardinality>"
/// );
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct OwlXmlWriter {
    config: OwlXmlConfig,
}

impl OwlXmlWriter {
    pub fn new(config: OwlXmlConfig) -> Self {
        Self { config }
    }

    /// Writes a complete `<Ontology>` document.
    pub fn ontology(&self, ontology: &Ontology) -> Result<String, OwlXmlError> {
        let mut out = String::new();
        if self.config.xml_declaration {
            out.push_str("<?xml version=\"1.0\"?>\n");
        }
        out.push_str(&encode_ontology(ontology).render(self.config.indent)?);
        out.push('\n');
        Ok(out)
    }

    /// Writes one axiom with its annotations.
    ///
    /// Literal datatypes are resolved against `prefixes`.
    pub fn axiom(
        &self,
        axiom: &AnnotatedAxiom,
        prefixes: &[Prefix],
    ) -> Result<String, OwlXmlError> {
        self.render(&Encoder::new(prefixes).axiom(axiom))
    }

    pub fn class_expression(&self, expression: &ClassExpression) -> Result<String, OwlXmlError> {
        self.render(&Encoder::new(&[]).class_expression(expression))
    }

    pub fn data_range(&self, range: &DataRange) -> Result<String, OwlXmlError> {
        self.render(&Encoder::new(&[]).data_range(range))
    }

    fn render(&self, element: &Element) -> Result<String, OwlXmlError> {
        element.render(self.config.indent)
    }
}

fn encode_ontology(ontology: &Ontology) -> Element {
    let encoder = Encoder::new(ontology.prefixes());
    let mut root = Element::new("Ontology").attribute("xmlns", owl::NAMESPACE);
    if let Some(iri) = ontology.iri() {
        root = root.attribute("ontologyIRI", iri.as_str());
    }
    if let Some(version_iri) = ontology.version_iri() {
        root = root.attribute("versionIRI", version_iri.as_str());
    }

    let standard: Vec<Prefix> = STANDARD_PREFIXES
        .iter()
        .filter_map(|name| Prefix::well_known(name))
        .collect();
    for prefix in standard
        .iter()
        .chain(ontology.prefixes().iter().filter(|p| !standard.contains(p)))
    {
        root = root.child(
            Element::new("Prefix")
                .attribute("name", prefix.name())
                .attribute("IRI", prefix.iri().as_str()),
        );
    }
    for import in ontology.imports() {
        root = root.child(Element::new("Import").text(import.as_str()));
    }
    for annotation in ontology.annotations() {
        root = root.child(encoder.annotation(annotation));
    }
    for category in AxiomCategory::ALL {
        root = root.children(ontology.axioms_of(category).iter().map(|a| encoder.axiom(a)));
    }
    root
}

/// The structure of an axiom with every name written as a full IRI.
///
/// Two axioms share a key exactly when they are structurally equal after resolving
/// their names against `prefixes`.
pub(crate) fn canonical_axiom(axiom: &AnnotatedAxiom, prefixes: &[Prefix]) -> StructuralKey {
    StructuralKey(Encoder::expanding(prefixes).axiom(axiom))
}

pub(crate) fn canonical_axiom_body(axiom: &Axiom, prefixes: &[Prefix]) -> StructuralKey {
    let element = Element::new(axiom.element_name());
    StructuralKey(Encoder::expanding(prefixes).axiom_arguments(axiom, element))
}

pub(crate) fn canonical_class_expression(
    expression: &ClassExpression,
    prefixes: &[Prefix],
) -> StructuralKey {
    StructuralKey(Encoder::expanding(prefixes).class_expression(expression))
}

pub(crate) fn canonical_data_range(range: &DataRange, prefixes: &[Prefix]) -> StructuralKey {
    StructuralKey(Encoder::expanding(prefixes).data_range(range))
}

pub(crate) fn canonical_object_property_expression(
    property: &ObjectPropertyExpression,
    prefixes: &[Prefix],
) -> StructuralKey {
    StructuralKey(Encoder::expanding(prefixes).object_property_expression(property))
}

pub(crate) fn canonical_entity(entity: &Entity, prefixes: &[Prefix]) -> StructuralKey {
    StructuralKey(Encoder::expanding(prefixes).entity_element(entity))
}

/// Maps model values to elements. Each family has exactly one match.
struct Encoder<'a> {
    prefixes: &'a [Prefix],
    /// Writes abbreviated names as full IRIs.
    expand_names: bool,
}

impl<'a> Encoder<'a> {
    fn new(prefixes: &'a [Prefix]) -> Self {
        Self {
            prefixes,
            expand_names: false,
        }
    }

    fn expanding(prefixes: &'a [Prefix]) -> Self {
        Self {
            prefixes,
            expand_names: true,
        }
    }

    fn axiom(&self, axiom: &AnnotatedAxiom) -> Element {
        let element = Element::new(axiom.axiom().element_name())
            .children(axiom.annotations().iter().map(|a| self.annotation(a)));
        self.axiom_arguments(axiom.axiom(), element)
    }

    fn axiom_arguments(&self, axiom: &Axiom, element: Element) -> Element {
        match axiom {
            Axiom::Declaration(entity) => element.child(self.entity_element(entity)),
            Axiom::SubClassOf {
                sub_class,
                super_class,
            } => element
                .child(self.class_expression(sub_class))
                .child(self.class_expression(super_class)),
            Axiom::EquivalentClasses(classes) | Axiom::DisjointClasses(classes) => {
                element.children(classes.iter().map(|c| self.class_expression(c)))
            }
            Axiom::DisjointUnion {
                class,
                disjoint_classes,
            } => element
                .child(self.named(Class::ELEMENT, class.name()))
                .children(disjoint_classes.iter().map(|c| self.class_expression(c))),
            Axiom::SubObjectPropertyOf {
                sub_property,
                super_property,
            } => element
                .child(self.object_property_expression(sub_property))
                .child(self.object_property_expression(super_property)),
            Axiom::SubObjectPropertyChainOf {
                chain,
                super_property,
            } => element
                .child(
                    Element::new("ObjectPropertyChain")
                        .children(chain.iter().map(|p| self.object_property_expression(p))),
                )
                .child(self.object_property_expression(super_property)),
            Axiom::EquivalentObjectProperties(properties)
            | Axiom::DisjointObjectProperties(properties) => {
                element.children(properties.iter().map(|p| self.object_property_expression(p)))
            }
            Axiom::InverseObjectProperties(first, second) => element
                .child(self.object_property_expression(first))
                .child(self.object_property_expression(second)),
            Axiom::ObjectPropertyDomain {
                property,
                domain: class,
            }
            | Axiom::ObjectPropertyRange {
                property,
                range: class,
            } => element
                .child(self.object_property_expression(property))
                .child(self.class_expression(class)),
            Axiom::FunctionalObjectProperty(property)
            | Axiom::InverseFunctionalObjectProperty(property)
            | Axiom::ReflexiveObjectProperty(property)
            | Axiom::IrreflexiveObjectProperty(property)
            | Axiom::SymmetricObjectProperty(property)
            | Axiom::AsymmetricObjectProperty(property)
            | Axiom::TransitiveObjectProperty(property) => {
                element.child(self.object_property_expression(property))
            }
            Axiom::SubDataPropertyOf {
                sub_property,
                super_property,
            } => element
                .child(self.data_property(sub_property))
                .child(self.data_property(super_property)),
            Axiom::EquivalentDataProperties(properties)
            | Axiom::DisjointDataProperties(properties) => {
                element.children(properties.iter().map(|p| self.data_property(p)))
            }
            Axiom::DataPropertyDomain { property, domain } => element
                .child(self.data_property(property))
                .child(self.class_expression(domain)),
            Axiom::DataPropertyRange { property, range } => element
                .child(self.data_property(property))
                .child(self.data_range(range)),
            Axiom::FunctionalDataProperty(property) => element.child(self.data_property(property)),
            Axiom::DatatypeDefinition { datatype, range } => element
                .child(self.named(Datatype::ELEMENT, datatype.name()))
                .child(self.data_range(range)),
            Axiom::HasKey(key) => element
                .child(self.class_expression(key.class()))
                .children(key.object_properties().iter().map(|p| self.object_property_expression(p)))
                .children(key.data_properties().iter().map(|p| self.data_property(p))),
            Axiom::SameIndividual(individuals) | Axiom::DifferentIndividuals(individuals) => {
                element.children(individuals.iter().map(|i| self.individual(i)))
            }
            Axiom::ClassAssertion {
                class,
                individual: member,
            } => element
                .child(self.class_expression(class))
                .child(self.individual(member)),
            Axiom::ObjectPropertyAssertion {
                property,
                source,
                target,
            }
            | Axiom::NegativeObjectPropertyAssertion {
                property,
                source,
                target,
            } => element
                .child(self.object_property_expression(property))
                .child(self.individual(source))
                .child(self.individual(target)),
            Axiom::DataPropertyAssertion {
                property,
                source,
                target,
            }
            | Axiom::NegativeDataPropertyAssertion {
                property,
                source,
                target,
            } => element
                .child(self.data_property(property))
                .child(self.individual(source))
                .child(self.literal(target)),
            Axiom::AnnotationAssertion {
                property,
                subject,
                value,
            } => element
                .child(self.annotation_property(property))
                .child(self.annotation_subject(subject))
                .child(self.annotation_value(value)),
            Axiom::SubAnnotationPropertyOf {
                sub_property,
                super_property,
            } => element
                .child(self.annotation_property(sub_property))
                .child(self.annotation_property(super_property)),
            Axiom::AnnotationPropertyDomain {
                property,
                domain: iri,
            }
            | Axiom::AnnotationPropertyRange {
                property,
                range: iri,
            } => element
                .child(self.annotation_property(property))
                .child(self.iri_element(iri)),
        }
    }

    fn class_expression(&self, expression: &ClassExpression) -> Element {
        let element = Element::new(expression.element_name());
        match expression {
            ClassExpression::Class(class) => self.named(Class::ELEMENT, class.name()),
            ClassExpression::ObjectIntersectionOf(operands)
            | ClassExpression::ObjectUnionOf(operands) => {
                element.children(operands.iter().map(|c| self.class_expression(c)))
            }
            ClassExpression::ObjectComplementOf(operand) => {
                element.child(self.class_expression(operand))
            }
            ClassExpression::ObjectOneOf(individuals) => {
                element.children(individuals.iter().map(|i| self.individual(i)))
            }
            ClassExpression::ObjectSomeValuesFrom { property, filler }
            | ClassExpression::ObjectAllValuesFrom { property, filler } => element
                .child(self.object_property_expression(property))
                .child(self.class_expression(filler)),
            ClassExpression::ObjectHasValue {
                property,
                individual: value,
            } => element
                .child(self.object_property_expression(property))
                .child(self.individual(value)),
            ClassExpression::ObjectHasSelf(property) => {
                element.child(self.object_property_expression(property))
            }
            ClassExpression::ObjectMinCardinality {
                cardinality,
                property,
                filler,
            }
            | ClassExpression::ObjectMaxCardinality {
                cardinality,
                property,
                filler,
            }
            | ClassExpression::ObjectExactCardinality {
                cardinality,
                property,
                filler,
            } => element
                .attribute("cardinality", cardinality.to_string())
                .child(self.object_property_expression(property))
                .children(filler.as_deref().map(|c| self.class_expression(c))),
            ClassExpression::DataSomeValuesFrom { property, filler }
            | ClassExpression::DataAllValuesFrom { property, filler } => element
                .child(self.data_property(property))
                .child(self.data_range(filler)),
            ClassExpression::DataHasValue { property, value } => element
                .child(self.data_property(property))
                .child(self.literal(value)),
            ClassExpression::DataMinCardinality {
                cardinality,
                property,
                filler,
            }
            | ClassExpression::DataMaxCardinality {
                cardinality,
                property,
                filler,
            }
            | ClassExpression::DataExactCardinality {
                cardinality,
                property,
                filler,
            } => element
                .attribute("cardinality", cardinality.to_string())
                .child(self.data_property(property))
                .children(filler.as_ref().map(|d| self.data_range(d))),
        }
    }

    fn data_range(&self, range: &DataRange) -> Element {
        let element = Element::new(range.element_name());
        match range {
            DataRange::Datatype(datatype) => self.named(Datatype::ELEMENT, datatype.name()),
            DataRange::DataIntersectionOf(operands) | DataRange::DataUnionOf(operands) => {
                element.children(operands.iter().map(|d| self.data_range(d)))
            }
            DataRange::DataComplementOf(operand) => element.child(self.data_range(operand)),
            DataRange::DataOneOf(literals) => {
                element.children(literals.iter().map(|l| self.literal(l)))
            }
            DataRange::DatatypeRestriction {
                datatype,
                restrictions,
            } => element
                .child(self.named(Datatype::ELEMENT, datatype.name()))
                .children(restrictions.iter().map(|r| {
                    Element::new("FacetRestriction")
                        .attribute("facet", r.facet.as_str())
                        .child(self.literal(&r.value))
                })),
        }
    }

    fn literal(&self, literal: &OwlLiteral) -> Element {
        let element = Element::new("Literal");
        let element = match (literal.language(), literal.datatype()) {
            (Some(language), _) => element.attribute("xml:lang", language),
            (None, Some(datatype)) => {
                element.attribute("datatypeIRI", datatype.resolve(self.prefixes).into_string())
            }
            (None, None) => element,
        };
        element.text(literal.value())
    }

    fn annotation(&self, annotation: &Annotation) -> Element {
        Element::new("Annotation")
            .children(annotation.annotations().iter().map(|a| self.annotation(a)))
            .child(self.annotation_property(annotation.property()))
            .child(self.annotation_value(annotation.value()))
    }

    fn annotation_value(&self, value: &AnnotationValue) -> Element {
        match value {
            AnnotationValue::Iri(iri) => self.iri_element(iri),
            AnnotationValue::Literal(literal) => self.literal(literal),
            AnnotationValue::Anonymous(individual) => anonymous_individual(individual),
        }
    }

    /// An entity element carrying either `IRI` or `abbreviatedIRI`.
    fn named(&self, element: &'static str, name: &EntityName) -> Element {
        match name {
            EntityName::Abbreviated(abbreviated) if !self.expand_names => {
                Element::new(element).attribute("abbreviatedIRI", abbreviated.to_string())
            }
            _ => Element::new(element).attribute("IRI", name.resolve(self.prefixes).into_string()),
        }
    }

    /// A bare IRI, as `<IRI>` or `<AbbreviatedIRI>` text content.
    fn iri_element(&self, name: &EntityName) -> Element {
        match name {
            EntityName::Abbreviated(abbreviated) if !self.expand_names => {
                Element::new("AbbreviatedIRI").text(abbreviated.to_string())
            }
            _ => Element::new("IRI").text(name.resolve(self.prefixes).into_string()),
        }
    }

    fn entity_element(&self, entity: &Entity) -> Element {
        self.named(entity.kind().element_name(), entity.name())
    }

    fn object_property_expression(&self, property: &ObjectPropertyExpression) -> Element {
        match property {
            ObjectPropertyExpression::ObjectProperty(p) => {
                self.named(ObjectProperty::ELEMENT, p.name())
            }
            ObjectPropertyExpression::ObjectInverseOf(p) => Element::new("ObjectInverseOf")
                .child(self.named(ObjectProperty::ELEMENT, p.name())),
        }
    }

    fn data_property(&self, property: &DataProperty) -> Element {
        self.named(DataProperty::ELEMENT, property.name())
    }

    fn annotation_property(&self, property: &AnnotationProperty) -> Element {
        self.named(AnnotationProperty::ELEMENT, property.name())
    }

    fn individual(&self, individual: &Individual) -> Element {
        match individual {
            Individual::Named(i) => self.named(NamedIndividual::ELEMENT, i.name()),
            Individual::Anonymous(i) => anonymous_individual(i),
        }
    }

    fn annotation_subject(&self, subject: &AnnotationSubject) -> Element {
        match subject {
            AnnotationSubject::Iri(iri) => self.iri_element(iri),
            AnnotationSubject::Anonymous(individual) => anonymous_individual(individual),
        }
    }
}

fn anonymous_individual(individual: &AnonymousIndividual) -> Element {
    Element::new(AnonymousIndividual::ELEMENT).attribute("nodeID", individual.to_string())
}
