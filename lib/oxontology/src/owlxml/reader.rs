use super::tree::Element;
use crate::annotation::{Annotation, AnnotationSubject, AnnotationValue};
use crate::axiom::{AnnotatedAxiom, Axiom, HasKey};
use crate::entity::{
    AnnotationProperty, AnonymousIndividual, Class, DataProperty, Datatype, Entity, EntityKind,
    Individual, NamedIndividual, ObjectProperty,
};
use crate::error::OwlXmlError;
use crate::expression::{ClassExpression, DataRange, FacetRestriction, ObjectPropertyExpression};
use crate::iri::{AbbreviatedIri, EntityName, Prefix, STANDARD_PREFIXES};
use crate::literal::OwlLiteral;
use crate::ontology::Ontology;
use crate::vocab::xsd;
use oxrdf::NamedNode;

/// Reads OWL/XML documents and fragments.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwlXmlReader;

impl OwlXmlReader {
    pub fn new() -> Self {
        Self
    }

    /// Reads a complete `<Ontology>` document.
    ///
    /// The standard prefixes written at the top of every document are not added
    /// to the ontology prefix list.
    pub fn ontology(&self, input: &str) -> Result<Ontology, OwlXmlError> {
        decode_ontology(&Element::parse(input)?)
    }

    /// Reads a single axiom element.
    pub fn axiom(&self, input: &str) -> Result<AnnotatedAxiom, OwlXmlError> {
        axiom(&Element::parse(input)?)
    }

    pub fn class_expression(&self, input: &str) -> Result<ClassExpression, OwlXmlError> {
        class_expression(&Element::parse(input)?)
    }

    pub fn data_range(&self, input: &str) -> Result<DataRange, OwlXmlError> {
        data_range(&Element::parse(input)?)
    }
}

fn decode_ontology(root: &Element) -> Result<Ontology, OwlXmlError> {
    if root.name != "Ontology" {
        return Err(OwlXmlError::unexpected(&root.name, "Ontology"));
    }
    let mut ontology = Ontology::new(iri_attribute(root, "ontologyIRI")?);
    ontology.set_version_iri(iri_attribute(root, "versionIRI")?);
    for child in &root.children {
        match child.name.as_str() {
            "Prefix" => {
                let name = child.require("name")?;
                let iri = child.require("IRI")?;
                let prefix = Prefix::new(name, iri)?;
                let standard = STANDARD_PREFIXES.contains(&name)
                    && Prefix::well_known(name).as_ref() == Some(&prefix);
                if !standard {
                    ontology.add_prefix(prefix);
                }
            }
            "Import" => {
                let iri = child.trimmed_text();
                ontology.add_import(
                    NamedNode::new(iri)
                        .map_err(|_| OwlXmlError::invalid_attribute("Import", "IRI", iri))?,
                );
            }
            "Annotation" => ontology.add_annotation(annotation(child)?),
            _ => ontology.add_axiom(axiom(child)?),
        }
    }
    Ok(ontology)
}

fn iri_attribute(
    element: &Element,
    attribute: &'static str,
) -> Result<Option<NamedNode>, OwlXmlError> {
    element
        .get(attribute)
        .map(|value| {
            NamedNode::new(value)
                .map_err(|_| OwlXmlError::invalid_attribute(&element.name, attribute, value))
        })
        .transpose()
}

/// Splits the leading `<Annotation>` children of an axiom from its arguments.
fn split_annotations(element: &Element) -> Result<(Vec<Annotation>, &[Element]), OwlXmlError> {
    let count = element
        .children
        .iter()
        .take_while(|c| c.name == "Annotation")
        .count();
    let (annotations, arguments) = element.children.split_at(count);
    Ok((
        annotations.iter().map(annotation).collect::<Result<_, _>>()?,
        arguments,
    ))
}

/// Checks the argument count of an element.
fn arity<'a, const N: usize>(
    element: &Element,
    arguments: &'a [Element],
) -> Result<&'a [Element; N], OwlXmlError> {
    arguments.try_into().map_err(|_| {
        OwlXmlError::malformed(format!(
            "<{}> expects {N} argument(s), found {}",
            element.name,
            arguments.len()
        ))
    })
}

fn axiom(element: &Element) -> Result<AnnotatedAxiom, OwlXmlError> {
    let (annotations, args) = split_annotations(element)?;
    let axiom = match element.name.as_str() {
        "Declaration" => {
            let [entity] = arity::<1>(element, args)?;
            Axiom::Declaration(decode_entity(entity)?)
        }
        "SubClassOf" => {
            let [sub, sup] = arity::<2>(element, args)?;
            Axiom::sub_class_of(class_expression(sub)?, class_expression(sup)?)
        }
        "EquivalentClasses" => Axiom::equivalent_classes(class_expressions(args)?)?,
        "DisjointClasses" => Axiom::disjoint_classes(class_expressions(args)?)?,
        "DisjointUnion" => {
            let Some((class, operands)) = args.split_first() else {
                return Err(OwlXmlError::malformed("<DisjointUnion> has no class"));
            };
            Axiom::disjoint_union(decode_class(class)?, class_expressions(operands)?)?
        }
        "SubObjectPropertyOf" => {
            let [sub, sup] = arity::<2>(element, args)?;
            let super_property = object_property_expression(sup)?;
            if sub.name == "ObjectPropertyChain" {
                Axiom::sub_object_property_chain_of(
                    sub.children
                        .iter()
                        .map(object_property_expression)
                        .collect::<Result<_, _>>()?,
                    super_property,
                )?
            } else {
                Axiom::SubObjectPropertyOf {
                    sub_property: object_property_expression(sub)?,
                    super_property,
                }
            }
        }
        "EquivalentObjectProperties" => {
            Axiom::equivalent_object_properties(object_property_expressions(args)?)?
        }
        "DisjointObjectProperties" => {
            Axiom::disjoint_object_properties(object_property_expressions(args)?)?
        }
        "InverseObjectProperties" => {
            let [first, second] = arity::<2>(element, args)?;
            Axiom::InverseObjectProperties(
                object_property_expression(first)?,
                object_property_expression(second)?,
            )
        }
        "ObjectPropertyDomain" => {
            let [property, domain] = arity::<2>(element, args)?;
            Axiom::ObjectPropertyDomain {
                property: object_property_expression(property)?,
                domain: class_expression(domain)?,
            }
        }
        "ObjectPropertyRange" => {
            let [property, range] = arity::<2>(element, args)?;
            Axiom::ObjectPropertyRange {
                property: object_property_expression(property)?,
                range: class_expression(range)?,
            }
        }
        name @ ("FunctionalObjectProperty"
        | "InverseFunctionalObjectProperty"
        | "ReflexiveObjectProperty"
        | "IrreflexiveObjectProperty"
        | "SymmetricObjectProperty"
        | "AsymmetricObjectProperty"
        | "TransitiveObjectProperty") => {
            let [property] = arity::<1>(element, args)?;
            let property = object_property_expression(property)?;
            match name {
                "FunctionalObjectProperty" => Axiom::FunctionalObjectProperty(property),
                "InverseFunctionalObjectProperty" => {
                    Axiom::InverseFunctionalObjectProperty(property)
                }
                "ReflexiveObjectProperty" => Axiom::ReflexiveObjectProperty(property),
                "IrreflexiveObjectProperty" => Axiom::IrreflexiveObjectProperty(property),
                "SymmetricObjectProperty" => Axiom::SymmetricObjectProperty(property),
                "AsymmetricObjectProperty" => Axiom::AsymmetricObjectProperty(property),
                _ => Axiom::TransitiveObjectProperty(property),
            }
        }
        "SubDataPropertyOf" => {
            let [sub, sup] = arity::<2>(element, args)?;
            Axiom::SubDataPropertyOf {
                sub_property: decode_data_property(sub)?,
                super_property: decode_data_property(sup)?,
            }
        }
        "EquivalentDataProperties" => Axiom::equivalent_data_properties(data_properties(args)?)?,
        "DisjointDataProperties" => Axiom::disjoint_data_properties(data_properties(args)?)?,
        "DataPropertyDomain" => {
            let [property, domain] = arity::<2>(element, args)?;
            Axiom::DataPropertyDomain {
                property: decode_data_property(property)?,
                domain: class_expression(domain)?,
            }
        }
        "DataPropertyRange" => {
            let [property, range] = arity::<2>(element, args)?;
            Axiom::DataPropertyRange {
                property: decode_data_property(property)?,
                range: data_range(range)?,
            }
        }
        "FunctionalDataProperty" => {
            let [property] = arity::<1>(element, args)?;
            Axiom::FunctionalDataProperty(decode_data_property(property)?)
        }
        "DatatypeDefinition" => {
            let [datatype, range] = arity::<2>(element, args)?;
            Axiom::DatatypeDefinition {
                datatype: decode_datatype(datatype)?,
                range: data_range(range)?,
            }
        }
        "HasKey" => {
            let Some((class, properties)) = args.split_first() else {
                return Err(OwlXmlError::malformed("<HasKey> has no class expression"));
            };
            let mut object_properties = Vec::new();
            let mut data_properties = Vec::new();
            for property in properties {
                if property.name == DataProperty::ELEMENT {
                    data_properties.push(decode_data_property(property)?);
                } else {
                    object_properties.push(object_property_expression(property)?);
                }
            }
            Axiom::HasKey(HasKey::new(
                class_expression(class)?,
                object_properties,
                data_properties,
            )?)
        }
        "SameIndividual" => Axiom::same_individual(individuals(args)?)?,
        "DifferentIndividuals" => Axiom::different_individuals(individuals(args)?)?,
        "ClassAssertion" => {
            let [class, member] = arity::<2>(element, args)?;
            Axiom::class_assertion(class_expression(class)?, individual(member)?)
        }
        "ObjectPropertyAssertion" | "NegativeObjectPropertyAssertion" => {
            let [property, source, target] = arity::<3>(element, args)?;
            let property = object_property_expression(property)?;
            let source = individual(source)?;
            let target = individual(target)?;
            if element.name == "ObjectPropertyAssertion" {
                Axiom::ObjectPropertyAssertion {
                    property,
                    source,
                    target,
                }
            } else {
                Axiom::NegativeObjectPropertyAssertion {
                    property,
                    source,
                    target,
                }
            }
        }
        "DataPropertyAssertion" | "NegativeDataPropertyAssertion" => {
            let [property, source, target] = arity::<3>(element, args)?;
            let property = decode_data_property(property)?;
            let source = individual(source)?;
            let target = literal(target)?;
            if element.name == "DataPropertyAssertion" {
                Axiom::DataPropertyAssertion {
                    property,
                    source,
                    target,
                }
            } else {
                Axiom::NegativeDataPropertyAssertion {
                    property,
                    source,
                    target,
                }
            }
        }
        "AnnotationAssertion" => {
            let [property, subject, value] = arity::<3>(element, args)?;
            Axiom::AnnotationAssertion {
                property: decode_annotation_property(property)?,
                subject: annotation_subject(subject)?,
                value: annotation_value(value)?,
            }
        }
        "SubAnnotationPropertyOf" => {
            let [sub, sup] = arity::<2>(element, args)?;
            Axiom::SubAnnotationPropertyOf {
                sub_property: decode_annotation_property(sub)?,
                super_property: decode_annotation_property(sup)?,
            }
        }
        "AnnotationPropertyDomain" => {
            let [property, iri] = arity::<2>(element, args)?;
            Axiom::AnnotationPropertyDomain {
                property: decode_annotation_property(property)?,
                domain: iri_element(iri)?,
            }
        }
        "AnnotationPropertyRange" => {
            let [property, iri] = arity::<2>(element, args)?;
            Axiom::AnnotationPropertyRange {
                property: decode_annotation_property(property)?,
                range: iri_element(iri)?,
            }
        }
        _ => return Err(OwlXmlError::unexpected(&element.name, "an axiom")),
    };
    Ok(AnnotatedAxiom::new(axiom, annotations))
}

fn class_expression(element: &Element) -> Result<ClassExpression, OwlXmlError> {
    let children = element.children.as_slice();
    Ok(match element.name.as_str() {
        "Class" => ClassExpression::Class(decode_class(element)?),
        "ObjectIntersectionOf" => {
            ClassExpression::object_intersection_of(class_expressions(children)?)?
        }
        "ObjectUnionOf" => ClassExpression::object_union_of(class_expressions(children)?)?,
        "ObjectComplementOf" => {
            let [operand] = arity::<1>(element, children)?;
            ClassExpression::object_complement_of(class_expression(operand)?)
        }
        "ObjectOneOf" => ClassExpression::object_one_of(individuals(children)?)?,
        "ObjectSomeValuesFrom" => {
            let [property, filler] = arity::<2>(element, children)?;
            ClassExpression::object_some_values_from(
                object_property_expression(property)?,
                class_expression(filler)?,
            )
        }
        "ObjectAllValuesFrom" => {
            let [property, filler] = arity::<2>(element, children)?;
            ClassExpression::object_all_values_from(
                object_property_expression(property)?,
                class_expression(filler)?,
            )
        }
        "ObjectHasValue" => {
            let [property, value] = arity::<2>(element, children)?;
            ClassExpression::ObjectHasValue {
                property: object_property_expression(property)?,
                individual: individual(value)?,
            }
        }
        "ObjectHasSelf" => {
            let [property] = arity::<1>(element, children)?;
            ClassExpression::ObjectHasSelf(object_property_expression(property)?)
        }
        "ObjectMinCardinality" | "ObjectMaxCardinality" | "ObjectExactCardinality" => {
            let cardinality = cardinality(element)?;
            let (property, filler) = match children {
                [property] => (property, None),
                [property, filler] => (property, Some(Box::new(class_expression(filler)?))),
                _ => return Err(OwlXmlError::malformed(format!("<{}> expects 1 or 2 argument(s)", element.name))),
            };
            let property = object_property_expression(property)?;
            match element.name.as_str() {
                "ObjectMinCardinality" => ClassExpression::ObjectMinCardinality {
                    cardinality,
                    property,
                    filler,
                },
                "ObjectMaxCardinality" => ClassExpression::ObjectMaxCardinality {
                    cardinality,
                    property,
                    filler,
                },
                _ => ClassExpression::ObjectExactCardinality {
                    cardinality,
                    property,
                    filler,
                },
            }
        }
        "DataSomeValuesFrom" => {
            let [property, filler] = arity::<2>(element, children)?;
            ClassExpression::DataSomeValuesFrom {
                property: decode_data_property(property)?,
                filler: data_range(filler)?,
            }
        }
        "DataAllValuesFrom" => {
            let [property, filler] = arity::<2>(element, children)?;
            ClassExpression::DataAllValuesFrom {
                property: decode_data_property(property)?,
                filler: data_range(filler)?,
            }
        }
        "DataHasValue" => {
            let [property, value] = arity::<2>(element, children)?;
            ClassExpression::DataHasValue {
                property: decode_data_property(property)?,
                value: literal(value)?,
            }
        }
        "DataMinCardinality" | "DataMaxCardinality" | "DataExactCardinality" => {
            let cardinality = cardinality(element)?;
            let (property, filler) = match children {
                [property] => (property, None),
                [property, filler] => (property, Some(data_range(filler)?)),
                _ => return Err(OwlXmlError::malformed(format!("<{}> expects 1 or 2 argument(s)", element.name))),
            };
            let property = decode_data_property(property)?;
            match element.name.as_str() {
                "DataMinCardinality" => ClassExpression::DataMinCardinality {
                    cardinality,
                    property,
                    filler,
                },
                "DataMaxCardinality" => ClassExpression::DataMaxCardinality {
                    cardinality,
                    property,
                    filler,
                },
                _ => ClassExpression::DataExactCardinality {
                    cardinality,
                    property,
                    filler,
                },
            }
        }
        _ => return Err(OwlXmlError::unexpected(&element.name, "a class expression")),
    })
}

fn data_range(element: &Element) -> Result<DataRange, OwlXmlError> {
    let children = element.children.as_slice();
    Ok(match element.name.as_str() {
        "Datatype" => DataRange::Datatype(decode_datatype(element)?),
        "DataIntersectionOf" => DataRange::data_intersection_of(data_ranges(children)?)?,
        "DataUnionOf" => DataRange::data_union_of(data_ranges(children)?)?,
        "DataComplementOf" => {
            let [operand] = arity::<1>(element, children)?;
            DataRange::data_complement_of(data_range(operand)?)
        }
        "DataOneOf" => DataRange::data_one_of(children.iter().map(literal).collect::<Result<_, _>>()?)?,
        "DatatypeRestriction" => {
            let Some((datatype, restrictions)) = children.split_first() else {
                return Err(OwlXmlError::malformed("<DatatypeRestriction> has no datatype"));
            };
            DataRange::datatype_restriction(
                decode_datatype(datatype)?,
                restrictions
                    .iter()
                    .map(facet_restriction)
                    .collect::<Result<_, _>>()?,
            )?
        }
        _ => return Err(OwlXmlError::unexpected(&element.name, "a data range")),
    })
}

fn facet_restriction(element: &Element) -> Result<FacetRestriction, OwlXmlError> {
    expect(element, "FacetRestriction")?;
    let facet = element.require("facet")?;
    let facet = NamedNode::new(facet)
        .map_err(|_| OwlXmlError::invalid_attribute("FacetRestriction", "facet", facet))?;
    let [value] = arity::<1>(element, &element.children)?;
    Ok(FacetRestriction {
        facet,
        value: literal(value)?,
    })
}

fn object_property_expression(element: &Element) -> Result<ObjectPropertyExpression, OwlXmlError> {
    match element.name.as_str() {
        "ObjectProperty" => Ok(ObjectPropertyExpression::ObjectProperty(ObjectProperty::new(
            entity_name(element)?,
        ))),
        "ObjectInverseOf" => {
            let [property] = arity::<1>(element, &element.children)?;
            expect(property, ObjectProperty::ELEMENT)?;
            Ok(ObjectPropertyExpression::ObjectInverseOf(ObjectProperty::new(
                entity_name(property)?,
            )))
        }
        _ => Err(OwlXmlError::unexpected(
            &element.name,
            "an object property expression",
        )),
    }
}

fn individual(element: &Element) -> Result<Individual, OwlXmlError> {
    match element.name.as_str() {
        "NamedIndividual" => Ok(NamedIndividual::new(entity_name(element)?).into()),
        "AnonymousIndividual" => Ok(anonymous_individual(element)?.into()),
        _ => Err(OwlXmlError::unexpected(&element.name, "an individual")),
    }
}

fn anonymous_individual(element: &Element) -> Result<AnonymousIndividual, OwlXmlError> {
    let node_id = element.require("nodeID")?;
    AnonymousIndividual::new(node_id)
        .map_err(|_| OwlXmlError::invalid_attribute(&element.name, "nodeID", node_id))
}

fn literal(element: &Element) -> Result<OwlLiteral, OwlXmlError> {
    expect(element, "Literal")?;
    let value = element.text.as_deref().unwrap_or_default();
    if let Some(language) = element.get("xml:lang") {
        return Ok(OwlLiteral::new_language_tagged(value, language)?);
    }
    match element.get("datatypeIRI") {
        Some(datatype) => {
            let datatype = NamedNode::new(datatype)
                .map_err(|_| OwlXmlError::invalid_attribute("Literal", "datatypeIRI", datatype))?;
            Ok(OwlLiteral::new_typed(value, datatype))
        }
        None => Ok(OwlLiteral::new_typed(value, xsd::STRING)),
    }
}

fn annotation(element: &Element) -> Result<Annotation, OwlXmlError> {
    expect(element, "Annotation")?;
    let (annotations, args) = split_annotations(element)?;
    let [property, value] = arity::<2>(element, args)?;
    Ok(
        Annotation::new(decode_annotation_property(property)?, annotation_value(value)?)
            .with_annotations(annotations),
    )
}

fn annotation_value(element: &Element) -> Result<AnnotationValue, OwlXmlError> {
    match element.name.as_str() {
        "Literal" => Ok(AnnotationValue::Literal(literal(element)?)),
        "AnonymousIndividual" => Ok(AnnotationValue::Anonymous(anonymous_individual(element)?)),
        _ => Ok(AnnotationValue::Iri(iri_element(element)?)),
    }
}

fn annotation_subject(element: &Element) -> Result<AnnotationSubject, OwlXmlError> {
    match element.name.as_str() {
        "AnonymousIndividual" => Ok(AnnotationSubject::Anonymous(anonymous_individual(element)?)),
        _ => Ok(AnnotationSubject::Iri(iri_element(element)?)),
    }
}

/// Reads `<IRI>` or `<AbbreviatedIRI>` text content.
fn iri_element(element: &Element) -> Result<EntityName, OwlXmlError> {
    let text = element.trimmed_text();
    match element.name.as_str() {
        "IRI" => EntityName::iri(text)
            .map_err(|_| OwlXmlError::invalid_attribute("IRI", "IRI", text)),
        "AbbreviatedIRI" => Ok(AbbreviatedIri::parse(text)?.into()),
        _ => Err(OwlXmlError::unexpected(&element.name, "IRI or AbbreviatedIRI")),
    }
}

/// Reads the `IRI` or `abbreviatedIRI` attribute of an entity element. Exactly one must be set.
fn entity_name(element: &Element) -> Result<EntityName, OwlXmlError> {
    match (element.get("IRI"), element.get("abbreviatedIRI")) {
        (Some(iri), None) => EntityName::iri(iri)
            .map_err(|_| OwlXmlError::invalid_attribute(&element.name, "IRI", iri)),
        (None, Some(abbreviated)) => Ok(AbbreviatedIri::parse(abbreviated)?.into()),
        (Some(_), Some(abbreviated)) => Err(OwlXmlError::invalid_attribute(
            &element.name,
            "abbreviatedIRI",
            abbreviated,
        )),
        (None, None) => Err(OwlXmlError::missing_attribute(&element.name, "IRI")),
    }
}

fn decode_entity(element: &Element) -> Result<Entity, OwlXmlError> {
    let kind = EntityKind::ALL
        .into_iter()
        .find(|kind| kind.element_name() == element.name)
        .ok_or_else(|| OwlXmlError::unexpected(&element.name, "an entity"))?;
    Ok(Entity::new(kind, entity_name(element)?))
}

fn expect(element: &Element, name: &'static str) -> Result<(), OwlXmlError> {
    if element.name == name {
        Ok(())
    } else {
        Err(OwlXmlError::unexpected(&element.name, name))
    }
}

fn decode_class(element: &Element) -> Result<Class, OwlXmlError> {
    expect(element, Class::ELEMENT)?;
    Ok(Class::new(entity_name(element)?))
}

fn decode_datatype(element: &Element) -> Result<Datatype, OwlXmlError> {
    expect(element, Datatype::ELEMENT)?;
    Ok(Datatype::new(entity_name(element)?))
}

fn decode_data_property(element: &Element) -> Result<DataProperty, OwlXmlError> {
    expect(element, DataProperty::ELEMENT)?;
    Ok(DataProperty::new(entity_name(element)?))
}

fn decode_annotation_property(element: &Element) -> Result<AnnotationProperty, OwlXmlError> {
    expect(element, AnnotationProperty::ELEMENT)?;
    Ok(AnnotationProperty::new(entity_name(element)?))
}

fn class_expressions(elements: &[Element]) -> Result<Vec<ClassExpression>, OwlXmlError> {
    elements.iter().map(class_expression).collect()
}

fn object_property_expressions(
    elements: &[Element],
) -> Result<Vec<ObjectPropertyExpression>, OwlXmlError> {
    elements.iter().map(object_property_expression).collect()
}

fn data_properties(elements: &[Element]) -> Result<Vec<DataProperty>, OwlXmlError> {
    elements.iter().map(decode_data_property).collect()
}

fn data_ranges(elements: &[Element]) -> Result<Vec<DataRange>, OwlXmlError> {
    elements.iter().map(data_range).collect()
}

fn individuals(elements: &[Element]) -> Result<Vec<Individual>, OwlXmlError> {
    elements.iter().map(individual).collect()
}

fn cardinality(element: &Element) -> Result<u32, OwlXmlError> {
    let value = element.require("cardinality")?;
    value
        .parse()
        .map_err(|_| OwlXmlError::invalid_attribute(&element.name, "cardinality", value))
}
