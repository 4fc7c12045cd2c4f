//! [OWL 2 XML serialization](https://www.w3.org/TR/owl2-xml-serialization/).
//!
//! Element names are the functional-syntax keywords. Entities carry an `IRI` or an
//! `abbreviatedIRI` attribute, never both. Literals are written as
//! `<Literal xml:lang="..">` or `<Literal datatypeIRI="..">`.

mod reader;
mod tree;
mod writer;

pub use reader::OwlXmlReader;
pub use writer::OwlXmlWriter;
pub(crate) use tree::Element;
pub(crate) use writer::{
    canonical_axiom, canonical_axiom_body, canonical_class_expression, canonical_data_range,
    canonical_entity, canonical_object_property_expression,
};

use crate::error::OwlXmlError;
use crate::ontology::Ontology;

/// OWL/XML writer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwlXmlConfig {
    /// Spaces per nesting level. 0 writes everything on one line.
    pub indent: usize,
    /// Whether documents start with `<?xml version="1.0"?>`.
    pub xml_declaration: bool,
}

impl Default for OwlXmlConfig {
    fn default() -> Self {
        Self {
            indent: 4,
            xml_declaration: true,
        }
    }
}

impl OwlXmlConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single line output without XML declaration.
    pub fn compact() -> Self {
        Self {
            indent: 0,
            xml_declaration: false,
        }
    }

    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_xml_declaration(mut self, xml_declaration: bool) -> Self {
        self.xml_declaration = xml_declaration;
        self
    }
}

impl Ontology {
    /// Writes this ontology as an indented OWL/XML document.
    pub fn to_owl_xml(&self) -> Result<String, OwlXmlError> {
        OwlXmlWriter::default().ontology(self)
    }

    /// Reads an OWL/XML document.
    pub fn from_owl_xml(input: &str) -> Result<Self, OwlXmlError> {
        OwlXmlReader::new().ontology(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Annotation;
    use crate::axiom::{AnnotatedAxiom, Axiom};
    use crate::entity::{AnnotationProperty, Class, DataProperty, ObjectProperty};
    use crate::expression::{ClassExpression, ObjectPropertyExpression};
    use crate::iri::{EntityName, Prefix};
    use crate::literal::OwlLiteral;

    fn class(local: &str) -> ClassExpression {
        ClassExpression::class(Class::from_iri(format!("http://example.org/{local}")).unwrap())
    }

    #[test]
    fn cardinality_is_a_decimal_attribute() {
        let expression = ClassExpression::ObjectMaxCardinality {
            cardinality: 12,
            property: ObjectPropertyExpression::ObjectInverseOf(
                ObjectProperty::from_abbreviated("ex", "p").unwrap(),
            ),
            filler: Some(Box::new(class("A"))),
        };
        let xml = OwlXmlWriter::new(OwlXmlConfig::compact()).class_expression(&expression)
            .unwrap();
        assert_eq!(
            xml,
            "<ObjectMaxCardinality cardinality=\"12\"><ObjectInverseOf><ObjectProperty abbreviatedIRI=\"ex:p\" /></ObjectInverseOf><Class IRI=\"http://example.org/A\" /></ObjectMaxCardinality>"
        );
        assert_eq!(OwlXmlReader::new().class_expression(&xml).unwrap(), expression);
    }

    #[test]
    fn literals_keep_their_language_or_datatype() {
        let axiom = Axiom::data_property_assertion(
            DataProperty::from_iri("http://example.org/label").unwrap(),
            crate::entity::NamedIndividual::from_iri("http://example.org/a").unwrap(),
            OwlLiteral::new_language_tagged("chat", "fr").unwrap(),
        );
        let xml = OwlXmlWriter::new(OwlXmlConfig::compact())
            .axiom(&axiom.clone().into(), &[])
            .unwrap();
        assert!(xml.contains("<Literal xml:lang=\"FR\">chat</Literal>"));
        assert_eq!(OwlXmlReader::new().axiom(&xml).unwrap().axiom(), &axiom);

        let untyped = OwlXmlReader::new()
            .axiom("<DataPropertyAssertion><DataProperty IRI=\"http://example.org/p\"/><NamedIndividual IRI=\"http://example.org/a\"/><Literal>v</Literal></DataPropertyAssertion>")
            .unwrap();
        let Axiom::DataPropertyAssertion { target, .. } = untyped.axiom() else {
            panic!("unexpected axiom {untyped}");
        };
        assert_eq!(target, &OwlLiteral::new_simple("v"));
    }

    #[test]
    fn axiom_annotations_come_first() {
        let axiom = AnnotatedAxiom::new(
            Axiom::disjoint_classes(vec![class("A"), class("B")]).unwrap(),
            vec![Annotation::new(
                AnnotationProperty::new(crate::vocab::rdfs::COMMENT),
                OwlLiteral::new_simple("why"),
            )],
        );
        let xml = OwlXmlWriter::new(OwlXmlConfig::compact())
            .axiom(&axiom, &[])
            .unwrap();
        assert!(xml.starts_with("<DisjointClasses><Annotation><AnnotationProperty"));
        assert_eq!(OwlXmlReader::new().axiom(&xml).unwrap(), axiom);
    }

    #[test]
    fn both_name_attributes_are_rejected() {
        let result = OwlXmlReader::new()
            .class_expression("<Class IRI=\"http://example.org/A\" abbreviatedIRI=\"ex:A\" />");
        assert!(result.is_err());
        assert!(OwlXmlReader::new().class_expression("<Class />").is_err());
        assert!(OwlXmlReader::new().class_expression("<Unknown />").is_err());
        assert!(
            OwlXmlReader::new()
                .class_expression("<ObjectUnionOf><Class IRI=\"http://example.org/A\" /></ObjectUnionOf>")
                .is_err()
        );
    }

    #[test]
    fn ontology_documents_round_trip() {
        let mut ontology = Ontology::with_iri("http://example.org/onto").unwrap();
        ontology.add_prefix(Prefix::new("ex", "http://example.org/").unwrap());
        ontology.add_import(oxrdf::NamedNode::new_unchecked("http://example.org/other"));
        ontology.add_annotation(Annotation::new(
            AnnotationProperty::new(crate::vocab::rdfs::LABEL),
            OwlLiteral::new_language_tagged("Onto", "en").unwrap(),
        ));
        ontology.add_axiom(Axiom::declaration(
            Class::new(EntityName::abbreviated("ex", "A").unwrap()),
        ));
        ontology.add_axiom(Axiom::sub_class_of(class("A"), class("B")));

        let xml = ontology.to_owl_xml().unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\"?>\n<Ontology xmlns=\"http://www.w3.org/2002/07/owl#\" ontologyIRI=\"http://example.org/onto\">"));
        let owl = xml.find("<Prefix name=\"owl\"").unwrap();
        let rdfs = xml.find("<Prefix name=\"rdfs\"").unwrap();
        let ex = xml.find("<Prefix name=\"ex\"").unwrap();
        assert!(owl < rdfs && rdfs < ex);
        assert!(xml.find("<Declaration>").unwrap() < xml.find("<SubClassOf>").unwrap());

        assert_eq!(Ontology::from_owl_xml(&xml).unwrap(), ontology);
    }
}
