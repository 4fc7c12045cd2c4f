//! OWL 2 ontology document: header, prefixes, imports, annotations and axiom lists.

use crate::annotation::Annotation;
use crate::axiom::{AnnotatedAxiom, Axiom, AxiomCategory};
use crate::entity::{Entity, EntityKind};
use crate::error::ConstructionError;
use crate::iri::{EntityName, Prefix};
use oxrdf::NamedNode;

/// An OWL 2 ontology.
///
/// Axioms are kept in one list per [`AxiomCategory`]. No consistency maintenance
/// happens on mutation, see [`Validator`](crate::Validator) for that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ontology {
    iri: Option<NamedNode>,
    version_iri: Option<NamedNode>,
    prefixes: Vec<Prefix>,
    imports: Vec<NamedNode>,
    annotations: Vec<Annotation>,
    declarations: Vec<AnnotatedAxiom>,
    class_axioms: Vec<AnnotatedAxiom>,
    object_property_axioms: Vec<AnnotatedAxiom>,
    data_property_axioms: Vec<AnnotatedAxiom>,
    datatype_definitions: Vec<AnnotatedAxiom>,
    has_keys: Vec<AnnotatedAxiom>,
    assertions: Vec<AnnotatedAxiom>,
    annotation_axioms: Vec<AnnotatedAxiom>,
}

impl Ontology {
    /// Creates a new empty ontology.
    pub fn new(iri: Option<NamedNode>) -> Self {
        Self {
            iri,
            ..Self::default()
        }
    }

    /// Creates a new ontology with the given IRI string.
    pub fn with_iri(iri: impl Into<String>) -> Result<Self, ConstructionError> {
        let iri = NamedNode::new(iri.into())
            .map_err(|e| ConstructionError::new("Ontology", "ontologyIRI", e.to_string()))?;
        Ok(Self::new(Some(iri)))
    }

    /// Returns the ontology IRI.
    pub fn iri(&self) -> Option<&NamedNode> {
        self.iri.as_ref()
    }

    pub fn set_iri(&mut self, iri: Option<NamedNode>) {
        self.iri = iri;
    }

    /// Returns the version IRI.
    pub fn version_iri(&self) -> Option<&NamedNode> {
        self.version_iri.as_ref()
    }

    pub fn set_version_iri(&mut self, iri: Option<NamedNode>) {
        self.version_iri = iri;
    }

    /// The declared prefixes, in declaration order.
    pub fn prefixes(&self) -> &[Prefix] {
        &self.prefixes
    }

    /// Declares a prefix, replacing any previous declaration with the same name.
    pub fn add_prefix(&mut self, prefix: Prefix) {
        if let Some(existing) = self.prefixes.iter_mut().find(|p| p.name() == prefix.name()) {
            *existing = prefix;
        } else {
            self.prefixes.push(prefix);
        }
    }

    /// Resolves a possibly abbreviated name against the ontology prefixes.
    pub fn resolve(&self, name: &EntityName) -> NamedNode {
        name.resolve(&self.prefixes)
    }

    /// Returns the imported ontology IRIs.
    pub fn imports(&self) -> &[NamedNode] {
        &self.imports
    }

    /// Adds an import declaration.
    pub fn add_import(&mut self, iri: NamedNode) {
        if !self.imports.contains(&iri) {
            self.imports.push(iri);
        }
    }

    /// Ontology-level annotations.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    /// Adds an axiom to the list of its category.
    pub fn add_axiom(&mut self, axiom: impl Into<AnnotatedAxiom>) {
        let axiom = axiom.into();
        self.list_mut(axiom.category()).push(axiom);
    }

    /// Adds an axiom with annotations.
    pub fn add_annotated_axiom(&mut self, axiom: Axiom, annotations: Vec<Annotation>) {
        self.add_axiom(AnnotatedAxiom::new(axiom, annotations));
    }

    /// Removes every occurrence of an axiom, whatever its annotations. Returns how many were removed.
    pub fn remove_axiom(&mut self, axiom: &Axiom) -> usize {
        let list = self.list_mut(axiom.category());
        let before = list.len();
        list.retain(|a| a.axiom() != axiom);
        before - list.len()
    }

    /// The axioms of one category.
    pub fn axioms_of(&self, category: AxiomCategory) -> &[AnnotatedAxiom] {
        match category {
            AxiomCategory::Declaration => &self.declarations,
            AxiomCategory::Class => &self.class_axioms,
            AxiomCategory::ObjectProperty => &self.object_property_axioms,
            AxiomCategory::DataProperty => &self.data_property_axioms,
            AxiomCategory::DatatypeDefinition => &self.datatype_definitions,
            AxiomCategory::HasKey => &self.has_keys,
            AxiomCategory::Assertion => &self.assertions,
            AxiomCategory::Annotation => &self.annotation_axioms,
        }
    }

    fn list_mut(&mut self, category: AxiomCategory) -> &mut Vec<AnnotatedAxiom> {
        match category {
            AxiomCategory::Declaration => &mut self.declarations,
            AxiomCategory::Class => &mut self.class_axioms,
            AxiomCategory::ObjectProperty => &mut self.object_property_axioms,
            AxiomCategory::DataProperty => &mut self.data_property_axioms,
            AxiomCategory::DatatypeDefinition => &mut self.datatype_definitions,
            AxiomCategory::HasKey => &mut self.has_keys,
            AxiomCategory::Assertion => &mut self.assertions,
            AxiomCategory::Annotation => &mut self.annotation_axioms,
        }
    }

    pub fn declarations(&self) -> &[AnnotatedAxiom] {
        &self.declarations
    }

    pub fn class_axioms(&self) -> &[AnnotatedAxiom] {
        &self.class_axioms
    }

    pub fn object_property_axioms(&self) -> &[AnnotatedAxiom] {
        &self.object_property_axioms
    }

    pub fn data_property_axioms(&self) -> &[AnnotatedAxiom] {
        &self.data_property_axioms
    }

    pub fn datatype_definitions(&self) -> &[AnnotatedAxiom] {
        &self.datatype_definitions
    }

    pub fn has_keys(&self) -> &[AnnotatedAxiom] {
        &self.has_keys
    }

    pub fn assertions(&self) -> &[AnnotatedAxiom] {
        &self.assertions
    }

    pub fn annotation_axioms(&self) -> &[AnnotatedAxiom] {
        &self.annotation_axioms
    }

    /// Iterates over all axioms, category by category.
    pub fn axioms(&self) -> impl Iterator<Item = &AnnotatedAxiom> {
        AxiomCategory::ALL
            .into_iter()
            .flat_map(|category| self.axioms_of(category).iter())
    }

    /// Returns the number of axioms in the ontology.
    pub fn axiom_count(&self) -> usize {
        AxiomCategory::ALL
            .into_iter()
            .map(|category| self.axioms_of(category).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.axiom_count() == 0
    }

    /// The entities declared with the given kind.
    pub fn declared(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> {
        self.declarations.iter().filter_map(move |a| match a.axiom() {
            Axiom::Declaration(entity) if entity.kind() == kind => Some(entity),
            _ => None,
        })
    }

    /// Checks whether an entity with this resolved IRI is declared with the given kind.
    pub fn is_declared(&self, kind: EntityKind, iri: &NamedNode) -> bool {
        self.declared(kind)
            .any(|entity| entity.name().resolve(&self.prefixes) == *iri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Class;
    use crate::expression::ClassExpression;

    #[test]
    fn axioms_are_routed_to_their_category() {
        let mut ontology = Ontology::with_iri("http://example.org/onto").unwrap();
        let a = Class::from_iri("http://example.org/A").unwrap();
        let b = Class::from_iri("http://example.org/B").unwrap();
        ontology.add_axiom(Axiom::declaration(a.clone()));
        ontology.add_axiom(Axiom::sub_class_of(a.clone(), b.clone()));
        ontology.add_axiom(Axiom::disjoint_classes(vec![a.clone().into(), ClassExpression::from(b)]).unwrap());
        assert_eq!(ontology.declarations().len(), 1);
        assert_eq!(ontology.class_axioms().len(), 2);
        assert_eq!(ontology.axiom_count(), 3);
        assert!(ontology.is_declared(EntityKind::Class, &NamedNode::new_unchecked("http://example.org/A")));
        assert_eq!(ontology.remove_axiom(&Axiom::declaration(a)), 1);
        assert_eq!(ontology.axiom_count(), 2);
    }

    #[test]
    fn prefixes_are_replaced_by_name() {
        let mut ontology = Ontology::default();
        ontology.add_prefix(Prefix::new("ex", "http://example.org/a#").unwrap());
        ontology.add_prefix(Prefix::new("ex", "http://example.org/b#").unwrap());
        assert_eq!(ontology.prefixes().len(), 1);
        let name = EntityName::abbreviated("ex", "C").unwrap();
        assert_eq!(ontology.resolve(&name).as_str(), "http://example.org/b#C");
    }
}
