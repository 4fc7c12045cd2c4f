//! Derived relationships over the asserted axioms of an ontology.
//!
//! Only named classes and properties take part in the hierarchies. The helpers follow
//! the transitive closure of the asserted axioms and nothing more: no reasoning
//! happens here. Returned entities carry resolved IRIs.

use crate::axiom::Axiom;
use crate::entity::{Class, DataProperty, EntityKind, Individual, ObjectProperty};
use crate::expression::{ClassExpression, Identified, Identity, ObjectPropertyExpression};
use crate::literal::OwlLiteral;
use crate::ontology::Ontology;
use oxrdf::NamedNode;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use std::hash::Hash;

/// Directed edges between terms, walked breadth first.
struct Links<K> {
    edges: FxHashMap<K, Vec<K>>,
}

impl<K: Clone + Eq + Hash> Links<K> {
    fn new() -> Self {
        Self {
            edges: FxHashMap::default(),
        }
    }

    fn add(&mut self, from: K, to: K) {
        if from != to {
            self.edges.entry(from).or_default().push(to);
        }
    }

    /// Terms reachable from `start`, in discovery order, `start` excluded.
    fn reachable(&self, start: &K, direct: bool) -> Vec<K> {
        let mut seen = FxHashSet::default();
        seen.insert(start.clone());
        let mut found = Vec::new();
        let mut queue = VecDeque::from([start.clone()]);
        while let Some(current) = queue.pop_front() {
            for next in self.edges.get(&current).into_iter().flatten() {
                if seen.insert(next.clone()) {
                    found.push(next.clone());
                    if !direct {
                        queue.push_back(next.clone());
                    }
                }
            }
        }
        found
    }
}

impl Ontology {
    /// Edges from sub classes to super classes. Equivalent classes link both ways.
    fn class_links(&self, upward: bool) -> Links<NamedNode> {
        let prefixes = self.prefixes();
        let mut links = Links::new();
        let mut add = |sub: NamedNode, sup: NamedNode| {
            if upward {
                links.add(sub, sup);
            } else {
                links.add(sup, sub);
            }
        };
        for axiom in self.class_axioms() {
            match axiom.axiom() {
                Axiom::SubClassOf {
                    sub_class: ClassExpression::Class(sub),
                    super_class: ClassExpression::Class(sup),
                } => add(sub.resolve(prefixes), sup.resolve(prefixes)),
                Axiom::EquivalentClasses(classes) => {
                    let named: Vec<_> = classes
                        .iter()
                        .filter_map(ClassExpression::as_class)
                        .map(|c| c.resolve(prefixes))
                        .collect();
                    for a in &named {
                        for b in &named {
                            add(a.clone(), b.clone());
                        }
                    }
                }
                Axiom::DisjointUnion {
                    class,
                    disjoint_classes,
                } => {
                    for member in disjoint_classes.iter().filter_map(ClassExpression::as_class) {
                        add(member.resolve(prefixes), class.resolve(prefixes));
                    }
                }
                _ => (),
            }
        }
        links
    }

    /// Named super classes, following SubClassOf, EquivalentClasses and DisjointUnion axioms.
    pub fn super_classes_of(&self, class: &Class, direct: bool) -> Vec<Class> {
        self.class_links(true)
            .reachable(&class.resolve(self.prefixes()), direct)
            .into_iter()
            .map(Class::new)
            .collect()
    }

    /// Named sub classes, following SubClassOf, EquivalentClasses and DisjointUnion axioms.
    pub fn sub_classes_of(&self, class: &Class, direct: bool) -> Vec<Class> {
        self.class_links(false)
            .reachable(&class.resolve(self.prefixes()), direct)
            .into_iter()
            .map(Class::new)
            .collect()
    }

    /// Named classes asserted equivalent to `class`, directly or through a chain.
    pub fn equivalent_classes_of(&self, class: &Class) -> Vec<Class> {
        let prefixes = self.prefixes();
        let mut links = Links::new();
        for axiom in self.class_axioms() {
            if let Axiom::EquivalentClasses(classes) = axiom.axiom() {
                let named: Vec<_> = classes
                    .iter()
                    .filter_map(ClassExpression::as_class)
                    .map(|c| c.resolve(prefixes))
                    .collect();
                for a in &named {
                    for b in &named {
                        links.add(a.clone(), b.clone());
                    }
                }
            }
        }
        links
            .reachable(&class.resolve(prefixes), false)
            .into_iter()
            .map(Class::new)
            .collect()
    }

    /// Named classes asserted disjoint with `class` or with one of its super classes.
    pub fn disjoint_classes_of(&self, class: &Class) -> Vec<Class> {
        let prefixes = self.prefixes();
        let mut lineage: FxHashSet<NamedNode> = self
            .super_classes_of(class, false)
            .iter()
            .map(|c| c.resolve(prefixes))
            .collect();
        lineage.insert(class.resolve(prefixes));

        let mut found = Vec::new();
        let mut seen = FxHashSet::default();
        for axiom in self.class_axioms() {
            let members = match axiom.axiom() {
                Axiom::DisjointClasses(members)
                | Axiom::DisjointUnion {
                    disjoint_classes: members,
                    ..
                } => members,
                _ => continue,
            };
            let named: Vec<_> = members
                .iter()
                .filter_map(ClassExpression::as_class)
                .map(|c| c.resolve(prefixes))
                .collect();
            for (i, member) in named.iter().enumerate() {
                if !lineage.contains(member) {
                    continue;
                }
                for (j, other) in named.iter().enumerate() {
                    if i != j && seen.insert(other.clone()) {
                        found.push(Class::new(other.clone()));
                    }
                }
            }
        }
        found
    }

    /// The class expressions asserted for an individual.
    pub fn types_of(&self, individual: &Individual) -> Vec<&ClassExpression> {
        let prefixes = self.prefixes();
        let identity = individual.identity(prefixes);
        self.assertions()
            .iter()
            .filter_map(|axiom| match axiom.axiom() {
                Axiom::ClassAssertion {
                    class,
                    individual: member,
                } if member.identity(prefixes) == identity => Some(class),
                _ => None,
            })
            .collect()
    }

    /// Individuals asserted to belong to `class` or, unless `direct`, to one of its sub classes.
    pub fn instances_of(&self, class: &Class, direct: bool) -> Vec<Individual> {
        let prefixes = self.prefixes();
        let mut classes = FxHashSet::default();
        classes.insert(class.resolve(prefixes));
        if !direct {
            classes.extend(
                self.sub_classes_of(class, false)
                    .iter()
                    .map(|c| c.resolve(prefixes)),
            );
        }
        let mut seen = FxHashSet::default();
        self.assertions()
            .iter()
            .filter_map(|axiom| match axiom.axiom() {
                Axiom::ClassAssertion {
                    class: ClassExpression::Class(c),
                    individual,
                } if classes.contains(&c.resolve(prefixes)) => Some(individual),
                _ => None,
            })
            .filter(|individual| seen.insert(individual.identity(prefixes)))
            .cloned()
            .collect()
    }

    /// Individuals asserted identical to `individual`, directly or through a chain.
    pub fn same_individuals_of(&self, individual: &Individual) -> Vec<Individual> {
        let prefixes = self.prefixes();
        let mut links = Links::new();
        let mut named: FxHashMap<Identity, &Individual> = FxHashMap::default();
        for axiom in self.assertions() {
            if let Axiom::SameIndividual(members) = axiom.axiom() {
                for a in members {
                    named.entry(a.identity(prefixes)).or_insert(a);
                    for b in members {
                        links.add(a.identity(prefixes), b.identity(prefixes));
                    }
                }
            }
        }
        links
            .reachable(&individual.identity(prefixes), false)
            .iter()
            .filter_map(|identity| named.get(identity).map(|i| (*i).clone()))
            .collect()
    }

    /// Individuals asserted different from `individual`.
    pub fn different_individuals_of(&self, individual: &Individual) -> Vec<Individual> {
        let prefixes = self.prefixes();
        let identity = individual.identity(prefixes);
        let mut seen = FxHashSet::default();
        let mut found = Vec::new();
        for axiom in self.assertions() {
            if let Axiom::DifferentIndividuals(members) = axiom.axiom() {
                if !members.iter().any(|m| m.identity(prefixes) == identity) {
                    continue;
                }
                for member in members {
                    let key = member.identity(prefixes);
                    if key != identity && seen.insert(key) {
                        found.push(member.clone());
                    }
                }
            }
        }
        found
    }

    fn object_property_links(&self, upward: bool) -> Links<NamedNode> {
        let prefixes = self.prefixes();
        let mut links = Links::new();
        for axiom in self.object_property_axioms() {
            match axiom.axiom() {
                Axiom::SubObjectPropertyOf {
                    sub_property: ObjectPropertyExpression::ObjectProperty(sub),
                    super_property: ObjectPropertyExpression::ObjectProperty(sup),
                } => {
                    let (sub, sup) = (sub.resolve(prefixes), sup.resolve(prefixes));
                    if upward {
                        links.add(sub, sup);
                    } else {
                        links.add(sup, sub);
                    }
                }
                Axiom::EquivalentObjectProperties(properties) => {
                    let named: Vec<_> = properties
                        .iter()
                        .filter(|p| !p.is_inverse())
                        .map(|p| p.property().resolve(prefixes))
                        .collect();
                    for a in &named {
                        for b in &named {
                            links.add(a.clone(), b.clone());
                        }
                    }
                }
                _ => (),
            }
        }
        links
    }

    /// Named super properties of an object property.
    pub fn super_object_properties_of(
        &self,
        property: &ObjectProperty,
        direct: bool,
    ) -> Vec<ObjectProperty> {
        self.object_property_links(true)
            .reachable(&property.resolve(self.prefixes()), direct)
            .into_iter()
            .map(ObjectProperty::new)
            .collect()
    }

    /// Named sub properties of an object property.
    pub fn sub_object_properties_of(
        &self,
        property: &ObjectProperty,
        direct: bool,
    ) -> Vec<ObjectProperty> {
        self.object_property_links(false)
            .reachable(&property.resolve(self.prefixes()), direct)
            .into_iter()
            .map(ObjectProperty::new)
            .collect()
    }

    fn data_property_links(&self, upward: bool) -> Links<NamedNode> {
        let prefixes = self.prefixes();
        let mut links = Links::new();
        for axiom in self.data_property_axioms() {
            match axiom.axiom() {
                Axiom::SubDataPropertyOf {
                    sub_property,
                    super_property,
                } => {
                    let (sub, sup) = (sub_property.resolve(prefixes), super_property.resolve(prefixes));
                    if upward {
                        links.add(sub, sup);
                    } else {
                        links.add(sup, sub);
                    }
                }
                Axiom::EquivalentDataProperties(properties) => {
                    for a in properties {
                        for b in properties {
                            links.add(a.resolve(prefixes), b.resolve(prefixes));
                        }
                    }
                }
                _ => (),
            }
        }
        links
    }

    pub fn super_data_properties_of(&self, property: &DataProperty, direct: bool) -> Vec<DataProperty> {
        self.data_property_links(true)
            .reachable(&property.resolve(self.prefixes()), direct)
            .into_iter()
            .map(DataProperty::new)
            .collect()
    }

    pub fn sub_data_properties_of(&self, property: &DataProperty, direct: bool) -> Vec<DataProperty> {
        self.data_property_links(false)
            .reachable(&property.resolve(self.prefixes()), direct)
            .into_iter()
            .map(DataProperty::new)
            .collect()
    }

    /// Targets of the asserted `property` values of `individual`, sub properties included.
    ///
    /// Assertions written with `ObjectInverseOf(property)` contribute their source.
    pub fn object_property_values(
        &self,
        individual: &Individual,
        property: &ObjectProperty,
    ) -> Vec<Individual> {
        let prefixes = self.prefixes();
        let identity = individual.identity(prefixes);
        let mut properties: FxHashSet<NamedNode> = self
            .sub_object_properties_of(property, false)
            .iter()
            .map(|p| p.resolve(prefixes))
            .collect();
        properties.insert(property.resolve(prefixes));

        let mut seen = FxHashSet::default();
        let mut values = Vec::new();
        for axiom in self.assertions() {
            let Axiom::ObjectPropertyAssertion {
                property: asserted,
                source,
                target,
            } = axiom.axiom()
            else {
                continue;
            };
            if !properties.contains(&asserted.property().resolve(prefixes)) {
                continue;
            }
            let (from, to) = if asserted.is_inverse() {
                (target, source)
            } else {
                (source, target)
            };
            if from.identity(prefixes) == identity && seen.insert(to.identity(prefixes)) {
                values.push(to.clone());
            }
        }
        values
    }

    /// The asserted `property` values of `individual`, sub properties included.
    pub fn data_property_values(
        &self,
        individual: &Individual,
        property: &DataProperty,
    ) -> Vec<&OwlLiteral> {
        let prefixes = self.prefixes();
        let identity = individual.identity(prefixes);
        let mut properties: FxHashSet<NamedNode> = self
            .sub_data_properties_of(property, false)
            .iter()
            .map(|p| p.resolve(prefixes))
            .collect();
        properties.insert(property.resolve(prefixes));
        self.assertions()
            .iter()
            .filter_map(|axiom| match axiom.axiom() {
                Axiom::DataPropertyAssertion {
                    property: asserted,
                    source,
                    target,
                } if properties.contains(&asserted.resolve(prefixes))
                    && source.identity(prefixes) == identity =>
                {
                    Some(target)
                }
                _ => None,
            })
            .collect()
    }

    /// The kinds under which `iri` is declared.
    pub fn declared_kinds(&self, iri: &NamedNode) -> Vec<EntityKind> {
        let mut kinds: Vec<_> = self
            .declarations()
            .iter()
            .filter_map(|axiom| match axiom.axiom() {
                Axiom::Declaration(entity) if entity.name().resolve(self.prefixes()) == *iri => {
                    Some(entity.kind())
                }
                _ => None,
            })
            .collect();
        kinds.sort_unstable();
        kinds.dedup();
        kinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::NamedIndividual;
    use crate::iri::{EntityName, Prefix};

    fn iri(local: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.org/{local}"))
    }

    fn class(local: &str) -> Class {
        Class::new(iri(local))
    }

    fn individual(local: &str) -> Individual {
        NamedIndividual::new(iri(local)).into()
    }

    fn zoo() -> Ontology {
        let mut ontology = Ontology::default();
        ontology.add_prefix(Prefix::new("ex", "http://example.org/").unwrap());
        ontology.add_axiom(Axiom::sub_class_of(class("Dog"), class("Mammal")));
        ontology.add_axiom(Axiom::sub_class_of(
            Class::new(EntityName::abbreviated("ex", "Mammal").unwrap()),
            class("Animal"),
        ));
        ontology.add_axiom(
            Axiom::equivalent_classes(vec![class("Animal").into(), class("Beast").into()])
                .unwrap(),
        );
        ontology.add_axiom(
            Axiom::disjoint_classes(vec![class("Animal").into(), class("Plant").into()]).unwrap(),
        );
        ontology.add_axiom(Axiom::class_assertion(class("Dog"), individual("rex")));
        ontology.add_axiom(Axiom::class_assertion(class("Mammal"), individual("tom")));
        ontology
    }

    #[test]
    fn class_closures_follow_resolved_names() {
        let ontology = zoo();
        assert_eq!(
            ontology.super_classes_of(&class("Dog"), false),
            vec![class("Mammal"), class("Animal"), class("Beast")]
        );
        assert_eq!(ontology.super_classes_of(&class("Dog"), true), vec![class("Mammal")]);
        assert_eq!(
            ontology.sub_classes_of(&class("Beast"), false),
            vec![class("Animal"), class("Mammal"), class("Dog")]
        );
        assert_eq!(ontology.equivalent_classes_of(&class("Animal")), vec![class("Beast")]);
        assert!(ontology.equivalent_classes_of(&class("Dog")).is_empty());
    }

    #[test]
    fn disjointness_is_inherited() {
        let ontology = zoo();
        assert_eq!(ontology.disjoint_classes_of(&class("Dog")), vec![class("Plant")]);
        assert_eq!(ontology.disjoint_classes_of(&class("Plant")), vec![class("Animal")]);
    }

    #[test]
    fn instances_include_sub_class_members() {
        let ontology = zoo();
        assert_eq!(
            ontology.instances_of(&class("Animal"), false),
            vec![individual("rex"), individual("tom")]
        );
        assert!(ontology.instances_of(&class("Animal"), true).is_empty());
        assert_eq!(ontology.types_of(&individual("rex")).len(), 1);
    }

    #[test]
    fn property_values_follow_inverse_assertions() {
        let mut ontology = Ontology::default();
        let owns = ObjectProperty::new(iri("owns"));
        ontology.add_axiom(Axiom::object_property_assertion(
            owns.clone(),
            individual("a"),
            individual("b"),
        ));
        ontology.add_axiom(Axiom::object_property_assertion(
            ObjectPropertyExpression::ObjectInverseOf(owns.clone()),
            individual("c"),
            individual("a"),
        ));
        assert_eq!(
            ontology.object_property_values(&individual("a"), &owns),
            vec![individual("b"), individual("c")]
        );
    }

    #[test]
    fn same_individuals_are_transitive() {
        let mut ontology = Ontology::default();
        ontology.add_axiom(Axiom::same_individual(vec![individual("a"), individual("b")]).unwrap());
        ontology.add_axiom(Axiom::same_individual(vec![individual("b"), individual("c")]).unwrap());
        ontology.add_axiom(
            Axiom::different_individuals(vec![individual("a"), individual("d")]).unwrap(),
        );
        assert_eq!(
            ontology.same_individuals_of(&individual("a")),
            vec![individual("b"), individual("c")]
        );
        assert_eq!(ontology.different_individuals_of(&individual("a")), vec![individual("d")]);
        assert_eq!(
            ontology.declared_kinds(&iri("a")),
            Vec::<EntityKind>::new()
        );
    }
}
