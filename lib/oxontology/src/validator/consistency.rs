//! Contradictions between asserted OWL axioms.

use super::{Issue, ValidationContext, ValidationRule};
use crate::axiom::Axiom;
use crate::entity::{Class, Entity, EntityKind, Individual};
use crate::expression::{ClassExpression, Identified, ObjectPropertyExpression};
use crate::ontology::Ontology;
use oxrdf::NamedNode;
use rustc_hash::FxHashSet;
use std::sync::Arc;

pub(super) fn rules() -> Vec<Arc<dyn ValidationRule>> {
    let rules: [Arc<dyn ValidationRule>; 7] = [
        Arc::new(SubClassDisjointnessRule),
        Arc::new(ClassAssertionDisjointnessRule),
        Arc::new(SameDifferentIndividualsRule),
        Arc::new(NegativeAssertionRule),
        Arc::new(AsymmetricPropertyRule),
        Arc::new(IrreflexivePropertyRule),
        Arc::new(FunctionalDataPropertyRule),
    ];
    rules.into()
}

/// Named classes taking part in class axioms or declarations, first-seen order.
fn named_classes(ontology: &Ontology) -> Vec<Class> {
    let prefixes = ontology.prefixes();
    let mut seen = FxHashSet::default();
    let mut classes = Vec::new();
    let mut push = |class: &Class| {
        if seen.insert(class.resolve(prefixes)) {
            classes.push(class.clone());
        }
    };
    for entity in ontology.declared(EntityKind::Class) {
        if let Entity::Class(class) = entity {
            push(class);
        }
    }
    for axiom in ontology.class_axioms() {
        match axiom.axiom() {
            Axiom::SubClassOf { sub_class, .. } => {
                sub_class.as_class().into_iter().for_each(&mut push);
            }
            Axiom::EquivalentClasses(members) | Axiom::DisjointClasses(members) => {
                members
                    .iter()
                    .filter_map(ClassExpression::as_class)
                    .for_each(&mut push);
            }
            Axiom::DisjointUnion {
                class,
                disjoint_classes,
            } => {
                push(class);
                disjoint_classes
                    .iter()
                    .filter_map(ClassExpression::as_class)
                    .for_each(&mut push);
            }
            _ => (),
        }
    }
    classes
}

/// The class and all its named super classes, resolved.
fn lineage(ontology: &Ontology, class: &Class) -> FxHashSet<NamedNode> {
    let prefixes = ontology.prefixes();
    let mut lineage: FxHashSet<_> = ontology
        .super_classes_of(class, false)
        .iter()
        .map(|c| c.resolve(prefixes))
        .collect();
    lineage.insert(class.resolve(prefixes));
    lineage
}

/// A class that specializes two classes asserted disjoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubClassDisjointnessRule;

impl SubClassDisjointnessRule {
    pub const NAME: &'static str = "owl-subclass-disjointness";
}

impl ValidationRule for SubClassDisjointnessRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, context: &ValidationContext<'_>) -> Vec<Issue> {
        let ontology = context.ontology();
        let prefixes = ontology.prefixes();
        let mut issues = Vec::new();
        for class in named_classes(ontology) {
            let lineage = lineage(ontology, &class);
            let clashes: Vec<_> = ontology
                .disjoint_classes_of(&class)
                .into_iter()
                .filter(|c| lineage.contains(&c.resolve(prefixes)))
                .map(|c| context.display_name(c.name()))
                .collect();
            if clashes.is_empty() {
                continue;
            }
            let name = context.display_name(class.name());
            issues.push(Issue::error(
                Self::NAME,
                format!(
                    "Class {name} is a sub class of classes it is disjoint with: {}",
                    clashes.join(", ")
                ),
                format!(
                    "Remove the sub class or the disjointness axioms relating {name} to {}",
                    clashes.join(", ")
                ),
            ));
        }
        issues
    }
}

/// An individual asserted to belong to disjoint classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassAssertionDisjointnessRule;

impl ClassAssertionDisjointnessRule {
    pub const NAME: &'static str = "owl-class-assertion-disjointness";
}

impl ValidationRule for ClassAssertionDisjointnessRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, context: &ValidationContext<'_>) -> Vec<Issue> {
        let ontology = context.ontology();
        let prefixes = ontology.prefixes();
        let mut seen = FxHashSet::default();
        let mut issues = Vec::new();
        for axiom in ontology.assertions() {
            let Axiom::ClassAssertion { individual, .. } = axiom.axiom() else {
                continue;
            };
            if !seen.insert(individual.identity(prefixes)) {
                continue;
            }
            let types: Vec<&Class> = ontology
                .types_of(individual)
                .into_iter()
                .filter_map(ClassExpression::as_class)
                .collect();
            let mut memberships = FxHashSet::default();
            for class in &types {
                memberships.extend(lineage(ontology, class));
            }
            let clash = types.iter().find_map(|class| {
                ontology
                    .disjoint_classes_of(class)
                    .into_iter()
                    .find(|other| memberships.contains(&other.resolve(prefixes)))
                    .map(|other| (*class, other))
            });
            if let Some((class, other)) = clash {
                let name = context.display_individual(individual);
                let class = context.display_name(class.name());
                let other = context.display_name(other.name());
                issues.push(Issue::error(
                    Self::NAME,
                    format!("Individual {name} is an instance of the disjoint classes {class} and {other}"),
                    format!("Remove one of the class assertions of {name} or the disjointness of {class} and {other}"),
                ));
            }
        }
        issues
    }
}

/// Individuals asserted both the same and different.
#[derive(Debug, Clone, Copy, Default)]
pub struct SameDifferentIndividualsRule;

impl SameDifferentIndividualsRule {
    pub const NAME: &'static str = "owl-same-different-individuals";
}

impl ValidationRule for SameDifferentIndividualsRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, context: &ValidationContext<'_>) -> Vec<Issue> {
        let ontology = context.ontology();
        let prefixes = ontology.prefixes();
        let mut reported = FxHashSet::default();
        let mut issues = Vec::new();
        for axiom in ontology.assertions() {
            let Axiom::DifferentIndividuals(members) = axiom.axiom() else {
                continue;
            };
            for (i, a) in members.iter().enumerate() {
                let same: FxHashSet<_> = ontology
                    .same_individuals_of(a)
                    .iter()
                    .map(|s| s.identity(prefixes))
                    .collect();
                for b in &members.as_slice()[i + 1..] {
                    let pair = (a.identity(prefixes), b.identity(prefixes));
                    if !same.contains(&pair.1) || !reported.insert(pair) {
                        continue;
                    }
                    let (a, b) = (context.display_individual(a), context.display_individual(b));
                    issues.push(Issue::error(
                        Self::NAME,
                        format!("Individuals {a} and {b} are asserted both the same and different"),
                        format!("Remove the SameIndividual or the DifferentIndividuals axiom relating {a} and {b}"),
                    ));
                }
            }
        }
        issues
    }
}

/// Negative property assertions contradicted by a positive one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NegativeAssertionRule;

impl NegativeAssertionRule {
    pub const NAME: &'static str = "owl-negative-assertion";
}

impl ValidationRule for NegativeAssertionRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, context: &ValidationContext<'_>) -> Vec<Issue> {
        let ontology = context.ontology();
        let prefixes = ontology.prefixes();
        let mut issues = Vec::new();
        for axiom in ontology.assertions() {
            match axiom.axiom() {
                Axiom::NegativeObjectPropertyAssertion {
                    property,
                    source,
                    target,
                } => {
                    let (from, to) = if property.is_inverse() {
                        (target, source)
                    } else {
                        (source, target)
                    };
                    let target_identity = to.identity(prefixes);
                    let asserted = ontology
                        .object_property_values(from, property.property())
                        .iter()
                        .any(|v| v.identity(prefixes) == target_identity);
                    if asserted {
                        let property = context.display_name(property.property().name());
                        let (from, to) = (
                            context.display_individual(from),
                            context.display_individual(to),
                        );
                        issues.push(Issue::error(
                            Self::NAME,
                            format!("{from} {property} {to} is asserted and negated"),
                            format!("Remove the property assertion or the negative property assertion {from} {property} {to}"),
                        ));
                    }
                }
                Axiom::NegativeDataPropertyAssertion {
                    property,
                    source,
                    target,
                } => {
                    let value = target.to_rdf(prefixes);
                    let asserted = ontology
                        .data_property_values(source, property)
                        .iter()
                        .any(|v| v.to_rdf(prefixes) == value);
                    if asserted {
                        let property = context.display_name(property.name());
                        let source = context.display_individual(source);
                        issues.push(Issue::error(
                            Self::NAME,
                            format!("{source} {property} {value} is asserted and negated"),
                            format!("Remove the data property assertion or the negative data property assertion {source} {property} {value}"),
                        ));
                    }
                }
                _ => (),
            }
        }
        issues
    }
}

/// Named object properties carrying a characteristic axiom.
fn characterized(
    ontology: &Ontology,
    matches: impl Fn(&Axiom) -> Option<&ObjectPropertyExpression>,
) -> Vec<&ObjectPropertyExpression> {
    ontology
        .object_property_axioms()
        .iter()
        .filter_map(|axiom| matches(axiom.axiom()))
        .collect()
}

/// Pairs of individuals linked in both directions by an asymmetric property.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsymmetricPropertyRule;

impl AsymmetricPropertyRule {
    pub const NAME: &'static str = "owl-asymmetric-property";
}

impl ValidationRule for AsymmetricPropertyRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, context: &ValidationContext<'_>) -> Vec<Issue> {
        let ontology = context.ontology();
        let prefixes = ontology.prefixes();
        let mut issues = Vec::new();
        let properties = characterized(ontology, |axiom| match axiom {
            Axiom::AsymmetricObjectProperty(p) => Some(p),
            _ => None,
        });
        for property in properties {
            let named = property.property();
            let mut reported = FxHashSet::default();
            for individual in assertion_sources(ontology) {
                for value in ontology.object_property_values(individual, named) {
                    let back = ontology
                        .object_property_values(&value, named)
                        .iter()
                        .any(|v| v.identity(prefixes) == individual.identity(prefixes));
                    let mut pair = [individual.identity(prefixes), value.identity(prefixes)];
                    pair.sort();
                    if !back || !reported.insert(pair) {
                        continue;
                    }
                    let p = context.display_name(named.name());
                    let (a, b) = (
                        context.display_individual(individual),
                        context.display_individual(&value),
                    );
                    issues.push(Issue::error(
                        Self::NAME,
                        format!("Asymmetric property {p} links {a} and {b} in both directions"),
                        format!("Remove one of the {p} assertions between {a} and {b}"),
                    ));
                }
            }
        }
        issues
    }
}

/// Individuals linked to themselves by an irreflexive property.
#[derive(Debug, Clone, Copy, Default)]
pub struct IrreflexivePropertyRule;

impl IrreflexivePropertyRule {
    pub const NAME: &'static str = "owl-irreflexive-property";
}

impl ValidationRule for IrreflexivePropertyRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, context: &ValidationContext<'_>) -> Vec<Issue> {
        let ontology = context.ontology();
        let prefixes = ontology.prefixes();
        let mut issues = Vec::new();
        let properties = characterized(ontology, |axiom| match axiom {
            Axiom::IrreflexiveObjectProperty(p) => Some(p),
            _ => None,
        });
        for property in properties {
            let named = property.property();
            for individual in assertion_sources(ontology) {
                let identity = individual.identity(prefixes);
                if ontology
                    .object_property_values(individual, named)
                    .iter()
                    .any(|v| v.identity(prefixes) == identity)
                {
                    let p = context.display_name(named.name());
                    let a = context.display_individual(individual);
                    issues.push(Issue::error(
                        Self::NAME,
                        format!("Irreflexive property {p} links {a} to itself"),
                        format!("Remove the {p} assertion from {a} to {a}"),
                    ));
                }
            }
        }
        issues
    }
}

/// Individuals with several values for a functional data property.
#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionalDataPropertyRule;

impl FunctionalDataPropertyRule {
    pub const NAME: &'static str = "owl-functional-data-property";
}

impl ValidationRule for FunctionalDataPropertyRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, context: &ValidationContext<'_>) -> Vec<Issue> {
        let ontology = context.ontology();
        let prefixes = ontology.prefixes();
        let mut issues = Vec::new();
        for axiom in ontology.data_property_axioms() {
            let Axiom::FunctionalDataProperty(property) = axiom.axiom() else {
                continue;
            };
            for individual in assertion_sources(ontology) {
                let mut values = Vec::new();
                for value in ontology.data_property_values(individual, property) {
                    let value = value.to_rdf(prefixes);
                    if !values.contains(&value) {
                        values.push(value);
                    }
                }
                if values.len() < 2 {
                    continue;
                }
                let p = context.display_name(property.name());
                let a = context.display_individual(individual);
                let listed = values
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                issues.push(Issue::error(
                    Self::NAME,
                    format!("Functional data property {p} has {} values for {a}: {listed}", values.len()),
                    format!("Keep a single {p} value for {a}"),
                ));
            }
        }
        issues
    }
}

/// Sources of property assertions, first-seen order.
fn assertion_sources(ontology: &Ontology) -> Vec<&Individual> {
    let prefixes = ontology.prefixes();
    let mut seen = FxHashSet::default();
    ontology
        .assertions()
        .iter()
        .flat_map(|axiom| match axiom.axiom() {
            Axiom::ObjectPropertyAssertion { source, target, .. } => vec![source, target],
            Axiom::DataPropertyAssertion { source, .. } => vec![source],
            _ => Vec::new(),
        })
        .filter(|individual| seen.insert(individual.identity(prefixes)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{DataProperty, NamedIndividual, ObjectProperty};
    use crate::iri::Prefix;
    use crate::literal::OwlLiteral;
    use crate::validator::{IssueSeverity, Validator};

    fn ontology() -> Ontology {
        let mut ontology = Ontology::default();
        ontology.add_prefix(Prefix::new("ex", "http://example.org/").unwrap());
        ontology
    }

    fn class(local: &str) -> Class {
        Class::from_abbreviated("ex", local).unwrap()
    }

    fn individual(local: &str) -> Individual {
        NamedIndividual::from_abbreviated("ex", local).unwrap().into()
    }

    fn run(rule: impl ValidationRule + 'static, ontology: &Ontology) -> Vec<Issue> {
        Validator::new().with_rule(rule).validate(ontology).into_issues()
    }

    #[test]
    fn sub_class_of_disjoint_classes() {
        let mut ontology = ontology();
        ontology.add_axiom(Axiom::sub_class_of(class("Cat"), class("Animal")));
        ontology.add_axiom(Axiom::sub_class_of(class("Cat"), class("Plant")));
        ontology.add_axiom(
            Axiom::disjoint_classes(vec![
                ClassExpression::class(class("Animal")),
                ClassExpression::class(class("Plant")),
            ])
            .unwrap(),
        );
        let issues = run(SubClassDisjointnessRule, &ontology);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity(), IssueSeverity::Error);
        assert!(issues[0].description().contains("ex:Cat"));
        assert!(issues[0].description().contains("ex:Animal"));
        assert!(issues[0].description().contains("ex:Plant"));
    }

    #[test]
    fn instance_of_disjoint_classes() {
        let mut ontology = ontology();
        ontology.add_axiom(Axiom::sub_class_of(class("Cat"), class("Animal")));
        ontology.add_axiom(
            Axiom::disjoint_classes(vec![
                ClassExpression::class(class("Animal")),
                ClassExpression::class(class("Plant")),
            ])
            .unwrap(),
        );
        ontology.add_axiom(Axiom::class_assertion(class("Cat"), individual("tom")));
        assert!(run(ClassAssertionDisjointnessRule, &ontology).is_empty());

        ontology.add_axiom(Axiom::class_assertion(class("Plant"), individual("tom")));
        let issues = run(ClassAssertionDisjointnessRule, &ontology);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].description().starts_with("Individual ex:tom"));
    }

    #[test]
    fn same_and_different_individuals() {
        let mut ontology = ontology();
        ontology.add_axiom(
            Axiom::same_individual(vec![individual("a"), individual("b")]).unwrap(),
        );
        ontology.add_axiom(
            Axiom::same_individual(vec![individual("b"), individual("c")]).unwrap(),
        );
        ontology.add_axiom(
            Axiom::different_individuals(vec![individual("a"), individual("c"), individual("d")])
                .unwrap(),
        );
        let issues = run(SameDifferentIndividualsRule, &ontology);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].description().contains("ex:a and ex:c"));
    }

    #[test]
    fn negated_assertions() {
        let mut ontology = ontology();
        let knows = ObjectProperty::from_abbreviated("ex", "knows").unwrap();
        ontology.add_axiom(Axiom::object_property_assertion(
            knows.clone(),
            individual("a"),
            individual("b"),
        ));
        ontology.add_axiom(Axiom::NegativeObjectPropertyAssertion {
            property: knows.into(),
            source: individual("a"),
            target: individual("b"),
        });
        let age = DataProperty::from_abbreviated("ex", "age").unwrap();
        ontology.add_axiom(Axiom::data_property_assertion(
            age.clone(),
            individual("a"),
            OwlLiteral::new_simple("3"),
        ));
        ontology.add_axiom(Axiom::NegativeDataPropertyAssertion {
            property: age,
            source: individual("a"),
            target: OwlLiteral::new_simple("4"),
        });
        let issues = run(NegativeAssertionRule, &ontology);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].description(), "ex:a ex:knows ex:b is asserted and negated");
    }

    #[test]
    fn property_characteristics() {
        let mut ontology = ontology();
        let parent = ObjectProperty::from_abbreviated("ex", "parentOf").unwrap();
        ontology.add_axiom(Axiom::AsymmetricObjectProperty(parent.clone().into()));
        ontology.add_axiom(Axiom::IrreflexiveObjectProperty(parent.clone().into()));
        for (a, b) in [("a", "b"), ("b", "a"), ("c", "c")] {
            ontology.add_axiom(Axiom::object_property_assertion(
                parent.clone(),
                individual(a),
                individual(b),
            ));
        }
        // c parentOf c is asymmetric too
        assert_eq!(run(AsymmetricPropertyRule, &ontology).len(), 2);
        let irreflexive = run(IrreflexivePropertyRule, &ontology);
        assert_eq!(irreflexive.len(), 1);
        assert!(irreflexive[0].description().contains("links ex:c to itself"));
    }

    #[test]
    fn functional_data_property() {
        let mut ontology = ontology();
        let age = DataProperty::from_abbreviated("ex", "age").unwrap();
        ontology.add_axiom(Axiom::FunctionalDataProperty(age.clone()));
        for value in ["3", "3", "4"] {
            ontology.add_axiom(Axiom::data_property_assertion(
                age.clone(),
                individual("a"),
                OwlLiteral::new_simple(value),
            ));
        }
        let issues = run(FunctionalDataPropertyRule, &ontology);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].description().contains("has 2 values for ex:a"));
    }
}
