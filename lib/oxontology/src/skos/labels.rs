//! Label rules.
//!
//! SKOS makes the three label properties pairwise disjoint and allows one preferred label
//! per language on any resource, so these rules check every labelled subject, typed
//! `skos:Concept` or not. Concept schemes and collections carry labels too.

use crate::validator::{Issue, ValidationContext, ValidationRule};
use crate::vocab::skos;
use oxrdf::{LiteralRef, SubjectRef, TermRef, TripleRef};
use rustc_hash::FxHashMap;

/// A concept using the same literal as preferred and alternative label.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlternativeLabelRule;

impl AlternativeLabelRule {
    pub const NAME: &'static str = "skos-alternative-label";
}

impl ValidationRule for AlternativeLabelRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, context: &ValidationContext<'_>) -> Vec<Issue> {
        let graph = context.graph();
        graph
            .triples_for_predicate(skos::ALT_LABEL)
            .filter(|t| graph.contains(TripleRef::new(t.subject, skos::PREF_LABEL, t.object)))
            .map(|t| {
                let concept = context.display(t.subject.into());
                let label = context.display(t.object);
                Issue::error(
                    Self::NAME,
                    format!("{label} is both a preferred and an alternative label of {concept}"),
                    format!("Remove the alternative label {label} of {concept}"),
                )
            })
            .collect()
    }
}

/// A hidden label that is also a preferred or alternative label.
#[derive(Debug, Clone, Copy, Default)]
pub struct HiddenLabelRule;

impl HiddenLabelRule {
    pub const NAME: &'static str = "skos-hidden-label";
}

impl ValidationRule for HiddenLabelRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, context: &ValidationContext<'_>) -> Vec<Issue> {
        let graph = context.graph();
        let mut issues = Vec::new();
        for t in graph.triples_for_predicate(skos::HIDDEN_LABEL) {
            for (other, kind) in [
                (skos::PREF_LABEL, "preferred"),
                (skos::ALT_LABEL, "alternative"),
            ] {
                if graph.contains(TripleRef::new(t.subject, other, t.object)) {
                    let concept = context.display(t.subject.into());
                    let label = context.display(t.object);
                    issues.push(Issue::error(
                        Self::NAME,
                        format!("{label} is both a hidden and a {kind} label of {concept}"),
                        format!("Remove the hidden label {label} of {concept}"),
                    ));
                }
            }
        }
        issues
    }
}

/// Several preferred labels in the same language.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferredLabelRule;

impl PreferredLabelRule {
    pub const NAME: &'static str = "skos-preferred-label";
}

impl ValidationRule for PreferredLabelRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, context: &ValidationContext<'_>) -> Vec<Issue> {
        let mut order = Vec::new();
        let mut labels: FxHashMap<(SubjectRef<'_>, Option<String>), Vec<LiteralRef<'_>>> =
            FxHashMap::default();
        for t in context.graph().triples_for_predicate(skos::PREF_LABEL) {
            let TermRef::Literal(label) = t.object else {
                continue;
            };
            let key = (t.subject, label.language().map(str::to_ascii_lowercase));
            let values = labels.entry(key.clone()).or_insert_with(|| {
                order.push(key);
                Vec::new()
            });
            if !values.contains(&label) {
                values.push(label);
            }
        }
        order
            .into_iter()
            .filter_map(|key| {
                let values = labels.get(&key)?;
                if values.len() < 2 {
                    return None;
                }
                let concept = context.display(key.0.into());
                let language = key.1.map_or_else(|| "no language".to_owned(), |l| format!("language '{l}'"));
                let listed = values
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                Some(Issue::error(
                    Self::NAME,
                    format!("{concept} has {} preferred labels with {language}: {listed}", values.len()),
                    format!("Keep one preferred label with {language} for {concept} and turn the others into alternative labels"),
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axiom::Axiom;
    use crate::entity::AnnotationProperty;
    use crate::iri::{EntityName, Prefix};
    use crate::literal::OwlLiteral;
    use crate::ontology::Ontology;
    use crate::validator::Validator;

    fn concepts(labels: &[(&str, oxrdf::NamedNodeRef<'_>, OwlLiteral)]) -> Ontology {
        let mut ontology = Ontology::default();
        ontology.add_prefix(Prefix::new("ex", "http://example.org/").unwrap());
        for (concept, property, label) in labels {
            ontology.add_axiom(Axiom::annotation_assertion(
                AnnotationProperty::new(*property),
                EntityName::abbreviated("ex", *concept).unwrap(),
                label.clone(),
            ));
        }
        ontology
    }

    fn run(rule: impl ValidationRule + 'static, ontology: &Ontology) -> Vec<Issue> {
        Validator::new().with_rule(rule).validate(ontology).into_issues()
    }

    #[test]
    fn hidden_label_clashes() {
        let ontology = concepts(&[
            ("A", skos::PREF_LABEL, OwlLiteral::new_simple("x")),
            ("A", skos::ALT_LABEL, OwlLiteral::new_simple("y")),
            ("A", skos::HIDDEN_LABEL, OwlLiteral::new_simple("x")),
            ("A", skos::HIDDEN_LABEL, OwlLiteral::new_simple("y")),
            ("A", skos::HIDDEN_LABEL, OwlLiteral::new_simple("z")),
        ]);
        let issues = run(HiddenLabelRule, &ontology);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.suggestion().ends_with("of ex:A")));
    }

    #[test]
    fn one_preferred_label_per_language() {
        let ontology = concepts(&[
            ("A", skos::PREF_LABEL, OwlLiteral::new_language_tagged("cat", "en").unwrap()),
            ("A", skos::PREF_LABEL, OwlLiteral::new_language_tagged("chat", "fr").unwrap()),
            ("B", skos::PREF_LABEL, OwlLiteral::new_language_tagged("dog", "en").unwrap()),
            ("B", skos::PREF_LABEL, OwlLiteral::new_language_tagged("hound", "en").unwrap()),
        ]);
        let issues = run(PreferredLabelRule, &ontology);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].description().starts_with("ex:B has 2 preferred labels with language 'en'"));
    }

    #[test]
    fn labels_are_checked_on_untyped_and_scheme_subjects() {
        let mut ontology = concepts(&[
            ("Untyped", skos::PREF_LABEL, OwlLiteral::new_simple("x")),
            ("Untyped", skos::ALT_LABEL, OwlLiteral::new_simple("x")),
            ("Scheme", skos::PREF_LABEL, OwlLiteral::new_simple("y")),
            ("Scheme", skos::ALT_LABEL, OwlLiteral::new_simple("y")),
        ]);
        ontology.add_axiom(Axiom::class_assertion(
            crate::expression::ClassExpression::class(skos::CONCEPT_SCHEME),
            crate::entity::NamedIndividual::new(EntityName::abbreviated("ex", "Scheme").unwrap()),
        ));
        let issues = run(AlternativeLabelRule, &ontology);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().any(|i| i.suggestion().ends_with("of ex:Untyped")));
        assert!(issues.iter().any(|i| i.suggestion().ends_with("of ex:Scheme")));
    }
}
