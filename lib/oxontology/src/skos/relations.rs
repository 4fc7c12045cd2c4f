use super::bound;
use crate::error::RuleError;
use crate::rule::{Atom, Rule, RuleTerm};
use crate::validator::{Issue, IssueSeverity, PatternRule, ValidationContext, ValidationRule};
use crate::vocab::skos;
use oxrdf::{NamedNodeRef, SubjectRef, TermRef, TripleRef};

/// Two concepts of one scheme sharing a notation.
///
/// Every solution is reported, so a clashing pair yields one issue per ordering.
pub fn notation_rule() -> Result<PatternRule, RuleError> {
    let [x, y, s, n] = ["x", "y", "s", "n"].map(RuleTerm::variable);
    let (x, y, s, n) = (x?, y?, s?, n?);
    let rule = Rule::new(
        "skos-notation",
        vec![
            Atom::triple(x.clone(), skos::IN_SCHEME, s.clone()),
            Atom::triple(y.clone(), skos::IN_SCHEME, s),
            Atom::Different(x.clone(), y.clone()),
            Atom::triple(x, skos::NOTATION, n.clone()),
            Atom::triple(y, skos::NOTATION, n),
        ],
        Vec::new(),
    )?;
    Ok(PatternRule::new(rule, IssueSeverity::Error, |context, solution| {
        let (x, y) = (bound(context, solution, "x"), bound(context, solution, "y"));
        let notation = bound(context, solution, "n");
        let scheme = bound(context, solution, "s");
        (
            format!("Concepts {x} and {y} share the notation {notation} in scheme {scheme}"),
            format!("Give {x} a notation that is unique in {scheme}, {y} already uses {notation}"),
        )
    }))
}

/// A concept both broader and narrower than another.
pub fn broader_narrower_rule() -> Result<PatternRule, RuleError> {
    let (a, b) = (RuleTerm::variable("a")?, RuleTerm::variable("b")?);
    let rule = Rule::new(
        "skos-broader-narrower",
        vec![
            Atom::triple(a.clone(), skos::BROADER, b.clone()),
            Atom::triple(a, skos::NARROWER, b),
        ],
        Vec::new(),
    )?;
    Ok(PatternRule::new(rule, IssueSeverity::Error, |context, solution| {
        let (a, b) = (bound(context, solution, "a"), bound(context, solution, "b"));
        (
            format!("{b} is both broader and narrower than {a}"),
            format!("Remove either skos:broader or skos:narrower between {a} and {b}"),
        )
    }))
}

fn as_subject(term: TermRef<'_>) -> Option<SubjectRef<'_>> {
    match term {
        TermRef::NamedNode(node) => Some(node.into()),
        TermRef::BlankNode(node) => Some(node.into()),
        _ => None,
    }
}

const HIERARCHY: [NamedNodeRef<'static>; 4] = [
    skos::BROADER,
    skos::NARROWER,
    skos::BROADER_TRANSITIVE,
    skos::NARROWER_TRANSITIVE,
];

/// Associative links between concepts that are also hierarchically linked.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelatedHierarchyRule;

impl RelatedHierarchyRule {
    pub const NAME: &'static str = "skos-related-hierarchical";
}

impl ValidationRule for RelatedHierarchyRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, context: &ValidationContext<'_>) -> Vec<Issue> {
        let graph = context.graph();
        let mut issues = Vec::new();
        for t in graph.triples_for_predicate(skos::RELATED) {
            let Some(object) = as_subject(t.object) else {
                continue;
            };
            let Some(predicate) = HIERARCHY.into_iter().find(|p| {
                graph.contains(TripleRef::new(t.subject, *p, t.object))
                    || graph.contains(TripleRef::new(object, *p, t.subject))
            }) else {
                continue;
            };
            let (a, b) = (context.display(t.subject.into()), context.display(t.object));
            let predicate = context.compact(predicate);
            issues.push(Issue::error(
                Self::NAME,
                format!("{a} is related to {b} and linked to it by {predicate}"),
                format!("Remove skos:related between {a} and {b} or their hierarchical link"),
            ));
        }
        issues
    }
}

const MAPPINGS: [NamedNodeRef<'static>; 3] =
    [skos::BROAD_MATCH, skos::NARROW_MATCH, skos::RELATED_MATCH];

/// Exact matches that are also broad, narrow or related matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatchRule;

impl ExactMatchRule {
    pub const NAME: &'static str = "skos-exact-match";
}

impl ValidationRule for ExactMatchRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, context: &ValidationContext<'_>) -> Vec<Issue> {
        let graph = context.graph();
        let mut issues = Vec::new();
        for t in graph.triples_for_predicate(skos::EXACT_MATCH) {
            let Some(object) = as_subject(t.object) else {
                continue;
            };
            for mapping in MAPPINGS {
                if !graph.contains(TripleRef::new(t.subject, mapping, t.object))
                    && !graph.contains(TripleRef::new(object, mapping, t.subject))
                {
                    continue;
                }
                let (a, b) = (context.display(t.subject.into()), context.display(t.object));
                let mapping = context.compact(mapping);
                issues.push(Issue::error(
                    Self::NAME,
                    format!("{a} is an exact match of {b} and also linked to it by {mapping}"),
                    format!("Keep either skos:exactMatch or {mapping} between {a} and {b}"),
                ));
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axiom::Axiom;
    use crate::entity::{NamedIndividual, ObjectProperty};
    use crate::iri::Prefix;
    use crate::ontology::Ontology;
    use crate::validator::Validator;

    fn linked(links: &[(&str, NamedNodeRef<'_>, &str)]) -> Ontology {
        let mut ontology = Ontology::default();
        ontology.add_prefix(Prefix::new("ex", "http://example.org/").unwrap());
        for (a, p, b) in links {
            ontology.add_axiom(Axiom::object_property_assertion(
                ObjectProperty::new(*p),
                NamedIndividual::from_abbreviated("ex", *a).unwrap(),
                NamedIndividual::from_abbreviated("ex", *b).unwrap(),
            ));
        }
        ontology
    }

    fn run(rule: impl ValidationRule + 'static, ontology: &Ontology) -> Vec<Issue> {
        Validator::new().with_rule(rule).validate(ontology).into_issues()
    }

    #[test]
    fn broader_and_narrower() {
        let ontology = linked(&[
            ("A", skos::BROADER, "B"),
            ("A", skos::NARROWER, "B"),
            ("A", skos::BROADER, "C"),
        ]);
        let issues = run(broader_narrower_rule().unwrap(), &ontology);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule_name(), "skos-broader-narrower");
        assert_eq!(issues[0].description(), "ex:B is both broader and narrower than ex:A");
    }

    #[test]
    fn related_and_hierarchical() {
        let ontology = linked(&[
            ("A", skos::RELATED, "B"),
            ("B", skos::NARROWER_TRANSITIVE, "A"),
            ("A", skos::RELATED, "C"),
        ]);
        let issues = run(RelatedHierarchyRule, &ontology);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].description().ends_with("by skos:narrowerTransitive"));
    }

    #[test]
    fn exact_and_other_mappings() {
        let ontology = linked(&[
            ("A", skos::EXACT_MATCH, "B"),
            ("A", skos::RELATED_MATCH, "B"),
            ("A", skos::EXACT_MATCH, "C"),
            ("C", skos::CLOSE_MATCH, "A"),
        ]);
        let issues = run(ExactMatchRule, &ontology);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].suggestion().contains("skos:relatedMatch"));
    }
}
