use super::allen::{AllenRelation, AllenRelations};
use super::reader::TimeReader;
use crate::validator::{Issue, ValidationContext, ValidationRule};
use crate::vocab::time;
use oxrdf::{NamedNodeRef, SubjectRef, TermRef};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;

/// Properties declaring a relation between two temporal entities.
const RELATION_PROPERTIES: [NamedNodeRef<'static>; 17] = [
    time::BEFORE,
    time::AFTER,
    time::INTERVAL_BEFORE,
    time::INTERVAL_AFTER,
    time::INTERVAL_MEETS,
    time::INTERVAL_MET_BY,
    time::INTERVAL_OVERLAPS,
    time::INTERVAL_OVERLAPPED_BY,
    time::INTERVAL_STARTS,
    time::INTERVAL_STARTED_BY,
    time::INTERVAL_DURING,
    time::INTERVAL_CONTAINS,
    time::INTERVAL_FINISHES,
    time::INTERVAL_FINISHED_BY,
    time::INTERVAL_EQUALS,
    time::INTERVAL_IN,
    time::INTERVAL_DISJOINT,
];

/// Declared relations between named entities, as `(from, property, to)`.
fn declared_relations<'a>(
    context: &'a ValidationContext<'_>,
) -> impl Iterator<Item = (NamedNodeRef<'a>, NamedNodeRef<'static>, NamedNodeRef<'a>)> + 'a {
    RELATION_PROPERTIES.into_iter().flat_map(move |property| {
        context
            .graph()
            .triples_for_predicate(property)
            .filter_map(move |t| match (t.subject, t.object) {
                (SubjectRef::NamedNode(from), TermRef::NamedNode(to)) => Some((from, property, to)),
                _ => None,
            })
    })
}

/// Relations declared between the same two entities that can not hold together.
///
/// `a intervalIn b` and `b intervalContains a` agree on `a intervalDuring b`, while
/// `a intervalBefore b` and `a intervalMeets b` do not.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationClashRule;

impl RelationClashRule {
    pub const NAME: &'static str = "time-relation-clash";
}

impl ValidationRule for RelationClashRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, context: &ValidationContext<'_>) -> Vec<Issue> {
        let mut pairs = FxHashMap::default();
        let mut order = Vec::new();
        for (from, property, to) in declared_relations(context) {
            let Some(mut relations) = AllenRelations::declared_by(property) else {
                continue;
            };
            let key = match from.as_str().cmp(to.as_str()) {
                Ordering::Less => (from, to),
                Ordering::Equal => {
                    relations = relations.intersection(AllenRelations::single(AllenRelation::Equals));
                    (from, to)
                }
                Ordering::Greater => {
                    relations = relations.inverse();
                    (to, from)
                }
            };
            let (possible, properties) = pairs.entry(key).or_insert_with(|| {
                order.push(key);
                (AllenRelations::ANY, Vec::new())
            });
            *possible = AllenRelations::intersection(*possible, relations);
            properties.push((from, property, to));
        }
        order
            .into_iter()
            .filter_map(|key| {
                let (possible, properties) = pairs.get(&key)?;
                if !possible.is_empty() {
                    return None;
                }
                let (a, b) = (context.compact(key.0), context.compact(key.1));
                let declared = properties
                    .iter()
                    .map(|(from, property, to)| {
                        format!(
                            "{} {} {}",
                            context.compact(*from),
                            context.compact(*property),
                            context.compact(*to)
                        )
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                Some(Issue::error(
                    Self::NAME,
                    format!("The relations {declared} can not hold together"),
                    format!("Remove the wrong relation between {a} and {b}"),
                ))
            })
            .collect()
    }
}

/// Declared relations contradicted by the positions of the related entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationCoordinatesRule;

impl RelationCoordinatesRule {
    pub const NAME: &'static str = "time-relation-coordinates";
}

impl ValidationRule for RelationCoordinatesRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, context: &ValidationContext<'_>) -> Vec<Issue> {
        let entities = TimeReader::new().read(context.graph());
        let mut issues = Vec::new();
        let mut contradiction = |from: NamedNodeRef<'_>, property, to: NamedNodeRef<'_>, actual: String| {
            let (from, to) = (context.compact(from), context.compact(to));
            let property = context.compact(property);
            issues.push(Issue::error(
                Self::NAME,
                format!("{from} {property} {to} is declared but {actual}"),
                format!("Fix the relation {property} between {from} and {to} or their positions"),
            ));
        };
        for (from, property, to) in declared_relations(context) {
            if let (Some(a), Some(b)) = (entities.interval(from), entities.interval(to)) {
                let Some(declared) = AllenRelations::declared_by(property) else {
                    continue;
                };
                if let Some(actual) = a.relation_to(b).filter(|actual| !declared.contains(*actual)) {
                    contradiction(
                        from,
                        property,
                        to,
                        format!("their bounds give {}", context.compact(actual.iri())),
                    );
                }
            } else if let (Some(a), Some(b)) = (entities.instant(from), entities.instant(to)) {
                let (Some(at), Some(other)) = (a.coordinate(), b.coordinate()) else {
                    continue;
                };
                let holds = if property == time::BEFORE {
                    at < other
                } else if property == time::AFTER {
                    at > other
                } else {
                    continue;
                };
                if !holds {
                    contradiction(from, property, to, format!("they are at {at} and {other}"));
                }
            }
        }
        for t in context.graph().triples_for_predicate(time::HAS_INSIDE) {
            let (SubjectRef::NamedNode(from), TermRef::NamedNode(to)) = (t.subject, t.object) else {
                continue;
            };
            let (Some(interval), Some(instant)) = (entities.interval(from), entities.instant(to)) else {
                continue;
            };
            let (Some((beginning, end)), Some(at)) = (interval.bounds(), instant.coordinate()) else {
                continue;
            };
            if !instant.inside(interval) {
                contradiction(
                    from,
                    time::HAS_INSIDE,
                    to,
                    format!("{at} is not between {beginning} and {end}"),
                );
            }
        }
        issues
    }
}

/// Intervals ending before they begin, or at the same time.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalBoundsRule;

impl IntervalBoundsRule {
    pub const NAME: &'static str = "time-interval-bounds";
}

impl ValidationRule for IntervalBoundsRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, context: &ValidationContext<'_>) -> Vec<Issue> {
        TimeReader::new()
            .read(context.graph())
            .intervals()
            .iter()
            .filter_map(|interval| {
                let (beginning, end) = (interval.beginning()?, interval.end()?);
                let name = context.compact(interval.iri());
                match beginning.cmp(&end) {
                    Ordering::Less => None,
                    Ordering::Equal => Some(Issue::warning(
                        Self::NAME,
                        format!("{name} begins and ends at {beginning}"),
                        format!("Declare {name} as an instant"),
                    )),
                    Ordering::Greater => Some(Issue::error(
                        Self::NAME,
                        format!("{name} begins at {beginning} after its end at {end}"),
                        format!("Swap the beginning and the end of {name}"),
                    )),
                }
            })
            .collect()
    }
}

/// Temporal entities whose values can not be read.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityDefinitionRule;

impl EntityDefinitionRule {
    pub const NAME: &'static str = "time-entity-definition";
}

impl ValidationRule for EntityDefinitionRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, context: &ValidationContext<'_>) -> Vec<Issue> {
        TimeReader::new()
            .read(context.graph())
            .skipped()
            .iter()
            .map(|skipped| {
                let name = context.compact(skipped.iri());
                Issue::warning(
                    Self::NAME,
                    format!("{name} is ignored: {}", skipped.reason()),
                    format!("Give {name} exactly one position, or instants as bounds"),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axiom::Axiom;
    use crate::entity::{Class, NamedIndividual, ObjectProperty};
    use crate::ontology::Ontology;
    use crate::time::{TimeInstant, TimeInterval};
    use crate::validator::{IssueSeverity, Validator};
    use oxrdf::NamedNode;

    fn ex(local: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.org/{local}"))
    }

    fn instant(local: &str, value: &str) -> TimeInstant {
        TimeInstant::from_date_time(ex(local), value.parse().unwrap())
    }

    fn interval(local: &str, beginning: &str, end: &str) -> TimeInterval {
        TimeInterval::bounded(
            ex(local),
            Some(instant(&format!("{local}_beginning"), beginning)),
            Some(instant(&format!("{local}_end"), end)),
        )
        .unwrap()
    }

    fn relate(ontology: &mut Ontology, from: &str, property: NamedNodeRef<'_>, to: &str) {
        ontology.add_axiom(Axiom::object_property_assertion(
            ObjectProperty::new(property),
            NamedIndividual::new(ex(from)),
            NamedIndividual::new(ex(to)),
        ));
    }

    fn run(rule: impl ValidationRule + 'static, ontology: &Ontology) -> Vec<Issue> {
        Validator::new().with_rule(rule).validate(ontology).into_issues()
    }

    #[test]
    fn clashing_declarations() {
        let mut ontology = Ontology::default();
        relate(&mut ontology, "a", time::INTERVAL_IN, "b");
        relate(&mut ontology, "b", time::INTERVAL_CONTAINS, "a");
        assert!(run(RelationClashRule, &ontology).is_empty());

        relate(&mut ontology, "a", time::INTERVAL_DISJOINT, "b");
        let issues = run(RelationClashRule, &ontology);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].description().contains("time:intervalDisjoint"));

        let mut ontology = Ontology::default();
        relate(&mut ontology, "x", time::BEFORE, "x");
        assert_eq!(run(RelationClashRule, &ontology).len(), 1);
    }

    #[test]
    fn relations_against_bounds() {
        let mut ontology = Ontology::default();
        ontology.declare_interval(&interval("early", "2023-01-01T00:00:00Z", "2023-01-05T00:00:00Z"));
        ontology.declare_interval(&interval("late", "2023-01-05T00:00:00Z", "2023-01-09T00:00:00Z"));
        relate(&mut ontology, "early", time::INTERVAL_MEETS, "late");
        relate(&mut ontology, "early", time::INTERVAL_DISJOINT, "late");
        relate(&mut ontology, "late", time::INTERVAL_MET_BY, "early");
        assert!(run(RelationCoordinatesRule, &ontology).is_empty());

        relate(&mut ontology, "early", time::INTERVAL_OVERLAPS, "late");
        let issues = run(RelationCoordinatesRule, &ontology);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].description().contains("time:intervalMeets"));
    }

    #[test]
    fn instant_relations_against_positions() {
        let mut ontology = Ontology::default();
        ontology.declare_instant(&instant("first", "2023-05-01T20:47:15Z"));
        ontology.declare_instant(&instant("second", "2023-05-02T20:47:15Z"));
        ontology.declare_interval(&interval("may", "2023-05-01T00:00:00Z", "2023-06-01T00:00:00Z"));
        relate(&mut ontology, "first", time::BEFORE, "second");
        relate(&mut ontology, "may", time::HAS_INSIDE, "second");
        assert!(run(RelationCoordinatesRule, &ontology).is_empty());

        relate(&mut ontology, "first", time::AFTER, "second");
        relate(&mut ontology, "may", time::HAS_INSIDE, "may_beginning");
        let issues = run(RelationCoordinatesRule, &ontology);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|issue| issue.severity() == IssueSeverity::Error));
    }

    #[test]
    fn interval_bounds() {
        let mut ontology = Ontology::default();
        ontology.declare_interval(&interval("fine", "2023-01-01T00:00:00Z", "2023-01-02T00:00:00Z"));
        ontology.declare_interval(&interval("empty", "2023-01-01T00:00:00Z", "2023-01-01T01:00:00+01:00"));
        ontology.declare_interval(&interval("reversed", "2023-01-02T00:00:00Z", "2023-01-01T00:00:00Z"));
        let issues = run(IntervalBoundsRule, &ontology);
        assert_eq!(issues.len(), 2);
        let severity_of = |name: &str| {
            issues
                .iter()
                .find(|issue| issue.description().contains(name))
                .map(Issue::severity)
        };
        assert_eq!(severity_of("empty>"), Some(IssueSeverity::Warning));
        assert_eq!(severity_of("reversed>"), Some(IssueSeverity::Error));
    }

    #[test]
    fn undefined_entities() {
        let mut ontology = Ontology::default();
        ontology.add_axiom(Axiom::class_assertion(
            Class::new(time::INSTANT),
            NamedIndividual::new(ex("nowhere")),
        ));
        ontology.declare_instant(&instant("somewhere", "2023-05-01T20:47:15Z"));
        let issues = run(EntityDefinitionRule, &ontology);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity(), IssueSeverity::Warning);
        assert!(issues[0].description().contains("nowhere"));
    }
}
