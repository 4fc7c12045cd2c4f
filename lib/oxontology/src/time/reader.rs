//! Extraction of OWL-Time instants and intervals from an RDF graph.

use super::calendar::Calendar;
use super::coordinate::TimeCoordinate;
use super::instant::TimeInstant;
use super::interval::TimeInterval;
use super::position::{PositionReferenceSystem, TimePosition, TimeUnit};
use crate::error::TimeError;
use crate::vocab::{rdf, time};
use oxrdf::{Graph, NamedNode, NamedNodeRef, SubjectRef, TermRef};
use oxsdatatypes::{DateTime, Duration};
use rustc_hash::{FxHashMap, FxHashSet};
use std::str::FromStr;
use tracing::trace;

/// An individual typed as a temporal entity that could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntity {
    iri: NamedNode,
    reason: String,
}

impl SkippedEntity {
    #[inline]
    pub fn iri(&self) -> NamedNodeRef<'_> {
        self.iri.as_ref()
    }

    #[inline]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// The temporal entities found in a graph, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct TimeEntities {
    instants: Vec<TimeInstant>,
    intervals: Vec<TimeInterval>,
    skipped: Vec<SkippedEntity>,
}

impl TimeEntities {
    pub fn instants(&self) -> &[TimeInstant] {
        &self.instants
    }

    pub fn intervals(&self) -> &[TimeInterval] {
        &self.intervals
    }

    /// Entities typed `time:Instant` or `time:Interval` that have no usable value.
    pub fn skipped(&self) -> &[SkippedEntity] {
        &self.skipped
    }

    pub fn instant(&self, iri: NamedNodeRef<'_>) -> Option<&TimeInstant> {
        self.instants.iter().find(|instant| instant.iri() == iri)
    }

    pub fn interval(&self, iri: NamedNodeRef<'_>) -> Option<&TimeInterval> {
        self.intervals.iter().find(|interval| interval.iri() == iri)
    }
}

/// Reads instants and intervals from a graph.
///
/// Date-time descriptions are read in the Gregorian calendar unless they point with
/// `time:hasTRS` to a calendar registered with [`TimeReader::with_calendar`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct TimeReader {
    calendars: Vec<Calendar>,
}

impl TimeReader {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_calendar(mut self, calendar: Calendar) -> Self {
        self.calendars.push(calendar);
        self
    }

    pub fn read(&self, graph: &Graph) -> TimeEntities {
        let mut entities = TimeEntities::default();
        let mut instants = FxHashMap::default();
        for iri in instant_candidates(graph) {
            match self.read_instant(graph, iri.as_ref()) {
                Ok(instant) => {
                    instants.insert(iri, instant.clone());
                    entities.instants.push(instant);
                }
                Err(e) => entities.skipped.push(SkippedEntity {
                    iri,
                    reason: e.to_string(),
                }),
            }
        }
        for iri in typed_subjects(graph, &[time::INTERVAL, time::PROPER_INTERVAL]) {
            let instant_of = |property: NamedNodeRef<'_>| -> Result<Option<TimeInstant>, TimeError> {
                let Some(object) = graph.object_for_subject_predicate(iri.as_ref(), property) else {
                    return Ok(None);
                };
                let TermRef::NamedNode(node) = object else {
                    return Err(TimeError::invalid_coordinate(
                        "instant",
                        format!("{object} is not a named instant"),
                    ));
                };
                instants
                    .get(&node.into_owned())
                    .map(|instant| Some(instant.clone()))
                    .ok_or_else(|| {
                        TimeError::invalid_coordinate("instant", format!("{node} is not a readable instant"))
                    })
            };
            let beginning = instant_of(time::HAS_BEGINNING);
            let end = instant_of(time::HAS_END);
            match self.read_interval(graph, iri.clone(), beginning, end) {
                Ok(interval) => entities.intervals.push(interval),
                Err(e) => entities.skipped.push(SkippedEntity {
                    iri,
                    reason: e.to_string(),
                }),
            }
        }
        trace!(
            "Read {} instant(s), {} interval(s) and skipped {} entity(ies)",
            entities.instants.len(),
            entities.intervals.len(),
            entities.skipped.len()
        );
        entities
    }

    fn read_instant(&self, graph: &Graph, iri: NamedNodeRef<'_>) -> Result<TimeInstant, TimeError> {
        let date_time = graph
            .object_for_subject_predicate(iri, time::IN_XSD_DATE_TIME_STAMP)
            .or_else(|| graph.object_for_subject_predicate(iri, time::IN_XSD_DATE_TIME))
            .map(|value| parse_literal::<DateTime>(value, "inXSDDateTime"))
            .transpose()?;
        let description = graph
            .object_for_subject_predicate(iri, time::IN_DATE_TIME)
            .map(|node| self.read_description(graph, node))
            .transpose()?;
        let position = graph
            .object_for_subject_predicate(iri, time::IN_TIME_POSITION)
            .map(|node| read_position(graph, node))
            .transpose()?;
        TimeInstant::from_values(iri.into_owned(), date_time, description, position)
    }

    fn read_interval(
        &self,
        graph: &Graph,
        iri: NamedNode,
        beginning: Result<Option<TimeInstant>, TimeError>,
        end: Result<Option<TimeInstant>, TimeError>,
    ) -> Result<TimeInterval, TimeError> {
        if let Some(node) = graph.object_for_subject_predicate(iri.as_ref(), time::HAS_DATE_TIME_DESCRIPTION) {
            let start = self.read_description(graph, node)?;
            let unit = subject_of(node)
                .and_then(|node| graph.object_for_subject_predicate(node, time::UNIT_TYPE))
                .and_then(|unit| match unit {
                    TermRef::NamedNode(unit) => TimeUnit::from_iri(unit),
                    _ => None,
                })
                .ok_or_else(|| {
                    TimeError::invalid_coordinate("unitType", format!("{node} has no known time unit"))
                })?;
            return Ok(TimeInterval::described(iri, start, unit));
        }
        let beginning = beginning?;
        if let Some(duration) = graph.object_for_subject_predicate(iri.as_ref(), time::HAS_XSD_DURATION) {
            let duration = parse_literal::<Duration>(duration, "hasXSDDuration")?;
            let beginning = beginning.ok_or_else(|| {
                TimeError::invalid_coordinate("hasBeginning", format!("{iri} has a duration but no beginning"))
            })?;
            return Ok(TimeInterval::with_duration(iri, beginning, duration));
        }
        TimeInterval::bounded(iri, beginning, end?)
    }

    fn read_description(&self, graph: &Graph, node: TermRef<'_>) -> Result<TimeCoordinate, TimeError> {
        let node = subject_of(node).ok_or_else(|| {
            TimeError::invalid_coordinate("inDateTime", format!("{node} is not a description node"))
        })?;
        let component = |property: NamedNodeRef<'static>, dashes: &str| {
            graph
                .object_for_subject_predicate(node, property)
                .map(|value| match value {
                    TermRef::Literal(literal) => Ok(strip_timezone(literal.value())
                        .strip_prefix(dashes)
                        .unwrap_or_else(|| strip_timezone(literal.value()))
                        .to_owned()),
                    _ => Err(TimeError::invalid_coordinate(
                        component_name(property),
                        format!("{value} is not a literal"),
                    )),
                })
                .transpose()
        };
        let year = component(time::YEAR, "")?
            .ok_or_else(|| TimeError::invalid_coordinate("year", format!("{node} has no year")))?;
        let year = parse_number::<i64>(&year, "year")?;
        let month = component(time::MONTH, "--")?.map_or(Ok(1), |v| parse_number(&v, "month"))?;
        let day = component(time::DAY, "---")?.map_or(Ok(1), |v| parse_number(&v, "day"))?;
        let hour = component(time::HOUR, "")?.map_or(Ok(0), |v| parse_number(&v, "hour"))?;
        let minute = component(time::MINUTE, "")?.map_or(Ok(0), |v| parse_number(&v, "minute"))?;
        let second = component(time::SECOND, "")?.map_or(Ok(0.), |v| parse_number(&v, "second"))?;

        let calendar = match graph.object_for_subject_predicate(node, time::HAS_TRS) {
            None => Calendar::gregorian(),
            Some(TermRef::NamedNode(iri)) if iri == time::GREGORIAN => Calendar::gregorian(),
            Some(TermRef::NamedNode(iri)) => self
                .calendars
                .iter()
                .find(|calendar| calendar.iri() == iri)
                .ok_or_else(|| TimeError::invalid_calendar(format!("{iri} is not a known calendar")))?,
            Some(other) => {
                return Err(TimeError::invalid_calendar(format!("{other} is not a calendar IRI")));
            }
        };
        if calendar.is_gregorian() {
            TimeCoordinate::new(year, month, day, hour, minute, second)
        } else {
            TimeCoordinate::in_calendar(calendar, year, month, day, hour, minute, second)
        }
    }
}

fn read_position(graph: &Graph, node: TermRef<'_>) -> Result<TimePosition, TimeError> {
    let subject = subject_of(node).ok_or_else(|| {
        TimeError::invalid_coordinate("inTimePosition", format!("{node} is not a position node"))
    })?;
    let trs = match graph.object_for_subject_predicate(subject, time::HAS_TRS) {
        Some(TermRef::NamedNode(iri)) => PositionReferenceSystem::from_iri(iri),
        _ => {
            return Err(TimeError::invalid_coordinate(
                "hasTRS",
                format!("{node} has no reference system"),
            ));
        }
    };
    if let Some(value) = graph.object_for_subject_predicate(subject, time::NUMERIC_POSITION) {
        return TimePosition::numeric(trs, parse_literal::<f64>(value, "numericPosition")?);
    }
    match graph.object_for_subject_predicate(subject, time::NOMINAL_POSITION) {
        Some(TermRef::Literal(name)) => TimePosition::nominal(trs, name.value()),
        _ => Err(TimeError::invalid_coordinate(
            "numericPosition",
            format!("{node} has neither a numeric nor a nominal position"),
        )),
    }
}

/// Named subjects typed `time:Instant` or carrying an instant value.
fn instant_candidates(graph: &Graph) -> Vec<NamedNode> {
    let mut seen = FxHashSet::default();
    let mut candidates = Vec::new();
    let typed = typed_subjects(graph, &[time::INSTANT]);
    let valued = [
        time::IN_XSD_DATE_TIME_STAMP,
        time::IN_XSD_DATE_TIME,
        time::IN_DATE_TIME,
        time::IN_TIME_POSITION,
    ]
    .into_iter()
    .flat_map(|property| graph.triples_for_predicate(property))
    .filter_map(|t| match t.subject {
        SubjectRef::NamedNode(node) => Some(node.into_owned()),
        _ => None,
    });
    for iri in typed.into_iter().chain(valued) {
        if seen.insert(iri.clone()) {
            candidates.push(iri);
        }
    }
    candidates
}

fn typed_subjects(graph: &Graph, classes: &[NamedNodeRef<'_>]) -> Vec<NamedNode> {
    let mut seen = FxHashSet::default();
    classes
        .iter()
        .flat_map(|class| graph.subjects_for_predicate_object(rdf::TYPE, *class))
        .filter_map(|subject| match subject {
            SubjectRef::NamedNode(node) => Some(node.into_owned()),
            _ => None,
        })
        .filter(|node| seen.insert(node.clone()))
        .collect()
}

fn subject_of(term: TermRef<'_>) -> Option<SubjectRef<'_>> {
    match term {
        TermRef::NamedNode(node) => Some(node.into()),
        TermRef::BlankNode(node) => Some(node.into()),
        _ => None,
    }
}

fn parse_literal<T: FromStr>(term: TermRef<'_>, component: &'static str) -> Result<T, TimeError> {
    match term {
        TermRef::Literal(literal) => parse_number(literal.value(), component),
        _ => Err(TimeError::invalid_coordinate(
            component,
            format!("{term} is not a literal"),
        )),
    }
}

fn parse_number<T: FromStr>(value: &str, component: &'static str) -> Result<T, TimeError> {
    value
        .trim()
        .parse()
        .map_err(|_| TimeError::invalid_coordinate(component, format!("'{value}' is not a valid value")))
}

/// Removes a `Z` or `±hh:mm` suffix from a Gregorian component lexical form.
fn strip_timezone(value: &str) -> &str {
    if let Some(value) = value.strip_suffix('Z') {
        return value;
    }
    let bytes = value.as_bytes();
    if bytes.len() > 6
        && bytes[bytes.len() - 3] == b':'
        && matches!(bytes[bytes.len() - 6], b'+' | b'-')
    {
        return value.get(..bytes.len() - 6).unwrap_or(value);
    }
    value
}

fn component_name(property: NamedNodeRef<'static>) -> &'static str {
    property
        .as_str()
        .strip_prefix(time::NAMESPACE)
        .unwrap_or("component")
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::{BlankNode, Literal, TripleRef};
    use oxrdf::vocab::xsd;

    fn ex(local: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.org/{local}"))
    }

    #[test]
    fn gregorian_components_accept_lexical_forms() {
        assert_eq!(strip_timezone("2023Z"), "2023");
        assert_eq!(strip_timezone("--05+02:00"), "--05");
        assert_eq!(strip_timezone("-0044"), "-0044");
        assert_eq!(parse_number::<i64>("-0044", "year").unwrap(), -44);
    }

    #[test]
    fn read_instants_and_intervals() {
        let mut graph = Graph::new();
        let (a, b, span, described) = (ex("a"), ex("b"), ex("span"), ex("day"));
        let description = BlankNode::default();
        graph.insert(TripleRef::new(&a, rdf::TYPE, time::INSTANT));
        graph.insert(TripleRef::new(
            &a,
            time::IN_XSD_DATE_TIME_STAMP,
            &Literal::new_typed_literal("2023-05-01T20:47:15Z", xsd::DATE_TIME),
        ));
        graph.insert(TripleRef::new(&b, time::IN_DATE_TIME, &description));
        graph.insert(TripleRef::new(
            &description,
            time::YEAR,
            &Literal::new_typed_literal("-0044", xsd::G_YEAR),
        ));
        graph.insert(TripleRef::new(
            &description,
            time::MONTH,
            &Literal::new_typed_literal("--03", xsd::G_MONTH),
        ));
        graph.insert(TripleRef::new(
            &description,
            time::DAY,
            &Literal::new_typed_literal("---15", xsd::G_DAY),
        ));
        graph.insert(TripleRef::new(&span, rdf::TYPE, time::PROPER_INTERVAL));
        graph.insert(TripleRef::new(&span, time::HAS_BEGINNING, &b));
        graph.insert(TripleRef::new(&span, time::HAS_END, &a));
        graph.insert(TripleRef::new(&described, rdf::TYPE, time::INTERVAL));
        graph.insert(TripleRef::new(&described, time::HAS_BEGINNING, &ex("missing")));

        let entities = TimeReader::new().read(&graph);
        assert_eq!(entities.instants().len(), 2);
        assert_eq!(
            entities.instant(b.as_ref()).and_then(TimeInstant::coordinate),
            Some(TimeCoordinate::date(-44, 3, 15).unwrap())
        );
        let span = entities.interval(span.as_ref()).unwrap();
        assert!(span.bounds().is_some());
        assert_eq!(entities.skipped().len(), 1);
        assert_eq!(entities.skipped()[0].iri(), described.as_ref());
    }

    #[test]
    fn unknown_calendars_are_skipped() {
        let mut graph = Graph::new();
        let (instant, description) = (ex("i"), ex("i_description"));
        graph.insert(TripleRef::new(&instant, time::IN_DATE_TIME, &description));
        graph.insert(TripleRef::new(
            &description,
            time::YEAR,
            &Literal::new_typed_literal("12", xsd::G_YEAR),
        ));
        graph.insert(TripleRef::new(&description, time::HAS_TRS, &ex("mars")));
        let entities = TimeReader::new().read(&graph);
        assert!(entities.instants().is_empty());
        assert!(entities.skipped()[0].reason().contains("mars"));
    }
}
