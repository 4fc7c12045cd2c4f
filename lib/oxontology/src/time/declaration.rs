use super::coordinate::TimeCoordinate;
use super::instant::{InstantValue, TimeInstant};
use super::interval::{IntervalValue, TimeInterval};
use super::position::{PositionValue, TimePosition, TimeUnit};
use super::reader::{TimeEntities, TimeReader};
use crate::axiom::Axiom;
use crate::entity::{Class, DataProperty, NamedIndividual, ObjectProperty};
use crate::literal::OwlLiteral;
use crate::ontology::Ontology;
use crate::vocab::{time, xsd};
use oxrdf::{NamedNode, NamedNodeRef};

impl Ontology {
    /// The instants and intervals described by this ontology's assertions.
    pub fn time_entities(&self) -> TimeEntities {
        TimeReader::new().read(&self.to_graph())
    }

    /// Adds the assertions describing `instant`.
    ///
    /// A date-time description is written as the individual `<{iri}_description>` and a
    /// position as `<{iri}_position>`.
    pub fn declare_instant(&mut self, instant: &TimeInstant) {
        let iri = instant.iri();
        self.assert_type(iri, time::INSTANT);
        match instant.value() {
            InstantValue::DateTime(value) => {
                let (property, datatype) = if value.timezone_offset().is_some() {
                    (time::IN_XSD_DATE_TIME_STAMP, xsd::DATE_TIME_STAMP)
                } else {
                    (time::IN_XSD_DATE_TIME, xsd::DATE_TIME)
                };
                self.assert_value(iri, property, OwlLiteral::new_typed(value.to_string(), datatype));
            }
            InstantValue::Description(coordinate) => {
                let description = suffixed(iri, "description");
                self.assert_link(iri, time::IN_DATE_TIME, description.as_ref());
                self.declare_description(description.as_ref(), coordinate, None);
            }
            InstantValue::Position(position) => {
                let node = suffixed(iri, "position");
                self.assert_link(iri, time::IN_TIME_POSITION, node.as_ref());
                self.declare_position(node.as_ref(), position);
            }
        }
    }

    /// Adds the assertions describing `interval`, and those of its bounding instants.
    pub fn declare_interval(&mut self, interval: &TimeInterval) {
        let iri = interval.iri();
        self.assert_type(iri, time::INTERVAL);
        match interval.value() {
            IntervalValue::Bounded { beginning, end } => {
                for (property, instant) in [(time::HAS_BEGINNING, beginning), (time::HAS_END, end)] {
                    if let Some(instant) = instant {
                        self.assert_link(iri, property, instant.iri());
                        self.declare_instant(instant);
                    }
                }
            }
            IntervalValue::Duration {
                beginning,
                duration,
            } => {
                self.assert_link(iri, time::HAS_BEGINNING, beginning.iri());
                self.declare_instant(beginning);
                self.assert_value(
                    iri,
                    time::HAS_XSD_DURATION,
                    OwlLiteral::new_typed(duration.to_string(), xsd::DURATION),
                );
            }
            IntervalValue::Description { start, unit } => {
                let description = suffixed(iri, "description");
                self.assert_link(iri, time::HAS_DATE_TIME_DESCRIPTION, description.as_ref());
                self.declare_description(description.as_ref(), start, Some(*unit));
            }
        }
    }

    fn declare_description(
        &mut self,
        node: NamedNodeRef<'_>,
        coordinate: &TimeCoordinate,
        unit: Option<TimeUnit>,
    ) {
        self.assert_type(node, time::DATE_TIME_DESCRIPTION);
        if let Some(calendar) = coordinate.calendar() {
            self.assert_link(node, time::HAS_TRS, calendar.as_ref());
        }
        if let Some(unit) = unit {
            self.assert_link(node, time::UNIT_TYPE, unit.iri());
        }
        let year = coordinate.year();
        let year = if year < 0 {
            format!("-{:04}", year.unsigned_abs())
        } else {
            format!("{year:04}")
        };
        let components = [
            (time::YEAR, OwlLiteral::new_typed(year, xsd::G_YEAR)),
            (
                time::MONTH,
                OwlLiteral::new_typed(format!("--{:02}", coordinate.month()), xsd::G_MONTH),
            ),
            (
                time::DAY,
                OwlLiteral::new_typed(format!("---{:02}", coordinate.day()), xsd::G_DAY),
            ),
            (
                time::HOUR,
                OwlLiteral::new_typed(coordinate.hour().to_string(), xsd::NON_NEGATIVE_INTEGER),
            ),
            (
                time::MINUTE,
                OwlLiteral::new_typed(coordinate.minute().to_string(), xsd::NON_NEGATIVE_INTEGER),
            ),
            (
                time::SECOND,
                OwlLiteral::new_typed(coordinate.second().to_string(), xsd::DECIMAL),
            ),
        ];
        for (property, value) in components {
            self.assert_value(node, property, value);
        }
    }

    fn declare_position(&mut self, node: NamedNodeRef<'_>, position: &TimePosition) {
        self.assert_type(node, time::TIME_POSITION);
        self.assert_link(node, time::HAS_TRS, position.trs().iri());
        match position.value() {
            PositionValue::Numeric(value) => self.assert_value(
                node,
                time::NUMERIC_POSITION,
                OwlLiteral::new_typed(value.to_string(), xsd::DECIMAL),
            ),
            PositionValue::Nominal(name) => {
                self.assert_value(node, time::NOMINAL_POSITION, OwlLiteral::new_simple(name.as_str()));
            }
        }
    }

    fn assert_type(&mut self, individual: NamedNodeRef<'_>, class: NamedNodeRef<'_>) {
        self.add_axiom(Axiom::class_assertion(
            Class::new(class),
            NamedIndividual::new(individual),
        ));
    }

    fn assert_link(
        &mut self,
        source: NamedNodeRef<'_>,
        property: NamedNodeRef<'_>,
        target: NamedNodeRef<'_>,
    ) {
        self.add_axiom(Axiom::object_property_assertion(
            ObjectProperty::new(property),
            NamedIndividual::new(source),
            NamedIndividual::new(target),
        ));
    }

    fn assert_value(&mut self, source: NamedNodeRef<'_>, property: NamedNodeRef<'_>, value: OwlLiteral) {
        self.add_axiom(Axiom::data_property_assertion(
            DataProperty::new(property),
            NamedIndividual::new(source),
            value,
        ));
    }
}

fn suffixed(iri: NamedNodeRef<'_>, suffix: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("{}_{suffix}", iri.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::calendar::{Calendar, CalendarMetrics};
    use crate::time::position::PositionReferenceSystem;

    fn ex(local: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.org/{local}"))
    }

    #[test]
    fn declared_entities_read_back() {
        let stamp = TimeInstant::from_date_time(ex("stamp"), "2023-05-01T20:47:15Z".parse().unwrap());
        let naive = TimeInstant::from_date_time(ex("naive"), "2023-05-02T00:00:00".parse().unwrap());
        let ides = TimeInstant::new(
            ex("ides"),
            InstantValue::Description(TimeCoordinate::new(-44, 3, 15, 11, 30, 12.5).unwrap()),
        );
        let epoch = TimeInstant::new(
            ex("epoch"),
            InstantValue::Position(TimePosition::numeric(PositionReferenceSystem::UnixTime, 1.5).unwrap()),
        );
        let jurassic = TimeInstant::new(
            ex("jurassic"),
            InstantValue::Position(
                TimePosition::nominal(PositionReferenceSystem::GeologicTime, "Jurassic").unwrap(),
            ),
        );
        let bounded = TimeInterval::bounded(ex("bounded"), Some(stamp.clone()), Some(naive.clone())).unwrap();
        let month = TimeInterval::with_duration(ex("month"), ides.clone(), "P1M".parse().unwrap());
        let day = TimeInterval::described(ex("day"), TimeCoordinate::date(2023, 5, 1).unwrap(), TimeUnit::Day);

        let mut ontology = Ontology::default();
        for instant in [&epoch, &jurassic] {
            ontology.declare_instant(instant);
        }
        for interval in [&bounded, &month, &day] {
            ontology.declare_interval(interval);
        }

        let entities = ontology.time_entities();
        assert!(entities.skipped().is_empty(), "{:?}", entities.skipped());
        for instant in [&stamp, &naive, &ides, &epoch, &jurassic] {
            assert_eq!(entities.instant(instant.iri()), Some(instant));
        }
        for interval in [&bounded, &month, &day] {
            assert_eq!(entities.interval(interval.iri()), Some(interval));
        }
        assert_eq!(entities.intervals().len(), 3);
    }

    #[test]
    fn custom_calendars_are_declared() {
        let calendar = Calendar::new(
            ex("decimal"),
            CalendarMetrics::new(vec![36; 10], 10, 100, 100).unwrap(),
        );
        let coordinate = TimeCoordinate::in_calendar(&calendar, 12, 10, 36, 9, 99, 50.).unwrap();
        let mut ontology = Ontology::default();
        ontology.declare_instant(&TimeInstant::new(ex("i"), InstantValue::Description(coordinate.clone())));

        assert_eq!(ontology.time_entities().skipped().len(), 1);
        let entities = TimeReader::new()
            .with_calendar(calendar)
            .read(&ontology.to_graph());
        let read = entities.instant(ex("i").as_ref()).and_then(TimeInstant::coordinate).unwrap();
        assert_eq!(read, coordinate);
        assert_eq!(read.calendar(), Some(&ex("decimal")));
    }
}
