//! [OWL-Time](https://www.w3.org/TR/owl-time/) support.
//!
//! Instants and intervals are read from the RDF projection of an ontology with a
//! [`TimeReader`] and compared on Gregorian [`TimeCoordinate`]s:
//!
//! ```
//! use oxontology::time::{AllenRelation, TimeInstant, TimeInterval};
//! use oxrdf::NamedNode;
//!
//! fn instant(iri: &str, value: &str) -> Result<TimeInstant, Box<dyn std::error::Error>> {
//!     Ok(TimeInstant::from_date_time(NamedNode::new(iri)?, value.parse()?))
//! }
//!
//! let spring = TimeInterval::bounded(
//!     NamedNode::new("http://example.com/spring")?,
//!     Some(instant("http://example.com/march", "2023-03-20T21:24:00Z")?),
//!     Some(instant("http://example.com/june", "2023-06-21T14:57:00Z")?),
//! )?;
//! let may = instant("http://example.com/may", "2023-05-01T20:47:15Z")?;
//! assert!(may.inside(&spring));
//! assert_eq!(spring.relation_to(&spring), Some(AllenRelation::Equals));
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

mod allen;
mod calendar;
mod coordinate;
mod declaration;
mod instant;
mod interval;
mod position;
mod reader;
mod rules;

pub use allen::{AllenRelation, AllenRelations};
pub use calendar::{Calendar, CalendarMetrics};
pub use coordinate::TimeCoordinate;
pub use instant::{InstantValue, TimeInstant};
pub use interval::{IntervalValue, TimeInterval};
pub use position::{PositionReferenceSystem, PositionValue, TimePosition, TimeUnit};
pub use reader::{SkippedEntity, TimeEntities, TimeReader};
pub use rules::{EntityDefinitionRule, IntervalBoundsRule, RelationClashRule, RelationCoordinatesRule};

use crate::validator::ValidationRule;
use std::sync::Arc;

/// The OWL-Time rules, in registry order.
pub fn rules() -> Vec<Arc<dyn ValidationRule>> {
    let rules: [Arc<dyn ValidationRule>; 4] = [
        Arc::new(RelationClashRule),
        Arc::new(RelationCoordinatesRule),
        Arc::new(IntervalBoundsRule),
        Arc::new(EntityDefinitionRule),
    ];
    rules.into()
}
