//! [SKOS](https://www.w3.org/TR/skos-reference/) integrity rules.
//!
//! The rules read the RDF projection of the ontology, so SKOS statements may be
//! written as annotation assertions or as property assertions alike.

mod labels;
mod relations;

pub use labels::{AlternativeLabelRule, HiddenLabelRule, PreferredLabelRule};
pub use relations::{ExactMatchRule, RelatedHierarchyRule, broader_narrower_rule, notation_rule};

use crate::error::RuleError;
use crate::rule::Solution;
use crate::validator::{ValidationContext, ValidationRule};
use std::sync::Arc;

/// The SKOS rules, in registry order.
pub fn rules() -> Result<Vec<Arc<dyn ValidationRule>>, RuleError> {
    let rules: [Arc<dyn ValidationRule>; 7] = [
        Arc::new(AlternativeLabelRule),
        Arc::new(HiddenLabelRule),
        Arc::new(PreferredLabelRule),
        Arc::new(notation_rule()?),
        Arc::new(broader_narrower_rule()?),
        Arc::new(RelatedHierarchyRule),
        Arc::new(ExactMatchRule),
    ];
    Ok(rules.into())
}

/// Renders the value bound to `variable`.
fn bound(context: &ValidationContext<'_>, solution: &Solution, variable: &str) -> String {
    solution
        .get(variable)
        .map_or_else(|| format!("?{variable}"), |term| context.display(term.as_ref()))
}
