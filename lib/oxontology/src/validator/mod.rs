//! Rule-based consistency validation.
//!
//! A [`Validator`] runs a selection of [`ValidationRule`]s over one snapshot of an
//! ontology and its RDF projection, and concatenates their [`Issue`]s in selection
//! order. Rules never mutate the ontology and never fail: data they can not make
//! sense of is skipped.
//!
//! ```
//! use oxontology::{Ontology, Validator};
//!
//! let validator = Validator::with_named_rules(&["skos-alternative-label"])?;
//! let report = validator.validate(&Ontology::default());
//! assert!(report.is_empty());
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

mod consistency;
mod issue;

pub use self::consistency::{
    AsymmetricPropertyRule, ClassAssertionDisjointnessRule, FunctionalDataPropertyRule,
    IrreflexivePropertyRule, NegativeAssertionRule, SameDifferentIndividualsRule,
    SubClassDisjointnessRule,
};
pub use self::issue::{Issue, IssueSeverity, ValidationReport};

use crate::entity::Individual;
use crate::error::RuleError;
use crate::event::{EventSink, default_sink};
use crate::iri::{EntityName, WELL_KNOWN_PREFIXES};
use crate::ontology::Ontology;
use crate::projection::GraphProjector;
use crate::rule::{Rule, Solution};
use oxrdf::{Graph, NamedNodeRef, TermRef};
use rayon::prelude::*;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A named check over an ontology.
///
/// Implementations must be pure: the same context always yields the same issues.
pub trait ValidationRule: Send + Sync {
    /// The registry name, e.g. `skos-notation`.
    fn name(&self) -> &str;

    fn validate(&self, context: &ValidationContext<'_>) -> Vec<Issue>;
}

/// What a rule sees: the ontology and its RDF projection.
pub struct ValidationContext<'a> {
    ontology: &'a Ontology,
    graph: Graph,
    sink: Arc<dyn EventSink>,
}

impl<'a> ValidationContext<'a> {
    /// Projects `ontology` once for all rules.
    pub fn new(ontology: &'a Ontology) -> Self {
        Self::with_sink(ontology, default_sink())
    }

    pub fn with_sink(ontology: &'a Ontology, sink: Arc<dyn EventSink>) -> Self {
        let graph = GraphProjector::new()
            .with_sink(Arc::clone(&sink))
            .project(ontology);
        Self {
            ontology,
            graph,
            sink,
        }
    }

    #[inline]
    pub fn ontology(&self) -> &'a Ontology {
        self.ontology
    }

    #[inline]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    #[inline]
    pub fn sink(&self) -> &dyn EventSink {
        self.sink.as_ref()
    }

    /// Abbreviates an IRI with the ontology prefixes, then with the well-known ones.
    ///
    /// IRIs no prefix applies to are written `<iri>`.
    pub fn compact(&self, iri: NamedNodeRef<'_>) -> String {
        let iri = iri.as_str();
        let declared = self
            .ontology
            .prefixes()
            .iter()
            .rev()
            .map(|p| (p.name(), p.iri().as_str()));
        let mut best: Option<(&str, &str)> = None;
        for (name, namespace) in declared.chain(WELL_KNOWN_PREFIXES.iter().copied()) {
            let Some(local) = iri.strip_prefix(namespace) else {
                continue;
            };
            if local.is_empty() || local.contains(['/', '#', ':']) {
                continue;
            }
            if best.is_none_or(|(_, l)| local.len() < l.len()) {
                best = Some((name, local));
            }
        }
        match best {
            Some((name, local)) => format!("{name}:{local}"),
            None => format!("<{iri}>"),
        }
    }

    /// Renders any term for an issue message.
    pub fn display(&self, term: TermRef<'_>) -> String {
        match term {
            TermRef::NamedNode(node) => self.compact(node),
            other => other.to_string(),
        }
    }

    /// Renders an entity name after resolution.
    pub fn display_name(&self, name: &EntityName) -> String {
        self.compact(self.ontology.resolve(name).as_ref())
    }

    pub fn display_individual(&self, individual: &Individual) -> String {
        match individual {
            Individual::Named(named) => self.display_name(named.name()),
            Individual::Anonymous(anonymous) => anonymous.to_string(),
        }
    }
}

/// Validator configuration.
#[derive(Debug, Clone, Default)]
pub struct ValidatorConfig {
    /// Whether the selected rules run on the rayon thread pool.
    pub parallel: bool,
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn parallel(mut self, value: bool) -> Self {
        self.parallel = value;
        self
    }
}

/// Runs a selection of rules over ontologies.
#[derive(Clone)]
pub struct Validator {
    rules: Vec<Arc<dyn ValidationRule>>,
    config: ValidatorConfig,
    sink: Arc<dyn EventSink>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("rules", &self.rule_names())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Validator {
    /// A validator without any rule.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            config: ValidatorConfig::default(),
            sink: default_sink(),
        }
    }

    /// A validator running every built-in rule, in registry order.
    pub fn standard() -> Result<Self, RuleError> {
        let mut validator = Self::new();
        validator.rules = builtin_rules()?;
        Ok(validator)
    }

    /// A validator running the named built-in rules, in the given order.
    ///
    /// Fails on the first unknown name.
    pub fn with_named_rules(names: &[&str]) -> Result<Self, RuleError> {
        let available = builtin_rules()?;
        let mut validator = Self::new();
        for name in names {
            let rule = available
                .iter()
                .find(|rule| rule.name() == *name)
                .ok_or_else(|| RuleError::UnknownRule {
                    name: (*name).to_owned(),
                })?;
            validator.rules.push(Arc::clone(rule));
        }
        Ok(validator)
    }

    /// Appends a rule to the selection.
    #[must_use]
    pub fn with_rule(mut self, rule: impl ValidationRule + 'static) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the receiver of run notifications.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Runs every selected rule and concatenates their issues in selection order.
    pub fn validate(&self, ontology: &Ontology) -> ValidationReport {
        let context = ValidationContext::with_sink(ontology, Arc::clone(&self.sink));
        let run = |rule: &Arc<dyn ValidationRule>| {
            let issues = rule.validate(&context);
            debug!("Rule {} raised {} issue(s)", rule.name(), issues.len());
            issues
        };
        let results: Vec<Vec<Issue>> = if self.config.parallel {
            self.rules.par_iter().map(run).collect()
        } else {
            self.rules.iter().map(run).collect()
        };
        let report = ValidationReport::new(results.into_iter().flatten().collect());
        self.sink.info(&format!(
            "Validation with {} rule(s) found {} error(s), {} warning(s) and {} info(s)",
            self.rules.len(),
            report.count(IssueSeverity::Error),
            report.count(IssueSeverity::Warning),
            report.count(IssueSeverity::Info),
        ));
        report
    }
}

/// Every built-in rule, in registry order: OWL, then SKOS, then TIME.
pub fn builtin_rules() -> Result<Vec<Arc<dyn ValidationRule>>, RuleError> {
    let mut rules = consistency::rules();
    rules.extend(crate::skos::rules()?);
    rules.extend(crate::time::rules());
    Ok(rules)
}

impl Ontology {
    /// Runs the named built-in rules over this ontology.
    pub fn validate(&self, rule_names: &[&str]) -> Result<ValidationReport, RuleError> {
        Ok(Validator::with_named_rules(rule_names)?.validate(self))
    }
}

/// A validation rule backed by a compiled [`Rule`]: one issue per solution.
pub struct PatternRule {
    rule: Rule,
    severity: IssueSeverity,
    report: fn(&ValidationContext<'_>, &Solution) -> (String, String),
}

impl PatternRule {
    /// `report` turns a solution into a description and a suggestion.
    pub fn new(
        rule: Rule,
        severity: IssueSeverity,
        report: fn(&ValidationContext<'_>, &Solution) -> (String, String),
    ) -> Self {
        Self {
            rule,
            severity,
            report,
        }
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }
}

impl ValidationRule for PatternRule {
    fn name(&self) -> &str {
        self.rule.name()
    }

    fn validate(&self, context: &ValidationContext<'_>) -> Vec<Issue> {
        self.rule
            .evaluate(context.graph())
            .iter()
            .map(|solution| {
                let (description, suggestion) = (self.report)(context, solution);
                Issue::new(self.severity, self.rule.name(), description, suggestion)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::tests::RecordingSink;
    use crate::iri::Prefix;

    struct Constant(&'static str, usize);

    impl ValidationRule for Constant {
        fn name(&self) -> &str {
            self.0
        }

        fn validate(&self, _: &ValidationContext<'_>) -> Vec<Issue> {
            (0..self.1)
                .map(|i| Issue::warning(self.0, format!("issue {i}"), "none"))
                .collect()
        }
    }

    #[test]
    fn issues_follow_rule_order() {
        for parallel in [false, true] {
            let validator = Validator::new()
                .with_rule(Constant("b", 2))
                .with_rule(Constant("a", 1))
                .with_rule(Constant("c", 3))
                .with_config(ValidatorConfig::new().parallel(parallel));
            let report = validator.validate(&Ontology::default());
            let names: Vec<_> = report.issues().iter().map(Issue::rule_name).collect();
            assert_eq!(names, ["b", "b", "a", "c", "c", "c"]);
            assert!(report.is_consistent());
            assert_eq!(report.count(IssueSeverity::Warning), 6);
        }
    }

    #[test]
    fn unknown_rule_names_are_rejected() {
        assert_eq!(
            Validator::with_named_rules(&["skos-notation", "nope"]).unwrap_err(),
            RuleError::UnknownRule {
                name: "nope".into()
            }
        );
        let validator =
            Validator::with_named_rules(&["skos-notation", "owl-irreflexive-property"]).unwrap();
        assert_eq!(
            validator.rule_names(),
            ["skos-notation", "owl-irreflexive-property"]
        );
    }

    #[test]
    fn builtin_rule_names_are_unique() {
        let rules = builtin_rules().unwrap();
        let mut names: Vec<_> = rules.iter().map(|r| r.name().to_owned()).collect();
        let count = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), count);
        assert_eq!(Validator::standard().unwrap().rule_names().len(), count);
    }

    #[test]
    fn compaction_prefers_ontology_prefixes() {
        let mut ontology = Ontology::default();
        ontology.add_prefix(Prefix::new("ex", "http://example.org/").unwrap());
        let context = ValidationContext::new(&ontology);
        let iri = |s: &'static str| NamedNodeRef::new_unchecked(s);
        assert_eq!(context.compact(iri("http://example.org/ConceptA")), "ex:ConceptA");
        assert_eq!(
            context.compact(iri("http://www.w3.org/2004/02/skos/core#Concept")),
            "skos:Concept"
        );
        assert_eq!(
            context.compact(iri("http://example.org/a/b")),
            "<http://example.org/a/b>"
        );
        assert_eq!(context.compact(iri("http://example.org/")), "<http://example.org/>");
    }

    #[test]
    fn runs_are_reported_to_the_sink() {
        let sink = Arc::new(RecordingSink::default());
        Validator::new()
            .with_rule(Constant("a", 1))
            .with_sink(sink.clone())
            .validate(&Ontology::default());
        let infos = sink.infos.lock().unwrap();
        assert_eq!(
            infos.last().map(String::as_str),
            Some("Validation with 1 rule(s) found 0 error(s), 1 warning(s) and 0 info(s)")
        );
    }
}
