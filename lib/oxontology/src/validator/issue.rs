use std::fmt;

/// Severity of an [`Issue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IssueSeverity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => f.write_str("Info"),
            Self::Warning => f.write_str("Warning"),
            Self::Error => f.write_str("Error"),
        }
    }
}

/// A problem found by a validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Issue {
    severity: IssueSeverity,
    rule_name: String,
    description: String,
    suggestion: String,
}

impl Issue {
    pub fn new(
        severity: IssueSeverity,
        rule_name: impl Into<String>,
        description: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            rule_name: rule_name.into(),
            description: description.into(),
            suggestion: suggestion.into(),
        }
    }

    pub fn error(
        rule_name: impl Into<String>,
        description: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::new(IssueSeverity::Error, rule_name, description, suggestion)
    }

    pub fn warning(
        rule_name: impl Into<String>,
        description: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::new(IssueSeverity::Warning, rule_name, description, suggestion)
    }

    #[inline]
    pub fn severity(&self) -> IssueSeverity {
        self.severity
    }

    /// The name of the rule that raised this issue.
    #[inline]
    pub fn rule_name(&self) -> &str {
        &self.rule_name
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// How to fix the problem.
    #[inline]
    pub fn suggestion(&self) -> &str {
        &self.suggestion
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} ({})",
            self.severity, self.rule_name, self.description, self.suggestion
        )
    }
}

/// The ordered issues of a validation run.
///
/// Issues are grouped by rule, in rule selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    #[inline]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    /// True when no issue has the [`Error`](IssueSeverity::Error) severity.
    pub fn is_consistent(&self) -> bool {
        self.count(IssueSeverity::Error) == 0
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// The number of issues with the given severity.
    pub fn count(&self, severity: IssueSeverity) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == severity)
            .count()
    }

    /// The issues raised by one rule.
    pub fn issues_of<'a>(&'a self, rule_name: &'a str) -> impl Iterator<Item = &'a Issue> + 'a {
        self.issues.iter().filter(move |i| i.rule_name == rule_name)
    }
}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}

impl IntoIterator for ValidationReport {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}
