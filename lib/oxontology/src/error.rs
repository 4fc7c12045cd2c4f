//! Error types for ontology construction, projection, OWL/XML decoding, rule setup and TIME handling.

use oxrdf::NamedNode;

/// Main error type for ontology operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum OwlError {
    /// A value object rejected its arguments.
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    /// An RDF graph could not be read back as an ontology.
    #[error(transparent)]
    Projection(#[from] ProjectionError),

    /// An OWL/XML document could not be decoded.
    #[error(transparent)]
    Xml(#[from] OwlXmlError),

    /// A rule could not be set up.
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// A temporal entity or reference system is invalid.
    #[error(transparent)]
    Time(#[from] TimeError),
}

/// Raised by every validating constructor when an argument breaks an invariant.
///
/// The error always names the type being built and the offending parameter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Cannot build {type_name}: invalid '{parameter}' ({message})")]
pub struct ConstructionError {
    type_name: &'static str,
    parameter: &'static str,
    message: String,
}

impl ConstructionError {
    /// Creates a new construction error.
    pub fn new(type_name: &'static str, parameter: &'static str, message: impl Into<String>) -> Self {
        Self {
            type_name,
            parameter,
            message: message.into(),
        }
    }

    /// Creates an error for a required list that is too short.
    pub fn too_few(type_name: &'static str, parameter: &'static str, minimum: usize, actual: usize) -> Self {
        Self::new(
            type_name,
            parameter,
            format!("expected at least {minimum} element(s), got {actual}"),
        )
    }

    /// Creates an error for a required string that is empty.
    pub fn empty(type_name: &'static str, parameter: &'static str) -> Self {
        Self::new(type_name, parameter, "value must not be empty")
    }

    /// The name of the type whose construction failed.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The name of the parameter that broke the invariant.
    pub fn parameter(&self) -> &'static str {
        self.parameter
    }

    /// Human readable explanation.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Error type for reading an ontology back from an RDF graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ProjectionError {
    /// The graph has no subject typed `owl:Ontology`.
    #[error("The graph does not contain any subject typed owl:Ontology")]
    MissingOntology,

    /// The graph has several subjects typed `owl:Ontology`.
    #[error("The graph declares several ontologies: {first} and {second}")]
    AmbiguousOntology { first: NamedNode, second: NamedNode },
}

/// Error type for OWL/XML decoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum OwlXmlError {
    /// Error from the XML tokenizer.
    #[error(transparent)]
    Syntax(#[from] quick_xml::Error),

    /// The document is not well formed (unbalanced tags, missing root...).
    #[error("Malformed OWL/XML document: {message}")]
    Malformed { message: String },

    /// An element name that is not part of the expected family.
    #[error("Unexpected element <{element}> where {expected} was expected")]
    UnexpectedElement { element: String, expected: &'static str },

    /// A required attribute is missing.
    #[error("Element <{element}> is missing attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: &'static str },

    /// An attribute value can not be used.
    #[error("Invalid value '{value}' for attribute '{attribute}' of <{element}>")]
    InvalidAttribute {
        element: String,
        attribute: &'static str,
        value: String,
    },

    /// A decoded element violates a construction invariant.
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    /// Writing the document failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The written document is not valid UTF-8.
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl OwlXmlError {
    /// Creates a malformed document error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Creates an unexpected element error.
    pub fn unexpected(element: impl Into<String>, expected: &'static str) -> Self {
        Self::UnexpectedElement {
            element: element.into(),
            expected,
        }
    }

    /// Creates a missing attribute error.
    pub fn missing_attribute(element: impl Into<String>, attribute: &'static str) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute,
        }
    }

    /// Creates an invalid attribute error.
    pub fn invalid_attribute(
        element: impl Into<String>,
        attribute: &'static str,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            element: element.into(),
            attribute,
            value: value.into(),
        }
    }
}

/// Error type for rule setup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RuleError {
    /// The rule has no antecedent atom.
    #[error("Rule '{rule}' has an empty antecedent")]
    EmptyAntecedent { rule: String },

    /// A variable used in the consequent or in a builtin is never bound by a triple atom.
    #[error("Variable ?{variable} of rule '{rule}' is not bound by any antecedent triple atom")]
    UnboundVariable { rule: String, variable: String },

    /// Invalid variable name.
    #[error("Invalid variable name '{name}'")]
    InvalidVariable { name: String },

    /// No validation rule is registered under this name.
    #[error("Unknown validation rule '{name}'")]
    UnknownRule { name: String },
}

/// Error type for TIME reference systems and entities.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TimeError {
    /// Calendar metrics are missing or inconsistent.
    #[error("Invalid calendar metrics: {message}")]
    InvalidCalendar { message: String },

    /// A coordinate component is out of the calendar range.
    #[error("Invalid coordinate component '{component}': {message}")]
    InvalidCoordinate {
        component: &'static str,
        message: String,
    },

    /// A temporal entity violates one of its construction invariants.
    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

impl TimeError {
    /// Creates an invalid calendar error.
    pub fn invalid_calendar(message: impl Into<String>) -> Self {
        Self::InvalidCalendar {
            message: message.into(),
        }
    }

    /// Creates an invalid coordinate error.
    pub fn invalid_coordinate(component: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidCoordinate {
            component,
            message: message.into(),
        }
    }
}

/// Result type for ontology operations.
pub type OwlResult<T> = Result<T, OwlError>;
