//! Entity names: full IRIs or prefix-abbreviated IRIs, and prefix declarations.

use crate::error::ConstructionError;
use crate::vocab::{dc, owl, skos, time, xsd};
use oxrdf::NamedNode;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::LazyLock;

/// Namespaces every ontology can use without declaring them.
///
/// Abbreviated IRIs are resolved against the ontology prefixes first, then against this table.
pub const WELL_KNOWN_PREFIXES: &[(&str, &str)] = &[
    ("owl", owl::NAMESPACE),
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("xsd", xsd::NAMESPACE),
    ("xml", "http://www.w3.org/XML/1998/namespace"),
    ("skos", skos::NAMESPACE),
    ("skosxl", "http://www.w3.org/2008/05/skos-xl#"),
    ("time", time::NAMESPACE),
    ("dc", dc::NAMESPACE),
    ("dcterms", "http://purl.org/dc/terms/"),
    ("foaf", "http://xmlns.com/foaf/0.1/"),
    ("swrl", "http://www.w3.org/2003/11/swrl#"),
    ("greg", "http://www.w3.org/ns/time/gregorian#"),
];

/// The prefixes always written at the top of an OWL/XML document, in order.
pub const STANDARD_PREFIXES: &[&str] = &["owl", "rdf", "xml", "xsd", "rdfs"];

static WELL_KNOWN: LazyLock<FxHashMap<&'static str, &'static str>> =
    LazyLock::new(|| WELL_KNOWN_PREFIXES.iter().copied().collect());

/// Looks up a namespace in the table of well-known prefixes.
pub fn well_known_namespace(prefix: &str) -> Option<&'static str> {
    WELL_KNOWN.get(prefix).copied()
}

/// A `prefix:localName` pair, resolved lazily against prefix declarations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AbbreviatedIri {
    prefix: String,
    local_name: String,
}

impl AbbreviatedIri {
    /// Builds an abbreviated IRI from its two parts.
    ///
    /// The prefix may be empty (default namespace) and so may the local name, but not both.
    pub fn new(
        prefix: impl Into<String>,
        local_name: impl Into<String>,
    ) -> Result<Self, ConstructionError> {
        let prefix = prefix.into();
        let local_name = local_name.into();
        if prefix.is_empty() && local_name.is_empty() {
            return Err(ConstructionError::empty("AbbreviatedIri", "localName"));
        }
        if prefix.contains(':') || prefix.chars().any(char::is_whitespace) {
            return Err(ConstructionError::new(
                "AbbreviatedIri",
                "prefix",
                format!("'{prefix}' is not a valid prefix name"),
            ));
        }
        if local_name.chars().any(char::is_whitespace) {
            return Err(ConstructionError::new(
                "AbbreviatedIri",
                "localName",
                format!("'{local_name}' contains whitespace"),
            ));
        }
        Ok(Self { prefix, local_name })
    }

    /// Parses the `prefix:localName` form.
    pub fn parse(value: &str) -> Result<Self, ConstructionError> {
        let Some((prefix, local_name)) = value.split_once(':') else {
            return Err(ConstructionError::new(
                "AbbreviatedIri",
                "abbreviatedIRI",
                format!("'{value}' has no ':' separator"),
            ));
        };
        Self::new(prefix, local_name)
    }

    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[inline]
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Resolves against the given prefix declarations, then the well-known table.
    ///
    /// Unknown prefixes fall back to the literal `prefix:localName` string.
    pub fn resolve(&self, prefixes: &[Prefix]) -> NamedNode {
        match self.namespace(prefixes) {
            Some(namespace) => NamedNode::new_unchecked(format!("{namespace}{}", self.local_name)),
            None => NamedNode::new_unchecked(self.to_string()),
        }
    }

    /// Checks whether the prefix is declared or well known.
    pub fn is_resolvable(&self, prefixes: &[Prefix]) -> bool {
        self.namespace(prefixes).is_some()
    }

    fn namespace<'a>(&self, prefixes: &'a [Prefix]) -> Option<&'a str> {
        prefixes
            .iter()
            .rev()
            .find(|p| p.name == self.prefix)
            .map(|p| p.iri.as_str())
            .or_else(|| well_known_namespace(&self.prefix))
    }
}

impl fmt::Display for AbbreviatedIri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, self.local_name)
    }
}

/// The name of an OWL entity: exactly one of a full IRI or an abbreviated IRI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityName {
    /// A full IRI, written with the `IRI` attribute in OWL/XML.
    Iri(NamedNode),
    /// A prefixed name, written with the `abbreviatedIRI` attribute in OWL/XML.
    Abbreviated(AbbreviatedIri),
}

impl EntityName {
    /// Parses and validates a full IRI.
    pub fn iri(iri: impl Into<String>) -> Result<Self, ConstructionError> {
        let iri = iri.into();
        if iri.is_empty() {
            return Err(ConstructionError::empty("EntityName", "IRI"));
        }
        NamedNode::new(iri)
            .map(Self::Iri)
            .map_err(|e| ConstructionError::new("EntityName", "IRI", e.to_string()))
    }

    /// Builds a `prefix:localName` name.
    pub fn abbreviated(
        prefix: impl Into<String>,
        local_name: impl Into<String>,
    ) -> Result<Self, ConstructionError> {
        Ok(Self::Abbreviated(AbbreviatedIri::new(prefix, local_name)?))
    }

    /// The full IRI, if this name is not abbreviated.
    pub fn as_iri(&self) -> Option<&NamedNode> {
        match self {
            Self::Iri(iri) => Some(iri),
            Self::Abbreviated(_) => None,
        }
    }

    /// The abbreviated form, if any.
    pub fn as_abbreviated(&self) -> Option<&AbbreviatedIri> {
        match self {
            Self::Iri(_) => None,
            Self::Abbreviated(a) => Some(a),
        }
    }

    /// Resolves this name to a full IRI.
    pub fn resolve(&self, prefixes: &[Prefix]) -> NamedNode {
        match self {
            Self::Iri(iri) => iri.clone(),
            Self::Abbreviated(a) => a.resolve(prefixes),
        }
    }

    /// Compares two names by their resolved IRIs.
    pub fn same_as(&self, other: &Self, prefixes: &[Prefix]) -> bool {
        match (self, other) {
            (Self::Iri(a), Self::Iri(b)) => a == b,
            _ => self.resolve(prefixes) == other.resolve(prefixes),
        }
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(iri) => write!(f, "{iri}"),
            Self::Abbreviated(a) => write!(f, "{a}"),
        }
    }
}

impl From<NamedNode> for EntityName {
    #[inline]
    fn from(iri: NamedNode) -> Self {
        Self::Iri(iri)
    }
}

impl From<oxrdf::NamedNodeRef<'_>> for EntityName {
    #[inline]
    fn from(iri: oxrdf::NamedNodeRef<'_>) -> Self {
        Self::Iri(iri.into_owned())
    }
}

impl From<AbbreviatedIri> for EntityName {
    #[inline]
    fn from(iri: AbbreviatedIri) -> Self {
        Self::Abbreviated(iri)
    }
}

/// A prefix declaration, `Prefix(name:=<iri>)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Prefix {
    name: String,
    iri: NamedNode,
}

impl Prefix {
    /// Creates a prefix declaration. The name may be empty for the default namespace.
    pub fn new(name: impl Into<String>, iri: impl Into<String>) -> Result<Self, ConstructionError> {
        let name = name.into();
        if name.contains(':') {
            return Err(ConstructionError::new(
                "Prefix",
                "name",
                format!("'{name}' must not contain ':'"),
            ));
        }
        let iri = iri.into();
        if iri.is_empty() {
            return Err(ConstructionError::empty("Prefix", "IRI"));
        }
        let iri =
            NamedNode::new(iri).map_err(|e| ConstructionError::new("Prefix", "IRI", e.to_string()))?;
        Ok(Self { name, iri })
    }

    /// Returns the well-known declaration for `name`, if there is one.
    pub fn well_known(name: &str) -> Option<Self> {
        well_known_namespace(name).map(|iri| Self {
            name: name.to_owned(),
            iri: NamedNode::new_unchecked(iri),
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn iri(&self) -> &NamedNode {
        &self.iri
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Prefix({}:={})", self.name, self.iri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviated_resolution_prefers_declared_prefixes() {
        let name = EntityName::abbreviated("skos", "Concept").unwrap();
        assert_eq!(
            name.resolve(&[]).as_str(),
            "http://www.w3.org/2004/02/skos/core#Concept"
        );
        let custom = Prefix::new("skos", "http://example.org/skos#").unwrap();
        assert_eq!(
            name.resolve(&[custom]).as_str(),
            "http://example.org/skos#Concept"
        );
    }

    #[test]
    fn unknown_prefix_falls_back_to_the_written_form() {
        let name = AbbreviatedIri::parse("zz:Thing").unwrap();
        assert_eq!(name.resolve(&[]).as_str(), "zz:Thing");
    }

    #[test]
    fn names_compare_by_resolved_iri() {
        let full = EntityName::iri("http://www.w3.org/2002/07/owl#Thing").unwrap();
        let short = EntityName::abbreviated("owl", "Thing").unwrap();
        assert_ne!(full, short);
        assert!(full.same_as(&short, &[]));
    }

    #[test]
    fn invalid_names_are_rejected() {
        assert!(EntityName::iri("").is_err());
        assert!(EntityName::iri("not an iri").is_err());
        assert!(EntityName::abbreviated("", "").is_err());
        assert!(AbbreviatedIri::parse("noseparator").is_err());
        assert!(Prefix::new("ex", "").is_err());
    }
}
