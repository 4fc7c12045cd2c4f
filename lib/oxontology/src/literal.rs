//! OWL literals.

use crate::error::ConstructionError;
use crate::iri::{EntityName, Prefix};
use crate::vocab::xsd;
use oxrdf::Literal;
use std::fmt;

/// An OWL literal.
///
/// Language tags are stored upper-cased. Datatypes may be abbreviated and are
/// only resolved when the literal is projected to RDF.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwlLiteral {
    value: String,
    kind: LiteralKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum LiteralKind {
    LanguageTagged(String),
    Typed(EntityName),
}

impl OwlLiteral {
    /// A plain `xsd:string` literal.
    pub fn new_simple(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: LiteralKind::Typed(xsd::STRING.into()),
        }
    }

    /// A language-tagged string. The tag is validated and upper-cased.
    pub fn new_language_tagged(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> Result<Self, ConstructionError> {
        let value = value.into();
        let language = language.into();
        if language.is_empty() {
            return Err(ConstructionError::empty("Literal", "xml:lang"));
        }
        Literal::new_language_tagged_literal(value.as_str(), language.as_str())
            .map_err(|e| ConstructionError::new("Literal", "xml:lang", e.to_string()))?;
        Ok(Self {
            value,
            kind: LiteralKind::LanguageTagged(language.to_ascii_uppercase()),
        })
    }

    /// A typed literal.
    pub fn new_typed(value: impl Into<String>, datatype: impl Into<EntityName>) -> Self {
        Self {
            value: value.into(),
            kind: LiteralKind::Typed(datatype.into()),
        }
    }

    /// The lexical form.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The upper-cased language tag, if any.
    #[inline]
    pub fn language(&self) -> Option<&str> {
        match &self.kind {
            LiteralKind::LanguageTagged(language) => Some(language),
            LiteralKind::Typed(_) => None,
        }
    }

    /// The datatype, if the literal is not language tagged.
    #[inline]
    pub fn datatype(&self) -> Option<&EntityName> {
        match &self.kind {
            LiteralKind::LanguageTagged(_) => None,
            LiteralKind::Typed(datatype) => Some(datatype),
        }
    }

    /// Converts to an RDF literal, lower-casing the language tag as RDF requires.
    pub fn to_rdf(&self, prefixes: &[Prefix]) -> Literal {
        match &self.kind {
            LiteralKind::LanguageTagged(language) => {
                Literal::new_language_tagged_literal_unchecked(
                    self.value.as_str(),
                    language.to_ascii_lowercase(),
                )
            }
            LiteralKind::Typed(datatype) => {
                let datatype = datatype.resolve(prefixes);
                if datatype == xsd::STRING {
                    Literal::new_simple_literal(self.value.as_str())
                } else {
                    Literal::new_typed_literal(self.value.as_str(), datatype)
                }
            }
        }
    }

    /// Builds a literal from its RDF form.
    pub fn from_rdf(literal: &Literal) -> Self {
        match literal.language() {
            Some(language) => Self {
                value: literal.value().to_owned(),
                kind: LiteralKind::LanguageTagged(language.to_ascii_uppercase()),
            },
            None => Self::new_typed(literal.value(), literal.datatype()),
        }
    }
}

impl fmt::Display for OwlLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.value.replace('\\', "\\\\").replace('"', "\\\""))?;
        match &self.kind {
            LiteralKind::LanguageTagged(language) => write!(f, "@{language}"),
            LiteralKind::Typed(EntityName::Iri(iri)) if *iri == xsd::STRING => Ok(()),
            LiteralKind::Typed(datatype) => write!(f, "^^{datatype}"),
        }
    }
}
