//! Vocabularies used by the projection, the OWL/XML codec and the rule sets.
//!
//! `rdf`, `rdfs` and `xsd` come from [`oxrdf::vocab`]; the others are defined here.

pub use oxrdf::vocab::{rdf, rdfs};

pub mod xsd {
    //! [XML Schema](https://www.w3.org/TR/xmlschema11-2/) datatypes.
    pub use oxrdf::vocab::xsd::*;
    use oxrdf::NamedNodeRef;

    /// The XML Schema namespace.
    pub const NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";
    /// `xsd:dateTimeStamp`
    pub const DATE_TIME_STAMP: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#dateTimeStamp");
}

pub mod owl {
    //! [OWL 2](https://www.w3.org/TR/owl2-mapping-to-rdf/) vocabulary.
    use oxrdf::NamedNodeRef;

    /// The OWL namespace.
    pub const NAMESPACE: &str = "http://www.w3.org/2002/07/owl#";

    pub const ALL_DIFFERENT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#AllDifferent");
    pub const ALL_DISJOINT_CLASSES: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#AllDisjointClasses");
    pub const ALL_DISJOINT_PROPERTIES: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#AllDisjointProperties");
    pub const ALL_VALUES_FROM: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#allValuesFrom");
    pub const ANNOTATED_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#annotatedProperty");
    pub const ANNOTATED_SOURCE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#annotatedSource");
    pub const ANNOTATED_TARGET: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#annotatedTarget");
    pub const ANNOTATION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Annotation");
    pub const ANNOTATION_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#AnnotationProperty");
    pub const ASSERTION_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#assertionProperty");
    pub const ASYMMETRIC_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#AsymmetricProperty");
    pub const AXIOM: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Axiom");
    pub const BACKWARD_COMPATIBLE_WITH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#backwardCompatibleWith");
    pub const CARDINALITY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#cardinality");
    pub const CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Class");
    pub const COMPLEMENT_OF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#complementOf");
    pub const DATATYPE_COMPLEMENT_OF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#datatypeComplementOf");
    pub const DATATYPE_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#DatatypeProperty");
    pub const DEPRECATED: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#deprecated");
    pub const DIFFERENT_FROM: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#differentFrom");
    pub const DISJOINT_UNION_OF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#disjointUnionOf");
    pub const DISJOINT_WITH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#disjointWith");
    pub const DISTINCT_MEMBERS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#distinctMembers");
    pub const EQUIVALENT_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#equivalentClass");
    pub const EQUIVALENT_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#equivalentProperty");
    pub const FUNCTIONAL_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#FunctionalProperty");
    pub const HAS_KEY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#hasKey");
    pub const HAS_SELF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#hasSelf");
    pub const HAS_VALUE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#hasValue");
    pub const IMPORTS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#imports");
    pub const INCOMPATIBLE_WITH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#incompatibleWith");
    pub const INTERSECTION_OF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#intersectionOf");
    pub const INVERSE_FUNCTIONAL_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#InverseFunctionalProperty");
    pub const INVERSE_OF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#inverseOf");
    pub const IRREFLEXIVE_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#IrreflexiveProperty");
    pub const MAX_CARDINALITY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#maxCardinality");
    pub const MAX_QUALIFIED_CARDINALITY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#maxQualifiedCardinality");
    pub const MEMBERS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#members");
    pub const MIN_CARDINALITY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#minCardinality");
    pub const MIN_QUALIFIED_CARDINALITY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#minQualifiedCardinality");
    pub const NAMED_INDIVIDUAL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#NamedIndividual");
    pub const NEGATIVE_PROPERTY_ASSERTION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#NegativePropertyAssertion");
    pub const OBJECT_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#ObjectProperty");
    pub const ON_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#onClass");
    pub const ON_DATA_RANGE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#onDataRange");
    pub const ON_DATATYPE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#onDatatype");
    pub const ONE_OF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#oneOf");
    pub const ON_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#onProperty");
    pub const ONTOLOGY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Ontology");
    pub const PRIOR_VERSION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#priorVersion");
    pub const PROPERTY_CHAIN_AXIOM: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#propertyChainAxiom");
    pub const PROPERTY_DISJOINT_WITH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#propertyDisjointWith");
    pub const QUALIFIED_CARDINALITY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#qualifiedCardinality");
    pub const REFLEXIVE_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#ReflexiveProperty");
    pub const RESTRICTION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Restriction");
    pub const SAME_AS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#sameAs");
    pub const SOME_VALUES_FROM: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#someValuesFrom");
    pub const SOURCE_INDIVIDUAL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#sourceIndividual");
    pub const SYMMETRIC_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#SymmetricProperty");
    pub const TARGET_INDIVIDUAL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#targetIndividual");
    pub const TARGET_VALUE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#targetValue");
    pub const THING: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Thing");
    pub const NOTHING: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Nothing");
    pub const TRANSITIVE_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#TransitiveProperty");
    pub const UNION_OF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#unionOf");
    pub const VERSION_INFO: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#versionInfo");
    pub const VERSION_IRI: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#versionIRI");
    pub const WITH_RESTRICTIONS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#withRestrictions");
}

pub mod skos {
    //! [SKOS](https://www.w3.org/TR/skos-reference/) vocabulary.
    use oxrdf::NamedNodeRef;

    /// The SKOS namespace.
    pub const NAMESPACE: &str = "http://www.w3.org/2004/02/skos/core#";

    pub const ALT_LABEL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#altLabel");
    pub const BROAD_MATCH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#broadMatch");
    pub const BROADER: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#broader");
    pub const BROADER_TRANSITIVE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#broaderTransitive");
    pub const CLOSE_MATCH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#closeMatch");
    pub const CONCEPT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#Concept");
    pub const CONCEPT_SCHEME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#ConceptScheme");
    pub const EXACT_MATCH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#exactMatch");
    pub const HIDDEN_LABEL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#hiddenLabel");
    pub const IN_SCHEME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#inScheme");
    pub const NARROW_MATCH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#narrowMatch");
    pub const NARROWER: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#narrower");
    pub const NARROWER_TRANSITIVE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#narrowerTransitive");
    pub const NOTATION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#notation");
    pub const PREF_LABEL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#prefLabel");
    pub const RELATED: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#related");
    pub const RELATED_MATCH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#relatedMatch");
    pub const TOP_CONCEPT_OF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#topConceptOf");
}

pub mod time {
    //! [OWL-Time](https://www.w3.org/TR/owl-time/) vocabulary.
    use oxrdf::NamedNodeRef;

    /// The OWL-Time namespace.
    pub const NAMESPACE: &str = "http://www.w3.org/2006/time#";

    // Classes
    pub const DATE_TIME_DESCRIPTION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#DateTimeDescription");
    pub const DURATION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#Duration");
    pub const DURATION_DESCRIPTION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#DurationDescription");
    pub const INSTANT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#Instant");
    pub const INTERVAL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#Interval");
    pub const PROPER_INTERVAL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#ProperInterval");
    pub const TEMPORAL_ENTITY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#TemporalEntity");
    pub const TIME_POSITION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#TimePosition");
    pub const TRS: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#TRS");
    pub const GENERAL_DATE_TIME_DESCRIPTION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#GeneralDateTimeDescription");

    // Instant properties
    pub const AFTER: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#after");
    pub const BEFORE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#before");
    pub const HAS_BEGINNING: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#hasBeginning");
    pub const HAS_END: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#hasEnd");
    pub const HAS_TIME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#hasTime");
    pub const HAS_INSIDE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#inside");
    pub const IN_DATE_TIME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#inDateTime");
    pub const IN_TIME_POSITION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#inTimePosition");
    pub const IN_XSD_DATE_TIME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#inXSDDateTime");
    pub const IN_XSD_DATE_TIME_STAMP: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#inXSDDateTimeStamp");

    // Date-time description properties
    pub const DAY: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#day");
    pub const DAY_OF_WEEK: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#dayOfWeek");
    pub const DAY_OF_YEAR: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#dayOfYear");
    pub const HOUR: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#hour");
    pub const MINUTE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#minute");
    pub const MONTH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#month");
    pub const MONTH_OF_YEAR: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#monthOfYear");
    pub const SECOND: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#second");
    pub const UNIT_TYPE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#unitType");
    pub const YEAR: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#year");
    pub const HAS_TRS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#hasTRS");
    pub const NUMERIC_POSITION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#numericPosition");
    pub const NOMINAL_POSITION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#nominalPosition");

    // Interval properties
    pub const HAS_DATE_TIME_DESCRIPTION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#hasDateTimeDescription");
    pub const HAS_XSD_DURATION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#hasXSDDuration");
    pub const HAS_DURATION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#hasDuration");
    pub const HAS_DURATION_DESCRIPTION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#hasDurationDescription");
    pub const NUMERIC_DURATION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#numericDuration");
    pub const UNIT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#unit");
    pub const YEARS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#years");
    pub const MONTHS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#months");
    pub const WEEKS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#weeks");
    pub const DAYS: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#days");
    pub const HOURS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#hours");
    pub const MINUTES: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#minutes");
    pub const SECONDS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#seconds");

    // Interval relations
    pub const INTERVAL_AFTER: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#intervalAfter");
    pub const INTERVAL_BEFORE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#intervalBefore");
    pub const INTERVAL_CONTAINS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#intervalContains");
    pub const INTERVAL_DISJOINT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#intervalDisjoint");
    pub const INTERVAL_DURING: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#intervalDuring");
    pub const INTERVAL_EQUALS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#intervalEquals");
    pub const INTERVAL_FINISHED_BY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#intervalFinishedBy");
    pub const INTERVAL_FINISHES: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#intervalFinishes");
    pub const INTERVAL_IN: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#intervalIn");
    pub const INTERVAL_MEETS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#intervalMeets");
    pub const INTERVAL_MET_BY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#intervalMetBy");
    pub const INTERVAL_OVERLAPPED_BY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#intervalOverlappedBy");
    pub const INTERVAL_OVERLAPS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#intervalOverlaps");
    pub const INTERVAL_STARTED_BY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#intervalStartedBy");
    pub const INTERVAL_STARTS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#intervalStarts");

    // Reference systems and units
    pub const GREGORIAN: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/def/uom/ISO-8601/0/Gregorian");
    pub const UNIX_TIME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://dbpedia.org/resource/Unix_time");
    pub const GPS_TIME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://dbpedia.org/resource/Global_Positioning_System");
    pub const GEOLOGIC_TIME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/def/crs/OGC/0/ChronometricGeologicTime");
    pub const UNIT_SECOND: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#unitSecond");
    pub const UNIT_MINUTE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#unitMinute");
    pub const UNIT_HOUR: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#unitHour");
    pub const UNIT_DAY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#unitDay");
    pub const UNIT_WEEK: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#unitWeek");
    pub const UNIT_MONTH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#unitMonth");
    pub const UNIT_YEAR: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#unitYear");
    pub const MILLION_YEARS_AGO: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/def/uom/UCUM/0/Ma");
}

pub mod dc {
    //! [Dublin Core elements](https://www.dublincore.org/specifications/dublin-core/dces/).
    use oxrdf::NamedNodeRef;

    /// The Dublin Core elements namespace.
    pub const NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";

    pub const CREATOR: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/elements/1.1/creator");
    pub const DESCRIPTION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/elements/1.1/description");
    pub const TITLE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/elements/1.1/title");
}
