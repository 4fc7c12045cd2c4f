use oxontology::time::{TimeInstant, TimeInterval};
use oxontology::vocab::{skos, time};
use oxontology::{
    AnnotationProperty, Axiom, Class, ClassExpression, DataProperty, EntityName, IssueSeverity,
    NamedIndividual, ObjectProperty, Ontology, OwlLiteral, Prefix, RuleError, Validator,
    ValidatorConfig,
};
use oxrdf::{NamedNode, NamedNodeRef};

fn ex(local: &str) -> EntityName {
    EntityName::abbreviated("ex", local).unwrap()
}

fn ontology() -> Ontology {
    let mut ontology = Ontology::with_iri("http://example.org/ontology").unwrap();
    ontology.add_prefix(Prefix::new("ex", "http://example.org/").unwrap());
    ontology
}

fn link(ontology: &mut Ontology, from: &str, property: NamedNodeRef<'_>, to: &str) {
    ontology.add_axiom(Axiom::object_property_assertion(
        ObjectProperty::new(property),
        NamedIndividual::new(ex(from)),
        NamedIndividual::new(ex(to)),
    ));
}

#[test]
fn alternative_label_equal_to_preferred_label() {
    let mut ontology = ontology();
    for property in [skos::ALT_LABEL, skos::PREF_LABEL] {
        ontology.add_axiom(Axiom::annotation_assertion(
            AnnotationProperty::new(property),
            ex("ConceptA"),
            OwlLiteral::new_simple("x"),
        ));
    }

    let report = ontology.validate(&["skos-alternative-label"]).unwrap();
    assert_eq!(report.len(), 1);
    let issue = &report.issues()[0];
    assert_eq!(issue.severity(), IssueSeverity::Error);
    assert_eq!(issue.rule_name(), "skos-alternative-label");
    assert!(issue.suggestion().contains("ex:ConceptA"));
}

#[test]
fn shared_notation_in_one_scheme() {
    let mut ontology = ontology();
    for concept in ["ConceptA", "ConceptB"] {
        link(&mut ontology, concept, skos::IN_SCHEME, "Scheme");
        ontology.add_axiom(Axiom::data_property_assertion(
            DataProperty::new(skos::NOTATION),
            NamedIndividual::new(ex(concept)),
            OwlLiteral::new_simple("C1N"),
        ));
    }
    link(&mut ontology, "ConceptC", skos::IN_SCHEME, "Other");
    ontology.add_axiom(Axiom::data_property_assertion(
        DataProperty::new(skos::NOTATION),
        NamedIndividual::new(ex("ConceptC")),
        OwlLiteral::new_simple("C1N"),
    ));

    let report = ontology.validate(&["skos-notation"]).unwrap();
    assert_eq!(report.count(IssueSeverity::Error), 2);
    for issue in &report {
        assert!(issue.description().contains("ex:ConceptA"));
        assert!(issue.description().contains("ex:ConceptB"));
        assert!(!issue.description().contains("ex:ConceptC"));
    }
}

#[test]
fn unknown_rule_names_are_rejected() {
    let error = ontology().validate(&["skos-notation", "no-such-rule"]).unwrap_err();
    assert!(matches!(error, RuleError::UnknownRule { .. }));
    assert!(error.to_string().contains("no-such-rule"));
}

#[test]
fn clean_ontology_has_no_error() {
    let mut ontology = ontology();
    ontology.add_axiom(Axiom::sub_class_of(
        Class::new(ex("Dog")),
        Class::new(ex("Animal")),
    ));
    ontology.add_axiom(Axiom::class_assertion(
        ClassExpression::class(ex("Dog")),
        NamedIndividual::new(ex("rex")),
    ));
    link(&mut ontology, "Mammals", skos::BROADER, "Animals");
    ontology.declare_instant(&TimeInstant::from_date_time(
        NamedNode::new("http://example.org/birth").unwrap(),
        "2019-04-02T10:00:00Z".parse().unwrap(),
    ));

    let report = Validator::standard().unwrap().validate(&ontology);
    assert!(report.is_consistent(), "{:?}", report.issues());
}

#[test]
fn parallel_and_sequential_runs_agree() {
    let mut ontology = ontology();
    ontology.add_axiom(
        Axiom::disjoint_classes(vec![
            ClassExpression::class(ex("Cat")),
            ClassExpression::class(ex("Dog")),
        ])
        .unwrap(),
    );
    for class in ["Cat", "Dog"] {
        ontology.add_axiom(Axiom::class_assertion(
            ClassExpression::class(ex(class)),
            NamedIndividual::new(ex("felix")),
        ));
    }
    link(&mut ontology, "A", skos::BROADER, "B");
    link(&mut ontology, "A", skos::NARROWER, "B");
    link(&mut ontology, "x", time::INTERVAL_BEFORE, "y");
    link(&mut ontology, "x", time::INTERVAL_AFTER, "y");

    let sequential = Validator::standard().unwrap().validate(&ontology);
    let parallel = Validator::standard()
        .unwrap()
        .with_config(ValidatorConfig::new().parallel(true))
        .validate(&ontology);
    assert_eq!(sequential.issues(), parallel.issues());
    for rule in [
        "owl-class-assertion-disjointness",
        "skos-broader-narrower",
        "time-relation-clash",
    ] {
        assert_eq!(sequential.issues_of(rule).count(), 1, "{rule}");
    }
}

#[test]
fn temporal_containment() {
    let instant = |local: &str, value: &str| {
        TimeInstant::from_date_time(
            NamedNode::new(format!("http://example.org/{local}")).unwrap(),
            value.parse().unwrap(),
        )
    };
    let interval = TimeInterval::bounded(
        NamedNode::new("http://example.org/window").unwrap(),
        Some(instant("start", "2023-04-30T20:47:15Z")),
        Some(instant("end", "2023-05-02T20:47:15Z")),
    )
    .unwrap();
    assert!(instant("inside", "2023-05-01T20:47:15Z").inside(&interval));
    assert!(!instant("boundary", "2023-04-30T20:47:15Z").inside(&interval));

    let mut ontology = ontology();
    ontology.declare_interval(&interval);
    ontology.declare_instant(&instant("inside", "2023-05-01T20:47:15Z"));
    ontology.declare_instant(&instant("boundary", "2023-05-02T20:47:15Z"));
    link(&mut ontology, "window", time::HAS_INSIDE, "inside");
    link(&mut ontology, "window", time::HAS_INSIDE, "boundary");
    let report = ontology.validate(&["time-relation-coordinates"]).unwrap();
    assert_eq!(report.len(), 1);
    assert!(report.issues()[0].description().contains("ex:boundary"));
}
