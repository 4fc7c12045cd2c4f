use oxontology::vocab::{owl, rdf, rdfs};
use oxontology::{
    Annotation, AnnotationProperty, AnnotationSubject, AnnotationValue, AnonymousIndividual, Axiom, Class, ClassExpression, EntityName, GraphProjector,
    NamedIndividual, ObjectProperty, ObjectPropertyExpression, Ontology, OwlLiteral, Prefix,
    ProjectionConfig, ProjectionError,
};
use oxrdf::{BlankNode, GraphNameRef, Literal, NamedNode, SubjectRef, TermRef, TripleRef};


fn ex(local: &str) -> NamedNode {
    NamedNode::new(format!("http://example.org/{local}")).unwrap()
}

fn animals() -> Ontology {
    let mut ontology = Ontology::with_iri("http://example.org/animals").unwrap();
    ontology.add_prefix(Prefix::new("ex", "http://example.org/").unwrap());
    ontology.add_import(ex("base"));
    ontology.add_annotation(Annotation::new(
        AnnotationProperty::new(rdfs::LABEL),
        OwlLiteral::new_language_tagged("Animals", "en").unwrap(),
    ));
    ontology.add_axiom(Axiom::declaration(Class::new(EntityName::abbreviated("ex", "Dog").unwrap())));
    ontology.add_axiom(Axiom::declaration(ObjectProperty::new(ex("eats"))));
    ontology.add_axiom(Axiom::sub_class_of(
        Class::new(ex("Dog")),
        ClassExpression::ObjectSomeValuesFrom {
            property: ObjectProperty::new(ex("eats")).into(),
            filler: Box::new(ClassExpression::class(ex("Meat"))),
        },
    ));
    ontology
}

#[test]
fn subclass_of_restriction() {
    let graph = animals().to_graph();
    let restriction = BlankNode::new("b0").unwrap();
    assert!(graph.contains(TripleRef::new(&ex("Dog"), rdfs::SUB_CLASS_OF, &restriction)));
    assert!(graph.contains(TripleRef::new(&restriction, rdf::TYPE, owl::RESTRICTION)));
    assert!(graph.contains(TripleRef::new(&restriction, owl::ON_PROPERTY, &ex("eats"))));
    assert!(graph.contains(TripleRef::new(&restriction, owl::SOME_VALUES_FROM, &ex("Meat"))));
    assert!(graph.contains(TripleRef::new(&ex("Dog"), rdf::TYPE, owl::CLASS)));
}

#[test]
fn projection_is_deterministic() {
    let ontology = animals();
    let mut projector = GraphProjector::new();
    assert_eq!(projector.project(&ontology), projector.project(&ontology));
    assert_eq!(ontology.to_graph(), ontology.to_graph());
}

#[test]
fn declarations_can_be_left_out() {
    let graph = GraphProjector::with_config(ProjectionConfig::new().include_declarations(false))
        .project(&animals());
    assert!(!graph.contains(TripleRef::new(&ex("Dog"), rdf::TYPE, owl::CLASS)));
    assert!(graph.contains(TripleRef::new(&ex("Dog"), rdfs::SUB_CLASS_OF, &BlankNode::new("b0").unwrap())));
}

#[test]
fn disjoint_classes_are_pairwise_or_grouped() {
    let classes = |names: &[&str]| {
        names
            .iter()
            .map(|name| ClassExpression::class(ex(name)))
            .collect::<Vec<_>>()
    };
    let mut pair = Ontology::default();
    pair.add_axiom(Axiom::disjoint_classes(classes(&["Cat", "Dog"])).unwrap());
    let graph = pair.to_graph();
    assert!(graph.contains(TripleRef::new(&ex("Cat"), owl::DISJOINT_WITH, &ex("Dog"))));

    let mut three = Ontology::default();
    three.add_axiom(Axiom::disjoint_classes(classes(&["Cat", "Dog", "Cow"])).unwrap());
    let graph = three.to_graph();
    let groups: Vec<_> = graph
        .subjects_for_predicate_object(rdf::TYPE, owl::ALL_DISJOINT_CLASSES)
        .collect();
    assert_eq!(groups.len(), 1);
    assert!(graph.object_for_subject_predicate(groups[0], owl::MEMBERS).is_some());
    assert_eq!(graph.triples_for_predicate(owl::DISJOINT_WITH).count(), 0);
}

#[test]
fn axiom_annotations_are_reified() {
    let mut ontology = Ontology::default();
    ontology.add_annotated_axiom(
        Axiom::sub_class_of(Class::new(ex("Dog")), Class::new(ex("Animal"))),
        vec![
            Annotation::new(AnnotationProperty::new(rdfs::COMMENT), OwlLiteral::new_simple("obvious"))
                .with_annotations(vec![Annotation::new(
                    AnnotationProperty::new(rdfs::LABEL),
                    OwlLiteral::new_simple("nested"),
                )]),
        ],
    );
    let graph = ontology.to_graph();
    let axioms: Vec<SubjectRef<'_>> = graph.subjects_for_predicate_object(rdf::TYPE, owl::AXIOM).collect();
    assert_eq!(axioms.len(), 1);
    let axiom = axioms[0];
    assert_eq!(
        graph.object_for_subject_predicate(axiom, owl::ANNOTATED_SOURCE),
        Some(TermRef::from(ex("Dog").as_ref()))
    );
    assert_eq!(
        graph.object_for_subject_predicate(axiom, rdfs::COMMENT),
        Some(Literal::new_simple_literal("obvious").as_ref().into())
    );
    assert_eq!(graph.subjects_for_predicate_object(rdf::TYPE, owl::ANNOTATION).count(), 1);

    let plain = GraphProjector::with_config(ProjectionConfig::new().reify_annotations(false)).project(&ontology);
    assert_eq!(plain.subjects_for_predicate_object(rdf::TYPE, owl::AXIOM).count(), 0);
}

#[test]
fn inverse_property_assertions_swap_individuals() {
    let mut ontology = Ontology::default();
    ontology.add_axiom(Axiom::object_property_assertion(
        ObjectPropertyExpression::ObjectInverseOf(ObjectProperty::new(ex("parentOf"))),
        NamedIndividual::new(ex("child")),
        NamedIndividual::new(ex("parent")),
    ));
    let graph = ontology.to_graph();
    assert!(graph.contains(TripleRef::new(&ex("parent"), ex("parentOf").as_ref(), &ex("child"))));
}

#[test]
fn header_reads_back() {
    let ontology = animals();
    let read = Ontology::from_graph(&ontology.to_graph()).unwrap();
    assert_eq!(read.iri(), Some(&ex("animals")));
    assert_eq!(read.imports(), &[ex("base")]);
    assert_eq!(read.annotations(), ontology.annotations());
    assert_eq!(read.declarations().len(), 2);
    assert!(read.class_axioms().is_empty());
}

#[test]
fn two_named_ontologies_are_ambiguous() {
    let mut graph = Ontology::with_iri("http://example.org/a").unwrap().to_graph();
    graph.extend(&Ontology::with_iri("http://example.org/b").unwrap().to_graph());
    assert!(matches!(
        Ontology::from_graph(&graph),
        Err(ProjectionError::AmbiguousOntology { .. })
    ));
}

#[test]
fn dataset_uses_the_ontology_graph() {
    let ontology = animals();
    let dataset = ontology.to_dataset();
    let graph_name = ex("animals");
    assert_eq!(dataset.len(), ontology.to_graph().len());
    assert!(dataset.iter().all(|quad| quad.graph_name == GraphNameRef::NamedNode(graph_name.as_ref())));
}

fn anonymous(node_id: &str) -> AnonymousIndividual {
    AnonymousIndividual::new(node_id).unwrap()
}

fn as_subject(term: TermRef<'_>) -> SubjectRef<'_> {
    match term {
        TermRef::NamedNode(node) => node.into(),
        TermRef::BlankNode(node) => node.into(),
        TermRef::Literal(literal) => panic!("{literal} is not a subject"),
    }
}

#[test]
fn anonymous_individuals_do_not_merge_with_generated_nodes() {
    let mut ontology = Ontology::default();
    ontology.add_axiom(Axiom::class_assertion(
        ClassExpression::object_union_of(vec![
            ClassExpression::class(ex("A")),
            ClassExpression::class(ex("B")),
        ])
        .unwrap(),
        anonymous("_:b0"),
    ));
    let graph = ontology.to_graph();
    let headers: Vec<_> = graph
        .subjects_for_predicate_object(rdf::TYPE, owl::ONTOLOGY)
        .collect();
    assert_eq!(headers.len(), 1);
    assert_eq!(graph.triples_for_subject(headers[0]).count(), 1);
    let individuals: Vec<_> = graph
        .triples_for_predicate(rdf::TYPE)
        .filter(|t| matches!(t.object, TermRef::BlankNode(_)))
        .map(|t| t.subject)
        .collect();
    assert_eq!(individuals.len(), 1);
    assert_ne!(individuals[0], headers[0]);
}

#[test]
fn blank_nodes_of_an_anonymous_ontology_stay_apart() {
    let mut ontology = Ontology::default();
    let knows = ObjectProperty::new(ex("knows"));
    ontology.add_annotated_axiom(
        Axiom::object_property_assertion(knows, anonymous("b0"), anonymous("b1")),
        vec![Annotation::new(
            AnnotationProperty::new(rdfs::COMMENT),
            OwlLiteral::new_simple("met at school"),
        )],
    );
    ontology.add_axiom(Axiom::annotation_assertion(
        AnnotationProperty::new(rdfs::SEE_ALSO),
        AnnotationSubject::Anonymous(anonymous("b1")),
        AnnotationValue::Anonymous(anonymous("b0")),
    ));
    ontology.add_axiom(
        Axiom::different_individuals(vec![
            anonymous("b0").into(),
            anonymous("b1").into(),
            NamedIndividual::new(ex("rex")).into(),
        ])
        .unwrap(),
    );
    let graph = ontology.to_graph();

    let header = graph
        .subject_for_predicate_object(rdf::TYPE, owl::ONTOLOGY)
        .unwrap();
    assert!(matches!(header, SubjectRef::BlankNode(_)));
    assert_eq!(graph.triples_for_subject(header).count(), 1);

    let knows: Vec<_> = graph.triples_for_predicate(ex("knows").as_ref()).collect();
    assert_eq!(knows.len(), 1);
    let (source, target) = (knows[0].subject, as_subject(knows[0].object));
    assert_ne!(source, target);
    assert_ne!(source, header);
    assert_ne!(target, header);
    assert_eq!(
        graph.object_for_subject_predicate(target, rdfs::SEE_ALSO),
        Some(TermRef::from(source))
    );

    let axiom = graph
        .subject_for_predicate_object(rdf::TYPE, owl::AXIOM)
        .unwrap();
    assert_eq!(
        graph.object_for_subject_predicate(axiom, owl::ANNOTATED_SOURCE),
        Some(TermRef::from(source))
    );
    assert_ne!(axiom, source);
    assert_ne!(axiom, target);

    let group = graph
        .subject_for_predicate_object(rdf::TYPE, owl::ALL_DIFFERENT)
        .unwrap();
    let head = as_subject(graph.object_for_subject_predicate(group, owl::MEMBERS).unwrap());
    assert_eq!(
        graph.object_for_subject_predicate(head, rdf::FIRST),
        Some(TermRef::from(source))
    );
    let second = as_subject(graph.object_for_subject_predicate(head, rdf::REST).unwrap());
    assert_eq!(
        graph.object_for_subject_predicate(second, rdf::FIRST),
        Some(TermRef::from(target))
    );

    let dataset = ontology.to_dataset();
    assert_eq!(dataset.len(), graph.len());
    assert!(dataset.iter().all(|quad| quad.graph_name == GraphNameRef::DefaultGraph));
}
