use codspeed_criterion_compat::{Criterion, Throughput, criterion_group, criterion_main};
use oxontology::vocab::skos;
use oxontology::{
    AnnotationProperty, Axiom, ClassExpression, DataProperty, EntityName, NamedIndividual,
    ObjectProperty, Ontology, OwlLiteral, Prefix, Validator, ValidatorConfig,
};

fn concept(i: u64) -> EntityName {
    EntityName::abbreviated("ex", format!("concept{i}")).unwrap()
}

/// Builds a SKOS thesaurus with a broader chain, labels and notations
fn create_thesaurus(size: u64) -> Ontology {
    let mut ontology = Ontology::with_iri("http://example.org/thesaurus").unwrap();
    ontology.add_prefix(Prefix::new("ex", "http://example.org/").unwrap());
    let scheme = NamedIndividual::new(EntityName::abbreviated("ex", "scheme").unwrap());
    for i in 0..size {
        ontology.add_axiom(Axiom::class_assertion(
            ClassExpression::class(skos::CONCEPT),
            NamedIndividual::new(concept(i)),
        ));
        ontology.add_axiom(Axiom::object_property_assertion(
            ObjectProperty::new(skos::IN_SCHEME),
            NamedIndividual::new(concept(i)),
            scheme.clone(),
        ));
        ontology.add_axiom(Axiom::annotation_assertion(
            AnnotationProperty::new(skos::PREF_LABEL),
            concept(i),
            OwlLiteral::new_language_tagged(format!("Concept {i}"), "en").unwrap(),
        ));
        ontology.add_axiom(Axiom::data_property_assertion(
            DataProperty::new(skos::NOTATION),
            NamedIndividual::new(concept(i)),
            OwlLiteral::new_simple(format!("C{i}")),
        ));
        if i > 0 {
            ontology.add_axiom(Axiom::object_property_assertion(
                ObjectProperty::new(skos::BROADER),
                NamedIndividual::new(concept(i)),
                NamedIndividual::new(concept(i - 1)),
            ));
        }
    }
    ontology
}

fn projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");
    for size in [10, 100, 1_000] {
        let ontology = create_thesaurus(size);
        group.throughput(Throughput::Elements(size));
        group.bench_function(format!("project thesaurus with {size} concepts"), |b| {
            b.iter(|| ontology.to_graph())
        });
    }
    group.finish();
}

fn validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation");
    for size in [10, 100, 1_000] {
        let ontology = create_thesaurus(size);
        group.throughput(Throughput::Elements(size));
        for parallel in [false, true] {
            let validator = Validator::standard()
                .unwrap()
                .with_config(ValidatorConfig::new().parallel(parallel));
            group.bench_function(
                format!("validate thesaurus with {size} concepts (parallel: {parallel})"),
                |b| b.iter(|| validator.validate(&ontology)),
            );
        }
    }
    group.finish();
}

fn owl_xml(c: &mut Criterion) {
    let mut group = c.benchmark_group("OWL/XML");
    for size in [10, 100, 1_000] {
        let ontology = create_thesaurus(size);
        let serialized = ontology.to_owl_xml().unwrap();
        group.throughput(Throughput::Bytes(serialized.len().try_into().unwrap()));
        group.bench_function(format!("write thesaurus with {size} concepts"), |b| {
            b.iter(|| ontology.to_owl_xml().unwrap())
        });
        group.bench_function(format!("read thesaurus with {size} concepts"), |b| {
            b.iter(|| Ontology::from_owl_xml(&serialized).unwrap())
        });
    }
    group.finish();
}

criterion_group!(ontology, projection, validation, owl_xml);
criterion_main!(ontology);
