use super::ProjectionConfig;
use crate::annotation::{Annotation, AnnotationSubject, AnnotationValue};
use crate::axiom::{AnnotatedAxiom, Axiom, AxiomCategory};
use crate::entity::{AnonymousIndividual, Individual};
use crate::event::{EventSink, default_sink};
use crate::expression::{ClassExpression, DataRange, ObjectPropertyExpression};
use crate::iri::{EntityName, Prefix};
use crate::literal::OwlLiteral;
use crate::ontology::Ontology;
use crate::vocab::{owl, rdf, rdfs, xsd};
use oxrdf::{
    BlankNode, Dataset, Graph, GraphName, Literal, NamedNode, NamedNodeRef, Subject, Term, Triple,
};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// What annotations of an axiom attach to.
enum Anchor {
    /// The main triple, annotations are reified on it.
    Triple(Triple),
    /// A node standing for the whole axiom, annotations are attached directly.
    Node(BlankNode),
}

/// Projects ontologies and axioms to RDF triples.
///
/// Blank nodes are numbered from zero at the start of every [`project`](Self::project) call,
/// so projecting the same ontology twice yields the same graph.
/// Anonymous individuals are given numbered nodes too, on first use, so their node IDs
/// never clash with the generated ones.
pub struct GraphProjector {
    config: ProjectionConfig,
    sink: Arc<dyn EventSink>,
    blank_node_counter: u64,
    anonymous_nodes: FxHashMap<String, BlankNode>,
}

impl Default for GraphProjector {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphProjector {
    /// Creates a new projector with default configuration.
    pub fn new() -> Self {
        Self::with_config(ProjectionConfig::new())
    }

    /// Creates a new projector with custom configuration.
    pub fn with_config(config: ProjectionConfig) -> Self {
        Self {
            config,
            sink: default_sink(),
            blank_node_counter: 0,
            anonymous_nodes: FxHashMap::default(),
        }
    }

    /// Sets the sink receiving notifications.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Projects a whole ontology: header, ontology annotations and every axiom.
    pub fn project(&mut self, ontology: &Ontology) -> Graph {
        self.blank_node_counter = 0;
        self.anonymous_nodes.clear();
        let mut graph = Graph::new();
        let prefixes = ontology.prefixes();

        let ontology_node: Subject = match ontology.iri() {
            Some(iri) => iri.clone().into(),
            None => self.fresh_blank_node().into(),
        };
        insert(&mut graph, ontology_node.clone(), rdf::TYPE, owl::ONTOLOGY.into_owned());
        if let Some(version_iri) = ontology.version_iri() {
            insert(&mut graph, ontology_node.clone(), owl::VERSION_IRI, version_iri.clone());
        }
        for import in ontology.imports() {
            insert(&mut graph, ontology_node.clone(), owl::IMPORTS, import.clone());
        }
        for annotation in ontology.annotations() {
            self.project_annotation(&ontology_node, annotation, prefixes, &mut graph);
        }

        let mut dropped_annotations = 0;
        for category in AxiomCategory::ALL {
            if category == AxiomCategory::Declaration && !self.config.include_declarations {
                continue;
            }
            let axioms = ontology.axioms_of(category);
            tracing::trace!(?category, count = axioms.len(), "projecting axioms");
            for axiom in axioms {
                if !self.config.reify_annotations && !axiom.annotations().is_empty() {
                    dropped_annotations += 1;
                }
                self.project_axiom(axiom, prefixes, &mut graph);
            }
        }
        if dropped_annotations > 0 {
            self.sink.warning(&format!(
                "Annotations of {dropped_annotations} axiom(s) were not projected"
            ));
        }
        self.sink.info(&format!(
            "Projected {} axiom(s) into {} triple(s)",
            ontology.axiom_count(),
            graph.len()
        ));
        graph
    }

    /// Projects a whole ontology into a dataset.
    ///
    /// Triples are placed in the graph named by the ontology IRI, or in the default graph
    /// for anonymous ontologies.
    pub fn project_to_dataset(&mut self, ontology: &Ontology) -> Dataset {
        let graph_name = ontology
            .iri()
            .map_or(GraphName::DefaultGraph, |iri| iri.clone().into());
        let mut dataset = Dataset::new();
        for triple in &self.project(ontology) {
            dataset.insert(triple.in_graph(graph_name.as_ref()));
        }
        dataset
    }

    /// Projects a single axiom and its annotations into `graph`.
    pub fn project_axiom(&mut self, axiom: &AnnotatedAxiom, prefixes: &[Prefix], graph: &mut Graph) {
        let anchors = self.project_axiom_body(axiom.axiom(), prefixes, graph);
        if !self.config.reify_annotations {
            return;
        }
        for anchor in anchors {
            match anchor {
                Anchor::Triple(triple) => {
                    if axiom.annotations().is_empty() {
                        continue;
                    }
                    let node = self.reify(&triple, owl::AXIOM, graph);
                    for annotation in axiom.annotations() {
                        self.project_annotation(&node.clone().into(), annotation, prefixes, graph);
                    }
                }
                Anchor::Node(node) => {
                    for annotation in axiom.annotations() {
                        self.project_annotation(&node.clone().into(), annotation, prefixes, graph);
                    }
                }
            }
        }
    }

    /// Emits `subject annotationProperty value` and reifies nested annotations on it.
    fn project_annotation(
        &mut self,
        subject: &Subject,
        annotation: &Annotation,
        prefixes: &[Prefix],
        graph: &mut Graph,
    ) {
        let triple = Triple::new(
            subject.clone(),
            self.resolve(annotation.property().name(), prefixes),
            self.annotation_value(annotation.value(), prefixes),
        );
        graph.insert(&triple);
        if annotation.annotations().is_empty() {
            return;
        }
        let node: Subject = self.reify(&triple, owl::ANNOTATION, graph).into();
        for nested in annotation.annotations() {
            self.project_annotation(&node, nested, prefixes, graph);
        }
    }

    fn reify(&mut self, triple: &Triple, kind: NamedNodeRef<'_>, graph: &mut Graph) -> BlankNode {
        let node = self.fresh_blank_node();
        insert(graph, node.clone(), rdf::TYPE, kind.into_owned());
        insert(graph, node.clone(), owl::ANNOTATED_SOURCE, triple.subject.clone());
        insert(graph, node.clone(), owl::ANNOTATED_PROPERTY, triple.predicate.clone());
        insert(graph, node.clone(), owl::ANNOTATED_TARGET, triple.object.clone());
        node
    }

    fn project_axiom_body(
        &mut self,
        axiom: &Axiom,
        prefixes: &[Prefix],
        graph: &mut Graph,
    ) -> Vec<Anchor> {
        match axiom {
            Axiom::Declaration(entity) => {
                let subject = self.resolve(entity.name(), prefixes);
                vec![axiom_triple(graph, subject, rdf::TYPE, entity.kind().rdf_type().into_owned())]
            }

            // === Class Axioms ===
            Axiom::SubClassOf {
                sub_class,
                super_class,
            } => {
                let sub = self.class_expression(sub_class, prefixes, graph);
                let sup = self.class_expression(super_class, prefixes, graph);
                vec![axiom_triple(graph, sub, rdfs::SUB_CLASS_OF, sup)]
            }
            Axiom::EquivalentClasses(classes) => {
                let nodes = self.class_expressions(classes, prefixes, graph);
                pairwise_chain(graph, &nodes, owl::EQUIVALENT_CLASS)
            }
            Axiom::DisjointClasses(classes) => {
                let nodes = self.class_expressions(classes, prefixes, graph);
                self.pairwise_or_all(graph, nodes, owl::DISJOINT_WITH, owl::ALL_DISJOINT_CLASSES)
            }
            Axiom::DisjointUnion {
                class,
                disjoint_classes,
            } => {
                let subject = self.resolve(class.name(), prefixes);
                let nodes = self.class_expressions(disjoint_classes, prefixes, graph);
                let list = self.list(nodes.into_iter().map(Term::from).collect(), graph);
                vec![axiom_triple(graph, subject, owl::DISJOINT_UNION_OF, list)]
            }

            // === Object Property Axioms ===
            Axiom::SubObjectPropertyOf {
                sub_property,
                super_property,
            } => {
                let sub = self.object_property(sub_property, prefixes, graph);
                let sup = self.object_property(super_property, prefixes, graph);
                vec![axiom_triple(graph, sub, rdfs::SUB_PROPERTY_OF, sup)]
            }
            Axiom::SubObjectPropertyChainOf {
                chain,
                super_property,
            } => {
                let sup = self.object_property(super_property, prefixes, graph);
                let links: Vec<Term> = chain
                    .iter()
                    .map(|p| self.object_property(p, prefixes, graph).into())
                    .collect();
                let list = self.list(links, graph);
                vec![axiom_triple(graph, sup, owl::PROPERTY_CHAIN_AXIOM, list)]
            }
            Axiom::EquivalentObjectProperties(properties) => {
                let nodes = properties
                    .iter()
                    .map(|p| self.object_property(p, prefixes, graph))
                    .collect::<Vec<_>>();
                pairwise_chain(graph, &nodes, owl::EQUIVALENT_PROPERTY)
            }
            Axiom::DisjointObjectProperties(properties) => {
                let nodes = properties
                    .iter()
                    .map(|p| self.object_property(p, prefixes, graph))
                    .collect();
                self.pairwise_or_all(
                    graph,
                    nodes,
                    owl::PROPERTY_DISJOINT_WITH,
                    owl::ALL_DISJOINT_PROPERTIES,
                )
            }
            Axiom::InverseObjectProperties(first, second) => {
                let first = self.object_property(first, prefixes, graph);
                let second = self.object_property(second, prefixes, graph);
                vec![axiom_triple(graph, first, owl::INVERSE_OF, second)]
            }
            Axiom::ObjectPropertyDomain { property, domain } => {
                let property = self.object_property(property, prefixes, graph);
                let domain = self.class_expression(domain, prefixes, graph);
                vec![axiom_triple(graph, property, rdfs::DOMAIN, domain)]
            }
            Axiom::ObjectPropertyRange { property, range } => {
                let property = self.object_property(property, prefixes, graph);
                let range = self.class_expression(range, prefixes, graph);
                vec![axiom_triple(graph, property, rdfs::RANGE, range)]
            }
            Axiom::FunctionalObjectProperty(p) => {
                self.characteristic(p, owl::FUNCTIONAL_PROPERTY, prefixes, graph)
            }
            Axiom::InverseFunctionalObjectProperty(p) => {
                self.characteristic(p, owl::INVERSE_FUNCTIONAL_PROPERTY, prefixes, graph)
            }
            Axiom::ReflexiveObjectProperty(p) => {
                self.characteristic(p, owl::REFLEXIVE_PROPERTY, prefixes, graph)
            }
            Axiom::IrreflexiveObjectProperty(p) => {
                self.characteristic(p, owl::IRREFLEXIVE_PROPERTY, prefixes, graph)
            }
            Axiom::SymmetricObjectProperty(p) => {
                self.characteristic(p, owl::SYMMETRIC_PROPERTY, prefixes, graph)
            }
            Axiom::AsymmetricObjectProperty(p) => {
                self.characteristic(p, owl::ASYMMETRIC_PROPERTY, prefixes, graph)
            }
            Axiom::TransitiveObjectProperty(p) => {
                self.characteristic(p, owl::TRANSITIVE_PROPERTY, prefixes, graph)
            }

            // === Data Property Axioms ===
            Axiom::SubDataPropertyOf {
                sub_property,
                super_property,
            } => {
                let sub = self.resolve(sub_property.name(), prefixes);
                let sup = self.resolve(super_property.name(), prefixes);
                vec![axiom_triple(graph, sub, rdfs::SUB_PROPERTY_OF, sup)]
            }
            Axiom::EquivalentDataProperties(properties) => {
                let nodes = properties
                    .iter()
                    .map(|p| self.resolve(p.name(), prefixes).into())
                    .collect::<Vec<Subject>>();
                pairwise_chain(graph, &nodes, owl::EQUIVALENT_PROPERTY)
            }
            Axiom::DisjointDataProperties(properties) => {
                let nodes: Vec<Subject> = properties
                    .iter()
                    .map(|p| self.resolve(p.name(), prefixes).into())
                    .collect();
                self.pairwise_or_all(
                    graph,
                    nodes,
                    owl::PROPERTY_DISJOINT_WITH,
                    owl::ALL_DISJOINT_PROPERTIES,
                )
            }
            Axiom::DataPropertyDomain { property, domain } => {
                let property = self.resolve(property.name(), prefixes);
                let domain = self.class_expression(domain, prefixes, graph);
                vec![axiom_triple(graph, property, rdfs::DOMAIN, domain)]
            }
            Axiom::DataPropertyRange { property, range } => {
                let property = self.resolve(property.name(), prefixes);
                let range = self.data_range(range, prefixes, graph);
                vec![axiom_triple(graph, property, rdfs::RANGE, range)]
            }
            Axiom::FunctionalDataProperty(property) => {
                let property = self.resolve(property.name(), prefixes);
                vec![axiom_triple(
                    graph,
                    property,
                    rdf::TYPE,
                    owl::FUNCTIONAL_PROPERTY.into_owned(),
                )]
            }
            Axiom::DatatypeDefinition { datatype, range } => {
                let datatype = self.resolve(datatype.name(), prefixes);
                let range = self.data_range(range, prefixes, graph);
                vec![axiom_triple(graph, datatype, owl::EQUIVALENT_CLASS, range)]
            }
            Axiom::HasKey(key) => {
                let class = self.class_expression(key.class(), prefixes, graph);
                let mut properties: Vec<Term> = key
                    .object_properties()
                    .iter()
                    .map(|p| self.object_property(p, prefixes, graph).into())
                    .collect();
                properties.extend(
                    key.data_properties()
                        .iter()
                        .map(|p| Term::from(self.resolve(p.name(), prefixes))),
                );
                let list = self.list(properties, graph);
                vec![axiom_triple(graph, class, owl::HAS_KEY, list)]
            }

            // === Assertions ===
            Axiom::SameIndividual(individuals) => {
                let nodes = individuals
                    .iter()
                    .map(|i| self.individual(i, prefixes))
                    .collect::<Vec<_>>();
                pairwise_chain(graph, &nodes, owl::SAME_AS)
            }
            Axiom::DifferentIndividuals(individuals) => {
                let nodes = individuals
                    .iter()
                    .map(|i| self.individual(i, prefixes))
                    .collect();
                self.pairwise_or_all(graph, nodes, owl::DIFFERENT_FROM, owl::ALL_DIFFERENT)
            }
            Axiom::ClassAssertion { class, individual } => {
                let individual = self.individual(individual, prefixes);
                let class = self.class_expression(class, prefixes, graph);
                vec![axiom_triple(graph, individual, rdf::TYPE, class)]
            }
            Axiom::ObjectPropertyAssertion {
                property,
                source,
                target,
            } => {
                let (source, target) = oriented(property, source, target);
                let source = self.individual(source, prefixes);
                let target = self.individual(target, prefixes);
                let predicate = self.resolve(property.property().name(), prefixes);
                vec![axiom_triple(graph, source, predicate.as_ref(), target)]
            }
            Axiom::NegativeObjectPropertyAssertion {
                property,
                source,
                target,
            } => {
                let (source, target) = oriented(property, source, target);
                let source = self.individual(source, prefixes);
                let target = self.individual(target, prefixes);
                let predicate = self.resolve(property.property().name(), prefixes);
                vec![self.negative_assertion(
                    graph,
                    source,
                    predicate,
                    owl::TARGET_INDIVIDUAL,
                    target.into(),
                )]
            }
            Axiom::DataPropertyAssertion {
                property,
                source,
                target,
            } => {
                let source = self.individual(source, prefixes);
                let predicate = self.resolve(property.name(), prefixes);
                let target = self.literal(target, prefixes);
                vec![axiom_triple(graph, source, predicate.as_ref(), target)]
            }
            Axiom::NegativeDataPropertyAssertion {
                property,
                source,
                target,
            } => {
                let source = self.individual(source, prefixes);
                let predicate = self.resolve(property.name(), prefixes);
                let target = self.literal(target, prefixes);
                vec![self.negative_assertion(
                    graph,
                    source,
                    predicate,
                    owl::TARGET_VALUE,
                    target.into(),
                )]
            }

            // === Annotation Axioms ===
            Axiom::AnnotationAssertion {
                property,
                subject,
                value,
            } => {
                let subject: Subject = match subject {
                    AnnotationSubject::Iri(name) => self.resolve(name, prefixes).into(),
                    AnnotationSubject::Anonymous(individual) => self.anonymous(individual).into(),
                };
                let predicate = self.resolve(property.name(), prefixes);
                if let Some(literal) = value.as_literal() {
                    self.check_literal(literal, prefixes);
                }
                vec![axiom_triple(
                    graph,
                    subject,
                    predicate.as_ref(),
                    self.annotation_value(value, prefixes),
                )]
            }
            Axiom::SubAnnotationPropertyOf {
                sub_property,
                super_property,
            } => {
                let sub = self.resolve(sub_property.name(), prefixes);
                let sup = self.resolve(super_property.name(), prefixes);
                vec![axiom_triple(graph, sub, rdfs::SUB_PROPERTY_OF, sup)]
            }
            Axiom::AnnotationPropertyDomain { property, domain } => {
                let property = self.resolve(property.name(), prefixes);
                let domain = self.resolve(domain, prefixes);
                vec![axiom_triple(graph, property, rdfs::DOMAIN, domain)]
            }
            Axiom::AnnotationPropertyRange { property, range } => {
                let property = self.resolve(property.name(), prefixes);
                let range = self.resolve(range, prefixes);
                vec![axiom_triple(graph, property, rdfs::RANGE, range)]
            }
        }
    }

    /// Projects a class expression, returning the node standing for it.
    pub fn class_expression(
        &mut self,
        expression: &ClassExpression,
        prefixes: &[Prefix],
        graph: &mut Graph,
    ) -> Subject {
        match expression {
            ClassExpression::Class(class) => self.resolve(class.name(), prefixes).into(),
            ClassExpression::ObjectIntersectionOf(operands) => {
                let nodes = self.class_expressions(operands, prefixes, graph);
                self.list_construct(graph, owl::CLASS, owl::INTERSECTION_OF, nodes)
            }
            ClassExpression::ObjectUnionOf(operands) => {
                let nodes = self.class_expressions(operands, prefixes, graph);
                self.list_construct(graph, owl::CLASS, owl::UNION_OF, nodes)
            }
            ClassExpression::ObjectComplementOf(operand) => {
                let operand = self.class_expression(operand, prefixes, graph);
                let node = self.typed_node(graph, owl::CLASS);
                insert(graph, node.clone(), owl::COMPLEMENT_OF, operand);
                node.into()
            }
            ClassExpression::ObjectOneOf(individuals) => {
                let nodes = individuals
                    .iter()
                    .map(|i| self.individual(i, prefixes))
                    .collect();
                self.list_construct(graph, owl::CLASS, owl::ONE_OF, nodes)
            }
            ClassExpression::ObjectSomeValuesFrom { property, filler } => {
                let property = self.object_property(property, prefixes, graph);
                let filler = self.class_expression(filler, prefixes, graph);
                self.restriction(graph, property, owl::SOME_VALUES_FROM, filler.into())
            }
            ClassExpression::ObjectAllValuesFrom { property, filler } => {
                let property = self.object_property(property, prefixes, graph);
                let filler = self.class_expression(filler, prefixes, graph);
                self.restriction(graph, property, owl::ALL_VALUES_FROM, filler.into())
            }
            ClassExpression::ObjectHasValue {
                property,
                individual,
            } => {
                let property = self.object_property(property, prefixes, graph);
                let individual = self.individual(individual, prefixes);
                self.restriction(graph, property, owl::HAS_VALUE, individual.into())
            }
            ClassExpression::ObjectHasSelf(property) => {
                let property = self.object_property(property, prefixes, graph);
                self.restriction(graph, property, owl::HAS_SELF, Literal::from(true).into())
            }
            ClassExpression::ObjectMinCardinality {
                cardinality,
                property,
                filler,
            } => self.object_cardinality(
                graph,
                prefixes,
                *cardinality,
                property,
                filler.as_deref(),
                (owl::MIN_CARDINALITY, owl::MIN_QUALIFIED_CARDINALITY),
            ),
            ClassExpression::ObjectMaxCardinality {
                cardinality,
                property,
                filler,
            } => self.object_cardinality(
                graph,
                prefixes,
                *cardinality,
                property,
                filler.as_deref(),
                (owl::MAX_CARDINALITY, owl::MAX_QUALIFIED_CARDINALITY),
            ),
            ClassExpression::ObjectExactCardinality {
                cardinality,
                property,
                filler,
            } => self.object_cardinality(
                graph,
                prefixes,
                *cardinality,
                property,
                filler.as_deref(),
                (owl::CARDINALITY, owl::QUALIFIED_CARDINALITY),
            ),
            ClassExpression::DataSomeValuesFrom { property, filler } => {
                let property = self.resolve(property.name(), prefixes);
                let filler = self.data_range(filler, prefixes, graph);
                self.restriction(graph, property.into(), owl::SOME_VALUES_FROM, filler.into())
            }
            ClassExpression::DataAllValuesFrom { property, filler } => {
                let property = self.resolve(property.name(), prefixes);
                let filler = self.data_range(filler, prefixes, graph);
                self.restriction(graph, property.into(), owl::ALL_VALUES_FROM, filler.into())
            }
            ClassExpression::DataHasValue { property, value } => {
                let property = self.resolve(property.name(), prefixes);
                let value = self.literal(value, prefixes);
                self.restriction(graph, property.into(), owl::HAS_VALUE, value.into())
            }
            ClassExpression::DataMinCardinality {
                cardinality,
                property,
                filler,
            } => self.data_cardinality(
                graph,
                prefixes,
                *cardinality,
                property.name(),
                filler.as_ref(),
                (owl::MIN_CARDINALITY, owl::MIN_QUALIFIED_CARDINALITY),
            ),
            ClassExpression::DataMaxCardinality {
                cardinality,
                property,
                filler,
            } => self.data_cardinality(
                graph,
                prefixes,
                *cardinality,
                property.name(),
                filler.as_ref(),
                (owl::MAX_CARDINALITY, owl::MAX_QUALIFIED_CARDINALITY),
            ),
            ClassExpression::DataExactCardinality {
                cardinality,
                property,
                filler,
            } => self.data_cardinality(
                graph,
                prefixes,
                *cardinality,
                property.name(),
                filler.as_ref(),
                (owl::CARDINALITY, owl::QUALIFIED_CARDINALITY),
            ),
        }
    }

    /// Projects a data range, returning the node standing for it.
    pub fn data_range(&mut self, range: &DataRange, prefixes: &[Prefix], graph: &mut Graph) -> Subject {
        match range {
            DataRange::Datatype(datatype) => self.resolve(datatype.name(), prefixes).into(),
            DataRange::DataIntersectionOf(operands) => {
                let nodes = operands
                    .iter()
                    .map(|r| self.data_range(r, prefixes, graph))
                    .collect();
                self.list_construct(graph, rdfs::DATATYPE, owl::INTERSECTION_OF, nodes)
            }
            DataRange::DataUnionOf(operands) => {
                let nodes = operands
                    .iter()
                    .map(|r| self.data_range(r, prefixes, graph))
                    .collect();
                self.list_construct(graph, rdfs::DATATYPE, owl::UNION_OF, nodes)
            }
            DataRange::DataComplementOf(operand) => {
                let operand = self.data_range(operand, prefixes, graph);
                let node = self.typed_node(graph, rdfs::DATATYPE);
                insert(graph, node.clone(), owl::DATATYPE_COMPLEMENT_OF, operand);
                node.into()
            }
            DataRange::DataOneOf(literals) => {
                let values: Vec<Term> = literals
                    .iter()
                    .map(|l| self.literal(l, prefixes).into())
                    .collect();
                let node = self.typed_node(graph, rdfs::DATATYPE);
                let list = self.list(values, graph);
                insert(graph, node.clone(), owl::ONE_OF, list);
                node.into()
            }
            DataRange::DatatypeRestriction {
                datatype,
                restrictions,
            } => {
                let datatype = self.resolve(datatype.name(), prefixes);
                let facets: Vec<Term> = restrictions
                    .iter()
                    .map(|restriction| {
                        let facet = self.fresh_blank_node();
                        let value = self.literal(&restriction.value, prefixes);
                        insert(graph, facet.clone(), restriction.facet.as_ref(), value);
                        facet.into()
                    })
                    .collect();
                let node = self.typed_node(graph, rdfs::DATATYPE);
                insert(graph, node.clone(), owl::ON_DATATYPE, datatype);
                let list = self.list(facets, graph);
                insert(graph, node.clone(), owl::WITH_RESTRICTIONS, list);
                node.into()
            }
        }
    }

    fn object_property(
        &mut self,
        property: &ObjectPropertyExpression,
        prefixes: &[Prefix],
        graph: &mut Graph,
    ) -> Subject {
        match property {
            ObjectPropertyExpression::ObjectProperty(p) => self.resolve(p.name(), prefixes).into(),
            ObjectPropertyExpression::ObjectInverseOf(p) => {
                let named = self.resolve(p.name(), prefixes);
                let node = self.fresh_blank_node();
                insert(graph, node.clone(), owl::INVERSE_OF, named);
                node.into()
            }
        }
    }

    fn individual(&mut self, individual: &Individual, prefixes: &[Prefix]) -> Subject {
        match individual {
            Individual::Named(i) => self.resolve(i.name(), prefixes).into(),
            Individual::Anonymous(i) => self.anonymous(i).into(),
        }
    }

    fn anonymous(&mut self, individual: &AnonymousIndividual) -> BlankNode {
        if let Some(node) = self.anonymous_nodes.get(individual.node_id()) {
            return node.clone();
        }
        let node = self.fresh_blank_node();
        self.anonymous_nodes
            .insert(individual.node_id().to_owned(), node.clone());
        node
    }

    fn annotation_value(&mut self, value: &AnnotationValue, prefixes: &[Prefix]) -> Term {
        match value {
            AnnotationValue::Anonymous(individual) => self.anonymous(individual).into(),
            AnnotationValue::Iri(_) | AnnotationValue::Literal(_) => value.to_term(prefixes),
        }
    }

    fn literal(&self, literal: &OwlLiteral, prefixes: &[Prefix]) -> Literal {
        self.check_literal(literal, prefixes);
        literal.to_rdf(prefixes)
    }

    fn check_literal(&self, literal: &OwlLiteral, prefixes: &[Prefix]) {
        if let Some(datatype) = literal.datatype() {
            self.resolve(datatype, prefixes);
        }
    }

    fn class_expressions(
        &mut self,
        expressions: &[ClassExpression],
        prefixes: &[Prefix],
        graph: &mut Graph,
    ) -> Vec<Subject> {
        expressions
            .iter()
            .map(|e| self.class_expression(e, prefixes, graph))
            .collect()
    }

    fn characteristic(
        &mut self,
        property: &ObjectPropertyExpression,
        kind: NamedNodeRef<'_>,
        prefixes: &[Prefix],
        graph: &mut Graph,
    ) -> Vec<Anchor> {
        let property = self.object_property(property, prefixes, graph);
        vec![axiom_triple(graph, property, rdf::TYPE, kind.into_owned())]
    }

    fn restriction(
        &mut self,
        graph: &mut Graph,
        property: Subject,
        predicate: NamedNodeRef<'_>,
        value: Term,
    ) -> Subject {
        let node = self.typed_node(graph, owl::RESTRICTION);
        insert(graph, node.clone(), owl::ON_PROPERTY, property);
        insert(graph, node.clone(), predicate, value);
        node.into()
    }

    fn object_cardinality(
        &mut self,
        graph: &mut Graph,
        prefixes: &[Prefix],
        cardinality: u32,
        property: &ObjectPropertyExpression,
        filler: Option<&ClassExpression>,
        (unqualified, qualified): (NamedNodeRef<'_>, NamedNodeRef<'_>),
    ) -> Subject {
        let property = self.object_property(property, prefixes, graph);
        let count = cardinality_literal(cardinality);
        match filler {
            Some(filler) => {
                let filler = self.class_expression(filler, prefixes, graph);
                let node = self.restriction(graph, property, qualified, count.into());
                insert(graph, node.clone(), owl::ON_CLASS, filler);
                node
            }
            None => self.restriction(graph, property, unqualified, count.into()),
        }
    }

    fn data_cardinality(
        &mut self,
        graph: &mut Graph,
        prefixes: &[Prefix],
        cardinality: u32,
        property: &EntityName,
        filler: Option<&DataRange>,
        (unqualified, qualified): (NamedNodeRef<'_>, NamedNodeRef<'_>),
    ) -> Subject {
        let property: Subject = self.resolve(property, prefixes).into();
        let count = cardinality_literal(cardinality);
        match filler {
            Some(filler) => {
                let filler = self.data_range(filler, prefixes, graph);
                let node = self.restriction(graph, property, qualified, count.into());
                insert(graph, node.clone(), owl::ON_DATA_RANGE, filler);
                node
            }
            None => self.restriction(graph, property, unqualified, count.into()),
        }
    }

    fn negative_assertion(
        &mut self,
        graph: &mut Graph,
        source: Subject,
        property: NamedNode,
        target_predicate: NamedNodeRef<'_>,
        target: Term,
    ) -> Anchor {
        let node = self.typed_node(graph, owl::NEGATIVE_PROPERTY_ASSERTION);
        insert(graph, node.clone(), owl::SOURCE_INDIVIDUAL, source);
        insert(graph, node.clone(), owl::ASSERTION_PROPERTY, property);
        insert(graph, node.clone(), target_predicate, target);
        Anchor::Node(node)
    }

    /// Two members use the pairwise predicate, more are grouped under a typed node.
    fn pairwise_or_all(
        &mut self,
        graph: &mut Graph,
        nodes: Vec<Subject>,
        pairwise: NamedNodeRef<'_>,
        all: NamedNodeRef<'_>,
    ) -> Vec<Anchor> {
        if let [first, second] = nodes.as_slice() {
            return vec![axiom_triple(graph, first.clone(), pairwise, second.clone())];
        }
        let node = self.typed_node(graph, all);
        let list = self.list(nodes.into_iter().map(Term::from).collect(), graph);
        insert(graph, node.clone(), owl::MEMBERS, list);
        vec![Anchor::Node(node)]
    }

    fn list_construct(
        &mut self,
        graph: &mut Graph,
        kind: NamedNodeRef<'_>,
        predicate: NamedNodeRef<'_>,
        nodes: Vec<Subject>,
    ) -> Subject {
        let node = self.typed_node(graph, kind);
        let list = self.list(nodes.into_iter().map(Term::from).collect(), graph);
        insert(graph, node.clone(), predicate, list);
        node.into()
    }

    fn typed_node(&mut self, graph: &mut Graph, kind: NamedNodeRef<'_>) -> BlankNode {
        let node = self.fresh_blank_node();
        insert(graph, node.clone(), rdf::TYPE, kind.into_owned());
        node
    }

    /// Builds an RDF collection and returns its head.
    fn list(&mut self, items: Vec<Term>, graph: &mut Graph) -> Term {
        let mut head: Term = rdf::NIL.into_owned().into();
        for item in items.into_iter().rev() {
            let cell = self.fresh_blank_node();
            insert(graph, cell.clone(), rdf::FIRST, item);
            insert(graph, cell.clone(), rdf::REST, head);
            head = cell.into();
        }
        head
    }

    fn fresh_blank_node(&mut self) -> BlankNode {
        let id = format!("{}{}", self.config.blank_node_prefix(), self.blank_node_counter);
        self.blank_node_counter += 1;
        BlankNode::new_unchecked(id)
    }

    fn resolve(&self, name: &EntityName, prefixes: &[Prefix]) -> NamedNode {
        if let EntityName::Abbreviated(abbreviated) = name {
            if !abbreviated.is_resolvable(prefixes) {
                self.sink.warning(&format!(
                    "Prefix '{}' of {abbreviated} is not declared, the name is kept as written",
                    abbreviated.prefix()
                ));
            }
        }
        name.resolve(prefixes)
    }
}

fn insert(
    graph: &mut Graph,
    subject: impl Into<Subject>,
    predicate: impl Into<NamedNode>,
    object: impl Into<Term>,
) {
    graph.insert(&Triple::new(subject, predicate, object));
}

fn axiom_triple(
    graph: &mut Graph,
    subject: impl Into<Subject>,
    predicate: impl Into<NamedNode>,
    object: impl Into<Term>,
) -> Anchor {
    let triple = Triple::new(subject, predicate, object);
    graph.insert(&triple);
    Anchor::Triple(triple)
}

/// `C1 p C2`, `C2 p C3`... one anchor per emitted triple.
fn pairwise_chain(graph: &mut Graph, nodes: &[Subject], predicate: NamedNodeRef<'_>) -> Vec<Anchor> {
    nodes
        .windows(2)
        .map(|pair| axiom_triple(graph, pair[0].clone(), predicate, pair[1].clone()))
        .collect()
}

/// Inverse properties swap the two individuals.
fn oriented<'a>(
    property: &ObjectPropertyExpression,
    source: &'a Individual,
    target: &'a Individual,
) -> (&'a Individual, &'a Individual) {
    if property.is_inverse() {
        (target, source)
    } else {
        (source, target)
    }
}

fn cardinality_literal(cardinality: u32) -> Literal {
    Literal::new_typed_literal(cardinality.to_string(), xsd::NON_NEGATIVE_INTEGER)
}
