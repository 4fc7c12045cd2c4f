//! Antecedent/consequent rules over RDF graphs.
//!
//! A rule has the form `{ antecedent } => { consequent }`. The antecedent is a conjunction
//! of triple patterns and `different`/`equal` builtins, the consequent a list of triple
//! patterns instantiated for every match. Validation rules usually leave the consequent
//! empty and report each match.

use crate::error::RuleError;
use oxrdf::{
    Graph, NamedNode, NamedNodeRef, Subject, SubjectRef, Term, TermRef, Triple, TripleRef, Variable,
};
use rustc_hash::FxHashSet;
use std::fmt;

/// A triple pattern position: a variable or a constant term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleTerm {
    Variable(Variable),
    Constant(Term),
}

impl RuleTerm {
    /// Builds a variable, rejecting invalid names. A leading `?` is ignored.
    pub fn variable(name: &str) -> Result<Self, RuleError> {
        let name = name.strip_prefix('?').unwrap_or(name);
        Variable::new(name)
            .map(Self::Variable)
            .map_err(|_| RuleError::InvalidVariable {
                name: name.to_owned(),
            })
    }

    pub fn constant(term: impl Into<Term>) -> Self {
        Self::Constant(term.into())
    }

    fn as_variable(&self) -> Option<&Variable> {
        match self {
            Self::Variable(v) => Some(v),
            Self::Constant(_) => None,
        }
    }

    /// The term this position stands for under `solution`, if known.
    fn resolve<'a>(&'a self, solution: &'a Solution) -> Option<&'a Term> {
        match self {
            Self::Variable(v) => solution.get(v.as_str()),
            Self::Constant(t) => Some(t),
        }
    }
}

impl From<NamedNodeRef<'_>> for RuleTerm {
    fn from(node: NamedNodeRef<'_>) -> Self {
        Self::Constant(node.into_owned().into())
    }
}

impl From<NamedNode> for RuleTerm {
    fn from(node: NamedNode) -> Self {
        Self::Constant(node.into())
    }
}

impl From<Variable> for RuleTerm {
    fn from(variable: Variable) -> Self {
        Self::Variable(variable)
    }
}

impl fmt::Display for RuleTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable(v) => write!(f, "{v}"),
            Self::Constant(t) => write!(f, "{t}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TriplePattern {
    pub subject: RuleTerm,
    pub predicate: RuleTerm,
    pub object: RuleTerm,
}

impl TriplePattern {
    pub fn new(
        subject: impl Into<RuleTerm>,
        predicate: impl Into<RuleTerm>,
        object: impl Into<RuleTerm>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    fn terms(&self) -> [&RuleTerm; 3] {
        [&self.subject, &self.predicate, &self.object]
    }

    /// Extends `solution` so that the pattern matches `triple`, if possible.
    fn unify(&self, triple: TripleRef<'_>, solution: &Solution) -> Option<Solution> {
        let mut extended = solution.clone();
        let values: [TermRef<'_>; 3] = [
            triple.subject.into(),
            triple.predicate.into(),
            triple.object,
        ];
        for (position, value) in self.terms().into_iter().zip(values) {
            match position {
                RuleTerm::Constant(term) => {
                    if term.as_ref() != value {
                        return None;
                    }
                }
                RuleTerm::Variable(variable) => match extended.get(variable.as_str()) {
                    Some(bound) if bound.as_ref() != value => return None,
                    Some(_) => (),
                    None => extended.bind(variable.clone(), value.into_owned()),
                },
            }
        }
        Some(extended)
    }

    /// The triple this pattern produces under `solution`, if every position is bound and well placed.
    fn instantiate(&self, solution: &Solution) -> Option<Triple> {
        let subject = match self.subject.resolve(solution)? {
            Term::NamedNode(n) => Subject::from(n.clone()),
            Term::BlankNode(b) => Subject::from(b.clone()),
            Term::Literal(_) => return None,
        };
        let Term::NamedNode(predicate) = self.predicate.resolve(solution)? else {
            return None;
        };
        let object = self.object.resolve(solution)?.clone();
        Some(Triple::new(subject, predicate.clone(), object))
    }
}

impl fmt::Display for TriplePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)
    }
}

/// An antecedent atom.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Atom {
    Triple(TriplePattern),
    /// Both terms are bound to different values.
    Different(RuleTerm, RuleTerm),
    /// Both terms are bound to the same value.
    Equal(RuleTerm, RuleTerm),
}

impl Atom {
    pub fn triple(
        subject: impl Into<RuleTerm>,
        predicate: impl Into<RuleTerm>,
        object: impl Into<RuleTerm>,
    ) -> Self {
        Self::Triple(TriplePattern::new(subject, predicate, object))
    }

    /// Checks a builtin. `None` while one of its terms is still unbound.
    fn check(&self, solution: &Solution) -> Option<bool> {
        match self {
            Self::Triple(_) => Some(true),
            Self::Different(a, b) => Some(a.resolve(solution)? != b.resolve(solution)?),
            Self::Equal(a, b) => Some(a.resolve(solution)? == b.resolve(solution)?),
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Triple(pattern) => write!(f, "{pattern}"),
            Self::Different(a, b) => write!(f, "different({a}, {b})"),
            Self::Equal(a, b) => write!(f, "equal({a}, {b})"),
        }
    }
}

/// Variable bindings of one rule match, in binding order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    bindings: Vec<(Variable, Term)>,
}

impl Solution {
    /// The value bound to a variable name (without `?`).
    pub fn get(&self, name: &str) -> Option<&Term> {
        self.bindings
            .iter()
            .find(|(v, _)| v.as_str() == name)
            .map(|(_, t)| t)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Term)> {
        self.bindings.iter().map(|(v, t)| (v, t))
    }

    fn bind(&mut self, variable: Variable, value: Term) {
        self.bindings.push((variable, value));
    }
}

/// A named rule, validated at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    name: String,
    antecedent: Vec<Atom>,
    consequent: Vec<TriplePattern>,
}

impl Rule {
    /// Builds a rule.
    ///
    /// Fails if the antecedent has no triple atom, or if a variable used in a builtin or in
    /// the consequent is not bound by an antecedent triple atom.
    pub fn new(
        name: impl Into<String>,
        antecedent: Vec<Atom>,
        consequent: Vec<TriplePattern>,
    ) -> Result<Self, RuleError> {
        let name = name.into();
        if !antecedent.iter().any(|a| matches!(a, Atom::Triple(_))) {
            return Err(RuleError::EmptyAntecedent { rule: name });
        }
        let bound: FxHashSet<&Variable> = antecedent
            .iter()
            .filter_map(|atom| match atom {
                Atom::Triple(pattern) => Some(pattern.terms()),
                Atom::Different(..) | Atom::Equal(..) => None,
            })
            .flatten()
            .filter_map(RuleTerm::as_variable)
            .collect();
        let used = antecedent
            .iter()
            .filter_map(|atom| match atom {
                Atom::Triple(_) => None,
                Atom::Different(a, b) | Atom::Equal(a, b) => Some([a, b]),
            })
            .flatten()
            .chain(consequent.iter().flat_map(TriplePattern::terms));
        for term in used {
            if let Some(variable) = term.as_variable() {
                if !bound.contains(variable) {
                    return Err(RuleError::UnboundVariable {
                        rule: name,
                        variable: variable.as_str().to_owned(),
                    });
                }
            }
        }
        Ok(Self {
            name,
            antecedent,
            consequent,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn antecedent(&self) -> &[Atom] {
        &self.antecedent
    }

    pub fn consequent(&self) -> &[TriplePattern] {
        &self.consequent
    }

    /// Every match of the antecedent in `graph`, in discovery order.
    pub fn evaluate(&self, graph: &Graph) -> Vec<Solution> {
        let patterns: Vec<&TriplePattern> = self
            .antecedent
            .iter()
            .filter_map(|atom| match atom {
                Atom::Triple(pattern) => Some(pattern),
                Atom::Different(..) | Atom::Equal(..) => None,
            })
            .collect();
        let mut solutions = Vec::new();
        self.search(graph, &patterns, Solution::default(), &mut solutions);
        solutions
    }

    fn search(
        &self,
        graph: &Graph,
        patterns: &[&TriplePattern],
        solution: Solution,
        solutions: &mut Vec<Solution>,
    ) {
        // Builtins prune as soon as their terms are bound.
        if self
            .antecedent
            .iter()
            .any(|atom| atom.check(&solution) == Some(false))
        {
            return;
        }
        let Some((pattern, rest)) = patterns.split_first() else {
            solutions.push(solution);
            return;
        };
        for triple in candidates(graph, pattern, &solution) {
            if let Some(extended) = pattern.unify(triple, &solution) {
                self.search(graph, rest, extended, solutions);
            }
        }
    }

    /// The consequent triples of every match that are not already in `graph`.
    pub fn infer(&self, graph: &Graph) -> Vec<Triple> {
        let mut seen = FxHashSet::default();
        self.evaluate(graph)
            .iter()
            .flat_map(|solution| {
                self.consequent
                    .iter()
                    .filter_map(|pattern| pattern.instantiate(solution))
            })
            .filter(|triple| !graph.contains(triple) && seen.insert(triple.clone()))
            .collect()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {{", self.name)?;
        for (i, atom) in self.antecedent.iter().enumerate() {
            write!(f, "{}{atom}", if i > 0 { " . " } else { " " })?;
        }
        f.write_str(" } => {")?;
        for (i, pattern) in self.consequent.iter().enumerate() {
            write!(f, "{}{pattern}", if i > 0 { " . " } else { " " })?;
        }
        f.write_str(" }")
    }
}

/// Triples possibly matching `pattern`, using the most selective bound position.
fn candidates<'a>(
    graph: &'a Graph,
    pattern: &TriplePattern,
    solution: &Solution,
) -> Box<dyn Iterator<Item = TripleRef<'a>> + 'a> {
    if let Some(subject) = pattern.subject.resolve(solution) {
        let subject = match subject {
            Term::NamedNode(n) => SubjectRef::from(n.as_ref()),
            Term::BlankNode(b) => SubjectRef::from(b.as_ref()),
            Term::Literal(_) => return Box::new(std::iter::empty()),
        };
        return Box::new(graph.triples_for_subject(subject).collect::<Vec<_>>().into_iter());
    }
    if let Some(object) = pattern.object.resolve(solution) {
        return Box::new(
            graph
                .triples_for_object(object.as_ref())
                .collect::<Vec<_>>()
                .into_iter(),
        );
    }
    if let Some(predicate) = pattern.predicate.resolve(solution) {
        let Term::NamedNode(predicate) = predicate else {
            return Box::new(std::iter::empty());
        };
        return Box::new(
            graph
                .triples_for_predicate(predicate.as_ref())
                .collect::<Vec<_>>()
                .into_iter(),
        );
    }
    Box::new(graph.iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{rdf, skos};
    use oxrdf::Literal;

    fn node(local: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.org/{local}"))
    }

    fn var(name: &str) -> RuleTerm {
        RuleTerm::variable(name).unwrap()
    }

    #[test]
    fn setup_errors() {
        assert_eq!(
            Rule::new("r", vec![], vec![]),
            Err(RuleError::EmptyAntecedent { rule: "r".into() })
        );
        assert!(matches!(
            Rule::new(
                "r",
                vec![Atom::triple(var("a"), rdf::TYPE, var("c"))],
                vec![TriplePattern::new(var("a"), rdf::TYPE, var("d"))]
            ),
            Err(RuleError::UnboundVariable { variable, .. }) if variable == "d"
        ));
        assert!(matches!(
            Rule::new(
                "r",
                vec![
                    Atom::triple(var("a"), rdf::TYPE, var("c")),
                    Atom::Different(var("a"), var("z"))
                ],
                vec![]
            ),
            Err(RuleError::UnboundVariable { .. })
        ));
        assert!(RuleTerm::variable("not valid").is_err());
    }

    #[test]
    fn evaluation_reports_both_orderings() {
        let mut graph = Graph::new();
        for local in ["a", "b"] {
            graph.insert(TripleRef::new(node(local).as_ref(), skos::IN_SCHEME, node("s").as_ref()));
            graph.insert(&Triple::new(node(local), skos::NOTATION, Literal::new_simple_literal("N")));
        }
        let rule = Rule::new(
            "notation",
            vec![
                Atom::triple(var("x"), skos::IN_SCHEME, var("s")),
                Atom::triple(var("y"), skos::IN_SCHEME, var("s")),
                Atom::Different(var("x"), var("y")),
                Atom::triple(var("x"), skos::NOTATION, var("n")),
                Atom::triple(var("y"), skos::NOTATION, var("n")),
            ],
            vec![],
        )
        .unwrap();
        let solutions = rule.evaluate(&graph);
        assert_eq!(solutions.len(), 2);
        assert_ne!(solutions[0].get("x"), solutions[1].get("x"));
    }

    #[test]
    fn inference_instantiates_the_consequent() {
        let mut graph = Graph::new();
        graph.insert(TripleRef::new(node("a").as_ref(), skos::BROADER, node("b").as_ref()));
        let rule = Rule::new(
            "inverse",
            vec![Atom::triple(var("x"), skos::BROADER, var("y"))],
            vec![TriplePattern::new(var("y"), skos::NARROWER, var("x"))],
        )
        .unwrap();
        assert_eq!(
            rule.infer(&graph),
            vec![Triple::new(node("b"), skos::NARROWER, node("a"))]
        );
        graph.extend(rule.infer(&graph));
        assert!(rule.infer(&graph).is_empty());
    }
}
