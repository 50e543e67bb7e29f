//! Breadth-first driver turning seed pairs into generated functions.

use std::collections::{HashMap, HashSet, VecDeque};

use proc_macro2::TokenStream;

use crate::descriptor::{QualifiedName, StructDescriptor, TypeGraph};
use crate::error::{GenerateError, Side};
use crate::naming;
use crate::overrides::{OverrideKey, OverrideRegistry};
use crate::pair::{ConversionPair, PairKey, PairSide};
use crate::paths::ModulePaths;
use crate::planner::FieldPlanner;

/// `fn(src: &From, dst: &mut To)` with one statement per public destination
/// field, in declaration order.
#[derive(Debug, Clone)]
pub struct GeneratedFunction {
  pub name: String,
  pub from: QualifiedName,
  pub to: QualifiedName,
  pub statements: Vec<TokenStream>,
  /// Struct types the body spells out, besides `from` and `to`.
  pub referenced: Vec<QualifiedName>,
}

impl GeneratedFunction {
  /// Every struct type the function needs in scope.
  pub fn types(&self) -> impl Iterator<Item = &QualifiedName> {
    std::iter::once(&self.from)
      .chain(std::iter::once(&self.to))
      .chain(self.referenced.iter())
  }
}

/// State of one generation run. Pair keys are marked before their fields are
/// planned, so cyclic struct graphs terminate.
pub struct Worklist<'a> {
  graph: &'a TypeGraph,
  overrides: &'a OverrideRegistry,
  planner: FieldPlanner<'a>,
  generated: HashSet<PairKey>,
  /// Function name to the pair that claimed it.
  names: HashMap<String, PairKey>,
  queue: VecDeque<ConversionPair>,
}

impl<'a> Worklist<'a> {
  pub fn new(graph: &'a TypeGraph, overrides: &'a OverrideRegistry, paths: &'a ModulePaths) -> Self {
    Self {
      graph,
      overrides,
      planner: FieldPlanner::new(overrides, paths),
      generated: HashSet::new(),
      names: HashMap::new(),
      queue: VecDeque::new(),
    }
  }

  pub fn run(mut self, seed: Vec<ConversionPair>) -> Result<Vec<GeneratedFunction>, GenerateError> {
    self.queue.extend(seed);
    let mut functions = Vec::new();

    while let Some(pair) = self.queue.pop_front() {
      let key = pair.key();
      if !self.generated.insert(key.clone()) {
        tracing::debug!(pair = %key, "pair already generated");
        continue;
      }

      if self.overrides.contains(&OverrideKey::pair(&key.from, &key.to)) {
        tracing::debug!(pair = %key, "pair replaced by a declared override");
        continue;
      }

      let name = naming::pair_function_name(&key.from, &key.to);
      if let Some(first) = self.names.get(&name) {
        return Err(GenerateError::NameClash {
          name,
          first: first.to_string(),
          second: key.to_string(),
        });
      }
      self.names.insert(name.clone(), key.clone());

      let function = self.build(&pair, key, name)?;
      functions.push(function);
    }

    Ok(functions)
  }

  fn build(
    &mut self,
    pair: &ConversionPair,
    key: PairKey,
    name: String,
  ) -> Result<GeneratedFunction, GenerateError> {
    let source = self.struct_of(pair, Side::From)?;
    let target = self.struct_of(pair, Side::To)?;

    let mut statements = Vec::new();
    let mut referenced = Vec::new();
    for field in target.public_fields() {
      let plan = self.planner.plan(source, target, field);
      statements.push(plan.statement);
      referenced.extend(plan.referenced);
      if let Some(nested) = plan.nested {
        self.queue.push_back(nested);
      }
    }

    tracing::debug!(pair = %key, fields = statements.len(), "generated pair");

    Ok(GeneratedFunction {
      name,
      from: key.from,
      to: key.to,
      statements,
      referenced,
    })
  }

  fn struct_of(&self, pair: &ConversionPair, side: Side) -> Result<&'a StructDescriptor, GenerateError> {
    let pair_side: &PairSide = match side {
      Side::From => &pair.from,
      Side::To => &pair.to,
    };
    let graph = self.graph;
    pair_side
      .ty
      .struct_name()
      .and_then(|name| graph.get(name))
      .ok_or_else(|| GenerateError::ShapeMismatch {
        side,
        pair: pair.key().to_string(),
        found: pair_side.ty.to_string(),
      })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::descriptor::{FieldDescriptor, TypeDescriptor};
  use crate::registration::{expand, RegistrationDirective};

  fn name(path: &str) -> QualifiedName {
    QualifiedName::from_path(path)
  }

  fn structure(path: &str) -> TypeDescriptor {
    TypeDescriptor::structure(name(path))
  }

  fn string() -> TypeDescriptor {
    TypeDescriptor::primitive("String")
  }

  fn paths() -> ModulePaths {
    ModulePaths::new(vec!["crate".into(), "fixture".into()])
  }

  fn pair(from: &str, to: &str) -> ConversionPair {
    ConversionPair::new(
      PairSide::new(structure(from), true),
      PairSide::new(structure(to), true),
    )
  }

  fn run(graph: &TypeGraph, overrides: &OverrideRegistry, seed: Vec<ConversionPair>) -> Vec<GeneratedFunction> {
    let paths = paths();
    Worklist::new(graph, overrides, &paths).run(seed).unwrap()
  }

  fn names(functions: &[GeneratedFunction]) -> Vec<&str> {
    functions.iter().map(|f| f.name.as_str()).collect()
  }

  /// `A { b: Option<Box<B>> }`, `B { a: Option<Box<A>> }` on both sides.
  fn cyclic_graph() -> TypeGraph {
    let mut graph = TypeGraph::new();
    for (this, other) in &[("A", "B"), ("B", "A"), ("ADto", "BDto"), ("BDto", "ADto")] {
      graph.insert(StructDescriptor::new(
        name(&format!("crate::fixture::{}", this)),
        vec![
          FieldDescriptor::public("name", string()),
          FieldDescriptor::public(
            "next",
            TypeDescriptor::option_box(structure(&format!("crate::fixture::{}", other))),
          ),
        ],
      ));
    }
    graph
  }

  #[test]
  fn test_cycle_terminates() {
    let graph = cyclic_graph();
    let functions = run(
      &graph,
      &OverrideRegistry::default(),
      vec![pair("crate::fixture::A", "crate::fixture::ADto")],
    );
    assert_eq!(
      names(&functions),
      vec!["convert_a_to_a_dto", "convert_b_to_b_dto"]
    );
  }

  #[test]
  fn test_bidirectional_cycle_yields_each_direction_once() {
    let graph = cyclic_graph();
    let seed = expand(&[RegistrationDirective::bidirectional(
      PairSide::new(structure("crate::fixture::A"), true),
      PairSide::new(structure("crate::fixture::ADto"), true),
    )]);
    let functions = run(&graph, &OverrideRegistry::default(), seed);
    assert_eq!(
      names(&functions),
      vec![
        "convert_a_to_a_dto",
        "convert_a_dto_to_a",
        "convert_b_to_b_dto",
        "convert_b_dto_to_b",
      ]
    );
  }

  fn tree_graph() -> TypeGraph {
    let mut graph = TypeGraph::new();
    let leaf = |n: &str| StructDescriptor::new(name(n), vec![FieldDescriptor::public("value", string())]);
    graph.insert(StructDescriptor::new(
      name("crate::fixture::Root"),
      vec![
        FieldDescriptor::public("left", structure("crate::fixture::Left")),
        FieldDescriptor::public("right", TypeDescriptor::vec(structure("crate::fixture::Right"))),
      ],
    ));
    graph.insert(StructDescriptor::new(
      name("crate::fixture::RootDto"),
      vec![
        FieldDescriptor::public("right", TypeDescriptor::vec(structure("crate::fixture::RightDto"))),
        FieldDescriptor::public("left", structure("crate::fixture::LeftDto")),
      ],
    ));
    graph.insert(StructDescriptor::new(
      name("crate::fixture::Left"),
      vec![FieldDescriptor::public("leaf", structure("crate::fixture::Leaf"))],
    ));
    graph.insert(StructDescriptor::new(
      name("crate::fixture::LeftDto"),
      vec![FieldDescriptor::public("leaf", structure("crate::fixture::LeafDto"))],
    ));
    graph.insert(StructDescriptor::new(
      name("crate::fixture::Right"),
      vec![FieldDescriptor::public("leaf", structure("crate::fixture::Leaf"))],
    ));
    graph.insert(StructDescriptor::new(
      name("crate::fixture::RightDto"),
      vec![FieldDescriptor::public("leaf", structure("crate::fixture::LeafDto"))],
    ));
    graph.insert(leaf("crate::fixture::Leaf"));
    graph.insert(leaf("crate::fixture::LeafDto"));
    graph
  }

  #[test]
  fn test_breadth_first_and_deduplicated() {
    let graph = tree_graph();
    let functions = run(
      &graph,
      &OverrideRegistry::default(),
      vec![
        pair("crate::fixture::Root", "crate::fixture::RootDto"),
        pair("crate::fixture::Root", "crate::fixture::RootDto"),
      ],
    );
    // Siblings in destination field order, then the shared grandchild once.
    assert_eq!(
      names(&functions),
      vec![
        "convert_root_to_root_dto",
        "convert_right_to_right_dto",
        "convert_left_to_left_dto",
        "convert_leaf_to_leaf_dto",
      ]
    );
    assert_eq!(functions[0].statements.len(), 2);
    assert_eq!(functions[0].referenced, vec![name("crate::fixture::RightDto")]);
  }

  #[test]
  fn test_whole_pair_override_skips_generation() {
    let graph = tree_graph();
    let overrides = OverrideRegistry::scan(vec!["convert_left_to_left_dto"]);
    let functions = run(
      &graph,
      &overrides,
      vec![pair("crate::fixture::Root", "crate::fixture::RootDto")],
    );
    assert_eq!(
      names(&functions),
      vec![
        "convert_root_to_root_dto",
        "convert_right_to_right_dto",
        "convert_leaf_to_leaf_dto",
      ]
    );
  }

  #[test]
  fn test_private_destination_fields_are_skipped() {
    let mut graph = TypeGraph::new();
    graph.insert(StructDescriptor::new(
      name("crate::fixture::Source"),
      vec![FieldDescriptor::public("name", string())],
    ));
    graph.insert(StructDescriptor::new(
      name("crate::fixture::Target"),
      vec![
        FieldDescriptor::public("name", string()),
        FieldDescriptor::private("cache", string()),
      ],
    ));
    let functions = run(
      &graph,
      &OverrideRegistry::default(),
      vec![pair("crate::fixture::Source", "crate::fixture::Target")],
    );
    assert_eq!(functions[0].statements.len(), 1);
  }

  #[test]
  fn test_shape_mismatch_aborts() {
    let graph = tree_graph();
    let paths = paths();
    let overrides = OverrideRegistry::default();
    let seed = vec![ConversionPair::new(
      PairSide::new(structure("crate::fixture::Root"), false),
      PairSide::new(TypeDescriptor::primitive("i32"), false),
    )];

    let err = Worklist::new(&graph, &overrides, &paths).run(seed).unwrap_err();
    match err {
      GenerateError::ShapeMismatch { side, found, .. } => {
        assert_eq!(side, Side::To);
        assert_eq!(found, "i32");
      }
      other => panic!("unexpected error: {}", other),
    }
  }

  #[test]
  fn test_same_local_names_in_two_modules_clash() {
    let mut graph = TypeGraph::new();
    for path in &["crate::v1::User", "crate::v2::User", "crate::fixture::UserDto"] {
      graph.insert(StructDescriptor::new(
        name(path),
        vec![FieldDescriptor::public("name", string())],
      ));
    }
    let paths = paths();
    let overrides = OverrideRegistry::default();
    let seed = vec![
      pair("crate::v1::User", "crate::fixture::UserDto"),
      pair("crate::v2::User", "crate::fixture::UserDto"),
    ];

    let err = Worklist::new(&graph, &overrides, &paths).run(seed).unwrap_err();
    match err {
      GenerateError::NameClash { name, first, second } => {
        assert_eq!(name, "convert_user_to_user_dto");
        assert!(first.contains("crate::v1::User"));
        assert!(second.contains("crate::v2::User"));
      }
      other => panic!("unexpected error: {}", other),
    }
  }

  #[test]
  fn test_unknown_struct_is_a_shape_mismatch() {
    let graph = TypeGraph::new();
    let paths = paths();
    let overrides = OverrideRegistry::default();
    let seed = vec![pair("crate::fixture::Missing", "crate::fixture::Root")];
    let err = Worklist::new(&graph, &overrides, &paths).run(seed).unwrap_err();
    assert!(err.to_string().contains("crate::fixture::Missing"));
  }
}
