//! Turns a package directory into the inputs of a generation run.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use proc_macro2::{TokenStream, TokenTree};
use syn::visit::{self, Visit};
use syn::{AttrStyle, Expr, ExprCall, GenericArgument, ItemMod, PathArguments, Type};

use crate::config::Config;
use crate::descriptor::TypeGraph;
use crate::error::ResolutionError;
use crate::index::{wrapped_inner, CrateIndex, SourceFile};
use crate::pair::PairSide;
use crate::registration::RegistrationDirective;

pub const REGISTER: &str = "register";
pub const REGISTER_BIDIRECTIONAL: &str = "register_bidirectional";

#[derive(Debug)]
pub struct Resolution {
  /// Module path of the package, e.g. `["crate", "converter"]`.
  pub package: Vec<String>,
  pub graph: TypeGraph,
  /// In discovery order: file path order, then source order.
  pub directives: Vec<RegistrationDirective>,
  /// Functions the package module declares or imports.
  pub functions: Vec<String>,
}

pub fn resolve(target: &Path, config: &Config) -> Result<Resolution, ResolutionError> {
  if !target.is_dir() {
    return Err(ResolutionError::NotADirectory(target.to_path_buf()));
  }
  let target = canonicalize(target)?;
  let root = match &config.crate_root {
    Some(root) => canonicalize(root)?,
    None => canonicalize(&find_source_root(&target)?)?,
  };
  let relative = target
    .strip_prefix(&root)
    .map_err(|_| ResolutionError::OutsideCrate {
      path: target.clone(),
      root: root.clone(),
    })?;

  let mut package = vec!["crate".to_string()];
  package.extend(
    relative
      .components()
      .filter_map(|c| c.as_os_str().to_str().map(str::to_string)),
  );

  let output = target.join(&config.output_file);
  let index = CrateIndex::load(&root, &[output])?;

  let module_file = target.with_extension("rs");
  let mut directives = Vec::new();
  for file in index.files() {
    let in_package = file.path.parent() == Some(target.as_path()) || file.path == module_file;
    if !in_package {
      continue;
    }
    if !has_marker(&file.ast, &config.marker) {
      tracing::trace!(file = %file.path.display(), "no generation marker");
      continue;
    }
    directives.extend(directives_in(&index, file, &config.runtime_crate));
  }

  let generated = Path::new(&config.output_file)
    .file_stem()
    .and_then(|stem| stem.to_str())
    .unwrap_or_default();
  let functions = visible_functions(&index, &package, generated);

  Ok(Resolution {
    package,
    graph: index.type_graph(),
    directives,
    functions,
  })
}

fn canonicalize(path: &Path) -> Result<PathBuf, ResolutionError> {
  fs::canonicalize(path).map_err(|source| ResolutionError::Io {
    path: path.to_path_buf(),
    source,
  })
}

/// `src/` next to the closest `Cargo.toml` above `target`.
fn find_source_root(target: &Path) -> Result<PathBuf, ResolutionError> {
  target
    .ancestors()
    .find(|dir| dir.join("Cargo.toml").is_file())
    .map(|dir| dir.join("src"))
    .ok_or_else(|| ResolutionError::NoCrateRoot(target.to_path_buf()))
}

/// `#![cfg(...)]` naming the marker anywhere in its predicate.
pub fn has_marker(file: &syn::File, marker: &str) -> bool {
  file.attrs.iter().any(|attr| {
    matches!(attr.style, AttrStyle::Inner(_))
      && attr.path.is_ident("cfg")
      && mentions(attr.tokens.clone(), marker)
  })
}

fn mentions(tokens: TokenStream, marker: &str) -> bool {
  tokens.into_iter().any(|token| match token {
    TokenTree::Ident(ident) => ident == marker,
    TokenTree::Group(group) => mentions(group.stream(), marker),
    _ => false,
  })
}

pub fn directives_in(index: &CrateIndex, file: &SourceFile, runtime: &str) -> Vec<RegistrationDirective> {
  let mut visitor = DirectiveVisitor {
    index,
    runtime,
    module: file.module.clone(),
    directives: Vec::new(),
  };
  visitor.visit_file(&file.ast);
  tracing::debug!(
    file = %file.path.display(),
    directives = visitor.directives.len(),
    "scanned registrations"
  );
  visitor.directives
}

/// Names reachable as `super::name` from the generated module, minus what the
/// generated module itself provides.
fn visible_functions(index: &CrateIndex, package: &[String], generated: &str) -> Vec<String> {
  let mut functions = Vec::new();
  let mut visited = HashSet::new();
  collect_functions(index, package, generated, &mut visited, &mut functions);
  functions
}

/// Declared functions and imported names of `module`, then those of every
/// module it glob-imports.
fn collect_functions(
  index: &CrateIndex,
  module: &[String],
  generated: &str,
  visited: &mut HashSet<Vec<String>>,
  functions: &mut Vec<String>,
) {
  if !visited.insert(module.to_vec()) {
    return;
  }
  let entry = match index.module(module) {
    Some(entry) => entry,
    None => return,
  };
  let through_generated = |path: &[String]| path.iter().any(|segment| segment == generated);

  let mut imported: Vec<&String> = entry
    .imports()
    .filter(|(_, path)| !through_generated(path.as_slice()))
    .map(|(name, _)| name)
    .collect();
  imported.sort();

  functions.extend(entry.functions().iter().cloned());
  functions.extend(imported.into_iter().cloned());

  for glob in entry.globs() {
    if through_generated(glob.as_slice()) {
      continue;
    }
    if let Some(inner) = index.resolve_module(module, glob) {
      if !through_generated(inner.as_slice()) {
        collect_functions(index, &inner, generated, visited, functions);
      }
    }
  }
}

struct DirectiveVisitor<'a> {
  index: &'a CrateIndex,
  runtime: &'a str,
  module: Vec<String>,
  directives: Vec<RegistrationDirective>,
}

impl<'a> DirectiveVisitor<'a> {
  fn directive(&self, path: &syn::Path) -> Option<RegistrationDirective> {
    let function = self.runtime_function(path)?;
    let last = path.segments.last()?;
    let types: Vec<&Type> = match &last.arguments {
      PathArguments::AngleBracketed(args) => args
        .args
        .iter()
        .filter_map(|arg| match arg {
          GenericArgument::Type(ty) => Some(ty),
          _ => None,
        })
        .collect(),
      _ => Vec::new(),
    };
    let (from, to) = match types.as_slice() {
      [from, to] => (self.side(from), self.side(to)),
      _ => {
        tracing::warn!(
          call = %function,
          "registration without two explicit type arguments is ignored"
        );
        return None;
      }
    };

    Some(if function == REGISTER_BIDIRECTIONAL {
      RegistrationDirective::bidirectional(from, to)
    } else {
      RegistrationDirective::forward(from, to)
    })
  }

  /// `convgen::register`, or a `register` imported from the runtime crate.
  fn runtime_function(&self, path: &syn::Path) -> Option<String> {
    let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
    let full = if segments.len() == 1 {
      let single = &segments[0];
      let module = self.index.module(&self.module)?;
      match module.import(single) {
        Some(imported) => imported.to_vec(),
        None if module.globs().iter().any(|glob| glob.len() == 1 && glob[0] == self.runtime) => {
          vec![self.runtime.to_string(), single.clone()]
        }
        None => return None,
      }
    } else {
      segments
    };

    match full.as_slice() {
      [krate, function]
        if krate == self.runtime && (function == REGISTER || function == REGISTER_BIDIRECTIONAL) =>
      {
        Some(function.clone())
      }
      _ => None,
    }
  }

  /// `&T`, `&mut T`, `Box<T>` and `Option<T>` register the pointer form of `T`.
  fn side(&self, ty: &Type) -> PairSide {
    let (inner, is_pointer) = match ty {
      Type::Reference(reference) => (&*reference.elem, true),
      _ => match wrapped_inner(ty, "Box").or_else(|| wrapped_inner(ty, "Option")) {
        Some(inner) => (inner, true),
        None => (ty, false),
      },
    };
    PairSide::new(self.index.describe(&self.module, inner), is_pointer)
  }
}

impl<'a, 'ast> Visit<'ast> for DirectiveVisitor<'a> {
  fn visit_expr_call(&mut self, node: &'ast ExprCall) {
    if let Expr::Path(func) = &*node.func {
      if let Some(directive) = self.directive(&func.path) {
        self.directives.push(directive);
      }
    }
    visit::visit_expr_call(self, node);
  }

  fn visit_item_mod(&mut self, node: &'ast ItemMod) {
    self.module.push(node.ident.to_string());
    visit::visit_item_mod(self, node);
    self.module.pop();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::descriptor::{QualifiedName, TypeDescriptor};

  fn module(path: &str) -> Vec<String> {
    path.split("::").map(str::to_string).collect()
  }

  fn file(path: &str, source: &str) -> SourceFile {
    SourceFile::parse(PathBuf::from(path), module(path), source).unwrap()
  }

  fn named(path: &str) -> TypeDescriptor {
    TypeDescriptor::structure(QualifiedName::from_path(path))
  }

  const DOMAIN: &str = "pub struct User { pub name: String } pub struct UserDto { pub name: String }";

  #[test]
  fn test_marker() {
    let marked: syn::File = syn::parse_str("#![cfg(convgen)] fn f() {}").unwrap();
    let nested: syn::File = syn::parse_str("#![cfg(all(test, convgen))] fn f() {}").unwrap();
    let other: syn::File = syn::parse_str("#![cfg(test)] fn f() {}").unwrap();
    let outer: syn::File = syn::parse_str("#[cfg(convgen)] fn f() {}").unwrap();

    assert!(has_marker(&marked, "convgen"));
    assert!(has_marker(&nested, "convgen"));
    assert!(!has_marker(&other, "convgen"));
    assert!(!has_marker(&outer, "convgen"));
    assert!(has_marker(&marked, "convgen") && !has_marker(&marked, "mapgen"));
  }

  #[test]
  fn test_directives_in_source_order() {
    let register = file(
      "crate::domain::register",
      r#"
        #![cfg(convgen)]
        use super::{User, UserDto};

        const _: convgen::Registration = convgen::register::<User, UserDto>();

        fn init() {
          convgen::register_bidirectional::<&User, Box<UserDto>>();
        }
      "#,
    );
    let index = CrateIndex::from_files(vec![file("crate::domain", DOMAIN), register]);
    let directives = directives_in(&index, &index.files()[1], "convgen");

    assert_eq!(
      directives,
      vec![
        RegistrationDirective::forward(
          PairSide::new(named("crate::domain::User"), false),
          PairSide::new(named("crate::domain::UserDto"), false),
        ),
        RegistrationDirective::bidirectional(
          PairSide::new(named("crate::domain::User"), true),
          PairSide::new(named("crate::domain::UserDto"), true),
        ),
      ]
    );
  }

  #[test]
  fn test_imported_register_is_recognized() {
    let source = r#"
      #![cfg(convgen)]
      use convgen::register as link;
      use crate::domain::*;

      fn init() {
        link::<Option<User>, UserDto>();
      }
    "#;
    let register = file("crate::domain::register", source);
    let index = CrateIndex::from_files(vec![file("crate::domain", DOMAIN), register]);
    let register = &index.files()[1];
    let directives = directives_in(&index, register, "convgen");

    assert_eq!(directives.len(), 1);
    assert!(directives[0].from.is_pointer);
    assert!(!directives[0].bidirectional);
  }

  #[test]
  fn test_foreign_register_is_ignored() {
    let source = r#"
      #![cfg(convgen)]
      use super::*;

      fn init() {
        other::register::<User, UserDto>();
        register::<User, UserDto>();
        convgen::register();
      }
    "#;
    let register = file("crate::domain::register", source);
    let index = CrateIndex::from_files(vec![file("crate::domain", DOMAIN), register]);
    let directives = directives_in(&index, &index.files()[1], "convgen");
    assert!(directives.is_empty());
  }

  #[test]
  fn test_visible_functions_skip_generated_module() {
    let index = CrateIndex::from_files(vec![file(
      "crate::converter",
      r#"
        mod generated;
        pub use generated::convert_a_to_b;
        use crate::custom::convert_c_name_to_d_name;

        pub fn convert_e_to_f(src: &E, dst: &mut F) {}
      "#,
    )]);
    let functions = visible_functions(&index, &module("crate::converter"), "generated");
    assert_eq!(functions, vec!["convert_e_to_f", "convert_c_name_to_d_name"]);
  }

  #[test]
  fn test_visible_functions_follow_glob_reexports() {
    let index = CrateIndex::from_files(vec![
      file(
        "crate::converter",
        r#"
          mod custom;
          mod generated {}
          pub use custom::*;
          pub use generated::*;
          use self::custom::*;

          pub fn convert_e_to_f(src: &E, dst: &mut F) {}
        "#,
      ),
      file(
        "crate::converter::custom",
        r#"
          use super::*;
          pub use crate::shared::convert_g_to_h;

          pub fn convert_a_name_to_b_name(src: &A, dst: &mut B) {}
        "#,
      ),
      file(
        "crate::converter::generated",
        "pub fn convert_a_to_b(src: &A, dst: &mut B) {}",
      ),
    ]);
    let functions = visible_functions(&index, &module("crate::converter"), "generated");
    assert_eq!(
      functions,
      vec!["convert_e_to_f", "convert_a_name_to_b_name", "convert_g_to_h"]
    );
  }
}
