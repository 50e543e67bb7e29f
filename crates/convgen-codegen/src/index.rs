//! Module-level index of a crate's sources.
//!
//! Every `.rs` file under the crate's `src/` is parsed once and mapped to its
//! module path. Items and `use` declarations are indexed per module, which is
//! enough to resolve the type paths a struct field or a registration spells.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use quote::ToTokens;
use syn::{Fields, GenericArgument, Item, PathArguments, Type, UseTree, Visibility};

use crate::descriptor::{
  FieldDescriptor, MapContainer, QualifiedName, StructDescriptor, TypeDescriptor, TypeGraph,
};
use crate::error::ResolutionError;

/// Re-export and alias chains are followed this deep at most.
const MAX_DEPTH: usize = 16;

const BUILTINS: &[&str] = &[
  "bool", "char", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128",
  "usize", "f32", "f64", "str", "String",
];

const STD_ROOTS: &[&str] = &["std", "core", "alloc"];

pub struct SourceFile {
  pub path: PathBuf,
  pub module: Vec<String>,
  pub ast: syn::File,
}

impl SourceFile {
  pub fn parse(path: PathBuf, module: Vec<String>, content: &str) -> Result<Self, ResolutionError> {
    let ast = syn::parse_file(content).map_err(|err| parse_error(&path, &err))?;
    Ok(Self { path, module, ast })
  }
}

#[derive(Default)]
pub struct ModuleIndex {
  structs: HashMap<String, syn::ItemStruct>,
  aliases: HashMap<String, Type>,
  /// Enums, unions, traits and generic aliases: named, never looked into.
  opaque: HashSet<String>,
  functions: Vec<String>,
  imports: HashMap<String, Vec<String>>,
  globs: Vec<Vec<String>>,
}

impl ModuleIndex {
  /// Free functions in declaration order.
  pub fn functions(&self) -> &[String] {
    &self.functions
  }

  /// The path a name was imported from, as written.
  pub fn import(&self, name: &str) -> Option<&[String]> {
    self.imports.get(name).map(Vec::as_slice)
  }

  pub fn imports(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
    self.imports.iter()
  }

  pub fn globs(&self) -> &[Vec<String>] {
    &self.globs
  }
}

#[derive(Debug, Clone, PartialEq)]
enum Entity {
  Module(Vec<String>),
  Struct(QualifiedName),
  Alias(QualifiedName),
  Opaque(QualifiedName),
}

pub struct CrateIndex {
  files: Vec<SourceFile>,
  modules: HashMap<Vec<String>, ModuleIndex>,
}

impl CrateIndex {
  /// Parses every `.rs` file below `root` except the `skip`ped ones.
  pub fn load(root: &Path, skip: &[PathBuf]) -> Result<Self, ResolutionError> {
    let mut paths = Vec::new();
    collect_files(root, &mut paths)?;
    paths.retain(|path| !skip.contains(path));
    paths.sort();

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
      let content = fs::read_to_string(&path).map_err(|source| ResolutionError::Io {
        path: path.clone(),
        source,
      })?;
      let module = module_path(root, &path);
      files.push(SourceFile::parse(path, module, &content)?);
    }
    tracing::debug!(root = %root.display(), files = files.len(), "indexed crate sources");

    Ok(Self::from_files(files))
  }

  pub fn from_files(files: Vec<SourceFile>) -> Self {
    let mut modules = HashMap::new();
    for file in &files {
      for depth in 1..=file.module.len() {
        modules
          .entry(file.module[..depth].to_vec())
          .or_insert_with(ModuleIndex::default);
      }
      index_items(&mut modules, file.module.clone(), &file.ast.items);
    }
    Self { files, modules }
  }

  pub fn files(&self) -> &[SourceFile] {
    &self.files
  }

  pub fn module(&self, path: &[String]) -> Option<&ModuleIndex> {
    self.modules.get(path)
  }

  /// Every non-generic struct with named fields.
  pub fn type_graph(&self) -> TypeGraph {
    let mut graph = TypeGraph::new();
    for (module, index) in &self.modules {
      for (name, item) in &index.structs {
        if !is_describable(item) {
          continue;
        }
        let owner = QualifiedName::new(module.clone(), name.clone());
        let fields = item
          .fields
          .iter()
          .filter_map(|field| {
            let name = field.ident.as_ref()?.to_string();
            let ty = self.describe_field(module, &owner, &field.ty);
            Some(if is_visible(&field.vis) {
              FieldDescriptor::public(name, ty)
            } else {
              FieldDescriptor::private(name, ty)
            })
          })
          .collect();
        graph.insert(StructDescriptor::new(owner, fields));
      }
    }
    graph
  }

  /// Descriptor of `ty` as written inside `module`.
  pub fn describe(&self, module: &[String], ty: &Type) -> TypeDescriptor {
    self.describe_at(module, None, ty, 0)
  }

  /// Like [`describe`](Self::describe), with `Self` naming `owner`.
  pub fn describe_field(&self, module: &[String], owner: &QualifiedName, ty: &Type) -> TypeDescriptor {
    self.describe_at(module, Some(owner), ty, 0)
  }

  fn describe_at(
    &self,
    module: &[String],
    owner: Option<&QualifiedName>,
    ty: &Type,
    depth: usize,
  ) -> TypeDescriptor {
    let path = match ty {
      Type::Paren(inner) => return self.describe_at(module, owner, &inner.elem, depth),
      Type::Group(inner) => return self.describe_at(module, owner, &inner.elem, depth),
      Type::Path(path) if path.qself.is_none() => &path.path,
      other => return opaque(other),
    };
    let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
    let last = match path.segments.last() {
      Some(last) => last,
      None => return opaque(ty),
    };
    let name = last.ident.to_string();
    let arguments = type_arguments(&last.arguments);

    if let (Some(owner), [single]) = (owner, segments.as_slice()) {
      if single == "Self" {
        return TypeDescriptor::Struct(owner.clone());
      }
    }

    if is_std_path(&segments) {
      match (name.as_str(), arguments.as_slice()) {
        ("Option", [inner]) => {
          return match boxed_inner(inner) {
            Some(boxed) => TypeDescriptor::option_box(self.describe_at(module, owner, boxed, depth)),
            None => TypeDescriptor::option(self.describe_at(module, owner, inner, depth)),
          }
        }
        ("Vec", [elem]) => return TypeDescriptor::vec(self.describe_at(module, owner, elem, depth)),
        ("HashMap", [key, value, ..]) | ("BTreeMap", [key, value]) => {
          let container = if name == "HashMap" {
            MapContainer::Hash
          } else {
            MapContainer::BTree
          };
          return TypeDescriptor::map(
            container,
            self.describe_at(module, owner, key, depth),
            self.describe_at(module, owner, value, depth),
          );
        }
        ("String", []) => return TypeDescriptor::primitive("String"),
        _ => {}
      }
    }

    if segments.len() == 1 && BUILTINS.contains(&name.as_str()) {
      return TypeDescriptor::primitive(&name);
    }
    if !arguments.is_empty() || depth > MAX_DEPTH {
      return opaque(ty);
    }

    match self.resolve_path(module, &segments, 0) {
      Some(Entity::Struct(name)) => {
        let describable = self
          .modules
          .get(&name.namespace)
          .and_then(|index| index.structs.get(&name.name))
          .map_or(false, is_describable);
        if describable {
          TypeDescriptor::Struct(name)
        } else {
          TypeDescriptor::Primitive(name)
        }
      }
      Some(Entity::Alias(name)) => {
        let target = self
          .modules
          .get(&name.namespace)
          .and_then(|index| index.aliases.get(&name.name));
        match target {
          Some(target) => TypeDescriptor::Alias {
            target: Box::new(self.describe_at(&name.namespace, None, target, depth + 1)),
            name,
          },
          None => TypeDescriptor::Primitive(name),
        }
      }
      Some(Entity::Opaque(name)) => TypeDescriptor::Primitive(name),
      Some(Entity::Module(_)) | None => opaque(ty),
    }
  }

  /// Module a `use` path names, as seen from `module`.
  pub fn resolve_module(&self, module: &[String], path: &[String]) -> Option<Vec<String>> {
    match self.resolve_path(module, path, 0)? {
      Entity::Module(inner) => Some(inner),
      _ => None,
    }
  }

  fn resolve_path(&self, module: &[String], segments: &[String], depth: usize) -> Option<Entity> {
    if depth > MAX_DEPTH || segments.is_empty() {
      return None;
    }

    let mut rest = segments;
    let mut base: Option<Vec<String>> = None;
    match segments[0].as_str() {
      "crate" => {
        base = Some(vec!["crate".to_string()]);
        rest = &rest[1..];
      }
      "self" => {
        base = Some(module.to_vec());
        rest = &rest[1..];
      }
      "super" => {
        let mut parent = module.to_vec();
        while rest.first().map_or(false, |s| s == "super") {
          if parent.len() > 1 {
            parent.pop();
          }
          rest = &rest[1..];
        }
        base = Some(parent);
      }
      _ => {}
    }

    let (first, rest) = match rest.split_first() {
      Some(split) => split,
      None => return base.map(Entity::Module),
    };
    let scope = base.as_deref().unwrap_or(module);
    let mut entity = self.lookup(scope, first, depth + 1)?;
    for segment in rest {
      entity = match entity {
        Entity::Module(inner) => self.lookup(&inner, segment, depth + 1)?,
        _ => return None,
      };
    }
    Some(entity)
  }

  /// Name lookup within one module: items, child modules, imports, globs.
  fn lookup(&self, module: &[String], name: &str, depth: usize) -> Option<Entity> {
    if depth > MAX_DEPTH {
      return None;
    }
    let index = self.modules.get(module)?;
    let qualified = || QualifiedName::new(module.to_vec(), name);

    if index.structs.contains_key(name) {
      return Some(Entity::Struct(qualified()));
    }
    if index.aliases.contains_key(name) {
      return Some(Entity::Alias(qualified()));
    }
    if index.opaque.contains(name) {
      return Some(Entity::Opaque(qualified()));
    }
    let mut child = module.to_vec();
    child.push(name.to_string());
    if self.modules.contains_key(&child) {
      return Some(Entity::Module(child));
    }
    if let Some(path) = index.imports.get(name) {
      return self.resolve_path(module, path, depth + 1);
    }
    index.globs.iter().find_map(|glob| {
      match self.resolve_path(module, glob, depth + 1)? {
        Entity::Module(inner) if inner.as_slice() != module => self.lookup(&inner, name, depth + 1),
        _ => None,
      }
    })
  }
}

fn index_items(modules: &mut HashMap<Vec<String>, ModuleIndex>, module: Vec<String>, items: &[Item]) {
  for item in items {
    if let Item::Mod(inner) = item {
      if let Some((_, content)) = &inner.content {
        let mut child = module.clone();
        child.push(inner.ident.to_string());
        modules.entry(child.clone()).or_insert_with(ModuleIndex::default);
        index_items(modules, child, content);
      }
      continue;
    }

    let index = modules.entry(module.clone()).or_insert_with(ModuleIndex::default);
    match item {
      Item::Struct(item) => {
        index.structs.insert(item.ident.to_string(), item.clone());
      }
      Item::Type(item) if item.generics.params.is_empty() => {
        index.aliases.insert(item.ident.to_string(), (*item.ty).clone());
      }
      Item::Type(item) => {
        index.opaque.insert(item.ident.to_string());
      }
      Item::Enum(item) => {
        index.opaque.insert(item.ident.to_string());
      }
      Item::Union(item) => {
        index.opaque.insert(item.ident.to_string());
      }
      Item::Trait(item) => {
        index.opaque.insert(item.ident.to_string());
      }
      Item::Fn(item) => index.functions.push(item.sig.ident.to_string()),
      Item::Use(item) => flatten_use(Vec::new(), &item.tree, index),
      _ => {}
    }
  }
}

fn flatten_use(prefix: Vec<String>, tree: &UseTree, index: &mut ModuleIndex) {
  match tree {
    UseTree::Path(path) => {
      let mut prefix = prefix;
      prefix.push(path.ident.to_string());
      flatten_use(prefix, &path.tree, index);
    }
    UseTree::Name(name) => {
      let ident = name.ident.to_string();
      import(prefix, &ident, None, index);
    }
    UseTree::Rename(rename) => {
      let ident = rename.ident.to_string();
      let alias = rename.rename.to_string();
      if alias != "_" {
        import(prefix, &ident, Some(alias), index);
      }
    }
    UseTree::Glob(_) => index.globs.push(prefix),
    UseTree::Group(group) => {
      for tree in &group.items {
        flatten_use(prefix.clone(), tree, index);
      }
    }
  }
}

fn import(prefix: Vec<String>, ident: &str, alias: Option<String>, index: &mut ModuleIndex) {
  let (path, name) = if ident == "self" {
    match prefix.last() {
      Some(last) => (prefix.clone(), alias.unwrap_or_else(|| last.clone())),
      None => return,
    }
  } else {
    let mut path = prefix;
    path.push(ident.to_string());
    (path, alias.unwrap_or_else(|| ident.to_string()))
  };
  index.imports.insert(name, path);
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), ResolutionError> {
  let io = |source| ResolutionError::Io {
    path: dir.to_path_buf(),
    source,
  };
  for entry in fs::read_dir(dir).map_err(io)? {
    let path = entry.map_err(io)?.path();
    if path.is_dir() {
      collect_files(&path, files)?;
    } else if path.extension().map_or(false, |ext| ext == "rs") {
      files.push(path);
    }
  }
  Ok(())
}

/// `lib.rs`, `main.rs` -> `crate`; `a.rs`, `a/mod.rs` -> `crate::a`.
pub fn module_path(root: &Path, file: &Path) -> Vec<String> {
  let relative = file.strip_prefix(root).unwrap_or(file);
  let components: Vec<String> = relative
    .components()
    .filter_map(|c| c.as_os_str().to_str().map(str::to_string))
    .collect();

  let mut module = vec!["crate".to_string()];
  if let Some((file, dirs)) = components.split_last() {
    module.extend(dirs.iter().cloned());
    let stem = file.trim_end_matches(".rs");
    let crate_root = dirs.is_empty() && (stem == "lib" || stem == "main");
    if stem != "mod" && !crate_root {
      module.push(stem.to_string());
    }
  }
  module
}

pub fn parse_error(path: &Path, err: &syn::Error) -> ResolutionError {
  let start = err.span().start();
  ResolutionError::Parse {
    path: path.to_path_buf(),
    line: start.line,
    column: start.column + 1,
    message: err.to_string(),
  }
}

fn is_describable(item: &syn::ItemStruct) -> bool {
  item.generics.params.is_empty() && matches!(item.fields, Fields::Named(_))
}

/// Fields the generated module can reach from inside the crate.
fn is_visible(vis: &Visibility) -> bool {
  match vis {
    Visibility::Public(_) | Visibility::Crate(_) => true,
    Visibility::Restricted(restricted) => restricted.path.is_ident("crate"),
    Visibility::Inherited => false,
  }
}

fn is_std_path(segments: &[String]) -> bool {
  segments.len() == 1 || STD_ROOTS.contains(&segments[0].as_str())
}

fn type_arguments(arguments: &PathArguments) -> Vec<&Type> {
  match arguments {
    PathArguments::AngleBracketed(args) => args
      .args
      .iter()
      .filter_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
      })
      .collect(),
    _ => Vec::new(),
  }
}

/// `T` of a `Box<T>`.
pub fn boxed_inner(ty: &Type) -> Option<&Type> {
  wrapped_inner(ty, "Box")
}

/// `T` of a single-argument `wrapper<T>`.
pub fn wrapped_inner<'t>(ty: &'t Type, wrapper: &str) -> Option<&'t Type> {
  let path = match ty {
    Type::Path(path) if path.qself.is_none() => &path.path,
    _ => return None,
  };
  let last = path.segments.last()?;
  if last.ident != wrapper {
    return None;
  }
  match type_arguments(&last.arguments).as_slice() {
    [inner] => Some(*inner),
    _ => None,
  }
}

fn opaque(ty: &Type) -> TypeDescriptor {
  TypeDescriptor::Primitive(QualifiedName::builtin(type_text(ty)))
}

/// Token text of a type without the spacing `to_string` puts around punctuation.
pub fn type_text(ty: &Type) -> String {
  ty.to_token_stream()
    .to_string()
    .replace(" :: ", "::")
    .replace(":: ", "::")
    .replace(" < ", "<")
    .replace(" <", "<")
    .replace(" >", ">")
    .replace(" ,", ",")
}
