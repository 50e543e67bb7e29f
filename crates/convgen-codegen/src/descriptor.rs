//! Structural descriptions of the types a conversion is planned over.
//!
//! Descriptors are produced once by the resolver and only read afterwards.
//! Structs are nominal: a [`TypeDescriptor::Struct`] carries the struct's
//! qualified name and its fields live in the [`TypeGraph`], which keeps
//! self-referential and mutually-referential structs representable.

use std::collections::HashMap;
use std::fmt;

/// Namespace path plus local name, e.g. `crate::domain` + `User`.
///
/// Builtin and anonymous types have an empty namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
  pub namespace: Vec<String>,
  pub name: String,
}

impl QualifiedName {
  pub fn new(namespace: Vec<String>, name: impl Into<String>) -> Self {
    Self {
      namespace,
      name: name.into(),
    }
  }

  pub fn builtin(name: impl Into<String>) -> Self {
    Self::new(Vec::new(), name)
  }

  /// Splits a `::` separated path, the last segment being the local name.
  pub fn from_path(path: &str) -> Self {
    let mut segments: Vec<String> = path
      .split("::")
      .filter(|s| !s.is_empty())
      .map(str::to_string)
      .collect();
    let name = segments.pop().unwrap_or_default();
    Self::new(segments, name)
  }

  pub fn is_builtin(&self) -> bool {
    self.namespace.is_empty()
  }
}

impl fmt::Display for QualifiedName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for segment in &self.namespace {
      write!(f, "{}::", segment)?;
    }
    f.write_str(&self.name)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
  Primitive,
  Struct,
  Pointer,
  Slice,
  Map,
  Alias,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapContainer {
  Hash,
  BTree,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
  /// Scalars, strings and every nominal type the engine does not look into.
  Primitive(QualifiedName),
  Struct(QualifiedName),
  /// `Option<T>`, or `Option<Box<T>>` when `boxed`.
  Pointer {
    elem: Box<TypeDescriptor>,
    boxed: bool,
  },
  /// `Vec<T>`
  Slice(Box<TypeDescriptor>),
  Map {
    container: MapContainer,
    key: Box<TypeDescriptor>,
    value: Box<TypeDescriptor>,
  },
  /// `type Name = Target;`
  Alias {
    name: QualifiedName,
    target: Box<TypeDescriptor>,
  },
}

const COPY_SCALARS: &[&str] = &[
  "bool", "char", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128",
  "usize", "f32", "f64",
];

impl TypeDescriptor {
  pub fn primitive(name: &str) -> Self {
    TypeDescriptor::Primitive(QualifiedName::builtin(name))
  }

  pub fn structure(name: QualifiedName) -> Self {
    TypeDescriptor::Struct(name)
  }

  pub fn option(elem: TypeDescriptor) -> Self {
    TypeDescriptor::Pointer {
      elem: Box::new(elem),
      boxed: false,
    }
  }

  pub fn option_box(elem: TypeDescriptor) -> Self {
    TypeDescriptor::Pointer {
      elem: Box::new(elem),
      boxed: true,
    }
  }

  pub fn vec(elem: TypeDescriptor) -> Self {
    TypeDescriptor::Slice(Box::new(elem))
  }

  pub fn map(container: MapContainer, key: TypeDescriptor, value: TypeDescriptor) -> Self {
    TypeDescriptor::Map {
      container,
      key: Box::new(key),
      value: Box::new(value),
    }
  }

  pub fn kind(&self) -> TypeKind {
    match self {
      TypeDescriptor::Primitive(_) => TypeKind::Primitive,
      TypeDescriptor::Struct(_) => TypeKind::Struct,
      TypeDescriptor::Pointer { .. } => TypeKind::Pointer,
      TypeDescriptor::Slice(_) => TypeKind::Slice,
      TypeDescriptor::Map { .. } => TypeKind::Map,
      TypeDescriptor::Alias { .. } => TypeKind::Alias,
    }
  }

  /// Strips every alias layer.
  pub fn underlying(&self) -> &TypeDescriptor {
    let mut ty = self;
    while let TypeDescriptor::Alias { target, .. } = ty {
      ty = &**target;
    }
    ty
  }

  pub fn is_pointer(&self) -> bool {
    self.underlying().kind() == TypeKind::Pointer
  }

  /// The pointee of a pointer, or the type itself. Removes one layer at most.
  pub fn unwrap_pointer(&self) -> &TypeDescriptor {
    match self.underlying() {
      TypeDescriptor::Pointer { elem, .. } => elem.underlying(),
      other => other,
    }
  }

  /// Element of a slice, value of a map.
  pub fn element_type(&self) -> Option<&TypeDescriptor> {
    match self.underlying() {
      TypeDescriptor::Slice(elem) => Some(&**elem),
      TypeDescriptor::Map { value, .. } => Some(&**value),
      _ => None,
    }
  }

  pub fn key_type(&self) -> Option<&TypeDescriptor> {
    match self.underlying() {
      TypeDescriptor::Map { key, .. } => Some(&**key),
      _ => None,
    }
  }

  pub fn is_struct(&self) -> bool {
    self.struct_name().is_some()
  }

  /// Name of the struct behind at most one pointer layer.
  pub fn struct_name(&self) -> Option<&QualifiedName> {
    match self.unwrap_pointer() {
      TypeDescriptor::Struct(name) => Some(name),
      _ => None,
    }
  }

  pub fn is_copy_scalar(&self) -> bool {
    match self.underlying() {
      TypeDescriptor::Primitive(name) => name.is_builtin() && COPY_SCALARS.contains(&name.name.as_str()),
      _ => false,
    }
  }

  /// Structural identity. Aliases are transparent, structs and other nominal
  /// types compare by qualified name.
  pub fn identical(&self, other: &TypeDescriptor) -> bool {
    match (self.underlying(), other.underlying()) {
      (TypeDescriptor::Primitive(a), TypeDescriptor::Primitive(b)) => a == b,
      (TypeDescriptor::Struct(a), TypeDescriptor::Struct(b)) => a == b,
      (
        TypeDescriptor::Pointer { elem: a, boxed: x },
        TypeDescriptor::Pointer { elem: b, boxed: y },
      ) => x == y && a.identical(b),
      (TypeDescriptor::Slice(a), TypeDescriptor::Slice(b)) => a.identical(b),
      (
        TypeDescriptor::Map {
          container: c1,
          key: k1,
          value: v1,
        },
        TypeDescriptor::Map {
          container: c2,
          key: k2,
          value: v2,
        },
      ) => c1 == c2 && k1.identical(k2) && v1.identical(v2),
      _ => false,
    }
  }
}

impl fmt::Display for TypeDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TypeDescriptor::Primitive(name) | TypeDescriptor::Struct(name) => fmt::Display::fmt(name, f),
      TypeDescriptor::Pointer { elem, boxed: false } => write!(f, "Option<{}>", elem),
      TypeDescriptor::Pointer { elem, boxed: true } => write!(f, "Option<Box<{}>>", elem),
      TypeDescriptor::Slice(elem) => write!(f, "Vec<{}>", elem),
      TypeDescriptor::Map {
        container,
        key,
        value,
      } => {
        let container = match container {
          MapContainer::Hash => "HashMap",
          MapContainer::BTree => "BTreeMap",
        };
        write!(f, "{}<{}, {}>", container, key, value)
      }
      TypeDescriptor::Alias { name, .. } => fmt::Display::fmt(name, f),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
  pub name: String,
  pub ty: TypeDescriptor,
  pub is_public: bool,
}

impl FieldDescriptor {
  pub fn public(name: impl Into<String>, ty: TypeDescriptor) -> Self {
    Self {
      name: name.into(),
      ty,
      is_public: true,
    }
  }

  pub fn private(name: impl Into<String>, ty: TypeDescriptor) -> Self {
    Self {
      name: name.into(),
      ty,
      is_public: false,
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDescriptor {
  pub name: QualifiedName,
  /// Declaration order.
  pub fields: Vec<FieldDescriptor>,
}

impl StructDescriptor {
  pub fn new(name: QualifiedName, fields: Vec<FieldDescriptor>) -> Self {
    Self { name, fields }
  }

  pub fn public_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
    self.fields.iter().filter(|f| f.is_public)
  }

  /// Exact, case-sensitive lookup among public fields.
  pub fn public_field(&self, name: &str) -> Option<&FieldDescriptor> {
    self.public_fields().find(|f| f.name == name)
  }
}

/// Every struct the resolver found, keyed by qualified name.
#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
  structs: HashMap<QualifiedName, StructDescriptor>,
}

impl TypeGraph {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, descriptor: StructDescriptor) {
    self.structs.insert(descriptor.name.clone(), descriptor);
  }

  pub fn get(&self, name: &QualifiedName) -> Option<&StructDescriptor> {
    self.structs.get(name)
  }

  pub fn len(&self) -> usize {
    self.structs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.structs.is_empty()
  }
}
