use std::fmt;

use crate::descriptor::{QualifiedName, TypeDescriptor};

/// One side of a conversion request.
///
/// `is_pointer` records how the side was requested, independently of the
/// descriptor. It never changes which function is generated.
#[derive(Debug, Clone, PartialEq)]
pub struct PairSide {
  pub ty: TypeDescriptor,
  pub is_pointer: bool,
}

impl PairSide {
  pub fn new(ty: TypeDescriptor, is_pointer: bool) -> Self {
    Self { ty, is_pointer }
  }

  /// Splits one pointer layer off a registered type into the pointer flag.
  pub fn from_registered(ty: TypeDescriptor) -> Self {
    if ty.is_pointer() {
      let inner = ty.unwrap_pointer().clone();
      Self::new(inner, true)
    } else {
      Self::new(ty, false)
    }
  }

  /// Name used in the pair key and in function names.
  pub fn type_name(&self) -> QualifiedName {
    match self.ty.unwrap_pointer() {
      TypeDescriptor::Struct(name) | TypeDescriptor::Primitive(name) => name.clone(),
      other => QualifiedName::builtin(other.to_string()),
    }
  }
}

/// Deduplication identity of a conversion: source and destination names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
  pub from: QualifiedName,
  pub to: QualifiedName,
}

impl fmt::Display for PairKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} -> {}", self.from, self.to)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionPair {
  pub from: PairSide,
  pub to: PairSide,
}

impl ConversionPair {
  pub fn new(from: PairSide, to: PairSide) -> Self {
    Self { from, to }
  }

  /// Pair discovered inside a struct; always requested in pointer form.
  pub fn nested(from: TypeDescriptor, to: TypeDescriptor) -> Self {
    Self::new(PairSide::new(from, true), PairSide::new(to, true))
  }

  pub fn key(&self) -> PairKey {
    PairKey {
      from: self.from.type_name(),
      to: self.to.type_name(),
    }
  }

  pub fn reversed(&self) -> Self {
    Self::new(self.to.clone(), self.from.clone())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn user() -> TypeDescriptor {
    TypeDescriptor::structure(QualifiedName::from_path("crate::domain::User"))
  }

  fn request() -> TypeDescriptor {
    TypeDescriptor::structure(QualifiedName::from_path("crate::handler::UserRequest"))
  }

  #[test]
  fn test_from_registered_splits_pointer() {
    let side = PairSide::from_registered(TypeDescriptor::option(user()));
    assert!(side.is_pointer);
    assert_eq!(side.ty, user());

    let side = PairSide::from_registered(user());
    assert!(!side.is_pointer);
  }

  #[test]
  fn test_key_ignores_pointer_form() {
    let plain = ConversionPair::new(PairSide::new(request(), false), PairSide::new(user(), false));
    let nested = ConversionPair::nested(request(), user());
    assert_eq!(plain.key(), nested.key());
    assert_eq!(
      plain.key().to_string(),
      "crate::handler::UserRequest -> crate::domain::User"
    );
  }

  #[test]
  fn test_reversed() {
    let pair = ConversionPair::nested(request(), user());
    let reversed = pair.reversed();
    assert_eq!(reversed.from.ty, user());
    assert_eq!(reversed.to.ty, request());
  }
}
