//! Index of user-authored override functions.

use std::collections::HashSet;

use crate::descriptor::QualifiedName;
use crate::naming::{self, CONVERT_PREFIX};

/// Identifies an override by what it converts rather than by its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OverrideKey {
  /// Replaces the generated function of a whole pair.
  Pair { from: QualifiedName, to: QualifiedName },
  /// Replaces the mapping of one destination field.
  Field {
    from: QualifiedName,
    from_field: String,
    to: QualifiedName,
    to_field: String,
  },
}

impl OverrideKey {
  pub fn pair(from: &QualifiedName, to: &QualifiedName) -> Self {
    OverrideKey::Pair {
      from: from.clone(),
      to: to.clone(),
    }
  }

  pub fn field(from: &QualifiedName, from_field: &str, to: &QualifiedName, to_field: &str) -> Self {
    OverrideKey::Field {
      from: from.clone(),
      from_field: from_field.to_string(),
      to: to.clone(),
      to_field: to_field.to_string(),
    }
  }

  pub fn function_name(&self) -> String {
    match self {
      OverrideKey::Pair { from, to } => naming::pair_function_name(from, to),
      OverrideKey::Field {
        from,
        from_field,
        to,
        to_field,
      } => naming::field_function_name(from, from_field, to, to_field),
    }
  }
}

/// Built once per run from the functions declared in the target package.
#[derive(Debug, Clone, Default)]
pub struct OverrideRegistry {
  declared: HashSet<String>,
}

impl OverrideRegistry {
  pub fn scan<I, S>(functions: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let declared = functions
      .into_iter()
      .filter(|name| name.as_ref().starts_with(CONVERT_PREFIX))
      .map(|name| name.as_ref().to_string())
      .collect();
    Self { declared }
  }

  pub fn contains(&self, key: &OverrideKey) -> bool {
    self.declared.contains(&key.function_name())
  }

  pub fn len(&self) -> usize {
    self.declared.len()
  }

  pub fn is_empty(&self) -> bool {
    self.declared.is_empty()
  }
}
