#[cfg(convgen)]
mod register;

mod generated {
  include!(concat!(env!("OUT_DIR"), "/analyzer.rs"));
}

pub use generated::*;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SameFields {
  pub name: String,
  pub email: String,
  pub age: i64,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TargetSame {
  pub name: String,
  pub email: String,
  pub age: i64,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct DifferentFields {
  pub full_name: String,
  pub email: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TargetDiff {
  pub name: String,
  pub email: String,
}

/// `TargetDiff::name` has no source field of the same name.
pub fn convert_different_fields_name_to_target_diff_name(src: &DifferentFields, dst: &mut TargetDiff) {
  dst.name = src.full_name.clone();
}
