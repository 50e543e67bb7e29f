//! Decides how each destination field is filled.
//!
//! Fields are matched by exact public name. In priority order a matched pair
//! of fields is copied (identical types), converted element-wise (`Vec` of
//! structs), converted value-wise (map with struct values), converted through
//! the nested pair function (structs, at most one `Option` layer per side), or
//! handed to a field override. A declared field override always wins over the
//! generated shape. Planning never fails.

use proc_macro2::TokenStream;
use quote::quote;

use crate::descriptor::{FieldDescriptor, QualifiedName, StructDescriptor, TypeDescriptor};
use crate::naming;
use crate::overrides::{OverrideKey, OverrideRegistry};
use crate::pair::ConversionPair;
use crate::paths::{ident, ModulePaths};

/// Statement for one destination field.
#[derive(Debug, Clone)]
pub struct FieldPlan {
  pub statement: TokenStream,
  /// Pair the statement calls into, to be generated later.
  pub nested: Option<ConversionPair>,
  /// Struct types spelled out in `statement`.
  pub referenced: Vec<QualifiedName>,
}

impl FieldPlan {
  fn statement(statement: TokenStream) -> Self {
    Self {
      statement,
      nested: None,
      referenced: Vec::new(),
    }
  }
}

pub struct FieldPlanner<'a> {
  overrides: &'a OverrideRegistry,
  paths: &'a ModulePaths,
}

impl<'a> FieldPlanner<'a> {
  pub fn new(overrides: &'a OverrideRegistry, paths: &'a ModulePaths) -> Self {
    Self { overrides, paths }
  }

  pub fn plan(
    &self,
    source: &StructDescriptor,
    target: &StructDescriptor,
    dst: &FieldDescriptor,
  ) -> FieldPlan {
    let src = match source.public_field(&dst.name) {
      Some(src) => src,
      None => return self.required_override(&source.name, &dst.name, &target.name, &dst.name),
    };
    let key = OverrideKey::field(&source.name, &src.name, &target.name, &dst.name);

    if src.ty.identical(&dst.ty) {
      return self
        .declared_override(&key)
        .unwrap_or_else(|| copy_field(src, dst));
    }

    if let Some(plan) = self.plan_slice(&key, src, dst) {
      return plan;
    }

    if let Some(plan) = self.plan_map(&key, src, dst) {
      return plan;
    }

    if let Some(plan) = self.plan_struct(&key, src, dst) {
      return plan;
    }

    self.required_override(&source.name, &src.name, &target.name, &dst.name)
  }

  fn plan_slice(
    &self,
    key: &OverrideKey,
    src: &FieldDescriptor,
    dst: &FieldDescriptor,
  ) -> Option<FieldPlan> {
    let (src_ty, dst_ty, optional) = collections(&src.ty, &dst.ty)?;
    let (from, to) = match (src_ty, dst_ty) {
      (TypeDescriptor::Slice(a), TypeDescriptor::Slice(b)) => (direct_struct(a)?, direct_struct(b)?),
      _ => return None,
    };

    if let Some(plan) = self.declared_override(key) {
      return Some(plan);
    }

    let convert = self.pair_function(from, to);
    let to_path = self.paths.type_path(to);
    let src_field = ident(&src.name);
    let dst_field = ident(&dst.name);
    let collect = quote! {
      .iter().map(|item| {
        let mut converted = #to_path::default();
        #convert(item, &mut converted);
        converted
      }).collect()
    };
    let statement = if optional {
      quote! {
        if let Some(items) = &src.#src_field {
          dst.#dst_field = Some(items #collect);
        }
      }
    } else {
      quote! {
        dst.#dst_field = src.#src_field #collect;
      }
    };

    Some(self.nested_plan(statement, from, to, true))
  }

  fn plan_map(
    &self,
    key: &OverrideKey,
    src: &FieldDescriptor,
    dst: &FieldDescriptor,
  ) -> Option<FieldPlan> {
    let (src_ty, dst_ty, optional) = collections(&src.ty, &dst.ty)?;
    let (from, to) = match (src_ty, dst_ty) {
      (
        TypeDescriptor::Map {
          key: src_key,
          value: src_value,
          ..
        },
        TypeDescriptor::Map {
          key: dst_key,
          value: dst_value,
          ..
        },
      ) if src_key.identical(dst_key) => (direct_struct(src_value)?, direct_struct(dst_value)?),
      _ => return None,
    };

    if let Some(plan) = self.declared_override(key) {
      return Some(plan);
    }

    let convert = self.pair_function(from, to);
    let to_path = self.paths.type_path(to);
    let src_field = ident(&src.name);
    let dst_field = ident(&dst.name);
    let collect = quote! {
      .iter().map(|(key, value)| {
        let mut converted = #to_path::default();
        #convert(value, &mut converted);
        (key.clone(), converted)
      }).collect()
    };
    let statement = if optional {
      quote! {
        if let Some(entries) = &src.#src_field {
          dst.#dst_field = Some(entries #collect);
        }
      }
    } else {
      quote! {
        dst.#dst_field = src.#src_field #collect;
      }
    };

    Some(self.nested_plan(statement, from, to, true))
  }

  fn plan_struct(
    &self,
    key: &OverrideKey,
    src: &FieldDescriptor,
    dst: &FieldDescriptor,
  ) -> Option<FieldPlan> {
    let from = src.ty.struct_name()?;
    let to = dst.ty.struct_name()?;

    if let Some(plan) = self.declared_override(key) {
      return Some(plan);
    }

    let convert = self.pair_function(from, to);
    let to_path = self.paths.type_path(to);
    let src_field = ident(&src.name);
    let dst_field = ident(&dst.name);
    let allocate = match dst.ty.underlying() {
      TypeDescriptor::Pointer { boxed: true, .. } => quote!(Box::<#to_path>::default()),
      _ => quote!(#to_path::default()),
    };

    let (statement, allocates) = match (src.ty.is_pointer(), dst.ty.is_pointer()) {
      (true, true) => (
        quote! {
          if let Some(value) = &src.#src_field {
            let mut converted = #allocate;
            #convert(value, &mut converted);
            dst.#dst_field = Some(converted);
          }
        },
        true,
      ),
      (true, false) => (
        quote! {
          if let Some(value) = &src.#src_field {
            #convert(value, &mut dst.#dst_field);
          }
        },
        false,
      ),
      (false, true) => (
        quote! {
          {
            let mut converted = #allocate;
            #convert(&src.#src_field, &mut converted);
            dst.#dst_field = Some(converted);
          }
        },
        true,
      ),
      (false, false) => (
        quote! {
          #convert(&src.#src_field, &mut dst.#dst_field);
        },
        false,
      ),
    };

    Some(self.nested_plan(statement, from, to, allocates))
  }

  fn nested_plan(
    &self,
    statement: TokenStream,
    from: &QualifiedName,
    to: &QualifiedName,
    allocates: bool,
  ) -> FieldPlan {
    let referenced = if allocates { vec![to.clone()] } else { Vec::new() };
    FieldPlan {
      statement,
      nested: Some(ConversionPair::nested(
        TypeDescriptor::structure(from.clone()),
        TypeDescriptor::structure(to.clone()),
      )),
      referenced,
    }
  }

  /// Generated function of the pair, or the user's whole-pair override.
  fn pair_function(&self, from: &QualifiedName, to: &QualifiedName) -> TokenStream {
    let name = ident(&naming::pair_function_name(from, to));
    if self.overrides.contains(&OverrideKey::pair(from, to)) {
      quote!(super::#name)
    } else {
      quote!(#name)
    }
  }

  fn declared_override(&self, key: &OverrideKey) -> Option<FieldPlan> {
    if self.overrides.contains(key) {
      Some(override_call(key))
    } else {
      None
    }
  }

  /// Emitted whether or not the override exists; a missing one surfaces when
  /// the generated code is compiled.
  fn required_override(
    &self,
    from: &QualifiedName,
    from_field: &str,
    to: &QualifiedName,
    to_field: &str,
  ) -> FieldPlan {
    let key = OverrideKey::field(from, from_field, to, to_field);
    if !self.overrides.contains(&key) {
      tracing::warn!(
        function = %key.function_name(),
        from = %from,
        to = %to,
        field = to_field,
        "calling an override that is not declared in the package"
      );
    }
    override_call(&key)
  }
}

fn override_call(key: &OverrideKey) -> FieldPlan {
  let name = ident(&key.function_name());
  FieldPlan::statement(quote! {
    super::#name(src, dst);
  })
}

fn copy_field(src: &FieldDescriptor, dst: &FieldDescriptor) -> FieldPlan {
  let src_field = ident(&src.name);
  let dst_field = ident(&dst.name);
  if dst.ty.is_copy_scalar() {
    FieldPlan::statement(quote! {
      dst.#dst_field = src.#src_field;
    })
  } else {
    FieldPlan::statement(quote! {
      dst.#dst_field = src.#src_field.clone();
    })
  }
}

/// Both plain, or both behind a non-boxed `Option`.
fn collections<'t>(
  src: &'t TypeDescriptor,
  dst: &'t TypeDescriptor,
) -> Option<(&'t TypeDescriptor, &'t TypeDescriptor, bool)> {
  match (src.underlying(), dst.underlying()) {
    (
      TypeDescriptor::Pointer {
        elem: src_elem,
        boxed: false,
      },
      TypeDescriptor::Pointer {
        elem: dst_elem,
        boxed: false,
      },
    ) => Some((src_elem.underlying(), dst_elem.underlying(), true)),
    (TypeDescriptor::Pointer { .. }, _) | (_, TypeDescriptor::Pointer { .. }) => None,
    (src, dst) => Some((src, dst, false)),
  }
}

fn direct_struct(ty: &TypeDescriptor) -> Option<&QualifiedName> {
  match ty.underlying() {
    TypeDescriptor::Struct(name) => Some(name),
    _ => None,
  }
}
