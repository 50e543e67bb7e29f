//! How generated code spells type paths.
//!
//! The generated file is a child module of the package module. Package types
//! are reached through `super::`, crate-root types through `crate::`, and
//! every other type through its parent module, which is then imported.

use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;

use crate::descriptor::QualifiedName;

#[derive(Debug, Clone)]
pub struct ModulePaths {
  package: Vec<String>,
}

impl ModulePaths {
  /// `package` is the module path of the target package, e.g. `["crate", "converter"]`.
  pub fn new(package: Vec<String>) -> Self {
    Self { package }
  }

  pub fn package(&self) -> &[String] {
    &self.package
  }

  pub fn type_path(&self, name: &QualifiedName) -> TokenStream {
    let type_ident = ident(&name.name);
    if name.namespace.is_empty() {
      return quote!(#type_ident);
    }
    if name.namespace == self.package {
      return quote!(super::#type_ident);
    }
    match name.namespace.last() {
      Some(module) if name.namespace.len() == 1 && module == "crate" => quote!(crate::#type_ident),
      Some(module) => {
        let module = ident(module);
        quote!(#module::#type_ident)
      }
      None => quote!(#type_ident),
    }
  }

  /// Module that has to be imported for [`type_path`](Self::type_path) to resolve.
  pub fn import(&self, name: &QualifiedName) -> Option<Vec<String>> {
    if name.namespace.len() < 2 || name.namespace == self.package {
      return None;
    }
    Some(name.namespace.clone())
  }
}

/// Identifier for a name, raw when the name is a keyword.
pub fn ident(name: &str) -> Ident {
  let name = name.strip_prefix("r#").unwrap_or(name);
  match name {
    "crate" | "self" | "super" | "Self" => Ident::new(name, Span::call_site()),
    _ => syn::parse_str::<Ident>(name).unwrap_or_else(|_| Ident::new_raw(name, Span::call_site())),
  }
}

pub fn path_tokens(segments: &[String]) -> TokenStream {
  let segments = segments.iter().map(|s| ident(s));
  quote!(#(#segments)::*)
}
