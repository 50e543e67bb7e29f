//! Renders generated functions into one formatted source file.

use std::collections::BTreeSet;

use proc_macro2::TokenStream;
use quote::{quote, ToTokens};

use crate::error::AssemblyError;
use crate::paths::{ident, path_tokens, ModulePaths};
use crate::worklist::GeneratedFunction;

pub const HEADER: &str = "// Code generated by convgen. DO NOT EDIT.\n\n";

pub struct Assembler<'a> {
  paths: &'a ModulePaths,
}

impl<'a> Assembler<'a> {
  pub fn new(paths: &'a ModulePaths) -> Self {
    Self { paths }
  }

  /// Module imports in path order, then functions in the given order.
  pub fn render(&self, functions: &[GeneratedFunction]) -> TokenStream {
    let imports: BTreeSet<Vec<String>> = functions
      .iter()
      .flat_map(|f| f.types())
      .filter_map(|name| self.paths.import(name))
      .collect();
    let imports = imports.iter().map(|segments| path_tokens(segments));
    let functions = functions.iter().map(|f| RenderedFunction {
      function: f,
      paths: self.paths,
    });

    quote! {
      #(use #imports;)*

      #(#functions)*
    }
  }

  pub fn assemble(&self, functions: &[GeneratedFunction]) -> Result<String, AssemblyError> {
    let raw = self.render(functions).to_string();
    match format_source(&raw) {
      Ok(formatted) => Ok(format!("{}{}", HEADER, formatted)),
      Err(source) => Err(AssemblyError::Format { raw, source }),
    }
  }
}

struct RenderedFunction<'f> {
  function: &'f GeneratedFunction,
  paths: &'f ModulePaths,
}

impl<'f> ToTokens for RenderedFunction<'f> {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let function = self.function;
    let name = ident(&function.name);
    let from = self.paths.type_path(&function.from);
    let to = self.paths.type_path(&function.to);
    let doc = format!(
      " Converts `{}` into `{}`.",
      function.from.name, function.to.name
    );
    let statements = &function.statements;

    tokens.extend(quote! {
      #[doc = #doc]
      #[allow(unused_variables)]
      pub fn #name(src: &#from, dst: &mut #to) {
        #(#statements)*
      }
    });
  }
}

/// Parses and pretty-prints a whole file.
pub fn format_source(raw: &str) -> Result<String, syn::Error> {
  let file = syn::parse_file(raw)?;
  Ok(prettyplease::unparse(&file))
}
