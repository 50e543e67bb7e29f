//! # convgen-codegen
//!
//! Generates field-by-field conversion functions between struct types.
//!
//! A package (a module directory of a crate) registers the pairs it wants in a
//! file that opts into generation with `#![cfg(convgen)]`:
//!
//! ```ignore
//! #![cfg(convgen)]
//! use super::{User, UserDto};
//!
//! const _: convgen::Registration = convgen::register::<User, UserDto>();
//! ```
//!
//! [`Generator::run`] then writes `generated.rs` next to the package, holding
//! `pub fn convert_user_to_user_dto(src: &User, dst: &mut UserDto)` and every
//! nested conversion it needs.
//!
//! ```no_run
//! use convgen_codegen::{Config, Generator};
//!
//! let written = Generator::new(Config::default()).run("src/converter")?;
//! # Ok::<(), convgen_codegen::Error>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

pub mod assemble;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod index;
pub mod naming;
pub mod overrides;
pub mod pair;
pub mod paths;
pub mod planner;
pub mod registration;
pub mod resolve;
pub mod worklist;

pub use assemble::{format_source, Assembler};
pub use config::Config;
pub use error::{AssemblyError, Error, GenerateError, ResolutionError};
pub use overrides::OverrideRegistry;
pub use paths::ModulePaths;
pub use registration::{expand, RegistrationDirective};
pub use resolve::{resolve, Resolution};
pub use worklist::{GeneratedFunction, Worklist};

/// Output of one generation run.
#[derive(Debug, Clone)]
pub struct GeneratedSource {
  /// Module path of the package the code belongs to.
  pub package: Vec<String>,
  /// Conversion pairs requested by registrations, after expansion.
  pub pairs: usize,
  /// Generated function names in generation order.
  pub functions: Vec<String>,
  /// Formatted file content, header included.
  pub source: String,
}

#[derive(Debug, Clone, Default)]
pub struct Generator {
  config: Config,
}

impl Generator {
  pub fn new(config: Config) -> Self {
    Self { config }
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Generates the package's conversions without touching the filesystem.
  /// `None` when the package registers nothing.
  pub fn generate(&self, target: impl AsRef<Path>) -> Result<Option<GeneratedSource>, Error> {
    let target = target.as_ref();
    let resolution = resolve(target, &self.config)?;
    let generated = self.generate_resolved(&resolution)?;
    if generated.is_none() {
      tracing::info!(target = %target.display(), "no conversion pairs found");
    }
    Ok(generated)
  }

  pub fn generate_resolved(&self, resolution: &Resolution) -> Result<Option<GeneratedSource>, Error> {
    let pairs = expand(&resolution.directives);
    if pairs.is_empty() {
      return Ok(None);
    }
    tracing::info!(pairs = pairs.len(), "found conversion pairs");

    let count = pairs.len();
    let overrides = OverrideRegistry::scan(&resolution.functions);
    let paths = ModulePaths::new(resolution.package.clone());
    let functions = Worklist::new(&resolution.graph, &overrides, &paths).run(pairs)?;
    let source = Assembler::new(&paths).assemble(&functions)?;

    Ok(Some(GeneratedSource {
      package: resolution.package.clone(),
      pairs: count,
      functions: functions.into_iter().map(|f| f.name).collect(),
      source,
    }))
  }

  /// Generates and writes `<target>/<output_file>`, replacing any previous
  /// output. Returns the written path.
  pub fn run(&self, target: impl AsRef<Path>) -> Result<Option<PathBuf>, Error> {
    let target = target.as_ref();
    let generated = match self.generate(target)? {
      Some(generated) => generated,
      None => return Ok(None),
    };

    let output = target.join(&self.config.output_file);
    fs::write(&output, &generated.source).map_err(|source| Error::Io {
      path: output.clone(),
      source,
    })?;
    tracing::info!(
      output = %output.display(),
      functions = generated.functions.len(),
      "wrote generated conversions"
    );

    Ok(Some(output))
  }
}
