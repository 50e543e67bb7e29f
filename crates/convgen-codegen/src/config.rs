use std::path::PathBuf;

/// Knobs of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  /// cfg ident that opts a file into registration discovery, `#![cfg(convgen)]`.
  pub marker: String,
  /// Crate whose `register` functions are directives.
  pub runtime_crate: String,
  /// Written next to the package and skipped when scanning it.
  pub output_file: String,
  /// The crate's `src/` directory. Looked up from the target when unset.
  pub crate_root: Option<PathBuf>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      marker: "convgen".to_string(),
      runtime_crate: "convgen".to_string(),
      output_file: "generated.rs".to_string(),
      crate_root: None,
    }
  }
}

impl Config {
  pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
    self.marker = marker.into();
    self
  }

  pub fn with_runtime_crate(mut self, runtime_crate: impl Into<String>) -> Self {
    self.runtime_crate = runtime_crate.into();
    self
  }

  pub fn with_output_file(mut self, output_file: impl Into<String>) -> Self {
    self.output_file = output_file.into();
    self
  }

  pub fn with_crate_root(mut self, crate_root: impl Into<PathBuf>) -> Self {
    self.crate_root = Some(crate_root.into());
    self
  }
}
