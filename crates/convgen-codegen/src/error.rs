use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
  From,
  To,
}

impl fmt::Display for Side {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Side::From => f.write_str("source"),
      Side::To => f.write_str("destination"),
    }
  }
}

/// The target could not be turned into typed declarations.
#[derive(Debug, Error)]
pub enum ResolutionError {
  #[error("no Cargo.toml found above `{}`", .0.display())]
  NoCrateRoot(PathBuf),
  #[error("`{}` is not a directory", .0.display())]
  NotADirectory(PathBuf),
  #[error("`{}` is outside of the crate source root `{}`", .path.display(), .root.display())]
  OutsideCrate { path: PathBuf, root: PathBuf },
  #[error("failed to read `{}`: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("{}:{line}:{column}: {message}", .path.display())]
  Parse {
    path: PathBuf,
    line: usize,
    column: usize,
    message: String,
  },
}

/// The type graph disagrees with a requested pair.
#[derive(Debug, Error)]
pub enum GenerateError {
  #[error("pair {pair}: {side} side is not a known struct: {found}")]
  ShapeMismatch {
    side: Side,
    pair: String,
    found: String,
  },
  #[error("pairs {first} and {second} both generate `{name}`")]
  NameClash {
    name: String,
    first: String,
    second: String,
  },
}

/// Rendered text that the formatter rejected. `raw` keeps what was produced.
#[derive(Debug, Error)]
pub enum AssemblyError {
  #[error("failed to format generated code: {source}")]
  Format {
    raw: String,
    #[source]
    source: syn::Error,
  },
}

impl AssemblyError {
  pub fn raw(&self) -> &str {
    match self {
      AssemblyError::Format { raw, .. } => raw,
    }
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Resolution(#[from] ResolutionError),
  #[error(transparent)]
  Generate(#[from] GenerateError),
  #[error(transparent)]
  Assembly(#[from] AssemblyError),
  #[error("failed to write `{}`: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}
