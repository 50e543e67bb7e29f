use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use convgen_codegen::{Config, Generator};

/// Package directories under `src/`, each generated into `OUT_DIR`.
const PACKAGES: &[&str] = &[
  "pointer",
  "slice",
  "maptype",
  "nested",
  "bidirectional",
  "analyzer",
  "cyclic",
  "simple/converter",
];

fn main() -> Result<(), Box<dyn Error>> {
  println!("cargo:rerun-if-changed=src");

  let source = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?).join("src");
  let out = PathBuf::from(env::var("OUT_DIR")?);
  let generator = Generator::new(Config::default().with_crate_root(&source));

  for package in PACKAGES {
    let generated = generator
      .generate(source.join(package))?
      .ok_or_else(|| format!("package `{}` registers no conversions", package))?;
    fs::write(out.join(format!("{}.rs", package.replace('/', "_"))), generated.source)?;
  }

  // Registrations outside a marked file are not directives.
  if generator.generate(source.join("unregistered"))?.is_some() {
    return Err("package `unregistered` produced conversions".into());
  }

  Ok(())
}
