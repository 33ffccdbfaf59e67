//! `slnreg new [<dir>] [--name <name>]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use slnreg_core::registry;

/// Create an empty solution registry.
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Directory to create the solution in. Defaults to the current directory.
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Solution name; the file becomes `<name>.sln.yaml`. Defaults to the
    /// directory name.
    #[arg(long, short = 'n')]
    pub name: Option<String>,
}

impl NewArgs {
    pub fn run(self) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("cannot create directory '{}'", self.dir.display()))?;
        let dir = self
            .dir
            .canonicalize()
            .with_context(|| format!("cannot resolve path '{}'", self.dir.display()))?;

        let name = match self.name {
            Some(name) => name,
            None => dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .context("cannot derive a solution name from the directory; pass --name")?,
        };

        let path = registry::create_registry_at(&dir, &name)
            .with_context(|| format!("failed to create solution '{name}'"))?;

        println!("✓ Created '{}'", path.display());
        Ok(())
    }
}
