//! `slnreg list <solution> [--json]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use slnreg_core::{paths, Registry, RegistryFile};

/// List the projects in a solution.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Solution file, or a directory containing exactly one `*.sln.yaml`.
    #[arg(default_value = ".")]
    pub solution: PathBuf,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct ProjectRow {
    #[tabled(rename = "project")]
    name: String,
    #[tabled(rename = "folder")]
    folder: String,
    #[tabled(rename = "path")]
    path: String,
}

impl ListArgs {
    pub fn run(self) -> Result<()> {
        let file = RegistryFile::locate(&self.solution)
            .with_context(|| format!("no solution found at '{}'", self.solution.display()))?;
        let registry = file
            .load()
            .with_context(|| format!("failed to load '{}'", file.path().display()))?;

        let rows = project_rows(&registry);
        if self.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(());
        }

        if rows.is_empty() {
            println!("No projects registered.");
            println!("Run: slnreg add {} <project>", self.solution.display());
            return Ok(());
        }

        println!("{}", file.path().display().to_string().bold());
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}

fn project_rows(registry: &Registry) -> Vec<ProjectRow> {
    registry
        .projects()
        .iter()
        .map(|p| ProjectRow {
            name: p.name.to_string(),
            folder: p.group.map(|id| registry.folder_path(id)).unwrap_or_default(),
            path: paths::to_slash(&p.path),
        })
        .collect()
}
