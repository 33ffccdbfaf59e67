//! `slnreg add <solution> <project-or-dir>... [--in-root | --solution-folder <path>]`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use slnreg_core::{Placement, PlacementMode};
use slnreg_resolver::{add_projects, AddReport};

/// Add one or more projects to a solution.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Solution file, or a directory containing exactly one `*.sln.yaml`.
    pub solution: PathBuf,

    /// Project files, or directories each containing exactly one project file.
    pub projects: Vec<PathBuf>,

    /// Place every project at the solution root.
    #[arg(long)]
    pub in_root: bool,

    /// Place every project under this solution folder (e.g. "src/libs").
    #[arg(long, short = 's', value_name = "PATH")]
    pub solution_folder: Option<String>,
}

impl AddArgs {
    pub fn run(self) -> Result<()> {
        let mode = PlacementMode::from_flags(self.in_root, self.solution_folder.as_deref())?;

        let report = add_projects(&self.solution, &self.projects, &mode).with_context(|| {
            format!(
                "failed to add projects to '{}'",
                self.solution.display()
            )
        })?;

        print_report(&report);
        Ok(())
    }
}

fn print_report(report: &AddReport) {
    let solution = file_name(&report.registry_path);
    for added in &report.added {
        let project = file_name(&added.path);
        match &added.placement {
            Placement::Root => {
                println!("{} Added '{project}' to '{solution}'", "✓".green());
            }
            placement => println!(
                "{} Added '{project}' to '{solution}' under '{placement}'",
                "✓".green()
            ),
        }
    }
    for path in &report.already_present {
        println!(
            "{} '{}' is already in '{solution}'",
            "·".bright_black(),
            file_name(path)
        );
    }
    if !report.written {
        println!("Nothing to do; '{solution}' left unchanged.");
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
