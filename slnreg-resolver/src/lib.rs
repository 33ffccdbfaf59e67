//! Project file resolution for `slnreg-resolver`.
//!
//! `resolve_project(path)` turns a command-line argument into the project
//! file it names. A file is taken as given; a directory must contain exactly
//! one file with a known project extension. [`pipeline::add_projects`] drives
//! resolution, folder inference and registration end to end.

pub mod pipeline;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use pipeline::{add_projects, AddError, AddReport, AddedProject};

/// Extensions recognised as project files when scanning a directory.
pub const PROJECT_EXTENSIONS: &[&str] = &[
    "csproj", "fsproj", "vbproj", "vcxproj", "sqlproj", "pyproj", "njsproj", "esproj", "proj",
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from project path resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("path '{path}' does not exist")]
    PathNotFound { path: PathBuf },

    #[error("could not find a project file in '{dir}'")]
    NoProjectFile { dir: PathBuf },

    #[error("found more than one project in '{dir}' ({}); specify which one to add", names(candidates))]
    MultipleProjectFiles { dir: PathBuf, candidates: Vec<PathBuf> },
}

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ResolveError {
    ResolveError::Io {
        path: path.into(),
        source,
    }
}

fn names(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Fails on the first path in `paths` that does not exist.
pub fn validate_paths_exist<P: AsRef<Path>>(paths: &[P]) -> Result<(), ResolveError> {
    for path in paths {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ResolveError::PathNotFound {
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Whether `path` has one of [`PROJECT_EXTENSIONS`] (case-insensitive).
pub fn is_project_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_ascii_lowercase();
            PROJECT_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Resolve `path` to the canonical path of a single project file.
pub fn resolve_project(path: &Path) -> Result<PathBuf, ResolveError> {
    if !path.exists() {
        return Err(ResolveError::PathNotFound {
            path: path.to_path_buf(),
        });
    }
    resolve_existing(path)
}

/// [`resolve_project`] for a path already known to exist.
pub(crate) fn resolve_existing(path: &Path) -> Result<PathBuf, ResolveError> {
    let file = if path.is_dir() {
        find_project_in(path)?
    } else {
        path.to_path_buf()
    };
    let resolved = file.canonicalize().map_err(|e| io_err(&file, e))?;
    tracing::debug!(input = %path.display(), project = %resolved.display(), "resolved project");
    Ok(resolved)
}

/// [`resolve_project`] for every input, after checking that all of them exist.
pub fn resolve_projects<P: AsRef<Path>>(inputs: &[P]) -> Result<Vec<PathBuf>, ResolveError> {
    validate_paths_exist(inputs)?;
    inputs.iter().map(|p| resolve_existing(p.as_ref())).collect()
}

fn find_project_in(dir: &Path) -> Result<PathBuf, ResolveError> {
    let mut candidates: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| io_err(dir, e))?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|e| e.path())
        .filter(|p| is_project_file(p))
        .collect();
    candidates.sort();

    match candidates.len() {
        0 => Err(ResolveError::NoProjectFile {
            dir: dir.to_path_buf(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => Err(ResolveError::MultipleProjectFiles {
            dir: dir.to_path_buf(),
            candidates,
        }),
    }
}
