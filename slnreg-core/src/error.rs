//! Error types for slnreg-core.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// All errors that can arise from registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error (write/save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse registry at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// No registry file at the given path, or none inside the given directory.
    #[error("registry not found at {path}")]
    RegistryNotFound { path: PathBuf },

    /// The directory holds more than one registry file.
    #[error("found more than one registry in {dir} ({}); specify the file", join_names(candidates))]
    AmbiguousRegistry { dir: PathBuf, candidates: Vec<PathBuf> },

    /// `create` refused to overwrite an existing registry.
    #[error("registry already exists at {path}")]
    RegistryExists { path: PathBuf },

    /// The file declares a schema version newer than this build understands.
    #[error("registry at {path} has unsupported version {found}")]
    UnsupportedVersion { path: PathBuf, found: u32 },

    /// Registration was asked to add nothing.
    #[error("no projects were given to add")]
    NoProjects,
}

/// Invalid combinations of placement options, rejected before any I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("--in-root and --solution-folder cannot be used together")]
    ConflictingPlacement,

    #[error("solution folder '{value}' does not name any folder")]
    EmptySolutionFolder { value: String },
}

fn join_names(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| {
            p.file_name()
                .map(Path::new)
                .unwrap_or(p.as_path())
                .display()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join(", ")
}
