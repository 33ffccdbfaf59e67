//! Solution folder inference.
//!
//! [`infer`] decides where a project goes inside the folder tree. The default
//! mode reads it off the project's location relative to the registry's base
//! directory:
//!
//! ```text
//! base:    /repo
//! project: /repo/src/libs/Core/Core.csproj
//!                └────┬───┘ └─┬┘ └────┬────┘
//!                 folders   own dir  file
//! result:  ["src", "libs"]
//! ```
//!
//! The project's own directory is not a folder level. Projects outside the
//! base tree go to the root.

use std::fmt;
use std::path::{Component, Path};

use crate::error::ConfigError;
use crate::paths;

/// How the caller wants projects placed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlacementMode {
    /// Derive the folder from each project's location.
    #[default]
    Inferred,
    /// Everything at the solution root.
    ForceRoot,
    /// Everything under this fixed folder path.
    ForceGrouping(Vec<String>),
}

impl PlacementMode {
    /// Builds the mode from the two mutually exclusive command-line options.
    ///
    /// `solution_folder` may use either separator; empty segments are dropped.
    pub fn from_flags(in_root: bool, solution_folder: Option<&str>) -> Result<Self, ConfigError> {
        match (in_root, solution_folder) {
            (true, Some(_)) => Err(ConfigError::ConflictingPlacement),
            (true, None) => Ok(Self::ForceRoot),
            (false, Some(folder)) => {
                let names = split_folder_path(folder);
                if names.is_empty() {
                    return Err(ConfigError::EmptySolutionFolder {
                        value: folder.to_owned(),
                    });
                }
                Ok(Self::ForceGrouping(names))
            }
            (false, None) => Ok(Self::Inferred),
        }
    }
}

/// Target folder for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    Root,
    /// Folder names from the root down; never empty.
    Grouping(Vec<String>),
}

impl Placement {
    /// `Root` for an empty list, `Grouping` otherwise.
    pub fn from_names(names: Vec<String>) -> Self {
        if names.is_empty() {
            Self::Root
        } else {
            Self::Grouping(names)
        }
    }

    pub fn names(&self) -> &[String] {
        match self {
            Self::Root => &[],
            Self::Grouping(names) => names,
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => write!(f, "(root)"),
            Self::Grouping(names) => write!(f, "{}", names.join("/")),
        }
    }
}

/// Splits a user-supplied folder path such as `src/libs` or `src\libs`.
pub fn split_folder_path(value: &str) -> Vec<String> {
    value
        .split(['/', '\\'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Placement of `project` in a registry rooted at `base_directory`.
///
/// A relative `project` is taken relative to `base_directory`, as
/// [`register`](crate::register::register) stores it.
pub fn infer(base_directory: &Path, project: &Path, mode: &PlacementMode) -> Placement {
    match mode {
        PlacementMode::ForceRoot => Placement::Root,
        PlacementMode::ForceGrouping(names) => Placement::from_names(names.clone()),
        PlacementMode::Inferred => infer_from_location(base_directory, project),
    }
}

fn infer_from_location(base_directory: &Path, project: &Path) -> Placement {
    let project = base_directory.join(project);
    let Some(relative) = paths::relative_to(base_directory, &project) else {
        tracing::debug!(
            project = %project.display(),
            "project shares no root with the registry; placing at root"
        );
        return Placement::Root;
    };

    let mut components = relative.components().peekable();
    if matches!(components.peek(), Some(Component::ParentDir)) {
        // TODO: decide whether projects outside the registry tree should be rejected instead
        tracing::debug!(
            project = %project.display(),
            "project is outside the registry directory; placing at root"
        );
        return Placement::Root;
    }

    let mut names: Vec<String> = components
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    names.pop(); // project file
    names.pop(); // project's own directory
    Placement::from_names(names)
}
