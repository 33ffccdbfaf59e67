//! Shared `add` entrypoint used by the CLI.
//!
//! Order of work:
//!
//! 1. Reject an empty input list.
//! 2. Check every input path exists.
//! 3. Locate and load the registry.
//! 4. Resolve each input to its project file.
//! 5. Infer each project's folder.
//! 6. Register the batch; the registry file is written at most once.
//!
//! Steps 1-4 fail before the registry is touched.

use std::path::{Path, PathBuf};

use thiserror::Error;

use slnreg_core::{
    infer, register, Placement, PlacementMode, Registration, RegistryError, RegistryFile,
};

use crate::{resolve_existing, validate_paths_exist, ResolveError};

/// Errors from the add pipeline.
#[derive(Debug, Error)]
pub enum AddError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// One project added by [`add_projects`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedProject {
    pub path: PathBuf,
    pub placement: Placement,
}

/// Result of an [`add_projects`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddReport {
    pub registry_path: PathBuf,
    pub added: Vec<AddedProject>,
    pub already_present: Vec<PathBuf>,
    /// Whether the registry file was rewritten.
    pub written: bool,
}

/// Add every project named by `inputs` (files or directories) to the
/// registry found at `registry_locator`.
pub fn add_projects<P: AsRef<Path>>(
    registry_locator: &Path,
    inputs: &[P],
    mode: &PlacementMode,
) -> Result<AddReport, AddError> {
    if inputs.is_empty() {
        return Err(RegistryError::NoProjects.into());
    }
    validate_paths_exist(inputs)?;

    let mut file = RegistryFile::locate(registry_locator)?;
    let mut registry = file.load()?;

    let mut registrations = Vec::with_capacity(inputs.len());
    for input in inputs {
        let path = resolve_existing(input.as_ref())?;
        let placement = infer(registry.base_directory(), &path, mode);
        registrations.push(Registration::new(path, placement));
    }
    let placements: Vec<(PathBuf, Placement)> = registrations
        .iter()
        .map(|r| (r.path.clone(), r.placement.clone()))
        .collect();

    let outcome = register(&mut registry, registrations, &mut file)?;

    // Pair each added path with the placement it was registered under.
    let added = outcome
        .added
        .iter()
        .filter_map(|path| {
            placements
                .iter()
                .find(|(p, _)| p == path)
                .map(|(p, placement)| AddedProject {
                    path: p.clone(),
                    placement: placement.clone(),
                })
        })
        .collect();

    Ok(AddReport {
        registry_path: file.path().to_path_buf(),
        added,
        already_present: outcome.already_present,
        written: outcome.written,
    })
}
