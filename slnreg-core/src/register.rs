//! Adding projects to a registry.
//!
//! ## `register` protocol
//!
//! 1. Reject an empty batch before touching the registry.
//! 2. Skip any project whose normalized path is already registered.
//! 3. Find or create the folder chain named by its [`Placement`].
//! 4. Append the project entry.
//! 5. After the whole batch, write through the sink once, and only if the
//!    project count grew.

use std::path::PathBuf;

use crate::error::RegistryError;
use crate::placement::Placement;
use crate::types::Registry;

/// Where a changed registry is persisted.
pub trait RegistrySink {
    fn write(&mut self, registry: &Registry) -> Result<(), RegistryError>;
}

/// One project to add: its path and target folder. A relative path is
/// taken relative to the registry's base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub path: PathBuf,
    pub placement: Placement,
}

impl Registration {
    pub fn new(path: impl Into<PathBuf>, placement: Placement) -> Self {
        Self {
            path: path.into(),
            placement,
        }
    }
}

/// What a [`register`] call did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterOutcome {
    /// Newly added, in input order.
    pub added: Vec<PathBuf>,
    /// Already registered (or repeated within the batch); left alone.
    pub already_present: Vec<PathBuf>,
    /// Whether the sink was called.
    pub written: bool,
}

/// Applies `registrations` in order and persists through `sink` at most once.
pub fn register<S>(
    registry: &mut Registry,
    registrations: impl IntoIterator<Item = Registration>,
    sink: &mut S,
) -> Result<RegisterOutcome, RegistryError>
where
    S: RegistrySink + ?Sized,
{
    let registrations: Vec<Registration> = registrations.into_iter().collect();
    if registrations.is_empty() {
        return Err(RegistryError::NoProjects);
    }

    let count_before = registry.project_count();
    let mut outcome = RegisterOutcome::default();

    for Registration { path, placement } in registrations {
        if registry.contains_project(&path) {
            tracing::debug!(project = %path.display(), "already registered; skipping");
            outcome.already_present.push(path);
            continue;
        }

        let group = match &placement {
            Placement::Root => None,
            Placement::Grouping(names) => registry.ensure_group_path(names.as_slice()),
        };
        registry.add_project(&path, group);
        tracing::debug!(project = %path.display(), folder = %placement, "added project");
        outcome.added.push(path);
    }

    if registry.project_count() > count_before {
        sink.write(registry)?;
        outcome.written = true;
        tracing::info!(
            added = registry.project_count() - count_before,
            "registry updated"
        );
    } else {
        tracing::debug!("every project was already registered; registry not written");
    }

    Ok(outcome)
}
