//! Registry files on disk.
//!
//! # File layout
//!
//! ```text
//! <dir>/
//!   <name>.sln.yaml
//! ```
//!
//! ```yaml
//! version: 1
//! folders:
//!   - name: src
//!     folders:
//!       - name: libs
//! projects:
//!   - name: Core
//!     path: src/libs/Core/Core.csproj
//!     folder: [src, libs]
//! created_at: ...
//! updated_at: ...
//! ```
//!
//! Project paths are stored relative to the file's directory with `/`
//! separators. The directory is the registry's base directory. A project's
//! folder is the list of names from the root down.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::paths;
use crate::register::RegistrySink;
use crate::types::{GroupId, ProjectEntry, ProjectName, Registry};

/// Suffix shared by every registry file.
pub const REGISTRY_EXTENSION: &str = ".sln.yaml";

// ---------------------------------------------------------------------------
// 1. On-disk document
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
struct RegistryDocument {
    version: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    folders: Vec<FolderDocument>,
    #[serde(default)]
    projects: Vec<ProjectDocument>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct FolderDocument {
    name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    folders: Vec<FolderDocument>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ProjectDocument {
    name: ProjectName,
    path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    folder: Vec<String>,
}

fn to_document(registry: &Registry, updated_at: DateTime<Utc>) -> RegistryDocument {
    RegistryDocument {
        version: registry.version,
        folders: folder_documents(registry, None),
        projects: registry
            .projects()
            .iter()
            .map(|p| ProjectDocument {
                name: p.name.clone(),
                path: paths::to_slash(&p.path),
                folder: p.group.map(|id| registry.folder_names(id)).unwrap_or_default(),
            })
            .collect(),
        created_at: registry.created_at,
        updated_at,
    }
}

fn folder_documents(registry: &Registry, parent: Option<GroupId>) -> Vec<FolderDocument> {
    registry
        .children(parent)
        .iter()
        .filter_map(|id| {
            registry.group(*id).map(|g| FolderDocument {
                name: g.name.clone(),
                folders: folder_documents(registry, Some(*id)),
            })
        })
        .collect()
}

fn from_document(doc: RegistryDocument, base_directory: &Path) -> Registry {
    let mut registry = Registry::new(base_directory);
    registry.version = doc.version;
    registry.created_at = doc.created_at;
    registry.updated_at = doc.updated_at;

    let mut prefix = Vec::new();
    declare_folders(&mut registry, &doc.folders, &mut prefix);

    for project in doc.projects {
        // Folders referenced only by a project are created on the fly.
        let group = registry.ensure_group_path(project.folder.as_slice());
        registry.push_entry(ProjectEntry {
            name: project.name,
            path: paths::from_slash(&project.path),
            group,
        });
    }
    registry
}

fn declare_folders<'a>(
    registry: &mut Registry,
    folders: &'a [FolderDocument],
    prefix: &mut Vec<&'a str>,
) {
    for folder in folders {
        prefix.push(folder.name.as_str());
        registry.ensure_group_path(prefix.as_slice());
        declare_folders(registry, &folder.folders, prefix);
        prefix.pop();
    }
}

// ---------------------------------------------------------------------------
// 2. Locate
// ---------------------------------------------------------------------------

/// `<dir>/<name>.sln.yaml` — pure, no I/O.
pub fn registry_path_in(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}{REGISTRY_EXTENSION}"))
}

fn is_registry_file(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().ends_with(REGISTRY_EXTENSION))
        .unwrap_or(false)
}

/// Resolves `locator` to a registry file.
///
/// A file is returned as-is. A directory must contain exactly one
/// `*.sln.yaml` file; none is `RegistryNotFound`, several is
/// `AmbiguousRegistry`.
pub fn locate_registry_at(locator: &Path) -> Result<PathBuf, RegistryError> {
    if locator.is_file() {
        return Ok(locator.to_path_buf());
    }
    if !locator.is_dir() {
        return Err(RegistryError::RegistryNotFound {
            path: locator.to_path_buf(),
        });
    }

    let mut candidates: Vec<PathBuf> = std::fs::read_dir(locator)?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|e| e.path())
        .filter(|p| is_registry_file(p))
        .collect();
    candidates.sort();

    match candidates.len() {
        0 => Err(RegistryError::RegistryNotFound {
            path: locator.to_path_buf(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => Err(RegistryError::AmbiguousRegistry {
            dir: locator.to_path_buf(),
            candidates,
        }),
    }
}

// ---------------------------------------------------------------------------
// 3. Load
// ---------------------------------------------------------------------------

/// Load the registry file at `path`; its directory becomes the base directory.
///
/// Returns `RegistryError::RegistryNotFound` if absent,
/// `RegistryError::Parse` (with path + line context) if malformed YAML.
pub fn load_registry_at(path: &Path) -> Result<Registry, RegistryError> {
    if !path.is_file() {
        return Err(RegistryError::RegistryNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path)?;
    let doc: RegistryDocument = serde_yaml::from_str(&contents).map_err(|e| RegistryError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    if doc.version > Registry::VERSION {
        return Err(RegistryError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: doc.version,
        });
    }

    let base_directory = path
        .canonicalize()?
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    Ok(from_document(doc, &base_directory))
}

// ---------------------------------------------------------------------------
// 4. Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically write `registry` to `path`, stamping `updated_at` with now.
///
/// Write flow: serialize → `<file>.tmp` sibling → `rename`.
/// `.tmp` is always in the same directory as the target (same filesystem — no EXDEV on macOS).
pub fn save_registry_at(path: &Path, registry: &Registry) -> Result<(), RegistryError> {
    let yaml = serde_yaml::to_string(&to_document(registry, Utc::now()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp_path = path.with_file_name(format!("{file_name}.tmp"));

    std::fs::write(&tmp_path, yaml)?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    tracing::info!(path = %path.display(), "wrote registry");
    Ok(())
}

// ---------------------------------------------------------------------------
// 5. Create
// ---------------------------------------------------------------------------

/// Create an empty registry `<dir>/<name>.sln.yaml`.
///
/// Returns `RegistryError::RegistryExists` rather than overwrite.
pub fn create_registry_at(dir: &Path, name: &str) -> Result<PathBuf, RegistryError> {
    let path = registry_path_in(dir, name);
    if path.exists() {
        return Err(RegistryError::RegistryExists { path });
    }
    std::fs::create_dir_all(dir)?;
    save_registry_at(&path, &Registry::new(dir))?;
    Ok(path)
}

// ---------------------------------------------------------------------------
// 6. RegistryFile
// ---------------------------------------------------------------------------

/// A located registry file; the sink used by the add pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryFile {
    path: PathBuf,
}

impl RegistryFile {
    /// See [`locate_registry_at`].
    pub fn locate(locator: &Path) -> Result<Self, RegistryError> {
        Ok(Self {
            path: locate_registry_at(locator)?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Registry, RegistryError> {
        load_registry_at(&self.path)
    }

    pub fn save(&self, registry: &Registry) -> Result<(), RegistryError> {
        save_registry_at(&self.path, registry)
    }
}

impl RegistrySink for RegistryFile {
    fn write(&mut self, registry: &Registry) -> Result<(), RegistryError> {
        self.save(registry)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
