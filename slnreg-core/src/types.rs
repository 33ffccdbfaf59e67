//! Domain types for the solution registry.
//!
//! The [`Registry`] owns every project entry and every solution folder.
//! Folders live in an arena indexed by [`GroupId`]; a folder's parent is a
//! plain id, never an owning pointer. Children keep creation order so the
//! serialized folder tree is stable.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::paths;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Display name of a registered project (the project file's stem).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectName(pub String);

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProjectName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Index of a [`Group`] in its registry's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub usize);

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A solution folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub parent: Option<GroupId>,
    pub children: Vec<GroupId>,
}

/// A project file referenced by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    pub name: ProjectName,
    /// Relative to the registry's base directory when one exists, else absolute.
    pub path: PathBuf,
    /// Containing folder; `None` is the solution root.
    pub group: Option<GroupId>,
}

/// In-memory model of one registry file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    pub version: u32,
    base_directory: PathBuf,
    projects: Vec<ProjectEntry>,
    groups: Vec<Group>,
    root_groups: Vec<GroupId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Registry {
    /// Schema version written by this build.
    pub const VERSION: u32 = 1;

    /// An empty registry rooted at `base_directory`.
    pub fn new(base_directory: impl Into<PathBuf>) -> Self {
        let now = Utc::now();
        Self {
            version: Self::VERSION,
            base_directory: paths::normalize(&base_directory.into()),
            projects: Vec::new(),
            groups: Vec::new(),
            root_groups: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn projects(&self) -> &[ProjectEntry] {
        &self.projects
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id.0)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Child folders of `parent` in creation order; `None` lists root folders.
    pub fn children(&self, parent: Option<GroupId>) -> &[GroupId] {
        match parent {
            None => &self.root_groups,
            Some(id) => self
                .groups
                .get(id.0)
                .map(|g| g.children.as_slice())
                .unwrap_or(&[]),
        }
    }

    pub fn find_child(&self, parent: Option<GroupId>, name: &str) -> Option<GroupId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|id| self.group(*id).is_some_and(|g| g.name == name))
    }

    /// Walks `names` from the root, creating any missing folder along the way,
    /// and returns the last one. An empty slice is the root (`None`).
    pub fn ensure_group_path<S: AsRef<str>>(&mut self, names: &[S]) -> Option<GroupId> {
        let mut current = None;
        for name in names {
            let name = name.as_ref();
            let next = match self.find_child(current, name) {
                Some(id) => id,
                None => self.create_group(current, name),
            };
            current = Some(next);
        }
        current
    }

    fn create_group(&mut self, parent: Option<GroupId>, name: &str) -> GroupId {
        let id = GroupId(self.groups.len());
        self.groups.push(Group {
            name: name.to_owned(),
            parent,
            children: Vec::new(),
        });
        match parent.and_then(|p| self.groups.get_mut(p.0)) {
            Some(parent_group) => parent_group.children.push(id),
            None => self.root_groups.push(id),
        }
        tracing::debug!(folder = %self.folder_path(id), "created solution folder");
        id
    }

    /// Folder names from the root down to `id`.
    pub fn folder_names(&self, id: GroupId) -> Vec<String> {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(group) = current.and_then(|id| self.group(id)) {
            names.push(group.name.clone());
            current = group.parent;
        }
        names.reverse();
        names
    }

    /// `/`-joined [`folder_names`](Self::folder_names), for display.
    pub fn folder_path(&self, id: GroupId) -> String {
        self.folder_names(id).join("/")
    }

    /// Absolute, normalized location of a registered project.
    pub fn full_path(&self, entry: &ProjectEntry) -> PathBuf {
        paths::normalize(&self.base_directory.join(&entry.path))
    }

    /// Whether a project with the same normalized full path is registered.
    /// Relative inputs are taken relative to the base directory.
    pub fn contains_project(&self, path: &Path) -> bool {
        let wanted = paths::normalize(&self.base_directory.join(path));
        self.projects.iter().any(|p| self.full_path(p) == wanted)
    }

    pub fn find_project(&self, path: &Path) -> Option<&ProjectEntry> {
        let wanted = paths::normalize(&self.base_directory.join(path));
        self.projects.iter().find(|p| self.full_path(p) == wanted)
    }

    /// Appends an entry for `path` under `group`. Callers check for
    /// duplicates first.
    pub(crate) fn add_project(&mut self, path: &Path, group: Option<GroupId>) -> &ProjectEntry {
        let full = paths::normalize(&self.base_directory.join(path));
        let stored = paths::relative_to(&self.base_directory, &full).unwrap_or_else(|| full.clone());
        let name = full
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| paths::to_slash(&stored));
        self.push_entry(ProjectEntry {
            name: ProjectName::from(name),
            path: stored,
            group,
        })
    }

    pub(crate) fn push_entry(&mut self, entry: ProjectEntry) -> &ProjectEntry {
        self.projects.push(entry);
        let last = self.projects.len() - 1;
        &self.projects[last]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newtype_display() {
        assert_eq!(ProjectName::from("Api").to_string(), "Api");
        assert_eq!(ProjectName::from(String::from("x")), ProjectName::from("x"));
    }

    #[test]
    fn ensure_group_path_reuses_existing_nodes() {
        let mut reg = Registry::new("/repo");
        let a = reg.ensure_group_path(&["src", "libs"]);
        let b = reg.ensure_group_path(&["src", "libs"]);
        assert_eq!(a, b);
        assert_eq!(reg.group_count(), 2);
        assert_eq!(reg.children(None).len(), 1);
    }

    #[test]
    fn ensure_group_path_empty_is_root() {
        let mut reg = Registry::new("/repo");
        let none: &[&str] = &[];
        assert_eq!(reg.ensure_group_path(none), None);
        assert_eq!(reg.group_count(), 0);
    }

    #[test]
    fn children_keep_creation_order() {
        let mut reg = Registry::new("/repo");
        reg.ensure_group_path(&["src", "zeta"]);
        reg.ensure_group_path(&["src", "alpha"]);
        let src = reg.find_child(None, "src").expect("src");
        let names: Vec<_> = reg
            .children(Some(src))
            .iter()
            .map(|id| reg.group(*id).unwrap().name.clone())
            .collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn folder_path_joins_ancestors() {
        let mut reg = Registry::new("/repo");
        let leaf = reg.ensure_group_path(&["a", "b", "c"]).unwrap();
        assert_eq!(reg.folder_path(leaf), "a/b/c");
    }

    #[test]
    fn add_project_stores_relative_path_and_stem() {
        let mut reg = Registry::new("/repo");
        let entry = reg.add_project(Path::new("/repo/src/A/A.proj"), None).clone();
        assert_eq!(entry.name, ProjectName::from("A"));
        assert_eq!(entry.path, PathBuf::from("src/A/A.proj"));
        assert_eq!(reg.full_path(&entry), PathBuf::from("/repo/src/A/A.proj"));
    }

    #[test]
    fn contains_project_compares_normalized_paths() {
        let mut reg = Registry::new("/repo");
        reg.add_project(Path::new("/repo/src/A/A.proj"), None);
        assert!(reg.contains_project(Path::new("/repo/src/./B/../A/A.proj")));
        assert!(reg.contains_project(Path::new("src/A/A.proj")));
        assert!(!reg.contains_project(Path::new("/repo/src/B/B.proj")));
    }
}
