//! Lexical path helpers. Nothing here touches the filesystem.

use std::path::{Component, Path, PathBuf};

/// Folds `.` and `..` components without consulting the filesystem.
///
/// - `/repo/src/./A/../B` → `/repo/src/B`
/// - `/..` → `/` (cannot climb past the root)
/// - `../x/..` → `..` (leading parents of a relative path are kept)
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// `target` expressed relative to `base`; both are normalized first.
///
/// Returns `None` when the paths share no root: one absolute and one
/// relative, different drive prefixes, or a relative `base` that itself
/// climbs with `..` past the common part.
pub fn relative_to(base: &Path, target: &Path) -> Option<PathBuf> {
    let base = normalize(base);
    let target = normalize(target);
    if base.has_root() != target.has_root() {
        return None;
    }

    let base_parts: Vec<Component<'_>> = base
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let target_parts: Vec<Component<'_>> = target
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    let common = base_parts
        .iter()
        .zip(&target_parts)
        .take_while(|(a, b)| a == b)
        .count();
    if base.has_root() && common == 0 {
        return None;
    }
    if base_parts[common..]
        .iter()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return None;
    }

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &target_parts[common..] {
        relative.push(part.as_os_str());
    }
    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    Some(relative)
}

/// Renders a relative path with `/` separators, the form stored in registry
/// files. Absolute paths are returned as-is.
pub fn to_slash(path: &Path) -> String {
    if path.has_root() {
        return path.to_string_lossy().into_owned();
    }
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Inverse of [`to_slash`]. Only `/` separates components; a `\` is part
/// of a name, as it may be on Unix.
pub fn from_slash(s: &str) -> PathBuf {
    if Path::new(s).has_root() {
        return PathBuf::from(s);
    }
    s.split('/').filter(|p| !p.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_folds_dots() {
        assert_eq!(normalize(Path::new("/repo/src/./A/../B")), PathBuf::from("/repo/src/B"));
        assert_eq!(normalize(Path::new("/..")), PathBuf::from("/"));
        assert_eq!(normalize(Path::new("../x/..")), PathBuf::from(".."));
        assert_eq!(normalize(Path::new("./")), PathBuf::from("."));
    }

    #[test]
    fn relative_inside_base() {
        let rel = relative_to(Path::new("/repo"), Path::new("/repo/src/A/A.proj")).unwrap();
        assert_eq!(rel, PathBuf::from("src/A/A.proj"));
    }

    #[test]
    fn relative_outside_base_climbs() {
        let rel = relative_to(Path::new("/repo/sln"), Path::new("/repo/lib/B/B.proj")).unwrap();
        assert_eq!(rel, PathBuf::from("../lib/B/B.proj"));
    }

    #[test]
    fn relative_of_base_itself_is_dot() {
        assert_eq!(relative_to(Path::new("/repo"), Path::new("/repo/")), Some(PathBuf::from(".")));
    }

    #[test]
    fn relative_needs_shared_root() {
        assert_eq!(relative_to(Path::new("/repo"), Path::new("src/A.proj")), None);
    }

    #[test]
    fn slash_forms() {
        assert_eq!(to_slash(Path::new("src/A/A.proj")), "src/A/A.proj");
        assert_eq!(from_slash("src/A/A.proj"), PathBuf::from("src").join("A").join("A.proj"));
        assert_eq!(from_slash("/abs/A.proj"), PathBuf::from("/abs/A.proj"));
    }

    #[cfg(unix)]
    #[test]
    fn backslash_in_a_name_survives_slash_form() {
        let path = PathBuf::from("src").join("a\\b").join("X").join("X.proj");
        let stored = to_slash(&path);
        assert_eq!(stored, "src/a\\b/X/X.proj");
        assert_eq!(from_slash(&stored), path);
    }
}
