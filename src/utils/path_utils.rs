use std::path::{Component, Path, PathBuf};

pub struct PathUtils;

impl PathUtils {
    /// Express `target` relative to `base`, walking up with `..` where
    /// needed. Returns None when the two share no common root (e.g.
    /// different prefixes), in which case the caller keeps the absolute
    /// form.
    pub fn make_relative(target: &Path, base: &Path) -> Option<PathBuf> {
        let target = Self::normalize(target);
        let base = Self::normalize(base);

        let target_components: Vec<Component> = target.components().collect();
        let base_components: Vec<Component> = base.components().collect();

        let mut common = 0;
        while common < target_components.len()
            && common < base_components.len()
            && target_components[common] == base_components[common]
        {
            common += 1;
        }
        if common == 0 {
            return None;
        }

        let mut relative = PathBuf::new();
        for _ in common..base_components.len() {
            relative.push("..");
        }
        for component in &target_components[common..] {
            relative.push(component.as_os_str());
        }
        if relative.as_os_str().is_empty() {
            relative.push(".");
        }
        Some(relative)
    }

    /// Lexically normalize a path: fold `.` away and resolve `..` against
    /// preceding components. Never touches the file system.
    pub fn normalize(path: &Path) -> PathBuf {
        let mut normalized = PathBuf::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    let popped = normalized.pop();
                    if !popped {
                        normalized.push("..");
                    }
                }
                other => normalized.push(other.as_os_str()),
            }
        }
        normalized
    }

    /// Resolve a possibly-relative path against a base directory
    pub fn resolve(value: &Path, base_dir: &Path) -> PathBuf {
        if value.is_absolute() {
            Self::normalize(value)
        } else {
            Self::normalize(&base_dir.join(value))
        }
    }
}
