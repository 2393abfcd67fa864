use std::path::{Component, Path, PathBuf};

pub trait PathExt {
    /// Canonical path when it exists, otherwise an absolute, lexically
    /// normalized rendering. Meant for error messages only.
    fn best_effort_display(&self) -> String;

    /// The path with `root` stripped off, for user-facing listings.
    fn relative_to(&self, root: &Path) -> PathBuf;

    /// Resolves a relative path against `root`; absolute paths are kept.
    fn resolve_against(&self, root: &Path) -> PathBuf;
}

impl PathExt for Path {
    fn best_effort_display(&self) -> String {
        if let Ok(canonical) = self.canonicalize() {
            return canonical.display().to_string();
        }

        let absolute = if self.is_absolute() {
            self.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(self))
                .unwrap_or_else(|_| self.to_path_buf())
        };
        normalize(&absolute).display().to_string()
    }

    fn relative_to(&self, root: &Path) -> PathBuf {
        self.strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| self.to_path_buf())
    }

    fn resolve_against(&self, root: &Path) -> PathBuf {
        if self.is_absolute() {
            self.to_path_buf()
        } else {
            root.join(self)
        }
    }
}

impl PathExt for PathBuf {
    fn best_effort_display(&self) -> String {
        self.as_path().best_effort_display()
    }

    fn relative_to(&self, root: &Path) -> PathBuf {
        self.as_path().relative_to(root)
    }

    fn resolve_against(&self, root: &Path) -> PathBuf {
        self.as_path().resolve_against(root)
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.components()
        .fold(Vec::new(), |mut kept: Vec<Component>, component| {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    if matches!(kept.last(), Some(Component::Normal(_))) {
                        kept.pop();
                    }
                }
                other => kept.push(other),
            }
            kept
        })
        .iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("/project/./src/../extension/popup.js", "/project/extension/popup.js")]
    #[case("/project/src/app/page.tsx", "/project/src/app/page.tsx")]
    #[case("/../project", "/project")]
    fn normalize_resolves_dots(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(Path::new(input)), PathBuf::from(expected));
    }

    #[test]
    fn missing_path_is_displayed_absolute() {
        let display = Path::new("does/not/exist.tsx").best_effort_display();
        assert!(Path::new(&display).is_absolute());
        assert!(display.ends_with("does/not/exist.tsx"));
    }

    #[rstest]
    #[case(".", "./src/app/page.tsx", "src/app/page.tsx")]
    #[case("/project", "/project/extension/popup.js", "extension/popup.js")]
    #[case("/project", "/elsewhere/base_console.txt", "/elsewhere/base_console.txt")]
    fn relative_to_strips_the_root(#[case] root: &str, #[case] path: &str, #[case] expected: &str) {
        assert_eq!(
            Path::new(path).relative_to(Path::new(root)),
            PathBuf::from(expected)
        );
    }

    #[test]
    fn resolve_against_keeps_absolute_paths() {
        let root = Path::new("/project");
        assert_eq!(
            Path::new("src").resolve_against(root),
            PathBuf::from("/project/src")
        );
        assert_eq!(
            Path::new("/tmp/bone_state.tsx").resolve_against(root),
            PathBuf::from("/tmp/bone_state.tsx")
        );
    }
}
