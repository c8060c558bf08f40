//! Source file discovery.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::{DirEntry, WalkDir};

/// Directory names never descended into.
pub const SKIPPED_DIRS: &[&str] = &["node_modules", ".next", "dist", "build", ".git"];

/// Collect every file under `roots` whose extension is in `extensions`.
///
/// Roots may be files or directories. Directories named in [`SKIPPED_DIRS`]
/// are pruned wherever they appear. Unreadable entries are logged and
/// skipped. The result is sorted and free of duplicates.
#[must_use]
pub fn discover(roots: &[PathBuf], extensions: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for root in roots {
        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !is_skipped_dir(entry));
        for next in walker {
            match next {
                Ok(entry) if entry.file_type().is_file() && has_extension(entry.path(), extensions) => {
                    files.push(entry.into_path());
                }
                Ok(_) => {}
                Err(err) => warn!(root = %root.display(), error = %err, "skipping unreadable path"),
            }
        }
    }
    files.sort();
    files.dedup();
    files
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    fn exts() -> Vec<String> {
        ["tsx", "ts", "jsx", "js"].map(str::to_owned).to_vec()
    }

    #[fixture]
    fn tree() -> TempDir {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("failed to create temp dir");
        };
        for rel in [
            "src/App.tsx",
            "src/util.ts",
            "src/styles.css",
            "src/ui/Button.JSX",
            "node_modules/pkg/index.js",
            "src/.next/cache.js",
            "dist/bundle.js",
            "build/out.js",
            ".git/hooks/pre-commit.js",
        ] {
            let path = dir.path().join(rel);
            let Some(parent) = path.parent() else {
                panic!("{rel} has no parent");
            };
            if fs::create_dir_all(parent).and_then(|()| fs::write(&path, "")).is_err() {
                panic!("failed to create {rel}");
            }
        }
        dir
    }

    fn relative(dir: &TempDir, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .filter_map(|p| p.strip_prefix(dir.path()).ok())
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[rstest]
    fn finds_sources_and_prunes_build_output(tree: TempDir) {
        let files = discover(&[tree.path().to_path_buf()], &exts());
        assert_eq!(
            relative(&tree, &files),
            vec!["src/App.tsx", "src/ui/Button.JSX", "src/util.ts"]
        );
    }

    #[rstest]
    fn honours_custom_extensions(tree: TempDir) {
        let files = discover(&[tree.path().to_path_buf()], &["css".to_owned()]);
        assert_eq!(relative(&tree, &files), vec!["src/styles.css"]);
    }

    #[rstest]
    fn accepts_file_roots_and_removes_duplicates(tree: TempDir) {
        let app = tree.path().join("src/App.tsx");
        let files = discover(&[app.clone(), tree.path().join("src"), app], &exts());
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn missing_root_yields_nothing() {
        let files = discover(&[PathBuf::from("/definitely/not/here")], &exts());
        assert!(files.is_empty());
    }
}
