//! Per-file rewrite loop.

use std::fs;
use std::path::{Path, PathBuf};

use glaze_tokens::{BUILTIN_RECIPES, Catalog, Pipeline, Recipe, rewrite_source};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::GlazeConfig;
use crate::discovery::discover;
use crate::error::GlazeError;

/// A file whose class attributes changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// Path as discovered.
    pub path: PathBuf,
    /// Distinct change descriptors, sorted.
    pub changes: Vec<String>,
    /// Number of changes applied, repeats included.
    pub ops: usize,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Whether rewrites were persisted.
    pub write: bool,
    /// Changed files in discovery order.
    pub files: Vec<FileReport>,
    /// Files that could not be read or written.
    pub skipped: usize,
}

impl RunSummary {
    /// Number of changed files.
    #[must_use]
    pub fn files_changed(&self) -> usize {
        self.files.len()
    }

    /// Total changes across all files.
    #[must_use]
    pub fn token_ops(&self) -> usize {
        self.files.iter().map(|f| f.ops).sum()
    }
}

/// Rewrite every discovered file under `roots` with the builtin recipes.
///
/// Files that fail to read or write are logged and counted in
/// [`RunSummary::skipped`]; they never abort the run.
///
/// # Errors
///
/// Returns [`GlazeError::Catalog`] when the builtin recipe table is invalid.
pub fn run(config: &GlazeConfig, roots: &[PathBuf]) -> Result<RunSummary, GlazeError> {
    run_with_recipes(config, BUILTIN_RECIPES, roots)
}

/// Rewrite every discovered file under `roots` with `recipes`, validated
/// before any file is touched.
///
/// # Errors
///
/// Returns [`GlazeError::Catalog`] when `recipes` fails validation.
pub fn run_with_recipes(
    config: &GlazeConfig,
    recipes: &'static [Recipe],
    roots: &[PathBuf],
) -> Result<RunSummary, GlazeError> {
    let catalog = Catalog::new(recipes)?;
    debug!(recipes = recipes.len(), "validated recipe catalog");
    let pipeline = Pipeline::new(catalog, config.rewrite);
    let files = discover(roots, &config.extensions);
    debug!(files = files.len(), write = config.write, "discovered source files");

    let mut summary = RunSummary {
        write: config.write,
        ..RunSummary::default()
    };
    for path in files {
        match process_file(&path, &pipeline, config.write) {
            Ok(Some(report)) => summary.files.push(report),
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "skipping file");
                summary.skipped += 1;
            }
        }
    }
    Ok(summary)
}

/// Rewrite one file, persisting the result when `write` is set.
///
/// Returns `None` when nothing in the file changed.
///
/// # Errors
///
/// Returns [`GlazeError::Io`] when the file cannot be read as UTF-8 or the
/// rewrite cannot be written back.
pub fn process_file(
    path: &Path,
    pipeline: &Pipeline,
    write: bool,
) -> Result<Option<FileReport>, GlazeError> {
    let original = fs::read_to_string(path).map_err(|err| GlazeError::io(path, err))?;
    let rewrite = rewrite_source(&original, pipeline);
    if !rewrite.is_changed() || rewrite.text == original {
        return Ok(None);
    }

    if write {
        fs::write(path, &rewrite.text).map_err(|err| GlazeError::io(path, err))?;
        info!(path = %path.display(), segments = rewrite.segments_changed, "updated file");
    }

    let ops = rewrite.changes.len();
    let mut changes: Vec<String> = rewrite.changes.iter().map(ToString::to_string).collect();
    changes.sort();
    changes.dedup();
    Ok(Some(FileReport {
        path: path.to_path_buf(),
        changes,
        ops,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    const PANEL: &str = r#"<div className="border border-white/10 bg-white/[0.04] backdrop-blur">x</div>
<p className="backdrop-blur-lg">y</p>
"#;

    #[fixture]
    fn project() -> TempDir {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("failed to create temp dir");
        };
        let writes = [
            ("Panel.tsx", PANEL),
            ("Plain.tsx", r#"<div className="flex gap-2" />"#),
        ];
        for (name, body) in writes {
            if fs::write(dir.path().join(name), body).is_err() {
                panic!("failed to write {name}");
            }
        }
        dir
    }

    fn run_ok(config: &GlazeConfig, roots: &[PathBuf]) -> RunSummary {
        let Ok(summary) = run(config, roots) else {
            panic!("builtin catalog should validate");
        };
        summary
    }

    fn read(path: &Path) -> String {
        let Ok(text) = fs::read_to_string(path) else {
            panic!("failed to read {}", path.display());
        };
        text
    }

    #[rstest]
    fn dry_run_reports_without_writing(project: TempDir) {
        let summary = run_ok(&GlazeConfig::default(), &[project.path().to_path_buf()]);
        assert_eq!(summary.files_changed(), 1);
        assert_eq!(summary.token_ops(), 3);
        let Some(report) = summary.files.first() else {
            panic!("expected one report");
        };
        assert_eq!(
            report.changes,
            vec![
                "pattern: blur-unify backdrop-blur -> backdrop-blur-md",
                "pattern: blur-unify backdrop-blur-lg -> backdrop-blur-md",
                "token: glass-panel",
            ]
        );
        assert_eq!(read(&project.path().join("Panel.tsx")), PANEL);
    }

    #[rstest]
    fn write_mode_persists_and_converges(project: TempDir) {
        let config = GlazeConfig {
            write: true,
            ..GlazeConfig::default()
        };
        let roots = [project.path().to_path_buf()];
        let first = run_ok(&config, &roots);
        assert_eq!(first.files_changed(), 1);
        assert!(read(&project.path().join("Panel.tsx")).contains(r#"className="glass-panel""#));

        let second = run_ok(&config, &roots);
        assert_eq!(second.files_changed(), 0);
        assert_eq!(second.token_ops(), 0);
    }

    #[rstest]
    fn non_utf8_files_are_skipped(project: TempDir) {
        if fs::write(project.path().join("Binary.js"), [0xff, 0xfe, 0x00]).is_err() {
            panic!("failed to write binary fixture");
        }
        let summary = run_ok(&GlazeConfig::default(), &[project.path().to_path_buf()]);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.files_changed(), 1);
    }

    #[rstest]
    fn invalid_catalog_aborts_before_touching_files(project: TempDir) {
        let config = GlazeConfig {
            write: true,
            ..GlazeConfig::default()
        };
        let result = run_with_recipes(&config, &[], &[project.path().to_path_buf()]);
        assert!(matches!(
            result,
            Err(GlazeError::Catalog(glaze_tokens::CatalogError::Empty))
        ));
        assert_eq!(read(&project.path().join("Panel.tsx")), PANEL);
    }
}
