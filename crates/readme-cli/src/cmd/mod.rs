pub mod badges;
pub mod check;
pub mod config;
pub mod init;
pub mod write;

use anyhow::Context;
use readme_core::badge::Catalog;
use readme_core::catalog::default_catalog;
use readme_core::config::{ConfigWarning, Mode, Options, WarnLevel};
use readme_core::merge::Change;
use std::path::Path;

/// Load readme.yaml, apply a mode override, and refuse to continue on
/// validation errors or a catalog that fails its authoring check.
pub(crate) fn load_run_options(
    root: &Path,
    mode: Option<Mode>,
) -> anyhow::Result<(Catalog, Options)> {
    let mut options = Options::load(root).context("failed to load readme.yaml")?;
    if let Some(mode) = mode {
        options.mode = mode;
    }

    let warnings = options.validate();
    report_warnings(&warnings);
    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("readme.yaml has errors; run 'readme config validate' for details");
    }

    let catalog = default_catalog();
    catalog
        .check(&options)
        .context("badge catalog failed its consistency check")?;
    Ok((catalog, options))
}

/// Warnings go to stderr so stdout stays usable for `--dry-run` and `--json`.
fn report_warnings(warnings: &[ConfigWarning]) {
    for w in warnings {
        let prefix = match w.level {
            WarnLevel::Warning => "warning",
            WarnLevel::Error => "error",
        };
        eprintln!("[{prefix}] {}", w.message);
    }
}

pub(crate) fn describe(change: &Change) -> String {
    match change {
        Change::Created => "document created".to_string(),
        Change::HeaderRefreshed => "header refreshed".to_string(),
        Change::BadgesReplaced {
            refreshed,
            unknown_kept,
        } => format!("badges replaced ({refreshed} canonical, {unknown_kept} unknown kept)"),
        Change::BadgesInserted => "badge block inserted".to_string(),
        Change::UsageInserted => "usage section inserted".to_string(),
        Change::ContributorsInserted => "contributors section inserted".to_string(),
        Change::FooterInserted => "footer notice inserted".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn describe_badges_replaced_counts() {
        let text = describe(&Change::BadgesReplaced {
            refreshed: 7,
            unknown_kept: 1,
        });
        assert_eq!(text, "badges replaced (7 canonical, 1 unknown kept)");
    }

    #[test]
    fn mode_override_applies() {
        let dir = TempDir::new().unwrap();
        Options::new("T", "D", "o", "r").save(dir.path()).unwrap();
        let (_, options) = load_run_options(dir.path(), Some(Mode::Migrate)).unwrap();
        assert_eq!(options.mode, Mode::Migrate);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let dir = TempDir::new().unwrap();
        Options::new("", "D", "o", "r").save(dir.path()).unwrap();
        assert!(load_run_options(dir.path(), None).is_err());
    }
}
