use crate::output::print_json;
use anyhow::Context;
use readme_core::config::Mode;
use readme_core::merge::merge_document;
use readme_core::{io, paths};
use std::path::Path;

pub fn run(root: &Path, mode: Option<Mode>, dry_run: bool, json: bool) -> anyhow::Result<()> {
    let (catalog, options) = super::load_run_options(root, mode)?;

    let path = paths::readme_path(root);
    let existed = path.exists();
    let previous = io::read_or_empty(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let merged = merge_document(&catalog, &options, &previous);

    if dry_run {
        if json {
            print_json(&serde_json::json!({
                "changes": merged.changes,
                "text": merged.text,
            }))?;
        } else {
            print!("{}", merged.text);
        }
        return Ok(());
    }

    let written = io::write_if_changed(&path, &merged.text)
        .with_context(|| format!("failed to write {}", path.display()))?;
    let status = match (written, existed) {
        (false, _) => "unchanged",
        (true, false) => "created",
        (true, true) => "updated",
    };
    if written {
        tracing::info!(path = %path.display(), changes = merged.changes.len(), "wrote README");
    }

    if json {
        print_json(&serde_json::json!({
            "path": path.display().to_string(),
            "status": status,
            "mode": options.mode,
            "changes": merged.changes,
        }))?;
    } else {
        println!("  {status}: {}", paths::README_MD);
        for change in &merged.changes {
            println!("    - {}", super::describe(change));
        }
    }
    Ok(())
}
