use crate::output::print_json;
use anyhow::Context;
use readme_core::config::Mode;
use readme_core::merge::merge_document;
use readme_core::{io, paths};
use std::path::Path;

pub fn run(root: &Path, mode: Option<Mode>, json: bool) -> anyhow::Result<()> {
    let (catalog, options) = super::load_run_options(root, mode)?;

    let path = paths::readme_path(root);
    let previous = io::read_or_empty(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let merged = merge_document(&catalog, &options, &previous);
    let up_to_date = merged.text == previous;

    if json {
        print_json(&serde_json::json!({
            "path": path.display().to_string(),
            "up_to_date": up_to_date,
            "changes": merged.changes,
        }))?;
    } else if up_to_date {
        println!("{} is up to date.", paths::README_MD);
    } else {
        println!("{} is out of date:", paths::README_MD);
        for change in &merged.changes {
            println!("    - {}", super::describe(change));
        }
    }

    if !up_to_date {
        anyhow::bail!("{} would change; run 'readme write'", paths::README_MD);
    }
    Ok(())
}
