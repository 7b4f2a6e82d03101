use crate::output::{badge_preview, print_json, print_table};
use anyhow::Context;
use readme_core::catalog::default_catalog;
use readme_core::config::Options;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let options = Options::load(root).context("failed to load readme.yaml")?;
    let catalog = default_catalog();

    if json {
        let badges: Vec<_> = catalog
            .badges()
            .iter()
            .map(|b| {
                serde_json::json!({
                    "id": b.id,
                    "applies": (b.applies_when)(&options),
                    "rendered": (b.render)(&options),
                })
            })
            .collect();
        return print_json(&serde_json::json!({ "badges": badges }));
    }

    let rows = catalog
        .badges()
        .iter()
        .map(|b| {
            let rendered = (b.render)(&options);
            let shown = badge_preview(&rendered).to_string();
            let applies = if (b.applies_when)(&options) { "yes" } else { "no" };
            vec![b.id.to_string(), applies.to_string(), shown]
        })
        .collect();
    print_table(&["ID", "APPLIES", "RENDERED"], rows);
    Ok(())
}
