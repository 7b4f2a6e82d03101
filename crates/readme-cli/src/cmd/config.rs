use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use readme_core::config::{Options, WarnLevel};
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Validate readme.yaml for common mistakes
    Validate,

    /// Print the effective configuration, defaults included
    Show,
}

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Validate => validate(root, json),
        ConfigSubcommand::Show => show(root, json),
    }
}

fn validate(root: &Path, json: bool) -> anyhow::Result<()> {
    let options = Options::load(root).context("failed to load readme.yaml")?;
    let warnings = options.validate();

    if json {
        print_json(&serde_json::json!({ "warnings": warnings }))?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("config validation found errors");
    }
    Ok(())
}

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let options = Options::load(root).context("failed to load readme.yaml")?;
    if json {
        print_json(&options)
    } else {
        print!("{}", serde_yaml::to_string(&options)?);
        Ok(())
    }
}
