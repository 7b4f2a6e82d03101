use crate::output::print_json;
use anyhow::Context;
use clap::Args;
use readme_core::config::{Access, Mode, Options};
use readme_core::paths;
use std::path::Path;

#[derive(Args)]
pub struct InitArgs {
    /// Project title, shown as the README heading
    #[arg(long)]
    pub title: String,

    /// One-sentence project description
    #[arg(long)]
    pub description: String,

    /// GitHub organization or user
    #[arg(long)]
    pub owner: String,

    /// Repository (and npm package) name
    #[arg(long)]
    pub repository: String,

    /// GitHub Sponsors account; enables the sponsor badge
    #[arg(long)]
    pub funding: Option<String>,

    #[arg(long)]
    pub author: Option<String>,

    /// npm publish access: public or restricted
    #[arg(long, default_value_t = Access::Public)]
    pub access: Access,

    /// SPDX license identifier
    #[arg(long, default_value = "MIT")]
    pub license: String,

    /// create for a new project, migrate for an existing one
    #[arg(long, default_value_t = Mode::Create)]
    pub mode: Mode,

    #[arg(long)]
    pub exclude_all_contributors: bool,

    #[arg(long)]
    pub exclude_tests: bool,

    #[arg(long)]
    pub exclude_release: bool,

    /// Overwrite an existing readme.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(root: &Path, args: InitArgs, json: bool) -> anyhow::Result<()> {
    let config_path = paths::config_path(root);
    if config_path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (pass --force to overwrite)",
            config_path.display()
        );
    }

    let mut options = Options::new(args.title, args.description, args.owner, args.repository);
    options.funding = args.funding;
    options.author = args.author;
    options.access = args.access;
    options.license = args.license;
    options.mode = args.mode;
    options.exclude_all_contributors = args.exclude_all_contributors;
    options.exclude_tests = args.exclude_tests;
    options.exclude_release = args.exclude_release;

    options
        .save(root)
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    tracing::info!(path = %config_path.display(), "wrote config");

    if json {
        print_json(&serde_json::json!({
            "path": config_path.display().to_string(),
            "options": options,
        }))?;
    } else {
        println!("  created: {}", paths::CONFIG_FILE);
    }
    Ok(())
}
