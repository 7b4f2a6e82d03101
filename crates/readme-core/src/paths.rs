use std::path::{Path, PathBuf};

pub const README_MD: &str = "README.md";
pub const CONFIG_FILE: &str = "readme.yaml";

pub fn readme_path(root: &Path) -> PathBuf {
    root.join(README_MD)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}
