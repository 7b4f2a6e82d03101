use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadmeError {
    #[error("not configured: run 'readme init' (no readme.yaml found)")]
    NotConfigured,

    #[error("badge id '{0}' is defined more than once in the catalog")]
    DuplicateBadgeId(String),

    #[error("badge '{rendered_by}' renders a snippet that badge '{matched_by}' also claims")]
    CatalogCollision {
        rendered_by: String,
        matched_by: String,
    },

    #[error("badge '{0}' does not recognize its own rendered snippet")]
    UnrecognizedRender(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, ReadmeError>;
