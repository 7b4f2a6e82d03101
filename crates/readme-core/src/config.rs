use crate::error::{ReadmeError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Access / Mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    #[default]
    Public,
    Restricted,
}

impl Access {
    pub fn as_str(self) -> &'static str {
        match self {
            Access::Public => "public",
            Access::Restricted => "restricted",
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Access {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "public" => Ok(Access::Public),
            "restricted" => Ok(Access::Restricted),
            other => Err(format!(
                "unknown access level '{other}' (expected public or restricted)"
            )),
        }
    }
}

/// Whether this run scaffolds a brand-new project or retrofits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Create,
    Migrate,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Create => "create",
            Mode::Migrate => "migrate",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "create" => Ok(Mode::Create),
            "migrate" => Ok(Mode::Migrate),
            other => Err(format!(
                "unknown mode '{other}' (expected create or migrate)"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Emails
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emails {
    pub github: String,
    pub npm: String,
}

// ---------------------------------------------------------------------------
// Options (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Options {
    pub title: String,
    pub description: String,
    pub owner: String,
    pub repository: String,
    #[serde(default)]
    pub access: Access,
    #[serde(default = "default_license")]
    pub license: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Emails>,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub exclude_all_contributors: bool,
    #[serde(default)]
    pub exclude_tests: bool,
    #[serde(default)]
    pub exclude_release: bool,
}

fn default_license() -> String {
    "MIT".to_string()
}

impl Options {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        owner: impl Into<String>,
        repository: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            owner: owner.into(),
            repository: repository.into(),
            access: Access::Public,
            license: default_license(),
            author: None,
            funding: None,
            email: None,
            mode: Mode::Create,
            exclude_all_contributors: false,
            exclude_tests: false,
            exclude_release: false,
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(ReadmeError::NotConfigured);
        }
        let data = std::fs::read_to_string(&path)?;
        let options: Options = serde_yaml::from_str(&data)?;
        Ok(options)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn contributors_enabled(&self) -> bool {
        !self.exclude_all_contributors
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        // 1. Required fields
        for (field, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("owner", &self.owner),
            ("repository", &self.repository),
            ("license", &self.license),
        ] {
            if value.trim().is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("'{field}' must not be empty"),
                });
            }
        }

        // 2. The header renders each of these as one line
        for (field, value) in [("title", &self.title), ("description", &self.description)] {
            if value.trim().contains('\n') {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("'{field}' must fit on one line"),
                });
            }
        }

        // 3. owner / repository end up in URL paths
        for (field, value) in [("owner", &self.owner), ("repository", &self.repository)] {
            if value.contains('/') || value.chars().any(char::is_whitespace) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!(
                        "'{field}' value '{value}' must not contain '/' or whitespace"
                    ),
                });
            }
        }

        // 4. Contact addresses
        if let Some(email) = &self.email {
            for (field, value) in [("email.github", &email.github), ("email.npm", &email.npm)] {
                if !value.contains('@') {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Warning,
                        message: format!("'{field}' value '{value}' does not look like an email address"),
                    });
                }
            }
        }

        // 5. Sponsoring a package nobody can install is probably a mistake
        if self.funding.is_some() && self.access == Access::Restricted {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "funding is set but access is 'restricted'; \
                          the sponsor badge will point readers at a private package"
                    .to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
