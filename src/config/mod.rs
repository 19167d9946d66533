//! Configuration loading and management
//!
//! Configuration comes from a YAML file, from environment variables, or from
//! both (environment overrides the file). The project catalog configured here
//! is the single source of truth for allowed project names: the server
//! validates against it and publishes it on `GET /api/options` for clients.

use crate::core::error::{ConfigError, Result};
use crate::core::record::{TrainingStatus, TrainingType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use utoipa::ToSchema;

/// Project names used when nothing is configured
pub const DEFAULT_PROJECT_NAMES: [&str; 5] = ["ABC", "CDE", "EFG", "HIJ", "KLM"];

/// Allowed project names, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ProjectCatalog {
    project_names: Vec<String>,
}

impl ProjectCatalog {
    /// Build a catalog, trimming entries and dropping empty ones
    ///
    /// Fails if nothing is left or a name appears twice.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let project_names: Vec<String> = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();

        if project_names.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "project_names".to_string(),
                value: String::new(),
                message: "at least one project name is required".to_string(),
            }
            .into());
        }

        let mut seen = HashSet::new();
        if let Some(dup) = project_names.iter().find(|n| !seen.insert(n.as_str())) {
            return Err(ConfigError::InvalidValue {
                field: "project_names".to_string(),
                value: dup.clone(),
                message: "duplicate project name".to_string(),
            }
            .into());
        }

        Ok(Self { project_names })
    }

    /// Parse a comma separated list, e.g. the `PROJECT_NAMES` variable
    pub fn parse_list(list: &str) -> Result<Self> {
        Self::new(list.split(','))
    }

    pub fn names(&self) -> &[String] {
        &self.project_names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.project_names.iter().any(|n| n == name)
    }

    /// Default choice for new records
    pub fn first(&self) -> &str {
        // non-empty by construction
        &self.project_names[0]
    }

    /// Option lists published to clients
    pub fn options(&self) -> RecordOptions {
        RecordOptions {
            project_names: self.project_names.clone(),
            statuses: TrainingStatus::ALL
                .iter()
                .map(|s| s.as_str().to_string())
                .collect(),
            training_types: TrainingType::ALL
                .iter()
                .map(|t| t.as_str().to_string())
                .collect(),
        }
    }

    /// Compare a locally configured catalog with the authoritative one
    ///
    /// Returns `None` when both hold the same names (order ignored).
    pub fn drift_from(&self, authoritative: &ProjectCatalog) -> Option<ConfigDrift> {
        let only_local: Vec<String> = self
            .project_names
            .iter()
            .filter(|n| !authoritative.contains(n))
            .cloned()
            .collect();
        let only_server: Vec<String> = authoritative
            .project_names
            .iter()
            .filter(|n| !self.contains(n))
            .cloned()
            .collect();

        if only_local.is_empty() && only_server.is_empty() {
            None
        } else {
            Some(ConfigDrift {
                only_local,
                only_server,
                ..ConfigDrift::default()
            })
        }
    }
}

impl Default for ProjectCatalog {
    fn default() -> Self {
        Self {
            project_names: DEFAULT_PROJECT_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for ProjectCatalog {
    type Error = crate::core::error::TrainingError;

    fn try_from(names: Vec<String>) -> Result<Self> {
        Self::new(names)
    }
}

impl From<ProjectCatalog> for Vec<String> {
    fn from(catalog: ProjectCatalog) -> Self {
        catalog.project_names
    }
}

/// Option lists a client renders its selects from
///
/// Statuses and training types travel as plain wire names so that a client
/// built against an older enumeration still decodes a newer server's lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordOptions {
    pub project_names: Vec<String>,
    pub statuses: Vec<String>,
    pub training_types: Vec<String>,
}

impl RecordOptions {
    /// Published statuses this build has no variant for
    pub fn unknown_statuses(&self) -> Vec<String> {
        unknown_names::<TrainingStatus>(&self.statuses)
    }

    /// Published training types this build has no variant for
    pub fn unknown_training_types(&self) -> Vec<String> {
        unknown_names::<TrainingType>(&self.training_types)
    }
}

fn unknown_names<T: FromStr>(names: &[String]) -> Vec<String> {
    names
        .iter()
        .filter(|name| name.parse::<T>().is_err())
        .cloned()
        .collect()
}

/// Difference between a client's option lists and the server's
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDrift {
    /// Names the client offers but the server rejects
    pub only_local: Vec<String>,
    /// Names the server accepts but the client did not know
    pub only_server: Vec<String>,
    /// Statuses published by the server that the client cannot represent
    pub unknown_statuses: Vec<String>,
    /// Training types published by the server that the client cannot represent
    pub unknown_training_types: Vec<String>,
}

impl ConfigDrift {
    pub fn is_empty(&self) -> bool {
        self.only_local.is_empty()
            && self.only_server.is_empty()
            && self.unknown_statuses.is_empty()
            && self.unknown_training_types.is_empty()
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` for binding
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Which record store backend to run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageConfig {
    #[default]
    InMemory,
    Mongo {
        uri: String,
        #[serde(default = "default_mongo_database")]
        database: String,
    },
}

fn default_mongo_database() -> String {
    "training".to_string()
}

/// Complete server configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub project_names: ProjectCatalog,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::IoError {
                message: e.to_string(),
            },
        })?;
        serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                file: Some(path.display().to_string()),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from the process environment
    ///
    /// If `TRAINING_CONFIG` names a YAML file it is loaded first; the other
    /// variables override it.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base = match lookup("TRAINING_CONFIG") {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        base.with_overrides(lookup)
    }

    /// Apply `HOST`, `PORT`, `PROJECT_NAMES`, `MONGODB_URI` and `MONGODB_DATABASE`
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: "PORT".to_string(),
                value: port.clone(),
                message: "expected a port number".to_string(),
            })?;
        }
        if let Some(names) = lookup("PROJECT_NAMES") {
            self.project_names = ProjectCatalog::parse_list(&names)?;
        }
        if let Some(uri) = lookup("MONGODB_URI") {
            let database = lookup("MONGODB_DATABASE").unwrap_or_else(default_mongo_database);
            self.storage = StorageConfig::Mongo { uri, database };
        }
        Ok(self)
    }
}

/// Client-side settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the record store, without the `/api` suffix
    pub base_url: String,
    pub timeout: Duration,
    /// Project list the client was configured with, if any
    ///
    /// Only used to detect drift; the server's list always wins.
    pub project_names: Option<ProjectCatalog>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout: Duration::from_secs(30),
            project_names: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// `TRAINING_API_URL`, `TRAINING_API_TIMEOUT_SECS`, `PROJECT_NAMES`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(url) = lookup("TRAINING_API_URL") {
            config.base_url = url;
        }
        if let Some(secs) = lookup("TRAINING_API_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: "TRAINING_API_TIMEOUT_SECS".to_string(),
                value: secs.clone(),
                message: "expected a number of seconds".to_string(),
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(names) = lookup("PROJECT_NAMES") {
            config.project_names = Some(ProjectCatalog::parse_list(&names)?);
        }
        Ok(config)
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}
