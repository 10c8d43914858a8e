use crate::core::{ConfigProvider, DuplicatePolicy};
use crate::utils::error::{Result, SurveyError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub survey: SurveyConfig,
    pub source: SourceConfig,
    pub graph: Option<GraphConfig>,
    pub query: Option<QueryConfig>,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub r#type: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    pub duplicate_policy: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub allow_missing: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SurveyError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SurveyError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` placeholders with environment values. Unset
    /// variables are left as-is so validation can point at them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if self.source.r#type != "file" {
            return Err(SurveyError::InvalidConfigValueError {
                field: "source.type".to_string(),
                value: self.source.r#type.clone(),
                reason: "Only 'file' sources are supported".to_string(),
            });
        }

        validation::validate_path("source.path", &self.source.path)?;
        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_output_formats("load.output_formats", &self.load.output_formats)?;
        validation::validate_body_name("query.origin", self.origin())?;
        validation::validate_body_name("query.destination", self.destination())?;

        if let Some(policy) = self.graph.as_ref().and_then(|g| g.duplicate_policy.as_deref()) {
            policy
                .parse::<DuplicatePolicy>()
                .map_err(|reason| SurveyError::InvalidConfigValueError {
                    field: "graph.duplicate_policy".to_string(),
                    value: policy.to_string(),
                    reason,
                })?;
        }

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.source.path
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn origin(&self) -> &str {
        self.query
            .as_ref()
            .and_then(|q| q.origin.as_deref())
            .unwrap_or("YOU")
    }

    fn destination(&self) -> &str {
        self.query
            .as_ref()
            .and_then(|q| q.destination.as_deref())
            .unwrap_or("SAN")
    }

    fn duplicate_policy(&self) -> DuplicatePolicy {
        self.graph
            .as_ref()
            .and_then(|g| g.duplicate_policy.as_deref())
            .and_then(|p| p.parse().ok())
            .unwrap_or_default()
    }

    fn allow_missing_query(&self) -> bool {
        self.query
            .as_ref()
            .and_then(|q| q.allow_missing)
            .unwrap_or(false)
    }

    fn output_formats(&self) -> &[String] {
        &self.load.output_formats
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
