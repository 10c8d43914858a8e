pub mod cli;
pub mod toml_config;

use crate::core::{ConfigProvider, DuplicatePolicy};
use crate::utils::error::{Result, SurveyError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_OUTPUT_FORMATS: [&str; 2] = ["json", "text"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "orbit-map"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Orbit map survey: checksum and minimum transfer distance")
)]
pub struct CliConfig {
    /// Path to the orbit map file, one <parent>)<child> record per line
    #[cfg_attr(feature = "cli", arg(long, default_value = "input/day6.txt"))]
    pub input_path: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "./output"))]
    pub output_path: String,

    /// Body whose orbit the transfer starts from
    #[cfg_attr(feature = "cli", arg(long, default_value = "YOU"))]
    pub origin: String,

    /// Body whose orbit the transfer ends at
    #[cfg_attr(feature = "cli", arg(long, default_value = "SAN"))]
    pub destination: String,

    /// How to treat a body assigned two different parents: overwrite or reject
    #[cfg_attr(feature = "cli", arg(long, default_value = "overwrite"))]
    pub duplicate_policy: String,

    /// Skip the transfer query instead of failing when a query body is absent
    #[cfg_attr(feature = "cli", arg(long))]
    pub allow_missing: bool,

    /// Output formats to write, comma separated (json, text)
    #[cfg_attr(
        feature = "cli",
        arg(long, value_delimiter = ',', default_values = DEFAULT_OUTPUT_FORMATS)
    )]
    pub output_formats: Vec<String>,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable resource monitoring"))]
    pub monitor: bool,
}

impl CliConfig {
    fn parsed_duplicate_policy(&self) -> Result<DuplicatePolicy> {
        self.duplicate_policy
            .parse()
            .map_err(|reason| SurveyError::InvalidConfigValueError {
                field: "duplicate_policy".to_string(),
                value: self.duplicate_policy.clone(),
                reason,
            })
    }
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn origin(&self) -> &str {
        &self.origin
    }

    fn destination(&self) -> &str {
        &self.destination
    }

    fn duplicate_policy(&self) -> DuplicatePolicy {
        // Validation runs before the pipeline, so a bad value never gets here.
        self.parsed_duplicate_policy().unwrap_or_default()
    }

    fn allow_missing_query(&self) -> bool {
        self.allow_missing
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input_path", &self.input_path)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_body_name("origin", &self.origin)?;
        validation::validate_body_name("destination", &self.destination)?;
        validation::validate_output_formats("output_formats", &self.output_formats)?;
        self.parsed_duplicate_policy()?;
        Ok(())
    }
}
