pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{cli::LocalStorage, CliConfig};
pub use crate::core::orbit_graph::{OrbitGraph, ROOT_BODY};
pub use crate::core::{engine::SurveyEngine, pipeline::SurveyPipeline};
pub use crate::domain::model::{DuplicatePolicy, OrbitRecord, SurveyReport};
pub use crate::utils::error::{Result, SurveyError};
