pub mod engine;
pub mod orbit_graph;
pub mod pipeline;

pub use crate::domain::model::{DuplicatePolicy, OrbitRecord, SurveyReport};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
