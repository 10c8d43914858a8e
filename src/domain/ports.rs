use crate::domain::model::{DuplicatePolicy, OrbitRecord, SurveyReport};
use crate::utils::error::Result;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn origin(&self) -> &str;
    fn destination(&self) -> &str;
    fn duplicate_policy(&self) -> DuplicatePolicy;
    /// When true, a transfer query naming a body absent from the map is
    /// skipped instead of failing the run.
    fn allow_missing_query(&self) -> bool;
    fn output_formats(&self) -> &[String];
}

pub trait Pipeline: Send + Sync {
    fn extract(&self) -> Result<Vec<OrbitRecord>>;
    fn transform(&self, records: Vec<OrbitRecord>) -> Result<SurveyReport>;
    fn load(&self, report: &SurveyReport) -> Result<String>;
}
