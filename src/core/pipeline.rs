use crate::core::orbit_graph::OrbitGraph;
use crate::core::{ConfigProvider, OrbitRecord, Pipeline, Storage, SurveyReport};
use crate::domain::model::TransferSummary;
use crate::utils::error::{Result, SurveyError};
use chrono::Utc;

pub struct SurveyPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> SurveyPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn render_summary(&self, report: &SurveyReport) -> String {
        let mut lines = vec![
            format!("Bodies surveyed: {}", report.body_count),
            format!("Orbit count checksum: {}", report.orbit_checksum),
        ];

        match &report.transfer {
            Some(transfer) => lines.push(format!(
                "Minimum transfers {} -> {}: {}",
                transfer.origin, transfer.destination, transfer.distance
            )),
            None => lines.push(format!(
                "Transfer {} -> {}: not computed (query body missing)",
                self.config.origin(),
                self.config.destination()
            )),
        }

        lines.push(format!("Generated at: {}", report.generated_at.to_rfc3339()));
        lines.join("\n")
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for SurveyPipeline<S, C> {
    fn extract(&self) -> Result<Vec<OrbitRecord>> {
        tracing::debug!("Reading orbit map from: {}", self.config.input_path());
        let raw = self.storage.read_file(self.config.input_path())?;

        let text = String::from_utf8(raw).map_err(|e| SurveyError::ParseError {
            line: 0,
            content: format!("input is not valid UTF-8: {}", e),
        })?;

        let records = OrbitGraph::parse_lines(&text)?;
        tracing::debug!("Parsed {} orbit records", records.len());
        Ok(records)
    }

    fn transform(&self, records: Vec<OrbitRecord>) -> Result<SurveyReport> {
        let graph = OrbitGraph::from_records(&records, self.config.duplicate_policy())?;
        graph.validate()?;

        let orbit_checksum = graph.total_orbits()?;
        tracing::info!("🛰 Orbit count checksum: {}", orbit_checksum);

        let origin = self.config.origin();
        let destination = self.config.destination();

        let transfer = if self.config.allow_missing_query()
            && (!graph.contains(origin) || !graph.contains(destination))
        {
            tracing::warn!(
                "Skipping transfer query: {:?} or {:?} not present in the map",
                origin,
                destination
            );
            None
        } else {
            let distance = graph.transfer_distance(origin, destination)?;
            tracing::info!(
                "🛰 Minimum transfers {} -> {}: {}",
                origin,
                destination,
                distance
            );
            Some(TransferSummary {
                origin: origin.to_string(),
                destination: destination.to_string(),
                distance,
            })
        };

        Ok(SurveyReport {
            body_count: graph.body_count(),
            orbit_checksum,
            transfer,
            generated_at: Utc::now(),
        })
    }

    fn load(&self, report: &SurveyReport) -> Result<String> {
        let formats = self.config.output_formats();

        if formats.iter().any(|f| f == "json") {
            let json = serde_json::to_string_pretty(report)?;
            self.storage.write_file("report.json", json.as_bytes())?;
            tracing::debug!("Wrote report.json ({} bytes)", json.len());
        }

        if formats.iter().any(|f| f == "text") {
            let summary = self.render_summary(report);
            self.storage.write_file("summary.txt", summary.as_bytes())?;
            tracing::debug!("Wrote summary.txt");
        }

        Ok(self.config.output_path().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::DuplicatePolicy;
    use std::collections::HashMap;
    use std::sync::Mutex;

    const SAMPLE_MAP: &str = "COM)B\nB)C\nC)D\nD)E\nE)F\nB)G\nG)H\nD)I\nE)J\nJ)K\nK)L\nK)YOU\nI)SAN";

    struct MockStorage {
        files: Mutex<HashMap<String, Vec<u8>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Mutex::new(HashMap::new()),
            }
        }

        fn with_file(path: &str, data: &str) -> Self {
            let storage = Self::new();
            storage
                .files
                .lock()
                .unwrap()
                .insert(path.to_string(), data.as_bytes().to_vec());
            storage
        }

        fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().unwrap().get(path).cloned()
        }
    }

    impl Storage for &MockStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.lock().unwrap().get(path).cloned().ok_or_else(|| {
                SurveyError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        input_path: String,
        output_path: String,
        origin: String,
        destination: String,
        duplicate_policy: DuplicatePolicy,
        allow_missing_query: bool,
        output_formats: Vec<String>,
    }

    impl MockConfig {
        fn new() -> Self {
            Self {
                input_path: "map.txt".to_string(),
                output_path: "test_output".to_string(),
                origin: "YOU".to_string(),
                destination: "SAN".to_string(),
                duplicate_policy: DuplicatePolicy::Overwrite,
                allow_missing_query: false,
                output_formats: vec!["json".to_string(), "text".to_string()],
            }
        }
    }

    impl ConfigProvider for MockConfig {
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
            self.duplicate_policy
        }

        fn allow_missing_query(&self) -> bool {
            self.allow_missing_query
        }

        fn output_formats(&self) -> &[String] {
            &self.output_formats
        }
    }

    #[test]
    fn test_extract_parses_map_file() {
        let storage = MockStorage::with_file("map.txt", SAMPLE_MAP);
        let pipeline = SurveyPipeline::new(&storage, MockConfig::new());

        let records = pipeline.extract().unwrap();
        assert_eq!(records.len(), 13);
        assert_eq!(records[0], OrbitRecord::new("COM", "B"));
    }

    #[test]
    fn test_extract_missing_file() {
        let storage = MockStorage::new();
        let pipeline = SurveyPipeline::new(&storage, MockConfig::new());
        assert!(matches!(
            pipeline.extract().unwrap_err(),
            SurveyError::IoError(_)
        ));
    }

    #[test]
    fn test_extract_rejects_non_utf8_input() {
        let storage = MockStorage::new();
        storage
            .files
            .lock()
            .unwrap()
            .insert("map.txt".to_string(), vec![0xff, 0xfe, 0x00]);
        let pipeline = SurveyPipeline::new(&storage, MockConfig::new());
        assert!(matches!(
            pipeline.extract().unwrap_err(),
            SurveyError::ParseError { .. }
        ));
    }

    #[test]
    fn test_transform_computes_checksum_and_transfer() {
        let storage = MockStorage::with_file("map.txt", SAMPLE_MAP);
        let pipeline = SurveyPipeline::new(&storage, MockConfig::new());

        let records = pipeline.extract().unwrap();
        let report = pipeline.transform(records).unwrap();

        assert_eq!(report.orbit_checksum, 54); // 42 + YOU (7) + SAN (5)
        assert_eq!(report.body_count, 14);
        let transfer = report.transfer.unwrap();
        assert_eq!(transfer.distance, 4);
        assert_eq!(transfer.origin, "YOU");
        assert_eq!(transfer.destination, "SAN");
    }

    #[test]
    fn test_transform_fails_on_missing_query_body_by_default() {
        let storage = MockStorage::with_file("map.txt", "COM)B\nB)C");
        let pipeline = SurveyPipeline::new(&storage, MockConfig::new());

        let records = pipeline.extract().unwrap();
        assert!(matches!(
            pipeline.transform(records).unwrap_err(),
            SurveyError::UnknownNode { .. }
        ));
    }

    #[test]
    fn test_transform_skips_transfer_when_allowed() {
        let storage = MockStorage::with_file("map.txt", "COM)B\nB)C");
        let mut config = MockConfig::new();
        config.allow_missing_query = true;
        let pipeline = SurveyPipeline::new(&storage, config);

        let records = pipeline.extract().unwrap();
        let report = pipeline.transform(records).unwrap();

        assert_eq!(report.orbit_checksum, 3);
        assert!(report.transfer.is_none());
    }

    #[test]
    fn test_transform_honors_reject_policy() {
        let storage = MockStorage::with_file("map.txt", "COM)B\nC)B");
        let mut config = MockConfig::new();
        config.duplicate_policy = DuplicatePolicy::Reject;
        config.allow_missing_query = true;
        let pipeline = SurveyPipeline::new(&storage, config);

        let records = pipeline.extract().unwrap();
        assert!(matches!(
            pipeline.transform(records).unwrap_err(),
            SurveyError::MalformedGraph { .. }
        ));
    }

    #[test]
    fn test_load_writes_configured_formats() {
        let storage = MockStorage::with_file("map.txt", SAMPLE_MAP);
        let pipeline = SurveyPipeline::new(&storage, MockConfig::new());

        let records = pipeline.extract().unwrap();
        let report = pipeline.transform(records).unwrap();
        let output_path = pipeline.load(&report).unwrap();

        assert_eq!(output_path, "test_output");

        let json = storage.get_file("report.json").unwrap();
        let parsed: SurveyReport = serde_json::from_slice(&json).unwrap();
        assert_eq!(parsed.orbit_checksum, 54);
        assert_eq!(parsed.transfer.unwrap().distance, 4);

        let summary = String::from_utf8(storage.get_file("summary.txt").unwrap()).unwrap();
        assert!(summary.contains("Orbit count checksum: 54"));
        assert!(summary.contains("Minimum transfers YOU -> SAN: 4"));
    }

    #[test]
    fn test_load_json_only() {
        let storage = MockStorage::with_file("map.txt", SAMPLE_MAP);
        let mut config = MockConfig::new();
        config.output_formats = vec!["json".to_string()];
        let pipeline = SurveyPipeline::new(&storage, config);

        let records = pipeline.extract().unwrap();
        let report = pipeline.transform(records).unwrap();
        pipeline.load(&report).unwrap();

        assert!(storage.get_file("report.json").is_some());
        assert!(storage.get_file("summary.txt").is_none());
    }
}
