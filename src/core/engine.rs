use crate::core::{Pipeline, SurveyReport};
use crate::utils::error::Result;
use crate::utils::monitor::ResourceMonitor;

/// Drives a pipeline through its extract/transform/load phases, logging each
/// one and optionally sampling process resources in between.
pub struct SurveyEngine<P: Pipeline> {
    pipeline: P,
    monitor: ResourceMonitor,
}

impl<P: Pipeline> SurveyEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: ResourceMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: ResourceMonitor::new(monitor_enabled),
        }
    }

    pub fn run(&self) -> Result<(SurveyReport, String)> {
        tracing::info!("Starting orbit survey...");

        tracing::info!("Reading orbit map...");
        let records = self.pipeline.extract()?;
        tracing::info!("Parsed {} orbit records", records.len());
        self.monitor.log_phase("Extract");

        tracing::info!("Building orbit graph and running queries...");
        let report = self.pipeline.transform(records)?;
        tracing::info!("Surveyed {} bodies", report.body_count);
        self.monitor.log_phase("Transform");

        tracing::info!("Writing survey report...");
        let output_path = self.pipeline.load(&report)?;
        tracing::info!("Report saved to: {}", output_path);
        self.monitor.log_phase("Load");

        self.monitor.log_summary();

        Ok((report, output_path))
    }
}
