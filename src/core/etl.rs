use crate::core::Pipeline;
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    pub skipped_lines: usize,
    pub output_path: String,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Extract, transform, load. Nothing is written unless every line converted.
    pub fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting conversion...");

        // Extract
        let lines = self.pipeline.extract()?;
        tracing::info!("Read {} lines", lines.len());

        // Transform
        let conversion = self.pipeline.transform(lines)?;
        tracing::info!(
            "Graded {} student records ({} non-data lines skipped)",
            conversion.rows.len(),
            conversion.skipped_lines
        );

        // Load
        let output_path = self.pipeline.load(&conversion)?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(RunSummary {
            records: conversion.rows.len(),
            skipped_lines: conversion.skipped_lines,
            output_path,
        })
    }
}
