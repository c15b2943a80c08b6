use std::path::Path;

use resit_core::PipelineConfig;
use thiserror::Error;

use crate::annotate;
use crate::engine::OcrEngine;
use crate::invoke;
use crate::orient::{self, DecodeError};
use crate::preprocess;
use crate::record;
use crate::types::StructuredRecord;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image decode failed: {0}")]
    Decode(#[from] DecodeError),
}

/// The outcome of one pipeline run.
///
/// `engine_error` carries the warning for a run that degraded to empty
/// output; the record is present either way.
#[derive(Debug)]
pub struct ScanOutcome {
    pub record: StructuredRecord,
    pub engine_error: Option<String>,
}

/// Orchestrates: decode + orientation → size bound → OCR → annotate → record.
///
/// One invocation owns its image and detections exclusively; the engine is
/// only borrowed, so a `Send + Sync` engine instance may serve concurrent
/// invocations.
pub struct ReceiptPipeline<E: OcrEngine> {
    engine: E,
    config: PipelineConfig,
}

impl<E: OcrEngine> ReceiptPipeline<E> {
    pub fn new(engine: E, config: PipelineConfig) -> Self {
        Self { engine, config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process one uploaded image into a structured record.
    ///
    /// Decode failure is the only fatal error. An engine failure yields a
    /// record with no line items plus the reported error; the same
    /// `threshold` drives both the low-confidence flag and the display
    /// marker, so the two cannot diverge within a run.
    pub fn scan_bytes(
        &self,
        data: &[u8],
        filename: &str,
        threshold: f32,
    ) -> Result<ScanOutcome, PipelineError> {
        let upright = orient::load_upright(data)?;
        let bounded = preprocess::bound_size(upright, self.config.max_dimension);
        let (detections, engine_error) = invoke::run(&self.engine, &bounded);
        let annotated = annotate::annotate(detections, threshold);
        let record = record::build_record(filename, &annotated, &self.config.currency);
        Ok(ScanOutcome {
            record,
            engine_error: engine_error.map(|e| e.to_string()),
        })
    }

    /// Process a file on disk, deriving the record's filename from the path.
    pub fn scan_path(&self, path: &Path, threshold: f32) -> Result<ScanOutcome, PipelineError> {
        let data = std::fs::read(path)?;
        let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        self.scan_bytes(&data, filename, threshold)
    }
}
