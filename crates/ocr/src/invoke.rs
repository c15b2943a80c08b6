use image::DynamicImage;
use tracing::warn;

use crate::engine::{EngineError, OcrEngine};
use crate::types::Detection;

/// Hand the normalized image to the OCR engine, exactly once.
///
/// Engines get an RGB raster regardless of the source pixel mode. A failed
/// invocation degrades to an empty detection list with the error carried
/// alongside; downstream stages still run and produce a (mostly empty)
/// record.
pub fn run<E: OcrEngine>(engine: &E, image: &DynamicImage) -> (Vec<Detection>, Option<EngineError>) {
    let rgb = image.to_rgb8();
    match engine.detect(&rgb) {
        Ok(detections) => (detections, None),
        Err(err) => {
            warn!("OCR engine invocation failed, continuing with no detections: {err}");
            (Vec::new(), Some(err))
        }
    }
}
