use crate::types::{AnnotatedDetection, Detection};

/// Flag each detection against the confidence cutoff.
///
/// Strictly below the threshold counts as low confidence; a detection
/// sitting exactly at the threshold is acceptable. Length and order are
/// preserved, and nothing is ever dropped here, however weak the detection.
pub fn annotate(detections: Vec<Detection>, threshold: f32) -> Vec<AnnotatedDetection> {
    detections
        .into_iter()
        .map(|detection| {
            let low_confidence = detection.confidence < threshold;
            AnnotatedDetection {
                detection,
                low_confidence,
            }
        })
        .collect()
}
