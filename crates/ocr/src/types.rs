use resit_core::Quad;
use serde::{Deserialize, Serialize};

/// One OCR engine result: where the text sits, what it reads as, and how
/// sure the engine is (0.0 = guessed, 1.0 = certain).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub bbox: Quad,
    pub text: String,
    pub confidence: f32,
}

impl Detection {
    pub fn new(bbox: Quad, text: impl Into<String>, confidence: f32) -> Self {
        Self {
            bbox,
            text: text.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// A detection plus its threshold verdict. The detection itself is never
/// altered; annotation only adds metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedDetection {
    pub detection: Detection,
    pub low_confidence: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub confidence: f32,
}

/// The pipeline's output schema.
///
/// Semantic fields stay `None` here; populating them belongs to a
/// downstream enrichment stage, not this pipeline. Unset fields serialize
/// as JSON `null` rather than being omitted, so the schema shape is stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredRecord {
    pub filename: String,
    pub vendor_name: Option<String>,
    pub date: Option<String>,
    pub currency: String,
    pub total_amount: Option<f64>,
    pub payment_method: Option<String>,
    pub invoice_number: Option<String>,
    pub line_items: Vec<LineItem>,
}
