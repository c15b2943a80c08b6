use crate::types::{AnnotatedDetection, LineItem, StructuredRecord};

/// Marker appended to a line item recognized below the confidence cutoff.
pub const LOW_CONFIDENCE_MARKER: &str = " *";

/// Fallback when the upload surface supplies no usable name.
pub(crate) const UNNAMED: &str = "untitled";

/// Fold annotated detections into the fixed output schema, in order.
///
/// Per detection: `description` is the recognized text, with the marker
/// appended iff the detection was flagged low-confidence; `confidence` is
/// copied verbatim. Semantic fields stay unset; this stage shapes OCR
/// output, it does not interpret it. Zero detections yield a record with an
/// empty line-item list, never an error.
pub fn build_record(
    filename: &str,
    annotated: &[AnnotatedDetection],
    currency: &str,
) -> StructuredRecord {
    let line_items = annotated
        .iter()
        .map(|a| {
            let mut description = a.detection.text.clone();
            if a.low_confidence {
                description.push_str(LOW_CONFIDENCE_MARKER);
            }
            LineItem {
                description,
                confidence: a.detection.confidence,
            }
        })
        .collect();

    let filename = if filename.is_empty() { UNNAMED } else { filename };

    StructuredRecord {
        filename: filename.to_string(),
        vendor_name: None,
        date: None,
        currency: currency.to_string(),
        total_amount: None,
        payment_method: None,
        invoice_number: None,
        line_items,
    }
}
