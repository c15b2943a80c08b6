use image::RgbImage;
use thiserror::Error;

use crate::types::Detection;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine rejected input: {0}")]
    Input(String),
    #[error("engine failure: {0}")]
    Backend(String),
}

/// Abstraction over an external OCR engine.
///
/// Implementations take an RGB raster and return detections in the engine's
/// own order (typically reading order, but not guaranteed). Model loading,
/// warm-up, and device selection are the implementor's concern; the
/// pipeline only borrows a ready instance. `detect` may be called from
/// concurrent invocations and must be reentrant.
pub trait OcrEngine: Send + Sync {
    fn detect(&self, image: &RgbImage) -> Result<Vec<Detection>, EngineError>;
}

// ── Fixture engines (always available, used for tests) ───────────────────────

/// Returns a preset detection list, letting the pipeline be exercised
/// without any OCR model installed.
pub struct FixtureEngine {
    detections: Vec<Detection>,
}

impl FixtureEngine {
    pub fn new(detections: Vec<Detection>) -> Self {
        Self { detections }
    }
}

impl OcrEngine for FixtureEngine {
    fn detect(&self, _image: &RgbImage) -> Result<Vec<Detection>, EngineError> {
        Ok(self.detections.clone())
    }
}

/// Always fails; simulates an engine outage or a rejected input.
pub struct FailingEngine {
    message: String,
}

impl FailingEngine {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl OcrEngine for FailingEngine {
    fn detect(&self, _image: &RgbImage) -> Result<Vec<Detection>, EngineError> {
        Err(EngineError::Backend(self.message.clone()))
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use image::RgbImage;
    use leptess::LepTess;
    use resit_core::Quad;

    use super::{EngineError, OcrEngine};
    use crate::types::Detection;

    /// Tesseract-backed engine. Each `detect` call spins up a fresh
    /// `LepTess`, so the engine stays reentrant across invocations.
    pub struct TesseractEngine {
        data_path: Option<String>,
        lang: String,
    }

    impl TesseractEngine {
        /// `languages` are joined with `+`, Tesseract's multi-language form.
        pub fn new(data_path: Option<String>, languages: &[String]) -> Self {
            Self {
                data_path,
                lang: languages.join("+"),
            }
        }
    }

    impl OcrEngine for TesseractEngine {
        fn detect(&self, image: &RgbImage) -> Result<Vec<Detection>, EngineError> {
            let mut lt = LepTess::new(self.data_path.as_deref(), &self.lang)
                .map_err(|e| EngineError::Backend(e.to_string()))?;
            let png = encode_png(image)?;
            lt.set_image_from_mem(&png)
                .map_err(|e| EngineError::Input(e.to_string()))?;
            let tsv = lt
                .get_tsv_text(0)
                .map_err(|e| EngineError::Backend(e.to_string()))?;
            Ok(lines_from_tsv(&tsv))
        }
    }

    fn encode_png(image: &RgbImage) -> Result<Vec<u8>, EngineError> {
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgb8(image.clone())
            .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
            .map_err(|e| EngineError::Input(e.to_string()))?;
        Ok(buf)
    }

    struct LineAccum {
        key: (u32, u32, u32),
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
        conf_sum: f32,
        words: Vec<String>,
    }

    impl LineAccum {
        fn open(key: (u32, u32, u32), left: f32, top: f32, width: f32, height: f32) -> Self {
            Self {
                key,
                left,
                top,
                right: left + width,
                bottom: top + height,
                conf_sum: 0.0,
                words: Vec::new(),
            }
        }

        fn finish(self) -> Detection {
            let confidence = self.conf_sum / self.words.len() as f32 / 100.0;
            Detection::new(
                Quad::from_rect(
                    self.left,
                    self.top,
                    self.right - self.left,
                    self.bottom - self.top,
                ),
                self.words.join(" "),
                confidence,
            )
        }
    }

    /// Fold Tesseract's word-level TSV rows into one detection per text
    /// line. Columns: level page block par line word left top width height
    /// conf text; word rows are level 5, structural rows carry conf -1.
    fn lines_from_tsv(tsv: &str) -> Vec<Detection> {
        let mut out = Vec::new();
        let mut current: Option<LineAccum> = None;

        for row in tsv.lines() {
            let cols: Vec<&str> = row.split('\t').collect();
            if cols.len() < 12 || cols[0] != "5" {
                continue;
            }
            let conf: f32 = match cols[10].parse() {
                Ok(c) => c,
                Err(_) => continue,
            };
            if conf < 0.0 {
                continue;
            }
            let text = cols[11].trim();
            if text.is_empty() {
                continue;
            }
            let geom: Vec<f32> = cols[6..10].iter().filter_map(|c| c.parse().ok()).collect();
            let [left, top, width, height] = match geom[..] {
                [l, t, w, h] => [l, t, w, h],
                _ => continue,
            };
            let key = (
                cols[2].parse().unwrap_or(0),
                cols[3].parse().unwrap_or(0),
                cols[4].parse().unwrap_or(0),
            );

            let mut acc = match current.take() {
                Some(acc) if acc.key == key => acc,
                Some(acc) => {
                    out.push(acc.finish());
                    LineAccum::open(key, left, top, width, height)
                }
                None => LineAccum::open(key, left, top, width, height),
            };
            acc.left = acc.left.min(left);
            acc.top = acc.top.min(top);
            acc.right = acc.right.max(left + width);
            acc.bottom = acc.bottom.max(top + height);
            acc.conf_sum += conf;
            acc.words.push(text.to_string());
            current = Some(acc);
        }
        if let Some(acc) = current.take() {
            out.push(acc.finish());
        }
        out
    }

}
