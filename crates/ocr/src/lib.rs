pub mod annotate;
pub mod engine;
pub mod invoke;
pub mod orient;
pub mod pipeline;
pub mod preprocess;
pub mod record;
pub mod types;

pub use annotate::annotate;
pub use engine::{EngineError, FailingEngine, FixtureEngine, OcrEngine};
pub use orient::{load_upright, DecodeError};
pub use pipeline::{PipelineError, ReceiptPipeline, ScanOutcome};
pub use preprocess::bound_size;
pub use record::{build_record, LOW_CONFIDENCE_MARKER};
pub use types::{AnnotatedDetection, Detection, LineItem, StructuredRecord};
