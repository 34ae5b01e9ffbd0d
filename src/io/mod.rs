//! Export side channel: the HTTP exporter and its background runner.

pub mod export;
pub mod async_export;

pub use export::{
    filename_from_disposition, ExportCallback, ExportHandler, ExportOutcome, ExportRequest, HttpExporter,
    DEFAULT_EXPORT_FILENAME,
};
pub use async_export::{ExportController, ExportResult};
