pub mod job;

pub use job::{ExportHandle, ExportReport, ExportStatus, ExportTarget};
