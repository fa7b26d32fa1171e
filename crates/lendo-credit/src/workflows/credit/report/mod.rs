mod decision;
pub mod export;
mod justification;
pub mod views;

pub use decision::DecisionResult;
pub use export::{write_csv, ExportError};
pub use views::SummaryPayload;

pub(crate) use decision::assemble;
