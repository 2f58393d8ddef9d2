mod analysis;
mod config;
mod entry;
mod error;
mod state;

pub use analysis::DiagnosticsPublisher;
pub use config::{CONFIG_SECTION, ServerConfig};
pub use entry::init_tracing;
pub use error::AnalysisError;
pub use state::DocumentStore;
