pub mod analyze;
pub mod cancel;
pub mod model;
pub mod parser;
pub mod token;

pub use cancel::{CancelToken, Cancelled};
pub use model::{Model, ModelBuilder};
pub use parser::{Parser, parse, parse_with_cancel};
