pub mod errors;

pub use errors::{AuditorError, Result};
