//! Configuration utility types.
//!
//! | Module   | Purpose                                      |
//! |----------|----------------------------------------------|
//! | `error`  | Error taxonomy and collected diagnostics     |
//! | `field`  | Slash-joined locators into the declaration   |

mod error;
mod field;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, ErrorCode};
pub use field::FieldPath;
