pub use self::engine::Sanitizer;
pub use self::report::{SanitizeReport, Sanitized};

pub(crate) mod cursor;
mod attributes;
mod engine;
mod report;
pub(crate) mod scanner;
mod skipper;
