//! JSON configuration transform core
//!
//! Two components composed in one synchronous pass:
//! - the directive parser, which extracts bracketed operation tags from
//!   override property names
//! - the merge engine, which walks the baseline and override documents
//!   together and produces the merged output

mod directive;
mod engine;
mod errors;

pub use directive::{parse_key, DirectiveKind, ParsedKey};
pub use engine::{transform, TransformOptions};
pub use errors::TransformError;
