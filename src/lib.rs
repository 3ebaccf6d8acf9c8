//! json-config-transform - environment-specific JSON configuration merging
//!
//! Merges a baseline JSON configuration document with an environment-specific
//! override document. Plain override values replace baseline values (objects
//! merge recursively, arrays replace wholesale); override property names may
//! instead carry a bracketed directive tag requesting removal
//! (`[transform:remove]`), array append (`[transform:append]`), or keyed
//! array patching (`[transform:match:<field>]`).

pub mod document;
pub mod settings;
pub mod transform;

pub use document::{load, render, write, DocumentError};
pub use settings::{Options, Settings, SettingsError};
pub use transform::{parse_key, transform, DirectiveKind, ParsedKey, TransformError, TransformOptions};
