//! Recursive merge engine
//!
//! Walks the baseline and override documents together, mutating the output
//! in place. Two passes per level:
//! - Pass 1 over baseline keys: recurse when both sides are objects,
//!   otherwise the override value replaces wholesale (arrays included).
//! - Pass 2 over override keys: apply directive-tagged operations and add
//!   keys the output does not have yet.
//!
//! Pass 1 always precedes pass 2 so directives see a fully base-merged
//! output.

use serde_json::{Map, Value};
use tracing::debug;

use super::directive::{parse_key, DirectiveKind, ParsedKey};
use super::errors::TransformError;

/// Options for a single transform invocation
#[derive(Debug, Clone, Default)]
pub struct TransformOptions {
    /// Narrate every merge decision at debug level
    pub log_enabled: bool,
}

/// Merge `overrides` onto `base`, returning the merged document.
///
/// The output starts as a clone of `base`. Override values win for scalars
/// and arrays, objects merge recursively, and directive-tagged override
/// keys apply their operation to the output instead of replacing a value.
/// If either top-level value is not an object the override wins wholesale,
/// consistent with the replace rule for mismatched shapes.
pub fn transform(
    base: &Value,
    overrides: &Value,
    options: &TransformOptions,
) -> Result<Value, TransformError> {
    match (base, overrides) {
        (Value::Object(base_map), Value::Object(override_map)) => {
            let mut output = base_map.clone();
            merge_level(base_map, override_map, &mut output, options)?;
            Ok(Value::Object(output))
        }
        _ => Ok(overrides.clone()),
    }
}

/// One recursion level of the merge. `output` starts base-derived at every
/// level, so pass 2 directives always operate on a fully merged value.
fn merge_level(
    base: &Map<String, Value>,
    override_map: &Map<String, Value>,
    output: &mut Map<String, Value>,
    options: &TransformOptions,
) -> Result<(), TransformError> {
    // Pass 1: every baseline key, override winning where present.
    for (key, base_value) in base {
        let Some(override_value) = override_map.get(key) else {
            if options.log_enabled {
                debug!("base property '{}' not present on override", key);
            }
            continue;
        };

        match (base_value, override_value) {
            (Value::Object(base_inner), Value::Object(override_inner)) => {
                if options.log_enabled {
                    debug!("base property '{}': object, merging recursively", key);
                }
                match output.get_mut(key) {
                    Some(Value::Object(output_inner)) => {
                        merge_level(base_inner, override_inner, output_inner, options)?;
                    }
                    _ => {
                        output.insert(key.clone(), Value::Object(override_inner.clone()));
                    }
                }
            }
            // Scalars, arrays, and shape mismatches replace wholesale.
            _ => {
                if options.log_enabled {
                    debug!("base property '{}': value replaced by override", key);
                }
                output.insert(key.clone(), override_value.clone());
            }
        }
    }

    // Pass 2: every override key, directives included.
    for (key, override_value) in override_map {
        let ParsedKey {
            directive,
            plain_name,
        } = parse_key(key);

        match directive {
            Some(DirectiveKind::Remove) => {
                if options.log_enabled {
                    debug!("removing property '{}' from output", plain_name);
                }
                if output.shift_remove(&plain_name).is_none() {
                    return Err(TransformError::DirectiveTargetMissing {
                        name: plain_name,
                        directive: "remove",
                    });
                }
            }
            Some(DirectiveKind::Append) => {
                apply_append(&plain_name, override_value, output, options)?;
            }
            Some(DirectiveKind::MatchSet { field }) => {
                apply_match_set(&plain_name, &field, override_value, output, options)?;
            }
            None => {
                if output.contains_key(key) {
                    if options.log_enabled {
                        debug!("override property '{}' already exists on output", key);
                    }
                } else {
                    if options.log_enabled {
                        debug!("override property '{}' added to output", key);
                    }
                    output.insert(key.clone(), override_value.clone());
                }
            }
        }
    }

    Ok(())
}

/// Append every element of the override array to the output array, in
/// order, without deduplication.
fn apply_append(
    name: &str,
    override_value: &Value,
    output: &mut Map<String, Value>,
    options: &TransformOptions,
) -> Result<(), TransformError> {
    let elements = override_value.as_array().ok_or_else(|| {
        TransformError::InvalidDirectiveTarget {
            name: name.to_string(),
            directive: "append",
            reason: "override value is not an array".to_string(),
        }
    })?;

    let target = match output.get_mut(name) {
        None => {
            return Err(TransformError::DirectiveTargetMissing {
                name: name.to_string(),
                directive: "append",
            })
        }
        Some(Value::Array(target)) => target,
        Some(_) => {
            return Err(TransformError::InvalidDirectiveTarget {
                name: name.to_string(),
                directive: "append",
                reason: "output property is not an array".to_string(),
            })
        }
    };

    if options.log_enabled {
        debug!("appending {} element(s) to '{}'", elements.len(), name);
    }
    target.extend(elements.iter().cloned());
    Ok(())
}

/// Patch every output array item whose match-field value equals an
/// override item's, case-insensitively. Zero matches is a silent no-op;
/// no new item is ever inserted.
fn apply_match_set(
    name: &str,
    field: &str,
    override_value: &Value,
    output: &mut Map<String, Value>,
    options: &TransformOptions,
) -> Result<(), TransformError> {
    let patches = override_value.as_array().ok_or_else(|| {
        TransformError::InvalidDirectiveTarget {
            name: name.to_string(),
            directive: "match",
            reason: "override value is not an array".to_string(),
        }
    })?;

    let target = match output.get_mut(name) {
        None => {
            return Err(TransformError::DirectiveTargetMissing {
                name: name.to_string(),
                directive: "match",
            })
        }
        Some(Value::Array(target)) => target,
        Some(_) => {
            return Err(TransformError::InvalidDirectiveTarget {
                name: name.to_string(),
                directive: "match",
                reason: "output property is not an array".to_string(),
            })
        }
    };

    for patch in patches {
        let patch_object =
            patch
                .as_object()
                .ok_or_else(|| TransformError::InvalidDirectiveTarget {
                    name: name.to_string(),
                    directive: "match",
                    reason: "match items must be objects".to_string(),
                })?;
        let wanted =
            patch_object
                .get(field)
                .ok_or_else(|| TransformError::InvalidDirectiveTarget {
                    name: name.to_string(),
                    directive: "match",
                    reason: format!("match item lacks field '{}'", field),
                })?;

        // Every matching item is patched, not just the first.
        for item in target.iter_mut() {
            let Some(item_object) = item.as_object_mut() else {
                continue;
            };
            let Some(candidate) = item_object.get(field) else {
                continue;
            };
            if values_match(candidate, wanted) {
                if options.log_enabled {
                    debug!("patching '{}' item where {} = {}", name, field, wanted);
                }
                for (patch_key, patch_value) in patch_object {
                    item_object.insert(patch_key.clone(), patch_value.clone());
                }
            }
        }
    }

    Ok(())
}

/// Match-field equality: case-insensitive for strings, structural
/// equality for everything else.
fn values_match(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::String(a), Value::String(b)) => a.to_lowercase() == b.to_lowercase(),
        _ => a == b,
    }
}
