//! Self-describing configuration schemas
//!
//! Each shape family publishes a `BlockSchema` describing the keys and
//! sub-blocks its configuration block accepts. Schemas exist for validation
//! and for documentation tooling (they serialize to JSON); construction
//! logic reads the raw `Input` directly.
//!
//! Families build their schema once, behind a `OnceLock<Arc<BlockSchema>>`
//! in their `ShapePlugin::schema` accessor, and hand out the same `Arc` on
//! every call.

use crate::ShapeError;
use fermion_core::Input;
use serde::Serialize;

/// One accepted `key = value` entry.
#[derive(Debug, Clone, Serialize)]
pub struct FieldSchema {
    pub key: &'static str,
    pub required: bool,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<&'static str>>,
}

impl FieldSchema {
    pub fn required(key: &'static str, description: &'static str) -> Self {
        Self {
            key,
            required: true,
            description,
            allowed: None,
        }
    }

    pub fn optional(key: &'static str, description: &'static str) -> Self {
        Self {
            key,
            required: false,
            description,
            allowed: None,
        }
    }

    /// Restrict the field to a fixed value set.
    pub fn with_allowed(mut self, values: &[&'static str]) -> Self {
        self.allowed = Some(values.to_vec());
        self
    }
}

/// Schema of one configuration block, including nested sub-blocks.
#[derive(Debug, Clone, Serialize)]
pub struct BlockSchema {
    pub name: &'static str,
    pub fields: Vec<FieldSchema>,
    pub blocks: Vec<BlockSchema>,
}

impl BlockSchema {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
            blocks: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_block(mut self, block: BlockSchema) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn field(&self, key: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Validate an input block against this schema: every required field
    /// must be present, and fields with a fixed value set must hold one of
    /// the allowed values. Sub-block presence is a construction-time
    /// concern (a block may be replaceable by a reference), so nested
    /// schemas are documentation here.
    pub fn check(&self, input: &Input) -> Result<(), ShapeError> {
        for field in &self.fields {
            let value = match input.get_string(field.key) {
                Ok(v) => v,
                Err(_) if !field.required => continue,
                Err(_) => {
                    return Err(ShapeError::invalid(field.key, "required input missing"));
                }
            };
            if let Some(allowed) = &field.allowed {
                if !allowed.iter().any(|a| a.eq_ignore_ascii_case(value)) {
                    return Err(ShapeError::invalid(
                        field.key,
                        format!("'{value}' is not one of {allowed:?}"),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Schema of a generic inner `shape` block: what every family accepts
/// before its own keys. Families nest this under their own schema when they
/// take an inline sub-shape.
pub fn shape_block_schema() -> BlockSchema {
    BlockSchema::new("shape")
        .with_field(FieldSchema::required(
            "library",
            "The shape family used to construct this block.",
        ))
        .with_field(FieldSchema::optional(
            "name",
            "Display name; named shapes can be referenced elsewhere.",
        ))
        .with_block(
            BlockSchema::new("transform")
                .with_field(FieldSchema::optional(
                    "translation",
                    "Translation vector (x y z).",
                ))
                .with_field(FieldSchema::optional(
                    "rotation",
                    "Euler rotation angles in radians (rx ry rz).",
                )),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> BlockSchema {
        BlockSchema::new("shape")
            .with_field(
                FieldSchema::required("library", "Shape family.").with_allowed(&["extended shape"]),
            )
            .with_field(FieldSchema::required("extension", "Interval (z1 z2)."))
            .with_block(shape_block_schema())
    }

    #[test]
    fn check_accepts_valid_input() {
        let input = Input::new("shape")
            .with_entry("library", "extended shape")
            .with_entry("extension", "1 2");
        sample_schema().check(&input).unwrap();
    }

    #[test]
    fn check_rejects_missing_required_field() {
        let input = Input::new("shape").with_entry("library", "extended shape");
        let err = sample_schema().check(&input).unwrap_err();
        assert_eq!(
            err,
            ShapeError::invalid("extension", "required input missing")
        );
    }

    #[test]
    fn check_rejects_disallowed_value() {
        let input = Input::new("shape")
            .with_entry("library", "mystery shape")
            .with_entry("extension", "1 2");
        assert!(matches!(
            sample_schema().check(&input),
            Err(ShapeError::InvalidConfiguration { field, .. }) if field == "library"
        ));
    }

    #[test]
    fn allowed_values_match_case_insensitively() {
        let input = Input::new("shape")
            .with_entry("library", "Extended Shape")
            .with_entry("extension", "1 2");
        sample_schema().check(&input).unwrap();
    }

    #[test]
    fn schema_serializes_for_tooling() {
        let json = serde_json::to_value(sample_schema()).unwrap();
        assert_eq!(json["name"], "shape");
        assert_eq!(json["blocks"][0]["fields"][0]["key"], "library");
    }
}
