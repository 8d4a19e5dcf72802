//! JSON Schema generation for program files.
//!
//! This module generates a JSON Schema (Draft-07) for the program file
//! format, enabling editor autocomplete and validation while authoring
//! requirement trees.

use serde_json::{json, Value};

/// Generates JSON Schema for program files.
pub struct SchemaGenerator;

impl SchemaGenerator {
    /// Create a new schema generator.
    pub fn new() -> Self {
        Self
    }

    /// Generate the complete JSON Schema for a program file.
    pub fn generate(&self) -> Value {
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "title": "Degree Program",
            "description": "A degree or minor program and its requirement tree",
            "type": "object",
            "required": ["name", "requirements"],
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Program name"
                },
                "kind": {
                    "type": "string",
                    "enum": ["major", "minor"],
                    "default": "major"
                },
                "total_credits": {
                    "type": "integer",
                    "minimum": 0,
                    "description": "Published credit total, reported as-is"
                },
                "requirements": {
                    "type": "array",
                    "items": self.category_schema()
                },
                "footnotes": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "required": ["number", "text"],
                        "properties": {
                            "number": { "type": "integer", "minimum": 0 },
                            "text": { "type": "string" }
                        }
                    }
                },
                "shared_groups": {
                    "type": "object",
                    "description": "Named groups referenced by group_ref nodes",
                    "additionalProperties": { "$ref": "#/definitions/node" }
                }
            },
            "definitions": {
                "node": self.node_schema()
            }
        })
    }

    /// Generate schema for a requirement category.
    fn category_schema(&self) -> Value {
        json!({
            "type": "object",
            "required": ["name", "courses"],
            "properties": {
                "name": { "type": "string" },
                "minCredits": { "type": "integer", "minimum": 0 },
                "courses": {
                    "type": "array",
                    "items": { "$ref": "#/definitions/node" }
                }
            }
        })
    }

    /// Generate schema for a requirement node.
    fn node_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "courseType": {
                    "type": "string",
                    "enum": ["regular", "flexible", "and_group", "or_group", "selection", "group_ref"],
                    "default": "regular",
                    "description": "Kind of requirement"
                },
                "code": {
                    "type": "string",
                    "description": "Course code, e.g. CS 1331"
                },
                "title": { "type": "string" },
                "text": {
                    "type": "string",
                    "description": "Description of a flexible requirement"
                },
                "credits": {
                    "type": "integer",
                    "description": "Credits; 0 or absent means 3"
                },
                "isOption": { "type": "boolean" },
                "courses": {
                    "type": "array",
                    "items": { "$ref": "#/definitions/node" }
                },
                "options": {
                    "type": "array",
                    "items": { "$ref": "#/definitions/node" }
                },
                "selectionCount": {
                    "type": "integer",
                    "minimum": 1
                },
                "ref": {
                    "type": "string",
                    "description": "Shared group name for group_ref nodes"
                },
                "groupId": { "type": "string" },
                "footnoteRefs": {
                    "type": "array",
                    "items": { "type": "integer", "minimum": 0 }
                }
            }
        })
    }
}

impl Default for SchemaGenerator {
    fn default() -> Self {
        Self::new()
    }
}
