//! Block schemas and partial content extraction
//!
//! Each schema lists the attributes and nested blocks a block type is
//! expected to contain. [`partial_content`] pulls the listed content out of a
//! body and hands back everything else untouched, so unknown content is
//! never an error.

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use hcl::{Attribute, Block, Body, Structure};
use std::collections::HashMap;

/// Expected attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSchema {
    pub name: &'static str,
    pub required: bool,
}

impl AttributeSchema {
    pub const fn optional(name: &'static str) -> Self {
        Self { name, required: false }
    }
}

/// Expected nested block header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeaderSchema {
    pub block_type: &'static str,
    pub label_names: &'static [&'static str],
}

impl BlockHeaderSchema {
    pub const fn new(block_type: &'static str, label_names: &'static [&'static str]) -> Self {
        Self { block_type, label_names }
    }
}

/// Expected content of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodySchema {
    pub attributes: &'static [AttributeSchema],
    pub blocks: &'static [BlockHeaderSchema],
}

impl BodySchema {
    pub fn attribute(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn block(&self, block_type: &str) -> Option<&BlockHeaderSchema> {
        self.blocks.iter().find(|b| b.block_type == block_type)
    }
}

// ============================================================
// Registry
// ============================================================

pub static ROOT_SCHEMA: BodySchema = BodySchema {
    attributes: &[],
    blocks: &[
        BlockHeaderSchema::new("terraform", &[]),
        BlockHeaderSchema::new("variable", &["name"]),
        BlockHeaderSchema::new("output", &["name"]),
        BlockHeaderSchema::new("provider", &["name"]),
        BlockHeaderSchema::new("resource", &["type", "name"]),
        BlockHeaderSchema::new("data", &["type", "name"]),
        BlockHeaderSchema::new("module", &["name"]),
    ],
};

pub static TERRAFORM_BLOCK_SCHEMA: BodySchema = BodySchema {
    attributes: &[AttributeSchema::optional("required_version")],
    blocks: &[
        BlockHeaderSchema::new("required_providers", &[]),
        BlockHeaderSchema::new("backend", &["name"]),
    ],
};

pub static PROVIDER_CONFIG_SCHEMA: BodySchema = BodySchema {
    attributes: &[
        AttributeSchema::optional("version"),
        AttributeSchema::optional("alias"),
    ],
    blocks: &[],
};

/// Attributes of every supported backend kind. Shared by all kinds so an
/// attribute that belongs to another kind is never reported.
pub static BACKEND_CONFIG_SCHEMA: BodySchema = BodySchema {
    attributes: &[
        AttributeSchema::optional("bucket"),
        AttributeSchema::optional("key"),
        AttributeSchema::optional("region"),
        AttributeSchema::optional("dynamodb_table"),
        AttributeSchema::optional("path"),
    ],
    blocks: &[],
};

pub static VARIABLE_SCHEMA: BodySchema = BodySchema {
    attributes: &[
        AttributeSchema::optional("type"),
        AttributeSchema::optional("description"),
        AttributeSchema::optional("default"),
        AttributeSchema::optional("sensitive"),
    ],
    blocks: &[],
};

pub static OUTPUT_SCHEMA: BodySchema = BodySchema {
    attributes: &[
        AttributeSchema::optional("description"),
        AttributeSchema::optional("sensitive"),
    ],
    blocks: &[],
};

pub static MODULE_CALL_SCHEMA: BodySchema = BodySchema {
    attributes: &[
        AttributeSchema::optional("source"),
        AttributeSchema::optional("version"),
        AttributeSchema::optional("providers"),
    ],
    blocks: &[],
};

pub static RESOURCE_SCHEMA: BodySchema = BodySchema {
    attributes: &[AttributeSchema::optional("provider")],
    blocks: &[],
};

/// Body schema for a block type found at the top level or inside a
/// `terraform` block
pub fn schema_for(block_type: &str) -> Option<&'static BodySchema> {
    match block_type {
        "terraform" => Some(&TERRAFORM_BLOCK_SCHEMA),
        "backend" => Some(&BACKEND_CONFIG_SCHEMA),
        "provider" => Some(&PROVIDER_CONFIG_SCHEMA),
        "variable" => Some(&VARIABLE_SCHEMA),
        "output" => Some(&OUTPUT_SCHEMA),
        "module" => Some(&MODULE_CALL_SCHEMA),
        "resource" | "data" => Some(&RESOURCE_SCHEMA),
        _ => None,
    }
}

// ============================================================
// Extraction
// ============================================================

/// Content of a body matched by a schema
#[derive(Debug, Default)]
pub struct BodyContent<'a> {
    pub attributes: HashMap<&'static str, &'a Attribute>,
    pub blocks: Vec<&'a Block>,
}

impl<'a> BodyContent<'a> {
    pub fn attribute(&self, name: &str) -> Option<&'a Attribute> {
        self.attributes.get(name).copied()
    }

    pub fn blocks_of<'s>(&'s self, block_type: &'s str) -> impl Iterator<Item = &'a Block> + 's {
        self.blocks
            .iter()
            .copied()
            .filter(move |b| b.identifier() == block_type)
    }
}

/// Result of [`partial_content`]
#[derive(Debug, Default)]
pub struct PartialContent<'a> {
    pub content: BodyContent<'a>,
    /// Structures the schema did not claim, in source order
    pub remain: Vec<&'a Structure>,
    pub diagnostics: Diagnostics,
}

/// Extract the content of `body` described by `schema`.
///
/// Attributes and blocks the schema does not name end up in `remain`.
/// A repeated attribute keeps its first definition. Blocks with the wrong
/// number of labels are dropped.
pub fn partial_content<'a>(body: &'a Body, schema: &BodySchema) -> PartialContent<'a> {
    let mut result = PartialContent::default();

    for structure in body.iter() {
        match structure {
            Structure::Attribute(attr) => match schema.attribute(attr.key()) {
                Some(attr_schema) => {
                    if result.content.attributes.contains_key(attr_schema.name) {
                        result.diagnostics.error(DiagnosticKind::DuplicateAttribute {
                            name: attr_schema.name.to_string(),
                        });
                        continue;
                    }
                    result.content.attributes.insert(attr_schema.name, attr);
                }
                None => result.remain.push(structure),
            },
            Structure::Block(block) => match schema.block(block.identifier()) {
                Some(header) => {
                    let got = block.labels().len();
                    let expected = header.label_names.len();
                    if got != expected {
                        tracing::warn!(
                            "Dropping \"{}\" block with {} labels (expected {})",
                            header.block_type,
                            got,
                            expected
                        );
                        let kind = if got == 0 {
                            DiagnosticKind::MissingLabel {
                                block_type: header.block_type.to_string(),
                            }
                        } else {
                            DiagnosticKind::LabelCount {
                                block_type: header.block_type.to_string(),
                                expected,
                                got,
                            }
                        };
                        result.diagnostics.error(kind);
                        continue;
                    }
                    result.content.blocks.push(block);
                }
                None => result.remain.push(structure),
            },
        }
    }

    for attr_schema in schema.attributes.iter().filter(|a| a.required) {
        if !result.content.attributes.contains_key(attr_schema.name) {
            result.diagnostics.error(DiagnosticKind::MissingAttribute {
                name: attr_schema.name.to_string(),
            });
        }
    }

    result
}
