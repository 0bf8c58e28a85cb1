//! Tool catalogue
//!
//! Names, descriptions and input schemas reported by `tools/list`.

use serde::Serialize;
use serde_json::{Value, json};

use crate::protocol::commands::{LIST_TOOL, WRITE_TOOL};

#[derive(Debug, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Every tool the server exposes.
pub fn tool_definitions(default_limit: usize) -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: WRITE_TOOL,
            description: "Write text content to a Markdown (.md) file under the storage root. \
                          Refuses to replace an existing file unless overwrite is true.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "content": {
                        "type": "string",
                        "description": "Text to write as the document body"
                    },
                    "filename": {
                        "type": "string",
                        "description": "File name without directories; .md is appended if missing"
                    },
                    "title": {
                        "type": ["string", "null"],
                        "description": "Optional document title, ideally date plus topic",
                        "default": null
                    },
                    "overwrite": {
                        "type": "boolean",
                        "description": "Replace an existing file. Never set unless asked to.",
                        "default": false
                    },
                    "subfolder": {
                        "type": "string",
                        "description": "Optional folder relative to the storage root",
                        "default": ""
                    }
                },
                "required": ["content", "filename"]
            }),
        },
        ToolDefinition {
            name: LIST_TOOL,
            description: "List recently modified Markdown files, newest first.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "limit": {
                        "type": "integer",
                        "description": "Maximum number of files to return; a negative value drops that many of the oldest",
                        "default": default_limit
                    },
                    "subfolder": {
                        "type": "string",
                        "description": "Optional folder relative to the storage root",
                        "default": ""
                    }
                }
            }),
        },
    ]
}
