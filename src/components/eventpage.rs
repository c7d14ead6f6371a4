//! Event page component.
//!
//! A map event shows one page at a time. The page carries the ordered list of
//! editor commands authored for it; the leading comment commands hold the
//! JSON configuration read by
//! [`collect_comments`](crate::systems::comments::collect_comments).
//!
//! The command layout mirrors the map editor's data format:
//!
//! ```json
//! { "list": [
//!     { "code": 108, "indent": 0, "parameters": ["{'type':'accessories',"] },
//!     { "code": 408, "indent": 0, "parameters": ["'layers':[]}"] },
//!     { "code": 0, "indent": 0, "parameters": [] }
//! ] }
//! ```
//!
//! Replacing or mutating the component marks the page as (re)established; the
//! [`page_setup_system`](crate::systems::comments::page_setup_system) picks
//! that up through change detection.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Command code of the first line of an editor comment.
pub const COMMENT_START: i32 = 108;
/// Command code of every following line of the same editor comment.
pub const COMMENT_CONTINUATION: i32 = 408;
/// Command code terminating every page list.
pub const END_OF_LIST: i32 = 0;

/// A single editor command on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageCommand {
    pub code: i32,
    #[serde(default)]
    pub indent: i32,
    #[serde(default)]
    pub parameters: Vec<Value>,
}

impl PageCommand {
    pub fn new(code: i32, parameters: Vec<Value>) -> Self {
        Self {
            code,
            indent: 0,
            parameters,
        }
    }

    /// A comment-start line.
    pub fn comment(text: impl Into<String>) -> Self {
        Self::new(COMMENT_START, vec![Value::String(text.into())])
    }

    /// A comment-continuation line.
    pub fn continuation(text: impl Into<String>) -> Self {
        Self::new(COMMENT_CONTINUATION, vec![Value::String(text.into())])
    }

    /// The list terminator.
    pub fn end() -> Self {
        Self::new(END_OF_LIST, Vec::new())
    }

    /// Text payload of the command: its first parameter when that is a string.
    pub fn text(&self) -> &str {
        self.parameters
            .first()
            .and_then(Value::as_str)
            .unwrap_or("")
    }
}

/// The page currently shown by a map event.
#[derive(Component, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPage {
    #[serde(default)]
    pub list: Vec<PageCommand>,
}

impl EventPage {
    pub fn new(list: Vec<PageCommand>) -> Self {
        Self { list }
    }

    /// Load a page from a JSON file in the editor format.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read page file {:?}: {}", path, e))?;
        serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse page file {:?}: {}", path, e))
    }
}
