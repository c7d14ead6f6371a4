//! Comment configuration extraction.
//!
//! Level designers configure map events by writing JSON into editor comments
//! at the top of an event page. This module reassembles those comment lines
//! into blocks, keeps the blocks that look like configuration objects, and
//! applies the `"accessories"` configuration to the event.
//!
//! # Block rules
//!
//! - A comment whose first line starts with `//` or `---` is a separator: it
//!   closes the block collected so far.
//! - Comments with no separator between them are merged into one block.
//!   Two JSON objects written in adjacent comments therefore end up
//!   concatenated and fail to parse; authors must separate them.
//! - Continuation lines starting with a separator marker are skipped.
//! - Scanning stops at the first non-comment command after some comment text
//!   was collected. Only the leading comment run of a page is read.
//!
//! Every block has its single quotes turned into double quotes, then must
//! contain a `"type": "` key, be wrapped in `{ }`, and parse as JSON. Blocks
//! failing any check are dropped; extraction itself never fails.
//!
//! # Example
//!
//! ```text
//! Comment: {'type': 'accessories',
//!        :  'layers': [{'image': '!Dog', 'pattern': 'dogmeatSmallEyes'}]}
//! Comment: ---
//! Comment: {'type': 'lighting', 'radius': 3}
//! ```

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, warn};
use serde_json::Value;

use crate::components::accessories::{Accessories, AccessoryDescriptor};
use crate::components::eventpage::{COMMENT_CONTINUATION, COMMENT_START, EventPage};
use crate::events::pagesetup::PageSetupEvent;

/// `type` value of the configuration consumed by the accessory engine.
pub const ACCESSORIES_TYPE: &str = "accessories";

/// Whether a comment line acts as a block separator.
pub fn is_separator_comment(text: &str) -> bool {
    text.starts_with("//") || text.starts_with("---")
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// `"type"`, optional blanks, `:`, optional blanks, then an opening quote.
fn has_type_key(text: &str) -> bool {
    text.match_indices("\"type\"").any(|(at, key)| {
        text[at + key.len()..]
            .trim_start_matches(is_blank)
            .strip_prefix(':')
            .is_some_and(|rest| rest.trim_start_matches(is_blank).starts_with('"'))
    })
}

/// A single line that is `{ ... }` with only blanks around it.
fn is_wrapped_in_braces(text: &str) -> bool {
    if text.contains(is_line_terminator) {
        return false;
    }
    let trimmed = text.trim_matches(is_blank);
    trimmed.len() >= 2 && trimmed.starts_with('{') && trimmed.ends_with('}')
}

/// Parse a block if it passes every validation rule.
pub fn parse_comment(text: &str) -> Option<Value> {
    if !has_type_key(text) {
        debug!("Dropping comment block without a \"type\" key: {}", text);
        return None;
    }
    if !is_wrapped_in_braces(text) {
        debug!("Dropping comment block not wrapped in braces: {}", text);
        return None;
    }
    match serde_json::from_str(text) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("Dropping comment block with invalid JSON ({}): {}", e, text);
            None
        }
    }
}

/// Whether a block would be kept by [`collect_comments`].
pub fn is_valid_comment(text: &str) -> bool {
    parse_comment(text).is_some()
}

/// Extract the configuration objects written in the page's leading comments.
pub fn collect_comments(page: &EventPage) -> Vec<Value> {
    let mut blocks: Vec<String> = Vec::new();
    let mut current = String::new();

    for command in &page.list {
        let text = command.text();
        let has_data = !current.is_empty();

        match command.code {
            COMMENT_START => {
                if is_separator_comment(text) {
                    if has_data {
                        blocks.push(std::mem::take(&mut current));
                    }
                } else {
                    current.push_str(text);
                }
            }
            COMMENT_CONTINUATION => {
                if !is_separator_comment(text) {
                    current.push_str(text);
                }
            }
            _ if has_data => {
                blocks.push(std::mem::take(&mut current));
                break;
            }
            _ => {}
        }
    }

    blocks
        .iter()
        .map(|block| block.replace('\'', "\""))
        .filter_map(|block| parse_comment(&block))
        .collect()
}

/// Descriptors of the first `"accessories"` configuration, or none.
pub fn accessories_from_comments(configs: &[Value]) -> Vec<AccessoryDescriptor> {
    let Some(config) = configs
        .iter()
        .find(|c| c.get("type").and_then(Value::as_str) == Some(ACCESSORIES_TYPE))
    else {
        return Vec::new();
    };

    let Some(layers) = config.get("layers").and_then(Value::as_array) else {
        return Vec::new();
    };

    layers
        .iter()
        .filter_map(
            |layer| match serde_json::from_value::<AccessoryDescriptor>(layer.clone()) {
                Ok(descriptor) => Some(descriptor),
                Err(e) => {
                    warn!("Skipping accessory layer {} ({})", layer, e);
                    None
                }
            },
        )
        .collect()
}

/// Replace the accessory list from freshly collected configuration objects.
///
/// Without an `"accessories"` configuration the list is cleared. The list's
/// generation changes either way.
pub fn apply_comments(configs: &[Value], accessories: &mut Accessories) {
    accessories.replace(accessories_from_comments(configs));
}

/// Observer: read the page's comments and apply them to the event.
pub fn proceed_comments(
    trigger: On<PageSetupEvent>,
    mut query: Query<(&EventPage, Option<&mut Accessories>)>,
    mut commands: Commands,
) {
    let entity = trigger.event().entity;
    let Ok((page, maybe_accessories)) = query.get_mut(entity) else {
        return;
    };

    let configs = collect_comments(page);
    debug!(
        "Page setup on {:?}: {} configuration object(s)",
        entity,
        configs.len()
    );

    match maybe_accessories {
        Some(mut accessories) => apply_comments(&configs, &mut accessories),
        None => {
            commands
                .entity(entity)
                .insert(Accessories::new(accessories_from_comments(&configs)));
        }
    }
}

/// Trigger [`PageSetupEvent`] for every event whose page was set or changed.
pub fn page_setup_system(query: Query<Entity, Changed<EventPage>>, mut commands: Commands) {
    for entity in query.iter() {
        commands.trigger(PageSetupEvent { entity });
    }
}
