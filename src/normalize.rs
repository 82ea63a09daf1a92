//! Schedule normalizer.
//!
//! Flattens the feed's nested payload into deduplicated channels and a flat
//! program list. Only a non-array top level is fatal; everything below that
//! degrades per item or per record. Channel identity is first-seen-wins in
//! payload order, so the grid's row order matches the feed.

use anyhow::{bail, Result};
use indexmap::IndexMap;

use crate::models::{ApiItem, ApiProgram, Channel, Program};

/// Result of one full normalize pass. The caller swaps its collections for
/// these atomically; a failed pass never produces a partial guide.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedGuide {
    pub channels: Vec<Channel>,
    pub programs: Vec<Program>,
    /// Raw records dropped for missing required fields or undecodable shape.
    pub skipped_records: usize,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Normalize a raw guide payload.
///
/// Required per record: program id, a channel object with an id, and both
/// schedule timestamps. Records failing that gate are dropped with a
/// warning and counted; items without a usable `programs` list are skipped
/// silently. Nothing below the top-level array check can fail the pass.
pub fn normalize_guide(payload: serde_json::Value) -> Result<NormalizedGuide> {
    let serde_json::Value::Array(items) = payload else {
        bail!("Invalid guide format: expected a top-level array");
    };

    let mut channels: IndexMap<String, Channel> = IndexMap::new();
    let mut programs = Vec::new();
    let mut skipped_records = 0usize;

    for item in items {
        let Ok(item) = serde_json::from_value::<ApiItem>(item) else {
            continue;
        };
        let Some(records) = item.programs else {
            continue;
        };

        for record in records {
            let record = match serde_json::from_value::<ApiProgram>(record) {
                Ok(record) => record,
                Err(err) => {
                    skipped_records += 1;
                    log::warn!("Skipping undecodable program record: {}", err);
                    continue;
                }
            };

            let (Some(id), Some(channel), Some(start), Some(end)) = (
                non_empty(record.id),
                record.channel,
                non_empty(record.schedule_start),
                non_empty(record.schedule_end),
            ) else {
                skipped_records += 1;
                log::warn!("Skipping program record with missing required fields");
                continue;
            };

            let Some(channel_id) = non_empty(channel.id) else {
                skipped_records += 1;
                log::warn!("Skipping program {:?}: channel has no id", id);
                continue;
            };

            channels.entry(channel_id.clone()).or_insert_with(|| Channel {
                id: channel_id.clone(),
                name: channel
                    .title
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| format!("Channel {}", channel_id)),
                logo_url: channel
                    .images
                    .and_then(|images| images.into_iter().next())
                    .and_then(|image| image.url)
                    .filter(|url| !url.is_empty()),
            });

            programs.push(Program {
                id,
                title: record.title,
                start,
                end,
                channel_id,
                description: record.description,
            });
        }
    }

    Ok(NormalizedGuide {
        channels: channels.into_values().collect(),
        programs,
        skipped_records,
    })
}
