//! Domain models for the guide API.
//!
//! The wire types mirror the feed's nested JSON with every field optional,
//! so a partial record decodes instead of failing the whole payload; the
//! normalizer decides what is usable. The normalized types are what the
//! rest of the application sees.

use serde::Deserialize;

// ============================================
// Wire DTOs (lenient)
// ============================================

/// One top-level feed item. Only its program list matters.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiItem {
    pub programs: Option<Vec<serde_json::Value>>,
}

/// A raw program record as it appears inside an item's `programs` list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiProgram {
    pub id: Option<String>,
    pub title: Option<String>,
    pub schedule_start: Option<String>,
    pub schedule_end: Option<String>,
    pub description: Option<String>,
    pub channel: Option<ApiChannel>,
}

/// The channel object nested in each program record.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiChannel {
    pub id: Option<String>,
    pub title: Option<String>,
    pub images: Option<Vec<ApiImage>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiImage {
    pub url: Option<String>,
}

// ============================================
// Normalized types
// ============================================

/// A deduplicated channel row of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub id: String,
    /// Channel title, or "Channel {id}" when the feed had none.
    pub name: String,
    pub logo_url: Option<String>,
}

/// A normalized program. Timestamps stay as the received ISO strings;
/// geometry is derived from them at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub id: String,
    pub title: Option<String>,
    pub start: String,
    pub end: String,
    pub channel_id: String,
    pub description: Option<String>,
}

impl Program {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("Untitled Program")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_program_camel_case_fields() {
        let json = r#"{
            "id": "p1",
            "title": "Morning News",
            "scheduleStart": "2024-03-10T06:00:00Z",
            "scheduleEnd": "2024-03-10T07:00:00Z",
            "channel": { "id": "c1", "title": "One", "images": [{ "url": "http://x/logo.png" }] }
        }"#;
        let record: ApiProgram = serde_json::from_str(json).unwrap();
        assert_eq!(record.id.as_deref(), Some("p1"));
        assert_eq!(record.schedule_start.as_deref(), Some("2024-03-10T06:00:00Z"));
        let channel = record.channel.unwrap();
        assert_eq!(channel.id.as_deref(), Some("c1"));
        assert_eq!(
            channel.images.unwrap()[0].url.as_deref(),
            Some("http://x/logo.png")
        );
    }

    #[test]
    fn test_api_program_tolerates_missing_fields() {
        let record: ApiProgram = serde_json::from_str("{}").unwrap();
        assert!(record.id.is_none());
        assert!(record.channel.is_none());
    }

    #[test]
    fn test_api_item_without_programs() {
        let item: ApiItem = serde_json::from_str(r#"{ "name": "whatever" }"#).unwrap();
        assert!(item.programs.is_none());
    }

    #[test]
    fn test_display_title_fallback() {
        let mut program = Program {
            id: "p1".to_string(),
            title: None,
            start: "2024-03-10T06:00:00Z".to_string(),
            end: "2024-03-10T07:00:00Z".to_string(),
            channel_id: "c1".to_string(),
            description: None,
        };
        assert_eq!(program.display_title(), "Untitled Program");

        program.title = Some(String::new());
        assert_eq!(program.display_title(), "Untitled Program");

        program.title = Some("Quiz Night".to_string());
        assert_eq!(program.display_title(), "Quiz Night");
    }
}
