//! Rich embed entity and outbound builder.
//!
//! The same struct decodes inbound message embeds and builds outbound ones.
//! Builder setters clamp to the platform's field limits; the total rendered
//! length across fields is capped at [`TOTAL_LIMIT`] characters, checked via
//! [`Embed::char_count`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ferrocord_core::error::EntityError;

pub const TITLE_LIMIT: usize = 256;
pub const DESCRIPTION_LIMIT: usize = 4096;
pub const FIELD_NAME_LIMIT: usize = 256;
pub const FIELD_VALUE_LIMIT: usize = 1024;
pub const FOOTER_TEXT_LIMIT: usize = 2048;
pub const AUTHOR_NAME_LIMIT: usize = 256;
pub const FIELD_LIMIT: usize = 25;
pub const TOTAL_LIMIT: usize = 6000;

fn clamped(text: &str, limit: usize) -> String {
    if text.len() <= limit {
        return text.to_string();
    }
    let mut cut = limit;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text[..cut].to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbedMedia {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbedProvider {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbedAuthor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub inline: bool,
}

/// A rich embed attached to a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Embed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<EmbedMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<EmbedProvider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

impl Embed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(data: &serde_json::Value) -> Result<Self, EntityError> {
        serde_json::from_value(data.clone()).map_err(|source| EntityError::ConstructorFailure {
            entity: "embed",
            source,
        })
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(clamped(title, TITLE_LIMIT));
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(clamped(description, DESCRIPTION_LIMIT));
        self
    }

    pub fn url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn footer(mut self, text: &str, icon_url: Option<&str>) -> Self {
        self.footer = Some(EmbedFooter {
            text: clamped(text, FOOTER_TEXT_LIMIT),
            icon_url: icon_url.map(str::to_string),
        });
        self
    }

    pub fn image(mut self, url: &str, width: Option<u32>, height: Option<u32>) -> Self {
        self.image = Some(EmbedMedia {
            url: url.to_string(),
            height,
            width,
        });
        self
    }

    pub fn thumbnail(mut self, url: &str, width: Option<u32>, height: Option<u32>) -> Self {
        self.thumbnail = Some(EmbedMedia {
            url: url.to_string(),
            height,
            width,
        });
        self
    }

    pub fn author(mut self, name: &str, url: Option<&str>, icon_url: Option<&str>) -> Self {
        self.author = Some(EmbedAuthor {
            name: clamped(name, AUTHOR_NAME_LIMIT),
            url: url.map(str::to_string),
            icon_url: icon_url.map(str::to_string),
        });
        self
    }

    /// Append a field. Fields beyond [`FIELD_LIMIT`] are dropped.
    pub fn field(mut self, name: &str, value: &str, inline: bool) -> Self {
        if self.fields.len() >= FIELD_LIMIT {
            tracing::warn!(limit = FIELD_LIMIT, "embed field limit reached, dropping field");
            return self;
        }
        self.fields.push(EmbedField {
            name: clamped(name, FIELD_NAME_LIMIT),
            value: clamped(value, FIELD_VALUE_LIMIT),
            inline,
        });
        self
    }

    /// Remove the field at `index`. Out-of-range is a no-op.
    pub fn remove_field(&mut self, index: usize) -> bool {
        if index >= self.fields.len() {
            return false;
        }
        self.fields.remove(index);
        true
    }

    /// Total rendered character count across the limited text surfaces.
    pub fn char_count(&self) -> usize {
        let opt_len = |s: &Option<String>| s.as_deref().map_or(0, str::len);
        opt_len(&self.title)
            + opt_len(&self.description)
            + self.footer.as_ref().map_or(0, |f| f.text.len())
            + self.author.as_ref().map_or(0, |a| a.name.len())
            + self
                .fields
                .iter()
                .map(|f| f.name.len() + f.value.len())
                .sum::<usize>()
    }

    /// Whether the embed fits the platform's total length cap.
    pub fn within_limits(&self) -> bool {
        self.char_count() <= TOTAL_LIMIT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_assembles_embed() {
        let embed = Embed::new()
            .title("Release notes")
            .description("Now with embeds")
            .color(0x00ff_7f)
            .footer("sent by ferrocord", None)
            .field("version", "0.1.0", true)
            .field("channel", "stable", true);

        assert_eq!(embed.title.as_deref(), Some("Release notes"));
        assert_eq!(embed.fields.len(), 2);
        assert!(embed.fields[0].inline);
        assert!(embed.within_limits());
    }

    #[test]
    fn char_count_sums_text_surfaces() {
        let embed = Embed::new()
            .title("1234")
            .description("567890")
            .footer("ab", None)
            .field("name", "value", false);
        assert_eq!(embed.char_count(), 4 + 6 + 2 + 4 + 5);
    }

    #[test]
    fn setters_clamp_to_limits() {
        let long = "x".repeat(TITLE_LIMIT * 2);
        let embed = Embed::new().title(&long);
        assert_eq!(embed.title.map(|t| t.len()), Some(TITLE_LIMIT));
    }

    #[test]
    fn field_limit_drops_excess() {
        let mut embed = Embed::new();
        for i in 0..(FIELD_LIMIT + 5) {
            embed = embed.field(&format!("f{i}"), "v", false);
        }
        assert_eq!(embed.fields.len(), FIELD_LIMIT);
    }

    #[test]
    fn remove_field_shifts_and_reports() {
        let mut embed = Embed::new()
            .field("a", "1", false)
            .field("b", "2", false)
            .field("c", "3", false);

        assert!(embed.remove_field(1));
        assert_eq!(embed.fields.len(), 2);
        assert_eq!(embed.fields[1].name, "c");
        assert!(!embed.remove_field(9));
    }

    #[test]
    fn decodes_wire_payload() {
        let embed = Embed::from_json(&json!({
            "title": "Hello",
            "type": "rich",
            "description": "world",
            "color": 16711680,
            "fields": [{ "name": "f", "value": "v", "inline": true }]
        }))
        .unwrap();

        assert_eq!(embed.title.as_deref(), Some("Hello"));
        assert_eq!(embed.color, Some(16_711_680));
        assert_eq!(embed.fields.len(), 1);
    }

    #[test]
    fn outbound_serialization_skips_empty_fields() {
        let embed = Embed::new().title("only a title");
        let encoded = serde_json::to_value(&embed).unwrap();
        assert_eq!(encoded, json!({ "title": "only a title" }));
    }
}
