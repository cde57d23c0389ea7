use std::collections::BTreeMap;

use chrono::DateTime;
use chrono_tz::Tz;

/// One post on a tumblelog.
///
/// Base fields are common to every shape; `kind` carries the
/// variant-specific payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: String,
    pub url: String,
    pub date: DateTime<Tz>,
    pub bookmarklet: bool,
    pub kind: PostKind,
}

/// The six post shapes, selected by the `type` attribute on the wire.
///
/// Optional fields distinguish absent (`None`) from present but empty
/// (`Some("")`). Photo urls are keyed by max width; a `BTreeMap` keeps the
/// encoded order stable.
#[derive(Debug, Clone, PartialEq)]
pub enum PostKind {
    Regular {
        title: Option<String>,
        body: String,
    },
    Quote {
        text: String,
        source: Option<String>,
    },
    Photo {
        caption: Option<String>,
        urls: BTreeMap<u32, String>,
    },
    Link {
        url: String,
        name: Option<String>,
        description: Option<String>,
    },
    Conversation {
        title: Option<String>,
        text: String,
        lines: Vec<ConversationLine>,
    },
    Video {
        caption: String,
        source: String,
        player: String,
    },
}

impl PostKind {
    /// Wire value of the `type` discriminator attribute.
    pub fn type_name(&self) -> &'static str {
        match self {
            PostKind::Regular { .. } => "regular",
            PostKind::Quote { .. } => "quote",
            PostKind::Photo { .. } => "photo",
            PostKind::Link { .. } => "link",
            PostKind::Conversation { .. } => "conversation",
            PostKind::Video { .. } => "video",
        }
    }
}

/// One line of a conversation post. Speaker name and label may be absent;
/// only the spoken text is required.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationLine {
    pub name: Option<String>,
    pub label: Option<String>,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        let kind = PostKind::Regular {
            title: None,
            body: "hello".to_string(),
        };
        assert_eq!(kind.type_name(), "regular");

        let kind = PostKind::Photo {
            caption: None,
            urls: BTreeMap::new(),
        };
        assert_eq!(kind.type_name(), "photo");
    }

    #[test]
    fn test_photo_urls_sorted_by_width() {
        let mut urls = BTreeMap::new();
        urls.insert(500, "large".to_string());
        urls.insert(75, "thumb".to_string());
        urls.insert(250, "medium".to_string());

        let widths: Vec<u32> = urls.keys().copied().collect();
        assert_eq!(widths, vec![75, 250, 500]);
    }
}
