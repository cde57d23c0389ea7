use std::collections::BTreeMap;

use chrono_tz::Tz;
use log::debug;

use crate::common::time_utils::parse_post_date;
use crate::error::{Error, Result};
use crate::model::{ConversationLine, Data, Post, PostCollection, PostKind, Tumblelog};
use crate::xml_codec::element::{self, Element};

/// Decode an archive document into a data container.
///
/// The first `tumblelog` and first `posts` elements anywhere in the tree are
/// used, wherever they sit. Any post failing to decode aborts the whole
/// document; there are no partial collections.
pub fn decode_document(xml: &str) -> Result<Data> {
    let root = element::parse(xml)?;

    let tumblelog = root.find_first("tumblelog").map(decode_tumblelog).transpose()?;

    let posts = match root.find_first("posts") {
        Some(elt) => {
            let timezone = tumblelog.as_ref().map(|log| log.timezone).ok_or_else(|| {
                Error::MalformedDocument(
                    "posts present without tumblelog; post dates need the blog timezone"
                        .to_string(),
                )
            })?;
            Some(decode_posts(elt, timezone)?)
        }
        None => None,
    };

    if let Some(collection) = &posts {
        debug!(
            "Decoded {} posts (total reported: {})",
            collection.posts.len(),
            collection.total
        );
    }

    Ok(Data { tumblelog, posts })
}

fn decode_tumblelog(elt: &Element) -> Result<Tumblelog> {
    let tz_name = doc_attr(elt, "timezone")?;
    let timezone: Tz = tz_name
        .parse()
        .map_err(|e| Error::MalformedDocument(format!("unknown timezone '{}': {}", tz_name, e)))?;

    Ok(Tumblelog {
        name: doc_attr(elt, "name")?.to_string(),
        timezone,
        cname: elt.attr("cname").map(str::to_string),
        title: doc_attr(elt, "title")?.to_string(),
        description: elt.text.clone(),
    })
}

fn decode_posts(elt: &Element, tz: Tz) -> Result<PostCollection> {
    let total = parse_count(doc_attr(elt, "total")?, "total")?;
    let start = elt
        .attr("start")
        .map(|raw| parse_count(raw, "start"))
        .transpose()?;
    let kind = elt.attr("type").map(str::to_string);

    let posts = elt
        .children_named("post")
        .map(|post| decode_post(post, tz))
        .collect::<Result<Vec<_>>>()?;

    Ok(PostCollection {
        posts,
        total,
        start,
        kind,
    })
}

fn parse_count(raw: &str, attr: &str) -> Result<u32> {
    raw.parse().map_err(|_| {
        Error::MalformedDocument(format!("posts attribute {}='{}' is not numeric", attr, raw))
    })
}

fn decode_post(elt: &Element, tz: Tz) -> Result<Post> {
    let id = post_attr(elt, "id")?.to_string();
    let url = post_attr(elt, "url")?.to_string();
    let date = parse_post_date(post_attr(elt, "date")?, tz)?;
    let bookmarklet = elt.attr("bookmarklet") == Some("true");

    let kind = match post_attr(elt, "type")? {
        "regular" => PostKind::Regular {
            title: optional_text(elt, "regular-title"),
            body: required_text(elt, "regular-body")?,
        },
        "quote" => PostKind::Quote {
            text: required_text(elt, "quote-text")?,
            source: optional_text(elt, "quote-source"),
        },
        "photo" => PostKind::Photo {
            caption: optional_text(elt, "photo-caption"),
            urls: decode_photo_urls(elt)?,
        },
        "link" => PostKind::Link {
            url: required_text(elt, "link-url")?,
            name: optional_text(elt, "link-text"),
            description: optional_text(elt, "link-description"),
        },
        "conversation" => PostKind::Conversation {
            title: optional_text(elt, "conversation-title"),
            text: required_text(elt, "conversation-text")?,
            lines: decode_conversation_lines(elt),
        },
        "video" => PostKind::Video {
            caption: required_text(elt, "video-caption")?,
            source: required_text(elt, "video-source")?,
            player: required_text(elt, "video-player")?,
        },
        other => {
            return Err(Error::MalformedPost(format!(
                "unrecognized post type '{}'",
                other
            )))
        }
    };

    Ok(Post {
        id,
        url,
        date,
        bookmarklet,
        kind,
    })
}

/// Photo urls keyed by max width. A repeated width overwrites the earlier
/// entry; the width itself is the key space.
fn decode_photo_urls(elt: &Element) -> Result<BTreeMap<u32, String>> {
    let mut urls = BTreeMap::new();
    for child in elt.children_named("photo-url") {
        let width = child
            .attr("max-width")
            .ok_or_else(|| Error::MalformedPost("photo-url missing max-width".to_string()))?;
        let width: u32 = width.parse().map_err(|_| {
            Error::MalformedPost(format!("photo-url max-width '{}' is not numeric", width))
        })?;
        urls.insert(width, child.text.clone());
    }
    Ok(urls)
}

fn decode_conversation_lines(elt: &Element) -> Vec<ConversationLine> {
    elt.children_named("conversation-line")
        .map(|line| ConversationLine {
            name: line.attr("name").map(str::to_string),
            label: line.attr("label").map(str::to_string),
            text: line.text.clone(),
        })
        .collect()
}

fn doc_attr<'a>(elt: &'a Element, name: &str) -> Result<&'a str> {
    elt.attr(name).ok_or_else(|| {
        Error::MalformedDocument(format!("<{}> missing {} attribute", elt.name, name))
    })
}

fn post_attr<'a>(elt: &'a Element, name: &str) -> Result<&'a str> {
    elt.attr(name)
        .ok_or_else(|| Error::MalformedPost(format!("post missing {} attribute", name)))
}

fn optional_text(elt: &Element, name: &str) -> Option<String> {
    elt.first_child(name).map(|child| child.text.clone())
}

fn required_text(elt: &Element, name: &str) -> Result<String> {
    elt.first_child(name)
        .map(|child| child.text.clone())
        .ok_or_else(|| Error::MalformedPost(format!("post missing required <{}>", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn doc(posts: &str) -> String {
        format!(
            r#"<rust-tumblr version="0.1"><tumblelog name="demo" timezone="US/Eastern" title="Demo">words</tumblelog><posts total="137">{}</posts></rust-tumblr>"#,
            posts
        )
    }

    const REGULAR: &str = r#"<post id="1" date="Sat, 05 Aug 2006 14:08:37" url="http://demo.tumblr.com/post/1" type="regular"><regular-body>hello</regular-body></post>"#;

    #[test]
    fn test_decode_blog_metadata() {
        let data = decode_document(&doc(REGULAR)).unwrap();
        let log = data.tumblelog.unwrap();
        assert_eq!(log.name, "demo");
        assert_eq!(log.timezone.name(), "US/Eastern");
        assert_eq!(log.title, "Demo");
        assert_eq!(log.description, "words");
        assert_eq!(log.cname, None);
    }

    #[test]
    fn test_total_is_authoritative_not_len() {
        let data = decode_document(&doc(REGULAR)).unwrap();
        let posts = data.posts.unwrap();
        assert_eq!(posts.posts.len(), 1);
        assert_eq!(posts.total, 137);
    }

    #[test]
    fn test_unrecognized_type_is_hard_failure() {
        let poll = r#"<post id="1" date="Sat, 05 Aug 2006 14:08:37" url="u" type="poll"/>"#;
        match decode_document(&doc(poll)) {
            Err(Error::MalformedPost(msg)) => assert!(msg.contains("poll")),
            other => panic!("expected MalformedPost, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_type_is_hard_failure() {
        let untyped = r#"<post id="1" date="Sat, 05 Aug 2006 14:08:37" url="u"/>"#;
        assert!(matches!(
            decode_document(&doc(untyped)),
            Err(Error::MalformedPost(_))
        ));
    }

    #[test]
    fn test_missing_required_child_is_hard_failure() {
        let bodyless = r#"<post id="1" date="Sat, 05 Aug 2006 14:08:37" url="u" type="regular"/>"#;
        assert!(matches!(
            decode_document(&doc(bodyless)),
            Err(Error::MalformedPost(_))
        ));
    }

    #[test]
    fn test_missing_total_is_malformed_document() {
        let xml = r#"<rust-tumblr version="0.1"><tumblelog name="d" timezone="UTC" title="t"/><posts></posts></rust-tumblr>"#;
        assert!(matches!(
            decode_document(xml),
            Err(Error::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_non_numeric_total_is_malformed_document() {
        let xml = r#"<rust-tumblr version="0.1"><tumblelog name="d" timezone="UTC" title="t"/><posts total="many"></posts></rust-tumblr>"#;
        assert!(matches!(
            decode_document(xml),
            Err(Error::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_posts_without_tumblelog_is_malformed_document() {
        let xml = r#"<rust-tumblr version="0.1"><posts total="0"></posts></rust-tumblr>"#;
        assert!(matches!(
            decode_document(xml),
            Err(Error::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_unknown_timezone_is_malformed_document() {
        let xml = r#"<rust-tumblr version="0.1"><tumblelog name="d" timezone="Mars/Olympus" title="t"/></rust-tumblr>"#;
        assert!(matches!(
            decode_document(xml),
            Err(Error::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_empty_document_decodes_to_empty_data() {
        let data = decode_document(r#"<rust-tumblr version="0.1"></rust-tumblr>"#).unwrap();
        assert!(data.tumblelog.is_none());
        assert!(data.posts.is_none());
    }

    #[test]
    fn test_absent_and_empty_optionals_are_distinct() {
        let with_empty = r#"<post id="1" date="Sat, 05 Aug 2006 14:08:37" url="u" type="regular"><regular-title></regular-title><regular-body>b</regular-body></post>"#;
        let data = decode_document(&doc(with_empty)).unwrap();
        let post = &data.posts.unwrap().posts[0];
        match &post.kind {
            PostKind::Regular { title, .. } => assert_eq!(title.as_deref(), Some("")),
            other => panic!("wrong kind: {:?}", other),
        }

        let data = decode_document(&doc(REGULAR)).unwrap();
        let post = &data.posts.unwrap().posts[0];
        match &post.kind {
            PostKind::Regular { title, .. } => assert_eq!(*title, None),
            other => panic!("wrong kind: {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_photo_width_last_wins() {
        let photo = r#"<post id="1" date="Sat, 05 Aug 2006 14:08:37" url="u" type="photo"><photo-url max-width="500">first</photo-url><photo-url max-width="500">second</photo-url></post>"#;
        let data = decode_document(&doc(photo)).unwrap();
        match &data.posts.unwrap().posts[0].kind {
            PostKind::Photo { urls, .. } => {
                assert_eq!(urls.len(), 1);
                assert_eq!(urls[&500], "second");
            }
            other => panic!("wrong kind: {:?}", other),
        }
    }

    #[test]
    fn test_photo_url_without_width_is_hard_failure() {
        let photo = r#"<post id="1" date="Sat, 05 Aug 2006 14:08:37" url="u" type="photo"><photo-url>x</photo-url></post>"#;
        assert!(matches!(
            decode_document(&doc(photo)),
            Err(Error::MalformedPost(_))
        ));
    }

    #[test]
    fn test_conversation_lines_preserve_order() {
        let convo = r#"<post id="1" date="Sat, 05 Aug 2006 14:08:37" url="u" type="conversation"><conversation-text>intro</conversation-text><conversation-line name="a" label="A:">one</conversation-line><conversation-line>two</conversation-line></post>"#;
        let data = decode_document(&doc(convo)).unwrap();
        match &data.posts.unwrap().posts[0].kind {
            PostKind::Conversation { lines, .. } => {
                assert_eq!(lines.len(), 2);
                assert_eq!(lines[0].name.as_deref(), Some("a"));
                assert_eq!(lines[0].label.as_deref(), Some("A:"));
                assert_eq!(lines[0].text, "one");
                assert_eq!(lines[1].name, None);
                assert_eq!(lines[1].text, "two");
            }
            other => panic!("wrong kind: {:?}", other),
        }
    }

    #[test]
    fn test_bookmarklet_flag() {
        let marked = r#"<post id="1" date="Sat, 05 Aug 2006 14:08:37" url="u" bookmarklet="true" type="regular"><regular-body>b</regular-body></post>"#;
        let data = decode_document(&doc(marked)).unwrap();
        assert!(data.posts.unwrap().posts[0].bookmarklet);

        let data = decode_document(&doc(REGULAR)).unwrap();
        assert!(!data.posts.unwrap().posts[0].bookmarklet);
    }

    #[test]
    fn test_regions_found_anywhere_in_tree() {
        let xml = r#"<wrapper><inner><tumblelog name="d" timezone="UTC" title="t"/></inner><inner2><posts total="0"></posts></inner2></wrapper>"#;
        let data = decode_document(xml).unwrap();
        assert_eq!(data.tumblelog.unwrap().name, "d");
        assert_eq!(data.posts.unwrap().total, 0);
    }
}
