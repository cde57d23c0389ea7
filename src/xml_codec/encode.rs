use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::common::constants::{FORMAT_VERSION, ROOT_ELEMENT};
use crate::common::time_utils::format_post_date;
use crate::error::Result;
use crate::model::{Data, Post, PostCollection, PostKind, Tumblelog};

/// Encode a data container as an archive document.
///
/// Output is byte-deterministic: attribute order is fixed and photo urls
/// iterate in width order.
pub fn encode_document(data: &Data) -> Result<String> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut root = BytesStart::new(ROOT_ELEMENT);
    root.push_attribute(("version", FORMAT_VERSION));
    writer.write_event(Event::Start(root))?;

    if let Some(log) = &data.tumblelog {
        write_tumblelog(&mut writer, log)?;
    }
    if let Some(posts) = &data.posts {
        write_posts(&mut writer, posts)?;
    }

    writer.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;

    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

fn write_tumblelog(writer: &mut Writer<Vec<u8>>, log: &Tumblelog) -> Result<()> {
    let mut elt = BytesStart::new("tumblelog");
    elt.push_attribute(("name", log.name.as_str()));
    elt.push_attribute(("timezone", log.timezone.name()));
    if let Some(cname) = &log.cname {
        elt.push_attribute(("cname", cname.as_str()));
    }
    elt.push_attribute(("title", log.title.as_str()));

    writer.write_event(Event::Start(elt))?;
    if !log.description.is_empty() {
        writer.write_event(Event::Text(BytesText::new(&log.description)))?;
    }
    writer.write_event(Event::End(BytesEnd::new("tumblelog")))?;
    Ok(())
}

fn write_posts(writer: &mut Writer<Vec<u8>>, posts: &PostCollection) -> Result<()> {
    let total = posts.total.to_string();
    let mut elt = BytesStart::new("posts");
    elt.push_attribute(("total", total.as_str()));
    if let Some(start) = posts.start {
        elt.push_attribute(("start", start.to_string().as_str()));
    }
    if let Some(kind) = &posts.kind {
        elt.push_attribute(("type", kind.as_str()));
    }

    writer.write_event(Event::Start(elt))?;
    for post in &posts.posts {
        write_post(writer, post)?;
    }
    writer.write_event(Event::End(BytesEnd::new("posts")))?;
    Ok(())
}

fn write_post(writer: &mut Writer<Vec<u8>>, post: &Post) -> Result<()> {
    let date = format_post_date(&post.date);
    let mut elt = BytesStart::new("post");
    elt.push_attribute(("id", post.id.as_str()));
    elt.push_attribute(("date", date.as_str()));
    if post.bookmarklet {
        elt.push_attribute(("bookmarklet", "true"));
    }
    elt.push_attribute(("url", post.url.as_str()));
    elt.push_attribute(("type", post.kind.type_name()));
    writer.write_event(Event::Start(elt))?;

    match &post.kind {
        PostKind::Regular { title, body } => {
            write_optional(writer, "regular-title", title)?;
            write_text_element(writer, "regular-body", body)?;
        }
        PostKind::Quote { text, source } => {
            write_text_element(writer, "quote-text", text)?;
            write_optional(writer, "quote-source", source)?;
        }
        PostKind::Photo { caption, urls } => {
            write_optional(writer, "photo-caption", caption)?;
            for (width, url) in urls {
                let width = width.to_string();
                let mut elt = BytesStart::new("photo-url");
                elt.push_attribute(("max-width", width.as_str()));
                writer.write_event(Event::Start(elt))?;
                writer.write_event(Event::Text(BytesText::new(url)))?;
                writer.write_event(Event::End(BytesEnd::new("photo-url")))?;
            }
        }
        PostKind::Link {
            url,
            name,
            description,
        } => {
            write_optional(writer, "link-text", name)?;
            write_text_element(writer, "link-url", url)?;
            write_optional(writer, "link-description", description)?;
        }
        PostKind::Conversation { title, text, lines } => {
            write_optional(writer, "conversation-title", title)?;
            write_text_element(writer, "conversation-text", text)?;
            for line in lines {
                let mut elt = BytesStart::new("conversation-line");
                if let Some(name) = &line.name {
                    elt.push_attribute(("name", name.as_str()));
                }
                if let Some(label) = &line.label {
                    elt.push_attribute(("label", label.as_str()));
                }
                writer.write_event(Event::Start(elt))?;
                writer.write_event(Event::Text(BytesText::new(&line.text)))?;
                writer.write_event(Event::End(BytesEnd::new("conversation-line")))?;
            }
        }
        PostKind::Video {
            caption,
            source,
            player,
        } => {
            write_text_element(writer, "video-caption", caption)?;
            write_text_element(writer, "video-player", player)?;
            write_text_element(writer, "video-source", source)?;
        }
    }

    writer.write_event(Event::End(BytesEnd::new("post")))?;
    Ok(())
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    if !text.is_empty() {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_optional(writer: &mut Writer<Vec<u8>>, name: &str, text: &Option<String>) -> Result<()> {
    if let Some(text) = text {
        write_text_element(writer, name, text)?;
    }
    Ok(())
}
