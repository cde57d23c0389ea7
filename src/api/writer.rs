use log::{debug, info};

use crate::api::client::get_http_client;
use crate::common::constants::WRITE_PATH;
use crate::error::{Error, Result};

/// A post to be published, carrying the write-side field set.
///
/// The write API takes flat form fields, not the archive document shape:
/// photo and video posts submit a single source reference, conversations a
/// raw transcript.
#[derive(Debug, Clone, PartialEq)]
pub enum NewPost {
    Regular {
        title: Option<String>,
        body: String,
    },
    Quote {
        text: String,
        source: Option<String>,
    },
    Photo {
        source: String,
        caption: Option<String>,
    },
    Link {
        url: String,
        name: Option<String>,
        description: Option<String>,
    },
    Conversation {
        conversation: String,
        title: Option<String>,
    },
    Video {
        embed: String,
        caption: Option<String>,
    },
}

impl NewPost {
    /// Flatten to wire form fields, including the `type` discriminator.
    /// Field names follow the write protocol, which renames some model
    /// fields (a quote's text is sent as `quote`).
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("type", self.type_name().to_string())];
        match self {
            NewPost::Regular { title, body } => {
                push_optional(&mut fields, "title", title);
                fields.push(("body", body.clone()));
            }
            NewPost::Quote { text, source } => {
                fields.push(("quote", text.clone()));
                push_optional(&mut fields, "source", source);
            }
            NewPost::Photo { source, caption } => {
                fields.push(("source", source.clone()));
                push_optional(&mut fields, "caption", caption);
            }
            NewPost::Link {
                url,
                name,
                description,
            } => {
                fields.push(("url", url.clone()));
                push_optional(&mut fields, "name", name);
                push_optional(&mut fields, "description", description);
            }
            NewPost::Conversation {
                conversation,
                title,
            } => {
                push_optional(&mut fields, "title", title);
                fields.push(("conversation", conversation.clone()));
            }
            NewPost::Video { embed, caption } => {
                fields.push(("embed", embed.clone()));
                push_optional(&mut fields, "caption", caption);
            }
        }
        fields
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            NewPost::Regular { .. } => "regular",
            NewPost::Quote { .. } => "quote",
            NewPost::Photo { .. } => "photo",
            NewPost::Link { .. } => "link",
            NewPost::Conversation { .. } => "conversation",
            NewPost::Video { .. } => "video",
        }
    }
}

fn push_optional(fields: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<String>) {
    if let Some(value) = value {
        fields.push((key, value.clone()));
    }
}

/// Authenticated write client.
///
/// Owns the credential state; changing accounts means constructing a new
/// writer. Each publish call sends exactly one request.
pub struct Writer {
    base_url: String,
    email: String,
    password: String,
    generator: String,
}

impl Writer {
    pub fn new(base_url: &str, email: &str, password: &str, generator: &str) -> Self {
        Writer {
            base_url: base_url.trim_end_matches('/').to_string(),
            email: email.to_string(),
            password: password.to_string(),
            generator: generator.to_string(),
        }
    }

    /// Submit a post and return the new post's identifier.
    pub fn publish(&self, post: &NewPost) -> Result<String> {
        let url = format!("{}{}", self.base_url, WRITE_PATH);
        let mut form = vec![
            ("email", self.email.clone()),
            ("password", self.password.clone()),
            ("generator", self.generator.clone()),
        ];
        form.extend(post.form_fields());

        debug!("Publishing {} post to {}", post.type_name(), url);
        let response = get_http_client().post(&url).form(&form).send()?;

        let status = response.status().as_u16();
        let body = response.text().unwrap_or_default();
        match status {
            201 => {
                let id = body
                    .strip_suffix("\r\n")
                    .or_else(|| body.strip_suffix('\n'))
                    .unwrap_or(&body);
                info!("Published {} post, id {}", post.type_name(), id);
                Ok(id.to_string())
            }
            403 => Err(Error::Auth),
            400 => Err(Error::BadRequest(body)),
            _ => Err(Error::Response { status, body }),
        }
    }

    pub fn regular(&self, body: &str, title: Option<&str>) -> Result<String> {
        self.publish(&NewPost::Regular {
            title: title.map(str::to_string),
            body: body.to_string(),
        })
    }

    pub fn quote(&self, text: &str, source: Option<&str>) -> Result<String> {
        self.publish(&NewPost::Quote {
            text: text.to_string(),
            source: source.map(str::to_string),
        })
    }

    pub fn photo(&self, source: &str, caption: Option<&str>) -> Result<String> {
        self.publish(&NewPost::Photo {
            source: source.to_string(),
            caption: caption.map(str::to_string),
        })
    }

    pub fn link(&self, url: &str, name: Option<&str>, description: Option<&str>) -> Result<String> {
        self.publish(&NewPost::Link {
            url: url.to_string(),
            name: name.map(str::to_string),
            description: description.map(str::to_string),
        })
    }

    pub fn conversation(&self, conversation: &str, title: Option<&str>) -> Result<String> {
        self.publish(&NewPost::Conversation {
            conversation: conversation.to_string(),
            title: title.map(str::to_string),
        })
    }

    pub fn video(&self, embed: &str, caption: Option<&str>) -> Result<String> {
        self.publish(&NewPost::Video {
            embed: embed.to_string(),
            caption: caption.map(str::to_string),
        })
    }
}
