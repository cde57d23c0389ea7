use std::fs;
use std::path::Path;

use chrono_tz::Tz;
use log::debug;

use crate::error::Result;
use crate::model::Post;
use crate::xml_codec;

/// Blog metadata decoded from the document's `tumblelog` element.
#[derive(Debug, Clone, PartialEq)]
pub struct Tumblelog {
    pub name: String,
    pub timezone: Tz,
    pub cname: Option<String>,
    pub title: String,
    pub description: String,
}

/// An ordered run of posts plus the collection metadata reported by the
/// source.
///
/// `total` is the server-reported count and stays authoritative no matter
/// how many posts were actually materialized; it is never derived from
/// `posts.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct PostCollection {
    pub posts: Vec<Post>,
    pub total: u32,
    pub start: Option<u32>,
    pub kind: Option<String>,
}

/// Transient aggregate of one blog's metadata and posts.
///
/// Built empty, from a decoded document, or by merging pages fetched by the
/// read client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Data {
    pub tumblelog: Option<Tumblelog>,
    pub posts: Option<PostCollection>,
}

impl Data {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and decode an archive file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let xml = fs::read_to_string(path.as_ref())?;
        debug!(
            "Loaded {} bytes from {}",
            xml.len(),
            path.as_ref().display()
        );
        xml_codec::decode_document(&xml)
    }

    /// Encode and write an archive file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let xml = xml_codec::encode_document(self)?;
        fs::write(path.as_ref(), &xml)?;
        debug!("Wrote {} bytes to {}", xml.len(), path.as_ref().display());
        Ok(())
    }

    /// Absorb another container, page-accumulation style.
    ///
    /// The tumblelog is first-wins: once set it is never overwritten. Posts
    /// append to the existing collection; the first collection seen is
    /// adopted wholesale, so its `total`, `start` and `type` stay
    /// authoritative for everything merged after it.
    pub fn merge(&mut self, other: Data) {
        if self.tumblelog.is_none() {
            self.tumblelog = other.tumblelog;
        }
        if let Some(theirs) = other.posts {
            match &mut self.posts {
                Some(mine) => mine.posts.extend(theirs.posts),
                None => self.posts = Some(theirs),
            }
        }
    }

    /// Number of posts actually materialized, across zero or one collection.
    pub fn post_count(&self) -> usize {
        self.posts.as_ref().map_or(0, |p| p.posts.len())
    }
}
