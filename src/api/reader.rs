use log::debug;

use crate::api::client::get_http_client;
use crate::common::constants::READ_PATH;
use crate::error::{Error, Result};
use crate::model::Data;
use crate::xml_codec;

/// Paginated read client for one blog.
///
/// Construction issues a single zero-length probe request to learn the
/// collection's total, which is cached for the reader's lifetime. Every
/// `page` call is one blocking request; callers wanting concurrency create
/// independent readers and merge the resulting containers themselves.
pub struct Reader {
    base_url: String,
    num: u32,
    kind: Option<String>,
    total: u32,
}

impl Reader {
    pub fn new(base_url: &str, num: u32, kind: Option<String>) -> Result<Self> {
        if num == 0 {
            return Err(Error::InvalidPageSize(num));
        }

        let mut reader = Reader {
            base_url: base_url.trim_end_matches('/').to_string(),
            num,
            kind,
            total: 0,
        };

        let probe = reader.request(0, 0)?;
        reader.total = probe
            .posts
            .ok_or_else(|| {
                Error::MalformedDocument("probe response carried no post collection".to_string())
            })?
            .total;
        debug!("Probe reported {} total posts", reader.total);

        Ok(reader)
    }

    /// Server-reported post count, cached at construction.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Number of pages needed to cover the total. An empty blog still
    /// reports one page.
    pub fn last_page(&self) -> u32 {
        self.total.saturating_sub(1) / self.num + 1
    }

    /// Fetch one page of posts as a data container.
    pub fn page(&self, pos: u32) -> Result<Data> {
        self.request(pos * self.num, self.num)
    }

    fn request(&self, start: u32, num: u32) -> Result<Data> {
        let url = format!("{}{}", self.base_url, READ_PATH);
        let mut form = vec![
            ("start", start.to_string()),
            ("num", num.to_string()),
        ];
        if let Some(kind) = &self.kind {
            form.push(("type", kind.clone()));
        }

        debug!("Requesting {} with start={} num={}", url, start, num);
        let response = get_http_client().post(&url).form(&form).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Response {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        xml_codec::decode_document(&response.text()?)
    }
}
