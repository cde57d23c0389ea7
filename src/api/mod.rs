mod client;
mod reader;
mod writer;

pub use client::{base_url_for, get_http_client};
pub use reader::Reader;
pub use writer::{NewPost, Writer};
