/// Default timeout for HTTP requests in seconds
pub const HTTP_TIMEOUT_SECS: u64 = 10;

/// User agent string for HTTP requests
pub const USER_AGENT: &str = "tumblr-archive/0.1";

/// API paths on a blog host
pub const READ_PATH: &str = "/api/read";
pub const WRITE_PATH: &str = "/api/write";

/// Default host for write requests
pub const DEFAULT_WRITE_BASE_URL: &str = "https://www.tumblr.com";

/// Root element and format-version marker of archive documents
pub const ROOT_ELEMENT: &str = "rust-tumblr";
pub const FORMAT_VERSION: &str = "0.1";

/// Textual layout of post dates, e.g. "Sat, 05 Aug 2006 14:08:37"
pub const POST_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S";

/// Default number of posts per read page
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Progress bar template
pub const PROGRESS_BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta}) {msg}";

/// Progress bar characters
pub const PROGRESS_BAR_CHARS: &str = "#>-";
