//! Client library for the legacy Tumblr XML API.
//!
//! The core is a post data model with a bidirectional XML codec, a
//! paginated read client, and an authenticated write client. Everything is
//! blocking by design: each client call issues one request and returns or
//! fails before the caller proceeds.

pub mod api;
pub mod cli_args;
pub mod common;
pub mod error;
pub mod model;
pub mod settings;
pub mod xml_codec;
