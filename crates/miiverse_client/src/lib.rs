//! Miiverse client: typed records extracted from the service's rendered pages.
//!
//! The extraction core (`dom`, `classify`, `post`, `page`) is synchronous and
//! pure; `fetch`, `session` and `engine` wrap it with transport.
mod classify;
mod config;
mod decode;
mod dom;
mod engine;
mod error;
mod fetch;
mod page;
mod post;
mod session;
mod types;

pub use classify::{
    classify_feeling, classify_platform, classify_tag_kind, normalized_icon_uri, parse_tag_href,
};
pub use config::{SessionConfig, DEFAULT_BASE_URL, DEFAULT_SIGN_OUT_PATH, SESSION_COOKIE};
pub use decode::{decode_html, parse_page, DecodeError, DecodedHtml};
pub use dom::{
    attr, child_elements, find_all_by_class, find_by_id, find_by_tag, find_first_by_class,
    first_element_child, has_class, inner_text, match_class_among_children,
    read_image_source_uri, read_uint_text,
};
pub use engine::{RequestId, SessionEvent, SessionHandle};
pub use error::{ClientError, ExtractError, ExtractStep, MalformedPost, NodeError};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use page::{extract_feed, extract_single_post};
pub use post::extract_post;
pub use session::MiiverseSession;
pub use types::{
    ActivityResponse, FailureKind, FetchError, FetchMetadata, FetchOutput, Feeling, Game, Method,
    PageRequest, Platform, Post, PostBody, PostCommunity, PostResponse, PostTag, PostUser,
    TagKind,
};
