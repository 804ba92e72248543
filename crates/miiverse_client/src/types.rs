use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::classify::classify_platform;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feeling {
    #[default]
    Normal,
    Happy,
    Like,
    Surprised,
    Frustrated,
    Puzzled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    WiiU,
    Nintendo3ds,
    WiiUAnd3ds,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    #[default]
    None,
    Official,
    Topic,
}

/// Topical tag of a post. A tag is of kind `None` exactly when it carries
/// neither an id nor a label.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawPostTag")]
pub struct PostTag {
    kind: TagKind,
    tag_id: String,
    label: String,
}

#[derive(Deserialize)]
struct RawPostTag {
    kind: TagKind,
    #[serde(default)]
    tag_id: String,
    #[serde(default)]
    label: String,
}

impl From<RawPostTag> for PostTag {
    fn from(raw: RawPostTag) -> Self {
        PostTag::new(raw.kind, raw.tag_id, raw.label)
    }
}

impl PostTag {
    pub fn none() -> Self {
        Self::default()
    }

    /// Collapses to `none()` when `kind` is `None` or both strings are empty.
    pub fn new(kind: TagKind, tag_id: impl Into<String>, label: impl Into<String>) -> Self {
        let (tag_id, label) = (tag_id.into(), label.into());
        if kind == TagKind::None || (tag_id.is_empty() && label.is_empty()) {
            return Self::none();
        }
        Self {
            kind,
            tag_id,
            label,
        }
    }

    pub fn kind(&self) -> TagKind {
        self.kind
    }

    pub fn tag_id(&self) -> &str {
        &self.tag_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_none(&self) -> bool {
        self.kind == TagKind::None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostUser {
    pub account_name: String,
    pub display_name: String,
    /// Icon with the normal face, whatever mood the post displayed.
    pub icon_uri: Url,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCommunity {
    pub title_id: u64,
    pub community_id: u64,
    pub name: String,
    pub icon_uri: Url,
}

/// Content of a post: either text or a hand-drawn memo image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostBody {
    Text(String),
    #[serde(rename = "image_uri")]
    Image(Url),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub tag: PostTag,
    #[serde(flatten)]
    pub body: PostBody,
    pub reply_count: u32,
    pub empathy_count: u32,
    pub is_played: bool,
    pub is_spoiler: bool,
    pub screenshot_uri: Option<Url>,
    pub author: PostUser,
    pub feeling: Feeling,
    pub community: PostCommunity,
}

impl Post {
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            PostBody::Text(text) => Some(text),
            PostBody::Image(_) => None,
        }
    }

    pub fn image_uri(&self) -> Option<&Url> {
        match &self.body {
            PostBody::Image(uri) => Some(uri),
            PostBody::Text(_) => None,
        }
    }

    pub fn is_image_post(&self) -> bool {
        matches!(self.body, PostBody::Image(_))
    }
}

/// Catalog entry for a title, independent of any post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub title: String,
    pub title_url: String,
    pub icon_uri: Url,
    pub platform: Platform,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Game {
    /// `platform_image` is the name of the platform badge image; it is
    /// classified here and only the decoded platform is kept.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        title_url: impl Into<String>,
        icon_uri: Url,
        platform_image: &str,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            title_url: title_url.into(),
            icon_uri,
            platform: classify_platform(platform_image),
            kind: kind.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub post: Post,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityResponse {
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl PageRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
        }
    }

    pub fn head(url: impl Into<String>) -> Self {
        Self {
            method: Method::Head,
            ..Self::get(url)
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    InvalidRequest,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::InvalidRequest => write!(f, "invalid request"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
