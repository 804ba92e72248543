use std::fmt;

use thiserror::Error;

use crate::decode::DecodeError;
use crate::types::FetchError;

/// Failure of a single navigation or decoding step on the markup tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("no element matching `{0}`")]
    NotFound(String),
    #[error("`{0}` is not an unsigned integer")]
    Parse(String),
    #[error("`{0}` is not an absolute uri")]
    InvalidUri(String),
    #[error("expected at most one `{what}`, found {count}")]
    Ambiguous { what: String, count: usize },
}

/// Required step of post extraction, in the order the steps run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractStep {
    Identity,
    Content,
    Meta,
    Variant,
    Author,
    Community,
}

impl fmt::Display for ExtractStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractStep::Identity => write!(f, "identity"),
            ExtractStep::Content => write!(f, "content"),
            ExtractStep::Meta => write!(f, "meta"),
            ExtractStep::Variant => write!(f, "variant"),
            ExtractStep::Author => write!(f, "author"),
            ExtractStep::Community => write!(f, "community"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed post at {step} step: {cause}")]
pub struct MalformedPost {
    pub step: ExtractStep,
    #[source]
    pub cause: NodeError,
}

impl MalformedPost {
    pub(crate) fn new(step: ExtractStep, cause: NodeError) -> Self {
        Self { step, cause }
    }
}

/// Attaches the failing step to a navigation error.
pub(crate) trait AtStep<T> {
    fn at(self, step: ExtractStep) -> Result<T, MalformedPost>;
}

impl<T> AtStep<T> for Result<T, NodeError> {
    fn at(self, step: ExtractStep) -> Result<T, MalformedPost> {
        self.map_err(|cause| MalformedPost::new(step, cause))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("page structure: {0}")]
    Node(#[from] NodeError),
    #[error(transparent)]
    Malformed(#[from] MalformedPost),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("session is closed")]
    SessionClosed,
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("transport: {0}")]
    Transport(#[from] FetchError),
    #[error("decode: {0}")]
    Decode(#[from] DecodeError),
    #[error("extract: {0}")]
    Extract(#[from] ExtractError),
}

impl From<MalformedPost> for ClientError {
    fn from(err: MalformedPost) -> Self {
        ClientError::Extract(err.into())
    }
}
