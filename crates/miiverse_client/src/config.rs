use serde::Deserialize;
use url::Url;

use crate::error::ClientError;
use crate::fetch::FetchSettings;

pub const DEFAULT_BASE_URL: &str = "https://miiverse.nintendo.net";
pub const DEFAULT_SIGN_OUT_PATH: &str = "/auth/logout";
pub const SESSION_COOKIE: &str = "ms";
pub const REQUESTED_WITH: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

/// Credentials and endpoints of one signed-in session.
///
/// Deserializes from JSON; everything except the three credentials has a
/// default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    pub user_name: String,
    pub client_id: String,
    /// Value of the `ms` session cookie.
    pub session_value: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_sign_out_path")]
    pub sign_out_path: String,
    #[serde(default = "FetchSettings::for_session")]
    pub fetch: FetchSettings,
}

impl SessionConfig {
    pub fn new(
        user_name: impl Into<String>,
        client_id: impl Into<String>,
        session_value: impl Into<String>,
    ) -> Self {
        Self {
            user_name: user_name.into(),
            client_id: client_id.into(),
            session_value: session_value.into(),
            base_url: default_base_url(),
            sign_out_path: default_sign_out_path(),
            fetch: FetchSettings::for_session(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn post_url(&self, id: &str) -> Result<Url, ClientError> {
        self.endpoint(["posts", id])
    }

    pub fn activity_url(&self) -> Result<Url, ClientError> {
        let mut url = self.endpoint(["activity"])?;
        url.query_pairs_mut().append_pair("fragment", "activityfeed");
        Ok(url)
    }

    pub fn sign_out_url(&self) -> Result<Url, ClientError> {
        let path = self.sign_out_path.split('/').filter(|segment| !segment.is_empty());
        let mut url = self.endpoint(path)?;
        url.query_pairs_mut().append_pair("client_id", &self.client_id);
        Ok(url)
    }

    pub fn cookie_header(&self) -> String {
        format!("{SESSION_COOKIE}={}", self.session_value)
    }

    fn base(&self) -> Result<Url, ClientError> {
        Url::parse(&self.base_url)
            .map_err(|err| ClientError::InvalidUrl(format!("{}: {err}", self.base_url)))
    }

    /// `segments` appended to the base URL's path, each escaped as one segment.
    fn endpoint<'a>(
        &self,
        segments: impl IntoIterator<Item = &'a str>,
    ) -> Result<Url, ClientError> {
        let mut url = self.base()?;
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_sign_out_path() -> String {
    DEFAULT_SIGN_OUT_PATH.to_string()
}
