use crate::{
    api::{Api, ApiKey},
    Result,
};

/// Configuration for [`Api`].
pub struct ApiConfig {
    pub(crate) base_url: String,
    pub(crate) user_agent: String,
    pub(crate) key: Option<ApiKey>,
}

impl ApiConfig {
    /// Default base URL for API calls.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.eveonline.com/";

    /// Default `User-Agent` header sent with every request.
    pub const DEFAULT_USER_AGENT: &'static str = concat!("evelink-rs/", env!("CARGO_PKG_VERSION"));

    /// Create a configuration for unauthenticated endpoints.
    ///
    /// ```
    /// # use evelink::ApiConfig;
    /// ApiConfig::new();
    /// ```
    pub fn new() -> Self {
        ApiConfig {
            base_url: Self::DEFAULT_BASE_URL.to_owned(),
            user_agent: Self::DEFAULT_USER_AGENT.to_owned(),
            key: None,
        }
    }

    /// Create a configuration using the specified API key pair.
    ///
    /// Corporation endpoints require a corporation key.
    ///
    /// ```
    /// # use evelink::ApiConfig;
    /// ApiConfig::from_key(1234, "verification-code");
    /// ```
    pub fn from_key(key_id: i64, vcode: impl Into<String>) -> Self {
        ApiConfig {
            key: Some(ApiKey {
                id: key_id,
                vcode: vcode.into(),
            }),
            ..Self::new()
        }
    }

    /// Override base URL for API calls. Clients should use the default setting in most cases.
    pub fn base_url(&mut self, base_url: impl Into<String>) -> &mut Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the `User-Agent` header.
    pub fn user_agent(&mut self, user_agent: impl Into<String>) -> &mut Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Create a new [`Api`] using the specified configuration.
    ///
    /// ```
    /// # use evelink::{Api, ApiConfig};
    /// let api: Api = ApiConfig::from_key(1234, "verification-code").to_api().unwrap();
    /// ```
    pub fn to_api(self) -> Result<Api> {
        Api::new(self)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new()
    }
}
