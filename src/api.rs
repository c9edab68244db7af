//! HTTP transport for the EVE XML API.
use std::collections::BTreeMap;

use reqwest::{StatusCode, Url};

use crate::{xml::parse_ts, ApiConfig, Element, Error, Result};

/// Query parameters of a single API call.
///
/// Ordered so that the outgoing query string is deterministic.
pub type Params = BTreeMap<String, String>;

/// Something that can fetch an API endpoint and return its `<result>` element.
///
/// [`Api`] is the HTTP implementation. Other implementations can serve canned responses, which
/// is how the endpoint wrappers are tested.
pub trait Transport {
    /// Request `path` (e.g. `corp/Titles`) with the given parameters.
    fn get(&self, path: &str, params: &Params) -> Result<Element>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, path: &str, params: &Params) -> Result<Element> {
        (**self).get(path, params)
    }
}

/// A blocking HTTP client for the EVE API.
///
/// Use [`ApiConfig`] to create an instance of it.
pub struct Api {
    // Client holds a connection pool internally, so we're reusing the client between requests.
    client: reqwest::blocking::Client,
    base_url: Url,
    key: Option<ApiKey>,
}

#[derive(Clone)]
pub(crate) struct ApiKey {
    pub id: i64,
    pub vcode: String,
}

impl Api {
    pub(crate) fn new(config: ApiConfig) -> Result<Api> {
        let base_url = Url::parse(&config.base_url).map_err(Error::InvalidBaseUrl)?;
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent)
            .build()?;
        Ok(Api {
            client,
            base_url,
            key: config.key,
        })
    }

    fn url(&self, path: &str, params: &Params) -> Result<Url> {
        let mut url = self
            .base_url
            .join(&format!("{path}.xml.aspx"))
            .map_err(Error::InvalidBaseUrl)?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(key) = &self.key {
                query.append_pair("keyID", &key.id.to_string());
                query.append_pair("vCode", &key.vcode);
            }
            for (name, value) in params {
                query.append_pair(name, value);
            }
        }
        Ok(url)
    }
}

impl Transport for Api {
    fn get(&self, path: &str, params: &Params) -> Result<Element> {
        let url = self.url(path, params)?;

        log::debug!(target: "evelink", path, params:serde; "requesting EVE API endpoint");
        let response = self.client.get(url).send()?;
        let status = response.status();
        let body = response.text()?;

        let result = handle_response(path, status, &body)?;
        log::trace!(target: "evelink", path, rows = result.children().len(); "received EVE API result");
        Ok(result)
    }
}

/// Turn a response into its `<result>` element.
///
/// An error document wins over the HTTP status: the API pairs most of its error documents with a
/// 4xx status.
fn handle_response(path: &str, status: StatusCode, body: &str) -> Result<Element> {
    let document = Element::parse(body);
    if let Ok(document) = &document {
        check_api_error(document).inspect_err(|err| {
            log::warn!(target: "evelink", path; "EVE API returned an error: {}", err);
        })?;
    }

    if !status.is_success() {
        log::warn!(target: "evelink", path, status = status.as_u16(); "received non-success response");
        return Err(Error::HttpStatus(status.as_u16()));
    }

    extract_result(document?)
}

fn check_api_error(document: &Element) -> Result<()> {
    match document.find("error") {
        Some(error) => Err(Error::Api {
            code: error.attr_i64("code")?,
            message: error.text().to_owned(),
        }),
        None => Ok(()),
    }
}

/// Unwrap the `<eveapi>` envelope, returning its `<result>` element.
fn extract_result(document: Element) -> Result<Element> {
    if log::log_enabled!(target: "evelink", log::Level::Debug) {
        let current_time = document.find_text("currentTime").map(parse_ts);
        let cached_until = document.find_text("cachedUntil").map(parse_ts);
        if let (Some(Ok(Some(current_time))), Some(Ok(Some(cached_until)))) =
            (current_time, cached_until)
        {
            log::debug!(target: "evelink",
                        current_time:display,
                        cached_until:display;
                        "received EVE API response");
        }
    }

    document
        .children()
        .iter()
        .find(|child| child.tag() == "result")
        .cloned()
        .ok_or_else(|| Error::MissingElement("result".to_owned()))
}
