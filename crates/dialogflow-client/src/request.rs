//! Request construction.
//!
//! [`RequestOptions`] describes a logical operation; [`RequestOptions::prepare`]
//! turns it into a fully addressed [`PreparedRequest`] without touching the
//! network.

use std::collections::BTreeMap;

use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::{Error, Result};

/// Logical description of one API call.
#[derive(Debug, Clone)]
pub(crate) struct RequestOptions {
    segments: Vec<String>,
    method: Method,
    session_id: Option<String>,
    body: Option<Value>,
    params: BTreeMap<String, String>,
}

impl RequestOptions {
    /// Start a request for the resource path made of `segments`.
    pub(crate) fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            method,
            session_id: None,
            body: None,
            params: BTreeMap::new(),
        }
    }

    /// Scope the request to a session.
    pub(crate) fn session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Attach a JSON body. Ignored for GET requests.
    pub(crate) fn body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Add URL parameters. They override the protocol and session parameters.
    pub(crate) fn params(mut self, params: BTreeMap<String, String>) -> Self {
        self.params.extend(params);
        self
    }

    /// Build the addressed request.
    pub(crate) fn prepare(
        self,
        base_url: &Url,
        access_token: &str,
        protocol: &str,
    ) -> Result<PreparedRequest> {
        let mut url = base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| Error::Config(format!("cannot use {} as a base URL", base_url)))?;
            path.pop_if_empty();
            path.extend(self.segments.iter());
        }

        let mut query = BTreeMap::new();
        if !protocol.is_empty() {
            query.insert("v".to_string(), protocol.to_string());
        }
        if let Some(session) = self.session_id.filter(|s| !s.is_empty()) {
            query.insert("sessionId".to_string(), session);
        }
        query.extend(self.params);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", access_token))
            .map_err(|_| Error::Config("Invalid access token".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let body = match self.body {
            Some(body) if self.method != Method::GET => Some(serde_json::to_vec(&body)?),
            _ => None,
        };

        Ok(PreparedRequest {
            method: self.method,
            url,
            headers,
            body,
        })
    }
}

/// A fully addressed request ready to be sent.
#[derive(Debug, Clone)]
pub(crate) struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl PreparedRequest {
    /// Query parameters of the URL as a sorted map.
    #[cfg(test)]
    pub fn query_map(&self) -> BTreeMap<String, String> {
        self.url.query_pairs().into_owned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> Url {
        Url::parse("https://api.dialogflow.com/v1/").unwrap()
    }

    #[test]
    fn test_versioned_path() {
        let request = RequestOptions::new(Method::GET, ["entities"])
            .prepare(&base(), "T", "20150910")
            .unwrap();

        assert_eq!(request.method, Method::GET);
        assert_eq!(
            request.url.as_str(),
            "https://api.dialogflow.com/v1/entities?v=20150910"
        );
        assert!(request.body.is_none());
    }

    #[test]
    fn test_session_scoped_path() {
        let request = RequestOptions::new(Method::DELETE, ["userEntities", "fruit"])
            .session("s1")
            .prepare(&base(), "T", "20150910")
            .unwrap();

        assert_eq!(request.url.path(), "/v1/userEntities/fruit");
        let query = request.query_map();
        assert_eq!(query["v"], "20150910");
        assert_eq!(query["sessionId"], "s1");
    }

    #[test]
    fn test_empty_session_is_not_sent() {
        let request = RequestOptions::new(Method::GET, ["contexts"])
            .session("")
            .prepare(&base(), "T", "20150910")
            .unwrap();
        assert!(!request.query_map().contains_key("sessionId"));
    }

    #[test]
    fn test_segments_are_percent_encoded() {
        let request = RequestOptions::new(Method::GET, ["entities", "a/b?c"])
            .prepare(&base(), "T", "20150910")
            .unwrap();
        assert_eq!(request.url.path(), "/v1/entities/a%2Fb%3Fc");
    }

    #[test]
    fn test_standard_headers() {
        let request = RequestOptions::new(Method::GET, ["intents"])
            .prepare(&base(), "secret", "20150910")
            .unwrap();

        assert_eq!(request.headers[AUTHORIZATION], "Bearer secret");
        assert!(request.headers[AUTHORIZATION].is_sensitive());
        assert_eq!(request.headers[CONTENT_TYPE], "application/json");
        assert_eq!(request.headers[ACCEPT], "application/json");
    }

    #[test]
    fn test_body_only_for_non_get() {
        let payload = json!({"name": "fruit"});

        let post = RequestOptions::new(Method::POST, ["entities"])
            .body(&payload)
            .unwrap()
            .prepare(&base(), "T", "20150910")
            .unwrap();
        let sent: Value = serde_json::from_slice(post.body.as_deref().unwrap()).unwrap();
        assert_eq!(sent, payload);

        let get = RequestOptions::new(Method::GET, ["entities"])
            .body(&payload)
            .unwrap()
            .prepare(&base(), "T", "20150910")
            .unwrap();
        assert!(get.body.is_none());
    }

    #[test]
    fn test_params_override_defaults() {
        let mut params = BTreeMap::new();
        params.insert("v".to_string(), "20170712".to_string());
        params.insert("lang".to_string(), "en".to_string());

        let request = RequestOptions::new(Method::GET, ["query"])
            .params(params)
            .prepare(&base(), "T", "20150910")
            .unwrap();

        let query = request.query_map();
        assert_eq!(query["v"], "20170712");
        assert_eq!(query["lang"], "en");
        assert_eq!(request.url.query_pairs().filter(|(k, _)| k == "v").count(), 1);
    }

    #[test]
    fn test_query_string_is_stable() {
        let build = || {
            let mut params = BTreeMap::new();
            params.insert("query".to_string(), "hello world".to_string());
            params.insert("lang".to_string(), "en".to_string());
            RequestOptions::new(Method::GET, ["query"])
                .session("s1")
                .params(params)
                .prepare(&base(), "T", "20150910")
                .unwrap()
        };

        let first = build();
        let second = build();
        assert_eq!(first.url, second.url);
        assert_eq!(first.query_map(), second.query_map());
    }

    #[test]
    fn test_invalid_token_is_rejected() {
        let err = RequestOptions::new(Method::GET, ["entities"])
            .prepare(&base(), "bad\ntoken", "20150910")
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
