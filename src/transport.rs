//! Single-request execution over shared session state.
//!
//! Every request carries the pinned browser identity, the shared cookie
//! jar, and a `Referer` computed from the previous request's URL. The
//! session record updates after every send, success or not, so referer
//! chaining stays accurate even across failures kept for diagnostics.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use scraper::Html;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::headers::{HeaderBundle, USER_AGENT};

/// Mutable per-session record: the cookie store and the URL of the most
/// recently sent request. Owned by exactly one client instance.
pub struct SessionState {
    jar: Arc<Jar>,
    last_request_url: Option<Url>,
}

/// Captured response: the requested URL, final status, and raw body.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: Url,
    pub status: StatusCode,
    pub body: String,
}

impl Page {
    /// Parse the body into a queryable document.
    ///
    /// The document is not `Send`; parse it where it is consumed and drop it
    /// before the next await.
    pub fn document(&self) -> Html {
        Html::parse_document(&self.body)
    }
}

/// Executes single GET/POST requests with shared cookie state, fixed
/// identity headers, and referer propagation.
pub struct Transport {
    http: reqwest::Client,
    session: SessionState,
    debug: bool,
}

impl Transport {
    pub fn new(debug: bool) -> Result<Self, Error> {
        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .cookie_provider(jar.clone())
            .build()?;
        Ok(Self {
            http,
            session: SessionState {
                jar,
                last_request_url: None,
            },
            debug,
        })
    }

    /// URL of the most recently sent request, regardless of its outcome.
    pub fn last_request_url(&self) -> Option<&Url> {
        self.session.last_request_url.as_ref()
    }

    pub async fn get(&mut self, url: &Url, bundle: Option<&HeaderBundle>) -> Result<Page, Error> {
        let headers = self.request_headers(bundle, false)?;
        let request = self.http.get(url.clone()).headers(headers);
        self.execute(url, request).await
    }

    pub async fn post(
        &mut self,
        url: &Url,
        bundle: Option<&HeaderBundle>,
        form: &[(&str, String)],
    ) -> Result<Page, Error> {
        let headers = self.request_headers(bundle, true)?;
        let request = self.http.post(url.clone()).headers(headers).form(form);
        self.execute(url, request).await
    }

    /// Assemble the header map for one request: pinned identity first,
    /// bundle values over it, then the chained referer unless the bundle
    /// already supplied one.
    fn request_headers(
        &self,
        bundle: Option<&HeaderBundle>,
        is_post: bool,
    ) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
        if is_post {
            headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));
        }
        if let Some(bundle) = bundle {
            for &(name, ref value) in bundle {
                let value = HeaderValue::from_str(value).map_err(|_| Error::Header(name))?;
                headers.insert(HeaderName::from_static(name), value);
            }
        }
        if !headers.contains_key(header::REFERER)
            && let Some(last) = &self.session.last_request_url
        {
            let value =
                HeaderValue::from_str(last.as_str()).map_err(|_| Error::Header("referer"))?;
            headers.insert(header::REFERER, value);
        }
        Ok(headers)
    }

    async fn execute(
        &mut self,
        url: &Url,
        request: reqwest::RequestBuilder,
    ) -> Result<Page, Error> {
        let request = request.build()?;
        if self.debug {
            debug!(
                method = %request.method(),
                %url,
                headers = ?request.headers(),
                "sending request"
            );
            if let Some(cookies) = self.session.jar.cookies(url) {
                debug!(?cookies, "outgoing cookies");
            }
        }

        let result = self.http.execute(request).await;
        // Recorded whether or not the send succeeded, so the next request's
        // referer still points at this URL.
        self.session.last_request_url = Some(url.clone());
        let response = result?;

        let status = response.status();
        if self.debug {
            debug!(%status, headers = ?response.headers(), "response received");
        }
        if status != StatusCode::OK && status != StatusCode::FOUND {
            return Err(Error::Status {
                url: url.clone(),
                status,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|err| Error::Parse(err.to_string()))?;
        if self.debug {
            debug!(bytes = body.len(), "response body read");
        }
        Ok(Page {
            url: url.clone(),
            status,
            body,
        })
    }
}
