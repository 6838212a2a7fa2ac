//! reqwest-backed gateway client
//!
//! `RequestGateway` binds a `reqwest::Client` (with a fixed timeout) to an
//! injected origin. Every request resolves into exactly one `RequestOutcome`,
//! delivered either through a `PendingRequest` future or through a pair of
//! outcome callbacks.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use serde_json::Value;
use tokio::task::JoinHandle;

use super::outcome::{RequestError, RequestHandle, RequestOutcome};
use super::request::RequestSpec;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Gateway client bound to one origin.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct RequestGateway {
    client: Client,
    origin: Url,
    timeout: Duration,
}

impl RequestGateway {
    /// Create a gateway for `origin` with the given request timeout.
    pub fn new(origin: Url, timeout: Duration) -> Result<Self, RequestError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RequestError::construction(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            origin,
            timeout,
        })
    }

    /// Parse `origin` and create a gateway for it.
    pub fn from_origin(origin: &str, timeout: Duration) -> Result<Self, RequestError> {
        let origin = Url::parse(origin).map_err(|e| RequestError::construction(format!("Invalid origin {}: {}", origin, e)))?;
        Self::new(origin, timeout)
    }

    /// The origin every relative path is joined onto.
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// The fixed per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build the target URL for a request.
    ///
    /// Relative paths are appended to the origin (keeping any path prefix the
    /// origin carries); absolute URLs are used as-is. Query pairs are appended
    /// in order, repeated keys included.
    pub fn url_for(&self, spec: &RequestSpec) -> Result<Url, RequestError> {
        if spec.path.is_empty() {
            return Err(RequestError::construction("Request path is empty"));
        }

        let mut url = if has_scheme(&spec.path) {
            Url::parse(&spec.path)
        } else {
            let base = self.origin.as_str().trim_end_matches('/');
            Url::parse(&format!("{}/{}", base, spec.path.trim_start_matches('/')))
        }
        .map_err(|e| RequestError::construction(format!("Invalid request URL {}: {}", spec.path, e)))?;

        if !spec.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &spec.query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Perform the request and wait for its outcome.
    pub async fn send(&self, spec: RequestSpec) -> RequestOutcome {
        let url = self.url_for(&spec)?;
        let handle = RequestHandle {
            method: spec.method.clone(),
            url: url.clone(),
        };
        let headers = build_headers(&spec.headers)?;

        let mut builder = self.client.request(spec.method.clone(), url).headers(headers);
        if let Some(body) = &spec.body {
            builder = builder.json(body);
        }
        let request = builder
            .build()
            .map_err(|e| RequestError::construction(format!("Failed to build request: {}", e)))?;

        tracing::debug!(request = %handle, "Issuing gateway request");

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(e) if e.is_builder() => {
                return Err(RequestError::construction(e.to_string()));
            }
            Err(e) => {
                tracing::warn!(request = %handle, error = %e, "Gateway request got no response");
                return Err(RequestError::no_response(handle));
            }
        };

        let status = response.status();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(request = %handle, error = %e, "Gateway response body was cut off");
                return Err(RequestError::no_response(handle));
            }
        };

        if status.is_success() {
            tracing::debug!(request = %handle, status = status.as_u16(), "Gateway request succeeded");
            Ok(decode_body(&bytes).unwrap_or(Value::Null))
        } else {
            tracing::warn!(request = %handle, status = status.as_u16(), "Gateway request failed");
            Err(RequestError::Status {
                status: status.as_u16(),
                data: decode_body(&bytes),
                message: format!("Request failed with status code {}", status.as_u16()),
            })
        }
    }

    /// Start the request in the background.
    ///
    /// Returns immediately; the outcome is available by awaiting the returned
    /// `PendingRequest`. Dropping it does not cancel the request.
    pub fn issue(&self, spec: RequestSpec) -> PendingRequest {
        let gateway = self.clone();
        PendingRequest {
            handle: tokio::spawn(async move { gateway.send(spec).await }),
        }
    }

    /// Start the request and route its outcome to exactly one callback.
    ///
    /// A missing callback means the matching outcome is discarded. A panic in
    /// `on_success` is not turned into an error; it fails the returned task.
    ///
    /// Callbacks run on the spawned task. On a multi-threaded runtime that
    /// task may finish on another worker before this call returns, so a
    /// callback can run concurrently with the caller. Callbacks that touch
    /// caller state should hand off through a channel.
    pub fn issue_with<S, E>(&self, spec: RequestSpec, on_success: Option<S>, on_error: Option<E>) -> JoinHandle<()>
    where
        S: FnOnce(Value) + Send + 'static,
        E: FnOnce(RequestError) + Send + 'static,
    {
        let gateway = self.clone();
        tokio::spawn(async move {
            match gateway.send(spec).await {
                Ok(payload) => match on_success {
                    Some(callback) => callback(payload),
                    None => log::debug!("Discarding successful outcome: no success callback registered"),
                },
                Err(error) => match on_error {
                    Some(callback) => callback(error),
                    None => log::debug!("Discarding failed outcome: no error callback registered: {}", error),
                },
            }
        })
    }
}

/// An in-flight request.
///
/// Resolves to the request's outcome. `abort` stops the request; awaiting an
/// aborted request yields a `Construction` error.
#[derive(Debug)]
pub struct PendingRequest {
    handle: JoinHandle<RequestOutcome>,
}

impl PendingRequest {
    /// Cancel the request if it has not completed yet.
    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Whether the outcome is ready.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Future for PendingRequest {
    type Output = RequestOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.handle).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(e)) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Poll::Ready(Err(_)) => Poll::Ready(Err(RequestError::construction("Request was aborted"))),
            Poll::Pending => Poll::Pending,
        }
    }
}

fn build_headers(headers: &[(String, String)]) -> Result<HeaderMap, RequestError> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| RequestError::construction(format!("Invalid header name {}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| RequestError::construction(format!("Invalid header value for {}: {}", name, e)))?;
        map.append(name, value);
    }
    Ok(map)
}

/// Whether `path` opens with a URL scheme such as `http://`.
fn has_scheme(path: &str) -> bool {
    let Some((scheme, _)) = path.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Decode a response body: JSON when possible, raw text otherwise, `None` when empty.
fn decode_body(bytes: &[u8]) -> Option<Value> {
    if bytes.is_empty() {
        return None;
    }
    match serde_json::from_slice(bytes) {
        Ok(value) => Some(value),
        Err(_) => Some(Value::String(String::from_utf8_lossy(bytes).into_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    fn gateway(origin: &str) -> RequestGateway {
        RequestGateway::from_origin(origin, DEFAULT_TIMEOUT).unwrap()
    }

    /// Address of a port nothing listens on.
    fn closed_origin() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(15));
        assert_eq!(gateway("http://localhost:8000").timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_invalid_origin() {
        let result = RequestGateway::from_origin("not a url", DEFAULT_TIMEOUT);
        assert!(matches!(result, Err(RequestError::Construction { .. })));
    }

    #[test]
    fn test_url_for_joins_origin_and_path() {
        let gw = gateway("http://localhost:8000");
        let url = gw.url_for(&RequestSpec::get("/gateway_manager/list_tools/")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/gateway_manager/list_tools/");
    }

    #[test]
    fn test_url_for_keeps_origin_prefix() {
        let gw = gateway("http://localhost:8000/api/");
        let url = gw.url_for(&RequestSpec::get("tools")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/tools");
    }

    #[test]
    fn test_url_for_absolute_path() {
        let gw = gateway("http://localhost:8000");
        let url = gw.url_for(&RequestSpec::get("http://other:9000/config/tools")).unwrap();
        assert_eq!(url.as_str(), "http://other:9000/config/tools");
    }

    #[test]
    fn test_url_for_scheme_inside_query_stays_relative() {
        let gw = gateway("http://localhost:8000");
        let url = gw
            .url_for(&RequestSpec::get("/gateway_manager/list_tools/?next=http://x/y"))
            .unwrap();
        assert_eq!(url.host_str(), Some("localhost"));
        assert_eq!(url.path(), "/gateway_manager/list_tools/");
        assert_eq!(url.query(), Some("next=http://x/y"));
    }

    #[test]
    fn test_has_scheme() {
        assert!(has_scheme("http://other:9000/tools"));
        assert!(has_scheme("svn+ssh://host/repo"));
        assert!(!has_scheme("/tools?next=http://x/y"));
        assert!(!has_scheme("tools"));
        assert!(!has_scheme("://missing"));
        assert!(!has_scheme("1http://x"));
    }

    #[test]
    fn test_url_for_repeated_query_keys() {
        let gw = gateway("http://localhost:8000");
        let spec = RequestSpec::get("/tools").with_query_values("tag", ["a", "b"]).with_query("q", "x y");
        let url = gw.url_for(&spec).unwrap();
        assert_eq!(url.query(), Some("tag=a&tag=b&q=x+y"));

        let tags: Vec<String> = url
            .query_pairs()
            .filter(|(k, _)| k == "tag")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(tags, vec!["a", "b"]);
    }

    #[test]
    fn test_url_for_without_query_has_no_question_mark() {
        let gw = gateway("http://localhost:8000");
        let url = gw.url_for(&RequestSpec::get("/tools")).unwrap();
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_url_for_empty_path() {
        let gw = gateway("http://localhost:8000");
        let result = gw.url_for(&RequestSpec::get(""));
        assert!(matches!(result, Err(RequestError::Construction { .. })));
    }

    #[test]
    fn test_decode_body() {
        assert_eq!(decode_body(b""), None);
        assert_eq!(decode_body(br#"[{"name":"A"}]"#), Some(json!([{"name": "A"}])));
        assert_eq!(decode_body(b"oops"), Some(json!("oops")));
    }

    #[test]
    fn test_build_headers_rejects_bad_name() {
        let result = build_headers(&[("bad header".to_string(), "v".to_string())]);
        assert!(matches!(result, Err(RequestError::Construction { .. })));
    }

    #[tokio::test]
    async fn test_send_construction_error_for_bad_header() {
        let gw = gateway("http://localhost:8000");
        let outcome = gw.send(RequestSpec::get("/tools").with_header("bad header", "v")).await;
        assert!(matches!(outcome, Err(RequestError::Construction { .. })));
    }

    #[tokio::test]
    async fn test_send_no_response() {
        let gw = gateway(&closed_origin());
        let outcome = gw.send(RequestSpec::get("/gateway_manager/list_tools/")).await;
        match outcome {
            Err(RequestError::NoResponse { message, request }) => {
                assert_eq!(message, "No response from server");
                assert_eq!(request.method, reqwest::Method::GET);
                assert_eq!(request.url.path(), "/gateway_manager/list_tools/");
            }
            other => panic!("expected NoResponse, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_issue_resolves_through_future() {
        let gw = gateway(&closed_origin());
        let pending = gw.issue(RequestSpec::get("/tools"));
        let outcome = pending.await;
        assert!(matches!(outcome, Err(RequestError::NoResponse { .. })));
    }

    #[tokio::test]
    async fn test_issue_with_routes_error_once() {
        let gw = gateway("http://localhost:8000");
        let successes = Arc::new(Mutex::new(0));
        let errors = Arc::new(Mutex::new(Vec::new()));

        let s = successes.clone();
        let e = errors.clone();
        gw.issue_with(
            RequestSpec::get("/tools").with_header("bad header", "v"),
            Some(move |_payload: Value| *s.lock().unwrap() += 1),
            Some(move |err: RequestError| e.lock().unwrap().push(err)),
        )
        .await
        .unwrap();

        assert_eq!(*successes.lock().unwrap(), 0);
        let errors = errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], RequestError::Construction { .. }));
    }

    #[tokio::test]
    async fn test_issue_with_no_callbacks_is_silent() {
        let gw = gateway(&closed_origin());
        let task = gw.issue_with(
            RequestSpec::get("/tools"),
            None::<fn(Value)>,
            None::<fn(RequestError)>,
        );
        assert!(task.await.is_ok());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_issue_with_hands_off_through_channel_on_worker_pool() {
        let gw = gateway("http://localhost:8000");
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let ok_tx = tx.clone();

        let task = gw.issue_with(
            RequestSpec::get(""),
            Some(move |payload: Value| {
                let _ = ok_tx.send(Ok(payload));
            }),
            Some(move |err: RequestError| {
                let _ = tx.send(Err(err));
            }),
        );
        task.await.unwrap();

        let outcome = rx.recv().await.unwrap();
        assert!(matches!(outcome, Err(RequestError::Construction { .. })));
        // Both senders were dropped with the task; nothing else arrives.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_issue_with_callbacks_run_after_return() {
        let gw = gateway("http://localhost:8000");
        let fired = Arc::new(Mutex::new(false));
        let f = fired.clone();
        let task = gw.issue_with(
            RequestSpec::get(""),
            None::<fn(Value)>,
            Some(move |_err: RequestError| *f.lock().unwrap() = true),
        );
        // Nothing has run yet: the current-thread runtime has not yielded.
        assert!(!*fired.lock().unwrap());
        task.await.unwrap();
        assert!(*fired.lock().unwrap());
    }
}
