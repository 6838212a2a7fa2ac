//! Request description passed to `RequestGateway`.

use reqwest::Method;
use serde_json::Value;

/// Everything needed to issue one gateway request.
///
/// Query parameters are kept as ordered pairs so the same key may appear
/// more than once; every pair ends up in the final URL.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    /// HTTP method (GET unless overridden)
    pub method: Method,
    /// Path relative to the gateway origin, or an absolute URL
    pub path: String,
    /// Optional JSON body
    pub body: Option<Value>,
    /// Query parameters in insertion order
    pub query: Vec<(String, String)>,
    /// Extra request headers
    pub headers: Vec<(String, String)>,
}

impl RequestSpec {
    /// Create a request with an explicit method.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: Vec::new(),
            headers: Vec::new(),
        }
    }

    /// Create a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Attach a JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Append one query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append several values for the same query key.
    pub fn with_query_values<I, V>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let key = key.into();
        for value in values {
            self.query.push((key.clone(), value.into()));
        }
        self
    }

    /// Add a request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_defaults() {
        let spec = RequestSpec::get("/gateway_manager/list_tools/");
        assert_eq!(spec.method, Method::GET);
        assert_eq!(spec.path, "/gateway_manager/list_tools/");
        assert!(spec.body.is_none());
        assert!(spec.query.is_empty());
        assert!(spec.headers.is_empty());
    }

    #[test]
    fn test_repeated_query_keys_are_kept() {
        let spec = RequestSpec::get("/tools")
            .with_query("tag", "a")
            .with_query("tag", "b")
            .with_query_values("id", ["1", "2"]);

        assert_eq!(
            spec.query,
            vec![
                ("tag".to_string(), "a".to_string()),
                ("tag".to_string(), "b".to_string()),
                ("id".to_string(), "1".to_string()),
                ("id".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_body_and_headers() {
        let spec = RequestSpec::new(Method::POST, "/echo")
            .with_body(json!({"enabled": true}))
            .with_header("x-trace", "abc");

        assert_eq!(spec.method, Method::POST);
        assert_eq!(spec.body, Some(json!({"enabled": true})));
        assert_eq!(spec.headers, vec![("x-trace".to_string(), "abc".to_string())]);
    }
}
