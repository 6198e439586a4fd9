use serde_json::{Map, Value};
use std::collections::HashMap;

/// Route-binding verbs.
///
/// `Del` is the legacy delete verb older server surfaces expose; `Delete` is
/// the standard one. Resource expansion binds `destroy` under both when the
/// target server supports the standard verb, so the two are distinct here
/// even though they share the DELETE wire method.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Del,
    Delete,
}

impl Method {
    pub fn from_string(s: &str) -> Method {
        match s {
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "PATCH" => Method::Patch,
            "DELETE" => Method::Delete,
            _ => Method::Get,
        }
    }

    /// The wire verb, which collapses the `Del`/`Delete` distinction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Del | Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug)]
pub struct Body {
    pub(crate) content_type: String,
    pub(crate) data: Vec<u8>,
}

impl Body {
    pub fn new() -> Body {
        Body {
            content_type: String::new(),
            data: Vec::new(),
        }
    }

    pub fn from_string(s: &str) -> Body {
        Body {
            content_type: "text/plain".to_string(),
            data: s.as_bytes().to_vec(),
        }
    }

    pub fn from_json(value: &Value) -> Body {
        Body {
            content_type: "application/json".to_string(),
            data: value.to_string().into_bytes(),
        }
    }

    pub fn as_string(&self) -> String {
        String::from_utf8_lossy(&self.data).to_string()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn json<T>(&self) -> Option<T>
    where
        T: serde::de::DeserializeOwned,
    {
        if self.content_type == "application/json" {
            serde_json::from_slice(&self.data).ok()
        } else {
            None
        }
    }

    pub fn x_www_form_urlencoded<T>(&self) -> Option<T>
    where
        T: serde::de::DeserializeOwned,
    {
        if self.content_type == "application/x-www-form-urlencoded" {
            serde_json::from_value(Self::parse_urlencoded(&self.data)?).ok()
        } else {
            None
        }
    }

    fn parse_urlencoded(data: &[u8]) -> Option<Value> {
        let data_str = String::from_utf8_lossy(data);
        let mut json = Map::new();

        for pair in data_str.split('&').filter(|s| !s.is_empty()) {
            let (key, value) = pair.split_once('=')?;
            let key = urlencoding::decode(key).ok()?.into_owned();
            let value = urlencoding::decode(value).ok()?.into_owned();
            json.insert(key, Value::String(value));
        }

        Some(Value::Object(json))
    }
}

impl Default for Body {
    fn default() -> Body {
        Body::new()
    }
}

impl From<Vec<u8>> for Body {
    fn from(b: Vec<u8>) -> Body {
        Body {
            content_type: "application/octet-stream".to_string(),
            data: b,
        }
    }
}

/// Which controller and action a bound route is about to run.
///
/// Filled in by the synthetic context-tagging middleware just before the
/// action, so hooks downstream of the tag (and the action itself) can read
/// where in the routing table they are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteContext {
    pub controller: String,
    pub action: String,
}

/// The in-flight request a hook chain operates on.
///
/// Real servers build these off the wire; `InMemoryServer` and the tests
/// build them directly with [`Request::new`].
#[derive(Debug)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub params: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    pub data: HashMap<String, Value>,
    pub body: Body,
    pub context: Option<RouteContext>,
}

impl Request {
    /// Builds a request from a method and a target like `/foo/1?full=true`,
    /// splitting off and decoding the query string.
    pub fn new(method: Method, target: &str) -> Request {
        let mut parts = target.splitn(2, '?');
        let path = parts.next().unwrap_or("/").trim_end_matches('/');
        let path = if path.is_empty() { "/".to_string() } else { path.to_string() };
        let query = parts.next().map(Self::parse_query).unwrap_or_default();

        Request {
            method,
            path,
            query,
            params: HashMap::new(),
            headers: HashMap::new(),
            data: HashMap::new(),
            body: Body::new(),
            context: None,
        }
    }

    pub fn header(mut self, key: &str, value: &str) -> Request {
        self.headers.insert(key.to_lowercase(), value.to_string());
        self
    }

    pub fn body(mut self, body: Body) -> Request {
        self.body = body;
        self
    }

    pub fn get_header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(|v| v.as_str())
    }

    pub fn get_data(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn set_data<T>(&mut self, key: &str, value: T)
    where
        T: serde::Serialize,
    {
        if let Ok(value) = serde_json::to_value(value) {
            self.data.insert(key.to_string(), value);
        }
    }

    pub fn get_typed_data<T>(&self, key: &str) -> Option<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.data
            .get(key)
            .and_then(|value| serde_json::from_value(value.to_owned()).ok())
    }

    fn parse_query(query: &str) -> HashMap<String, String> {
        query
            .split('&')
            .filter(|s| !s.is_empty())
            .filter_map(|pair| {
                let mut parts = pair.split('=');
                let key = parts.next()?;
                let value = parts.next().unwrap_or("");
                Some((
                    urlencoding::decode(key).ok()?.into_owned(),
                    urlencoding::decode(value).ok()?.into_owned(),
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_splits_path_and_query() {
        let req = Request::new(Method::Get, "/bananas/1?full=true&tag=a%20b");
        assert_eq!(req.path, "/bananas/1");
        assert_eq!(req.query.get("full").map(|s| s.as_str()), Some("true"));
        assert_eq!(req.query.get("tag").map(|s| s.as_str()), Some("a b"));
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let req = Request::new(Method::Get, "/bananas/");
        assert_eq!(req.path, "/bananas");
        let root = Request::new(Method::Get, "/");
        assert_eq!(root.path, "/");
    }

    #[test]
    fn json_body_decodes_only_for_json_content_type() {
        let body = Body::from_json(&serde_json::json!({ "name": "cavendish" }));
        let value: Value = body.json().unwrap();
        assert_eq!(value["name"], "cavendish");
        assert!(Body::from_string("{}").json::<Value>().is_none());
    }

    #[test]
    fn delete_verbs_share_a_wire_method() {
        assert_eq!(Method::Del.as_str(), Method::Delete.as_str());
        assert_ne!(Method::Del, Method::Delete);
    }
}
