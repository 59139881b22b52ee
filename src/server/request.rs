use std::io::Read;
use std::sync::Arc;

use may_minihttp::Request;
use tracing::debug;

use crate::dispatcher::HeaderVec;
use crate::router::ParamVec;

/// Parsed HTTP request data used by `AppService`.
#[derive(Debug)]
pub struct ParsedRequest {
    /// HTTP method (GET, POST, ...)
    pub method: String,
    /// Request path with the query string stripped
    pub path: String,
    /// HTTP headers (lowercase names)
    pub headers: HeaderVec,
    /// Parsed query string parameters
    pub query_params: ParamVec,
    /// Parsed JSON body, if any bytes were sent and they parse as JSON
    pub body: Option<serde_json::Value>,
}

/// Parse query string parameters from a URL path.
///
/// Everything after `?` is percent-decoded via `form_urlencoded`. Duplicate
/// names are all kept; lookups use last-write-wins.
#[must_use]
pub fn parse_query_params(path: &str) -> ParamVec {
    match path.find('?') {
        Some(pos) => url::form_urlencoded::parse(path[pos + 1..].as_bytes())
            .map(|(k, v)| (Arc::from(k.as_ref()), v.to_string()))
            .collect(),
        None => ParamVec::new(),
    }
}

/// Extract method, path, headers, query parameters and JSON body from a raw
/// `may_minihttp` request.
pub fn parse_request(req: Request) -> ParsedRequest {
    let method = req.method().to_string();
    let raw_path = req.path().to_string();
    let path = raw_path
        .split('?')
        .next()
        .unwrap_or("/")
        .to_string();

    let headers: HeaderVec = req
        .headers()
        .iter()
        .map(|h| {
            (
                Arc::from(h.name.to_ascii_lowercase().as_str()),
                String::from_utf8_lossy(h.value).to_string(),
            )
        })
        .collect();

    let query_params = parse_query_params(&raw_path);

    let body = {
        let mut body_str = String::new();
        match req.body().read_to_string(&mut body_str) {
            Ok(size) if size > 0 => match serde_json::from_str(&body_str) {
                Ok(json) => Some(json),
                Err(e) => {
                    debug!(error = %e, size, "request body is not valid JSON");
                    None
                }
            },
            _ => None,
        }
    };

    debug!(
        method = %method,
        path = %path,
        header_count = headers.len(),
        query_param_count = query_params.len(),
        has_body = body.is_some(),
        "HTTP request parsed"
    );

    ParsedRequest {
        method,
        path,
        headers,
        query_params,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(params: &ParamVec, name: &str) -> Option<String> {
        params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.clone())
    }

    #[test]
    fn test_parse_query_params() {
        let q = parse_query_params("/car/?pageIndex=0&pageSize=10");
        assert_eq!(get(&q, "pageIndex").as_deref(), Some("0"));
        assert_eq!(get(&q, "pageSize").as_deref(), Some("10"));
        assert_eq!(get(&q, "missing"), None);
    }

    #[test]
    fn test_parse_query_params_no_query() {
        assert!(parse_query_params("/car/").is_empty());
    }

    #[test]
    fn test_parse_query_params_percent_decoding() {
        let q = parse_query_params("/car/name/q?name=Uno%20Mille");
        assert_eq!(get(&q, "name").as_deref(), Some("Uno Mille"));
    }

    #[test]
    fn test_parse_query_params_last_write_wins() {
        let q = parse_query_params("/car/?pageSize=5&pageSize=10");
        assert_eq!(get(&q, "pageSize").as_deref(), Some("10"));
    }
}
