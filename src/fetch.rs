use crate::error::{MetaError, Result};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, warn};

pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Read a local file or GET a remote asset. Non-success statuses are errors.
pub fn read_source(source: &str) -> Result<String> {
    if is_remote(source) {
        debug!(url = source, "fetching remote asset");
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("locmeta/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let response = client.get(source).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(MetaError::Fetch(format!("{source}: HTTP {status}")));
        }
        Ok(response.text()?)
    } else {
        debug!(path = source, "reading local asset");
        Ok(std::fs::read_to_string(Path::new(source))?)
    }
}

/// Fetch and parse a JSON document. Failures are logged and reported as `None`;
/// callers treat that as "no data".
pub fn fetch_json<T: DeserializeOwned>(source: &str) -> Option<T> {
    let body = match read_source(source) {
        Ok(body) => body,
        Err(e) => {
            warn!(source, error = %e, "failed to fetch JSON");
            return None;
        }
    };
    match serde_json::from_str(&body) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(source, error = %e, "failed to parse JSON");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_none() {
        let got: Option<Vec<u32>> = fetch_json("/definitely/not/here.json");
        assert!(got.is_none());
    }

    #[test]
    fn malformed_json_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"[1, 2,").unwrap();
        let got: Option<Vec<u32>> = fetch_json(path.to_str().unwrap());
        assert!(got.is_none());
    }

    #[test]
    fn local_json_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ok.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        let got: Option<Vec<u32>> = fetch_json(path.to_str().unwrap());
        assert_eq!(got, Some(vec![1, 2, 3]));
    }
}
