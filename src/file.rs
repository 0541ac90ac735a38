//! External configuration files.
//!
//! An external file is a flat object whose keys name settings and whose
//! values are scalars. `http://` and `https://` URIs are fetched (with the
//! `http` feature); anything else is read from disk. Files ending in `.toml`
//! decode as TOML, everything else as JSON.
//!
//! Every key becomes a [`Source::Key`] parameter. Whether a key is expected
//! is decided later, when the options are mapped onto settings.

use std::path::Path;

use tracing::debug;

use crate::error::RankfigError;
use crate::options::Options;
use crate::parameter::Parameter;
use crate::source::Source;

/// Fetch and decode the file at `uri`.
pub fn load(uri: &str) -> Result<Options, RankfigError> {
    let content = fetch(uri).map_err(|reason| RankfigError::LoadingConfig {
        uri: uri.to_string(),
        reason,
    })?;
    let options = decode(uri, &content)?;
    debug!(uri, keys = options.len(), "loaded external config");
    Ok(options)
}

/// Decode file contents already in memory. The format is chosen from the
/// extension of `uri`.
pub fn decode(uri: &str, content: &str) -> Result<Options, RankfigError> {
    let parsing = |reason: String| RankfigError::ParsingConfig {
        uri: uri.to_string(),
        reason,
    };

    if is_toml(uri) {
        let table: toml::Table = toml::from_str(content).map_err(|e| parsing(e.to_string()))?;
        Ok(table
            .into_iter()
            .map(|(k, v)| (Parameter::new(k, Source::Key), v.into()))
            .collect())
    } else {
        let map: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(content).map_err(|e| parsing(e.to_string()))?;
        Ok(map
            .into_iter()
            .map(|(k, v)| (Parameter::new(k, Source::Key), v.into()))
            .collect())
    }
}

fn is_remote(uri: &str) -> bool {
    uri.starts_with("http://") || uri.starts_with("https://")
}

fn is_toml(uri: &str) -> bool {
    let path = uri.split(['?', '#']).next().unwrap_or(uri);
    Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

fn fetch(uri: &str) -> Result<String, String> {
    if is_remote(uri) {
        get(uri)
    } else {
        std::fs::read_to_string(uri).map_err(|e| e.to_string())
    }
}

#[cfg(feature = "http")]
fn get(uri: &str) -> Result<String, String> {
    debug!(uri, "fetching external config");
    reqwest::blocking::get(uri)
        .and_then(reqwest::blocking::Response::error_for_status)
        .and_then(reqwest::blocking::Response::text)
        .map_err(|e| e.to_string())
}

#[cfg(not(feature = "http"))]
fn get(_uri: &str) -> Result<String, String> {
    Err("remote configuration requires the `http` feature".to_string())
}
