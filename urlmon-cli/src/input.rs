use std::path::Path;
use url::Url;
use urlmon_common::{Result, UrlMonError};

/// URLs accepted from an input file, plus a message per rejected line
/// (always empty in strict mode).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedUrls {
    pub urls: Vec<String>,
    pub invalids: Vec<String>,
}

/// `true` for an `http`/`https` URL with a non-empty authority.
///
/// The authority is checked on the raw text as well as the parsed URL:
/// the WHATWG parser would otherwise read `https:///path` as host `path`.
pub fn is_valid_url(s: &str) -> bool {
    let Some((_, rest)) = s.split_once("://") else {
        return false;
    };
    if rest.is_empty() || rest.starts_with(['/', '?', '#']) {
        return false;
    }
    match Url::parse(s) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

/// Read a URL list from `path`. See [`parse_url_list`] for the line rules.
pub fn load_urls(path: &Path, strict: bool) -> Result<LoadedUrls> {
    let text = std::fs::read_to_string(path).map_err(|e| UrlMonError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_url_list(&text, &file_name, strict)
}

/// One URL per line. Lines are trimmed; blank lines and `#` comments are
/// skipped. An invalid line is an error in strict mode and a warning
/// (`"<file>:<line>: Invalid URL: '<text>'"`) otherwise.
pub fn parse_url_list(text: &str, file_name: &str, strict: bool) -> Result<LoadedUrls> {
    let mut loaded = LoadedUrls::default();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if is_valid_url(line) {
            loaded.urls.push(line.to_string());
            continue;
        }

        let err = UrlMonError::InvalidUrl {
            file: file_name.to_string(),
            line: idx + 1,
            value: line.to_string(),
        };
        if strict {
            return Err(err);
        }
        loaded.invalids.push(err.to_string());
    }

    Ok(loaded)
}
