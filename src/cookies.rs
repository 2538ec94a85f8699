//! Cookie loading for pre-authenticated sessions.
//!
//! Supports Netscape HTTP cookie files, commonly exported by browser extensions.

use reqwest::Url;
use reqwest::cookie::Jar;
use std::path::Path;
use thiserror::Error;

/// Cookie entry parsed from a Netscape cookie file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct NetscapeCookie {
    domain: String,
    include_subdomains: bool,
    path: String,
    secure: bool,
    name: String,
    value: String,
    http_only: bool,
}

/// Errors that can occur while loading cookies.
#[derive(Error, Debug)]
pub enum CookieError {
    /// Failed to read the cookie file.
    #[error("Failed to read cookie file: {0}")]
    Io(#[from] std::io::Error),

    /// Cookie file contains an invalid line.
    #[error("Invalid Netscape cookie line: {0}")]
    InvalidLine(String),

    /// Cookie domain could not be converted into a URL.
    #[error("Invalid cookie domain: {0}")]
    InvalidDomain(String),
}

/// Adds every cookie in the Netscape file at `path` to `jar`.
///
/// Returns the number of cookies loaded.
pub fn load_netscape_cookies(jar: &Jar, path: &Path) -> Result<usize, CookieError> {
    let content = std::fs::read_to_string(path)?;
    let cookies = parse_netscape_cookies(&content)?;
    add_cookies_to_jar(jar, &cookies)?;
    Ok(cookies.len())
}

fn parse_netscape_cookies(content: &str) -> Result<Vec<NetscapeCookie>, CookieError> {
    let mut cookies = Vec::new();

    for raw_line in content.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let (http_only, line) = if let Some(stripped) = line.strip_prefix("#HttpOnly_") {
            (true, stripped)
        } else if line.starts_with('#') {
            continue;
        } else {
            (false, line)
        };

        let fields: Vec<&str> = line.splitn(7, '\t').collect();
        let [domain, include_subdomains, path, secure, _expires, name, value] = fields[..] else {
            return Err(CookieError::InvalidLine(line.to_string()));
        };

        cookies.push(NetscapeCookie {
            domain: domain.to_string(),
            include_subdomains: include_subdomains.eq_ignore_ascii_case("true"),
            path: path.to_string(),
            secure: secure.eq_ignore_ascii_case("true"),
            name: name.to_string(),
            value: value.to_string(),
            http_only,
        });
    }

    Ok(cookies)
}

fn add_cookies_to_jar(jar: &Jar, cookies: &[NetscapeCookie]) -> Result<(), CookieError> {
    for cookie in cookies {
        let host = cookie.domain.trim_start_matches('.');
        if host.is_empty() {
            return Err(CookieError::InvalidDomain(cookie.domain.clone()));
        }

        let url = Url::parse(&format!("https://{}/", host))
            .map_err(|_| CookieError::InvalidDomain(cookie.domain.clone()))?;

        let mut cookie_str = format!("{}={}; Path={}", cookie.name, cookie.value, cookie.path);

        if cookie.include_subdomains {
            cookie_str.push_str(&format!("; Domain={}", cookie.domain));
        }

        if cookie.secure {
            cookie_str.push_str("; Secure");
        }

        if cookie.http_only {
            cookie_str.push_str("; HttpOnly");
        }

        jar.add_cookie_str(&cookie_str, &url);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::cookie::CookieStore;
    use tempfile::TempDir;

    #[test]
    fn test_parse_netscape_cookies() {
        let content = r#"
# Netscape HTTP Cookie File
.pixiv.net	TRUE	/	TRUE	2145916800	PHPSESSID	abc123
#HttpOnly_.pixiv.net	FALSE	/	FALSE	0	p_ab_id	idvalue
        "#;

        let cookies = parse_netscape_cookies(content).unwrap();
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies[0].domain, ".pixiv.net");
        assert!(cookies[0].include_subdomains);
        assert!(cookies[0].secure);
        assert_eq!(cookies[0].name, "PHPSESSID");
        assert_eq!(cookies[0].value, "abc123");
        assert!(!cookies[0].http_only);

        assert!(!cookies[1].include_subdomains);
        assert!(!cookies[1].secure);
        assert_eq!(cookies[1].name, "p_ab_id");
        assert!(cookies[1].http_only);
    }

    #[test]
    fn test_parse_invalid_line() {
        let err = parse_netscape_cookies("invalid-line").unwrap_err();
        assert!(err.to_string().contains("Invalid Netscape cookie line"));
    }

    #[test]
    fn test_load_into_jar() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pixiv-cookies.txt");
        std::fs::write(
            &path,
            "www.pixiv.net\tFALSE\t/\tFALSE\t0\tPHPSESSID\tsession-value\n",
        )
        .unwrap();

        let jar = Jar::default();
        let loaded = load_netscape_cookies(&jar, &path).unwrap();
        assert_eq!(loaded, 1);

        let url = Url::parse("https://www.pixiv.net/").unwrap();
        let header = jar.cookies(&url).unwrap();
        assert_eq!(header.to_str().unwrap(), "PHPSESSID=session-value");
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let jar = Jar::default();
        let err = load_netscape_cookies(&jar, &dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, CookieError::Io(_)));
    }
}
