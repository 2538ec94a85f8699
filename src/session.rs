//! Authenticated HTTP session.
//!
//! [`Pixiv`] owns the cookie store and default headers. Every entity keeps a
//! clone of it to issue its own requests; clones share one connection pool
//! and one cookie jar.

use crate::config::{ClientConfig, Config};
use crate::cookies::load_netscape_cookies;
use crate::endpoints::Endpoints;
use crate::error::{ConfigError, PixivError, Result};
use crate::member::Member;
use crate::novel::Novel;
use crate::page;
use crate::work::{Artwork, Work};
use reqwest::cookie::Jar;
use reqwest::header::{CONTENT_TYPE, REFERER};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// A logged-in pixiv session.
#[derive(Debug, Clone)]
pub struct Pixiv {
    client: reqwest::Client,
    endpoints: Arc<Endpoints>,
    delay_sec: f64,
}

impl Pixiv {
    /// Builds the HTTP client. No request is made.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Self::build(config, None)
    }

    /// Builds a session and authenticates it.
    ///
    /// Configured credentials are posted to the login form; without them the
    /// cookie file must already hold a logged-in session.
    pub async fn connect(config: &Config) -> Result<Self> {
        config.validate()?;

        let session = Self::build(&config.client, config.account.cookie_file.as_deref())?;
        if config.account.has_credentials() {
            session
                .login(&config.account.pixiv_id, &config.account.password)
                .await?;
        } else {
            session.verify_session().await?;
        }

        Ok(session)
    }

    fn build(config: &ClientConfig, cookie_file: Option<&Path>) -> Result<Self> {
        config.validate()?;
        let headers = config.header_map()?;
        let endpoints = Endpoints::new(&config.base_url)?;

        let jar = Arc::new(Jar::default());
        if let Some(path) = cookie_file {
            let loaded = load_netscape_cookies(&jar, path)?;
            debug!(path = %path.display(), loaded, "Loaded cookie file");
        }

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .cookie_provider(jar)
            .timeout(Duration::from_secs(config.timeout_sec))
            .build()?;

        Ok(Self {
            client,
            endpoints: Arc::new(endpoints),
            delay_sec: config.delay_between_requests_sec,
        })
    }

    /// Logs in with a pixiv ID and password.
    ///
    /// The root page is loaded first so the login form gets the cookies it
    /// expects. Fails with [`PixivError::AuthenticationFailed`] when the
    /// response does not carry the logged-in marker.
    pub async fn login(&self, pixiv_id: &str, password: &str) -> Result<()> {
        self.get_text(self.endpoints.root()).await?;

        let form = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("mode", "login")
            .append_pair("return_to", "/")
            .append_pair("pixiv_id", pixiv_id)
            .append_pair("pass", password)
            .append_pair("skip", "1")
            .finish();

        let login_url = self.endpoints.login();
        rate_limit(self.delay_sec).await;
        debug!(url = %login_url, "POST");
        let body = self
            .client
            .post(&login_url)
            .header(REFERER, self.endpoints.root())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(form)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        if !page::is_logged_in(&body) {
            return Err(PixivError::AuthenticationFailed(pixiv_id.to_string()));
        }

        info!(pixiv_id, "Logged in");
        Ok(())
    }

    /// Checks that the current cookies belong to a logged-in session.
    pub async fn verify_session(&self) -> Result<()> {
        let body = self.get_text(self.endpoints.root()).await?;
        if !page::is_logged_in(&body) {
            return Err(PixivError::AuthenticationFailed("cookie session".to_string()));
        }

        info!("Cookie session verified");
        Ok(())
    }

    /// Returns a member handle. No request is made.
    pub fn member(&self, id: u64) -> Member {
        Member::new(id, self.clone())
    }

    /// Returns a member handle for an ID given as text, e.g. from the command line.
    pub fn member_from_str(&self, raw: &str) -> Result<Member, ConfigError> {
        parse_id(raw, "member id").map(|id| self.member(id))
    }

    /// Returns an unresolved work stub. No request is made.
    pub fn work(&self, id: u64) -> Work {
        Work::new(id, self.clone())
    }

    /// Fetches a work's detail page and returns it already classified.
    pub async fn fetch_work(&self, id: u64) -> Result<Artwork> {
        let html = self.get_text(&self.endpoints.medium_illust(id)).await?;
        Work::with_page(id, self.clone(), html).resolve().await
    }

    /// Returns a novel handle. No request is made.
    pub fn novel(&self, id: u64) -> Novel {
        Novel::new(id, self.endpoints.novel(id))
    }

    pub(crate) fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// GETs a page and returns its body.
    pub(crate) async fn get_text(&self, url: &str) -> Result<String> {
        rate_limit(self.delay_sec).await;
        debug!(url, "GET");

        let text = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(text)
    }

    /// GETs binary content with an explicit referer.
    pub(crate) async fn get_bytes(&self, url: &str, referer: &str) -> Result<Vec<u8>> {
        rate_limit(self.delay_sec).await;
        debug!(url, referer, "GET");

        let bytes = self
            .client
            .get(url)
            .header(REFERER, referer)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }
}

/// Parses a numeric pixiv ID.
pub fn parse_id(raw: &str, what: &str) -> Result<u64, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::MissingValue(what.to_string()));
    }

    trimmed.parse().map_err(|_| ConfigError::InvalidValue {
        key: what.to_string(),
        message: format!("must be given in integer form, got {:?}", raw),
    })
}

/// Applies rate limiting delay.
async fn rate_limit(delay_sec: f64) {
    if delay_sec > 0.0 {
        tokio::time::sleep(Duration::from_secs_f64(delay_sec)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12345", "member id").unwrap(), 12345);
        assert_eq!(parse_id(" 7 ", "member id").unwrap(), 7);
    }

    #[test]
    fn test_parse_id_missing() {
        assert!(matches!(
            parse_id("", "member id"),
            Err(ConfigError::MissingValue(_))
        ));
    }

    #[test]
    fn test_parse_id_not_integer() {
        for raw in ["abc", "12.5", "-3"] {
            assert!(matches!(
                parse_id(raw, "member id"),
                Err(ConfigError::InvalidValue { .. })
            ));
        }
    }

    #[test]
    fn test_new_rejects_bad_headers() {
        let mut config = ClientConfig::default();
        config
            .headers
            .insert("X-Extra".to_string(), "line\nbreak".to_string());

        assert!(matches!(
            Pixiv::new(&config),
            Err(PixivError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn test_stubs_need_no_network() {
        let pixiv = Pixiv::new(&ClientConfig::default()).unwrap();
        let work = pixiv.work(42);
        assert_eq!(work.id(), 42);
        assert!(!work.is_fetched());
        assert_eq!(pixiv.member(7).id(), 7);
        assert_eq!(
            pixiv.novel(3).url(),
            "https://www.pixiv.net/novel/show.php?id=3"
        );
    }
}
