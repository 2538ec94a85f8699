//! Page endpoints and the URL patterns found inside pages.

use crate::error::PixivError;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Regex for detail-page links in a member listing.
pub(crate) static WORK_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"member_illust\.php\?mode=medium&illust_id=([0-9]+)").unwrap()
});

/// Regex for the multi-page viewer link on manga detail pages.
pub(crate) static MANGA_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"member_illust\.php\?mode=manga&illust_id=([0-9]+)").unwrap()
});

/// Regex for the owner ID embedded in detail-page scripts.
pub(crate) static USER_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"pixiv\.context\.userId\s*=\s*"([0-9]+)";"#).unwrap());

/// Regex for the marker pixiv writes into every page served to a logged-in user.
pub(crate) static LOGGED_IN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"pixiv\.user\.loggedIn\s*=\s*true").unwrap());

/// Filter applied to a member's work listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFilter {
    #[default]
    All,
    Illust,
    Manga,
    Ugoira,
}

impl ListFilter {
    /// Value of the `type` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            ListFilter::All => "all",
            ListFilter::Illust => "illust",
            ListFilter::Manga => "manga",
            ListFilter::Ugoira => "ugoira",
        }
    }
}

impl std::str::FromStr for ListFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(ListFilter::All),
            "illust" => Ok(ListFilter::Illust),
            "manga" => Ok(ListFilter::Manga),
            "ugoira" => Ok(ListFilter::Ugoira),
            other => Err(format!("unknown work type: {}", other)),
        }
    }
}

/// URLs of the pages this client talks to, all relative to one site root.
#[derive(Debug, Clone)]
pub struct Endpoints {
    root: Url,
}

impl Endpoints {
    /// Creates endpoints under `base`. A missing trailing slash is added.
    pub fn new(base: &str) -> Result<Self, PixivError> {
        let mut root = Url::parse(base).map_err(|e| PixivError::InvalidUrl(e.to_string()))?;
        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }
        Ok(Self { root })
    }

    /// Site root, also used as the login referer.
    pub fn root(&self) -> &str {
        self.root.as_str()
    }

    /// Login form endpoint.
    pub fn login(&self) -> String {
        format!("{}login.php", self.root)
    }

    /// Canonical detail ("medium") page of a work.
    pub fn medium_illust(&self, illust_id: u64) -> String {
        format!(
            "{}member_illust.php?mode=medium&illust_id={}",
            self.root, illust_id
        )
    }

    /// One page of a member's work listing.
    ///
    /// Page 1 uses the short forms the site links to; later pages always
    /// carry `id`, `type` and `p`.
    pub fn member_illust_list(&self, member_id: u64, page: u32, filter: ListFilter) -> String {
        let list_page = format!("{}member_illust.php?", self.root);

        match (page, filter) {
            (0 | 1, ListFilter::All) => format!("{}id={}", list_page, member_id),
            (0 | 1, _) => format!("{}type={}&id={}", list_page, filter.as_str(), member_id),
            _ => format!(
                "{}id={}&type={}&p={}",
                list_page,
                member_id,
                filter.as_str(),
                page
            ),
        }
    }

    /// Novel page.
    pub fn novel(&self, novel_id: u64) -> String {
        format!("{}novel/show.php?id={}", self.root, novel_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> Endpoints {
        Endpoints::new("https://www.pixiv.net/").unwrap()
    }

    #[test]
    fn test_trailing_slash_added() {
        let endpoints = Endpoints::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(endpoints.root(), "http://127.0.0.1:8080/");
        assert_eq!(endpoints.login(), "http://127.0.0.1:8080/login.php");
    }

    #[test]
    fn test_invalid_base() {
        assert!(matches!(
            Endpoints::new("not a url"),
            Err(PixivError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_medium_illust() {
        assert_eq!(
            endpoints().medium_illust(42),
            "https://www.pixiv.net/member_illust.php?mode=medium&illust_id=42"
        );
    }

    #[test]
    fn test_member_list_first_page() {
        let endpoints = endpoints();
        assert_eq!(
            endpoints.member_illust_list(7, 1, ListFilter::All),
            "https://www.pixiv.net/member_illust.php?id=7"
        );
        assert_eq!(
            endpoints.member_illust_list(7, 1, ListFilter::Manga),
            "https://www.pixiv.net/member_illust.php?type=manga&id=7"
        );
    }

    #[test]
    fn test_member_list_later_pages() {
        let endpoints = endpoints();
        assert_eq!(
            endpoints.member_illust_list(7, 2, ListFilter::All),
            "https://www.pixiv.net/member_illust.php?id=7&type=all&p=2"
        );
        assert_eq!(
            endpoints.member_illust_list(7, 3, ListFilter::Ugoira),
            "https://www.pixiv.net/member_illust.php?id=7&type=ugoira&p=3"
        );
    }

    #[test]
    fn test_patterns() {
        let caps = WORK_URL_PATTERN
            .captures("/member_illust.php?mode=medium&illust_id=12345")
            .unwrap();
        assert_eq!(&caps[1], "12345");

        assert!(MANGA_URL_PATTERN.is_match("member_illust.php?mode=manga&illust_id=9"));
        assert!(!MANGA_URL_PATTERN.is_match("member_illust.php?mode=big&illust_id=9"));

        let caps = USER_ID_PATTERN
            .captures(r#"pixiv.context.userId = "12345";"#)
            .unwrap();
        assert_eq!(&caps[1], "12345");

        assert!(LOGGED_IN_PATTERN.is_match("pixiv.user.loggedIn = true;"));
        assert!(!LOGGED_IN_PATTERN.is_match("pixiv.user.loggedIn = false;"));
    }

    #[test]
    fn test_list_filter_parse() {
        assert_eq!("Manga".parse::<ListFilter>().unwrap(), ListFilter::Manga);
        assert!("novel".parse::<ListFilter>().is_err());
    }
}
