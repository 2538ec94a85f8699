//! Extraction from fetched page bodies.
//!
//! Everything here is synchronous and works on owned strings, so parsed
//! documents never live across an `.await`.

use crate::endpoints::{LOGGED_IN_PATTERN, MANGA_URL_PATTERN, USER_ID_PATTERN, WORK_URL_PATTERN};
use crate::error::PixivError;
use crate::work::WorkKind;
use scraper::{Html, Selector};
use std::sync::LazyLock;

/// CSS selectors used for parsing.
struct Selectors {
    /// Work anchors in a member listing.
    work_item: Selector,
    /// Animation player, present only on ugoira pages.
    ugoira_player: Selector,
    /// Link wrapping the preview image on detail pages.
    works_display: Selector,
    /// Any element carrying the original-image class.
    original_image: Selector,
    /// The original-image `<img>` holding the `data-src` URL.
    original_image_img: Selector,
    /// Tag anchors.
    tag: Selector,
}

impl Selectors {
    fn new() -> Self {
        Self {
            work_item: Selector::parse("ul._image-items > li.image-item > a.work").unwrap(),
            ugoira_player: Selector::parse("div._ugoku-illust-player-container").unwrap(),
            works_display: Selector::parse("div.works_display > a").unwrap(),
            original_image: Selector::parse(".original-image").unwrap(),
            original_image_img: Selector::parse("img.original-image").unwrap(),
            tag: Selector::parse("span.tags-container > ul.tags > li.tag > a.text").unwrap(),
        }
    }
}

static SELECTORS: LazyLock<Selectors> = LazyLock::new(Selectors::new);

/// Extracts work IDs from one listing page, in document order.
pub(crate) fn extract_work_ids(html: &str) -> Result<Vec<u64>, PixivError> {
    let doc = Html::parse_document(html);

    doc.select(&SELECTORS.work_item)
        .map(|elem| {
            let href = elem
                .value()
                .attr("href")
                .ok_or_else(|| PixivError::ElementNotFound("work link href".to_string()))?;
            WORK_URL_PATTERN
                .captures(href)
                .and_then(|caps| caps[1].parse::<u64>().ok())
                .ok_or_else(|| PixivError::ParseError(format!("no illust id in link: {}", href)))
        })
        .collect()
}

/// Determines the kind of work shown on a detail page.
///
/// Checked in order: ugoira player, manga viewer link, original image.
pub fn classify(html: &str) -> Option<WorkKind> {
    let doc = Html::parse_document(html);

    if doc.select(&SELECTORS.ugoira_player).next().is_some() {
        return Some(WorkKind::Ugoira);
    }

    if let Some(link) = doc.select(&SELECTORS.works_display).next()
        && let Some(href) = link.value().attr("href")
        && MANGA_URL_PATTERN.is_match(href)
    {
        return Some(WorkKind::Manga);
    }

    if doc.select(&SELECTORS.original_image).next().is_some() {
        return Some(WorkKind::Illust);
    }

    None
}

/// Extracts the owner's member ID from the page scripts.
pub(crate) fn extract_user_id(html: &str) -> Result<u64, PixivError> {
    let caps = USER_ID_PATTERN
        .captures(html)
        .ok_or_else(|| PixivError::ElementNotFound("pixiv.context.userId".to_string()))?;
    caps[1]
        .parse()
        .map_err(|e| PixivError::ParseError(format!("invalid user id {}: {}", &caps[1], e)))
}

/// Extracts trimmed tag texts, in document order.
pub(crate) fn extract_tags(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);

    doc.select(&SELECTORS.tag)
        .map(|elem| elem.text().collect::<String>().trim().to_string())
        .collect()
}

/// Extracts the original image URL from the `data-src` attribute.
pub(crate) fn extract_original_url(html: &str) -> Result<String, PixivError> {
    let doc = Html::parse_document(html);

    doc.select(&SELECTORS.original_image_img)
        .next()
        .and_then(|img| img.value().attr("data-src"))
        .map(str::to_string)
        .ok_or_else(|| PixivError::ElementNotFound("img.original-image[data-src]".to_string()))
}

/// Checks for the logged-in marker.
pub(crate) fn is_logged_in(html: &str) -> bool {
    LOGGED_IN_PATTERN.is_match(html)
}
