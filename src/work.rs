//! Artworks and lazy detail-page resolution.
//!
//! A [`Work`] starts as an ID-only stub. The first access to any derived
//! attribute fetches its detail page once; later accesses reuse it.
//! [`Work::resolve`] classifies the page and hands back a typed [`Artwork`].

use crate::error::{PixivError, Result};
use crate::member::Member;
use crate::page;
use crate::session::Pixiv;
use crate::tag::Tag;
use std::fmt;
use tokio::sync::OnceCell;
use tracing::debug;

/// Concrete kind of a work, as detected from its detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkKind {
    Illust,
    Manga,
    Ugoira,
}

impl fmt::Display for WorkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkKind::Illust => "illust",
            WorkKind::Manga => "manga",
            WorkKind::Ugoira => "ugoira",
        };
        f.write_str(name)
    }
}

/// One artwork, possibly not fetched yet.
#[derive(Debug, Clone)]
pub struct Work {
    id: u64,
    session: Pixiv,
    author: OnceCell<Member>,
    page: OnceCell<String>,
    tags: OnceCell<Vec<Tag>>,
}

impl Work {
    pub(crate) fn new(id: u64, session: Pixiv) -> Self {
        Self {
            id,
            session,
            author: OnceCell::new(),
            page: OnceCell::new(),
            tags: OnceCell::new(),
        }
    }

    pub(crate) fn with_author(id: u64, session: Pixiv, author: Member) -> Self {
        Self {
            author: OnceCell::new_with(Some(author)),
            ..Self::new(id, session)
        }
    }

    pub(crate) fn with_page(id: u64, session: Pixiv, html: String) -> Self {
        Self {
            page: OnceCell::new_with(Some(html)),
            ..Self::new(id, session)
        }
    }

    /// The work's numeric ID.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Canonical detail-page URL.
    pub fn url(&self) -> String {
        self.session.endpoints().medium_illust(self.id)
    }

    /// Whether the detail page has been fetched.
    pub fn is_fetched(&self) -> bool {
        self.page.initialized()
    }

    /// Raw detail-page body, fetched on first call only.
    pub async fn detail_page(&self) -> Result<&str> {
        self.page
            .get_or_try_init(|| async {
                debug!(work_id = self.id, "Fetching detail page");
                self.session.get_text(&self.url()).await
            })
            .await
            .map(String::as_str)
    }

    /// The member who posted this work.
    pub async fn author(&self) -> Result<&Member> {
        self.author
            .get_or_try_init(|| async {
                let user_id = page::extract_user_id(self.detail_page().await?)?;
                Ok::<_, PixivError>(self.session.member(user_id))
            })
            .await
    }

    /// Tags in page order.
    pub async fn tags(&self) -> Result<&[Tag]> {
        self.tags
            .get_or_try_init(|| async {
                let html = self.detail_page().await?;
                Ok::<_, PixivError>(page::extract_tags(html).into_iter().map(Tag::new).collect())
            })
            .await
            .map(Vec::as_slice)
    }

    /// Classifies this work from its detail page.
    ///
    /// The page is fetched if needed; cached page, author and tags move into
    /// the returned value.
    pub async fn resolve(self) -> Result<Artwork> {
        let kind = page::classify(self.detail_page().await?)
            .ok_or(PixivError::UnhandledWorkType(self.id))?;
        debug!(work_id = self.id, %kind, "Resolved work type");

        Ok(match kind {
            WorkKind::Illust => Artwork::Illust(Illust::new(self)),
            WorkKind::Manga => Artwork::Manga(Manga { work: self }),
            WorkKind::Ugoira => Artwork::Ugoira(Ugoira { work: self }),
        })
    }
}

/// A work, either still unresolved or of a known kind.
#[derive(Debug, Clone)]
pub enum Artwork {
    Unresolved(Work),
    Illust(Illust),
    Manga(Manga),
    Ugoira(Ugoira),
}

impl Artwork {
    /// The shared work data.
    pub fn work(&self) -> &Work {
        match self {
            Artwork::Unresolved(work) => work,
            Artwork::Illust(illust) => &illust.work,
            Artwork::Manga(manga) => &manga.work,
            Artwork::Ugoira(ugoira) => &ugoira.work,
        }
    }

    pub fn id(&self) -> u64 {
        self.work().id()
    }

    /// The detected kind, or `None` while unresolved.
    pub fn kind(&self) -> Option<WorkKind> {
        match self {
            Artwork::Unresolved(_) => None,
            Artwork::Illust(_) => Some(WorkKind::Illust),
            Artwork::Manga(_) => Some(WorkKind::Manga),
            Artwork::Ugoira(_) => Some(WorkKind::Ugoira),
        }
    }

    /// Resolves an unresolved work; resolved values are returned unchanged.
    pub async fn resolve(self) -> Result<Artwork> {
        match self {
            Artwork::Unresolved(work) => work.resolve().await,
            resolved => Ok(resolved),
        }
    }

    pub fn as_illust(&self) -> Option<&Illust> {
        match self {
            Artwork::Illust(illust) => Some(illust),
            _ => None,
        }
    }

    pub fn into_illust(self) -> Option<Illust> {
        match self {
            Artwork::Illust(illust) => Some(illust),
            _ => None,
        }
    }
}

impl From<Work> for Artwork {
    fn from(work: Work) -> Self {
        Artwork::Unresolved(work)
    }
}

/// A single- or multi-image illustration with a downloadable original.
#[derive(Debug, Clone)]
pub struct Illust {
    work: Work,
    original_url: OnceCell<String>,
    original: OnceCell<Vec<u8>>,
}

impl Illust {
    fn new(work: Work) -> Self {
        Self {
            work,
            original_url: OnceCell::new(),
            original: OnceCell::new(),
        }
    }

    pub fn work(&self) -> &Work {
        &self.work
    }

    pub fn id(&self) -> u64 {
        self.work.id()
    }

    /// URL of the full-size image.
    pub async fn original_illust_url(&self) -> Result<&str> {
        self.original_url
            .get_or_try_init(|| async {
                page::extract_original_url(self.work.detail_page().await?)
            })
            .await
            .map(String::as_str)
    }

    /// The full-size image bytes.
    ///
    /// The image host only serves requests referred from the detail page.
    pub async fn original_illust(&self) -> Result<&[u8]> {
        self.original
            .get_or_try_init(|| async {
                let url = self.original_illust_url().await?;
                self.work.session.get_bytes(url, &self.work.url()).await
            })
            .await
            .map(Vec::as_slice)
    }
}

/// A multi-page manga work.
#[derive(Debug, Clone)]
pub struct Manga {
    work: Work,
}

impl Manga {
    pub fn work(&self) -> &Work {
        &self.work
    }

    pub fn id(&self) -> u64 {
        self.work.id()
    }
}

/// An animated (ugoira) work.
#[derive(Debug, Clone)]
pub struct Ugoira {
    work: Work,
}

impl Ugoira {
    pub fn work(&self) -> &Work {
        &self.work
    }

    pub fn id(&self) -> u64 {
        self.work.id()
    }
}
