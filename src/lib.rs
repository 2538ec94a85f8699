//! pixiv - a client for pixiv's server-rendered pages.
//!
//! This library provides functionality for:
//! - Logging in with an account or a browser cookie export
//! - Listing a member's works page by page
//! - Lazily fetching a work's detail page and classifying it as an
//!   illustration, manga or ugoira
//! - Reading tags, authors and original illustration images

pub mod config;
pub mod console;
pub mod cookies;
pub mod endpoints;
pub mod error;
pub mod member;
pub mod novel;
mod page;
pub mod session;
pub mod tag;
pub mod work;

// Re-export commonly used types
pub use config::{AccountConfig, ClientConfig, Config};
pub use console::Console;
pub use endpoints::ListFilter;
pub use error::{ConfigError, PixivError};
pub use member::Member;
pub use novel::Novel;
pub use page::classify;
pub use session::Pixiv;
pub use tag::{DictionaryArticle, Tag};
pub use work::{Artwork, Illust, Manga, Ugoira, Work, WorkKind};
