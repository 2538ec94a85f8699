//! Novels.
//!
//! pixiv serves novels from a separate section with their own IDs, so a
//! [`Novel`] is not an [`Artwork`](crate::work::Artwork) variant.

/// A novel handle. Nothing is fetched for it yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Novel {
    id: u64,
    url: String,
}

impl Novel {
    pub(crate) fn new(id: u64, url: String) -> Self {
        Self { id, url }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// The novel's page URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}
