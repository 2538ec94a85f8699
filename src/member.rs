//! Member accounts and their work listings.

use crate::endpoints::ListFilter;
use crate::error::Result;
use crate::page;
use crate::session::Pixiv;
use crate::work::Work;
use tracing::debug;

/// A pixiv user account.
#[derive(Debug, Clone)]
pub struct Member {
    id: u64,
    session: Pixiv,
}

impl Member {
    pub(crate) fn new(id: u64, session: Pixiv) -> Self {
        Self { id, session }
    }

    /// The member's numeric ID.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// URL of one listing page.
    pub fn list_page_url(&self, page: u32, filter: ListFilter) -> String {
        self.session
            .endpoints()
            .member_illust_list(self.id, page, filter)
    }

    /// Lists every work of this member.
    pub async fn works(&self) -> Result<Vec<Work>> {
        self.works_of_type(ListFilter::All).await
    }

    /// Lists this member's works, page by page, until a page comes back empty.
    ///
    /// Nothing is cached; every call walks the listing again. The returned
    /// works are unresolved stubs whose author is this member.
    pub async fn works_of_type(&self, filter: ListFilter) -> Result<Vec<Work>> {
        let mut all_works = Vec::new();
        let mut page_num = 1u32;

        loop {
            let html = self
                .session
                .get_text(&self.list_page_url(page_num, filter))
                .await?;
            let ids = page::extract_work_ids(&html)?;
            debug!(member_id = self.id, page = page_num, count = ids.len(), "Listing page");

            if ids.is_empty() {
                break;
            }

            all_works.extend(
                ids.into_iter()
                    .map(|id| Work::with_author(id, self.session.clone(), self.clone())),
            );
            page_num += 1;
        }

        Ok(all_works)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    #[test]
    fn test_list_page_url() {
        let pixiv = Pixiv::new(&ClientConfig::default()).unwrap();
        let member = pixiv.member(11);

        assert_eq!(
            member.list_page_url(1, ListFilter::All),
            "https://www.pixiv.net/member_illust.php?id=11"
        );
        assert_eq!(
            member.list_page_url(1, ListFilter::Illust),
            "https://www.pixiv.net/member_illust.php?type=illust&id=11"
        );
        assert_eq!(
            member.list_page_url(4, ListFilter::All),
            "https://www.pixiv.net/member_illust.php?id=11&type=all&p=4"
        );
    }
}
