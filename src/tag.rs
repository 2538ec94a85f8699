//! Tags attached to works.

/// A tag as shown on a work's detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    text: String,
    dictionary_article: Option<DictionaryArticle>,
}

impl Tag {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            dictionary_article: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The encyclopedia entry for this tag. Never populated yet.
    pub fn dictionary_article(&self) -> Option<&DictionaryArticle> {
        self.dictionary_article.as_ref()
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Placeholder for a pixiv encyclopedia (dic.pixiv.net) article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryArticle;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag() {
        let tag = Tag::new("オリジナル");
        assert_eq!(tag.text(), "オリジナル");
        assert_eq!(tag.to_string(), "オリジナル");
        assert!(tag.dictionary_article().is_none());
    }
}
