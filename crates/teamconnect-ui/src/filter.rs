//! Search-box filtering of the dashboard listing.

use serde::{Deserialize, Serialize};

/// CSS `display` value applied to a listing item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Shown as a flex row.
    Flex,
    /// Shown as a block.
    Block,
    /// Hidden.
    None,
}

impl Visibility {
    /// CSS value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flex => "flex",
            Self::Block => "block",
            Self::None => "none",
        }
    }

    /// `false` only for [`Visibility::None`].
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// A listing item the search box can match against.
pub trait Searchable {
    /// Display used when the item matches.
    const SHOWN: Visibility;

    /// Text fields searched, in any case.
    fn search_fields(&self) -> Vec<&str>;
}

/// Uploaded file row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    /// File name.
    pub name: String,
    /// Uploader.
    pub author: String,
}

/// Code snippet card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnippetEntry {
    /// Snippet title.
    pub title: String,
    /// Snippet body.
    pub code: String,
    /// Author.
    pub author: String,
}

/// Team message card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEntry {
    /// Message text.
    pub content: String,
    /// Author.
    pub author: String,
}

impl Searchable for FileEntry {
    const SHOWN: Visibility = Visibility::Flex;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.author.as_str()]
    }
}

impl Searchable for SnippetEntry {
    const SHOWN: Visibility = Visibility::Block;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.code.as_str(), self.author.as_str()]
    }
}

impl Searchable for MessageEntry {
    const SHOWN: Visibility = Visibility::Block;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.content.as_str(), self.author.as_str()]
    }
}

/// Case-insensitive substring filter.
#[derive(Debug, Clone, Default)]
pub struct ContentFilter {
    term: String,
}

impl ContentFilter {
    /// Create a filter for `term`. An empty term matches everything.
    pub fn new(term: &str) -> Self {
        Self {
            term: term.to_lowercase(),
        }
    }

    /// Whether `item` matches the term.
    pub fn matches<T: Searchable>(&self, item: &T) -> bool {
        item.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&self.term))
    }

    /// Display value for `item`.
    pub fn visibility<T: Searchable>(&self, item: &T) -> Visibility {
        if self.matches(item) {
            T::SHOWN
        } else {
            Visibility::None
        }
    }

    /// Display values for a whole list, in order.
    pub fn apply<T: Searchable>(&self, items: &[T]) -> Vec<Visibility> {
        items.iter().map(|item| self.visibility(item)).collect()
    }
}
