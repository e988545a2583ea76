//! Search filter over providers and resources
//!
//! Matching is a case-sensitive substring test on the trimmed query. The
//! result keeps the input order, which for providers is index order and for
//! resources is listing order.

use std::borrow::Cow;

use crate::models::{Provider, Resource};

/// Something that can be matched against a search query
pub trait Searchable {
    /// Text the query is matched against
    fn search_key(&self) -> Cow<'_, str>;
}

impl Searchable for Provider {
    fn search_key(&self) -> Cow<'_, str> {
        Cow::Owned(self.display_name())
    }
}

impl Searchable for Resource {
    fn search_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.name())
    }
}

impl Searchable for str {
    fn search_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl Searchable for String {
    fn search_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

/// Whether one item matches the query
pub fn matches<T: Searchable + ?Sized>(item: &T, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || item.search_key().contains(query)
}

/// Items whose search key contains the query.
///
/// An empty or whitespace-only query returns every item.
pub fn filter<'a, T, I>(items: I, query: &str) -> Vec<&'a T>
where
    T: Searchable + ?Sized + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .filter(|item| matches(*item, query))
        .collect()
}
