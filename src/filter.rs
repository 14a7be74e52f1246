use std::collections::HashSet;

use crate::post::Post;
use crate::text_utils::locale_cmp;

/// Distinct values used to fill the filter selects.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Facets {
    pub books: Vec<String>,
    pub topics: Vec<String>,
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut res: Vec<String> = values
        .filter(|v| !v.is_empty())
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect();
    res.sort_by(|a, b| locale_cmp(a, b));
    res
}

impl Facets {
    pub fn derive(posts: &[Post]) -> Self {
        let books = distinct_sorted(posts.iter().map(Post::bible_book));
        let topics = distinct_sorted(posts.iter().flat_map(|p| p.topics.iter().map(String::as_str)));
        Facets { books, topics }
    }
}

/// Every post with exactly this id. Duplicated ids all come back.
pub fn find_by_id<'p>(posts: &'p [Post], id: &str) -> Vec<&'p Post> {
    posts.iter().filter(|p| p.id.as_deref() == Some(id)).collect()
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PostFilter {
    term: String,
    book: String,
    topic: String,
}

impl PostFilter {
    pub fn new(term: &str, book: &str, topic: &str) -> Self {
        PostFilter {
            term: term.trim().to_lowercase(),
            book: book.to_string(),
            topic: topic.to_string(),
        }
    }

    fn haystack(post: &Post) -> String {
        let fields = [&post.title, &post.excerpt, &post.content, &post.bible_book, &post.bible_ref];
        fields.iter()
            .map(|f| f.as_deref().unwrap_or_default())
            .chain(post.topics.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    pub fn matches_term(&self, post: &Post) -> bool {
        self.term.is_empty() || Self::haystack(post).contains(&self.term)
    }

    pub fn matches_book(&self, post: &Post) -> bool {
        self.book.is_empty() || post.bible_book.as_deref() == Some(self.book.as_str())
    }

    pub fn matches_topic(&self, post: &Post) -> bool {
        self.topic.is_empty() || post.topics.iter().any(|t| *t == self.topic)
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.matches_term(post) && self.matches_book(post) && self.matches_topic(post)
    }

    pub fn filter_posts<'p>(&self, posts: &'p [Post]) -> Vec<&'p Post> {
        posts.iter().filter(|p| self.matches(p)).collect()
    }
}
