//! Page controllers and the view binding they drive.
//!
//! A controller never assumes a page layout. It declares the elements it needs and
//! does nothing when the view lacks any of them, so a page without an archive
//! section simply skips the archive controller.

use spdlog::debug;

pub mod archive;
pub mod clipboard;
pub mod home;
pub mod nav;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    RecentPosts,
    ArchiveResults,
    SearchTerm,
    BookFilter,
    TopicFilter,
    ResultCount,
    CopyPix,
    PixKey,
}

impl Element {
    pub fn dom_id(&self) -> &'static str {
        match self {
            Element::RecentPosts => "recentPosts",
            Element::ArchiveResults => "archiveResults",
            Element::SearchTerm => "q",
            Element::BookFilter => "book",
            Element::TopicFilter => "topic",
            Element::ResultCount => "count",
            Element::CopyPix => "copyPix",
            Element::PixKey => "pixKey",
        }
    }
}

/// What a controller can see and change on a page.
pub trait PageView {
    fn has(&self, element: Element) -> bool;

    /// Replaces the markup inside the element.
    fn set_html(&mut self, element: Element, html: String);

    /// Replaces the text of the element (plain text, never markup).
    fn set_text(&mut self, element: Element, text: String);

    /// Current value of an input or select, or the text of any other element.
    fn value(&self, element: Element) -> Option<String>;

    /// `href` of every navigation link, in page order.
    fn nav_links(&self) -> Vec<String>;

    fn mark_nav_active(&mut self, index: usize);

    /// Best effort. Returns false when no element has that DOM id.
    fn scroll_into_view(&mut self, dom_id: &str) -> bool;
}

pub(crate) fn is_bound<V: PageView>(view: &V, controller: &str, required: &[Element]) -> bool {
    match required.iter().find(|e| !view.has(**e)) {
        Some(missing) => {
            debug!("{} not mounted: #{} is missing", controller, missing.dom_id());
            false
        }
        None => true,
    }
}
