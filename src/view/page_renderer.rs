use std::collections::HashMap;
use std::io;
use std::io::ErrorKind;
use std::time::Duration;

use ramhorns::Template;

use crate::page::{Element, PageView};
use crate::site_config::SiteConfig;
use crate::text_utils::escape_html;

#[derive(Debug, Clone, PartialEq)]
pub struct NavLink {
    pub href: String,
    pub label: String,
    pub active: bool,
}

impl NavLink {
    pub fn new(href: &str, label: &str) -> Self {
        NavLink { href: href.to_string(), label: label.to_string(), active: false }
    }
}

#[derive(Debug, Default)]
struct Slot {
    html: String,
    text: String,
}

/// Server-side page: the elements a template offers, filled in by the controllers.
#[derive(Debug, Default)]
pub struct StaticPage {
    slots: HashMap<Element, Slot>,
    nav: Vec<NavLink>,
    scroll_target: Option<String>,
}

impl StaticPage {
    pub fn new(elements: &[Element], nav: Vec<NavLink>) -> Self {
        let slots = elements.iter().map(|e| (*e, Slot::default())).collect();
        StaticPage { slots, nav, scroll_target: None }
    }

    /// Sets the initial value of an input, as a browser restoring a form would.
    pub fn fill(&mut self, element: Element, value: &str) {
        if let Some(slot) = self.slots.get_mut(&element) {
            slot.text = value.to_string();
        }
    }

    pub fn html(&self, element: Element) -> &str {
        self.slots.get(&element).map(|s| s.html.as_str()).unwrap_or_default()
    }

    pub fn text(&self, element: Element) -> &str {
        self.slots.get(&element).map(|s| s.text.as_str()).unwrap_or_default()
    }

    pub fn nav(&self) -> &[NavLink] {
        &self.nav
    }

    pub fn scroll_target(&self) -> Option<&str> {
        self.scroll_target.as_deref()
    }
}

impl PageView for StaticPage {
    fn has(&self, element: Element) -> bool {
        self.slots.contains_key(&element)
    }

    fn set_html(&mut self, element: Element, html: String) {
        if let Some(slot) = self.slots.get_mut(&element) {
            slot.html = html;
        }
    }

    fn set_text(&mut self, element: Element, text: String) {
        if let Some(slot) = self.slots.get_mut(&element) {
            slot.text = text;
        }
    }

    fn value(&self, element: Element) -> Option<String> {
        self.slots.get(&element).map(|s| s.text.clone())
    }

    fn nav_links(&self) -> Vec<String> {
        self.nav.iter().map(|n| n.href.clone()).collect()
    }

    fn mark_nav_active(&mut self, index: usize) {
        if let Some(link) = self.nav.get_mut(index) {
            link.active = true;
        }
    }

    fn scroll_into_view(&mut self, dom_id: &str) -> bool {
        let anchor = format!("id=\"{}\"", escape_html(dom_id));
        let found = self.slots.values().any(|s| s.html.contains(&anchor));
        if found {
            self.scroll_target = Some(dom_id.to_string());
        }
        found
    }
}

#[derive(ramhorns::Content)]
struct ViewNav<'a> {
    href: &'a str,
    label: &'a str,
    active: bool,
}

#[derive(ramhorns::Content)]
struct PageContent<'a> {
    site_name: &'a str,
    tagline: &'a str,
    author_name: &'a str,
    nav: Vec<ViewNav<'a>>,
    recent_posts: &'a str,
    archive_results: &'a str,
    search_term: &'a str,
    book_options: &'a str,
    topic_options: &'a str,
    result_count: &'a str,
    has_scroll_target: bool,
    scroll_target: String,
    scroll_delay_ms: u64,
}

/// JSON string literal that is safe inside a `<script>` block.
fn script_string(value: &str) -> String {
    serde_json::Value::String(value.to_string())
        .to_string()
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
}

fn millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}

pub struct PageRenderer<'a> {
    pub template: Template<'a>,
}

impl PageRenderer<'_> {
    pub fn new(page_tpl_src: &str) -> io::Result<PageRenderer> {
        let template = match Template::new(page_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing page template: {}", e)));
            }
        };

        Ok(PageRenderer {
            template,
        })
    }

    /// Markup slots go in with `{{{...}}}`, text slots with `{{...}}`.
    /// The page scrolls to its target after `scroll_delay`, once loaded in the browser.
    pub fn render(&self, config: &SiteConfig, page: &StaticPage, scroll_delay: Duration) -> String {
        let nav = page.nav().iter()
            .map(|n| ViewNav { href: n.href.as_str(), label: n.label.as_str(), active: n.active })
            .collect();

        self.template.render(&PageContent {
            site_name: config.site_name(),
            tagline: config.tagline(),
            author_name: config.author_name(),
            nav,
            recent_posts: page.html(Element::RecentPosts),
            archive_results: page.html(Element::ArchiveResults),
            search_term: page.text(Element::SearchTerm),
            book_options: page.html(Element::BookFilter),
            topic_options: page.html(Element::TopicFilter),
            result_count: page.text(Element::ResultCount),
            has_scroll_target: page.scroll_target().is_some(),
            scroll_target: page.scroll_target().map(script_string).unwrap_or_default(),
            scroll_delay_ms: millis(scroll_delay),
        })
    }
}
