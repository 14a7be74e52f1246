use std::sync::Arc;
use std::time::Duration;

use spdlog::{debug, error, info};

use crate::filter::{find_by_id, Facets, PostFilter};
use crate::page::{is_bound, Element, PageView};
use crate::post::{Post, PostSource};
use crate::query_string::QueryString;
use crate::site_config::SiteConfig;
use crate::view::list_renderer::{render_count, render_error, render_not_found, render_notice, render_options, render_post_list, ALL_BOOKS, ALL_TOPICS, NO_RESULTS};
use crate::view::post_renderer::{PostRenderer, RenderOptions};

const REQUIRED: &[Element] = &[
    Element::ArchiveResults,
    Element::SearchTerm,
    Element::BookFilter,
    Element::TopicFilter,
    Element::ResultCount,
];

const FILTER_INPUTS: &[Element] = &[Element::SearchTerm, Element::BookFilter, Element::TopicFilter];

pub enum ArchiveMode {
    /// The page has no archive section.
    Unbound,
    /// Posts could not be loaded; the error is shown in the results.
    Failed,
    /// `?id=` was given: filters stay unwired.
    DirectLookup { found: usize },
    Interactive(FilterSession),
}

impl ArchiveMode {
    pub fn session(&self) -> Option<&FilterSession> {
        match self {
            ArchiveMode::Interactive(session) => Some(session),
            _ => None,
        }
    }
}

/// Live filtering over the posts loaded for this page.
pub struct FilterSession {
    posts: Arc<Vec<Post>>,
    config: Arc<SiteConfig>,
    renderer: Arc<PostRenderer<'static>>,
}

impl FilterSession {
    fn current_filter<V: PageView>(view: &V) -> PostFilter {
        let value = |e: Element| view.value(e).unwrap_or_default();
        PostFilter::new(&value(Element::SearchTerm), &value(Element::BookFilter), &value(Element::TopicFilter))
    }

    /// Recomputes the list from the current inputs. Returns the number of matches.
    pub fn apply<V: PageView>(&self, view: &mut V) -> usize {
        let filter = Self::current_filter(&*view);
        let filtered = filter.filter_posts(&self.posts);
        debug!("Archive filter {:?} matched {} posts", filter, filtered.len());

        view.set_text(Element::ResultCount, render_count(filtered.len()));
        let html = if filtered.is_empty() {
            render_notice(NO_RESULTS)
        } else {
            render_post_list(&self.renderer, filtered.iter().copied(), &self.config, RenderOptions::with_content())
        };
        view.set_html(Element::ArchiveResults, html);
        filtered.len()
    }

    /// Input or change event. Only the three filter inputs trigger a recompute.
    pub fn on_input<V: PageView>(&self, view: &mut V, element: Element) -> Option<usize> {
        if !FILTER_INPUTS.contains(&element) {
            return None;
        }
        Some(self.apply(view))
    }
}

pub struct ArchiveController {
    config: Arc<SiteConfig>,
    renderer: Arc<PostRenderer<'static>>,
    scroll_delay: Duration,
}

impl ArchiveController {
    pub fn new(config: Arc<SiteConfig>, renderer: Arc<PostRenderer<'static>>, scroll_delay: Duration) -> Self {
        ArchiveController { config, renderer, scroll_delay }
    }

    pub async fn mount<V: PageView, S: PostSource>(&self, view: &mut V, source: &S, query: &QueryString) -> ArchiveMode {
        if !is_bound(&*view, "Archive", REQUIRED) {
            return ArchiveMode::Unbound;
        }

        let posts = match source.load_posts().await {
            Ok(posts) => posts,
            Err(e) => {
                error!("Error loading posts for the archive: {}", e);
                view.set_html(Element::ArchiveResults, render_error(&e));
                return ArchiveMode::Failed;
            }
        };

        let facets = Facets::derive(&posts);
        let book = view.value(Element::BookFilter).unwrap_or_default();
        let topic = view.value(Element::TopicFilter).unwrap_or_default();
        view.set_html(Element::BookFilter, render_options(ALL_BOOKS, &facets.books, &book));
        view.set_html(Element::TopicFilter, render_options(ALL_TOPICS, &facets.topics, &topic));

        if let Some(focus_id) = query.get_id() {
            let found = self.direct_lookup(view, &posts, &focus_id).await;
            return ArchiveMode::DirectLookup { found };
        }

        let session = FilterSession {
            posts: Arc::new(posts),
            config: self.config.clone(),
            renderer: self.renderer.clone(),
        };
        session.apply(view);
        ArchiveMode::Interactive(session)
    }

    async fn direct_lookup<V: PageView>(&self, view: &mut V, posts: &[Post], focus_id: &str) -> usize {
        let found = find_by_id(posts, focus_id);
        info!("Archive lookup for id {}: {} match(es)", focus_id, found.len());

        view.set_text(Element::ResultCount, render_count(found.len()));
        let html = if found.is_empty() {
            render_not_found(focus_id)
        } else {
            render_post_list(&self.renderer, found.iter().copied(), &self.config, RenderOptions::with_content())
        };
        view.set_html(Element::ArchiveResults, html);

        if !found.is_empty() {
            if !self.scroll_delay.is_zero() {
                tokio::time::sleep(self.scroll_delay).await;
            }
            let dom_id = format!("post-{}", focus_id);
            if !view.scroll_into_view(&dom_id) {
                debug!("Nothing to scroll to: #{} not in the page", dom_id);
            }
        }

        found.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::home::tests::StaticPosts;
    use crate::page::tests::TestView;

    fn controller() -> ArchiveController {
        ArchiveController::new(Arc::new(SiteConfig::fallback()), Arc::new(PostRenderer::new().unwrap()), Duration::ZERO)
    }

    fn archive_view() -> TestView {
        TestView::with(REQUIRED)
    }

    fn posts() -> StaticPosts {
        StaticPosts(Ok(vec![
            Post {
                id: Some("1".to_string()),
                title: Some("<b>Hi</b>".to_string()),
                bible_book: Some("John".to_string()),
                topics: vec!["grace".to_string()],
                ..Default::default()
            },
            Post {
                id: Some("2".to_string()),
                title: Some("Law".to_string()),
                bible_book: Some("Exodus".to_string()),
                topics: vec!["law".to_string(), "grace".to_string()],
                ..Default::default()
            },
        ]))
    }

    #[tokio::test]
    async fn test_interactive_term() {
        let mut view = archive_view();
        let mode = controller().mount(&mut view, &posts(), &QueryString::from("")).await;
        let session = mode.session().unwrap();
        assert_eq!(view.text_of(Element::ResultCount), "2 texto(s)");

        view.input(Element::SearchTerm, "grace");
        assert_eq!(session.on_input(&mut view, Element::SearchTerm), Some(2));
        assert!(view.html_of(Element::ArchiveResults).contains("&lt;b&gt;Hi&lt;/b&gt;"));

        view.input(Element::SearchTerm, "nope");
        assert_eq!(session.on_input(&mut view, Element::SearchTerm), Some(0));
        assert_eq!(view.text_of(Element::ResultCount), "0 texto(s)");
        assert_eq!(view.html_of(Element::ArchiveResults), r#"<div class="pad notice">Nenhum texto encontrado com esses filtros.</div>"#);
    }

    #[tokio::test]
    async fn test_interactive_book_and_topic() {
        let mut view = archive_view();
        let mode = controller().mount(&mut view, &posts(), &QueryString::from("")).await;
        let session = mode.session().unwrap();

        assert!(view.html_of(Element::BookFilter).starts_with(r#"<option value="">Todos os livros</option><option value="Exodus">"#));
        assert!(view.html_of(Element::TopicFilter).contains(r#"<option value="grace">grace</option><option value="law">law</option>"#));

        view.input(Element::TopicFilter, "law");
        assert_eq!(session.on_input(&mut view, Element::TopicFilter), Some(1));
        view.input(Element::BookFilter, "John");
        assert_eq!(session.on_input(&mut view, Element::BookFilter), Some(0));
        view.input(Element::TopicFilter, "");
        assert_eq!(session.on_input(&mut view, Element::TopicFilter), Some(1));
        assert!(view.html_of(Element::ArchiveResults).contains("<hr class=\"sep\">"));

        assert_eq!(session.on_input(&mut view, Element::ResultCount), None);
    }

    #[tokio::test]
    async fn test_prefilled_inputs_apply_at_mount() {
        let mut view = archive_view();
        view.input(Element::BookFilter, "Exodus");
        controller().mount(&mut view, &posts(), &QueryString::from("")).await;
        assert_eq!(view.text_of(Element::ResultCount), "1 texto(s)");
        assert!(view.html_of(Element::BookFilter).contains(r#"<option value="Exodus" selected>"#));
    }

    #[tokio::test]
    async fn test_direct_lookup() {
        let mut view = archive_view();
        let mode = controller().mount(&mut view, &posts(), &QueryString::from("id=2")).await;
        assert!(matches!(mode, ArchiveMode::DirectLookup { found: 1 }));
        assert!(mode.session().is_none());

        assert_eq!(view.text_of(Element::ResultCount), "1 texto(s)");
        let html = view.html_of(Element::ArchiveResults).to_string();
        assert!(html.contains(r#"id="post-2""#));
        assert!(html.contains("<hr class=\"sep\">"));
        assert_eq!(view.scrolled, ["post-2"]);
    }

    #[tokio::test]
    async fn test_direct_lookup_not_found() {
        let mut view = archive_view();
        let mode = controller().mount(&mut view, &posts(), &QueryString::from("id=missing")).await;
        assert!(matches!(mode, ArchiveMode::DirectLookup { found: 0 }));
        assert_eq!(view.text_of(Element::ResultCount), "0 texto(s)");
        assert_eq!(view.html_of(Element::ArchiveResults), r#"<div class="pad notice">Não achei nenhum texto com id "missing".</div>"#);
        assert!(view.scrolled.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_ids_render_all() {
        let mut list = posts().0.unwrap();
        list[1].id = Some("1".to_string());
        let mut view = archive_view();
        let mode = controller().mount(&mut view, &StaticPosts(Ok(list)), &QueryString::from("id=1")).await;
        assert!(matches!(mode, ArchiveMode::DirectLookup { found: 2 }));
        assert_eq!(view.html_of(Element::ArchiveResults).matches("<article").count(), 2);
    }

    #[tokio::test]
    async fn test_blank_id_is_interactive() {
        let mut view = archive_view();
        let mode = controller().mount(&mut view, &posts(), &QueryString::from("id=%20%20")).await;
        assert!(mode.session().is_some());
    }

    #[tokio::test]
    async fn test_load_failure_and_missing_elements() {
        let mut view = archive_view();
        let mode = controller().mount(&mut view, &StaticPosts(Err("offline".to_string())), &QueryString::from("")).await;
        assert!(matches!(mode, ArchiveMode::Failed));
        assert_eq!(view.html_of(Element::ArchiveResults), r#"<div class="pad notice">Erro: offline</div>"#);

        let mut view = TestView::with(&[Element::ArchiveResults, Element::SearchTerm]);
        let mode = controller().mount(&mut view, &posts(), &QueryString::from("")).await;
        assert!(matches!(mode, ArchiveMode::Unbound));
        assert_eq!(view.html_of(Element::ArchiveResults), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_scroll_waits_for_delay() {
        let archive = ArchiveController::new(Arc::new(SiteConfig::fallback()), Arc::new(PostRenderer::new().unwrap()), Duration::from_millis(50));
        let mut view = archive_view();
        let start = tokio::time::Instant::now();
        archive.mount(&mut view, &posts(), &QueryString::from("id=1")).await;
        assert!(start.elapsed() >= Duration::from_millis(50));
        assert_eq!(view.scrolled, ["post-1"]);
    }
}
