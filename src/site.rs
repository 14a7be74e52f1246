use std::io;
use std::sync::Arc;
use std::time::Duration;

use spdlog::debug;

use crate::config::{Config, DEFAULT_RECENT_POST_COUNT, DEFAULT_SCROLL_DELAY_MS};
use crate::fetcher::Fetcher;
use crate::page::archive::{ArchiveController, ArchiveMode};
use crate::page::clipboard::PixCopy;
use crate::page::home::HomeController;
use crate::page::nav::highlight_nav;
use crate::page::PageView;
use crate::post::PostSource;
use crate::query_string::QueryString;
use crate::site_config::{load_site_config, SiteConfig};
use crate::view::post_renderer::PostRenderer;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiteSettings {
    pub recent_post_count: usize,
    pub scroll_delay: Duration,
}

impl Default for SiteSettings {
    fn default() -> Self {
        SiteSettings {
            recent_post_count: DEFAULT_RECENT_POST_COUNT,
            scroll_delay: Duration::from_millis(DEFAULT_SCROLL_DELAY_MS),
        }
    }
}

impl From<&Config> for SiteSettings {
    fn from(config: &Config) -> Self {
        SiteSettings {
            recent_post_count: config.recent_post_count(),
            scroll_delay: config.scroll_delay(),
        }
    }
}

/// Path and query of the page being loaded.
#[derive(Debug, Default)]
pub struct Location {
    pub path: String,
    pub query: QueryString,
}

impl Location {
    pub fn new(path: &str, query: &str) -> Self {
        Location {
            path: path.to_string(),
            query: QueryString::from(query),
        }
    }
}

/// What stays alive after the page load: the handlers for later events.
pub struct PageSession {
    pub archive: ArchiveMode,
    pub pix: Option<PixCopy>,
}

/// Site configuration and controllers for one page load.
pub struct Site {
    config: Arc<SiteConfig>,
    renderer: Arc<PostRenderer<'static>>,
    settings: SiteSettings,
}

impl Site {
    pub async fn init<F: Fetcher>(fetcher: &F, settings: SiteSettings) -> io::Result<Site> {
        let config = load_site_config(fetcher).await;
        Self::with_config(config, settings)
    }

    pub fn with_config(config: SiteConfig, settings: SiteSettings) -> io::Result<Site> {
        Ok(Site {
            config: Arc::new(config),
            renderer: Arc::new(PostRenderer::new()?),
            settings,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn home(&self) -> HomeController {
        HomeController::new(self.config.clone(), self.renderer.clone(), self.settings.recent_post_count)
    }

    pub fn archive(&self) -> ArchiveController {
        ArchiveController::new(self.config.clone(), self.renderer.clone(), self.settings.scroll_delay)
    }

    pub async fn load_page<V: PageView, S: PostSource>(&self, view: &mut V, source: &S, location: &Location) -> PageSession {
        debug!("Loading page {}", location.path);
        highlight_nav(view, &location.path);
        self.home().mount(view, source).await;
        let archive = self.archive().mount(view, source, &location.query).await;
        let pix = PixCopy::bind(&*view);

        PageSession { archive, pix }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::home::tests::StaticPosts;
    use crate::page::tests::TestView;
    use crate::page::Element;
    use crate::post::Post;
    use crate::site_config::tests::MapFetcher;
    use crate::site_config::SITE_CONFIG_RESOURCE;

    fn posts() -> StaticPosts {
        StaticPosts(Ok(vec![Post {
            id: Some("1".to_string()),
            title: Some("Escrito por {{AUTHOR}}".to_string()),
            topics: vec!["grace".to_string()],
            ..Default::default()
        }]))
    }

    #[tokio::test]
    async fn test_init_uses_site_json() {
        let fetcher = MapFetcher::with(SITE_CONFIG_RESOURCE, 200, r#"{"authorName": "Paulo"}"#);
        let site = Site::init(&fetcher, SiteSettings::default()).await.unwrap();
        assert_eq!(site.config().author_name(), "Paulo");

        let site = Site::init(&MapFetcher::default(), SiteSettings::default()).await.unwrap();
        assert_eq!(site.config(), &SiteConfig::fallback());
    }

    #[tokio::test]
    async fn test_home_page_load() {
        let site = Site::with_config(SiteConfig::fallback(), SiteSettings::default()).unwrap();
        let mut view = TestView::with(&[Element::RecentPosts, Element::CopyPix]);
        view.nav = vec![("index.html".to_string(), false), ("arquivos.html".to_string(), false)];

        let session = site.load_page(&mut view, &posts(), &Location::new("/", "")).await;
        assert!(matches!(session.archive, ArchiveMode::Unbound));
        assert!(session.pix.is_some());
        assert!(view.nav[0].1);
        assert!(!view.nav[1].1);
        assert!(view.html_of(Element::RecentPosts).contains("Escrito por Autor"));
    }

    #[tokio::test]
    async fn test_archive_page_load() {
        let settings = SiteSettings { scroll_delay: Duration::ZERO, ..Default::default() };
        let site = Site::with_config(SiteConfig::fallback(), settings).unwrap();
        let mut view = TestView::with(&[
            Element::ArchiveResults, Element::SearchTerm, Element::BookFilter, Element::TopicFilter, Element::ResultCount,
        ]);
        view.nav = vec![("arquivos.html".to_string(), false)];

        let session = site.load_page(&mut view, &posts(), &Location::new("/arquivos.html", "id=missing")).await;
        assert!(matches!(session.archive, ArchiveMode::DirectLookup { found: 0 }));
        assert!(session.archive.session().is_none());
        assert!(session.pix.is_none());
        assert!(view.nav[0].1);
        assert_eq!(view.text_of(Element::ResultCount), "0 texto(s)");
        assert_eq!(view.html_of(Element::ArchiveResults), r#"<div class="pad notice">Não achei nenhum texto com id "missing".</div>"#);
    }
}
