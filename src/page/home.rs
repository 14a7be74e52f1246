use std::sync::Arc;

use spdlog::error;

use crate::page::{is_bound, Element, PageView};
use crate::post::PostSource;
use crate::site_config::SiteConfig;
use crate::view::list_renderer::{render_error, render_post_list};
use crate::view::post_renderer::{PostRenderer, RenderOptions};

const REQUIRED: &[Element] = &[Element::RecentPosts];

/// Latest posts on the home page.
pub struct HomeController {
    config: Arc<SiteConfig>,
    renderer: Arc<PostRenderer<'static>>,
    recent_count: usize,
}

impl HomeController {
    pub fn new(config: Arc<SiteConfig>, renderer: Arc<PostRenderer<'static>>, recent_count: usize) -> Self {
        HomeController { config, renderer, recent_count }
    }

    /// Returns whether the page had a place for the list.
    pub async fn mount<V: PageView, S: PostSource>(&self, view: &mut V, source: &S) -> bool {
        if !is_bound(&*view, "Home list", REQUIRED) {
            return false;
        }

        let html = match source.load_posts().await {
            Ok(posts) => {
                let latest = posts.iter().take(self.recent_count);
                render_post_list(&self.renderer, latest, &self.config, RenderOptions::default())
            }
            Err(e) => {
                error!("Error loading posts for the home page: {}", e);
                render_error(&e)
            }
        };
        view.set_html(Element::RecentPosts, html);
        true
    }
}
