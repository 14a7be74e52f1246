use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::post::Post;
use crate::site_config::SiteConfig;
use crate::text_utils::{encode_uri_component, format_date};
use crate::tokens::apply_tokens;

pub const ARCHIVE_PAGE: &str = "arquivos.html";

// Every `{{field}}` is escaped by ramhorns: values go in raw and are escaped exactly once.
const POST_ITEM_TPL: &str = r##"
    <article class="post"{{#has_id}} id="post-{{id}}"{{/has_id}}>
      <div class="kicker">{{book}}{{#has_ref}} • {{bible_ref}}{{/has_ref}}</div>
      <h2><a href="{{link}}">{{title}}</a></h2>
      <div class="meta">
        <span>📅 {{date}}</span>
        <span>🏷️ {{#has_topics}}{{topic_list}}{{/has_topics}}{{^has_topics}}Sem temas{{/has_topics}}</span>
      </div>
      {{#has_excerpt}}<p class="small">{{excerpt}}</p>{{/has_excerpt}}
      {{#tags}}<span class="tag">{{tag}}</span>{{/tags}}
      {{#show_content}}<hr class="sep"><div class="small" style="white-space:pre-wrap">{{content}}</div>{{/show_content}}
    </article>
"##;

#[derive(ramhorns::Content)]
struct ViewTag<'a> {
    tag: &'a str,
}

#[derive(ramhorns::Content)]
struct PostItem<'a> {
    has_id: bool,
    id: &'a str,
    book: &'a str,
    has_ref: bool,
    bible_ref: &'a str,
    link: String,
    title: String,
    date: String,
    has_topics: bool,
    topic_list: String,
    has_excerpt: bool,
    excerpt: String,
    tags: Vec<ViewTag<'a>>,
    show_content: bool,
    content: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderOptions {
    pub show_content: bool,
}

impl RenderOptions {
    pub fn with_content() -> Self {
        RenderOptions { show_content: true }
    }
}

pub fn post_link(post: &Post) -> String {
    match post.id.as_deref() {
        Some(id) if !id.is_empty() => format!("{}?id={}", ARCHIVE_PAGE, encode_uri_component(id)),
        _ => ARCHIVE_PAGE.to_string(),
    }
}

pub struct PostRenderer<'a> {
    pub template: Template<'a>,
}

impl PostRenderer<'static> {
    pub fn new() -> io::Result<PostRenderer<'static>> {
        Self::from_template(POST_ITEM_TPL)
    }
}

impl<'a> PostRenderer<'a> {
    pub fn from_template(item_tpl_src: &'a str) -> io::Result<PostRenderer<'a>> {
        let template = match Template::new(item_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing post item template: {}", e)));
            }
        };

        Ok(PostRenderer {
            template,
        })
    }

    pub fn render_post_item(&self, post: &Post, config: &SiteConfig, options: RenderOptions) -> String {
        let id = post.id();
        let bible_ref = post.bible_ref();
        let excerpt = apply_tokens(post.excerpt.as_deref(), config);
        let tags: Vec<ViewTag> = post.topics.iter().map(|t| ViewTag { tag: t.as_str() }).collect();
        let content = if options.show_content {
            apply_tokens(post.content.as_deref(), config)
        } else {
            String::new()
        };

        self.template.render(&PostItem {
            has_id: !id.is_empty(),
            id,
            book: post.bible_book(),
            has_ref: !bible_ref.is_empty(),
            bible_ref,
            link: post_link(post),
            title: apply_tokens(post.title.as_deref(), config),
            date: format_date(post.date.as_deref()),
            has_topics: !post.topics.is_empty(),
            topic_list: post.topics.join(", "),
            has_excerpt: !excerpt.is_empty(),
            excerpt,
            tags,
            show_content: options.show_content,
            content,
        })
    }
}
