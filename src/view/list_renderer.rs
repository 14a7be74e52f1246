use crate::post::Post;
use crate::site_config::SiteConfig;
use crate::text_utils::escape_html;
use crate::view::post_renderer::{PostRenderer, RenderOptions};

pub const NO_RESULTS: &str = "Nenhum texto encontrado com esses filtros.";
pub const ALL_BOOKS: &str = "Todos os livros";
pub const ALL_TOPICS: &str = "Todos os temas";

pub fn render_notice(message: &str) -> String {
    format!(r#"<div class="pad notice">{}</div>"#, message)
}

pub fn render_error(err: &anyhow::Error) -> String {
    render_notice(&format!("Erro: {}", escape_html(&err.to_string())))
}

pub fn render_not_found(id: &str) -> String {
    render_notice(&format!("Não achei nenhum texto com id \"{}\".", escape_html(id)))
}

pub fn render_count(count: usize) -> String {
    format!("{} texto(s)", count)
}

/// Renders the items back to back. An empty slice gives an empty string.
pub fn render_post_list<'p, I>(renderer: &PostRenderer, posts: I, config: &SiteConfig, options: RenderOptions) -> String
where
    I: IntoIterator<Item = &'p Post>,
{
    posts.into_iter()
        .map(|p| renderer.render_post_item(p, config, options))
        .collect()
}

/// `<option>` list for a facet select, with an empty "all" entry first.
pub fn render_options(all_label: &str, values: &[String], selected: &str) -> String {
    let mut res = format!(r#"<option value="">{}</option>"#, all_label);
    for value in values {
        let value = escape_html(value);
        let selected_attr = if !selected.is_empty() && value == escape_html(selected) { " selected" } else { "" };
        res.push_str(&format!(r#"<option value="{0}"{1}>{0}</option>"#, value, selected_attr));
    }
    res
}
