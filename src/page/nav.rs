use crate::page::PageView;

pub const DEFAULT_PAGE: &str = "index.html";

/// Last segment of the request path, `index.html` for a directory.
pub fn page_name(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name,
        _ => DEFAULT_PAGE,
    }
}

/// Marks the navigation links pointing at the current page. No match is not an error.
pub fn highlight_nav<V: PageView>(view: &mut V, path: &str) {
    let current = page_name(path);
    let active: Vec<usize> = view.nav_links().iter()
        .enumerate()
        .filter(|(_, href)| href.as_str() == current)
        .map(|(i, _)| i)
        .collect();

    for index in active {
        view.mark_nav_active(index);
    }
}
