use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use ntex::web;
use ntex::web::HttpRequest;
use ntex_files::NamedFile;
use spdlog::{error, info};

use crate::config::Config;
use crate::fetcher::FsFetcher;
use crate::page::Element;
use crate::post::JsonPostSource;
use crate::site::{Location, Site, SiteSettings};
use crate::view::page_renderer::{NavLink, PageRenderer, StaticPage};

struct AppState {
    config: Config,
}

const HOME_ELEMENTS: &[Element] = &[Element::RecentPosts];

const ARCHIVE_ELEMENTS: &[Element] = &[
    Element::ArchiveResults,
    Element::SearchTerm,
    Element::BookFilter,
    Element::TopicFilter,
    Element::ResultCount,
];

fn nav_links() -> Vec<NavLink> {
    vec![
        NavLink::new("index.html", "Início"),
        NavLink::new("arquivos.html", "Arquivos"),
    ]
}

pub fn read_template(tpl_dir: &Path, file_name: &str) -> io::Result<String> {
    let full_path = tpl_dir.join(file_name);
    std::fs::read_to_string(full_path)
}

/// One page load: fresh site configuration and posts, controllers run on a server-side page.
/// The returned `PageSession` is dropped. Filter changes come back as a new GET of the form,
/// and the served pages have no PIX copy button, so the clipboard is left to an embedding host.
async fn render_page(config: &Config, tpl_name: &str, elements: &[Element], req: &HttpRequest) -> io::Result<String> {
    let fetcher = FsFetcher::new(&config.paths.site_dir);
    // The browser does the scrolling, through the script in the page template.
    let settings = SiteSettings {
        scroll_delay: Duration::ZERO,
        ..SiteSettings::from(config)
    };
    let site = Site::init(&fetcher, settings).await?;
    let source = JsonPostSource::new(fetcher);

    let location = Location::new(req.path(), req.uri().query().unwrap_or_default());
    let mut page = StaticPage::new(elements, nav_links());
    page.fill(Element::SearchTerm, location.query.get("q").unwrap_or_default());
    page.fill(Element::BookFilter, location.query.get("book").unwrap_or_default());
    page.fill(Element::TopicFilter, location.query.get("topic").unwrap_or_default());

    site.load_page(&mut page, &source, &location).await;

    let template_src = read_template(&config.paths.template_dir, tpl_name)?;
    let renderer = PageRenderer::new(&template_src)?;
    Ok(renderer.render(site.config(), &page, config.scroll_delay()))
}

async fn page_response(config: &Config, tpl_name: &str, elements: &[Element], req: &HttpRequest) -> web::HttpResponse {
    match render_page(config, tpl_name, elements, req).await {
        Ok(rendered) => web::HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(rendered),
        Err(e) => {
            error!("Error rendering {}: {}", req.path(), e);
            web::HttpResponse::InternalServerError()
                .body(format!("Error rendering {}: {}", req.path(), e))
        }
    }
}

#[web::get("/")]
async fn index(req: HttpRequest, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    page_response(&state.config, "index.tpl", HOME_ELEMENTS, &req).await
}

#[web::get("/index.html")]
async fn index_html(req: HttpRequest, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    page_response(&state.config, "index.tpl", HOME_ELEMENTS, &req).await
}

#[web::get("/arquivos.html")]
async fn archive(req: HttpRequest, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    page_response(&state.config, "arquivos.tpl", ARCHIVE_ELEMENTS, &req).await
}

fn site_file(site_dir: &Path, sub_dir: &str, file_name: &str) -> Result<NamedFile, web::Error> {
    if file_name.contains("..") || file_name.contains('/') || file_name.contains('\\') {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let file_path = site_dir.join(sub_dir).join(file_name);
    Ok(NamedFile::open(file_path)?)
}

#[web::get("/data/{file_name}")]
async fn data_files(path: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> Result<NamedFile, web::Error> {
    site_file(&state.config.paths.site_dir, "data", &path.into_inner())
}

#[web::get("/public/{file_name}")]
async fn public_files(path: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> Result<NamedFile, web::Error> {
    site_file(&state.config.paths.site_dir, "public", &path.into_inner())
}

pub async fn server_run(config: Config) -> io::Result<()> {
    info!("Site directory: {}", config.paths.site_dir.display());
    info!("Template directory: {}", config.paths.template_dir.display());

    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let app_state = Arc::new(AppState {
        config,
    });

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(index)
            .service(index_html)
            .service(archive)
            .service(data_files)
            .service(public_files)
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}
