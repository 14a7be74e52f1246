use std::io;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn ok(body: String) -> Self {
        FetchResponse { status: 200, body }
    }

    pub fn not_found() -> Self {
        FetchResponse { status: 404, body: String::new() }
    }

    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Access to site resources such as `./data/site.json`.
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    async fn fetch(&self, resource: &str) -> io::Result<FetchResponse>;
}

/// Serves resources from a directory on disk. Missing files answer 404.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root_dir: PathBuf,
}

impl FsFetcher {
    pub fn new(root_dir: &Path) -> Self {
        FsFetcher { root_dir: root_dir.to_path_buf() }
    }

    fn resolve(&self, resource: &str) -> io::Result<PathBuf> {
        let relative = Path::new(resource.trim_start_matches("./").trim_start_matches('/'));
        let escapes_root = relative.components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes_root {
            return Err(io::Error::new(ErrorKind::PermissionDenied, format!("Resource outside of site: {}", resource)));
        }
        Ok(self.root_dir.join(relative))
    }
}

impl Fetcher for FsFetcher {
    async fn fetch(&self, resource: &str) -> io::Result<FetchResponse> {
        let path = self.resolve(resource)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(body) => Ok(FetchResponse::ok(body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(FetchResponse::not_found()),
            Err(e) => Err(e),
        }
    }
}
