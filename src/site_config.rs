use serde::Deserialize;
use spdlog::{debug, warn};

use crate::fetcher::Fetcher;
use crate::post::lenient_text;

pub const SITE_CONFIG_RESOURCE: &str = "./data/site.json";

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    #[serde(default, deserialize_with = "lenient_text")]
    pub author_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub site_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub tagline: Option<String>,
}

impl SiteConfig {
    pub fn fallback() -> Self {
        SiteConfig {
            author_name: Some("Autor".to_string()),
            site_name: Some("Ad Veritatem".to_string()),
            tagline: Some("Um caminhar pela Palavra".to_string()),
        }
    }

    pub fn author_name(&self) -> &str {
        self.author_name.as_deref().unwrap_or_default()
    }

    pub fn site_name(&self) -> &str {
        self.site_name.as_deref().unwrap_or_default()
    }

    pub fn tagline(&self) -> &str {
        self.tagline.as_deref().unwrap_or_default()
    }
}

async fn fetch_site_config<F: Fetcher>(fetcher: &F) -> anyhow::Result<SiteConfig> {
    let res = fetcher.fetch(SITE_CONFIG_RESOURCE).await?;
    if !res.is_ok() {
        anyhow::bail!("sem site.json (status {})", res.status);
    }
    Ok(serde_json::from_str(&res.body)?)
}

/// Never fails: any problem reading the site configuration falls back to the defaults.
pub async fn load_site_config<F: Fetcher>(fetcher: &F) -> SiteConfig {
    match fetch_site_config(fetcher).await {
        Ok(cfg) => {
            debug!("Site configuration loaded from {}", SITE_CONFIG_RESOURCE);
            cfg
        }
        Err(e) => {
            warn!("Using default site configuration: {}", e);
            SiteConfig::fallback()
        }
    }
}
