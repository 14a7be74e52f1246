use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use spdlog::debug;

use crate::fetcher::Fetcher;

pub const POSTS_RESOURCE: &str = "./data/posts.json";

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: Option<String>,
    pub bible_book: Option<String>,
    pub bible_ref: Option<String>,
    #[serde(default, deserialize_with = "lenient_topics")]
    pub topics: Vec<String>,
}

/// Strings as given, numbers as their decimal text. Anything else reads as absent.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    };
    Ok(text)
}

/// Anything other than a list reads as no topics. Non-string entries are dropped.
fn lenient_topics<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let topics = match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => vec![],
    };
    Ok(topics)
}

impl Post {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    pub fn bible_book(&self) -> &str {
        self.bible_book.as_deref().unwrap_or_default()
    }

    pub fn bible_ref(&self) -> &str {
        self.bible_ref.as_deref().unwrap_or_default()
    }
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "id={}, date={}, book={} {}, topics=[{}]\ntitle={}",
               self.id(),
               self.date.as_deref().unwrap_or_default(),
               self.bible_book(),
               self.bible_ref(),
               self.topics.join(", "),
               self.title.as_deref().unwrap_or_default(),
        )
    }
}

/// Supplies the ordered post list for one page load.
#[allow(async_fn_in_trait)]
pub trait PostSource {
    async fn load_posts(&self) -> anyhow::Result<Vec<Post>>;
}

/// Reads `./data/posts.json`, a JSON array of posts.
pub struct JsonPostSource<F> {
    fetcher: F,
}

impl<F: Fetcher> JsonPostSource<F> {
    pub fn new(fetcher: F) -> Self {
        JsonPostSource { fetcher }
    }
}

impl<F: Fetcher> PostSource for JsonPostSource<F> {
    async fn load_posts(&self) -> anyhow::Result<Vec<Post>> {
        let res = self.fetcher.fetch(POSTS_RESOURCE).await?;
        if !res.is_ok() {
            anyhow::bail!("Falha ao carregar posts (HTTP {})", res.status);
        }

        let posts: Vec<Post> = serde_json::from_str(&res.body)
            .map_err(|e| anyhow::anyhow!("posts.json inválido: {}", e))?;
        debug!("Loaded {} posts", posts.len());
        Ok(posts)
    }
}
