use std::collections::HashMap;

#[derive(PartialEq, Debug, Default)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    /// Parses `a=1&b=2`. Invalid input reads as empty. The first value of a repeated key wins.
    pub fn from(buf: &str) -> Self {
        let vs: Vec<(String, String)> = serde_urlencoded::from_str(buf.trim_start_matches('?')).unwrap_or_else(|_| vec![]);
        let mut items: HashMap<String, String> = HashMap::new();
        for (k, v) in vs {
            items.entry(k).or_insert(v);
        }

        QueryString {
            items,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    /// Post id for the archive direct lookup. Blank ids count as absent.
    pub fn get_id(&self) -> Option<String> {
        self.get("id")
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }
}
