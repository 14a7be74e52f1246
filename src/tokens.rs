use crate::site_config::SiteConfig;

pub const AUTHOR_TOKEN: &str = "{{AUTHOR}}";
pub const SITE_NAME_TOKEN: &str = "{{SITE_NAME}}";
pub const TAGLINE_TOKEN: &str = "{{TAGLINE}}";

/// Replaces the site tokens in raw (unescaped) text.
pub fn apply_tokens(text: Option<&str>, config: &SiteConfig) -> String {
    let Some(text) = text.filter(|t| !t.is_empty()) else {
        return String::new();
    };

    if !text.contains("{{") {
        return text.to_string();
    }

    text.replace(AUTHOR_TOKEN, config.author_name())
        .replace(SITE_NAME_TOKEN, config.site_name())
        .replace(TAGLINE_TOKEN, config.tagline())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_all_tokens() {
        let cfg = SiteConfig::fallback();
        let res = apply_tokens(Some("{{SITE_NAME}} por {{AUTHOR}}: {{TAGLINE}}. {{AUTHOR}}!"), &cfg);
        assert_eq!(res, "Ad Veritatem por Autor: Um caminhar pela Palavra. Autor!");
    }

    #[test]
    fn test_empty_config_removes_tokens() {
        let cfg = SiteConfig::default();
        let res = apply_tokens(Some("[{{AUTHOR}}][{{SITE_NAME}}][{{TAGLINE}}]"), &cfg);
        assert_eq!(res, "[][][]");
        assert!(!res.contains("{{"));
    }

    #[test]
    fn test_empty_and_plain_text() {
        let cfg = SiteConfig::fallback();
        assert_eq!(apply_tokens(None, &cfg), "");
        assert_eq!(apply_tokens(Some(""), &cfg), "");

        let plain = "Sem marcadores, {{OUTRO}} fica.";
        let once = apply_tokens(Some(plain), &cfg);
        assert_eq!(once, plain);
        assert_eq!(apply_tokens(Some(&once), &cfg), plain);
    }

    #[test]
    fn test_values_are_not_escaped_here() {
        let cfg = SiteConfig {
            author_name: Some("<b>Eu</b>".to_string()),
            ..Default::default()
        };
        assert_eq!(apply_tokens(Some("{{AUTHOR}}"), &cfg), "<b>Eu</b>");
    }
}
