use std::borrow::Cow;
use std::cmp::Ordering;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;

/// Characters `encodeURIComponent` leaves untouched, besides ASCII alphanumerics.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

pub fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(ESCAPE_CHARS) {
        return Cow::Borrowed(s);
    }

    let mut res = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '<' => res.push_str("&lt;"),
            '>' => res.push_str("&gt;"),
            '&' => res.push_str("&amp;"),
            '"' => res.push_str("&quot;"),
            '\'' => res.push_str("&#39;"),
            c => res.push(c),
        }
    }
    Cow::Owned(res)
}

pub fn encode_uri_component(s: &str) -> String {
    utf8_percent_encode(s, URI_COMPONENT).to_string()
}

/// Formats the leading `YYYY-MM-DD` of a post date as `DD/MM/YYYY`.
/// Anything that does not start with a valid date is shown as it is.
pub fn format_date(date: Option<&str>) -> String {
    lazy_static! {
        static ref DATE_REGEX: Regex = Regex::new(r"^\s*(\d{4})-(\d{1,2})-(\d{1,2})").unwrap();
    }

    let Some(date) = date else {
        return String::new();
    };

    let parsed = DATE_REGEX.captures(date).and_then(|caps| {
        let y: i32 = caps[1].parse().ok()?;
        let m: u32 = caps[2].parse().ok()?;
        let d: u32 = caps[3].parse().ok()?;
        NaiveDate::from_ymd_opt(y, m, d)
    });

    match parsed {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => date.to_string(),
    }
}

fn collation_key(s: &str) -> String {
    unidecode::unidecode(s).to_lowercase()
}

/// Ordering close to a Portuguese `localeCompare`: accents and case only break ties.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b))
        .then_with(|| b.chars().next().map(char::is_lowercase)
            .cmp(&a.chars().next().map(char::is_lowercase)))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("hello"), "hello");
        assert_eq!(escape_html("<script>alert('x')</script>"), "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;");
        assert_eq!(escape_html("a & \"b\""), "a &amp; &quot;b&quot;");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_encode_uri_component() {
        assert_eq!(encode_uri_component("abc-123_x.y"), "abc-123_x.y");
        assert_eq!(encode_uri_component("a b&c"), "a%20b%26c");
        assert_eq!(encode_uri_component("joão/1?"), "jo%C3%A3o%2F1%3F");
        assert_eq!(encode_uri_component("it's(ok)!*~"), "it's(ok)!*~");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(Some("2024-03-09")), "09/03/2024");
        assert_eq!(format_date(Some("2024-03-09T10:00:00Z")), "09/03/2024");
        assert_eq!(format_date(Some("ontem")), "ontem");
        assert_eq!(format_date(Some("2024-13-40")), "2024-13-40");
        assert_eq!(format_date(None), "");
    }

    #[test]
    fn test_locale_cmp() {
        let mut books = vec!["Êxodo", "Atos", "apocalipse", "Efésios", "Gênesis"];
        books.sort_by(|a, b| locale_cmp(a, b));
        assert_eq!(books, ["apocalipse", "Atos", "Efésios", "Êxodo", "Gênesis"]);

        assert_eq!(locale_cmp("graça", "Graça"), Ordering::Less);
        assert_eq!(locale_cmp("fé", "fé"), Ordering::Equal);
    }
}
