use crate::ParseError;
use ::url::Url;

/// Normalizes a scraped detail-page link into an absolute URL
///
/// # Normalization Steps
///
/// 1. Trim the raw href; reject if empty
/// 2. Rewrite the language-region segment (`source_locale`, e.g. `/ru/`)
///    to the canonical one (`canonical_locale`, e.g. `/uk/`)
/// 3. Resolve against `base`; absolute links keep their own host
/// 4. Require an HTTP(S) result and drop any fragment
///
/// # Errors
///
/// `ParseError::InvalidLink` if the href is empty, cannot be resolved, or
/// resolves to a non-HTTP scheme.
///
/// # Examples
///
/// ```
/// use kvartal::url::normalize_detail_link;
///
/// let url = normalize_detail_link(
///     "/ru/realty-dolgosrochnaya-arenda-kvartira-lvov-123.html",
///     "https://dom.ria.com",
///     "/ru/",
///     "/uk/",
/// )
/// .unwrap();
/// assert_eq!(url, "https://dom.ria.com/uk/realty-dolgosrochnaya-arenda-kvartira-lvov-123.html");
/// ```
pub fn normalize_detail_link(
    href: &str,
    base: &str,
    source_locale: &str,
    canonical_locale: &str,
) -> Result<String, ParseError> {
    let href = href.trim();
    if href.is_empty() {
        return Err(ParseError::InvalidLink {
            raw: href.to_string(),
            message: "empty href".to_string(),
        });
    }

    let rewritten = href.replacen(source_locale, canonical_locale, 1);

    let base_url = Url::parse(base).map_err(|e| ParseError::InvalidLink {
        raw: base.to_string(),
        message: format!("invalid base URL: {}", e),
    })?;

    let mut url = base_url.join(&rewritten).map_err(|e| ParseError::InvalidLink {
        raw: href.to_string(),
        message: e.to_string(),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ParseError::InvalidLink {
            raw: href.to_string(),
            message: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    url.set_fragment(None);
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://dom.ria.com";

    #[test]
    fn test_relative_link_gets_base_and_canonical_locale() {
        let url = normalize_detail_link("/ru/flat-1.html", BASE, "/ru/", "/uk/").unwrap();
        assert_eq!(url, "https://dom.ria.com/uk/flat-1.html");
    }

    #[test]
    fn test_canonical_link_left_alone() {
        let url = normalize_detail_link("/uk/flat-2.html", BASE, "/ru/", "/uk/").unwrap();
        assert_eq!(url, "https://dom.ria.com/uk/flat-2.html");
    }

    #[test]
    fn test_absolute_link_keeps_host() {
        let url = normalize_detail_link(
            "https://m.dom.ria.com/ru/flat-3.html#photos",
            BASE,
            "/ru/",
            "/uk/",
        )
        .unwrap();
        assert_eq!(url, "https://m.dom.ria.com/uk/flat-3.html");
    }

    #[test]
    fn test_empty_href_rejected() {
        assert!(matches!(
            normalize_detail_link("   ", BASE, "/ru/", "/uk/"),
            Err(ParseError::InvalidLink { .. })
        ));
    }

    #[test]
    fn test_script_link_rejected() {
        assert!(normalize_detail_link("javascript:void(0)", BASE, "/ru/", "/uk/").is_err());
    }

    #[test]
    fn test_invalid_base_rejected() {
        assert!(normalize_detail_link("/ru/flat.html", "not a base", "/ru/", "/uk/").is_err());
    }
}
