use crate::KvartalError;
use ::url::Url;

/// Amount added to the page parameter on each advance
pub const PAGE_STEP: u64 = 1;

/// Reads the numeric page parameter from a catalog URL
///
/// # Errors
///
/// `KvartalError::InvalidArgument` if the URL does not parse, or the
/// parameter is missing or not a non-negative integer.
pub fn page_number(url: &str, param: &str) -> Result<u64, KvartalError> {
    let parsed = parse(url)?;
    let raw = parsed
        .query_pairs()
        .find(|(key, _)| key == param)
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| {
            KvartalError::InvalidArgument(format!("URL '{}' has no '{}' parameter", url, param))
        })?;

    raw.parse::<u64>().map_err(|_| {
        KvartalError::InvalidArgument(format!(
            "URL '{}' has non-numeric '{}' parameter '{}'",
            url, param, raw
        ))
    })
}

/// Produces the URL of the next catalog page
///
/// The page parameter is increased by [`PAGE_STEP`]. Only that query
/// segment is rewritten; every other segment is kept byte for byte.
///
/// # Examples
///
/// ```
/// use kvartal::url::next_page_url;
///
/// let next = next_page_url("https://dom.ria.com/uk/arenda-kvartir/lvov/?page=3", "page").unwrap();
/// assert_eq!(next, "https://dom.ria.com/uk/arenda-kvartir/lvov/?page=4");
/// ```
pub fn next_page_url(current: &str, param: &str) -> Result<String, KvartalError> {
    let page = page_number(current, param)?;
    let next = page.checked_add(PAGE_STEP).ok_or_else(|| {
        KvartalError::InvalidArgument(format!("page number {} cannot be advanced", page))
    })?;

    let mut url = parse(current)?;
    let mut replaced = false;
    let mut segments = Vec::new();
    for segment in url.query().unwrap_or_default().split('&') {
        let key = segment.split_once('=').map_or(segment, |(key, _)| key);
        if !replaced && key == param {
            segments.push(format!("{}={}", key, next));
            replaced = true;
        } else {
            segments.push(segment.to_string());
        }
    }

    // Percent-encoded parameter names are not rewritten
    if !replaced {
        return Err(KvartalError::InvalidArgument(format!(
            "URL '{}' has no literal '{}' parameter to advance",
            current, param
        )));
    }

    url.set_query(Some(&segments.join("&")));
    Ok(url.to_string())
}

fn parse(url: &str) -> Result<Url, KvartalError> {
    Url::parse(url).map_err(|e| KvartalError::InvalidArgument(format!("invalid URL '{}': {}", url, e)))
}
