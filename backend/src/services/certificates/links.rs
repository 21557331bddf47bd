use url::Url;

/// Query parameter read by the verification page to pre-fill the identifier.
pub const PERMALINK_PARAM: &str = "verify";

/// Builds the shareable link for a verified certificate: the site origin with
/// the identifier URL-escaped in the `verify` query parameter.
///
/// Any path, query or fragment on `origin` is dropped.
pub fn certificate_permalink(
    origin: &Url,
    certificate_id: &str,
) -> Result<String, url::ParseError> {
    let mut permalink = origin.join("/")?;
    permalink.set_query(None);
    permalink.set_fragment(None);
    permalink
        .query_pairs_mut()
        .append_pair(PERMALINK_PARAM, certificate_id);
    Ok(permalink.into())
}

/// Only absolute `http`/`https` URLs may be offered for download.
pub fn is_valid_download_url(url: &str) -> bool {
    Url::parse(url)
        .map(|parsed| matches!(parsed.scheme(), "http" | "https"))
        .unwrap_or(false)
}
