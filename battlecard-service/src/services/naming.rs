//! Display names derived from company website URLs.

use url::Url;

/// Derive a company display name from its website URL.
///
/// `https://www.acme.io/pricing` becomes `Acme`: the host loses a leading
/// `www.`, the first dot-separated label is kept and its first character is
/// upper-cased. Input that does not parse as a URL is returned unchanged, so
/// this never fails. A URL without a host (`mailto:...`) yields an empty name.
pub fn company_name_from_url(raw: &str) -> String {
    let host = match Url::parse(raw) {
        Ok(url) => url.host_str().unwrap_or_default().to_string(),
        Err(_) => return raw.to_string(),
    };

    let host = host.strip_prefix("www.").unwrap_or(&host);
    let label = host.split('.').next().unwrap_or_default();

    capitalize(label)
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
