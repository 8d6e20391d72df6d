use axum::http::HeaderMap;

const CDN_CLIENT_IP_HEADER: &str = "cf-connecting-ip";
const REAL_IP_HEADER: &str = "x-real-ip";
const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Derives the client network origin from proxy headers.
///
/// Priority: CDN client address, then the generic real-IP header, then the
/// first entry of the forwarded-for list. Blank values are skipped.
pub fn client_origin(headers: &HeaderMap) -> Option<String> {
    header_value(headers, CDN_CLIENT_IP_HEADER)
        .or_else(|| header_value(headers, REAL_IP_HEADER))
        .or_else(|| {
            header_value(headers, FORWARDED_FOR_HEADER)
                .and_then(|value| value.split(',').next())
                .map(str::trim)
                .filter(|value| !value.is_empty())
        })
        .map(str::to_owned)
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
