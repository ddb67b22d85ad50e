use url::Url;

use crate::error::ResolutionError;

/// Base used to resolve hrefs that come without scheme and host.
const RELATIVE_BASE: &str = "http://appliance.invalid/";

/// Returns `items[0].href` of a list response.
///
/// # Errors
///
/// Returns an error when the list has no items or the first item has no string `href`.
pub fn first_item_href<'body>(
    listing: &'body serde_json::Value,
    endpoint: &str,
) -> Result<&'body str, ResolutionError> {
    let first = listing
        .get("items")
        .and_then(serde_json::Value::as_array)
        .and_then(|items| items.first())
        .ok_or_else(|| ResolutionError::NoItems {
            endpoint: endpoint.to_owned(),
        })?;
    first
        .get("href")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| ResolutionError::MissingHref {
            endpoint: endpoint.to_owned(),
        })
}

/// Derives the detail path of a resource from its href.
///
/// The path is everything after the first `root` segment, so
/// `https://10.0.0.5/actifio/application/4711` with root `actifio` yields
/// `/application/4711`. Segments are kept as written, including empty ones
/// from a trailing or doubled slash. A query string is carried over.
///
/// # Errors
///
/// Returns an error when the href is not a URL, lacks the root segment, or
/// names nothing below it.
pub fn detail_path_from_href(href: &str, root: &str) -> Result<String, ResolutionError> {
    let invalid = |err| ResolutionError::InvalidHref {
        href: href.to_owned(),
        source: err,
    };
    let url = match Url::parse(href) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(RELATIVE_BASE)
            .and_then(|base| base.join(href))
            .map_err(invalid)?,
        Err(err) => return Err(invalid(err)),
    };

    let mut segments = url.path_segments().into_iter().flatten();
    if !segments.by_ref().any(|segment| segment == root) {
        return Err(ResolutionError::MissingRootSegment {
            href: href.to_owned(),
            root: root.to_owned(),
        });
    }

    let rest: Vec<&str> = segments.collect();
    if rest.iter().all(|segment| segment.is_empty()) {
        return Err(ResolutionError::EmptyDetailPath {
            href: href.to_owned(),
            root: root.to_owned(),
        });
    }
    let mut path = format!("/{}", rest.join("/"));
    if let Some(query) = url.query() {
        path.push('?');
        path.push_str(query);
    }
    Ok(path)
}
