use std::borrow::Cow;

use once_cell::sync::Lazy;
use packaging_spec::{parse_artifact_name, ArtifactName};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use tl::{HTMLTag, Node, Parser, ParserOptions};
use tracing::{debug, instrument, trace};
use url::Url;

use crate::entry::{Entry, Hashes, RequiresPython, SkipReason};
use crate::error::Result;
use crate::location::Location;

static HASH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(sha1|sha224|sha384|sha256|sha512|md5)=([0-9a-fA-F]+)").unwrap()
});

/// Everything outside `A-Za-z0-9$&+,/:;=?@.#%_\|-` gets percent-encoded.
const LINK_UNSAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b',')
    .remove(b'/')
    .remove(b':')
    .remove(b';')
    .remove(b'=')
    .remove(b'?')
    .remove(b'@')
    .remove(b'.')
    .remove(b'#')
    .remove(b'%')
    .remove(b'_')
    .remove(b'\\')
    .remove(b'|')
    .remove(b'-');

/// Parses the entries linked from an HTML listing page, skipping links
/// that do not name a distribution of `name`. With `name` set to `None`,
/// the page may list several projects and each link is inferred on its
/// own.
pub fn parse_from_html(html: &str, base: &Url, name: Option<&str>) -> Result<Vec<Entry>> {
    Ok(scan_html(html, base, name)?
        .into_iter()
        .filter_map(|parsed| {
            parsed
                .map_err(|reason| trace!(%reason, "skipping link"))
                .ok()
        })
        .collect())
}

/// Like [`parse_from_html`], but reports every link, including the ones
/// that were skipped and why. Links are returned in document order.
#[instrument(skip_all, fields(base = %base, name = ?name))]
pub fn scan_html(
    html: &str,
    base: &Url,
    name: Option<&str>,
) -> Result<Vec<std::result::Result<Entry, SkipReason>>> {
    let dom = tl::parse(html, ParserOptions::default())?;
    let parser = dom.parser();
    let tags = || dom.nodes().iter().filter_map(Node::as_tag);

    let base = tags()
        .filter(|tag| is_named(tag, "base"))
        .find_map(|tag| attribute(tag, "href"))
        .and_then(|href| base.join(&href).ok())
        .unwrap_or_else(|| base.clone());

    let links: Vec<_> = tags()
        .filter(|tag| is_named(tag, "a"))
        .map(|link| parse_anchor(link, parser, &base, name))
        .collect();
    debug!(
        links = links.len(),
        entries = links.iter().filter(|link| link.is_ok()).count(),
        "scanned listing page"
    );
    Ok(links)
}

fn parse_anchor(
    link: &HTMLTag<'_>,
    parser: &Parser<'_>,
    base: &Url,
    name: Option<&str>,
) -> std::result::Result<Entry, SkipReason> {
    let href = attribute(link, "href").ok_or(SkipReason::MissingHref)?;
    let resolved = base.join(&href).map_err(|_| SkipReason::InvalidUrl {
        href: href.clone(),
        base: base.to_string(),
    })?;
    let cleaned = clean_link(resolved.as_str());
    let hashes = cleaned
        .split_once('#')
        .map(|(_, fragment)| parse_hashes(fragment))
        .unwrap_or_default();

    let requires_python = match attribute(link, "data-requires-python") {
        Some(specifiers) => specifiers.parse().unwrap_or_else(|err| {
            debug!(%err, %href, "ignoring invalid data-requires-python");
            RequiresPython::any()
        }),
        None => RequiresPython::any(),
    };
    let gpg_sig = attribute(link, "data-gpg-sig").unwrap_or_default();

    let text = link.inner_text(parser);
    let text = html_escape::decode_html_entities(text.trim());
    let ArtifactName { name, version } = parse_artifact_name(&text, name)?;

    Ok(Entry {
        name,
        version,
        location: Location::from_external(&cleaned),
        hashes,
        requires_python,
        gpg_sig,
    })
}

/// Percent-encodes characters that loosely-encoded index pages leave raw.
/// The scheme and authority are left alone.
pub fn clean_link(url: &str) -> Cow<'_, str> {
    let path_start = url.find("://").map_or(0, |scheme_end| {
        let authority = scheme_end + 3;
        url[authority..]
            .find(|c: char| matches!(c, '/' | '?' | '#'))
            .map_or(url.len(), |end| authority + end)
    });
    let (authority, rest) = url.split_at(path_start);
    match utf8_percent_encode(rest, LINK_UNSAFE).into() {
        Cow::Borrowed(_) => Cow::Borrowed(url),
        Cow::Owned(rest) => Cow::Owned(format!("{}{}", authority, rest)),
    }
}

/// Collects every `algorithm=hexdigest` pair of a URL fragment.
pub fn parse_hashes(fragment: &str) -> Hashes {
    HASH_RE
        .captures_iter(fragment)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

fn is_named(tag: &HTMLTag<'_>, name: &str) -> bool {
    tag.name().as_utf8_str().eq_ignore_ascii_case(name)
}

/// Unescaped attribute value, looked up case-insensitively. Valueless
/// attributes come back empty.
fn attribute(tag: &HTMLTag<'_>, key: &str) -> Option<String> {
    tag.attributes()
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, value)| {
            value
                .map(|value| html_escape::decode_html_entities(&*value).into_owned())
                .unwrap_or_default()
        })
}
