//! Narrowing down entry sequences.
//!
//! Filters are independent of each other and of where entries come from:
//! they wrap any iterator or stream of entries, or of `Result`s of entries,
//! and can be stacked in any order with the same result.

use std::pin::Pin;
use std::str::FromStr;
use std::task::{Context, Poll};

use futures::Stream;
use pep440_rs::{Version, VersionSpecifiers};

use crate::entry::Entry;
use crate::error::RepositoryError;

/// A predicate over entries.
///
/// Any `Fn(&Entry) -> bool` closure is a filter.
pub trait Filter {
    fn matches(&self, entry: &Entry) -> bool;

    /// Wraps `upstream`, an `Iterator` or `Stream`, dropping the entries
    /// this filter rejects.
    fn apply<I>(self, upstream: I) -> Filtered<I, Self>
    where
        Self: Sized,
    {
        Filtered {
            upstream,
            filter: self,
        }
    }
}

impl<F> Filter for F
where
    F: Fn(&Entry) -> bool,
{
    fn matches(&self, entry: &Entry) -> bool {
        self(entry)
    }
}

/// Keeps entries whose version is contained in a specifier set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionFilter {
    specifiers: VersionSpecifiers,
}

impl VersionFilter {
    pub fn new(specifiers: VersionSpecifiers) -> Self {
        Self { specifiers }
    }

    pub fn specifiers(&self) -> &VersionSpecifiers {
        &self.specifiers
    }
}

impl Filter for VersionFilter {
    fn matches(&self, entry: &Entry) -> bool {
        self.specifiers.contains(&entry.version)
    }
}

impl FromStr for VersionFilter {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.parse()?))
    }
}

/// Keeps entries that can be installed on a given Python version, going by
/// their advertised `requires_python`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiresPythonFilter {
    version: Version,
}

impl RequiresPythonFilter {
    pub fn new(version: Version) -> Self {
        Self { version }
    }

    pub fn version(&self) -> &Version {
        &self.version
    }
}

impl Filter for RequiresPythonFilter {
    fn matches(&self, entry: &Entry) -> bool {
        entry.requires_python.contains(&self.version)
    }
}

impl FromStr for RequiresPythonFilter {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.trim().parse()?))
    }
}

/// Items a [`Filtered`] sequence can carry. Errors have no entry to judge
/// and are always let through.
pub trait FilterItem {
    fn entry(&self) -> Option<&Entry>;
}

impl FilterItem for Entry {
    fn entry(&self) -> Option<&Entry> {
        Some(self)
    }
}

impl<E> FilterItem for Result<Entry, E> {
    fn entry(&self) -> Option<&Entry> {
        self.as_ref().ok()
    }
}

/// An entry sequence with a [`Filter`] applied. Returned by
/// [`Filter::apply`].
#[derive(Debug, Clone)]
pub struct Filtered<I, F> {
    upstream: I,
    filter: F,
}

impl<I, F> Filtered<I, F> {
    pub fn into_inner(self) -> I {
        self.upstream
    }
}

impl<I, F: Filter> Filtered<I, F> {
    fn keeps(&self, item: &impl FilterItem) -> bool {
        item.entry().map_or(true, |entry| self.filter.matches(entry))
    }
}

impl<I, F> Iterator for Filtered<I, F>
where
    I: Iterator,
    I::Item: FilterItem,
    F: Filter,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let item = self.upstream.next()?;
            if self.keeps(&item) {
                return Some(item);
            }
        }
    }
}

impl<S, F> Stream for Filtered<S, F>
where
    S: Stream + Unpin,
    S::Item: FilterItem,
    F: Filter + Unpin,
{
    type Item = S::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match futures::ready!(Pin::new(&mut self.upstream).poll_next(cx)) {
                Some(item) if !self.keeps(&item) => continue,
                item => return Poll::Ready(item),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use futures::{stream, StreamExt};
    use pretty_assertions::assert_eq;

    use crate::entry::{Hashes, RequiresPython};
    use crate::location::Location;

    fn entry(version: &str, requires_python: &str) -> Entry {
        Entry {
            name: "pip".into(),
            version: version.parse().unwrap(),
            location: Location::from_external(&format!(
                "https://example.com/pip-{}.tar.gz",
                version
            )),
            hashes: Hashes::new(),
            requires_python: requires_python.parse().unwrap(),
            gpg_sig: String::new(),
        }
    }

    fn versions<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> Vec<String> {
        entries
            .into_iter()
            .map(|entry| entry.version.to_string())
            .collect()
    }

    fn sample() -> Vec<Entry> {
        vec![
            entry("8.1.2", ""),
            entry("9.0.1", ">=2.6, !=3.0.*"),
            entry("10.0.0", ">=2.7, !=3.0.*, !=3.1.*, !=3.2.*"),
            entry("21.0", ">=3.6"),
        ]
    }

    #[test]
    fn version_filter() {
        let filter: VersionFilter = ">=9, <20".parse().unwrap();
        let kept: Vec<_> = filter.apply(sample().into_iter()).collect();
        assert_eq!(versions(&kept), vec!["9.0.1", "10.0.0"]);
    }

    #[test]
    fn requires_python_filter() {
        let filter: RequiresPythonFilter = "3.1".parse().unwrap();
        let kept: Vec<_> = filter.apply(sample().into_iter()).collect();
        assert_eq!(versions(&kept), vec!["8.1.2", "9.0.1"]);
    }

    #[test]
    fn unrestricted_entries_pass_any_python() {
        let filter = RequiresPythonFilter::new("2.0".parse().unwrap());
        assert!(filter.matches(&entry("1.0", "")));
        assert!(RequiresPython::any().contains(filter.version()));
    }

    #[test]
    fn filters_commute() {
        let by_version = || VersionFilter::from_str(">=9").unwrap();
        let by_python = || RequiresPythonFilter::from_str("2.7").unwrap();
        let one: Vec<_> = by_python()
            .apply(by_version().apply(sample().into_iter()))
            .collect();
        let other: Vec<_> = by_version()
            .apply(by_python().apply(sample().into_iter()))
            .collect();
        assert_eq!(one, other);
        assert_eq!(versions(&one), vec!["9.0.1", "10.0.0"]);
    }

    #[test]
    fn closures_are_filters() {
        let kept: Vec<_> = (|entry: &Entry| entry.requires_python.is_unrestricted())
            .apply(sample().into_iter())
            .collect();
        assert_eq!(versions(&kept), vec!["8.1.2"]);
    }

    #[test]
    fn errors_pass_through() {
        let items: Vec<Result<Entry, &str>> = vec![
            Ok(entry("8.1.2", "")),
            Err("boom"),
            Ok(entry("21.0", ">=3.6")),
        ];
        let filter: VersionFilter = ">=20".parse().unwrap();
        let kept: Vec<_> = filter.apply(items.into_iter()).collect();
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0], Err("boom"));
        assert_eq!(kept[1].as_ref().unwrap().version.to_string(), "21.0");
    }

    #[test]
    fn invalid_filters() {
        assert!(VersionFilter::from_str(">=banana").is_err());
        assert!(RequiresPythonFilter::from_str("three").is_err());
    }

    #[async_std::test]
    async fn filters_streams() {
        let filter: VersionFilter = "<10".parse().unwrap();
        let kept: Vec<_> = filter.apply(stream::iter(sample())).collect().await;
        assert_eq!(versions(&kept), vec!["8.1.2", "9.0.1"]);
    }
}
