use crate::entry::Entry;
use crate::error::Result;
use crate::html::parse_from_html;
use crate::listing::list_from_paths;
use crate::location::Location;
use crate::repository::{unexpected_content, RawContent, Repository};

/// A "flat" repository, like pip's `--find-links`: a single page linking
/// to distributions of any number of projects. Pointed at a local
/// directory, it reads the directory's files instead.
#[derive(Debug, Clone)]
pub struct FlatHtmlRepository {
    url: String,
}

impl FlatHtmlRepository {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Repository for FlatHtmlRepository {
    fn location(&self) -> Location {
        Location::from_external(&self.url)
    }

    fn iter_endpoints(&self, _name: &str) -> Vec<Location> {
        vec![self.location()]
    }

    fn get_entries(
        &self,
        _name: &str,
        location: &Location,
        content: RawContent,
    ) -> Result<Vec<Entry>> {
        match (location, content) {
            (_, RawContent::Html(html)) => parse_from_html(&html, &location.to_url()?, None),
            (Location::Local(dir), RawContent::Listing(paths)) => Ok(list_from_paths(dir, &paths)),
            (Location::Remote(_), other) => Err(unexpected_content("Flat", location, &other)),
        }
    }
}
