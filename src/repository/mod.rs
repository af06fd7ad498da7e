use std::fmt::Debug;
use std::path::PathBuf;

use crate::entry::Entry;
use crate::error::{RepositoryError, Result};
use crate::location::Location;

pub use dir::LocalDirectoryRepository;
pub use flat::FlatHtmlRepository;
pub use simple::SimpleRepository;

mod dir;
mod flat;
mod simple;

/// Raw content retrieved by the caller for one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawContent {
    /// Text of an HTML listing page.
    Html(String),
    /// Files of a local directory, relative to it or absolute.
    Listing(Vec<PathBuf>),
}

impl RawContent {
    fn kind(&self) -> &'static str {
        match self {
            RawContent::Html(_) => "HTML",
            RawContent::Listing(_) => "directory listing",
        }
    }
}

impl From<String> for RawContent {
    fn from(html: String) -> Self {
        RawContent::Html(html)
    }
}

impl From<&str> for RawContent {
    fn from(html: &str) -> Self {
        RawContent::Html(html.into())
    }
}

impl From<Vec<PathBuf>> for RawContent {
    fn from(paths: Vec<PathBuf>) -> Self {
        RawContent::Listing(paths)
    }
}

/// The shape of a package repository: which locations to query for a
/// project, and how to read what comes back. Implementations never do I/O.
pub trait Repository: Debug + Send + Sync {
    /// The configured base location.
    fn location(&self) -> Location;

    /// Locations to retrieve to find the distributions of `name`.
    fn iter_endpoints(&self, name: &str) -> Vec<Location>;

    /// Entries found in the content retrieved from `location`, which was
    /// one of the endpoints for `name`.
    fn get_entries(&self, name: &str, location: &Location, content: RawContent)
        -> Result<Vec<Entry>>;
}

fn unexpected_content(
    repository: &'static str,
    location: &Location,
    content: &RawContent,
) -> RepositoryError {
    RepositoryError::UnexpectedContent {
        repository,
        found: content.kind(),
        location: location.to_string(),
    }
}
