use crate::entry::Entry;
use crate::error::{RepositoryError, Result};
use crate::listing::list_from_paths;
use crate::location::Location;
use crate::repository::{unexpected_content, RawContent, Repository};

/// A plain directory of distribution files on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalDirectoryRepository {
    path: String,
}

impl LocalDirectoryRepository {
    /// Fails with [`RepositoryError::NotLocal`] if `path` is a remote URL.
    pub fn new(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        match Location::from_external(&path) {
            Location::Local(_) => Ok(Self { path }),
            Location::Remote(address) => Err(RepositoryError::NotLocal(address)),
        }
    }
}

impl Repository for LocalDirectoryRepository {
    fn location(&self) -> Location {
        Location::from_external(&self.path)
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
            (Location::Local(dir), RawContent::Listing(paths)) => Ok(list_from_paths(dir, &paths)),
            (_, other) => Err(unexpected_content("Local directory", location, &other)),
        }
    }
}
