use packaging_spec::canonicalize_name;

use crate::entry::Entry;
use crate::error::Result;
use crate::html::parse_from_html;
use crate::location::Location;
use crate::repository::{unexpected_content, RawContent, Repository};

/// A repository following PEP 503, the "Simple Repository API": one
/// listing page per project, at `{base}/{canonical name}/`.
#[derive(Debug, Clone)]
pub struct SimpleRepository {
    url: String,
}

impl SimpleRepository {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Repository for SimpleRepository {
    fn location(&self) -> Location {
        Location::from_external(&self.url)
    }

    fn iter_endpoints(&self, name: &str) -> Vec<Location> {
        vec![self.location().join_dir(&canonicalize_name(name))]
    }

    fn get_entries(
        &self,
        name: &str,
        location: &Location,
        content: RawContent,
    ) -> Result<Vec<Entry>> {
        match content {
            RawContent::Html(html) => {
                let mut base = location.to_url()?;
                // Local endpoints lose their trailing slash as paths.
                if !base.path().ends_with('/') {
                    let path = format!("{}/", base.path());
                    base.set_path(&path);
                }
                parse_from_html(&html, &base, Some(name))
            }
            other => Err(unexpected_content("Simple", location, &other)),
        }
    }
}
