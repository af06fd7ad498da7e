//! Discovery of downloadable distributions in Python package repositories.
//!
//! This crate does no I/O of its own. A [`Fetcher`] tells you which
//! [`Location`]s to retrieve for a [`Requirement`], and turns whatever you
//! retrieved, HTML pages or directory listings, into [`Entry`] values.
//! Three kinds of repositories are supported: PEP 503 "simple" indexes
//! ([`SimpleRepository`]), flat link pages like pip's `--find-links`
//! ([`FlatHtmlRepository`]) and local directories
//! ([`LocalDirectoryRepository`]).
//!
//! ```
//! use packaging_repositories::{Fetcher, Filter, FlatHtmlRepository, RawContent, VersionFilter};
//!
//! let fetcher = Fetcher::new(
//!     FlatHtmlRepository::new("https://example.com/wheels/"),
//!     "jinja2".parse()?,
//! );
//! let page = r#"<a href="Jinja2-2.10-py2.py3-none-any.whl">Jinja2-2.10-py2.py3-none-any.whl</a>"#;
//! let transport = |_: &packaging_repositories::Location| {
//!     Ok::<_, std::io::Error>(RawContent::from(page))
//! };
//! let filter: VersionFilter = "~=2.0".parse()?;
//! let entries = filter
//!     .apply(fetcher.entries(&transport))
//!     .collect::<Result<Vec<_>, _>>()?;
//! assert_eq!(entries[0].version.to_string(), "2.10");
//! # Ok::<(), miette::Report>(())
//! ```

pub use packaging_spec::{Requirement, Version, VersionSpecifiers};

mod encoding;
mod entry;
mod error;
mod fetcher;
mod filter;
mod html;
mod listing;
mod location;
mod repository;
mod transport;

pub use encoding::*;
pub use entry::*;
pub use error::{RepositoryError, Result};
pub use fetcher::*;
pub use filter::*;
pub use html::*;
pub use listing::*;
pub use location::*;
pub use repository::*;
pub use transport::*;
