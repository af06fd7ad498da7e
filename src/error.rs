use miette::Diagnostic;
use thiserror::Error;

use crate::location::Location;

/// Error type returned by all API calls.
#[derive(Debug, Error, Diagnostic)]
pub enum RepositoryError {
    /// A local directory repository was configured with something that does
    /// not resolve to a filesystem path.
    #[error("`{0}` does not point to a local directory.")]
    #[diagnostic(
        code(packaging_repositories::not_local),
        url(docsrs),
        help("Local directory repositories need a filesystem path or a `file:` URL.")
    )]
    NotLocal(String),

    /// A repository was handed raw content of a shape it cannot read, such
    /// as a directory listing for a Simple API page.
    #[error("{repository} repositories cannot read {found} content from `{location}`.")]
    #[diagnostic(
        code(packaging_repositories::unexpected_content),
        url(docsrs),
        help("Retrieve HTML for remote endpoints and file listings for local directories.")
    )]
    UnexpectedContent {
        repository: &'static str,
        found: &'static str,
        location: String,
    },

    /// The listing page could not be parsed as HTML at all.
    #[error(transparent)]
    #[diagnostic(code(packaging_repositories::html_parse), url(docsrs))]
    HtmlParse(#[from] tl::ParseError),

    /// Failed to parse a URL.
    #[error(transparent)]
    #[diagnostic(code(packaging_repositories::bad_url), url(docsrs))]
    UrlError(#[from] url::ParseError),

    /// The caller-supplied transport failed to retrieve an endpoint. Refer
    /// to the error message for more details.
    #[error("Failed to retrieve `{location}`: {source}")]
    #[diagnostic(code(packaging_repositories::transport), url(docsrs))]
    Transport {
        location: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Something went wrong while trying to parse a requirement.
    #[error(transparent)]
    #[diagnostic(transparent)]
    PackageSpecError(#[from] packaging_spec::PackageSpecError),

    /// Failed to parse a set of version specifiers.
    #[error(transparent)]
    #[diagnostic(code(packaging_repositories::invalid_specifiers), url(docsrs))]
    InvalidSpecifiers(#[from] pep440_rs::VersionSpecifiersParseError),

    /// Failed to parse a version.
    #[error(transparent)]
    #[diagnostic(code(packaging_repositories::invalid_version), url(docsrs))]
    InvalidVersion(#[from] pep440_rs::VersionParseError),
}

impl RepositoryError {
    pub(crate) fn transport(
        location: &Location,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        RepositoryError::Transport {
            location: location.to_string(),
            source: source.into(),
        }
    }
}

/// The result type returned by calls to this library
pub type Result<T> = std::result::Result<T, RepositoryError>;
