use miette::Diagnostic;
use thiserror::Error;

/// Error returned when parsing a requirement string.
#[derive(Debug, Error, Diagnostic)]
pub enum PackageSpecError {
    /// The requirement string could not be parsed. Requirements look like
    /// `name`, `name[extra]`, `name>=1.0,<2` or `name (>=1.0)`.
    #[error("Error while parsing requirement `{input}`:\n  {msg}")]
    #[diagnostic(code(packaging_spec::parse_error), url(docsrs))]
    ParseError { input: String, msg: String },

    /// Environment markers (anything after a `;`) are not evaluated by this
    /// library, so requirements carrying one are rejected instead of being
    /// silently misapplied.
    #[error("Environment marker `{marker}` in `{input}` is not supported.")]
    #[diagnostic(
        code(packaging_spec::unsupported_marker),
        url(docsrs),
        help("Evaluate the marker yourself and pass the requirement without it.")
    )]
    UnsupportedMarker { input: String, marker: String },
}

/// Reasons a filename could not be turned into a package name and version.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum FilenameError {
    /// The filename does not follow either distribution filename grammar.
    #[error("`{0}` is not a recognized distribution filename.")]
    #[diagnostic(code(packaging_spec::filename::not_an_artifact), url(docsrs))]
    NotAnArtifact(String),

    /// A wheel's embedded project name disagrees with the project it was
    /// listed under.
    #[error("Wheel `{filename}` belongs to `{found}`, but it was listed for `{expected}`.")]
    #[diagnostic(
        code(packaging_spec::filename::name_mismatch),
        url(docsrs),
        help("The package index may be misconfigured or serving files for the wrong project.")
    )]
    NameMismatch {
        filename: String,
        expected: String,
        found: String,
    },

    /// The filename has the right shape, but its version is not a valid
    /// PEP 440 version.
    #[error("`{filename}` has an invalid version `{version}`.")]
    #[diagnostic(code(packaging_spec::filename::invalid_version), url(docsrs))]
    InvalidVersion { filename: String, version: String },
}

impl FilenameError {
    /// Whether this is an identity mismatch rather than a recognition
    /// failure.
    pub fn is_name_mismatch(&self) -> bool {
        matches!(self, FilenameError::NameMismatch { .. })
    }
}
