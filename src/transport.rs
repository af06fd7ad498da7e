use std::error::Error;

use async_trait::async_trait;

use crate::location::Location;
use crate::repository::RawContent;

/// Retrieves the raw content behind an endpoint, blocking until it is done.
///
/// Remote locations are expected to come back as
/// [`RawContent::Html`], local directories as [`RawContent::Listing`].
/// Any closure `Fn(&Location) -> Result<RawContent, E>` is a transport.
pub trait Transport {
    type Error: Into<Box<dyn Error + Send + Sync>>;

    fn retrieve(&self, location: &Location) -> Result<RawContent, Self::Error>;
}

impl<F, E> Transport for F
where
    F: Fn(&Location) -> Result<RawContent, E>,
    E: Into<Box<dyn Error + Send + Sync>>,
{
    type Error = E;

    fn retrieve(&self, location: &Location) -> Result<RawContent, Self::Error> {
        self(location)
    }
}

/// Asynchronous counterpart of [`Transport`], for retrievals that may be
/// overlapped with each other.
#[async_trait]
pub trait AsyncTransport: Sync {
    type Error: Into<Box<dyn Error + Send + Sync>> + Send;

    async fn retrieve(&self, location: &Location) -> Result<RawContent, Self::Error>;
}
