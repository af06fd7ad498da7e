use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use futures::stream::{self, BoxStream, StreamExt};
use packaging_spec::Requirement;
use tracing::debug;

use crate::entry::Entry;
use crate::error::{RepositoryError, Result};
use crate::location::Location;
use crate::repository::{RawContent, Repository};
use crate::transport::{AsyncTransport, Transport};

const DEFAULT_CONCURRENCY: usize = 16;

/// Build a new [`Fetcher`] with custom options.
#[derive(Clone, Debug)]
pub struct FetcherOpts {
    concurrency: usize,
}

impl Default for FetcherOpts {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl FetcherOpts {
    pub fn new() -> Self {
        Default::default()
    }

    /// Maximum number of endpoint retrievals [`Fetcher::stream`] keeps in
    /// flight at once. Values below 1 are treated as 1.
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Build a new [`Fetcher`] for `requirement`, reading from `repository`.
    pub fn build<R: Repository + 'static>(self, repository: R, requirement: Requirement) -> Fetcher {
        Fetcher {
            repository: Arc::new(repository),
            requirement,
            concurrency: self.concurrency,
        }
    }
}

/// Finds the entries of one project in a [`Repository`].
///
/// The fetcher never performs I/O itself. It tells the caller which
/// locations to retrieve ([`Fetcher::iter_endpoints`]) and turns retrieved
/// content into entries ([`Fetcher::iter_entries`]). [`Fetcher::entries`]
/// and [`Fetcher::stream`] drive the whole loop through a caller-supplied
/// transport, one endpoint at a time or overlapped.
///
/// Only entries whose name is equivalent to the requirement's name and
/// whose version satisfies the requirement's specifiers, if any, come out.
#[derive(Clone, Debug)]
pub struct Fetcher {
    repository: Arc<dyn Repository>,
    requirement: Requirement,
    concurrency: usize,
}

impl Fetcher {
    /// Creates a fetcher with default options.
    pub fn new<R: Repository + 'static>(repository: R, requirement: Requirement) -> Self {
        FetcherOpts::new().build(repository, requirement)
    }

    pub fn repository(&self) -> &dyn Repository {
        &*self.repository
    }

    pub fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    /// Locations that need to be retrieved to find the requirement's
    /// entries.
    pub fn iter_endpoints(&self) -> Vec<Location> {
        self.repository.iter_endpoints(&self.requirement.name)
    }

    /// Entries found in content retrieved from `location`, narrowed down to
    /// the requirement.
    pub fn iter_entries(&self, location: &Location, content: RawContent) -> Result<EndpointEntries<'_>> {
        let entries = self
            .repository
            .get_entries(&self.requirement.name, location, content)?;
        debug!(%location, entries = entries.len(), "read endpoint");
        Ok(EndpointEntries {
            requirement: &self.requirement,
            entries: entries.into_iter(),
        })
    }

    /// Retrieves and reads endpoints one after the other. The next endpoint
    /// is only retrieved once the entries of the previous one have been
    /// consumed.
    pub fn entries<'a, T: Transport + ?Sized>(&'a self, transport: &'a T) -> Entries<'a, T> {
        Entries {
            fetcher: self,
            transport,
            endpoints: self.iter_endpoints().into(),
            current: None,
        }
    }

    /// Retrieves all endpoints concurrently, up to the configured
    /// concurrency, and yields entries as each retrieval completes.
    /// Entries of one endpoint stay in page order, but endpoints are
    /// interleaved in completion order.
    pub fn stream<'a, T: AsyncTransport + ?Sized>(
        &'a self,
        transport: &'a T,
    ) -> BoxStream<'a, Result<Entry>> {
        let endpoints = self.iter_endpoints();
        debug!(
            endpoints = endpoints.len(),
            concurrency = self.concurrency,
            "dispatching endpoint retrievals"
        );
        stream::iter(endpoints)
            .map(move |location| async move {
                let content = transport
                    .retrieve(&location)
                    .await
                    .map_err(|err| RepositoryError::transport(&location, err))?;
                let entries: Vec<Entry> = self.iter_entries(&location, content)?.collect();
                Ok::<_, RepositoryError>(entries)
            })
            .buffer_unordered(self.concurrency)
            .flat_map(|retrieved| {
                let items: Vec<Result<Entry>> = match retrieved {
                    Ok(entries) => entries.into_iter().map(Ok).collect(),
                    Err(err) => vec![Err(err)],
                };
                stream::iter(items)
            })
            .boxed()
    }
}

/// Entries of a single endpoint that belong to the fetcher's requirement.
#[derive(Debug)]
pub struct EndpointEntries<'a> {
    requirement: &'a Requirement,
    entries: std::vec::IntoIter<Entry>,
}

impl<'a> Iterator for EndpointEntries<'a> {
    type Item = Entry;

    fn next(&mut self) -> Option<Self::Item> {
        let requirement = self.requirement;
        self.entries.find(|entry| {
            requirement.matches_name(&entry.name) && requirement.contains(&entry.version)
        })
    }
}

/// Sequential iterator returned by [`Fetcher::entries`].
///
/// A failed retrieval or an unreadable page is yielded as an error item;
/// iteration then moves on to the next endpoint.
pub struct Entries<'a, T: ?Sized> {
    fetcher: &'a Fetcher,
    transport: &'a T,
    endpoints: VecDeque<Location>,
    current: Option<EndpointEntries<'a>>,
}

impl<'a, T: ?Sized> fmt::Debug for Entries<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entries")
            .field("fetcher", &self.fetcher)
            .field("endpoints", &self.endpoints)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl<'a, T: Transport + ?Sized> Iterator for Entries<'a, T> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current.as_mut().and_then(|entries| entries.next()) {
                return Some(Ok(entry));
            }
            self.current = None;
            let location = self.endpoints.pop_front()?;
            debug!(%location, "retrieving endpoint");
            let content = match self.transport.retrieve(&location) {
                Ok(content) => content,
                Err(err) => return Some(Err(RepositoryError::transport(&location, err))),
            };
            match self.fetcher.iter_entries(&location, content) {
                Ok(entries) => self.current = Some(entries),
                Err(err) => return Some(Err(err)),
            }
        }
    }
}
