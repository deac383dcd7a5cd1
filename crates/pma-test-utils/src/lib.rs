//! Testing utilities for PMA workspace
//!
//! Shared fixtures, test doubles, and dataset helpers.

#![allow(missing_docs)]

use async_trait::async_trait;
use parking_lot::RwLock;
use pma_housing::{
    CsvRecordParser, DatasetSource, HousingError, HousingRecord, HousingRepository, RecordParser,
    StatsCache,
};
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const HEADER: &str =
    "id,squareFootage,bedrooms,bathrooms,yearBuilt,lotSize,distanceToCityCenter,schoolRating,price";

pub const ROW_1: &str = "1,1000,2,1.5,1990,5000,3.2,7.5,200000";
pub const ROW_2: &str = "2,2000,3,2.0,2005,8000,1.1,9.0,400000";

/// Header followed by `rows`, newline-terminated
pub fn dataset(rows: &[&str]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for row in rows {
        out.push_str(row);
        out.push('\n');
    }
    out
}

/// The two-row reference dataset
pub fn sample_dataset() -> String {
    dataset(&[ROW_1, ROW_2])
}

/// Write `content` to a fresh temporary file
pub fn write_temp_dataset(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp dataset");
    file.write_all(content.as_bytes()).expect("write temp dataset");
    file.flush().expect("flush temp dataset");
    file
}

enum DatasetState {
    Present(Vec<u8>),
    Missing,
    Failing(io::ErrorKind),
}

/// Mutable in-memory dataset
///
/// Counts reads; can be switched between present, missing, and failing.
pub struct InMemoryDataset {
    location: String,
    state: RwLock<DatasetState>,
    reads: AtomicUsize,
}

impl InMemoryDataset {
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        Self::with_state(DatasetState::Present(content.into()))
    }

    pub fn missing() -> Self {
        Self::with_state(DatasetState::Missing)
    }

    fn with_state(state: DatasetState) -> Self {
        Self {
            location: "memory://housing.csv".to_string(),
            state: RwLock::new(state),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn set(&self, content: impl Into<Vec<u8>>) {
        *self.state.write() = DatasetState::Present(content.into());
    }

    pub fn remove(&self) {
        *self.state.write() = DatasetState::Missing;
    }

    pub fn fail_with(&self, kind: io::ErrorKind) {
        *self.state.write() = DatasetState::Failing(kind);
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for InMemoryDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryDataset")
            .field("location", &self.location)
            .field("reads", &self.reads())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl DatasetSource for InMemoryDataset {
    fn location(&self) -> &str {
        &self.location
    }

    async fn read(&self) -> Result<Vec<u8>, HousingError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        match &*self.state.read() {
            DatasetState::Present(bytes) => Ok(bytes.clone()),
            DatasetState::Missing => Err(HousingError::from_io(
                &self.location,
                &io::Error::from(io::ErrorKind::NotFound),
            )),
            DatasetState::Failing(kind) => Err(HousingError::from_io(
                &self.location,
                &io::Error::from(*kind),
            )),
        }
    }
}

/// CSV parser that counts invocations, optionally slowed down
#[derive(Debug, Default)]
pub struct CountingParser {
    inner: CsvRecordParser,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl CountingParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RecordParser for CountingParser {
    fn parse(&self, content: &str) -> Result<Vec<HousingRecord>, HousingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.inner.parse(content)
    }
}

/// Repository over an in-memory dataset with a counting parser
pub fn counting_repository(
    content: &str,
) -> (HousingRepository, Arc<InMemoryDataset>, Arc<CountingParser>) {
    counting_repository_with(InMemoryDataset::new(content), CountingParser::new())
}

pub fn counting_repository_with(
    dataset: InMemoryDataset,
    parser: CountingParser,
) -> (HousingRepository, Arc<InMemoryDataset>, Arc<CountingParser>) {
    let dataset = Arc::new(dataset);
    let parser = Arc::new(parser);
    let repository = HousingRepository::with_parts(
        dataset.clone(),
        parser.clone(),
        StatsCache::default(),
    );
    (repository, dataset, parser)
}
