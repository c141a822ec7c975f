//! CSV ingestion for Costar (boundary adapter).
//!
//! A dataset directory holds three files with header rows:
//!
//! - `people.csv`: `id`, `name`, `birth`
//! - `movies.csv`: `id`, `title`, `year`
//! - `stars.csv`: `person_id`, `movie_id`
//!
//! Column order is free and extra columns are ignored. Empty `birth`/`year`
//! fields decode to `None`. Rows are decoded straight into the
//! `costar-graph` record types and handed to [`Dataset::load`].

use costar_graph::{Dataset, MovieRecord, PersonRecord, StarRecord};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

pub const PEOPLE_FILE: &str = "people.csv";
pub const MOVIES_FILE: &str = "movies.csv";
pub const STARS_FILE: &str = "stars.csv";

const PEOPLE_COLUMNS: &[&str] = &["id", "name"];
const MOVIES_COLUMNS: &[&str] = &["id", "title"];
const STARS_COLUMNS: &[&str] = &["person_id", "movie_id"];

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}: missing required column `{column}`")]
    MissingColumn { file: String, column: &'static str },

    #[error("{file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },
}

// ============================================================================
// Options and Reports
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestOptions {
    /// Fail on the first row that cannot be decoded instead of skipping it.
    pub strict: bool,
}

impl IngestOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }

    pub fn lenient() -> Self {
        Self { strict: false }
    }
}

/// Per-file row counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// Rows decoded successfully.
    pub rows: usize,
    /// Rows skipped because they could not be decoded (lenient mode only).
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub people: FileReport,
    pub movies: FileReport,
    pub stars: FileReport,
}

impl IngestReport {
    pub fn skipped_rows(&self) -> usize {
        self.people.skipped + self.movies.skipped + self.stars.skipped
    }
}

// ============================================================================
// Readers
// ============================================================================

/// Decode every row of one CSV table.
///
/// `file` names the table in errors and log events.
fn read_rows<T, R>(
    reader: R,
    file: &str,
    required: &[&'static str],
    options: IngestOptions,
) -> Result<(Vec<T>, FileReport), IngestError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|source| IngestError::Csv {
            file: file.to_string(),
            source,
        })?
        .clone();
    for &column in required {
        if !headers.iter().any(|h| h == column) {
            return Err(IngestError::MissingColumn {
                file: file.to_string(),
                column,
            });
        }
    }

    let mut rows = Vec::new();
    let mut report = FileReport::default();
    for result in rdr.deserialize::<T>() {
        match result {
            Ok(row) => {
                rows.push(row);
                report.rows += 1;
            }
            Err(err) if !options.strict && is_row_error(&err) => {
                tracing::warn!(
                    file,
                    line = err.position().map(|p| p.line()),
                    error = %err,
                    "skipping malformed row"
                );
                report.skipped += 1;
            }
            Err(source) => {
                return Err(IngestError::Csv {
                    file: file.to_string(),
                    source,
                })
            }
        }
    }

    tracing::debug!(file, rows = report.rows, skipped = report.skipped, "read csv table");
    Ok((rows, report))
}

/// Errors confined to a single record; anything else aborts the load.
fn is_row_error(err: &csv::Error) -> bool {
    matches!(
        err.kind(),
        csv::ErrorKind::Deserialize { .. } | csv::ErrorKind::Utf8 { .. }
    )
}

pub fn read_people<R: Read>(
    reader: R,
    options: IngestOptions,
) -> Result<(Vec<PersonRecord>, FileReport), IngestError> {
    read_rows(reader, PEOPLE_FILE, PEOPLE_COLUMNS, options)
}

pub fn read_movies<R: Read>(
    reader: R,
    options: IngestOptions,
) -> Result<(Vec<MovieRecord>, FileReport), IngestError> {
    read_rows(reader, MOVIES_FILE, MOVIES_COLUMNS, options)
}

pub fn read_stars<R: Read>(
    reader: R,
    options: IngestOptions,
) -> Result<(Vec<StarRecord>, FileReport), IngestError> {
    read_rows(reader, STARS_FILE, STARS_COLUMNS, options)
}

// ============================================================================
// Directory Loader
// ============================================================================

/// A directory containing `people.csv`, `movies.csv` and `stars.csv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDataset {
    dir: PathBuf,
}

impl CsvDataset {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn people_path(&self) -> PathBuf {
        self.dir.join(PEOPLE_FILE)
    }

    pub fn movies_path(&self) -> PathBuf {
        self.dir.join(MOVIES_FILE)
    }

    pub fn stars_path(&self) -> PathBuf {
        self.dir.join(STARS_FILE)
    }

    /// Read all three tables and build the dataset.
    pub fn load(&self, options: IngestOptions) -> Result<(Dataset, IngestReport), IngestError> {
        let (people, people_report) = read_people(open(&self.people_path())?, options)?;
        let (movies, movies_report) = read_movies(open(&self.movies_path())?, options)?;
        let (stars, stars_report) = read_stars(open(&self.stars_path())?, options)?;

        let dataset = Dataset::load(people, movies, stars);
        let report = IngestReport {
            people: people_report,
            movies: movies_report,
            stars: stars_report,
        };

        let stats = dataset.stats();
        tracing::info!(
            dir = %self.dir.display(),
            people = stats.people,
            movies = stats.movies,
            links = stats.links,
            skipped_links = stats.skipped_links,
            skipped_rows = report.skipped_rows(),
            "dataset loaded"
        );
        Ok((dataset, report))
    }
}

fn open(path: &Path) -> Result<File, IngestError> {
    File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the dataset stored in `dir`.
pub fn load_dir(
    dir: impl AsRef<Path>,
    options: IngestOptions,
) -> Result<(Dataset, IngestReport), IngestError> {
    CsvDataset::new(dir.as_ref()).load(options)
}
