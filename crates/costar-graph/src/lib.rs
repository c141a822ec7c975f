//! Costar: degrees of separation over a co-star graph
//!
//! People and movies form an implicit bipartite graph: two people are
//! adjacent when they starred in the same movie. This crate holds:
//!
//! - `model`: identifiers, input rows and loaded entities
//! - `dataset`: the read-only [`Dataset`] built from rows
//! - `graph`: `(movie, co-star)` neighbour derivation
//! - `search`: breadth-first shortest-connection search
//! - `query`: name resolution and path narration
//!
//! The crate does no I/O. Loading rows from disk lives in `costar-ingest-csv`.

pub mod dataset;
mod error;
pub mod graph;
pub mod model;
pub mod query;
pub mod search;

pub use dataset::{Dataset, DatasetStats};
pub use error::GraphError;
pub use graph::{co_stars, neighbors, Neighbor};
pub use model::{
    Movie, MovieId, MovieRecord, NameIndex, Person, PersonId, PersonRecord, StarRecord,
};
pub use query::{connections, describe_path, people_named, resolve_name, Connection, NameMatch};
pub use search::{
    shortest_path, Path, SearchLimits, SearchReport, SearchStats, Searcher, Step,
};
