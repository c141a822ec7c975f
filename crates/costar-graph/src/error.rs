use crate::model::{MovieId, PersonId};

/// Caller-contract violations and search budget failures.
///
/// Expected negative results (unknown name, no connection) are not errors;
/// they are returned as `None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("unknown person id `{0}`")]
    UnknownPerson(PersonId),

    #[error("unknown movie id `{0}`")]
    UnknownMovie(MovieId),

    #[error("search stopped after exploring {explored} people (limit {limit})")]
    SearchLimitReached { explored: usize, limit: usize },

    #[error("no connection within {max_depth} degrees (search was depth-limited)")]
    DepthLimitReached { max_depth: usize },
}
