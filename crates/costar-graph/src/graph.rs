//! Neighbour derivation over the implicit people/movies graph.

use crate::dataset::Dataset;
use crate::error::GraphError;
use crate::model::{MovieId, PersonId};
use std::collections::BTreeSet;

/// A `(movie, co-star)` edge leaving some person.
pub type Neighbor<'a> = (&'a MovieId, &'a PersonId);

/// Every `(movie, co-star)` pair reachable in one hop from `person`.
///
/// The person themself is never returned. Iteration order is `(movie id,
/// person id)`, which is what makes search tie-breaking reproducible.
pub fn neighbors<'a>(
    dataset: &'a Dataset,
    person: &PersonId,
) -> Result<BTreeSet<Neighbor<'a>>, GraphError> {
    let person = dataset.require_person(person)?;
    let mut out = BTreeSet::new();
    for movie_id in &person.movies {
        // Links are only created when both ends exist.
        let Some(movie) = dataset.movie(movie_id) else {
            continue;
        };
        for star in &movie.stars {
            if *star != person.id {
                out.insert((&movie.id, star));
            }
        }
    }
    Ok(out)
}

/// Distinct co-stars of `person`, in id order.
pub fn co_stars<'a>(
    dataset: &'a Dataset,
    person: &PersonId,
) -> Result<BTreeSet<&'a PersonId>, GraphError> {
    Ok(neighbors(dataset, person)?
        .into_iter()
        .map(|(_, star)| star)
        .collect())
}
