//! The loaded, read-only dataset.
//!
//! `Dataset::load` is the loader boundary: it takes already-decoded rows and
//! builds the people/movie tables, the cast links in both directions and the
//! name index. Nothing mutates a `Dataset` afterwards, so it can be shared
//! freely between concurrent queries.

use crate::error::GraphError;
use crate::model::{
    Movie, MovieId, MovieRecord, NameIndex, Person, PersonId, PersonRecord, StarRecord,
};
use serde::Serialize;
use std::collections::HashMap;

/// Summary counts for a loaded dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    pub people: usize,
    pub movies: usize,
    /// Distinct (person, movie) links.
    pub links: usize,
    /// Star rows whose person or movie id was not found.
    pub skipped_links: usize,
    /// Distinct lowercased names.
    pub names: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    people: HashMap<PersonId, Person>,
    movies: HashMap<MovieId, Movie>,
    names: NameIndex,
    links: usize,
    skipped_links: usize,
}

impl Dataset {
    /// Build a dataset from person, movie and star rows.
    ///
    /// Star rows referencing an unknown person or movie are skipped and only
    /// counted. A repeated person id replaces the earlier row.
    pub fn load<P, M, S>(people: P, movies: M, stars: S) -> Self
    where
        P: IntoIterator<Item = PersonRecord>,
        M: IntoIterator<Item = MovieRecord>,
        S: IntoIterator<Item = StarRecord>,
    {
        let mut dataset = Self::default();

        for record in people {
            if let Some(previous) = dataset.people.get(&record.id) {
                dataset.names.remove(&previous.name, &previous.id);
            }
            dataset.names.insert(&record.name, record.id.clone());
            dataset.people.insert(record.id.clone(), Person::from(record));
        }

        for record in movies {
            let movie = Movie::from(record);
            dataset.movies.insert(movie.id.clone(), movie);
        }

        for star in stars {
            dataset.link(star);
        }

        dataset
    }

    fn link(&mut self, star: StarRecord) {
        let (Some(person), Some(movie)) = (
            self.people.get_mut(&star.person_id),
            self.movies.get_mut(&star.movie_id),
        ) else {
            self.skipped_links += 1;
            return;
        };

        let added = person.movies.insert(star.movie_id);
        movie.stars.insert(star.person_id);
        if added {
            self.links += 1;
        }
    }

    pub fn person(&self, id: &PersonId) -> Option<&Person> {
        self.people.get(id)
    }

    pub fn movie(&self, id: &MovieId) -> Option<&Movie> {
        self.movies.get(id)
    }

    /// Like [`Dataset::person`], for callers that already hold a validated id.
    pub fn require_person(&self, id: &PersonId) -> Result<&Person, GraphError> {
        self.people
            .get(id)
            .ok_or_else(|| GraphError::UnknownPerson(id.clone()))
    }

    pub fn require_movie(&self, id: &MovieId) -> Result<&Movie, GraphError> {
        self.movies
            .get(id)
            .ok_or_else(|| GraphError::UnknownMovie(id.clone()))
    }

    pub fn names(&self) -> &NameIndex {
        &self.names
    }

    pub fn people(&self) -> impl Iterator<Item = &Person> {
        self.people.values()
    }

    pub fn movies(&self) -> impl Iterator<Item = &Movie> {
        self.movies.values()
    }

    pub fn person_count(&self) -> usize {
        self.people.len()
    }

    pub fn stats(&self) -> DatasetStats {
        DatasetStats {
            people: self.people.len(),
            movies: self.movies.len(),
            links: self.links,
            skipped_links: self.skipped_links,
            names: self.names.len(),
        }
    }
}
