//! Typed records for people, movies and the name index.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// Person identifier as it appears in the source data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct PersonId(String);

impl PersonId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PersonId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Movie identifier as it appears in the source data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct MovieId(String);

impl MovieId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MovieId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// Input Rows
// ============================================================================

/// One row of the people table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub id: PersonId,
    pub name: String,
    #[serde(default)]
    pub birth: Option<String>,
}

impl PersonRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, birth: Option<&str>) -> Self {
        Self {
            id: PersonId::new(id),
            name: name.into(),
            birth: birth.map(str::to_string),
        }
    }
}

/// One row of the movies table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub year: Option<String>,
}

impl MovieRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>, year: Option<&str>) -> Self {
        Self {
            id: MovieId::new(id),
            title: title.into(),
            year: year.map(str::to_string),
        }
    }
}

/// One row of the cast table, linking a person to a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarRecord {
    pub person_id: PersonId,
    pub movie_id: MovieId,
}

impl StarRecord {
    pub fn new(person_id: impl Into<String>, movie_id: impl Into<String>) -> Self {
        Self {
            person_id: PersonId::new(person_id),
            movie_id: MovieId::new(movie_id),
        }
    }
}

// ============================================================================
// Loaded Entities
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub birth: Option<String>,
    /// Movies this person starred in, in id order.
    pub movies: BTreeSet<MovieId>,
}

impl From<PersonRecord> for Person {
    fn from(record: PersonRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            birth: record.birth,
            movies: BTreeSet::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub year: Option<String>,
    /// People who starred in this movie, in id order.
    pub stars: BTreeSet<PersonId>,
}

impl From<MovieRecord> for Movie {
    fn from(record: MovieRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            year: record.year,
            stars: BTreeSet::new(),
        }
    }
}

// ============================================================================
// Name Index
// ============================================================================

/// Lowercased name -> ids of every person carrying that name.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    buckets: HashMap<String, BTreeSet<PersonId>>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalised lookup key for a display name.
    pub fn key(name: &str) -> String {
        name.trim().to_lowercase()
    }

    pub fn insert(&mut self, name: &str, id: PersonId) {
        self.buckets.entry(Self::key(name)).or_default().insert(id);
    }

    /// Remove `id` from the bucket of `name`, dropping the bucket once empty.
    pub fn remove(&mut self, name: &str, id: &PersonId) {
        let key = Self::key(name);
        let Some(bucket) = self.buckets.get_mut(&key) else {
            return;
        };
        bucket.remove(id);
        if bucket.is_empty() {
            self.buckets.remove(&key);
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&BTreeSet<PersonId>> {
        self.buckets.get(&Self::key(name))
    }

    /// Number of distinct (lowercased) names.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_index_groups_case_variants() {
        let mut index = NameIndex::new();
        index.insert("Tom Hanks", PersonId::new("158"));
        index.insert("TOM HANKS", PersonId::new("9"));

        let bucket = index.lookup("tom hanks").unwrap();
        assert_eq!(bucket.len(), 2);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn name_index_drops_empty_bucket_on_remove() {
        let mut index = NameIndex::new();
        index.insert("Kevin Bacon", PersonId::new("102"));
        index.remove("kevin bacon", &PersonId::new("102"));

        assert!(index.lookup("Kevin Bacon").is_none());
        assert!(index.is_empty());
    }

    #[test]
    fn ids_order_lexicographically() {
        let mut ids = vec![PersonId::new("705"), PersonId::new("1597"), PersonId::new("1697")];
        ids.sort();
        assert_eq!(ids[0].as_str(), "1597");
        assert_eq!(ids[2].as_str(), "705");
    }
}
