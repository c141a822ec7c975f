//! Name resolution and path narration.

use crate::dataset::Dataset;
use crate::error::GraphError;
use crate::model::{Person, PersonId};
use crate::search::Path;
use serde::Serialize;

/// Outcome of resolving a display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMatch<'a> {
    /// The chosen person: the smallest id among `candidates`.
    pub person_id: &'a PersonId,
    /// Every person carrying the name, in id order.
    pub candidates: Vec<&'a PersonId>,
}

impl NameMatch<'_> {
    /// True when more than one person shares the name and `person_id` was picked.
    pub fn is_ambiguous(&self) -> bool {
        self.candidates.len() > 1
    }
}

/// Case-insensitive lookup of a person by name.
pub fn resolve_name<'a>(dataset: &'a Dataset, name: &str) -> Option<NameMatch<'a>> {
    let bucket = dataset.names().lookup(name)?;
    let candidates: Vec<&'a PersonId> = bucket.iter().collect();
    let person_id = *candidates.first()?;
    Some(NameMatch {
        person_id,
        candidates,
    })
}

/// Every person with the given name, in id order.
pub fn people_named<'a>(dataset: &'a Dataset, name: &str) -> Vec<&'a Person> {
    dataset
        .names()
        .lookup(name)
        .into_iter()
        .flatten()
        .filter_map(|id| dataset.person(id))
        .collect()
}

/// One narrated hop of a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Connection {
    pub from: String,
    pub to: String,
    pub movie: String,
    pub year: Option<String>,
}

impl std::fmt::Display for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} and {} starred in {}", self.from, self.to, self.movie)
    }
}

/// Resolve each step of `path` (starting at `source`) to names and titles.
pub fn connections(
    dataset: &Dataset,
    source: &PersonId,
    path: &Path,
) -> Result<Vec<Connection>, GraphError> {
    let mut current = dataset.require_person(source)?;
    let mut out = Vec::with_capacity(path.degrees());
    for step in path {
        let movie = dataset.require_movie(&step.movie)?;
        let next = dataset.require_person(&step.person)?;
        out.push(Connection {
            from: current.name.clone(),
            to: next.name.clone(),
            movie: movie.title.clone(),
            year: movie.year.clone(),
        });
        current = next;
    }
    Ok(out)
}

/// `"A and B starred in Title"` for every step of `path`.
pub fn describe_path(
    dataset: &Dataset,
    source: &PersonId,
    path: &Path,
) -> Result<Vec<String>, GraphError> {
    Ok(connections(dataset, source, path)?
        .iter()
        .map(Connection::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MovieId, MovieRecord, PersonRecord, StarRecord};
    use crate::search::Step;

    fn dataset() -> Dataset {
        Dataset::load(
            vec![
                PersonRecord::new("1", "Tom Hanks", Some("1956")),
                PersonRecord::new("2", "Kevin Bacon", Some("1958")),
                PersonRecord::new("30", "Chris Evans", Some("1981")),
                PersonRecord::new("4", "Chris Evans", Some("1966")),
            ],
            vec![MovieRecord::new("m1", "Apollo 13", Some("1995"))],
            vec![StarRecord::new("1", "m1"), StarRecord::new("2", "m1")],
        )
    }

    #[test]
    fn resolve_is_case_insensitive() {
        let ds = dataset();
        let a = resolve_name(&ds, "Tom Hanks").unwrap();
        let b = resolve_name(&ds, "tom hanks").unwrap();
        assert_eq!(a.person_id, b.person_id);
        assert!(!a.is_ambiguous());
    }

    #[test]
    fn resolve_missing_name_is_none() {
        assert!(resolve_name(&dataset(), "Nobody At All").is_none());
    }

    #[test]
    fn ambiguous_name_picks_smallest_id() {
        let ds = dataset();
        let m = resolve_name(&ds, "chris evans").unwrap();
        assert!(m.is_ambiguous());
        assert_eq!(m.person_id.as_str(), "30");
        assert_eq!(m.candidates.len(), 2);
    }

    #[test]
    fn people_named_lists_everyone() {
        let ds = dataset();
        let births: Vec<_> = people_named(&ds, "Chris Evans")
            .into_iter()
            .map(|p| p.birth.clone().unwrap_or_default())
            .collect();
        assert_eq!(births, vec!["1981".to_string(), "1966".to_string()]);
    }

    #[test]
    fn describe_threads_current_person() {
        let ds = dataset();
        let path = Path::from_steps(vec![Step::new("m1", "2"), Step::new("m1", "1")]);
        let lines = describe_path(&ds, &PersonId::new("1"), &path).unwrap();
        assert_eq!(
            lines,
            vec![
                "Tom Hanks and Kevin Bacon starred in Apollo 13".to_string(),
                "Kevin Bacon and Tom Hanks starred in Apollo 13".to_string(),
            ]
        );
    }

    #[test]
    fn describe_rejects_unknown_movie() {
        let ds = dataset();
        let path = Path::from_steps(vec![Step::new("m9", "2")]);
        assert_eq!(
            describe_path(&ds, &PersonId::new("1"), &path),
            Err(GraphError::UnknownMovie(MovieId::new("m9")))
        );
    }
}
