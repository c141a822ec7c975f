//! Directory loading against on-disk CSV fixtures.

use costar_graph::{resolve_name, shortest_path, MovieId, PersonId};
use costar_ingest_csv::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_tables(dir: &Path, people: &str, movies: &str, stars: &str) {
    fs::write(dir.join(PEOPLE_FILE), people).unwrap();
    fs::write(dir.join(MOVIES_FILE), movies).unwrap();
    fs::write(dir.join(STARS_FILE), stars).unwrap();
}

#[test]
fn test_load_dir_links_people_and_movies() {
    let dir = tempdir().unwrap();
    write_tables(
        dir.path(),
        "id,name,birth\n1,Tom Hanks,1956\n2,Kevin Bacon,1958\n3,Loner,\n",
        "id,title,year\nm1,Apollo 13,1995\n",
        "person_id,movie_id\n1,m1\n2,m1\n3,missing\n",
    );

    let (dataset, report) = load_dir(dir.path(), IngestOptions::default()).unwrap();

    assert_eq!(report.people.rows, 3);
    assert_eq!(report.movies.rows, 1);
    assert_eq!(report.stars.rows, 3);
    assert_eq!(report.skipped_rows(), 0);

    let stats = dataset.stats();
    assert_eq!(stats.links, 2);
    assert_eq!(stats.skipped_links, 1);

    let apollo = dataset.movie(&MovieId::new("m1")).unwrap();
    assert_eq!(apollo.stars.len(), 2);

    let hanks = resolve_name(&dataset, "tom hanks").unwrap().person_id.clone();
    let path = shortest_path(&dataset, &hanks, &PersonId::new("2")).unwrap().unwrap();
    assert_eq!(path.degrees(), 1);
}

#[test]
fn test_missing_file_names_the_path() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(PEOPLE_FILE), "id,name,birth\n").unwrap();

    let err = load_dir(dir.path(), IngestOptions::default()).unwrap_err();
    match err {
        IngestError::Io { path, .. } => assert!(path.ends_with(MOVIES_FILE)),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn test_strict_mode_rejects_malformed_rows() {
    let dir = tempdir().unwrap();
    write_tables(
        dir.path(),
        "id,name,birth\n1,Tom Hanks,1956\n2\n",
        "id,title,year\n",
        "person_id,movie_id\n",
    );

    assert!(load_dir(dir.path(), IngestOptions::strict()).is_err());

    let (dataset, report) = load_dir(dir.path(), IngestOptions::lenient()).unwrap();
    assert_eq!(report.people.skipped, 1);
    assert_eq!(dataset.person_count(), 1);
}

#[test]
fn test_csv_dataset_paths() {
    let source = CsvDataset::new("data/small");
    assert!(source.people_path().ends_with("people.csv"));
    assert!(source.movies_path().ends_with("movies.csv"));
    assert!(source.stars_path().ends_with("stars.csv"));
    assert_eq!(source.dir(), Path::new("data/small"));
}
