//! Shortest-connection search over small hand-built datasets.

use costar_graph::*;

fn id(raw: &str) -> PersonId {
    PersonId::new(raw)
}

fn hanks_bacon() -> Dataset {
    Dataset::load(
        vec![
            PersonRecord::new("1", "Tom Hanks", Some("1956")),
            PersonRecord::new("2", "Kevin Bacon", Some("1958")),
            PersonRecord::new("3", "Isolated Actor", None),
        ],
        vec![MovieRecord::new("m1", "Apollo 13", Some("1995"))],
        vec![StarRecord::new("1", "m1"), StarRecord::new("2", "m1")],
    )
}

/// Two components: {p1..p4} linked in a ring of movies, {q1, q2} on their own.
fn two_components() -> Dataset {
    let people = ["p1", "p2", "p3", "p4", "q1", "q2"]
        .into_iter()
        .map(|p| PersonRecord::new(p, format!("Person {p}"), None));
    let movies = ["r1", "r2", "r3", "r4", "s1"]
        .into_iter()
        .map(|m| MovieRecord::new(m, format!("Movie {m}"), Some("2000")));
    let stars = vec![
        StarRecord::new("p1", "r1"),
        StarRecord::new("p2", "r1"),
        StarRecord::new("p2", "r2"),
        StarRecord::new("p3", "r2"),
        StarRecord::new("p3", "r3"),
        StarRecord::new("p4", "r3"),
        StarRecord::new("p4", "r4"),
        StarRecord::new("p1", "r4"),
        StarRecord::new("q1", "s1"),
        StarRecord::new("q2", "s1"),
    ];
    Dataset::load(people, movies, stars)
}

#[test]
fn test_costars_are_one_degree_apart() {
    let ds = hanks_bacon();
    let path = shortest_path(&ds, &id("1"), &id("2")).unwrap().unwrap();
    assert_eq!(path.steps(), &[Step::new("m1", "2")]);
}

#[test]
fn test_person_without_movies_is_unreachable() {
    let ds = hanks_bacon();
    assert_eq!(shortest_path(&ds, &id("1"), &id("3")).unwrap(), None);
}

#[test]
fn test_disjoint_components_are_not_connected() {
    let ds = two_components();
    assert_eq!(shortest_path(&ds, &id("p1"), &id("q2")).unwrap(), None);
    assert_eq!(shortest_path(&ds, &id("q2"), &id("p3")).unwrap(), None);
    assert_eq!(
        shortest_path(&ds, &id("q1"), &id("q2")).unwrap().map(|p| p.degrees()),
        Some(1)
    );
}

#[test]
fn test_ring_distance_and_tie_break() {
    let ds = two_components();
    // p1 -> p3 has two shortest routes (via p2 and via p4); canonical order
    // visits (r1, p2) before (r4, p4).
    let path = shortest_path(&ds, &id("p1"), &id("p3")).unwrap().unwrap();
    assert_eq!(path.steps(), &[Step::new("r1", "p2"), Step::new("r2", "p3")]);
}

#[test]
fn test_repeated_search_returns_identical_path() {
    let ds = two_components();
    let first = shortest_path(&ds, &id("p2"), &id("p4")).unwrap();
    for _ in 0..5 {
        assert_eq!(shortest_path(&ds, &id("p2"), &id("p4")).unwrap(), first);
    }
}

#[test]
fn test_describe_matches_path_length() {
    let ds = two_components();
    let source = id("p1");
    let path = shortest_path(&ds, &source, &id("p3")).unwrap().unwrap();
    let lines = describe_path(&ds, &source, &path).unwrap();

    assert_eq!(lines.len(), path.degrees());
    assert_eq!(lines[0], "Person p1 and Person p2 starred in Movie r1");
    assert_eq!(lines[1], "Person p2 and Person p3 starred in Movie r2");
}

#[test]
fn test_resolve_then_search_end_to_end() {
    let ds = hanks_bacon();
    let source = resolve_name(&ds, "TOM HANKS").unwrap().person_id.clone();
    let target = resolve_name(&ds, "kevin bacon").unwrap().person_id.clone();

    let path = shortest_path(&ds, &source, &target).unwrap().unwrap();
    let lines = describe_path(&ds, &source, &path).unwrap();
    assert_eq!(lines, vec!["Tom Hanks and Kevin Bacon starred in Apollo 13"]);
}

#[test]
fn test_path_serializes_as_step_list() {
    let ds = hanks_bacon();
    let path = shortest_path(&ds, &id("1"), &id("2")).unwrap().unwrap();
    let json = serde_json::to_value(&path).unwrap();
    assert_eq!(json, serde_json::json!([{ "movie": "m1", "person": "2" }]));
}

#[test]
fn test_searcher_is_shareable_across_threads() {
    let ds = two_components();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| shortest_path(&ds, &id("p1"), &id("p3"))))
            .collect();
        for handle in handles {
            let path = handle.join().unwrap().unwrap().unwrap();
            assert_eq!(path.degrees(), 2);
        }
    });
}
