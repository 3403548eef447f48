use std::io::Write;

use vaxgame::io::adjacency::load_adjacency_csv;

fn write_csv(dir: &std::path::Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    let mut f = std::fs::File::create(&path).expect("create csv");
    f.write_all(content.as_bytes()).expect("write csv");
    path.to_string_lossy().into_owned()
}

#[test]
fn loads_a_valid_symmetric_matrix() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = write_csv(tmp.path(), "path.csv", "0,1,0\n1,0,1\n0,1,0\n");
    let net = load_adjacency_csv(&path).unwrap();

    assert_eq!(net.len(), 3);
    assert_eq!(net.num_edges(), 2);
    assert!(net.has_edge(0, 1) && net.has_edge(1, 2));
    assert!(!net.has_edge(0, 2));
    assert_eq!(net.degree(1), 2);
}

#[test]
fn rejects_malformed_matrices() {
    let tmp = tempfile::tempdir().expect("tempdir");

    let asym = write_csv(tmp.path(), "asym.csv", "0,1\n0,0\n");
    assert!(load_adjacency_csv(&asym).is_err());

    let diag = write_csv(tmp.path(), "diag.csv", "1,0\n0,0\n");
    assert!(load_adjacency_csv(&diag).is_err());

    let weighted = write_csv(tmp.path(), "weighted.csv", "0,0.5\n0.5,0\n");
    assert!(load_adjacency_csv(&weighted).is_err());

    let ragged = write_csv(tmp.path(), "ragged.csv", "0,1,0\n1,0\n0,1,0\n");
    assert!(load_adjacency_csv(&ragged).is_err());
}
