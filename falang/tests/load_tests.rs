//! Tests for the `load` expression against real graph files on disk.

use std::fs;
use std::io::Write;

use falang::execute_code;
use pretty_assertions::assert_eq;

fn write_graph(dir: &tempfile::TempDir, body: &str) -> String {
    let path = dir.path().join("graph.dot");
    let mut file = fs::File::create(&path).unwrap();
    write!(file, "{body}").unwrap();
    path.to_string_lossy().into_owned()
}

fn interpret(source: &str) -> (String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    execute_code(source, &mut out, &mut err).unwrap();
    (
        String::from_utf8(out).unwrap().trim().to_string(),
        String::from_utf8(err).unwrap().trim().to_string(),
    )
}

const CHAIN: &str = "digraph {\n0 -> 1 [label=a];\n1 -> 2 [label=b];\n}\n";

#[test]
fn test_load_extractors() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_graph(&dir, CHAIN);

    let (out, err) = interpret(&format!(
        "let g = load \"{path}\";\n\
         print get_vertices of g;\n\
         print get_labels of g;\n\
         print get_edges of g;"
    ));
    assert_eq!(err, "");
    assert_eq!(
        out,
        "{ 0, 1, 2 } :: SetType<IntType>\n\
         { a, b } :: SetType<StringType>\n\
         { [ 0, a, 1 ], [ 1, b, 2 ] } :: SetType<TupleType<IntType, StringType, IntType>>"
    );
}

#[test]
fn test_loaded_nodes_are_start_and_final() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_graph(&dir, CHAIN);

    let (out, err) = interpret(&format!(
        "let g = load \"{path}\";\n\
         print get_starts of g;\n\
         print get_finals of g;"
    ));
    assert_eq!(err, "");
    assert_eq!(
        out,
        "{ 0, 1, 2 } :: SetType<IntType>\n{ 0, 1, 2 } :: SetType<IntType>"
    );
}

#[test]
fn test_load_then_restrict_reachability() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_graph(&dir, CHAIN);

    // every node starts and ends by default, so all forward pairs qualify
    let (out, err) = interpret(&format!(
        "let g = load \"{path}\"; print get_reachable of g;"
    ));
    assert_eq!(err, "");
    assert_eq!(
        out,
        "{ [ 0, 1 ], [ 0, 2 ], [ 1, 2 ] } :: SetType<TupleType<IntType, IntType>>"
    );

    // restricting starts and finals narrows the answer
    let (out, err) = interpret(&format!(
        "let g = load \"{path}\";\n\
         let h = set_finals of set_starts of g to {{0}} to {{2}};\n\
         print get_reachable of h;"
    ));
    assert_eq!(err, "");
    assert_eq!(out, "{ [ 0, 2 ] } :: SetType<TupleType<IntType, IntType>>");
}

#[test]
fn test_load_through_variable() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_graph(&dir, CHAIN);

    let (out, err) = interpret(&format!(
        "let p = \"{path}\"; print get_labels of load p;"
    ));
    assert_eq!(err, "");
    assert_eq!(out, "{ a, b } :: SetType<StringType>");
}

#[test]
fn test_load_intersection_with_query() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_graph(&dir, CHAIN);

    // intersect the graph with the single-word query "a"
    let (out, err) = interpret(&format!(
        "let g = load \"{path}\";\n\
         let q = g & \"a\";\n\
         print get_edges of q;"
    ));
    assert_eq!(err, "");
    assert_eq!(
        out,
        "{ [ [ 0, 0 ], a, [ 1, 1 ] ] } :: \
         SetType<TupleType<TupleType<IntType, IntType>, StringType, TupleType<IntType, IntType>>>"
    );
}

#[test]
fn test_load_non_integer_vertices() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_graph(&dir, "digraph {\nx -> y [label=a];\n}\n");

    let (out, err) = interpret(&format!("print get_vertices of load \"{path}\";"));
    assert_eq!(out, "");
    assert_eq!(
        err,
        "Error occurred during execution\nvertices must be convertible to int"
    );
}

#[test]
fn test_load_missing_file() {
    let (out, err) = interpret("print load \"/no/such/graph.dot\";");
    assert_eq!(out, "");
    assert!(err.starts_with("Error occurred during execution"));
    assert!(err.contains("failed to load graph '/no/such/graph.dot'"));
}
