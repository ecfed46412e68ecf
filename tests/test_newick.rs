use cftools::newick::{NewickParser, parse_file, parse_str, write_newick_file};
use cftools::parser::ParsingErrorType;
use cftools::parser::byte_parser::ByteParser;
use std::fs;
use tempfile::TempDir;

// --- TESTS NEWICK STRING PARSING ---
#[test]
fn test_basic_tree() {
    let newick = "((A:1.0,B:2.0):3.0,C:4.0):0.5;";
    let mut parser = ByteParser::for_str(newick);
    let tree = NewickParser::new().parse_str(&mut parser).unwrap();

    // Test counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 2);
    assert_eq!(tree.num_vertices(), 5);
    assert!(tree.is_valid());

    // Test relationships
    let root = tree.root().unwrap();
    assert_eq!(root.children().len(), 2);
    assert_eq!(*root.branch_length().unwrap(), 0.5);

    let internal = tree.vertex(root.children()[0]);
    assert!(internal.is_internal());
    assert_eq!(internal.parent(), Some(root.index()));

    let names: Vec<_> = internal
        .children()
        .iter()
        .map(|&child| tree.vertex(child).name().unwrap())
        .collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn test_whitespace_and_newlines() {
    let tree = parse_str("(\n  A : 1.0 ,\n\tB:2.0\n) ;").unwrap();
    assert_eq!(tree.num_leaves(), 2);
    assert_eq!(tree.to_newick(), "(A:1,B:2);");
}

#[test]
fn test_quoted_labels_round_trip() {
    let tree = parse_str("('Wilson''s Storm-petrel':1,'Grey-faced petrel':2);").unwrap();
    let names: Vec<_> = tree.leaves().map(|v| v.name().unwrap()).collect();
    assert_eq!(names, vec!["Wilson's Storm-petrel", "Grey-faced petrel"]);
    assert_eq!(
        tree.to_newick(),
        "('Wilson''s Storm-petrel':1,Grey-faced_petrel:2);"
    );
}

#[test]
fn test_iqtree_annotation_is_kept_as_comment() {
    let tree = parse_str(
        "(A:0.1,B:0.2,(C:0.3,D:0.4)[&label=\"100\",sCF=\"43.44\",sCF/sDF1/sDF2=\"43.44/42.83/13.73\"]:0.5);",
    )
    .unwrap();

    let annotated: Vec<_> = tree.internal_vertices().filter_map(|v| v.comment()).collect();
    assert_eq!(
        annotated,
        vec!["&label=\"100\",sCF=\"43.44\",sCF/sDF1/sDF2=\"43.44/42.83/13.73\""]
    );
    // Comments are not written
    assert_eq!(tree.to_newick(), "(A:0.1,B:0.2,(C:0.3,D:0.4):0.5);");
}

#[test]
fn test_writing_is_idempotent() {
    let first = parse_str("((A:1e-3,B:0.1000):2.50,C:3)95:0.0;").unwrap().to_newick();
    let second = parse_str(&first).unwrap().to_newick();
    assert_eq!(first, second);
    assert_eq!(first, "((A:0.001,B:0.1):2.5,C:3)95:0;");
}

#[test]
fn test_unclosed_comment() {
    let err = parse_str("(A,B)[&label=\"1\";").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnclosedComment);
}

#[test]
fn test_unclosed_quote() {
    let err = parse_str("('A,B);").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnclosedQuote);
}

#[test]
fn test_error_reports_position() {
    let err = parse_str("(A,B))").unwrap_err();
    assert_eq!(err.position(), 5);
    assert!(err.to_string().contains("at position 5"));
}

// --- TESTS NEWICK FILES ---
#[test]
fn test_write_and_parse_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trees.nwk");

    let trees = vec![parse_str("(A:1,B:2);").unwrap(), parse_str("((A,B),C);").unwrap()];
    write_newick_file(&path, &trees).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "(A:1,B:2);\n((A,B),C);\n");

    let parsed = parse_file(&path).unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[1].num_leaves(), 3);
}

#[test]
fn test_parse_missing_file() {
    let err = parse_file("tests/fixtures/does_not_exist.nwk").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::IoError(msg) if msg.contains("does_not_exist.nwk")));
}
