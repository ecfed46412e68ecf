use cftools::commands::relabel::concord_to_newick;
use cftools::error::Error;
use cftools::parser::ParsingErrorType;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new("tests").join("fixtures").join(name)
}

fn prefix(dir: &TempDir) -> String {
    dir.path().join("output").to_string_lossy().into_owned()
}

#[test]
fn test_site_only() {
    let dir = TempDir::new().unwrap();
    let written = concord_to_newick(&fixture("concord_scf.cf.tree.nex"), &prefix(&dir)).unwrap();

    assert_eq!(written, vec![dir.path().join("output_scf.tre")]);
    assert!(!dir.path().join("output_gcf.tre").exists());
    assert_eq!(
        fs::read_to_string(dir.path().join("output_scf.tre")).unwrap(),
        "(Kea:0.05,Kaka:0.06,((Kakapo:0.12,Kakariki:0.1)43.44/42.83/13.73:0.02,\
         (Kokako:0.2,Tieke:0.19)61.2/20.1/18.7:0.03)38.5/31/30.5:0.01);\n"
    );
}

#[test]
fn test_gene_only_keeps_unannotated_names() {
    let dir = TempDir::new().unwrap();
    let written = concord_to_newick(&fixture("concord_gcf.cf.tree.nex"), &prefix(&dir)).unwrap();

    assert_eq!(written, vec![dir.path().join("output_gcf.tre")]);
    assert_eq!(
        fs::read_to_string(dir.path().join("output_gcf.tre")).unwrap(),
        "(Kea:0.05,Kaka:0.06,((Kakapo:0.12,Kakariki:0.1)55.95/19.05/20.24/4.76:0.02,\
         (Kokako:0.2,Tieke:0.19)97:0.03):0.01);\n"
    );
}

#[test]
fn test_both_views_are_independent() {
    let dir = TempDir::new().unwrap();
    let written = concord_to_newick(&fixture("concord_both.cf.tree.nex"), &prefix(&dir)).unwrap();
    assert_eq!(written.len(), 2);

    let scf = fs::read_to_string(dir.path().join("output_scf.tre")).unwrap();
    let gcf = fs::read_to_string(dir.path().join("output_gcf.tre")).unwrap();

    assert_eq!(
        scf,
        "(Kea:0.05,Kaka:0.06,(Kakapo:0.12,Red-crowned_parakeet:0.1)43.44/42.83/13.73:0.02);\n"
    );
    assert_eq!(
        gcf,
        "(Kea:0.05,Kaka:0.06,(Kakapo:0.12,Red-crowned_parakeet:0.1)55.95/19.05/20.24/4.76:0.02);\n"
    );
}

#[test]
fn test_no_annotation_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let written = concord_to_newick(&fixture("concord_none.tree.nex"), &prefix(&dir)).unwrap();

    assert!(written.is_empty());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_rerun_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let path = fixture("concord_both.cf.tree.nex");

    concord_to_newick(&path, &prefix(&dir)).unwrap();
    let first = fs::read(dir.path().join("output_scf.tre")).unwrap();
    concord_to_newick(&path, &prefix(&dir)).unwrap();
    let second = fs::read(dir.path().join("output_scf.tre")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_malformed_input_is_fatal() {
    let dir = TempDir::new().unwrap();
    let err = concord_to_newick(&fixture("malformed.nex"), &prefix(&dir)).unwrap_err();

    assert!(matches!(&err, Error::Parsing(e) if e.kind() == &ParsingErrorType::UnclosedComment));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}
