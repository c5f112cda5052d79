use super::*;
use crate::model::identifier::GeneIdentifierKind;
use std::fs;
use tempfile::tempdir;

#[test]
fn defaults_without_path() {
    let config = load_config_or_default(None).expect("config");
    assert_eq!(config, AmelieConfig::default());
    assert_eq!(config.request.dominant_alfq_cutoff, 0.1);
    assert_eq!(config.request.alfq_cutoff, 0.5);
    assert_eq!(config.request.hmct_cutoff, 1);
    assert_eq!(config.request.alct_cutoff, 3);
    assert!(config.request.only_pass_variants);
    assert!(!config.request.filter_by_count);
    assert_eq!(config.service.timeout_secs, 600);
}

#[test]
fn partial_file_keeps_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[service]\nurl = \"http://localhost:9000/api\"\n\n[request]\nalct_cutoff = 5\n\n[post_process]\ngene_identifier = \"hgnc_id\"\n",
    )
    .expect("write");

    let config = load_config(&path).expect("config");
    assert_eq!(config.service.url, "http://localhost:9000/api");
    assert_eq!(config.service.timeout_secs, 600);
    assert_eq!(config.request.alct_cutoff, 5);
    assert_eq!(config.request.hmct_cutoff, 1);
    assert_eq!(
        config.post_process.gene_identifier,
        GeneIdentifierKind::HgncId
    );
}

#[test]
fn invalid_toml_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "[service\nurl = 1").expect("write");
    match load_config(&path).unwrap_err() {
        ConfigLoadError::Toml(_) => {}
        other => panic!("unexpected error: {other:?}"),
    }
}
