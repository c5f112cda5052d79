use super::*;
use crate::model::identifier::GeneIdentifier;
use tempfile::tempdir;

#[test]
fn gene_results_use_canonical_field_names() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("r.json");
    let results = vec![CanonicalGeneResult {
        gene_symbol: "GENE1".to_string(),
        gene_identifier: GeneIdentifier::Resolved("ID1".to_string()),
        score: 0.9,
    }];
    write_gene_results(&path, &results).expect("write");

    let text = std::fs::read_to_string(&path).expect("read");
    assert!(text.contains("    {"));
    let value: serde_json::Value = serde_json::from_str(&text).expect("json");
    assert_eq!(
        value,
        serde_json::json!([{"gene_symbol": "GENE1", "gene_identifier": "ID1", "score": 0.9}])
    );
}

#[test]
fn summary_written_to_out_dir() {
    let dir = tempdir().expect("tempdir");
    let stats = StandardizeStats {
        files: 3,
        genes: 40,
        unresolved_symbols: 2,
    };
    write_summary(
        dir.path(),
        &PostProcessSummary::new(&stats, GeneIdentifierKind::HgncId),
    )
    .expect("summary");

    let value: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join(SUMMARY_FILE)).expect("read"),
    )
    .expect("json");
    assert_eq!(value["files"], 3);
    assert_eq!(value["unresolved_symbols"], 2);
    assert_eq!(value["gene_identifier"], "hgnc_id");
}
