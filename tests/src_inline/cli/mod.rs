use super::*;
use crate::model::identifier::GeneIdentifierKind;
use clap::Parser;

#[test]
fn prepare_parses() {
    let cli = Cli::parse_from([
        "pheval-amelie",
        "prepare",
        "--testdata",
        "corpus",
        "--out",
        "cmds",
    ]);
    match cli.command {
        Command::Prepare(args) => {
            assert_eq!(args.testdata, std::path::PathBuf::from("corpus"));
            assert_eq!(args.out, std::path::PathBuf::from("cmds"));
        }
        _ => panic!("expected prepare command"),
    }
}

#[test]
fn run_url_override_parses() {
    let cli = Cli::parse_from([
        "pheval-amelie",
        "run",
        "--testdata",
        "corpus",
        "--tool-input-commands",
        "cmds",
        "--raw-results",
        "raw",
        "--url",
        "http://localhost:8000/api",
    ]);
    match cli.command {
        Command::Run(args) => {
            assert_eq!(args.url.as_deref(), Some("http://localhost:8000/api"));
            assert!(args.config.is_none());
        }
        _ => panic!("expected run command"),
    }
}

#[test]
fn post_process_gene_identifier_parses() {
    let cli = Cli::parse_from([
        "pheval-amelie",
        "post-process",
        "--raw-results",
        "raw",
        "--out",
        "out",
        "--hgnc",
        "hgnc.tsv",
        "--gene-identifier",
        "entrez_id",
    ]);
    match cli.command {
        Command::PostProcess(args) => {
            assert_eq!(args.gene_identifier, Some(GeneIdentifierKind::EntrezId));
        }
        _ => panic!("expected post-process command"),
    }
}

#[test]
fn post_process_rejects_unknown_identifier() {
    let res = Cli::try_parse_from([
        "pheval-amelie",
        "post-process",
        "--raw-results",
        "raw",
        "--out",
        "out",
        "--hgnc",
        "hgnc.tsv",
        "--gene-identifier",
        "symbol",
    ]);
    assert!(res.is_err());
}
