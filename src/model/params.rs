use serde::{Deserialize, Serialize};

/// Per-patient request parameters, persisted as `<corpus>_parameters.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestParameters {
    pub phenopacket_path_stem: String,
    pub phenotypes: Vec<String>,
    pub patient_name: String,
    pub patient_sex: Option<String>,
    pub vcf_file: String,
}

pub fn parameters_file_name(corpus_name: &str) -> String {
    format!("{corpus_name}_parameters.json")
}
