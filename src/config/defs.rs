use serde::{Deserialize, Serialize};

use crate::model::identifier::GeneIdentifierKind;

pub const DEFAULT_SERVICE_URL: &str = "https://amelie.stanford.edu/api/vcf_api/";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmelieConfig {
    pub service: ServiceConfig,
    pub request: RequestCutoffs,
    pub post_process: PostProcessConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub url: String,
    pub timeout_secs: u64,
    pub accept_invalid_certs: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVICE_URL.to_string(),
            timeout_secs: 600,
            accept_invalid_certs: false,
        }
    }
}

/// Variant filtering settings sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestCutoffs {
    pub dominant_alfq_cutoff: f64,
    pub alfq_cutoff: f64,
    pub filter_by_count: bool,
    pub hmct_cutoff: u32,
    pub alct_cutoff: u32,
    pub only_pass_variants: bool,
    pub filter_relatives_only_hom: bool,
}

impl Default for RequestCutoffs {
    fn default() -> Self {
        Self {
            dominant_alfq_cutoff: 0.1,
            alfq_cutoff: 0.5,
            filter_by_count: false,
            hmct_cutoff: 1,
            alct_cutoff: 3,
            only_pass_variants: true,
            filter_relatives_only_hom: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostProcessConfig {
    pub gene_identifier: GeneIdentifierKind,
}
