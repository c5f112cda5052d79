use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::{Client, multipart};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::defs::{RequestCutoffs, ServiceConfig};
use crate::input::path_display;
use crate::model::params::RequestParameters;
use crate::report::json::write_json_pretty;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("{patient}: cannot open variant file {path}: {source}")]
    OpenVcf {
        patient: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{patient}: {source}")]
    Transport {
        patient: String,
        #[source]
        source: TransportError,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Text fields of one scoring request, in the order the service documents them.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestForm {
    pub fields: Vec<(&'static str, String)>,
}

impl RequestForm {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Booleans are sent capitalised, as the service has always received them.
fn form_bool(value: bool) -> String {
    if value { "True" } else { "False" }.to_string()
}

pub fn build_form(parameters: &RequestParameters, cutoffs: &RequestCutoffs) -> RequestForm {
    let mut fields = vec![
        ("dominantAlfqCutoff", cutoffs.dominant_alfq_cutoff.to_string()),
        ("alfqCutoff", cutoffs.alfq_cutoff.to_string()),
        ("filterByCount", form_bool(cutoffs.filter_by_count)),
        ("hmctCutoff", cutoffs.hmct_cutoff.to_string()),
        ("alctCutoff", cutoffs.alct_cutoff.to_string()),
        ("patientName", parameters.patient_name.clone()),
    ];
    if let Some(sex) = &parameters.patient_sex {
        fields.push(("patientSex", sex.clone()));
    }
    fields.push(("onlyPassVariants", form_bool(cutoffs.only_pass_variants)));
    fields.push((
        "filterRelativesOnlyHom",
        form_bool(cutoffs.filter_relatives_only_hom),
    ));
    fields.push(("phenotypes", parameters.phenotypes.join(",")));
    RequestForm { fields }
}

/// An open variant file. The handle is closed when this value is dropped,
/// whether or not the request that consumed it succeeded.
#[derive(Debug)]
pub struct VcfAttachment {
    pub file_name: String,
    pub file: File,
    /// Byte length, so the upload carries a Content-Length.
    pub len: u64,
}

impl VcfAttachment {
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "variants.vcf".to_string());
        Ok(Self {
            file_name,
            file,
            len,
        })
    }
}

pub trait ScoringClient {
    fn submit(
        &self,
        form: &RequestForm,
        vcf: VcfAttachment,
    ) -> Result<serde_json::Value, TransportError>;
}

pub struct HttpScoringClient {
    url: String,
    client: Client,
}

impl HttpScoringClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;
        Ok(Self {
            url: config.url.clone(),
            client,
        })
    }
}

impl ScoringClient for HttpScoringClient {
    fn submit(
        &self,
        form: &RequestForm,
        vcf: VcfAttachment,
    ) -> Result<serde_json::Value, TransportError> {
        let mut body = multipart::Form::new();
        for (name, value) in &form.fields {
            body = body.text(*name, value.clone());
        }
        let part =
            multipart::Part::reader_with_length(vcf.file, vcf.len).file_name(vcf.file_name);
        body = body.part("vcfFile", part);

        let resp = self.client.post(&self.url).multipart(body).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: error_body(resp.text()),
            });
        }
        Ok(resp.json()?)
    }
}

/// Body of a failed response; a body that cannot be read is named, not dropped.
fn error_body<E: std::fmt::Display>(text: Result<String, E>) -> String {
    match text {
        Ok(body) => body,
        Err(e) => format!("<unreadable body: {e}>"),
    }
}

pub fn raw_result_path(raw_results_dir: &Path, parameters: &RequestParameters) -> PathBuf {
    raw_results_dir.join(format!("{}.json", parameters.phenopacket_path_stem))
}

pub fn save_response(response: &serde_json::Value, path: &Path) -> Result<(), RequestError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_json_pretty(&mut writer, response)?;
    writer.flush()?;
    Ok(())
}

pub fn submit_one<C: ScoringClient + ?Sized>(
    client: &C,
    parameters: &RequestParameters,
    cutoffs: &RequestCutoffs,
) -> Result<serde_json::Value, RequestError> {
    let form = build_form(parameters, cutoffs);
    let vcf_path = Path::new(&parameters.vcf_file);
    let vcf = VcfAttachment::open(vcf_path).map_err(|source| RequestError::OpenVcf {
        patient: parameters.patient_name.clone(),
        path: vcf_path.to_path_buf(),
        source,
    })?;
    client
        .submit(&form, vcf)
        .map_err(|source| RequestError::Transport {
            patient: parameters.patient_name.clone(),
            source,
        })
}

/// One request per patient; the first failure aborts the batch.
pub fn run_requests<C: ScoringClient + ?Sized>(
    client: &C,
    parameters: &[RequestParameters],
    cutoffs: &RequestCutoffs,
    raw_results_dir: &Path,
) -> Result<Vec<PathBuf>, RequestError> {
    fs::create_dir_all(raw_results_dir)?;
    let mut written = Vec::with_capacity(parameters.len());
    for (idx, params) in parameters.iter().enumerate() {
        info!(
            patient = %params.patient_name,
            n = idx + 1,
            total = parameters.len(),
            "submitting request"
        );
        let response = submit_one(client, params, cutoffs)?;
        let path = raw_result_path(raw_results_dir, params);
        save_response(&response, &path)?;
        debug!(path = %path_display(&path), "wrote raw result");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_request.rs"]
mod tests;
