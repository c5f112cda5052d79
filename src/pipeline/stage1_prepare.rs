use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::input::phenopacket::{PatientRecord, read_patient_record};
use crate::input::{InputError, list_files, open_reader, path_display, path_stem};
use crate::model::params::{RequestParameters, parameters_file_name};
use crate::report::json::write_json_pretty;

const COMPATIBLE_GENOME_ASSEMBLIES: [&str; 4] = ["GRCh37", "hg19", "GRCh38", "hg38"];

#[derive(Debug, Error)]
pub enum PrepareError {
    #[error("input error: {0}")]
    Input(#[from] InputError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{record}: no file with fileFormat vcf")]
    NoVcfFile { record: String },
    #[error("{record}: expected a .vcf or .vcf.gz file, found {uri}")]
    UnsupportedVcfFormat { record: String, uri: String },
    #[error("{record}: incompatible genome assembly {assembly:?}")]
    IncompatibleGenomeAssembly {
        record: String,
        assembly: Option<String>,
    },
    #[error("{record}: variant file not found at {path}")]
    MissingVcfFile { record: String, path: PathBuf },
}

/// A parsed record together with the path it was read from.
#[derive(Debug, Clone)]
pub struct CorpusRecord {
    pub path: PathBuf,
    pub record: PatientRecord,
}

impl CorpusRecord {
    pub fn stem(&self) -> String {
        path_stem(&self.path)
    }
}

/// Paths of a corpus laid out as `<testdata>/phenopackets` and `<testdata>/vcf`.
#[derive(Debug, Clone)]
pub struct CorpusLayout {
    pub name: String,
    pub phenopacket_dir: PathBuf,
    pub vcf_dir: PathBuf,
}

impl CorpusLayout {
    pub fn from_testdata_dir(testdata_dir: &Path) -> Self {
        let name = testdata_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "corpus".to_string());
        Self {
            name,
            phenopacket_dir: testdata_dir.join("phenopackets"),
            vcf_dir: testdata_dir.join("vcf"),
        }
    }

    pub fn parameters_path(&self, tool_input_commands_dir: &Path) -> PathBuf {
        tool_input_commands_dir.join(parameters_file_name(&self.name))
    }
}

pub fn read_corpus(phenopacket_dir: &Path) -> Result<Vec<CorpusRecord>, PrepareError> {
    let mut records = Vec::new();
    for path in list_files(phenopacket_dir)? {
        let record = read_patient_record(&path)?;
        records.push(CorpusRecord { path, record });
    }
    Ok(records)
}

pub fn derive_phenotypes(record: &PatientRecord) -> Vec<String> {
    record
        .observed_phenotypic_features()
        .map(|pf| pf.kind.id.clone())
        .collect()
}

pub fn derive_sex(record: &PatientRecord) -> Option<String> {
    record.sex().token()
}

pub fn derive_variant_reference(
    record: &CorpusRecord,
    variant_root_dir: &Path,
) -> Result<String, PrepareError> {
    let name = record.stem();
    let vcf = record
        .record
        .vcf_file()
        .ok_or_else(|| PrepareError::NoVcfFile {
            record: name.clone(),
        })?;

    let file_name = vcf.file_name();
    if !(file_name.ends_with(".vcf") || file_name.ends_with(".vcf.gz")) {
        return Err(PrepareError::UnsupportedVcfFormat {
            record: name,
            uri: vcf.uri.clone(),
        });
    }

    let assembly = vcf.genome_assembly();
    if !assembly.is_some_and(|a| COMPATIBLE_GENOME_ASSEMBLIES.contains(&a)) {
        return Err(PrepareError::IncompatibleGenomeAssembly {
            record: name,
            assembly: assembly.map(str::to_string),
        });
    }

    let path = variant_root_dir.join(file_name);
    if !path.is_file() {
        return Err(PrepareError::MissingVcfFile { record: name, path });
    }
    Ok(path.to_string_lossy().to_string())
}

pub fn build_parameters(
    record: &CorpusRecord,
    variant_root_dir: &Path,
) -> Result<RequestParameters, PrepareError> {
    Ok(RequestParameters {
        phenopacket_path_stem: record.stem(),
        phenotypes: derive_phenotypes(&record.record),
        patient_name: record.record.sample_id().to_string(),
        patient_sex: derive_sex(&record.record),
        vcf_file: derive_variant_reference(record, variant_root_dir)?,
    })
}

/// Stops at the first record that fails.
pub fn build_all(
    records: &[CorpusRecord],
    variant_root_dir: &Path,
) -> Result<Vec<RequestParameters>, PrepareError> {
    records
        .iter()
        .map(|record| {
            let params = build_parameters(record, variant_root_dir)?;
            debug!(
                patient = %params.patient_name,
                phenotypes = params.phenotypes.len(),
                "derived request parameters"
            );
            Ok(params)
        })
        .collect()
}

pub fn persist(parameters: &[RequestParameters], destination: &Path) -> Result<(), PrepareError> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(fs::File::create(destination)?);
    write_json_pretty(&mut writer, parameters)?;
    writer.flush()?;
    Ok(())
}

pub fn read_parameters(path: &Path) -> Result<Vec<RequestParameters>, PrepareError> {
    let reader = open_reader(path)?;
    Ok(serde_json::from_reader(reader)?)
}

/// Builds parameters for a whole corpus and writes `<corpus>_parameters.json`.
pub fn run_stage1_prepare(
    testdata_dir: &Path,
    tool_input_commands_dir: &Path,
) -> Result<(PathBuf, Vec<RequestParameters>), PrepareError> {
    let layout = CorpusLayout::from_testdata_dir(testdata_dir);
    let records = read_corpus(&layout.phenopacket_dir)?;
    let parameters = build_all(&records, &layout.vcf_dir)?;
    let path = layout.parameters_path(tool_input_commands_dir);
    persist(&parameters, &path)?;
    debug!(path = %path_display(&path), "wrote parameters");
    Ok((path, parameters))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_prepare.rs"]
mod tests;
