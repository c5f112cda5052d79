use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Deserializer, de};

use crate::input::{InputError, open_reader};
use crate::model::sex::Sex;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OntologyClass {
    pub id: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhenotypicFeature {
    #[serde(rename = "type")]
    pub kind: OntologyClass,
    #[serde(default)]
    pub excluded: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Individual {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub sex: Sex,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFile {
    pub uri: String,
    #[serde(default)]
    pub file_attributes: HashMap<String, String>,
}

impl RecordFile {
    pub fn file_format(&self) -> Option<&str> {
        self.file_attributes.get("fileFormat").map(String::as_str)
    }

    pub fn genome_assembly(&self) -> Option<&str> {
        self.file_attributes.get("genomeAssembly").map(String::as_str)
    }

    /// Final component of the uri, with any `file://` scheme dropped.
    pub fn file_name(&self) -> &str {
        let uri = self.uri.strip_prefix("file://").unwrap_or(&self.uri);
        uri.rsplit(['/', '\\']).next().unwrap_or(uri)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phenopacket {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub subject: Individual,
    #[serde(default)]
    pub phenotypic_features: Vec<PhenotypicFeature>,
    #[serde(default)]
    pub files: Vec<RecordFile>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Family {
    #[serde(default)]
    pub id: String,
    pub proband: Phenopacket,
    #[serde(default)]
    pub files: Vec<RecordFile>,
}

/// A patient record: a single phenopacket or a family centred on a proband.
#[derive(Debug, Clone)]
pub enum PatientRecord {
    Family(Family),
    Phenopacket(Phenopacket),
}

/// A `proband` key marks a family; anything else is read as a phenopacket,
/// so field errors come from the shape the document claims to be.
impl<'de> Deserialize<'de> for PatientRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.get("proband").is_some() {
            serde_json::from_value(value)
                .map(PatientRecord::Family)
                .map_err(de::Error::custom)
        } else {
            serde_json::from_value(value)
                .map(PatientRecord::Phenopacket)
                .map_err(de::Error::custom)
        }
    }
}

impl PatientRecord {
    fn proband(&self) -> &Phenopacket {
        match self {
            PatientRecord::Family(family) => &family.proband,
            PatientRecord::Phenopacket(phenopacket) => phenopacket,
        }
    }

    pub fn phenotypic_features(&self) -> &[PhenotypicFeature] {
        &self.proband().phenotypic_features
    }

    pub fn observed_phenotypic_features(&self) -> impl Iterator<Item = &PhenotypicFeature> {
        self.phenotypic_features().iter().filter(|pf| !pf.excluded)
    }

    pub fn sample_id(&self) -> &str {
        &self.proband().subject.id
    }

    pub fn sex(&self) -> Sex {
        self.proband().subject.sex
    }

    pub fn files(&self) -> &[RecordFile] {
        match self {
            PatientRecord::Family(family) => &family.files,
            PatientRecord::Phenopacket(phenopacket) => &phenopacket.files,
        }
    }

    /// First attached file declared with `fileFormat = vcf`.
    pub fn vcf_file(&self) -> Option<&RecordFile> {
        self.files()
            .iter()
            .find(|f| f.file_format().is_some_and(|fmt| fmt.eq_ignore_ascii_case("vcf")))
    }
}

pub fn read_patient_record(path: &Path) -> Result<PatientRecord, InputError> {
    let reader = open_reader(path)?;
    serde_json::from_reader(reader).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/phenopacket.rs"]
mod tests;
