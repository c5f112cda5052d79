use super::*;
use std::cell::RefCell;
use std::io::Read;
use tempfile::tempdir;

fn params(stem: &str, sex: Option<&str>, vcf: &Path) -> RequestParameters {
    RequestParameters {
        phenopacket_path_stem: stem.to_string(),
        phenotypes: vec!["HP:0001250".to_string(), "HP:0001263".to_string()],
        patient_name: format!("{stem}-sample"),
        patient_sex: sex.map(str::to_string),
        vcf_file: vcf.to_string_lossy().to_string(),
    }
}

#[derive(Default)]
struct FakeClient {
    seen: RefCell<Vec<(RequestForm, String, String)>>,
    fail_on: Option<String>,
}

impl ScoringClient for FakeClient {
    fn submit(
        &self,
        form: &RequestForm,
        mut vcf: VcfAttachment,
    ) -> Result<serde_json::Value, TransportError> {
        let mut content = String::new();
        vcf.file
            .read_to_string(&mut content)
            .expect("read attachment");
        let patient = form.get("patientName").unwrap_or_default().to_string();
        self.seen
            .borrow_mut()
            .push((form.clone(), vcf.file_name.clone(), content));
        if self.fail_on.as_deref() == Some(patient.as_str()) {
            return Err(TransportError::Status {
                status: 500,
                body: "boom".to_string(),
            });
        }
        Ok(serde_json::json!([[
            "GENE1",
            [["12345", 0.2], ["67890", 0.9]]
        ]]))
    }
}

#[test]
fn form_carries_fixed_cutoffs_and_patient_fields() {
    let p = params("p1", Some("MALE"), Path::new("/vcf/p1.vcf"));
    let form = build_form(&p, &RequestCutoffs::default());
    assert_eq!(form.get("dominantAlfqCutoff"), Some("0.1"));
    assert_eq!(form.get("alfqCutoff"), Some("0.5"));
    assert_eq!(form.get("filterByCount"), Some("False"));
    assert_eq!(form.get("hmctCutoff"), Some("1"));
    assert_eq!(form.get("alctCutoff"), Some("3"));
    assert_eq!(form.get("patientName"), Some("p1-sample"));
    assert_eq!(form.get("patientSex"), Some("MALE"));
    assert_eq!(form.get("onlyPassVariants"), Some("True"));
    assert_eq!(form.get("filterRelativesOnlyHom"), Some("False"));
    assert_eq!(form.get("phenotypes"), Some("HP:0001250,HP:0001263"));
    assert_eq!(form.fields.len(), 10);
}

#[test]
fn absent_sex_is_omitted_from_form() {
    let p = params("p1", None, Path::new("/vcf/p1.vcf"));
    let form = build_form(&p, &RequestCutoffs::default());
    assert_eq!(form.get("patientSex"), None);
    assert_eq!(form.fields.len(), 9);
}

#[test]
fn run_requests_writes_one_raw_file_per_patient() {
    let dir = tempdir().expect("tempdir");
    let vcf = dir.path().join("p1.vcf");
    fs::write(&vcf, "##fileformat=VCFv4.2\n").expect("write");
    let raw = dir.path().join("raw");

    let client = FakeClient::default();
    let parameters = vec![params("p1", None, &vcf), params("p2", Some("FEMALE"), &vcf)];
    let written =
        run_requests(&client, &parameters, &RequestCutoffs::default(), &raw).expect("run");

    assert_eq!(written, vec![raw.join("p1.json"), raw.join("p2.json")]);
    let seen = client.seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].1, "p1.vcf");
    assert_eq!(seen[0].2, "##fileformat=VCFv4.2\n");

    let body: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(raw.join("p2.json")).expect("read"))
            .expect("json");
    assert_eq!(body[0][0], "GENE1");
}

#[test]
fn transport_failure_aborts_batch() {
    let dir = tempdir().expect("tempdir");
    let vcf = dir.path().join("p.vcf");
    fs::write(&vcf, "").expect("write");
    let raw = dir.path().join("raw");

    let client = FakeClient {
        fail_on: Some("p1-sample".to_string()),
        ..FakeClient::default()
    };
    let parameters = vec![params("p1", None, &vcf), params("p2", None, &vcf)];
    let err = run_requests(&client, &parameters, &RequestCutoffs::default(), &raw).unwrap_err();
    match err {
        RequestError::Transport {
            patient,
            source: TransportError::Status { status, .. },
        } => {
            assert_eq!(patient, "p1-sample");
            assert_eq!(status, 500);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(client.seen.borrow().len(), 1);
    assert!(!raw.join("p1.json").exists());
}

#[test]
fn missing_vcf_is_reported_before_submitting() {
    let dir = tempdir().expect("tempdir");
    let client = FakeClient::default();
    let p = params("p1", None, &dir.path().join("absent.vcf"));
    match submit_one(&client, &p, &RequestCutoffs::default()).unwrap_err() {
        RequestError::OpenVcf { patient, .. } => assert_eq!(patient, "p1-sample"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(client.seen.borrow().is_empty());
}

#[test]
fn attachment_records_file_length() {
    let dir = tempdir().expect("tempdir");
    let vcf = dir.path().join("p1.vcf");
    fs::write(&vcf, "##fileformat=VCFv4.2\n").expect("write");
    let attachment = VcfAttachment::open(&vcf).expect("open");
    assert_eq!(attachment.file_name, "p1.vcf");
    assert_eq!(attachment.len, 21);
}

#[test]
fn unreadable_error_body_is_reported() {
    assert_eq!(error_body::<std::io::Error>(Ok("bad gateway".to_string())), "bad gateway");
    let err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "connection reset");
    assert_eq!(
        error_body(Err::<String, _>(err)),
        "<unreadable body: connection reset>"
    );
}
