use super::*;

#[test]
fn unknown_sex_has_no_token() {
    assert_eq!(Sex::UnknownSex.token(), None);
}

#[test]
fn determinate_sex_tokens_are_upper_case() {
    assert_eq!(Sex::Male.token().as_deref(), Some("MALE"));
    assert_eq!(Sex::Female.token().as_deref(), Some("FEMALE"));
    assert_eq!(Sex::OtherSex.token().as_deref(), Some("OTHER_SEX"));
}

#[test]
fn deserializes_protobuf_names() {
    let sex: Sex = serde_json::from_str("\"OTHER_SEX\"").expect("parse");
    assert_eq!(sex, Sex::OtherSex);
    let sex: Sex = serde_json::from_str("\"UNKNOWN_SEX\"").expect("parse");
    assert_eq!(sex, Sex::UnknownSex);
}

#[test]
fn deserializes_protobuf_numbers() {
    let sexes: Vec<Sex> = serde_json::from_str("[0, 1, 2, 3]").expect("parse");
    assert_eq!(
        sexes,
        vec![Sex::UnknownSex, Sex::Female, Sex::Male, Sex::OtherSex]
    );
}

#[test]
fn rejects_unknown_sex_values() {
    assert!(serde_json::from_str::<Sex>("4").is_err());
    assert!(serde_json::from_str::<Sex>("-1").is_err());
    assert!(serde_json::from_str::<Sex>("\"male\"").is_err());
}

#[test]
fn serializes_as_name() {
    assert_eq!(serde_json::to_string(&Sex::Male).expect("json"), "\"MALE\"");
}
