#![allow(clippy::missing_panics_doc)]
use crate::{
    DiagnosticCode, IdentifierType, IndexType, UniversalSpectrumIdentifier, UsiParser,
    chemistry::PROTON_MASS, test_ontologies,
};

/// Create tests that only check if a USI is valid or invalid
#[macro_export]
macro_rules! usi_validity_tests {
    (
        Id,Validity,Example
        $($id:literal,$validity:ident,$case:literal)*
    ) => {
        $($crate::usi_validity_tests!(@single $id,$validity,$case);)*
    };
    (@single $id:literal,valid,$case:literal) => {
        paste::paste! {
            #[test]
            fn [<usi_valid_ $id>]() {
                let (usi, response) =
                    $crate::UsiParser::new($crate::test_ontologies()).parse($case);
                println!("{}\n{:?}", $case, usi);
                assert!(usi.is_valid, "{}: {:?}", $case, response.errors());
            }
        }
    };
    (@single $id:literal,invalid,$case:literal) => {
        paste::paste! {
            #[test]
            fn [<usi_invalid_ $id>]() {
                let (usi, response) =
                    $crate::UsiParser::new($crate::test_ontologies()).parse($case);
                println!("{}\n{:?}", $case, response);
                assert!(!usi.is_valid, "{}", $case);
            }
        }
    };
}

usi_validity_tests!(
Id,Validity,Example
0,valid,"mzspec:PXD002437:00261_A06_P001564_B00E_A00_R1:scan:10951"
1,invalid,"PXD002437:00261_A06_P001564_B00E_A00_R1:scan:10951"
2,valid,"mzspec:PXD002437:00261_A06_P001564_B00E_A00_R1:scan:10951:PEPT[Phospho]IDELVISK/2"
3,invalid,"mzspec:PASS002437:00261_A06_P001564_B00E_A00_R1:scan:10951:PEPT[Phospho]IDELVISK/2"
4,invalid,"mzspec"
5,invalid,"mzspec:"
6,invalid,"mzspec:PXD001234"
7,invalid,"mzspec:PXD001234:00261_A06_P001564_B00E_A00_R1:scan"
8,valid,"mzspec:PXD001234:00261_A06_P001564_B00E_A00_R1:index:10951"
9,valid,"mzspec:PXD002437:00261_A06_P001564_B00E_A00_R1:scan:10951:PEPT[+79]IDELVISK/2"
10,valid,"mzspec:PXD002437:00261_A06_P001564_B00E_A00_R1:scan:10951:PEPT[UNIMOD:34]IDELVISK/2"
11,valid,"mzspec:PXD001234:Dilution1:4:scan:10951"
12,valid,"mzspec:PXD002437:00261_A06_P001564_B00E_A00_R1:test1:scan:10951:PEPT[Phospho]IDELVISK/2"
13,valid,"mzspec:PXD002437:00261_A06_P001564_B00E_A00_R1\\:test1:scan:10951:PEPT[Phospho]IDELVISK/2"
14,valid,"mzspec:PXD002437:00261_A06_P001564_B00E_A00_R1:scan:10951:PEPT[Phospho]IDELVISK/2:PA-28732"
15,valid,"mzspec:PXD001234:[Control]fr10:scan:10951"
16,valid,"mzspec:PXD001234:[Control[2]]fr10:scan:10951"
17,valid,"mzspec:PXD001234:[Control]fr10[7]:scan:10951"
18,valid,"mzspec:PXD001234:[Control[2]]fr10[7]:scan:10951"
19,valid,"mzspec:MSV000079514:foo:SCAN:1"
20,valid,"mzspec:PXD001234:run:nativeId:controllerType=0 controllerNumber=1 scan=10951"
21,invalid,"mzspec::run:scan:1"
22,invalid,"mzspec:PXD001234:run:scan::PEPTIDE/2"
23,invalid,"mzspec:PXD001234:run:scan:1:PEPTIDE"
24,invalid,"mzspec:PXD001234:run:scan:1:PEPT[phos]IDE/2"
25,invalid,"mzspec:PXD001234:run:scan:1:PEPTIDE/99999999999"
26,invalid,"mzspec:PXD001234:run"
27,valid,"mzspec:PXD001234:run:scan:1:PEPTIDE/0"
);

fn parse(text: &str) -> (UniversalSpectrumIdentifier, crate::DiagnosticResponse) {
    UsiParser::new(test_ontologies()).parse(text)
}

#[test]
fn plain_usi() {
    let (usi, response) = parse("mzspec:PXD002437:00261_A06_P001564_B00E_A00_R1:scan:10951");
    assert!(response.is_valid());
    assert_eq!(response.n_warnings(), 0);
    assert_eq!(usi.identifier_type, Some(IdentifierType::Usi));
    assert_eq!(usi.collection_identifier.as_deref(), Some("PXD002437"));
    assert_eq!(
        usi.collection_type.as_deref(),
        Some("ProteomeXchange dataset")
    );
    assert_eq!(
        usi.ms_run_name.as_deref(),
        Some("00261_A06_P001564_B00E_A00_R1")
    );
    assert_eq!(usi.index_type, Some(IndexType::Scan));
    assert_eq!(usi.index.as_deref(), Some("10951"));
    assert_eq!(usi.interpretation, None);
    assert_eq!(usi.peptidoform, None);
    assert_eq!(usi.mz, None);
}

#[test]
fn missing_prefix() {
    let (usi, response) = parse("PXD002437:00261_A06_P001564_B00E_A00_R1:scan:10951");
    assert!(!usi.is_valid);
    assert_eq!(response.n_errors(), 1);
    assert_eq!(response.errors()[0].code, DiagnosticCode::MissingPrefix);
    assert_eq!(usi.collection_identifier, None);
    assert_eq!(usi.ms_run_name, None);
}

#[test]
fn structural_failures() {
    for (text, code) in [
        ("mzspec:PXD001234", DiagnosticCode::InsufficientComponents),
        ("mzspec:", DiagnosticCode::InsufficientComponents),
        ("mzspec::run:scan:1", DiagnosticCode::EmptyCollectionIdentifier),
        (
            "mzspec:PXD001234:00261_A06_P001564_B00E_A00_R1:scan",
            DiagnosticCode::MissingIndex,
        ),
    ] {
        let (usi, response) = parse(text);
        assert!(!usi.is_valid, "{text}");
        assert_eq!(response.n_errors(), 1, "{text}: {:?}", response.errors());
        assert_eq!(response.errors()[0].code, code, "{text}");
    }
}

#[test]
fn empty_index_continues() {
    let (usi, response) = parse("mzspec:PXD001234:run:scan::PEPTIDE/2");
    assert!(!usi.is_valid);
    assert!(response.contains(DiagnosticCode::MissingIndex));
    assert_eq!(usi.index.as_deref(), Some(""));
    assert_eq!(usi.charge, Some(2));
    assert!(usi.peptidoform.is_some());
}

#[test]
fn interpretation() {
    let (usi, response) = parse(
        "mzspec:PXD002437:00261_A06_P001564_B00E_A00_R1:scan:10951:PEPT[Phospho]IDELVISK/2",
    );
    assert!(response.is_valid());
    assert_eq!(usi.identifier_type, Some(IdentifierType::Upsmi));
    assert_eq!(
        usi.interpretation.as_deref(),
        Some("PEPT[Phospho]IDELVISK/2")
    );
    assert_eq!(
        usi.peptidoform_string.as_deref(),
        Some("PEPT[Phospho]IDELVISK")
    );
    assert_eq!(usi.charge, Some(2));
    let peptidoform = usi.peptidoform.as_ref().unwrap();
    assert_eq!(peptidoform.peptide_sequence, "PEPTIDELVISK");
    let neutral = peptidoform.neutral_mass.unwrap();
    let mz = usi.mz.unwrap();
    assert!((mz - (neutral + 2.0 * PROTON_MASS) / 2.0).abs() < 1e-9);
}

#[test]
fn provenance() {
    let (usi, response) = parse(
        "mzspec:PXD002437:00261_A06_P001564_B00E_A00_R1:scan:10951:PEPT[Phospho]IDELVISK/2:PA-28732",
    );
    assert!(response.is_valid());
    assert_eq!(usi.identifier_type, Some(IdentifierType::Upsmpi));
    assert_eq!(usi.provenance_identifier.as_deref(), Some("PA-28732"));
    assert_eq!(
        usi.interpretation.as_deref(),
        Some("PEPT[Phospho]IDELVISK/2")
    );
    assert_eq!(usi.charge, Some(2));
}

#[test]
fn colon_in_interpretation() {
    let (usi, response) =
        parse("mzspec:PXD002437:run:scan:10951:[UNIMOD:214]PEPT[UNIMOD:21]IDE/3");
    assert!(response.is_valid(), "{:?}", response.errors());
    assert_eq!(usi.identifier_type, Some(IdentifierType::Upsmi));
    assert_eq!(
        usi.peptidoform_string.as_deref(),
        Some("[UNIMOD:214]PEPT[UNIMOD:21]IDE")
    );
    assert_eq!(usi.provenance_identifier, None);
    assert_eq!(usi.charge, Some(3));
}

#[test]
fn run_name_with_colons() {
    let (usi, _) = parse("mzspec:PXD001234:Dilution1:4:scan:10951");
    assert!(usi.is_valid);
    assert_eq!(usi.ms_run_name.as_deref(), Some("Dilution1:4"));
    assert_eq!(usi.index.as_deref(), Some("10951"));
}

#[test]
fn subfolder() {
    let (usi, _) = parse("mzspec:PXD001234:[Control[2]]fr10[7]:scan:10951");
    assert!(usi.is_valid);
    assert_eq!(usi.dataset_subfolder.as_deref(), Some("Control[2]"));
    assert_eq!(usi.ms_run_name.as_deref(), Some("fr10[7]"));

    let (usi, _) = parse("mzspec:PXD001234:[Control]fr10:scan:10951");
    assert_eq!(usi.dataset_subfolder.as_deref(), Some("Control"));
    assert_eq!(usi.ms_run_name.as_deref(), Some("fr10"));
}

#[test]
fn case_insensitive_index_type() {
    let (usi, _) = parse("mzspec:PXD001234:run:NATIVEID:scan=1");
    assert!(usi.is_valid);
    assert_eq!(usi.index_type, Some(IndexType::NativeId));
    assert_eq!(usi.index.as_deref(), Some("scan=1"));
}

#[test]
fn run_identifier() {
    let (usi, response) = parse("mzspec:PXD001234:run");
    assert!(!usi.is_valid);
    assert!(response.is_valid());
    assert!(response.contains(DiagnosticCode::NoIndexType));
    assert_eq!(usi.identifier_type, Some(IdentifierType::RunIdentifier));
    assert_eq!(usi.ms_run_name.as_deref(), Some("run"));
    assert_eq!(usi.index, None);
}

#[test]
fn unknown_collection() {
    let (usi, response) = parse(
        "mzspec:PASS002437:00261_A06_P001564_B00E_A00_R1:scan:10951:PEPT[Phospho]IDELVISK/2",
    );
    assert!(!usi.is_valid);
    assert_eq!(response.n_errors(), 1);
    assert_eq!(response.errors()[0].code, DiagnosticCode::UnknownCollection);
    assert_eq!(usi.collection_type, None);
    // The rest is still parsed
    assert_eq!(usi.charge, Some(2));
    assert!(usi.mz.is_some());
}

#[test]
fn missing_charge() {
    let (usi, response) = parse("mzspec:PXD001234:run:scan:1:PEPTIDE");
    assert!(!usi.is_valid);
    assert!(response.contains(DiagnosticCode::MissingCharge));
    assert_eq!(usi.interpretation.as_deref(), Some("PEPTIDE"));
    assert_eq!(usi.peptidoform, None);
}

#[test]
fn charges() {
    let (usi, response) = parse("mzspec:PXD001234:run:scan:1:PEPTIDE/99999999999");
    assert!(response.contains(DiagnosticCode::InvalidCharge));
    assert_eq!(usi.charge, None);
    assert_eq!(usi.mz, None);

    let (usi, response) = parse("mzspec:PXD001234:run:scan:1:PEPTIDE/0");
    assert!(usi.is_valid);
    assert!(response.contains(DiagnosticCode::ZeroCharge));
    assert_eq!(usi.charge, Some(0));
    assert_eq!(usi.mz, None);
}

#[test]
fn invalid_peptidoform() {
    let (usi, response) = parse("mzspec:PXD001234:run:scan:1:PEPT[phos]IDE/2");
    assert!(!usi.is_valid);
    assert!(response.contains(DiagnosticCode::ErrorInPeptidoform));
    assert!(response.contains(DiagnosticCode::UnresolvedModification));
    assert_eq!(usi.mz, None);
    assert!(!usi.peptidoform.unwrap().is_valid);
}

#[test]
fn reparse_resets() {
    let parser = UsiParser::new(test_ontologies());
    let mut usi = UniversalSpectrumIdentifier::default();
    let response = parser.parse_into(
        &mut usi,
        "mzspec:PXD001234:[Control]fr10:scan:10951:PEPT[Phospho]IDELVISK/2:PA-28732",
    );
    assert!(response.is_valid());
    assert!(usi.provenance_identifier.is_some());
    let response = parser.parse_into(&mut usi, "mzspec:PXD001234:fr11:index:5");
    assert!(response.is_valid());
    assert_eq!(usi.dataset_subfolder, None);
    assert_eq!(usi.provenance_identifier, None);
    assert_eq!(usi.peptidoform, None);
    assert_eq!(usi.mz, None);
    assert_eq!(usi, parser.parse("mzspec:PXD001234:fr11:index:5").0);
}

#[test]
fn idempotent() {
    let text = "mzspec:PXD002437:00261_A06_P001564_B00E_A00_R1:scan:10951:PEPT[phos]IDELVISK/2";
    assert_eq!(parse(text), parse(text));
}

#[test]
fn validate_list() {
    let parser = UsiParser::new(test_ontologies());
    let report = parser.validate_list([
        "mzspec:PXD002437:00261_A06_P001564_B00E_A00_R1:scan:10951",
        "PXD002437:00261_A06_P001564_B00E_A00_R1:scan:10951",
        "mzspec:PXD002437:00261_A06_P001564_B00E_A00_R1:scan:10951",
        "mzspec:PXD002437:00261_A06_P001564_B00E_A00_R1:scan:10951:PEPT[Phospho]IDELVISK/2",
    ]);
    assert!(report.is_ok());
    assert_eq!(report.validation_results.len(), 3);
    assert_eq!(report.n_valid, 2);
    assert_eq!(report.n_invalid, 1);
    let invalid = &report.validation_results["PXD002437:00261_A06_P001564_B00E_A00_R1:scan:10951"];
    assert!(!invalid.usi.is_valid);
    assert!(invalid.response.contains(DiagnosticCode::MissingPrefix));

    let empty = parser.validate_list(Vec::<String>::new());
    assert!(!empty.is_ok());
    assert_eq!(empty.error_code, "EmptyUsiList");
    assert!(empty.validation_results.is_empty());
}
