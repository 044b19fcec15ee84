#![allow(clippy::missing_panics_doc)]

/// Create tests that only check if a peptidoform is valid or invalid
#[macro_export]
macro_rules! peptidoform_validity_tests {
    (
        Id,Validity,Example
        $($id:literal,$validity:ident,$case:literal)*
    ) => {
        $($crate::peptidoform_validity_tests!(@single $id,$validity,$case);)*
    };
    (@single $id:literal,valid,$case:literal) => {
        paste::paste! {
            #[test]
            fn [<valid_ $id>]() {
                let (peptidoform, response) =
                    $crate::Peptidoform::parse($case, $crate::test_ontologies());
                println!("{}\n{:?}", $case, response);
                assert!(peptidoform.is_valid, "{}: {:?}", $case, response.errors());
                assert!(response.is_valid());
            }
        }
    };
    (@single $id:literal,invalid,$case:literal) => {
        paste::paste! {
            #[test]
            fn [<invalid_ $id>]() {
                let (peptidoform, response) =
                    $crate::Peptidoform::parse($case, $crate::test_ontologies());
                println!("{}\n{:?}", $case, peptidoform);
                assert!(!peptidoform.is_valid, "{}", $case);
                assert!(response.n_errors() > 0);
            }
        }
    };
}
