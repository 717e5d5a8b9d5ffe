//! Property-based checks for invariants documented across the crate:
//! case-insensitive tag lookup, page-range splitting across separator
//! variants, and XML namespace-prefix stripping.

use bibl::converter::{apply_process, Process, TranslateEntry};
use bibl::field_store::level::MAIN;
use bibl::field_store::FieldStore;
use proptest::prelude::*;

fn tag_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z]{1,12}"
}

proptest! {
    #[test]
    fn field_store_find_is_case_insensitive(tag in tag_strategy(), value in "[a-zA-Z0-9 ]{0,20}") {
        let mut store = FieldStore::new();
        store.add(tag.clone(), value.clone(), MAIN);

        prop_assert_eq!(store.findv(MAIN, &tag.to_ascii_uppercase()), Some(value.as_str()));
        prop_assert_eq!(store.findv(MAIN, &tag.to_ascii_lowercase()), Some(value.as_str()));
    }

    #[test]
    fn pages_split_is_separator_agnostic(start in 1u32..9999, stop in 1u32..9999) {
        let start_str = start.to_string();
        let stop_str = stop.to_string();
        // Equal digit counts only: `reconstruct_stop` in `converter` treats a
        // shorter stop as a PubMed-style abbreviated suffix (`101-9`), which
        // is exercised separately in `tests/conversion_scenarios.rs`.
        prop_assume!(start_str.len() == stop_str.len());

        let entry = TranslateEntry {
            input_tag: "pages",
            output_tag: "",
            process: Process::Pages,
            level_offset: 0,
        };

        for sep in ['-', '\u{2013}', '\u{2014}', ' '] {
            let value = format!("{start_str}{sep}{stop_str}");
            let mut out = FieldStore::new();
            apply_process(&entry, &value, MAIN, &mut out, &[], &[], None);
            prop_assert_eq!(out.findv(MAIN, "PAGES:START"), Some(start_str.as_str()));
            prop_assert_eq!(out.findv(MAIN, "PAGES:STOP"), Some(stop_str.as_str()));
        }
    }

    #[test]
    fn xml_namespace_prefix_is_always_stripped(prefix in "[a-zA-Z]{1,8}", name in "[a-zA-Z]{1,8}") {
        let xml = format!("<{prefix}:{name} xmlns:{prefix}=\"urn:example\"/>");
        let node = bibl::xmltree::parse(&xml).unwrap();
        prop_assert_eq!(node.name, name);
    }
}
