//! Show how personal names are split into family/given parts, including
//! "et al." detection and a corporate-author override.

use bibl::name::{parse_name, split_author_list, ParsedName};

fn main() {
    let samples = ["Smith, John Q.", "John Q. Smith", "Smith, John and others"];
    for sample in samples {
        let (names, et_al) = split_author_list(sample);
        for name in &names {
            match parse_name(name, &[], &["World Health Organization"]) {
                ParsedName::Person(encoded) => println!("{sample:?} -> person {encoded:?}"),
                ParsedName::AsIs(s) => println!("{sample:?} -> as-is {s:?}"),
                ParsedName::Corp(s) => println!("{sample:?} -> corporate {s:?}"),
            }
        }
        if et_al {
            println!("{sample:?} -> trailing et al.");
        }
    }

    match parse_name("World Health Organization", &[], &["World Health Organization"]) {
        ParsedName::Corp(s) => println!("corporate override recognised: {s:?}"),
        other => println!("unexpected: {other:?}"),
    }
}
