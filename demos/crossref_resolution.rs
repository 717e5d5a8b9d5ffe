//! Show a BibTeX `@inproceedings` entry inheriting its parent
//! `@proceedings`' title (renamed to `booktitle`) via `crossref`.

use bibl::driver;
use bibl::params::{InputFormat, OutputFormat, Params};

fn main() -> anyhow::Result<()> {
    let source = br#"
@proceedings{sigmod99,
  title = {Proceedings of the 1999 ACM SIGMOD Conference},
  year = {1999},
}

@inproceedings{doe99,
  crossref = {sigmod99},
  title = {Indexing for Fast Joins},
  author = {Jane Doe},
}
"#;

    let params = Params::new(InputFormat::BibTeX, OutputFormat::BibTeX);
    let (collection, diagnostics) = driver::read(source, &params)?;
    for warning in diagnostics.warnings() {
        eprintln!("warning: {warning}");
    }

    let out = driver::write(&collection, &params)?;
    print!("{out}");
    Ok(())
}
