//! Convert a small BibTeX bibliography to RIS, printing any diagnostics
//! raised along the way.

use bibl::driver;
use bibl::params::{InputFormat, OutputFormat, Params};

fn main() -> anyhow::Result<()> {
    let source = br#"
@article{smith2020,
  title = {Deep Learning for Citation Graphs},
  author = {Jane Smith and Robert Lee},
  journal = {Journal of Applied Informatics},
  year = {2020},
  volume = {12},
  pages = {101--109},
}
"#;

    let params = Params::new(InputFormat::BibTeX, OutputFormat::Ris);
    let (collection, diagnostics) = driver::read(source, &params)?;

    for warning in diagnostics.warnings() {
        eprintln!("warning: {warning}");
    }

    let ris = driver::write(&collection, &params)?;
    print!("{ris}");
    Ok(())
}
