pub mod clock;
pub mod error;
pub mod generate;
pub mod output;
pub mod record;
pub mod value;

pub use error::{Error, Result};

use std::io::Write;

use rand::Rng;

use crate::clock::Clock;
use crate::generate::GeneratorConfig;
use crate::output::OutputConfig;

/// Generate a document and print it to `out`: the rendered document, which
/// ends in a newline, followed by one more newline.
pub fn run<W, R, C>(
    out: &mut W,
    generator: &GeneratorConfig,
    output: &OutputConfig,
    rng: &mut R,
    clock: &C,
) -> Result<()>
where
    W: Write + ?Sized,
    R: Rng + ?Sized,
    C: Clock + ?Sized,
{
    let doc = generate::generate(generator, rng, clock)?;
    output::write_document(out, &doc.to_value(), output)?;
    out.write_all(b"\n")?;
    Ok(())
}
