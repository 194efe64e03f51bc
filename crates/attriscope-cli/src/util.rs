use std::{
    fs::File,
    io::{self, BufWriter, Write as _},
    path::PathBuf,
};

use anyhow::Context as _;
use serde::Serialize;

/// Serialize `document` as pretty JSON to `output`, or stdout when absent.
pub fn write_json<T>(output: Option<&PathBuf>, document: &T) -> anyhow::Result<()>
where
    T: Serialize,
{
    let writer = if let Some(path) = output {
        let file = File::create(path)
            .with_context(|| format!("failed to create output file: {}", path.display()))?;
        Box::new(file) as Box<dyn io::Write>
    } else {
        Box::new(io::stdout().lock()) as Box<dyn io::Write>
    };
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut writer, document).context("failed to serialize output")?;
    writeln!(writer)?;
    writer.flush().context("failed to write output")?;
    Ok(())
}
