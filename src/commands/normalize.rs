use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::info;

use crate::cli::NormalizeArgs;
use crate::config::Lookups;

#[derive(Debug, Clone, Serialize, PartialEq)]
struct Canonicalized {
    kind: &'static str,
    input: String,
    canonical: Option<String>,
}

pub fn run(args: NormalizeArgs) -> Result<()> {
    if args.sectors.is_empty() && args.amcs.is_empty() {
        bail!("pass at least one --sector or --amc value");
    }

    let lookups = Lookups::load(args.lookups_path.as_deref(), None)?;
    let results = canonicalize_all(&lookups, &args.sectors, &args.amcs);
    info!(values = results.len(), "normalized values");

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    if args.json {
        serde_json::to_writer_pretty(&mut writer, &results)
            .context("failed to serialize normalized values")?;
        writeln!(writer).context("failed to write normalized values")?;
    } else {
        for result in &results {
            writeln!(
                writer,
                "{}\t{}\t{}",
                result.kind,
                result.input,
                result.canonical.as_deref().unwrap_or("-")
            )
            .context("failed to write normalized values")?;
        }
    }

    writer.flush().context("failed to flush normalized values")?;
    Ok(())
}

fn canonicalize_all(lookups: &Lookups, sectors: &[String], amcs: &[String]) -> Vec<Canonicalized> {
    let sectors = sectors.iter().map(|input| Canonicalized {
        kind: "sector",
        input: input.clone(),
        canonical: lookups.normalizer.sector(input),
    });
    let amcs = amcs.iter().map(|input| Canonicalized {
        kind: "amc",
        input: input.clone(),
        canonical: lookups.normalizer.amc(input),
    });

    sectors.chain(amcs).collect()
}
