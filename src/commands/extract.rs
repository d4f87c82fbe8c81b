use std::path::Path;

use anyhow::{Result, bail};
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::cli::{DecoderKind, ExtractArgs};
use crate::commands::inventory::{discover_inputs, source_entry};
use crate::config::Lookups;
use crate::decode::decoder_for;
use crate::extract::{ExtractOptions, extract_document, run_batch_with_threads};
use crate::metadata::{MetadataOverrides, MetadataResolver};
use crate::model::{DocumentResult, ExtractCounts, ExtractPaths, ExtractRunManifest};
use crate::util::{now_utc_string, utc_compact_string, write_json_pretty};

struct DocumentContext<'a> {
    decoder: DecoderKind,
    max_pages: Option<usize>,
    resolver: &'a MetadataResolver,
    overrides: &'a MetadataOverrides,
    lookups: &'a Lookups,
    options: &'a ExtractOptions,
}

pub fn run(args: ExtractArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));

    if args.threads == 0 {
        bail!("--threads must be at least 1");
    }

    let inputs = if args.inputs.is_empty() {
        discover_inputs(&args.input_dir)?
    } else {
        args.inputs.clone()
    };
    if inputs.is_empty() {
        bail!("no factsheets to extract in {}", args.input_dir.display());
    }

    let output_path = args.output.clone().unwrap_or_else(|| {
        args.input_dir
            .join("manifests")
            .join(format!("extract_run_{}.json", utc_compact_string(started_ts)))
    });

    info!(run_id = %run_id, documents = inputs.len(), decoder = args.decoder.as_str(), "starting extract");

    let lookups = Lookups::load(args.lookups_path.as_deref(), args.isin_csv.as_deref())?;
    let resolver = MetadataResolver::new()?;
    let overrides = MetadataOverrides {
        amc: args.amc.clone(),
        fund_name: args.fund_name.clone(),
        date: args.date,
    };
    let options = ExtractOptions {
        stitch_headerless: args.stitch_headerless,
        lookup_missing_isin: !args.no_isin_lookup,
        derive_market_value: args.derive_market_value,
    };
    let context = DocumentContext {
        decoder: args.decoder,
        max_pages: args.max_pages_per_doc,
        resolver: &resolver,
        overrides: &overrides,
        lookups: &lookups,
        options: &options,
    };

    let batch = run_batch_with_threads(&inputs, args.threads, |path| {
        process_document(path, &context)
    })?;

    let mut warnings = Vec::new();
    let mut source_hashes = Vec::with_capacity(inputs.len());
    for path in &inputs {
        match source_entry(&resolver, path) {
            Ok(entry) => source_hashes.push(entry),
            Err(err) => warnings.push(format!("{err:#}")),
        }
    }
    for document in batch.documents.iter().filter(|document| !document.success) {
        warnings.push(format!(
            "{}: {}",
            document.source,
            document.diagnostic.as_deref().unwrap_or("no records")
        ));
    }

    let counts = ExtractCounts::from_batch(&batch);
    let status = if counts.failed_count == 0 {
        "completed"
    } else if counts.succeeded_count == 0 {
        "failed"
    } else {
        "completed_with_failures"
    };

    let manifest = ExtractRunManifest {
        manifest_version: 1,
        run_id: run_id.clone(),
        status: status.to_string(),
        started_at,
        completed_at: now_utc_string(),
        command: "extract".to_string(),
        decoder: args.decoder.as_str().to_string(),
        options,
        paths: ExtractPaths {
            output_path: output_path.display().to_string(),
            lookups_path: args
                .lookups_path
                .as_ref()
                .map(|path| path.display().to_string()),
            isin_csv: args.isin_csv.as_ref().map(|path| path.display().to_string()),
        },
        counts,
        source_hashes,
        warnings,
        documents: batch.documents,
        records: batch.records,
    };

    write_json_pretty(&output_path, &manifest)?;
    info!(
        run_id = %run_id,
        path = %output_path.display(),
        status,
        documents = manifest.counts.document_count,
        failed = manifest.counts.failed_count,
        records = manifest.counts.record_count,
        dropped_rows = manifest.counts.dropped_row_count,
        "extract completed"
    );

    Ok(())
}

fn process_document(path: &Path, context: &DocumentContext<'_>) -> DocumentResult {
    let source = path.display().to_string();
    match try_process_document(&source, path, context) {
        Ok(result) => {
            info!(
                source = %source,
                records = result.records.len(),
                dropped_rows = result.dropped_rows,
                pages = result.stats.pages,
                fallback_pages = result.stats.fallback_pages,
                sectors = result.sector_allocation.len(),
                "document extracted"
            );
            result
        }
        Err(err) => {
            warn!(source = %source, error = %format!("{err:#}"), "document failed");
            DocumentResult::failed(source, format!("{err:#}"))
        }
    }
}

fn try_process_document(
    source: &str,
    path: &Path,
    context: &DocumentContext<'_>,
) -> Result<DocumentResult> {
    let decoder = decoder_for(context.decoder, path)?;
    let document = decoder.decode(path, context.max_pages)?;
    debug!(source, decoder = decoder.name(), pages = document.pages.len(), "document decoded");
    let text = document.full_text();
    let metadata = context.resolver.resolve(path, &text, context.overrides)?;
    let aum_crore = context.resolver.aum_from_text(&text);

    Ok(extract_document(
        source,
        &document,
        &metadata,
        aum_crore,
        context.lookups,
        context.options,
    ))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn args(input_dir: &Path, output: &Path) -> ExtractArgs {
        ExtractArgs {
            input_dir: input_dir.to_path_buf(),
            inputs: Vec::new(),
            output: Some(output.to_path_buf()),
            decoder: DecoderKind::Auto,
            amc: None,
            fund_name: None,
            date: None,
            lookups_path: None,
            isin_csv: None,
            threads: 2,
            max_pages_per_doc: None,
            stitch_headerless: false,
            derive_market_value: false,
            no_isin_lookup: false,
        }
    }

    #[test]
    fn run_writes_manifest_with_per_document_outcomes() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(
            dir.path().join("Acme_Flexi_Cap_202412.json"),
            r#"{"pages":[{"text":"Portfolio\nBanks 21.4%","tables":[{"rows":[["Name","% to NAV","ISIN"],["Acme Ltd","3.25%","INE000A01011"]]}]}]}"#,
        )
        .expect("write factsheet");
        fs::write(
            dir.path().join("commentary.json"),
            r#"{"pages":[{"text":"Market outlook"}]}"#,
        )
        .expect("write commentary");
        let output = dir.path().join("out").join("run.json");

        run(args(dir.path(), &output)).expect("extract run");

        let raw = fs::read_to_string(&output).expect("manifest written");
        let manifest: serde_json::Value = serde_json::from_str(&raw).expect("valid json");

        assert_eq!(manifest["status"], "completed_with_failures");
        assert_eq!(manifest["counts"]["document_count"], 2);
        assert_eq!(manifest["counts"]["record_count"], 1);
        assert_eq!(manifest["records"][0]["date"], "2024-12-01");
        assert_eq!(manifest["records"][0]["amc"], "Acme");
        assert_eq!(manifest["records"][0]["fund_name"], "Flexi Cap");
        assert_eq!(manifest["records"][0]["market_value"], serde_json::Value::Null);
        assert_eq!(manifest["documents"][0]["sector_allocation"]["Banking"], 21.4);
    assert_eq!(manifest["documents"][1]["success"], false);
        assert!(
            manifest["documents"][1]["diagnostic"]
                .as_str()
                .expect("diagnostic")
                .contains("could not resolve a document date")
        );
        assert_eq!(manifest["source_hashes"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn run_rejects_zero_threads() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut args = args(dir.path(), &dir.path().join("run.json"));
        args.threads = 0;
        assert!(run(args).is_err());
    }
}
