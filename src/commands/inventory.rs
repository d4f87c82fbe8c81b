use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::cli::InventoryArgs;
use crate::decode::is_supported_input;
use crate::metadata::MetadataResolver;
use crate::model::{InventoryManifest, SourceEntry};
use crate::util::{now_utc_string, sha256_file, write_json_pretty};

pub fn run(args: InventoryArgs) -> Result<()> {
    let manifest = build_manifest(&args.input_dir)?;

    if args.dry_run {
        info!(
            document_count = manifest.document_count,
            source = %manifest.source_directory,
            "inventory dry-run complete"
        );
        return Ok(());
    }

    let manifest_path = args
        .manifest_path
        .unwrap_or_else(|| args.input_dir.join("manifests").join("inventory.json"));

    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote inventory manifest");
    info!(document_count = manifest.document_count, "inventory completed");

    Ok(())
}

pub fn build_manifest(input_dir: &Path) -> Result<InventoryManifest> {
    let resolver = MetadataResolver::new()?;

    let paths = discover_inputs(input_dir)?;
    if paths.is_empty() {
        bail!("no .pdf or .json factsheets found in {}", input_dir.display());
    }

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        documents.push(source_entry(&resolver, &path)?);
    }

    Ok(InventoryManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        source_directory: input_dir.display().to_string(),
        document_count: documents.len(),
        documents,
    })
}

pub fn source_entry(resolver: &MetadataResolver, path: &Path) -> Result<SourceEntry> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(ToOwned::to_owned)
        .with_context(|| format!("invalid UTF-8 filename: {}", path.display()))?;

    let parsed = resolver.parse_filename(path);
    let sha256 = sha256_file(path)?;

    Ok(SourceEntry {
        filename,
        amc: parsed.amc,
        fund_name: parsed.fund_name,
        month: parsed.date,
        sha256,
    })
}

/// Supported factsheet files directly inside `input_dir`, sorted by path.
pub fn discover_inputs(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();

    let entries = fs::read_dir(input_dir)
        .with_context(|| format!("failed to read {}", input_dir.display()))?;

    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", input_dir.display()))?;
        let path = entry.path();

        if !entry
            .file_type()
            .with_context(|| format!("failed to inspect file type: {}", path.display()))?
            .is_file()
        {
            continue;
        }

        if is_supported_input(&path) {
            inputs.push(path);
        }
    }

    inputs.sort();
    Ok(inputs)
}
