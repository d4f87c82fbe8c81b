//! Holdings extraction core.
//!
//! Per document: pages -> table locator -> column mapper and page merger ->
//! record assembler, with the text-pattern fallback covering every page that
//! has no mappable table. Sector weights are read from the page text on the
//! side.

mod allocation;
mod assemble;
mod batch;
mod columns;
mod fallback;
mod locator;
mod merge;
mod pipeline;
#[cfg(test)]
mod tests;
mod types;

pub use allocation::SectorAllocationReader;
pub use batch::run_batch_with_threads;
pub use fallback::FallbackPatterns;
pub use pipeline::extract_document;
pub use types::ExtractOptions;
