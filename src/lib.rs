// Verbosity-gated logging helper used throughout the crate, mirroring the
// original tool's unconditional `fprintf(stderr, ...)` diagnostics. There is
// no `--verbose` flag here (the tool always prints its banner, per-file
// decisions, and a final count), so this collapses to plain `eprintln!`.
#[macro_export]
macro_rules! vprintln {
	($($arg:tt)*) => {
		eprintln!($($arg)*);
	};
}

// Public library re-exports for integration tests and external use.
pub mod central_directory;
pub mod cli;
pub mod counting_writer;
pub mod entry_store;
pub mod geometry;
pub mod projection;
pub mod rewriter;
pub mod tile;
pub mod zip64;
pub mod zip_records;

// Keep main.rs thin and have it call into the library functions.
