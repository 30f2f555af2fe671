//! Batch conversion of OpenType/TrueType fonts in a directory to WOFF2.

pub mod batch;
pub mod config;
pub mod convert;
pub mod filter;

pub use batch::{BatchResult, run, scan};
pub use config::{BatchConfig, DEFAULT_FONTS_DIR, SOURCE_EXTENSIONS};
pub use convert::{ConvertOptions, Outcome, convert, convert_among, output_path};
pub use filter::SourceFilter;
pub use woff2_batch_codec::{Flavor, Font};
