//! Scan a directory tree for TMX files and flatten them into a bilingual
//! document list plus a per-file manifest, for corpus-preparation pipelines.

pub mod builder;
pub mod error;
pub mod parser;
pub mod report;

pub use builder::{build, build_with_reporter, Corpus, Document, FileId, FileRecord};
pub use error::CorpusError;
pub use parser::{classify_unit, parse_tmx, parse_tmx_str, Segment, SegmentPair, UnitShape};
pub use report::{CollectingReporter, Diagnostic, LogReporter, Reporter};
