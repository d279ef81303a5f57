use crate::error::CorpusError;
use crate::parser;
use crate::report::{Diagnostic, LogReporter, Reporter};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub type FileId = u32;

/// One flattened bilingual pair, tagged with the id of the file it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub source_lang: String,
    pub source_text: String,
    pub target_lang: String,
    pub target_text: String,
    pub file_id: FileId,
}

/// Manifest entry for one successfully parsed file. Files that fail to
/// parse get no record and consume no id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: FileId,
    pub path: String,
    pub docs_num: usize,
}

/// The result of one build: the flat document list and the file manifest.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Corpus {
    pub documents: Vec<Document>,
    pub files: Vec<FileRecord>,
}

/// Build a corpus from every TMX file under `root`, logging diagnostics
/// through `tracing`.
pub fn build<P: AsRef<Path>>(root: P) -> Result<Corpus, CorpusError> {
    build_with_reporter(root, &LogReporter)
}

/// Build a corpus from every TMX file under `root`, sending diagnostics to
/// the given reporter.
///
/// Candidate files are regular files whose name does not start with a dot,
/// collected recursively and sorted by path so that file id assignment is
/// deterministic across platforms. A file that fails to parse is skipped
/// whole: no record, no id consumed, and the walk continues.
pub fn build_with_reporter<P: AsRef<Path>>(
    root: P,
    reporter: &dyn Reporter,
) -> Result<Corpus, CorpusError> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(CorpusError::DirectoryNotFound(root.to_path_buf()));
    }

    let mut candidates: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| !e.file_name().to_string_lossy().starts_with('.'))
        .map(|e| e.into_path())
        .collect();
    candidates.sort();

    let mut documents = Vec::new();
    let mut files = Vec::new();
    let mut file_id: FileId = 0;

    for path in candidates {
        let pairs = match parser::parse_tmx(&path, reporter) {
            Ok(pairs) => pairs,
            Err(err) => {
                reporter.report(Diagnostic::MalformedFile {
                    path: path.clone(),
                    error: err.to_string(),
                });
                continue;
            }
        };

        let docs_num = pairs.len();
        for pair in pairs {
            documents.push(Document {
                source_lang: pair.source.language,
                source_text: pair.source.text,
                target_lang: pair.target.language,
                target_text: pair.target.text,
                file_id,
            });
        }
        files.push(FileRecord {
            id: file_id,
            path: path.display().to_string(),
            docs_num,
        });
        file_id += 1;
    }

    tracing::info!(
        files = files.len(),
        documents = documents.len(),
        "corpus build complete"
    );
    Ok(Corpus { documents, files })
}
