use crate::error::CorpusError;
use crate::report::{Diagnostic, Reporter};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One language-tagged text span extracted from a `<tuv>`.
///
/// The language comes from the `xml:lang` attribute (empty when absent);
/// the text is the `<seg>` content exactly as written, entities unescaped
/// but otherwise untrimmed and unnormalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub language: String,
    pub text: String,
}

/// An aligned bilingual unit: the first and second usable segments of a
/// `<tu>`, in document order. Orientation is positional, never derived
/// from the language codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentPair {
    pub source: Segment,
    pub target: Segment,
}

/// Classification of the segments extracted from one `<tu>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitShape {
    Valid(SegmentPair),
    TooFew(usize),
    TooMany(usize),
}

/// Classify a unit's extracted segments by count: exactly two make a pair,
/// fewer are dropped silently, more are dropped with a diagnostic upstream.
pub fn classify_unit(segments: Vec<Segment>) -> UnitShape {
    let count = segments.len();
    let mut it = segments.into_iter();
    match (it.next(), it.next(), it.next()) {
        (Some(source), Some(target), None) => UnitShape::Valid(SegmentPair { source, target }),
        (_, _, Some(_)) => UnitShape::TooMany(count),
        _ => UnitShape::TooFew(count),
    }
}

#[derive(Default)]
struct TuState {
    raw_tuvs: usize,
    segments: Vec<Segment>,
}

/// Parse one TMX file into its valid bilingual segment pairs.
pub fn parse_tmx(path: &Path, reporter: &dyn Reporter) -> Result<Vec<SegmentPair>, CorpusError> {
    let xml = fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_tmx_str(&xml, path, reporter)
}

/// Parse TMX content into its valid bilingual segment pairs.
///
/// Scans for `<tu>` elements at any depth; within each, every `<tuv>`
/// contributes a segment when its first `<seg>` child has non-empty text.
/// Units whose raw tuv count is not two are reported but still extracted;
/// the classification filter then decides what reaches the output.
/// A document that is not well-formed XML fails as a whole.
pub fn parse_tmx_str(
    xml: &str,
    origin: &Path,
    reporter: &dyn Reporter,
) -> Result<Vec<SegmentPair>, CorpusError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut pairs = Vec::new();
    let mut unit: Option<TuState> = None;
    let mut in_tuv = false;
    let mut tuv_lang: Option<String> = None;
    let mut tuv_seg_seen = false;
    let mut seg_text: Option<String> = None;
    let mut depth = 0usize;
    let mut saw_element = false;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| malformed(origin, e.to_string()))?;

        match event {
            Event::Start(ref e) => {
                depth += 1;
                saw_element = true;
                match e.local_name().as_ref() {
                    b"tu" => unit = Some(TuState::default()),
                    b"tuv" => {
                        if let Some(u) = unit.as_mut() {
                            u.raw_tuvs += 1;
                            in_tuv = true;
                            tuv_seg_seen = false;
                            tuv_lang = get_attribute(e, b"xml:lang");
                        }
                    }
                    b"seg" => {
                        // Only the first <seg> of a <tuv> decides its contribution.
                        if in_tuv && !tuv_seg_seen {
                            tuv_seg_seen = true;
                            seg_text = Some(String::new());
                        }
                    }
                    _ => {}
                }
            }
            Event::Empty(ref e) => {
                saw_element = true;
                match e.local_name().as_ref() {
                    b"tu" => {
                        reporter.report(Diagnostic::UnexpectedTuvCount {
                            path: origin.to_path_buf(),
                            count: 0,
                        });
                    }
                    b"tuv" => {
                        if let Some(u) = unit.as_mut() {
                            u.raw_tuvs += 1;
                        }
                    }
                    b"seg" => {
                        if in_tuv {
                            tuv_seg_seen = true;
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(t) => {
                if let Some(text) = seg_text.as_mut() {
                    let chunk = t.unescape().map_err(|e| malformed(origin, e.to_string()))?;
                    text.push_str(&chunk);
                }
            }
            Event::CData(t) => {
                if let Some(text) = seg_text.as_mut() {
                    // The enclosing document is already valid UTF-8.
                    text.push_str(&String::from_utf8_lossy(&t));
                }
            }
            Event::End(ref e) => {
                depth = depth.saturating_sub(1);
                match e.local_name().as_ref() {
                    b"seg" => {
                        if let (Some(u), Some(text)) = (unit.as_mut(), seg_text.take()) {
                            if !text.is_empty() {
                                u.segments.push(Segment {
                                    language: tuv_lang.clone().unwrap_or_default(),
                                    text,
                                });
                            }
                        }
                    }
                    b"tuv" => {
                        in_tuv = false;
                        tuv_lang = None;
                    }
                    b"tu" => {
                        if let Some(u) = unit.take() {
                            if u.raw_tuvs != 2 {
                                reporter.report(Diagnostic::UnexpectedTuvCount {
                                    path: origin.to_path_buf(),
                                    count: u.raw_tuvs,
                                });
                            }
                            match classify_unit(u.segments) {
                                UnitShape::Valid(pair) => pairs.push(pair),
                                UnitShape::TooFew(_) => {}
                                UnitShape::TooMany(n) => {
                                    reporter.report(Diagnostic::OversizedUnit {
                                        path: origin.to_path_buf(),
                                        segments: n,
                                    });
                                }
                            }
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => {
                if depth != 0 {
                    return Err(malformed(origin, "unexpected end of document inside an open element"));
                }
                if !saw_element {
                    return Err(malformed(origin, "no root element found"));
                }
                break;
            }
            _ => {}
        }

        buf.clear();
    }

    Ok(pairs)
}

fn malformed(path: &Path, reason: impl Into<String>) -> CorpusError {
    CorpusError::MalformedDocument {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

fn get_attribute(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.as_ref() == name)
        .and_then(|a| a.unescape_value().ok())
        .map(|v| v.into_owned())
}
