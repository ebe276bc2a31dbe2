//! Minimal GenBank flat file parser.
//!
//! Only the parts of a record needed to locate annotated regions are kept:
//! the LOCUS name, the DEFINITION text and the feature table (keys, locations
//! and qualifiers). The sequence block is skipped.
//!
//! Locations are simplified to the closed interval they span:
//!
//! | Location | Interval |
//! |----------|----------|
//! | `100..200` | `[100, 200]` |
//! | `complement(100..200)` | `[100, 200]` |
//! | `<1..>500` | `[1, 500]` |
//! | `join(1..50,80..120)` | `[1, 120]` |
//! | `42` | `[42, 42]` |

use std::path::Path;

use tracing::trace;

use crate::core::interval::Interval;
use crate::parsing::{ParseError, RecordReader};

/// Column at which feature keys start in the feature table
const FEATURE_KEY_INDENT: usize = 5;

/// One entry of a record's feature table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub key: String,
    pub location: Interval,
    pub qualifiers: Vec<(String, String)>,
}

impl Feature {
    /// First value of a qualifier, e.g. `product` for `/product="NRPS"`
    pub fn qualifier(&self, key: &str) -> Option<&str> {
        self.qualifiers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A parsed GenBank record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenBankRecord {
    /// Name from the LOCUS line
    pub name: String,

    /// DEFINITION text with continuation lines joined and the trailing period removed.
    /// Falls back to the LOCUS name when the record has no DEFINITION.
    pub description: String,

    pub features: Vec<Feature>,
}

impl GenBankRecord {
    /// All features whose key is one of `keys`, in file order
    pub fn features_of<'a>(&'a self, keys: &'a [String]) -> impl Iterator<Item = &'a Feature> {
        self.features
            .iter()
            .filter(move |f| keys.iter().any(|k| k == &f.key))
    }
}

/// Reads GenBank flat files
#[derive(Debug, Default, Clone, Copy)]
pub struct GenBankReader;

impl RecordReader for GenBankReader {
    type Record = GenBankRecord;

    fn read_path(&self, path: &Path) -> Result<Vec<GenBankRecord>, ParseError> {
        let content = std::fs::read_to_string(path)?;
        parse_genbank_text(&content).map_err(|e| match e {
            ParseError::InvalidFormat(msg) => {
                ParseError::InvalidFormat(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    Definition,
    Features,
    Sequence,
}

/// Feature whose location and qualifiers may still continue on later lines
struct PendingFeature {
    key: String,
    location: String,
    qualifiers: Vec<(String, String)>,
    line_num: usize,
}

impl PendingFeature {
    fn finish(self) -> Result<Feature, ParseError> {
        let location = parse_location(&self.location).map_err(|e| {
            ParseError::InvalidFormat(format!(
                "line {}: invalid location '{}' for {} feature: {e}",
                self.line_num, self.location, self.key
            ))
        })?;
        Ok(Feature {
            key: self.key,
            location,
            qualifiers: self.qualifiers,
        })
    }
}

#[derive(Default)]
struct RecordBuilder {
    name: String,
    definition: Option<String>,
    features: Vec<Feature>,
    pending: Option<PendingFeature>,
}

impl RecordBuilder {
    fn flush_feature(&mut self) -> Result<(), ParseError> {
        if let Some(pending) = self.pending.take() {
            self.features.push(pending.finish()?);
        }
        Ok(())
    }

    fn build(mut self) -> Result<GenBankRecord, ParseError> {
        self.flush_feature()?;
        let description = match self.definition {
            Some(def) => def.strip_suffix('.').unwrap_or(&def).to_string(),
            None => self.name.clone(),
        };
        Ok(GenBankRecord {
            name: self.name,
            description,
            features: self.features,
        })
    }
}

/// Parse GenBank text holding one or more records.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` naming the offending line if a feature
/// location cannot be parsed or content appears outside of a record.
pub fn parse_genbank_text(text: &str) -> Result<Vec<GenBankRecord>, ParseError> {
    let mut records = Vec::new();
    let mut current: Option<RecordBuilder> = None;
    let mut section = Section::Header;

    for (i, line) in text.lines().enumerate() {
        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        if line.starts_with("LOCUS") {
            if let Some(builder) = current.take() {
                records.push(builder.build()?);
            }
            let name = line.split_whitespace().nth(1).unwrap_or_default();
            current = Some(RecordBuilder {
                name: name.to_string(),
                ..RecordBuilder::default()
            });
            section = Section::Header;
            continue;
        }

        if line.starts_with("//") {
            if let Some(builder) = current.take() {
                records.push(builder.build()?);
            }
            section = Section::Header;
            continue;
        }

        if line.trim().is_empty() {
            continue;
        }

        let Some(builder) = current.as_mut() else {
            return Err(ParseError::InvalidFormat(format!(
                "line {line_num}: content before LOCUS line"
            )));
        };

        let is_continuation = line.starts_with(' ');

        if !is_continuation {
            // A new top-level keyword closes whatever section was open
            if section == Section::Features {
                builder.flush_feature()?;
            }
            section = if let Some(rest) = line.strip_prefix("DEFINITION") {
                builder.definition = Some(rest.trim().to_string());
                Section::Definition
            } else if line.starts_with("FEATURES") {
                Section::Features
            } else if line.starts_with("ORIGIN") || line.starts_with("CONTIG") {
                Section::Sequence
            } else {
                Section::Header
            };
            continue;
        }

        match section {
            Section::Definition => {
                if let Some(def) = builder.definition.as_mut() {
                    def.push(' ');
                    def.push_str(line.trim());
                }
            }
            Section::Features => parse_feature_line(builder, line, line_num)?,
            Section::Header | Section::Sequence => {}
        }
    }

    if let Some(builder) = current.take() {
        records.push(builder.build()?);
    }

    Ok(records)
}

fn parse_feature_line(
    builder: &mut RecordBuilder,
    line: &str,
    line_num: usize,
) -> Result<(), ParseError> {
    let bytes = line.as_bytes();
    let starts_feature = bytes.get(FEATURE_KEY_INDENT).is_some_and(|&b| b != b' ')
        && bytes[..FEATURE_KEY_INDENT].iter().all(|&b| b == b' ');

    if starts_feature {
        builder.flush_feature()?;
        let mut parts = line.split_whitespace();
        let key = parts.next().unwrap_or_default().to_string();
        let location: String = parts.collect();
        trace!("Feature {key} at {location}");
        builder.pending = Some(PendingFeature {
            key,
            location,
            qualifiers: Vec::new(),
            line_num,
        });
        return Ok(());
    }

    let Some(pending) = builder.pending.as_mut() else {
        return Err(ParseError::InvalidFormat(format!(
            "line {line_num}: qualifier outside of a feature"
        )));
    };

    let text = line.trim();
    if let Some(qualifier) = text.strip_prefix('/') {
        let (key, value) = qualifier.split_once('=').unwrap_or((qualifier, ""));
        pending
            .qualifiers
            .push((key.to_string(), value.trim_matches('"').to_string()));
    } else if let Some((_, value)) = pending.qualifiers.last_mut() {
        value.push(' ');
        value.push_str(text.trim_end_matches('"'));
    } else {
        // Long locations wrap onto following lines before the first qualifier
        pending.location.push_str(text);
    }

    Ok(())
}

/// Reduce a GenBank location string to the interval it spans.
///
/// # Errors
///
/// Returns a message if the location uses an unsupported operator or holds a
/// non-numeric position.
pub fn parse_location(location: &str) -> Result<Interval, String> {
    let location = location.trim();

    if let Some(inner) = strip_operator(location, "complement") {
        return parse_location(inner);
    }

    if let Some(inner) =
        strip_operator(location, "join").or_else(|| strip_operator(location, "order"))
    {
        let mut span: Option<Interval> = None;
        for part in inner.split(',') {
            let iv = parse_location(part)?;
            span = Some(match span {
                Some(s) => Interval {
                    start: s.start.min(iv.start),
                    end: s.end.max(iv.end),
                },
                None => iv,
            });
        }
        return span.ok_or_else(|| "empty join".to_string());
    }

    let position = |s: &str| -> Result<u64, String> {
        s.trim_start_matches('<')
            .trim_start_matches('>')
            .parse()
            .map_err(|_| format!("invalid position '{s}'"))
    };

    match location.split_once("..") {
        Some((start, end)) => {
            let (start, end) = (position(start)?, position(end)?);
            Interval::new(start, end).ok_or_else(|| format!("start {start} greater than end {end}"))
        }
        None => {
            let pos = position(location)?;
            Ok(Interval { start: pos, end: pos })
        }
    }
}

fn strip_operator<'a>(location: &'a str, operator: &str) -> Option<&'a str> {
    location
        .strip_prefix(operator)?
        .strip_prefix('(')?
        .strip_suffix(')')
}
