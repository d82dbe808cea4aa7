//! Genotype-phenotype tables: measured fitness per amino-acid sequence.

use crate::error::{LandscapeError, LandscapeResult};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::Path;

/// Fitness values keyed by amino-acid sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct PhenotypeTable {
    values: HashMap<String, f64>,
    sequence_len: usize,
    min_fitness: f64,
}

impl PhenotypeTable {
    /// Parse a table: a header line, then `sequence value` records.
    ///
    /// # Errors
    ///
    /// Returns an error on a malformed record, a non-finite value, a
    /// duplicated sequence, a sequence whose length differs from the first
    /// record, or an empty table.
    pub fn parse(text: &str, source_name: &str) -> LandscapeResult<Self> {
        let parse_error = |line: usize, reason: String| LandscapeError::Parse {
            source_name: source_name.to_string(),
            line,
            reason,
        };

        let mut builder = TableBuilder::default();
        for (line_idx, line) in text.lines().enumerate().skip(1) {
            let line_no = line_idx + 1;
            let fields: Vec<&str> = line.split_whitespace().collect();
            match fields.as_slice() {
                [] => {}
                [sequence, value] => {
                    let value: f64 = value
                        .parse()
                        .map_err(|e| parse_error(line_no, format!("bad value {value:?}: {e}")))?;
                    if !value.is_finite() {
                        return Err(parse_error(line_no, format!("non-finite value {value}")));
                    }
                    builder
                        .insert(line_no, sequence, value)
                        .map_err(|e| match e {
                            InsertError::Duplicate => {
                                parse_error(line_no, format!("duplicate sequence {sequence}"))
                            }
                            InsertError::Length(err) => err,
                        })?;
                }
                _ => {
                    return Err(parse_error(
                        line_no,
                        format!("expected 2 fields, found {}", fields.len()),
                    ));
                }
            }
        }
        builder.finish()
    }

    /// Read and parse a phenotype table file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is malformed.
    pub fn from_file(path: &Path) -> LandscapeResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| LandscapeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, &path.display().to_string())
    }

    /// Build a table from in-memory records.
    ///
    /// Later records for the same sequence replace earlier ones.
    ///
    /// # Errors
    ///
    /// Returns an error on inconsistent lengths or an empty record set.
    pub fn from_records<I, S>(records: I) -> LandscapeResult<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut builder = TableBuilder::default();
        for (i, (sequence, value)) in records.into_iter().enumerate() {
            match builder.insert(i + 1, sequence.as_ref(), value) {
                Ok(()) => {}
                Err(InsertError::Duplicate) => {
                    builder.values.insert(sequence.as_ref().to_ascii_uppercase(), value);
                }
                Err(InsertError::Length(e)) => return Err(e),
            }
        }
        builder.finish()
    }

    /// Fitness of an amino-acid sequence.
    #[must_use]
    pub fn get(&self, sequence: &str) -> Option<f64> {
        self.values.get(sequence).copied()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table is empty. Parsed tables never are.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Length of every sequence in the table.
    #[must_use]
    pub const fn sequence_len(&self) -> usize {
        self.sequence_len
    }

    /// Smallest fitness in the table.
    #[must_use]
    pub const fn min_fitness(&self) -> f64 {
        self.min_fitness
    }

    /// All records, in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

enum InsertError {
    Duplicate,
    Length(LandscapeError),
}

#[derive(Default)]
struct TableBuilder {
    values: HashMap<String, f64>,
    sequence_len: Option<usize>,
}

impl TableBuilder {
    fn insert(&mut self, line: usize, sequence: &str, value: f64) -> Result<(), InsertError> {
        let len = sequence.chars().count();
        match self.sequence_len {
            None => self.sequence_len = Some(len),
            Some(expected) if expected != len => {
                return Err(InsertError::Length(LandscapeError::InconsistentLength {
                    expected,
                    found: len,
                    line,
                }));
            }
            Some(_) => {}
        }
        match self.values.entry(sequence.to_ascii_uppercase()) {
            Entry::Occupied(_) => Err(InsertError::Duplicate),
            Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(())
            }
        }
    }

    fn finish(self) -> LandscapeResult<PhenotypeTable> {
        let sequence_len = self.sequence_len.ok_or(LandscapeError::EmptyTable)?;
        let min_fitness = self.values.values().copied().fold(f64::INFINITY, f64::min);
        Ok(PhenotypeTable {
            values: self.values,
            sequence_len,
            min_fitness,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_table() {
        let table = PhenotypeTable::parse("Variants\tFitness\nMWA\t1.5\nMWC\t-0.25\n\n", "t").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.sequence_len(), 3);
        assert_eq!(table.get("MWA"), Some(1.5));
        assert_eq!(table.get("AAA"), None);
        assert!((table.min_fitness() + 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_rejects_malformed_records() {
        let err = PhenotypeTable::parse("h\nMWA\n", "t").unwrap_err();
        assert!(matches!(err, LandscapeError::Parse { line: 2, .. }));

        let err = PhenotypeTable::parse("h\nMWA\tabc\n", "t").unwrap_err();
        assert!(matches!(err, LandscapeError::Parse { line: 2, .. }));

        let err = PhenotypeTable::parse("h\nMWA\tNaN\n", "t").unwrap_err();
        assert!(matches!(err, LandscapeError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_parse_rejects_duplicates_and_length_changes() {
        let err = PhenotypeTable::parse("h\nMWA\t1\nMWA\t2\n", "t").unwrap_err();
        assert!(matches!(err, LandscapeError::Parse { line: 3, .. }));

        let err = PhenotypeTable::parse("h\nMWA\t1\nMW\t2\n", "t").unwrap_err();
        assert!(matches!(
            err,
            LandscapeError::InconsistentLength {
                expected: 3,
                found: 2,
                line: 3
            }
        ));
    }

    #[test]
    fn test_empty_table_is_an_error() {
        let err = PhenotypeTable::parse("header only\n", "t").unwrap_err();
        assert!(matches!(err, LandscapeError::EmptyTable));
    }

    #[test]
    fn test_from_records_last_wins() {
        let table = PhenotypeTable::from_records([("AA", 1.0), ("AA", 3.0), ("CC", 2.0)]).unwrap();
        assert_eq!(table.get("AA"), Some(3.0));
        assert_eq!(table.len(), 2);
    }
}
