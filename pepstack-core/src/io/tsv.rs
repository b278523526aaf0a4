//! TSV table parser for protein and peptide lists.
//!
//! The first line is a header naming the columns. Protein tables need
//! `id` and `sequence` columns (UniProt's `Entry`/`Sequence` are
//! accepted); peptide tables need `protein_id` and `peptide` (or
//! `proteinID`, `sequence`). Every other column is carried into the
//! peptide payload as a string value.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use serde_json::Value;
use thiserror::Error;

use crate::types::{Payload, Peptide, Protein};

#[derive(Debug, Error)]
pub enum TsvError {
    #[error("Missing header line")]
    MissingHeader,
    #[error("Missing required column: expected one of {0:?}")]
    MissingColumn(&'static [&'static str]),
    #[error("Line {line}: expected {expected} fields, got {got}")]
    FieldCount {
        line: usize,
        expected: usize,
        got: usize,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const PROTEIN_ID_NAMES: &[&str] = &["id", "entry"];
const PROTEIN_SEQ_NAMES: &[&str] = &["sequence"];
const PEPTIDE_PROTEIN_NAMES: &[&str] = &["protein_id", "proteinid"];
const PEPTIDE_SEQ_NAMES: &[&str] = &["peptide", "sequence"];

/// TSV parser for protein and peptide tables.
pub struct TsvParser;

impl TsvParser {
    pub fn parse_proteins_file<P: AsRef<Path>>(path: P) -> Result<Vec<Protein>, TsvError> {
        Self::parse_proteins(reader_for(path)?)
    }

    pub fn parse_peptides_file<P: AsRef<Path>>(path: P) -> Result<Vec<Peptide>, TsvError> {
        Self::parse_peptides(reader_for(path)?)
    }

    pub fn parse_proteins<R: BufRead>(reader: R) -> Result<Vec<Protein>, TsvError> {
        let mut lines = reader.lines();
        let header = parse_header(&mut lines)?;
        let id_col = find_column(&header, PROTEIN_ID_NAMES)?;
        let seq_col = find_column(&header, PROTEIN_SEQ_NAMES)?;

        let mut proteins = Vec::new();
        for (number, line) in lines.enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let fields = split_line(&line, header.len(), number + 2)?;
            proteins.push(Protein {
                id: fields[id_col].to_string(),
                sequence: fields[seq_col].to_string(),
            });
        }
        Ok(proteins)
    }

    pub fn parse_peptides<R: BufRead>(reader: R) -> Result<Vec<Peptide>, TsvError> {
        let mut lines = reader.lines();
        let header = parse_header(&mut lines)?;
        let protein_col = find_column(&header, PEPTIDE_PROTEIN_NAMES)?;
        let seq_col = find_column(&header, PEPTIDE_SEQ_NAMES)?;

        let mut peptides = Vec::new();
        for (number, line) in lines.enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let fields = split_line(&line, header.len(), number + 2)?;

            let mut payload = Payload::new();
            for (col, field) in fields.iter().enumerate() {
                if col != protein_col && col != seq_col {
                    payload.insert(header[col].clone(), Value::String(field.to_string()));
                }
            }
            peptides.push(Peptide {
                protein_id: fields[protein_col].to_string(),
                sequence: fields[seq_col].to_string(),
                payload,
            });
        }
        Ok(peptides)
    }
}

fn parse_header<B: Iterator<Item = std::io::Result<String>>>(
    lines: &mut B,
) -> Result<Vec<String>, TsvError> {
    let line = lines.next().ok_or(TsvError::MissingHeader)??;
    if line.trim().is_empty() {
        return Err(TsvError::MissingHeader);
    }
    Ok(line.split('\t').map(|f| f.trim().to_string()).collect())
}

fn find_column(header: &[String], names: &'static [&'static str]) -> Result<usize, TsvError> {
    header
        .iter()
        .position(|h| names.contains(&h.to_lowercase().as_str()))
        .ok_or(TsvError::MissingColumn(names))
}

fn split_line(line: &str, expected: usize, number: usize) -> Result<Vec<&str>, TsvError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != expected {
        return Err(TsvError::FieldCount {
            line: number,
            expected,
            got: fields.len(),
        });
    }
    Ok(fields)
}

fn reader_for<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>, TsvError> {
    let file = File::open(&path)?;
    if path.as_ref().to_string_lossy().ends_with(".gz") {
        let decoder: Box<dyn Read> = Box::new(GzDecoder::new(file));
        Ok(Box::new(BufReader::new(decoder)))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;

    #[test]
    fn test_parse_proteins() {
        let data = "id\tsequence\nP1\tMKVLILACLVA\nP2\tAAAA\n";
        let proteins = TsvParser::parse_proteins(Cursor::new(data)).unwrap();
        assert_eq!(proteins.len(), 2);
        assert_eq!(proteins[0].id, "P1");
        assert_eq!(proteins[1].sequence, "AAAA");
    }

    #[test]
    fn test_parse_proteins_uniprot_header() {
        let data = "Entry\tSequence\nP02666\tMKVL\n";
        let proteins = TsvParser::parse_proteins(Cursor::new(data)).unwrap();
        assert_eq!(proteins[0].id, "P02666");
    }

    #[test]
    fn test_parse_peptides_extra_columns_become_payload() {
        let data = "protein_id\tpeptide\tcategory\tfunction\n\
                    P1\tKVL\tmilk\tAntioxidant\n";
        let peptides = TsvParser::parse_peptides(Cursor::new(data)).unwrap();
        assert_eq!(peptides[0].protein_id, "P1");
        assert_eq!(peptides[0].sequence, "KVL");
        assert_eq!(peptides[0].payload["category"], json!("milk"));
        assert_eq!(peptides[0].payload["function"], json!("Antioxidant"));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let data = "protein_id\tpeptide\nP1\tKVL\n\n";
        let peptides = TsvParser::parse_peptides(Cursor::new(data)).unwrap();
        assert_eq!(peptides.len(), 1);
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let data = "name\tvalue\nP1\tKVL\n";
        let err = TsvParser::parse_peptides(Cursor::new(data)).unwrap_err();
        assert!(matches!(err, TsvError::MissingColumn(_)));
    }

    #[test]
    fn test_ragged_line_reports_line_number() {
        let data = "protein_id\tpeptide\nP1\tKVL\nP2\n";
        let err = TsvParser::parse_peptides(Cursor::new(data)).unwrap_err();
        match err {
            TsvError::FieldCount { line, expected, got } => {
                assert_eq!(line, 3);
                assert_eq!(expected, 2);
                assert_eq!(got, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_gzipped_file_roundtrip() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(b"protein_id\tpeptide\nP1\tKVL\n")
            .unwrap();
        let bytes = encoder.finish().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("peptides.tsv.gz");
        std::fs::write(&path, bytes).unwrap();

        let peptides = TsvParser::parse_peptides_file(&path).unwrap();
        assert_eq!(peptides.len(), 1);
        assert_eq!(peptides[0].sequence, "KVL");
    }
}
