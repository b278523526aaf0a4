//! Exact peptide location on a protein sequence.

/// Find the first occurrence of `peptide` within `sequence`.
///
/// Exact, case-sensitive substring search over residue letters; returns
/// the 0-based offset of the first match, or `None` if the peptide is
/// absent. Multiple occurrences are not disambiguated: only the first
/// is used, which is a documented limitation of the visualization, not
/// a defect to fix here.
///
/// Residue sequences are single-byte letters, so byte offsets and
/// residue offsets coincide.
pub fn find_peptide(sequence: &str, peptide: &str) -> Option<usize> {
    if peptide.is_empty() {
        return None;
    }
    sequence.find(peptide)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_first_occurrence() {
        assert_eq!(find_peptide("MKVLILACLVA", "MKV"), Some(0));
        assert_eq!(find_peptide("MKVLILACLVA", "LIL"), Some(3));
        // "LA" occurs at 6; a later "VA" does not shadow it
        assert_eq!(find_peptide("MKVLILACLVA", "L"), Some(3));
    }

    #[test]
    fn test_absent_peptide() {
        assert_eq!(find_peptide("MKVLILACLVA", "WWW"), None);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(find_peptide("MKVLILACLVA", "mkv"), None);
    }

    #[test]
    fn test_empty_peptide_is_never_located() {
        assert_eq!(find_peptide("MKVLILACLVA", ""), None);
    }

    #[test]
    fn test_peptide_longer_than_sequence() {
        assert_eq!(find_peptide("MK", "MKVLI"), None);
    }
}
