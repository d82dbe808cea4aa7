//! Codon-to-amino-acid tables.

use crate::error::{CodeError, LandscapeError, LandscapeResult};
use crate::genotype::{CODON_LENGTH, GenotypeId, GenotypeSpace, Nucleotide};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Number of codons over a four-letter alphabet.
pub const NUM_CODONS: usize = 64;

/// The twenty amino acids followed by the stop marker, in canonical order.
pub const AMINO_ACIDS: [AminoAcid; 21] = [
    AminoAcid(b'A'),
    AminoAcid(b'C'),
    AminoAcid(b'D'),
    AminoAcid(b'E'),
    AminoAcid(b'F'),
    AminoAcid(b'G'),
    AminoAcid(b'H'),
    AminoAcid(b'I'),
    AminoAcid(b'K'),
    AminoAcid(b'L'),
    AminoAcid(b'M'),
    AminoAcid(b'N'),
    AminoAcid(b'P'),
    AminoAcid(b'Q'),
    AminoAcid(b'R'),
    AminoAcid(b'S'),
    AminoAcid(b'T'),
    AminoAcid(b'V'),
    AminoAcid(b'W'),
    AminoAcid(b'Y'),
    AminoAcid::STOP,
];

/// Standard code in NCBI order (first base slowest, bases ordered T, C, A, G).
const STANDARD_NCBI: &[u8; NUM_CODONS] =
    b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";

/// An amino acid one-letter symbol, or the stop marker `*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AminoAcid(u8);

impl AminoAcid {
    /// The stop marker.
    pub const STOP: Self = Self(b'*');

    /// Parse a one-letter symbol: an amino acid, `*`, or any other printable
    /// ASCII character.
    ///
    /// Symbols outside [`AMINO_ACIDS`] mark custom codon blocks, such as the
    /// `X`, `Z`, `B` and `J` of split blocks in Ostrov-style codes.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        u8::try_from(symbol.to_ascii_uppercase())
            .ok()
            .filter(u8::is_ascii_graphic)
            .map(Self)
    }

    /// The one-letter symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        self.0 as char
    }

    /// Whether this is the stop marker.
    #[must_use]
    pub const fn is_stop(self) -> bool {
        self.0 == b'*'
    }

    /// Position in [`AMINO_ACIDS`], or `None` for a custom symbol.
    #[must_use]
    pub fn index(self) -> Option<usize> {
        AMINO_ACIDS.iter().position(|&aa| aa == self)
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Codon index of three nucleotides, first nucleotide in the low bits.
#[must_use]
pub const fn codon_index(codon: [Nucleotide; CODON_LENGTH]) -> usize {
    (codon[0].bits() | (codon[1].bits() << 2) | (codon[2].bits() << 4)) as usize
}

/// The three nucleotides of a codon index.
#[must_use]
pub const fn codon_nucleotides(index: usize) -> [Nucleotide; CODON_LENGTH] {
    #[allow(clippy::cast_possible_truncation)]
    let bits = index as u32;
    [
        Nucleotide::from_bits(bits),
        Nucleotide::from_bits(bits >> 2),
        Nucleotide::from_bits(bits >> 4),
    ]
}

/// The codon string of a codon index.
#[must_use]
pub fn codon_string(index: usize) -> String {
    codon_nucleotides(index).iter().map(|n| n.symbol()).collect()
}

/// Parse a three-letter codon.
///
/// # Errors
///
/// Returns [`CodeError::InvalidCodon`] for anything but three nucleotides.
pub fn parse_codon(codon: &str) -> Result<usize, CodeError> {
    let bytes = codon.as_bytes();
    if bytes.len() != CODON_LENGTH {
        return Err(CodeError::InvalidCodon(codon.to_string()));
    }
    let mut nucleotides = [Nucleotide::A; CODON_LENGTH];
    for (slot, &b) in nucleotides.iter_mut().zip(bytes) {
        *slot = Nucleotide::from_symbol(b).ok_or_else(|| CodeError::InvalidCodon(codon.to_string()))?;
    }
    Ok(codon_index(nucleotides))
}

/// A genetic code: one amino acid (or stop) per codon.
///
/// Stored as a flat table indexed by codon bits, so translating a genotype
/// is a shift and a lookup per codon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneticCode {
    table: [AminoAcid; NUM_CODONS],
}

impl Default for GeneticCode {
    fn default() -> Self {
        Self::standard()
    }
}

impl GeneticCode {
    /// The standard genetic code.
    #[must_use]
    pub fn standard() -> Self {
        // Rank of each nucleotide in NCBI's T, C, A, G ordering.
        const fn ncbi_rank(n: Nucleotide) -> usize {
            match n {
                Nucleotide::U => 0,
                Nucleotide::C => 1,
                Nucleotide::A => 2,
                Nucleotide::G => 3,
            }
        }

        let mut table = [AminoAcid::STOP; NUM_CODONS];
        for (index, slot) in table.iter_mut().enumerate() {
            let [n0, n1, n2] = codon_nucleotides(index);
            let ncbi = ncbi_rank(n0) * 16 + ncbi_rank(n1) * 4 + ncbi_rank(n2);
            *slot = AminoAcid(STANDARD_NCBI[ncbi]);
        }
        Self { table }
    }

    /// Build a code from a full table indexed by codon index.
    #[must_use]
    pub const fn from_table(table: [AminoAcid; NUM_CODONS]) -> Self {
        Self { table }
    }

    /// Build a code from `(codon, amino acid)` pairs covering every codon once.
    ///
    /// # Errors
    ///
    /// Returns an error on an invalid or repeated codon, or if not all 64
    /// codons are assigned.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, CodeError>
    where
        I: IntoIterator<Item = (&'a str, AminoAcid)>,
    {
        let mut table: [Option<AminoAcid>; NUM_CODONS] = [None; NUM_CODONS];
        let mut found = 0;
        for (codon, aa) in pairs {
            let index = parse_codon(codon)?;
            if table[index].replace(aa).is_some() {
                return Err(CodeError::DuplicateCodon(codon.to_ascii_uppercase()));
            }
            found += 1;
        }
        if found != NUM_CODONS {
            return Err(CodeError::WrongEntryCount { found });
        }
        let mut full = [AminoAcid::STOP; NUM_CODONS];
        for (slot, aa) in full.iter_mut().zip(table) {
            *slot = aa.ok_or(CodeError::WrongEntryCount { found })?;
        }
        Ok(Self { table: full })
    }

    /// Parse a code table: a header line, then `aa codon` records.
    ///
    /// # Errors
    ///
    /// Returns an error if a record is malformed or the table does not
    /// assign all 64 codons exactly once.
    pub fn parse(text: &str, source_name: &str) -> LandscapeResult<Self> {
        let parse_error = |line: usize, reason: String| LandscapeError::Parse {
            source_name: source_name.to_string(),
            line,
            reason,
        };

        let mut pairs = Vec::with_capacity(NUM_CODONS);
        for (line_idx, line) in text.lines().enumerate().skip(1) {
            let fields: Vec<&str> = line.split_whitespace().collect();
            match fields.as_slice() {
                [] => {}
                [aa, codon] => {
                    let mut chars = aa.chars();
                    let symbol = match (chars.next(), chars.next()) {
                        (Some(c), None) => AminoAcid::from_symbol(c),
                        _ => None,
                    };
                    let symbol = symbol.ok_or_else(|| {
                        parse_error(line_idx + 1, CodeError::InvalidAminoAcid((*aa).to_string()).to_string())
                    })?;
                    parse_codon(codon).map_err(|e| parse_error(line_idx + 1, e.to_string()))?;
                    pairs.push((*codon, symbol));
                }
                _ => {
                    return Err(parse_error(
                        line_idx + 1,
                        format!("expected 2 fields, found {}", fields.len()),
                    ));
                }
            }
        }
        Ok(Self::from_pairs(pairs)?)
    }

    /// Read and parse a code table file.
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

    /// Write the code in the format accepted by [`GeneticCode::parse`].
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn write_table<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "Aa\tCodon")?;
        for (codon, aa) in self.codons() {
            writeln!(writer, "{aa}\t{codon}")?;
        }
        Ok(())
    }

    /// The full table indexed by codon index.
    #[must_use]
    pub const fn table(&self) -> [AminoAcid; NUM_CODONS] {
        self.table
    }

    /// Amino acid encoded by a codon index.
    #[must_use]
    pub const fn amino_acid(&self, codon: usize) -> AminoAcid {
        self.table[codon]
    }

    /// All codons with their amino acids, in alphabetical codon order.
    pub fn codons(&self) -> impl Iterator<Item = (String, AminoAcid)> + '_ {
        let mut order: Vec<usize> = (0..NUM_CODONS).collect();
        order.sort_by_key(|&i| {
            let [n0, n1, n2] = codon_nucleotides(i);
            (n0, n1, n2)
        });
        order.into_iter().map(|i| (codon_string(i), self.table[i]))
    }

    /// Whether any codon of genotype `id` is a stop codon.
    #[must_use]
    pub fn has_stop(&self, space: GenotypeSpace, id: GenotypeId) -> bool {
        (0..space.codons()).any(|k| self.table[space.codon_at(id, k)].is_stop())
    }

    /// Translate genotype `id` into its amino-acid string.
    #[must_use]
    pub fn translate(&self, space: GenotypeSpace, id: GenotypeId) -> String {
        let mut out = String::with_capacity(space.codons());
        self.translate_into(space, id, &mut out);
        out
    }

    /// Translate genotype `id`, replacing the contents of `out`.
    pub fn translate_into(&self, space: GenotypeSpace, id: GenotypeId, out: &mut String) {
        out.clear();
        out.extend((0..space.codons()).map(|k| self.table[space.codon_at(id, k)].symbol()));
    }

    /// Amino acids that no codon encodes.
    #[must_use]
    pub fn unencoded(&self) -> Vec<AminoAcid> {
        AMINO_ACIDS
            .iter()
            .copied()
            .filter(|aa| !aa.is_stop() && !self.table.contains(aa))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard_text() -> String {
        let mut buf = Vec::new();
        GeneticCode::standard().write_table(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_standard_code_spot_checks() {
        let code = GeneticCode::standard();
        let aa = |c: &str| code.amino_acid(parse_codon(c).unwrap()).symbol();
        assert_eq!(aa("AUG"), 'M');
        assert_eq!(aa("UGG"), 'W');
        assert_eq!(aa("UAA"), '*');
        assert_eq!(aa("UAG"), '*');
        assert_eq!(aa("UGA"), '*');
        assert_eq!(aa("GCA"), 'A');
        assert_eq!(aa("UUU"), 'F');
        assert_eq!(aa("AGA"), 'R');
        assert!(code.unencoded().is_empty());
    }

    #[test]
    fn test_parse_round_trips_written_table() {
        let text = standard_text();
        assert!(text.starts_with("Aa\tCodon\n"));
        let parsed = GeneticCode::parse(&text, "standard").unwrap();
        assert_eq!(parsed, GeneticCode::standard());
    }

    #[test]
    fn test_parse_rejects_missing_codon() {
        let text: String = standard_text().lines().take(64).map(|l| format!("{l}\n")).collect();
        let err = GeneticCode::parse(&text, "short").unwrap_err();
        assert!(matches!(
            err,
            LandscapeError::Code(CodeError::WrongEntryCount { found: 63 })
        ));
    }

    #[test]
    fn test_parse_rejects_duplicate_codon() {
        let mut text = standard_text();
        text.push_str("K\tAUG\n");
        let err = GeneticCode::parse(&text, "dup").unwrap_err();
        assert!(matches!(err, LandscapeError::Code(CodeError::DuplicateCodon(_))));
    }

    #[test]
    fn test_parse_rejects_bad_fields() {
        let err = GeneticCode::parse("Aa\tCodon\nM\tAUG\textra\n", "bad").unwrap_err();
        assert!(matches!(err, LandscapeError::Parse { line: 2, .. }));

        let err = GeneticCode::parse("Aa\tCodon\nBB\tAUG\n", "bad").unwrap_err();
        assert!(matches!(err, LandscapeError::Parse { line: 2, .. }));

        let err = GeneticCode::parse("Aa\tCodon\nM\tAXG\n", "bad").unwrap_err();
        assert!(matches!(err, LandscapeError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_parse_accepts_split_block_symbols() {
        let text: String = standard_text()
            .lines()
            .map(|l| match l {
                "S\tAGC" | "S\tAGU" => format!("X\t{}\n", &l[2..]),
                _ => format!("{l}\n"),
            })
            .collect();
        let code = GeneticCode::parse(&text, "ostrov").unwrap();
        let x = AminoAcid::from_symbol('X').unwrap();
        assert_eq!(code.amino_acid(parse_codon("AGU").unwrap()), x);
        assert_eq!(code.amino_acid(parse_codon("AGC").unwrap()), x);
        assert_eq!(code.amino_acid(parse_codon("UCU").unwrap()).symbol(), 'S');
        assert_eq!(x.index(), None);
        assert!(!x.is_stop());
        assert!(code.unencoded().is_empty());

        let space = GenotypeSpace::new(2).unwrap();
        let id = space.encode("AGUAUG").unwrap();
        assert_eq!(code.translate(space, id), "XM");
    }

    #[test]
    fn test_symbol_must_be_printable_ascii() {
        assert_eq!(AminoAcid::from_symbol('m').map(AminoAcid::symbol), Some('M'));
        assert_eq!(AminoAcid::from_symbol('*'), Some(AminoAcid::STOP));
        assert_eq!(AminoAcid::from_symbol(' '), None);
        assert_eq!(AminoAcid::from_symbol('\t'), None);
        assert_eq!(AminoAcid::from_symbol('é'), None);
    }

    #[test]
    fn test_translate_genotype() {
        let code = GeneticCode::standard();
        let space = GenotypeSpace::new(3).unwrap();
        let id = space.encode("AUGUGGGCA").unwrap();
        assert_eq!(code.translate(space, id), "MWA");
        assert!(!code.has_stop(space, id));

        let stop = space.encode("AUGUAAGCA").unwrap();
        assert_eq!(code.translate(space, stop), "M*A");
        assert!(code.has_stop(space, stop));
    }

    #[test]
    fn test_codon_index_round_trip() {
        for index in 0..NUM_CODONS {
            assert_eq!(parse_codon(&codon_string(index)).unwrap(), index);
        }
    }
}
