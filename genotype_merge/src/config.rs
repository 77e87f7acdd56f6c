// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The label used for a locus that has never been genotyped for a sample.
///
/// On input, a cell holding this label is treated like an empty cell.
pub const MISSING_LABEL: &str = "NA";

/// The layout of a genotype code: a fixed number of characters, split into two
/// allele fields at a fixed position.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct CodeFormat {
    pub code_width: usize,
    pub allele_width: usize,
}

impl CodeFormat {
    /// Two 3-character allele sizes, as written by Msatallele.
    pub const DEFAULT_FORMAT: CodeFormat = CodeFormat {
        code_width: 6,
        allele_width: 3,
    };

    pub fn new(code_width: usize, allele_width: usize) -> Result<CodeFormat, MergeErrors> {
        if allele_width == 0 || allele_width >= code_width {
            return Err(MergeErrors::InvalidCodeFormat {
                code_width,
                allele_width,
            });
        }
        Ok(CodeFormat {
            code_width,
            allele_width,
        })
    }
}

/// A genotype code that has been checked against a `CodeFormat`.
///
/// The content is opaque: two codes are the same call if and only if they are
/// the same string.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct GenotypeCode {
    code: String,
    // Byte offset of the second allele.
    split: usize,
}

impl GenotypeCode {
    pub fn parse(raw: &str, format: &CodeFormat) -> Option<GenotypeCode> {
        if raw.chars().count() != format.code_width || raw.chars().any(char::is_whitespace) {
            return None;
        }
        let split = raw
            .char_indices()
            .nth(format.allele_width)
            .map(|(idx, _)| idx)?;
        Some(GenotypeCode {
            code: raw.to_string(),
            split,
        })
    }

    pub fn as_str(&self) -> &str {
        self.code.as_str()
    }

    /// The two allele fields of the code.
    pub fn alleles(&self) -> (&str, &str) {
        self.code.split_at(self.split)
    }
}

impl Display for GenotypeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code)
    }
}

/// The content of one input cell, once validated.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Observation {
    /// Empty cell, or the missing label.
    Missing,
    Called(GenotypeCode),
}

impl Observation {
    pub fn parse(raw: &str, format: &CodeFormat) -> Option<Observation> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == MISSING_LABEL {
            return Some(Observation::Missing);
        }
        GenotypeCode::parse(trimmed, format).map(Observation::Called)
    }
}

// ******** Output data structures *********

/// The canonical value of a locus for a sample.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum LocusValue {
    NotCalled,
    Called(GenotypeCode),
}

impl LocusValue {
    pub fn code(&self) -> Option<&GenotypeCode> {
        match self {
            LocusValue::NotCalled => None,
            LocusValue::Called(code) => Some(code),
        }
    }
}

impl Display for LocusValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocusValue::NotCalled => f.write_str(MISSING_LABEL),
            LocusValue::Called(code) => write!(f, "{}", code),
        }
    }
}

/// The state of one (sample, locus) pair.
///
/// Invariants: `value` never goes back to `NotCalled` once set, and
/// `agreement_count` is zero exactly when `value` is `NotCalled`.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LocusState {
    pub value: LocusValue,
    pub agreement_count: u32,
}

impl LocusState {
    pub const EMPTY: LocusState = LocusState {
        value: LocusValue::NotCalled,
        agreement_count: 0,
    };
}

/// A repeat observation that disagreed with the value already accepted for a
/// sample at a locus. The rejected code was discarded.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ConflictReport {
    pub sample_id: String,
    pub locus: String,
    pub kept: GenotypeCode,
    pub rejected: GenotypeCode,
}

/// The genotype of every sample at every locus.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct GenotypeTable {
    pub loci: Vec<String>,
    pub rows: Vec<(String, Vec<LocusValue>)>,
}

/// How many observations confirmed the accepted genotype, for every sample at
/// every locus. Same shape as the matching `GenotypeTable`.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CountTable {
    pub loci: Vec<String>,
    pub rows: Vec<(String, Vec<u32>)>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Reconciliation {
    pub genotypes: GenotypeTable,
    pub counts: CountTable,
    /// In the order they were detected.
    pub conflicts: Vec<ConflictReport>,
}

/// Errors that prevent an observation, a row or a schema from being accepted.
///
/// None of them leave the engine in a partially updated state.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum MergeErrors {
    EmptySchema,
    /// A blank header cell between two loci.
    EmptyLocusName { position: usize },
    DuplicateLocus(String),
    UnknownLocus(String),
    EmptySampleId,
    RowTooShort { expected: usize, found: usize },
    MalformedGenotype { locus: String, value: String },
    InvalidCodeFormat {
        code_width: usize,
        allele_width: usize,
    },
}

impl Error for MergeErrors {}

impl Display for MergeErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeErrors::EmptySchema => write!(f, "the header does not name any locus"),
            MergeErrors::EmptyLocusName { position } => {
                write!(f, "locus column {} has no name", position + 1)
            }
            MergeErrors::DuplicateLocus(name) => {
                write!(f, "locus {:?} appears more than once in the header", name)
            }
            MergeErrors::UnknownLocus(name) => write!(f, "unknown locus {:?}", name),
            MergeErrors::EmptySampleId => write!(f, "empty sample id"),
            MergeErrors::RowTooShort { expected, found } => write!(
                f,
                "row has {} genotype columns, expected at least {}",
                found, expected
            ),
            MergeErrors::MalformedGenotype { locus, value } => {
                write!(f, "malformed genotype {:?} at locus {}", value, locus)
            }
            MergeErrors::InvalidCodeFormat {
                code_width,
                allele_width,
            } => write!(
                f,
                "invalid genotype format: allele width {} for codes of width {}",
                allele_width, code_width
            ),
        }
    }
}
