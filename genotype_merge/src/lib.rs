mod config;
pub mod builder;
pub mod manual;

use log::{debug, info};

use std::collections::{HashMap, HashSet};

pub use crate::config::*;

// **** Locus schema ****

/// The ordered list of loci, as read from the header of the input table.
///
/// It fixes the column-to-locus mapping of every data row.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LocusSchema {
    loci: Vec<String>,
}

impl LocusSchema {
    pub fn new(loci: &[String]) -> Result<LocusSchema, MergeErrors> {
        let loci: Vec<String> = loci.iter().map(|l| l.trim().to_string()).collect();
        if loci.is_empty() {
            return Err(MergeErrors::EmptySchema);
        }
        if let Some(position) = loci.iter().position(|l| l.is_empty()) {
            return Err(MergeErrors::EmptyLocusName { position });
        }
        let mut seen: HashSet<&str> = HashSet::new();
        for l in loci.iter() {
            if !seen.insert(l.as_str()) {
                return Err(MergeErrors::DuplicateLocus(l.clone()));
            }
        }
        Ok(LocusSchema { loci })
    }

    /// Builds the schema from a full header row. The first cell labels the
    /// sample column and is not a locus. Blank cells at the end of the header
    /// (left by spreadsheet exports) are dropped.
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> Result<LocusSchema, MergeErrors> {
        let mut loci: Vec<String> = header
            .iter()
            .skip(1)
            .map(|s| s.as_ref().trim().to_string())
            .collect();
        while loci.last().map_or(false, |l| l.is_empty()) {
            loci.pop();
        }
        LocusSchema::new(&loci)
    }

    pub fn len(&self) -> usize {
        self.loci.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loci.is_empty()
    }

    pub fn position(&self, locus: &str) -> Option<usize> {
        self.loci.iter().position(|l| l == locus)
    }

    pub fn loci(&self) -> &[String] {
        &self.loci
    }
}

// **** Merge rule ****

/// What happened to one observation.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Decision {
    /// Missing observation, nothing known yet.
    NoData,
    /// Missing observation, the existing call is kept.
    Retained,
    /// First call for this sample and locus.
    Accepted,
    /// Same code as the accepted call.
    Confirmed,
    /// A different code than the accepted call. The observation is discarded.
    Conflict {
        kept: GenotypeCode,
        rejected: GenotypeCode,
    },
}

/// Applies one observation to the state of a (sample, locus) pair.
///
/// The first called genotype wins: later observations can only confirm it or be
/// reported as conflicts. Missing observations never change a call.
pub fn reconcile(current: &LocusState, observation: &Observation) -> (LocusState, Decision) {
    match (&current.value, observation) {
        (LocusValue::NotCalled, Observation::Missing) => (current.clone(), Decision::NoData),
        (LocusValue::Called(_), Observation::Missing) => (current.clone(), Decision::Retained),
        (LocusValue::NotCalled, Observation::Called(code)) => (
            LocusState {
                value: LocusValue::Called(code.clone()),
                agreement_count: 1,
            },
            Decision::Accepted,
        ),
        (LocusValue::Called(kept), Observation::Called(code)) if kept == code => (
            LocusState {
                value: current.value.clone(),
                agreement_count: current.agreement_count.saturating_add(1),
            },
            Decision::Confirmed,
        ),
        (LocusValue::Called(kept), Observation::Called(code)) => (
            current.clone(),
            Decision::Conflict {
                kept: kept.clone(),
                rejected: code.clone(),
            },
        ),
    }
}

// **** Engine ****

// One entry per locus of the schema, in schema order.
#[derive(Eq, PartialEq, Debug, Clone)]
struct SampleRecord {
    states: Vec<LocusState>,
}

impl SampleRecord {
    fn new(num_loci: usize) -> SampleRecord {
        SampleRecord {
            states: vec![LocusState::EMPTY; num_loci],
        }
    }
}

/// Accumulates the observations of all the samples over one run.
///
/// Observations must be fed in input order, since the first call seen for a
/// (sample, locus) pair is the one that is kept.
#[derive(Debug, Clone)]
pub struct ReconciliationEngine {
    schema: LocusSchema,
    format: CodeFormat,
    records: HashMap<String, SampleRecord>,
    conflicts: Vec<ConflictReport>,
}

impl ReconciliationEngine {
    pub fn new(schema: LocusSchema, format: CodeFormat) -> ReconciliationEngine {
        info!(
            "ReconciliationEngine: {} loci, genotype codes of width {}",
            schema.len(),
            format.code_width
        );
        ReconciliationEngine {
            schema,
            format,
            records: HashMap::new(),
            conflicts: Vec::new(),
        }
    }

    pub fn schema(&self) -> &LocusSchema {
        &self.schema
    }

    pub fn format(&self) -> &CodeFormat {
        &self.format
    }

    pub fn num_samples(&self) -> usize {
        self.records.len()
    }

    /// All the conflicts seen so far, in the order they were detected.
    pub fn conflicts(&self) -> &[ConflictReport] {
        &self.conflicts
    }

    pub fn state(&self, sample_id: &str, locus: &str) -> Option<&LocusState> {
        let idx = self.schema.position(locus)?;
        self.records.get(sample_id).map(|r| &r.states[idx])
    }

    /// Ingests a single cell for a sample.
    ///
    /// On error, nothing is recorded, not even the sample.
    pub fn ingest(
        &mut self,
        sample_id: &str,
        locus: &str,
        raw_value: &str,
    ) -> Result<Decision, MergeErrors> {
        if sample_id.is_empty() {
            return Err(MergeErrors::EmptySampleId);
        }
        let idx = self
            .schema
            .position(locus)
            .ok_or_else(|| MergeErrors::UnknownLocus(locus.to_string()))?;
        let observation = self.parse_cell(idx, raw_value)?;
        Ok(self.apply(sample_id, idx, &observation))
    }

    /// Ingests one input row: one cell per locus, in schema order.
    ///
    /// The row is checked as a whole before any state is touched, so a rejected
    /// row leaves no trace. Cells past the last locus are ignored.
    /// Returns the conflicts raised by this row.
    pub fn ingest_row<S: AsRef<str>>(
        &mut self,
        sample_id: &str,
        cells: &[S],
    ) -> Result<Vec<ConflictReport>, MergeErrors> {
        if sample_id.is_empty() {
            return Err(MergeErrors::EmptySampleId);
        }
        let num_loci = self.schema.len();
        if cells.len() < num_loci {
            return Err(MergeErrors::RowTooShort {
                expected: num_loci,
                found: cells.len(),
            });
        }
        if cells.len() > num_loci {
            debug!(
                "ingest_row: {}: ignoring {} trailing cells",
                sample_id,
                cells.len() - num_loci
            );
        }
        let observations: Vec<Observation> = cells
            .iter()
            .take(num_loci)
            .enumerate()
            .map(|(idx, cell)| self.parse_cell(idx, cell.as_ref()))
            .collect::<Result<_, _>>()?;

        let first_conflict = self.conflicts.len();
        self.records
            .entry(sample_id.to_string())
            .or_insert_with(|| SampleRecord::new(num_loci));
        for (idx, observation) in observations.iter().enumerate() {
            self.apply(sample_id, idx, observation);
        }
        Ok(self.conflicts[first_conflict..].to_vec())
    }

    /// Produces the final tables and hands over the conflict log.
    pub fn finish(self) -> Reconciliation {
        let (genotypes, counts) = materialize(&self);
        Reconciliation {
            genotypes,
            counts,
            conflicts: self.conflicts,
        }
    }

    fn parse_cell(&self, idx: usize, raw_value: &str) -> Result<Observation, MergeErrors> {
        Observation::parse(raw_value, &self.format).ok_or_else(|| {
            MergeErrors::MalformedGenotype {
                locus: self.schema.loci[idx].clone(),
                value: raw_value.to_string(),
            }
        })
    }

    fn apply(&mut self, sample_id: &str, idx: usize, observation: &Observation) -> Decision {
        let num_loci = self.schema.len();
        let record = self
            .records
            .entry(sample_id.to_string())
            .or_insert_with(|| SampleRecord::new(num_loci));
        let (next, decision) = reconcile(&record.states[idx], observation);
        record.states[idx] = next;
        debug!(
            "apply: {} {}: {:?}",
            sample_id, self.schema.loci[idx], decision
        );
        if let Decision::Conflict { kept, rejected } = &decision {
            self.conflicts.push(ConflictReport {
                sample_id: sample_id.to_string(),
                locus: self.schema.loci[idx].clone(),
                kept: kept.clone(),
                rejected: rejected.clone(),
            });
        }
        decision
    }
}

// **** Materializer ****

/// Lays out the state of the engine as two dense tables.
///
/// Rows are sorted by sample id and columns follow the schema, so that the same
/// input always produces the same tables.
pub fn materialize(engine: &ReconciliationEngine) -> (GenotypeTable, CountTable) {
    let mut sample_ids: Vec<&String> = engine.records.keys().collect();
    sample_ids.sort();
    info!(
        "materialize: {} samples over {} loci, {} conflicts",
        sample_ids.len(),
        engine.schema.len(),
        engine.conflicts.len()
    );

    let mut genotype_rows: Vec<(String, Vec<LocusValue>)> = Vec::new();
    let mut count_rows: Vec<(String, Vec<u32>)> = Vec::new();
    for sample_id in sample_ids {
        let record = &engine.records[sample_id];
        genotype_rows.push((
            sample_id.clone(),
            record.states.iter().map(|s| s.value.clone()).collect(),
        ));
        count_rows.push((
            sample_id.clone(),
            record.states.iter().map(|s| s.agreement_count).collect(),
        ));
    }

    let loci = engine.schema.loci.clone();
    (
        GenotypeTable {
            loci: loci.clone(),
            rows: genotype_rows,
        },
        CountTable {
            loci,
            rows: count_rows,
        },
    )
}
