pub use crate::config::*;
use crate::{Decision, LocusSchema, ReconciliationEngine};

/// A builder for feeding genotyping rows to the reconciliation engine.
///
/// ```
/// pub use genotype_merge::builder::Builder;
/// pub use genotype_merge::CodeFormat;
/// # use genotype_merge::MergeErrors;
///
/// let mut builder = Builder::new(&CodeFormat::DEFAULT_FORMAT)?
///     .loci(&["Hg10".to_string(), "Hg13".to_string()])?;
///
/// builder.add_row("Wexford_0012", &["123456", ""])?;
/// builder.add_row("Wexford_0012", &["123456", "200210"])?;
///
/// let res = builder.finish()?;
/// assert_eq!(res.counts.rows[0].1, vec![2, 1]);
///
/// # Ok::<(), MergeErrors>(())
/// ```
pub struct Builder {
    pub(crate) _format: CodeFormat,
    pub(crate) _engine: Option<ReconciliationEngine>,
}

impl Builder {
    pub fn new(format: &CodeFormat) -> Result<Builder, MergeErrors> {
        let format = CodeFormat::new(format.code_width, format.allele_width)?;
        Ok(Builder {
            _format: format,
            _engine: None,
        })
    }

    /// Sets the loci, in column order. Any row added before is dropped.
    pub fn loci(self, names: &[String]) -> Result<Builder, MergeErrors> {
        let schema = LocusSchema::new(names)?;
        Ok(Builder {
            _format: self._format,
            _engine: Some(ReconciliationEngine::new(schema, self._format)),
        })
    }

    /// Adds one row of genotypes for a sample, one cell per locus.
    ///
    /// Returns the number of conflicts found in this row.
    pub fn add_row<S: AsRef<str>>(
        &mut self,
        sample_id: &str,
        cells: &[S],
    ) -> Result<usize, MergeErrors> {
        let engine = self._engine.as_mut().ok_or(MergeErrors::EmptySchema)?;
        engine.ingest_row(sample_id, cells).map(|c| c.len())
    }

    /// Adds a single observation.
    pub fn add_observation(
        &mut self,
        sample_id: &str,
        locus: &str,
        raw_value: &str,
    ) -> Result<Decision, MergeErrors> {
        let engine = self._engine.as_mut().ok_or(MergeErrors::EmptySchema)?;
        engine.ingest(sample_id, locus, raw_value)
    }

    pub fn finish(self) -> Result<Reconciliation, MergeErrors> {
        let engine = self._engine.ok_or(MergeErrors::EmptySchema)?;
        Ok(engine.finish())
    }
}
