// Writers for the reconciled tables.

use csv::{QuoteStyle, Writer, WriterBuilder};
use std::fs::File;

use crate::merge::*;

const SAMPLE_COLUMN: &str = "Sample";

fn tab_writer(path: &str) -> BMergeResult<Writer<File>> {
    let w = WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Never)
        .from_path(path)
        .context(WritingTableSnafu { path })?;
    Ok(w)
}

fn write_rows<I>(path: &str, header: Vec<String>, rows: I) -> BMergeResult<()>
where
    I: Iterator<Item = Vec<String>>,
{
    let mut w = tab_writer(path)?;
    w.write_record(&header).context(WritingTableSnafu { path })?;
    for row in rows {
        w.write_record(&row).context(WritingTableSnafu { path })?;
    }
    w.flush().context(WritingOutputSnafu { path })?;
    Ok(())
}

fn table_header(loci: &[String]) -> Vec<String> {
    let mut header = vec![SAMPLE_COLUMN.to_string()];
    header.extend(loci.iter().cloned());
    header
}

pub fn write_genotype_table(path: &str, table: &GenotypeTable) -> BMergeResult<()> {
    let rows = table.rows.iter().map(|(sample, values)| {
        let mut row = vec![sample.clone()];
        row.extend(values.iter().map(|v| v.to_string()));
        row
    });
    write_rows(path, table_header(&table.loci), rows)?;
    info!(
        "write_genotype_table: wrote {} samples to {}",
        table.rows.len(),
        path
    );
    Ok(())
}

pub fn write_count_table(path: &str, table: &CountTable) -> BMergeResult<()> {
    let rows = table.rows.iter().map(|(sample, counts)| {
        let mut row = vec![sample.clone()];
        row.extend(counts.iter().map(|c| c.to_string()));
        row
    });
    write_rows(path, table_header(&table.loci), rows)?;
    info!(
        "write_count_table: wrote {} samples to {}",
        table.rows.len(),
        path
    );
    Ok(())
}

pub fn write_conflicts(path: &str, conflicts: &[ConflictReport]) -> BMergeResult<()> {
    let header: Vec<String> = vec![SAMPLE_COLUMN, "Locus", "Kept", "Rejected"]
        .into_iter()
        .map(|s| s.to_string())
        .collect();
    let rows = conflicts.iter().map(|c| {
        vec![
            c.sample_id.clone(),
            c.locus.clone(),
            c.kept.to_string(),
            c.rejected.to_string(),
        ]
    });
    write_rows(path, header, rows)?;
    info!(
        "write_conflicts: wrote {} conflicts to {}",
        conflicts.len(),
        path
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> Reconciliation {
        let mut b = genotype_merge::builder::Builder::new(&CodeFormat::DEFAULT_FORMAT)
            .unwrap()
            .loci(&["M1".to_string(), "M2".to_string()])
            .unwrap();
        b.add_row("Wexford_0012", &["123456", ""]).unwrap();
        b.add_row("Donegal_0003", &["150150", "200210"]).unwrap();
        b.add_row("Wexford_0012", &["123456", ""]).unwrap();
        b.add_row("Donegal_0003", &["150152", "200210"]).unwrap();
        b.finish().unwrap()
    }

    #[test]
    fn tables_are_tab_separated() {
        let r = example();
        let dir = tempfile::tempdir().unwrap();
        let gpath = dir.path().join("genotypes.txt").display().to_string();
        let cpath = dir.path().join("counts.txt").display().to_string();
        write_genotype_table(&gpath, &r.genotypes).unwrap();
        write_count_table(&cpath, &r.counts).unwrap();
        assert_eq!(
            fs::read_to_string(&gpath).unwrap(),
            "Sample\tM1\tM2\nDonegal_0003\t150150\t200210\nWexford_0012\t123456\tNA\n"
        );
        assert_eq!(
            fs::read_to_string(&cpath).unwrap(),
            "Sample\tM1\tM2\nDonegal_0003\t1\t2\nWexford_0012\t2\t0\n"
        );
    }

    #[test]
    fn conflict_report() {
        let r = example();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conflicts.txt").display().to_string();
        write_conflicts(&path, &r.conflicts).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Sample\tLocus\tKept\tRejected\nDonegal_0003\tM1\t150150\t150152\n"
        );
    }

    #[test]
    fn unwritable_destination() {
        let r = example();
        let res = write_genotype_table("/nonexistent/msatmerge/genotypes.txt", &r.genotypes);
        assert!(matches!(
            res.map_err(|e| *e),
            Err(MergeError::WritingTable { .. })
        ));
    }
}
