// Long export: one line per called locus.

use crate::merge::*;

pub fn render_long(table: &GenotypeTable) -> String {
    let mut out = "Sample\tMarker\tSize_1\tSize_2\n".to_string();
    for (sample, values) in table.rows.iter() {
        for (locus, v) in table.loci.iter().zip(values.iter()) {
            if let Some(code) = v.code() {
                let (a1, a2) = code.alleles();
                out.push_str(&format!("{}\t{}\t{}\t{}\n", sample, locus, a1, a2));
            }
        }
    }
    out
}

pub fn write_long(path: &str, table: &GenotypeTable) -> BMergeResult<()> {
    let content = render_long(table);
    fs::write(path, content).context(WritingOutputSnafu { path })?;
    info!("write_long: wrote {}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use genotype_merge::builder::Builder;

    #[test]
    fn only_called_loci() {
        let mut b = Builder::new(&CodeFormat::DEFAULT_FORMAT)
            .unwrap()
            .loci(&["Hg10".to_string(), "Hg13".to_string()])
            .unwrap();
        b.add_row("Wexford_0012", &["123456", ""]).unwrap();
        b.add_row("Donegal_0003", &["", ""]).unwrap();
        let r = b.finish().unwrap();
        assert_eq!(
            render_long(&r.genotypes),
            "Sample\tMarker\tSize_1\tSize_2\nWexford_0012\tHg10\t123\t456\n"
        );
    }
}
