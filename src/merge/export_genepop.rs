// Genepop export: one POP block per population.

use crate::merge::io_common::zeros;
use crate::merge::sites::population_of;
use crate::merge::*;

pub fn render_genepop(table: &GenotypeTable, format: &CodeFormat, title: &str) -> String {
    let mut out = String::new();
    out.push_str(title.trim());
    out.push('\n');
    out.push_str(&table.loci.join(","));
    out.push('\n');

    let missing = zeros(format.code_width);
    // Rows are sorted by sample id, so all the samples of a population are
    // next to each other.
    let mut current_pop: Option<&str> = None;
    for (sample, values) in table.rows.iter() {
        let pop = population_of(sample);
        if current_pop != Some(pop) {
            out.push_str("POP\n");
            current_pop = Some(pop);
        }
        let codes: Vec<&str> = values
            .iter()
            .map(|v| v.code().map(|c| c.as_str()).unwrap_or(missing.as_str()))
            .collect();
        out.push_str(&format!("{},\t{}\n", sample, codes.join("\t")));
    }
    out
}

pub fn write_genepop(
    path: &str,
    table: &GenotypeTable,
    format: &CodeFormat,
    title: &str,
) -> BMergeResult<()> {
    let content = render_genepop(table, format, title);
    fs::write(path, content).context(WritingOutputSnafu { path })?;
    info!("write_genepop: wrote {}", path);
    Ok(())
}
