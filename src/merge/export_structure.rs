// STRUCTURE export: one column per allele, populations as numeric site codes.

use std::collections::HashSet;

use crate::merge::io_common::alleles_or_zeros;
use crate::merge::sites::{population_of, SiteTable};
use crate::merge::*;

const UNKNOWN_SITE_CODE: u32 = 0;

pub fn render_structure(table: &GenotypeTable, format: &CodeFormat, sites: &SiteTable) -> String {
    let mut out = table.loci.join("\t");
    out.push('\n');
    let mut unknown: HashSet<&str> = HashSet::new();
    for (sample, values) in table.rows.iter() {
        let pop = population_of(sample);
        let code = match sites.get(pop) {
            Some(site) => site.code,
            None => {
                if unknown.insert(pop) {
                    warn!("No sampling site found for population {}", pop);
                }
                UNKNOWN_SITE_CODE
            }
        };
        let mut cells = vec![sample.clone(), code.to_string()];
        for v in values.iter() {
            let (a1, a2) = alleles_or_zeros(v, format);
            cells.push(a1);
            cells.push(a2);
        }
        out.push_str(&cells.join("\t"));
        out.push('\n');
    }
    out
}

pub fn write_structure(
    path: &str,
    table: &GenotypeTable,
    format: &CodeFormat,
    sites: &SiteTable,
) -> BMergeResult<()> {
    let content = render_structure(table, format, sites);
    fs::write(path, content).context(WritingOutputSnafu { path })?;
    info!("write_structure: wrote {}", path);
    Ok(())
}
