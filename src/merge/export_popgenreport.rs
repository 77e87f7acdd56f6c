// PopGenReport export: comma-separated, with the coordinates of the sampling site.

use std::collections::HashSet;

use crate::merge::sites::{population_of, SiteTable};
use crate::merge::*;

pub fn render_popgenreport(table: &GenotypeTable, sites: &SiteTable) -> String {
    let mut out = format!("ind,pop,lat,long,{}\n", table.loci.join(","));
    let mut unknown: HashSet<&str> = HashSet::new();
    for (sample, values) in table.rows.iter() {
        let pop = population_of(sample);
        let (lat, long) = match sites.get(pop) {
            Some(site) => (site.latitude.to_string(), site.longitude.to_string()),
            None => {
                if unknown.insert(pop) {
                    warn!("No sampling site found for population {}", pop);
                }
                (MISSING_LABEL.to_string(), MISSING_LABEL.to_string())
            }
        };
        let mut cells = vec![sample.clone(), pop.to_string(), lat, long];
        cells.extend(values.iter().map(|v| match v.code() {
            Some(code) => {
                let (a1, a2) = code.alleles();
                format!("{}/{}", a1, a2)
            }
            None => MISSING_LABEL.to_string(),
        }));
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

pub fn write_popgenreport(path: &str, table: &GenotypeTable, sites: &SiteTable) -> BMergeResult<()> {
    let content = render_popgenreport(table, sites);
    fs::write(path, content).context(WritingOutputSnafu { path })?;
    info!("write_popgenreport: wrote {}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::sites::SiteInfo;
    use genotype_merge::builder::Builder;

    #[test]
    fn coordinates_and_alleles() {
        let mut b = Builder::new(&CodeFormat::DEFAULT_FORMAT)
            .unwrap()
            .loci(&["Hg10".to_string(), "Hg13".to_string()])
            .unwrap();
        b.add_row("Donegal_0003", &["150150", ""]).unwrap();
        b.add_row("Atlantis_0001", &["098102", "200210"]).unwrap();
        let r = b.finish().unwrap();
        let sites = SiteTable::new(&[SiteInfo {
            name: "Donegal".to_string(),
            latitude: 54.555871,
            longitude: -8.377615,
            code: 3,
        }]);
        assert_eq!(
            render_popgenreport(&r.genotypes, &sites),
            "ind,pop,lat,long,Hg10,Hg13\n\
             Atlantis_0001,Atlantis,NA,NA,098/102,200/210\n\
             Donegal_0003,Donegal,54.555871,-8.377615,150/150,NA\n"
        );
    }
}
