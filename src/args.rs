use clap::Parser;

/// Reassembles individuals that were genotyped over several rows, and reports the
/// repeat genotypes that do not agree.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The table of genotypes, one column per locus (for example the
    /// "MLG 1 col per locus" output of Msatallele).
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (file path) Where to write the genotype table, one row per individual.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) Where to write the number of consistent repeat genotypes, per
    /// individual and locus.
    #[clap(short, long, value_parser)]
    pub counts: Option<String>,

    /// (file path, optional) A JSON configuration file. Options given on the command
    /// line override the ones in the file.
    #[clap(long, value_parser)]
    pub config: Option<String>,

    /// (tsv, csv or xlsx) The type of the input. By default, it is guessed from the
    /// file extension, and tab-separated text is assumed otherwise.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// When using an Excel file, the name of the worksheet to use. The first worksheet
    /// is used otherwise.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (file path, optional) Where to write the inconsistent repeat genotypes.
    #[clap(long, value_parser)]
    pub conflicts: Option<String>,

    /// (genepop, popgenreport, structure or long; may be repeated) The additional
    /// formats to write next to the genotype table.
    #[clap(long, value_parser)]
    pub exports: Option<Vec<String>>,

    /// Do not write any of the additional formats.
    #[clap(long, takes_value = false)]
    pub no_exports: bool,

    /// (file path or 'stdout') If specified, a summary of the run is written in JSON
    /// format to the given location.
    #[clap(long, value_parser)]
    pub summary: Option<String>,

    /// (file path) A reference genotype table. If provided, msatmerge will check that
    /// the genotype table it wrote matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
