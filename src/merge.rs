use log::{debug, info, warn};

use genotype_merge::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::merge::config_reader::*;
use crate::merge::export_genepop::write_genepop;
use crate::merge::export_long::write_long;
use crate::merge::export_popgenreport::write_popgenreport;
use crate::merge::export_structure::write_structure;
use crate::merge::identity::IdentityResolver;
use crate::merge::io_common::*;
use crate::merge::io_tables::*;
use crate::merge::io_tsv::read_delimited;
use crate::merge::io_xlsx::read_xlsx;
use crate::merge::sites::{SiteInfo, SiteTable};

mod config_reader;
mod export_genepop;
mod export_long;
mod export_popgenreport;
mod export_structure;
mod identity;
mod io_common;
mod io_tables;
mod io_tsv;
mod io_xlsx;
mod sites;

#[derive(Debug, Snafu)]
pub enum MergeError {
    #[snafu(display("Error opening file {path}"))]
    OpeningInput { source: csv::Error, path: String },
    #[snafu(display("Error reading a row of {path}"))]
    ReadingRow { source: csv::Error, path: String },
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Worksheet {worksheet} not found in {path}"))]
    MissingWorksheet { path: String, worksheet: String },
    #[snafu(display("No worksheet found in {path}"))]
    EmptyExcel { path: String },
    #[snafu(display("Unexpected cell on line {lineno}: {content}"))]
    ExcelWrongCellType {
        lineno: u64,
        label: String,
        content: String,
    },
    #[snafu(display("Line {lineno} is not valid UTF-8"))]
    InvalidEncoding { lineno: u64, label: String },
    #[snafu(display("The input {path} has no header line"))]
    MissingHeader { path: String },
    #[snafu(display("Invalid header in {path}"))]
    InvalidHeader { source: MergeErrors, path: String },
    #[snafu(display("Invalid genotype format"))]
    InvalidFormat { source: MergeErrors },
    #[snafu(display("Error opening configuration file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing configuration file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error writing the run summary"))]
    WritingJson { source: serde_json::Error },
    #[snafu(display("Invalid label rule {pattern}"))]
    InvalidLabelRule {
        source: regex::Error,
        pattern: String,
    },
    #[snafu(display("Cannot find a population and a number in label {label:?} (normalized: {normalized:?})"))]
    UnresolvedLabel { label: String, normalized: String },
    #[snafu(display("Error writing table {path}"))]
    WritingTable { source: csv::Error, path: String },
    #[snafu(display("Error writing file {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading file {path}"))]
    ReadingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Missing setting: {name} (pass it on the command line or in the configuration file)"))]
    MissingSetting { name: String },
    #[snafu(display("Unknown input type {provider:?}, expected tsv, csv or xlsx"))]
    UnknownProvider { provider: String },
    #[snafu(display("Unknown export {name:?}, expected genepop, popgenreport, structure or long"))]
    UnknownExport { name: String },
    #[snafu(display("Difference detected between the genotype table and the reference {path}"))]
    ReferenceMismatch { path: String },
}

pub type BMergeResult<T> = Result<T, Box<MergeError>>;

/// One data line of the input, before the label is resolved.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedRow {
    pub lineno: u64,
    pub label: String,
    /// One cell per locus column, untrimmed.
    pub cells: Vec<String>,
}

pub struct RowSource {
    pub header: Vec<String>,
    pub rows: Box<dyn Iterator<Item = BMergeResult<ParsedRow>>>,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputProvider {
    Tsv,
    Csv,
    Xlsx,
}

impl InputProvider {
    pub fn parse(name: &str) -> BMergeResult<InputProvider> {
        match name.trim().to_lowercase().as_str() {
            "tsv" | "txt" | "msatallele" => Ok(InputProvider::Tsv),
            "csv" => Ok(InputProvider::Csv),
            "xlsx" | "excel" => Ok(InputProvider::Xlsx),
            _ => UnknownProviderSnafu { provider: name }.fail().map_err(Box::new),
        }
    }

    /// Guesses the type of the input from its extension. Msatallele writes
    /// tab-separated text, which is the fallback.
    pub fn infer(path: &str) -> InputProvider {
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match ext.as_deref() {
            Some("csv") => InputProvider::Csv,
            Some("xlsx") | Some("xlsm") => InputProvider::Xlsx,
            _ => InputProvider::Tsv,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ExportKind {
    Genepop,
    PopGenReport,
    Structure,
    Long,
}

impl ExportKind {
    pub fn parse(name: &str) -> BMergeResult<ExportKind> {
        match name.trim().to_lowercase().as_str() {
            "genepop" => Ok(ExportKind::Genepop),
            "popgenreport" => Ok(ExportKind::PopGenReport),
            "structure" => Ok(ExportKind::Structure),
            "long" => Ok(ExportKind::Long),
            _ => UnknownExportSnafu { name }.fail().map_err(Box::new),
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            ExportKind::Genepop => "genepop",
            ExportKind::PopGenReport => "popgenreport",
            ExportKind::Structure => "structure",
            ExportKind::Long => "long",
        }
    }
}

/// All the settings of a run, once the command line, the configuration file and
/// the built-in defaults have been combined.
#[derive(PartialEq, Debug, Clone)]
pub struct MergeSettings {
    pub input_path: String,
    pub provider: InputProvider,
    pub worksheet: Option<String>,
    pub genotype_output: String,
    pub count_output: String,
    pub conflict_output: Option<String>,
    pub summary_output: Option<String>,
    pub reference: Option<String>,
    pub exports: Vec<ExportKind>,
    pub export_prefix: String,
    pub genepop_title: String,
    pub format: CodeFormat,
    pub label_rules: Vec<LabelRule>,
    pub sites: Vec<SiteInfo>,
}

pub fn settings_from_args(args: &Args) -> BMergeResult<MergeSettings> {
    let builtin = builtin_config()?;
    let config = match &args.config {
        Some(path) => {
            info!("Reading configuration {}", path);
            builtin.overlay(read_config(path)?)
        }
        None => builtin,
    };
    debug!("settings_from_args: config: {:?}", config);

    let input_source = config.input_source.unwrap_or_default();
    let output = config.output_settings.unwrap_or_default();
    let genotype_format = config.genotype_format.unwrap_or_default();

    let input_path = args
        .input
        .clone()
        .or(input_source.file_path)
        .context(MissingSettingSnafu { name: "input" })?;
    let genotype_output = args
        .out
        .clone()
        .or(output.genotype_output)
        .context(MissingSettingSnafu { name: "out" })?;
    let count_output = args
        .counts
        .clone()
        .or(output.count_output)
        .context(MissingSettingSnafu { name: "counts" })?;

    let provider = match args.input_type.clone().or(input_source.provider) {
        Some(p) => InputProvider::parse(&p)?,
        None => InputProvider::infer(&input_path),
    };

    let mut exports: Vec<ExportKind> = Vec::new();
    if !args.no_exports {
        let names = args.exports.clone().or(output.exports).unwrap_or_default();
        for name in names.iter() {
            let kind = ExportKind::parse(name)?;
            if !exports.contains(&kind) {
                exports.push(kind);
            }
        }
    }

    let format = CodeFormat::new(
        genotype_format
            .code_width
            .unwrap_or(CodeFormat::DEFAULT_FORMAT.code_width),
        genotype_format
            .allele_width
            .unwrap_or(CodeFormat::DEFAULT_FORMAT.allele_width),
    )
    .context(InvalidFormatSnafu {})?;

    let export_prefix = output
        .export_prefix
        .unwrap_or_else(|| default_export_prefix(&genotype_output));
    let genepop_title = output.genepop_title.unwrap_or_else(|| {
        format!(
            "Genotypes reassembled from {}",
            simplify_file_name(&input_path)
        )
    });

    Ok(MergeSettings {
        input_path,
        provider,
        worksheet: args
            .excel_worksheet_name
            .clone()
            .or(input_source.excel_worksheet_name),
        genotype_output,
        count_output,
        conflict_output: args.conflicts.clone().or(output.conflict_output),
        summary_output: args.summary.clone().or(output.summary_output),
        reference: args.reference.clone(),
        exports,
        export_prefix,
        genepop_title,
        format,
        label_rules: config.label_rules.unwrap_or_default(),
        sites: config.sites.unwrap_or_default(),
    })
}

/// A data line that was skipped.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RejectedRow {
    pub lineno: u64,
    pub label: String,
    pub reason: String,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RunSummary {
    pub input: String,
    pub loci: Vec<String>,
    pub rows_read: usize,
    pub rejected: Vec<RejectedRow>,
    pub samples: usize,
    pub conflicts: Vec<ConflictReport>,
}

fn build_summary_js(summary: &RunSummary) -> JSValue {
    let rejected: Vec<JSValue> = summary
        .rejected
        .iter()
        .map(|r| json!({"line": r.lineno, "label": r.label, "reason": r.reason}))
        .collect();
    let conflicts: Vec<JSValue> = summary
        .conflicts
        .iter()
        .map(|c| {
            json!({
                "sample": c.sample_id,
                "locus": c.locus,
                "kept": c.kept.as_str(),
                "rejected": c.rejected.as_str()
            })
        })
        .collect();
    json!({
        "input": summary.input,
        "loci": summary.loci,
        "rowsRead": summary.rows_read,
        "rowsRejected": rejected,
        "samples": summary.samples,
        "conflicts": conflicts
    })
}

fn write_summary(path: &str, summary: &RunSummary) -> BMergeResult<()> {
    let js = build_summary_js(summary);
    let pretty_js = serde_json::to_string_pretty(&js).context(WritingJsonSnafu {})?;
    if path == "stdout" {
        println!("{}", pretty_js);
    } else {
        fs::write(path, pretty_js + "\n").context(WritingOutputSnafu { path })?;
        info!("write_summary: wrote {}", path);
    }
    Ok(())
}

fn open_source(settings: &MergeSettings) -> BMergeResult<RowSource> {
    let path = settings.input_path.as_str();
    info!("Attempting to read {:?} file {}", settings.provider, path);
    match settings.provider {
        InputProvider::Tsv => read_delimited(path, b'\t'),
        InputProvider::Csv => read_delimited(path, b','),
        InputProvider::Xlsx => read_xlsx(path, settings.worksheet.as_deref(), &settings.format),
    }
}

fn write_exports(
    settings: &MergeSettings,
    genotypes: &GenotypeTable,
    sites: &SiteTable,
) -> BMergeResult<()> {
    for kind in settings.exports.iter() {
        let path = export_path(&settings.export_prefix, kind.suffix());
        match kind {
            ExportKind::Genepop => {
                write_genepop(&path, genotypes, &settings.format, &settings.genepop_title)?
            }
            ExportKind::PopGenReport => write_popgenreport(&path, genotypes, sites)?,
            ExportKind::Structure => write_structure(&path, genotypes, &settings.format, sites)?,
            ExportKind::Long => write_long(&path, genotypes)?,
        }
    }
    Ok(())
}

/// Compares the genotype table that was written with a reference table.
fn check_reference(reference_path: &str, genotype_output: &str) -> BMergeResult<()> {
    let reference = fs::read_to_string(reference_path).context(ReadingFileSnafu {
        path: reference_path,
    })?;
    let computed = fs::read_to_string(genotype_output).context(ReadingFileSnafu {
        path: genotype_output,
    })?;
    let reference = reference.replace("\r\n", "\n");
    if reference.trim_end() != computed.trim_end() {
        warn!("Found differences with the reference genotype table");
        print_diff(reference.trim_end(), computed.trim_end(), "\n");
        return ReferenceMismatchSnafu {
            path: reference_path,
        }
        .fail()
        .map_err(Box::new);
    }
    info!("The genotype table matches the reference {}", reference_path);
    Ok(())
}

/// Reads the input, reconciles the repeat genotypes and writes all the outputs.
///
/// Nothing is written if the input cannot be read as a whole.
pub fn run_merge(settings: &MergeSettings) -> BMergeResult<RunSummary> {
    let resolver = IdentityResolver::new(&settings.label_rules)?;
    let sites = SiteTable::new(&settings.sites);

    let source = open_source(settings)?;
    let schema = LocusSchema::from_header(source.header.as_slice()).context(InvalidHeaderSnafu {
        path: settings.input_path.clone(),
    })?;
    info!("Found {} markers.", schema.len());
    let loci = schema.loci().to_vec();

    let mut engine = ReconciliationEngine::new(schema, settings.format);
    let mut rows_read: usize = 0;
    let mut rejected: Vec<RejectedRow> = Vec::new();

    for row_r in source.rows {
        // Errors on a single line reject that line. Anything else is fatal.
        let row = match row_r {
            Ok(row) => row,
            Err(e) => {
                let (lineno, label, reason) = match *e {
                    MergeError::ExcelWrongCellType {
                        lineno,
                        label,
                        content,
                    } => (lineno, label, format!("unexpected cell {}", content)),
                    MergeError::InvalidEncoding { lineno, label } => {
                        (lineno, label, "not valid UTF-8".to_string())
                    }
                    other => return Err(Box::new(other)),
                };
                warn!("Skipping line {} ({}): {}", lineno, label, reason);
                rows_read += 1;
                rejected.push(RejectedRow {
                    lineno,
                    label,
                    reason,
                });
                continue;
            }
        };
        if row.label.is_empty() && row.cells.iter().all(|c| c.trim().is_empty()) {
            debug!("run_merge: line {}: blank", row.lineno);
            continue;
        }
        rows_read += 1;

        let outcome = match resolver.resolve(&row.label) {
            Ok(sample_id) => engine
                .ingest_row(&sample_id, row.cells.as_slice())
                .map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        match outcome {
            Ok(conflicts) => {
                for c in conflicts.iter() {
                    warn!(
                        "Multiple genotypes found for sample: {} at marker: {} (line {}): keeping {}, rejecting {}",
                        c.sample_id, c.locus, row.lineno, c.kept, c.rejected
                    );
                }
            }
            Err(reason) => {
                warn!("Skipping line {} ({}): {}", row.lineno, row.label, reason);
                rejected.push(RejectedRow {
                    lineno: row.lineno,
                    label: row.label.clone(),
                    reason,
                });
            }
        }
    }

    let samples = engine.num_samples();
    info!(
        "Read {} rows, rejected {}, found {} samples",
        rows_read,
        rejected.len(),
        samples
    );
    let result = engine.finish();

    write_genotype_table(&settings.genotype_output, &result.genotypes)?;
    write_count_table(&settings.count_output, &result.counts)?;
    if let Some(path) = &settings.conflict_output {
        write_conflicts(path, &result.conflicts)?;
    }
    write_exports(settings, &result.genotypes, &sites)?;

    let summary = RunSummary {
        input: settings.input_path.clone(),
        loci,
        rows_read,
        rejected,
        samples,
        conflicts: result.conflicts,
    };
    if let Some(path) = &settings.summary_output {
        write_summary(path, &summary)?;
    }

    if let Some(reference) = &settings.reference {
        check_reference(reference, &settings.genotype_output)?;
    }
    Ok(summary)
}

pub fn run(args: &Args) -> BMergeResult<()> {
    let settings = settings_from_args(args)?;
    debug!("run: settings: {:?}", settings);
    let summary = run_merge(&settings)?;
    if !summary.conflicts.is_empty() {
        warn!(
            "{} inconsistent repeat genotypes, the first genotype was kept for each",
            summary.conflicts.len()
        );
    }
    info!("Done: {} samples", summary.samples);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn testdata_dir(test_name: &str) -> PathBuf {
        [env!("CARGO_MANIFEST_DIR"), "testdata", test_name]
            .iter()
            .collect()
    }

    fn path_str(p: PathBuf) -> String {
        p.display().to_string()
    }

    fn tmp_args(input: &str, out_dir: &Path) -> Args {
        Args {
            input: Some(input.to_string()),
            out: Some(path_str(out_dir.join("genotypes.txt"))),
            counts: Some(path_str(out_dir.join("counts.txt"))),
            conflicts: Some(path_str(out_dir.join("conflicts.txt"))),
            summary: Some(path_str(out_dir.join("summary.json"))),
            ..Default::default()
        }
    }

    fn assert_same_file(expected: PathBuf, actual: PathBuf) {
        let e = fs::read_to_string(&expected).unwrap();
        let a = fs::read_to_string(&actual).unwrap();
        assert_eq!(e, a, "{:?} differs from {:?}", actual, expected);
    }

    // Runs testdata/<test_name>/input.tsv and checks the outputs against the
    // expected files of the same directory.
    fn test_wrapper(test_name: &str) -> RunSummary {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = testdata_dir(test_name);
        let out = tempfile::tempdir().unwrap();
        let mut args = tmp_args(&path_str(dir.join("input.tsv")), out.path());
        args.exports = Some(
            vec!["genepop", "popgenreport", "structure", "long"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        args.reference = Some(path_str(dir.join("expected_genotypes.tsv")));
        let settings = settings_from_args(&args).unwrap();
        let summary = run_merge(&settings).unwrap();

        assert_same_file(
            dir.join("expected_genotypes.tsv"),
            out.path().join("genotypes.txt"),
        );
        assert_same_file(dir.join("expected_counts.tsv"), out.path().join("counts.txt"));
        assert_same_file(
            dir.join("expected_conflicts.tsv"),
            out.path().join("conflicts.txt"),
        );
        for suffix in ["genepop", "popgenreport", "structure", "long"] {
            assert!(out.path().join(format!("genotypes_{}.txt", suffix)).exists());
        }
        let js: JSValue =
            serde_json::from_str(&fs::read_to_string(out.path().join("summary.json")).unwrap())
                .unwrap();
        assert_eq!(js["samples"], json!(summary.samples));
        summary
    }

    #[test]
    fn repeat_genotyping() {
        let summary = test_wrapper("repeat_genotyping");
        assert_eq!(summary.loci, vec!["M1", "M2"]);
        assert_eq!(summary.rows_read, 8);
        assert_eq!(summary.samples, 2);
        assert_eq!(summary.conflicts.len(), 1);
        let lines: Vec<u64> = summary.rejected.iter().map(|r| r.lineno).collect();
        assert_eq!(lines, vec![7, 8, 9]);
    }

    #[test]
    fn comma_separated_input() {
        let out = tempfile::tempdir().unwrap();
        let input = out.path().join("input.csv");
        let mut f = fs::File::create(&input).unwrap();
        f.write_all(b"Sample,M1\n\"Wexford_12\",123456\nWexford_12,123456\n")
            .unwrap();
        let mut args = tmp_args(&path_str(input), out.path());
        args.no_exports = true;
        let settings = settings_from_args(&args).unwrap();
        assert_eq!(settings.provider, InputProvider::Csv);
        assert!(settings.exports.is_empty());
        run_merge(&settings).unwrap();
        assert_eq!(
            fs::read_to_string(out.path().join("counts.txt")).unwrap(),
            "Sample\tM1\nWexford_0012\t2\n"
        );
        assert!(!out.path().join("genotypes_genepop.txt").exists());
    }

    #[test]
    fn invalid_bytes_reject_only_their_row() {
        let out = tempfile::tempdir().unwrap();
        let input = out.path().join("input.txt");
        fs::write(
            &input,
            b"Sample\tM1\nWexford_12\t123456\nWexford_13\t12\xff456\nWexford_14\t111222\n",
        )
        .unwrap();
        let args = tmp_args(&path_str(input), out.path());
        let settings = settings_from_args(&args).unwrap();
        let summary = run_merge(&settings).unwrap();
        assert_eq!(summary.rows_read, 3);
        assert_eq!(
            summary.rejected,
            vec![RejectedRow {
                lineno: 3,
                label: "Wexford_13".to_string(),
                reason: "not valid UTF-8".to_string(),
            }]
        );
        assert_eq!(
            fs::read_to_string(out.path().join("genotypes.txt")).unwrap(),
            "Sample\tM1\nWexford_0012\t123456\nWexford_0014\t111222\n"
        );
    }

    #[test]
    fn trailing_header_tabs_add_no_locus() {
        let out = tempfile::tempdir().unwrap();
        let input = out.path().join("input.txt");
        fs::write(&input, "Sample\tM1\t\t\nWexford_12\t123456\t\t\n").unwrap();
        let args = tmp_args(&path_str(input), out.path());
        let settings = settings_from_args(&args).unwrap();
        let summary = run_merge(&settings).unwrap();
        assert_eq!(summary.loci, vec!["M1"]);
        assert_eq!(
            fs::read_to_string(out.path().join("genotypes.txt")).unwrap(),
            "Sample\tM1\nWexford_0012\t123456\n"
        );
    }

    #[test]
    fn bad_header_writes_nothing() {
        let out = tempfile::tempdir().unwrap();
        let input = out.path().join("input.txt");
        fs::write(&input, "Sample\nWexford_12\n").unwrap();
        let args = tmp_args(&path_str(input), out.path());
        let settings = settings_from_args(&args).unwrap();
        let res = run_merge(&settings);
        assert!(matches!(
            res.map_err(|e| *e),
            Err(MergeError::InvalidHeader { .. })
        ));
        assert!(!out.path().join("genotypes.txt").exists());
        assert!(!out.path().join("counts.txt").exists());
    }

    #[test]
    fn reference_mismatch() {
        let out = tempfile::tempdir().unwrap();
        let input = out.path().join("input.txt");
        fs::write(&input, "Sample\tM1\nWexford_12\t123456\n").unwrap();
        let reference = out.path().join("reference.txt");
        fs::write(&reference, "Sample\tM1\nWexford_0012\t654321\n").unwrap();
        let mut args = tmp_args(&path_str(input), out.path());
        args.reference = Some(path_str(reference));
        let settings = settings_from_args(&args).unwrap();
        assert!(matches!(
            run_merge(&settings).map_err(|e| *e),
            Err(MergeError::ReferenceMismatch { .. })
        ));
    }

    #[test]
    fn settings_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.json");
        fs::write(
            &config,
            r#"{
                "inputSource": {"filePath": "mlg.txt", "provider": "csv"},
                "outputSettings": {
                    "genotypeOutput": "genotypes.txt",
                    "countOutput": "counts.txt",
                    "exports": ["long", "genepop", "long"]
                }
            }"#,
        )
        .unwrap();
        let args = Args {
            config: Some(path_str(config.clone())),
            counts: Some("/tmp/other_counts.txt".to_string()),
            ..Default::default()
        };
        let s = settings_from_args(&args).unwrap();
        assert_eq!(s.input_path, path_str(dir.path().join("mlg.txt")));
        assert_eq!(s.provider, InputProvider::Csv);
        assert_eq!(s.count_output, "/tmp/other_counts.txt");
        assert_eq!(s.exports, vec![ExportKind::Long, ExportKind::Genepop]);
        assert_eq!(
            s.export_prefix,
            path_str(dir.path().join("genotypes"))
        );
        assert_eq!(s.genepop_title, "Genotypes reassembled from mlg.txt");
        assert_eq!(s.label_rules.len(), 20);
    }

    #[test]
    fn missing_settings() {
        let args = Args {
            input: Some("mlg.txt".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            settings_from_args(&args).map_err(|e| *e),
            Err(MergeError::MissingSetting { .. })
        ));
    }

    #[test]
    fn input_types() {
        assert_eq!(InputProvider::infer("a/b.CSV"), InputProvider::Csv);
        assert_eq!(InputProvider::infer("a/b.xlsx"), InputProvider::Xlsx);
        assert_eq!(InputProvider::infer("a/b.txt"), InputProvider::Tsv);
        assert_eq!(InputProvider::infer("a/b"), InputProvider::Tsv);
        assert!(InputProvider::parse("ods").is_err());
        assert!(ExportKind::parse("arlequin").is_err());
    }
}
