use std::path::Path;

use genotype_merge::{CodeFormat, LocusValue};

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
        .to_string()
}

/// The prefix of the export files: the genotype output without its `.txt`
/// extension.
pub fn default_export_prefix(genotype_output: &str) -> String {
    genotype_output
        .strip_suffix(".txt")
        .unwrap_or(genotype_output)
        .to_string()
}

pub fn export_path(prefix: &str, suffix: &str) -> String {
    format!("{}_{}.txt", prefix, suffix)
}

/// Left-pads a numeric cell with zeros. Spreadsheets drop the leading zeros of
/// allele sizes such as `098`.
pub fn pad_numeric(s: &str, width: usize) -> String {
    if s.chars().all(|c| c.is_ascii_digit()) {
        format!("{:0>width$}", s, width = width)
    } else {
        s.to_string()
    }
}

/// The placeholder of a missing allele or genotype in the export formats.
pub fn zeros(width: usize) -> String {
    "0".repeat(width)
}

/// The two allele fields of a locus value, with zeros for a value that was not
/// called.
pub fn alleles_or_zeros(value: &LocusValue, format: &CodeFormat) -> (String, String) {
    match value.code() {
        Some(code) => {
            let (a1, a2) = code.alleles();
            (a1.to_string(), a2.to_string())
        }
        None => (
            zeros(format.allele_width),
            zeros(format.code_width - format.allele_width),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_names() {
        assert_eq!(default_export_prefix("out/genotypes.txt"), "out/genotypes");
        // Only the extension is stripped, not any trailing 't' or 'x'.
        assert_eq!(default_export_prefix("out/text"), "out/text");
        assert_eq!(export_path("out/genotypes", "genepop"), "out/genotypes_genepop.txt");
        assert_eq!(simplify_file_name("/data/run1/mlg.txt"), "mlg.txt");
    }

    #[test]
    fn numeric_padding() {
        assert_eq!(pad_numeric("98102", 6), "098102");
        assert_eq!(pad_numeric("123456", 6), "123456");
        assert_eq!(pad_numeric("12a", 6), "12a");
    }

    #[test]
    fn missing_alleles() {
        let f = CodeFormat::DEFAULT_FORMAT;
        assert_eq!(
            alleles_or_zeros(&LocusValue::NotCalled, &f),
            ("000".to_string(), "000".to_string())
        );
        let f = CodeFormat::new(5, 2).unwrap();
        assert_eq!(
            alleles_or_zeros(&LocusValue::NotCalled, &f),
            ("00".to_string(), "000".to_string())
        );
    }
}
