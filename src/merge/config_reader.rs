use crate::merge::sites::SiteInfo;
use crate::merge::*;

use serde::{Deserialize, Serialize};

// The defaults of the tool: the naming rules and sampling sites of the survey it
// was first written for. Values set in a user configuration take precedence.
const BUILTIN_CONFIG: &str = include_str!("../../config/default_config.json");

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputSource {
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "genotypeOutput")]
    pub genotype_output: Option<String>,
    #[serde(rename = "countOutput")]
    pub count_output: Option<String>,
    #[serde(rename = "conflictOutput")]
    pub conflict_output: Option<String>,
    #[serde(rename = "summaryOutput")]
    pub summary_output: Option<String>,
    #[serde(rename = "exportPrefix")]
    pub export_prefix: Option<String>,
    pub exports: Option<Vec<String>>,
    #[serde(rename = "genepopTitle")]
    pub genepop_title: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenotypeFormat {
    #[serde(rename = "codeWidth")]
    pub code_width: Option<usize>,
    #[serde(rename = "alleleWidth")]
    pub allele_width: Option<usize>,
}

/// One rewriting step of the raw sample labels.
///
/// `find` is a literal string, or a regular expression when `regex` is set.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct LabelRule {
    pub find: String,
    pub replace: String,
    #[serde(default)]
    pub regex: bool,
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeConfig {
    #[serde(rename = "inputSource")]
    pub input_source: Option<InputSource>,
    #[serde(rename = "outputSettings")]
    pub output_settings: Option<OutputSettings>,
    #[serde(rename = "genotypeFormat")]
    pub genotype_format: Option<GenotypeFormat>,
    #[serde(rename = "labelRules")]
    pub label_rules: Option<Vec<LabelRule>>,
    pub sites: Option<Vec<SiteInfo>>,
}

impl MergeConfig {
    /// Values set in `other` take precedence.
    pub fn overlay(self, other: MergeConfig) -> MergeConfig {
        let input = self.input_source.unwrap_or_default();
        let output = self.output_settings.unwrap_or_default();
        let format = self.genotype_format.unwrap_or_default();
        let o_input = other.input_source.unwrap_or_default();
        let o_output = other.output_settings.unwrap_or_default();
        let o_format = other.genotype_format.unwrap_or_default();
        MergeConfig {
            input_source: Some(InputSource {
                provider: o_input.provider.or(input.provider),
                file_path: o_input.file_path.or(input.file_path),
                excel_worksheet_name: o_input.excel_worksheet_name.or(input.excel_worksheet_name),
            }),
            output_settings: Some(OutputSettings {
                genotype_output: o_output.genotype_output.or(output.genotype_output),
                count_output: o_output.count_output.or(output.count_output),
                conflict_output: o_output.conflict_output.or(output.conflict_output),
                summary_output: o_output.summary_output.or(output.summary_output),
                export_prefix: o_output.export_prefix.or(output.export_prefix),
                exports: o_output.exports.or(output.exports),
                genepop_title: o_output.genepop_title.or(output.genepop_title),
            }),
            genotype_format: Some(GenotypeFormat {
                code_width: o_format.code_width.or(format.code_width),
                allele_width: o_format.allele_width.or(format.allele_width),
            }),
            label_rules: other.label_rules.or(self.label_rules),
            sites: other.sites.or(self.sites),
        }
    }

    /// Resolves the relative file paths against the given directory.
    fn relative_to(self, root: &Path) -> MergeConfig {
        let resolve = |p: Option<String>| p.map(|s| resolve_path(root, &s));
        MergeConfig {
            input_source: self.input_source.map(|i| InputSource {
                file_path: resolve(i.file_path),
                ..i
            }),
            output_settings: self.output_settings.map(|o| OutputSettings {
                genotype_output: resolve(o.genotype_output),
                count_output: resolve(o.count_output),
                conflict_output: resolve(o.conflict_output),
                summary_output: o.summary_output.map(|s| {
                    if s == "stdout" {
                        s
                    } else {
                        resolve_path(root, &s)
                    }
                }),
                export_prefix: resolve(o.export_prefix),
                ..o
            }),
            ..self
        }
    }
}

fn resolve_path(root: &Path, path: &str) -> String {
    if Path::new(path).is_absolute() {
        path.to_string()
    } else {
        root.join(path).display().to_string()
    }
}

pub fn builtin_config() -> BMergeResult<MergeConfig> {
    let config: MergeConfig = serde_json::from_str(BUILTIN_CONFIG).context(ParsingJsonSnafu {
        path: "<builtin>".to_string(),
    })?;
    Ok(config)
}

pub fn read_config(path: &str) -> BMergeResult<MergeConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_config: {}: {:?}", path, contents);
    let config: MergeConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    let root = Path::new(path)
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_default();
    Ok(config.relative_to(&root))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_config_parses() {
        let c = builtin_config().unwrap();
        let rules = c.label_rules.unwrap();
        assert_eq!(rules.len(), 20);
        assert!(!rules[0].regex);
        assert!(rules[19].regex);
        assert_eq!(c.sites.unwrap().len(), 9);
        let f = c.genotype_format.unwrap();
        assert_eq!((f.code_width, f.allele_width), (Some(6), Some(3)));
    }

    #[test]
    fn overlay_keeps_unset_values() {
        let base = builtin_config().unwrap();
        let user: MergeConfig = serde_json::from_str(
            r#"{
                "outputSettings": {"genotypeOutput": "g.txt", "exports": ["long"]},
                "genotypeFormat": {"codeWidth": 8},
                "sites": []
            }"#,
        )
        .unwrap();
        let c = base.overlay(user);
        let out = c.output_settings.unwrap();
        assert_eq!(out.genotype_output, Some("g.txt".to_string()));
        assert_eq!(out.exports, Some(vec!["long".to_string()]));
        let f = c.genotype_format.unwrap();
        assert_eq!((f.code_width, f.allele_width), (Some(8), Some(3)));
        assert_eq!(c.label_rules.unwrap().len(), 20);
        assert!(c.sites.unwrap().is_empty());
    }

    #[test]
    fn relative_paths_follow_the_config_file() {
        let c: MergeConfig = serde_json::from_str(
            r#"{
                "inputSource": {"filePath": "in.txt"},
                "outputSettings": {"countOutput": "/abs/counts.txt", "summaryOutput": "stdout"}
            }"#,
        )
        .unwrap();
        let c = c.relative_to(Path::new("/data/run1"));
        assert_eq!(
            c.input_source.unwrap().file_path,
            Some("/data/run1/in.txt".to_string())
        );
        let out = c.output_settings.unwrap();
        assert_eq!(out.count_output, Some("/abs/counts.txt".to_string()));
        assert_eq!(out.summary_output, Some("stdout".to_string()));
    }
}
