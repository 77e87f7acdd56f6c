// Turns the raw labels of the instruments into canonical sample ids.

use regex::Regex;

use crate::merge::config_reader::LabelRule;
use crate::merge::*;

enum Rewrite {
    Literal { find: String, replace: String },
    Pattern { regex: Regex, replace: String },
}

/// Applies the label rules in order, then builds the id
/// `<population>_<number padded to 4 digits>` from the first two `_`-separated
/// fields.
pub struct IdentityResolver {
    rewrites: Vec<Rewrite>,
}

impl IdentityResolver {
    pub fn new(rules: &[LabelRule]) -> BMergeResult<IdentityResolver> {
        let mut rewrites: Vec<Rewrite> = Vec::new();
        for rule in rules.iter() {
            let rw = if rule.regex {
                let regex = Regex::new(&rule.find).context(InvalidLabelRuleSnafu {
                    pattern: rule.find.clone(),
                })?;
                Rewrite::Pattern {
                    regex,
                    replace: rule.replace.clone(),
                }
            } else {
                Rewrite::Literal {
                    find: rule.find.clone(),
                    replace: rule.replace.clone(),
                }
            };
            rewrites.push(rw);
        }
        debug!("IdentityResolver: {} rules", rewrites.len());
        Ok(IdentityResolver { rewrites })
    }

    pub fn normalize(&self, raw_label: &str) -> String {
        let mut label = raw_label.trim().to_string();
        for rw in self.rewrites.iter() {
            label = match rw {
                Rewrite::Literal { find, replace } if !find.is_empty() => {
                    label.replace(find.as_str(), replace)
                }
                Rewrite::Literal { .. } => label,
                Rewrite::Pattern { regex, replace } => {
                    regex.replace_all(&label, replace.as_str()).into_owned()
                }
            };
        }
        label
    }

    pub fn resolve(&self, raw_label: &str) -> BMergeResult<String> {
        let normalized = self.normalize(raw_label);
        let mut fields = normalized.split('_');
        let population = fields.next().map(str::trim).filter(|p| !p.is_empty());
        let number = fields.next().and_then(|n| n.trim().parse::<u32>().ok());
        match (population, number) {
            (Some(p), Some(n)) => Ok(format!("{}_{:04}", p, n)),
            _ => Err(Box::new(MergeError::UnresolvedLabel {
                label: raw_label.to_string(),
                normalized,
            })),
        }
    }
}
