use anyhow::{bail, Result};
use colored::Colorize;
use formease::{FieldList, FieldSchema, FormDocument};
use regex::Regex;
use std::path::Path;

/// A structural problem found in a form definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Position of the field in the list, if the finding is about one field
    pub index: Option<usize>,
    pub message: String,
}

impl Finding {
    fn at(index: usize, message: impl Into<String>) -> Self {
        Self {
            index: Some(index),
            message: message.into(),
        }
    }
}

/// Every problem in `document`, key problems first
pub fn inspect(document: &FormDocument) -> Vec<Finding> {
    let list = FieldList::from_schemas(document.components.iter().cloned());

    let mut findings: Vec<Finding> = list
        .key_anomalies()
        .into_iter()
        .map(|anomaly| Finding {
            index: None,
            message: anomaly.to_string(),
        })
        .collect();

    for (index, field) in document.components.iter().enumerate() {
        findings.extend(inspect_field(index, field));
    }

    findings
}

fn inspect_field(index: usize, field: &FieldSchema) -> Vec<Finding> {
    let mut findings = Vec::new();

    if !field.field_type.is_known() {
        findings.push(Finding::at(
            index,
            format!("unknown type '{}' renders nothing", field.field_type),
        ));
    }

    match (&field.options, field.field_type.is_choice()) {
        (Some(options), false) if !options.is_empty() => findings.push(Finding::at(
            index,
            format!("options are ignored for type '{}'", field.field_type),
        )),
        (None, true) => findings.push(Finding::at(index, "choice field has no options")),
        (Some(options), true) if options.is_empty() => {
            findings.push(Finding::at(index, "choice field has no options"))
        }
        _ => {}
    }

    if let Some(pattern) = field.validate.as_ref().and_then(|v| v.pattern.as_deref()) {
        if let Err(err) = Regex::new(pattern) {
            findings.push(Finding::at(
                index,
                format!("validate.pattern does not compile: {}", err),
            ));
        }
    }

    findings
}

pub fn execute(path: &Path) -> Result<()> {
    let document = super::load_document(path)?;
    let findings = inspect(&document);

    println!(
        "{} {} ({} fields)",
        "Checked".green().bold(),
        path.display(),
        document.components.len()
    );

    if findings.is_empty() {
        println!("{}", "✓ No problems found".green());
        return Ok(());
    }

    for finding in &findings {
        match finding.index {
            Some(index) => {
                let key = &document.components[index].key;
                println!("  {} [{}] {}: {}", "⚠".yellow(), index, key.cyan(), finding.message);
            }
            None => println!("  {} {}", "⚠".yellow(), finding.message),
        }
    }

    bail!("{} problem(s) found", findings.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use formease::{FieldOption, FieldType, ValidationRules};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sample_form_is_clean() {
        assert_eq!(inspect(&FormDocument::sample()), vec![]);
    }

    #[test]
    fn test_reports_every_problem() {
        let mut text = FieldSchema::new(FieldType::TextField, "dup", "Text");
        text.options = Some(vec![FieldOption::new("A", "a")]);
        text.validate = Some(ValidationRules {
            pattern: Some("([unclosed".to_string()),
            ..ValidationRules::default()
        });
        let select = FieldSchema::new(FieldType::Select, "dup", "Pick");
        let odd = FieldSchema::new(FieldType::from("signature"), "", "Sign");

        let findings = inspect(&FormDocument::new(vec![text, select, odd]));
        let messages: Vec<&str> = findings.iter().map(|f| f.message.as_str()).collect();

        assert_eq!(findings.len(), 6);
        assert_eq!(messages[0], "field 2 has an empty key");
        assert_eq!(messages[1], "key 'dup' is shared by fields 0, 1");
        assert_eq!(messages[2], "options are ignored for type 'textfield'");
        assert!(messages[3].starts_with("validate.pattern does not compile"));
        assert_eq!(findings[4], Finding::at(1, "choice field has no options"));
        assert_eq!(findings[5], Finding::at(2, "unknown type 'signature' renders nothing"));
    }

    #[test]
    fn test_execute_fails_when_problems_are_reported() {
        let dir = std::env::temp_dir().join(format!("formease-check-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let clean = dir.join("clean.json");
        let broken = dir.join("broken.json");
        std::fs::write(&clean, FormDocument::sample().to_pretty_json().unwrap()).unwrap();
        std::fs::write(&broken, r#"[{"type":"select","label":"Pick","key":""}]"#).unwrap();

        assert!(execute(&clean).is_ok());
        let err = execute(&broken).unwrap_err();
        assert_eq!(err.to_string(), "2 problem(s) found");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
