use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Document formats accepted for `--input`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// YAML for `.yaml`/`.yml`, JSON otherwise.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                DocumentFormat::Yaml
            }
            _ => DocumentFormat::Json,
        }
    }
}

/// Read a JSON or YAML file and deserialise into a typed struct.
pub fn read_document<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    parse_document(&contents, DocumentFormat::from_path(&canonical))
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e).into())
}

/// YAML is converted to a JSON value first, so a quoted scalar stays a
/// string and numeric fields accept the same inputs in both formats.
pub fn parse_document<T: DeserializeOwned>(
    contents: &str,
    format: DocumentFormat,
) -> Result<T, Box<dyn std::error::Error>> {
    let value = match format {
        DocumentFormat::Json => serde_json::from_str(contents)?,
        DocumentFormat::Yaml => {
            let value: serde_json::Value = serde_yaml::from_str(contents)?;
            serde_json::from_value(value)?
        }
    };
    Ok(value)
}

/// Resolve the path relative to the working directory and check it is a file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_navigator_core::whatif::WhatIfRequest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("loan.yaml")),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("loan.YML")),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("loan.json")),
            DocumentFormat::Json
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("loan")),
            DocumentFormat::Json
        );
    }

    #[test]
    fn test_parse_yaml_request() {
        let yaml = "loan_amount: 100000\nannual_interest_rate: 10\ntenure_months: 12\nprepayment:\n  month: 6\n  amount: 20000\n  mode: reduce_emi\n";
        let request: WhatIfRequest = parse_document(yaml, DocumentFormat::Yaml).unwrap();
        assert_eq!(request.loan_amount, dec!(100000));
        assert_eq!(request.prepayment.unwrap().month, 6);
    }

    #[test]
    fn test_quoted_yaml_amount_rejected() {
        let yaml = "loan_amount: \"100000\"\nannual_interest_rate: 10\ntenure_months: 12\n";
        assert!(parse_document::<WhatIfRequest>(yaml, DocumentFormat::Yaml).is_err());
    }

    #[test]
    fn test_missing_file_reported() {
        let err = read_document::<WhatIfRequest>("definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
