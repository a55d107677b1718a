use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Deserialise a piped JSON document from stdin.
/// Returns None for an interactive terminal.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    read_piped(io::stdin().lock())
}

/// Parse whatever `reader` yields; an empty or whitespace-only pipe is None.
pub fn read_piped<T: DeserializeOwned, R: Read>(
    mut reader: R,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value = serde_json::from_str(trimmed)
        .map_err(|e| format!("Failed to parse JSON from stdin: {e}"))?;
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_navigator_core::whatif::WhatIfRequest;

    #[test]
    fn test_empty_pipe_is_none() {
        let parsed: Option<WhatIfRequest> = read_piped("  \n".as_bytes()).unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn test_piped_terms() {
        let json = r#"{"loan_amount": 250000, "annual_interest_rate": 7.5, "tenure_months": 240}"#;
        let parsed: Option<WhatIfRequest> = read_piped(json.as_bytes()).unwrap();
        assert_eq!(parsed.unwrap().tenure_months, 240);
    }

    #[test]
    fn test_quoted_amount_on_pipe_is_error() {
        let json = r#"{"loan_amount": "250000", "annual_interest_rate": 7.5, "tenure_months": 240}"#;
        assert!(read_piped::<WhatIfRequest, _>(json.as_bytes()).is_err());
    }

    #[test]
    fn test_malformed_pipe_is_error() {
        let err = read_piped::<WhatIfRequest, _>("{not json".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("stdin"));
    }
}
