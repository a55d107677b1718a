use serde_json::Value;
use std::io::{self, Write};

use super::{cell, result_of};

/// Write output as CSV to stdout.
///
/// A result carrying a `schedule` writes one record per month; any other
/// result is written as field/value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(stdout.lock(), value) {
        eprintln!("CSV write error: {e}");
    }
}

fn write_csv<W: Write>(writer: W, value: &Value) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    let result = result_of(value);

    match result {
        Value::Object(map) => {
            if let Some(Value::Array(rows)) = map.get("schedule") {
                write_rows(&mut wtr, rows)?;
            } else {
                wtr.write_record(["field", "value"])?;
                for (key, val) in map {
                    wtr.write_record([key.as_str(), &cell(val)])?;
                }
            }
        }
        Value::Array(rows) => write_rows(&mut wtr, rows)?,
        _ => wtr.write_record([cell(result)])?,
    }

    wtr.flush()?;
    Ok(())
}

fn write_rows<W: Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = rows.first() else {
        for row in rows {
            wtr.write_record([cell(row)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;
    for row in rows.iter().filter_map(Value::as_object) {
        let record: Vec<String> = headers
            .iter()
            .map(|h| row.get(*h).map(cell).unwrap_or_default())
            .collect();
        wtr.write_record(&record)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, value).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_schedule_rows_become_records() {
        let v = json!({"result": {
            "emi": 10.0,
            "schedule": [
                {"month": 1, "closing": 5.5},
                {"month": 2, "closing": 0.0}
            ]
        }});
        assert_eq!(render(&v), "month,closing\n1,5.5\n2,0.0\n");
    }

    #[test]
    fn test_scalar_result_is_field_value_pairs() {
        let v = json!({"result": {"emi": "8791.59"}});
        assert_eq!(render(&v), "field,value\nemi,8791.59\n");
    }
}
