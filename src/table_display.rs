use anyhow::Result;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use crossterm::style::Stylize;
use serde_json::Value;
use trips_cli::config::config::DisplayConfig;

/// Pull the record list out of a response body. The service returns either
/// a bare JSON array or an envelope with an `items` array.
pub fn records_of(body: &Value) -> Option<&[Value]> {
    match body {
        Value::Array(items) => Some(items.as_slice()),
        Value::Object(map) => map.get("items").and_then(Value::as_array).map(Vec::as_slice),
        _ => None,
    }
}

fn header_names(data: &[Value]) -> Vec<String> {
    data.first()
        .and_then(Value::as_object)
        .map(|obj| obj.keys().cloned().collect())
        .unwrap_or_default()
}

pub fn display_records(data: &[Value], display: &DisplayConfig) {
    if data.is_empty() {
        println!("{}", "No results found.".yellow());
        return;
    }

    let headers = header_names(data);
    if headers.is_empty() {
        // Not object records; print them as-is
        for record in data {
            println!("{}", record);
        }
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header_cells: Vec<Cell> = Vec::new();
    if display.show_row_numbers {
        header_cells.push(Cell::new("#").add_attribute(Attribute::Bold));
    }
    header_cells.extend(
        headers
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
    );
    table.set_header(header_cells);

    let shown = data.len().min(display.max_display_rows);
    for (i, record) in data[..shown].iter().enumerate() {
        if let Some(obj) = record.as_object() {
            let mut row: Vec<String> = Vec::new();
            if display.show_row_numbers {
                row.push((i + 1).to_string());
            }
            row.extend(headers.iter().map(|field| match obj.get(field) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                Some(Value::Bool(b)) => b.to_string(),
                Some(Value::Null) => "NULL".to_string(),
                Some(v) => v.to_string(),
                None => "".to_string(),
            }));
            table.add_row(row);
        }
    }

    println!("{table}");
    if shown < data.len() {
        println!(
            "{}",
            format!(
                "... {} more rows not shown (max_display_rows = {})",
                data.len() - shown,
                display.max_display_rows
            )
            .yellow()
        );
    }
    println!("\n{}", format!("{} rows returned", data.len()).green());
}

/// Render a single JSON object (stats summary, single trip) as a
/// field/value table.
pub fn display_object(value: &Value) {
    let Some(obj) = value.as_object() else {
        println!(
            "{}",
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        );
        return;
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("field").add_attribute(Attribute::Bold),
        Cell::new("value").add_attribute(Attribute::Bold),
    ]);

    for (key, v) in obj {
        let text = match v {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => "NULL".to_string(),
            other => other.to_string(),
        };
        table.add_row(vec![key.clone(), text]);
    }

    println!("{table}");
}

pub fn export_to_csv(data: &[Value], filename: &str) -> Result<()> {
    let mut wtr = csv::Writer::from_path(filename)?;

    let headers = header_names(data);
    if headers.is_empty() {
        return Ok(());
    }

    wtr.write_record(&headers)?;

    for record in data {
        if let Some(obj) = record.as_object() {
            let row: Vec<String> = headers
                .iter()
                .map(|field| match obj.get(field) {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Number(n)) => n.to_string(),
                    Some(Value::Bool(b)) => b.to_string(),
                    Some(Value::Null) => "".to_string(),
                    Some(v) => v.to_string(),
                    None => "".to_string(),
                })
                .collect();
            wtr.write_record(&row)?;
        }
    }

    wtr.flush()?;
    println!("{}", format!("Results exported to {}", filename).green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_records_of_bare_array() {
        let body = json!([{"id": 1}, {"id": 2}]);
        assert_eq!(records_of(&body).map(|r| r.len()), Some(2));
    }

    #[test]
    fn test_records_of_items_envelope() {
        let body = json!({"items": [{"id": 1}], "total": 42});
        assert_eq!(records_of(&body).map(|r| r.len()), Some(1));
    }

    #[test]
    fn test_records_of_scalar_is_none() {
        assert!(records_of(&json!(5)).is_none());
        assert!(records_of(&json!({"total": 42})).is_none());
    }

    #[test]
    fn test_header_names_from_first_record() {
        let records = vec![json!({"trip_duration": 455, "vendor_id": 2})];
        let headers = header_names(&records);
        assert!(headers.contains(&"trip_duration".to_string()));
        assert!(headers.contains(&"vendor_id".to_string()));
    }
}
