use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Format output as a table using the tabled crate.
///
/// Envelope objects print their `result` section (plus warnings and
/// methodology); arrays become one row per element; nested objects are
/// flattened into dotted field names so a summary reads as a single table.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result(result);
                print_envelope_trailer(map);
            } else {
                print_result(value);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result(result: &Value) {
    match result {
        Value::Array(arr) => print_array_table(arr),
        Value::Object(_) => {
            let mut rows: Vec<(String, String)> = Vec::new();
            flatten_into("", result, &mut rows);

            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (field, value) in rows {
                builder.push_record([field.as_str(), value.as_str()]);
            }
            println!("{}", Table::from(builder));
        }
        _ => println!("{}", format_value(result)),
    }
}

/// Flatten nested objects into dotted keys; arrays of scalars are joined,
/// arrays of objects fall back to their JSON form.
fn flatten_into(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                match val {
                    Value::Object(_) => flatten_into(&path, val, rows),
                    _ => rows.push((path, format_value(val))),
                }
            }
        }
        _ => rows.push((prefix.to_string(), format_value(value))),
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn print_envelope_trailer(envelope: &serde_json::Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join("; ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
