use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Columns that lead a table when present, in this order. Everything else
/// follows alphabetically.
const LEADING_COLUMNS: &[&str] = &[
    "id",
    "sub_project_id",
    "task_id",
    "company_id",
    "name",
    "title",
    "status",
    "priority",
    "progress",
];

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => {
            let prefs = ui::prefs();
            let options = table::TableOptions {
                max_width: prefs.term_width,
                color: prefs.table_color,
            };
            Ok(render_table(&serde_json::to_value(value)?, options))
        }
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}

fn render_table(value: &Value, options: table::TableOptions) -> String {
    match value {
        Value::Array(items) if items.is_empty() => String::from("(no rows)"),
        Value::Array(items) if items.iter().all(Value::is_object) => {
            let maps = items.iter().filter_map(Value::as_object).collect::<Vec<_>>();
            let headers = column_order(&maps);
            let rows = maps
                .iter()
                .map(|map| {
                    headers
                        .iter()
                        .map(|h| map.get(h).map_or_else(|| String::from("-"), cell))
                        .collect::<Vec<_>>()
                })
                .collect::<Vec<_>>();
            table::render(&headers, &rows, options)
        }
        Value::Array(items) => {
            let rows = items.iter().map(|v| vec![cell(v)]).collect::<Vec<_>>();
            table::render(&[String::from("value")], &rows, options)
        }
        Value::Object(map) => {
            let headers = column_order(&[map]);
            let rows = headers
                .iter()
                .map(|key| vec![key.clone(), map.get(key).map_or_else(String::new, cell)])
                .collect::<Vec<_>>();
            table::render(&[String::from("field"), String::from("value")], &rows, options)
        }
        scalar => cell(scalar),
    }
}

fn column_order(maps: &[&Map<String, Value>]) -> Vec<String> {
    let mut rest = maps
        .iter()
        .flat_map(|m| m.keys())
        .filter(|k| !LEADING_COLUMNS.contains(&k.as_str()))
        .cloned()
        .collect::<Vec<_>>();
    rest.sort();
    rest.dedup();

    LEADING_COLUMNS
        .iter()
        .filter(|lead| maps.iter().any(|m| m.contains_key(**lead)))
        .map(|lead| (*lead).to_string())
        .chain(rest)
        .collect()
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        nested => serde_json::to_string(nested).unwrap_or_default(),
    }
}
