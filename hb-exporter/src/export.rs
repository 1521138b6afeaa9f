//! Flat text exports
//!
//! The delimited table is deliberately naive: values are written as-is, so a
//! separator or newline inside a value breaks the layout.

use serde::Serialize;
use serde_json::Value;
use shared::Row;
use std::str::FromStr;
use thiserror::Error;

/// Export error type
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Delimited export needs every record to be a JSON object
    #[error("Record {0} is not an object")]
    NotAnObject(usize),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Default delimited-table separator
pub const DEFAULT_SEPARATOR: char = ',';

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// `key<TAB>name` lines for ArchiSteamFarm
    Asf,
    /// One key per line
    Keys,
    Csv { separator: char },
    Json,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asf" => Ok(ExportFormat::Asf),
            "keys" => Ok(ExportFormat::Keys),
            "csv" => Ok(ExportFormat::Csv {
                separator: DEFAULT_SEPARATOR,
            }),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

/// Render rows in the requested format
pub fn export(rows: &[Row], format: ExportFormat) -> ExportResult<String> {
    match format {
        ExportFormat::Asf => Ok(export_asf(rows)),
        ExportFormat::Keys => Ok(export_keys(rows)),
        ExportFormat::Csv { separator } => to_delimited(rows, separator),
        ExportFormat::Json => to_json(rows),
    }
}

pub fn export_asf(rows: &[Row]) -> String {
    rows.iter()
        .filter(|row| row.is_activatable_steam_key())
        .map(|row| format!("{}\t{}", row.redeemed_key_val, row.human_name))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn export_keys(rows: &[Row]) -> String {
    rows.iter()
        .filter(|row| !row.is_gift && !row.redeemed_key_val.is_empty())
        .map(|row| row.redeemed_key_val.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Header from the first record's field names, one line per record
///
/// An empty input yields an empty string.
pub fn to_delimited<T: Serialize>(records: &[T], separator: char) -> ExportResult<String> {
    let objects = records
        .iter()
        .enumerate()
        .map(|(i, record)| match serde_json::to_value(record)? {
            Value::Object(map) => Ok(map),
            _ => Err(ExportError::NotAnObject(i)),
        })
        .collect::<ExportResult<Vec<_>>>()?;

    let Some(first) = objects.first() else {
        return Ok(String::new());
    };

    let sep = separator.to_string();
    let header: Vec<&String> = first.keys().collect();
    let mut lines = Vec::with_capacity(objects.len() + 1);
    lines.push(header.iter().map(|h| h.as_str()).collect::<Vec<_>>().join(&sep));
    for object in &objects {
        let line = header
            .iter()
            .map(|h| cell(object.get(h.as_str())))
            .collect::<Vec<_>>()
            .join(&sep);
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

/// Pretty-printed JSON array
pub fn to_json<T: Serialize>(records: &[T]) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RowBuilder;
    use serde_json::json;

    fn steam_key(name: &str, revealed: &str) -> RowBuilder {
        RowBuilder::new(name).revealed(revealed).app_id(440)
    }

    fn sample() -> Vec<Row> {
        let gift = steam_key("Gifted", "https://www.humblebundle.com/gift?key=x").gift();
        let expired = steam_key("Expired", "EXP-KEY").expired();
        vec![
            steam_key("Game A", "AAAA-BBBB").build(),
            steam_key("Game B", "").build(),
            steam_key("Game C", "GOG-KEY").key_type("gog").build(),
            gift.build(),
            expired.build(),
        ]
    }

    #[test]
    fn test_asf_export() {
        assert_eq!(export_asf(&sample()), "AAAA-BBBB\tGame A");
    }

    #[test]
    fn test_keys_export() {
        assert_eq!(export_keys(&sample()), "AAAA-BBBB\nGOG-KEY\nEXP-KEY");
    }

    #[test]
    fn test_key_exports_never_include_gifts() {
        let rows = sample();
        let gift_value = &rows[3].redeemed_key_val;
        assert!(!export_asf(&rows).contains(gift_value.as_str()));
        assert!(!export_keys(&rows).contains(gift_value.as_str()));
    }

    #[test]
    fn test_delimited_scenario() {
        let records = vec![
            json!({"human_name": "Game A", "category": "Bundle"}),
            json!({"human_name": "Game B", "category": "Store"}),
        ];
        let out = to_delimited(&records, ';').unwrap();
        assert_eq!(out, "human_name;category\nGame A;Bundle\nGame B;Store");
    }

    #[test]
    fn test_delimited_rows_header_matches_fields() {
        let rows = sample();
        let out = export(&rows, ExportFormat::Csv { separator: ',' }).unwrap();
        let mut lines = out.lines();
        let header: Vec<&str> = lines.next().unwrap().split(',').collect();

        let value = serde_json::to_value(&rows[0]).unwrap();
        let fields: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(header, fields);

        let first: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(first.len(), header.len());
        assert_eq!(first[0], "game_a");
        assert_eq!(first[6], "Key");
        assert_eq!(first[8], "false");
        assert_eq!(first[11], "440");
    }

    #[test]
    fn test_delimited_null_renders_empty() {
        let mut r = steam_key("Game A", "").build();
        r.steam_app_id = None;
        r.keyindex = None;
        let out = to_delimited(&[r], '|').unwrap();
        let line = out.lines().nth(1).unwrap();
        let cells: Vec<&str> = line.split('|').collect();
        assert_eq!(cells[11], "");
        assert_eq!(cells[13], "");
    }

    #[test]
    fn test_delimited_empty_set() {
        assert_eq!(to_delimited::<Row>(&[], ',').unwrap(), "");
        assert_eq!(export(&[], ExportFormat::Csv { separator: ';' }).unwrap(), "");
    }

    #[test]
    fn test_delimited_rejects_scalars() {
        assert!(matches!(to_delimited(&[1, 2], ','), Err(ExportError::NotAnObject(0))));
    }

    #[test]
    fn test_json_round_trip() {
        let rows = sample();
        let out = export(&rows, ExportFormat::Json).unwrap();
        assert!(out.starts_with("[\n  {"));
        let parsed: Vec<Row> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, rows);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("ASF".parse::<ExportFormat>(), Ok(ExportFormat::Asf));
        assert_eq!("csv".parse::<ExportFormat>(), Ok(ExportFormat::Csv { separator: ',' }));
        assert!("xml".parse::<ExportFormat>().is_err());
    }
}
