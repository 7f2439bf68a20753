use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::collector::{MonitoringResult, ScalarResult, TableResult};
use crate::parser::table::row_index;
use crate::parser::{Record, Row, Value};

/// JSON структура результата мониторинга
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringResultJson {
    pub target: String,
    pub timestamp: String,
    pub summary: ResultSummary,
    pub scalars: Vec<ScalarResultJson>,
    pub tables: Vec<TableResultJson>,
    pub errors: Vec<ErrorInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSummary {
    pub total_scalars: usize,
    pub successful_scalars: usize,
    pub total_tables: usize,
    pub successful_tables: usize,
    pub total_rows: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalarResultJson {
    pub name: String,
    pub oid: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub value: serde_json::Value,
    pub status: String, // "success" | "error" | "timeout"
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableResultJson {
    pub name: String,
    pub status: String, // "success" | "error" | "timeout"
    pub row_count: usize,
    pub limited_to: Option<usize>,
    pub columns: Vec<ColumnInfo>,
    pub rows: Vec<RowData>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub oid: String,
    /// Сколько строк в колонке не `absent`
    pub value_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowData {
    /// Индекс строки относительно первой колонки
    pub index: Option<String>,
    pub cells: Vec<CellData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellData {
    pub oid: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub item_type: String, // "scalar" | "table"
    pub item_name: String,
    pub error_message: String,
}

/// JSON форматтер для результатов мониторинга
pub struct JsonFormatter;

impl JsonFormatter {
    /// Конвертирует результат мониторинга в JSON
    pub fn format_monitoring_result(result: &MonitoringResult) -> MonitoringResultJson {
        let timestamp = chrono::Utc::now().to_rfc3339();

        let successful_scalars = result.scalars.iter().filter(|s| s.error.is_none()).count();
        let successful_tables = result.tables.iter().filter(|t| t.error.is_none()).count();
        let total_rows: usize = result.tables.iter().map(|t| t.rows.len()).sum();

        let summary = ResultSummary {
            total_scalars: result.scalars.len(),
            successful_scalars,
            total_tables: result.tables.len(),
            successful_tables,
            total_rows,
        };

        let scalars = result.scalars.iter().map(Self::format_scalar).collect();
        let tables = result.tables.iter().map(Self::format_table).collect();
        let errors = Self::extract_errors(result);

        MonitoringResultJson {
            target: result.target.clone(),
            timestamp,
            summary,
            scalars,
            tables,
            errors,
        }
    }

    /// Форматирует скалярное значение для JSON
    fn format_scalar(scalar: &ScalarResult) -> ScalarResultJson {
        ScalarResultJson {
            name: scalar.name.clone(),
            oid: scalar.oid.clone(),
            kind: scalar.record.as_ref().map(|r| r.kind.clone()),
            value: value_to_json(scalar.record.as_ref().and_then(|r| r.value.as_ref())),
            status: Self::status(scalar.error.as_deref()).to_string(),
            error: scalar.error.clone(),
        }
    }

    /// Форматирует таблицу для JSON
    fn format_table(table: &TableResult) -> TableResultJson {
        let (columns, rows) = Self::analyze_table_structure(&table.columns, &table.rows);

        TableResultJson {
            name: table.name.clone(),
            status: Self::status(table.error.as_deref()).to_string(),
            row_count: table.rows.len(),
            limited_to: table.limited_to,
            columns,
            rows,
            error: table.error.clone(),
        }
    }

    fn status(error: Option<&str>) -> &'static str {
        match error {
            None => "success",
            Some(error) if error.contains("TIMEOUT") => "timeout",
            Some(_) => "error",
        }
    }

    /// Анализирует структуру таблицы для JSON
    fn analyze_table_structure(columns: &[String], rows: &[Row]) -> (Vec<ColumnInfo>, Vec<RowData>) {
        let column_info = columns
            .iter()
            .enumerate()
            .map(|(i, oid)| ColumnInfo {
                oid: oid.clone(),
                value_count: rows
                    .iter()
                    .filter(|row| row.get(i).is_some_and(|r| !r.is_absent()))
                    .count(),
            })
            .collect();

        let formatted_rows = rows
            .iter()
            .map(|row| RowData {
                index: Self::index_of_row(columns, row),
                cells: row.iter().map(format_cell).collect(),
            })
            .collect();

        (column_info, formatted_rows)
    }

    /// Индекс строки тем же правилом, что и при выравнивании колонок
    fn index_of_row(columns: &[String], row: &Row) -> Option<String> {
        let base = columns.first()?;
        let record = row.first()?;
        row_index(base, &record.oid).flatten().map(str::to_owned)
    }

    /// Извлекает ошибки из результата
    fn extract_errors(result: &MonitoringResult) -> Vec<ErrorInfo> {
        let mut errors = Vec::new();

        // Ошибки скаляров
        for scalar in &result.scalars {
            if let Some(ref error) = scalar.error {
                errors.push(ErrorInfo {
                    item_type: "scalar".to_string(),
                    item_name: scalar.name.clone(),
                    error_message: error.clone(),
                });
            }
        }

        // Ошибки таблиц
        for table in &result.tables {
            if let Some(ref error) = table.error {
                errors.push(ErrorInfo {
                    item_type: "table".to_string(),
                    item_name: table.name.clone(),
                    error_message: error.clone(),
                });
            }
        }

        errors
    }

    /// Сериализует результат в JSON строку
    pub fn to_json_string(result: &MonitoringResult) -> anyhow::Result<String> {
        let json_result = Self::format_monitoring_result(result);
        serde_json::to_string_pretty(&json_result)
            .map_err(|e| anyhow::anyhow!("Ошибка сериализации в JSON: {}", e))
    }

    /// Сериализует результат в компактный JSON
    pub fn to_json_compact(result: &MonitoringResult) -> anyhow::Result<String> {
        let json_result = Self::format_monitoring_result(result);
        serde_json::to_string(&json_result)
            .map_err(|e| anyhow::anyhow!("Ошибка сериализации в JSON: {}", e))
    }
}

fn format_cell(record: &Record) -> CellData {
    CellData {
        oid: record.oid.clone(),
        kind: record.kind.clone(),
        value: value_to_json(record.value.as_ref()),
    }
}

/// Приводит значение к JSON: числа, массивы байтов, строки, `null`
pub fn value_to_json(value: Option<&Value>) -> serde_json::Value {
    match value {
        None => serde_json::Value::Null,
        Some(Value::Integer(n)) => i64::try_from(*n)
            .map(|n| json!(n))
            .or_else(|_| u64::try_from(*n).map(|n| json!(n)))
            .unwrap_or_else(|_| json!(n.to_string())),
        Some(Value::Bits(bytes)) | Some(Value::Bytes(bytes)) => json!(bytes),
        Some(Value::String(s)) => json!(s),
    }
}
