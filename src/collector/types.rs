use crate::parser::{Record, Row};

/// Результат сбора скалярных значений
#[derive(Debug, Clone)]
pub struct ScalarResult {
    pub name: String,
    pub oid: String,
    pub record: Option<Record>,
    pub error: Option<String>,
}

/// Результат сбора таблицы
#[derive(Debug, Clone)]
pub struct TableResult {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    pub error: Option<String>,
    pub limited_to: Option<usize>,
}

/// Полный результат мониторинга устройства
#[derive(Debug, Clone)]
pub struct MonitoringResult {
    pub target: String,
    pub scalars: Vec<ScalarResult>,
    pub tables: Vec<TableResult>,
}
