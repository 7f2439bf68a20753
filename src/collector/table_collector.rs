use super::types::TableResult;
use super::error_message;
use crate::config::{AppConfig, TableProfile};
use crate::snmp::{Reader, SnmpOpen};

/// Сколько строк таблицы оставлять, если в профиле не указано
pub const DEFAULT_TABLE_LIMIT: usize = 50;

/// Модуль для сбора табличных SNMP данных
pub struct TableCollector;

impl TableCollector {
    /// Собирает все таблицы из конфигурации
    pub async fn collect_tables<R: Reader>(
        snmp: &SnmpOpen<R>,
        config: &AppConfig,
    ) -> Vec<TableResult> {
        let mut results = Vec::new();

        for (table_name, table) in &config.profile.tables {
            let result = Self::collect_single_table(snmp, table_name, table, config).await;
            results.push(result);
        }

        results
    }

    /// Собирает данные из одной таблицы
    pub async fn collect_single_table<R: Reader>(
        snmp: &SnmpOpen<R>,
        table_name: &str,
        table: &TableProfile,
        config: &AppConfig,
    ) -> TableResult {
        let limit = table.limit.unwrap_or(DEFAULT_TABLE_LIMIT);

        match snmp.walk(table.columns.as_slice(), &config.walk_options()).await {
            Ok(rows) => {
                tracing::debug!("Table {}: {} rows", table_name, rows.len());
                TableResult {
                    name: table_name.to_string(),
                    columns: table.columns.clone(),
                    rows: rows.into_iter().take(limit).collect(),
                    error: None,
                    limited_to: Some(limit),
                }
            }
            Err(e) => {
                tracing::warn!("Table {} failed: {}", table_name, e);
                TableResult {
                    name: table_name.to_string(),
                    columns: table.columns.clone(),
                    rows: Vec::new(),
                    error: Some(error_message(&e)),
                    limited_to: Some(limit),
                }
            }
        }
    }
}
