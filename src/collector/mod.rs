use anyhow::Result;

mod scalar_collector;
mod table_collector;
mod types;

pub use scalar_collector::ScalarCollector;
pub use table_collector::{DEFAULT_TABLE_LIMIT, TableCollector};
pub use types::{MonitoringResult, ScalarResult, TableResult};

use crate::config::AppConfig;
use crate::error::SnmpError;
use crate::snmp::{Reader, SnmpOpen};

/// Коллектор для сбора SNMP данных
pub struct SnmpCollector;

impl SnmpCollector {
    /// Собирает все данные с устройства
    ///
    /// Ошибки отдельных скаляров и таблиц не прерывают сбор, а попадают
    /// в поле `error` соответствующего результата.
    pub async fn collect_all<R: Reader>(
        snmp: &SnmpOpen<R>,
        config: &AppConfig,
    ) -> Result<MonitoringResult> {
        let scalars = ScalarCollector::collect_scalars(snmp, config).await;
        let tables = TableCollector::collect_tables(snmp, config).await;

        Ok(MonitoringResult {
            target: config.get_target(),
            scalars,
            tables,
        })
    }
}

/// Текст ошибки для результата; таймауты помечаются отдельно
pub(crate) fn error_message(error: &SnmpError) -> String {
    if error.is_timeout() {
        format!("TIMEOUT: {}", error)
    } else {
        format!("SNMP ERROR: {}", error)
    }
}
