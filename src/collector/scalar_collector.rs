use super::types::ScalarResult;
use super::error_message;
use crate::config::AppConfig;
use crate::snmp::{Reader, SnmpOpen};

/// Модуль для сбора скалярных SNMP значений
pub struct ScalarCollector;

impl ScalarCollector {
    /// Собирает все скалярные значения из конфигурации
    pub async fn collect_scalars<R: Reader>(
        snmp: &SnmpOpen<R>,
        config: &AppConfig,
    ) -> Vec<ScalarResult> {
        let mut results = Vec::new();

        for (name, oid) in &config.profile.scalars {
            let result = Self::collect_single_scalar(snmp, name, oid).await;
            results.push(result);
        }

        results
    }

    /// Собирает одно скалярное значение
    async fn collect_single_scalar<R: Reader>(
        snmp: &SnmpOpen<R>,
        name: &str,
        oid: &str,
    ) -> ScalarResult {
        match snmp.get(&[oid]).await {
            Ok(row) => ScalarResult {
                name: name.to_string(),
                oid: oid.to_string(),
                record: row.into_iter().next(),
                error: None,
            },
            Err(e) => {
                tracing::warn!("Scalar {} ({}) failed: {}", name, oid, e);
                ScalarResult {
                    name: name.to_string(),
                    oid: oid.to_string(),
                    record: None,
                    error: Some(error_message(&e)),
                }
            }
        }
    }
}
