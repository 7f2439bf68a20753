use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::snmp::parse_oid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String, // Название профиля, например "generic-endpoint" или "printer"
    #[serde(default)]
    pub scalars: BTreeMap<String, String>, // Одиночные значения, опрашиваются через snmpget
    #[serde(default)]
    pub tables: BTreeMap<String, TableProfile>, // Таблицы, опрашиваются walk'ом по колонкам
}

/// Таблица профиля: первая колонка задает строки, остальные к ней выравниваются
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableProfile {
    pub columns: Vec<String>,
    /// Сколько строк оставить в результате
    #[serde(default)]
    pub limit: Option<usize>,
}

impl Profile {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Не удалось прочитать файл: {}", path))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let mut profile: Profile =
            serde_yml::from_str(content).context("Не удалось распарсить YAML")?;

        if profile.scalars.is_empty() && profile.tables.is_empty() {
            anyhow::bail!("Профиль '{}' пустой", profile.name);
        }

        for oid in profile.scalars.values_mut() {
            *oid = parse_oid(oid)?;
        }

        for (name, table) in profile.tables.iter_mut() {
            if table.columns.is_empty() {
                anyhow::bail!("Таблица '{}' без колонок", name);
            }
            for oid in table.columns.iter_mut() {
                *oid = parse_oid(oid).with_context(|| format!("Таблица '{}'", name))?;
            }
        }

        Ok(profile)
    }
}
