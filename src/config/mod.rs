use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use tokio::time::Duration;

pub mod profile;
pub mod settings;

pub use profile::{Profile, TableProfile};
pub use settings::Settings;

use crate::snmp::{CommandReader, SnmpOption, WalkOptions};

/// Главная конфигурация приложения
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// SNMP профиль устройства
    pub profile: Profile,
    /// Базовые настройки
    pub settings: Settings,
}

impl AppConfig {
    /// Загружает конфигурацию из YAML файла
    pub fn load(profile_path: impl AsRef<Path>) -> Result<Self> {
        let path = profile_path.as_ref();
        let path = path
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("Путь к профилю не UTF-8: {}", path.display()))?;
        let profile = Profile::load(path)?;
        let settings = Settings::default();

        Ok(Self { profile, settings })
    }

    /// Путь к профилю из переменной окружения или по умолчанию
    pub fn profile_path() -> String {
        env::var("SNMP_PROFILE").unwrap_or_else(|_| "./profiles/generic-endpoint.yaml".to_string())
    }

    /// Каталог с сохраненным выводом команд вместо живого устройства
    pub fn fixtures_dir() -> Option<String> {
        env::var("SNMP_FIXTURES").ok().filter(|s| !s.is_empty())
    }

    /// Получает target из переменной окружения или использует по умолчанию
    pub fn get_target(&self) -> String {
        env::var("SNMP_TARGET").unwrap_or_else(|_| "127.0.0.1:161".to_string())
    }

    /// Получает timeout из переменной окружения или из настроек
    pub fn get_timeout(&self) -> u64 {
        env::var("SNMP_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(self.settings.connection.timeout)
    }

    /// Получает количество повторов из переменной окружения или из настроек
    pub fn get_retries(&self) -> u32 {
        env::var("SNMP_RETRIES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(self.settings.connection.retries)
    }

    /// Получает версию SNMP
    pub fn get_version(&self) -> String {
        env::var("SNMP_VERSION").unwrap_or_else(|_| self.settings.auth.version.clone())
    }

    /// Получает community для SNMPv2c
    pub fn get_community(&self) -> String {
        env::var("SNMP_COMMUNITY").unwrap_or_else(|_| self.settings.auth.v2c.community.clone())
    }

    /// Получает username для SNMPv3
    pub fn get_username(&self) -> String {
        env::var("SNMP_USERNAME").unwrap_or_else(|_| self.settings.auth.v3.username.clone())
    }

    /// Получает auth password для SNMPv3
    pub fn get_auth_password(&self) -> String {
        env::var("SNMP_AUTH_PASSWORD")
            .unwrap_or_else(|_| self.settings.auth.v3.auth_password.clone())
    }

    /// Получает privacy password для SNMPv3
    pub fn get_privacy_password(&self) -> String {
        env::var("SNMP_PRIVACY_PASSWORD")
            .unwrap_or_else(|_| self.settings.auth.v3.privacy_password.clone())
    }

    /// Параметры walk из настроек
    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            bulk: self.settings.connection.bulk,
            non_repeaters: self.settings.connection.non_repeaters,
            max_repetitions: self.settings.connection.max_repetitions,
        }
    }

    /// Собирает CommandReader для текущего target и учетных данных
    pub fn command_reader(&self) -> CommandReader {
        let version = self.get_version();
        let timeout = self.get_timeout();
        let retries = self.get_retries();

        let reader = CommandReader::new(self.get_target())
            .with_option(SnmpOption::Version, version.as_str())
            .with_option(SnmpOption::Timeout, timeout.to_string())
            .with_option(SnmpOption::Retries, retries.to_string())
            .with_timeout(process_timeout(timeout, retries));

        if version == "3" {
            reader
                .with_option(SnmpOption::SecUser, self.get_username())
                .with_option(SnmpOption::SecLevel, self.settings.auth.v3.security_level.as_str())
                .with_option(SnmpOption::AuthProtocol, self.settings.get_auth_protocol())
                .with_option(SnmpOption::AuthPassword, self.get_auth_password())
                .with_option(SnmpOption::PrivProtocol, self.settings.get_privacy_protocol())
                .with_option(SnmpOption::PrivPassword, self.get_privacy_password())
        } else {
            reader.with_option(SnmpOption::Community, self.get_community())
        }
    }

    pub fn debug_config(&self) {
        tracing::info!("Профиль: {}", self.profile.name);
        tracing::info!("Цель: {}", self.get_target());
        tracing::info!("Версия: {}", self.get_version());
        tracing::info!("Таймаут: {}с", self.get_timeout());
        tracing::info!("Скаляров: {}", self.profile.scalars.len());
        tracing::info!("Таблиц: {}", self.profile.tables.len());
    }
}

/// Команда сама повторяет запросы, процесс ждем с запасом
fn process_timeout(timeout: u64, retries: u32) -> Duration {
    Duration::from_secs(
        timeout
            .saturating_mul(u64::from(retries).saturating_add(1))
            .saturating_add(1),
    )
}
