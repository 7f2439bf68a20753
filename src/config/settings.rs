use serde::{Deserialize, Serialize};

/// Базовые настройки приложения
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Настройки подключения
    pub connection: ConnectionSettings,
    /// Настройки аутентификации
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSettings {
    /// Таймаут для SNMP операций (секунды), `-t`
    pub timeout: u64,
    /// Количество повторов при ошибках, `-r`
    pub retries: u32,
    /// snmpbulkwalk вместо snmpwalk
    pub bulk: bool,
    pub non_repeaters: u32,
    pub max_repetitions: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Версия SNMP: "1", "2c" или "3"
    pub version: String,
    /// Настройки SNMPv2c
    pub v2c: SnmpV2cSettings,
    /// Настройки SNMPv3
    pub v3: SnmpV3Settings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnmpV2cSettings {
    /// Community string
    pub community: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnmpV3Settings {
    /// Имя пользователя
    pub username: String,
    /// Пароль аутентификации
    pub auth_password: String,
    /// Пароль шифрования
    pub privacy_password: String,
    /// noAuthNoPriv, authNoPriv или authPriv
    pub security_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            connection: ConnectionSettings {
                timeout: 10,
                retries: 2,
                bulk: true,
                non_repeaters: 0,
                max_repetitions: 10,
            },
            auth: AuthSettings {
                version: "2c".to_string(),
                v2c: SnmpV2cSettings {
                    community: "public".to_string(),
                },
                v3: SnmpV3Settings {
                    username: "myuser".to_string(),
                    auth_password: "myauthpass".to_string(),
                    privacy_password: "myprivpass".to_string(),
                    security_level: "authPriv".to_string(),
                },
            },
        }
    }
}

impl Settings {
    /// Получает протокол аутентификации (всегда SHA1)
    pub fn get_auth_protocol(&self) -> &'static str {
        "SHA"
    }

    /// Получает протокол шифрования (всегда AES128)
    pub fn get_privacy_protocol(&self) -> &'static str {
        "AES"
    }
}
