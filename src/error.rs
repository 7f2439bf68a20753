use std::path::PathBuf;

use thiserror::Error;

/// Ошибки разбора вывода snmp-команд и выравнивания колонок
#[derive(Debug, Error)]
pub enum ParseError {
    /// Токен не похож на OID или после OID нет `=`
    #[error("Parse error at {token}: {reason}")]
    MalformedRecord { token: String, reason: &'static str },

    /// Токены закончились посреди записи
    #[error("Unexpected end of output after {oid}")]
    UnexpectedEnd { oid: String },

    /// Значение не удалось привести к типу
    #[error("Invalid {kind} value for {oid}: {token}")]
    InvalidValue {
        oid: String,
        kind: String,
        token: String,
    },

    #[error("Received identifier {oid} does not start with the requested identifier {base}")]
    AlignmentMismatch { oid: String, base: String },

    #[error("Expected {expected} outputs (one per requested OID), got {actual}")]
    ColumnCount { expected: usize, actual: usize },
}

/// Ошибки запуска snmp-команды (или чтения фикстуры)
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Unknown MIB: {0}")]
    UnknownMib(String),

    #[error("Unknown OID: {0}")]
    UnknownOid(String),

    #[error("{0}")]
    Timeout(String),

    #[error("{0}")]
    Failed(String),

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CommandError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, CommandError::Timeout(_))
    }
}

/// Общая ошибка get/walk
#[derive(Debug, Error)]
pub enum SnmpError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SnmpError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, SnmpError::Command(e) if e.is_timeout())
    }
}
