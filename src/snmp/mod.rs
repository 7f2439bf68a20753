//! Получение вывода snmp-команд и его разбор
//!
//! `Reader` отдает сырой stdout команды для одного OID (из процесса или из
//! файла), `SnmpOpen` собирает выводы по всем OID и передает их парсеру.

use async_trait::async_trait;

pub mod command_reader;
pub mod file_reader;
pub mod oid;
pub mod options;

pub use command_reader::CommandReader;
pub use file_reader::FileReader;
pub use oid::{is_symbolic, parse_oid};
pub use options::{Options, SnmpOption};

use crate::error::{CommandError, SnmpError};
use crate::parser::{Parser, Row, Table};

/// Команда net-snmp
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnmpCommand {
    Get,
    Walk,
    BulkWalk,
    /// Любая другая программа, имя передается как есть
    Other(String),
}

impl SnmpCommand {
    /// Короткое имя, оно же имя каталога фикстур
    pub fn name(&self) -> &str {
        match self {
            SnmpCommand::Get => "get",
            SnmpCommand::Walk => "walk",
            SnmpCommand::BulkWalk => "bulkwalk",
            SnmpCommand::Other(name) => name,
        }
    }

    pub fn program(&self) -> String {
        match self {
            SnmpCommand::Other(name) => name.clone(),
            _ => format!("snmp{}", self.name()),
        }
    }
}

/// Источник сырого вывода команды
#[async_trait]
pub trait Reader: Send + Sync {
    async fn capture(
        &self,
        command: &SnmpCommand,
        oid: &str,
        extra: &[(String, String)],
    ) -> Result<String, CommandError>;
}

/// Параметры walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// snmpbulkwalk вместо snmpwalk
    pub bulk: bool,
    pub non_repeaters: u32,
    pub max_repetitions: u32,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            bulk: true,
            non_repeaters: 0,
            max_repetitions: 10,
        }
    }
}

impl WalkOptions {
    fn command(&self) -> SnmpCommand {
        if self.bulk {
            SnmpCommand::BulkWalk
        } else {
            SnmpCommand::Walk
        }
    }

    fn extra(&self) -> Vec<(String, String)> {
        if self.bulk {
            vec![
                ("-Cn".to_owned(), self.non_repeaters.to_string()),
                ("-Cr".to_owned(), self.max_repetitions.to_string()),
            ]
        } else {
            Vec::new()
        }
    }
}

/// get/walk поверх snmp-команд командной строки
#[derive(Debug, Clone)]
pub struct SnmpOpen<R = CommandReader> {
    reader: R,
}

impl<R: Reader> SnmpOpen<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// snmpget по каждому OID; одна запись на OID, в порядке запроса
    pub async fn get<S: AsRef<str>>(&self, oids: &[S]) -> Result<Row, SnmpError> {
        let texts = self.capture_all(&SnmpCommand::Get, oids, &[]).await?;
        let table = Parser::new(oids.iter().map(|oid| oid.as_ref())).parse(texts.as_slice())?;
        Ok(table.into_iter().next().unwrap_or_default())
    }

    /// walk по каждому OID-колонке, строки выровнены по индексу первой колонки
    pub async fn walk<S: AsRef<str>>(
        &self,
        oids: &[S],
        options: &WalkOptions,
    ) -> Result<Table, SnmpError> {
        let texts = self
            .capture_all(&options.command(), oids, &options.extra())
            .await?;
        let table = Parser::new(oids.iter().map(|oid| oid.as_ref())).parse(texts.as_slice())?;
        Ok(table)
    }

    async fn capture_all<S: AsRef<str>>(
        &self,
        command: &SnmpCommand,
        oids: &[S],
        extra: &[(String, String)],
    ) -> Result<Vec<String>, CommandError> {
        let mut texts = Vec::with_capacity(oids.len());
        for oid in oids {
            texts.push(self.reader.capture(command, oid.as_ref(), extra).await?);
        }
        Ok(texts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Record, Value};
    use std::collections::HashMap;

    /// Reader с ответами из памяти
    struct StaticReader(HashMap<String, String>);

    #[async_trait]
    impl Reader for StaticReader {
        async fn capture(
            &self,
            command: &SnmpCommand,
            oid: &str,
            _extra: &[(String, String)],
        ) -> Result<String, CommandError> {
            self.0
                .get(&format!("{}/{}", command.name(), oid))
                .cloned()
                .ok_or_else(|| CommandError::Failed(format!("no output for {oid}")))
        }
    }

    fn snmp(entries: &[(&str, &str)]) -> SnmpOpen<StaticReader> {
        SnmpOpen::new(StaticReader(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ))
    }

    #[test]
    fn test_command_names() {
        assert_eq!(SnmpCommand::BulkWalk.program(), "snmpbulkwalk");
        assert_eq!(SnmpCommand::Get.name(), "get");
        assert_eq!(SnmpCommand::Other("blah".into()).program(), "blah");
    }

    #[test]
    fn test_walk_options() {
        let options = WalkOptions::default();
        assert_eq!(options.command(), SnmpCommand::BulkWalk);
        assert_eq!(options.extra().len(), 2);

        let options = WalkOptions {
            bulk: false,
            ..Default::default()
        };
        assert_eq!(options.command(), SnmpCommand::Walk);
        assert!(options.extra().is_empty());
    }

    #[tokio::test]
    async fn test_get() {
        let snmp = snmp(&[
            ("get/1.3.6.1.2.1.1.5.0", ".1.3.6.1.2.1.1.5.0 = STRING: \"router1\"\n"),
            (
                "get/1.3.6.1.2.1.1.4.0",
                ".1.3.6.1.2.1.1.4.0 = No Such Object available on this agent at this OID\n",
            ),
        ]);

        let row = snmp
            .get(&["1.3.6.1.2.1.1.5.0", "1.3.6.1.2.1.1.4.0"])
            .await
            .unwrap();
        assert_eq!(
            row,
            vec![
                Record::new("1.3.6.1.2.1.1.5.0", "STRING", Some(Value::from("router1"))),
                Record::new("1.3.6.1.2.1.1.4.0", "No Such Object", None),
            ]
        );
    }

    #[tokio::test]
    async fn test_walk() {
        let snmp = snmp(&[
            ("bulkwalk/1.2.3.4", ".1.2.3.4.1 = INTEGER: 1\n.1.2.3.4.2 = INTEGER: 2\n"),
            ("bulkwalk/1.2.3.5", ".1.2.3.5.2 = Gauge32: 20\n"),
        ]);

        let table = snmp
            .walk(&["1.2.3.4", "1.2.3.5"], &WalkOptions::default())
            .await
            .unwrap();
        assert_eq!(table.len(), 2);
        assert!(table[0][1].is_absent());
        assert_eq!(table[1][1].value, Some(Value::Integer(20)));
    }

    #[tokio::test]
    async fn test_command_error_aborts() {
        let snmp = snmp(&[("walk/1.2.3.4", ".1.2.3.4.1 = INTEGER: 1\n")]);
        let options = WalkOptions {
            bulk: false,
            ..Default::default()
        };

        let err = snmp.walk(&["1.2.3.4", "1.2.3.5"], &options).await.unwrap_err();
        assert!(matches!(err, SnmpError::Command(CommandError::Failed(_))));
    }

    #[tokio::test]
    async fn test_parse_error_aborts() {
        let snmp = snmp(&[("get/1.2.3", "not an snmp output\n")]);
        let err = snmp.get(&["1.2.3"]).await.unwrap_err();
        assert!(matches!(err, SnmpError::Parse(_)));
    }
}
