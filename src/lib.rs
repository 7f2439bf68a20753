//! Разбор текстового вывода net-snmp (snmpget, snmpwalk, snmpbulkwalk)
//! в выровненные таблицы записей `OID = TYPE: value`

pub mod collector;
pub mod config;
pub mod error;
pub mod formatter;
pub mod parser;
pub mod snmp;

pub use error::{CommandError, ParseError, SnmpError};
pub use parser::{Parser, Record, Row, Table, Value};
pub use snmp::{CommandReader, FileReader, Reader, SnmpCommand, SnmpOpen, WalkOptions};
