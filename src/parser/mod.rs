//! Разбор текстового вывода snmpget/snmpwalk/snmpbulkwalk в записи
//!
//! Каждый текст (вывод одной команды для одного запрошенного OID) разбирается
//! в колонку записей, затем колонки сводятся в таблицу по индексу строки.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

pub mod constants;
pub mod table;
pub mod tokenizer;
pub mod value_parser;

pub use table::{Row, Table};
pub use tokenizer::{TokenCursor, tokenize};
pub use value_parser::{Decoded, Value, ValueParser};

use crate::error::ParseError;

/// OID: числовой `1.3.6.1` или символьный `IF-MIB::ifDescr.1`
static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9.]+|(?:[A-Za-z][\w-]*::)?[A-Za-z][\w-]*(?:\.[0-9]+)*)$").unwrap()
});

/// Одна разобранная запись `OID = TYPE: value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub oid: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Option<Value>,
}

impl Record {
    pub fn new(oid: impl Into<String>, kind: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            oid: oid.into(),
            kind: kind.into(),
            value,
        }
    }

    /// Заглушка для строки, которой нет в колонке
    pub fn absent(oid: impl Into<String>) -> Self {
        Self::new(oid, constants::ABSENT, None)
    }

    pub fn is_absent(&self) -> bool {
        self.kind == constants::ABSENT
    }
}

/// Разбирает вывод команд, по одному тексту на каждый запрошенный OID
#[derive(Debug, Clone)]
pub struct Parser {
    oids: Vec<String>,
}

impl Parser {
    pub fn new<I, S>(oids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            oids: oids.into_iter().map(Into::into).collect(),
        }
    }

    /// Разбирает все тексты и сводит колонки в таблицу
    pub fn parse<S: AsRef<str>>(&self, texts: &[S]) -> Result<Table, ParseError> {
        if texts.len() != self.oids.len() {
            return Err(ParseError::ColumnCount {
                expected: self.oids.len(),
                actual: texts.len(),
            });
        }

        let columns = texts
            .iter()
            .map(|text| parse_column(text.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        table::table(&self.oids, columns)
    }
}

/// Разбирает вывод одной команды в упорядоченную колонку записей
pub fn parse_column(text: &str) -> Result<Vec<Record>, ParseError> {
    let mut tokens = TokenCursor::new(tokenize(text));
    let mut records = Vec::new();

    while let Some(token) = tokens.next() {
        match parse_next_object(token, &mut tokens)? {
            Some(record) => records.push(record),
            None => break,
        }
    }

    tracing::debug!("Parsed {} records", records.len());
    Ok(records)
}

/// Разбирает одну запись; `None` означает конец MIB-дерева
fn parse_next_object(
    token: String,
    tokens: &mut TokenCursor,
) -> Result<Option<Record>, ParseError> {
    let oid = token.strip_prefix('.').unwrap_or(&token);
    if !IDENTIFIER.is_match(oid) {
        return Err(ParseError::MalformedRecord {
            token: token.clone(),
            reason: "expected an object identifier",
        });
    }
    let oid = oid.to_owned();

    match tokens.next() {
        Some(equals) if equals == "=" => {}
        Some(other) => {
            return Err(ParseError::MalformedRecord {
                token: other,
                reason: "expected '=' after the object identifier",
            });
        }
        None => return Err(ParseError::UnexpectedEnd { oid }),
    }

    let next_token = tokens
        .next()
        .ok_or_else(|| ParseError::UnexpectedEnd { oid: oid.clone() })?;
    let kind = ValueParser::type_tag(&next_token).map(str::to_owned);

    match ValueParser::find(kind.as_deref(), &next_token).parse(
        &oid,
        kind.as_deref(),
        next_token,
        tokens,
    )? {
        Decoded::Value { kind, value } => Ok(Some(Record { oid, kind, value })),
        Decoded::Stop => Ok(None),
    }
}
