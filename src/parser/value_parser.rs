use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use super::constants::{
    NO_MORE_VARIABLES_STR, NO_SUCH_INSTANCE, NO_SUCH_INSTANCE_STR, NO_SUCH_OBJECT,
    NO_SUCH_OBJECT_STR, STRING,
};
use super::tokenizer::TokenCursor;
use crate::error::ParseError;

/// Тег типа вида `INTEGER:` или `Hex-STRING:`
static TYPE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z][-A-Za-z0-9]*):$").unwrap());

/// Человекочитаемый хвост Timeticks, например `22:15:11.83`
static DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+:\d\d:\d\d\.\d\d$").unwrap());

/// Метка бита, которую net-snmp печатает после байтов BITS: `linkDown(0)`
static BIT_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][\w-]*\(\d+\)$").unwrap());

/// Декодированное значение
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i128),
    /// Байты BITS, по одному на токен
    Bits(Vec<u8>),
    /// Hex-STRING
    Bytes(Vec<u8>),
    String(String),
}

impl Value {
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bits(b) | Value::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<i128> for Value {
    fn from(n: i128) -> Self {
        Value::Integer(n)
    }
}

/// Результат работы декодера
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Value { kind: String, value: Option<Value> },
    /// Конец MIB-дерева: запись не создается, колонка заканчивается
    Stop,
}

/// Декодер значения, выбирается один раз на запись
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueParser {
    Default,
    Integer,
    Bits,
    HexString,
    Timeticks,
    Stop,
    NoSuchObject,
    NoSuchInstance,
    Other,
}

impl ValueParser {
    /// Выделяет тег типа из токена `Type:`
    pub fn type_tag(token: &str) -> Option<&str> {
        TYPE_TAG
            .captures(token)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Выбирает декодер: сначала по фразе-сентинелу, потом по типу
    pub fn find(kind: Option<&str>, token: &str) -> Self {
        match token {
            NO_SUCH_OBJECT_STR => return ValueParser::NoSuchObject,
            NO_SUCH_INSTANCE_STR => return ValueParser::NoSuchInstance,
            NO_MORE_VARIABLES_STR => return ValueParser::Stop,
            _ => {}
        }

        match kind {
            None => ValueParser::Default,
            Some("INTEGER" | "Gauge32" | "Gauge64" | "Counter32" | "Counter64") => {
                ValueParser::Integer
            }
            Some("BITS") => ValueParser::Bits,
            Some("Hex-STRING") => ValueParser::HexString,
            Some("Timeticks") => ValueParser::Timeticks,
            Some(_) => ValueParser::Other,
        }
    }

    /// Декодирует значение. `token` уже прочитан (тег типа или само значение),
    /// остальное забирается из `tokens`.
    pub fn parse(
        self,
        oid: &str,
        kind: Option<&str>,
        token: String,
        tokens: &mut TokenCursor,
    ) -> Result<Decoded, ParseError> {
        let kind = kind.unwrap_or(STRING).to_owned();

        let value = match self {
            ValueParser::Stop => return Ok(Decoded::Stop),
            ValueParser::NoSuchObject => return Ok(absent_value(NO_SUCH_OBJECT)),
            ValueParser::NoSuchInstance => return Ok(absent_value(NO_SUCH_INSTANCE)),
            ValueParser::Default => Value::String(token),
            ValueParser::Integer => {
                let token = next_token(oid, tokens)?;
                Value::Integer(parse_integer(oid, &kind, &token)?)
            }
            ValueParser::Bits => {
                let mut bytes = Vec::new();
                while let Some(t) = tokens.next_if(|t| is_hex(t, 1..=2)) {
                    bytes.push(hex_byte(oid, &kind, &t)?);
                }
                while tokens.next_if(|t| BIT_LABEL.is_match(t)).is_some() {}
                Value::Bits(bytes)
            }
            ValueParser::HexString => {
                let mut bytes = Vec::new();
                while let Some(t) = tokens.next_if(|t| is_hex(t, 2..=2)) {
                    bytes.push(hex_byte(oid, &kind, &t)?);
                }
                Value::Bytes(bytes)
            }
            ValueParser::Timeticks => {
                let token = next_token(oid, tokens)?;
                let ticks = token.trim_start_matches('(').trim_end_matches(')');
                let value = parse_integer(oid, &kind, ticks)?;

                // С -Ot net-snmp печатает только число, без скобок и хвоста
                if token.starts_with('(') {
                    loop {
                        if DURATION.is_match(&next_token(oid, tokens)?) {
                            break;
                        }
                    }
                }
                Value::Integer(value)
            }
            ValueParser::Other => Value::String(next_token(oid, tokens)?),
        };

        Ok(Decoded::Value {
            kind,
            value: Some(value),
        })
    }
}

fn absent_value(kind: &str) -> Decoded {
    Decoded::Value {
        kind: kind.to_owned(),
        value: None,
    }
}

fn next_token(oid: &str, tokens: &mut TokenCursor) -> Result<String, ParseError> {
    tokens.next().ok_or_else(|| ParseError::UnexpectedEnd {
        oid: oid.to_owned(),
    })
}

fn parse_integer(oid: &str, kind: &str, token: &str) -> Result<i128, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidValue {
        oid: oid.to_owned(),
        kind: kind.to_owned(),
        token: token.to_owned(),
    })
}

fn hex_byte(oid: &str, kind: &str, token: &str) -> Result<u8, ParseError> {
    u8::from_str_radix(token, 16).map_err(|_| ParseError::InvalidValue {
        oid: oid.to_owned(),
        kind: kind.to_owned(),
        token: token.to_owned(),
    })
}

fn is_hex(token: &str, len: std::ops::RangeInclusive<usize>) -> bool {
    len.contains(&token.len()) && token.bytes().all(|b| b.is_ascii_hexdigit())
}
