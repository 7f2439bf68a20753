//! Сведение колонок в таблицу по индексу строки
//!
//! Строки определяются только первой колонкой: остальные колонки разрежены
//! относительно нее и не могут добавить или переставить строки.

use std::collections::{HashMap, HashSet};

use super::Record;
use crate::error::ParseError;

pub type Row = Vec<Record>;
pub type Table = Vec<Row>;

/// Одна запись для одного OID отдается как есть, остальное выравнивается
pub fn table(oids: &[String], columns: Vec<Vec<Record>>) -> Result<Table, ParseError> {
    if columns.len() == 1 && columns.iter().all(|column| column.len() == 1) {
        return Ok(columns);
    }
    align(oids, &columns)
}

/// Выравнивает колонки по индексам первой колонки, заполняя пропуски `absent`
pub fn align(oids: &[String], columns: &[Vec<Record>]) -> Result<Table, ParseError> {
    let Some(first_oid) = oids.first() else {
        return Ok(Vec::new());
    };

    let mut seen = HashSet::new();
    let mut indexes = Vec::new();
    for record in columns.first().into_iter().flatten() {
        let index = index_using_first_oid(first_oid, record)?;
        if seen.insert(index) {
            indexes.push(index);
        }
    }

    // При повторе OID в выводе побеждает последняя запись
    let lookup: HashMap<&str, &Record> = columns
        .iter()
        .flatten()
        .map(|record| (record.oid.as_str(), record))
        .collect();

    let rows = indexes
        .iter()
        .map(|&index| {
            oids.iter()
                .map(|base| lookup_cell(&lookup, base, index))
                .collect()
        })
        .collect();

    Ok(rows)
}

fn index_using_first_oid<'a>(base: &str, record: &'a Record) -> Result<Option<&'a str>, ParseError> {
    row_index(base, &record.oid).ok_or_else(|| ParseError::AlignmentMismatch {
        oid: record.oid.clone(),
        base: base.to_owned(),
    })
}

/// Индекс строки `oid` относительно колонки `base`
///
/// `None`: OID не из этой колонки; `Some(None)`: OID совпадает с базой.
pub fn row_index<'a>(base: &str, oid: &'a str) -> Option<Option<&'a str>> {
    if let Some(index) = strip_base(oid, base) {
        return Some(index);
    }

    // Запросили MODULE::name, а команда ответила без модуля
    if oid.contains("::") {
        return None;
    }
    short_name(base).and_then(|name| strip_base(oid, name))
}

/// `Some(None)` для точного совпадения, `Some(Some(index))` для `base.index`
fn strip_base<'a>(oid: &'a str, base: &str) -> Option<Option<&'a str>> {
    if oid == base {
        return Some(None);
    }
    oid.strip_prefix(base)?.strip_prefix('.').map(Some)
}

fn short_name(base: &str) -> Option<&str> {
    base.split_once("::").map(|(_, name)| name)
}

fn join(base: &str, index: Option<&str>) -> String {
    match index {
        Some(index) => format!("{base}.{index}"),
        None => base.to_owned(),
    }
}

fn lookup_cell(lookup: &HashMap<&str, &Record>, base: &str, index: Option<&str>) -> Record {
    let oid = join(base, index);

    lookup
        .get(oid.as_str())
        .or_else(|| {
            short_name(base).and_then(|name| lookup.get(join(name, index).as_str()))
        })
        .map(|record| (*record).clone())
        .unwrap_or_else(|| Record::absent(oid))
}

#[cfg(test)]
mod tests {
    use super::super::{Parser, Value};
    use super::*;

    fn string(oid: &str, value: &str) -> Record {
        Record::new(oid, "STRING", Some(Value::from(value)))
    }

    #[test]
    fn test_row_index() {
        assert_eq!(row_index("1.2.3", "1.2.3.4.5"), Some(Some("4.5")));
        assert_eq!(row_index("1.2.3", "1.2.3"), Some(None));
        assert_eq!(row_index("1.2.3", "1.2.34"), None);
        assert_eq!(row_index("IF-MIB::ifDescr", "ifDescr.2"), Some(Some("2")));
        assert_eq!(row_index("IF-MIB::ifDescr", "IF-MIB::ifDescr.3"), Some(Some("3")));
        assert_eq!(row_index("IF-MIB::ifDescr", "OTHER-MIB::ifDescr.3"), None);
    }

    #[test]
    fn test_fills_in_missing_entries() {
        let texts = [
            ".1.2.3.4.1 = \"a\"\n.1.2.3.4.2 = \"b\"\n.1.2.3.4.3 = \"c\"\n.1.2.3.4.4 = \"d\"\n",
            ".1.2.3.5.1 = \"p\"\n.1.2.3.5.3 = \"q\"\n",
            ".1.2.3.6.1 = \"w\"\n.1.2.3.6.2 = \"x\"\n.1.2.3.6.4 = \"z\"\n",
        ];
        let parser = Parser::new(["1.2.3.4", "1.2.3.5", "1.2.3.6"]);

        let expected = vec![
            vec![
                string("1.2.3.4.1", "a"),
                string("1.2.3.5.1", "p"),
                string("1.2.3.6.1", "w"),
            ],
            vec![
                string("1.2.3.4.2", "b"),
                Record::absent("1.2.3.5.2"),
                string("1.2.3.6.2", "x"),
            ],
            vec![
                string("1.2.3.4.3", "c"),
                string("1.2.3.5.3", "q"),
                Record::absent("1.2.3.6.3"),
            ],
            vec![
                string("1.2.3.4.4", "d"),
                Record::absent("1.2.3.5.4"),
                string("1.2.3.6.4", "z"),
            ],
        ];

        assert_eq!(parser.parse(&texts).unwrap(), expected);
    }

    #[test]
    fn test_first_column_defines_rows() {
        let texts = [
            ".1.2.3.4.2 = INTEGER: 2\n.1.2.3.4.1 = INTEGER: 1\n",
            ".1.2.3.5.1 = INTEGER: 10\n.1.2.3.5.9 = INTEGER: 90\n",
        ];
        let table = Parser::new(["1.2.3.4", "1.2.3.5"]).parse(&texts).unwrap();

        let oids: Vec<Vec<&str>> = table
            .iter()
            .map(|row| row.iter().map(|r| r.oid.as_str()).collect())
            .collect();
        assert_eq!(
            oids,
            vec![vec!["1.2.3.4.2", "1.2.3.5.2"], vec!["1.2.3.4.1", "1.2.3.5.1"]]
        );
        assert!(table[0][1].is_absent());
    }

    #[test]
    fn test_exact_base_match_gives_single_row() {
        let texts = [
            ".1.3.6.1.2.1.1.5.0 = STRING: \"router1\"\n",
            ".1.3.6.1.2.1.1.6.0 = STRING: \"lab\"\n",
        ];
        let table = Parser::new(["1.3.6.1.2.1.1.5.0", "1.3.6.1.2.1.1.6.0"])
            .parse(&texts)
            .unwrap();
        assert_eq!(
            table,
            vec![vec![
                string("1.3.6.1.2.1.1.5.0", "router1"),
                string("1.3.6.1.2.1.1.6.0", "lab"),
            ]]
        );
    }

    #[test]
    fn test_unavailable_column() {
        let texts = [
            ".1.3.6.1.2.1.47.1.1.1.1.4.1001 = INTEGER: 0\n.1.3.6.1.2.1.47.1.1.1.1.4.1002 = INTEGER: 1001\n",
            ".1.3.6.1.2.1.47.1.1.1.1.7.1001 = STRING: \"1\"\n.1.3.6.1.2.1.47.1.1.1.1.7.1002 = STRING: \"WS-C2960-24TT-L - Fixed Module 0\"\n",
            ".1.3.6.1.4.1.9.9.92.1.1.1.5 = No Such Object available on this agent at this OID\n",
        ];
        let parser = Parser::new([
            "1.3.6.1.2.1.47.1.1.1.1.4",
            "1.3.6.1.2.1.47.1.1.1.1.7",
            "1.3.6.1.4.1.9.9.92.1.1.1.5",
        ]);

        let values: Vec<Vec<Option<Value>>> = parser
            .parse(&texts)
            .unwrap()
            .into_iter()
            .map(|row| row.into_iter().map(|r| r.value).collect())
            .collect();

        assert_eq!(
            values,
            vec![
                vec![Some(Value::Integer(0)), Some(Value::from("1")), None],
                vec![
                    Some(Value::Integer(1001)),
                    Some(Value::from("WS-C2960-24TT-L - Fixed Module 0")),
                    None
                ],
            ]
        );
    }

    #[test]
    fn test_mismatched_identifier() {
        let texts = [".1.9.9.9 = INTEGER: 1\n", ".1.5.6.7.1 = INTEGER: 2\n"];
        let err = Parser::new(["1.2.3.4", "1.5.6.7"]).parse(&texts).unwrap_err();
        assert!(matches!(
            err,
            ParseError::AlignmentMismatch { oid, base } if oid == "1.9.9.9" && base == "1.2.3.4"
        ));
    }

    #[test]
    fn test_prefix_without_delimiter_is_a_mismatch() {
        let texts = [".1.2.3.45 = INTEGER: 1\n.1.2.3.46 = INTEGER: 2\n"];
        let err = Parser::new(["1.2.3.4"]).parse(&texts).unwrap_err();
        assert!(matches!(err, ParseError::AlignmentMismatch { .. }));
    }

    #[test]
    fn test_module_prefix_is_optional_in_responses() {
        let texts = [
            "ifDescr.1 = STRING: eth0\nifDescr.2 = STRING: eth1\n",
            "ifType.1 = INTEGER: 6\n",
        ];
        let table = Parser::new(["IF-MIB::ifDescr", "IF-MIB::ifType"])
            .parse(&texts)
            .unwrap();

        assert_eq!(
            table,
            vec![
                vec![
                    string("ifDescr.1", "eth0"),
                    Record::new("ifType.1", "INTEGER", Some(Value::Integer(6))),
                ],
                vec![
                    string("ifDescr.2", "eth1"),
                    Record::absent("IF-MIB::ifType.2"),
                ],
            ]
        );
    }

    #[test]
    fn test_symbolic_response_to_numeric_request_is_a_mismatch() {
        let texts = ["IF-MIB::ifDescr.1 = STRING: eth0\nIF-MIB::ifDescr.2 = STRING: eth1\n"];
        let err = Parser::new(["1.3.6.1.2.1.2.2.1.2"]).parse(&texts).unwrap_err();
        assert!(matches!(err, ParseError::AlignmentMismatch { .. }));
    }

    #[test]
    fn test_duplicate_indexes_collapse() {
        let texts = [".1.2.3.1 = INTEGER: 1\n.1.2.3.1 = INTEGER: 2\n.1.2.3.2 = INTEGER: 3\n"];
        let table = Parser::new(["1.2.3"]).parse(&texts).unwrap();
        assert_eq!(table.len(), 2);
        // последняя запись с тем же OID побеждает
        assert_eq!(table[0][0].value, Some(Value::Integer(2)));
    }

    #[test]
    fn test_empty_walk() {
        let texts = [format!(
            ".1.2.3 = {}\n",
            super::super::constants::NO_MORE_VARIABLES_STR
        )];
        let table = Parser::new(["1.2.3"]).parse(&texts).unwrap();
        assert!(table.is_empty());
    }
}
