use regex::Regex;
use std::sync::LazyLock;

use super::constants::SENTINELS;

/// Строка вида `<oid> = STRING:<...>` или `<oid> = Opaque:<...>`
static STRING_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+ = (?:Opaque|STRING):)(.*)$").unwrap());

/// Начало новой записи `<oid> = `. Голое имя без `MODULE::` считается OID
/// только с числовым индексом, иначе `Build = 42` в баннере оборвет строку
static RECORD_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\.?(?:[0-9.]+|[A-Za-z][\w-]*::[A-Za-z][\w-]*(?:\.[0-9]+)*|[A-Za-z][\w-]*(?:\.[0-9]+)+) = ",
    )
    .unwrap()
});

/// Разбивает вывод команды на токены с учетом кавычек
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = normalize(text);

    match shell_words::split(&normalized) {
        Ok(tokens) => tokens,
        Err(e) => {
            // Непарная кавычка: дальше разберемся на уровне записей
            tracing::warn!("Shell splitting failed ({}), falling back to whitespace", e);
            normalized.split_whitespace().map(str::to_owned).collect()
        }
    }
}

/// Приводит вывод к виду, пригодному для shell-разбиения
pub fn normalize(text: &str) -> String {
    let text = text
        .replace("\r\n", "\n")
        .replace("\n\r", "\n")
        .replace('\r', "\n");

    let mut text = quote_strings(&text);
    for phrase in SENTINELS {
        text = text.replace(phrase, &format!("\"{phrase}\""));
    }
    text
}

/// Заключает в кавычки пустые и незакавыченные (в т.ч. многострочные) строки
fn quote_strings(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut lines = text.split('\n').peekable();

    while let Some(line) = lines.next() {
        let Some(caps) = STRING_VALUE.captures(line) else {
            out.push(line.to_owned());
            continue;
        };

        let head = caps.get(1).map_or("", |m| m.as_str());
        let rest = caps.get(2).map_or("", |m| m.as_str());
        let content = rest.strip_prefix(' ').unwrap_or(rest);

        if content.trim().is_empty() {
            out.push(format!("{head} \"\""));
            continue;
        }
        if content.starts_with('"') {
            out.push(line.to_owned());
            continue;
        }

        let mut value = vec![content];
        while let Some(next) = lines.next_if(|l| !RECORD_START.is_match(l)) {
            value.push(next);
        }

        // Пустые строки в конце относятся к выводу, а не к значению
        let trailing = value.iter().rev().take_while(|l| l.trim().is_empty()).count();
        let blanks = value.split_off(value.len() - trailing);

        out.push(format!("{head} \"{}\"", escape(&value.join("\n"))));
        out.extend(blanks.into_iter().map(str::to_owned));
    }

    out.join("\n")
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Курсор по токенам: `peek` не сдвигает позицию, `next` сдвигает
#[derive(Debug, Default)]
pub struct TokenCursor {
    tokens: Vec<String>,
    pos: usize,
}

impl TokenCursor {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn peek(&self) -> Option<&str> {
        self.tokens.get(self.pos).map(String::as_str)
    }

    /// Забирает следующий токен, только если он подходит под условие
    pub fn next_if(&mut self, pred: impl FnOnce(&str) -> bool) -> Option<String> {
        if self.peek().is_some_and(pred) {
            self.next()
        } else {
            None
        }
    }
}

impl Iterator for TokenCursor {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let token = self.tokens.get_mut(self.pos).map(std::mem::take)?;
        self.pos += 1;
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_endings() {
        assert_eq!(normalize("a\r\nb\n\rc\rd"), "a\nb\nc\nd");
    }

    #[test]
    fn test_empty_string_is_quoted() {
        assert_eq!(
            tokenize(".1.2.3 = STRING:\n.1.2.4 = Opaque: \n"),
            vec![".1.2.3", "=", "STRING:", "", ".1.2.4", "=", "Opaque:", ""]
        );
    }

    #[test]
    fn test_unquoted_string_with_spaces() {
        assert_eq!(
            tokenize(".1.2.3 = STRING: Linux router 5.10\n"),
            vec![".1.2.3", "=", "STRING:", "Linux router 5.10"]
        );
    }

    #[test]
    fn test_quoted_string_untouched() {
        assert_eq!(
            tokenize(".1.2.3 = STRING: \"router1\"\n"),
            vec![".1.2.3", "=", "STRING:", "router1"]
        );
    }

    #[test]
    fn test_multiline_unquoted_string() {
        let text = ".1.2.3 = STRING: line one\nline \"two\"\n\n.1.2.4 = INTEGER: 5\n";
        assert_eq!(
            tokenize(text),
            vec![
                ".1.2.3",
                "=",
                "STRING:",
                "line one\nline \"two\"",
                ".1.2.4",
                "=",
                "INTEGER:",
                "5"
            ]
        );
    }

    #[test]
    fn test_continuation_line_with_equals_sign() {
        let text = ".1.3.6.1.2.1.1.1.0 = STRING: ACME Switch\nBuild = 42\nCompiled Tue\n";
        assert_eq!(
            tokenize(text),
            vec![
                ".1.3.6.1.2.1.1.1.0",
                "=",
                "STRING:",
                "ACME Switch\nBuild = 42\nCompiled Tue"
            ]
        );
    }

    #[test]
    fn test_record_start_shapes() {
        assert!(RECORD_START.is_match(".1.2.3 = INTEGER: 1"));
        assert!(RECORD_START.is_match("IF-MIB::ifDescr = STRING: x"));
        assert!(RECORD_START.is_match("ifDescr.1 = STRING: x"));
        assert!(!RECORD_START.is_match("Build = 42"));
    }

    #[test]
    fn test_opaque_keeps_inner_type() {
        assert_eq!(
            tokenize(".1.2.3 = Opaque: Float: 1.5\n"),
            vec![".1.2.3", "=", "Opaque:", "Float: 1.5"]
        );
    }

    #[test]
    fn test_sentinels_become_single_tokens() {
        let text = format!(".1.2.3 = {}\n.1.2.4 = {}\n", SENTINELS[0], SENTINELS[2]);
        assert_eq!(
            tokenize(&text),
            vec![".1.2.3", "=", SENTINELS[0], ".1.2.4", "=", SENTINELS[2]]
        );
    }

    #[test]
    fn test_unbalanced_quote_does_not_fail() {
        let tokens = tokenize(".1.2.3 = \"abc\n");
        assert_eq!(tokens, vec![".1.2.3", "=", "\"abc"]);
    }

    #[test]
    fn test_cursor_peek_and_next() {
        let mut cursor = TokenCursor::new(vec!["a".into(), "b".into()]);
        assert_eq!(cursor.peek(), Some("a"));
        assert_eq!(cursor.next_if(|t| t == "b"), None);
        assert_eq!(cursor.next().as_deref(), Some("a"));
        assert_eq!(cursor.next_if(|t| t == "b").as_deref(), Some("b"));
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.next(), None);
    }
}
