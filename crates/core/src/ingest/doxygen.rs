//! Reader for Doxygen `search/*.js` data files.
//!
//! The files hold a single JavaScript assignment:
//!
//! ```text
//! var searchData=
//! [
//!   ['abs',['abs',['../group__Math.html#ga4e',1,'abs(const T &amp;x):&#160;Math.tpp'], ...]],
//!   ...
//! ];
//! ```
//!
//! Each row is `[key, [name, [target, flag, label], ...]]`. The lowercase key
//! is dropped (the index normalizes names itself) and the flag is ignored.

use crate::error::{QuickSearchError, Result};
use quicksearch_api::{Category, RecordEntry, SymbolRecord};

/// Separator Doxygen puts between a signature and its declaring file.
const FILE_SEPARATOR: &str = ":\u{a0}";

/// Array nesting accepted by the reader. searchData itself uses four levels.
const MAX_DEPTH: usize = 32;

#[derive(Debug, Clone, PartialEq)]
enum JsValue {
    Str(String),
    Num(i64),
    Array(Vec<JsValue>),
}

impl JsValue {
    fn as_str(&self) -> Option<&str> {
        match self {
            JsValue::Str(s) => Some(s),
            _ => None,
        }
    }

    fn as_array(&self) -> Option<&[JsValue]> {
        match self {
            JsValue::Array(items) => Some(items),
            _ => None,
        }
    }
}

/// Parse one search data file into records.
///
/// Syntax errors fail the whole file. Rows with an unexpected shape are kept
/// as nameless (or entry-less) records so the index builder rejects and
/// counts them like any other malformed record.
pub fn parse_search_data(text: &str, category: Option<&Category>) -> Result<Vec<SymbolRecord>> {
    let value = Parser::new(text).parse_document()?;
    let rows = value
        .as_array()
        .ok_or_else(|| QuickSearchError::Parsing("search data is not an array".to_string()))?;

    Ok(rows.iter().map(|row| row_to_record(row, category)).collect())
}

fn row_to_record(row: &JsValue, category: Option<&Category>) -> SymbolRecord {
    let Some(item) = row
        .as_array()
        .and_then(|cols| cols.get(1))
        .and_then(JsValue::as_array)
    else {
        return SymbolRecord::new("", Vec::new());
    };

    let Some(name) = item.first().and_then(JsValue::as_str) else {
        return SymbolRecord::new("", Vec::new());
    };
    let display_name = decode_entities(name);

    let entries = item[1..]
        .iter()
        .filter_map(|link| {
            let link = link.as_array()?;
            let target = link.first()?.as_str()?;
            let label = link.get(2).and_then(JsValue::as_str).unwrap_or("");
            let mut entry = label_to_entry(target, label);
            if let Some(category) = category {
                entry = entry.with_category(category.clone());
            }
            Some(entry)
        })
        .collect();

    SymbolRecord::new(display_name, entries)
}

fn label_to_entry(target: &str, label: &str) -> RecordEntry {
    let decoded = decode_entities(label);
    let (qualified, file) = match decoded.rsplit_once(FILE_SEPARATOR) {
        Some((qualified, file)) => (qualified.to_string(), Some(file.to_string())),
        None => (decoded, None),
    };

    let signature = signature_of(&qualified).unwrap_or(&qualified).to_string();
    let entry = RecordEntry::new(qualified, target, signature);
    match file {
        Some(file) => entry.with_file(file),
        None => entry,
    }
}

/// Parameter list of a declaration label, starting at its opening paren.
fn signature_of(qualified: &str) -> Option<&str> {
    // `operator()` carries its own parens before the parameter list.
    let search_from = qualified
        .find("operator()")
        .map(|pos| pos + "operator()".len())
        .unwrap_or(0);
    let open = qualified[search_from..].find('(')? + search_from;
    Some(&qualified[open..])
}

/// Decode the HTML entities Doxygen emits in names and labels.
/// Unknown entities are kept verbatim.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .filter(|end| *end <= 10)
            .and_then(|end| decode_entity(&tail[1..end]).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse::<u32>().ok()?,
            };
            char::from_u32(value)
        }
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            depth: 0,
        }
    }

    /// `var <ident> = <value>;` or a bare `<value>`.
    fn parse_document(&mut self) -> Result<JsValue> {
        self.skip_ws();
        if self.rest().starts_with("var")
            && self.rest()[3..].starts_with(|c: char| c.is_whitespace())
        {
            self.pos += 3;
            self.skip_ws();
            let ident_len = self
                .rest()
                .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
                .unwrap_or(self.rest().len());
            if ident_len == 0 {
                return Err(self.error("expected identifier after 'var'"));
            }
            self.pos += ident_len;
            self.skip_ws();
            self.expect('=')?;
        }

        let value = self.parse_value()?;
        self.skip_ws();
        if self.peek() == Some(';') {
            self.pos += 1;
            self.skip_ws();
        }
        if self.pos != self.src.len() {
            return Err(self.error("trailing content"));
        }
        Ok(value)
    }

    fn parse_value(&mut self) -> Result<JsValue> {
        self.skip_ws();
        match self.peek() {
            Some('[') => self.parse_array(),
            Some(quote @ ('\'' | '"')) => self.parse_string(quote).map(JsValue::Str),
            Some(c) if c == '-' || c.is_ascii_digit() => self.parse_number(),
            Some(c) => Err(self.error(&format!("unexpected character '{}'", c))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_array(&mut self) -> Result<JsValue> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.depth += 1;
        let value = self.parse_array_items();
        self.depth -= 1;
        value
    }

    fn parse_array_items(&mut self) -> Result<JsValue> {
        self.expect('[')?;
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(']') {
                self.pos += 1;
                return Ok(JsValue::Array(items));
            }
            items.push(self.parse_value()?);
            self.skip_ws();
            match self.peek() {
                Some(',') => self.pos += 1,
                Some(']') => {}
                _ => return Err(self.error("expected ',' or ']'")),
            }
        }
    }

    fn parse_string(&mut self, quote: char) -> Result<String> {
        self.expect(quote)?;
        let mut out = String::new();
        let mut chars = self.rest().char_indices();

        while let Some((offset, c)) = chars.next() {
            match c {
                c if c == quote => {
                    self.pos += offset + c.len_utf8();
                    return Ok(out);
                }
                '\\' => {
                    let Some((_, escaped)) = chars.next() else {
                        break;
                    };
                    match escaped {
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        'u' => {
                            let hex: String = chars.by_ref().take(4).map(|(_, c)| c).collect();
                            let ch = u32::from_str_radix(&hex, 16)
                                .ok()
                                .and_then(char::from_u32)
                                .ok_or_else(|| self.error("invalid \\u escape"))?;
                            out.push(ch);
                        }
                        other => out.push(other),
                    }
                }
                c => out.push(c),
            }
        }
        Err(self.error("unterminated string"))
    }

    fn parse_number(&mut self) -> Result<JsValue> {
        let rest = self.rest();
        let sign = usize::from(rest.starts_with('-'));
        let len = rest[sign..]
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len() - sign)
            + sign;
        let value = rest[..len]
            .parse::<i64>()
            .map_err(|e| self.error(&format!("invalid number: {}", e)))?;
        self.pos += len;
        Ok(JsValue::Num(value))
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn expect(&mut self, c: char) -> Result<()> {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", c)))
        }
    }

    fn error(&self, message: &str) -> QuickSearchError {
        let line = self.src[..self.pos].matches('\n').count() + 1;
        QuickSearchError::Parsing(format!("search data line {}: {}", line, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"var searchData=
[
  ['abs',['abs',['../group__MathFunctions.html#ga4ec6',1,'abs(const std::array&lt; T, d &gt; &amp;x):&#160;MathOperators_array.tpp'],['../group__MathFunctions.html#gaa2bd',1,'abs(const std::vector&lt; T &gt; &amp;x):&#160;MathOperators_vector.tpp']]],
  ['activateallnodes',['activateAllNodes',['../classbitpit_1_1RBFKernel.html#a9b11',1,'bitpit::RBFKernel']]],
  ['at',['at',['../classbitpit_1_1PiercedStorage.html#a474e',1,'bitpit::PiercedStorage::at(id_t id, std::size_t k=0)']]]
];
"#;

    #[test]
    fn test_parse_sample() {
        let records = parse_search_data(SAMPLE, Some(&Category::FUNCTIONS)).unwrap();
        assert_eq!(records.len(), 3);

        let abs = &records[0];
        assert_eq!(abs.display_name, "abs");
        assert_eq!(abs.entries.len(), 2);
        assert_eq!(abs.entries[0].target, "../group__MathFunctions.html#ga4ec6");
        assert_eq!(abs.entries[0].qualified_name, "abs(const std::array< T, d > &x)");
        assert_eq!(abs.entries[0].signature_label, "(const std::array< T, d > &x)");
        assert_eq!(abs.entries[0].file.as_deref(), Some("MathOperators_array.tpp"));
        assert_eq!(abs.entries[1].file.as_deref(), Some("MathOperators_vector.tpp"));
        assert_eq!(abs.entries[0].category, Some(Category::FUNCTIONS));

        let scoped = &records[1].entries[0];
        assert_eq!(records[1].display_name, "activateAllNodes");
        assert_eq!(scoped.qualified_name, "bitpit::RBFKernel");
        assert_eq!(scoped.signature_label, "bitpit::RBFKernel");
        assert_eq!(scoped.file, None);

        assert_eq!(
            records[2].entries[0].signature_label,
            "(id_t id, std::size_t k=0)"
        );
    }

    #[test]
    fn test_bad_rows_become_rejectable_records() {
        let text = "var searchData=[ ['x', 42], ['y',['y', 'not-a-link']] ];";
        let records = parse_search_data(text, None).unwrap();

        assert_eq!(records.len(), 2);
        assert!(records[0].display_name.is_empty());
        assert_eq!(records[1].display_name, "y");
        assert!(records[1].entries.is_empty());
    }

    #[test]
    fn test_syntax_errors_fail_the_file() {
        assert!(parse_search_data("var searchData=[ ['abs', ", None).is_err());
        assert!(parse_search_data("var indexSections = { 0: 'abc' };", None).is_err());
        assert!(parse_search_data("[] trailing", None).is_err());
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let text = "[".repeat(100_000);
        let err = parse_search_data(&text, None).unwrap_err();
        assert!(err.to_string().contains("nesting too deep"));

        let text = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(parse_search_data(&text, None).is_ok());
    }

    #[test]
    fn test_string_escapes() {
        let records =
            parse_search_data(r"[['k',['it\'s',['t\\u',1,'café']]]]", None).unwrap();
        assert_eq!(records[0].display_name, "it's");
        assert_eq!(records[0].entries[0].target, r"t\u");
        assert_eq!(records[0].entries[0].qualified_name, "café");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &lt; b &amp;&amp; c"), "a < b && c");
        assert_eq!(decode_entities("x&#160;y&#x41;"), "x\u{a0}yA");
        assert_eq!(decode_entities("R&D; &unknown; &"), "R&D; &unknown; &");
    }

    #[test]
    fn test_signature_of_call_operator() {
        assert_eq!(signature_of("Functor::operator()(int a)"), Some("(int a)"));
        assert_eq!(signature_of("bitpit::utils"), None);
    }
}
