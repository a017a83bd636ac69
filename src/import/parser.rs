use std::{iter::Peekable, str::Chars};

pub type Row = Vec<String>;

/// Splits delimited text into rows of raw string fields.
///
/// Commas separate fields and `\n` ends a row; `\r` outside quotes is
/// dropped. A `"` opens a quoted section in which commas and newlines are
/// literal and `""` stands for a single quote. An unterminated quote swallows
/// the rest of the input into the current field instead of failing.
pub struct RowScanner<'a> {
    chars: Peekable<Chars<'a>>,
    finished: bool,
}

impl<'a> RowScanner<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            chars: content.chars().peekable(),
            finished: false,
        }
    }
}

impl Iterator for RowScanner<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let mut row = Row::new();
        let mut field = String::new();
        let mut in_quotes = false;

        while let Some(ch) = self.chars.next() {
            if in_quotes {
                if ch == '"' {
                    if self.chars.next_if_eq(&'"').is_some() {
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    field.push(ch);
                }
                continue;
            }
            match ch {
                '"' => in_quotes = true,
                ',' => row.push(std::mem::take(&mut field)),
                '\n' => {
                    row.push(field);
                    return Some(row);
                }
                '\r' => {}
                _ => field.push(ch),
            }
        }

        self.finished = true;
        // last line without a trailing newline
        if !field.is_empty() || !row.is_empty() {
            row.push(field);
            Some(row)
        } else {
            None
        }
    }
}

pub fn parse(content: &str) -> Vec<Row> {
    RowScanner::new(content).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> Vec<Row> {
        rows.iter()
            .map(|row| row.iter().map(|f| f.to_string()).collect())
            .collect()
    }

    #[test]
    fn empty_input_has_no_rows() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn plain_table_round_trips() {
        let expected = table(&[
            &["Fecha factura", "Cliente", "Monto total de factura"],
            &["Nov-22", "Acme SA", "2.500.000"],
            &["", "Beta", ""],
        ]);
        let text = expected
            .iter()
            .map(|row| row.join(","))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(parse(&text), expected);
        // trailing newline does not add a row
        assert_eq!(parse(&format!("{text}\n")), expected);
    }

    #[test]
    fn quoted_fields_keep_delimiters_and_quotes() {
        let rows = parse("name,note\r\n\"a,b\"\"c\",\"line1\nline2\"\r\n");
        assert_eq!(
            rows,
            table(&[&["name", "note"], &["a,b\"c", "line1\nline2"]])
        );
    }

    #[test]
    fn quotes_can_open_mid_field() {
        assert_eq!(parse("ab\"c,d\"e"), table(&[&["abc,de"]]));
    }

    #[test]
    fn unterminated_quote_absorbs_remainder() {
        let rows = parse("a,\"b,c\nd,e\nf");
        assert_eq!(rows, table(&[&["a", "b,c\nd,e\nf"]]));
    }

    #[test]
    fn empty_lines_become_single_empty_field() {
        assert_eq!(parse("a\n\nb"), table(&[&["a"], &[""], &["b"]]));
        assert_eq!(parse("a,\n"), table(&[&["a", ""]]));
    }

    #[test]
    fn scanner_is_lazy() {
        let mut scanner = RowScanner::new("h1,h2\nx,y\n");
        assert_eq!(scanner.next(), Some(vec!["h1".to_string(), "h2".to_string()]));
        assert_eq!(scanner.next(), Some(vec!["x".to_string(), "y".to_string()]));
        assert_eq!(scanner.next(), None);
        assert_eq!(scanner.next(), None);
    }
}
