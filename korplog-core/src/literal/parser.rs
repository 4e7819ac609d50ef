use crate::literal::{Literal, LiteralError};

const MAX_DEPTH: usize = 64;

/// Parses one Python-style literal: dicts, lists, tuples, strings, numbers,
/// `True`/`False`/`None` (and their JSON spellings). Anything else, including
/// trailing input, is an error. Nothing is ever evaluated.
pub fn parse_literal(input: &str) -> Result<Literal, LiteralError> {
    let mut parser = Parser { src: input, pos: 0 };
    let value = parser.value(0)?;

    parser.skip_ws();
    if parser.pos < parser.src.len() {
        return Err(LiteralError::TrailingInput { offset: parser.pos });
    }

    Ok(value)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn expect(&mut self, want: char) -> Result<(), LiteralError> {
        match self.bump() {
            Some(c) if c == want => Ok(()),
            Some(c) => Err(LiteralError::UnexpectedChar {
                found: c,
                offset: self.pos - c.len_utf8(),
            }),
            None => Err(LiteralError::UnexpectedEnd),
        }
    }

    fn value(&mut self, depth: usize) -> Result<Literal, LiteralError> {
        if depth > MAX_DEPTH {
            return Err(LiteralError::TooDeep { limit: MAX_DEPTH });
        }

        self.skip_ws();
        let Some(c) = self.peek() else {
            return Err(LiteralError::UnexpectedEnd);
        };

        match c {
            '{' => self.dict(depth),
            '[' => {
                self.bump();
                self.sequence(']', depth).map(Literal::List)
            }
            '(' => self.paren(depth),
            '\'' | '"' => self.string(false),
            '-' | '+' | '.' | '0'..='9' => self.number(),
            c if c.is_ascii_alphabetic() || c == '_' => self.word(),
            other => Err(LiteralError::UnexpectedChar {
                found: other,
                offset: self.pos,
            }),
        }
    }

    fn dict(&mut self, depth: usize) -> Result<Literal, LiteralError> {
        self.expect('{')?;
        let mut entries = Vec::new();

        loop {
            self.skip_ws();
            if self.peek() == Some('}') {
                self.bump();
                return Ok(Literal::Dict(entries));
            }

            let key = self.value(depth + 1)?;
            self.skip_ws();
            self.expect(':')?;
            let value = self.value(depth + 1)?;
            entries.push((key, value));

            self.skip_ws();
            match self.bump() {
                Some(',') => continue,
                Some('}') => return Ok(Literal::Dict(entries)),
                Some(c) => {
                    return Err(LiteralError::UnexpectedChar {
                        found: c,
                        offset: self.pos - c.len_utf8(),
                    });
                }
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }
    }

    /// Items up to `close`, which has not been consumed yet. Trailing commas
    /// are allowed.
    fn sequence(&mut self, close: char, depth: usize) -> Result<Vec<Literal>, LiteralError> {
        let (items, _) = self.items(close, depth)?;
        Ok(items)
    }

    /// Like `sequence`, also reporting whether any comma was seen.
    fn items(&mut self, close: char, depth: usize) -> Result<(Vec<Literal>, bool), LiteralError> {
        let mut items = Vec::new();
        let mut saw_comma = false;

        loop {
            self.skip_ws();
            if self.peek() == Some(close) {
                self.bump();
                return Ok((items, saw_comma));
            }

            items.push(self.value(depth + 1)?);

            self.skip_ws();
            match self.bump() {
                Some(',') => saw_comma = true,
                Some(c) if c == close => return Ok((items, saw_comma)),
                Some(c) => {
                    return Err(LiteralError::UnexpectedChar {
                        found: c,
                        offset: self.pos - c.len_utf8(),
                    });
                }
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }
    }

    /// `()` and `(x,)` are tuples, `(x)` is just `x`.
    fn paren(&mut self, depth: usize) -> Result<Literal, LiteralError> {
        self.expect('(')?;
        let (mut items, saw_comma) = self.items(')', depth)?;

        if items.len() == 1 && !saw_comma {
            return Ok(items.remove(0));
        }
        Ok(Literal::Tuple(items))
    }

    fn word(&mut self) -> Result<Literal, LiteralError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !c.is_ascii_alphanumeric() && c != '_' {
                break;
            }
            self.pos += 1;
        }
        let src = self.src;
        let word = &src[start..self.pos];

        match word {
            "True" | "true" => Ok(Literal::Bool(true)),
            "False" | "false" => Ok(Literal::Bool(false)),
            "None" | "null" => Ok(Literal::None),
            // String prefixes: u'..', b'..', r'..' and combinations.
            _ if word.len() <= 2
                && word.chars().all(|c| "uUbBrR".contains(c))
                && matches!(self.peek(), Some('\'' | '"')) =>
            {
                self.string(word.contains(['r', 'R']))
            }
            _ => Err(LiteralError::UnknownName {
                name: word.to_string(),
                offset: start,
            }),
        }
    }

    fn number(&mut self) -> Result<Literal, LiteralError> {
        let start = self.pos;
        if matches!(self.peek(), Some('-' | '+')) {
            self.bump();
        }

        let mut is_float = false;
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' => {}
                '.' | 'e' | 'E' => is_float = true,
                '-' | '+' if matches!(self.src[..self.pos].chars().last(), Some('e' | 'E')) => {}
                _ => break,
            }
            self.pos += 1;
        }

        let src = self.src;
        let text = &src[start..self.pos];

        // Python 2 long suffix.
        if !is_float && matches!(self.peek(), Some('L' | 'l')) {
            self.bump();
        }

        let invalid = || LiteralError::InvalidNumber {
            text: text.to_string(),
        };

        if is_float {
            text.parse::<f64>().map(Literal::Float).map_err(|_| invalid())
        } else {
            text.parse::<i64>().map(Literal::Int).map_err(|_| invalid())
        }
    }

    fn string(&mut self, raw: bool) -> Result<Literal, LiteralError> {
        let Some(quote) = self.bump() else {
            return Err(LiteralError::UnexpectedEnd);
        };
        let mut out = String::new();

        loop {
            let Some(c) = self.bump() else {
                return Err(LiteralError::UnterminatedString);
            };

            match c {
                c if c == quote => return Ok(Literal::Str(out)),
                '\\' if raw => {
                    // Raw strings keep the backslash, but it still protects a quote.
                    out.push('\\');
                    if let Some(next) = self.bump() {
                        out.push(next);
                    }
                }
                '\\' => self.escape(&mut out)?,
                c => out.push(c),
            }
        }
    }

    fn escape(&mut self, out: &mut String) -> Result<(), LiteralError> {
        let offset = self.pos - 1;
        let Some(c) = self.bump() else {
            return Err(LiteralError::UnterminatedString);
        };

        match c {
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '0' => out.push('\0'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0c}'),
            'v' => out.push('\u{0b}'),
            '\n' => {}
            'x' => out.push(self.hex_escape(2, offset)?),
            'u' => out.push(self.hex_escape(4, offset)?),
            'U' => out.push(self.hex_escape(8, offset)?),
            // Unknown escapes are kept verbatim.
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        Ok(())
    }

    fn hex_escape(&mut self, digits: usize, offset: usize) -> Result<char, LiteralError> {
        let hex = self
            .src
            .get(self.pos..self.pos + digits)
            .ok_or(LiteralError::InvalidEscape { offset })?;

        let code = u32::from_str_radix(hex, 16).map_err(|_| LiteralError::InvalidEscape { offset })?;
        self.pos += digits;

        char::from_u32(code).ok_or(LiteralError::InvalidEscape { offset })
    }
}
