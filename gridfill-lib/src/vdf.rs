//! Reader for the client's KeyValues text format (`*.vdf`).
//!
//! ```text
//! "UserLocalConfigStore"
//! {
//!     "friends"
//!     {
//!         "PersonaName"    "someone"
//!     }
//! }
//! ```
//!
//! Keys are matched case-insensitively. Platform conditionals such as
//! `[$WIN32]` are accepted and ignored.

/// A value in a KeyValues document: either a string or a nested block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KvValue {
    Text(String),
    Block(KeyValues),
}

/// An ordered list of key/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValues {
    pub entries: Vec<(String, KvValue)>,
}

impl KeyValues {
    /// First value stored under `key` (case-insensitive).
    pub fn get(&self, key: &str) -> Option<&KvValue> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    /// Follow a path of nested block keys and return the text at the end.
    pub fn lookup(&self, path: &[&str]) -> Option<&str> {
        let (last, blocks) = path.split_last()?;
        let mut current = self;
        for key in blocks {
            match current.get(key)? {
                KvValue::Block(inner) => current = inner,
                KvValue::Text(_) => return None,
            }
        }
        match current.get(last)? {
            KvValue::Text(text) => Some(text),
            KvValue::Block(_) => None,
        }
    }

    /// The block under the document's first top-level key.
    pub fn root_block(&self) -> Option<&KeyValues> {
        match self.entries.first() {
            Some((_, KvValue::Block(inner))) => Some(inner),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Str(String),
    Open,
    Close,
}

/// Parse a KeyValues document.
pub fn parse_vdf(input: &str) -> Result<KeyValues, String> {
    let tokens = tokenize(input)?;
    let mut pos = 0;
    let doc = parse_block(&tokens, &mut pos, false)?;
    Ok(doc)
}

/// Persona name from a user's `localconfig.vdf`.
pub fn persona_name(doc: &KeyValues) -> Option<&str> {
    doc.root_block()?
        .lookup(&["friends", "PersonaName"])
        .filter(|name| !name.is_empty())
}

fn parse_block(tokens: &[Token], pos: &mut usize, nested: bool) -> Result<KeyValues, String> {
    let mut block = KeyValues::default();
    loop {
        match tokens.get(*pos) {
            None if nested => return Err("unexpected end of input inside block".to_string()),
            None => return Ok(block),
            Some(Token::Close) if nested => {
                *pos += 1;
                return Ok(block);
            }
            Some(Token::Close) => return Err("unbalanced '}'".to_string()),
            Some(Token::Open) => return Err("block without a key".to_string()),
            Some(Token::Str(key)) => {
                *pos += 1;
                let value = match tokens.get(*pos) {
                    Some(Token::Str(text)) => {
                        *pos += 1;
                        KvValue::Text(text.clone())
                    }
                    Some(Token::Open) => {
                        *pos += 1;
                        KvValue::Block(parse_block(tokens, pos, true)?)
                    }
                    Some(Token::Close) | None => {
                        return Err(format!("key '{}' has no value", key));
                    }
                };
                block.entries.push((key.clone(), value));
            }
        }
    }
}

/// Split the document into quoted/bare strings and braces, dropping
/// comments and conditionals.
fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '{' => {
                chars.next();
                tokens.push(Token::Open);
            }
            '}' => {
                chars.next();
                tokens.push(Token::Close);
            }
            '/' => {
                chars.next();
                if chars.peek() == Some(&'/') {
                    while chars.peek().is_some_and(|&c| c != '\n') {
                        chars.next();
                    }
                } else {
                    return Err("stray '/' outside a string".to_string());
                }
            }
            '[' => {
                // conditional, e.g. [$WIN32]
                while let Some(c) = chars.next() {
                    if c == ']' {
                        break;
                    }
                }
            }
            '"' => {
                chars.next();
                let mut token = String::new();
                let mut closed = false;
                while let Some(c) = chars.next() {
                    match c {
                        '"' => {
                            closed = true;
                            break;
                        }
                        '\\' => match chars.next() {
                            Some('n') => token.push('\n'),
                            Some('t') => token.push('\t'),
                            Some(other) => token.push(other),
                            None => break,
                        },
                        _ => token.push(c),
                    }
                }
                if !closed {
                    return Err("unterminated string".to_string());
                }
                tokens.push(Token::Str(token));
            }
            _ => {
                let mut token = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || matches!(c, '{' | '}' | '"') {
                        break;
                    }
                    token.push(c);
                    chars.next();
                }
                tokens.push(Token::Str(token));
            }
        }
    }

    Ok(tokens)
}
