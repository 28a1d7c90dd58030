//! Hierarchical input blocks
//!
//! The input language is line-oriented: `key = value` entries and nested
//! blocks delimited by `:start name:` / `:stop name:`. A parsed block is an
//! `Input` node; nested blocks are themselves `Input` nodes, so a shape
//! definition can carry another shape definition inside it to arbitrary
//! depth.
//!
//! Extraction is typed. Absence (`NotFound`) is recoverable and distinct
//! from a present-but-unreadable value (`Malformed`); see `InputError`.

use crate::InputError;

#[derive(Debug, Clone, PartialEq)]
enum Item {
    Entry { key: String, value: String },
    Block(Input),
}

/// A named configuration block: ordered scalar entries plus nested blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    name: String,
    items: Vec<Item>,
}

impl Input {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Delimiter name of this block (e.g. "shape").
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Builder: add a `key = value` entry.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.push(Item::Entry {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Builder: add a nested block.
    pub fn with_block(mut self, block: Input) -> Self {
        self.items.push(Item::Block(block));
        self
    }

    // ========== Typed extraction ==========

    /// Raw text of the first entry with this key.
    pub fn get_string(&self, key: &str) -> Result<&str, InputError> {
        self.items
            .iter()
            .find_map(|item| match item {
                Item::Entry { key: k, value } if k == key => Some(value.as_str()),
                _ => None,
            })
            .ok_or_else(|| InputError::not_found(key))
    }

    /// Whitespace-separated real numbers under this key.
    pub fn get_floats(&self, key: &str) -> Result<Vec<f64>, InputError> {
        let raw = self.get_string(key)?;
        raw.split_whitespace()
            .map(|tok| {
                tok.parse::<f64>()
                    .map_err(|_| InputError::malformed(key, format!("'{tok}' is not a number")))
            })
            .collect()
    }

    /// A single real number under this key.
    pub fn get_float(&self, key: &str) -> Result<f64, InputError> {
        let values = self.get_floats(key)?;
        match values.as_slice() {
            [v] => Ok(*v),
            other => Err(InputError::malformed(
                key,
                format!("expected 1 number, got {}", other.len()),
            )),
        }
    }

    /// Exactly two real numbers under this key.
    pub fn get_float_pair(&self, key: &str) -> Result<(f64, f64), InputError> {
        let values = self.get_floats(key)?;
        match values.as_slice() {
            [a, b] => Ok((*a, *b)),
            other => Err(InputError::malformed(
                key,
                format!("expected 2 numbers, got {}", other.len()),
            )),
        }
    }

    /// Exactly three real numbers under this key.
    pub fn get_float_triple(&self, key: &str) -> Result<(f64, f64, f64), InputError> {
        let values = self.get_floats(key)?;
        match values.as_slice() {
            [a, b, c] => Ok((*a, *b, *c)),
            other => Err(InputError::malformed(
                key,
                format!("expected 3 numbers, got {}", other.len()),
            )),
        }
    }

    /// Borrow the first nested block with this delimiter name.
    pub fn block(&self, name: &str) -> Option<&Input> {
        self.items.iter().find_map(|item| match item {
            Item::Block(b) if b.name == name => Some(b),
            _ => None,
        })
    }

    /// Remove and return the first nested block with this delimiter name.
    ///
    /// At most one block per requested type is honored; any duplicates stay
    /// behind and are ignored by well-formed consumers.
    pub fn take_block(&mut self, name: &str) -> Option<Input> {
        let pos = self.items.iter().position(
            |item| matches!(item, Item::Block(b) if b.name == name),
        )?;
        match self.items.remove(pos) {
            Item::Block(b) => Some(b),
            Item::Entry { .. } => unreachable!("position matched a block"),
        }
    }

    // ========== Parsing ==========

    /// Parse a single top-level block from text.
    ///
    /// Comments start with `#` and run to end of line. The text must contain
    /// exactly one top-level `:start name:` ... `:stop name:` block.
    pub fn parse(text: &str) -> Result<Input, InputError> {
        let mut stack: Vec<Input> = Vec::new();
        let mut root: Option<Input> = None;

        for (idx, raw_line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = strip_comment(raw_line).trim();
            if line.is_empty() {
                continue;
            }

            if let Some(name) = delimiter(line, "start") {
                if root.is_some() && stack.is_empty() {
                    return Err(InputError::Syntax {
                        line: line_no,
                        reason: "more than one top-level block".into(),
                    });
                }
                stack.push(Input::new(name));
                continue;
            }

            if let Some(name) = delimiter(line, "stop") {
                let block = stack.pop().ok_or_else(|| InputError::Syntax {
                    line: line_no,
                    reason: format!(":stop {name}: without matching :start:"),
                })?;
                if block.name != name {
                    return Err(InputError::Syntax {
                        line: line_no,
                        reason: format!(":stop {name}: closes :start {}:", block.name),
                    });
                }
                match stack.last_mut() {
                    Some(parent) => parent.items.push(Item::Block(block)),
                    None => root = Some(block),
                }
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(InputError::Syntax {
                    line: line_no,
                    reason: format!("expected 'key = value', got '{line}'"),
                });
            };
            let parent = stack.last_mut().ok_or_else(|| InputError::Syntax {
                line: line_no,
                reason: "entry outside any block".into(),
            })?;
            parent.items.push(Item::Entry {
                key: key.trim().to_string(),
                value: value.trim().to_string(),
            });
        }

        if let Some(open) = stack.last() {
            return Err(InputError::Syntax {
                line: text.lines().count(),
                reason: format!("unterminated block '{}'", open.name),
            });
        }
        root.ok_or(InputError::Syntax {
            line: 0,
            reason: "no block found".into(),
        })
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Match `:start name:` / `:stop name:` delimiter lines.
fn delimiter<'a>(line: &'a str, kind: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(':')?.strip_suffix(':')?;
    let name = rest.strip_prefix(kind)?.trim();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
