use std::fmt;

use smallvec::SmallVec;

use crate::error::{LandingError, LandingResult};

/// Attribute condition inside a compound selector (`[name]`, `[name="v"]`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeCondition {
    Exists { name: String },
    Equals { name: String, value: String },
    StartsWith { name: String, value: String },
    EndsWith { name: String, value: String },
    Contains { name: String, value: String },
}

impl AttributeCondition {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Exists { name }
            | Self::Equals { name, .. }
            | Self::StartsWith { name, .. }
            | Self::EndsWith { name, .. }
            | Self::Contains { name, .. } => name,
        }
    }

    /// Evaluates the condition against an attribute value (`None` when absent).
    #[must_use]
    pub fn matches(&self, actual: Option<&str>) -> bool {
        let Some(actual) = actual else {
            return false;
        };
        match self {
            Self::Exists { .. } => true,
            Self::Equals { value, .. } => actual == value,
            Self::StartsWith { value, .. } => !value.is_empty() && actual.starts_with(value),
            Self::EndsWith { value, .. } => !value.is_empty() && actual.ends_with(value),
            Self::Contains { value, .. } => !value.is_empty() && actual.contains(value.as_str()),
        }
    }
}

impl fmt::Display for AttributeCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exists { name } => write!(f, "[{name}]"),
            Self::Equals { name, value } => write!(f, "[{name}=\"{}\"]", escape_quoted(value)),
            Self::StartsWith { name, value } => {
                write!(f, "[{name}^=\"{}\"]", escape_quoted(value))
            }
            Self::EndsWith { name, value } => write!(f, "[{name}$=\"{}\"]", escape_quoted(value)),
            Self::Contains { name, value } => write!(f, "[{name}*=\"{}\"]", escape_quoted(value)),
        }
    }
}

/// One compound selector: `tag#id.class[attr]` without combinators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundSelector {
    pub tag: Option<String>,
    pub universal: bool,
    pub id: Option<String>,
    pub classes: SmallVec<[String; 2]>,
    pub attributes: SmallVec<[AttributeCondition; 1]>,
}

impl CompoundSelector {
    #[must_use]
    pub fn id_only(&self) -> Option<&str> {
        if !self.universal
            && self.tag.is_none()
            && self.classes.is_empty()
            && self.attributes.is_empty()
        {
            self.id.as_deref()
        } else {
            None
        }
    }

    /// Returns `true` when an element with the provided facts satisfies this compound.
    pub fn matches<'a>(
        &self,
        tag: &str,
        id: Option<&str>,
        has_class: impl Fn(&str) -> bool,
        attribute: impl Fn(&str) -> Option<&'a str>,
    ) -> bool {
        if let Some(expected) = &self.tag {
            if !expected.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(expected) = &self.id {
            if id != Some(expected.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|class| has_class(class)) {
            return false;
        }
        self.attributes
            .iter()
            .all(|condition| condition.matches(attribute(condition.name())))
    }
}

impl fmt::Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.universal {
            f.write_str("*")?;
        }
        if let Some(tag) = &self.tag {
            f.write_str(tag)?;
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        for attribute in &self.attributes {
            write!(f, "{attribute}")?;
        }
        Ok(())
    }
}

/// Comma-separated list of compound selectors.
///
/// This is the subset of CSS the controller needs to bind page regions. It is
/// parsed once at startup so `MemoryDom` can match it and browser hosts can
/// hand the canonical text back to `querySelectorAll`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: SmallVec<[CompoundSelector; 1]>,
}

impl Selector {
    pub fn parse(input: &str) -> LandingResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid(input, "selector is empty"));
        }

        let mut alternatives = SmallVec::new();
        for part in split_top_level_commas(trimmed) {
            alternatives.push(parse_compound(input, part.trim())?);
        }
        Ok(Self { alternatives })
    }

    /// Builds `#id` for a fragment identifier without going through the parser.
    pub fn id(id: &str) -> LandingResult<Self> {
        if !is_valid_ident(id) {
            return Err(invalid(id, "not a valid identifier"));
        }
        Ok(Self::from_compound(CompoundSelector {
            id: Some(id.to_owned()),
            ..CompoundSelector::default()
        }))
    }

    /// Builds `[name="value"]` appended to `self` (used for control lookups).
    #[must_use]
    pub fn with_attribute_equals(&self, name: &str, value: &str) -> Self {
        let alternatives = self
            .alternatives
            .iter()
            .cloned()
            .map(|mut compound| {
                compound.attributes.push(AttributeCondition::Equals {
                    name: name.to_owned(),
                    value: value.to_owned(),
                });
                compound
            })
            .collect();
        Self { alternatives }
    }

    #[must_use]
    pub fn from_compound(compound: CompoundSelector) -> Self {
        let mut alternatives = SmallVec::new();
        alternatives.push(compound);
        Self { alternatives }
    }

    #[must_use]
    pub fn alternatives(&self) -> &[CompoundSelector] {
        &self.alternatives
    }

    /// Returns the id when the selector is exactly one `#id` compound.
    #[must_use]
    pub fn as_id(&self) -> Option<&str> {
        match self.alternatives.as_slice() {
            [single] => single.id_only(),
            _ => None,
        }
    }

    pub fn matches<'a>(
        &self,
        tag: &str,
        id: Option<&str>,
        has_class: impl Fn(&str) -> bool,
        attribute: impl Fn(&str) -> Option<&'a str>,
    ) -> bool {
        self.alternatives
            .iter()
            .any(|compound| compound.matches(tag, id, &has_class, &attribute))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, compound) in self.alternatives.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{compound}")?;
        }
        Ok(())
    }
}

fn invalid(selector: &str, reason: &str) -> LandingError {
    LandingError::InvalidSelector {
        selector: selector.to_owned(),
        reason: reason.to_owned(),
    }
}

fn split_top_level_commas(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0usize;
    let mut quote: Option<u8> = None;
    let mut bracket_depth = 0usize;
    for (index, byte) in input.bytes().enumerate() {
        match (quote, byte) {
            (Some(open), b) if b == open => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(byte),
            (None, b'[') => bracket_depth += 1,
            (None, b']') => bracket_depth = bracket_depth.saturating_sub(1),
            (None, b',') if bracket_depth == 0 => {
                parts.push(&input[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts
}

fn parse_compound(full: &str, part: &str) -> LandingResult<CompoundSelector> {
    if part.is_empty() {
        return Err(invalid(full, "empty selector in list"));
    }

    let bytes = part.as_bytes();
    let mut i = 0usize;
    let mut compound = CompoundSelector::default();

    while i < bytes.len() {
        match bytes[i] {
            b'*' => {
                if compound.universal || compound.tag.is_some() || i != 0 {
                    return Err(invalid(full, "misplaced universal selector"));
                }
                compound.universal = true;
                i += 1;
            }
            b'#' => {
                let (ident, next) = parse_ident(part, i + 1)
                    .ok_or_else(|| invalid(full, "expected identifier after `#`"))?;
                if compound.id.replace(ident).is_some() {
                    return Err(invalid(full, "duplicate id"));
                }
                i = next;
            }
            b'.' => {
                let (ident, next) = parse_ident(part, i + 1)
                    .ok_or_else(|| invalid(full, "expected class name after `.`"))?;
                compound.classes.push(ident);
                i = next;
            }
            b'[' => {
                let (condition, next) = parse_attribute_condition(full, part, i)?;
                compound.attributes.push(condition);
                i = next;
            }
            b if b.is_ascii_whitespace() || matches!(b, b'>' | b'+' | b'~') => {
                return Err(invalid(full, "combinators are not supported"));
            }
            b':' => return Err(invalid(full, "pseudo-classes are not supported")),
            _ => {
                if i != 0 {
                    return Err(invalid(full, "tag name must come first"));
                }
                let (tag, next) =
                    parse_ident(part, i).ok_or_else(|| invalid(full, "unexpected character"))?;
                compound.tag = Some(tag.to_ascii_lowercase());
                i = next;
            }
        }
    }

    Ok(compound)
}

// Bytes >= 0x80 belong to non-ASCII code points, which CSS allows in identifiers.
fn is_ident_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' || byte >= 0x80
}

fn is_valid_ident(input: &str) -> bool {
    matches!(parse_ident(input, 0), Some((_, end)) if end == input.len())
}

fn parse_ident(src: &str, start: usize) -> Option<(String, usize)> {
    let bytes = src.as_bytes();
    let first = *bytes.get(start)?;
    // CSS identifiers cannot start with a digit.
    if first.is_ascii_digit() || !is_ident_char(first) {
        return None;
    }
    let mut end = start;
    while end < bytes.len() && is_ident_char(bytes[end]) {
        end += 1;
    }
    Some((src[start..end].to_owned(), end))
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

fn parse_attribute_condition(
    full: &str,
    src: &str,
    open_bracket: usize,
) -> LandingResult<(AttributeCondition, usize)> {
    let bytes = src.as_bytes();
    let mut i = skip_whitespace(bytes, open_bracket + 1);

    let name_start = i;
    while i < bytes.len() && (is_ident_char(bytes[i]) || bytes[i] == b':') {
        i += 1;
    }
    if name_start == i {
        return Err(invalid(full, "expected attribute name"));
    }
    let name = src[name_start..i].to_ascii_lowercase();

    i = skip_whitespace(bytes, i);
    match bytes.get(i) {
        Some(b']') => return Ok((AttributeCondition::Exists { name }, i + 1)),
        None => return Err(invalid(full, "unterminated attribute selector")),
        _ => {}
    }

    let (operator, next) = match (bytes.get(i), bytes.get(i + 1)) {
        (Some(b'='), _) => (b'=', i + 1),
        (Some(op @ (b'^' | b'$' | b'*')), Some(b'=')) => (*op, i + 2),
        _ => return Err(invalid(full, "unsupported attribute operator")),
    };

    i = skip_whitespace(bytes, next);
    let (value, next) = parse_attribute_value(full, src, i)?;
    i = skip_whitespace(bytes, next);
    if bytes.get(i) != Some(&b']') {
        return Err(invalid(full, "unterminated attribute selector"));
    }

    let condition = match operator {
        b'^' => AttributeCondition::StartsWith { name, value },
        b'$' => AttributeCondition::EndsWith { name, value },
        b'*' => AttributeCondition::Contains { name, value },
        _ => AttributeCondition::Equals { name, value },
    };
    Ok((condition, i + 1))
}

fn parse_attribute_value(full: &str, src: &str, start: usize) -> LandingResult<(String, usize)> {
    let bytes = src.as_bytes();
    match bytes.get(start) {
        Some(&(quote @ (b'"' | b'\''))) => {
            let mut value = String::new();
            let mut i = start + 1;
            while i < bytes.len() {
                match bytes[i] {
                    b'\\' if i + 1 < bytes.len() => {
                        let escaped = src[i + 1..]
                            .chars()
                            .next()
                            .ok_or_else(|| invalid(full, "dangling escape"))?;
                        value.push(escaped);
                        i += 1 + escaped.len_utf8();
                    }
                    b if b == quote => return Ok((value, i + 1)),
                    _ => {
                        let ch = src[i..]
                            .chars()
                            .next()
                            .ok_or_else(|| invalid(full, "invalid utf-8 boundary"))?;
                        value.push(ch);
                        i += ch.len_utf8();
                    }
                }
            }
            Err(invalid(full, "unterminated quoted value"))
        }
        Some(_) => parse_ident(src, start)
            .ok_or_else(|| invalid(full, "expected attribute value")),
        None => Err(invalid(full, "expected attribute value")),
    }
}

fn escape_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
