//! Reverse path templates: the `/bananas/:id/edit` patterns routes are bound
//! under, compiled so they can be rendered back into concrete paths.

use crate::error::ArityError;

/// A value that can stand in for a path parameter.
///
/// Primitives render as their usual string form; composite types implement
/// this to say how they appear in a path (a record rendering as its id, say).
/// Anything else simply does not satisfy the bound.
pub trait ToPath {
    fn to_path(&self) -> String;
}

macro_rules! display_to_path {
    ($($ty:ty),+) => {
        $(
            impl ToPath for $ty {
                fn to_path(&self) -> String {
                    self.to_string()
                }
            }
        )+
    };
}

display_to_path!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, bool, char, String);

impl ToPath for &str {
    fn to_path(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A compiled path pattern with named `:param` tokens.
///
/// A token is a colon followed by one or more characters other than `/` and
/// `*`; a bare colon stays literal. Rendering substitutes positional values
/// left to right and always produces a trailing slash, the convention
/// downstream tooling compares against.
///
/// ```
/// use resourceful::PathTemplate;
///
/// let template = PathTemplate::compile("/bananas/:id/edit");
/// assert_eq!(template.render(&[&1]).unwrap(), "/bananas/1/edit/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    pub fn compile(pattern: &str) -> PathTemplate {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            if c == ':' {
                let mut name = String::new();
                while let Some(&next) = chars.peek() {
                    if next == '/' || next == '*' {
                        break;
                    }
                    name.push(next);
                    chars.next();
                }
                if name.is_empty() {
                    literal.push(':');
                } else {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Param(name));
                }
            } else {
                literal.push(c);
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        PathTemplate {
            source: pattern.to_string(),
            segments,
        }
    }

    /// The pattern this template was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// How many parameter tokens the template has.
    pub fn arity(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Param(_)))
            .count()
    }

    /// Parameter names, in template order.
    pub fn params(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Param(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Substitutes `values` into the template left to right. Extra values are
    /// ignored; too few fail with [`ArityError`]. The result always ends with
    /// a `/`.
    pub fn render(&self, values: &[&dyn ToPath]) -> Result<String, ArityError> {
        let expected = self.arity();
        if values.len() < expected {
            return Err(ArityError {
                template: self.source.clone(),
                expected,
                supplied: values.len(),
            });
        }

        let mut out = String::new();
        let mut next_value = 0;
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Param(_) => {
                    out.push_str(&values[next_value].to_path());
                    next_value += 1;
                }
            }
        }
        if !out.ends_with('/') {
            out.push('/');
        }
        Ok(out)
    }
}
