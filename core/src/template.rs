/*!
Message templates.

Templates are text with `{Name}` holes that sinks fill with positional parameters. Literal braces are written as `{{` and `}}`.

Descriptions passed to timers are often built from interpolated values, like stringified records, which can contain braces that would otherwise be mistaken for holes. [`escape_braces`] doubles those braces while leaving genuine holes alone.
*/

use core::fmt;
use std::borrow::Cow;

use crate::value::Value;

/**
Double any braces in `text` that don't belong to a hole.

Text is scanned for spans that start at a `{` and end where the braces balance out again. A span that contains a space is treated as literal text, like a stringified record, and has every brace in it doubled. A span without spaces is treated as a hole and left as-is. A span that never balances is doubled through to the end of the input. Lone `}` characters outside of a span are left as-is.

Escaping is a single pass. Escaping already escaped text will double its braces again.
*/
pub fn escape_braces(text: &str) -> Cow<'_, str> {
    if !text.contains('{') {
        return Cow::Borrowed(text);
    }

    let bytes = text.as_bytes();
    let mut escaped = String::with_capacity(text.len() + 8);
    let mut i = 0;

    while i < bytes.len() {
        let Some(open) = text[i..].find('{') else {
            escaped.push_str(&text[i..]);
            break;
        };

        let start = i + open;
        escaped.push_str(&text[i..start]);

        let mut depth = 1usize;
        let mut end = start + 1;

        while depth > 0 && end < bytes.len() {
            match bytes[end] {
                b'{' => depth += 1,
                b'}' => depth -= 1,
                _ => (),
            }

            end += 1;
        }

        let span = &text[start..end];

        // An unbalanced span runs to the end of the input and is always escaped
        if depth > 0 || span.contains(' ') {
            double_braces(span, &mut escaped);
        } else {
            escaped.push_str(span);
        }

        i = end;
    }

    Cow::Owned(escaped)
}

fn double_braces(span: &str, escaped: &mut String) {
    for c in span.chars() {
        match c {
            '{' => escaped.push_str("{{"),
            '}' => escaped.push_str("}}"),
            c => escaped.push(c),
        }
    }
}

/**
Lower-case the first character of `text` so it reads naturally after a prefix like `Started `.

Text that's empty, or that starts with a character that isn't upper-case, is returned unchanged.
*/
pub fn lowercase_first(text: &str) -> Cow<'_, str> {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) if first.is_uppercase() => {
            let mut lowered = String::with_capacity(text.len());
            lowered.extend(first.to_lowercase());
            lowered.push_str(chars.as_str());

            Cow::Owned(lowered)
        }
        _ => Cow::Borrowed(text),
    }
}

/**
A parsed message template.
*/
#[derive(Clone)]
pub struct Template<'a> {
    parts: Vec<Part<'a>>,
}

/**
A fragment of a [`Template`].
*/
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Part<'a> {
    Text(&'a str),
    Hole(&'a str),
}

impl<'a> Template<'a> {
    /**
    Parse a template.

    Parsing never fails. Braces that don't form a valid hole are kept as text.
    */
    pub fn parse(tpl: &'a str) -> Self {
        let bytes = tpl.as_bytes();
        let mut parts = Vec::new();
        let mut text_start = 0;
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'{' if bytes.get(i + 1) == Some(&b'{') => {
                    // Keep the first brace, drop the second
                    push_text(&mut parts, &tpl[text_start..=i]);
                    i += 2;
                    text_start = i;
                }
                b'}' if bytes.get(i + 1) == Some(&b'}') => {
                    push_text(&mut parts, &tpl[text_start..=i]);
                    i += 2;
                    text_start = i;
                }
                b'{' => {
                    let label_start = i + 1;
                    let close = tpl[label_start..]
                        .find(|c: char| c == '{' || c == '}')
                        .map(|offset| label_start + offset);

                    match close {
                        Some(close) if bytes[close] == b'}' && is_label(&tpl[label_start..close]) => {
                            push_text(&mut parts, &tpl[text_start..i]);
                            parts.push(Part::Hole(&tpl[label_start..close]));

                            i = close + 1;
                            text_start = i;
                        }
                        _ => i += 1,
                    }
                }
                _ => i += 1,
            }
        }

        push_text(&mut parts, &tpl[text_start..]);

        Template { parts }
    }

    pub fn parts(&self) -> &[Part<'a>] {
        &self.parts
    }

    /**
    The labels of holes in the template, in the order they appear.
    */
    pub fn holes(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.parts.iter().filter_map(|part| match part {
            Part::Hole(label) => Some(*label),
            Part::Text(_) => None,
        })
    }

    /**
    Render the template, filling holes with `params`.

    Holes with a numeric label like `{0}` are filled by index. Other holes are filled in the order they appear. Holes without a matching parameter are written back out as `{Label}`.
    */
    pub fn render<'b>(&'b self, params: &'b [Value]) -> Render<'b> {
        Render {
            tpl: &self.parts,
            params,
        }
    }
}

fn push_text<'a>(parts: &mut Vec<Part<'a>>, text: &'a str) {
    if !text.is_empty() {
        parts.push(Part::Text(text));
    }
}

fn is_label(label: &str) -> bool {
    !label.is_empty() && !label.chars().any(char::is_whitespace)
}

/**
The result of [`Template::render`].
*/
pub struct Render<'b> {
    tpl: &'b [Part<'b>],
    params: &'b [Value],
}

impl<'b> fmt::Display for Render<'b> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut next = 0;

        for part in self.tpl {
            match part {
                Part::Text(text) => f.write_str(text)?,
                Part::Hole(label) => {
                    // Format specifiers like `{Elapsed:g}` don't take part in matching
                    let name = label.split(':').next().unwrap_or(label);

                    let index = match name.parse::<usize>() {
                        Ok(index) => index,
                        Err(_) => {
                            next += 1;
                            next - 1
                        }
                    };

                    match self.params.get(index) {
                        Some(value) => fmt::Display::fmt(value, f)?,
                        None => write!(f, "{{{}}}", label)?,
                    }
                }
            }
        }

        Ok(())
    }
}

impl<'b> fmt::Debug for Render<'b> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_string(), f)
    }
}

/**
Parse and render `tpl` with `params` into a string.
*/
pub fn render(tpl: &str, params: &[Value]) -> String {
    Template::parse(tpl).render(params).to_string()
}
