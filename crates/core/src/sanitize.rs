//! Free-text sanitization: truncate, then HTML-entity-escape.
//!
//! Entities this module emits are recognized on input and treated as the
//! single character they stand for, so `sanitize(sanitize(x)) == sanitize(x)`
//! for any input and limit.

/// Escapes in the order they are matched on input. No entity is a prefix of
/// another.
const ENTITIES: [(char, &str); 6] = [
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
    ('\'', "&#x27;"),
    ('/', "&#x2F;"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit<'a> {
    Entity(&'a str),
    Char(char),
}

/// Splits text into characters, keeping known entities whole.
struct Units<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Units<'a> {
    type Item = Unit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.starts_with('&') {
            for (_, entity) in ENTITIES {
                if self.rest.starts_with(entity) {
                    let (head, tail) = self.rest.split_at(entity.len());
                    self.rest = tail;
                    return Some(Unit::Entity(head));
                }
            }
        }

        let c = self.rest.chars().next()?;
        self.rest = &self.rest[c.len_utf8()..];
        Some(Unit::Char(c))
    }
}

fn units(s: &str) -> Units<'_> {
    Units { rest: s }
}

fn escape(c: char) -> Option<&'static str> {
    ENTITIES
        .iter()
        .find(|(raw, _)| *raw == c)
        .map(|(_, entity)| *entity)
}

/// Truncates `input` to `max_len` characters and escapes `& < > " ' /`.
pub fn sanitize(input: &str, max_len: usize) -> String {
    let mut out = String::with_capacity(input.len().min(max_len.saturating_mul(6)));

    for unit in units(input).take(max_len) {
        match unit {
            Unit::Entity(entity) => out.push_str(entity),
            Unit::Char(c) => match escape(c) {
                Some(entity) => out.push_str(entity),
                None => out.push(c),
            },
        }
    }

    out
}

/// Length in characters, counting each known entity as one.
pub fn display_len(s: &str) -> usize {
    units(s).count()
}
