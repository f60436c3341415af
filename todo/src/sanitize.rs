//! Markup stripping for user supplied text.
//!
//! [`MarkupStripper`] is the production [`Sanitizer`]: it keeps text and
//! drops everything that is markup.
//!
//! - Tags are removed. Quoted attribute values may contain `>`.
//! - Comments (`<!-- ... -->`) are removed.
//! - The contents of `script`, `style`, `textarea` and `option` elements are
//!   removed together with the element.
//! - An unterminated tag or comment swallows the rest of the input.
//! - A `<` that cannot start markup (`1 < 2`) is kept as text, except when
//!   it is directly followed by another `<`: it is then dropped, so removing
//!   a tag can never assemble new markup and stripping is idempotent.
//!
//! Entities are not decoded and whitespace is left alone; trimming is the
//! caller's job.

use todo_core::environment::Sanitizer;

/// Elements whose contents are code or form state, never display text
const NON_TEXT_ELEMENTS: [&str; 4] = ["script", "style", "textarea", "option"];

/// Strips every tag, comment and non-text element
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupStripper;

impl MarkupStripper {
    /// Returns the plain text of `input`
    ///
    /// # Examples
    ///
    /// ```
    /// use todo::sanitize::MarkupStripper;
    ///
    /// assert_eq!(MarkupStripper::strip("<b>Bold</b> move"), "Bold move");
    /// assert_eq!(MarkupStripper::strip("<script>x</script>Shop"), "Shop");
    /// assert_eq!(MarkupStripper::strip("1 < 2"), "1 < 2");
    /// ```
    #[must_use]
    pub fn strip(input: &str) -> String {
        let chars: Vec<char> = input.chars().collect();
        let mut text = String::with_capacity(input.len());
        let mut i = 0;

        while i < chars.len() {
            if chars[i] == '<' {
                match chars.get(i + 1) {
                    Some(&next) if opens_markup(next) => {
                        i = skip_markup(&chars, i);
                        continue;
                    },
                    // `<<a>b` must not turn into `<b`
                    Some('<') => {
                        i += 1;
                        continue;
                    },
                    _ => {},
                }
            }
            text.push(chars[i]);
            i += 1;
        }

        text
    }
}

impl Sanitizer for MarkupStripper {
    fn sanitize(&self, input: &str) -> String {
        Self::strip(input)
    }
}

const fn opens_markup(next: char) -> bool {
    next.is_ascii_alphabetic() || matches!(next, '/' | '!' | '?')
}

/// Index just past the markup that starts with the `<` at `start`
fn skip_markup(chars: &[char], start: usize) -> usize {
    if starts_with_at(chars, start, "<!--") {
        return find_at(chars, start + 4, "-->").map_or(chars.len(), |end| end + 3);
    }

    let end = tag_end(chars, start + 1);
    let Some(name) = opening_element_name(&chars[start + 1..end]) else {
        return end;
    };

    let self_closing = end >= 2 && chars[end - 1] == '>' && chars[end - 2] == '/';
    if !NON_TEXT_ELEMENTS.contains(&name.as_str()) || self_closing {
        return end;
    }

    // Drop everything up to and including the matching close tag
    let closing = format!("</{name}");
    let mut from = end;
    while let Some(at) = find_at(chars, from, &closing) {
        let after = at + closing.len();
        if chars.get(after).is_none_or(|c| !c.is_ascii_alphanumeric()) {
            return tag_end(chars, after);
        }
        from = after;
    }
    chars.len()
}

/// Index just past the `>` closing a tag, honouring quoted attribute values
fn tag_end(chars: &[char], from: usize) -> usize {
    let mut in_single_quote = false;
    let mut in_double_quote = false;

    for (i, c) in chars.iter().enumerate().skip(from) {
        match c {
            '"' if !in_single_quote => in_double_quote = !in_double_quote,
            '\'' if !in_double_quote => in_single_quote = !in_single_quote,
            '>' if !in_single_quote && !in_double_quote => return i + 1,
            _ => {},
        }
    }
    chars.len()
}

/// Lowercased element name of an opening tag, `None` for closing tags,
/// declarations and processing instructions
fn opening_element_name(tag: &[char]) -> Option<String> {
    let name: String = tag
        .iter()
        .take_while(|c| c.is_ascii_alphanumeric())
        .map(char::to_ascii_lowercase)
        .collect();
    (!name.is_empty()).then_some(name)
}

fn starts_with_at(chars: &[char], at: usize, pattern: &str) -> bool {
    pattern
        .chars()
        .enumerate()
        .all(|(offset, p)| chars.get(at + offset).is_some_and(|c| c.eq_ignore_ascii_case(&p)))
}

fn find_at(chars: &[char], from: usize, pattern: &str) -> Option<usize> {
    (from..chars.len()).find(|&i| starts_with_at(chars, i, pattern))
}
