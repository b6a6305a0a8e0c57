//! Canonicalizes tokenized markup into the compact model-input form.
//!
//! Token-bearing start tags become `<id=VALUE class="…"? style="…"?/>`,
//! every end tag becomes `</>`, and every other start tag is deleted
//! outright. Text between tags passes through byte-exact, so the same input
//! always produces the same prompt. The transform is lossy and one-way.

use core_types::TOKEN_ID_ATTR;

enum Tag<'a> {
    Start {
        token_id: Option<&'a str>,
        class: Option<&'a str>,
        style: Option<&'a str>,
        end: usize,
    },
    End {
        end: usize,
    },
    /// Comments, doctypes and other non-element markup, dropped wholesale.
    Other {
        end: usize,
    },
}

pub fn canonicalize(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'<' {
            let start = i;
            while i < bytes.len() && bytes[i] != b'<' {
                i += 1;
            }
            out.push_str(&input[start..i]);
            continue;
        }
        match scan_tag(input, i) {
            Some(Tag::Start {
                token_id,
                class,
                style,
                end,
            }) => {
                if let Some(id) = token_id {
                    out.push_str("<id=");
                    out.push_str(id);
                    if let Some(class) = class {
                        out.push_str(" class=\"");
                        out.push_str(class);
                        out.push('"');
                    }
                    if let Some(style) = style {
                        out.push_str(" style=\"");
                        out.push_str(style);
                        out.push('"');
                    }
                    out.push_str("/>");
                }
                i = end;
            }
            Some(Tag::End { end }) => {
                out.push_str("</>");
                i = end;
            }
            Some(Tag::Other { end }) => i = end,
            None => {
                // Not a well-formed tag boundary; a literal '<' in code text.
                out.push('<');
                i += 1;
            }
        }
    }
    out
}

fn is_name_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'_' || c == b':'
}

/// Scans one tag starting at `from` (which points at `<`). Returns `None`
/// when the bytes do not form a tag, so the caller can emit the `<` as text.
fn scan_tag(input: &str, from: usize) -> Option<Tag<'_>> {
    let bytes = input.as_bytes();
    let len = bytes.len();
    debug_assert!(bytes[from] == b'<');

    if from + 1 >= len {
        return None;
    }
    if bytes[from + 1] == b'!' {
        // Comment or doctype; skip to the closing marker.
        if input[from..].starts_with("<!--") {
            let end = input[from + 4..].find("-->").map(|p| from + 4 + p + 3)?;
            return Some(Tag::Other { end });
        }
        let end = input[from..].find('>').map(|p| from + p + 1)?;
        return Some(Tag::Other { end });
    }
    if bytes[from + 1] == b'/' {
        let mut j = from + 2;
        if j >= len || !is_name_char(bytes[j]) {
            return None;
        }
        while j < len && bytes[j] != b'>' {
            j += 1;
        }
        if j >= len {
            return None;
        }
        return Some(Tag::End { end: j + 1 });
    }
    if !is_name_char(bytes[from + 1]) {
        return None;
    }

    let mut j = from + 1;
    while j < len && is_name_char(bytes[j]) {
        j += 1;
    }

    let mut token_id = None;
    let mut class = None;
    let mut style = None;
    loop {
        while j < len && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if j >= len {
            return None;
        }
        if bytes[j] == b'>' {
            j += 1;
            break;
        }
        if bytes[j] == b'/' {
            j += 1;
            continue;
        }
        let name_start = j;
        while j < len && is_name_char(bytes[j]) {
            j += 1;
        }
        if name_start == j {
            j += 1;
            continue;
        }
        let name = &input[name_start..j];

        while j < len && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        let mut value: Option<&str> = None;
        if j < len && bytes[j] == b'=' {
            j += 1;
            while j < len && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
            if j < len && (bytes[j] == b'"' || bytes[j] == b'\'') {
                let quote = bytes[j];
                j += 1;
                let vstart = j;
                while j < len && bytes[j] != quote {
                    j += 1;
                }
                if j >= len {
                    return None;
                }
                value = Some(&input[vstart..j]);
                j += 1;
            } else {
                let vstart = j;
                while j < len && !bytes[j].is_ascii_whitespace() && bytes[j] != b'>' {
                    j += 1;
                }
                value = Some(&input[vstart..j]);
            }
        }

        if name.eq_ignore_ascii_case(TOKEN_ID_ATTR) {
            token_id = value;
        } else if name.eq_ignore_ascii_case("class") {
            class = value;
        } else if name.eq_ignore_ascii_case("style") {
            style = value;
        }
    }

    Some(Tag::Start {
        token_id,
        class,
        style,
        end: j,
    })
}
