//! Plain-text extraction from markup-bearing entry bodies.

/// Strip markup from raw text and collapse all whitespace runs to single
/// spaces. Tag boundaries become spaces so adjacent text blocks stay
/// separated. Empty input yields an empty string; malformed markup degrades
/// to best-effort extraction and never errors.
pub fn normalize_text(raw: &str) -> String {
    let stripped = strip_html(raw);
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remove tags and decode common HTML entities.
fn strip_html(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut in_entity = false;
    let mut entity = String::new();

    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                // separator so "<p>a</p><p>b</p>" does not fuse into "ab"
                result.push(' ');
            }
            '&' if !in_tag => {
                in_entity = true;
                entity.clear();
            }
            ';' if in_entity => {
                in_entity = false;
                match entity.as_str() {
                    "amp" => result.push('&'),
                    "lt" => result.push('<'),
                    "gt" => result.push('>'),
                    "quot" => result.push('"'),
                    "apos" => result.push('\''),
                    "nbsp" => result.push(' '),
                    _ if entity.starts_with('#') => {
                        if let Some(code) = parse_numeric_entity(&entity) {
                            if let Some(c) = char::from_u32(code) {
                                result.push(c);
                            }
                        }
                    }
                    _ => {
                        // unknown entity, keep as-is
                        result.push('&');
                        result.push_str(&entity);
                        result.push(';');
                    }
                }
            }
            _ if in_entity => {
                // entities are short; an overlong run means this was a bare '&'
                if entity.len() > 8 {
                    in_entity = false;
                    result.push('&');
                    result.push_str(&entity);
                    result.push(ch);
                } else {
                    entity.push(ch);
                }
            }
            _ if !in_tag => result.push(ch),
            _ => {}
        }
    }

    // unterminated entity at end of input
    if in_entity {
        result.push('&');
        result.push_str(&entity);
    }

    result
}

/// Parse a numeric HTML entity body (e.g. "#233" or "#xE9").
fn parse_numeric_entity(entity: &str) -> Option<u32> {
    if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse().ok()
    } else {
        None
    }
}
