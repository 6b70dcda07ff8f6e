//! Escape processing for string literal contents.

/// Unescape the body of a string literal (without its quotes).
///
/// Unknown escapes keep the escaped character, matching how JavaScript
/// treats `\q` as `q`. Malformed unicode escapes are kept verbatim.
pub(crate) fn unescape(body: &str) -> String {
    if !body.contains('\\') {
        return body.to_owned();
    }

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escaped) = chars.next() else {
            out.push('\\');
            break;
        };
        match escaped {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            // Line continuation.
            '\n' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            'x' => {
                let hex: String = chars.by_ref().take(2).collect();
                push_code_point(&mut out, &hex, 'x');
            }
            'u' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    let hex: String = chars.by_ref().take_while(|&c| c != '}').collect();
                    push_code_point(&mut out, &hex, 'u');
                } else {
                    let hex: String = chars.by_ref().take(4).collect();
                    push_code_point(&mut out, &hex, 'u');
                }
            }
            other => out.push(other),
        }
    }
    out
}

fn push_code_point(out: &mut String, hex: &str, prefix: char) {
    match u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
        Some(c) => out.push(c),
        None => {
            out.push('\\');
            out.push(prefix);
            out.push_str(hex);
        }
    }
}
