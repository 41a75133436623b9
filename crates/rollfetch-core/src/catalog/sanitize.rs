//! Filesystem-safe names for assembly directories and booth files.

/// Sanitizes one path component built from scraped text.
///
/// - Replaces NUL, `/`, `\`, and control characters with `_`
/// - Keeps spaces (assembly directories look like `12 - Alpha`)
/// - Trims leading/trailing spaces and dots
/// - Limits length to 255 bytes (Linux NAME_MAX)
pub fn sanitize_component(name: &str) -> String {
    const NAME_MAX: usize = 255;

    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c == '\0' || c == '/' || c == '\\' || c.is_control() {
            out.push('_');
        } else {
            out.push(c);
        }
    }

    let trimmed = out.trim_matches(|c| c == ' ' || c == '.');

    if trimmed.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while take > 0 && !trimmed.is_char_boundary(take) {
            take -= 1;
        }
        trimmed[..take].to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_slash_and_backslash() {
        assert_eq!(sanitize_component("a/b\\c"), "a_b_c");
    }

    #[test]
    fn keeps_inner_spaces() {
        assert_eq!(sanitize_component("12 - Alpha"), "12 - Alpha");
    }

    #[test]
    fn trims_edge_dots_and_spaces() {
        assert_eq!(sanitize_component("  ..booth 7..  "), "booth 7");
    }

    #[test]
    fn replaces_control_chars() {
        assert_eq!(sanitize_component("boo\x00th\n7"), "boo_th_7");
    }

    #[test]
    fn caps_length_at_name_max() {
        let long = "x".repeat(400);
        assert_eq!(sanitize_component(&long).len(), 255);
    }
}
