//! Field-level checks for the quote form. These run at step-advance and
//! submit time, not on every keystroke; the component clears a field's error
//! flag as soon as the user edits that field.

/// Permissive format check: one `@`, no whitespace, and a dot in the domain
/// with at least one character before it and two after. This is a UX hint,
/// the quote API does the authoritative validation.
pub fn is_valid_email(s: &str) -> bool {
    if s.is_empty() || s.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = s.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return false,
    };
    if local.is_empty() {
        return false;
    }
    let chars: Vec<char> = domain.chars().collect();
    chars
        .iter()
        .enumerate()
        .any(|(i, &c)| c == '.' && i >= 1 && chars.len() - i - 1 >= 2)
}

/// Strips everything that isn't a digit and accepts 7 to 15 digits, which
/// covers local numbers through full E.164 with country code.
pub fn is_valid_phone(s: &str) -> bool {
    let digits = s.chars().filter(char::is_ascii_digit).count();
    (7..=15).contains(&digits)
}

pub fn is_valid_name(s: &str) -> bool {
    let len = s.trim().chars().count();
    (2..=100).contains(&len)
}

/// Escapes `& < > " '` before the values leave the browser. The quote text is
/// echoed in notification emails, so it must never carry live markup.
/// `&` is replaced first so already-produced entities are not re-escaped.
pub fn sanitize_field(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_accepts_simple_addresses() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("jane.doe@example.com"));
        assert!(is_valid_email("a@b.co.uk"));
    }

    #[test]
    fn email_rejects_missing_pieces() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("noatsign.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@.co"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@b.c"));
        assert!(!is_valid_email("a@@b.co"));
        assert!(!is_valid_email("a b@c.co"));
        assert!(!is_valid_email(" a@b.co"));
    }

    #[test]
    fn phone_counts_digits_only() {
        assert!(!is_valid_phone("abc123456"));
        assert!(is_valid_phone("(417) 470-9888"));
        assert!(is_valid_phone("1234567"));
        assert!(!is_valid_phone("123456"));
        assert!(is_valid_phone("123456789012345"));
        assert!(!is_valid_phone("1234567890123456"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn name_is_trimmed_before_length_check() {
        assert!(!is_valid_name(" a "));
        assert!(is_valid_name("Al"));
        assert!(is_valid_name(&"x".repeat(100)));
        assert!(!is_valid_name(&"x".repeat(101)));
        // trailing whitespace does not count toward the limit
        assert!(is_valid_name(&format!("  {}  ", "x".repeat(100))));
    }

    #[test]
    fn sanitize_escapes_markup_characters() {
        assert_eq!(
            sanitize_field(r#"<b>"Bill" & 'Son'</b>"#),
            "&lt;b&gt;&quot;Bill&quot; &amp; &#39;Son&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn sanitize_escapes_ampersand_first() {
        // an already-escaped value gets its ampersand escaped once, never the
        // freshly produced entities
        assert_eq!(sanitize_field("&lt;"), "&amp;lt;");
        assert_eq!(sanitize_field("a&b"), "a&amp;b");
    }
}
