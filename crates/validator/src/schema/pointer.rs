//! JSON pointer helpers (RFC 6901).
//!
//! Used for both data pointers and schema paths. The engine's root
//! pointer is `"/"`; joining onto it must not double the slash.

/// Escapes a single reference token: `~` → `~0`, `/` → `~1`.
#[must_use]
pub fn escape(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

/// Unescapes a single reference token: `~1` → `/`, `~0` → `~`.
///
/// The order matters: `~01` must decode to `~1`, not `/`.
#[must_use]
pub fn unescape(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}

/// Joins a pointer and one child token, escaping the token.
#[must_use]
pub fn join(base: &str, token: &str) -> String {
    let escaped = escape(token);
    if base.ends_with('/') {
        format!("{base}{escaped}")
    } else {
        format!("{base}/{escaped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn join_from_root() {
        assert_eq!(join("/", "minimum"), "/minimum");
    }

    #[test]
    fn join_nested() {
        assert_eq!(join("/properties", "age"), "/properties/age");
    }

    #[test]
    fn join_escapes_token() {
        assert_eq!(join("/", "a/b"), "/a~1b");
        assert_eq!(join("/", "a~b"), "/a~0b");
    }

    #[test]
    fn unescape_order() {
        assert_eq!(unescape("~01"), "~1");
        assert_eq!(unescape("a~1b"), "a/b");
    }

    #[test]
    fn roundtrip() {
        for token in ["plain", "slash/inside", "tilde~inside", "~1", "~0", ""] {
            assert_eq!(unescape(&escape(token)), token);
        }
    }
}
