//! Project name → storage key sanitization.

/// Characters that are unsafe in a directory name on at least one platform.
const UNSAFE_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Replacement for every unsafe character.
const REPLACEMENT: char = '_';

/// Derive the storage key for a project name.
///
/// Unsafe characters and control characters become `_`, then surrounding
/// whitespace is trimmed. A key made only of dots would address the store
/// root or its parent, so its dots become `_` too.
///
/// The mapping is deterministic but not injective (`a/b` and `a_b` share a
/// key); project-name validation rejects such pairs before they reach disk.
///
/// # Example
///
/// ```
/// use projman::store::storage_key;
///
/// assert_eq!(storage_key("  Web/App: v2  "), "Web_App_ v2");
/// assert_eq!(storage_key(".."), "__");
/// ```
#[must_use]
pub fn storage_key(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if UNSAFE_CHARS.contains(&c) || c.is_control() {
                REPLACEMENT
            } else {
                c
            }
        })
        .collect();

    let trimmed = replaced.trim();
    if !trimmed.is_empty() && trimmed.chars().all(|c| c == '.') {
        return REPLACEMENT.to_string().repeat(trimmed.len());
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name_unchanged() {
        assert_eq!(storage_key("WebApp"), "WebApp");
        assert_eq!(storage_key("My Project 2"), "My Project 2");
    }

    #[test]
    fn test_unsafe_characters_replaced() {
        assert_eq!(storage_key(r#"a<b>c:d"e/f\g|h?i*j"#), "a_b_c_d_e_f_g_h_i_j");
    }

    #[test]
    fn test_control_characters_replaced() {
        assert_eq!(storage_key("tab\there\nnewline"), "tab_here_newline");
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(storage_key("  spaced  "), "spaced");
    }

    #[test]
    fn test_dot_only_names_cannot_escape_root() {
        assert_eq!(storage_key("."), "_");
        assert_eq!(storage_key(".."), "__");
        assert_eq!(storage_key(" ... "), "___");
        assert_eq!(storage_key(".hidden"), ".hidden");
    }

    #[test]
    fn test_deterministic() {
        let name = "Release: Q3/Q4";
        assert_eq!(storage_key(name), storage_key(name));
    }

    #[test]
    fn test_non_ascii_preserved() {
        assert_eq!(storage_key("Café Ü"), "Café Ü");
    }
}
