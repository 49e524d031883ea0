//! Cache key normalization.

/// Suffix of every stored entry file.
pub const ARCHIVE_SUFFIX: &str = ".tar.gz";

/// Normalize a cache key for use as a filename.
///
/// Every character outside `[A-Za-z0-9-_]` becomes `_`. Applied
/// identically at save and restore time, so a key always finds its own
/// entry. Not injective: distinct keys may normalize to the same
/// identifier and then address the same entry.
pub fn normalize(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Entry filename for a key.
pub fn entry_file_name(key: &str) -> String {
    format!("{}{}", normalize(key), ARCHIVE_SUFFIX)
}

/// Reconstruct a display key from an entry filename.
///
/// Strips the archive suffix and maps normalization underscores back to
/// hyphens. Lossy: a key whose normalized-away characters were anything
/// other than hyphens cannot be recovered exactly.
pub fn display_key(file_name: &str) -> String {
    file_name
        .strip_suffix(ARCHIVE_SUFFIX)
        .unwrap_or(file_name)
        .replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("linux-deps-abc123"), "linux-deps-abc123");
        assert_eq!(normalize("my/cache/key"), "my_cache_key");
        assert_eq!(normalize("cache:key v2"), "cache_key_v2");
        assert_eq!(normalize("naïve"), "na_ve");
    }

    #[test]
    fn test_normalize_idempotent() {
        for key in ["a/b:c", "plain", "", "ünï-code", "x_y-z.0"] {
            assert_eq!(normalize(&normalize(key)), normalize(key));
        }
    }

    #[test]
    fn test_colliding_keys_share_an_identifier() {
        assert_eq!(normalize("a/b"), normalize("a:b"));
    }

    #[test]
    fn test_entry_file_name() {
        assert_eq!(entry_file_name("npm deps"), "npm_deps.tar.gz");
    }

    #[test]
    fn test_display_key() {
        assert_eq!(display_key("linux-deps-abc.tar.gz"), "linux-deps-abc");
        // Underscores come back as hyphens, whatever they originally were.
        assert_eq!(display_key("my_cache_key.tar.gz"), "my-cache-key");
    }
}
