//! DNS name comparison
//!
//! Names may be written with or without the trailing root-label dot, and DNS
//! labels are case-insensitive. Both forms compare equal.

/// Strip a single trailing root-label dot
pub fn normalize(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Compare two DNS names ignoring the trailing dot and ASCII case
pub fn names_equal(a: &str, b: &str) -> bool {
    normalize(a).eq_ignore_ascii_case(normalize(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_dot_is_ignored_on_either_side() {
        assert!(names_equal("d2mz62fpvuge8k.cloudfront.net.", "d2mz62fpvuge8k.cloudfront.net"));
        assert!(names_equal("d2mz62fpvuge8k.cloudfront.net", "d2mz62fpvuge8k.cloudfront.net."));
        assert!(names_equal("d2mz62fpvuge8k.cloudfront.net.", "d2mz62fpvuge8k.cloudfront.net."));
    }

    #[test]
    fn only_one_dot_is_stripped() {
        assert_eq!(normalize("example.com.."), "example.com.");
        assert!(!names_equal("example.com..", "example.com"));
    }

    #[test]
    fn case_is_ignored() {
        assert!(names_equal("WWW.Example.com", "www.example.com."));
    }

    #[test]
    fn different_names_differ() {
        assert!(!names_equal("other.cloudfront.net", "d2mz62fpvuge8k.cloudfront.net"));
    }
}
