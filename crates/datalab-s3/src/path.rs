//! Working directory path normalization.

/// Normalizes a working directory prefix to `<prefix>/` form.
///
/// Applied once, when a profile is added to the set; the stored value is
/// never re-normalized afterwards. The rules are:
///
/// 1. surrounding whitespace is trimmed;
/// 2. doubled slashes are collapsed in a single left-to-right pass
///    (a run of three or more slashes leaves a residue);
/// 3. at most one leading slash is stripped;
/// 4. exactly one trailing slash is ensured — an already-trailing input
///    is left unchanged, and the empty path becomes `/`.
///
/// # Examples
///
/// ```
/// use datalab_s3::normalize_working_directory_path;
///
/// assert_eq!(normalize_working_directory_path("  //foo/bar "), "foo/bar/");
/// assert_eq!(normalize_working_directory_path("foo/bar/"), "foo/bar/");
/// assert_eq!(normalize_working_directory_path(""), "/");
/// ```
pub fn normalize_working_directory_path(path: &str) -> String {
    let collapsed = path.trim().replace("//", "/");
    let stripped = collapsed.strip_prefix('/').unwrap_or(&collapsed);

    if stripped.ends_with('/') {
        stripped.to_string()
    } else {
        format!("{stripped}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_strips_leading_slash() {
        assert_eq!(normalize_working_directory_path("  //foo/bar "), "foo/bar/");
        assert_eq!(normalize_working_directory_path("/team/project"), "team/project/");
    }

    #[test]
    fn test_already_normalized_is_unchanged() {
        assert_eq!(normalize_working_directory_path("foo/bar/"), "foo/bar/");
        assert_eq!(normalize_working_directory_path("a/"), "a/");
    }

    #[test]
    fn test_appends_trailing_slash() {
        assert_eq!(normalize_working_directory_path("foo"), "foo/");
        assert_eq!(normalize_working_directory_path("foo/bar"), "foo/bar/");
    }

    #[test]
    fn test_empty_becomes_root() {
        assert_eq!(normalize_working_directory_path(""), "/");
        assert_eq!(normalize_working_directory_path("   "), "/");
    }

    #[test]
    fn test_collapses_doubled_slashes() {
        assert_eq!(normalize_working_directory_path("a//b"), "a/b/");
        assert_eq!(normalize_working_directory_path("a//b//c"), "a/b/c/");
    }

    #[test]
    fn test_slash_runs_collapse_pairwise() {
        // Single-pass collapse: three slashes leave a doubled residue.
        assert_eq!(normalize_working_directory_path("a///b"), "a//b/");
    }
}
