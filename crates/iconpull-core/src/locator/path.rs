//! Filename extraction from a locator's URL path.

/// Extracts the last path segment of a locator for use as the saved filename.
///
/// Returns `None` if the locator cannot be parsed or the last segment is
/// empty, `.` or `..`.
pub fn filename_from_locator(locator: &str) -> Option<String> {
    let parsed = url::Url::parse(locator).ok()?;
    let segment = parsed.path_segments()?.last()?;
    if segment.is_empty() || segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal() {
        assert_eq!(
            filename_from_locator("https://example.com/show/camera/icon123.svg").as_deref(),
            Some("icon123.svg")
        );
        assert_eq!(
            filename_from_locator("https://www.svgrepo.com/show/513324/camera.svg").as_deref(),
            Some("camera.svg")
        );
    }

    #[test]
    fn deterministic_for_same_locator() {
        let a = filename_from_locator("https://example.com/show/1/x.svg");
        let b = filename_from_locator("https://example.com/show/1/x.svg");
        assert_eq!(a, b);
    }

    #[test]
    fn same_name_under_different_dirs() {
        assert_eq!(
            filename_from_locator("https://example.com/show/1/x.svg"),
            filename_from_locator("https://example.com/show/2/x.svg")
        );
    }

    #[test]
    fn root_or_trailing_slash() {
        assert_eq!(filename_from_locator("https://example.com/"), None);
        assert_eq!(filename_from_locator("https://example.com/show/"), None);
    }

    #[test]
    fn unparseable() {
        assert_eq!(filename_from_locator("not a url"), None);
    }
}
