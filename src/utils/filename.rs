/// Derives the display name for an uploaded file from the filename supplied
/// by the client. Some browsers send the full client-side path; only the
/// last segment is kept. Both `/` and `\` separators are handled.
pub fn display_name(original: &str) -> String {
    let trimmed = original.trim();
    trimmed
        .rsplit(['/', '\\'])
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(trimmed)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_filename_unchanged() {
        assert_eq!(display_name("report.pdf"), "report.pdf");
    }

    #[test]
    fn test_unix_path_stripped() {
        assert_eq!(display_name("/home/user/report.pdf"), "report.pdf");
    }

    #[test]
    fn test_windows_path_stripped() {
        assert_eq!(display_name("C:\\Users\\user\\report.pdf"), "report.pdf");
    }

    #[test]
    fn test_trailing_separator_falls_back_to_raw_name() {
        assert_eq!(display_name("dir/"), "dir/");
    }
}
