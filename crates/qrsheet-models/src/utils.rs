//! Shared utility functions.

/// Display-name transformation used for PDF captions.
///
/// Strips digits from an item identity and trims surrounding whitespace, so
/// `"anna03"` renders as `"anna"`. This is presentation only; the untouched
/// identity remains the de-duplication key everywhere else.
pub fn display_name(title: &str) -> String {
    title
        .chars()
        .filter(|c| !c.is_ascii_digit())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Derive an item identity from a file name by dropping the last extension.
///
/// `"anna03.final.mp4"` becomes `"anna03.final"`; a name without a dot is
/// returned unchanged.
pub fn title_from_file_name(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem.to_string(),
        _ => file_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_strips_digits() {
        assert_eq!(display_name("anna03"), "anna");
        assert_eq!(display_name("2024 reunion 01"), "reunion");
        assert_eq!(display_name("no_digits"), "no_digits");
    }

    #[test]
    fn test_display_name_all_digits() {
        assert_eq!(display_name("0042"), "");
    }

    #[test]
    fn test_title_from_file_name() {
        assert_eq!(title_from_file_name("anna03.mp4"), "anna03");
        assert_eq!(title_from_file_name("anna03.final.mp4"), "anna03.final");
        assert_eq!(title_from_file_name("noext"), "noext");
        assert_eq!(title_from_file_name(".hidden"), ".hidden");
    }
}
