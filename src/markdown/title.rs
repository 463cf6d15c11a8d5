//! Page title extraction.

use super::TitleError;

/// Return the text of the first `# ` heading line, trimmed.
///
/// Lines are trimmed before matching, so an indented `  # Title` counts.
pub fn extract_title(markdown: &str) -> Result<String, TitleError> {
    if markdown.is_empty() {
        return Err(TitleError::EmptyInput);
    }
    markdown
        .split('\n')
        .find_map(|line| line.trim().strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .ok_or(TitleError::NoHeadingFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_title() {
        assert_eq!(extract_title("# Hello\nBody").unwrap(), "Hello");
    }

    #[test]
    fn test_title_whitespace_trimmed() {
        assert_eq!(extract_title("   #   Spaced Title   \n").unwrap(), "Spaced Title");
    }

    #[test]
    fn test_first_heading_wins() {
        let md = "intro\n\n## Sub\n# First\n# Second";
        assert_eq!(extract_title(md).unwrap(), "First");
    }

    #[test]
    fn test_no_heading() {
        assert_eq!(extract_title("No heading"), Err(TitleError::NoHeadingFound));
        assert_eq!(extract_title("## Only h2"), Err(TitleError::NoHeadingFound));
        assert_eq!(extract_title("#NoSpace"), Err(TitleError::NoHeadingFound));
    }

    #[test]
    fn test_empty_input_is_distinct() {
        assert_eq!(extract_title(""), Err(TitleError::EmptyInput));
        assert_ne!(TitleError::EmptyInput, TitleError::NoHeadingFound);
    }
}
