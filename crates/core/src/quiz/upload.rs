/// Normalize an uploaded question file before it replaces the object file.
///
/// Drops every empty or whitespace-only line and joins the rest with `\n`.
/// The result carries no trailing newline.
pub fn strip_blank_lines(raw: &str) -> String {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_removed() {
        assert_eq!(strip_blank_lines("A\n\nB\n"), "A\nB");
    }

    #[test]
    fn test_whitespace_only_lines_removed() {
        assert_eq!(strip_blank_lines("A\n   \n\t\nB"), "A\nB");
    }

    #[test]
    fn test_crlf_input() {
        assert_eq!(strip_blank_lines("A\r\n\r\nB\r\n"), "A\nB");
    }

    #[test]
    fn test_indentation_preserved() {
        assert_eq!(strip_blank_lines("if (x) {\n\n    y = 1;\n}\n"), "if (x) {\n    y = 1;\n}");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(strip_blank_lines(""), "");
        assert_eq!(strip_blank_lines("\n\n"), "");
    }
}
