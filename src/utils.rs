/*!
 * Utility functions for srcbundle
 */

use once_cell::sync::Lazy;

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Drop lines that are empty or whitespace-only, joining the rest with `\n`
pub fn strip_empty_lines(text: &str) -> String {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build and debug output directories that are never scanned
pub static EXCLUDED_DIRS: Lazy<Vec<&'static str>> = Lazy::new(|| vec!["bin", "debug"]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_sizes() {
        assert_eq!(format_file_size(12), "12 bytes");
        assert_eq!(format_file_size(2048), "2.00 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn strips_blank_and_whitespace_lines() {
        let text = "fn main() {\n\n    \t\n    run();\r\n\r\n}\n";
        assert_eq!(strip_empty_lines(text), "fn main() {\n    run();\r\n}");
    }

    #[test]
    fn stripping_is_idempotent() {
        let samples = ["", "\n\n", "a\n\nb\n", "  \nx\n  y  \n\t\n", "single"];
        for sample in samples {
            let once = strip_empty_lines(sample);
            assert_eq!(strip_empty_lines(&once), once, "sample {:?}", sample);
        }
    }

    #[test]
    fn preserves_line_order() {
        assert_eq!(strip_empty_lines("c\n\nb\n \na"), "c\nb\na");
    }
}
