//! Prompt prefix loading and prompt assembly.

use std::path::Path;

/// Read the fixed instruction prefix.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read.
pub async fn load_prompt(path: &Path) -> std::io::Result<String> {
    tokio::fs::read_to_string(path).await
}

/// Assemble the single prompt string forwarded to the completion API.
#[must_use]
pub fn build_prompt(prefix: &str, regulations: &str, question: &str) -> String {
    format!("{prefix}\n\nРегламент:\n{regulations}\n\nВопрос: {question}\n\nОтвет:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_layout() {
        let prompt = build_prompt("Отвечай кратко.", "Начало в 10:00", "Когда начало?");
        assert_eq!(
            prompt,
            "Отвечай кратко.\n\nРегламент:\nНачало в 10:00\n\nВопрос: Когда начало?\n\nОтвет:"
        );
    }

    #[test]
    fn test_build_prompt_keeps_text_verbatim() {
        let regulations = "  line one\n\n<b>line two</b>  ";
        let prompt = build_prompt("", regulations, "?");
        assert!(prompt.contains(regulations));
    }

    #[tokio::test]
    async fn test_load_prompt_missing_file() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("missing.txt");
        assert!(load_prompt(&path).await.is_err());
        Ok(())
    }
}
