use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

pub struct ShellHighlighter {
    commands: Vec<String>,
}

impl ShellHighlighter {
    pub fn new(commands: Vec<String>) -> Self {
        Self { commands }
    }
}

impl Highlighter for ShellHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled_text = StyledText::new();
        let mut seen_command = false;

        for word in line.split_inclusive(char::is_whitespace) {
            let trimmed = word.trim();
            if trimmed.is_empty() {
                styled_text.push((Style::new(), word.to_string()));
                continue;
            }

            let style = if !seen_command {
                seen_command = true;
                if self.commands.iter().any(|c| c == trimmed) {
                    Style::new().fg(Color::LightGreen).bold()
                } else {
                    Style::new().fg(Color::Red)
                }
            } else if trimmed.starts_with('-') {
                Style::new().fg(Color::Cyan)
            } else {
                Style::new().fg(Color::Yellow)
            };

            styled_text.push((style, word.to_string()));
        }

        styled_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_keeps_text() {
        let highlighter = ShellHighlighter::new(vec!["find".to_string()]);
        let styled = highlighter.highlight("find  abs --limit 3", 0);
        let text: String = styled.buffer.iter().map(|(_, s)| s.as_str()).collect();
        assert_eq!(text, "find  abs --limit 3");
        assert_eq!(styled.buffer[0].0, Style::new().fg(Color::LightGreen).bold());
    }
}
