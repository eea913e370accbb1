use super::command::ShellCommand;
use super::context::ShellContext;
use reedline::{Completer, Span, Suggestion};

const MAX_NAME_SUGGESTIONS: usize = 20;

pub struct ShellCompleter {
    commands: Vec<String>,
    context: ShellContext,
}

impl ShellCompleter {
    pub fn new(commands: Vec<String>, context: ShellContext) -> Self {
        Self { commands, context }
    }
}

fn suggestion(value: String, description: Option<String>, span: Span) -> Suggestion {
    Suggestion {
        value,
        description,
        style: None,
        extra: None,
        span,
        append_whitespace: true,
        match_indices: None,
    }
}

impl Completer for ShellCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let line = &line[..pos.min(line.len())];
        let trimmed = line.trim_start();

        // Command name at the start of the line
        if !trimmed.contains(char::is_whitespace) {
            let span = Span::new(pos - trimmed.len(), pos);
            return self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(trimmed))
                .map(|cmd| suggestion(cmd.clone(), None, span))
                .collect();
        }

        let mut parts = trimmed.split_whitespace();
        let Some(command) = parts.next() else {
            return vec![];
        };
        if !ShellCommand::takes_name(command) {
            return vec![];
        }

        // Only the first argument is a name; an empty word would list everything
        let word = if line.ends_with(char::is_whitespace) {
            ""
        } else {
            parts.last().unwrap_or("")
        };
        if word.is_empty() || word.starts_with('-') {
            return vec![];
        }

        let span = Span::new(pos - word.len(), pos);
        self.context
            .complete_names(word, MAX_NAME_SUGGESTIONS)
            .into_iter()
            .map(|name| suggestion(name, None, span))
            .collect()
    }
}
