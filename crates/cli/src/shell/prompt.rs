use nu_ansi_term::Color;
use reedline::{Prompt, PromptEditMode, PromptHistorySearch};
use std::borrow::Cow;
use std::path::Path;

pub struct DefaultPrompt {
    source: String,
}

impl DefaultPrompt {
    pub fn new(source: &Path) -> Self {
        Self {
            source: shorten_path(source),
        }
    }
}

impl Prompt for DefaultPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        let prefix = Color::LightBlue.bold().paint("quicksearch");
        let source = Color::Yellow.paint(&self.source);
        Cow::Owned(format!("{} {} > ", prefix, source))
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _edit_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed(".. ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        _history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        Cow::Borrowed("(search) ")
    }
}

/// Last two path components, e.g. `html/search`.
fn shorten_path(path: &Path) -> String {
    let parts: Vec<_> = path
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .filter(|s| *s != "/")
        .collect();
    if parts.len() <= 2 {
        return path.display().to_string();
    }
    parts[parts.len() - 2..].join("/")
}
