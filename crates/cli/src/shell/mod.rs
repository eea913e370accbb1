mod command;
mod completer;
mod context;
mod highlighter;
mod prompt;
pub(crate) mod view;

use quicksearch_api::IndexLifecycle;
use quicksearch_core::{EngineHandle, SearchConfig};
use reedline::{
    ColumnarMenu, DefaultHinter, Emacs, FileBackedHistory, KeyCode, KeyModifiers, MenuBuilder,
    Reedline, ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use std::path::PathBuf;
use tracing::{error, info};

use self::command::{ShellCommand, parse_shell_command};
use self::completer::ShellCompleter;
use self::context::ShellContext;
use self::highlighter::ShellHighlighter;
use self::prompt::DefaultPrompt;

// Shell configuration constants
const SHELL_HISTORY_SIZE: usize = 500;

pub struct ReplServer {
    context: ShellContext,
}

impl ReplServer {
    pub fn new(engine: EngineHandle, rt_handle: tokio::runtime::Handle) -> Self {
        Self {
            context: ShellContext::new(engine, rt_handle),
        }
    }

    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let source = self.context.engine.engine().source().to_path_buf();
        println!("Source: {}", source.display());

        self.context.rt_handle.block_on(self.initialize_index())?;
        println!("Type 'help' for commands.");

        let line_editor = self.setup_line_editor()?;
        self.run_loop(line_editor, &DefaultPrompt::new(&source))
    }

    async fn initialize_index(&self) -> Result<(), Box<dyn std::error::Error>> {
        let handle = &self.context.engine;
        let start = std::time::Instant::now();

        if let Err(e) = handle.engine().open().await {
            error!("Failed to open index: {}", e);
            println!("Warning: index could not be built: {}", e);
            return Ok(());
        }
        let stats = handle.engine().stats().await?;
        println!(
            "Index ready in {:?}. Names: {}, entries: {}",
            start.elapsed(),
            stats.name_count,
            stats.entry_count
        );

        // The watcher task lives on the runtime, past this call
        match handle.start_watch().await {
            Ok(_) => info!("File watcher started."),
            Err(e) => error!("Failed to start file watcher: {}", e),
        }
        Ok(())
    }

    fn setup_line_editor(&self) -> Result<Reedline, Box<dyn std::error::Error>> {
        let commands = ShellCommand::command_names();

        let completer = Box::new(ShellCompleter::new(commands.clone(), self.context.clone()));
        let completion_menu = Box::new(ColumnarMenu::default().with_name("completion_menu"));

        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu("completion_menu".to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let history = match history_file() {
            Some(path) => FileBackedHistory::with_file(SHELL_HISTORY_SIZE, path)
                .or_else(|_| FileBackedHistory::new(SHELL_HISTORY_SIZE))?,
            None => FileBackedHistory::new(SHELL_HISTORY_SIZE)?,
        };

        let highlighter = Box::new(ShellHighlighter::new(commands));

        Ok(Reedline::create()
            .with_history(Box::new(history))
            .with_completer(completer)
            .with_highlighter(highlighter)
            .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
            .with_hinter(Box::new(
                DefaultHinter::default().with_style(
                    nu_ansi_term::Style::new()
                        .italic()
                        .fg(nu_ansi_term::Color::LightGray),
                ),
            ))
            .with_edit_mode(Box::new(Emacs::new(keybindings))))
    }

    fn run_loop(
        &self,
        mut line_editor: Reedline,
        prompt: &DefaultPrompt,
    ) -> Result<(), Box<dyn std::error::Error>> {
        loop {
            match line_editor.read_line(prompt) {
                Ok(Signal::Success(buffer)) => {
                    let trimmed = buffer.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    if trimmed == "exit" || trimmed == "quit" {
                        break;
                    }
                    if trimmed == "help" {
                        let _ = parse_shell_command("--help");
                        continue;
                    }

                    match parse_shell_command(trimmed) {
                        Ok(Some(cmd)) => match cmd.execute(&self.context) {
                            Ok(output) => {
                                if !output.is_empty() {
                                    println!("{}", output);
                                }
                                if matches!(cmd, ShellCommand::Clear) {
                                    let _ = line_editor.clear_screen();
                                }
                            }
                            Err(e) => eprintln!("Error: {}", e),
                        },
                        Ok(None) => {}
                        Err(e) => eprintln!("Error: {}", e),
                    }
                }
                Ok(Signal::CtrlD) | Ok(Signal::CtrlC) => {
                    println!("Bye!");
                    break;
                }
                Ok(_) => {}
                Err(e) => return Err(Box::new(e)),
            }
        }
        Ok(())
    }
}

/// `~/.quicksearch/shell/history`, created on demand
fn history_file() -> Option<PathBuf> {
    let dir = quicksearch_core::config::app_dir().join("shell");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join("history"))
}

/// Run the shell. The line editor blocks the calling thread, so this is
/// driven from outside the runtime.
pub fn run(
    rt: &tokio::runtime::Runtime,
    source: Option<PathBuf>,
    config: SearchConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = match source {
        Some(p) => p,
        None => std::env::current_dir()?,
    };
    let engine = EngineHandle::new(source, config);
    ReplServer::new(engine, rt.handle().clone()).run()
}
