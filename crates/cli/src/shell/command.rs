use super::context::ShellContext;
use super::view;
use clap::Parser;
use clap::error::ErrorKind;

/// Default number of groups shown by `find`
const DEFAULT_FIND_LIMIT: usize = 20;

/// Helper struct for Clap parsing within the shell
#[derive(Parser, Clone, Debug)]
#[command(no_binary_name = true)]
pub enum ShellCommand {
    /// Prefix search, grouped by name
    Find {
        /// Prefix to search for (case-insensitive)
        prefix: String,
        /// Limit number of groups
        #[arg(long, default_value_t = DEFAULT_FIND_LIMIT)]
        limit: usize,
    },
    /// Show every entry of one exact name
    Show {
        /// Display name (case-sensitive)
        name: String,
    },
    /// Print index statistics
    Stats,
    /// Rebuild the index from the data source
    Reload,
    /// Clear the screen
    Clear,
}

impl ShellCommand {
    /// Command names derived from the enum, plus the loop's own commands.
    pub fn command_names() -> Vec<String> {
        use clap::CommandFactory;
        let cmd = Self::command();
        let mut names = vec!["help".to_string(), "exit".to_string(), "quit".to_string()];
        names.extend(cmd.get_subcommands().map(|s| s.get_name().to_string()));
        names
    }

    /// Whether the command's argument is a symbol name.
    pub fn takes_name(command: &str) -> bool {
        matches!(command, "find" | "show")
    }

    pub fn execute(&self, context: &ShellContext) -> Result<String, Box<dyn std::error::Error>> {
        match self {
            ShellCommand::Find { prefix, limit } => {
                let mut groups = context.search(prefix)?;
                groups.truncate(*limit);
                Ok(view::render_groups(&groups))
            }
            ShellCommand::Show { name } => match context.lookup(name)? {
                Some(group) => Ok(view::render_group(&group)),
                None => Ok(format!("No symbol named '{}'", name)),
            },
            ShellCommand::Stats => Ok(view::render_stats(&context.stats()?)),
            ShellCommand::Reload => {
                let start = std::time::Instant::now();
                context.reload()?;
                let stats = context.stats()?;
                Ok(format!(
                    "Index rebuilt in {:?}. Names: {}, entries: {}",
                    start.elapsed(),
                    stats.name_count,
                    stats.entry_count
                ))
            }
            ShellCommand::Clear => Ok(String::new()),
        }
    }
}

pub fn parse_shell_command(
    input: &str,
) -> Result<Option<ShellCommand>, Box<dyn std::error::Error>> {
    // shlex keeps quoted arguments together
    let args = shlex::split(input).ok_or("Invalid quoting")?;

    match ShellCommand::try_parse_from(args) {
        Ok(c) => Ok(Some(c)),
        Err(e) => {
            if e.kind() == ErrorKind::DisplayHelp || e.kind() == ErrorKind::DisplayVersion {
                println!("{}", e);
                return Ok(None);
            }
            Err(Box::new(e))
        }
    }
}
