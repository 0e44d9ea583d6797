use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

use super::controller::AnalysisController;
use super::non_interactive::export_result;
use crate::{
    app::ReportSettings,
    modes::{AnalysisMode, Profile},
    report::{render, to_terminal, ExportFormat},
    utils::AnalysisError,
};

/// One line of shell input
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Load(Vec<PathBuf>),
    Modes,
    Analyze {
        mode: AnalysisMode,
        notes: Option<String>,
    },
    Show,
    Export {
        format: ExportFormat,
        path: Option<PathBuf>,
    },
    Clear,
    Status,
    Help,
    Quit,
    Empty,
}

pub const SHELL_HELP: &str = "\
Comandi:
  load <file>...            carica le immagini (sostituisce la selezione)
                            usa \"...\" per i percorsi con spazi
  modes                     elenca le modalità di analisi
  analyze <modalità> [note] esegue l'analisi sulle immagini caricate
  show                      mostra l'ultimo risultato
  export <md|doc|pdf> [file] esporta l'ultimo risultato
  clear                     svuota la sessione
  status                    stato della sessione
  help                      questo messaggio
  quit                      esce";

/// Split arguments on whitespace. Double quotes group a path that contains
/// spaces; apostrophes stay literal (`l'ingresso.jpg`).
fn split_args(rest: &str) -> Result<Vec<String>, String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut quoted = false;

    for c in rest.chars() {
        match (quoted, c) {
            (_, '"') => {
                quoted = !quoted;
                in_arg = true;
            }
            (true, c) => current.push(c),
            (false, c) if c.is_whitespace() => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            (false, c) => {
                current.push(c);
                in_arg = true;
            }
        }
    }

    if quoted {
        return Err("Virgolette non chiuse.".to_string());
    }
    if in_arg {
        args.push(current);
    }
    Ok(args)
}

/// Parse one line against the active profile's modes
pub fn parse_command(line: &str, profile: Profile) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => Ok(ShellCommand::Empty),
        "load" => {
            let paths: Vec<PathBuf> = split_args(rest)?.into_iter().map(PathBuf::from).collect();
            if paths.is_empty() {
                return Err("Uso: load <file>...".to_string());
            }
            Ok(ShellCommand::Load(paths))
        }
        "modes" => Ok(ShellCommand::Modes),
        "analyze" => {
            let (key, notes) = match rest.split_once(char::is_whitespace) {
                Some((key, notes)) => (key, notes.trim()),
                None => (rest, ""),
            };
            if key.is_empty() {
                return Err(format!("Uso: analyze <{}> [note]", profile.mode_keys()));
            }
            let mode = profile.parse_mode(key).ok_or_else(|| {
                format!("Modalità sconosciuta '{}'. Valide: {}", key, profile.mode_keys())
            })?;
            Ok(ShellCommand::Analyze {
                mode,
                notes: (!notes.is_empty()).then(|| notes.to_string()),
            })
        }
        "show" => Ok(ShellCommand::Show),
        "export" => {
            let mut args = split_args(rest)?.into_iter();
            let format = args
                .next()
                .and_then(|value| ExportFormat::parse(&value))
                .ok_or_else(|| "Uso: export <md|doc|pdf> [file]".to_string())?;
            Ok(ShellCommand::Export {
                format,
                path: args.next().map(PathBuf::from),
            })
        }
        "clear" => Ok(ShellCommand::Clear),
        "status" => Ok(ShellCommand::Status),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        other => Err(format!("Comando sconosciuto '{}'. Digita 'help'.", other)),
    }
}

/// Line-oriented front end over one session
pub struct Shell {
    controller: AnalysisController,
    profile: Profile,
    report: ReportSettings,
}

impl Shell {
    pub fn new(controller: AnalysisController, profile: Profile, report: ReportSettings) -> Self {
        Self {
            controller,
            profile,
            report,
        }
    }

    pub async fn run(&self) -> Result<()> {
        let spec = self.profile.spec();
        println!("{} ({})", spec.product_name.bold(), self.controller.model_name());
        println!("{}", SHELL_HELP.dimmed());

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        loop {
            stdout.write_all(b"> ").await?;
            stdout.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            match parse_command(&line, self.profile) {
                Ok(ShellCommand::Quit) => break,
                Ok(command) => {
                    if let Err(e) = self.dispatch(command).await {
                        report_error(&e);
                    }
                }
                Err(message) => println!("{}", message.yellow()),
            }
        }

        let released = self.controller.clear().unwrap_or(0);
        debug!("Shell closed, {} preview(s) released", released);
        Ok(())
    }

    async fn dispatch(&self, command: ShellCommand) -> Result<()> {
        match command {
            ShellCommand::Load(paths) => {
                let handles = self.controller.load_images(paths.as_slice()).await?;
                println!("{} immagini caricate", handles.len().to_string().green());
                for (handle, path) in handles.iter().zip(&paths) {
                    println!("  • {} -> {}", path.display(), handle.url().dimmed());
                }
            }
            ShellCommand::Modes => print_modes(self.profile),
            ShellCommand::Analyze { mode, notes } => {
                println!("{}", format!("Elaborazione {}...", mode.label()).cyan());
                let result = self.controller.analyze(mode, notes.as_deref()).await?;
                print!("{}", to_terminal(&render(&result.markdown)));
            }
            ShellCommand::Show => match self.controller.current_result() {
                Some(result) => print!("{}", to_terminal(&render(&result.markdown))),
                None => println!("{}", "Nessun risultato disponibile.".yellow()),
            },
            ShellCommand::Export { format, path } => match self.controller.current_result() {
                Some(result) => {
                    let written = export_result(&result, format, path.as_deref(), &self.report)?;
                    println!("Esportato: {}", written.display().to_string().green());
                }
                None => println!("{}", "Nessun risultato da esportare.".yellow()),
            },
            ShellCommand::Clear => {
                self.controller.clear()?;
                println!("Sessione svuotata.");
            }
            ShellCommand::Status => {
                let state = self.controller.processing_state();
                println!("Stato: {}", state.status);
                println!("Immagini: {}", self.controller.image_count());
                if let Some(result) = self.controller.current_result() {
                    println!(
                        "Ultimo risultato: {} ({})",
                        result.mode.label(),
                        result.timestamp.format("%H:%M:%S")
                    );
                }
            }
            ShellCommand::Help => println!("{}", SHELL_HELP),
            ShellCommand::Quit | ShellCommand::Empty => {}
        }
        Ok(())
    }
}

/// Mode table for a profile, as printed by `modes`
pub fn print_modes(profile: Profile) {
    let spec = profile.spec();
    println!("{} - modalità disponibili:", spec.product_name.bold());
    for mode in profile.modes() {
        println!(
            "  {:<20} {:<28} {}",
            mode.key.cyan(),
            mode.label,
            mode.description.dimmed()
        );
    }
}

/// Print the fixed user message; the details only go to the log
pub fn report_error(error: &anyhow::Error) {
    match error.downcast_ref::<AnalysisError>() {
        Some(analysis) => {
            warn!("{}", analysis);
            eprintln!("{}", analysis.user_message().red());
        }
        None => eprintln!("{} {:#}", "Errore:".red(), error),
    }
}
