/// Runtime module - Gateway
/// Request mediation, the session controller and the two front ends

mod controller;
mod mediator;
mod non_interactive;
mod shell;

pub use controller::AnalysisController;
pub use mediator::{
    interpret, mediate, unexpected_termination_message, Outcome, OutcomeKind,
    ACCESS_DENIED_MESSAGE, TRUNCATION_NOTICE,
};
pub use non_interactive::{
    export_result, format_report, AnalysisReport, ExecutionMetadata, ExportRecord,
    NonInteractiveRunner,
};
pub use shell::{parse_command, print_modes, report_error, Shell, ShellCommand, SHELL_HELP};
