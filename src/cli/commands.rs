use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::{
    app::{get_config_dir, init_config, Config},
    constants::LOCAL_CONFIG_PATH,
    models::ModelFactory,
    modes::Profile,
    runtime::{print_modes, AnalysisController, NonInteractiveRunner, Shell},
};

use super::{Commands, OutputFormat};

/// Handle CLI subcommands
pub async fn handle_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Analyze {
            images,
            profile,
            mode,
            notes,
            export,
            out_dir,
            output_format,
        } => {
            let profile = profile.unwrap_or(config.default_profile);
            run_analysis(
                &config,
                profile,
                &mode,
                &images,
                notes.as_deref(),
                &export,
                out_dir,
                output_format,
            )
            .await
        }
        Commands::Shell { profile } => run_shell(&config, profile.unwrap_or(config.default_profile)).await,
        Commands::Modes { profile } => {
            print_modes(profile.unwrap_or(config.default_profile));
            Ok(())
        }
        Commands::Init => {
            println!("Initializing reperto configuration...");
            match init_config()? {
                Some(path) => println!("Created default configuration at: {}", path.display()),
                None => println!("Configuration already present, nothing to do."),
            }
            Ok(())
        }
        Commands::Status => {
            show_status(&config)?;
            Ok(())
        }
        Commands::Version => {
            show_version();
            Ok(())
        }
    }
}

fn controller(config: &Config) -> Result<AnalysisController> {
    let model = ModelFactory::create(&config.model)?;
    Ok(AnalysisController::new(model, config.model.generation_config()))
}

#[allow(clippy::too_many_arguments)]
async fn run_analysis(
    config: &Config,
    profile: Profile,
    mode_key: &str,
    images: &[PathBuf],
    notes: Option<&str>,
    exports: &[crate::report::ExportFormat],
    out_dir: Option<PathBuf>,
    output_format: OutputFormat,
) -> Result<()> {
    let mode = profile.parse_mode(mode_key).with_context(|| {
        format!(
            "Unknown mode '{}' for profile {}. Valid modes: {}",
            mode_key,
            profile.key(),
            profile.mode_keys()
        )
    })?;

    let runner = NonInteractiveRunner::new(controller(config)?, config.report.clone());
    let report = runner
        .execute(images, mode, notes, exports, out_dir.as_deref())
        .await?;

    println!("{}", runner.format_result(&report, output_format));
    Ok(())
}

/// Start the interactive shell
pub async fn run_shell(config: &Config, profile: Profile) -> Result<()> {
    let shell = Shell::new(controller(config)?, profile, config.report.clone());
    shell.run().await
}

/// Show version information
pub fn show_version() {
    println!("reperto v{}", env!("CARGO_PKG_VERSION"));
    println!("   Forensic and rock art image reports from a multimodal model");
}

/// Show configuration and credential status
fn show_status(config: &Config) -> Result<()> {
    println!("reperto status:");
    println!();

    let global = get_config_dir()?.join("config.toml");
    if global.exists() {
        println!("  [OK] Configuration: {}", global.display());
    } else {
        println!("  [WARNING] Configuration: Not found (using defaults)");
    }
    if PathBuf::from(LOCAL_CONFIG_PATH).exists() {
        println!("  [OK] Local overrides: {}", LOCAL_CONFIG_PATH);
    }

    println!("  Model: {} at {}", config.model.name.cyan(), config.model.endpoint);
    println!(
        "  Generation: temperature {}, max {} tokens, safety {}",
        config.model.temperature, config.model.max_output_tokens, config.model.safety_threshold
    );
    println!("  Default profile: {}", config.default_profile.key());
    println!("  Output directory: {}", config.report.output_dir.display());

    let key_set = std::env::var(&config.model.api_key_env)
        .map(|key| !key.trim().is_empty())
        .unwrap_or(false);
    if key_set {
        println!("  [OK] {}: Set", config.model.api_key_env);
    } else {
        println!("  [ERROR] {}: Not set", config.model.api_key_env);
    }

    println!();
    Ok(())
}
