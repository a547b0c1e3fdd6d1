use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use eyre::Result;
use tracing_subscriber::EnvFilter;

use healthplex_core::{FlatFormData, FormType};
use healthplex_export::{DocxSnapshot, SnapshotRenderer, build_attachment};
use healthplex_forms::config::{self, FormsConfig, WebhookUrls};
use healthplex_forms::Submitter;
use healthplex_instruments::{Instrument, get_instrument};
use healthplex_payload::{StructuredPayload, SubmissionContext, build_payload};

/// Build, score and submit Healthplex intake forms from collected form data.
///
/// Form data files are flat JSON objects of field name to value, as saved
/// in drafts.
#[derive(Parser)]
#[command(name = "healthplex", version)]
struct Cli {
    /// Config file. Defaults to the platform config directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the structured payload for a form.
    Build {
        #[arg(long)]
        form: FormType,
        data: PathBuf,
        /// Submission time, RFC 3339. Defaults to now.
        #[arg(long)]
        at: Option<jiff::Timestamp>,
    },
    /// Score a metabolic questionnaire.
    Score { data: PathBuf },
    /// Write a DOCX copy of a form.
    Snapshot {
        #[arg(long)]
        form: FormType,
        data: PathBuf,
        #[arg(long, short)]
        out: PathBuf,
    },
    /// Send a form to its configured webhook.
    Submit {
        #[arg(long)]
        form: FormType,
        data: PathBuf,
        /// Attach a DOCX copy of the form.
        #[arg(long)]
        snapshot: bool,
    },
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Write a config with placeholder webhook URLs.
    Init {
        #[arg(long)]
        force: bool,
    },
    Show,
    Path,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    match cli.command {
        Command::Build { form, data, at } => {
            let ctx = match at {
                Some(at) => SubmissionContext {
                    submitted_at: at,
                    ..SubmissionContext::now()
                },
                None => SubmissionContext::now(),
            };
            let payload = build_payload(form, &read_form_data(&data)?, &ctx)?;
            println!("{}", payload.to_json_pretty()?);
        }
        Command::Score { data } => {
            let summary = get_instrument("metabolic")?.score(&read_form_data(&data)?)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Snapshot { form, data, out } => {
            let payload = build_payload(form, &read_form_data(&data)?, &SubmissionContext::now())?;
            let bytes = DocxSnapshot::default().render(&payload)?;
            std::fs::write(&out, bytes)
                .map_err(|e| eyre::eyre!("failed to write {}: {e}", out.display()))?;
            tracing::info!(path = %out.display(), "snapshot written");
        }
        Command::Submit {
            form,
            data,
            snapshot,
        } => {
            let config = config::load_config(&config_path(cli.config)?)?;
            submit(&config, form, &read_form_data(&data)?, snapshot)?;
        }
        Command::Config(command) => run_config(command, config_path(cli.config)?)?,
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn config_path(flag: Option<PathBuf>) -> Result<PathBuf> {
    match flag {
        Some(path) => Ok(path),
        None => Ok(config::default_config_path()?),
    }
}

fn read_form_data(path: &Path) -> Result<FlatFormData> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&contents)
        .map_err(|e| eyre::eyre!("{} is not flat form data: {e}", path.display()))
}

fn submit(config: &FormsConfig, form: FormType, data: &FlatFormData, snapshot: bool) -> Result<()> {
    let ctx = SubmissionContext::now();
    let mut payload: StructuredPayload = build_payload(form, data, &ctx)?;
    if snapshot {
        match build_attachment(&DocxSnapshot::default(), &payload, &ctx.submitted_on()) {
            Ok(attachment) => payload = payload.with_attachment(attachment),
            Err(e) => tracing::warn!(error = %e, "snapshot failed, submitting without it"),
        }
    }

    eprintln!("{}", config.settings.button_text(true));
    let submitter = Submitter::http(config.settings.request_timeout());
    let result = submitter.submit(config.webhook_url(form), &payload);
    if !result.success {
        return Err(eyre::eyre!("{}", result.message));
    }
    println!("{}", result.message);
    Ok(())
}

fn run_config(command: ConfigCommand, path: PathBuf) -> Result<()> {
    match command {
        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                return Err(eyre::eyre!(
                    "{} already exists; pass --force to overwrite",
                    path.display()
                ));
            }
            let placeholder = |hook: &str| format!("https://your-n8n-instance.com/webhook/{hook}");
            let config = FormsConfig::new(WebhookUrls {
                new_consultation: placeholder("new-consultation"),
                family_history: placeholder("family-history"),
                metabolic_assessment: placeholder("metabolic-assessment"),
                intake_wizard: placeholder("intake-wizard"),
            });
            config::save_config(&path, &config)?;
            println!("{}", path.display());
        }
        ConfigCommand::Show => {
            let config = config::load_config(&path)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            for form in FormType::ALL {
                if !config::is_configured(config.webhook_url(form)) {
                    tracing::warn!(form = form.key(), "webhook not configured");
                }
            }
        }
        ConfigCommand::Path => println!("{}", path.display()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_submit() {
        let cli = Cli::try_parse_from([
            "healthplex",
            "submit",
            "--form",
            "intake-wizard",
            "answers.json",
            "--snapshot",
        ])
        .unwrap();
        let Command::Submit {
            form,
            data,
            snapshot,
        } = cli.command
        else {
            panic!("expected submit");
        };
        assert_eq!(form, FormType::IntakeWizard);
        assert_eq!(data, PathBuf::from("answers.json"));
        assert!(snapshot);
    }

    #[test]
    fn rejects_unknown_form() {
        assert!(Cli::try_parse_from(["healthplex", "build", "--form", "tax", "a.json"]).is_err());
    }

    #[test]
    fn build_accepts_fixed_time() {
        let cli = Cli::try_parse_from([
            "healthplex",
            "--json-logs",
            "build",
            "--form",
            "familyHistory",
            "a.json",
            "--at",
            "2025-03-04T15:20:00Z",
        ])
        .unwrap();
        assert!(cli.json_logs);
        assert!(matches!(cli.command, Command::Build { at: Some(_), .. }));
    }
}
