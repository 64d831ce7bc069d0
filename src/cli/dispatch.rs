//! CLI mode dispatch
//!
//! - shell: interactive loop over stdin
//! - profiles / analyze / define / chat: sign in, run one action, print
//! - search-url: offline, needs no account

use std::fmt;
use std::io::Write;

use tracing::info;

use crate::api::UploadFile;
use crate::cli::config_root::resolve_config_root;
use crate::cli::factory::create_app_from_config;
use crate::cli::shell::run_shell;
use crate::cli::{
    AppConfig, Args, Error, Mode, Result, EXIT_CONFIG_ERROR, EXIT_FAILURE, EXIT_SUCCESS,
};
use crate::ui::render::{render_analysis_view, render_definition, render_notice};
use crate::ui::{search_url, App, ChatRole};

/// Exit code wrapper for CLI operations
pub type ExitCode = i32;

pub const PASSWORD_ENV: &str = "ALTHEA_PASSWORD";

/// Account credentials for one-shot modes
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Email from the flag (or `$ALTHEA_EMAIL`), password from `$ALTHEA_PASSWORD`
    pub fn from_env(email: Option<String>) -> Option<Self> {
        let email = email.filter(|email| !email.trim().is_empty())?;
        let password = std::env::var(PASSWORD_ENV)
            .ok()
            .filter(|password| !password.is_empty())?;
        Some(Self { email, password })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Run CLI mode and return exit code
///
/// Called from main() after argument parsing and logging setup.
pub async fn run_cli_mode(args: Args) -> ExitCode {
    let config_root = match resolve_config_root(args.config_root.clone()) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_CONFIG_ERROR;
        }
    };
    let config = match AppConfig::load(&config_root) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_CONFIG_ERROR;
        }
    };

    let mode = args.mode.clone().unwrap_or(Mode::Shell);
    let mut stdout = std::io::stdout();

    // Offline: no provider key needed
    if let Mode::SearchUrl { term } = &mode {
        return match print_search_url(&config.lookup.search_url, &term.join(" "), &mut stdout) {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => {
                eprintln!("Error: {}", e);
                EXIT_FAILURE
            }
        };
    }

    let app = match create_app_from_config(&config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_CONFIG_ERROR;
        }
    };
    info!(
        config_root = %config_root.display(),
        backend = %config.backend.base_url,
        "althea starting"
    );

    if mode == Mode::Shell {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        return match run_shell(&app, stdin, &mut stdout).await {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                EXIT_FAILURE
            }
        };
    }

    let credentials = Credentials::from_env(args.email.clone());
    match run_mode(&app, mode, credentials, &mut stdout).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            match e {
                Error::Config(_) => EXIT_CONFIG_ERROR,
                _ => EXIT_FAILURE,
            }
        }
    }
}

/// Run a one-shot mode against an app
pub async fn run_mode<W: Write>(
    app: &App,
    mode: Mode,
    credentials: Option<Credentials>,
    out: &mut W,
) -> Result<()> {
    match mode {
        Mode::Shell => Err(Error::InvalidArgs(
            "shell mode reads from a terminal".to_string(),
        )),
        Mode::SearchUrl { term } => print_search_url(app.search_template(), &term.join(" "), out),
        Mode::Profiles => {
            sign_in(app, credentials).await?;
            let view = app.view().await;
            if view.profiles.is_empty() {
                writeln!(out, "No profiles.")?;
            }
            for (i, profile) in view.profiles.iter().enumerate() {
                writeln!(out, "{}) {}\t{}\t{}", i + 1, profile.id, profile.name, profile.relation)?;
            }
            Ok(())
        }
        Mode::Analyze { file, profile } => {
            let upload = UploadFile::from_path(&file).await?;
            sign_in(app, credentials).await?;
            use_profile(app, profile.as_deref()).await?;
            let analyzed = app.analyze(Some(upload)).await;
            flush_notices(app, out).await?;
            if !analyzed {
                return Err(Error::Failed("analysis failed".to_string()));
            }
            if let Some(view) = app.view().await.analysis {
                write!(out, "{}", render_analysis_view(&view))?;
            }
            Ok(())
        }
        Mode::Define { term } => {
            sign_in(app, credentials).await?;
            let defined = app.show_definition(&term.join(" ")).await;
            flush_notices(app, out).await?;
            if let Some(panel) = app.view().await.definition {
                write!(out, "{}", render_definition(&panel))?;
            }
            if !defined {
                return Err(Error::Failed("definition lookup failed".to_string()));
            }
            Ok(())
        }
        Mode::Chat { message, profile } => {
            sign_in(app, credentials).await?;
            use_profile(app, profile.as_deref()).await?;
            let sent = app.send_chat(&message.join(" ")).await;
            flush_notices(app, out).await?;
            if !sent {
                return Err(Error::Failed("chat failed".to_string()));
            }
            let view = app.view().await;
            if let Some(reply) = view
                .transcript
                .turns()
                .iter()
                .rev()
                .find(|turn| turn.role == ChatRole::Assistant)
            {
                writeln!(out, "{}", reply.text)?;
            }
            Ok(())
        }
    }
}

async fn sign_in(app: &App, credentials: Option<Credentials>) -> Result<()> {
    let credentials = credentials.ok_or_else(|| {
        Error::MissingArgument("--email (or ALTHEA_EMAIL) and ALTHEA_PASSWORD".to_string())
    })?;
    let result = app.sign_in(&credentials.email, &credentials.password).await;
    // The error already carries the alert text
    app.take_notices().await;
    result?;
    Ok(())
}

async fn use_profile(app: &App, reference: Option<&str>) -> Result<()> {
    let Some(reference) = reference else {
        return Ok(());
    };
    let found = app
        .view()
        .await
        .find_profile(reference)
        .map(|profile| profile.id.clone());
    let profile_id =
        found.ok_or_else(|| Error::InvalidArgs(format!("Unknown profile: {}", reference)))?;
    app.select_profile(&profile_id).await;
    Ok(())
}

async fn flush_notices<W: Write>(app: &App, out: &mut W) -> Result<()> {
    for notice in app.take_notices().await {
        writeln!(out, "{}", render_notice(&notice))?;
    }
    Ok(())
}

fn print_search_url<W: Write>(template: &str, term: &str, out: &mut W) -> Result<()> {
    let url = search_url(template, term)
        .ok_or_else(|| Error::Failed(format!("cannot build a search URL for '{}'", term)))?;
    writeln!(out, "{}", url)?;
    Ok(())
}
