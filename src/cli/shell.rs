//! Interactive shell
//!
//! Reads one command per line, routes it through `App`, and prints the
//! resulting view and notices. Generic over input and output so it can be
//! driven from a byte slice in tests.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::api::UploadFile;
use crate::ui::render::{render_definition, render_notice, render_view};
use crate::ui::{parse_command, render_help, App, ChatRole, Command};

/// Run the shell until `/quit` or end of input
pub async fn run_shell<R, W>(app: &App, input: R, out: &mut W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    writeln!(out, "Althea. Type /help for commands, /quit to exit.")?;

    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await.context("reading shell input")? else {
            break;
        };
        let command = parse_command(&line);
        if command == Command::Quit {
            break;
        }
        execute(app, command, &mut lines, out).await?;
        for notice in app.take_notices().await {
            writeln!(out, "{}", render_notice(&notice))?;
        }
    }
    Ok(())
}

async fn execute<R, W>(
    app: &App,
    command: Command,
    lines: &mut Lines<R>,
    out: &mut W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    match command {
        Command::None | Command::Quit => {}
        Command::Help => writeln!(out, "{}", render_help())?,
        Command::Login { email, password } => {
            let password = read_password(password, lines, out).await?;
            if app.sign_in(&email, &password).await.is_ok() {
                writeln!(out, "Signed in as {}", email.trim())?;
                write!(out, "{}", render_view(&app.view().await))?;
            }
        }
        Command::Register { email, password } => {
            let password = read_password(password, lines, out).await?;
            if app.sign_up(&email, &password).await.is_ok() {
                write!(out, "{}", render_view(&app.view().await))?;
            }
        }
        Command::Logout => {
            app.sign_out().await;
            writeln!(out, "Signed out.")?;
        }
        Command::Profiles => {
            app.refresh_profiles().await;
            write!(out, "{}", render_view(&app.view().await))?;
        }
        Command::NewProfile(name) => {
            if app.create_profile(Some(&name)).await {
                write!(out, "{}", render_view(&app.view().await))?;
            }
        }
        Command::UseProfile(reference) => {
            let found = app
                .view()
                .await
                .find_profile(&reference)
                .map(|profile| profile.id.clone());
            match found {
                Some(profile_id) => {
                    app.select_profile(&profile_id).await;
                    write!(out, "{}", render_view(&app.view().await))?;
                }
                None => writeln!(out, "No such profile: {}", reference)?,
            }
        }
        Command::Analyze(path) => {
            let file = if path.is_empty() {
                None
            } else {
                match UploadFile::from_path(Path::new(&path)).await {
                    Ok(file) => Some(file),
                    Err(err) => {
                        writeln!(out, "Could not read {}: {}", path, err)?;
                        return Ok(());
                    }
                }
            };
            if file.is_some() {
                writeln!(out, "Analyzing...")?;
            }
            if app.analyze(file).await {
                write!(out, "{}", render_view(&app.view().await))?;
            }
        }
        Command::Define(reference) => {
            let term = resolve_term(app, &reference).await;
            app.show_definition(&term).await;
            if let Some(panel) = app.view().await.definition {
                write!(out, "{}", render_definition(&panel))?;
            }
        }
        Command::Close => {
            app.close_definition().await;
        }
        Command::Show => write!(out, "{}", render_view(&app.view().await))?,
        Command::Unknown(name) => {
            writeln!(out, "Unknown command: /{}. Type /help for commands.", name)?
        }
        Command::Chat(text) => {
            if app.send_chat(&text).await {
                let view = app.view().await;
                if let Some(reply) = view
                    .transcript
                    .turns()
                    .iter()
                    .rev()
                    .find(|turn| turn.role == ChatRole::Assistant)
                {
                    writeln!(out, "althea: {}", reply.text)?;
                }
            }
        }
    }
    Ok(())
}

/// Password given inline, or the next input line
async fn read_password<R, W>(
    given: Option<String>,
    lines: &mut Lines<R>,
    out: &mut W,
) -> anyhow::Result<String>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    if let Some(password) = given {
        return Ok(password);
    }
    write!(out, "Password: ")?;
    out.flush()?;
    let line = lines.next_line().await.context("reading password")?;
    Ok(line.unwrap_or_default())
}

/// A number picks from the terms of the shown analysis; anything else is the term
async fn resolve_term(app: &App, reference: &str) -> String {
    if let Ok(index) = reference.trim().parse::<usize>() {
        let terms = app
            .view()
            .await
            .analysis
            .map(|view| view.terms())
            .unwrap_or_default();
        if let Some(term) = index.checked_sub(1).and_then(|i| terms.get(i)) {
            return term.clone();
        }
    }
    reference.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::identity::{Identity, StubIdentity};
    use crate::transport::{FakeReply, FakeTransport, Method, Transport};

    fn app(fake: &FakeTransport) -> App {
        App::new(
            Identity::Stub(StubIdentity::new("dev-token")),
            ApiClient::new("http://backend", Transport::Fake(fake.clone())),
        )
    }

    async fn run(app: &App, script: &str) -> String {
        let mut out = Vec::new();
        run_shell(app, script.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_quit_ends_session() {
        let fake = FakeTransport::new();
        let printed = run(&app(&fake), "/quit\n/login a@b.c pw\n").await;
        assert!(!printed.contains("Signed in"));
        assert_eq!(fake.request_count(), 0);
    }

    #[tokio::test]
    async fn test_login_prompts_for_password() {
        let fake = FakeTransport::new();
        fake.always(Method::Get, "/profiles", FakeReply::json(serde_json::json!([])));
        let app = app(&fake);

        let printed = run(&app, "/login me@example.com\nsecret\n").await;
        assert!(printed.contains("Password: "));
        assert!(printed.contains("Signed in as me@example.com"));
        assert!(printed.contains("No profiles yet."));
        assert!(app.session().await.is_some());
    }

    #[tokio::test]
    async fn test_define_by_number() {
        let fake = FakeTransport::new();
        fake.always(
            Method::Get,
            "/profiles",
            FakeReply::json(serde_json::json!([{"id": "p1", "name": "Me", "relation": "Self"}])),
        );
        fake.always(
            Method::Get,
            "/profiles/p1/latest",
            FakeReply::json(serde_json::json!({
                "summary": "Check [[TSH]] and [[T4]]",
                "risks": [],
                "recommendations": []
            })),
        );
        fake.always(
            Method::Post,
            "/define",
            FakeReply::json(serde_json::json!({"definition": "Thyroxine."})),
        );
        let app = app(&fake);

        let printed = run(&app, "/login me@example.com pw\n/define 2\n").await;
        assert!(printed.contains("Terms: 1) TSH  2) T4"));
        assert!(printed.contains("== T4 =="));
        assert!(printed.contains("Thyroxine."));
        let define = &fake.requests_to("/define")[0];
        assert_eq!(define.json_body().unwrap()["term"], "T4");
    }

    #[tokio::test]
    async fn test_analyze_without_path_alerts() {
        let fake = FakeTransport::new();
        let printed = run(&app(&fake), "/analyze\n").await;
        assert!(printed.contains("! Please select a PDF report first."));
        assert_eq!(fake.request_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let fake = FakeTransport::new();
        let printed = run(&app(&fake), "/bogus\n").await;
        assert!(printed.contains("Unknown command: /bogus"));
    }
}
