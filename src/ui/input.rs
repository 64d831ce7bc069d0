//! Shell command parsing
//!
//! INPUT ROUTING:
//! A) COMMAND: input starts with "/"
//!    - /login, /register, /logout
//!    - /profiles, /new, /use
//!    - /analyze, /define, /close, /show
//!    - /help, /quit
//!
//! B) CHAT: anything else is sent as a chat message
//!
//! EXIT: /quit, /q, /exit take no arguments

/// Parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    None,
    Quit,
    Help,
    /// /login <email> [password]
    Login {
        email: String,
        password: Option<String>,
    },
    /// /register <email> [password]
    Register {
        email: String,
        password: Option<String>,
    },
    Logout,
    /// /profiles: reload the list
    Profiles,
    /// /new <name>
    NewProfile(String),
    /// /use <index|id>
    UseProfile(String),
    /// /analyze <path> (empty when no file was given)
    Analyze(String),
    /// /define <term|index>
    Define(String),
    /// /close: close the definition drawer
    Close,
    /// /show: redraw the view
    Show,
    /// Unrecognised "/" command
    Unknown(String),
    Chat(String),
}

/// Parse one line of shell input
///
/// # Examples
/// ```
/// use althea::ui::input::{parse_command, Command};
///
/// assert_eq!(parse_command("/quit"), Command::Quit);
/// assert_eq!(parse_command("/use 2"), Command::UseProfile("2".to_string()));
/// assert!(matches!(parse_command("what does LDL mean?"), Command::Chat(_)));
/// ```
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    if input.is_empty() {
        return Command::None;
    }
    let Some(rest) = input.strip_prefix('/') else {
        return Command::Chat(input.to_string());
    };
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        return Command::None;
    }

    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };

    match name {
        "quit" | "q" | "exit" => {
            if args.is_empty() {
                Command::Quit
            } else {
                Command::None
            }
        }
        "help" | "h" => Command::Help,
        "login" => credentials(args)
            .map(|(email, password)| Command::Login { email, password })
            .unwrap_or(Command::None),
        "register" | "signup" => credentials(args)
            .map(|(email, password)| Command::Register { email, password })
            .unwrap_or(Command::None),
        "logout" => Command::Logout,
        "profiles" | "p" => Command::Profiles,
        "new" => with_arg(args, Command::NewProfile),
        "use" | "u" => with_arg(args, Command::UseProfile),
        "analyze" | "a" => Command::Analyze(args.to_string()),
        "define" | "d" => with_arg(args, Command::Define),
        "close" => Command::Close,
        "show" | "s" => Command::Show,
        other => Command::Unknown(other.to_string()),
    }
}

fn with_arg(args: &str, make: fn(String) -> Command) -> Command {
    if args.is_empty() {
        Command::None
    } else {
        make(args.to_string())
    }
}

fn credentials(args: &str) -> Option<(String, Option<String>)> {
    let mut parts = args.split_whitespace();
    let email = parts.next()?.to_string();
    let password = parts.next().map(str::to_string);
    Some((email, password))
}

/// Help text for the shell
pub fn render_help() -> String {
    [
        "Commands:",
        "  /login <email> [password]   Sign in",
        "  /register <email> [password] Create an account",
        "  /logout                     Sign out",
        "  /profiles                   Reload profiles",
        "  /new <name>                 Add a family profile",
        "  /use <number|id>            Switch profile",
        "  /analyze <path>             Upload a report for the active profile",
        "  /define <term|number>       Look up a term",
        "  /close                      Close the definition",
        "  /show                       Show the current view",
        "  /help                       This help",
        "  /quit                       Exit",
        "Anything else is sent to the chat.",
    ]
    .join("\n")
}
