//! Proxy Admin: rule list, active configuration and rule editing for the proxy.
//!
//! Without a subcommand this opens the interactive panel. Subcommands run a
//! single operation and print the refreshed views to stdout.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use proxy_admin::api::{InMemoryRuleStore, RuleStore, RuleStoreClient};
use proxy_admin::config::AdminConfig;
use proxy_admin::domain::{App, KeyInput};
use proxy_admin::logging::{self, LogTarget};
use proxy_admin::panel::{AdminPanel, PanelError};
use proxy_admin::ui;

/// Proxy Admin Panel
#[derive(Parser, Debug)]
#[command(name = "proxy-admin")]
#[command(version, about = "Admin panel for the proxy rule store")]
struct Args {
    /// Rule store API base URL [env: PROXY_ADMIN_ENDPOINT] [default: http://127.0.0.1:8081]
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Request timeout in seconds [env: PROXY_ADMIN_TIMEOUT_SECS] [default: 5]
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Log level filter [env: PROXY_ADMIN_LOG, RUST_LOG] [default: info]
    #[arg(long)]
    log_level: Option<String>,

    /// Write logs of the interactive panel to this file [env: PROXY_ADMIN_LOG_FILE]
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Initial value of the form's action field [env: PROXY_ADMIN_DEFAULT_ACTION] [default: direct]
    #[arg(long)]
    action: Option<String>,

    /// Run against an in-memory demo rule store (no API connection required)
    #[arg(long)]
    demo: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the rule list
    Rules,
    /// Print the active configuration
    Config,
    /// Add a rule, then print rules and configuration
    Add {
        /// Rule pattern (required, must not be empty)
        #[arg(long)]
        pattern: String,
        /// Rule action (defaults to the configured default action)
        #[arg(long)]
        action: Option<String>,
        /// Proxy target; omitted from the request when empty
        #[arg(long)]
        proxy: Option<String>,
    },
    /// Delete the rule with PATTERN, then print rules and configuration
    Delete {
        pattern: String,
    },
}

impl Args {
    /// Layer command-line flags over `base`.
    fn apply(&self, mut base: AdminConfig) -> AdminConfig {
        if let Some(endpoint) = &self.endpoint {
            base.endpoint = endpoint.clone();
        }
        if let Some(secs) = self.timeout.filter(|&s| s > 0) {
            base.request_timeout = Duration::from_secs(secs);
        }
        if let Some(level) = &self.log_level {
            base.log_level = level.clone();
        }
        if let Some(path) = &self.log_file {
            base.log_file = Some(path.clone());
        }
        if let Some(action) = &self.action {
            base.default_action = action.clone();
        }
        base
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.apply(AdminConfig::from_env());

    let target = match (&args.command, &config.log_file) {
        (Some(_), _) => LogTarget::Stderr,
        (None, Some(path)) => LogTarget::File(path.as_path()),
        (None, None) => LogTarget::Disabled,
    };
    logging::init_logging(&config.log_level, target).context("failed to open log file")?;

    let store: Arc<dyn RuleStore> = if args.demo {
        info!("using in-memory demo rule store");
        Arc::new(InMemoryRuleStore::demo())
    } else {
        info!(endpoint = %config.endpoint, "using rule store API");
        Arc::new(
            RuleStoreClient::with_timeouts(
                config.endpoint.clone(),
                config.request_timeout,
                config.connect_timeout,
            )
            .context("failed to create API client")?,
        )
    };
    let panel = AdminPanel::new(store);

    match args.command {
        Some(command) => run_command(&panel, &config, command).await,
        None => run_tui(&panel, &config).await,
    }
}

/// Run a single operation and print the resulting views.
async fn run_command(panel: &AdminPanel, config: &AdminConfig, command: Command) -> Result<()> {
    let mut app = App::new(config.default_action.clone());

    let result = match command {
        Command::Rules => {
            panel.load_rules(&mut app).await?;
            print_rules(&app);
            return Ok(());
        }
        Command::Config => {
            panel.load_config(&mut app).await?;
            print_config(&app);
            return Ok(());
        }
        Command::Add {
            pattern,
            action,
            proxy,
        } => {
            app.form.pattern = pattern;
            if let Some(action) = action {
                app.form.action = action;
            }
            app.form.proxy = proxy.unwrap_or_default();
            panel.add_rule(&mut app).await
        }
        Command::Delete { pattern } => panel.delete_rule(&mut app, &pattern).await,
    };

    // Validation failures never reach the store, so there is nothing to show
    if let Err(PanelError::Validation(_)) = &result {
        return result.map_err(Into::into);
    }

    print_rules(&app);
    println!();
    print_config(&app);
    result.map_err(Into::into)
}

fn print_rules(app: &App) {
    for row in &app.rule_rows {
        println!("{}", row.label);
    }
}

fn print_config(app: &App) {
    if let Some(text) = &app.config_text {
        println!("{}", text);
    }
}

/// Run the interactive panel until the user quits.
async fn run_tui(panel: &AdminPanel, config: &AdminConfig) -> Result<()> {
    // Restore the terminal before printing a panic message
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.default_action.clone());
    let result = run_app(&mut terminal, panel, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.map_err(Into::into)
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    panel: &AdminPanel,
    app: &mut App,
) -> io::Result<()> {
    terminal.draw(|frame| ui::render(frame, app))?;

    // Initial load; failures end up in the header
    let _ = panel.initialize(app).await;

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    if let Some(command) = map_key(key).and_then(|input| app.handle_key(input)) {
                        let _ = panel.execute(app, command).await;
                    }
                }
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

/// Translate a terminal key event into panel input.
fn map_key(key: KeyEvent) -> Option<KeyInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(KeyInput::Interrupt),
            _ => None,
        };
    }

    let input = match key.code {
        KeyCode::Char(c) => KeyInput::Char(c),
        KeyCode::Enter => KeyInput::Enter,
        KeyCode::Tab => KeyInput::Tab,
        KeyCode::BackTab => KeyInput::BackTab,
        KeyCode::Backspace => KeyInput::Backspace,
        KeyCode::Delete => KeyInput::Delete,
        KeyCode::Up => KeyInput::Up,
        KeyCode::Down => KeyInput::Down,
        KeyCode::PageUp => KeyInput::PageUp,
        KeyCode::PageDown => KeyInput::PageDown,
        KeyCode::Esc => KeyInput::Esc,
        _ => return None,
    };
    Some(input)
}
