mod app;
mod config;
mod domain;
mod input;
mod notifications;
mod persistence;
mod reminder;
mod ticker;
mod ui;

use anyhow::Result;
use app::{AppEvent, AppState};
use clap::{Parser, Subcommand};
use config::{init_logging, Settings};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{check_glyph, visible_rows, Filter, Permission};
use notifications::DesktopNotifier;
use persistence::{init_local_data_dir, load_metadata, read_tasks, save_permission, FileStorage};
use ratatui::{backend::CrosstermBackend, Terminal};
use reminder::{ReminderScheduler, DEFAULT_REMINDER_SECS};
use std::io;
use std::path::PathBuf;
use ticker::SystemClock;

#[derive(Parser)]
#[command(name = "taskpad")]
#[command(about = "A small terminal to-do list with desktop reminders", long_about = None)]
struct Cli {
    /// Directory holding tasks.json and meta.json. Defaults to the nearest .taskpad, then ~/.taskpad
    #[arg(long, global = true, env = "TASKPAD_DIR")]
    dir: Option<PathBuf>,

    /// Seconds between reminder notifications
    #[arg(
        long,
        global = true,
        env = "TASKPAD_REMINDER_SECS",
        default_value_t = DEFAULT_REMINDER_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    reminder_secs: u64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .taskpad directory in the current directory
    Init,
    /// Add a task
    Add {
        /// Task text (surrounding whitespace is trimmed)
        text: String,
    },
    /// Print tasks
    List {
        /// Which tasks to show: all, active or completed
        #[arg(short, long, default_value = "all")]
        filter: Filter,
    },
    /// Show or change the stored notification permission
    Permission {
        #[command(subcommand)]
        action: PermissionAction,
    },
}

#[derive(Subcommand)]
enum PermissionAction {
    /// Print the current permission
    Status,
    /// Allow notifications without being asked
    Grant,
    /// Block notifications
    Deny,
    /// Forget the answer so the next toggle asks again
    Reset,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Init) = cli.command {
        let data_dir = init_local_data_dir()?;
        println!("Initialized task directory: {}", data_dir.display());
        println!();
        println!("taskpad will now keep tasks for this directory tree here.");
        println!("Run 'taskpad' to start.");
        return Ok(());
    }

    let settings = Settings::resolve(cli.dir, cli.reminder_secs)?;
    let _log_guard = init_logging(&settings)?;
    tracing::info!(dir = %settings.data_dir.display(), "starting");

    match cli.command {
        Some(Commands::Add { text }) => {
            let mut app = open_app(&settings)?;
            match app.add_task(&text)? {
                Some(id) => println!("Added task {}", id),
                None => println!("Nothing to add: task text is empty"),
            }
            Ok(())
        }
        Some(Commands::List { filter }) => {
            let storage = FileStorage::open(&settings.data_dir)?;
            let tasks = read_tasks(&storage);
            for row in visible_rows(&tasks, filter) {
                println!("{} {}  ({})", check_glyph(row.completed), row.text, row.id);
            }
            Ok(())
        }
        Some(Commands::Permission { action }) => {
            let mut storage = FileStorage::open(&settings.data_dir)?;
            let permission = match action {
                PermissionAction::Status => {
                    println!("{}", load_metadata(&storage).notification_permission);
                    return Ok(());
                }
                PermissionAction::Grant => Permission::Granted,
                PermissionAction::Deny => Permission::Denied,
                PermissionAction::Reset => Permission::Default,
            };
            save_permission(&mut storage, permission)?;
            tracing::info!(%permission, "permission set from command line");
            println!("Notification permission: {}", permission);
            Ok(())
        }
        Some(Commands::Init) | None => run_tui(&settings),
    }
}

/// Build the app on top of the data directory
fn open_app(settings: &Settings) -> Result<AppState> {
    let storage = FileStorage::open(&settings.data_dir)?;
    Ok(AppState::load(
        Box::new(storage),
        Box::new(DesktopNotifier),
        Box::new(SystemClock),
        ReminderScheduler::new(settings.reminder_interval),
    ))
}

fn run_tui(settings: &Settings) -> Result<()> {
    eprintln!("Using task directory: {}", settings.data_dir.display());

    let mut app = open_app(settings)?;

    // Permission granted in an earlier session re-arms reminders
    app.resume_notifications();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(error = %format!("{:#}", err), "exited with error");
        eprintln!("Error: {:#}", err);
    }
    tracing::info!("stopped");

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            match event::read()? {
                // Only process key press events (ignore key release)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match input::handle_key(app, key) {
                        Ok(true) => return Ok(()),
                        Ok(false) => {}
                        Err(e) => report_error(app, e),
                    }
                }
                Event::Mouse(mouse) => {
                    if let Err(e) = input::handle_mouse(app, mouse) {
                        report_error(app, e);
                    }
                }
                _ => {}
            }
        }

        if let Err(e) = app.dispatch(AppEvent::Tick) {
            report_error(app, e);
        }
    }
}

/// Keep running after a failed action, but tell the user
fn report_error(app: &mut AppState, err: anyhow::Error) {
    tracing::error!(error = %format!("{:#}", err), "action failed");
    app.status_message = Some(format!("Error: {:#}", err));
}
