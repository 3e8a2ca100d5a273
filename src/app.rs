use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::events::network::{Event as NetworkEvent, Handler as NetworkEventHandler};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::events::ticker::{Ticker, TIMER_TICK};
use crate::logger;
use crate::state::State;
use crate::store::{AppState, Store};
use crate::trends::Trends;
use crate::ui::Theme;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout, Stdout};
use std::sync::Arc;
use tokio::sync::Mutex;

pub type NetworkEventSender = std::sync::mpsc::Sender<NetworkEvent>;
type NetworkEventReceiver = std::sync::mpsc::Receiver<NetworkEvent>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: Arc<Mutex<State>>,
    config: Config,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config) -> AppResult<()> {
        logger::init(config.level_filter()?)?;

        info!("Starting application...");
        if let Some(path) = config.file_path() {
            debug!("Using configuration at {}.", path.display());
        }
        let theme = Theme::from_name(&config.theme_name).unwrap_or_else(|| {
            warn!("Unknown theme '{}', using the default.", config.theme_name);
            Theme::default()
        });
        let initial = if config.seed_demo_data {
            AppState::seeded()
        } else {
            AppState::default()
        };
        info!(
            "Loaded {} projects and {} raw materials.",
            initial.projects().len(),
            initial.raw_materials().len()
        );

        let (tx, rx) = std::sync::mpsc::channel::<NetworkEvent>();
        let state = State::new(Store::new(initial), tx, &config, theme);
        let app = App {
            state: Arc::new(Mutex::new(state)),
            config,
        };
        app.start_network(rx);
        app.start_ui().await?;

        info!("Exiting application...");
        Ok(())
    }

    /// Start a separate thread for asynchronous state mutations.
    ///
    fn start_network(&self, net_receiver: NetworkEventReceiver) {
        debug!("Creating new thread for asynchronous networking...");
        let cloned_state = Arc::clone(&self.state);
        let base_url = self.config.trend_service_url.to_owned();
        std::thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    error!("Failed to build network runtime: {}", e);
                    return;
                }
            };
            runtime.block_on(async {
                let trends = Trends::new(&base_url);
                let mut network_event_handler = NetworkEventHandler::new(&cloned_state, &trends);
                while let Ok(network_event) = net_receiver.recv() {
                    match network_event_handler.handle(network_event).await {
                        Ok(_) => (),
                        Err(e) => error!("Failed to handle network event: {}", e),
                    }
                }
            })
        });
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. The terminal is restored even when the
    /// loop fails.
    ///
    async fn start_ui(&self) -> AppResult<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        enable_raw_mode()?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        let result = self.run(&mut terminal).await;

        disable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;
        terminal.show_cursor()?;

        result
    }

    async fn run(&self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> AppResult<()> {
        let terminal_event_handler = TerminalEventHandler::new();
        let mut ticker: Option<Ticker> = None;
        loop {
            let mut state = self.state.lock().await;
            if let Ok(size) = terminal.size() {
                state.set_terminal_size(size);
            };
            logger::flush();
            terminal
                .draw(|frame| crate::ui::render(frame, &mut state))
                .map_err(|e| AppError::Terminal(format!("draw failed: {}", e)))?;
            let keep_running = terminal_event_handler.handle_next(&mut state)?;

            // Ticks flow only while the timer runs.
            match (state.timer_running(), ticker.is_some()) {
                (true, false) => {
                    ticker = Some(Ticker::start(terminal_event_handler.sender(), TIMER_TICK))
                }
                (false, true) => ticker = None,
                _ => (),
            }

            if !keep_running {
                debug!("Received application exit request.");
                if state.timer_phase() != crate::store::TimerPhase::Idle {
                    warn!("Exiting with the timer still active; the open segment is not logged.");
                }
                break;
            }
        }
        Ok(())
    }
}
