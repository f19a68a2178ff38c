use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use ratatui_image::picker::{Picker, ProtocolType};
use std::{
    io,
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;

/// Codec comparison split viewer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging to <tmp>/splitview-debug.log
    #[arg(short, long)]
    debug: bool,

    /// Enable vim keybindings (hjkl)
    #[arg(long)]
    vim: bool,

    /// Path to config file (default: platform-specific, see docs)
    #[arg(short, long)]
    config: Option<String>,

    /// Server hosting the /output/ listing (overrides config)
    #[arg(short, long)]
    url: Option<String>,

    /// Terminal graphics protocol: auto, kitty, sixel, iterm2, halfblocks
    #[arg(short, long)]
    protocol: Option<String>,
}

mod app;
mod handlers;
mod logger;
mod services;
mod ui;

use services::LoadUpdate;
use splitview::api::{CatalogClient, ListingEntry};
use splitview::codec::probe::{spawn_probes, BuiltinDecoderLoader, ImageSampleDecoder};
use splitview::codec::{Dispatcher, Registry};
use splitview::config::Config;
use splitview::model;

/// Folder listings as delivered by the catalog task
pub(crate) type Listings = Vec<(String, Vec<ListingEntry>)>;

/// Poll timeout while nothing is moving
const IDLE_POLL: Duration = Duration::from_millis(250);
/// Poll timeout while background work may report back
const BUSY_POLL: Duration = Duration::from_millis(50);

pub struct App {
    pub model: model::Model,

    client: CatalogClient,
    dispatcher: Dispatcher,
    picker: Picker,
    catalog_rx: mpsc::UnboundedReceiver<Result<Listings>>,
    load_tx: mpsc::UnboundedSender<LoadUpdate>,
    load_rx: mpsc::UnboundedReceiver<LoadUpdate>,

    /// Terminal cells the composited frame occupies
    view_area: Rect,
    /// Last encoded split frame
    frame: Option<ui::split_view::SplitFrame>,
}

impl App {
    fn new(config: Config) -> Self {
        let mut registry = Registry::builtin();
        registry.apply_overrides(&config.formats);
        let registry = Arc::new(registry);

        // Probes run in the background; loads wait on them per format
        let capabilities = spawn_probes(
            &registry,
            Arc::new(ImageSampleDecoder),
            Arc::new(BuiltinDecoderLoader),
        );
        let dispatcher = Dispatcher::new(registry, capabilities);

        let client = CatalogClient::new(config.base_url.clone());
        log::info!("Catalog server: {}", client.base_url());

        let (catalog_tx, catalog_rx) = mpsc::unbounded_channel();
        app::spawn_catalog_load(client.clone(), catalog_tx);

        let (load_tx, load_rx) = mpsc::unbounded_channel();

        let picker = build_picker(&config.image_protocol);

        let mut model = model::Model::new(config.vim_mode, config.show_menu);
        model.ui.font_size = picker.font_size();

        Self {
            model,
            client,
            dispatcher,
            picker,
            catalog_rx,
            load_tx,
            load_rx,
            view_area: Rect::default(),
            frame: None,
        }
    }

    /// Settled capability label per registered format, None while probing
    pub fn capability_labels(&self) -> Vec<(String, Option<&'static str>)> {
        self.dispatcher
            .registry()
            .entries()
            .iter()
            .map(|entry| {
                let label = self
                    .dispatcher
                    .capabilities()
                    .peek(&entry.name)
                    .map(|capability| capability.label());
                (entry.name.clone(), label)
            })
            .collect()
    }

    /// Whether background work may report back soon
    fn is_busy(&self) -> bool {
        matches!(self.model.catalog.state, model::CatalogState::Loading)
            || self.model.view.left.pending.is_some()
            || self.model.view.right.pending.is_some()
            || !self.dispatcher.capabilities().all_settled()
    }

    /// How long the event loop may block waiting for input
    fn poll_timeout(&self, now: Instant) -> Duration {
        if let Some(until_tick) = self.model.view.split.time_until_tick(now) {
            return until_tick;
        }
        if self.is_busy() {
            BUSY_POLL
        } else {
            IDLE_POLL
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        handlers::handle_key(self, key)
    }
}

/// Terminal graphics setup, honoring the configured protocol
fn build_picker(protocol: &str) -> Picker {
    let mut picker = match Picker::from_query_stdio() {
        Ok(p) => p,
        Err(e) => {
            log::warn!("Failed to detect terminal graphics: {}", e);
            Picker::from_fontsize((8, 16)) // Fallback font size
        }
    };

    let font_size = picker.font_size();
    log::debug!("Font size: {}x{}", font_size.0, font_size.1);

    match protocol.to_lowercase().as_str() {
        // Already detected by from_query_stdio()
        "auto" => log::debug!("Using auto-detected protocol"),
        "iterm2" => picker.set_protocol_type(ProtocolType::Iterm2),
        "kitty" => picker.set_protocol_type(ProtocolType::Kitty),
        "sixel" => picker.set_protocol_type(ProtocolType::Sixel),
        "halfblocks" => picker.set_protocol_type(ProtocolType::Halfblocks),
        unknown => log::warn!("Unknown protocol '{}', using auto-detect", unknown),
    }

    picker
}

/// Locate the config file
///
/// An explicit `--config` must exist. Otherwise the platform config dir and
/// then `./config.yaml` are tried; finding neither means defaults.
fn get_config_path(cli_path: Option<String>) -> Result<Option<PathBuf>> {
    // If CLI argument provided, use it
    if let Some(path) = cli_path {
        let p = PathBuf::from(&path);
        if p.exists() {
            return Ok(Some(p));
        }
        anyhow::bail!("Config file not found at specified path: {}", path);
    }

    // Try ~/.config/splitview/config.yaml
    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("splitview").join("config.yaml");
        if config_path.exists() {
            return Ok(Some(config_path));
        }
    }

    // Fallback to ./config.yaml
    let local_config = PathBuf::from("config.yaml");
    if local_config.exists() {
        return Ok(Some(local_config));
    }

    Ok(None)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logger::init(args.debug)?;

    let mut config = match get_config_path(args.config)? {
        Some(path) => {
            log::info!("Loading config from {}", path.display());
            Config::load(&path)?
        }
        None => {
            log::info!("No config file found, using defaults");
            Config::default()
        }
    };

    // Override config with CLI flags
    if args.vim {
        config.vim_mode = true;
    }
    if let Some(url) = args.url {
        config.base_url = url;
    }
    if let Some(protocol) = args.protocol {
        config.image_protocol = protocol;
    }

    // Initialize app (queries the terminal for graphics support)
    let mut app = App::new(config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app with error handler
    let result = run_app(&mut terminal, &mut app).await;

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("Exiting with error: {:#}", e);
    }
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Lay out first so view size changes reach the model before drawing
        let size = terminal.size()?;
        app.sync_view_area(Rect::new(0, 0, size.width, size.height));

        // Always render (Elm Architecture approach)
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if app.model.ui.should_dismiss_toast() {
            app.model.ui.dismiss_toast();
        }

        if app.model.ui.should_quit {
            break;
        }

        // Process background results (non-blocking)
        while let Ok(listings) = app.catalog_rx.try_recv() {
            app.handle_catalog_result(listings);
        }
        while let Ok(update) = app.load_rx.try_recv() {
            app.handle_load_update(update);
        }

        app.tick_split(Instant::now());

        if event::poll(app.poll_timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key)?,
                Event::Mouse(mouse) => handlers::handle_mouse(app, mouse),
                // Resizes are picked up by sync_view_area on the next pass
                _ => {}
            }
        }
    }

    Ok(())
}
