//! TeamConnect dashboard session.
//!
//! Keeps the dashboard fresh while the user is working on it. Host input
//! events arrive one per line on stdin, named after their DOM events
//! (`mousedown`, `keypress`, `focus`, `blur`, ...). Other lines are page
//! commands (`resize 600`, `click outside`, `submit message`, ...). The
//! session ends on EOF or Ctrl+C.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, fmt};

use teamconnect_client::TeamConnectClient;
use teamconnect_core::config::AppConfig;
use teamconnect_core::error::AppError;
use teamconnect_core::traits::{Clock, SharedFocus, SystemClock};
use teamconnect_refresh::{InputEvent, RefreshService, RefreshSettings, TokioScheduler};
use teamconnect_ui::{DashboardView, ViewCommand};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Dashboard session error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file, environment overlay, and variables
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("TEAMCONNECT_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    let env = std::env::var("TEAMCONNECT_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load_with_env(&config_path, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    // stdout is left to the host; logs go to stderr.
    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

/// Run one dashboard session until the host goes away
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting TeamConnect dashboard v{}", env!("CARGO_PKG_VERSION"));

    let client = Arc::new(TeamConnectClient::from_config(&config)?);
    tracing::info!("Server: {}", client.base_url());

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let focus = Arc::new(SharedFocus::default());
    let service = RefreshService::new(
        RefreshSettings::from(&config.refresh),
        Arc::clone(&clock),
        client,
        focus.clone(),
    );
    let refresh = service.start(&TokioScheduler);

    let view = Arc::new(Mutex::new(DashboardView::new(
        Arc::clone(&clock),
        &config.notifications,
    )));
    if config.notifications.welcome_enabled {
        let view = Arc::clone(&view);
        let delay = Duration::from_millis(config.notifications.welcome_delay_ms);
        let lifetime = Duration::from_millis(config.notifications.welcome_duration_ms);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut view = view.lock().unwrap_or_else(|e| e.into_inner());
            let center = view.notifications_mut();
            let id = center.welcome(lifetime);
            if let Some(toast) = center.active().iter().find(|t| t.id == id) {
                tracing::info!("{}", toast);
            }
        });
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut redraw = tokio::time::interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        let mut view = view.lock().unwrap_or_else(|e| e.into_inner());
                        handle_line(line.trim(), &service, &focus, &mut view);
                    }
                    Ok(None) => {
                        tracing::info!("Host closed the event stream");
                        break;
                    }
                    Err(e) => {
                        tracing::error!("Failed to read host events: {}", e);
                        break;
                    }
                }
            }
            _ = redraw.tick() => {
                view.lock().unwrap_or_else(|e| e.into_inner()).redraw(clock.now());
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Ctrl+C received, ending session");
                break;
            }
        }
    }

    refresh.stop();
    tracing::info!("Dashboard session ended");
    Ok(())
}

/// Apply one host line: an input event goes to the refresh service,
/// anything else is a page command
fn handle_line(
    line: &str,
    service: &RefreshService,
    focus: &SharedFocus,
    view: &mut DashboardView,
) {
    if line.is_empty() {
        return;
    }
    if let Ok(event) = line.parse::<InputEvent>() {
        match event {
            InputEvent::Focus => focus.set_focused(true),
            InputEvent::Blur => focus.set_focused(false),
            _ => {}
        }
        service.record_event(event);
        return;
    }

    match line.parse::<ViewCommand>().and_then(|command| view.apply(command)) {
        Ok(()) => tracing::debug!("Applied page command '{}'", line),
        Err(e) => tracing::warn!("Ignoring host line '{}': {}", line, e),
    }
}
