use anyhow::Result;
use tokio::sync::{broadcast, mpsc, oneshot};
use winhud::config::JsonConfigStore;
use winhud::counters::CounterSource;
use winhud::detector::SysinfoProcessProbe;
use winhud::display::{self, ConsoleHud};
use winhud::engine::{
    EVENT_CHANNEL_CAPACITY, Engine, EngineDeps, EngineSettings, HudEvent, SIGNAL_CHANNEL_CAPACITY,
    Signal,
};
use winhud::hotkey::HotkeyListener;
use winhud::logging;
use winhud::platform::{self, SystemDisplays};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _log_guard = logging::init();
    tracing::info!(
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        "starting"
    );

    let (events_tx, events_rx) = broadcast::channel::<HudEvent>(EVENT_CHANNEL_CAPACITY);
    let (signal_tx, signal_rx) = mpsc::channel::<Signal>(SIGNAL_CHANNEL_CAPACITY);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let store = JsonConfigStore::from_env();
    tracing::info!(path = %store.path().display(), "config location");

    let display_handle = display::spawn(
        ConsoleHud::new(platform::system_dpi_scale(), signal_tx.clone()),
        events_rx,
    );

    let engine = Engine::new(
        EngineDeps {
            sampler: Box::new(CounterSource::new()),
            probe: Box::new(SysinfoProcessProbe::new()),
            displays: Box::new(SystemDisplays),
            store: Box::new(store),
            screen: platform::system_screen(),
            events: events_tx,
        },
        EngineSettings::default(),
    );

    let hotkey = match HotkeyListener::spawn(signal_tx.clone()) {
        Ok(listener) => Some(listener),
        Err(e) => {
            tracing::warn!(error = %e, operation = "register_hotkey", "toggle hotkey unavailable");
            None
        }
    };

    #[cfg(unix)]
    forward_reload_signal(signal_tx.clone());

    let engine_run = engine.run(signal_rx, shutdown_rx);
    tokio::pin!(engine_run);

    let interrupted = tokio::select! {
        _ = &mut engine_run => false,
        _ = tokio::signal::ctrl_c() => true,
    };
    if interrupted {
        tracing::info!("Received shutdown signal");
        let _ = shutdown_tx.send(());
        engine_run.await;
    } else {
        tracing::warn!("engine stopped unexpectedly");
    }

    drop(hotkey);
    drop(signal_tx);
    let _ = display_handle.await;
    tracing::info!("stopped");
    Ok(())
}

/// SIGHUP re-reads config.json.
#[cfg(unix)]
fn forward_reload_signal(signals: mpsc::Sender<Signal>) {
    use tokio::signal::unix::{SignalKind, signal};

    let mut hangup = match signal(SignalKind::hangup()) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, operation = "reload_signal", "SIGHUP handler unavailable");
            return;
        }
    };
    tokio::spawn(async move {
        while hangup.recv().await.is_some() {
            if signals.send(Signal::ReloadConfig).await.is_err() {
                break;
            }
        }
    });
}
