// Global toggle hotkey (Alt+Shift+H). A dedicated thread owns the Win32
// registration and message queue and forwards presses as `Signal::Toggle`.

use crate::engine::Signal;
use crate::platform::PlatformError;
use tokio::sync::mpsc;

#[cfg(windows)]
pub use imp::HotkeyListener;

/// Stand-in where global hotkeys are not available.
#[cfg(not(windows))]
#[derive(Debug)]
pub struct HotkeyListener;

#[cfg(not(windows))]
impl HotkeyListener {
    pub fn spawn(_signals: mpsc::Sender<Signal>) -> Result<Self, PlatformError> {
        Err(PlatformError::Unsupported)
    }
}

#[cfg(windows)]
mod imp {
    use super::*;
    use crate::config::policy::{HOTKEY_ID, HOTKEY_VK};
    use ::windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
    use ::windows::Win32::System::Threading::GetCurrentThreadId;
    use ::windows::Win32::UI::Input::KeyboardAndMouse::{
        MOD_ALT, MOD_NOREPEAT, MOD_SHIFT, RegisterHotKey, UnregisterHotKey,
    };
    use ::windows::Win32::UI::WindowsAndMessaging::{
        GetMessageW, MSG, PM_NOREMOVE, PeekMessageW, PostThreadMessageW, WM_HOTKEY, WM_QUIT,
    };
    use std::thread::{self, JoinHandle};
    use tracing::{debug, info, warn};

    /// Owns the listener thread. Dropping it unregisters the hotkey and joins.
    #[derive(Debug)]
    pub struct HotkeyListener {
        thread_id: u32,
        handle: Option<JoinHandle<()>>,
    }

    impl HotkeyListener {
        /// Register the hotkey on a new thread. Fails if another program
        /// already holds the combination.
        pub fn spawn(signals: mpsc::Sender<Signal>) -> Result<Self, PlatformError> {
            let (ready_tx, ready_rx) = std::sync::mpsc::channel::<Result<u32, PlatformError>>();

            let handle = thread::Builder::new()
                .name("hotkey".into())
                .spawn(move || listen(signals, ready_tx))
                .map_err(|e| PlatformError::Api {
                    api: "thread::spawn",
                    message: e.to_string(),
                })?;

            let thread_id = match ready_rx.recv() {
                Ok(Ok(id)) => id,
                Ok(Err(e)) => {
                    let _ = handle.join();
                    return Err(e);
                }
                Err(_) => {
                    let _ = handle.join();
                    return Err(PlatformError::Api {
                        api: "RegisterHotKey",
                        message: "listener thread exited before registering".into(),
                    });
                }
            };

            info!(id = HOTKEY_ID, "toggle hotkey registered (Alt+Shift+H)");
            Ok(Self {
                thread_id,
                handle: Some(handle),
            })
        }
    }

    fn listen(
        signals: mpsc::Sender<Signal>,
        ready_tx: std::sync::mpsc::Sender<Result<u32, PlatformError>>,
    ) {
        unsafe {
            // Forces the thread's message queue into existence before anyone
            // can post WM_QUIT to it.
            let mut msg = MSG::default();
            let _ = PeekMessageW(&mut msg, HWND::default(), 0, 0, PM_NOREMOVE);

            if let Err(e) = RegisterHotKey(
                HWND::default(),
                HOTKEY_ID,
                MOD_ALT | MOD_SHIFT | MOD_NOREPEAT,
                HOTKEY_VK,
            ) {
                let _ = ready_tx.send(Err(PlatformError::Api {
                    api: "RegisterHotKey",
                    message: e.message(),
                }));
                return;
            }
            let _ = ready_tx.send(Ok(GetCurrentThreadId()));

            // 0 on WM_QUIT, -1 on error.
            while GetMessageW(&mut msg, HWND::default(), 0, 0).0 > 0 {
                if msg.message == WM_HOTKEY && msg.wParam.0 == HOTKEY_ID as usize {
                    debug!("toggle hotkey pressed");
                    if signals.try_send(Signal::Toggle).is_err() {
                        warn!(operation = "hotkey", "engine busy or gone, toggle dropped");
                    }
                }
            }

            if let Err(e) = UnregisterHotKey(HWND::default(), HOTKEY_ID) {
                warn!(error = %e, operation = "hotkey", "UnregisterHotKey failed");
            }
        }
        debug!("hotkey listener stopped");
    }

    impl Drop for HotkeyListener {
        fn drop(&mut self) {
            unsafe {
                if let Err(e) = PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) {
                    warn!(error = %e, operation = "hotkey", "could not stop listener thread");
                    return;
                }
            }
            if let Some(handle) = self.handle.take() {
                let _ = handle.join();
            }
        }
    }
}
