//! Cooperative cancellation.
//!
//! A single shared flag set by a background console listener and polled by
//! the runner between items. The flag is never un-set; an in-flight item
//! always finishes before cancellation takes effect.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Console command that requests a graceful stop.
pub const STOP_COMMAND: &str = "stop";

/// Shared cancellation flag. Clone freely; all clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    inner: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. One-way: the flag stays set.
    pub fn cancel(&self) {
        self.inner.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.inner.load(Ordering::SeqCst)
    }
}

/// Spawn the background stdin listener.
///
/// The task blocks reading console lines until it sees `stop` (trimmed,
/// case-insensitive), sets the flag and exits. Every other line is ignored;
/// EOF ends the listener without cancelling.
pub fn spawn_stop_listener(flag: CancelFlag) -> JoinHandle<()> {
    tokio::spawn(async move {
        let stdin = BufReader::new(tokio::io::stdin());
        listen(stdin, flag).await;
    })
}

/// Listener loop, generic over the input for testability.
pub async fn listen<R>(reader: R, flag: CancelFlag)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().eq_ignore_ascii_case(STOP_COMMAND) {
                    info!("Stop requested; finishing the current video and saving progress");
                    flag.cancel();
                    return;
                }
            }
            Ok(None) => return,
            Err(e) => {
                warn!("Failed to read control input: {}", e);
                return;
            }
        }
    }
}
