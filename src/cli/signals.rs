//! Ctrl-C handling

use colored::Colorize;
use tokio_util::sync::CancellationToken;

/// Cancels a workflow when the user presses Ctrl-C
pub struct ShutdownSignal {
    token: CancellationToken,
}

impl ShutdownSignal {
    /// Create a handler that cancels `token`
    pub fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    /// Check if shutdown was requested
    pub fn is_shutdown(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Spawn the signal listener
    pub fn setup(&self) {
        let token = self.token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                result = tokio::signal::ctrl_c() => {
                    if result.is_ok() {
                        eprintln!("\n{} Received Ctrl-C, cancelling", "↓".cyan());
                        token.cancel();
                    }
                }
            }
        });
    }
}
