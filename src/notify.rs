use log::warn;
use notify_rust::{Notification, Timeout};

/// Fire a short desktop notification. Failures are logged and swallowed;
/// a missing notification daemon must never take the picker down.
pub fn notify(summary: &str, body: &str) {
    let result = Notification::new()
        .summary(summary)
        .body(body)
        .icon("network-vpn")
        .timeout(Timeout::Milliseconds(1000))
        .show();

    if let Err(err) = result {
        warn!("notification failed: {}", err);
    }
}
