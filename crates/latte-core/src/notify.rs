//! # Notifications
//!
//! Transient user-facing messages ("Latte added to cart ✔"). The engine only
//! describes the toast; showing and dismissing it is the host's job.

use std::time::Duration;

/// How long a toast stays on screen before it dismisses itself.
pub const TOAST_TTL: Duration = Duration::from_millis(2000);

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    /// Auto-dismiss delay. Fire-and-forget; nothing in the cart waits on it.
    pub ttl: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Toast {
            message: message.into(),
            ttl: TOAST_TTL,
        }
    }

    /// "X added to cart ✔"
    pub fn added(name: &str) -> Self {
        Toast::new(format!("{name} added to cart ✔"))
    }

    /// Shown when a cart row's name is clicked.
    pub fn details(name: &str, quantity: u32) -> Self {
        Toast::new(format!("Order Details: {name} - Qty: {quantity}"))
    }
}

/// Sink for toasts.
pub trait Notifier {
    fn notify(&mut self, toast: Toast);
}

/// Notifier that keeps every toast it receives.
#[derive(Debug, Clone, Default)]
pub struct ToastLog {
    toasts: Vec<Toast>,
}

impl ToastLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn last_message(&self) -> Option<&str> {
        self.toasts.last().map(|t| t.message.as_str())
    }
}

impl Notifier for ToastLog {
    fn notify(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_messages() {
        assert_eq!(Toast::added("Latte").message, "Latte added to cart ✔");
        assert_eq!(
            Toast::details("Latte", 2).message,
            "Order Details: Latte - Qty: 2"
        );
        assert_eq!(Toast::new("hi").ttl, Duration::from_secs(2));
    }

    #[test]
    fn test_toast_log_records_in_order() {
        let mut log = ToastLog::new();
        log.notify(Toast::new("first"));
        log.notify(Toast::new("second"));

        assert_eq!(log.toasts().len(), 2);
        assert_eq!(log.last_message(), Some("second"));
    }
}
