//! Transient user notifications ("toasts").

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

pub trait Notifier {
    /// Show `message` to the user. Returns `false` when the host has no way to
    /// display it right now.
    fn show(&self, message: &str) -> bool;
}

/// Show `message` through `notifier`, falling back to the log.
///
/// Returns whether the notifier displayed it.
pub fn announce(notifier: Option<&dyn Notifier>, message: &str) -> bool {
    if notifier.is_some_and(|n| n.show(message)) {
        return true;
    }
    log::info!("{message}");
    false
}
