//! The user-visible notification channel, the CLI analog of the original screen's modal alert.

/// A channel for user-facing alerts. The screen uses it exactly once per failed rate fetch.
pub(crate) trait Notifier {
    fn alert(&mut self, title: &str, message: &str);
}

/// Writes alerts to stderr so they are visible even when stdout is piped.
pub(crate) struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&mut self, title: &str, message: &str) {
        eprintln!("{title}: {message}");
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::Notifier;

    /// Collects alerts so tests can assert on how many were shown and what they said.
    #[derive(Debug, Default)]
    pub(crate) struct CollectingNotifier {
        pub(crate) alerts: Vec<(String, String)>,
    }

    impl Notifier for CollectingNotifier {
        fn alert(&mut self, title: &str, message: &str) {
            self.alerts.push((title.to_string(), message.to_string()));
        }
    }
}
