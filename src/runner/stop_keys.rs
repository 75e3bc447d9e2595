//! Stop-key handling: turns key presses into a raised shutdown signal.

use super::ShutdownSignal;
use crate::trace::trace_event;

/// Configured stop keys bound to a shutdown signal.
#[derive(Clone, Debug)]
pub struct StopKeys {
    keys: Vec<String>,
    signal: ShutdownSignal,
}

impl StopKeys {
    pub fn new<I, K>(keys: I, signal: ShutdownSignal) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            signal,
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Returns true if `key` names a configured stop key (ASCII
    /// case-insensitive).
    pub fn matches(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k.eq_ignore_ascii_case(key))
    }

    /// Raises the signal if `key` is a stop key. Returns whether it matched.
    pub fn handle_key(&self, key: &str) -> bool {
        if !self.matches(key) {
            return false;
        }
        if self.signal.trigger() {
            trace_event!("stop_key.pressed", key = key);
        }
        true
    }
}

/// Spawns a global keyboard listener that feeds presses into `stop`.
///
/// Each press is reported by its produced text (e.g. `q`) and by its key
/// name (e.g. `Escape`), so both printable and special keys can stop the
/// run. The listener thread lives until the process exits.
#[cfg(feature = "platform")]
pub fn listen_for_stop_keys(stop: StopKeys) -> crate::ClickerResult<std::thread::JoinHandle<()>> {
    use crate::trace::trace_warn;
    use crate::ClickerError;

    std::thread::Builder::new()
        .name("stop-keys".into())
        .spawn(move || {
            let result = rdev::listen(move |event| {
                if let rdev::EventType::KeyPress(key) = event.event_type {
                    let by_text = event.name.as_deref().is_some_and(|name| stop.handle_key(name));
                    if !by_text {
                        stop.handle_key(&format!("{key:?}"));
                    }
                }
            });
            if let Err(err) = result {
                let reason = format!("{err:?}");
                trace_warn!("stop_key.listener_failed", reason = reason.as_str());
            }
        })
        .map_err(|err| ClickerError::StopListener {
            reason: err.to_string(),
        })
}
