//! Signal layer of the popup lifecycle.
//!
//! Signals never touch window state. Termination signals are caught by
//! `ctrlc`, the user-defined signals and the display timer by a
//! `signal-hook` forwarding thread; both only call [`dispatch`], which posts
//! a synthetic event to the popup window through the process-wide
//! dispatcher. The main loop picks the event up after its blocking wait
//! returns.
//!
//! The dispatcher is the one piece of global state in the crate. It is
//! empty until [`arm`] installs the popup's poster and emptied again when the
//! returned [`SignalGuard`] drops.

use super::machine::Trigger;
use crate::error::{Error, Result};
use lazy_static::lazy_static;
use parking_lot::Mutex;
use signal_hook::consts::{SIGALRM, SIGUSR1, SIGUSR2};
use signal_hook::iterator::{Handle, Signals};
use std::thread::JoinHandle;

/// Delivers a synthetic event to the popup's event source.
pub trait EventPoster: Send {
    fn post(&self, trigger: Trigger) -> Result<()>;
}

#[derive(Default)]
struct Dispatcher {
    poster: Option<Box<dyn EventPoster>>,
    /// First trigger that arrived before a poster existed.
    pending: Option<Trigger>,
}

lazy_static! {
    static ref DISPATCHER: Mutex<Dispatcher> = Mutex::new(Dispatcher::default());
}

/// Route a trigger to the popup, or hold it until the popup is armed.
pub fn dispatch(trigger: Trigger) {
    let mut dispatcher = DISPATCHER.lock();
    match dispatcher.poster.as_ref() {
        Some(poster) => {
            if let Err(e) = poster.post(trigger) {
                tracing::warn!(?trigger, error = %e, "failed to post synthetic event");
            }
        }
        None => {
            tracing::debug!(?trigger, "no popup yet, holding trigger");
            dispatcher.pending.get_or_insert(trigger);
        }
    }
}

fn set_poster(poster: Option<Box<dyn EventPoster>>) {
    let mut dispatcher = DISPATCHER.lock();
    dispatcher.poster = poster;
    if dispatcher.poster.is_none() {
        return;
    }
    if let Some(trigger) = dispatcher.pending.take() {
        if let Some(poster) = dispatcher.poster.as_ref() {
            if let Err(e) = poster.post(trigger) {
                tracing::warn!(?trigger, error = %e, "failed to post held trigger");
            }
        }
    }
}

fn trigger_for(signal: i32) -> Option<Trigger> {
    match signal {
        SIGUSR1 => Some(Trigger::UserDismiss),
        SIGUSR2 => Some(Trigger::UserAction),
        SIGALRM => Some(Trigger::Alarm),
        _ => None,
    }
}

/// First thing done at startup.
///
/// The user-defined signals are ignored until the window exists, and the
/// termination signals are routed to the dispatcher so that they are held
/// instead of killing the process with a stacking claim outstanding.
pub fn install_early() -> Result<()> {
    for signal in [libc::SIGUSR1, libc::SIGUSR2] {
        let previous = unsafe { libc::signal(signal, libc::SIG_IGN) };
        if previous == libc::SIG_ERR {
            return Err(Error::Signal(format!(
                "cannot ignore signal {}: {}",
                signal,
                std::io::Error::last_os_error()
            )));
        }
    }

    ctrlc::set_handler(|| dispatch(Trigger::Terminate))
        .map_err(|e| Error::Signal(format!("cannot install termination handler: {}", e)))
}

/// Keeps the popup armed; disarms when dropped.
pub struct SignalGuard {
    handle: Handle,
    forwarder: Option<JoinHandle<()>>,
}

/// Install the popup's poster and re-arm the user-defined signals.
pub fn arm(poster: Box<dyn EventPoster>) -> Result<SignalGuard> {
    let mut signals = Signals::new([SIGUSR1, SIGUSR2, SIGALRM])
        .map_err(|e| Error::Signal(format!("cannot register user signals: {}", e)))?;
    let handle = signals.handle();

    let forwarder = std::thread::Builder::new()
        .name("signal-forwarder".into())
        .spawn(move || {
            for signal in signals.forever() {
                if let Some(trigger) = trigger_for(signal) {
                    dispatch(trigger);
                }
            }
        })
        .map_err(|e| Error::Signal(format!("cannot spawn signal forwarder: {}", e)))?;

    set_poster(Some(poster));

    Ok(SignalGuard {
        handle,
        forwarder: Some(forwarder),
    })
}

/// Schedule the display timeout. Zero seconds means the popup never expires.
///
/// Returns whether a timer was armed. Once armed it is never re-armed or
/// cancelled.
pub fn arm_timer(seconds: u32) -> bool {
    if seconds == 0 {
        return false;
    }
    unsafe {
        libc::alarm(seconds);
    }
    tracing::debug!(seconds, "display timer armed");
    true
}

impl Drop for SignalGuard {
    fn drop(&mut self) {
        set_poster(None);
        self.handle.close();
        if let Some(forwarder) = self.forwarder.take() {
            let _ = forwarder.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<Trigger>>>);

    impl EventPoster for Recorder {
        fn post(&self, trigger: Trigger) -> Result<()> {
            self.0.lock().push(trigger);
            Ok(())
        }
    }

    fn reset() {
        let mut dispatcher = DISPATCHER.lock();
        dispatcher.poster = None;
        dispatcher.pending = None;
    }

    #[test]
    #[serial]
    fn dispatch_posts_to_installed_poster() {
        reset();
        let recorder = Recorder::default();
        set_poster(Some(Box::new(recorder.clone())));

        dispatch(Trigger::UserAction);
        dispatch(Trigger::Alarm);

        assert_eq!(*recorder.0.lock(), vec![Trigger::UserAction, Trigger::Alarm]);
        reset();
    }

    #[test]
    #[serial]
    fn early_trigger_is_held_until_armed() {
        reset();
        dispatch(Trigger::Terminate);
        dispatch(Trigger::Terminate);

        let recorder = Recorder::default();
        set_poster(Some(Box::new(recorder.clone())));

        assert_eq!(*recorder.0.lock(), vec![Trigger::Terminate]);
        reset();
    }

    #[test]
    #[serial]
    fn disarmed_dispatcher_drops_poster() {
        reset();
        let recorder = Recorder::default();
        set_poster(Some(Box::new(recorder.clone())));
        set_poster(None);

        dispatch(Trigger::UserDismiss);
        assert!(recorder.0.lock().is_empty());
        assert_eq!(DISPATCHER.lock().pending, Some(Trigger::UserDismiss));
        reset();
    }

    #[test]
    fn user_signals_map_to_triggers() {
        assert_eq!(trigger_for(SIGUSR1), Some(Trigger::UserDismiss));
        assert_eq!(trigger_for(SIGUSR2), Some(Trigger::UserAction));
        assert_eq!(trigger_for(SIGALRM), Some(Trigger::Alarm));
        assert_eq!(trigger_for(libc::SIGCHLD), None);
    }

    #[test]
    fn zero_duration_never_arms_timer() {
        assert!(!arm_timer(0));
    }
}
