/// How the popup ended, bound to the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Closed without triggering anything (button, timeout or signal).
    Dismiss,
    /// The user asked for the notification's action.
    Action,
    /// Setup failed before the popup was ever running.
    Fail,
}

pub const EXIT_ACTION: i32 = 0;
pub const EXIT_FAIL: i32 = 1;
pub const EXIT_DISMISS: i32 = 2;

impl ExitOutcome {
    pub fn exit_code(self) -> i32 {
        match self {
            ExitOutcome::Action => EXIT_ACTION,
            ExitOutcome::Fail => EXIT_FAIL,
            ExitOutcome::Dismiss => EXIT_DISMISS,
        }
    }
}

/// Reason carried by a synthetic event posted from the signal layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// SIGINT, SIGTERM or SIGHUP.
    Terminate,
    /// SIGUSR1.
    UserDismiss,
    /// SIGUSR2.
    UserAction,
    /// SIGALRM, armed with the display duration.
    Alarm,
}

impl Trigger {
    /// Wire code used inside the synthetic window-system event.
    pub fn code(self) -> u32 {
        match self {
            Trigger::Terminate => 1,
            Trigger::UserDismiss => 2,
            Trigger::UserAction => 3,
            Trigger::Alarm => 4,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Trigger::Terminate),
            2 => Some(Trigger::UserDismiss),
            3 => Some(Trigger::UserAction),
            4 => Some(Trigger::Alarm),
            _ => None,
        }
    }
}

/// Input the lifecycle reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupEvent {
    /// The window needs repainting.
    Expose,
    /// A pointer button was pressed on the window.
    Button(u8),
    Synthetic(Trigger),
    /// Anything else the window system delivered.
    Other,
}

/// Pointer buttons bound to dismiss and action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonBindings {
    pub dismiss: u8,
    pub action: u8,
}

impl Default for ButtonBindings {
    fn default() -> Self {
        Self {
            dismiss: 1,
            action: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Running,
    Terminating(ExitOutcome),
}

/// What the event loop has to do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Redraw,
    Exit(ExitOutcome),
}

/// Maps window-system and signal input to a terminal outcome.
///
/// The first transition into `Terminating` is final; later events are ignored.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    bindings: ButtonBindings,
    state: LifecycleState,
}

impl Lifecycle {
    pub fn new(bindings: ButtonBindings) -> Self {
        Self {
            bindings,
            state: LifecycleState::Running,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn outcome(&self) -> Option<ExitOutcome> {
        match self.state {
            LifecycleState::Running => None,
            LifecycleState::Terminating(outcome) => Some(outcome),
        }
    }

    pub fn handle(&mut self, event: PopupEvent) -> Step {
        if let LifecycleState::Terminating(outcome) = self.state {
            return Step::Exit(outcome);
        }

        let outcome = match event {
            PopupEvent::Expose => return Step::Redraw,
            PopupEvent::Other => return Step::Continue,
            // Dismiss wins if both bindings name the same button.
            PopupEvent::Button(button) if button == self.bindings.dismiss => ExitOutcome::Dismiss,
            PopupEvent::Button(button) if button == self.bindings.action => ExitOutcome::Action,
            PopupEvent::Button(_) => return Step::Continue,
            PopupEvent::Synthetic(Trigger::UserAction) => ExitOutcome::Action,
            PopupEvent::Synthetic(
                Trigger::Terminate | Trigger::UserDismiss | Trigger::Alarm,
            ) => ExitOutcome::Dismiss,
        };

        tracing::debug!(?event, ?outcome, "popup terminating");
        self.state = LifecycleState::Terminating(outcome);
        Step::Exit(outcome)
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new(ButtonBindings::default())
    }
}
