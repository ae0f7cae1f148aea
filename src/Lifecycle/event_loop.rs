use super::machine::{ExitOutcome, Lifecycle, PopupEvent, Step};
use crate::error::Result;

/// Blocking source of popup events; the window-system side of the loop.
pub trait EventSource {
    /// Block until the next event arrives.
    fn next_event(&mut self) -> Result<PopupEvent>;

    /// Repaint the popup contents.
    fn redraw(&mut self) -> Result<()>;
}

/// Run until the lifecycle reaches a terminal outcome.
///
/// An error from the event source (for example a lost display connection)
/// ends the loop and is returned to the caller.
pub fn run<S: EventSource + ?Sized>(source: &mut S, lifecycle: &mut Lifecycle) -> Result<ExitOutcome> {
    loop {
        let event = source.next_event()?;
        match lifecycle.handle(event) {
            Step::Continue => {}
            Step::Redraw => source.redraw()?,
            Step::Exit(outcome) => return Ok(outcome),
        }
    }
}
