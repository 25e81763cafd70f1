use std::time::Duration;

/// Work the session defers until later on the same event loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Ask the drawing surface for another cut line. Only meaningful if the session is still
    /// cutting when this runs.
    RearmCutMode,
}

/// A queue of commands ordered by when they're due. Time is whatever clock the host drives the
/// session with; nothing here reads the wall clock.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scheduler {
    // Ascending by time. Commands due at the same time keep the order they were pushed in.
    items: Vec<(Duration, Command)>,
}

impl Scheduler {
    pub fn new() -> Scheduler {
        Scheduler::default()
    }

    pub fn push(&mut self, at: Duration, cmd: Command) {
        let idx = self.items.partition_point(|(t, _)| *t <= at);
        self.items.insert(idx, (at, cmd));
    }

    // Pull one command at a time, since running one might schedule more.
    pub fn get_next(&mut self, now: Duration) -> Option<Command> {
        let (next_time, _) = self.items.first()?;
        if *next_time > now {
            return None;
        }
        Some(self.items.remove(0).1)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
