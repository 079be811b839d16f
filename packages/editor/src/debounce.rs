//! Single-shot, cancel-and-reschedule timer.
//!
//! Every arm bumps a generation number. A task that wakes up carrying an
//! older generation has been superseded and must do nothing, which covers
//! the window where a task already finished sleeping but has not yet
//! observed its abort.

use crate::capabilities::SyncOrigin;
use tokio::task::JoinHandle;

struct Pending {
    origin: SyncOrigin,
    handle: JoinHandle<()>,
}

#[derive(Default)]
pub(crate) struct DebounceTimer {
    generation: u64,
    pending: Option<Pending>,
}

impl DebounceTimer {
    /// Cancel whatever is armed, then arm a new task for `origin`.
    ///
    /// `spawn` receives the generation the task must present when it fires.
    pub fn arm(&mut self, origin: SyncOrigin, spawn: impl FnOnce(u64) -> JoinHandle<()>) {
        self.cancel();
        let handle = spawn(self.generation);
        self.pending = Some(Pending { origin, handle });
    }

    /// Abort the armed task, if any, and invalidate it.
    pub fn cancel(&mut self) -> Option<SyncOrigin> {
        self.generation = self.generation.wrapping_add(1);
        self.pending.take().map(|pending| {
            pending.handle.abort();
            pending.origin
        })
    }

    /// Claim the pending origin for a task that just woke up.
    pub fn take_if_current(&mut self, generation: u64) -> Option<SyncOrigin> {
        if generation != self.generation {
            return None;
        }
        self.pending.take().map(|pending| pending.origin)
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_origin(&self) -> Option<SyncOrigin> {
        self.pending.as_ref().map(|pending| pending.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rearm_supersedes_previous_generation() {
        let mut timer = DebounceTimer::default();
        let mut first = None;
        timer.arm(SyncOrigin::Source, |generation| {
            first = Some(generation);
            tokio::spawn(async {})
        });
        let mut second = None;
        timer.arm(SyncOrigin::Structural, |generation| {
            second = Some(generation);
            tokio::spawn(async {})
        });

        assert_eq!(timer.take_if_current(first.unwrap()), None);
        assert_eq!(
            timer.take_if_current(second.unwrap()),
            Some(SyncOrigin::Structural)
        );
        assert!(!timer.is_armed());
    }

    #[tokio::test]
    async fn test_cancel_reports_origin() {
        let mut timer = DebounceTimer::default();
        timer.arm(SyncOrigin::Source, |_| tokio::spawn(async {}));

        assert_eq!(timer.pending_origin(), Some(SyncOrigin::Source));
        assert_eq!(timer.cancel(), Some(SyncOrigin::Source));
        assert_eq!(timer.cancel(), None);
    }
}
