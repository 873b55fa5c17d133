//! The scheduling queue

#[derive(Debug)]
struct Scheduled<T> {
    id: String,
    remaining: f32,
    payload: T,
}

/// Pending one-shot payloads keyed by id.
///
/// Entries age every update. A due entry fires only when the caller's
/// `can_fire` check accepts its payload; held entries stay due and try
/// again next frame. At most one entry fires per update.
#[derive(Debug, Default)]
pub struct SchedulingQueue<T> {
    pending: Vec<Scheduled<T>>,
}

impl<T> SchedulingQueue<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Queue `payload` to fire after `delay` seconds. A second schedule
    /// under a pending id is rejected with a warning; the original keeps
    /// its place and timer.
    pub fn schedule(&mut self, id: impl Into<String>, delay: f32, payload: T) -> bool {
        let id = id.into();
        if self.is_pending(&id) {
            log::warn!("scheduler: `{id}` is already pending, ignoring duplicate");
            return false;
        }
        log::debug!("scheduler: queued `{id}` in {delay:.2}s");
        self.pending.push(Scheduled {
            id,
            remaining: delay.max(0.0),
            payload,
        });
        true
    }

    /// Remove a pending entry, returning its payload.
    pub fn cancel(&mut self, id: &str) -> Option<T> {
        let index = self.pending.iter().position(|s| s.id == id)?;
        log::debug!("scheduler: cancelled `{id}`");
        Some(self.pending.remove(index).payload)
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.iter().any(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Advance timers by `dt` and release the first due entry that passes
    /// `can_fire`, in schedule order.
    pub fn update(
        &mut self,
        dt: f32,
        mut can_fire: impl FnMut(&T) -> bool,
    ) -> Option<(String, T)> {
        for entry in &mut self.pending {
            entry.remaining = (entry.remaining - dt).max(0.0);
        }
        let index = self
            .pending
            .iter()
            .position(|s| s.remaining <= 0.0 && can_fire(&s.payload))?;
        let fired = self.pending.remove(index);
        log::debug!("scheduler: firing `{}`", fired.id);
        Some((fired.id, fired.payload))
    }
}
