//! Transient success banners.
//!
//! The slot holds at most one banner. Every show or dismiss aborts the
//! pending auto-dismiss timer, and a timer only clears the banner it was
//! armed for.

use tokio::task::JoinHandle;

use crate::models::messages;

/// Which mutation the banner confirms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Added,
    Updated,
    Deleted,
}

impl BannerKind {
    pub fn message(&self) -> &'static str {
        match self {
            BannerKind::Added => messages::ADDED,
            BannerKind::Updated => messages::UPDATED,
            BannerKind::Deleted => messages::DELETED,
        }
    }
}

#[derive(Debug, Default)]
pub struct BannerSlot {
    current: Option<BannerKind>,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

impl BannerSlot {
    pub fn current(&self) -> Option<BannerKind> {
        self.current
    }

    /// Replace the banner. Returns the generation the new timer must carry.
    pub fn show(&mut self, kind: BannerKind) -> u64 {
        self.cancel_timer();
        self.generation += 1;
        self.current = Some(kind);
        self.generation
    }

    /// Attach the auto-dismiss timer for the banner just shown.
    pub fn arm(&mut self, timer: JoinHandle<()>) {
        self.cancel_timer();
        self.timer = Some(timer);
    }

    /// Explicit dismissal by the user.
    pub fn dismiss(&mut self) {
        self.cancel_timer();
        self.current = None;
    }

    /// Timer expiry; ignored if another banner has been shown since.
    pub fn expire(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.current.is_none() {
            return false;
        }
        self.current = None;
        self.timer = None;
        true
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for BannerSlot {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
