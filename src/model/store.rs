//! Shared now-playing store
//!
//! One store exists per process. Sessions write to it through a
//! [`SessionLease`] obtained from [`PlaybackStateStore::claim`]; claiming
//! again or resetting revokes every earlier lease, so late events from a
//! torn-down session cannot touch the state of its successor. Views observe
//! the store through [`PlaybackStateStore::subscribe`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use super::playback::{PlaybackState, Track};
use super::types::ContentType;

const NO_OWNER: u64 = 0;

/// Proof that a session is the current writer of the store
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionLease {
    generation: u64,
    content_type: ContentType,
}

impl SessionLease {
    pub fn content_type(&self) -> ContentType {
        self.content_type
    }
}

struct StoreInner {
    state: watch::Sender<PlaybackState>,
    owner: AtomicU64,
    last_generation: AtomicU64,
}

#[derive(Clone)]
pub struct PlaybackStateStore {
    inner: Arc<StoreInner>,
}

impl Default for PlaybackStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackStateStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(PlaybackState::default());
        Self {
            inner: Arc::new(StoreInner {
                state,
                owner: AtomicU64::new(NO_OWNER),
                last_generation: AtomicU64::new(NO_OWNER),
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<PlaybackState> {
        self.inner.state.subscribe()
    }

    pub fn snapshot(&self) -> PlaybackState {
        self.inner.state.borrow().clone()
    }

    /// Hand the store to a new session. The previous session's lease stops
    /// working and its track is replaced, never merged.
    pub fn claim(&self, content_type: ContentType, track: Track, duration_secs: f64) -> SessionLease {
        let generation = self.inner.last_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.owner.store(generation, Ordering::SeqCst);

        self.inner.state.send_replace(PlaybackState {
            is_playing: false,
            is_minimized: false,
            content_type: Some(content_type),
            current_track: Some(track),
            progress_secs: 0.0,
            duration_secs,
        });

        tracing::info!(%content_type, generation, "Session claimed playback store");
        SessionLease {
            generation,
            content_type,
        }
    }

    pub fn is_current(&self, lease: &SessionLease) -> bool {
        self.inner.owner.load(Ordering::SeqCst) == lease.generation
    }

    /// Apply `f` if `lease` is still current. Returns whether the write happened.
    pub fn update(&self, lease: &SessionLease, f: impl FnOnce(&mut PlaybackState) -> bool) -> bool {
        if !self.is_current(lease) {
            tracing::trace!(
                generation = lease.generation,
                content_type = %lease.content_type,
                "Ignoring write from a revoked session"
            );
            return false;
        }
        self.inner.state.send_if_modified(f);
        true
    }

    pub fn set_track(&self, lease: &SessionLease, track: Track) -> bool {
        self.update(lease, |state| {
            if state.current_track.as_ref() == Some(&track) {
                return false;
            }
            state.current_track = Some(track);
            true
        })
    }

    pub fn set_playing(&self, lease: &SessionLease, is_playing: bool) -> bool {
        self.update(lease, |state| {
            let changed = state.is_playing != is_playing;
            state.is_playing = is_playing;
            changed
        })
    }

    pub fn set_progress(&self, lease: &SessionLease, progress_secs: f64, duration_secs: f64) -> bool {
        self.update(lease, |state| {
            let changed = state.progress_secs != progress_secs || state.duration_secs != duration_secs;
            state.progress_secs = progress_secs;
            state.duration_secs = duration_secs;
            changed
        })
    }

    /// Minimizing is open to any consumer and leaves everything else untouched.
    pub fn set_minimized(&self, is_minimized: bool) {
        self.inner.state.send_if_modified(|state| {
            if !state.is_active() || state.is_minimized == is_minimized {
                return false;
            }
            state.is_minimized = is_minimized;
            true
        });
    }

    /// Restore defaults and revoke every lease.
    pub fn reset(&self) {
        self.inner.owner.store(NO_OWNER, Ordering::SeqCst);
        self.inner.state.send_replace(PlaybackState::default());
        tracing::info!("Playback store reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(title: &str) -> Track {
        Track::new(title, "")
    }

    #[test]
    fn claim_replaces_previous_track_and_type() {
        let store = PlaybackStateStore::new();
        let quran = store.claim(ContentType::Quran, track("Al-Fatiha").with_verse_number(1), 40.0);
        store.set_playing(&quran, true);

        store.claim(ContentType::Jawshan, track("Section 1"), 0.0);
        let state = store.snapshot();
        assert_eq!(state.content_type, Some(ContentType::Jawshan));
        assert_eq!(state.current_track, Some(track("Section 1")));
        assert!(!state.is_playing);
        assert_eq!(state.duration_secs, 0.0);
    }

    #[test]
    fn revoked_lease_cannot_write() {
        let store = PlaybackStateStore::new();
        let old = store.claim(ContentType::Quran, track("old"), 10.0);
        let new = store.claim(ContentType::Invocations, track("new"), 0.0);

        assert!(!store.set_track(&old, track("stale")));
        assert!(!store.set_progress(&old, 9.0, 10.0));
        assert!(store.is_current(&new));
        assert_eq!(store.snapshot().current_track, Some(track("new")));
    }

    #[test]
    fn reset_restores_defaults_and_revokes() {
        let store = PlaybackStateStore::new();
        let lease = store.claim(ContentType::Adhan, track("Fajr"), 180.0);
        store.set_playing(&lease, true);
        store.set_progress(&lease, 42.0, 180.0);
        store.set_minimized(true);

        store.reset();
        assert_eq!(store.snapshot(), PlaybackState::default());
        assert!(!store.set_playing(&lease, true));
    }

    #[test]
    fn minimize_leaves_playback_untouched() {
        let store = PlaybackStateStore::new();
        let lease = store.claim(ContentType::Quran, track("Al-Mulk"), 300.0);
        store.set_playing(&lease, true);
        store.set_progress(&lease, 12.5, 300.0);

        store.set_minimized(true);
        let state = store.snapshot();
        assert!(state.is_minimized);
        assert!(state.is_playing);
        assert_eq!(state.progress_secs, 12.5);
    }

    #[test]
    fn minimize_without_session_is_ignored() {
        let store = PlaybackStateStore::new();
        store.set_minimized(true);
        assert!(!store.snapshot().is_minimized);
    }

    #[test]
    fn subscribers_see_only_real_changes() {
        let store = PlaybackStateStore::new();
        let mut rx = store.subscribe();
        let lease = store.claim(ContentType::Quran, track("Al-Ikhlas"), 20.0);
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        store.set_track(&lease, track("Al-Ikhlas"));
        assert!(!rx.has_changed().unwrap());

        store.set_track(&lease, track("Al-Falaq"));
        assert!(rx.has_changed().unwrap());
    }
}
