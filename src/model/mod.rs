//! Model module - playback state and content data
//!
//! - `types`: Core enums (content type, repeat mode, adhan phase, screen)
//! - `cursor`: Navigation cursor shared by every session
//! - `timing`: Verse timing tables and time-to-verse resolution
//! - `content`: Content records supplied by the content source
//! - `playback`: Track metadata and the now-playing state
//! - `store`: The shared now-playing store with session ownership

mod types;
mod cursor;
mod timing;
mod content;
mod playback;
mod store;

pub use types::{AdhanPhase, ContentType, Direction, RepeatMode, Screen};

pub use cursor::{FlatSteps, NavigationCursor, StepRange};

pub use timing::{resolve, TimingEntry, TimingTable};

pub use content::{
    AdhanAudio, Chapter, ChapterText, InvocationItem, InvocationSet, JawshanLine, JawshanSection, Recitation, Verse,
    JAWSHAN_FIRST_SECTION, JAWSHAN_LAST_SECTION, JAWSHAN_LINES_PER_SECTION,
};

pub use playback::{PlaybackState, Track};

pub use store::{PlaybackStateStore, SessionLease};
