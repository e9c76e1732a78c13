//! Client-safe domain layer for Memory Vault: records, drafts, the local list
//! state behind every view, fallback samples, countdown arithmetic and the
//! journal config. No I/O happens here.

pub mod config;
pub mod countdown;
pub mod list;
pub mod models;
pub mod samples;

pub use config::{CountdownConfig, JournalConfig};
pub use countdown::{Precision, TimeLeft};
pub use list::{ListSource, RecordList};
pub use models::{
    Draft, Letter, ListOrder, Memory, Milestone, NewLetter, NewMemory, NewMilestone, NewNote,
    NewSong, Note, Record, Song, ValidationError,
};
