mod landing;
pub use landing::LandingView;

mod login;
pub use login::LoginView;

mod timeline;
pub use timeline::TimelineView;

mod gallery;
pub use gallery::GalleryView;

mod notes;
pub use notes::NotesView;

mod letters;
pub use letters::LettersView;

mod playlist;
pub use playlist::PlaylistView;

/// Display form of an optional creation time; rows without one read as today.
pub(crate) fn created_label(created_at: Option<chrono::DateTime<chrono::Utc>>) -> String {
    match created_at {
        Some(at) => at.format("%b %-d, %Y").to_string(),
        None => "Today".to_string(),
    }
}
