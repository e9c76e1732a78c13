//! Fixed records shown when a list cannot be fetched, and the canned
//! suggestions offered by the note and caption editors.
//!
//! Sample ids are short numbers so they never collide with backend UUIDs.

use chrono::NaiveDate;

use crate::models::{Letter, Memory, Milestone, Note, Song};

const IMAGE_BASE: &str =
    "https://storage.googleapis.com/dala-prod-public-storage/generated-images/c5117801-d6d0-4cd7-9e58-3de6b4b36fcf";

pub const NOTE_SUGGESTIONS: &[&str] = &[
    "Trizah, thank you for choosing us every day 💖",
    "You're the best thing that ever happened to me, Ben.",
    "Your smile is my favorite view in the entire world.",
    "Just a quick reminder that I love you more than words can say.",
    "I'm so lucky to be building a life with you.",
    "Thinking of our last date and smiling. Can't wait for the next one!",
];

pub const CAPTION_SUGGESTIONS: &[&str] = &[
    "Every day with you is my favorite day. ❤️",
    "Captured a moment, keeping it forever. ✨",
    "You make my heart smile in every frame. 📸",
    "Just us being us. Love you Trizah! 💖",
    "Ben and Trizah, a story for the ages. 📖",
    "The best things in life are even better with you. 🌹",
    "Life is a beautiful journey, and I'm glad I'm walking it with you.",
];

/// Picks a suggestion by an arbitrary seed (wrapped into range).
pub fn pick(suggestions: &[&'static str], seed: usize) -> &'static str {
    suggestions[seed % suggestions.len()]
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn milestones() -> Vec<Milestone> {
    vec![
        Milestone {
            id: "1".to_string(),
            date: date(2023, 5, 20),
            title: "The Day It All Began".to_string(),
            description: "The moment our paths crossed and everything changed for the better."
                .to_string(),
            user_id: None,
            created_at: None,
        },
        Milestone {
            id: "2".to_string(),
            date: date(2024, 2, 14),
            title: "First Valentine's together".to_string(),
            description: "An unforgettable night filled with laughter and love. ❤️".to_string(),
            user_id: None,
            created_at: None,
        },
    ]
}

pub fn memories() -> Vec<Memory> {
    [
        ("1", "romantic-sunset-21d4b739-1770818040961.webp", "Forever holding your hand by the sunset. ❤️"),
        ("2", "pink-roses-5e4b70e7-1770818040491.webp", "A beautiful surprise for my beautiful Trizah. 🌹"),
        ("3", "starry-picnic-3a393370-1770818042293.webp", "Starry nights and cozy vibes. ✨"),
    ]
    .into_iter()
    .map(|(id, file, caption)| Memory {
        id: id.to_string(),
        image_url: format!("{IMAGE_BASE}/{file}"),
        caption: caption.to_string(),
        user_id: None,
        created_at: None,
    })
    .collect()
}

pub fn notes() -> Vec<Note> {
    NOTE_SUGGESTIONS[..2]
        .iter()
        .enumerate()
        .map(|(i, content)| Note {
            id: (i + 1).to_string(),
            content: content.to_string(),
            user_id: None,
            created_at: None,
        })
        .collect()
}

pub fn letters() -> Vec<Letter> {
    vec![
        Letter {
            id: "1".to_string(),
            title: "Open when you miss me".to_string(),
            content: "My dearest Trizah,\n\nIf you're reading this, it means I'm not right there by your side, but remember that I'm always with you in heart. Close your eyes and feel my hug. I'll be back soon to hold you for real.\n\nAlways yours,\nBen".to_string(),
            is_locked: Some(true),
            user_id: None,
            created_at: None,
        },
        Letter {
            id: "2".to_string(),
            title: "Open when you're stressed".to_string(),
            content: "Take a deep breath, love. You are stronger than you know and more capable than you think. I believe in you, and I'm your biggest fan. Everything will be okay.\n\nLove, Ben".to_string(),
            is_locked: Some(true),
            user_id: None,
            created_at: None,
        },
    ]
}

pub fn songs() -> Vec<Song> {
    [
        ("1", "Perfect - Ed Sheeran", "https://open.spotify.com/track/0tgVpS3mR0pYdfFvTTGPpZ"),
        ("2", "Conversations in the Dark - John Legend", "https://open.spotify.com/track/29909797087654"),
        ("3", "Lover - Taylor Swift", "https://open.spotify.com/track/1dGr1psI1pw3asZdykLs6u"),
    ]
    .into_iter()
    .map(|(id, title, link)| Song {
        id: id.to_string(),
        song_title: title.to_string(),
        link: Some(link.to_string()),
        user_id: None,
        created_at: None,
    })
    .collect()
}
