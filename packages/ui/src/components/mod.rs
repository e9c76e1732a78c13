//! Presentation primitives shared by every view.

mod card;
mod feedback;
mod modal;
mod page_header;

pub use card::Card;
pub use feedback::{EmptyState, LoadingSpinner};
pub use modal::Modal;
pub use page_header::PageHeader;
