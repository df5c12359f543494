// Resume Builder: editable document model, display projection and the
// in-memory sessions that hold documents between requests.

pub mod document;
pub mod handlers;
pub mod preview;
pub mod sessions;

pub use sessions::ResumeSessions;
