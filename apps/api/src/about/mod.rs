// About page: section records, draft text formats, the edit/save/cancel
// cycle, and the persistence seam behind it.

pub mod client;
pub mod codec;
pub mod editor;
pub mod handlers;
pub mod models;
pub mod repository;

pub use editor::AboutPage;
pub use repository::StoreAboutRepository;
