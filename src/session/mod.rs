pub mod handlers;
pub mod notice;
pub mod state;

pub use handlers::{EchoCore, JournalEntry, ToneInfo};
pub use notice::{Notice, NoticeLevel, Outcome};
pub use state::EchoSession;
