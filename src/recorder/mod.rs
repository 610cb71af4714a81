pub mod clock;
pub mod schema;
pub mod session;
pub mod summary;

pub use clock::SessionClock;
pub use schema::RowFormat;
pub use session::Session;
pub use summary::{BodySummary, FrameSummary};
