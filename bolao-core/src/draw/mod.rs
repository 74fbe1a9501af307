pub mod feed;
pub mod manager;

pub use feed::{DrawFeed, FeedClient, LatestDraw, PrizeTier};
pub use manager::ResultManager;
