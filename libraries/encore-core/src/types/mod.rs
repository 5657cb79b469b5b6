/// Domain types for Encore
mod event;
mod ids;
mod search;
mod track;

pub use event::{EndReason, TrackEnd};
pub use ids::{CommunityId, PlayId, RequesterId};
pub use search::{Lyrics, PlaylistItem, SearchSource};
pub use track::{Track, TrackInfo};
