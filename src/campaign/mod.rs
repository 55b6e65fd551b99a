//! Story campaign: cities of hand-shaped neighborhoods unlocked one by one.

pub mod maps;
pub mod progress;
#[cfg(feature = "std")]
pub mod store;

pub use maps::{CityDef, NeighborhoodDef, CAMPAIGN_CITIES, EXTRA_CITY_ID, EXTRA_MISSION, EXTRA_MISSION_DESCRIPTION};
pub use progress::{
    Campaign, CampaignError, CampaignProgress, CampaignView, CityProgress, CityView, CityWinner,
    ExtraMissionProgress, ExtraMissionView, NeighborhoodStatus, NeighborhoodView,
};
#[cfg(feature = "std")]
pub use store::{FileStore, MemoryStore, PersistentCampaign, ProgressStore, STORAGE_KEY};
