//! Sequential unlock/completion state machine of the campaign.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use super::maps::{CityDef, NeighborhoodDef, CAMPAIGN_CITIES, EXTRA_CITY_ID, EXTRA_MISSION};
use crate::common::Orientation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum NeighborhoodStatus {
    #[default]
    Locked,
    Available,
    Completed,
}

/// Majority result of a completed city.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum CityWinner {
    Horizontal,
    Vertical,
    Tie,
}

impl CityWinner {
    /// Strict majority wins, equal non-zero counts tie, no wins at all is `None`.
    pub fn from_tally(horizontal: usize, vertical: usize) -> Option<Self> {
        match (horizontal, vertical) {
            (0, 0) => None,
            (h, v) if h == v => Some(CityWinner::Tie),
            (h, v) if h > v => Some(CityWinner::Horizontal),
            _ => Some(CityWinner::Vertical),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase", default))]
pub struct CityProgress {
    pub unlocked: bool,
    pub completed: bool,
    pub city_winner: Option<CityWinner>,
    pub neighborhoods: BTreeMap<String, NeighborhoodStatus>,
    pub neighborhood_results: BTreeMap<String, Orientation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct ExtraMissionProgress {
    pub unlocked: bool,
    pub status: NeighborhoodStatus,
    pub winner: Option<Orientation>,
}

/// The persisted progress blob: one entry per city id plus the extra mission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct CampaignProgress {
    #[cfg_attr(feature = "std", serde(rename = "extraMission", default))]
    pub extra_mission: ExtraMissionProgress,
    #[cfg_attr(feature = "std", serde(flatten))]
    pub cities: BTreeMap<String, CityProgress>,
}

/// Errors returned by campaign transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampaignError {
    UnknownCity(String),
    UnknownNeighborhood { city: String, neighborhood: String },
    /// The neighborhood has not been unlocked yet.
    NeighborhoodLocked { city: String, neighborhood: String },
    ExtraMissionLocked,
}

impl fmt::Display for CampaignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CampaignError::UnknownCity(city) => write!(f, "unknown city '{}'", city),
            CampaignError::UnknownNeighborhood { city, neighborhood } => {
                write!(f, "unknown neighborhood '{}' in city '{}'", neighborhood, city)
            }
            CampaignError::NeighborhoodLocked { city, neighborhood } => {
                write!(f, "neighborhood '{}' in city '{}' is locked", neighborhood, city)
            }
            CampaignError::ExtraMissionLocked => write!(f, "the extra mission is locked"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CampaignError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborhoodView {
    pub def: &'static NeighborhoodDef,
    pub status: NeighborhoodStatus,
    pub winner: Option<Orientation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CityView {
    pub def: &'static CityDef,
    pub unlocked: bool,
    pub completed: bool,
    pub city_winner: Option<CityWinner>,
    pub neighborhoods: Vec<NeighborhoodView>,
    pub completed_count: usize,
    pub available_count: usize,
}

impl CityView {
    pub fn total_count(&self) -> usize {
        self.neighborhoods.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtraMissionView {
    pub def: &'static NeighborhoodDef,
    pub unlocked: bool,
    pub status: NeighborhoodStatus,
    pub winner: Option<Orientation>,
}

/// Read-only projection of the campaign for UIs.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignView {
    pub cities: Vec<CityView>,
    pub extra_mission: ExtraMissionView,
}

/// Campaign definitions together with the player's progress through them.
#[derive(Debug, Clone, PartialEq)]
pub struct Campaign {
    cities: &'static [CityDef],
    progress: CampaignProgress,
}

impl Default for Campaign {
    fn default() -> Self {
        Self::new()
    }
}

impl Campaign {
    /// Fresh progress through the built-in cities.
    pub fn new() -> Self {
        Self::with_cities(CAMPAIGN_CITIES)
    }

    /// Fresh progress through `cities`.
    pub fn with_cities(cities: &'static [CityDef]) -> Self {
        Self::from_progress(cities, CampaignProgress::default())
    }

    /// Resume from saved progress, filling defaults and re-deriving unlocks.
    pub fn from_progress(cities: &'static [CityDef], progress: CampaignProgress) -> Self {
        let mut campaign = Self { cities, progress };
        campaign.normalize();
        campaign
    }

    pub fn cities(&self) -> &'static [CityDef] {
        self.cities
    }

    pub fn progress(&self) -> &CampaignProgress {
        &self.progress
    }

    /// Forget all progress.
    pub fn reset(&mut self) {
        self.progress = CampaignProgress::default();
        self.normalize();
    }

    pub fn neighborhood_status(&self, city_id: &str, neighborhood_id: &str) -> Option<NeighborhoodStatus> {
        self.progress
            .cities
            .get(city_id)?
            .neighborhoods
            .get(neighborhood_id)
            .copied()
    }

    /// Record the result of a mission, dispatching on the extra-mission id.
    pub fn record_result(
        &mut self,
        city_id: &str,
        neighborhood_id: &str,
        winner: Option<Orientation>,
    ) -> Result<(), CampaignError> {
        if city_id == EXTRA_CITY_ID {
            self.complete_extra_mission(winner)
        } else {
            self.complete_neighborhood(city_id, neighborhood_id, winner)
        }
    }

    /// Mark a neighborhood completed and unlock whatever comes next.
    ///
    /// The next neighborhood of the same city becomes available; after the
    /// last one the following city is unlocked.
    pub fn complete_neighborhood(
        &mut self,
        city_id: &str,
        neighborhood_id: &str,
        winner: Option<Orientation>,
    ) -> Result<(), CampaignError> {
        let cities = self.cities;
        let city_index = cities
            .iter()
            .position(|c| c.id == city_id)
            .ok_or_else(|| CampaignError::UnknownCity(city_id.to_string()))?;
        let city = &cities[city_index];
        let hood_index = city
            .neighborhoods
            .iter()
            .position(|n| n.id == neighborhood_id)
            .ok_or_else(|| CampaignError::UnknownNeighborhood {
                city: city_id.to_string(),
                neighborhood: neighborhood_id.to_string(),
            })?;
        if !matches!(
            self.neighborhood_status(city_id, neighborhood_id),
            Some(NeighborhoodStatus::Available | NeighborhoodStatus::Completed)
        ) {
            return Err(CampaignError::NeighborhoodLocked {
                city: city_id.to_string(),
                neighborhood: neighborhood_id.to_string(),
            });
        }

        let entry = self.progress.cities.entry(city.id.to_string()).or_default();
        entry
            .neighborhoods
            .insert(neighborhood_id.to_string(), NeighborhoodStatus::Completed);
        match winner {
            Some(w) => {
                entry.neighborhood_results.insert(neighborhood_id.to_string(), w);
            }
            None => {
                entry.neighborhood_results.remove(neighborhood_id);
            }
        }
        log::debug!("completed {}/{} (winner {:?})", city_id, neighborhood_id, winner);

        match city.neighborhoods.get(hood_index + 1) {
            Some(next) => {
                let status = entry.neighborhoods.entry(next.id.to_string()).or_default();
                if *status == NeighborhoodStatus::Locked {
                    *status = NeighborhoodStatus::Available;
                    log::debug!("unlocked {}/{}", city_id, next.id);
                }
            }
            None => {
                if let Some(next_city) = cities.get(city_index + 1) {
                    self.progress
                        .cities
                        .entry(next_city.id.to_string())
                        .or_default()
                        .unlocked = true;
                    log::debug!("unlocked city {}", next_city.id);
                }
            }
        }

        self.normalize();
        Ok(())
    }

    /// Record the tie-break mission result. Once completed it stays completed.
    pub fn complete_extra_mission(&mut self, winner: Option<Orientation>) -> Result<(), CampaignError> {
        let extra = &mut self.progress.extra_mission;
        if !extra.unlocked && extra.status != NeighborhoodStatus::Completed {
            return Err(CampaignError::ExtraMissionLocked);
        }
        extra.status = NeighborhoodStatus::Completed;
        extra.winner = winner;
        log::debug!("completed extra mission (winner {:?})", winner);
        self.normalize();
        Ok(())
    }

    /// Re-derive unlocks, city completion, city winners and the extra mission.
    fn normalize(&mut self) {
        let mut previous_completed = true;
        let mut horizontal_cities = 0;
        let mut vertical_cities = 0;

        for city in self.cities {
            let entry = self.progress.cities.entry(city.id.to_string()).or_default();
            if previous_completed {
                entry.unlocked = true;
            }

            let mut all_completed = true;
            let (mut horizontal, mut vertical) = (0, 0);
            for (index, hood) in city.neighborhoods.iter().enumerate() {
                let status = entry
                    .neighborhoods
                    .entry(hood.id.to_string())
                    .or_insert(NeighborhoodStatus::Locked);
                if entry.unlocked && index == 0 && *status == NeighborhoodStatus::Locked {
                    *status = NeighborhoodStatus::Available;
                }
                if *status == NeighborhoodStatus::Completed {
                    match entry.neighborhood_results.get(hood.id) {
                        Some(Orientation::Horizontal) => horizontal += 1,
                        Some(Orientation::Vertical) => vertical += 1,
                        None => {}
                    }
                } else {
                    entry.neighborhood_results.remove(hood.id);
                    all_completed = false;
                }
            }

            entry.completed = all_completed;
            entry.city_winner = if all_completed {
                CityWinner::from_tally(horizontal, vertical)
            } else {
                None
            };
            match entry.city_winner {
                Some(CityWinner::Horizontal) => horizontal_cities += 1,
                Some(CityWinner::Vertical) => vertical_cities += 1,
                _ => {}
            }
            previous_completed = previous_completed && all_completed;
        }

        let campaign_draw = horizontal_cities == vertical_cities && horizontal_cities + vertical_cities > 0;
        let extra = &mut self.progress.extra_mission;
        if extra.status == NeighborhoodStatus::Completed {
            if campaign_draw {
                extra.unlocked = true;
            }
        } else if campaign_draw {
            extra.unlocked = true;
            extra.status = NeighborhoodStatus::Available;
            extra.winner = None;
        } else {
            extra.unlocked = false;
            extra.status = NeighborhoodStatus::Locked;
            extra.winner = None;
        }
    }

    /// Per-city projection with counts, plus the extra mission.
    pub fn view(&self) -> CampaignView {
        let cities = self
            .cities
            .iter()
            .map(|city| {
                let entry = self.progress.cities.get(city.id);
                let neighborhoods: Vec<NeighborhoodView> = city
                    .neighborhoods
                    .iter()
                    .map(|def| NeighborhoodView {
                        def,
                        status: entry
                            .and_then(|e| e.neighborhoods.get(def.id).copied())
                            .unwrap_or_default(),
                        winner: entry.and_then(|e| e.neighborhood_results.get(def.id).copied()),
                    })
                    .collect();
                let count = |s: NeighborhoodStatus| neighborhoods.iter().filter(|n| n.status == s).count();
                CityView {
                    def: city,
                    unlocked: entry.is_some_and(|e| e.unlocked),
                    completed: entry.is_some_and(|e| e.completed),
                    city_winner: entry.and_then(|e| e.city_winner),
                    completed_count: count(NeighborhoodStatus::Completed),
                    available_count: count(NeighborhoodStatus::Available),
                    neighborhoods,
                }
            })
            .collect();
        CampaignView {
            cities,
            extra_mission: self.extra_mission(),
        }
    }

    pub fn extra_mission(&self) -> ExtraMissionView {
        let extra = &self.progress.extra_mission;
        ExtraMissionView {
            def: &EXTRA_MISSION,
            unlocked: extra.unlocked,
            status: extra.status,
            winner: extra.winner,
        }
    }

    /// Look up a mission by city and neighborhood id, including the extra mission.
    pub fn mission(&self, city_id: &str, neighborhood_id: &str) -> Option<NeighborhoodView> {
        if city_id == EXTRA_CITY_ID {
            let extra = self.extra_mission();
            return Some(NeighborhoodView {
                def: extra.def,
                status: extra.status,
                winner: extra.winner,
            });
        }
        let city = self.cities.iter().find(|c| c.id == city_id)?;
        let def = city.neighborhood(neighborhood_id)?;
        let entry = self.progress.cities.get(city_id);
        Some(NeighborhoodView {
            def,
            status: self.neighborhood_status(city_id, neighborhood_id).unwrap_or_default(),
            winner: entry.and_then(|e| e.neighborhood_results.get(neighborhood_id).copied()),
        })
    }
}
