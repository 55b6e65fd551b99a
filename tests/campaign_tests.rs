use std::cell::Cell;
use std::rc::Rc;

use squart::campaign::{
    Campaign, CampaignError, CampaignProgress, CityWinner, FileStore, MemoryStore, NeighborhoodStatus,
    PersistentCampaign, ProgressStore, CAMPAIGN_CITIES, EXTRA_CITY_ID, EXTRA_MISSION, STORAGE_KEY,
};
use squart::{generate, GameEngine, Orientation};

use NeighborhoodStatus::{Available, Completed, Locked};
use Orientation::{Horizontal as H, Vertical as V};

fn complete_city(campaign: &mut Campaign, city: &str, winners: &[Option<Orientation>]) {
    let def = CAMPAIGN_CITIES.iter().find(|c| c.id == city).unwrap();
    assert_eq!(def.neighborhoods.len(), winners.len());
    for (hood, winner) in def.neighborhoods.iter().zip(winners) {
        campaign.complete_neighborhood(city, hood.id, *winner).unwrap();
    }
}

/// Cities one and two split 1-1 between the sides.
fn tied_campaign() -> Campaign {
    let mut campaign = Campaign::new();
    complete_city(&mut campaign, "neo-aurora", &[Some(H), Some(H), Some(V)]);
    complete_city(&mut campaign, "solstice-haven", &[Some(V), Some(V)]);
    campaign
}

#[test]
fn fresh_campaign_opens_first_neighborhood_only() {
    let campaign = Campaign::new();
    let view = campaign.view();
    assert_eq!(view.cities.len(), 3);
    assert!(view.cities[0].unlocked);
    assert!(!view.cities[1].unlocked);
    assert!(!view.cities[2].unlocked);
    assert_eq!(campaign.neighborhood_status("neo-aurora", "aurora-core"), Some(Available));
    assert_eq!(campaign.neighborhood_status("neo-aurora", "aurora-docks"), Some(Locked));
    assert_eq!(campaign.neighborhood_status("solstice-haven", "haven-gardens"), Some(Locked));
    assert_eq!(view.cities[0].available_count, 1);
    assert_eq!(view.cities[0].completed_count, 0);
    assert_eq!(view.cities[0].total_count(), 3);
    assert!(!view.extra_mission.unlocked);
    assert_eq!(view.extra_mission.status, Locked);
}

#[test]
fn neighborhoods_unlock_in_order_then_next_city() {
    let mut campaign = Campaign::new();
    campaign.complete_neighborhood("neo-aurora", "aurora-core", Some(H)).unwrap();
    assert_eq!(campaign.neighborhood_status("neo-aurora", "aurora-core"), Some(Completed));
    assert_eq!(campaign.neighborhood_status("neo-aurora", "aurora-docks"), Some(Available));
    assert_eq!(campaign.neighborhood_status("neo-aurora", "aurora-zenith"), Some(Locked));

    campaign.complete_neighborhood("neo-aurora", "aurora-docks", Some(V)).unwrap();
    campaign.complete_neighborhood("neo-aurora", "aurora-zenith", Some(H)).unwrap();

    let view = campaign.view();
    assert!(view.cities[0].completed);
    assert_eq!(view.cities[0].city_winner, Some(CityWinner::Horizontal));
    assert_eq!(view.cities[0].completed_count, 3);
    assert!(view.cities[1].unlocked);
    assert_eq!(campaign.neighborhood_status("solstice-haven", "haven-gardens"), Some(Available));
    assert!(!view.cities[2].unlocked);
}

#[test]
fn locked_and_unknown_targets_are_rejected() {
    let mut campaign = Campaign::new();
    let before = campaign.clone();
    assert_eq!(
        campaign.complete_neighborhood("neo-aurora", "aurora-zenith", Some(H)),
        Err(CampaignError::NeighborhoodLocked {
            city: "neo-aurora".into(),
            neighborhood: "aurora-zenith".into(),
        })
    );
    assert_eq!(
        campaign.complete_neighborhood("atlantis", "aurora-core", None),
        Err(CampaignError::UnknownCity("atlantis".into()))
    );
    assert!(matches!(
        campaign.complete_neighborhood("neo-aurora", "nowhere", None),
        Err(CampaignError::UnknownNeighborhood { .. })
    ));
    assert_eq!(
        campaign.record_result(EXTRA_CITY_ID, EXTRA_MISSION.id, Some(H)),
        Err(CampaignError::ExtraMissionLocked)
    );
    assert_eq!(campaign, before);
}

#[test]
fn city_winner_by_majority_tie_or_none() {
    let mut campaign = Campaign::new();
    complete_city(&mut campaign, "neo-aurora", &[Some(H), Some(V), None]);
    assert_eq!(campaign.view().cities[0].city_winner, Some(CityWinner::Tie));

    complete_city(&mut campaign, "solstice-haven", &[None, None]);
    let view = campaign.view();
    assert!(view.cities[1].completed);
    assert_eq!(view.cities[1].city_winner, None);
    // neither a tied nor a winnerless city counts towards the extra mission
    assert!(!view.extra_mission.unlocked);
    assert!(view.cities[2].unlocked);
}

#[test]
fn replaying_a_neighborhood_overwrites_its_result() {
    let mut campaign = Campaign::new();
    campaign.complete_neighborhood("neo-aurora", "aurora-core", Some(H)).unwrap();
    campaign.complete_neighborhood("neo-aurora", "aurora-core", Some(V)).unwrap();
    let hood = campaign.mission("neo-aurora", "aurora-core").unwrap();
    assert_eq!(hood.winner, Some(V));
    assert_eq!(hood.status, Completed);

    campaign.complete_neighborhood("neo-aurora", "aurora-core", None).unwrap();
    assert_eq!(campaign.mission("neo-aurora", "aurora-core").unwrap().winner, None);
}

#[test]
fn split_campaign_unlocks_extra_mission() {
    let campaign = tied_campaign();
    let extra = campaign.extra_mission();
    assert!(extra.unlocked);
    assert_eq!(extra.status, Available);
    assert_eq!(extra.winner, None);
    assert_eq!(extra.def.id, "final-showdown");

    let mission = campaign.mission(EXTRA_CITY_ID, "").unwrap();
    assert_eq!(mission.def.id, EXTRA_MISSION.id);
    assert_eq!(mission.status, Available);
}

#[test]
fn extra_mission_relocks_when_the_split_breaks() {
    let mut campaign = tied_campaign();
    complete_city(&mut campaign, "astral-frontier", &[Some(H), Some(H), Some(H)]);
    let extra = campaign.extra_mission();
    assert!(!extra.unlocked);
    assert_eq!(extra.status, Locked);
}

#[test]
fn completed_extra_mission_is_sticky() {
    let mut campaign = tied_campaign();
    campaign.record_result(EXTRA_CITY_ID, EXTRA_MISSION.id, Some(V)).unwrap();
    assert_eq!(campaign.extra_mission().status, Completed);
    assert_eq!(campaign.extra_mission().winner, Some(V));

    complete_city(&mut campaign, "astral-frontier", &[Some(H), Some(H), Some(H)]);
    let extra = campaign.extra_mission();
    assert_eq!(extra.status, Completed);
    assert_eq!(extra.winner, Some(V));
}

#[test]
fn reset_and_reimport() {
    let mut campaign = tied_campaign();
    let restored = Campaign::from_progress(CAMPAIGN_CITIES, campaign.progress().clone());
    assert_eq!(restored, campaign);

    campaign.reset();
    assert_eq!(campaign, Campaign::new());
}

#[test]
fn import_rederives_unlocks() {
    // a blob claiming the second city is open while the first is unfinished
    let json = r#"{
        "neo-aurora": {"neighborhoods": {"aurora-core": "completed"}, "neighborhoodResults": {"aurora-core": "vertical"}},
        "solstice-haven": {"unlocked": true, "neighborhoods": {"haven-gardens": "completed"}, "neighborhoodResults": {"haven-gardens": "horizontal"}}
    }"#;
    let progress: CampaignProgress = serde_json::from_str(json).unwrap();
    let campaign = Campaign::from_progress(CAMPAIGN_CITIES, progress);
    let view = campaign.view();
    assert!(view.cities[0].unlocked);
    assert!(!view.cities[0].completed);
    assert_eq!(view.cities[0].neighborhoods[0].winner, Some(V));
    // previously stored flags are kept, missing entries are filled in
    assert_eq!(campaign.neighborhood_status("solstice-haven", "haven-canals"), Some(Locked));
    assert_eq!(campaign.neighborhood_status("neo-aurora", "aurora-zenith"), Some(Locked));
    assert!(!view.extra_mission.unlocked);
}

#[test]
fn every_mission_generates_a_board() {
    let missions = CAMPAIGN_CITIES
        .iter()
        .flat_map(|c| c.neighborhoods.iter())
        .chain(std::iter::once(&EXTRA_MISSION));
    for def in missions {
        let config = def.board_config(None).unwrap();
        assert_eq!(config.seed(), Some(def.recommended_seed));
        let board = generate(&config).unwrap();
        assert_eq!(board, generate(&config).unwrap());
        assert_eq!((board.rows(), board.cols()), (def.rows, def.cols));
        assert!(board.void_count() > 0, "{} has no shape", def.id);
        assert!(board.playable_square_count() > board.inactive_count());

        let engine = GameEngine::new(&def.board_config(Some("custom")).unwrap()).unwrap();
        assert_eq!(engine.board().seed(), Some("custom"));
    }
}

#[test]
fn progress_json_layout() {
    let campaign = tied_campaign();
    let value = serde_json::to_value(campaign.progress()).unwrap();
    assert_eq!(value["extraMission"]["status"], "available");
    assert_eq!(value["extraMission"]["unlocked"], true);
    assert_eq!(value["neo-aurora"]["cityWinner"], "horizontal");
    assert_eq!(value["solstice-haven"]["cityWinner"], "vertical");
    assert_eq!(value["neo-aurora"]["neighborhoods"]["aurora-zenith"], "completed");
    assert_eq!(value["neo-aurora"]["neighborhoodResults"]["aurora-zenith"], "vertical");
}

#[test]
fn persistent_campaign_round_trips_through_store() {
    let mut persistent = PersistentCampaign::open(MemoryStore::new()).unwrap();
    assert!(persistent.store().get(STORAGE_KEY).is_some());

    persistent.record_result("neo-aurora", "aurora-core", Some(H)).unwrap();
    let store = persistent.into_store();
    let reopened = PersistentCampaign::open(store).unwrap();
    assert_eq!(
        reopened.campaign().neighborhood_status("neo-aurora", "aurora-docks"),
        Some(Available)
    );
    assert_eq!(
        reopened.campaign().mission("neo-aurora", "aurora-core").unwrap().winner,
        Some(H)
    );
}

#[test]
fn unreadable_progress_falls_back_to_defaults() {
    let mut store = MemoryStore::new();
    store.insert(STORAGE_KEY, "{not json");
    let persistent = PersistentCampaign::open(store).unwrap();
    assert_eq!(persistent.campaign(), &Campaign::new());
    let saved = persistent.store().get(STORAGE_KEY).unwrap();
    assert!(serde_json::from_str::<CampaignProgress>(saved).is_ok());
}

/// Store whose writes can be switched off from outside.
#[derive(Default)]
struct SwitchableStore {
    inner: MemoryStore,
    read_only: Rc<Cell<bool>>,
}

impl ProgressStore for SwitchableStore {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.inner.load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        if self.read_only.get() {
            anyhow::bail!("store is read-only");
        }
        self.inner.save(key, value)
    }
}

#[test]
fn failed_save_keeps_previous_state() {
    let read_only = Rc::new(Cell::new(false));
    let store = SwitchableStore {
        inner: MemoryStore::new(),
        read_only: Rc::clone(&read_only),
    };
    let mut persistent = PersistentCampaign::open(store).unwrap();
    let before = persistent.campaign().clone();

    read_only.set(true);
    assert!(persistent.record_result("neo-aurora", "aurora-core", Some(H)).is_err());
    assert!(persistent.reset().is_err());
    assert_eq!(persistent.campaign(), &before);

    read_only.set(false);
    persistent.record_result("neo-aurora", "aurora-core", Some(H)).unwrap();
    assert_ne!(persistent.campaign(), &before);
}

#[test]
fn campaign_errors_surface_through_persistence() {
    let mut persistent = PersistentCampaign::open(MemoryStore::new()).unwrap();
    let err = persistent
        .record_result("neo-aurora", "aurora-docks", Some(V))
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<CampaignError>(),
        Some(&CampaignError::NeighborhoodLocked {
            city: "neo-aurora".into(),
            neighborhood: "aurora-docks".into(),
        })
    );
}

#[test]
fn file_store_persists_between_sessions() {
    let dir = std::env::temp_dir().join(format!("squart-campaign-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    {
        let mut persistent = PersistentCampaign::open(FileStore::new(&dir)).unwrap();
        persistent.record_result("neo-aurora", "aurora-core", Some(V)).unwrap();
    }
    let store = FileStore::new(&dir);
    assert!(store.path_for(STORAGE_KEY).ends_with("squart_story-progress_v1.json"));
    assert!(store.load(STORAGE_KEY).unwrap().is_some());
    let reopened = PersistentCampaign::open(store).unwrap();
    assert_eq!(
        reopened.campaign().neighborhood_status("neo-aurora", "aurora-core"),
        Some(Completed)
    );
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn file_store_replaces_blob_whole() {
    let dir = std::env::temp_dir().join(format!("squart-atomic-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    let mut store = FileStore::new(&dir);
    let target = store.path_for(STORAGE_KEY);

    store.save(STORAGE_KEY, "{\"first\":1}").unwrap();
    store.save(STORAGE_KEY, "{\"second\":2}").unwrap();
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "{\"second\":2}");
    let names: Vec<_> = std::fs::read_dir(&dir)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![target.file_name().unwrap().to_owned()]);

    // a save cut off mid-write only ever leaves a torn sibling file behind
    {
        let mut persistent = PersistentCampaign::open(FileStore::new(&dir)).unwrap();
        persistent.record_result("neo-aurora", "aurora-core", Some(H)).unwrap();
    }
    std::fs::write(target.with_extension("json.tmp"), "{\"neo-aur").unwrap();
    let reopened = PersistentCampaign::open(FileStore::new(&dir)).unwrap();
    assert_eq!(
        reopened.campaign().neighborhood_status("neo-aurora", "aurora-core"),
        Some(Completed)
    );
    let saved = std::fs::read_to_string(&target).unwrap();
    assert!(serde_json::from_str::<CampaignProgress>(&saved).is_ok());
    assert!(!target.with_extension("json.tmp").exists());

    std::fs::remove_dir_all(&dir).unwrap();
}
