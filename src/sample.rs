// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Mock sport events for the "Add documents" step.
//!
//! Each event pairs two random teams at a random stadium. Tags are the two
//! tags of each team, so tag boosting has something to match. Dates fall in
//! the next 100 days, which is what the date facet buckets are cut against.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use uuid::Builder;

use crate::types::{GeoPoint, IndexAction, IndexBatch, Record};

pub const CATEGORY: &str = "sport";

/// Events are scheduled up to this many days after generation.
pub const SCHEDULE_WINDOW_DAYS: f64 = 100.0;

const DESCRIPTION: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. \
Suspendisse interdum purus nec lectus viverra, consequat auctor nunc maximus. Mauris \
porttitor urna dignissim risus laoreet, ut vulputate purus malesuada. Vestibulum ipsum \
odio, pharetra eget erat vitae, ullamcorper hendrerit justo. In gravida tincidunt turpis. \
Proin at sodales justo, a varius justo. Praesent et nunc vel orci congue ullamcorper ac id \
tortor. Vivamus id semper eros. Mauris dictum pulvinar elit et interdum. Nam nec dictum \
lacus. Sed ut volutpat lorem. Vestibulum vitae porttitor erat, quis pellentesque quam.";

/// (stadium, latitude, longitude)
pub const STADIUMS: [(&str, f64, f64); 28] = [
    ("MetLife Stadium", 40.8135378, -74.0744119),
    ("Lambeau Field", 44.501341, -88.062208),
    ("AT&T Stadium", 32.747284, -97.094494),
    ("FedEx Field", 38.907699, -76.866338),
    ("Arrowhead Stadium", 39.048939, -94.483916),
    ("Sports Authority Field at Mile High", 39.743948, -105.020084),
    ("Sun Life Stadium", 25.957966, -80.23886),
    ("Bank of America Stadium", 35.2259943, -80.8531416),
    ("Mercedes-Benz Superdome", 29.951061, -90.081244),
    ("FirstEnergy Stadium", 41.506054, -81.699548),
    ("Ralph Wilson Stadium", 42.773698, -78.786948),
    ("Georgia Dome", 33.75769, -84.400829),
    ("NRG Stadium", 29.684722, -95.410707),
    ("Qualcomm Stadium", 32.783994, -117.11997),
    ("LP Field", 42.090946, -71.264346),
    ("Lincoln Financial Field", 39.900732, -75.167535),
    ("Levi's Stadium", 37.404108, -121.970274),
    ("EverBank Field", 30.324662, -81.637074),
    ("CenturyLink Field", 47.595152, -122.331639),
    ("Edward Jones Dome", 38.6328042, -90.1884177),
    ("Raymond James Stadium", 27.975959, -82.504133),
    ("Paul Brown Stadium", 40.446765, -80.01576),
    ("Heinz Field", 40.8135378, -74.0744119),
    ("Ford Field", 42.340006, -83.045603),
    ("University of Phoenix Stadium", 33.527625, -112.262559),
    ("Lucas Oil Stadium", 39.760101, -86.163888),
    ("Soldier Field", 41.862313, -87.616688),
    ("O.co Coliseum", 37.751595, -122.200546),
];

/// (team, [tag, tag])
pub const TEAMS: [(&str, [&str; 2]); 30] = [
    ("Falcons", ["falcons", "atlanta"]),
    ("Jaguars", ["Jaguars", "jacksonville"]),
    ("Bengals", ["Bengals", "cincinnati"]),
    ("Colts", ["Colts", "indianapolis"]),
    ("Packers", ["packers", "green bay"]),
    ("Chiefs", ["chiefs", "kansas"]),
    ("Dolphins", ["dolphins", "Miami"]),
    ("Rams", ["rams", "St. Louis"]),
    ("Jets", ["new york", "jets"]),
    ("Eagles", ["eagles", "philadelphia"]),
    ("Patriots", ["patriots", "new england"]),
    ("Giants", ["giants", "new york"]),
    ("Panthers", ["panthers", "carolina"]),
    ("Steelers", ["steelers", "pittsburg"]),
    ("Redskins", ["redskins", "washington"]),
    ("Buccaneers", ["buccaneers", "tampa bay"]),
    ("Bears", ["bears", "chicago"]),
    ("Browns", ["browns", "cleveland"]),
    ("Broncos", ["broncos", "denver"]),
    ("Cowboys", ["cowboys", "dallas"]),
    ("49ers", ["49ers", "san francisco"]),
    ("Texans", ["texans", "houston"]),
    ("Ravens", ["ravens", "baltimore"]),
    ("Saints", ["saints", "new orleans"]),
    ("Vikings", ["vikings", "minnesota"]),
    ("Titans", ["titans", "tennessee"]),
    ("Seahawks", ["seahawks", "seattle"]),
    ("Raiders", ["raiders", "oakland"]),
    ("Cardinals", ["cardinals", "arizona"]),
    ("Chargers", ["chargers", "san diego"]),
];

/// One random event added at `now`.
pub fn generate_event<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Record {
    let (stadium, lat, lon) = STADIUMS[rng.gen_range(0..STADIUMS.len())];
    let (home, home_tags) = TEAMS[rng.gen_range(0..TEAMS.len())];
    let (away, away_tags) = TEAMS[rng.gen_range(0..TEAMS.len())];

    let offset_ms = (rng.gen::<f64>() * SCHEDULE_WINDOW_DAYS * 86_400_000.0) as i64;
    let key = Builder::from_random_bytes(rng.gen()).into_uuid();

    Record {
        key: Some(key.to_string()),
        name: Some(format!("{} vs {}", home, away)),
        category: Some(CATEGORY.to_string()),
        description: Some(DESCRIPTION.to_string()),
        location: Some(stadium.to_string()),
        // Table coordinates are in range
        geolocation: GeoPoint::new(lat, lon).ok(),
        date: Some(now + Duration::milliseconds(offset_ms)),
        dateadded: Some(now),
        rating: Some(rng.gen_range(0..10)),
        tags: home_tags
            .iter()
            .chain(away_tags.iter())
            .map(|t| t.to_string())
            .collect(),
    }
}

/// A batch of `count` upload actions.
pub fn generate_batch<R: Rng + ?Sized>(rng: &mut R, count: usize, now: DateTime<Utc>) -> IndexBatch {
    IndexBatch::new(
        (0..count)
            .map(|_| IndexAction::upload(generate_event(rng, now)))
            .collect(),
    )
}
