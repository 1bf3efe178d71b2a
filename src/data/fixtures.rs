//! Shared test data: a 32-team league over a few seasons.

use super::model::{Cell, Dataset, RawTable};

pub(crate) const LEAGUE: [(&str, &str, &str); 32] = [
    ("Buffalo Bills", "AFC", "AFC East"),
    ("Miami Dolphins", "AFC", "AFC East"),
    ("New England Patriots", "AFC", "AFC East"),
    ("New York Jets", "AFC", "AFC East"),
    ("Baltimore Ravens", "AFC", "AFC North"),
    ("Cincinnati Bengals", "AFC", "AFC North"),
    ("Cleveland Browns", "AFC", "AFC North"),
    ("Pittsburgh Steelers", "AFC", "AFC North"),
    ("Houston Texans", "AFC", "AFC South"),
    ("Indianapolis Colts", "AFC", "AFC South"),
    ("Jacksonville Jaguars", "AFC", "AFC South"),
    ("Tennessee Titans", "AFC", "AFC South"),
    ("Denver Broncos", "AFC", "AFC West"),
    ("Kansas City Chiefs", "AFC", "AFC West"),
    ("Las Vegas Raiders", "AFC", "AFC West"),
    ("Los Angeles Chargers", "AFC", "AFC West"),
    ("Dallas Cowboys", "NFC", "NFC East"),
    ("New York Giants", "NFC", "NFC East"),
    ("Philadelphia Eagles", "NFC", "NFC East"),
    ("Washington Commanders", "NFC", "NFC East"),
    ("Chicago Bears", "NFC", "NFC North"),
    ("Detroit Lions", "NFC", "NFC North"),
    ("Green Bay Packers", "NFC", "NFC North"),
    ("Minnesota Vikings", "NFC", "NFC North"),
    ("Atlanta Falcons", "NFC", "NFC South"),
    ("Carolina Panthers", "NFC", "NFC South"),
    ("New Orleans Saints", "NFC", "NFC South"),
    ("Tampa Bay Buccaneers", "NFC", "NFC South"),
    ("Arizona Cardinals", "NFC", "NFC West"),
    ("Los Angeles Rams", "NFC", "NFC West"),
    ("San Francisco 49ers", "NFC", "NFC West"),
    ("Seattle Seahawks", "NFC", "NFC West"),
];

/// Every team for each season in `years`. Every fifth team has no logo and
/// every seventh has a blank rushing total.
pub(crate) fn league(years: std::ops::RangeInclusive<i32>) -> Dataset {
    let headers = [
        "team",
        "year",
        "conference",
        "division",
        "wins",
        "losses",
        "points",
        "points_opp",
        "rush_yds",
        "logo_path",
    ];
    let mut rows = Vec::new();
    for year in years {
        for (i, (team, conf, div)) in LEAGUE.iter().enumerate() {
            let seed = i as i64 * 7 + year as i64;
            let wins = seed % 17;
            let rush = if i % 7 == 3 {
                Cell::Null
            } else {
                Cell::Integer(1500 + seed % 900)
            };
            let logo = if i % 5 == 4 {
                Cell::Null
            } else {
                Cell::Text(format!("logos/{}.png", i))
            };
            rows.push(vec![
                Cell::Text(team.to_string()),
                Cell::Integer(year as i64),
                Cell::Text(conf.to_string()),
                Cell::Text(div.to_string()),
                Cell::Integer(wins),
                Cell::Integer(17 - wins),
                Cell::Integer(250 + (seed * 13) % 250),
                Cell::Integer(250 + (seed * 11) % 250),
                rush,
                logo,
            ]);
        }
    }
    let table = RawTable {
        headers: headers.iter().map(|h| h.to_string()).collect(),
        rows,
    };
    match Dataset::from_table(table) {
        Ok(ds) => ds,
        Err(e) => panic!("fixture league failed to load: {e}"),
    }
}
