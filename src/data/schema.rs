// ---------------------------------------------------------------------------
// Column schema: raw source headers → display names
// ---------------------------------------------------------------------------

pub const SEASON_YEAR: &str = "Season Year";
pub const TEAM_NAME: &str = "Team Name";
pub const CONFERENCE: &str = "NFL Conference";
pub const DIVISION: &str = "NFL Division";
pub const LOGO_PATH: &str = "Logo Path";

pub const GAMES_WON: &str = "Games Won";
pub const GAMES_LOST: &str = "Games Lost";
pub const WIN_LOSS_PERCENTAGE: &str = "Win/Loss Percentage";
pub const POINTS_FOR: &str = "Points For";
pub const POINTS_AGAINST: &str = "Points Against";
pub const POINT_DIFFERENTIAL: &str = "Point Differential";

/// Identity columns in the order they lead `Dataset::columns()`.
pub const IDENTITY_COLUMNS: [&str; 4] = [TEAM_NAME, SEASON_YEAR, CONFERENCE, DIVISION];

/// Columns that must be present for a dataset to load.
pub const REQUIRED_COLUMNS: [&str; 5] = [SEASON_YEAR, TEAM_NAME, CONFERENCE, DIVISION, GAMES_WON];

/// Columns shown in the standings table, left to right.
pub const STANDINGS_COLUMNS: [&str; 7] = [
    TEAM_NAME,
    GAMES_WON,
    GAMES_LOST,
    WIN_LOSS_PERCENTAGE,
    POINTS_FOR,
    POINTS_AGAINST,
    POINT_DIFFERENTIAL,
];

pub const DEFAULT_X_METRIC: &str = "Passing Yards";
pub const DEFAULT_Y_METRIC: &str = "Rushing Yards";

/// `(raw header, display name)` pairs for the source layout.
const RENAMES: &[(&str, &str)] = &[
    ("year", SEASON_YEAR),
    ("team", TEAM_NAME),
    ("wins", GAMES_WON),
    ("losses", GAMES_LOST),
    ("win_loss_perc", WIN_LOSS_PERCENTAGE),
    ("points", POINTS_FOR),
    ("points_opp", POINTS_AGAINST),
    ("points_diff", POINT_DIFFERENTIAL),
    ("mov", "Average Margin of Victory (or Defeat)"),
    ("g", "Games Played"),
    ("total_yards", "Offensive Yards Gained"),
    ("plays_offense", "Offensive Plays Ran"),
    ("yds_per_play_offense", "Yards Per Play Offense"),
    ("turnovers", "Team Turnovers Lost"),
    ("fumbles_lost", "Team Fumbles Lost"),
    ("first_down", "First Downs Gained"),
    ("pass_cmp", "Passes Completed"),
    ("pass_att", "Pass Attempts"),
    ("pass_yds", "Passing Yards"),
    ("pass_td", "Passing Touchdowns"),
    ("pass_int", "Interceptions Thrown"),
    ("pass_net_yds_per_att", "Net Yards Gained Per Pass Attempt"),
    ("pass_fd", "Passing First Downs Gained"),
    ("rush_att", "Rushing Attempts"),
    ("rush_yds", "Rushing Yards"),
    ("rush_td", "Rushing Touchdowns"),
    ("rush_yds_per_att", "Rushing Yards Per Attempt"),
    ("rush_fd", "Rushing First Downs"),
    ("penalties", "Penalties Committed"),
    ("penalties_yds", "Penalty Yards Committed"),
    ("pen_fd", "First Downs by Penalty"),
    ("score_pct", "Percentage of Drives Ending in Score"),
    ("turnover_pct", "Percentage of Drives Ending in Turnover"),
    ("exp_pts_tot", "Expected Points Contributed by Offense"),
    ("ties", "Ties"),
    ("conference", CONFERENCE),
    ("division", DIVISION),
    ("logo_path", LOGO_PATH),
];

/// Map a source header to its display name.
///
/// Raw snake_case headers are renamed; display names and unknown headers are
/// returned trimmed but otherwise unchanged.
pub fn display_name(header: &str) -> String {
    let header = header.trim();
    RENAMES
        .iter()
        .find(|(raw, _)| *raw == header)
        .map(|(_, display)| (*display).to_string())
        .unwrap_or_else(|| header.to_string())
}

/// Whether a display column holds identity text rather than a metric.
pub fn is_identity(column: &str) -> bool {
    IDENTITY_COLUMNS.contains(&column) || column == LOGO_PATH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_headers_are_renamed() {
        assert_eq!(display_name("points_opp"), POINTS_AGAINST);
        assert_eq!(display_name(" year "), SEASON_YEAR);
        assert_eq!(display_name("rush_yds"), DEFAULT_Y_METRIC);
    }

    #[test]
    fn display_and_unknown_headers_pass_through() {
        assert_eq!(display_name(GAMES_WON), GAMES_WON);
        assert_eq!(display_name("Strength of Schedule"), "Strength of Schedule");
    }

    #[test]
    fn identity_columns_are_not_metrics() {
        assert!(is_identity(TEAM_NAME));
        assert!(is_identity(LOGO_PATH));
        assert!(!is_identity(GAMES_WON));
    }
}
