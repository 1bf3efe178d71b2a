use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TEAMS: [(&str, &str, &str, &str); 32] = [
    ("Buffalo Bills", "buf", "AFC", "AFC East"),
    ("Miami Dolphins", "mia", "AFC", "AFC East"),
    ("New England Patriots", "nwe", "AFC", "AFC East"),
    ("New York Jets", "nyj", "AFC", "AFC East"),
    ("Baltimore Ravens", "rav", "AFC", "AFC North"),
    ("Cincinnati Bengals", "cin", "AFC", "AFC North"),
    ("Cleveland Browns", "cle", "AFC", "AFC North"),
    ("Pittsburgh Steelers", "pit", "AFC", "AFC North"),
    ("Houston Texans", "htx", "AFC", "AFC South"),
    ("Indianapolis Colts", "clt", "AFC", "AFC South"),
    ("Jacksonville Jaguars", "jax", "AFC", "AFC South"),
    ("Tennessee Titans", "oti", "AFC", "AFC South"),
    ("Denver Broncos", "den", "AFC", "AFC West"),
    ("Kansas City Chiefs", "kan", "AFC", "AFC West"),
    ("Las Vegas Raiders", "rai", "AFC", "AFC West"),
    ("Los Angeles Chargers", "sdg", "AFC", "AFC West"),
    ("Dallas Cowboys", "dal", "NFC", "NFC East"),
    ("New York Giants", "nyg", "NFC", "NFC East"),
    ("Philadelphia Eagles", "phi", "NFC", "NFC East"),
    ("Washington Commanders", "was", "NFC", "NFC East"),
    ("Chicago Bears", "chi", "NFC", "NFC North"),
    ("Detroit Lions", "det", "NFC", "NFC North"),
    ("Green Bay Packers", "gnb", "NFC", "NFC North"),
    ("Minnesota Vikings", "min", "NFC", "NFC North"),
    ("Atlanta Falcons", "atl", "NFC", "NFC South"),
    ("Carolina Panthers", "car", "NFC", "NFC South"),
    ("New Orleans Saints", "nor", "NFC", "NFC South"),
    ("Tampa Bay Buccaneers", "tam", "NFC", "NFC South"),
    ("Arizona Cardinals", "crd", "NFC", "NFC West"),
    ("Los Angeles Rams", "ram", "NFC", "NFC West"),
    ("San Francisco 49ers", "sfo", "NFC", "NFC West"),
    ("Seattle Seahawks", "sea", "NFC", "NFC West"),
];

/// Numeric columns in source order (raw headers).
const METRICS: [&str; 33] = [
    "wins",
    "losses",
    "win_loss_perc",
    "points",
    "points_opp",
    "points_diff",
    "mov",
    "g",
    "total_yards",
    "plays_offense",
    "yds_per_play_offense",
    "turnovers",
    "fumbles_lost",
    "first_down",
    "pass_cmp",
    "pass_att",
    "pass_yds",
    "pass_td",
    "pass_int",
    "pass_net_yds_per_att",
    "pass_fd",
    "rush_att",
    "rush_yds",
    "rush_td",
    "rush_yds_per_att",
    "rush_fd",
    "penalties",
    "penalties_yds",
    "pen_fd",
    "score_pct",
    "turnover_pct",
    "exp_pts_tot",
    "ties",
];

struct Row {
    year: i64,
    team: &'static str,
    abbr: &'static str,
    conference: &'static str,
    division: &'static str,
    metrics: Vec<f64>,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// One plausible season line for a team, in `METRICS` order.
fn season_line(rng: &mut StdRng, games: f64) -> Vec<f64> {
    let ties = if rng.gen_bool(0.03) { 1.0 } else { 0.0 };
    let wins = rng.gen_range(1..=(games as i64 - 2)) as f64;
    let losses = games - wins - ties;
    let strength = (wins / games) - 0.5;

    let points = (games * (21.5 + strength * 14.0) + rng.gen_range(-30.0..30.0)).round();
    let points_opp = (games * (21.5 - strength * 12.0) + rng.gen_range(-30.0..30.0)).round();
    let pass_att = rng.gen_range(480.0..650.0_f64).round();
    let pass_cmp = (pass_att * rng.gen_range(0.58..0.70)).round();
    let pass_yds = (pass_att * rng.gen_range(6.2..7.8)).round();
    let rush_att = rng.gen_range(380.0..520.0_f64).round();
    let rush_yds = (rush_att * rng.gen_range(3.7..5.1)).round();
    let plays = pass_att + rush_att + rng.gen_range(20.0..50.0_f64).round();
    let total_yards = pass_yds + rush_yds;
    let turnovers = rng.gen_range(10.0..35.0_f64).round();
    let fumbles_lost = (turnovers * rng.gen_range(0.25..0.5)).round();
    let pass_int = turnovers - fumbles_lost;
    let pass_fd = (pass_cmp * 0.55).round();
    let rush_fd = (rush_att * 0.23).round();
    let pen_fd = rng.gen_range(15.0..35.0_f64).round();
    let penalties = rng.gen_range(80.0..130.0_f64).round();

    vec![
        wins,
        losses,
        round2((wins + ties / 2.0) / games),
        points,
        points_opp,
        points - points_opp,
        round2((points - points_opp) / games),
        games,
        total_yards,
        plays,
        round2(total_yards / plays),
        turnovers,
        fumbles_lost,
        pass_fd + rush_fd + pen_fd,
        pass_cmp,
        pass_att,
        pass_yds,
        rng.gen_range(12.0..45.0_f64).round(),
        pass_int,
        round2(pass_yds / pass_att * 0.93),
        pass_fd,
        rush_att,
        rush_yds,
        rng.gen_range(6.0..28.0_f64).round(),
        round2(rush_yds / rush_att),
        rush_fd,
        penalties,
        (penalties * rng.gen_range(7.5..9.5)).round(),
        pen_fd,
        round2(rng.gen_range(25.0..50.0) + strength * 15.0),
        round2(rng.gen_range(6.0..16.0)),
        round2(strength * 250.0 + rng.gen_range(-40.0..40.0)),
        ties,
    ]
}

fn main() {
    let mut rng = StdRng::seed_from_u64(42);

    let mut rows = Vec::new();
    for year in 2003..=2023 {
        let games = if year >= 2021 { 17.0 } else { 16.0 };
        for &(team, abbr, conference, division) in &TEAMS {
            rows.push(Row {
                year,
                team,
                abbr,
                conference,
                division,
                metrics: season_line(&mut rng, games),
            });
        }
    }

    // ---- CSV ----
    let csv_path = "data.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    let mut header = vec!["year", "team", "conference", "division"];
    header.extend(METRICS);
    header.push("logo_path");
    writer.write_record(&header).expect("Failed to write header");
    for row in &rows {
        let mut record = vec![
            row.year.to_string(),
            row.team.to_string(),
            row.conference.to_string(),
            row.division.to_string(),
        ];
        record.extend(row.metrics.iter().map(|v| v.to_string()));
        record.push(format!("logos/{}.png", row.abbr));
        writer.write_record(&record).expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush CSV");

    // ---- Parquet ----
    let mut fields = vec![
        Field::new("year", DataType::Int64, false),
        Field::new("team", DataType::Utf8, false),
        Field::new("conference", DataType::Utf8, false),
        Field::new("division", DataType::Utf8, false),
    ];
    fields.extend(METRICS.iter().map(|m| Field::new(*m, DataType::Float64, true)));
    fields.push(Field::new("logo_path", DataType::Utf8, true));
    let schema = Arc::new(Schema::new(fields));

    let text = |f: fn(&Row) -> String| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(rows.iter().map(|r| r.year).collect::<Vec<_>>())),
        text(|r| r.team.to_string()),
        text(|r| r.conference.to_string()),
        text(|r| r.division.to_string()),
    ];
    for i in 0..METRICS.len() {
        let values: Vec<f64> = rows.iter().map(|r| r.metrics[i]).collect();
        columns.push(Arc::new(Float64Array::from(values)));
    }
    columns.push(text(|r| format!("logos/{}.png", r.abbr)));

    let batch = RecordBatch::try_new(schema.clone(), columns).expect("Failed to create RecordBatch");
    let parquet_path = "data.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!(
        "Wrote {} team seasons ({} teams, 2003-2023) to {csv_path} and {parquet_path}",
        rows.len(),
        TEAMS.len()
    );
}
