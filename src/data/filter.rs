use std::collections::BTreeSet;
use std::fmt;

use super::model::{Dataset, TeamSeason};

// ---------------------------------------------------------------------------
// Filter state: the user's current selections
// ---------------------------------------------------------------------------

/// Conference selection. `All` means no conference filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Conference {
    #[default]
    All,
    Named(String),
}

impl Conference {
    pub fn named(name: impl Into<String>) -> Self {
        Conference::Named(name.into())
    }
}

impl fmt::Display for Conference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conference::All => write!(f, "All"),
            Conference::Named(name) => write!(f, "{name}"),
        }
    }
}

/// Current filter selections. Unset fields and an empty team set apply no
/// constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub year: Option<i32>,
    pub teams: BTreeSet<String>,
    pub conference: Conference,
    pub division: Option<String>,
}

impl FilterState {
    /// The same selections without the team filter, as used by the standings table.
    pub fn standings_scope(&self) -> Self {
        FilterState {
            teams: BTreeSet::new(),
            ..self.clone()
        }
    }

    fn predicates(&self) -> Vec<Predicate<'_>> {
        let mut out = Vec::with_capacity(4);
        if let Some(year) = self.year {
            out.push(Predicate::Year(year));
        }
        if !self.teams.is_empty() {
            out.push(Predicate::Teams(&self.teams));
        }
        if let Conference::Named(name) = &self.conference {
            out.push(Predicate::Conference(name));
        }
        if let Some(division) = &self.division {
            out.push(Predicate::Division(division));
        }
        out
    }
}

/// One active constraint of a [`FilterState`].
#[derive(Debug, Clone, Copy)]
enum Predicate<'s> {
    Year(i32),
    Teams(&'s BTreeSet<String>),
    Conference(&'s str),
    Division(&'s str),
}

impl Predicate<'_> {
    fn test(&self, rec: &TeamSeason) -> bool {
        match self {
            Predicate::Year(year) => rec.year == *year,
            Predicate::Teams(teams) => teams.contains(&rec.team),
            Predicate::Conference(conf) => rec.conference == *conf,
            Predicate::Division(div) => rec.division == *div,
        }
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Rows of a dataset that satisfy a [`FilterState`], in dataset order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Dataset indices of the visible rows, ascending.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn records(&self) -> impl Iterator<Item = &'a TeamSeason> + '_ {
        let records = self.dataset.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Apply `state` again on top of this view.
    pub fn refine(&self, state: &FilterState) -> FilteredView<'a> {
        FilteredView {
            dataset: self.dataset,
            indices: intersect_predicates(self.dataset, &self.indices, state),
        }
    }
}

/// Return the rows of `dataset` that pass every active predicate of `state`.
///
/// * `year` unset → no year constraint; no match → empty view
/// * empty team set → no team constraint
/// * `Conference::All` → no conference constraint
/// * `division` unset → no division constraint
pub fn filter<'a>(dataset: &'a Dataset, state: &FilterState) -> FilteredView<'a> {
    let all: Vec<usize> = (0..dataset.len()).collect();
    FilteredView {
        dataset,
        indices: intersect_predicates(dataset, &all, state),
    }
}

/// Each predicate selects its own match set from `candidates`; the result is
/// the intersection of all of them.
fn intersect_predicates(dataset: &Dataset, candidates: &[usize], state: &FilterState) -> Vec<usize> {
    let records = dataset.records();
    let start: BTreeSet<usize> = candidates.iter().copied().collect();

    state
        .predicates()
        .iter()
        .map(|pred| {
            candidates
                .iter()
                .copied()
                .filter(|&i| pred.test(&records[i]))
                .collect::<BTreeSet<usize>>()
        })
        .fold(start, |acc, matched| acc.intersection(&matched).copied().collect())
        .into_iter()
        .collect()
}

// ---------------------------------------------------------------------------
// Widget options
// ---------------------------------------------------------------------------

/// Conference choices: each conference in first-seen order, then `All`.
pub fn conference_options(dataset: &Dataset) -> Vec<Conference> {
    let mut out: Vec<Conference> = dataset
        .conferences()
        .into_iter()
        .map(Conference::named)
        .collect();
    out.push(Conference::All);
    out
}

/// Division choices for the selected conference, in first-seen order.
pub fn division_options(dataset: &Dataset, conference: &Conference) -> Vec<String> {
    dataset
        .divisions()
        .iter()
        .filter(|(conf, _)| match conference {
            Conference::All => true,
            Conference::Named(name) => conf == name,
        })
        .map(|(_, div)| div.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::data::fixtures::{league, LEAGUE};

    fn state(year: Option<i32>, conference: Conference, division: Option<&str>) -> FilterState {
        FilterState {
            year,
            teams: BTreeSet::new(),
            conference,
            division: division.map(str::to_string),
        }
    }

    #[test]
    fn year_and_conference() {
        let ds = league(2019..=2021);
        let view = filter(&ds, &state(Some(2020), Conference::named("AFC"), None));
        assert_eq!(view.len(), 16);
        assert!(view.records().all(|r| r.year == 2020 && r.conference == "AFC"));
    }

    #[test]
    fn division_narrows_to_four() {
        let ds = league(2019..=2021);
        let view = filter(&ds, &state(Some(2021), Conference::All, Some("NFC North")));
        let teams: Vec<&str> = view.records().map(|r| r.team.as_str()).collect();
        assert_eq!(
            teams,
            vec!["Chicago Bears", "Detroit Lions", "Green Bay Packers", "Minnesota Vikings"]
        );
    }

    #[test]
    fn unknown_year_is_empty_not_error() {
        let ds = league(2019..=2021);
        let view = filter(&ds, &state(Some(1999), Conference::All, None));
        assert!(view.is_empty());
    }

    #[test]
    fn team_set_membership() {
        let ds = league(2019..=2021);
        let mut s = state(Some(2019), Conference::All, None);
        s.teams = ["Detroit Lions", "Buffalo Bills", "Nobody FC"]
            .iter()
            .map(|t| t.to_string())
            .collect();
        let view = filter(&ds, &s);
        let teams: Vec<&str> = view.records().map(|r| r.team.as_str()).collect();
        assert_eq!(teams, vec!["Buffalo Bills", "Detroit Lions"]);
    }

    #[test]
    fn conflicting_conference_and_division_is_empty() {
        let ds = league(2019..=2021);
        let view = filter(&ds, &state(Some(2019), Conference::named("AFC"), Some("NFC West")));
        assert!(view.is_empty());
    }

    #[test]
    fn unset_year_spans_all_seasons() {
        let ds = league(2019..=2021);
        let view = filter(&ds, &state(None, Conference::named("NFC"), None));
        assert_eq!(view.len(), 48);
    }

    #[test]
    fn standings_scope_drops_teams_only() {
        let mut s = state(Some(2020), Conference::named("AFC"), Some("AFC East"));
        s.teams.insert("Buffalo Bills".into());
        let scoped = s.standings_scope();
        assert!(scoped.teams.is_empty());
        assert_eq!(scoped.year, Some(2020));
        assert_eq!(scoped.division.as_deref(), Some("AFC East"));
    }

    #[test]
    fn conference_and_division_options() {
        let ds = league(2020..=2020);
        assert_eq!(
            conference_options(&ds),
            vec![Conference::named("AFC"), Conference::named("NFC"), Conference::All]
        );
        assert_eq!(
            division_options(&ds, &Conference::named("NFC")),
            vec!["NFC East", "NFC North", "NFC South", "NFC West"]
        );
        assert_eq!(division_options(&ds, &Conference::All).len(), 8);
        assert!(division_options(&ds, &Conference::named("XFL")).is_empty());
    }

    fn arb_state() -> impl Strategy<Value = FilterState> {
        let teams: Vec<String> = LEAGUE.iter().map(|(t, _, _)| t.to_string()).collect();
        let conference = prop_oneof![
            Just(Conference::All),
            Just(Conference::named("AFC")),
            Just(Conference::named("NFC")),
            Just(Conference::named("XFL")),
        ];
        let division = prop::option::of(prop_oneof![
            Just("AFC East".to_string()),
            Just("NFC West".to_string()),
            Just("Nowhere".to_string()),
        ]);
        (
            prop::option::of(2018..=2022i32),
            prop::sample::subsequence(teams, 0..=6),
            conference,
            division,
        )
            .prop_map(|(year, teams, conference, division)| FilterState {
                year,
                teams: teams.into_iter().collect(),
                conference,
                division,
            })
    }

    proptest! {
        #[test]
        fn every_row_satisfies_active_predicates(s in arb_state()) {
            let ds = league(2019..=2021);
            let view = filter(&ds, &s);
            for rec in view.records() {
                prop_assert!(s.year.map_or(true, |y| rec.year == y));
                prop_assert!(s.teams.is_empty() || s.teams.contains(&rec.team));
                let conference_ok = match &s.conference {
                    Conference::All => true,
                    Conference::Named(c) => &rec.conference == c,
                };
                prop_assert!(conference_ok);
                prop_assert!(s.division.as_ref().map_or(true, |d| &rec.division == d));
            }
            prop_assert!(view.indices().windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn filtering_is_idempotent(s in arb_state()) {
            let ds = league(2019..=2021);
            let once = filter(&ds, &s);
            let twice = once.refine(&s);
            prop_assert_eq!(once.indices(), twice.indices());
        }

        #[test]
        fn empty_team_set_and_all_are_identities(s in arb_state()) {
            let ds = league(2019..=2021);
            let mut no_teams = s.clone();
            no_teams.teams.clear();
            let mut all_conf = no_teams.clone();
            all_conf.conference = Conference::All;

            let unconstrained = FilterState {
                year: s.year,
                division: s.division.clone(),
                ..FilterState::default()
            };
            let all_view = filter(&ds, &all_conf);
            let unconstrained_view = filter(&ds, &unconstrained);
            prop_assert_eq!(all_view.indices(), unconstrained_view.indices());

            let with_conf_only = filter(&ds, &no_teams);
            let manual: Vec<usize> = unconstrained_view
                .indices()
                .iter()
                .copied()
                .filter(|&i| match &s.conference {
                    Conference::All => true,
                    Conference::Named(c) => &ds.records()[i].conference == c,
                })
                .collect();
            prop_assert_eq!(with_conf_only.indices(), manual.as_slice());
        }
    }
}
