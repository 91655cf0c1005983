// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Visibility filtering.
//!
//! Turns the current filter criteria into one visibility flag per project,
//! preserving store order. Filtering is a pure function: no state, no errors.

use crate::models::project::Project;
use serde::{Deserialize, Serialize};

/// A selector value: either "all" or one exact label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Choice {
    #[default]
    All,
    Only(String),
}

impl Choice {
    /// Exact, case-sensitive comparison. `All` matches everything.
    pub fn matches(&self, label: &str) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(wanted) => wanted == label,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Choice::All => "All",
            Choice::Only(value) => value,
        }
    }
}

/// Which project fields the free-text search looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    /// Project name only.
    Name,
    /// Name, notes and objective.
    #[default]
    NameNotesObjective,
}

/// Current filter inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub status: Choice,
    pub project_type: Choice,
    pub search: String,
}

/// Whether a single project passes all active criteria.
#[cfg(test)]
pub fn is_visible(project: &Project, criteria: &FilterCriteria, scope: SearchScope) -> bool {
    passes(project, criteria, &criteria.search.to_lowercase(), scope)
}

/// One flag per project, same order and length as `projects`.
pub fn compute_visibility(
    projects: &[Project],
    criteria: &FilterCriteria,
    scope: SearchScope,
) -> Vec<bool> {
    let needle = criteria.search.to_lowercase();
    projects
        .iter()
        .map(|project| passes(project, criteria, &needle, scope))
        .collect()
}

/// The visible subsequence, in store order.
pub fn visible_projects<'a>(
    projects: &'a [Project],
    visibility: &'a [bool],
) -> impl Iterator<Item = &'a Project> + 'a {
    projects
        .iter()
        .zip(visibility.iter())
        .filter_map(|(project, &visible)| visible.then_some(project))
}

fn passes(project: &Project, criteria: &FilterCriteria, needle: &str, scope: SearchScope) -> bool {
    criteria.status.matches(project.status.as_str())
        && criteria.project_type.matches(&project.project_type)
        && matches_search(project, needle, scope)
}

fn matches_search(project: &Project, needle: &str, scope: SearchScope) -> bool {
    if needle.is_empty() {
        return true;
    }
    let contains = |text: &str| text.to_lowercase().contains(needle);
    match scope {
        SearchScope::Name => contains(&project.name),
        SearchScope::NameNotesObjective => {
            contains(&project.name) || contains(&project.notes) || contains(&project.objective)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::project::Status;
    use proptest::prelude::*;
    use proptest::test_runner::Config;

    fn sample() -> Vec<Project> {
        let mut alpha = Project::new(1, "Alpha Portal", "Web", Status::Ongoing, 40);
        alpha.notes = "waiting on vendor".to_string();
        let mut beta = Project::new(2, "Beta Sensor", "Hardware", Status::Completed, 100);
        beta.objective = "Ship the portal integration".to_string();
        let gamma = Project::new(3, "Gamma Study", "Research", Status::Other("On Hold".into()), 60);
        vec![alpha, beta, gamma]
    }

    #[test]
    fn test_unfiltered_shows_everything() {
        let projects = sample();
        let visibility =
            compute_visibility(&projects, &FilterCriteria::default(), SearchScope::default());
        assert_eq!(visibility, vec![true, true, true]);
    }

    #[test]
    fn test_status_and_type_are_exact() {
        let projects = sample();
        let criteria = FilterCriteria {
            status: Choice::Only("Ongoing".into()),
            project_type: Choice::Only("Web".into()),
            search: String::new(),
        };
        assert_eq!(
            compute_visibility(&projects, &criteria, SearchScope::Name),
            vec![true, false, false]
        );

        let lowercase = FilterCriteria {
            status: Choice::Only("ongoing".into()),
            ..FilterCriteria::default()
        };
        assert_eq!(
            compute_visibility(&projects, &lowercase, SearchScope::Name),
            vec![false, false, false]
        );
    }

    #[test]
    fn test_unknown_criteria_match_nothing() {
        let projects = sample();
        let criteria = FilterCriteria {
            project_type: Choice::Only("Marketing".into()),
            ..FilterCriteria::default()
        };
        assert!(compute_visibility(&projects, &criteria, SearchScope::default())
            .iter()
            .all(|visible| !visible));
    }

    #[test]
    fn test_search_scope() {
        let projects = sample();
        let criteria = FilterCriteria {
            search: "PORTAL".into(),
            ..FilterCriteria::default()
        };
        assert_eq!(
            compute_visibility(&projects, &criteria, SearchScope::Name),
            vec![true, false, false]
        );
        assert_eq!(
            compute_visibility(&projects, &criteria, SearchScope::NameNotesObjective),
            vec![true, true, false]
        );
    }

    #[test]
    fn test_unique_name_substring_yields_one_project() {
        let projects = sample();
        let criteria = FilterCriteria {
            search: "gamma".into(),
            ..FilterCriteria::default()
        };
        let visibility = compute_visibility(&projects, &criteria, SearchScope::default());
        let visible: Vec<_> = visible_projects(&projects, &visibility).collect();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Gamma Study");
    }

    fn status_strategy() -> impl Strategy<Value = Status> {
        prop_oneof![
            Just(Status::Ongoing),
            Just(Status::Completed),
            Just(Status::Other("On Hold".to_string())),
        ]
    }

    fn project_strategy() -> impl Strategy<Value = Project> {
        (
            "[A-Za-z ]{0,12}",
            prop::sample::select(vec!["Web", "Hardware", "Research"]),
            status_strategy(),
            0u8..=100,
            "[a-z ]{0,12}",
            "[a-z ]{0,12}",
        )
            .prop_map(|(name, project_type, status, completion, notes, objective)| {
                let mut project = Project::new("p", name, project_type, status, completion);
                project.notes = notes;
                project.objective = objective;
                project
            })
    }

    fn choice_strategy(labels: Vec<&'static str>) -> impl Strategy<Value = Choice> {
        prop_oneof![
            Just(Choice::All),
            prop::sample::select(labels).prop_map(|label| Choice::Only(label.to_string())),
        ]
    }

    proptest! {
        #![proptest_config(Config::with_cases(256))]
        #[test]
        fn visibility_is_conjunction_of_predicates(
            projects in prop::collection::vec(project_strategy(), 0..20),
            status in choice_strategy(vec!["Ongoing", "Completed", "On Hold", "Archived"]),
            project_type in choice_strategy(vec!["Web", "Hardware", "Research", "Marketing"]),
            search in "[a-zA-Z]{0,3}",
            name_only in any::<bool>(),
        ) {
            let scope = if name_only { SearchScope::Name } else { SearchScope::NameNotesObjective };
            let criteria = FilterCriteria { status: status.clone(), project_type: project_type.clone(), search: search.clone() };
            let visibility = compute_visibility(&projects, &criteria, scope);

            prop_assert_eq!(visibility.len(), projects.len());
            let needle = search.to_lowercase();
            for (project, visible) in projects.iter().zip(&visibility) {
                let status_ok = status == Choice::All || status == Choice::Only(project.status.as_str().to_string());
                let type_ok = project_type == Choice::All || project_type == Choice::Only(project.project_type.clone());
                let search_ok = needle.is_empty()
                    || project.name.to_lowercase().contains(&needle)
                    || (!name_only
                        && (project.notes.to_lowercase().contains(&needle)
                            || project.objective.to_lowercase().contains(&needle)));
                prop_assert_eq!(*visible, status_ok && type_ok && search_ok);
                prop_assert_eq!(*visible, is_visible(project, &criteria, scope));
            }
        }
    }
}
