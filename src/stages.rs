/// Screens, career stages, and shared progression state.
use bevy::prelude::*;
use strum::{EnumCount, EnumIter};

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum Screen {
    #[default]
    Menu,
    Town,
}

/// One unit of the résumé narrative. Declaration order is the narrative
/// order and never changes at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, EnumCount)]
pub enum Stage {
    Elementary,
    JuniorHigh,
    SeniorHigh,
    College,
    Work,
}

impl Stage {
    /// The stage that follows this one, if any.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Elementary => Some(Stage::JuniorHigh),
            Stage::JuniorHigh => Some(Stage::SeniorHigh),
            Stage::SeniorHigh => Some(Stage::College),
            Stage::College => Some(Stage::Work),
            Stage::Work => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Stage::Elementary => "Primary Education (2011-2017)",
            Stage::JuniorHigh => "Junior High School (2017-2021)",
            Stage::SeniorHigh => "Senior High School - STEM (2021-2023)",
            Stage::College => "B.S. Electronics Engineering (2023-Present)",
            Stage::Work => "Professional Experience",
        }
    }

    pub fn body(self) -> &'static str {
        match self {
            Stage::Elementary => {
                "Jose G. Peralta Memorial School.\n\n\
                 Achievement: Graduated Valedictorian."
            }
            Stage::JuniorHigh => {
                "Fellowship Baptist College.\n\n\
                 Achievement: Graduated With Honor."
            }
            Stage::SeniorHigh => {
                "Fellowship Baptist College.\n\n\
                 Achievement: Graduated With High Honor. Focus on Science, \
                 Technology, Engineering, and Mathematics."
            }
            Stage::College => {
                "Polytechnic University of the Philippines (PUP).\n\n\
                 Affiliations: OECES Special Project Officer, IECEP Batangas \
                 Student Chapter."
            }
            Stage::Work => {
                "Bandai Wireharness (2025): Developed automated macro systems \
                 to reduce production time.\n\n\
                 NOCECO (2023): Assisted supervisors in daily technical \
                 operations."
            }
        }
    }

    /// Banner text shown the first time this stage is cleared. Only stages
    /// whose clearing opens a path have one.
    pub fn unlock_note(self) -> Option<&'static str> {
        match self {
            Stage::Elementary => {
                Some("Achievement Unlocked: Valedictorian! Path to High School opened.")
            }
            Stage::JuniorHigh => Some("Junior High Completed! STEM path opened."),
            Stage::SeniorHigh => Some("Senior High Graduated! The road to PUP is open."),
            Stage::College | Stage::Work => None,
        }
    }
}

/// Outcome of recording a stage visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    First,
    Repeat,
}

/// Visited flag per stage. Each flag flips to true exactly once, on the
/// first successful overlap dispatch, and never resets.
#[derive(Resource, Default)]
pub struct Progress {
    visited: [bool; Stage::COUNT],
}

impl Progress {
    pub fn record(&mut self, stage: Stage) -> Visit {
        let slot = &mut self.visited[stage as usize];
        if *slot {
            Visit::Repeat
        } else {
            *slot = true;
            Visit::First
        }
    }

    pub fn visited(&self, stage: Stage) -> bool {
        self.visited[stage as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn record_reports_first_then_repeat() {
        let mut progress = Progress::default();
        assert_eq!(progress.record(Stage::Elementary), Visit::First);
        assert_eq!(progress.record(Stage::Elementary), Visit::Repeat);
        assert_eq!(progress.record(Stage::Elementary), Visit::Repeat);
        assert!(progress.visited(Stage::Elementary));
    }

    #[test]
    fn stages_are_tracked_independently() {
        let mut progress = Progress::default();
        progress.record(Stage::SeniorHigh);
        assert!(progress.visited(Stage::SeniorHigh));
        for stage in Stage::iter().filter(|stage| *stage != Stage::SeniorHigh) {
            assert!(!progress.visited(stage));
        }
    }

    #[test]
    fn successor_chain_follows_declaration_order() {
        let stages: Vec<Stage> = Stage::iter().collect();
        for pair in stages.windows(2) {
            assert_eq!(pair[0].next(), Some(pair[1]));
        }
        assert_eq!(Stage::Work.next(), None);
    }
}
