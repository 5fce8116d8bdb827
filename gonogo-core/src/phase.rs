/// Defines session phases and behavior
pub trait Phase: Copy + Clone + PartialEq + Send + Sync + std::fmt::Debug + Default {
    fn runs_trials(&self) -> bool;
    fn next(&self) -> Option<Self>;

    fn is_practice(&self) -> bool {
        false
    }
    fn is_experiment(&self) -> bool {
        false
    }
}

#[derive(Copy, Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    ParticipantEntry,
    Welcome,
    Instructions,
    Practice,
    PracticeEnd,
    Experiment,
    Debrief,
}

impl Phase for SessionPhase {
    fn runs_trials(&self) -> bool {
        matches!(self, Self::Practice | Self::Experiment)
    }

    fn next(&self) -> Option<Self> {
        use SessionPhase::*;
        Some(match self {
            ParticipantEntry => Welcome,
            Welcome => Instructions,
            Instructions => Practice,
            Practice => PracticeEnd,
            PracticeEnd => Experiment,
            Experiment => Debrief,
            Debrief => return None,
        })
    }

    fn is_practice(&self) -> bool {
        matches!(self, SessionPhase::Practice)
    }

    fn is_experiment(&self) -> bool {
        matches!(self, SessionPhase::Experiment)
    }
}
