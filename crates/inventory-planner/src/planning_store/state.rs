use crate::model::ProductionSuggestion;
use store_framework::TrackedState;

/// What the planning store currently holds.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanningPhase {
    NeverComputed,
    Computing,
    Computed(ProductionSuggestion),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanningState {
    pub report: Option<ProductionSuggestion>,
    pub loading: bool,
    pub error: Option<String>,
}

impl TrackedState for PlanningState {
    type Lane = ();

    fn loading_mut(&mut self, _lane: ()) -> &mut bool {
        &mut self.loading
    }

    fn error_mut(&mut self) -> &mut Option<String> {
        &mut self.error
    }

    fn size(&self) -> usize {
        self.report.as_ref().map_or(0, |r| r.suggestions.len())
    }
}

impl PlanningState {
    pub fn phase(&self) -> PlanningPhase {
        match (&self.report, self.loading) {
            (_, true) => PlanningPhase::Computing,
            (Some(report), false) => PlanningPhase::Computed(report.clone()),
            (None, false) => PlanningPhase::NeverComputed,
        }
    }

    /// The service's totals are kept exactly as reported.
    pub fn replace_report(&mut self, report: ProductionSuggestion) {
        self.report = Some(report);
    }
}
