use super::traits::{Assignment, ParameterCheck};

/// Rejects penalty/loss/dual combinations a linear support vector classifier cannot fit:
/// `l1` with `hinge` loss, `l2` with `hinge` in the primal, and `l1` with `squared_hinge` in the dual.
pub struct LinearSvcCheck;

impl ParameterCheck for LinearSvcCheck {
    fn name(&self) -> &str {
        "linear_svc"
    }

    fn check(&self, assignment: &Assignment<'_>) -> bool {
        let penalty = assignment.str("penalty");
        let loss = assignment.str("loss");
        let dual = assignment.bool("dual");

        match (penalty, loss, dual) {
            (Some("l1"), Some("hinge"), _) => false,
            (Some("l2"), Some("hinge"), Some(false)) => false,
            (Some("l1"), Some("squared_hinge"), Some(true)) => false,
            _ => true,
        }
    }
}
