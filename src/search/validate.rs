use crate::search::Problem;
use crate::ValidationError;

/// Replays `actions` from the initial state and checks that every action is
/// applicable where it is taken and that the final state is a goal.
pub fn validate<P: Problem>(problem: &P, actions: &[P::Action]) -> Result<(), ValidationError> {
    let mut current = problem.initial_state().clone();
    for (step, action) in actions.iter().enumerate() {
        current = problem
            .result(&current, action)
            .ok_or_else(|| ValidationError::NotApplicable {
                step,
                action: action.to_string(),
                state: format!("{:?}", current),
            })?;
    }

    if !problem.is_goal(&current) {
        return Err(ValidationError::GoalNotReached {
            state: format!("{:?}", current),
        });
    }

    Ok(())
}
