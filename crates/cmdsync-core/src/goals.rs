//! Goal registry
//!
//! Holds the predefined goals plus any registered at runtime and resolves
//! goal ids, falling back to the default goal.

use parking_lot::RwLock;

use crate::errors::{CommandError, Result};
use crate::model::Goal;

pub const COMMON_GOAL_ID: &str = "common";
pub const TEST_GOAL_ID: &str = "test";
pub const BUILD_GOAL_ID: &str = "build";
pub const RUN_GOAL_ID: &str = "run";
pub const DEPLOY_GOAL_ID: &str = "deploy";

/// The predefined goals in registration order; the first one is the default
pub fn predefined_goals() -> Vec<Goal> {
    vec![
        Goal::new(COMMON_GOAL_ID, "Common"),
        Goal::new(TEST_GOAL_ID, "Test"),
        Goal::new(BUILD_GOAL_ID, "Build"),
        Goal::new(RUN_GOAL_ID, "Run"),
        Goal::new(DEPLOY_GOAL_ID, "Deploy"),
    ]
}

/// Registry of command goals
///
/// Insertion-ordered. Reads never mutate; only `register` does.
#[derive(Debug)]
pub struct GoalRegistry {
    goals: RwLock<Vec<Goal>>,
    default_goal: Goal,
}

impl GoalRegistry {
    /// Registry seeded with the predefined goals, "Common" being the default
    pub fn new() -> Self {
        let goals = predefined_goals();
        let default_goal = goals[0].clone();
        Self {
            goals: RwLock::new(goals),
            default_goal,
        }
    }

    /// Registry seeded with the given goals and default goal
    ///
    /// The default goal is registered first unless `goals` already holds it.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateGoal` if two seeded goals share an id.
    pub fn with_goals(default_goal: Goal, goals: impl IntoIterator<Item = Goal>) -> Result<Self> {
        let registry = Self {
            goals: RwLock::new(Vec::new()),
            default_goal: default_goal.clone(),
        };
        let goals: Vec<Goal> = goals.into_iter().collect();
        if !goals.iter().any(|g| g.id == default_goal.id) {
            registry.register(default_goal)?;
        }
        for goal in goals {
            registry.register(goal)?;
        }
        Ok(registry)
    }

    /// All goals, in registration order
    pub fn all_goals(&self) -> Vec<Goal> {
        self.goals.read().clone()
    }

    /// Goal registered under `id`, if any
    pub fn goal_by_id(&self, id: &str) -> Option<Goal> {
        self.goals.read().iter().find(|g| g.id == id).cloned()
    }

    /// Goal registered under `id`, else the default goal
    pub fn goal_by_id_or_default(&self, id: &str) -> Goal {
        self.goal_by_id(id)
            .unwrap_or_else(|| self.default_goal.clone())
    }

    /// The goal for commands that name no goal
    pub fn default_goal(&self) -> &Goal {
        &self.default_goal
    }

    /// Register an additional goal
    ///
    /// # Errors
    ///
    /// Returns `DuplicateGoal` if a goal with the same id is registered.
    pub fn register(&self, goal: Goal) -> Result<()> {
        let mut goals = self.goals.write();
        if goals.iter().any(|g| g.id == goal.id) {
            return Err(CommandError::DuplicateGoal { goal_id: goal.id });
        }
        tracing::debug!(goal_id = %goal.id, "registered command goal");
        goals.push(goal);
        Ok(())
    }
}

impl Default for GoalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predefined_goals_in_order() {
        let registry = GoalRegistry::new();
        let ids: Vec<String> = registry.all_goals().into_iter().map(|g| g.id).collect();
        assert_eq!(ids, vec!["common", "test", "build", "run", "deploy"]);
        assert_eq!(registry.default_goal().id, COMMON_GOAL_ID);
    }

    #[test]
    fn test_with_goals_prepends_missing_default() {
        let registry = GoalRegistry::with_goals(
            Goal::new("misc", "Misc"),
            vec![Goal::new("a", "A"), Goal::new("b", "B")],
        )
        .unwrap();

        let ids: Vec<String> = registry.all_goals().into_iter().map(|g| g.id).collect();
        assert_eq!(ids, vec!["misc", "a", "b"]);
    }

    #[test]
    fn test_with_goals_rejects_duplicates() {
        let result = GoalRegistry::with_goals(
            Goal::new("a", "A"),
            vec![Goal::new("b", "B"), Goal::new("b", "Bee")],
        );
        assert!(matches!(result, Err(CommandError::DuplicateGoal { .. })));
    }
}
