use crate::goals::GoalRegistry;
use crate::model::{Command, Goal};

/// Commands grouped under goals, in goal registration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandsByGoal {
    entries: Vec<(Goal, Vec<Command>)>,
}

impl CommandsByGoal {
    /// Goals in order, including those without commands
    pub fn goals(&self) -> impl Iterator<Item = &Goal> {
        self.entries.iter().map(|(goal, _)| goal)
    }

    /// Commands filed under `goal_id`, or `None` if the goal is not a key
    pub fn get(&self, goal_id: &str) -> Option<&[Command]> {
        self.entries
            .iter()
            .find(|(goal, _)| goal.id == goal_id)
            .map(|(_, commands)| commands.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Goal, &[Command])> {
        self.entries
            .iter()
            .map(|(goal, commands)| (goal, commands.as_slice()))
    }

    /// Number of goal keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn command_count(&self) -> usize {
        self.entries.iter().map(|(_, commands)| commands.len()).sum()
    }
}

/// Group `commands` by their resolved goal
///
/// Every registered goal becomes a key, even without commands. A command
/// with a blank or unregistered goal id is filed under the default goal.
/// Command order within a goal follows `commands`.
pub fn group_commands_by_goal(goals: &GoalRegistry, commands: &[Command]) -> CommandsByGoal {
    let mut entries: Vec<(Goal, Vec<Command>)> = goals
        .all_goals()
        .into_iter()
        .map(|goal| (goal, Vec::new()))
        .collect();

    for command in commands {
        let goal = match command.goal_id() {
            Some(goal_id) => goals.goal_by_id_or_default(goal_id),
            None => goals.default_goal().clone(),
        };
        match entries.iter_mut().find(|(g, _)| g.id == goal.id) {
            Some((_, bucket)) => bucket.push(command.clone()),
            // default goal registered outside the list
            None => entries.push((goal, vec![command.clone()])),
        }
    }

    CommandsByGoal { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(commands: Option<&[Command]>) -> Vec<&str> {
        commands
            .unwrap_or_default()
            .iter()
            .map(|c| c.name.as_str())
            .collect()
    }

    #[test]
    fn test_every_goal_is_a_key() {
        let grouping = group_commands_by_goal(&GoalRegistry::new(), &[]);
        let ids: Vec<&str> = grouping.goals().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["common", "test", "build", "run", "deploy"]);
        assert_eq!(grouping.command_count(), 0);
    }

    #[test]
    fn test_unresolved_goals_fall_back_to_default() {
        let goals = GoalRegistry::with_goals(
            Goal::new("common", "Common"),
            vec![Goal::new("a", "A"), Goal::new("b", "B")],
        )
        .unwrap();
        let commands = vec![
            Command::new("c1", "custom", "").with_goal("a"),
            Command::new("c2", "custom", "").with_goal("b"),
            Command::new("c3", "custom", ""),
            Command::new("c4", "custom", "").with_goal("nowhere"),
            Command::new("c5", "custom", "").with_goal("a"),
        ];

        let grouping = group_commands_by_goal(&goals, &commands);

        assert_eq!(grouping.len(), 3);
        assert_eq!(names(grouping.get("a")), vec!["c1", "c5"]);
        assert_eq!(names(grouping.get("b")), vec!["c2"]);
        assert_eq!(names(grouping.get("common")), vec!["c3", "c4"]);
        assert!(grouping.get("nowhere").is_none());
    }
}
