use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Task,
    Break,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Task => "task",
            Stage::Break => "break",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Stage::Task => Stage::Break,
            Stage::Break => Stage::Task,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_alternate() {
        assert_eq!(Stage::Task.next(), Stage::Break);
        assert_eq!(Stage::Break.next(), Stage::Task);
    }

    #[test]
    fn default_stage_is_task() {
        assert_eq!(Stage::default(), Stage::Task);
    }
}
