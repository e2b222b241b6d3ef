use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub is_admin: bool,
}

impl Agent {
    pub fn new(name: String, is_admin: bool) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            is_admin,
        }
    }
}

/// A ticket category together with the agents eligible to work it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Eligible agent ids in roster enumeration order.
    pub agent_ids: Vec<String>,
    /// Agent to fall back on when the roster is empty.
    pub fallback_admin_id: Option<String>,
}

impl Category {
    pub fn new(name: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            agent_ids: Vec::new(),
            fallback_admin_id: None,
        }
    }
}
