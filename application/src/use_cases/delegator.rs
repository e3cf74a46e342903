//! Delegator: routes tasks and handoffs between named agents.
//!
//! The delegator holds no state of its own beyond the roster it routes into.
//! Unknown agent names produce an error result, never a panic or `Err`.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use squadron_domain::{AgentStatus, DelegationContext, ToolResult};
use tracing::{info, warn};

use crate::use_cases::agent_node::AgentNode;

/// Live agents by name; lookup ignores case.
#[derive(Default)]
pub struct AgentRoster {
    agents: Vec<Arc<AgentNode>>,
    /// Lowercased name -> index into `agents`
    index: HashMap<String, usize>,
}

impl AgentRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an agent, replacing any agent with the same (case-insensitive) name.
    pub fn insert(&mut self, node: Arc<AgentNode>) -> Option<Arc<AgentNode>> {
        let key = node.name().to_lowercase();
        match self.index.get(&key) {
            Some(&slot) => Some(std::mem::replace(&mut self.agents[slot], node)),
            None => {
                self.index.insert(key, self.agents.len());
                self.agents.push(node);
                None
            }
        }
    }

    pub fn with_agent(mut self, node: AgentNode) -> Self {
        self.insert(Arc::new(node));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<AgentNode>> {
        self.index
            .get(&name.to_lowercase())
            .map(|&slot| &self.agents[slot])
    }

    /// Agent names in insertion order
    pub fn names(&self) -> Vec<&str> {
        self.agents.iter().map(|a| a.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<AgentNode>> {
        self.agents.iter()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

/// One independent task for [`Delegator::assign_many`].
#[derive(Debug, Clone)]
pub struct Assignment {
    pub agent: String,
    pub task: String,
    pub context: Option<DelegationContext>,
}

impl Assignment {
    pub fn new(agent: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            task: task.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: DelegationContext) -> Self {
        self.context = Some(context);
        self
    }
}

pub struct Delegator {
    roster: Arc<AgentRoster>,
}

impl Delegator {
    pub fn new(roster: Arc<AgentRoster>) -> Self {
        Self { roster }
    }

    pub fn roster(&self) -> &AgentRoster {
        &self.roster
    }

    /// Hand `task` to `agent_name`.
    pub async fn assign_task(
        &self,
        agent_name: &str,
        task: &str,
        context: Option<DelegationContext>,
    ) -> ToolResult {
        let Some(agent) = self.roster.get(agent_name) else {
            warn!(agent = %agent_name, "Unknown agent");
            return ToolResult::text(format!(
                "Error: Agent '{}' not found. Available agents: {}",
                agent_name,
                self.roster.names().join(", ")
            ));
        };
        agent.process_task(task, context).await
    }

    /// Pass `task` from one agent to another, recording who sent it.
    pub async fn handoff_task(
        &self,
        from_agent: &str,
        to_agent: &str,
        task: &str,
        notes: Option<&str>,
    ) -> ToolResult {
        info!("Handoff: {} -> {}", from_agent, to_agent);
        let mut context = DelegationContext::new().delegated_by(from_agent);
        if let Some(notes) = notes {
            context = context.notes(notes);
        }
        self.assign_task(to_agent, task, Some(context)).await
    }

    /// Run independent assignments concurrently; results keep input order.
    pub async fn assign_many(&self, assignments: Vec<Assignment>) -> Vec<ToolResult> {
        join_all(assignments.into_iter().map(|a| async move {
            self.assign_task(&a.agent, &a.task, a.context).await
        }))
        .await
    }

    /// Status of every agent, in roster order.
    pub fn statuses(&self) -> Vec<AgentStatus> {
        self.roster.iter().map(|a| a.get_status()).collect()
    }
}
