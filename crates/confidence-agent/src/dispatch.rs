//! Role dispatch table
//!
//! Maps every delegation role to the handler that performs it. The controller
//! only names roles; this table is where a role becomes an action.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use coordination::{AgentAction, AgentDecision, DelegateTarget, DelegationContext, Role};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// One delegation handed to a handler
#[derive(Debug, Clone, Serialize)]
pub struct DelegationRequest<'a> {
    pub agent: &'a str,
    pub query: &'a str,
    pub target: &'a DelegateTarget,
    pub context: Option<&'a DelegationContext>,
}

/// What a handler reported back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlerReport {
    pub role: Role,
    pub accepted: bool,
    pub note: String,
}

#[async_trait]
pub trait RoleHandler: Send + Sync {
    async fn handle(&self, request: &DelegationRequest<'_>) -> Result<HandlerReport>;
}

/// Default handler: logs the delegation and accepts it.
pub struct TracingHandler;

#[async_trait]
impl RoleHandler for TracingHandler {
    async fn handle(&self, request: &DelegationRequest<'_>) -> Result<HandlerReport> {
        let role = request.target.role;
        info!(
            agent = request.agent,
            role = %role,
            approach = ?role.approach(),
            previous_confidence = ?request.context.map(|c| c.previous_confidence),
            "Delegation received"
        );
        Ok(HandlerReport {
            role,
            accepted: true,
            note: format!("{}: {}", role.name(), role.description()),
        })
    }
}

pub struct HandlerTable {
    handlers: HashMap<Role, Box<dyn RoleHandler>>,
}

impl Default for HandlerTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl HandlerTable {
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Every role mapped to [`TracingHandler`].
    pub fn with_defaults() -> Self {
        let mut table = Self::empty();
        for role in Role::ALL {
            table.register(role, Box::new(TracingHandler));
        }
        table
    }

    /// Install `handler` for `role`, replacing any previous one.
    pub fn register(&mut self, role: Role, handler: Box<dyn RoleHandler>) {
        self.handlers.insert(role, handler);
    }

    pub fn handles(&self, role: Role) -> bool {
        self.handlers.contains_key(&role)
    }

    /// Invoke the handler of every delegation target in `decision`.
    ///
    /// Handler failures and unmapped roles are reported, not propagated.
    pub async fn dispatch(
        &self,
        agent: &str,
        query: &str,
        decision: &AgentDecision,
    ) -> Vec<HandlerReport> {
        let (targets, context) = match &decision.action {
            AgentAction::Delegate { targets, context } => (targets, context.as_ref()),
            AgentAction::Answer { .. } => return Vec::new(),
        };

        let mut reports = Vec::with_capacity(targets.len());
        for target in targets {
            let Some(handler) = self.handlers.get(&target.role) else {
                warn!(role = %target.role, "No handler registered");
                reports.push(HandlerReport {
                    role: target.role,
                    accepted: false,
                    note: "no handler registered".to_string(),
                });
                continue;
            };

            let request = DelegationRequest {
                agent,
                query,
                target,
                context,
            };
            match handler.handle(&request).await {
                Ok(report) => reports.push(report),
                Err(e) => {
                    warn!(role = %target.role, "Handler failed: {e}");
                    reports.push(HandlerReport {
                        role: target.role,
                        accepted: false,
                        note: e.to_string(),
                    });
                }
            }
        }
        reports
    }
}
