//! InboundMessageHandler - Drives one inbound message through the intake dialogue.
//!
//! For each message:
//! 1. Serialize on the sender's identity
//! 2. Load the active session, or start a fresh one
//! 3. Run one engine step
//! 4. Persist, delete or finalize the session as the step requires
//!
//! Only session persistence failures surface as errors. Everything else,
//! including a failed complaint registration, becomes reply text.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::domain::complaint::Complaint;
use crate::domain::foundation::{ComplaintId, Identity, Timestamp, ValidationError};
use crate::domain::intake::{
    prompts, ConversationEngine, DialogueState, IntakeError, IntakeSession, StepEffect,
    StepOutcome,
};
use crate::domain::validation::ValidationContext;
use crate::ports::{ComplaintMaterializer, DocumentDelivery, SessionStoreError};

use super::session_registry::{SessionOrigin, SessionRegistry};

const REPLY_SEPARATOR: &str = "\n\n";

/// One message received from the channel.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Channel-specific sender address; becomes the session identity.
    pub sender: String,
    pub text: String,
    pub received_at: Timestamp,
}

/// The reply to send back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundReply {
    pub identity: Identity,
    pub reply: String,
    /// State of the stored session after the step; `None` once deleted.
    pub state: Option<DialogueState>,
    /// Set on the message that registered a complaint.
    pub complaint_id: Option<ComplaintId>,
}

#[derive(Debug, Error)]
pub enum IntakeHandlerError {
    #[error("Invalid sender: {0}")]
    InvalidSender(#[from] ValidationError),

    #[error("Session storage failed: {0}")]
    Storage(#[from] SessionStoreError),
}

/// Handler for inbound channel messages.
pub struct InboundMessageHandler {
    registry: Arc<SessionRegistry>,
    engine: ConversationEngine,
    materializer: Arc<dyn ComplaintMaterializer>,
    delivery: Arc<dyn DocumentDelivery>,
}

impl InboundMessageHandler {
    pub fn new(
        registry: Arc<SessionRegistry>,
        engine: ConversationEngine,
        materializer: Arc<dyn ComplaintMaterializer>,
        delivery: Arc<dyn DocumentDelivery>,
    ) -> Self {
        Self {
            registry,
            engine,
            materializer,
            delivery,
        }
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    pub async fn handle(&self, msg: InboundMessage) -> Result<InboundReply, IntakeHandlerError> {
        let identity = Identity::new(msg.sender)?;
        let now = msg.received_at;

        let _guard = self.registry.locks().acquire(&identity).await;

        let (mut session, origin) = self
            .registry
            .get_or_create(&identity, now)
            .await
            .map_err(|e| log_store_failure(&identity, "load", e))?;

        let mut parts = Vec::new();
        match origin {
            SessionOrigin::Created => info!(identity = %identity, "Intake session started"),
            SessionOrigin::Expired => {
                info!(identity = %identity, "Intake session expired, starting over");
                parts.push(prompts::session_timed_out());
            }
            SessionOrigin::Discarded => {
                warn!(identity = %identity, "Unreadable intake session discarded, starting over");
                parts.push(prompts::session_unreadable());
            }
            SessionOrigin::Resumed => {}
        }

        session.touch(now);
        let ctx = ValidationContext::at(now);
        let outcome = self
            .engine
            .step(&mut session, &msg.text, &ctx)
            .unwrap_or_else(|err| {
                warn!(
                    identity = %identity,
                    state = session.state().as_str(),
                    code = %err.code(),
                    error = %err,
                    "Intake step failed, discarding session"
                );
                StepOutcome {
                    reply: prompts::something_went_wrong(),
                    effect: StepEffect::Discard,
                    rejected_field: None,
                }
            });

        if let Some(field) = outcome.rejected_field {
            debug!(identity = %identity, field, "Input rejected");
        }

        let mut complaint_id = None;
        let state = match outcome.effect {
            StepEffect::Persist => {
                self.registry
                    .save(&session)
                    .await
                    .map_err(|e| log_store_failure(&identity, "save", e))?;
                debug!(identity = %identity, state = session.state().as_str(), "Session saved");
                parts.push(outcome.reply);
                Some(session.state())
            }
            StepEffect::Discard => {
                self.registry
                    .delete(&identity)
                    .await
                    .map_err(|e| log_store_failure(&identity, "delete", e))?;
                parts.push(outcome.reply);
                None
            }
            StepEffect::Finalize => {
                parts.push(outcome.reply);
                let finalized = self.finalize(&mut session, now).await?;
                parts.push(finalized.reply);
                complaint_id = finalized.complaint_id;
                finalized.state
            }
        };

        Ok(InboundReply {
            identity,
            reply: parts.join(REPLY_SEPARATOR),
            state,
            complaint_id,
        })
    }

    /// Registers the complaint, delivers its document and closes the session.
    async fn finalize(
        &self,
        session: &mut IntakeSession,
        now: Timestamp,
    ) -> Result<Finalized, IntakeHandlerError> {
        let identity = session.identity().clone();

        let complaint = match Complaint::from_draft(identity.clone(), session.collected(), now) {
            Ok(complaint) => complaint,
            Err(err) => return self.keep_for_retry(session, err).await,
        };

        let id = match self.materializer.materialize(&complaint).await {
            Ok(id) => id,
            Err(e) => {
                let err = IntakeError::MaterializeFailed(e.to_string());
                return self.keep_for_retry(session, err).await;
            }
        };

        if let Err(err) = session.complete(id) {
            warn!(identity = %identity, complaint_id = %id, error = %err, "Could not mark session done");
        }
        info!(
            identity = %identity,
            complaint_id = %id,
            transactions = complaint.transaction_count(),
            "Complaint registered"
        );

        let reply = match self.delivery.deliver(id, &complaint).await {
            Ok(()) => {
                info!(complaint_id = %id, "Complaint document delivered");
                prompts::success(&id)
            }
            Err(e) => {
                warn!(complaint_id = %id, error = %e, "Complaint document delivery failed");
                prompts::delivery_fallback(&id)
            }
        };

        let state = match self.registry.delete(&identity).await {
            Ok(()) => None,
            Err(e) => {
                error!(identity = %identity, error = %e, "Failed to delete finalized session");
                // A stored Done session answers "already registered" and never
                // materializes again.
                match self.registry.save(session).await {
                    Ok(()) => Some(session.state()),
                    Err(e) => {
                        error!(identity = %identity, error = %e, "Failed to store finalized session");
                        None
                    }
                }
            }
        };

        Ok(Finalized {
            reply,
            state,
            complaint_id: Some(id),
        })
    }

    /// Leaves the session in `Confirm` with its data so the user can retry.
    async fn keep_for_retry(
        &self,
        session: &IntakeSession,
        err: IntakeError,
    ) -> Result<Finalized, IntakeHandlerError> {
        warn!(
            identity = %session.identity(),
            code = %err.code(),
            error = %err,
            "Complaint not registered"
        );
        self.registry
            .save(session)
            .await
            .map_err(|e| log_store_failure(session.identity(), "save", e))?;

        Ok(Finalized {
            reply: prompts::materialize_failed(),
            state: Some(session.state()),
            complaint_id: None,
        })
    }
}

struct Finalized {
    reply: String,
    state: Option<DialogueState>,
    complaint_id: Option<ComplaintId>,
}

fn log_store_failure(
    identity: &Identity,
    operation: &'static str,
    err: SessionStoreError,
) -> IntakeHandlerError {
    error!(identity = %identity, operation, error = %err, "Session store failure");
    IntakeHandlerError::Storage(err)
}
