//! Conversation engine.
//!
//! Turns one inbound message into one reply plus an effect on the session.
//! The engine is pure: it mutates only the session it is handed and never
//! touches storage. Persisting, deleting and finalizing are left to the
//! caller according to the returned [`StepEffect`].

use crate::domain::validation::{validate_transaction_count, ValidationContext};

use super::address::EditCommand;
use super::errors::IntakeError;
use super::field::{PersonalField, TransactionField};
use super::prompts;
use super::session::{IntakeSession, Progress};
use super::state::DialogueState;

/// Keywords recognised by the engine, compared case-insensitively against
/// the whole trimmed message.
#[derive(Debug, Clone)]
pub struct EngineKeywords {
    /// Answers "yes" at the money-loss and confirm questions.
    pub affirmative: Vec<String>,
    /// Answers "no" at the money-loss and confirm questions.
    pub negative: Vec<String>,
    /// Reset to `Start` and greet; checked before state dispatch.
    pub restart: Vec<String>,
    /// Abandon the session; checked before state dispatch.
    pub abandon: Vec<String>,
    /// Leave edit mode.
    pub finish_edit: Vec<String>,
    /// Re-render the summary in edit mode.
    pub show_summary: Vec<String>,
}

impl Default for EngineKeywords {
    fn default() -> Self {
        fn words(list: &[&str]) -> Vec<String> {
            list.iter().map(|w| w.to_string()).collect()
        }

        Self {
            affirmative: words(&["yes", "y", "1", "confirm"]),
            negative: words(&["no", "n", "2", "edit"]),
            restart: words(&["hi", "hello", "start", "restart"]),
            abandon: words(&["cancel", "stop", "exit", "quit"]),
            finish_edit: words(&["done"]),
            show_summary: words(&["summary"]),
        }
    }
}

fn matches_any(list: &[String], normalized: &str) -> bool {
    list.iter().any(|w| w == normalized)
}

/// What the caller must do with the session after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEffect {
    /// Store the mutated session.
    Persist,
    /// Delete the session; nothing is materialized.
    Discard,
    /// The user confirmed; materialize the draft.
    Finalize,
}

/// Result of feeding one message to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub reply: String,
    pub effect: StepEffect,
    /// Key of the field whose validator refused the message, if any.
    pub rejected_field: Option<&'static str>,
}

impl StepOutcome {
    fn persist(reply: String) -> Self {
        Self {
            reply,
            effect: StepEffect::Persist,
            rejected_field: None,
        }
    }

    fn discard(reply: String) -> Self {
        Self {
            reply,
            effect: StepEffect::Discard,
            rejected_field: None,
        }
    }

    fn rejected(reply: String, field: &'static str) -> Self {
        Self {
            reply,
            effect: StepEffect::Persist,
            rejected_field: Some(field),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConversationEngine {
    keywords: EngineKeywords,
}

impl ConversationEngine {
    pub fn new(keywords: EngineKeywords) -> Self {
        Self { keywords }
    }

    pub fn keywords(&self) -> &EngineKeywords {
        &self.keywords
    }

    /// Applies one inbound message to `session`.
    ///
    /// Validation failures are not errors: they come back as a reply with the
    /// session unchanged. An `Err` means the session reached a state the
    /// dialogue cannot continue from.
    pub fn step(
        &self,
        session: &mut IntakeSession,
        text: &str,
        ctx: &ValidationContext,
    ) -> Result<StepOutcome, IntakeError> {
        let normalized = text.trim().to_lowercase();

        if matches_any(&self.keywords.abandon, &normalized) {
            return Ok(StepOutcome::discard(prompts::abandoned()));
        }

        if session.state() == DialogueState::Done {
            return Ok(StepOutcome::discard(prompts::already_registered()));
        }

        if matches_any(&self.keywords.restart, &normalized) {
            session.restart();
            session.begin()?;
            return Ok(StepOutcome::persist(prompts::greeting()));
        }

        match session.state() {
            DialogueState::Start => {
                session.begin()?;
                Ok(StepOutcome::persist(prompts::greeting()))
            }
            DialogueState::AwaitingMoneyLossConfirmation => {
                if matches_any(&self.keywords.affirmative, &normalized) {
                    session.start_personal_info()?;
                    let prompt = PersonalField::Name.descriptor().prompt;
                    Ok(StepOutcome::persist(prompts::personal_intro(prompt)))
                } else if matches_any(&self.keywords.negative, &normalized) {
                    Ok(StepOutcome::discard(prompts::redirect()))
                } else {
                    Ok(StepOutcome::persist(prompts::money_loss_reprompt()))
                }
            }
            DialogueState::PersonalInfo | DialogueState::TransactionDetails => {
                self.collect(session, text, ctx)
            }
            DialogueState::AwaitingTransactionCount => {
                match validate_transaction_count(text, ctx) {
                    Ok(count) => {
                        let count: usize = count.parse().map_err(|_| {
                            IntakeError::InvalidTransition(format!(
                                "transaction count {} is not a number",
                                count
                            ))
                        })?;
                        session.set_transaction_count(count)?;
                        Ok(StepOutcome::persist(first_transaction_prompt(1)))
                    }
                    Err(rejection) => Ok(StepOutcome::rejected(
                        prompts::rejection(rejection.reason(), &prompts::transaction_count_prompt()),
                        "transaction_count",
                    )),
                }
            }
            DialogueState::Confirm => {
                if matches_any(&self.keywords.affirmative, &normalized) {
                    Ok(StepOutcome {
                        reply: prompts::generating(),
                        effect: StepEffect::Finalize,
                        rejected_field: None,
                    })
                } else if matches_any(&self.keywords.negative, &normalized) {
                    session.open_editor()?;
                    Ok(StepOutcome::persist(prompts::edit_instructions()))
                } else if EditCommand::looks_like(text) {
                    session.open_editor()?;
                    self.edit(session, text, ctx)
                } else {
                    Ok(StepOutcome::persist(prompts::confirm_reprompt()))
                }
            }
            DialogueState::Edit => {
                if matches_any(&self.keywords.finish_edit, &normalized) {
                    session.close_editor()?;
                    Ok(StepOutcome::persist(format!(
                        "{}\n{}",
                        prompts::summary(session.collected()),
                        prompts::updated_confirm_question()
                    )))
                } else if matches_any(&self.keywords.show_summary, &normalized) {
                    Ok(StepOutcome::persist(format!(
                        "{}\n{}",
                        prompts::summary(session.collected()),
                        prompts::edit_footer()
                    )))
                } else {
                    self.edit(session, text, ctx)
                }
            }
            DialogueState::Done => Ok(StepOutcome::discard(prompts::already_registered())),
        }
    }

    fn collect(
        &self,
        session: &mut IntakeSession,
        text: &str,
        ctx: &ValidationContext,
    ) -> Result<StepOutcome, IntakeError> {
        let expected = session.expected_field().ok_or_else(|| {
            IntakeError::InvalidTransition(format!(
                "no field is expected in state {}",
                session.state().as_str()
            ))
        })?;
        let descriptor = expected.descriptor();

        let value = match (descriptor.validator)(text, ctx) {
            Ok(value) => value,
            Err(rejection) => {
                return Ok(StepOutcome::rejected(
                    prompts::rejection(rejection.reason(), descriptor.prompt),
                    descriptor.key,
                ))
            }
        };

        let reply = match session.accept_value(value)? {
            Progress::NextField => session
                .expected_field()
                .map(|next| next.descriptor().prompt.to_string())
                .unwrap_or_default(),
            Progress::PersonalComplete => prompts::transaction_count_prompt(),
            Progress::NextTransaction { number } => first_transaction_prompt(number),
            Progress::TransactionsComplete => format!(
                "{}\n{}",
                prompts::summary(session.collected()),
                prompts::confirm_question()
            ),
        };
        Ok(StepOutcome::persist(reply))
    }

    fn edit(
        &self,
        session: &mut IntakeSession,
        text: &str,
        ctx: &ValidationContext,
    ) -> Result<StepOutcome, IntakeError> {
        let command = match EditCommand::parse(text) {
            Ok(command) => command,
            Err(IntakeError::MalformedEditCommand(_)) => {
                return Ok(StepOutcome::persist(prompts::malformed_edit()))
            }
            Err(err) => return Ok(StepOutcome::persist(prompts::edit_error(&err.to_string()))),
        };

        if let Err(err) = command.address.resolve(session.collected()) {
            return Ok(StepOutcome::persist(prompts::edit_error(&err.to_string())));
        }

        let descriptor = command.address.descriptor();
        let value = match (descriptor.validator)(&command.value, ctx) {
            Ok(value) => value,
            Err(rejection) => {
                return Ok(StepOutcome::rejected(
                    prompts::edit_error(&IntakeError::from(rejection).to_string()),
                    descriptor.key,
                ))
            }
        };

        session.overwrite(&command.address, value.clone())?;
        Ok(StepOutcome::persist(prompts::field_updated(
            &command.address,
            &value,
        )))
    }
}

fn first_transaction_prompt(number: usize) -> String {
    prompts::transaction_header(number, TransactionField::Date.descriptor().prompt)
}
