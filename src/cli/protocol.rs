//! Submit/Cancel Protocol Module
//!
//! Decides what a committed line (Enter), an Escape in navigation mode, or
//! a hard interrupt does to the session: arm a confirmation, finish with
//! the table's records, or finish cancelled.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::cursor::TableState;
use super::formatter::CellFormatter;
use super::navigation::commit_edit;
use super::table::Record;

/// How many accepted Enter presses it takes to submit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmPolicy {
    /// First accepted Enter submits
    Single,
    /// First accepted Enter shows the confirm message, the next one submits
    #[default]
    Double,
}

/// Final result of a prompt session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Submitted(Vec<Record>),
    Cancelled,
}

impl Outcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Outcome::Submitted(_))
    }

    pub fn records(&self) -> Option<&[Record]> {
        match self {
            Outcome::Submitted(records) => Some(records),
            Outcome::Cancelled => None,
        }
    }

    /// Answer shape handed back to the caller: `{state, result?}`
    pub fn to_answer(&self) -> Answer {
        match self {
            Outcome::Submitted(records) => Answer {
                state: true,
                result: Some(records.clone()),
            },
            Outcome::Cancelled => Answer {
                state: false,
                result: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub state: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Vec<Record>>,
}

/// Transient message shown below the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    EscapeWarning,
    Confirm { reason: Option<String> },
}

/// What the session should do after handling one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Render(Option<Notice>),
    Finish(Outcome),
}

impl Transition {
    pub fn render() -> Self {
        Transition::Render(None)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Transition::Finish(_))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SubmitProtocol {
    policy: ConfirmPolicy,
    formatter: CellFormatter,
}

impl SubmitProtocol {
    pub fn new(policy: ConfirmPolicy, formatter: CellFormatter) -> Self {
        Self { policy, formatter }
    }

    pub fn policy(&self) -> ConfirmPolicy {
        self.policy
    }

    /// Records as a line event would leave them: an edit in progress is
    /// committed and coerced first. This is what the validator must see.
    pub fn records_on_line(&self, state: &TableState) -> Vec<Record> {
        if !state.is_editing() {
            return state.table().records();
        }
        let mut committed = state.clone();
        commit_edit(&mut committed, &self.formatter);
        committed.table().records()
    }

    /// Handle a committed line given the validator's verdict on
    /// [`records_on_line`](Self::records_on_line).
    pub fn on_line(&self, state: &mut TableState, verdict: Result<(), String>) -> Transition {
        state.confirm.escape_armed = false;

        match verdict {
            Ok(()) => {
                if state.is_editing() {
                    commit_edit(state, &self.formatter);
                }
                match self.policy {
                    ConfirmPolicy::Single => submit(state),
                    ConfirmPolicy::Double => arm_or_submit(state, None),
                }
            }
            Err(reason) => {
                debug!(reason = %reason, "validation rejected table");
                if state.is_editing() {
                    commit_edit(state, &self.formatter);
                    state.confirm.enter_armed = false;
                    Transition::render()
                } else {
                    let reason = Some(reason).filter(|r| !r.trim().is_empty());
                    arm_or_submit(state, reason)
                }
            }
        }
    }
}

fn arm_or_submit(state: &mut TableState, reason: Option<String>) -> Transition {
    if state.confirm.enter_armed {
        submit(state)
    } else {
        state.confirm.enter_armed = true;
        Transition::Render(Some(Notice::Confirm { reason }))
    }
}

fn submit(state: &mut TableState) -> Transition {
    state.confirm.disarm();
    let records = state.table().records();
    info!(rows = records.len(), "table submitted");
    Transition::Finish(Outcome::Submitted(records))
}

/// Escape while navigating: warn first, cancel on the second press
pub fn escape_pressed(state: &mut TableState) -> Transition {
    if state.confirm.escape_armed {
        state.confirm.disarm();
        info!("table prompt cancelled");
        Transition::Finish(Outcome::Cancelled)
    } else {
        state.confirm.escape_armed = true;
        Transition::Render(Some(Notice::EscapeWarning))
    }
}

/// Hard abort: drop any in-progress edit and cancel immediately
pub fn interrupt(state: &mut TableState) -> Transition {
    if state.is_editing() {
        state.exit_edit(false);
    }
    state.confirm.disarm();
    info!("table prompt interrupted");
    Transition::Finish(Outcome::Cancelled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::table::{Column, EditKind, Table};

    fn state() -> TableState {
        let columns = vec![
            Column::new("Id", "id", EditKind::None),
            Column::new("Qty", "qty", EditKind::Integer),
        ];
        let rows = vec![
            vec!["1".to_string(), "5".to_string()],
            vec!["2".to_string(), "7".to_string()],
        ];
        TableState::new(Table::new(columns, rows).unwrap(), 1)
    }

    fn protocol(policy: ConfirmPolicy) -> SubmitProtocol {
        SubmitProtocol::new(policy, CellFormatter::default())
    }

    #[test]
    fn test_single_confirm_submits_on_first_accept() {
        let mut state = state();
        let transition = protocol(ConfirmPolicy::Single).on_line(&mut state, Ok(()));
        match transition {
            Transition::Finish(Outcome::Submitted(records)) => {
                assert_eq!(records.len(), 2);
                assert_eq!(records[1]["qty"], "7");
            }
            other => panic!("expected submit, got {:?}", other),
        }
    }

    #[test]
    fn test_double_confirm_needs_two_lines() {
        let mut state = state();
        let protocol = protocol(ConfirmPolicy::Double);

        let first = protocol.on_line(&mut state, Ok(()));
        assert_eq!(first, Transition::Render(Some(Notice::Confirm { reason: None })));
        assert!(state.confirm.enter_armed);

        let second = protocol.on_line(&mut state, Ok(()));
        assert!(second.is_finished());
    }

    #[test]
    fn test_rejection_arms_then_forces_submit() {
        let mut state = state();
        let protocol = protocol(ConfirmPolicy::Single);

        let first = protocol.on_line(&mut state, Err("totals do not match".to_string()));
        assert_eq!(
            first,
            Transition::Render(Some(Notice::Confirm {
                reason: Some("totals do not match".to_string())
            }))
        );

        let second = protocol.on_line(&mut state, Err(String::new()));
        assert!(matches!(second, Transition::Finish(Outcome::Submitted(_))));
    }

    #[test]
    fn test_rejection_while_editing_commits_edit_only() {
        let mut state = state();
        state.enter_edit_if_editable();
        state.set_current_value("".to_string());
        state.clear_first_keystroke();

        let transition = protocol(ConfirmPolicy::Double).on_line(&mut state, Err(String::new()));
        assert_eq!(transition, Transition::render());
        assert!(!state.is_editing());
        assert!(!state.confirm.enter_armed);
        assert_eq!(state.current_value(), Some("0"));
    }

    #[test]
    fn test_escape_two_step() {
        let mut state = state();
        assert_eq!(
            escape_pressed(&mut state),
            Transition::Render(Some(Notice::EscapeWarning))
        );
        assert_eq!(
            escape_pressed(&mut state),
            Transition::Finish(Outcome::Cancelled)
        );
    }

    #[test]
    fn test_line_disarms_escape() {
        let mut state = state();
        escape_pressed(&mut state);
        protocol(ConfirmPolicy::Double).on_line(&mut state, Ok(()));
        assert!(!state.confirm.escape_armed);
    }

    #[test]
    fn test_interrupt_reverts_edit_and_cancels() {
        let mut state = state();
        state.enter_edit_if_editable();
        state.set_current_value("99".to_string());
        assert_eq!(interrupt(&mut state), Transition::Finish(Outcome::Cancelled));
        assert_eq!(state.current_value(), Some("5"));
    }

    #[test]
    fn test_answer_shape() {
        let cancelled = serde_json::to_value(Outcome::Cancelled.to_answer()).unwrap();
        assert_eq!(cancelled, serde_json::json!({ "state": false }));

        let mut record = Record::new();
        record.insert("id".to_string(), "1".to_string());
        let submitted = serde_json::to_value(Outcome::Submitted(vec![record]).to_answer()).unwrap();
        assert_eq!(
            submitted,
            serde_json::json!({ "state": true, "result": [{ "id": "1" }] })
        );
    }
}
