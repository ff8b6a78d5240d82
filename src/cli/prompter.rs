//! Table Prompt Session
//!
//! Ties the pieces together: input events go to the navigation controller
//! or the submit/cancel protocol, and every resulting transition is
//! rendered through the host. The host is injected, so a session can run
//! against a real terminal or against a recorder in tests.

use std::io;

use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};

use super::config::TableConfig;
use super::cursor::TableState;
use super::keys::InputEvent;
use super::navigation::Navigator;
use super::protocol::{interrupt, Notice, Outcome, SubmitProtocol, Transition};
use super::renderer::{Frame, InfoVisibility, Renderer};
use super::table::Record;
use super::terminal::{spawn_input_reader, TerminalHost};
use crate::error::{Result, TableError};

/// Capabilities the session needs from its host
pub trait PromptHost {
    /// Replace the prompt's screen area with `content` and `bottom`
    fn render(&mut self, content: &str, bottom: &str) -> io::Result<()>;

    /// Called exactly once when the session ends
    fn done(&mut self, outcome: &Outcome) -> io::Result<()>;
}

/// Validation predicate over the in-progress records
pub type Validator = Box<dyn Fn(&[Record]) -> std::result::Result<(), String>>;

/// One interactive table editing session
pub struct TablePrompt {
    state: TableState,
    navigator: Navigator,
    protocol: SubmitProtocol,
    renderer: Renderer,
    validator: Validator,
    info: InfoVisibility,
    hide_info_on_key: bool,
    hide_info_keys_on_key: bool,
    notice: Option<Notice>,
}

impl TablePrompt {
    /// Build a session from a configuration, accepting every submission
    pub fn new(config: TableConfig) -> Result<Self> {
        config.validate()?;

        let formatter = config.formatter();
        let table = config.build_table()?;

        Ok(Self {
            state: TableState::new(table, config.freeze_columns),
            navigator: Navigator::new(formatter, config.edit_key()?),
            protocol: SubmitProtocol::new(config.confirm_policy, formatter),
            renderer: Renderer::from_config(&config),
            validator: Box::new(|_| Ok(())),
            info: InfoVisibility::default(),
            hide_info_on_key: config.hide_info_when_key_pressed,
            hide_info_keys_on_key: config.hide_info_keys_when_key_pressed,
            notice: None,
        })
    }

    /// Install the predicate consulted on every committed line
    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&[Record]) -> std::result::Result<(), String> + 'static,
    {
        self.validator = Box::new(validator);
        self
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Apply one input event without touching any terminal
    pub fn handle_event(&mut self, event: InputEvent) -> Transition {
        let transition = match event {
            InputEvent::Key(key) => {
                if self.hide_info_on_key {
                    self.info.message = false;
                }
                if self.hide_info_keys_on_key {
                    self.info.keys = false;
                }
                self.navigator.handle_key(&mut self.state, key)
            }
            InputEvent::Line => {
                let records = self.protocol.records_on_line(&self.state);
                let verdict = (self.validator)(&records);
                if let Err(reason) = &verdict {
                    warn!(reason = %reason, "submission rejected by validator");
                }
                self.protocol.on_line(&mut self.state, verdict)
            }
            InputEvent::Interrupt => interrupt(&mut self.state),
        };

        self.notice = match &transition {
            Transition::Render(notice) => notice.clone(),
            Transition::Finish(_) => None,
        };
        transition
    }

    /// Render the current state, including any pending notice
    pub fn frame(&self) -> Frame {
        self.renderer
            .render(&self.state, self.info, self.notice.as_ref())
    }

    fn draw<H: PromptHost>(&self, host: &mut H) -> Result<()> {
        let frame = self.frame();
        host.render(&frame.content, &frame.bottom)?;
        Ok(())
    }

    /// Drive the session until it finishes or the input stream closes
    pub async fn run<H: PromptHost>(
        mut self,
        host: &mut H,
        events: &mut UnboundedReceiver<InputEvent>,
    ) -> Result<Outcome> {
        info!(
            rows = self.state.table().row_count(),
            columns = self.state.table().column_count(),
            policy = ?self.protocol.policy(),
            "table prompt started"
        );
        self.draw(host)?;

        while let Some(event) = events.recv().await {
            match self.handle_event(event) {
                Transition::Render(_) => self.draw(host)?,
                Transition::Finish(outcome) => {
                    self.draw(host)?;
                    host.done(&outcome)?;
                    return Ok(outcome);
                }
            }
        }

        warn!("input closed before the table prompt finished");
        Err(TableError::InputClosed)
    }
}

/// Run a table prompt on the real terminal
pub async fn prompt(config: TableConfig, validator: Option<Validator>) -> Result<Outcome> {
    let mut table_prompt = TablePrompt::new(config)?;
    if let Some(validator) = validator {
        table_prompt.validator = validator;
    }

    let mut host = TerminalHost::acquire()?;
    let mut events = spawn_input_reader();
    table_prompt.run(&mut host, &mut events).await
}
