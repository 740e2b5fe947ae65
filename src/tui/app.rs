use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::{Frame, Terminal};

use crate::submit::{
    AcceptanceEndpoint, OperatingMode, StatusKind, SubmissionController,
};

use super::error::AppError;
use super::widgets::form::{ContactForm, draw_contact_form};

/// Top-level application state: the controller plus form focus.
pub struct App<E> {
    controller: SubmissionController<E>,
    form: ContactForm,
    should_quit: bool,
}

impl<E: AcceptanceEndpoint> App<E> {
    /// Creates an app around an already-configured controller.
    pub fn new(controller: SubmissionController<E>) -> Self {
        Self {
            controller,
            form: ContactForm::new(),
            should_quit: false,
        }
    }

    /// Main event loop: draw → read event → dispatch → check quit.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub async fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if let Event::Key(key) = event::read()? {
                self.handle_key(key).await;
            }
        }
        Ok(())
    }

    /// Handles a key event, driving the controller's narrow interface.
    ///
    /// Enter awaits the full submission attempt, so the loop blocks while a
    /// request is in flight; the controller's guard additionally ignores
    /// any submit that would overlap one.
    pub async fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // Alt+1/2 select the scenario, like the original's two buttons.
        if key.modifiers == KeyModifiers::ALT {
            match key.code {
                KeyCode::Char('1') => {
                    self.controller.set_mode(OperatingMode::ValidationScenario);
                    return;
                }
                KeyCode::Char('2') => {
                    self.controller.set_mode(OperatingMode::NetworkScenario);
                    return;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Tab => self.form.focus_next(),
            KeyCode::BackTab => self.form.focus_prev(),
            KeyCode::Backspace => self.delete_char(),
            KeyCode::Enter => self.controller.submit().await,
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(ch) => self.insert_char(ch),
            _ => {}
        }
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the controller, for rendering and tests.
    pub fn controller(&self) -> &SubmissionController<E> {
        &self.controller
    }

    /// Returns the form focus state.
    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Appends a character to the focused field.
    fn insert_char(&mut self, ch: char) {
        let field = self.form.focused();
        let mut value = self.controller.fields().get(field).to_string();
        value.push(ch);
        self.controller.set_field(field, value);
    }

    /// Deletes the last character of the focused field.
    fn delete_char(&mut self) {
        let field = self.form.focused();
        let mut value = self.controller.fields().get(field).to_string();
        value.pop();
        self.controller.set_field(field, value);
    }

    /// Renders the whole screen.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let block = Block::default()
            .title(" Contact Us ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(frame.area());
        frame.render_widget(block, frame.area());

        let [scenario_area, form_area, status_area, footer_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(12),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .areas(inner);

        let (a_style, b_style) = match self.controller.mode() {
            OperatingMode::ValidationScenario => {
                (Style::default().fg(Color::Yellow), Style::default().fg(Color::DarkGray))
            }
            OperatingMode::NetworkScenario => {
                (Style::default().fg(Color::DarkGray), Style::default().fg(Color::Yellow))
            }
        };
        let scenario_line = Line::from(vec![
            Span::raw("Test Environment:  "),
            Span::styled("[Form A]", a_style),
            Span::raw("  "),
            Span::styled("[Form B]", b_style),
        ]);
        frame.render_widget(Paragraph::new(scenario_line), scenario_area);

        draw_contact_form(&self.form, &self.controller, frame, form_area);

        if self.controller.is_submitting() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "Submitting...",
                    Style::default().fg(Color::Yellow),
                )),
                status_area,
            );
        } else if let Some(status) = self.controller.status() {
            let color = match status.kind {
                StatusKind::Success => Color::Green,
                StatusKind::Error => Color::Red,
            };
            frame.render_widget(
                Paragraph::new(Span::styled(status.message, Style::default().fg(color))),
                status_area,
            );
        }

        let footer = Paragraph::new(Line::from(
            "Tab: next  Enter: submit  Alt+1/2: scenario  Esc: quit",
        ))
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(footer, footer_area);
    }
}
