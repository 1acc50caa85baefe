use crate::client::{GameApi, Session};
use crate::game::COLS;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::{Duration, Instant};

use super::setup_view::{SetupField, SetupForm};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct App<A: GameApi> {
    session: Session<A>,
    setup: SetupForm,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl<A: GameApi> App<A> {
    /// `setup` carries any choices made on the command line.
    pub fn new(session: Session<A>, setup: SetupForm) -> Self {
        App {
            session,
            setup,
            selected_column: 3, // Start in middle
            should_quit: false,
            message: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;

            let pending = self.session.next_computer_move().is_some();
            if self.session.tick(Instant::now()) {
                self.message = None;
            } else if pending && self.session.next_computer_move().is_none() {
                self.message = self.session.last_error().map(str::to_string);
            }
        }
        Ok(())
    }

    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            _ if self.session.is_setup_open() => self.handle_setup_key(key),
            _ => self.handle_board_key(key),
        }
    }

    fn handle_setup_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.setup.focus_next(false),
            KeyCode::Down | KeyCode::Tab => self.setup.focus_next(true),
            KeyCode::Left => self.setup.change_value(false),
            KeyCode::Right => self.setup.change_value(true),
            KeyCode::Enter => {
                if self.setup.focus != SetupField::Start {
                    self.setup.focus_next(true);
                    return;
                }
                let Some(settings) = self.setup.settings() else {
                    self.message = Some("Choose a game type first".to_string());
                    return;
                };
                if self.session.start_new_game(&settings) {
                    self.selected_column = 3;
                } else {
                    self.message = self.session.last_error().map(str::to_string);
                }
            }
            _ => {}
        }
    }

    fn handle_board_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                }
            }
            KeyCode::Right => {
                if self.selected_column < COLS - 1 {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '0'..='6') => {
                self.selected_column = c as usize - '0' as usize;
                self.drop_piece();
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.drop_piece(),
            KeyCode::Char('c') => {
                if self.session.state().from_file {
                    self.message = Some("Moves come from the file; drop pieces manually".to_string());
                } else if !self.session.state().computer_to_move() {
                    self.message = Some("It's not the computer's turn".to_string());
                } else if !self.session.make_computer_move() {
                    self.message = self.session.last_error().map(str::to_string);
                }
            }
            KeyCode::Char('h') => {
                self.message = match self.session.hint() {
                    Some(column) => {
                        self.selected_column = column;
                        Some(format!("Suggested column: {column}"))
                    }
                    None => self
                        .session
                        .last_error()
                        .map(str::to_string)
                        .or_else(|| Some("No move to suggest".to_string())),
                };
            }
            KeyCode::Char('n') | KeyCode::Char('r') => {
                self.session.reset();
                self.setup.focus = SetupField::GameType;
            }
            _ => {}
        }
    }

    fn drop_piece(&mut self) {
        let state = self.session.state();
        if state.is_finished {
            self.message = Some("Game over! Press 'n' for a new game.".to_string());
            return;
        }
        if state.computer_to_move() && !state.from_file {
            self.message = Some("Waiting for the computer".to_string());
            return;
        }
        if !state.column_open(self.selected_column) {
            self.message = Some("Column is full!".to_string());
            return;
        }

        if !self.session.make_move(self.selected_column) {
            self.message = self.session.last_error().map(str::to_string);
        }
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        if self.session.is_setup_open() {
            super::setup_view::render(frame, &self.setup, self.message.as_deref());
        } else {
            super::game_view::render(
                frame,
                self.session.state(),
                self.selected_column,
                self.message.as_deref(),
            );
        }
    }
}
