use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::client::GameSettings;
use crate::game::{Algorithm, Difficulty, GameMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupField {
    GameType,
    Difficulty,
    Algorithm,
    Start,
}

/// The new-game form.
#[derive(Debug, Clone)]
pub struct SetupForm {
    pub game_type: Option<GameMode>,
    pub difficulty: Difficulty,
    pub algorithm: Algorithm,
    pub focus: SetupField,
    pub initial_moves: Vec<usize>,
}

fn cycle<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> T {
    let idx = options.iter().position(|&o| o == current).unwrap_or(0);
    let len = options.len();
    let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
    options[next]
}

impl SetupForm {
    pub fn new(initial_moves: Vec<usize>) -> Self {
        SetupForm {
            game_type: None,
            difficulty: Difficulty::default(),
            algorithm: Algorithm::default(),
            focus: SetupField::GameType,
            initial_moves,
        }
    }

    /// Difficulty and algorithm only matter when a computer plays.
    pub fn visible_fields(&self) -> Vec<SetupField> {
        match self.game_type {
            Some(GameMode::HumanHuman) => vec![SetupField::GameType, SetupField::Start],
            _ => vec![
                SetupField::GameType,
                SetupField::Difficulty,
                SetupField::Algorithm,
                SetupField::Start,
            ],
        }
    }

    pub fn can_start(&self) -> bool {
        self.game_type.is_some()
    }

    pub fn focus_next(&mut self, forward: bool) {
        let fields = self.visible_fields();
        self.focus = cycle(&fields, self.focus, forward);
    }

    /// Change the value of the focused field.
    pub fn change_value(&mut self, forward: bool) {
        match self.focus {
            SetupField::GameType => {
                self.game_type = Some(match self.game_type {
                    Some(mode) => cycle(&GameMode::ALL, mode, forward),
                    None if forward => GameMode::ALL[0],
                    None => GameMode::ALL[GameMode::ALL.len() - 1],
                });
            }
            SetupField::Difficulty => {
                self.difficulty = cycle(&Difficulty::ALL, self.difficulty, forward);
            }
            SetupField::Algorithm => {
                self.algorithm = cycle(&Algorithm::ALL, self.algorithm, forward);
            }
            SetupField::Start => {}
        }
    }

    pub fn settings(&self) -> Option<GameSettings> {
        let game_type = self.game_type?;
        Some(GameSettings {
            game_type,
            difficulty: self.difficulty,
            algorithm: self.algorithm,
            initial_moves: self.initial_moves.clone(),
        })
    }
}

pub fn render(frame: &mut Frame, form: &SetupForm, message: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(8),    // Form
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    let title = Paragraph::new("Connect Four")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    render_form(frame, form, chunks[1]);

    let msg = Paragraph::new(message.unwrap_or(""))
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(msg, chunks[2]);

    let controls = Paragraph::new("↑/↓: Field  |  ←/→: Change  |  Enter: Start  |  Q: Quit")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));
    frame.render_widget(controls, chunks[3]);
}

fn render_form(frame: &mut Frame, form: &SetupForm, area: Rect) {
    let mut lines = vec![Line::from("")];

    for field in form.visible_fields() {
        let focused = field == form.focus;
        let marker = if focused { "> " } else { "  " };
        let value_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let line = match field {
            SetupField::GameType => {
                let value = form.game_type.map_or("Select game type", GameMode::label);
                Line::from(vec![
                    Span::raw(marker),
                    Span::raw("Game type:  "),
                    Span::styled(format!("< {value} >"), value_style),
                ])
            }
            SetupField::Difficulty => Line::from(vec![
                Span::raw(marker),
                Span::raw("Difficulty: "),
                Span::styled(format!("< {} >", form.difficulty), value_style),
            ]),
            SetupField::Algorithm => Line::from(vec![
                Span::raw(marker),
                Span::raw("Algorithm:  "),
                Span::styled(format!("< {} >", form.algorithm), value_style),
            ]),
            SetupField::Start => {
                let style = if !form.can_start() {
                    Style::default().fg(Color::DarkGray)
                } else if focused {
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Green)
                };
                Line::from(vec![Span::raw(marker), Span::styled("[ Start Game ]", style)])
            }
        };
        lines.push(line);
        lines.push(Line::from(""));
    }

    if !form.initial_moves.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Move list loaded: {} moves", form.initial_moves.len()),
            Style::default().fg(Color::Yellow),
        )));
    }

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("New Game"));
    frame.render_widget(widget, area);
}
