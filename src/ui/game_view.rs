use crate::client::ClientGameState;
use crate::game::{Cell, GameMode, Player, COLS, ROWS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn player_color(player: Player) -> Color {
    match player {
        Player::One => Color::Red,
        Player::Two => Color::Yellow,
    }
}

/// Status line: whose turn it is, or the result.
pub fn status_line(state: &ClientGameState) -> String {
    if state.is_finished {
        match state.winner {
            Some(player) => format!("{player} Wins!"),
            None => "It's a Draw!".to_string(),
        }
    } else {
        format!("{}'s Turn", state.current_player)
    }
}

fn player_kind(state: &ClientGameState, player: Player) -> String {
    let computer = state
        .game_type
        .is_some_and(|mode| mode.is_computer(player));
    if !computer {
        return "Human".to_string();
    }
    match (state.algorithm, state.difficulty) {
        (Some(algorithm), Some(difficulty)) => format!("Computer ({algorithm}, {difficulty})"),
        _ => "Computer".to_string(),
    }
}

pub fn render(
    frame: &mut Frame,
    state: &ClientGameState,
    selected_column: usize,
    message: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Players
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, state, chunks[0]);
    render_players(frame, state, chunks[1]);
    render_board(frame, state, selected_column, chunks[2]);
    render_message(frame, message, chunks[3]);
    render_controls(frame, chunks[4]);
}

fn render_header(frame: &mut Frame, state: &ClientGameState, area: Rect) {
    let color = match (state.is_finished, state.winner) {
        (true, Some(player)) => player_color(player),
        (true, None) => Color::White,
        (false, _) => player_color(state.current_player),
    };
    let mode = state.game_type.map_or("", GameMode::label);

    let header = Paragraph::new(status_line(state))
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Connect Four  |  {mode}")),
        );

    frame.render_widget(header, area);
}

fn render_players(frame: &mut Frame, state: &ClientGameState, area: Rect) {
    let mut spans = Vec::new();
    for player in [Player::One, Player::Two] {
        spans.push(Span::styled(
            format!("{player}"),
            Style::default()
                .fg(player_color(player))
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(": {}   ", player_kind(state, player))));
    }
    if !state.from_file && !state.move_calculation_time.is_zero() {
        spans.push(Span::raw(format!(
            "Move calculation time: {:.3} s",
            state.move_calculation_time.as_secs_f64()
        )));
    }
    if state.from_file {
        spans.push(Span::styled("Loaded from file", Style::default().fg(Color::Cyan)));
    }

    let widget = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn render_board(frame: &mut Frame, state: &ClientGameState, selected_column: usize, area: Rect) {
    let mut lines = Vec::new();
    let selector = if state.is_finished {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    };

    let mut col_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        let label = format!(" {} ", col);
        if col == selected_column {
            col_line.push(Span::styled(label, selector));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw("  "));
    lines.push(Line::from(col_line));

    lines.push(Line::from("  ╔═════════════════════╗"));

    for row in 0..ROWS {
        let mut row_spans = vec![Span::raw("  ║")];
        for col in 0..COLS {
            let (symbol, color) = match state.board.get(row, col) {
                Cell::Empty => (" . ", Color::DarkGray),
                Cell::PlayerOne => (" ● ", player_color(Player::One)),
                Cell::PlayerTwo => (" ● ", player_color(Player::Two)),
            };
            let mut style = Style::default().fg(color);
            if state.is_winning_cell(row, col) {
                style = style
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD);
            }
            row_spans.push(Span::styled(symbol, style));
        }
        row_spans.push(Span::raw("║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from("  ╚═════════════════════╝"));

    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        if col == selected_column && !state.is_finished {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let msg_widget = Paragraph::new(message.unwrap_or(""))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new(
        "←/→: Move  |  Enter: Drop  |  H: Hint  |  C: Computer move  |  N: New game  |  Q: Quit",
    )
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
