use crate::app::{App, AppScreen, MIN_GAME_HEIGHT, MIN_GAME_WIDTH};
use crate::field::FieldScaler;
use pong_sim::{Event as MatchEvent, Phase, Side, View};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, BorderType, List, ListItem, Paragraph, Widget},
};

const LEFT_PADDLE_COLOR: Color = Color::Blue;
const RIGHT_PADDLE_COLOR: Color = Color::Red;
const BALL_COLOR: Color = Color::Green;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(5)])
            .split(area);

        let title = Paragraph::new("Pong Game")
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title("Pong")
                    .title_alignment(Alignment::Center),
            );
        title.render(chunks[0], buf);

        match self.screen {
            AppScreen::Start => self.render_start_screen(chunks[1], buf),
            AppScreen::Game => self.render_game_screen(chunks[1], buf),
        }
    }
}

impl App {
    fn render_start_screen(&self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = self
            .get_start_menu_items()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let style = if i == self.menu_state.start_selected {
                    Style::default().fg(Color::Yellow).bg(Color::DarkGray)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(*item).style(style)
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title("Main Menu")
                    .title_alignment(Alignment::Center),
            )
            .highlight_symbol("► ");

        list.render(area, buf);
    }

    fn render_game_screen(&self, area: Rect, buf: &mut Buffer) {
        if self.ui_paused {
            let message = format!(
                "Terminal too small!\n\nMinimum required: {}×{}\nCurrent size: {}×{}\n\nThe match is paused until the terminal is resized.",
                MIN_GAME_WIDTH, MIN_GAME_HEIGHT, self.terminal_size.0, self.terminal_size.1
            );

            let resize_widget = Paragraph::new(message)
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center)
                .block(
                    Block::bordered()
                        .border_type(BorderType::Rounded)
                        .title("⚠ Resize Required ⚠")
                        .title_alignment(Alignment::Center),
                );
            resize_widget.render(area, buf);
            return;
        }

        let (Some(driver), Some(game_area)) =
            (self.driver.as_ref(), self.calculate_centered_game_area(area))
        else {
            return;
        };
        let view = driver.view();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Score
                Constraint::Min(10),   // Field
                Constraint::Length(3), // Controls
            ])
            .split(game_area);

        let banner = self.banner.map(|(event, _)| event);
        render_scoreboard(&view, banner, chunks[0], buf);
        render_field(&view, chunks[1], buf);

        let controls_text = format!(
            "↑/↓ or k/j: move   SPACE: {}   ESC: Menu   Q: Quit   [{}]",
            action_label(view.phase),
            self.input_system.mode_description()
        );
        let controls_widget = Paragraph::new(controls_text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title("Controls")
                    .title_alignment(Alignment::Center),
            );
        controls_widget.render(chunks[2], buf);
    }
}

fn action_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "Start Game",
        Phase::Playing => "-",
        Phase::Ended => "Restart Game",
    }
}

/// Status line shown next to the score
pub fn status_text(view: &View, banner: Option<MatchEvent>) -> String {
    match (view.phase, banner) {
        (Phase::Idle, _) => "Press SPACE to start".to_string(),
        (Phase::Ended, _) => match view.winner {
            Some(Side::Right) => "You win!".to_string(),
            Some(Side::Left) => "The computer wins".to_string(),
            None => "Game over".to_string(),
        },
        (Phase::Playing, Some(MatchEvent::Scored { scorer, .. })) => {
            format!("Player {} scores!", scorer.player_number())
        }
        (Phase::Playing, _) => "Playing".to_string(),
    }
}

pub fn render_scoreboard(view: &View, banner: Option<MatchEvent>, area: Rect, buf: &mut Buffer) {
    let score_content = format!(
        "Player 1: {}    Player 2: {}    {}",
        view.score[0],
        view.score[1],
        status_text(view, banner)
    );

    let score_widget = Paragraph::new(score_content)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .title("Score")
                .title_alignment(Alignment::Center),
        );
    score_widget.render(area, buf);
}

/// Draw paddles, ball and center line inside a bordered block
pub fn render_field(view: &View, area: Rect, buf: &mut Buffer) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .title("CPU ◄ ► You")
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    block.render(area, buf);

    if inner.width == 0 || inner.height == 0 {
        return; // Too small to render
    }

    let scaler = FieldScaler::new(inner.width as usize, inner.height as usize);
    let put = |buf: &mut Buffer, col: usize, row: usize, symbol: &str, color: Color| {
        buf.set_string(
            inner.x + col as u16,
            inner.y + row as u16,
            symbol,
            Style::default().fg(color),
        );
    };

    let center = inner.width as usize / 2;
    for row in 0..inner.height as usize {
        put(buf, center, row, "┊", Color::DarkGray);
    }

    for (side, y, color) in [
        (Side::Left, view.left_y, LEFT_PADDLE_COLOR),
        (Side::Right, view.right_y, RIGHT_PADDLE_COLOR),
    ] {
        let rect = scaler.paddle_rect(y, side);
        for row in rect.rows() {
            for col in rect.cols() {
                put(buf, col, row, "█", color);
            }
        }
    }

    let (ball_col, ball_row) = scaler.ball_cell(view.ball_pos);
    put(buf, ball_col, ball_row, "●", BALL_COLOR);
}
