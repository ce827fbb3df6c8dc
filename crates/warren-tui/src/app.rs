//! Application state and main UI controller

use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use warren_core::effects::Color as GameColor;
use warren_core::shop::{self, CATALOG};
use warren_core::turn::{PlayerAction, TurnOutcome};
use warren_core::{FrameOutcome, GameSession};

use crate::fx::EffectsView;
use crate::input::key_to_action;
use crate::theme::Theme;
use crate::widgets::{FxOverlay, LogWidget, MapWidget, MenuWidget, StatusWidget};

/// Lines of history one log paging step covers.
const LOG_PAGE: usize = 4;

/// UI mode - what the app is currently displaying/waiting for
#[derive(Debug, Clone)]
pub enum UiMode {
    /// Normal gameplay
    Normal,
    /// A modal menu is open; the simulation is paused
    Menu(MenuState),
    /// Death screen
    Dead,
}

/// Which menu tree is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    /// Opened with Escape
    Game,
    /// Opened by stepping into the shop
    Shop,
}

/// Page within the open menu tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuPage {
    Main,
    Use,
    Inventory,
    Buy,
    Sell,
    Earn,
}

/// Cursor position inside the open menu.
#[derive(Debug, Clone)]
pub struct MenuState {
    pub kind: MenuKind,
    pub page: MenuPage,
    pub cursor: usize,
}

impl MenuState {
    pub fn game() -> Self {
        Self {
            kind: MenuKind::Game,
            page: MenuPage::Main,
            cursor: 0,
        }
    }

    pub fn shop() -> Self {
        Self {
            kind: MenuKind::Shop,
            page: MenuPage::Main,
            cursor: 0,
        }
    }

    fn open(&mut self, page: MenuPage) {
        self.page = page;
        self.cursor = 0;
    }

    pub fn title(&self) -> &'static str {
        match (self.kind, self.page) {
            (MenuKind::Game, MenuPage::Main) => "menu",
            (MenuKind::Shop, MenuPage::Main) => "shop",
            (_, MenuPage::Use) => "use",
            (_, MenuPage::Inventory) => "inventory",
            (_, MenuPage::Buy) => "buy",
            (_, MenuPage::Sell) => "sell",
            (_, MenuPage::Earn) => "earn money",
        }
    }
}

/// Application state
pub struct App {
    /// The running simulation
    session: GameSession,

    /// Should quit
    should_quit: bool,

    /// Current UI mode
    mode: UiMode,

    /// Lines of log history stepped back from the newest entry
    log_scroll: usize,

    /// Player gold as of the last frame the player was alive
    last_gold: i32,

    /// Color theme (adapts to light/dark terminal background)
    theme: Theme,

    /// Live floaters and sparks drained from the session
    fx: EffectsView,
}

impl App {
    /// Create a new application around a fresh session
    pub fn new(mut session: GameSession, theme: Theme) -> Self {
        session.log.push(
            GameColor::WHITE,
            format!("a new warren, seed {}", session.rng.seed()),
        );
        let last_gold = session.registry.player().map(|p| p.gold).unwrap_or(0);
        Self {
            session,
            should_quit: false,
            mode: UiMode::Normal,
            log_scroll: 0,
            last_gold,
            theme,
            fx: EffectsView::new(),
        }
    }

    /// Get the running session
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handle input event - returns a player order if one should run
    pub fn handle_event(&mut self, event: Event) -> Option<PlayerAction> {
        let Event::Key(key) = event else {
            return None;
        };

        // Quit is always available
        if key.code == KeyCode::Char('Q') && key.modifiers.contains(KeyModifiers::SHIFT) {
            self.should_quit = true;
            return None;
        }

        match &self.mode {
            UiMode::Normal => self.handle_normal_key(key),
            UiMode::Menu(_) => {
                self.handle_menu_key(key);
                None
            }
            UiMode::Dead => {
                self.handle_death_key(key);
                None
            }
        }
    }

    fn handle_normal_key(&mut self, key: crossterm::event::KeyEvent) -> Option<PlayerAction> {
        match key.code {
            KeyCode::Esc => {
                self.mode = UiMode::Menu(MenuState::game());
                None
            }
            KeyCode::PageUp => {
                self.log_scroll = (self.log_scroll + LOG_PAGE).min(self.session.log.len());
                None
            }
            KeyCode::PageDown => {
                self.log_scroll = self.log_scroll.saturating_sub(LOG_PAGE);
                None
            }
            _ => key_to_action(key),
        }
    }

    fn handle_menu_key(&mut self, key: crossterm::event::KeyEvent) {
        let UiMode::Menu(mut state) = self.mode.clone() else {
            return;
        };
        match key.code {
            KeyCode::Up => state.cursor = state.cursor.saturating_sub(1),
            KeyCode::Down => {
                let count = self.menu_items(&state).len();
                state.cursor = (state.cursor + 1).min(count.saturating_sub(1));
            }
            KeyCode::Esc => {
                if state.page == MenuPage::Main {
                    self.mode = UiMode::Normal;
                    return;
                }
                state.open(MenuPage::Main);
            }
            KeyCode::Enter => {
                if self.menu_select(&mut state) {
                    self.mode = UiMode::Normal;
                    return;
                }
            }
            _ => {}
        }
        // Selling can shrink the list under the cursor.
        let count = self.menu_items(&state).len();
        state.cursor = state.cursor.min(count.saturating_sub(1));
        self.mode = UiMode::Menu(state);
    }

    fn handle_death_key(&mut self, key: crossterm::event::KeyEvent) {
        if matches!(
            key.code,
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('q')
        ) {
            self.should_quit = true;
        }
    }

    /// Entries of the currently open menu page.
    fn menu_items(&self, state: &MenuState) -> Vec<String> {
        match state.page {
            MenuPage::Main => match state.kind {
                MenuKind::Game => ["resume", "use", "show inventory", "quit"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                MenuKind::Shop => ["resume", "earn money", "buy", "sell", "show inventory"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
            MenuPage::Use => with_back(self.session.inventory.usable_labels()),
            MenuPage::Inventory => with_back(self.session.inventory.labels()),
            MenuPage::Buy => with_back(CATALOG.iter().map(|s| s.to_string()).collect()),
            MenuPage::Sell => with_back(self.session.inventory.labels()),
            MenuPage::Earn => vec!["back".to_string(), "plant tomatoes".to_string()],
        }
    }

    /// Act on the cursor entry. True means the menu closes.
    fn menu_select(&mut self, state: &mut MenuState) -> bool {
        let items = self.menu_items(state);
        let Some(choice) = items.get(state.cursor).cloned() else {
            return false;
        };
        match state.page {
            MenuPage::Main => match choice.as_str() {
                "resume" => return true,
                "quit" => {
                    self.should_quit = true;
                    return true;
                }
                "use" => state.open(MenuPage::Use),
                "show inventory" => state.open(MenuPage::Inventory),
                "earn money" => state.open(MenuPage::Earn),
                "buy" => state.open(MenuPage::Buy),
                "sell" => state.open(MenuPage::Sell),
                _ => {}
            },
            MenuPage::Use => {
                if choice == "back" {
                    state.open(MenuPage::Main);
                } else {
                    shop::use_item(&mut self.session, &choice);
                }
            }
            MenuPage::Buy => {
                if choice == "back" {
                    state.open(MenuPage::Main);
                } else {
                    shop::buy(&mut self.session, &choice);
                }
            }
            MenuPage::Sell => {
                if choice == "back" {
                    state.open(MenuPage::Main);
                } else {
                    shop::sell(&mut self.session, &choice);
                }
            }
            MenuPage::Earn => {
                if choice == "back" {
                    state.open(MenuPage::Main);
                } else if choice == "plant tomatoes" {
                    shop::plant_tomatoes(&mut self.session);
                }
            }
            MenuPage::Inventory => {
                if choice == "back" {
                    state.open(MenuPage::Main);
                }
            }
        }
        false
    }

    /// Run one player order through the session.
    pub fn act(&mut self, action: PlayerAction) {
        if !matches!(self.mode, UiMode::Normal) {
            return;
        }
        if matches!(self.session.act(action), TurnOutcome::OpenShop) {
            self.mode = UiMode::Menu(MenuState::shop());
        }
    }

    /// Advance the simulation and the effects by `dt` seconds. Paused
    /// while a menu or the death screen is up.
    pub fn advance(&mut self, dt: f32) {
        if !matches!(self.mode, UiMode::Normal) {
            return;
        }
        let outcome = self.session.frame(dt);
        if let Some(player) = self.session.registry.player() {
            self.last_gold = player.gold;
        }
        if matches!(outcome, FrameOutcome::PlayerDied) {
            self.mode = UiMode::Dead;
        }
        self.fx.absorb(&mut self.session.effects);
        self.fx.step(dt);
    }

    /// Render the UI
    pub fn render(&self, frame: &mut Frame) {
        // Layout: board on top, status in the middle, log at the bottom
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.session.config.height.max(0) as u16 + 2),
                Constraint::Length(2),
                Constraint::Min(3),
            ])
            .split(frame.area());

        frame.render_widget(MapWidget::new(&self.session, &self.theme), chunks[0]);
        frame.render_widget(
            FxOverlay::new(&self.fx, self.session.config, &self.theme),
            chunks[0],
        );
        frame.render_widget(StatusWidget::new(&self.session, &self.theme), chunks[1]);
        frame.render_widget(
            LogWidget::new(&self.session.log, self.log_scroll, &self.theme),
            chunks[2],
        );

        match &self.mode {
            UiMode::Normal => {}
            UiMode::Menu(state) => self.render_menu(frame, state),
            UiMode::Dead => self.render_death(frame),
        }
    }

    fn render_menu(&self, frame: &mut Frame, state: &MenuState) {
        let items = self.menu_items(state);
        let area = centered_rect(40, 60, frame.area());
        frame.render_widget(Clear, area);
        frame.render_widget(
            MenuWidget::new(state.title(), &items, state.cursor, &self.theme),
            area,
        );
    }

    fn render_death(&self, frame: &mut Frame) {
        let area = centered_rect(50, 50, frame.area());
        frame.render_widget(Clear, area);

        let lines = vec![
            Line::from(Span::styled(
                "the warren takes another",
                Style::default().fg(self.theme.bad).bold(),
            )),
            Line::from(""),
            Line::from(format!(
                "gold {}    level {}    turns {}",
                self.last_gold, self.session.level, self.session.turn
            )),
            Line::from(""),
            Line::from(Span::styled(
                "press enter to leave",
                Style::default().fg(self.theme.text_dim),
            )),
        ];

        let block = Block::default()
            .title("game over")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_danger));
        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(paragraph, area);
    }
}

fn with_back(rest: Vec<String>) -> Vec<String> {
    let mut items = vec!["back".to_string()];
    items.extend(rest);
    items
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
