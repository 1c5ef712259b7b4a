//! Presentation scenes
//!
//! The app is always in exactly one scene. Each scene gets key events,
//! frame ticks and render calls, and tells the main loop where to go next.

use crate::game::{Game, GameEvent, GameState, PresentationSink, Snapshot};
use crate::input::InputHandler;
use crate::menu::{Menu, MenuAction};
use crate::settings::Settings;
use crate::timer::DropTimer;
use crate::ui;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::Frame;
use std::time::Instant;
use tracing::{debug, info};

/// Where the app goes after a scene handles something
pub enum Transition {
    Stay,
    Switch(Box<dyn Scene>),
    Exit,
}

pub trait Scene {
    /// Called once when the scene becomes active
    fn on_enter(&mut self, _now: Instant) {}

    /// Handle a key press or release
    fn on_input(&mut self, key: KeyEvent, now: Instant) -> Transition;

    /// Called once per frame
    fn on_tick(&mut self, _now: Instant) -> Transition {
        Transition::Stay
    }

    fn on_render(&self, frame: &mut Frame);
}

/// The start menu
pub struct MenuScene {
    menu: Menu,
    settings: Settings,
}

impl MenuScene {
    pub fn new(settings: Settings) -> Self {
        Self {
            menu: Menu::new(),
            settings,
        }
    }
}

impl Scene for MenuScene {
    fn on_input(&mut self, key: KeyEvent, _now: Instant) -> Transition {
        if key.kind != KeyEventKind::Press {
            return Transition::Stay;
        }

        match key.code {
            KeyCode::Up => self.menu.move_up(),
            KeyCode::Down => self.menu.move_down(),
            KeyCode::Enter => match self.menu.select() {
                Some(MenuAction::StartGame) => {
                    return Transition::Switch(Box::new(GameScene::new(self.settings.clone())));
                }
                Some(MenuAction::Quit) => return Transition::Exit,
                None => {}
            },
            KeyCode::Char('q') | KeyCode::Esc => return Transition::Exit,
            _ => {}
        }
        Transition::Stay
    }

    fn on_render(&self, frame: &mut Frame) {
        ui::render_menu(frame, &self.menu);
    }
}

/// Presentation side of a running game: keeps the latest snapshot for
/// drawing and owns the gravity timer so it can stop it when play ends.
struct GameView {
    snapshot: Snapshot,
    timer: DropTimer,
}

impl PresentationSink for GameView {
    fn present(&mut self, event: &GameEvent, snapshot: &Snapshot) {
        match event {
            GameEvent::StateChanged(GameState::GameOver) => {
                self.timer.cancel();
                info!("Game over, score={} lines={}", snapshot.score, snapshot.lines);
            }
            GameEvent::StateChanged(GameState::Quit) => {
                self.timer.cancel();
                info!("Game quit, score={} lines={}", snapshot.score, snapshot.lines);
            }
            GameEvent::LinesCleared { lines, points } => {
                debug!("Cleared {} lines for {} points", lines, points);
            }
            _ => {}
        }
        self.snapshot = snapshot.clone();
    }
}

/// A game in progress
pub struct GameScene {
    game: Game,
    input: InputHandler,
    view: GameView,
    settings: Settings,
}

impl GameScene {
    pub fn new(settings: Settings) -> Self {
        let seed = settings.gameplay.seed.unwrap_or_else(rand::random);
        info!("Starting game, seed={}", seed);

        let game = Game::with_seed(seed);
        let view = GameView {
            snapshot: game.snapshot(),
            timer: DropTimer::new(
                settings.gameplay.drop_interval(),
                settings.gameplay.soft_drop_interval(),
                Instant::now(),
            ),
        };

        let mut scene = Self {
            game,
            input: InputHandler::from_settings(&settings),
            view,
            settings,
        };
        scene.game.flush(&mut scene.view);
        scene
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    fn restart(&mut self, now: Instant) {
        info!("Restarting game");
        self.game.restart();
        self.input.clear();
        self.view.timer.restart(now);
        self.game.flush(&mut self.view);
    }
}

impl Scene for GameScene {
    fn on_enter(&mut self, now: Instant) {
        self.view.timer.restart(now);
    }

    fn on_input(&mut self, key: KeyEvent, now: Instant) -> Transition {
        if key.kind == KeyEventKind::Release {
            self.input.key_up(key);
            return Transition::Stay;
        }

        if self.game.state != GameState::Playing {
            match key.code {
                KeyCode::Char('r') | KeyCode::Char('R') => self.restart(now),
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => {
                    return Transition::Switch(Box::new(MenuScene::new(self.settings.clone())));
                }
                _ => {}
            }
            return Transition::Stay;
        }

        if let Some(action) = self.input.key_down(key, now) {
            debug!(?action, "input");
            self.game.process_action(action);
            self.game.flush(&mut self.view);
        }
        Transition::Stay
    }

    fn on_tick(&mut self, now: Instant) -> Transition {
        self.input.update(now);
        self.view.timer.set_soft_drop(self.input.soft_drop_held(), now);

        if self.view.timer.poll(now) {
            self.game.move_down();
            self.game.flush(&mut self.view);
        }
        Transition::Stay
    }

    fn on_render(&self, frame: &mut Frame) {
        ui::render_game(frame, &self.view.snapshot, &self.settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::time::Duration;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn seeded_settings() -> Settings {
        let mut settings = Settings::default();
        settings.gameplay.seed = Some(7);
        settings
    }

    #[test]
    fn test_menu_starts_game_and_exits() {
        let mut scene = MenuScene::new(seeded_settings());
        let now = Instant::now();
        assert!(matches!(scene.on_input(press(KeyCode::Enter), now), Transition::Switch(_)));
        assert!(matches!(scene.on_input(press(KeyCode::Down), now), Transition::Stay));
        assert!(matches!(scene.on_input(press(KeyCode::Enter), now), Transition::Exit));
    }

    #[test]
    fn test_timer_tick_moves_piece_down() {
        let mut scene = GameScene::new(seeded_settings());
        let start = Instant::now();
        scene.on_enter(start);
        let y = scene.game().current_piece.as_ref().unwrap().y;

        scene.on_tick(start + Duration::from_millis(500));
        assert_eq!(scene.game().current_piece.as_ref().unwrap().y, y);

        scene.on_tick(start + Duration::from_millis(1000));
        assert_eq!(scene.game().current_piece.as_ref().unwrap().y, y + 1);
        assert_eq!(scene.view.snapshot.active.as_ref().unwrap().y, y + 1);
    }

    #[test]
    fn test_soft_drop_speeds_up_ticks() {
        let mut scene = GameScene::new(seeded_settings());
        let start = Instant::now();
        scene.on_enter(start);
        let y = scene.game().current_piece.as_ref().unwrap().y;

        scene.on_input(press(KeyCode::Down), start);
        scene.on_tick(start);
        scene.on_tick(start + Duration::from_millis(50));
        scene.on_tick(start + Duration::from_millis(100));
        assert_eq!(scene.game().current_piece.as_ref().unwrap().y, y + 2);
    }

    #[test]
    fn test_quit_cancels_timer_and_restart_rearms() {
        let mut scene = GameScene::new(seeded_settings());
        let start = Instant::now();
        scene.on_enter(start);

        scene.on_input(press(KeyCode::Esc), start);
        assert_eq!(scene.game().state, GameState::Quit);
        assert!(!scene.view.timer.is_running());
        assert_eq!(scene.view.snapshot.state, GameState::Quit);

        scene.on_input(press(KeyCode::Char('r')), start);
        assert_eq!(scene.game().state, GameState::Playing);
        assert!(scene.view.timer.is_running());
        assert_eq!(scene.game().score.points, 0);
    }

    #[test]
    fn test_held_hard_drop_locks_one_piece() {
        let mut scene = GameScene::new(seeded_settings());
        let start = Instant::now();
        scene.on_enter(start);
        scene.on_input(press(KeyCode::Char(' ')), start);

        // Terminal auto-repeat kicks in after ~500ms, then every ~32ms
        for t in (16..=700).step_by(16) {
            let now = start + Duration::from_millis(t);
            if t >= 512 && t % 32 == 0 {
                scene.on_input(press(KeyCode::Char(' ')), now);
            }
            scene.on_tick(now);
        }

        assert_eq!(scene.game().board.filled_cells().len(), 4);
    }

    #[test]
    fn test_game_over_cancels_timer() {
        let mut scene = GameScene::new(seeded_settings());
        let start = Instant::now();
        scene.on_enter(start);

        let mut presses = 0;
        while scene.game().state == GameState::Playing && presses < 200 {
            scene.input.clear();
            scene.on_input(press(KeyCode::Char(' ')), start);
            presses += 1;
        }

        assert_eq!(scene.game().state, GameState::GameOver);
        assert!(!scene.view.timer.is_running());
        assert_eq!(scene.view.snapshot.state, GameState::GameOver);

        let board = scene.game().board.clone();
        scene.on_tick(start + Duration::from_secs(10));
        assert_eq!(scene.game().board, board);
    }

    #[test]
    fn test_menu_reachable_after_game_ends() {
        let mut scene = GameScene::new(seeded_settings());
        let now = Instant::now();
        // Enter does nothing while playing
        assert!(matches!(scene.on_input(press(KeyCode::Enter), now), Transition::Stay));
        scene.on_input(press(KeyCode::Esc), now);
        assert!(matches!(scene.on_input(press(KeyCode::Enter), now), Transition::Switch(_)));
    }

    #[test]
    fn test_hard_drop_key_is_edge_triggered() {
        let mut scene = GameScene::new(seeded_settings());
        let now = Instant::now();
        scene.on_input(press(KeyCode::Char(' ')), now);
        let after_one = scene.game().board.clone();
        assert!(!after_one.is_empty());

        // Same press delivered again within the tick
        scene.on_input(press(KeyCode::Char(' ')), now);
        assert_eq!(scene.game().board, after_one);
    }
}
