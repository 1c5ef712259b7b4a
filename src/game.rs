//! Core game state and logic

use crate::board::{Board, BOARD_HEIGHT, BOARD_WIDTH};
use crate::collision::check_collision;
use crate::piece::Piece;
use crate::randomizer::Randomizer;
use crate::score::Score;
use crate::shape::Shape;
use crate::tetromino::TetrominoType;
use ratatui::style::Color;
use tracing::debug;

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    /// A new piece could not be placed at the spawn position
    GameOver,
    /// The player ended the game
    Quit,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    RotateCW,
    HardDrop,
    Quit,
}

/// Horizontal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn offset(&self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Things that happened inside the engine, for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Spawned(TetrominoType),
    Moved,
    Rotated,
    Locked,
    LinesCleared { lines: u32, points: u64 },
    StateChanged(GameState),
    Restarted,
}

/// View of the active piece for drawing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceView {
    pub piece_type: TetrominoType,
    pub x: i32,
    pub y: i32,
    pub shape: Shape,
    pub color: Color,
}

/// Everything needed to redraw the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    /// Locked cells as (x, y, color)
    pub cells: Vec<(usize, usize, Color)>,
    pub active: Option<PieceView>,
    pub score: u64,
    pub lines: u32,
    pub state: GameState,
}

/// Receives engine events along with a snapshot taken after them
pub trait PresentationSink {
    fn present(&mut self, event: &GameEvent, snapshot: &Snapshot);
}

/// The main game struct
pub struct Game {
    /// The game board
    pub board: Board,
    /// Current falling piece (None after top-out)
    pub current_piece: Option<Piece>,
    /// Piece randomizer
    randomizer: Randomizer,
    /// Score tracking
    pub score: Score,
    /// Current game state
    pub state: GameState,
    /// Events not yet flushed to a sink
    events: Vec<GameEvent>,
}

impl Game {
    /// Create a new game on a standard board
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a new game with a fixed piece sequence
    pub fn with_seed(seed: u64) -> Self {
        Self::with_board(Board::new(BOARD_WIDTH, BOARD_HEIGHT), seed)
    }

    /// Create a new game on the given board and spawn the first piece
    pub fn with_board(board: Board, seed: u64) -> Self {
        let mut game = Self {
            board,
            current_piece: None,
            randomizer: Randomizer::with_seed(seed),
            score: Score::new(),
            state: GameState::Playing,
            events: Vec::new(),
        };
        game.spawn();
        game
    }

    /// Process an action. Ignored unless the game is being played.
    pub fn process_action(&mut self, action: Action) {
        if self.state != GameState::Playing {
            return;
        }
        match action {
            Action::MoveLeft => {
                self.shift(Direction::Left);
            }
            Action::MoveRight => {
                self.shift(Direction::Right);
            }
            Action::RotateCW => {
                self.rotate();
            }
            Action::HardDrop => self.hard_drop(),
            Action::Quit => self.quit(),
        }
    }

    /// Spawn a random piece at the top center. Tops out if it does not fit.
    pub fn spawn(&mut self) {
        if self.state != GameState::Playing {
            return;
        }

        let kind = self.randomizer.next();
        let piece = Piece::spawn(kind, self.board.width());

        if check_collision(&piece, &self.board, 0, 0, None) {
            debug!(?kind, "spawn blocked, topping out");
            self.current_piece = None;
            self.set_state(GameState::GameOver);
            return;
        }

        self.current_piece = Some(piece);
        self.events.push(GameEvent::Spawned(kind));
    }

    /// Try to move the piece one column; returns true if it moved
    pub fn shift(&mut self, direction: Direction) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        let Some(piece) = &mut self.current_piece else {
            return false;
        };

        let dx = direction.offset();
        if check_collision(piece, &self.board, dx, 0, None) {
            return false;
        }
        piece.x += dx;
        self.events.push(GameEvent::Moved);
        true
    }

    /// Try to rotate the piece clockwise; rejected outright on collision
    pub fn rotate(&mut self) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        let Some(piece) = &mut self.current_piece else {
            return false;
        };

        let rotated = piece.shape.rotated_cw();
        if check_collision(piece, &self.board, 0, 0, Some(&rotated)) {
            return false;
        }
        piece.shape = rotated;
        self.events.push(GameEvent::Rotated);
        true
    }

    /// Move the piece down one row, or lock it if it cannot move.
    /// This is the only path that locks pieces and spawns new ones.
    pub fn move_down(&mut self) {
        if self.state != GameState::Playing {
            return;
        }
        let Some(piece) = &mut self.current_piece else {
            return;
        };

        if !check_collision(piece, &self.board, 0, 1, None) {
            piece.y += 1;
            self.events.push(GameEvent::Moved);
            return;
        }

        self.lock_piece();
        self.clear_lines();
        if self.state == GameState::Playing {
            self.spawn();
        }
    }

    /// Drop the piece as far as it goes, then lock it through `move_down`
    pub fn hard_drop(&mut self) {
        if self.state != GameState::Playing {
            return;
        }
        let Some(piece) = &mut self.current_piece else {
            return;
        };

        while !check_collision(piece, &self.board, 0, 1, None) {
            piece.y += 1;
        }
        self.move_down();
    }

    /// Remove full rows, scanning bottom to top. Returns the number cleared.
    pub fn clear_lines(&mut self) -> u32 {
        let mut lines_cleared = 0;
        let mut y = self.board.height();

        while y > 0 {
            // Re-test the same index after a removal: the row above slid into it
            if self.board.is_row_full(y - 1) {
                self.board.remove_row(y - 1);
                lines_cleared += 1;
            } else {
                y -= 1;
            }
        }

        if lines_cleared > 0 {
            let points = self.score.add_lines(lines_cleared);
            debug!(lines_cleared, points, total = self.score.points, "lines cleared");
            self.events.push(GameEvent::LinesCleared {
                lines: lines_cleared,
                points,
            });
        }
        lines_cleared
    }

    /// End the game at the player's request
    pub fn quit(&mut self) {
        if self.state != GameState::Playing {
            return;
        }
        self.set_state(GameState::Quit);
    }

    /// Start over with an empty board and zero score
    pub fn restart(&mut self) {
        self.board = Board::new(self.board.width(), self.board.height());
        self.current_piece = None;
        self.score = Score::new();
        self.state = GameState::Playing;
        self.events.push(GameEvent::Restarted);
        self.spawn();
    }

    /// Build a drawable view of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.board.width(),
            height: self.board.height(),
            cells: self.board.filled_cells(),
            active: self.current_piece.as_ref().map(|piece| PieceView {
                piece_type: piece.piece_type,
                x: piece.x,
                y: piece.y,
                shape: piece.shape.clone(),
                color: piece.color,
            }),
            score: self.score.points,
            lines: self.score.lines,
            state: self.state,
        }
    }

    /// Take pending events without presenting them
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Deliver pending events to a sink, each with the current snapshot
    pub fn flush(&mut self, sink: &mut dyn PresentationSink) {
        if self.events.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for event in self.take_events() {
            sink.present(&event, &snapshot);
        }
    }

    /// Replace the falling piece
    #[cfg(test)]
    pub(crate) fn set_current_piece(&mut self, piece: Piece) {
        self.current_piece = Some(piece);
    }

    /// Copy the falling piece into the board
    fn lock_piece(&mut self) {
        let Some(piece) = self.current_piece.take() else {
            return;
        };
        self.board.lock_cells(&piece.block_positions(), piece.color);
        debug!(kind = ?piece.piece_type, x = piece.x, y = piece.y, "piece locked");
        self.events.push(GameEvent::Locked);
    }

    fn set_state(&mut self, state: GameState) {
        self.state = state;
        debug!(?state, "game state changed");
        self.events.push(GameEvent::StateChanged(state));
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
