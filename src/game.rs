//! Turn management for one human against the engine
//!
//! A session moves through
//! `AwaitingColorChoice -> HumanTurn <-> AiTurn -> GameOver`, and
//! [`GameSession::restart`] returns it to the color choice. Actions issued in
//! the wrong phase fail with [`GameError::IllegalAction`] and leave the
//! session untouched.

use crate::board::{Board, Pos, Stone};
use crate::engine::{AIEngine, MoveResult};
use crate::error::GameError;
use crate::rules::find_five_positions;

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    HumanWins,
    AiWins,
    Draw,
}

/// Where the session is in the turn cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingColorChoice,
    HumanTurn,
    AiTurn,
    GameOver(GameOutcome),
}

/// One game between a human and the engine
pub struct GameSession {
    engine: AIEngine,
    board: Board,
    phase: Phase,
    human_color: Option<Stone>,
    last_ai_result: Option<MoveResult>,
}

impl GameSession {
    pub fn new(engine: AIEngine) -> Self {
        Self {
            engine,
            board: Board::new(),
            phase: Phase::AwaitingColorChoice,
            human_color: None,
            last_ai_result: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn engine(&self) -> &AIEngine {
        &self.engine
    }

    /// The human's color once chosen
    pub fn human_color(&self) -> Option<Stone> {
        self.human_color
    }

    pub fn ai_color(&self) -> Option<Stone> {
        self.human_color.map(Stone::opponent)
    }

    /// Color to move, if the game is in progress
    pub fn current_turn(&self) -> Option<Stone> {
        match self.phase {
            Phase::HumanTurn => self.human_color,
            Phase::AiTurn => self.ai_color(),
            _ => None,
        }
    }

    /// Statistics of the engine's most recent move
    pub fn last_ai_result(&self) -> Option<&MoveResult> {
        self.last_ai_result.as_ref()
    }

    /// Stones of the winning line once someone has five
    pub fn winning_line(&self) -> Option<Vec<Pos>> {
        let winner = self.board.winner()?;
        find_five_positions(&self.board, winner)
    }

    fn illegal(&self, action: &'static str) -> GameError {
        GameError::IllegalAction {
            action,
            phase: self.phase,
        }
    }

    fn enter(&mut self, phase: Phase) -> Phase {
        log::info!("session phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        phase
    }

    /// Pick the human's color. Black moves first, so choosing White hands
    /// the first move to the engine.
    pub fn choose_color(&mut self, color: Stone) -> Result<Phase, GameError> {
        if self.phase != Phase::AwaitingColorChoice {
            return Err(self.illegal("choose a color"));
        }
        if !color.is_side() {
            return Err(GameError::InvalidSide(color));
        }

        self.human_color = Some(color);
        let next = if color == Stone::Black {
            Phase::HumanTurn
        } else {
            Phase::AiTurn
        };
        Ok(self.enter(next))
    }

    /// Place the human's stone. An invalid placement is rejected and the
    /// human keeps the turn.
    pub fn play_human(&mut self, pos: Pos) -> Result<Phase, GameError> {
        let color = match (self.phase, self.human_color) {
            (Phase::HumanTurn, Some(color)) => color,
            _ => return Err(self.illegal("play a human move")),
        };

        self.board.place(pos, color)?;
        Ok(self.after_move(pos, color))
    }

    /// Let the engine choose and play its move.
    pub fn play_ai(&mut self) -> Result<MoveResult, GameError> {
        let color = match (self.phase, self.ai_color()) {
            (Phase::AiTurn, Some(color)) => color,
            _ => return Err(self.illegal("play an engine move")),
        };

        let result = self.engine.get_move_with_stats(&self.board, color);
        let Some(pos) = result.best_move else {
            self.enter(Phase::GameOver(GameOutcome::Draw));
            return Err(GameError::NoLegalMove);
        };

        self.board.place(pos, color)?;
        self.last_ai_result = Some(result.clone());
        self.after_move(pos, color);
        Ok(result)
    }

    fn after_move(&mut self, pos: Pos, color: Stone) -> Phase {
        let human_moved = Some(color) == self.human_color;

        let next = if self.board.has_five_at(pos) {
            Phase::GameOver(if human_moved {
                GameOutcome::HumanWins
            } else {
                GameOutcome::AiWins
            })
        } else if self.board.is_full() {
            Phase::GameOver(GameOutcome::Draw)
        } else if human_moved {
            Phase::AiTurn
        } else {
            Phase::HumanTurn
        };
        self.enter(next)
    }

    /// Clear the board and go back to the color choice. Allowed in any phase.
    pub fn restart(&mut self) {
        self.board = Board::new();
        self.human_color = None;
        self.last_ai_result = None;
        self.engine.clear_cache();
        self.enter(Phase::AwaitingColorChoice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TOTAL_CELLS;
    use crate::config::EngineConfig;
    use crate::engine::SearchType;

    fn session() -> GameSession {
        let engine = AIEngine::with_config(EngineConfig {
            depth: 1,
            ..EngineConfig::default()
        })
        .unwrap();
        GameSession::new(engine)
    }

    #[test]
    fn test_starts_awaiting_color() {
        let s = session();
        assert_eq!(s.phase(), Phase::AwaitingColorChoice);
        assert_eq!(s.human_color(), None);
        assert_eq!(s.current_turn(), None);
    }

    #[test]
    fn test_choose_black_then_white() {
        let mut s = session();
        assert_eq!(s.choose_color(Stone::Black), Ok(Phase::HumanTurn));
        assert_eq!(s.current_turn(), Some(Stone::Black));

        let mut s = session();
        assert_eq!(s.choose_color(Stone::White), Ok(Phase::AiTurn));
        assert_eq!(s.ai_color(), Some(Stone::Black));
    }

    #[test]
    fn test_choose_empty_rejected() {
        let mut s = session();
        assert_eq!(
            s.choose_color(Stone::Empty),
            Err(GameError::InvalidSide(Stone::Empty))
        );
        assert_eq!(s.phase(), Phase::AwaitingColorChoice);
    }

    #[test]
    fn test_actions_in_wrong_phase() {
        let mut s = session();
        assert_eq!(
            s.play_human(Pos::new(7, 7)),
            Err(GameError::IllegalAction {
                action: "play a human move",
                phase: Phase::AwaitingColorChoice
            })
        );
        assert!(matches!(
            s.play_ai(),
            Err(GameError::IllegalAction { .. })
        ));

        s.choose_color(Stone::Black).unwrap();
        assert!(matches!(
            s.choose_color(Stone::White),
            Err(GameError::IllegalAction {
                phase: Phase::HumanTurn,
                ..
            })
        ));
        assert!(s.play_ai().is_err());
        assert_eq!(s.phase(), Phase::HumanTurn);
    }

    #[test]
    fn test_turns_alternate() {
        let mut s = session();
        s.choose_color(Stone::Black).unwrap();

        assert_eq!(s.play_human(Pos::new(7, 7)), Ok(Phase::AiTurn));
        let result = s.play_ai().unwrap();
        let ai_move = result.best_move.unwrap();

        assert_eq!(s.phase(), Phase::HumanTurn);
        assert_eq!(s.board().get(ai_move), Stone::White);
        assert_eq!(s.board().stone_count(), 2);
        assert_eq!(s.last_ai_result(), Some(&result));
    }

    #[test]
    fn test_ai_opens_as_black() {
        let mut s = session();
        s.choose_color(Stone::White).unwrap();

        let result = s.play_ai().unwrap();
        assert_eq!(result.best_move, Some(Pos::new(7, 7)));
        assert_eq!(result.search_type, SearchType::Opening);
        assert_eq!(s.phase(), Phase::HumanTurn);
    }

    #[test]
    fn test_occupied_cell_keeps_turn() {
        let mut s = session();
        s.choose_color(Stone::Black).unwrap();
        s.play_human(Pos::new(7, 7)).unwrap();
        let ai_move = s.play_ai().unwrap().best_move.unwrap();

        assert!(matches!(
            s.play_human(ai_move),
            Err(GameError::InvalidMove { .. })
        ));
        assert_eq!(s.phase(), Phase::HumanTurn);
    }

    #[test]
    fn test_human_wins() {
        let mut s = session();
        s.choose_color(Stone::Black).unwrap();
        for c in 0..4 {
            s.board.place_stone(Pos::new(3, c), Stone::Black);
            s.board.place_stone(Pos::new(9, c), Stone::White);
        }

        assert_eq!(
            s.play_human(Pos::new(3, 4)),
            Ok(Phase::GameOver(GameOutcome::HumanWins))
        );
        assert_eq!(s.winning_line().map(|l| l.len()), Some(5));
        assert!(s.play_ai().is_err());
    }

    #[test]
    fn test_ai_wins() {
        let mut s = session();
        s.choose_color(Stone::White).unwrap();
        for c in 0..4 {
            s.board.place_stone(Pos::new(3, c), Stone::Black);
            s.board.place_stone(Pos::new(9, c), Stone::White);
        }

        let result = s.play_ai().unwrap();
        assert_eq!(result.best_move, Some(Pos::new(3, 4)));
        assert_eq!(s.phase(), Phase::GameOver(GameOutcome::AiWins));
    }

    #[test]
    fn test_last_cell_draw() {
        let mut s = session();
        s.choose_color(Stone::White).unwrap();
        s.phase = Phase::HumanTurn;

        for idx in 0..TOTAL_CELLS - 1 {
            let pos = Pos::from_index(idx);
            let stone = if (pos.col as usize + 2 * (pos.row as usize % 2)) / 2 % 2 == 0 {
                Stone::Black
            } else {
                Stone::White
            };
            s.board.place_stone(pos, stone);
        }

        assert_eq!(
            s.play_human(Pos::new(14, 14)),
            Ok(Phase::GameOver(GameOutcome::Draw))
        );
    }

    #[test]
    fn test_restart() {
        let mut s = session();
        s.choose_color(Stone::Black).unwrap();
        s.play_human(Pos::new(7, 7)).unwrap();

        s.restart();
        assert_eq!(s.phase(), Phase::AwaitingColorChoice);
        assert!(s.board().is_board_empty());
        assert_eq!(s.human_color(), None);
        assert!(s.last_ai_result().is_none());
    }
}
