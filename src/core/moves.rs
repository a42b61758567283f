//! Move engine - applies one player move to a board/piece state
//!
//! `process_move` is a pure state transition: it takes the live state by
//! value (board, current piece, next piece, hold slot, hold availability),
//! applies exactly one move, and returns the full next state plus outcome
//! flags. Nothing here touches the session score or level - line clearing,
//! scoring, leveling, and game-over detection run in the session layer after
//! every placement-producing move.
//!
//! Illegal moves (blocked shift, blocked rotation, hold already used) are
//! reported as unsuccessful outcomes with the state unchanged; they are not
//! errors.

use crate::core::board::Board;
use crate::core::pieces::Piece;
use crate::core::rng::PieceRng;
use crate::types::MoveKind;

/// Offsets tried in order when a rotation is blocked in place:
/// one column left, one column right, one row up, one row down.
const WALL_KICKS: [(i16, i16); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Hold sub-behavior flags, both false by default.
///
/// With a piece already held, `skip_store` leaves the hold slot untouched by
/// the swap and `clear_hold` combined with it empties the slot. With
/// `skip_store` false the two flags collapse to the same plain swap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoldBehavior {
    pub clear_hold: bool,
    pub skip_store: bool,
}

/// Why a move was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveFailure {
    LeftBlocked,
    RightBlocked,
    RotationBlocked,
    HoldUnavailable,
}

impl MoveFailure {
    pub fn message(self) -> &'static str {
        match self {
            MoveFailure::LeftBlocked => "cannot move left",
            MoveFailure::RightBlocked => "cannot move right",
            MoveFailure::RotationBlocked => "cannot rotate",
            MoveFailure::HoldUnavailable => "hold already used",
        }
    }
}

/// Full next state plus outcome flags for one processed move
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOutcome {
    pub board: Board,
    pub current: Piece,
    pub next: Piece,
    pub held: Option<Piece>,
    pub can_hold: bool,
    /// The move locked a piece onto the board; the caller runs the
    /// line-clear/score/level/game-over pipeline next.
    pub placed: bool,
    pub failure: Option<MoveFailure>,
    pub message: &'static str,
}

impl MoveOutcome {
    pub fn success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Apply one move to the live state.
///
/// The board and pieces are taken by value and returned in the outcome, so
/// no state visible to other callers is ever aliased mid-move. `rng` is the
/// session's piece generator, consulted whenever the next-piece queue
/// advances (placement, or hold with an empty slot).
#[allow(clippy::too_many_arguments)]
pub fn process_move(
    mut board: Board,
    mut current: Piece,
    kind: MoveKind,
    mut next: Piece,
    mut held: Option<Piece>,
    mut can_hold: bool,
    hold: HoldBehavior,
    rng: &mut PieceRng,
) -> MoveOutcome {
    let width = board.width();
    let mut placed = false;
    let mut failure = None;
    let mut message = "moved";

    match kind {
        MoveKind::Left => {
            if current.collides(&board, 0, -1) {
                failure = Some(MoveFailure::LeftBlocked);
            } else {
                current.col -= 1;
            }
        }

        MoveKind::Right => {
            if current.collides(&board, 0, 1) {
                failure = Some(MoveFailure::RightBlocked);
            } else {
                current.col += 1;
            }
        }

        MoveKind::Down => {
            if current.collides(&board, 1, 0) {
                // Blocked below: lock the piece and promote the queue.
                board.merge_piece(&current);
                current = next;
                next = Piece::spawn(rng.piece(), width);
                can_hold = true;
                placed = true;
                message = "piece landed";
            } else {
                current.row += 1;
            }
        }

        MoveKind::Rotate => {
            let rotated = current.rotated_cw();
            if !rotated.collides(&board, 0, 0) {
                current = rotated;
            } else {
                // Wall kicks are checked against the rotated shape only.
                match WALL_KICKS
                    .iter()
                    .find(|&&(dr, dc)| !rotated.collides(&board, dr, dc))
                {
                    Some(&(dr, dc)) => {
                        current = rotated;
                        current.row += dr;
                        current.col += dc;
                    }
                    None => failure = Some(MoveFailure::RotationBlocked),
                }
            }
        }

        MoveKind::Drop | MoveKind::HardDrop => {
            current.row = current.drop_row(&board);
            board.merge_piece(&current);
            current = next;
            next = Piece::spawn(rng.piece(), width);
            can_hold = true;
            placed = true;
            message = "piece landed";
        }

        MoveKind::Hold => {
            if !can_hold {
                failure = Some(MoveFailure::HoldUnavailable);
            } else {
                match held {
                    Some(stored) => {
                        let outgoing = current;
                        current = stored;
                        current.move_to_spawn(width);
                        held = match (hold.clear_hold, hold.skip_store) {
                            // Plain swap: the outgoing piece takes the slot.
                            (_, false) => {
                                let mut incoming = outgoing;
                                incoming.move_to_spawn(width);
                                Some(incoming)
                            }
                            // Slot untouched by the swap.
                            (false, true) => Some(stored),
                            // Slot emptied.
                            (true, true) => None,
                        };
                    }
                    None => {
                        let outgoing = current;
                        current = next;
                        current.move_to_spawn(width);
                        next = Piece::spawn(rng.piece(), width);
                        if !hold.skip_store {
                            let mut incoming = outgoing;
                            incoming.move_to_spawn(width);
                            held = Some(incoming);
                        }
                    }
                }
                can_hold = false;
                message = "piece held";
            }
        }
    }

    if let Some(failure) = failure {
        message = failure.message();
    }

    MoveOutcome {
        board,
        current,
        next,
        held,
        can_hold,
        placed,
        failure,
        message,
    }
}

/// True when a freshly promoted piece already collides at its spawn anchor:
/// no legal placement exists and the game is over.
pub fn spawn_blocked(board: &Board, piece: &Piece) -> bool {
    piece.collides(board, 0, 0)
}
