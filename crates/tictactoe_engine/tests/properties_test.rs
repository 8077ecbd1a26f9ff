//! Exhaustive property checks over the whole game.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tictactoe_engine::rules::{LINES, check_winner, wins_through};
use tictactoe_engine::{Board, Player, Position, Square, best_move};

fn board_from_code(mut code: u32) -> Board {
    let mut cells = String::with_capacity(9);
    for _ in 0..9 {
        cells.push(match code % 3 {
            0 => '.',
            1 => 'X',
            _ => 'O',
        });
        code /= 3;
    }
    cells.parse().expect("generated board parses")
}

#[test]
fn test_win_check_matches_line_scan_on_every_board() {
    for code in 0..3u32.pow(9) {
        let board = board_from_code(code);
        for pos in Position::ALL {
            let Square::Occupied(player) = board.get(pos) else {
                continue;
            };
            let owned = |i: usize| board.squares()[i] == Square::Occupied(player);
            let expected = LINES.iter().enumerate().any(|(n, line)| {
                let diagonal = n >= 6;
                let applies = if diagonal {
                    pos.on_diagonal()
                } else {
                    line.contains(&pos.to_index())
                };
                applies && line.iter().all(|&i| owned(i))
            });
            assert_eq!(
                wins_through(&board, pos, player),
                expected,
                "board {:?} position {}",
                board.squares(),
                pos
            );
        }
    }
}

/// Walks every game reachable from the empty board.
fn walk(board: &mut Board, to_move: Player, visit: &mut dyn FnMut(&mut Board, Position, Player)) {
    for pos in board.available_moves() {
        visit(board, pos, to_move);
        board.apply_move(pos, to_move).expect("available move applies");
        if board.outcome().is_none() {
            walk(board, to_move.opponent(), visit);
        }
        board.undo_move(pos);
    }
}

#[test]
fn test_incremental_win_matches_full_scan_in_play() {
    let mut board = Board::new();
    let mut positions = 0u64;
    walk(&mut board, Player::X, &mut |board, pos, player| {
        board.apply_move(pos, player).unwrap();
        assert_eq!(board.winner(), check_winner(board));
        board.undo_move(pos);
        positions += 1;
    });
    assert_eq!(positions, 549_945);
}

#[test]
fn test_undo_is_exact_inverse() {
    let mut board = Board::new();
    walk(&mut board, Player::X, &mut |board, pos, player| {
        let before = board.clone();
        board.apply_move(pos, player).unwrap();
        board.undo_move(pos);
        assert_eq!(*board, before);
    });
}

#[test]
fn test_occupied_moves_never_mutate() {
    let mut board = Board::new();
    walk(&mut board, Player::X, &mut |board, _pos, player| {
        let before = board.clone();
        for taken in Position::ALL.into_iter().filter(|p| !before.is_empty(*p)) {
            assert!(board.apply_move(taken, player).is_err());
            assert_eq!(*board, before);
        }
    });
}

/// Plays every opponent reply against the engine and asserts no loss.
fn assert_never_loses(board: &mut Board, to_move: Player, engine: Player, rng: &mut StdRng) -> u64 {
    if let Some(outcome) = board.outcome() {
        assert!(
            !outcome.is_loss_for(engine),
            "engine {} lost on {:?}",
            engine,
            board.squares()
        );
        return 1;
    }

    let replies = if to_move == engine {
        if board.empty_count() == 9 {
            // Cover every possible random opening.
            board.available_moves()
        } else {
            let before = board.clone();
            let chosen = best_move(board, engine, rng).expect("game in progress");
            assert_eq!(*board, before);
            vec![chosen]
        }
    } else {
        board.available_moves()
    };

    let mut games = 0;
    for pos in replies {
        board.apply_move(pos, to_move).unwrap();
        games += assert_never_loses(board, to_move.opponent(), engine, rng);
        board.undo_move(pos);
    }
    games
}

#[test]
fn test_optimal_engine_never_loses_as_x() {
    let mut rng = StdRng::seed_from_u64(11);
    let games = assert_never_loses(&mut Board::new(), Player::X, Player::X, &mut rng);
    assert!(games > 0);
}

#[test]
fn test_optimal_engine_never_loses_as_o() {
    let mut rng = StdRng::seed_from_u64(12);
    let games = assert_never_loses(&mut Board::new(), Player::X, Player::O, &mut rng);
    assert!(games > 0);
}

#[test]
fn test_optimal_engine_never_loses_from_midgame() {
    // Positions that are at least drawn for the side to move.
    let mut rng = StdRng::seed_from_u64(13);
    for cells in ["X.......O", ".X..O....", "X...O...X", "....X...O", "O...X...."] {
        let mut board: Board = cells.parse().unwrap();
        let to_move = board.next_player();
        assert_never_loses(&mut board, to_move, to_move, &mut rng);
    }
}

#[test]
fn test_best_move_is_deterministic_after_opening() {
    let mut board = Board::new();
    let mut checked = 0;
    for first in Position::ALL {
        board.apply_move(first, Player::X).unwrap();
        for second in board.available_moves() {
            board.apply_move(second, Player::O).unwrap();
            let a = best_move(&mut board, Player::X, &mut StdRng::seed_from_u64(1));
            let b = best_move(&mut board, Player::X, &mut StdRng::seed_from_u64(99));
            assert_eq!(a, b);
            board.undo_move(second);
            checked += 1;
        }
        let a = best_move(&mut board, Player::O, &mut StdRng::seed_from_u64(1));
        let b = best_move(&mut board, Player::O, &mut StdRng::seed_from_u64(2));
        assert_eq!(a, b);
        board.undo_move(first);
    }
    assert_eq!(checked, 72);
}

#[test]
fn test_seeded_opening_is_reproducible() {
    let first = best_move(&mut Board::new(), Player::X, &mut StdRng::seed_from_u64(5));
    let again = best_move(&mut Board::new(), Player::X, &mut StdRng::seed_from_u64(5));
    assert_eq!(first, again);
}
