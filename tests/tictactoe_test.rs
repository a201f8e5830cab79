//! Tic-tac-toe rules through the public API.

use gamehub::games::tictactoe::game::LINES;
use gamehub::games::tictactoe::{evaluate, Cell, GameResult, InvalidMove, Phase, Player, TicTacToe};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn play(moves: &[usize]) -> TicTacToe {
    let mut game = TicTacToe::new().start();
    for &index in moves {
        game = game.apply_move(index, game.turn()).unwrap();
    }
    game
}

#[test]
fn top_row_wins_for_x() {
    let game = play(&[0, 4, 1, 3, 2]);
    assert_eq!(game.phase(), Phase::Won(Player::X));
    assert_eq!(evaluate(game.board()), GameResult::Win(Player::X));
    assert_eq!(game.board().to_string(), "XXX\nOO_\n___");
}

#[test]
fn full_board_without_line_is_a_tie() {
    let game = play(&[0, 1, 2, 4, 3, 5, 7, 6, 8]);
    assert_eq!(game.phase(), Phase::Tie);
    assert!(game.board().is_full());
}

#[test]
fn finished_game_rejects_moves() {
    let game = play(&[0, 4, 1, 3, 2]);
    assert_eq!(game.apply_move(8, game.turn()), Err(InvalidMove::GameOver));
}

#[test]
fn move_before_start_is_rejected() {
    let game = TicTacToe::new();
    assert_eq!(game.apply_move(0, Player::X), Err(InvalidMove::NotStarted));
}

#[test]
fn rejected_moves_leave_state_untouched() {
    let game = play(&[4]);
    assert_eq!(
        game.apply_move(4, Player::O),
        Err(InvalidMove::Occupied { index: 4 })
    );
    assert_eq!(
        game.apply_move(0, Player::X),
        Err(InvalidMove::WrongTurn {
            expected: Player::O,
            attempted: Player::X
        })
    );
    assert_eq!(
        game.apply_move(9, Player::O),
        Err(InvalidMove::OutOfBounds { index: 9 })
    );
    assert_eq!(game, play(&[4]));
}

#[test]
fn turns_alternate_in_random_games() {
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut order: Vec<usize> = (0..9).collect();
        order.shuffle(&mut rng);

        let mut game = TicTacToe::new().start();
        let mut expected = Player::X;
        for index in order {
            if game.phase().is_terminal() {
                break;
            }
            assert_eq!(game.turn(), expected, "seed {seed}");
            game = game.apply_move(index, expected).unwrap();
            expected = expected.opponent();
        }
        assert!(game.phase().is_terminal(), "seed {seed}");

        let cells = game.board().cells();
        match evaluate(game.board()) {
            GameResult::Win(winner) => assert!(
                LINES
                    .iter()
                    .any(|line| line.iter().all(|&i| cells[i] == Cell::Marked(winner))),
                "seed {seed}: no completed line for {winner}"
            ),
            GameResult::Tie => assert!(game.board().is_full(), "seed {seed}"),
            GameResult::InProgress => panic!("seed {seed}: terminal phase but game in progress"),
        }

        let marks = game.board().cells().iter().filter_map(|c| c.mark());
        let (xs, os): (Vec<_>, Vec<_>) = marks.partition(|p| *p == Player::X);
        assert!(xs.len() == os.len() || xs.len() == os.len() + 1, "seed {seed}");
    }
}

#[test]
fn clock_runs_only_while_in_progress() {
    let game = TicTacToe::new().tick();
    assert_eq!(game.elapsed(), 0);

    let game = game.start().tick().tick();
    assert_eq!(game.elapsed(), 2);

    let won = [0, 4, 1, 3, 2]
        .into_iter()
        .fold(game, |g, i| g.apply_move(i, g.turn()).unwrap());
    assert_eq!(won.tick().elapsed(), 2);
}

#[test]
fn reset_returns_to_not_started() {
    let game = play(&[0, 4, 1]).tick().reset();
    assert_eq!(game, TicTacToe::new());
    assert_eq!(game.phase(), Phase::NotStarted);
    assert_eq!(game.turn(), Player::X);
    assert_eq!(game.elapsed(), 0);
}
