use rand::seq::SliceRandom;
use rand::Rng;

use crate::{CellState, GameState, IllegalMove, SelfCheckFailed};

impl GameState {
    /// Checks that `next` is reachable from `self` by one move of the `You` player.
    ///
    /// The head must step onto a `Clear` neighbour and leave a `YourWall`
    /// behind. Nothing else on the board may change.
    pub fn validate_move(&self, next: &GameState) -> Result<(), IllegalMove> {
        let (old, new) = (self.you(), next.you());

        let found = self.get(new);
        if found != CellState::Clear {
            return Err(IllegalMove::NewHeadNotClear { pos: new, found });
        }

        let found = next.get(old);
        if found != CellState::YourWall {
            return Err(IllegalMove::OldHeadNotWall { pos: old, found });
        }

        if !self.neighbours_clear(old).contains(&new) {
            return Err(IllegalMove::Unreachable {
                from: old,
                to: new,
            });
        }

        let diff = self.difference(next);
        if diff.len() > 2 {
            return Err(IllegalMove::TooManyChanges { count: diff.len() });
        }

        for (pos, (before, after)) in diff {
            let allowed = match (before, after) {
                (CellState::Clear, CellState::You) => pos == new,
                (CellState::You, CellState::YourWall) => pos == old,
                _ => false,
            };
            if !allowed {
                return Err(IllegalMove::InvalidChange { pos, before, after });
            }
        }
        Ok(())
    }
}

/// Sanity checks on a single game state, for bot authors validating their
/// own output: serialization is lossless, flipping twice is the identity, and
/// a random step of the `You` head is accepted by the validator.
pub fn self_check<R: Rng>(state: &GameState, rng: &mut R) -> Result<(), SelfCheckFailed> {
    let parsed =
        GameState::parse(state.grid(), &state.serialize()).map_err(SelfCheckFailed::RoundTrip)?;
    let changed = state.difference(&parsed).len();
    if changed != 0 {
        return Err(SelfCheckFailed::RoundTripChanged { num_cells: changed });
    }

    if state.flip().flip() != *state {
        return Err(SelfCheckFailed::FlipNotInvolution);
    }

    if let Some(&to) = state.neighbours_clear(state.you()).choose(rng) {
        state
            .validate_move(&state.move_to(to))
            .map_err(SelfCheckFailed::Move)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::arbitrary::ArbitraryState;
    use crate::{Grid, Pole, Position};

    fn with_cells(state: &GameState, changes: &[(Position, CellState)]) -> GameState {
        let grid = state.grid();
        let mut cells = state.cells().to_vec();
        for &(pos, cell_state) in changes {
            cells[grid.index(pos)] = cell_state;
        }
        GameState::from_cells(grid, cells).unwrap()
    }

    fn start() -> GameState {
        GameState::random_start(Grid::new(8, 6), &mut StdRng::seed_from_u64(11))
    }

    #[test]
    fn unchanged_head_is_illegal() {
        let state = start();
        assert_eq!(
            state.validate_move(&state),
            Err(IllegalMove::NewHeadNotClear {
                pos: state.you(),
                found: CellState::You
            })
        );
    }

    #[test]
    fn old_head_must_become_a_wall() {
        let state = start();
        let to = state.neighbours_clear(state.you())[0];
        let next = with_cells(
            &state,
            &[(state.you(), CellState::Clear), (to, CellState::You)],
        );
        assert_eq!(
            state.validate_move(&next),
            Err(IllegalMove::OldHeadNotWall {
                pos: state.you(),
                found: CellState::Clear
            })
        );
    }

    #[test]
    fn jumping_is_illegal() {
        let state = start();
        let grid = state.grid();
        let (x, y) = grid.coords(state.you());
        let far = grid.normalize(x + 2, y);
        let next = state.move_to(far);
        assert_eq!(
            state.validate_move(&next),
            Err(IllegalMove::Unreachable {
                from: state.you(),
                to: far
            })
        );
    }

    #[test]
    fn extra_wall_is_illegal() {
        let state = start();
        let to = state.neighbours_clear(state.you())[0];
        let extra = state
            .iter()
            .find(|&(p, s)| s == CellState::Clear && p != to)
            .map(|(p, _)| p)
            .unwrap();
        let next = with_cells(&state.move_to(to), &[(extra, CellState::YourWall)]);
        assert_eq!(
            state.validate_move(&next),
            Err(IllegalMove::TooManyChanges { count: 3 })
        );
    }

    #[test]
    fn moving_from_and_onto_a_pole() {
        let grid = Grid::new(5, 4);
        let mut cells = vec![CellState::Clear; grid.num_cells()];
        cells[grid.index(Position::Pole(Pole::Top))] = CellState::You;
        cells[grid.index(grid.normalize(2, 2))] = CellState::Opponent;
        let state = GameState::from_cells(grid, cells).unwrap();

        // A pole reaches every cell of the adjacent row
        for x in 0..5 {
            let next = state.move_to(grid.normalize(x, 1));
            assert_eq!(state.validate_move(&next), Ok(()));
        }
        assert!(state.validate_move(&state.move_to(grid.normalize(0, 2))).is_err());

        // Any column of the adjacent row reaches the pole
        let on_ring = state.move_to(grid.normalize(3, 1));
        let to_bottom = grid.normalize(3, 2);
        let stepped = on_ring.move_to(to_bottom);
        assert_eq!(on_ring.validate_move(&stepped), Ok(()));
        let onto_pole = stepped.move_to(Position::Pole(Pole::Bottom));
        assert_eq!(stepped.validate_move(&onto_pole), Ok(()));
    }

    #[test]
    fn self_check_accepts_a_start_position() {
        let mut rng = StdRng::seed_from_u64(5);
        let state = GameState::random_start(Grid::STANDARD, &mut rng);
        assert_eq!(self_check(&state, &mut rng), Ok(()));
    }

    quickcheck! {
        fn every_clear_neighbour_is_a_legal_move(input: ArbitraryState) -> bool {
            let state = input.0;
            state
                .neighbours_clear(state.you())
                .into_iter()
                .all(|to| state.validate_move(&state.move_to(to)).is_ok())
        }

        fn touching_a_third_cell_is_illegal(input: ArbitraryState, pick: usize, label: u8) -> bool {
            let state = input.0;
            let Some(&to) = state.neighbours_clear(state.you()).first() else {
                return true;
            };
            let next = state.move_to(to);
            let others: Vec<Position> = next
                .iter()
                .filter(|&(p, s)| {
                    p != to && p != state.you() && s != CellState::You && s != CellState::Opponent
                })
                .map(|(p, _)| p)
                .collect();
            if others.is_empty() {
                return true;
            }
            let third = others[pick % others.len()];
            let replacement = [CellState::Clear, CellState::OpponentWall, CellState::YourWall]
                .into_iter()
                .filter(|&s| s != next.get(third))
                .nth(label as usize % 2)
                .unwrap();
            let tampered = with_cells(&next, &[(third, replacement)]);
            state.validate_move(&tampered).is_err()
        }

        fn claiming_the_wrong_cell_is_illegal(input: ArbitraryState, pick: usize) -> bool {
            let state = input.0;
            let reachable = state.neighbours_clear(state.you());
            let elsewhere: Vec<Position> = state
                .iter()
                .filter(|&(p, s)| s == CellState::Clear && !reachable.contains(&p))
                .map(|(p, _)| p)
                .collect();
            if elsewhere.is_empty() {
                return true;
            }
            let to = elsewhere[pick % elsewhere.len()];
            matches!(
                state.validate_move(&state.move_to(to)),
                Err(IllegalMove::Unreachable { .. })
            )
        }

        fn self_check_passes(input: ArbitraryState, seed: u64) -> bool {
            self_check(&input.0, &mut StdRng::seed_from_u64(seed)).is_ok()
        }
    }
}
