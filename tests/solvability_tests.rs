use eight_puzzle::puzzle::{count_inversions, ADJACENCY};
use eight_puzzle::{PuzzleState, Tiles, GOAL};

/// Visits every permutation of 0..=8 with Heap's algorithm.
fn for_each_permutation(mut visit: impl FnMut(&Tiles)) {
    let mut tiles: Tiles = [0, 1, 2, 3, 4, 5, 6, 7, 8];
    let mut counters = [0usize; 9];
    visit(&tiles);

    let mut i = 0;
    while i < tiles.len() {
        if counters[i] < i {
            if i % 2 == 0 {
                tiles.swap(0, i);
            } else {
                tiles.swap(counters[i], i);
            }
            visit(&tiles);
            counters[i] += 1;
            i = 0;
        } else {
            counters[i] = 0;
            i += 1;
        }
    }
}

fn naive_inversions(tiles: &Tiles) -> usize {
    let mut count = 0;
    for i in 0..tiles.len() {
        for j in i + 1..tiles.len() {
            if tiles[i] != 0 && tiles[j] != 0 && tiles[i] > tiles[j] {
                count += 1;
            }
        }
    }
    count
}

#[test]
fn solvability_matches_inversion_parity_for_all_permutations() {
    let mut total = 0;
    let mut solvable = 0;

    for_each_permutation(|tiles| {
        let state = PuzzleState::from_tiles(tiles).unwrap();
        let inversions = naive_inversions(tiles);
        assert_eq!(count_inversions(tiles), inversions);
        assert_eq!(state.is_solvable(), inversions % 2 == 0, "{:?}", tiles);
        total += 1;
        if state.is_solvable() {
            solvable += 1;
        }
    });

    assert_eq!(total, 362_880);
    assert_eq!(solvable, total / 2);
}

#[test]
fn heuristic_is_zero_only_for_goal() {
    for_each_permutation(|tiles| {
        let state = PuzzleState::from_tiles(tiles).unwrap();
        if *tiles == GOAL {
            assert_eq!(state.heuristic(), 0);
        } else {
            assert!(state.heuristic() > 0, "{:?}", tiles);
        }
    });
}

#[test]
fn blank_slides_preserve_solvability() {
    let mut checked = 0;
    for_each_permutation(|tiles| {
        let state = PuzzleState::from_tiles(tiles).unwrap();
        let blank = state.blank_position();
        for &neighbor in ADJACENCY[blank] {
            let mut child = PuzzleState::from_parent(&state);
            child.swap(neighbor, blank);
            assert_eq!(child.is_solvable(), state.is_solvable());
        }
        checked += 1;
    });
    assert_eq!(checked, 362_880);
}

#[test]
fn unsolvable_scenario() {
    let state = PuzzleState::from_tiles(&[1, 2, 3, 4, 5, 6, 8, 7, 0]).unwrap();
    assert_eq!(count_inversions(state.tiles()), 1);
    assert!(!state.is_solvable());
}
