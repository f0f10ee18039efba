#[cfg(feature = "bench")]
pub mod bench;

use rand::{self, Rng};
use redblack::{RedBlackTree, TreeError};
use std::collections::BTreeMap;

/// Something to perform in one round of tests
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RoundAction {
    Insert { key: i32 },
    Delete { key: i32 },
    PopMin,
    Select { index: usize },
    Rank { key: i32 },
}

/// The result after one round
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RoundResult {
    Empty,
    Key(i32),
    Index(usize),
    Error(TreeError),
}

/// A sorted multiset, used as the reference implementation.
#[derive(Clone, Default, Debug)]
pub struct Reference {
    counts: BTreeMap<i32, usize>,
    len: usize,
}

impl Reference {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn contains(&self, key: i32) -> bool {
        self.counts.contains_key(&key)
    }

    pub fn insert(&mut self, key: i32) {
        *self.counts.entry(key).or_insert(0) += 1;
        self.len += 1;
    }

    pub fn remove(&mut self, key: i32) -> bool {
        match self.counts.get_mut(&key) {
            None => false,
            Some(count) => {
                *count -= 1;
                if *count == 0 {
                    self.counts.remove(&key);
                }
                self.len -= 1;
                true
            }
        }
    }

    /// All of the keys, with repetition, in ascending order.
    pub fn sorted(&self) -> Vec<i32> {
        self.counts
            .iter()
            .flat_map(|(&key, &count)| std::iter::repeat(key).take(count))
            .collect()
    }

    /// Performs the action the way the tree should, and returns the expected result.
    pub fn run(&mut self, action: &RoundAction) -> RoundResult {
        use RoundAction::*;
        use RoundResult::*;
        match *action {
            Insert { key } => {
                self.insert(key);
                Empty
            }
            Delete { .. } if self.len == 0 => Error(TreeError::EmptyTree),
            Delete { key } => {
                if self.remove(key) {
                    Key(key)
                } else {
                    Error(TreeError::KeyNotFound)
                }
            }
            PopMin => match self.counts.keys().next().cloned() {
                None => Error(TreeError::EmptyTree),
                Some(key) => {
                    self.remove(key);
                    Key(key)
                }
            },
            Select { index } => match self.sorted().get(index) {
                None => Error(TreeError::IndexOutOfBounds {
                    index,
                    len: self.len,
                }),
                Some(&key) => Key(key),
            },
            Rank { key } => Index(self.counts.range(..key).map(|(_, &count)| count).sum()),
        }
    }
}

pub fn run_round(action: &RoundAction, tree: &mut RedBlackTree<i32>) -> RoundResult {
    use RoundAction::*;
    use RoundResult::*;
    let res = match *action {
        Insert { key } => {
            tree.insert(key);
            Ok(Empty)
        }
        Delete { key } => tree.delete(&key).map(Key),
        PopMin => tree.pop_min().map(Key),
        Select { index } => tree.select(index).map(|&key| Key(key)),
        Rank { key } => Ok(Index(tree.rank(&key))),
    };
    res.unwrap_or_else(Error)
}

pub const KEY_RANGE: i32 = 300;

pub fn random_round_action(rng: &mut rand::prelude::ThreadRng, len: usize) -> RoundAction {
    use RoundAction::*;
    match rng.gen_range(0..10) {
        // inserts are weighted so that the tree grows on average
        0..=3 => Insert {
            key: rng.gen_range(-KEY_RANGE..KEY_RANGE),
        },
        4..=6 => Delete {
            key: rng.gen_range(-KEY_RANGE..KEY_RANGE),
        },
        7 => PopMin,
        8 => Select {
            index: rng.gen_range(0..=len),
        },
        9 => Rank {
            key: rng.gen_range(-KEY_RANGE..KEY_RANGE),
        },
        _ => {
            panic!()
        }
    }
}

/// Checks that the tree and the reference agree on everything observable.
/// This takes `O(n)` time.
pub fn assert_same_contents(tree: &RedBlackTree<i32>, reference: &Reference) {
    assert_eq!(tree.len(), reference.len());
    assert_eq!(tree.keys().cloned().collect::<Vec<_>>(), reference.sorted());
    tree.assert_correctness();
}

/// Applies random rounds to both a tree and a reference multiset,
/// and checks that they agree after every round.
pub fn check_consistency(num_rounds: u32) {
    let mut rng = rand::thread_rng();
    let mut tree: RedBlackTree<i32> = RedBlackTree::new();
    let mut reference = Reference::default();

    for _ in 0..num_rounds {
        let round_action = random_round_action(&mut rng, reference.len());
        let res1 = run_round(&round_action, &mut tree);
        let res2 = reference.run(&round_action);
        assert_eq!(res1, res2, "after {:?}", round_action);
        assert_eq!(tree.len(), reference.len());
        // The full check takes `O(n)` time. The tree stays in the hundreds of nodes,
        // so checking every round is still quick.
        tree.assert_correctness();
    }
    assert_same_contents(&tree, &reference);
}

/// Deletes every key of `0..len` one at a time, from a fresh tree each time,
/// and checks the result. Covers deleting at every position of the tree's shape.
pub fn check_delete(len: i32) {
    let arr: Vec<_> = (0..len).collect();
    for i in 0..arr.len() {
        let mut tree: RedBlackTree<i32> = arr.iter().cloned().collect();
        assert_eq!(tree.delete(&arr[i]), Ok(arr[i]));
        tree.assert_correctness();
        assert_eq!(
            tree.into_iter().collect::<Vec<_>>(),
            arr[..i]
                .iter()
                .chain(arr[i + 1..].iter())
                .cloned()
                .collect::<Vec<_>>()
        );
    }
}
