use super::*;
extern crate test;
use test::Bencher;

const INITIAL_SIZE: i32 = 1000;

#[bench]
fn bench_random_rounds(b: &mut Bencher) {
    let mut rng = rand::thread_rng();
    let mut tree: RedBlackTree<i32> = (0..INITIAL_SIZE).collect();
    b.iter(|| {
        let round_action = random_round_action(&mut rng, tree.len());
        let res = run_round(&round_action, &mut tree);
        test::black_box(res);
    });
}

#[bench]
fn bench_sequential_insert(b: &mut Bencher) {
    b.iter(|| {
        let tree: RedBlackTree<i32> = (0..INITIAL_SIZE).collect();
        test::black_box(tree.height());
    });
}

#[bench]
fn bench_search(b: &mut Bencher) {
    let tree: RedBlackTree<i32> = (0..INITIAL_SIZE).collect();
    let mut rng = rand::thread_rng();
    b.iter(|| {
        let key = rng.gen_range(0..INITIAL_SIZE);
        test::black_box(tree.search(&key).is_ok());
    });
}
