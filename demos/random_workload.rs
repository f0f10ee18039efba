//! Drives a random insert/delete workload through a red-black tree and prints
//! its shape. Run with `cargo run --example random_workload -- [rounds]`.
//! Set `RB_TRACE=1` to see every fix-up case as it is applied.

use itertools::Itertools;
use log::{info, LevelFilter};
use rand::Rng;
use redblack::{Color, RedBlackTree, TreeError};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::time::Instant;

const KEY_RANGE: u32 = 100_000;

fn initialize_logging() {
    let level = if std::env::var_os("RB_TRACE").is_some() {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    if let Err(err) = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto) {
        eprintln!("could not install the logger: {}", err);
    }
}

fn main() {
    initialize_logging();
    let rounds: usize = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(200_000);

    let mut rng = rand::thread_rng();
    let mut tree = RedBlackTree::with_capacity(rounds);
    let (mut inserted, mut deleted, mut missed) = (0usize, 0usize, 0usize);

    let start = Instant::now();
    for _ in 0..rounds {
        let key = rng.gen_range(0..KEY_RANGE);
        if rng.gen_bool(0.6) {
            tree.insert(key);
            inserted += 1;
        } else {
            match tree.delete(&key) {
                Ok(_) => deleted += 1,
                Err(TreeError::KeyNotFound) | Err(TreeError::EmptyTree) => missed += 1,
                Err(err) => panic!("unexpected error: {}", err),
            }
        }
    }
    info!(
        "{} rounds in {:?}: {} inserts, {} deletes, {} misses",
        rounds,
        start.elapsed(),
        inserted,
        deleted,
        missed
    );

    match tree.check_invariants() {
        Ok(black_height) => info!("invariants hold, black-height {}", black_height),
        Err(violation) => panic!("{}", violation),
    }

    let n = tree.len();
    println!("keys:          {}", n);
    println!("height:        {} (bound {:.1})", tree.height(), 2.0 * ((n + 1) as f64).log2());
    println!("black-height:  {}", tree.black_height());
    let reds = tree.in_order().filter(|&(_, color)| color == Color::Red).count();
    println!("red nodes:     {}", reds);
    if let (Ok(min), Ok(max)) = (tree.minimum(), tree.maximum()) {
        println!("range:         {}..={}", min, max);
    }
    if n > 0 {
        let quartiles = (1..4).map(|q| tree.select(q * n / 4)).filter_map(Result::ok).join(", ");
        println!("quartiles:     {}", quartiles);
        let distinct = tree.keys().dedup().count();
        println!("distinct keys: {}", distinct);
    }
}
