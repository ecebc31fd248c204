use clap::Parser;
use clap::ValueEnum;
use intmap::IntMap;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Pattern {
    /// 1, 2, 3, ...
    Sequential,
    /// Multiples of `--stride`.
    Strided,
    /// Uniformly random non-zero u64 keys.
    Random,
}

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "target_capacity", default_value_t = 1000)]
    target_capacity: usize,

    /// Number of keys to insert; defaults to the target capacity.
    #[arg(short = 'n', long = "keys")]
    keys: Option<usize>,

    #[arg(short = 'p', long = "pattern", value_enum, default_value_t = Pattern::Sequential)]
    pattern: Pattern,

    #[arg(long = "stride", default_value_t = 4096)]
    stride: u64,

    #[arg(long = "seed", default_value_t = 0)]
    seed: u64,
}

fn main() {
    let args = Args::parse();

    println!(
        "Creating IntMap with target capacity: {}",
        args.target_capacity
    );

    let mut map: IntMap<u64, u64> = IntMap::with_capacity(args.target_capacity);
    let initial_capacity = map.capacity();
    println!("Actual capacity: {initial_capacity}");

    let num_keys = args.keys.unwrap_or(args.target_capacity);
    println!("Filling map with {num_keys} {:?} keys...", args.pattern);

    let mut rng = SmallRng::seed_from_u64(args.seed);
    for i in 1..=num_keys as u64 {
        let key = match args.pattern {
            Pattern::Sequential => i,
            Pattern::Strided => i.wrapping_mul(args.stride),
            Pattern::Random => rng.random_range(1..=u64::MAX),
        };
        map.insert(key, i);
    }

    println!("Inserted {} keys", map.len());
    if map.capacity() != initial_capacity {
        println!(
            "Map grew from {} to {} slots",
            initial_capacity,
            map.capacity()
        );
    }

    println!("Probe distance histogram:");
    for (distance, count) in map.probe_histogram().iter().enumerate() {
        if *count > 0 {
            println!("  {distance:>4}: {count}");
        }
    }
    map.debug_stats().print();
}
