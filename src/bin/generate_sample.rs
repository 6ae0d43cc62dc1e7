use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Write a demo `data/` directory of tally files.
#[derive(Debug, Parser)]
#[command(name = "generate_sample", about = "Write sample tally files")]
struct Args {
    /// Destination directory
    #[arg(short, long, default_value = "data")]
    out: PathBuf,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

const BOSSES: [(&str, f64); 12] = [
    ("False Knight", 2.0),
    ("Hornet", 6.0),
    ("Moss Mother", 2.5),
    ("Gruz Mother", 1.5),
    ("Mantis Lords", 8.0),
    ("Soul Master", 10.0),
    ("Crystal Guardian", 3.0),
    ("Dung Defender", 5.0),
    ("Broken Vessel", 7.0),
    ("Watcher Knights", 12.0),
    ("Nosk", 4.0),
    ("The Radiance", 25.0),
];

const PLAYERS: [&str; 4] = ["alice", "bob", "cara", "dmitri"];

/// xoshiro256** seeded through an LCG; enough for reproducible demo data.
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut x = seed;
        let state = [(); 4].map(|_| {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            x
        });
        SimpleRng { state }
    }

    fn next_u64(&mut self) -> u64 {
        let [s0, s1, s2, s3] = &mut self.state;
        let result = s1.wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = *s1 << 17;
        *s2 ^= *s0;
        *s3 ^= *s1;
        *s1 ^= *s2;
        *s0 ^= *s3;
        *s2 ^= t;
        *s3 = s3.rotate_left(45);
        result
    }

    /// Normal sample via Box-Muller, drawing two uniforms in `[0, 1)`.
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let mut unit = || (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        let u1 = unit().max(1e-15);
        let u2 = unit();
        let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
        mean + std_dev * z
    }
}

/// Tally file body for one player: bosses reached so far with attempt counts.
fn player_tally(rng: &mut SimpleRng, progress: usize) -> String {
    let mut body = String::new();
    for &(boss, difficulty) in BOSSES.iter().take(progress) {
        let tries = rng.gauss(difficulty, difficulty / 2.0).round().max(1.0) as u64;
        let _ = writeln!(body, "{boss}: {tries}");
    }
    body
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating '{}'", args.out.display()))?;

    for player in PLAYERS {
        let progress = 6 + (rng.next_u64() % (BOSSES.len() as u64 - 5)) as usize;
        let path = args.out.join(format!("{player}.txt"));
        fs::write(&path, player_tally(&mut rng, progress))
            .with_context(|| format!("writing '{}'", path.display()))?;
    }

    println!(
        "Wrote {} tally files ({} bosses max each) to {}",
        PLAYERS.len(),
        BOSSES.len(),
        args.out.display()
    );
    Ok(())
}
