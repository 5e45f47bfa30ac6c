//! Writes a synthetic inspection export with the upstream header layout,
//! for running the explorer offline:
//!
//! ```text
//! cargo run --bin generate_sample -- sample_inspections.csv
//! cargo run -- sample_inspections.csv
//! ```

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

const HEADER: [&str; 12] = [
    "CAMIS",
    "DBA",
    "BORO",
    "BUILDING",
    "STREET",
    "ZIPCODE",
    "CUISINE DESCRIPTION",
    "INSPECTION DATE",
    "VIOLATION DESCRIPTION",
    "CRITICAL FLAG",
    "SCORE",
    "GRADE",
];

const NAME_PARTS: [&str; 10] = [
    "JOE'S", "GOLDEN", "LUCKY", "BROADWAY", "LITTLE", "EMPIRE", "SUNSET", "CORNER", "ROYAL",
    "1ST AVE",
];

const VENUES: [&str; 6] = ["PIZZA", "DELI", "KITCHEN", "CAFE", "GRILL", "NOODLE HOUSE"];

const CUISINES: [&str; 8] = [
    "Pizza", "Italian", "Chinese", "Thai", "American", "Mexican", "Coffee/Tea", "Bakery Products/Desserts",
];

const LOCATIONS: [(&str, &str); 5] = [
    ("Manhattan", "10001"),
    ("Brooklyn", "11201"),
    ("Queens", "11101"),
    ("Bronx", "10451"),
    ("Staten Island", "10301"),
];

const VIOLATIONS: [(&str, &str); 5] = [
    ("Evidence of mice or live mice present in facility's food and/or non-food areas.", "Critical"),
    ("Cold TCS food item held above 41 °F.", "Critical"),
    ("Non-food contact surface improperly constructed. Unacceptable material used.", "Not Critical"),
    ("Plumbing not properly installed or maintained; anti-siphonage device missing.", "Not Critical"),
    ("Food contact surface not properly washed, rinsed and sanitized after each use.", "Critical"),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn grade_for(score: i64) -> &'static str {
    match score {
        0..=13 => "A",
        14..=27 => "B",
        _ => "C",
    }
}

fn main() -> Result<()> {
    let output_path = std::env::args().nth(1).unwrap_or_else(|| "sample_inspections.csv".into());
    let mut rng = SimpleRng::new(42);
    let first_day = NaiveDate::from_ymd_opt(2021, 1, 1).context("invalid start date")?;

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(HEADER)?;

    let mut rows = 0usize;
    for camis in 0..200u32 {
        let name = format!("{} {}", rng.pick(&NAME_PARTS), rng.pick(&VENUES));
        let cuisine = *rng.pick(&CUISINES);
        let (boro, zip) = *rng.pick(&LOCATIONS);
        let building = (1 + rng.below(900)).to_string();

        for _ in 0..(2 + rng.below(8)) {
            let date = first_day + Duration::days(rng.below(4 * 365) as i64);
            let score = rng.gauss(12.0, 9.0).round().max(0.0) as i64;
            let (violation, flag) = *rng.pick(&VIOLATIONS);

            // Roughly one in six inspections is still ungraded upstream.
            let grade = if rng.below(6) == 0 { "" } else { grade_for(score) };

            let id = (40_000_000 + camis).to_string();
            let date = date.format("%m/%d/%Y").to_string();
            let score = score.to_string();
            writer.write_record([
                id.as_str(),
                name.as_str(),
                boro,
                building.as_str(),
                "BROADWAY",
                zip,
                cuisine,
                date.as_str(),
                violation,
                flag,
                score.as_str(),
                grade,
            ])?;
            rows += 1;
        }
    }
    writer.flush().with_context(|| format!("writing {output_path}"))?;

    println!("Wrote {rows} inspection rows to {output_path}");
    Ok(())
}
