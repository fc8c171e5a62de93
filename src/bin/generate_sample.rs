use serde::Serialize;

// ---------------------------------------------------------------------------
// Demo data: a year of weekly revenue/units per region and product
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SampleRow {
    week: i64,
    region: &'static str,
    product: &'static str,
    revenue: f64,
    units: i64,
}

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn seasonality(week: i64) -> f64 {
    1.0 + 0.25 * ((week as f64 / 52.0) * 2.0 * std::f64::consts::PI).sin()
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let regions: [(&str, f64); 4] = [
        ("North", 120.0),
        ("South", 95.0),
        ("East", 140.0),
        ("West", 80.0),
    ];
    let products: [(&str, f64); 3] = [("Basic", 1.0), ("Plus", 1.6), ("Premium", 2.4)];

    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    let mut n_rows = 0usize;
    for week in 1..=52i64 {
        for &(region, base) in &regions {
            for &(product, factor) in &products {
                let expected = base * factor * seasonality(week);
                let revenue = (rng.gauss(expected, expected * 0.08)).max(0.0);
                let units = (revenue / (3.5 * factor)).round().max(0.0) as i64;

                writer
                    .serialize(SampleRow {
                        week,
                        region,
                        product,
                        revenue: (revenue * 100.0).round() / 100.0,
                        units,
                    })
                    .expect("Failed to write CSV record");
                n_rows += 1;
            }
        }
    }

    writer.flush().expect("Failed to flush CSV writer");
    println!("Wrote {n_rows} rows to {output_path}");
}
