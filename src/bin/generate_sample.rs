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

fn main() {
    let mut rng = SimpleRng::new(42);

    // Fixture models × CD/CW variants, angle features per part.
    let bases = [
        "FVT10-CD", "FVT10-CW", "FVT20-CD", "FVT20-CW", "FVT30-CD",
    ];
    let variables = [
        ("angle_hinge", 92.0, 4.0),
        ("angle_latch", 45.0, 2.5),
        ("angle_bracket", 120.0, 6.0),
        ("angle_clip", 30.0, 1.5),
        ("angle_cover", 75.0, 3.0),
        ("angle_rail", 60.0, 2.0),
    ];

    let output_path = "limits.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record(["Base", "Variable", "LIC", "LSC", "Revision"])
        .expect("Failed to write header");

    let mut rows = 0usize;
    for base in &bases {
        for &(variable, center, half_width) in &variables {
            // Jitter the nominal window per fixture so the heatmap has texture.
            let center = rng.gauss(center, half_width * 0.1);
            let half_width = (half_width + rng.gauss(0.0, half_width * 0.15)).abs().max(0.2);

            let lic = center - half_width;
            let lsc = center + half_width;
            let revision = format!("R{}", 1 + (rng.next_u64() % 3));

            writer
                .write_record([
                    base.to_string(),
                    variable.to_string(),
                    format!("{lic:.3}"),
                    format!("{lsc:.3}"),
                    revision,
                ])
                .expect("Failed to write row");
            rows += 1;
        }
    }

    writer.flush().expect("Failed to flush output");
    println!(
        "Wrote {rows} limit rows ({} bases × {} variables) to {output_path}",
        bases.len(),
        variables.len()
    );
}
