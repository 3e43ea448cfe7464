use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

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

    /// Uniform value in `[lo, hi)`.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

const HEADERS: [&str; 9] = [
    "Ano",
    "Meses",
    "Grupo",
    "Produto",
    "Descricao",
    "PRENSA",
    "Produção Máxima",
    "Produção Mínima",
    "Produção Média",
];

/// (group, product code, description, nominal output per month)
const PRODUCTS: [(&str, &str, &str, f64); 6] = [
    ("Tampas", "1001", "Tampa Rosca 28mm", 12_000.0),
    ("Tampas", "1002", "Tampa Flip Top 38mm", 9_500.0),
    ("Baldes", "2001", "Balde 20L Branco", 1_800.0),
    ("Baldes", "2002", "Balde 10L Azul", 2_400.0),
    ("Potes", "3001", "Pote 500ml Transparente", 6_000.0),
    ("Potes", "3002", "Pote 1L Transparente", 4_200.0),
];

const PRESSES: [u32; 4] = [1, 2, 3, 4];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, name) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }

    let mut row: u32 = 1;
    for year in [2023u32, 2024] {
        for month in 1..=12u32 {
            for &(group, code, description, nominal) in &PRODUCTS {
                for &press in &PRESSES {
                    // Not every press runs every product every month.
                    if rng.next_f64() < 0.5 {
                        continue;
                    }
                    let max = (nominal * rng.range(0.8, 1.2)).round();
                    let min = (max * rng.range(0.4, 0.7)).round();
                    let avg = ((max + min) / 2.0).round();

                    sheet.write_number(row, 0, year)?;
                    sheet.write_number(row, 1, month)?;
                    sheet.write_string(row, 2, group)?;
                    sheet.write_string(row, 3, code)?;
                    sheet.write_string(row, 4, description)?;
                    sheet.write_number(row, 5, press)?;
                    sheet.write_number(row, 6, max)?;
                    sheet.write_number(row, 7, min)?;
                    sheet.write_number(row, 8, avg)?;
                    row += 1;
                }
            }
        }
    }

    let output_path = "sample_producao.xlsx";
    workbook
        .save(output_path)
        .with_context(|| format!("writing {output_path}"))?;

    println!("Wrote {} production records to {output_path}", row - 1);
    Ok(())
}
