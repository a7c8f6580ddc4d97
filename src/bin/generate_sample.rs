//! Writes `sample_data.csv`: a small table with duplicate rows, missing
//! numbers and a text column, for trying out the viewer's cleaning tools.

use anyhow::{Context, Result};

const CITIES: [&str; 4] = ["Lisbon", "Oslo", "Quito", "Nairobi"];

fn main() -> Result<()> {
    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer.write_record(["id", "city", "age", "income", "score", "member"])?;

    let mut rows = 0;
    for id in 0..40u32 {
        let city = CITIES[(id as usize * 7) % CITIES.len()];
        let age = 20 + (id * 13) % 45;
        let income = 25_000.0 + f64::from((id * 7919) % 50_000);
        let score = f64::from((id * 37) % 100) / 10.0;

        // Every 6th age, every 9th income and every 11th city are missing.
        let age = if id % 6 == 5 { String::new() } else { age.to_string() };
        let income = if id % 9 == 4 { "NA".to_string() } else { format!("{income:.2}") };
        let city = if id % 11 == 10 { "" } else { city };
        let member = if id % 2 == 0 { "true" } else { "false" };

        let record = [id.to_string(), city.to_string(), age, income, format!("{score:.1}"), member.to_string()];
        writer.write_record(&record)?;
        rows += 1;

        // Repeat every 8th row verbatim.
        if id % 8 == 0 {
            writer.write_record(&record)?;
            rows += 1;
        }
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {rows} rows to {output_path}");
    Ok(())
}
