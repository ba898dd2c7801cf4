use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

const HEADER: [&str; 13] = [
    "Volcano Number",
    "Volcano Name",
    "Country",
    "Primary Volcano Type",
    "Activity Evidence",
    "Last Known Eruption",
    "Region",
    "Subregion",
    "Latitude",
    "Longitude",
    "Elevation (m)",
    "Dominant Rock Type",
    "Tectonic Setting",
];

/// (country, centre latitude, centre longitude, spread in degrees)
const COUNTRIES: &[(&str, f64, f64, f64)] = &[
    ("Japan", 36.0, 138.0, 6.0),
    ("Indonesia", -5.0, 115.0, 8.0),
    ("United States", 46.0, -121.0, 5.0),
    ("Chile", -30.0, -70.0, 10.0),
    ("Italy", 40.5, 14.5, 2.5),
    ("Iceland", 64.5, -19.0, 1.5),
    ("México", 19.0, -99.0, 3.0),
];

/// Raw type strings as they appear in the source data, annotations included.
const TYPES: &[&str] = &[
    "Stratovolcano",
    "Stratovolcano(es)",
    "Shield",
    "Shield(s)",
    "Caldera",
    "Caldera(s)",
    "Lava dome(s)",
    "Volcanic field",
    "Complex",
    "Pyroclastic cone(s)",
    "Fissure vent(s)",
    "Maar(s)",
    "Submarine ?",
    "Tuff cone(s)",
];

const EVIDENCE: &[&str] = &[
    "Eruption Observed",
    "Eruption Dated",
    "Evidence Credible",
    "Evidence Uncertain",
    "Unrest / Holocene",
    "Historical",
    "Active",
];

const NAME_ROOTS: &[&str] = &[
    "Fuji", "Aso", "Kiri", "Taal", "Sakura", "Lassen", "Villa", "Cerro", "Monte", "Hekla",
    "Popo", "Mera", "Kelu", "Ruang", "Ojos",
];
const NAME_SUFFIXES: &[&str] = &["san", "yama", "dake", " Peak", " Grande", "jima", "tepetl", ""];

fn pick<'a>(rng: &mut StdRng, items: &'a [&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

fn main() -> Result<()> {
    let out = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("volcanoes.csv"));

    let mut rng = StdRng::seed_from_u64(42);
    let n_volcanoes = 600;

    let mut body = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut body);
        writer.write_record(HEADER).context("writing header")?;

        for i in 0..n_volcanoes {
            let &(country, lat0, lon0, spread) = COUNTRIES
                .choose(&mut rng)
                .context("country table is empty")?;
            let name = format!("{}{}", pick(&mut rng, NAME_ROOTS), pick(&mut rng, NAME_SUFFIXES));
            let kind = pick(&mut rng, TYPES);
            let evidence = pick(&mut rng, EVIDENCE);

            // About one row in twenty has no usable elevation.
            let elevation = if rng.random_bool(0.05) {
                "Unknown".to_string()
            } else if kind.starts_with("Submarine") {
                format!("{}", -rng.random_range(50..3000))
            } else {
                format!("{}", rng.random_range(100..6000))
            };
            let lat = lat0 + rng.random_range(-spread..spread);
            let lon = lon0 + rng.random_range(-spread..spread);

            writer
                .write_record([
                    (200_000 + i).to_string(),
                    name,
                    country.to_string(),
                    kind.to_string(),
                    evidence.to_string(),
                    String::new(),
                    String::new(),
                    String::new(),
                    format!("{lat:.3}"),
                    format!("{lon:.3}"),
                    elevation,
                    String::new(),
                    String::new(),
                ])
                .with_context(|| format!("writing row {i}"))?;
        }
        writer.flush().context("flushing CSV")?;
    }

    let mut contents = b"Volcano List\n".to_vec();
    contents.extend_from_slice(&body);
    std::fs::write(&out, contents).with_context(|| format!("writing {}", out.display()))?;

    println!("Wrote {n_volcanoes} synthetic volcanoes to {}", out.display());
    Ok(())
}
