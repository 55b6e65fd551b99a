use std::cmp::Ordering;

use clap::Parser;
use serde_json::json;
use squart::{generate, init_logging, move_counts, BoardConfig};

/// Sweep board sizes and inactive percentages, ranking them by how evenly
/// they split legal moves between the two sides.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value_t = 5)]
    min_rows: usize,
    #[arg(long, default_value_t = 12)]
    max_rows: usize,
    #[arg(long, default_value_t = 5)]
    min_cols: usize,
    #[arg(long, default_value_t = 12)]
    max_cols: usize,
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "0,5,10,12,15,17,18,19,20,25,30,35,40"
    )]
    percentages: Vec<f64>,
    /// Seeds `0..seeds` are used for every combination.
    #[arg(long, default_value_t = 50)]
    seeds: usize,
    #[arg(long, default_value_t = 25)]
    top: usize,
    #[arg(long)]
    json: bool,
}

struct Record {
    rows: usize,
    cols: usize,
    inactive_percentage: f64,
    average_horizontal: f64,
    average_vertical: f64,
    zero_diff_rate: f64,
    average_abs_diff: f64,
}

fn analyze(rows: usize, cols: usize, percentage: f64, seeds: usize) -> anyhow::Result<Record> {
    let mut horizontal_total = 0usize;
    let mut vertical_total = 0usize;
    let mut zero_diff = 0usize;
    let mut abs_diff_total = 0usize;

    for seed in 0..seeds {
        let config = BoardConfig::builder(rows, cols)
            .seed(seed.to_string())
            .inactive_percentage(percentage)
            .build()?;
        let board = generate(&config)?;
        let (h, v) = move_counts(&board);
        horizontal_total += h;
        vertical_total += v;
        if h == v {
            zero_diff += 1;
        }
        abs_diff_total += h.abs_diff(v);
    }

    let n = seeds.max(1) as f64;
    Ok(Record {
        rows,
        cols,
        inactive_percentage: percentage,
        average_horizontal: horizontal_total as f64 / n,
        average_vertical: vertical_total as f64 / n,
        zero_diff_rate: zero_diff as f64 / n,
        average_abs_diff: abs_diff_total as f64 / n,
    })
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let mut results = Vec::new();
    for rows in args.min_rows..=args.max_rows {
        for cols in args.min_cols..=args.max_cols {
            for &percentage in &args.percentages {
                results.push(analyze(rows, cols, percentage, args.seeds)?);
            }
        }
    }
    log::info!("analyzed {} combinations", results.len());

    results.sort_by(|a, b| {
        a.average_abs_diff
            .partial_cmp(&b.average_abs_diff)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                b.zero_diff_rate
                    .partial_cmp(&a.zero_diff_rate)
                    .unwrap_or(Ordering::Equal)
            })
    });
    results.truncate(args.top);

    if args.json {
        let records: Vec<_> = results
            .iter()
            .map(|r| {
                json!({
                    "rows": r.rows,
                    "cols": r.cols,
                    "inactivePercentage": r.inactive_percentage,
                    "averageAbsDiff": r.average_abs_diff,
                    "zeroDiffRate": r.zero_diff_rate,
                    "averageHorizontal": r.average_horizontal,
                    "averageVertical": r.average_vertical,
                })
            })
            .collect();
        println!("{}", serde_json::to_string(&records)?);
        return Ok(());
    }

    println!(
        "Top {} balanced configurations (rows x cols, inactive %, avg abs diff, zero diff rate, avg moves H, avg moves V)",
        results.len()
    );
    for r in &results {
        println!(
            "{}x{} | inactive {}% | avg|d|={:.2} | zero {:.0}% | H={:.1} | V={:.1}",
            r.rows,
            r.cols,
            r.inactive_percentage,
            r.average_abs_diff,
            r.zero_diff_rate * 100.0,
            r.average_horizontal,
            r.average_vertical
        );
    }
    Ok(())
}
