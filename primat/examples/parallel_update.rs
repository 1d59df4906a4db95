use std::{sync::Arc, time::Instant};

use primat::{LongMatrix, Matrix, ParallelConfig, ParallelExecutor};
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with(fmt::layer().with_target(true))
        .init();

    // Optional JSON config as the first argument, e.g. '{"workers": 4}'
    let config = match std::env::args().nth(1) {
        Some(json) => ParallelConfig::from_json(&json)?,
        None => ParallelConfig::default(),
    };
    info!(?config, "executor config");

    let exec = Arc::new(ParallelExecutor::new(config)?);
    let serial = Arc::new(ParallelExecutor::serial());

    let rows = 2_000;
    let cols = 2_000;
    let base: LongMatrix = Matrix::from_fn(rows, cols, |i, j| (i * cols + j) as i64)?;
    println!("Matrix: {} ({} elements)", base.shape(), base.count());

    for (label, executor) in [("serial", serial), ("parallel", exec)] {
        let mut m = base.clone().with_executor(executor);

        let start = Instant::now();
        m.update_all(|v| v.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407));
        m.replace_if(|v| *v < 0, 0);
        let total: i64 = m.stream_h().fold(0i64, |acc, v| acc.wrapping_add(*v));
        println!(
            "{label:>8}: update + replace + sum in {:.3}s (checksum {total})",
            start.elapsed().as_secs_f64()
        );
    }

    let a = Matrix::from_fn(256, 256, |i, j| ((i + j) % 7) as i64)?;
    let start = Instant::now();
    let product = a.multiply(&a.transpose())?;
    println!(
        "multiply 256x256: {:.3}s, trace = {}",
        start.elapsed().as_secs_f64(),
        product.get_lu2rd()?.iter().sum::<i64>()
    );

    Ok(())
}
