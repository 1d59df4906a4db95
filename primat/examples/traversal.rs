use primat::{Matrix, PositionalIterator};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

fn main() -> Result<(), primat::MatrixError> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with(fmt::layer().with_target(true))
        .init();

    let m = Matrix::from_fn(4, 5, |i, j| (i * 5 + j) as i16)?;
    println!("m = {m}");

    println!("\nRow-major");
    let mut h = m.stream_h();
    println!("remaining: {}", h.remaining());
    h.advance(7);
    println!("after advance(7): next = {:?}, remaining = {}", h.next(), h.remaining());
    println!("rows 1..3: {:?}", m.stream_h_rows(1..3)?.to_vec());

    println!("\nColumn-major");
    println!("all: {:?}", m.stream_v().to_vec());
    println!("column 3: {:?}", m.stream_v_column(3)?.to_vec());
    for (j, column) in m.stream_c_range(0..2)?.enumerate() {
        let sum: i32 = column.map(|v| i32::from(*v)).sum();
        println!("sum of column {j}: {sum}");
    }

    println!("\nDiagonals");
    let square = m.copy_range(0..4, 1..5)?;
    println!("square = {square}");
    println!("lu2rd: {:?}", square.stream_lu2rd()?.to_vec());
    println!("ru2ld: {:?}", square.stream_ru2ld()?.to_vec());
    match m.stream_lu2rd() {
        Ok(_) => println!("unexpected diagonal on {}", m.shape()),
        Err(e) => println!("diagonal of {}: {e}", m.shape()),
    }

    println!("\nPositions");
    let evens: Vec<_> = m
        .points_h()
        .filter(|p| m[(p.row, p.col)] % 2 == 0)
        .take(4)
        .collect();
    println!("first even cells: {evens:?}");
    println!("neighbours of (0, 0): {:?}", m.adjacent8_points(0, 0)?);

    Ok(())
}
