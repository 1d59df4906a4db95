use primat::{IntMatrix, Matrix, MatrixError};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

fn main() -> Result<(), MatrixError> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with(fmt::layer().with_target(true))
        .init();

    println!("Transform Tour");

    let m: IntMatrix = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]])?;
    println!("m            = {m}");
    println!("transpose    = {}", m.transpose());
    println!("rotate90     = {}", m.rotate90());
    println!("rotate180    = {}", m.rotate180());
    println!("rotate270    = {}", m.rotate270());
    println!("flip_h       = {}", m.flip_h());
    println!("flip_v       = {}", m.flip_v());

    println!("\nReshaping");
    println!("reshape(1,4) = {}", m.reshape(1, 4)?);
    println!("reshape(3,2) = {}", m.reshape(3, 2)?);

    println!("\nPadding and tiling");
    println!("extend(3,3,9)     = {}", m.extend_with(3, 3, 9)?);
    println!("pad(1,1,1,1)      = {}", m.pad(1, 1, 1, 1)?);
    println!("repelem(2,2)      = {}", m.repelem(2, 2)?);
    println!("repmat(1,3)       = {}", m.repmat(1, 3)?);

    println!("\nStacking");
    let top = Matrix::row_vector(vec![0, 0]);
    let stacked = top.vstack(&m)?;
    println!("vstack({top}, m) = {stacked} ({})", stacked.shape());

    let wide = IntMatrix::range(0, 3)?;
    match wide.vstack(&m) {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("vstack({wide}, m) failed: {e}"),
    }

    println!("\nDiagonals");
    let d = Matrix::diagonal_lu2rd(&[1, 2, 3]);
    let diag: Vec<i32> = d.stream_lu2rd()?.copied().collect();
    println!("diagonal_lu2rd([1, 2, 3]) = {d}, main diagonal = {diag:?}");

    Ok(())
}
