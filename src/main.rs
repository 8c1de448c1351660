use stereo_proc_rs::logger;
use stereo_proc_rs::stereo_pipeline::{
    BlockMatcherConfig, DisparityTiffWriter, OutputFlags, PinholeCamera, RawImage, StereoCameraModel,
    StereoConfig, StereoProcessor, StereoWorkspace, TiffCompression,
};

use tracing::{error, info, warn};

const WIDTH: usize = 320;
const HEIGHT: usize = 240;
const FOCAL_LENGTH: f64 = 300.0;
const BASELINE: f64 = 0.12;

/// Random-dot pair with a near square floating over a far background.
fn synthetic_pair() -> (RawImage, RawImage) {
    let (far, near) = (8usize, 20usize);
    let padded = WIDTH + near;
    let mut state = 0x9E37_79B9u32;
    let texture: Vec<u8> = (0..padded * HEIGHT)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 24) as u8
        })
        .collect();

    let mut left = vec![0u8; WIDTH * HEIGHT];
    let mut right = vec![0u8; WIDTH * HEIGHT];
    for y in 0..HEIGHT {
        let row = &texture[y * padded..(y + 1) * padded];
        for x in 0..WIDTH {
            let in_square = (HEIGHT / 3..2 * HEIGHT / 3).contains(&y) && (WIDTH / 3..2 * WIDTH / 3).contains(&x);
            let shift = if in_square { near } else { far };
            left[y * WIDTH + x] = row[x];
            if x + shift < padded {
                right[y * WIDTH + x] = row[x + shift];
            }
        }
    }

    let raw = |data| RawImage {
        width: WIDTH,
        height: HEIGHT,
        encoding: "mono8".to_string(),
        data,
    };
    (raw(left), raw(right))
}

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting stereo_proc...");

    let config = StereoConfig::builder()
        .matcher(BlockMatcherConfig {
            correlation_window_size: 9,
            disparity_range: 32,
            ..BlockMatcherConfig::default()
        })
        .build();
    let processor = StereoProcessor::new(config)?;
    info!("Matcher: {:?}", processor.config().matcher);

    let camera = PinholeCamera::new(
        WIDTH,
        HEIGHT,
        FOCAL_LENGTH,
        FOCAL_LENGTH,
        WIDTH as f64 / 2.0,
        HEIGHT as f64 / 2.0,
    );
    let model = StereoCameraModel::from_baseline(camera, camera, BASELINE);

    let (left, right) = synthetic_pair();
    let mut workspace = StereoWorkspace::new();
    let output = processor.process(&left, &right, &model, &mut workspace, OutputFlags::ALL)?;

    for warning in &output.warnings {
        warn!("{}", warning);
    }

    if let Some(points) = &output.points {
        info!("Sparse cloud: {} points", points.len());
    }
    if let Some(points2) = &output.points2 {
        let valid = points2.iter().filter(|p| !p.z.is_nan()).count();
        info!(
            "Structured cloud: {}x{}, {} valid",
            points2.width, points2.height, valid
        );
    }

    if let Some(disparity) = &output.disparity {
        let writer = DisparityTiffWriter::new(TiffCompression::Deflate);
        match writer.write_file(disparity, "disparity.tiff") {
            Ok(_) => info!("Disparity written to disparity.tiff"),
            Err(e) => error!("Writing disparity failed: {}", e),
        }
    }

    Ok(())
}
