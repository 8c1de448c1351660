use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use stereo_proc_rs::stereo_pipeline::{
    ColorEncoding, ColorImage, DensePointGrid, PinholeCamera, RawDisparity, StereoCalibration,
    StereoCameraModel, build_sparse_cloud, build_structured_cloud, normalize_disparity,
};

fn model(width: usize, height: usize) -> StereoCameraModel {
    let camera = PinholeCamera::new(width, height, 500.0, 500.0, width as f64 / 2.0, height as f64 / 2.0);
    StereoCameraModel::from_baseline(camera, camera, 0.1)
}

fn generate_raw_disparity(width: usize, height: usize) -> RawDisparity {
    let data = (0..width * height)
        .map(|i| {
            let (y, x) = (i / width, i % width);
            if (x + y) % 17 == 0 { -16 } else { (16 * (8 + (x * 7 + y * 3) % 48)) as i16 }
        })
        .collect();
    RawDisparity::from_vec(width, height, data)
}

fn generate_color(width: usize, height: usize) -> ColorImage {
    let data = (0..width * height * 3).map(|i| (i % 251) as u8).collect();
    ColorImage::new(width, height, ColorEncoding::Rgb8, data)
}

fn dense_grid(width: usize, height: usize) -> DensePointGrid {
    let model = model(width, height);
    let disparity = normalize_disparity(&generate_raw_disparity(width, height), 16, &model);
    let mut grid = DensePointGrid::default();
    model.unproject(&disparity, &mut grid);
    grid
}

const SIZES: [(usize, usize, &str); 3] = [
    (320, 240, "320x240"),
    (640, 480, "640x480"),
    (1280, 720, "1280x720"),
];

fn benchmark_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_disparity");

    for (width, height, label) in SIZES {
        let raw = generate_raw_disparity(width, height);
        let model = model(width, height);
        group.bench_with_input(BenchmarkId::from_parameter(label), &raw, |b, raw| {
            b.iter(|| normalize_disparity(black_box(raw), 16, &model));
        });
    }

    group.finish();
}

fn benchmark_unproject(c: &mut Criterion) {
    let mut group = c.benchmark_group("unproject");

    for (width, height, label) in SIZES {
        let model = model(width, height);
        let disparity = normalize_disparity(&generate_raw_disparity(width, height), 16, &model);
        let mut grid = DensePointGrid::default();
        group.bench_with_input(BenchmarkId::from_parameter(label), &disparity, |b, disparity| {
            b.iter(|| model.unproject(black_box(disparity), &mut grid));
        });
    }

    group.finish();
}

fn benchmark_cloud_builders(c: &mut Criterion) {
    let mut group = c.benchmark_group("cloud_builders");

    for (width, height, label) in SIZES {
        let grid = dense_grid(width, height);
        let color = generate_color(width, height);

        group.bench_with_input(BenchmarkId::new("sparse", label), &grid, |b, grid| {
            b.iter(|| {
                let mut warnings = Vec::new();
                build_sparse_cloud(black_box(grid), &color, &mut warnings)
            });
        });

        group.bench_with_input(BenchmarkId::new("structured", label), &grid, |b, grid| {
            b.iter(|| {
                let mut warnings = Vec::new();
                build_structured_cloud(black_box(grid), &color, &mut warnings)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_normalize, benchmark_unproject, benchmark_cloud_builders);
criterion_main!(benches);
