use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use tilt_image::{Image, ImageSize};
use tilt_imgproc::interpolation::InterpolationMode;
use tilt_imgproc::warp::{get_projection_matrix3d, warp_perspective};

fn bench_warp_perspective(c: &mut Criterion) {
    let mut group = c.benchmark_group("WarpPerspective");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let image_size = ImageSize {
            width: *width,
            height: *height,
        };
        let image = Image::<f32, 3>::from_size_val(image_size, 0.5f32).unwrap();

        let out_size = ImageSize {
            width: image_size.width * 2,
            height: image_size.height * 2,
        };

        let m = get_projection_matrix3d(image_size, 10.0, 0.0, 30.0, 0.0, 0.0);

        group.bench_with_input(
            criterion::BenchmarkId::new("native", format!("{width}x{height}")),
            &image,
            |b, i| {
                let mut out = Image::<f32, 3>::from_size_val(out_size, 0.0).unwrap();
                b.iter(|| {
                    warp_perspective(
                        black_box(i),
                        black_box(&mut out),
                        black_box(&m),
                        InterpolationMode::Bilinear,
                    )
                    .unwrap()
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_warp_perspective);
criterion_main!(benches);
