use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use device_bezel_rs::image_pipeline::{
    BezelCompositePipeline, CompositeConfig, PngCompression, build_screen_mask, locate_bezel_frame,
};
use image::{Rgba, RgbaImage};

const MARGIN: u32 = 8;
const BORDER: u32 = 24;

fn generate_template(width: u32, height: u32) -> RgbaImage {
    let inner = MARGIN + BORDER;
    RgbaImage::from_fn(width, height, |x, y| {
        let in_device = x >= MARGIN && x < width - MARGIN && y >= MARGIN && y < height - MARGIN;
        let in_screen = x >= inner && x < width - inner && y >= inner && y < height - inner;
        if in_device && !in_screen {
            Rgba([30, 30, 30, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

fn generate_screenshot(width: u32, height: u32) -> RgbaImage {
    let inner = 2 * (MARGIN + BORDER);
    RgbaImage::from_fn(width - inner, height - inner, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    })
}

fn benchmark_composite_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("composite_by_size");

    let sizes = vec![
        (200, 400, "200x400"),
        (600, 1200, "600x1200"),
        (1200, 2400, "1200x2400"),
    ];

    for (width, height, label) in sizes {
        let template = generate_template(width, height);
        let screenshot = generate_screenshot(width, height);

        group.bench_with_input(
            BenchmarkId::from_parameter(label),
            &(screenshot, template),
            |b, (screenshot, template)| {
                let pipeline = BezelCompositePipeline::new(CompositeConfig::default());

                b.iter(|| {
                    let _ = pipeline.composite(black_box(screenshot), black_box(template));
                });
            },
        );
    }

    group.finish();
}

fn benchmark_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");
    let template = generate_template(600, 1200);
    let frame = locate_bezel_frame(&template).expect("benchmark template has a screen");

    group.bench_function("locate_frame", |b| {
        b.iter(|| locate_bezel_frame(black_box(&template)));
    });

    group.bench_function("build_mask", |b| {
        b.iter(|| build_screen_mask(black_box(&template), black_box(&frame)));
    });

    group.finish();
}

fn benchmark_compression_methods(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression_methods");
    let template = generate_template(600, 1200);
    let screenshot = generate_screenshot(600, 1200);
    let pipeline = BezelCompositePipeline::new(CompositeConfig::default());
    let composite = pipeline
        .composite(&screenshot, &template)
        .expect("benchmark composite succeeds");

    let compressions = vec![
        (PngCompression::Fast, "fast"),
        (PngCompression::Default, "default"),
        (PngCompression::Best, "best"),
    ];

    for (compression, label) in compressions {
        group.bench_with_input(
            BenchmarkId::from_parameter(label),
            &composite,
            |b, image| {
                let config = CompositeConfig::builder()
                    .compression(compression)
                    .build();
                let pipeline = BezelCompositePipeline::new(config);

                b.iter(|| {
                    let _ = pipeline.encode_png(black_box(image));
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_composite_sizes,
    benchmark_stages,
    benchmark_compression_methods
);
criterion_main!(benches);
