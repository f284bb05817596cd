//! Benchmarks for GPU rendering operations.

use ambient_visualizer::engine::{generate, StageGroup, XorShiftRng};
use ambient_visualizer::gpu::{tessellate, vertex_capacity, RenderSettings, SceneRenderer};
use ambient_visualizer::scenes::{default_params, scene_config, SceneKind, ThemeMode};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn mounted(kind: SceneKind) -> (StageGroup, ambient_visualizer::SceneConfig) {
    let config = scene_config(kind);
    let params = default_params(kind);
    let mut rng = XorShiftRng::new(19);
    let group = StageGroup::new(generate(&config, &params, ThemeMode::Dark, 1.0, &mut rng));
    (group, config)
}

fn bench_tessellate(c: &mut Criterion) {
    let mut bench_group = c.benchmark_group("Tessellation");

    for kind in SceneKind::all() {
        let (group, config) = mounted(*kind);
        bench_group.bench_with_input(
            BenchmarkId::new("tessellate", kind.name()),
            kind,
            |b, _| {
                b.iter(|| {
                    black_box(tessellate(&group, &config.camera, 16.0 / 9.0));
                });
            },
        );
    }

    bench_group.finish();
}

fn bench_render_frame(c: &mut Criterion) {
    let mut bench_group = c.benchmark_group("GPU Rendering");

    let (group, config) = mounted(SceneKind::AbstractShapes);
    let settings = RenderSettings {
        width: 1280,
        height: 720,
        theme: ThemeMode::Dark,
        background: None,
        lighting: config.lighting,
    };

    let renderer = match pollster::block_on(SceneRenderer::new(settings, vertex_capacity(&group))) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Skipping GPU benchmarks: {}", e);
            return;
        }
    };

    let vertices = tessellate(&group, &config.camera, renderer.settings().aspect());

    bench_group.bench_function("render_frame_720p", |b| {
        b.iter(|| {
            black_box(renderer.render_frame(&vertices).expect("render failed"));
        });
    });

    bench_group.finish();
}

fn bench_render_resolutions(c: &mut Criterion) {
    let mut bench_group = c.benchmark_group("Resolution Scaling");

    let (group, config) = mounted(SceneKind::SphereField);
    let resolutions = [(640, 360, "360p"), (1280, 720, "720p"), (1920, 1080, "1080p")];

    for (width, height, name) in resolutions {
        let settings = RenderSettings {
            width,
            height,
            theme: ThemeMode::Dark,
            background: None,
            lighting: config.lighting,
        };
        let renderer = match pollster::block_on(SceneRenderer::new(settings, vertex_capacity(&group)))
        {
            Ok(r) => r,
            Err(_) => continue,
        };
        let vertices = tessellate(&group, &config.camera, renderer.settings().aspect());

        bench_group.bench_with_input(BenchmarkId::new("render", name), &renderer, |b, renderer| {
            b.iter(|| {
                black_box(renderer.render_frame(&vertices).expect("render failed"));
            });
        });
    }

    bench_group.finish();
}

criterion_group!(
    benches,
    bench_tessellate,
    bench_render_frame,
    bench_render_resolutions
);
criterion_main!(benches);
