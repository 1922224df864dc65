use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use floorgen::render::{LayoutOptions, SvgRenderOptions, render_layout_svg, sanitize_svg_id};
use floorgen::{ArrangementType, LayoutRequest};

fn fixtures() -> Vec<(&'static str, LayoutRequest)> {
    ArrangementType::ALL
        .iter()
        .map(|a| {
            let req = LayoutRequest::new(*a, 2400.0, 24, 0.22)
                .with_unit_spacing(0.5)
                .with_balcony_depth(1.5);
            (a.code(), req)
        })
        .collect()
}

fn bench_render_svg_sync(c: &mut Criterion) {
    let layout = LayoutOptions::default();

    let mut group = c.benchmark_group("render_svg_sync");
    for (name, request) in fixtures() {
        let diagram_id = sanitize_svg_id(name);
        group.bench_function(name, |b| {
            b.iter_batched(
                || request,
                |req| {
                    let plan = floorgen::render::layout_sync(&req, &layout).unwrap();
                    let svg_opts = SvgRenderOptions {
                        diagram_id: Some(diagram_id.clone()),
                        ..SvgRenderOptions::default()
                    };
                    let _svg =
                        render_layout_svg(&plan, layout.text_measurer.as_ref(), &svg_opts).unwrap();
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_layout_only_sync(c: &mut Criterion) {
    let layout = LayoutOptions::default();

    let mut group = c.benchmark_group("layout_only_sync");
    for (name, request) in fixtures() {
        group.bench_function(name, |b| {
            b.iter(|| {
                let _ = floorgen::render::layout_sync(&request, &layout).unwrap();
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render_svg_sync, bench_layout_only_sync);
criterion_main!(benches);
