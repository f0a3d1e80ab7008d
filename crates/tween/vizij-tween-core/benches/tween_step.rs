use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use vizij_tween_core::{
    Ease, EasePhase, Engine, FloatInterp, Inputs, LoopType, Playable, Sequence, TimelineConfig,
    Tween, Vec3Interp,
};

fn scalar_tween(loop_type: LoopType) -> Tween<f32, FloatInterp> {
    let cfg = TimelineConfig::new(0.5)
        .with_loops(8)
        .with_loop_type(loop_type)
        .with_ease(Ease::Cubic(EasePhase::InOut));
    Tween::between(cfg, FloatInterp, 0.0, 1.0, |v| {
        black_box(v);
    })
    .expect("valid config")
}

fn bench_tween_seek(c: &mut Criterion) {
    let mut tween = scalar_tween(LoopType::Continue);
    let mut t = 0.0;
    c.bench_function("tween_seek_continue", |b| {
        b.iter(|| {
            t = (t + 0.016) % 4.0;
            tween.seek(black_box(t));
        });
    });
}

fn bench_sequence_seek(c: &mut Criterion) {
    let mut seq = Sequence::new(TimelineConfig::default().with_loops(4)).expect("valid config");
    for i in 0..16 {
        let cfg = TimelineConfig::new(0.25).with_loop_type(LoopType::Mirror);
        let child = Tween::between(cfg, Vec3Interp, [0.0; 3], [i as f32, 1.0, 2.0], |v| {
            black_box(v);
        })
        .expect("valid config");
        seq.append(Box::new(child)).expect("bounded child");
    }
    let mut t = 0.0;
    c.bench_function("sequence_seek_16_children", |b| {
        b.iter(|| {
            t = (t + 0.016) % 16.0;
            seq.seek(black_box(t));
        });
    });
}

fn bench_engine_update(c: &mut Criterion) {
    let mut engine = Engine::default();
    for i in 0..256 {
        let loop_type = if i % 2 == 0 {
            LoopType::Reset
        } else {
            LoopType::Mirror
        };
        engine.add_player(&format!("p{i}"), Box::new(scalar_tween(loop_type)));
    }
    c.bench_function("engine_update_256_players", |b| {
        b.iter(|| {
            let out = engine.update(black_box(0.016), Inputs::default());
            black_box(out.events.len());
        });
    });
}

criterion_group!(
    benches,
    bench_tween_seek,
    bench_sequence_seek,
    bench_engine_update
);
criterion_main!(benches);
