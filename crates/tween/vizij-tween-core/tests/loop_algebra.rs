use std::cell::{Cell, RefCell};
use std::rc::Rc;

use vizij_tween_core::{
    fold_mirror, sub_range, ColorInterp, Color, Direction, DoubleInterp, Ease, EasePhase,
    FloatInterp, IntInterp, Interpolator, LongInterp, LoopCount, LoopTick, LoopType, ParentLoop,
    Playable, QuatInterp, TimelineConfig, TimelineEvent, Tween, Vec2Interp, Vec3Interp,
    Vec4Interp, MAX_LOOP_INDEX,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

type Log<V> = Rc<RefCell<Vec<V>>>;

fn recorder<V: 'static>() -> (Log<V>, impl FnMut(V) + 'static) {
    let log: Log<V> = Rc::new(RefCell::new(Vec::new()));
    let sink_log = Rc::clone(&log);
    (log, move |v| sink_log.borrow_mut().push(v))
}

fn last<V: Clone>(log: &Log<V>) -> V {
    log.borrow().last().cloned().expect("sink was called")
}

fn scalar(cfg: TimelineConfig, a: f32, b: f32) -> (Tween<f32, FloatInterp>, Log<f32>) {
    let (log, sink) = recorder();
    let tween = Tween::between(cfg, FloatInterp, a, b, sink).unwrap();
    (tween, log)
}

fn tick(loop_index: u64, local: f64, direction: Direction, parent: ParentLoop) -> LoopTick {
    LoopTick {
        loop_index,
        local,
        direction,
        notify: true,
        parent,
        zero_duration: false,
    }
}

#[test]
fn midpoint_and_quarter_forward_and_backward() {
    let (mut fwd, fwd_log) = scalar(TimelineConfig::new(1.0), 0.0, 10.0);
    let back_cfg = TimelineConfig::new(1.0).with_direction(Direction::Backward);
    let (mut back, back_log) = scalar(back_cfg, 0.0, 10.0);

    fwd.seek(0.5);
    back.seek(0.5);
    approx(last(&fwd_log), 5.0, 1e-6);
    approx(last(&back_log), 5.0, 1e-6);

    fwd.seek(0.25);
    back.seek(0.25);
    approx(last(&fwd_log), 2.5, 1e-6);
    approx(last(&back_log), 7.5, 1e-6);
}

fn check_endpoints<V, I>(interp: I, a: V, b: V, close: impl Fn(&V, &V) -> bool)
where
    V: Clone + std::fmt::Debug + 'static,
    I: Interpolator<V>,
{
    let (log, sink) = recorder::<V>();
    let mut tween = Tween::between(TimelineConfig::new(2.0), interp, a.clone(), b.clone(), sink)
        .unwrap();
    tween.seek(0.0);
    assert!(close(&last(&log), &a), "start {:?} != {:?}", last(&log), a);
    tween.seek(2.0);
    assert!(close(&last(&log), &b), "end {:?} != {:?}", last(&log), b);
}

fn close_slice(x: &[f32], y: &[f32]) -> bool {
    x.iter().zip(y).all(|(p, q)| (p - q).abs() < 1e-5)
}

#[test]
fn every_interpolator_hits_both_endpoints() {
    check_endpoints(FloatInterp, -3.0f32, 7.5, |x, y| (x - y).abs() < 1e-6);
    check_endpoints(DoubleInterp, -3.0f64, 7.5, |x, y| (x - y).abs() < 1e-12);
    check_endpoints(IntInterp, -4i32, 9, |x, y| x == y);
    check_endpoints(LongInterp, 0i64, 1 << 40, |x, y| x == y);
    check_endpoints(Vec2Interp, [0.0, 1.0], [2.0, -1.0], |x, y| close_slice(x, y));
    check_endpoints(Vec3Interp, [0.0; 3], [1.0, 2.0, 3.0], |x, y| close_slice(x, y));
    check_endpoints(Vec4Interp, [1.0; 4], [0.0; 4], |x, y| close_slice(x, y));
    check_endpoints(ColorInterp, Color::BLACK, Color::WHITE, |x, y| {
        close_slice(&x.to_array(), &y.to_array())
    });
    let s = std::f32::consts::FRAC_1_SQRT_2;
    check_endpoints(QuatInterp, [0.0, 0.0, 0.0, 1.0], [s, 0.0, 0.0, s], |x, y| {
        close_slice(x, y)
    });
}

#[test]
fn continue_ranges_chain_end_to_start() {
    let n = 5u32;
    let ranges: Vec<(f64, f64)> = (0..n)
        .map(|l| {
            sub_range(
                LoopType::Continue,
                Direction::Forward,
                l as f64,
                0.0,
                n as f64,
                1.0,
            )
        })
        .collect();
    for (l, (lo, hi)) in ranges.iter().enumerate() {
        assert_eq!((*lo, *hi), (l as f64, l as f64 + 1.0));
    }
    for w in ranges.windows(2) {
        assert_eq!(w[0].1, w[1].0);
    }
}

#[test]
fn continue_tween_progresses_through_extended_range() {
    let cfg = TimelineConfig::new(1.0)
        .with_loops(3)
        .with_loop_type(LoopType::Continue);
    let (mut tween, log) = scalar(cfg, 1.0, 2.0);
    let mut prev = f32::NEG_INFINITY;
    for i in 0..=30 {
        tween.seek(i as f64 * 0.1);
        let v = last(&log);
        assert!(v >= prev - 1e-6, "not monotonic at step {i}: {v} < {prev}");
        prev = v;
    }
    approx(prev, 4.0, 1e-5);
}

#[test]
fn mirror_fold_is_symmetric_within_a_loop() {
    assert_eq!(fold_mirror(0.25), 0.5);
    assert_eq!(fold_mirror(0.75), 0.5);

    let cfg = TimelineConfig::new(1.0)
        .with_loops(2)
        .with_loop_type(LoopType::Mirror);
    let (mut tween, log) = scalar(cfg, 0.0, 8.0);
    tween.seek(1.25);
    let a = last(&log);
    tween.seek(1.75);
    let b = last(&log);
    approx(a, 4.0, 1e-6);
    approx(a, b, 1e-6);
}

#[test]
fn mirror_ignores_direction_for_the_ease() {
    let ease = Ease::Quadratic(EasePhase::In);
    let fwd_cfg = TimelineConfig::new(1.0)
        .with_loop_type(LoopType::Mirror)
        .with_ease(ease.clone());
    let back_cfg = fwd_cfg.clone().with_direction(Direction::Backward);
    let (mut fwd, fwd_log) = scalar(fwd_cfg, 0.0, 10.0);
    let (mut back, back_log) = scalar(back_cfg, 0.0, 10.0);
    fwd.seek(0.25);
    back.seek(0.25);
    // fold(0.25) = 0.5, quad-in = 0.25 on the same (0, 1) segment
    approx(last(&fwd_log), 2.5, 1e-6);
    approx(last(&back_log), 2.5, 1e-6);
}

#[test]
fn backward_reset_uses_inverted_ease() {
    let cfg = TimelineConfig::new(1.0)
        .with_direction(Direction::Backward)
        .with_ease(Ease::Quadratic(EasePhase::In));
    let (mut tween, log) = scalar(cfg, 0.0, 10.0);
    tween.seek(0.25);
    // 1 - (1 - 0.25)^2 = 0.4375 of the way from 10 to 0
    approx(last(&log), 5.625, 1e-5);
}

#[test]
fn zero_duration_never_divides_and_sinks_once_per_call() {
    for loop_type in [LoopType::Reset, LoopType::Continue, LoopType::Mirror] {
        for loops in [LoopCount::Finite(3), LoopCount::Infinite] {
            let cfg = TimelineConfig::new(0.0)
                .with_loops(loops)
                .with_loop_type(loop_type)
                .with_direction(Direction::Backward);
            let (mut tween, log) = scalar(cfg, 0.0, 1.0);
            let times = [0.0, 0.4, 1.0, 2.5, 3.0, 1e9, 0.1];
            for (i, t) in times.iter().enumerate() {
                tween.seek(*t);
                assert_eq!(log.borrow().len(), i + 1);
                assert!(last(&log).is_finite());
            }
        }
    }
}

#[test]
fn zero_duration_backward_keeps_ease_uninverted() {
    let cfg = TimelineConfig::new(0.0)
        .with_direction(Direction::Backward)
        .with_ease(Ease::Quadratic(EasePhase::In));
    let (mut tween, log) = scalar(cfg, 0.0, 10.0);
    tween.seek(0.5);
    // segment (1, 0), quad-in(0.5) = 0.25 of the way from 10 to 0
    approx(last(&log), 7.5, 1e-6);
}

#[test]
fn zero_duration_advance_completes_one_loop_per_call() {
    let cfg = TimelineConfig::new(0.0)
        .with_loops(3)
        .with_loop_type(LoopType::Continue);
    let (mut tween, log) = scalar(cfg, 0.0, 1.0);
    tween.advance(0.016);
    approx(last(&log), 1.0, 1e-6);
    assert!(!tween.is_finished());
    tween.advance(0.016);
    tween.advance(0.016);
    approx(last(&log), 3.0, 1e-6);
    assert!(tween.is_finished());
    assert_eq!(log.borrow().len(), 3);
}

#[test]
fn zero_duration_advance_delivers_each_loop_end() {
    // Reset ends every loop on `b`; Mirror folds back to `a`.
    for (loop_type, expect) in [(LoopType::Reset, 10.0), (LoopType::Mirror, 0.0)] {
        let cfg = TimelineConfig::new(0.0)
            .with_loops(3)
            .with_loop_type(loop_type);
        let (mut tween, log) = scalar(cfg, 0.0, 10.0);
        for _ in 0..3 {
            tween.advance(0.016);
        }
        assert_eq!(*log.borrow(), vec![expect; 3], "{loop_type:?}");
        assert!(tween.is_finished());
    }
}

#[test]
fn zero_duration_reports_a_loop_per_advance() {
    let (mut tween, _) = scalar(TimelineConfig::new(0.0).with_loops(2), 0.0, 1.0);
    tween.advance(0.016);
    tween.advance(0.016);
    assert_eq!(
        tween.drain_events(),
        vec![
            TimelineEvent::Started,
            TimelineEvent::LoopCompleted { loop_index: 0 },
            TimelineEvent::LoopCompleted { loop_index: 1 },
            TimelineEvent::Completed,
        ]
    );
}

#[test]
fn huge_elapsed_values_saturate_instead_of_overflowing() {
    for loop_type in [LoopType::Reset, LoopType::Continue, LoopType::Mirror] {
        for direction in [Direction::Forward, Direction::Backward] {
            for duration in [0.0, 1e-300] {
                let cfg = TimelineConfig::new(duration)
                    .with_loops(LoopCount::Infinite)
                    .with_loop_type(loop_type)
                    .with_direction(direction);
                let (mut tween, log) = scalar(cfg, 0.0, 1.0);
                for (i, t) in [1e20, 1e300, f64::MAX].iter().enumerate() {
                    tween.seek(*t);
                    assert_eq!(log.borrow().len(), i + 1);
                    assert!(last(&log).is_finite(), "{loop_type:?} {direction:?} @ {t}");
                }
                assert_eq!(tween.timeline().current_loop(), MAX_LOOP_INDEX);
            }
        }
    }
}

#[test]
fn parent_context_shifts_the_segment() {
    let parent = ParentLoop { index: 1, count: 3 };
    let cases = [
        // (loop type, direction, own loops, expected range)
        (LoopType::Reset, Direction::Forward, 2, (1.0, 2.0)),
        (LoopType::Reset, Direction::Backward, 2, (2.0, 1.0)),
        (LoopType::Continue, Direction::Forward, 2, (2.0, 3.0)),
        (LoopType::Continue, Direction::Backward, 2, (4.0, 3.0)),
        (LoopType::Mirror, Direction::Forward, 2, (1.0, 2.0)),
        (LoopType::Mirror, Direction::Backward, 2, (1.0, 2.0)),
    ];
    for (loop_type, direction, loops, expected) in cases {
        let cfg = TimelineConfig::new(1.0)
            .with_loops(loops)
            .with_loop_type(loop_type)
            .with_direction(direction);
        let (tween, _) = scalar(cfg, 0.0, 1.0);
        let range = tween.range_for(&tick(0, 0.5, direction, parent));
        assert_eq!(range, expected, "{loop_type:?} {direction:?}");
    }
}

#[test]
fn nested_seek_samples_parent_segment() {
    let cfg = TimelineConfig::new(1.0)
        .with_loops(2)
        .with_loop_type(LoopType::Continue);
    let (mut tween, log) = scalar(cfg, 0.0, 10.0);
    tween.seek_nested(1.5, ParentLoop { index: 2, count: 3 }, false);
    // P·N + L = 2·2 + 1 = 5, halfway to 6
    approx(last(&log), 55.0, 1e-4);
    assert!(tween.drain_events().is_empty());
}

#[test]
fn infinite_continue_counts_reached_loops() {
    let cfg = TimelineConfig::new(1.0)
        .with_loops(LoopCount::Infinite)
        .with_loop_type(LoopType::Continue);
    let (mut tween, log) = scalar(cfg, 0.0, 1.0);
    tween.seek(41.5);
    approx(last(&log), 41.5, 1e-4);
    assert!(!tween.is_finished());
    assert_eq!(tween.total_duration(), None);
}

#[test]
fn endpoints_are_resampled_every_tick() {
    let target = Rc::new(Cell::new(10.0f32));
    let (log, sink) = recorder::<f32>();
    let to = Rc::clone(&target);
    let mut tween = Tween::new(
        TimelineConfig::new(1.0),
        FloatInterp,
        || 0.0f32,
        move || to.get(),
        sink,
    )
    .unwrap();

    tween.seek(0.5);
    approx(last(&log), 5.0, 1e-6);
    target.set(20.0);
    tween.seek(0.5);
    approx(last(&log), 10.0, 1e-6);
}
