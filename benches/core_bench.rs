//! Criterion benchmarks for the tap/hold disambiguation core.
//!
//! Performance targets, mirroring the budget a firmware main loop has to
//! work within:
//! - `process()` on the hot path (no timer, no stack growth): low hundreds
//!   of nanoseconds, since it runs once per scanned matrix event.
//! - A full tap or hold cycle, timers included: still well under a
//!   millisecond, since it only ever runs a handful of times per key press.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tapkey_core::dsl::ModTap;
use tapkey_core::testing::{MockHost, RecordingClassifier};
use tapkey_core::{Action, Classifier, KeyCode, KeyEvent, KeyPosition, Resolution, TapHoldCore};

const CTRL: u8 = 0x01;

/// Dispatches every keycode to the same `ModTap`, the realistic shape of a
/// single-key classifier a firmware would actually ship.
struct SingleModTap(ModTap);

impl<H: tapkey_core::Host> Classifier<H> for SingleModTap {
    fn on_action(&mut self, host: &mut H, _keycode: KeyCode, action: Action, tap_count: u16) -> Resolution {
        self.0.on_action(host, action, tap_count)
    }
}

/// Benchmark: a full tap cycle (press, release inside the tap term) —
/// the most common event a `ModTap`-mapped key ever produces.
fn benchmark_tap_cycle(c: &mut Criterion) {
    let pos = KeyPosition::new(0, 0);
    let kc = KeyCode::new(4);

    c.bench_function("tap_cycle", |b| {
        b.iter(|| {
            let mut host = MockHost::new();
            let mut classifier = SingleModTap(ModTap::new(kc, CTRL, 1).unwrap());
            let mut core: TapHoldCore<MockHost> = TapHoldCore::default();

            core.process(&mut host, &mut classifier, black_box(kc), KeyEvent::press(pos));
            host.advance(20);
            core.process(&mut host, &mut classifier, black_box(kc), KeyEvent::release(pos));
            black_box(host.mods());
        })
    });
}

/// Benchmark: a full hold cycle — press, let the tap timer fire, release —
/// exercising the stage controller's timer scheduling path end to end.
fn benchmark_hold_cycle(c: &mut Criterion) {
    let pos = KeyPosition::new(0, 0);
    let kc = KeyCode::new(4);

    c.bench_function("hold_cycle", |b| {
        b.iter(|| {
            let mut host = MockHost::new();
            let mut classifier = SingleModTap(ModTap::new(kc, CTRL, 1).unwrap());
            let mut core: TapHoldCore<MockHost> = TapHoldCore::default();

            core.process(&mut host, &mut classifier, black_box(kc), KeyEvent::press(pos));
            for timer in host.advance(200) {
                core.on_timeout(&mut host, &mut classifier, timer);
            }
            core.process(&mut host, &mut classifier, black_box(kc), KeyEvent::release(pos));
            black_box(host.mods());
        })
    });
}

/// Benchmark: rolling hold-by-overlap across three keys on the active
/// stack at once — the shape that exercises the deferred-replay path in
/// the action dispatcher most heavily.
fn benchmark_rolling_overlap(c: &mut Criterion) {
    let positions: [KeyPosition; 3] = [
        KeyPosition::new(0, 0),
        KeyPosition::new(0, 1),
        KeyPosition::new(0, 2),
    ];
    let keycodes: [KeyCode; 3] = [KeyCode::new(4), KeyCode::new(5), KeyCode::new(6)];

    c.bench_function("rolling_overlap_3_keys", |b| {
        b.iter(|| {
            let mut host = MockHost::new();
            let mut classifier = RecordingClassifier::new(Resolution::Determined);
            let mut core: TapHoldCore<MockHost> = TapHoldCore::default();

            for i in 0..3 {
                core.process(&mut host, &mut classifier, black_box(keycodes[i]), KeyEvent::press(positions[i]));
                host.advance(5);
            }
            for i in (0..3).rev() {
                core.process(&mut host, &mut classifier, black_box(keycodes[i]), KeyEvent::release(positions[i]));
                host.advance(5);
            }
            for timer in host.advance(200) {
                core.on_timeout(&mut host, &mut classifier, timer);
            }
            black_box(core.active_count());
        })
    });
}

/// Benchmark: the hot-path cost of `process()` itself when it matches an
/// already-active state and stays in `Touch` — no stage transition, no
/// classifier dispatch, no allocation.
fn benchmark_process_no_transition(c: &mut Criterion) {
    let pos = KeyPosition::new(0, 0);
    let other = KeyPosition::new(0, 1);
    let kc = KeyCode::new(4);
    let other_kc = KeyCode::new(5);

    let mut host = MockHost::new();
    let mut classifier = RecordingClassifier::new(Resolution::Determined);
    let mut core: TapHoldCore<MockHost> = TapHoldCore::default();
    core.process(&mut host, &mut classifier, kc, KeyEvent::press(pos));

    c.bench_function("process_unrelated_press_no_transition", |b| {
        b.iter(|| {
            let result = core.process(
                &mut host,
                &mut classifier,
                black_box(other_kc),
                KeyEvent::press(black_box(other)),
            );
            black_box(result);
        })
    });
}

criterion_group!(
    benches,
    benchmark_tap_cycle,
    benchmark_hold_cycle,
    benchmark_rolling_overlap,
    benchmark_process_no_transition,
);
criterion_main!(benches);
