// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::Point;
use understory_gesture_event::coords::PointerCoords;
use understory_gesture_event::hooks::Signal;
use understory_gesture_event::interaction::{Interaction, InteractionId};
use understory_gesture_event::{EventConstructor, InputSample, Phase};

fn samples(len: usize) -> Vec<PointerCoords> {
    (0..len)
        .map(|i| {
            let t = i as f64 * 16.0;
            let p = Point::new(i as f64 * 3.0, (i as f64 * 0.1).sin() * 40.0);
            PointerCoords::new(p, p, t)
        })
        .collect()
}

fn run_gesture(events: &mut EventConstructor<u32>, moves: &[PointerCoords]) -> usize {
    let sample = InputSample::default();
    let mut interaction = Interaction::new(InteractionId(1));
    interaction.pointer_down(Some(1), moves[0]);
    let Ok(start) = events.construct(&interaction, &sample, "drag", Phase::Start, None, None)
    else {
        return 0;
    };
    interaction.push_event(start);

    let mut swipes = 0;
    for coords in &moves[1..] {
        interaction.pointer_move(*coords);
        if let Ok(event) = events.construct(&interaction, &sample, "drag", Phase::Move, None, None)
        {
            interaction.push_event(event);
        }
    }
    if let Ok(end) = events.construct(&interaction, &sample, "drag", Phase::End, None, None) {
        swipes += usize::from(end.swipe.is_some());
    }
    swipes
}

fn bench_construct_gesture(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_event/construct");

    for len in [16usize, 128, 1_024] {
        let moves = samples(len);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("default_hooks", len), &moves, |b, moves| {
            b.iter_batched(
                EventConstructor::<u32>::new,
                |mut events| black_box(run_gesture(&mut events, moves)),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_hook_overhead(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_event/hooks");
    let moves = samples(128);

    // Extra handlers per signal on top of the default delta handler.
    for extra in [0usize, 4, 16] {
        group.bench_with_input(BenchmarkId::new("handlers", extra), &extra, |b, &extra| {
            b.iter_batched(
                || {
                    let mut events = EventConstructor::<u32>::new();
                    for n in 0..extra {
                        for signal in Signal::ALL {
                            events.hooks_mut().on(signal, move |arg| {
                                arg.event.set_extension("n", n as f64);
                            });
                        }
                    }
                    events
                },
                |mut events| black_box(run_gesture(&mut events, &moves)),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_construct_gesture, bench_hook_overhead);
criterion_main!(benches);
