//! # Servo Move Benchmark

use std::convert::Infallible;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use servo_lib::servo_ctrl::{PwmDriver, PwmPin, ServoCtrl};

/// Driver which discards every command.
struct NullDriver;

impl PwmDriver for NullDriver {
    type Error = Infallible;

    fn set_frequency(&mut self, _freq_hz: f64) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_duty_cycle(&mut self, _pin: PwmPin, _duty_cycle: f64) -> Result<(), Self::Error> {
        Ok(())
    }
}

fn servo_move_benchmark(c: &mut Criterion) {
    let mut servos = ServoCtrl::new(NullDriver, None, None).unwrap();
    servos.configure(1, 0.03, 0.12).unwrap();

    c.bench_function("ServoCtrl::move_to", |b| {
        b.iter(|| servos.move_to(black_box(1), black_box(0.35)).unwrap())
    });

    c.bench_function("ServoCtrl::set_duty_cycle", |b| {
        b.iter(|| servos.set_duty_cycle(black_box(2), black_box(0.075)).unwrap())
    });
}

criterion_group!(benches, servo_move_benchmark);
criterion_main!(benches);
