//! Noisy control signal smoothed by the slew rate limiter.
//!
//! Runs a stepped target with pseudo-random noise through a fixed-rate and an
//! adaptive limiter and logs all three signals for comparison.

use simple_logger::SimpleLogger;

use slew_limiter::{SlewRateLimiter, SmoothingExponent};

fn main() {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    let mut fixed = SlewRateLimiter::new(SmoothingExponent::Window16, 4, 2, 0);
    let mut adaptive = SlewRateLimiter::new(SmoothingExponent::Window16, 4, 2, 35);
    let mut rng: u32 = 0x21;

    for n in 0..120 {
        let target = if n < 60 { 200 } else { 800 };
        rng = rng.wrapping_mul(1664525).wrapping_add(1013904223);
        let noise = (rng >> 24) as i32 % 16 - 8;
        let input = target + noise;

        let fixed_out = fixed.process(input);
        let adaptive_out = adaptive.process(input);
        log::info!("in {input:4}  fixed {fixed_out:4}  adaptive {adaptive_out:4}");
    }
}
