#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]

pub mod slew_rate_limiter;

pub use slew_rate_limiter::{SlewRateLimiter, SmoothingExponent};
