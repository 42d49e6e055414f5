/*
 * unique.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of Mailwire, a transfer-encoding library for mail transport.
 *
 * Mailwire is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Mailwire is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Mailwire.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Unique strings for MIME boundaries and Message-ID values.
//!
//! Time and randomness come from injected sources so output is reproducible under test.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of uniformly distributed integers.
pub trait RandomSource {
    /// A value in `0..bound` (0 when `bound` is 0).
    fn next_below(&mut self, bound: u32) -> u32;
}

impl<R: RngCore> RandomSource for R {
    fn next_below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.gen_range(0..bound)
    }
}

/// Generates `<node><yyMMddHHmmss><millis><random>` strings: 12 digits of UTC time,
/// 3 digits of milliseconds and 4 random digits after the node prefix.
#[derive(Debug)]
pub struct UniqueStringGenerator<R = StdRng, C = SystemClock> {
    rng: R,
    clock: C,
    node: String,
}

impl UniqueStringGenerator<StdRng, SystemClock> {
    /// Generator seeded from the OS, with the process id as node.
    pub fn system() -> Self {
        Self::new(StdRng::from_entropy(), SystemClock, std::process::id().to_string())
    }
}

impl Default for UniqueStringGenerator<StdRng, SystemClock> {
    fn default() -> Self {
        Self::system()
    }
}

impl<R: RandomSource, C: Clock> UniqueStringGenerator<R, C> {
    pub fn new(rng: R, clock: C, node: impl Into<String>) -> Self {
        Self {
            rng,
            clock,
            node: node.into(),
        }
    }

    pub fn node(&self) -> &str {
        &self.node
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> String {
        let now = self.clock.now();
        let millis = now.timestamp_subsec_millis() % 1000;
        let random = self.rng.next_below(10_000);
        format!(
            "{}{}{:03}{:04}",
            self.node,
            now.format("%y%m%d%H%M%S"),
            millis,
            random
        )
    }

    /// Multipart boundary (RFC 2046): fits the 70-character limit for any short node.
    pub fn boundary(&mut self) -> String {
        format!("----=_Part_{}", self.next())
    }

    /// Message-ID value including angle brackets (RFC 5322 section 3.6.4).
    pub fn message_id(&mut self, domain: &str) -> String {
        format!("<{}@{}>", self.next(), domain)
    }
}
