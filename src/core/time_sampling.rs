//! Time sampling for animated properties.
//!
//! A [`TimeSamplingType`] classifies the pattern (uniform, cyclic, acyclic);
//! a [`TimeSampling`] binds it to concrete times and maps sample indices to
//! times and back. Archives keep one deduplicated table of these and
//! properties refer to entries by index.

use std::fmt;
use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::core::SampleInterp;
use crate::util::{Chrono, Error, Result};

/// Samples-per-cycle sentinel marking acyclic sampling.
pub const ACYCLIC_NUM_SAMPLES: u32 = u32::MAX;

/// Time-per-cycle sentinel marking acyclic sampling (chrono max / 32).
pub const ACYCLIC_TIME_PER_CYCLE: Chrono = f64::MAX / 32.0;

/// Classification of a sampling pattern.
///
/// Exactly one of uniform (one sample per cycle), cyclic (a fixed number of
/// samples per cycle) or acyclic (both sentinels) holds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeSamplingType {
    num_samples_per_cycle: u32,
    time_per_cycle: Chrono,
}

impl TimeSamplingType {
    /// Acyclic sampling.
    pub const ACYCLIC: Self = Self {
        num_samples_per_cycle: ACYCLIC_NUM_SAMPLES,
        time_per_cycle: ACYCLIC_TIME_PER_CYCLE,
    };

    /// Validate and classify.
    ///
    /// Fails when `time_per_cycle` is not a finite positive number, when only
    /// one of the two acyclic sentinels is given, or when
    /// `num_samples_per_cycle` is zero.
    pub fn new(num_samples_per_cycle: u32, time_per_cycle: Chrono) -> Result<Self> {
        let acyclic_samples = num_samples_per_cycle == ACYCLIC_NUM_SAMPLES;
        let acyclic_time = time_per_cycle == ACYCLIC_TIME_PER_CYCLE;

        if acyclic_samples && acyclic_time {
            return Ok(Self::ACYCLIC);
        }
        if acyclic_samples || acyclic_time {
            return Err(Error::time_sampling(format!(
                "acyclic sentinels must be used together (samples per cycle {num_samples_per_cycle}, time per cycle {time_per_cycle})"
            )));
        }
        if num_samples_per_cycle == 0 {
            return Err(Error::time_sampling("samples per cycle must be at least 1"));
        }
        if !(time_per_cycle > 0.0 && time_per_cycle.is_finite()) {
            return Err(Error::time_sampling(format!(
                "time per cycle must be finite and > 0, got {time_per_cycle}"
            )));
        }
        Ok(Self { num_samples_per_cycle, time_per_cycle })
    }

    /// One sample every `time_per_cycle`.
    pub fn uniform(time_per_cycle: Chrono) -> Result<Self> {
        Self::new(1, time_per_cycle)
    }

    /// `num_samples_per_cycle` samples repeating every `time_per_cycle`.
    pub fn cyclic(num_samples_per_cycle: u32, time_per_cycle: Chrono) -> Result<Self> {
        Self::new(num_samples_per_cycle, time_per_cycle)
    }

    pub const fn acyclic() -> Self {
        Self::ACYCLIC
    }

    #[inline]
    pub fn is_uniform(&self) -> bool {
        self.num_samples_per_cycle == 1
    }

    #[inline]
    pub fn is_cyclic(&self) -> bool {
        self.num_samples_per_cycle > 1 && self.num_samples_per_cycle != ACYCLIC_NUM_SAMPLES
    }

    #[inline]
    pub fn is_acyclic(&self) -> bool {
        self.num_samples_per_cycle == ACYCLIC_NUM_SAMPLES
    }

    #[inline]
    pub fn num_samples_per_cycle(&self) -> u32 {
        self.num_samples_per_cycle
    }

    #[inline]
    pub fn time_per_cycle(&self) -> Chrono {
        self.time_per_cycle
    }
}

impl Default for TimeSamplingType {
    fn default() -> Self {
        Self { num_samples_per_cycle: 1, time_per_cycle: 1.0 }
    }
}

impl fmt::Display for TimeSamplingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_acyclic() {
            f.write_str("acyclic")
        } else if self.is_uniform() {
            write!(f, "uniform({})", self.time_per_cycle)
        } else {
            write!(f, "cyclic({} per {})", self.num_samples_per_cycle, self.time_per_cycle)
        }
    }
}

/// Concrete sample times for a [`TimeSamplingType`].
///
/// For uniform and cyclic sampling `sample_times` are offsets of the samples
/// within one cycle, relative to `start_time`. For acyclic sampling they are
/// absolute, strictly increasing times and may grow through
/// [`append_time`](Self::append_time).
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSampling {
    sampling_type: TimeSamplingType,
    start_time: Chrono,
    sample_times: Vec<Chrono>,
}

impl TimeSampling {
    /// General constructor; validates the times against the type.
    pub fn new(
        sampling_type: TimeSamplingType,
        start_time: Chrono,
        sample_times: Vec<Chrono>,
    ) -> Result<Self> {
        check_strictly_increasing(&sample_times)?;

        if sampling_type.is_acyclic() {
            return Ok(Self {
                sampling_type,
                start_time: sample_times.first().copied().unwrap_or(0.0),
                sample_times,
            });
        }

        let expected = sampling_type.num_samples_per_cycle() as usize;
        if sample_times.len() != expected {
            return Err(Error::time_sampling(format!(
                "expected {expected} sample times per cycle, got {}",
                sample_times.len()
            )));
        }
        if !start_time.is_finite() {
            return Err(Error::time_sampling(format!("start time must be finite, got {start_time}")));
        }
        // Non-empty: expected >= 1 for non-acyclic types.
        let span = sample_times[sample_times.len() - 1] - sample_times[0];
        if span >= sampling_type.time_per_cycle() {
            return Err(Error::time_sampling(format!(
                "cycle offsets span {span}, which does not fit in a cycle of {}",
                sampling_type.time_per_cycle()
            )));
        }
        Ok(Self { sampling_type, start_time, sample_times })
    }

    /// Uniform sampling starting at `start_time`.
    pub fn uniform(time_per_cycle: Chrono, start_time: Chrono) -> Result<Self> {
        Self::new(TimeSamplingType::uniform(time_per_cycle)?, start_time, vec![0.0])
    }

    /// Cyclic sampling with per-cycle `offsets` relative to `start_time`.
    pub fn cyclic(time_per_cycle: Chrono, start_time: Chrono, offsets: Vec<Chrono>) -> Result<Self> {
        let count = u32::try_from(offsets.len())
            .map_err(|_| Error::time_sampling("too many samples per cycle"))?;
        Self::new(TimeSamplingType::cyclic(count, time_per_cycle)?, start_time, offsets)
    }

    /// Acyclic sampling from explicit, strictly increasing times.
    pub fn acyclic(times: Vec<Chrono>) -> Result<Self> {
        Self::new(TimeSamplingType::ACYCLIC, 0.0, times)
    }

    /// One sample per second starting at 0. Always entry 0 of an archive table.
    pub fn identity() -> Self {
        Self {
            sampling_type: TimeSamplingType::default(),
            start_time: 0.0,
            sample_times: vec![0.0],
        }
    }

    #[inline]
    pub fn sampling_type(&self) -> &TimeSamplingType {
        &self.sampling_type
    }

    #[inline]
    pub fn start_time(&self) -> Chrono {
        self.start_time
    }

    /// Per-cycle offsets (uniform/cyclic) or the absolute log (acyclic).
    #[inline]
    pub fn sample_times(&self) -> &[Chrono] {
        &self.sample_times
    }

    /// Append an observed time to an acyclic log.
    ///
    /// The time must be strictly greater than the last one; bisection relies
    /// on that ordering.
    pub fn append_time(&mut self, time: Chrono) -> Result<()> {
        if !self.sampling_type.is_acyclic() {
            return Err(Error::time_sampling(format!(
                "cannot append sample times to {} sampling",
                self.sampling_type
            )));
        }
        if !time.is_finite() {
            return Err(Error::time_sampling(format!("sample time must be finite, got {time}")));
        }
        if let Some(&last) = self.sample_times.last() {
            if time <= last {
                return Err(Error::time_sampling(format!(
                    "acyclic sample times must be strictly increasing: {time} after {last}"
                )));
            }
        } else {
            self.start_time = time;
        }
        self.sample_times.push(time);
        Ok(())
    }

    /// Time of sample `index`.
    ///
    /// Acyclic sampling can only answer for indices inside its log.
    pub fn sample_time(&self, index: usize) -> Result<Chrono> {
        if self.sampling_type.is_acyclic() && index >= self.sample_times.len() {
            return Err(Error::SampleOutOfBounds { index, count: self.sample_times.len() });
        }
        Ok(self.time_at(index))
    }

    /// First and last sample time for `num_samples` samples.
    pub fn time_range(&self, num_samples: usize) -> Option<(Chrono, Chrono)> {
        let n = self.usable_samples(num_samples);
        (n > 0).then(|| (self.time_at(0), self.time_at(n - 1)))
    }

    /// Largest index whose time is `<= time`, clamped to `[0, num_samples)`.
    pub fn floor_index(&self, time: Chrono, num_samples: usize) -> (usize, Chrono) {
        let n = self.usable_samples(num_samples);
        if n == 0 {
            return (0, 0.0);
        }

        let first = self.time_at(0);
        if time.is_nan() || time <= first {
            return (0, first);
        }
        let last_index = n - 1;
        let last = self.time_at(last_index);
        if time >= last {
            return (last_index, last);
        }

        let index = if self.sampling_type.is_acyclic() {
            // time > first, so at least one entry passes.
            self.sample_times[..n].partition_point(|&t| t <= time) - 1
        } else {
            let per_cycle = self.sample_times.len();
            let tpc = self.sampling_type.time_per_cycle();
            let cycle = ((time - self.start_time - self.sample_times[0]) / tpc).floor().max(0.0) as usize;
            let cycle_start = self.start_time + cycle as Chrono * tpc;
            let within = self.sample_times.partition_point(|&offset| cycle_start + offset <= time);
            let guess = (cycle * per_cycle + within).saturating_sub(1).min(last_index);
            self.settle_floor(guess, time, last_index)
        };
        (index, self.time_at(index))
    }

    /// Smallest index whose time is `>= time`, clamped to `[0, num_samples)`.
    pub fn ceil_index(&self, time: Chrono, num_samples: usize) -> (usize, Chrono) {
        let n = self.usable_samples(num_samples);
        if n == 0 {
            return (0, 0.0);
        }
        let (floor, floor_time) = self.floor_index(time, n);
        if floor_time >= time || floor + 1 >= n {
            return (floor, floor_time);
        }
        (floor + 1, self.time_at(floor + 1))
    }

    /// Index whose time is closest to `time`. Ties go to the earlier sample.
    pub fn near_index(&self, time: Chrono, num_samples: usize) -> (usize, Chrono) {
        let (floor, floor_time) = self.floor_index(time, num_samples);
        let (ceil, ceil_time) = self.ceil_index(time, num_samples);
        if floor == ceil || time - floor_time <= ceil_time - time {
            (floor, floor_time)
        } else {
            (ceil, ceil_time)
        }
    }

    /// Bracketing samples and blend factor for `time`.
    pub fn interp(&self, time: Chrono, num_samples: usize) -> SampleInterp {
        let (floor, floor_time) = self.floor_index(time, num_samples);
        let (ceil, ceil_time) = self.ceil_index(time, num_samples);
        if floor == ceil || ceil_time <= floor_time {
            return SampleInterp::exact(floor);
        }
        SampleInterp::lerp(floor, ceil, (time - floor_time) / (ceil_time - floor_time))
    }

    /// Acyclic logs cannot answer past their last entry.
    #[inline]
    fn usable_samples(&self, num_samples: usize) -> usize {
        if self.sampling_type.is_acyclic() {
            num_samples.min(self.sample_times.len())
        } else {
            num_samples
        }
    }

    /// Caller guarantees `index` is inside an acyclic log.
    #[inline]
    fn time_at(&self, index: usize) -> Chrono {
        if self.sampling_type.is_acyclic() {
            return self.sample_times[index];
        }
        let per_cycle = self.sample_times.len();
        let cycle = index / per_cycle;
        self.start_time
            + cycle as Chrono * self.sampling_type.time_per_cycle()
            + self.sample_times[index % per_cycle]
    }

    /// Correct an arithmetic guess that rounding pushed across a neighbour.
    fn settle_floor(&self, mut index: usize, time: Chrono, last_index: usize) -> usize {
        while index < last_index && self.time_at(index + 1) <= time {
            index += 1;
        }
        while index > 0 && self.time_at(index) > time {
            index -= 1;
        }
        index
    }
}

impl Default for TimeSampling {
    fn default() -> Self {
        Self::identity()
    }
}

fn check_strictly_increasing(times: &[Chrono]) -> Result<()> {
    if let Some(bad) = times.iter().find(|t| !t.is_finite()) {
        return Err(Error::time_sampling(format!("sample time must be finite, got {bad}")));
    }
    if let Some(pair) = times.windows(2).find(|w| w[1] <= w[0]) {
        return Err(Error::time_sampling(format!(
            "sample times must be strictly increasing: {} after {}",
            pair[1], pair[0]
        )));
    }
    Ok(())
}

/// Serialize a time sampling table.
///
/// Per entry, little-endian: `max_samples: u32, time_per_cycle: f64,
/// start_time: f64, count: u32, times: [f64; count]`. Acyclic entries carry
/// [`ACYCLIC_TIME_PER_CYCLE`].
pub fn encode_time_samplings(table: &[TimeSampling], max_samples: &[u32]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    for (i, ts) in table.iter().enumerate() {
        let count = u32::try_from(ts.sample_times.len())
            .map_err(|_| Error::invalid("too many sample times"))?;
        buf.write_u32::<LittleEndian>(max_samples.get(i).copied().unwrap_or(0))?;
        buf.write_f64::<LittleEndian>(ts.sampling_type.time_per_cycle())?;
        buf.write_f64::<LittleEndian>(ts.start_time)?;
        buf.write_u32::<LittleEndian>(count)?;
        for &t in &ts.sample_times {
            buf.write_f64::<LittleEndian>(t)?;
        }
    }
    Ok(buf)
}

/// Parse a table written by [`encode_time_samplings`].
pub fn decode_time_samplings(buf: &[u8]) -> Result<(Vec<TimeSampling>, Vec<u32>)> {
    let truncated = |_| Error::invalid("time sampling table truncated");
    let mut cursor = Cursor::new(buf);
    let mut table = Vec::new();
    let mut max_samples = Vec::new();

    while (cursor.position() as usize) < buf.len() {
        let max = cursor.read_u32::<LittleEndian>().map_err(truncated)?;
        let tpc = cursor.read_f64::<LittleEndian>().map_err(truncated)?;
        let start = cursor.read_f64::<LittleEndian>().map_err(truncated)?;
        let count = cursor.read_u32::<LittleEndian>().map_err(truncated)? as usize;
        let remaining = buf.len() - cursor.position() as usize;
        if count.checked_mul(8).map_or(true, |bytes| bytes > remaining) {
            return Err(Error::invalid("time sampling table truncated"));
        }
        let mut times = Vec::with_capacity(count);
        for _ in 0..count {
            times.push(cursor.read_f64::<LittleEndian>().map_err(truncated)?);
        }

        let ts = if tpc == ACYCLIC_TIME_PER_CYCLE {
            TimeSampling::acyclic(times)?
        } else {
            let per_cycle = u32::try_from(count).map_err(|_| Error::invalid("bad sample count"))?;
            TimeSampling::new(TimeSamplingType::new(per_cycle, tpc)?, start, times)?
        };
        table.push(ts);
        max_samples.push(max);
    }

    Ok((table, max_samples))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-10;

    #[test]
    fn test_type_validation_grid() {
        let counts = [0u32, 1, 2, 7, ACYCLIC_NUM_SAMPLES];
        let times = [
            -1.0,
            0.0,
            1.0 / 24.0,
            1.0,
            f64::INFINITY,
            f64::NAN,
            ACYCLIC_TIME_PER_CYCLE,
        ];
        for &n in &counts {
            for &tpc in &times {
                let acyclic_pair = n == ACYCLIC_NUM_SAMPLES && tpc == ACYCLIC_TIME_PER_CYCLE;
                let regular = n > 0
                    && n != ACYCLIC_NUM_SAMPLES
                    && tpc > 0.0
                    && tpc.is_finite()
                    && tpc != ACYCLIC_TIME_PER_CYCLE;
                let result = TimeSamplingType::new(n, tpc);
                assert_eq!(result.is_ok(), acyclic_pair || regular, "n={n} tpc={tpc}");
            }
        }
    }

    #[test]
    fn test_type_classification() {
        let uniform = TimeSamplingType::uniform(0.5).unwrap();
        let cyclic = TimeSamplingType::cyclic(3, 0.5).unwrap();
        let acyclic = TimeSamplingType::acyclic();
        for (t, expect) in [(uniform, [true, false, false]), (cyclic, [false, true, false]), (acyclic, [false, false, true])] {
            assert_eq!([t.is_uniform(), t.is_cyclic(), t.is_acyclic()], expect);
        }
        assert_eq!(TimeSamplingType::new(1, 0.5).unwrap(), uniform);
        assert_eq!(TimeSamplingType::new(ACYCLIC_NUM_SAMPLES, ACYCLIC_TIME_PER_CYCLE).unwrap(), acyclic);
    }

    #[test]
    fn test_uniform_sample_time() {
        let ts = TimeSampling::uniform(2.0, 10.0).unwrap();
        assert_eq!(ts.sample_time(0).unwrap(), 10.0);
        assert_eq!(ts.sample_time(5).unwrap(), 20.0);
    }

    #[test]
    fn test_cyclic_sample_time() {
        let ts = TimeSampling::cyclic(1.0, 0.0, vec![0.0, 0.1, 0.2, 0.3]).unwrap();
        assert!((ts.sample_time(6).unwrap() - 1.2).abs() < EPS);
        assert!((ts.sample_time(3).unwrap() - 0.3).abs() < EPS);
        assert!((ts.sample_time(8).unwrap() - 2.0).abs() < EPS);
    }

    #[test]
    fn test_acyclic_queries() {
        let ts = TimeSampling::acyclic(vec![0.0, 0.5, 3.0, 3.1]).unwrap();
        assert_eq!(ts.floor_index(2.0, 4).0, 1);
        assert_eq!(ts.ceil_index(2.0, 4).0, 2);
        assert_eq!(ts.near_index(2.9, 4).0, 2);
        assert_eq!(ts.near_index(1.0, 4).0, 1);
        assert!(ts.sample_time(4).is_err());
    }

    #[test]
    fn test_acyclic_clamps_to_log_and_count() {
        let ts = TimeSampling::acyclic(vec![0.0, 0.5, 3.0, 3.1]).unwrap();
        // Only two samples written so far.
        assert_eq!(ts.floor_index(10.0, 2), (1, 0.5));
        assert_eq!(ts.ceil_index(10.0, 2), (1, 0.5));
        // More samples than logged times.
        assert_eq!(ts.floor_index(10.0, 99), (3, 3.1));
        assert_eq!(ts.floor_index(-5.0, 4), (0, 0.0));
        assert_eq!(ts.ceil_index(-5.0, 4), (0, 0.0));
    }

    #[test]
    fn test_zero_samples() {
        let ts = TimeSampling::uniform(1.0, 3.0).unwrap();
        assert_eq!(ts.floor_index(5.0, 0), (0, 0.0));
        assert_eq!(ts.ceil_index(5.0, 0), (0, 0.0));
        assert_eq!(ts.near_index(5.0, 0), (0, 0.0));
        assert_eq!(ts.time_range(0), None);
    }

    #[test]
    fn test_uniform_exact_frames() {
        let ts = TimeSampling::uniform(1.0 / 24.0, 0.0).unwrap();
        for i in 0..240 {
            let t = ts.sample_time(i).unwrap();
            assert_eq!(ts.floor_index(t, 240).0, i);
            assert_eq!(ts.ceil_index(t, 240).0, i);
            assert_eq!(ts.near_index(t, 240).0, i);
        }
    }

    fn check_boundaries(ts: &TimeSampling, n: usize) {
        let delta = 1e-7;
        for i in 0..n {
            let t = ts.sample_time(i).unwrap();
            assert_eq!(ts.floor_index(t, n).0, i, "floor exact {i}");
            assert_eq!(ts.ceil_index(t, n).0, i, "ceil exact {i}");
            assert_eq!(ts.near_index(t, n).0, i, "near exact {i}");

            let before = ts.floor_index(t - delta, n).0;
            assert_eq!(before, i.saturating_sub(1), "floor before {i}");
            assert_eq!(ts.ceil_index(t - delta, n).0, i, "ceil before {i}");

            assert_eq!(ts.floor_index(t + delta, n).0, i, "floor after {i}");
            assert_eq!(ts.ceil_index(t + delta, n).0, (i + 1).min(n - 1), "ceil after {i}");
        }
    }

    #[test]
    fn test_cyclic_boundaries_exhaustive() {
        let ts = TimeSampling::cyclic(1.0, 0.0, vec![0.0, 0.1, 0.2, 0.3]).unwrap();
        check_boundaries(&ts, 21);

        let shifted = TimeSampling::cyclic(1.0 / 24.0, 2.5, vec![0.0, 0.01, 0.03]).unwrap();
        check_boundaries(&shifted, 50);

        // Offsets that do not start at zero.
        let offset = TimeSampling::cyclic(0.5, -1.0, vec![0.2, 0.25, 0.4]).unwrap();
        check_boundaries(&offset, 30);
    }

    #[test]
    fn test_uniform_boundaries_exhaustive() {
        let ts = TimeSampling::uniform(0.1, 7.0).unwrap();
        check_boundaries(&ts, 100);
    }

    #[test]
    fn test_acyclic_boundaries_exhaustive() {
        let ts = TimeSampling::acyclic(vec![-2.0, 0.0, 0.001, 1.0, 1.5, 100.0]).unwrap();
        check_boundaries(&ts, 6);
    }

    #[test]
    fn test_cyclic_between_cycles() {
        let ts = TimeSampling::cyclic(1.0, 0.0, vec![0.0, 0.1, 0.2, 0.3]).unwrap();
        // Gap between 0.3 (index 3) and 1.0 (index 4).
        assert_eq!(ts.floor_index(0.95, 12).0, 3);
        assert_eq!(ts.ceil_index(0.95, 12).0, 4);
        assert_eq!(ts.near_index(0.95, 12).0, 4);
        assert_eq!(ts.near_index(0.4, 12).0, 3);
    }

    #[test]
    fn test_near_tie_prefers_floor() {
        let ts = TimeSampling::uniform(1.0, 0.0).unwrap();
        assert_eq!(ts.near_index(2.5, 10).0, 2);
    }

    #[test]
    fn test_interp() {
        let ts = TimeSampling::uniform(1.0, 0.0).unwrap();
        let interp = ts.interp(2.25, 10);
        assert_eq!((interp.floor_index, interp.ceil_index), (2, 3));
        assert!((interp.alpha - 0.25).abs() < EPS);
        assert!(ts.interp(4.0, 10).is_exact());
        assert_eq!(ts.interp(50.0, 10).floor_index, 9);
    }

    #[test]
    fn test_time_range() {
        let ts = TimeSampling::uniform(0.5, 1.0).unwrap();
        assert_eq!(ts.time_range(5), Some((1.0, 3.0)));
    }

    #[test]
    fn test_acyclic_append() {
        let mut ts = TimeSampling::acyclic(Vec::new()).unwrap();
        ts.append_time(0.25).unwrap();
        ts.append_time(1.0).unwrap();
        assert_eq!(ts.start_time(), 0.25);
        assert!(ts.append_time(1.0).is_err());
        assert!(ts.append_time(0.5).is_err());
        assert_eq!(ts.sample_times(), &[0.25, 1.0]);

        let mut uniform = TimeSampling::identity();
        assert!(uniform.append_time(2.0).is_err());
    }

    #[test]
    fn test_construction_errors() {
        assert!(TimeSampling::acyclic(vec![0.0, 1.0, 1.0]).is_err());
        assert!(TimeSampling::acyclic(vec![0.0, f64::NAN]).is_err());
        assert!(TimeSampling::cyclic(1.0, 0.0, vec![0.0, 1.0]).is_err());
        assert!(TimeSampling::cyclic(1.0, 0.0, vec![0.5, 0.1]).is_err());
        assert!(TimeSampling::uniform(0.0, 0.0).is_err());
        assert!(TimeSampling::new(TimeSamplingType::cyclic(3, 1.0).unwrap(), 0.0, vec![0.0]).is_err());
    }

    #[test]
    fn test_table_codec() {
        let table = vec![
            TimeSampling::identity(),
            TimeSampling::uniform(1.0 / 24.0, 1.0).unwrap(),
            TimeSampling::cyclic(1.0, 0.5, vec![0.0, 0.1, 0.2]).unwrap(),
            TimeSampling::acyclic(vec![0.0, 0.5, 3.0]).unwrap(),
            TimeSampling::acyclic(Vec::new()).unwrap(),
        ];
        let buf = encode_time_samplings(&table, &[1, 24, 3, 3]).unwrap();
        let (decoded, max) = decode_time_samplings(&buf).unwrap();
        assert_eq!(decoded, table);
        assert_eq!(max, vec![1, 24, 3, 3, 0]);

        assert!(decode_time_samplings(&buf[..buf.len() - 3]).is_err());
    }
}
