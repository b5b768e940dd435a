//! Toothed-line synthesis.
//!
//! An edge of length `total_length` carries `tooth_count` teeth of
//! `tooth_length`, separated by `tooth_spacing`. Whatever is left over (the
//! offset) goes to the ends according to the alignment. A *mother* edge has
//! flat tooth runs (sockets) and raised offsets/spacings; a plain edge has
//! raised teeth. The two interlock.
//!
//! Tolerance is applied per run: convex runs grow by `tolerance`, flat runs
//! shrink by it, with half weight on the first and last run since those are
//! bounded by a single joint.

use crate::config::{float_cmp, EPS};
use crate::error::{BoxError, Result};
use crate::model::{Run, ToothedEdge};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Where the leftover length goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Split evenly between both ends.
    #[default]
    Center,
    /// All of it before the first tooth; teeth sit against the far end.
    Right,
}

impl FromStr for Alignment {
    type Err = BoxError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "center" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            _ => Err(BoxError::InvalidAlignment {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alignment::Center => write!(f, "center"),
            Alignment::Right => write!(f, "right"),
        }
    }
}

/// Parameters of one toothed edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToothedLineSpec {
    pub total_length: f64,
    pub tooth_count: usize,
    pub tooth_length: f64,
    pub tooth_spacing: f64,
    pub tooth_depth: f64,
    pub is_mother: bool,
    pub alignment: Alignment,
    /// Signed fit tolerance, positive tightens.
    pub tolerance: f64,
}

impl ToothedLineSpec {
    /// Single centred tooth, no spacing, no tolerance.
    pub fn single(total_length: f64, tooth_length: f64, tooth_depth: f64) -> Self {
        Self {
            total_length,
            tooth_count: 1,
            tooth_length,
            tooth_spacing: 0.0,
            tooth_depth,
            is_mother: false,
            alignment: Alignment::Center,
            tolerance: 0.0,
        }
    }

    pub fn with_count(mut self, tooth_count: usize, tooth_spacing: f64) -> Self {
        self.tooth_count = tooth_count;
        self.tooth_spacing = tooth_spacing;
        self
    }

    pub fn with_mother(mut self, is_mother: bool) -> Self {
        self.is_mother = is_mother;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.tooth_count == 0 {
            return Err(BoxError::InvalidToothCount {
                count: self.tooth_count,
            });
        }
        check("total_length", self.total_length, |v| v > 0.0, "positive")?;
        check("tooth_length", self.tooth_length, |v| v > 0.0, "positive")?;
        check("tooth_spacing", self.tooth_spacing, |v| v >= 0.0, "zero or positive")?;
        check("tooth_depth", self.tooth_depth, |v| v >= 0.0, "zero or positive")?;
        check("tolerance", self.tolerance, |_| true, "finite")?;
        Ok(())
    }

    /// Length left over after teeth and spacings, snapped to zero within EPS.
    pub fn offset(&self) -> Result<f64> {
        self.validate()?;
        let required = self.tooth_count as f64 * self.tooth_length
            + (self.tooth_count - 1) as f64 * self.tooth_spacing;
        let offset = self.total_length - required;
        if offset < -EPS {
            return Err(BoxError::NegativeOffset {
                total_length: self.total_length,
                required,
            });
        }
        Ok(if float_cmp::approx_zero(offset) {
            0.0
        } else {
            offset
        })
    }

    /// Leading and trailing offset.
    fn split_offset(&self) -> Result<(f64, f64)> {
        let offset = self.offset()?;
        Ok(match self.alignment {
            Alignment::Center => (offset / 2.0, offset / 2.0),
            Alignment::Right => (offset, 0.0),
        })
    }

    /// Runs before tolerance is applied.
    pub fn nominal_runs(&self) -> Result<Vec<Run>> {
        let (leading, trailing) = self.split_offset()?;
        let mut runs = Vec::with_capacity(2 * self.tooth_count + 1);

        if leading != 0.0 {
            runs.push(Run::new(leading, self.is_mother));
        }
        for i in 0..self.tooth_count {
            runs.push(Run::new(self.tooth_length, !self.is_mother));
            if i + 1 < self.tooth_count {
                runs.push(Run::new(self.tooth_spacing, self.is_mother));
            }
        }
        if trailing != 0.0 {
            runs.push(Run::new(trailing, self.is_mother));
        }
        Ok(runs)
    }

    /// Nominal `(start, length)` of every tooth along the edge.
    ///
    /// Used to place cut-outs that must line up with teeth.
    pub fn tooth_spans(&self) -> Result<Vec<(f64, f64)>> {
        let (leading, _) = self.split_offset()?;
        Ok((0..self.tooth_count)
            .map(|i| {
                let start = leading + i as f64 * (self.tooth_length + self.tooth_spacing);
                (start, self.tooth_length)
            })
            .collect())
    }
}

fn check(field: &str, value: f64, ok: impl Fn(f64) -> bool, expected: &'static str) -> Result<()> {
    if value.is_finite() && ok(value) {
        Ok(())
    } else {
        Err(BoxError::dimension(field, value, expected))
    }
}

/// Tolerance weight of run `index` in an edge of `count` runs.
pub fn tolerance_weight(index: usize, count: usize) -> f64 {
    if index == 0 || index + 1 == count {
        0.5
    } else {
        1.0
    }
}

/// Net change in edge length caused by `tolerance` on these runs.
pub fn net_tolerance(runs: &[Run], tolerance: f64) -> f64 {
    runs.iter()
        .enumerate()
        .map(|(i, run)| {
            let sign = if run.is_convex { 1.0 } else { -1.0 };
            tolerance * sign * tolerance_weight(i, runs.len())
        })
        .sum()
}

/// Apply a signed tolerance to the runs.
pub fn apply_tolerance(runs: &mut [Run], tolerance: f64) -> Result<()> {
    let count = runs.len();
    for (index, run) in runs.iter_mut().enumerate() {
        let sign = if run.is_convex { 1.0 } else { -1.0 };
        run.length += tolerance * sign * tolerance_weight(index, count);
        if run.length < 0.0 {
            return Err(BoxError::NegativeRunLength {
                index,
                length: run.length,
                tolerance,
            });
        }
    }
    Ok(())
}

/// Build the edge described by `spec`.
pub fn synthesize(spec: &ToothedLineSpec) -> Result<ToothedEdge> {
    let mut runs = spec.nominal_runs()?;
    apply_tolerance(&mut runs, spec.tolerance)?;

    debug!(
        "Synthesized edge: length={} teeth={} mother={} align={} tol={} runs={}",
        spec.total_length,
        spec.tooth_count,
        spec.is_mother,
        spec.alignment,
        spec.tolerance,
        runs.len()
    );

    Ok(ToothedEdge::from_runs(runs, spec.tooth_depth))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Line, Path};
    use crate::transform::Transform;

    const EPS: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    fn spec_800(spacing: f64, mother: bool, tolerance: f64) -> ToothedLineSpec {
        ToothedLineSpec::single(800.0, 100.0, 14.0)
            .with_count(2, spacing)
            .with_mother(mother)
            .with_tolerance(tolerance)
    }

    // ==================== alignment tests ====================

    #[test]
    fn test_alignment_parse() {
        assert_eq!("center".parse::<Alignment>().unwrap(), Alignment::Center);
        assert_eq!(" RIGHT ".parse::<Alignment>().unwrap(), Alignment::Right);
        let err = "left".parse::<Alignment>().unwrap_err();
        assert!(err.is_configuration_error());
        assert!(matches!(err, BoxError::InvalidAlignment { .. }));
    }

    // ==================== offset tests ====================

    #[test]
    fn test_negative_offset_fails() {
        let spec = ToothedLineSpec::single(100.0, 60.0, 5.0).with_count(2, 0.0);
        match synthesize(&spec) {
            Err(BoxError::NegativeOffset {
                total_length,
                required,
            }) => {
                assert!(approx_eq(total_length, 100.0));
                assert!(approx_eq(required, 120.0));
            }
            other => panic!("Expected NegativeOffset, got {:?}", other),
        }
    }

    #[test]
    fn test_offset_within_eps_snaps_to_zero() {
        // 3 * (250/3) + 0 spacing = 250 up to rounding noise
        let spec = ToothedLineSpec::single(250.0, 250.0 / 3.0, 6.0).with_count(3, 0.0);
        assert_eq!(spec.offset().unwrap(), 0.0);
        let runs = spec.nominal_runs().unwrap();
        // No offset runs, three teeth and two zero-length spacings.
        assert_eq!(runs.len(), 5);
        assert!(runs[0].is_convex);
    }

    #[test]
    fn test_tiny_negative_offset_is_not_an_error() {
        let spec = ToothedLineSpec::single(100.0, 100.00005, 1.0);
        assert_eq!(spec.offset().unwrap(), 0.0);
    }

    // ==================== degenerate input tests ====================

    #[test]
    fn test_zero_teeth_is_configuration_error() {
        let spec = ToothedLineSpec::single(100.0, 10.0, 1.0).with_count(0, 0.0);
        let err = synthesize(&spec).unwrap_err();
        assert!(matches!(err, BoxError::InvalidToothCount { count: 0 }));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_zero_length_is_configuration_error() {
        let spec = ToothedLineSpec::single(0.0, 10.0, 1.0);
        assert!(matches!(
            synthesize(&spec),
            Err(BoxError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_negative_depth_is_configuration_error() {
        let spec = ToothedLineSpec::single(100.0, 10.0, -1.0);
        let err = synthesize(&spec).unwrap_err();
        assert!(err.to_string().contains("tooth_depth"));
    }

    #[test]
    fn test_tolerance_cannot_make_runs_negative() {
        // Leading offset of 0.05 shrinks by 0.5 * 1.0
        let spec = ToothedLineSpec::single(10.1, 10.0, 1.0).with_tolerance(1.0);
        assert!(matches!(
            synthesize(&spec),
            Err(BoxError::NegativeRunLength { index: 0, .. })
        ));
    }

    // ==================== run layout tests ====================

    #[test]
    fn test_center_scenario_without_tolerance() {
        let edge = synthesize(&spec_800(200.0, false, 0.0)).unwrap();
        let lengths: Vec<f64> = edge.runs.iter().map(|r| r.length).collect();
        let convex: Vec<bool> = edge.runs.iter().map(|r| r.is_convex).collect();
        assert_eq!(lengths, vec![200.0, 100.0, 200.0, 100.0, 200.0]);
        assert_eq!(convex, vec![false, true, false, true, false]);

        let offsets = edge.run_offsets();
        assert!(offsets.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(*offsets.last().unwrap(), 800.0);
    }

    #[test]
    fn test_mother_flips_convexity() {
        let edge = synthesize(&spec_800(200.0, true, 0.0)).unwrap();
        let convex: Vec<bool> = edge.runs.iter().map(|r| r.is_convex).collect();
        assert_eq!(convex, vec![true, false, true, false, true]);
        // First and last runs are equal non-zero offsets
        assert!(edge.runs[0].length > 0.0);
        assert_eq!(edge.runs[0].length, edge.runs[4].length);
        assert_eq!(edge.length(), 800.0);
    }

    #[test]
    fn test_right_alignment_puts_offset_first() {
        let spec = ToothedLineSpec::single(100.0, 20.0, 2.0)
            .with_count(2, 20.0)
            .with_alignment(Alignment::Right);
        let runs = spec.nominal_runs().unwrap();
        let lengths: Vec<f64> = runs.iter().map(|r| r.length).collect();
        assert_eq!(lengths, vec![40.0, 20.0, 20.0, 20.0]);
    }

    #[test]
    fn test_tooth_spans_follow_offset_rule() {
        let spec = ToothedLineSpec::single(800.0, 100.0, 14.0).with_count(2, 300.0);
        let spans = spec.tooth_spans().unwrap();
        assert_eq!(spans, vec![(150.0, 100.0), (550.0, 100.0)]);
    }

    // ==================== tolerance tests ====================

    #[test]
    fn test_tolerance_scenario() {
        let tol = 0.1;
        let nominal = spec_800(200.0, false, 0.0).nominal_runs().unwrap();
        let edge = synthesize(&spec_800(200.0, false, tol)).unwrap();

        for (i, (before, after)) in nominal.iter().zip(&edge.runs).enumerate() {
            let weight = tolerance_weight(i, nominal.len());
            let expected = if before.is_convex {
                before.length + tol * weight
            } else {
                before.length - tol * weight
            };
            assert!(approx_eq(after.length, expected), "run {}", i);
        }

        let net = net_tolerance(&nominal, tol);
        // -0.05 + 0.1 - 0.1 + 0.1 - 0.05
        assert!(approx_eq(net, 0.0));
        assert!(approx_eq(edge.length(), 800.0 + net));
    }

    #[test]
    fn test_net_tolerance_of_single_run() {
        let edge = synthesize(&ToothedLineSpec::single(50.0, 50.0, 1.0).with_tolerance(0.2)).unwrap();
        assert_eq!(edge.runs.len(), 1);
        assert!(approx_eq(edge.length(), 50.1));
    }

    #[test]
    fn test_sum_of_nominal_runs_is_total_length() {
        for count in 1..6 {
            let spec = ToothedLineSpec::single(450.0, 40.0, 10.0).with_count(count, 25.0);
            let runs = spec.nominal_runs().unwrap();
            let sum: f64 = runs.iter().map(|r| r.length).sum();
            assert!(approx_eq(sum, 450.0), "count {}", count);
        }
    }

    #[test]
    fn test_mating_runs_differ_by_twice_tolerance() {
        let tol = 0.15;
        let mother = synthesize(&spec_800(200.0, true, tol)).unwrap();
        let plain = synthesize(&spec_800(200.0, false, tol)).unwrap();
        // Interior tooth runs: flat sockets on the mother, tabs on the other.
        for i in [1, 3] {
            assert!(!mother.runs[i].is_convex);
            assert!(plain.runs[i].is_convex);
            assert!(approx_eq(
                plain.runs[i].length,
                mother.runs[i].length + 2.0 * tol
            ));
        }
    }

    // ==================== geometry tests ====================

    #[test]
    fn test_geometry_line_counts() {
        let edge = synthesize(&spec_800(200.0, false, 0.0)).unwrap();
        // 3 flat runs + 2 convex runs * 3 lines
        assert_eq!(edge.paths.len(), 9);
        assert_eq!(
            edge.paths[1],
            Path::Line(Line::new(200.0, 14.0, 300.0, 14.0))
        );
        let max_y = edge
            .lines()
            .map(|l| l.start.y.max(l.end.y))
            .fold(f64::MIN, f64::max);
        assert_eq!(max_y, 14.0);
    }

    #[test]
    fn test_mirror_twice_is_identity() {
        let edge = synthesize(&spec_800(180.0, true, 0.1)).unwrap();
        for (mx, my) in [(true, false), (false, true), (true, true)] {
            assert_eq!(edge.mirror(mx, my).mirror(mx, my), edge);
        }
    }
}
