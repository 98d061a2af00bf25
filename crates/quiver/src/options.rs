use crate::config::EngineConfig;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// How arrows are grouped before curving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParallelMode {
    /// Cross-product, projection-overlap and perpendicular-distance tests on the
    /// center-to-center segments.
    #[default]
    Geometric,
    /// Arrows are grouped only when they join the same unordered pair of distinct nodes.
    NodePair,
}

/// Every tunable constant used by the engine. Defaults reproduce the editor's behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Curve offset step for parallel arrows.
    pub base_curve_offset: f64,
    /// Parametric positions of the two Bézier control points along start→end.
    pub control_t1: f64,
    pub control_t2: f64,

    /// Two segment endpoints closer than this (per axis) are "the same point".
    pub shared_endpoint_tolerance: f64,
    /// Relative cross-product bound: `|v1 × v2| <= tol * |v1| * |v2|` means parallel.
    pub parallel_tolerance: f64,
    /// Segments shorter than this are never parallel to anything.
    pub degenerate_length: f64,
    /// Projected overlap must be strictly greater than this.
    pub min_overlap: f64,
    /// Projected ranges whose ends all lie within this distance count as overlapping.
    pub near_identical_tolerance: f64,
    /// Midpoints further apart than this across the shared direction are not grouped.
    pub max_perpendicular_distance: f64,
    /// Perpendicular midpoint distance below which two non-duplicate arrows actually collide.
    pub visual_thickness: f64,
    pub parallel_mode: ParallelMode,

    /// Length of the ray cast from a node center toward the opposite node.
    pub ray_length: f64,
    /// Line segments used to flatten each rounded corner.
    pub corner_segments: usize,

    pub loop_radius_factor: f64,
    pub loop_clearance_factor: f64,
    /// Distance between a self-loop's start and end anchors.
    pub loop_anchor_gap: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            base_curve_offset: 30.0,
            control_t1: 0.3,
            control_t2: 0.7,
            shared_endpoint_tolerance: 1.0,
            parallel_tolerance: 1e-3,
            degenerate_length: 1e-6,
            min_overlap: 10.0,
            near_identical_tolerance: 5.0,
            max_perpendicular_distance: 50.0,
            visual_thickness: 6.0,
            parallel_mode: ParallelMode::Geometric,
            ray_length: 1000.0,
            corner_segments: 12,
            loop_radius_factor: 0.6,
            loop_clearance_factor: 1.5,
            loop_anchor_gap: 10.0,
        }
    }
}

impl LayoutOptions {
    /// Reads the `layout` object of `config`; missing keys keep their defaults.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let Some(layout) = config.layout()? else {
            return Ok(Self::default());
        };
        let opts: Self = serde_json::from_value(layout.clone())?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let opts: Self = serde_json::from_str(text)?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("base_curve_offset", self.base_curve_offset),
            ("shared_endpoint_tolerance", self.shared_endpoint_tolerance),
            ("parallel_tolerance", self.parallel_tolerance),
            ("degenerate_length", self.degenerate_length),
            ("min_overlap", self.min_overlap),
            ("near_identical_tolerance", self.near_identical_tolerance),
            ("max_perpendicular_distance", self.max_perpendicular_distance),
            ("visual_thickness", self.visual_thickness),
            ("loop_anchor_gap", self.loop_anchor_gap),
        ];
        for (key, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(key, format!("expected a finite value >= 0, got {value}")));
            }
        }

        let positive = [
            ("ray_length", self.ray_length),
            ("loop_radius_factor", self.loop_radius_factor),
            ("loop_clearance_factor", self.loop_clearance_factor),
        ];
        for (key, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(key, format!("expected a finite value > 0, got {value}")));
            }
        }

        for (key, value) in [("control_t1", self.control_t1), ("control_t2", self.control_t2)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(key, format!("expected a value in [0, 1], got {value}")));
            }
        }

        if self.corner_segments == 0 {
            return Err(invalid("corner_segments", "expected at least 1".to_string()));
        }
        Ok(())
    }
}

fn invalid(key: &str, message: String) -> Error {
    Error::InvalidConfig {
        key: format!("layout.{key}"),
        message,
    }
}
