/// Resize direction recorded against a fixture.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum ScaleDirection {
    Up,
    Down,
}

impl ScaleDirection {
    pub const ALL: [ScaleDirection; 2] = [ScaleDirection::Up, ScaleDirection::Down];

    /// Directory segment, e.g. `ScaleUp`.
    pub fn segment(self) -> &'static str {
        match self {
            ScaleDirection::Up => "ScaleUp",
            ScaleDirection::Down => "ScaleDown",
        }
    }
}

/// Which axes the recorded resize constrains.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum ScaleAxis {
    None,
    Height,
    Width,
    Both,
}

impl ScaleAxis {
    pub const ALL: [ScaleAxis; 4] = [
        ScaleAxis::None,
        ScaleAxis::Height,
        ScaleAxis::Width,
        ScaleAxis::Both,
    ];

    /// Directory segment, e.g. `ByHeight&Width`.
    pub fn segment(self) -> &'static str {
        match self {
            ScaleAxis::None => "ByNone",
            ScaleAxis::Height => "ByHeight",
            ScaleAxis::Width => "ByWidth",
            ScaleAxis::Both => "ByHeight&Width",
        }
    }
}

/// A resize request recorded (not rasterized) against a fixture.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ScaleSpec {
    pub direction: ScaleDirection,
    pub axis: ScaleAxis,
}

/// Fixed downscale target in pixels, regardless of source dimensions.
const DOWNSCALE_TARGET: u32 = 240;
/// Upscale factor applied to the fixture's own dimension.
const UPSCALE_FACTOR: f64 = 1.5;

impl ScaleSpec {
    pub fn new(direction: ScaleDirection, axis: ScaleAxis) -> Self {
        Self { direction, axis }
    }

    fn target(self, dimension: u32) -> u32 {
        match self.direction {
            ScaleDirection::Up => (f64::from(dimension) * UPSCALE_FACTOR).round() as u32,
            ScaleDirection::Down => DOWNSCALE_TARGET,
        }
    }

    /// Query string recorded in the leaf note's reference link, without the
    /// leading `?`. Dimensions are those of the encoded fixture file.
    pub fn query_suffix(self, fixture_width: u32, fixture_height: u32) -> Option<String> {
        match self.axis {
            ScaleAxis::None => None,
            ScaleAxis::Height => Some(format!("height={}", self.target(fixture_height))),
            ScaleAxis::Width => Some(format!("width={}", self.target(fixture_width))),
            ScaleAxis::Both => Some(format!(
                "height={}&width={}",
                self.target(fixture_height),
                self.target(fixture_width)
            )),
        }
    }
}
