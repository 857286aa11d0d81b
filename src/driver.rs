use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::error::MatrixResult;
use crate::fixture::{FixtureFormat, FixtureId, OrientationTagger, write_fixture};
use crate::matrix::{AspectClass, enumerate_sizes};
use crate::notes::{DEFAULT_STABILIZE_THRESHOLD, ensure_note, merge_leaf_reference, reference_line};
use crate::orientation::Orientation;
use crate::pattern::{apply_transformation, render_test_card, stamp_orientation_digit};
use crate::scale::{ScaleAxis, ScaleDirection, ScaleSpec};

/// Name of the matrix root directory (and its note page) under the
/// configured output root.
pub const MATRIX_ROOT: &str = "TestExifOrientation";

/// Process-wide run configuration, constructed once and passed down. None
/// of the enumerated tables it drives are mutable at runtime.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// Directory the matrix tree is written under.
    pub root: PathBuf,
    /// Base edge lengths the size cross-product is drawn from.
    pub base_dimensions: Vec<u32>,
    /// Maximum allowed `max(w/h, h/w)` for an emitted size.
    pub max_skew: f64,
    /// Body line count at which a leaf note stops receiving appends.
    pub stabilize_threshold: usize,
    /// Checkerboard cell edge in pixels.
    pub cell_size: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            base_dimensions: vec![768, 1024],
            max_skew: 4.0,
            stabilize_threshold: DEFAULT_STABILIZE_THRESHOLD,
            cell_size: 48,
        }
    }
}

/// Counters reported after a completed run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub fixtures_written: usize,
    pub leaf_references_merged: usize,
}

/// One fixture the generator would emit, with its path relative to the
/// configured root. Produced by [`plan`] without touching the filesystem.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PlannedFixture {
    #[serde(flatten)]
    pub id: FixtureId,
    pub relative_path: String,
}

/// Enumerate the full fixture matrix in emission order, without synthesis
/// or I/O.
pub fn plan(config: &GeneratorConfig) -> MatrixResult<Vec<PlannedFixture>> {
    let buckets = enumerate_sizes(&config.base_dimensions, config.max_skew)?;
    let mut out = Vec::new();
    for aspect in AspectClass::ALL {
        let Some(sizes) = buckets.get(&aspect) else {
            continue;
        };
        for &size in sizes {
            for orientation in Orientation::ALL {
                for format in FixtureFormat::ALL {
                    let id = FixtureId {
                        aspect,
                        size,
                        orientation,
                        format,
                    };
                    let relative_path = format!(
                        "{MATRIX_ROOT}/{}/{}/Case[{}]/{}",
                        format.segment(),
                        aspect,
                        size,
                        id.file_name()
                    );
                    out.push(PlannedFixture { id, relative_path });
                }
            }
        }
    }
    Ok(out)
}

/// Run the whole generator: enumerate sizes, synthesize and encode every
/// fixture, and keep the note tree in step. Safe to re-run against its own
/// output; fixtures are rewritten byte-identically and stabilized leaf
/// notes are left alone.
#[tracing::instrument(skip(config, tagger), fields(root = %config.root.display()))]
pub fn run(config: &GeneratorConfig, tagger: &dyn OrientationTagger) -> MatrixResult<RunSummary> {
    let mut summary = RunSummary::default();
    let buckets = enumerate_sizes(&config.base_dimensions, config.max_skew)?;

    let matrix_dir = ensure_level(&config.root, MATRIX_ROOT)?;

    for aspect in AspectClass::ALL {
        let Some(sizes) = buckets.get(&aspect) else {
            continue;
        };
        for &size in sizes {
            tracing::info!(%aspect, %size, "generating case");
            let base = render_test_card(size.width, size.height, config.cell_size);

            for orientation in Orientation::ALL {
                let mut stamped = base.clone();
                stamp_orientation_digit(&mut stamped, orientation.code());
                let oriented = apply_transformation(&stamped, orientation.transformation());

                for format in FixtureFormat::ALL {
                    let format_dir = ensure_level(&matrix_dir, &format.segment())?;
                    let aspect_dir = ensure_level(&format_dir, aspect.as_str())?;
                    let case_segment = format!("Case[{size}]");
                    let case_dir = ensure_level(&aspect_dir, &case_segment)?;

                    let id = FixtureId {
                        aspect,
                        size,
                        orientation,
                        format,
                    };
                    let path = write_fixture(&oriented, &id, &case_dir, tagger)?;
                    summary.fixtures_written += 1;
                    tracing::debug!(path = %path.display(), "wrote fixture");

                    for direction in ScaleDirection::ALL {
                        let scale_dir = ensure_level(&case_dir, direction.segment())?;
                        for axis in ScaleAxis::ALL {
                            ensure_level(&scale_dir, axis.segment())?;
                            let spec = ScaleSpec::new(direction, axis);
                            let query = spec.query_suffix(oriented.width(), oriented.height());
                            let line = reference_line(&id.file_name(), query.as_deref());
                            merge_leaf_reference(
                                &scale_dir,
                                axis.segment(),
                                &line,
                                config.stabilize_threshold,
                            )?;
                            summary.leaf_references_merged += 1;
                        }
                    }
                }
            }
        }
    }

    tracing::info!(
        fixtures = summary.fixtures_written,
        references = summary.leaf_references_merged,
        "run complete"
    );
    Ok(summary)
}

/// Ensure one directory level along the fixture path: its note file beside
/// it, and the directory itself.
fn ensure_level(parent: &Path, segment: &str) -> MatrixResult<PathBuf> {
    ensure_note(parent, segment)?;
    let dir = parent.join(segment);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create directory '{}'", dir.display()))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_covers_the_full_cross_product() {
        let config = GeneratorConfig::default();
        let fixtures = plan(&config).unwrap();
        // 4 sizes x 9 orientations x 3 formats.
        assert_eq!(fixtures.len(), 4 * 9 * 3);

        let canonical = fixtures
            .iter()
            .find(|f| f.id.file_name() == "Landscape_1024x768_6.jpeg")
            .expect("canonical fixture present");
        assert_eq!(
            canonical.relative_path,
            "TestExifOrientation/Format[jpeg]/Landscape/Case[1024x768]/Landscape_1024x768_6.jpeg"
        );
    }

    #[test]
    fn plan_is_deterministic() {
        let config = GeneratorConfig::default();
        assert_eq!(plan(&config).unwrap(), plan(&config).unwrap());
    }

    #[test]
    fn plan_respects_skew_filter() {
        let config = GeneratorConfig {
            base_dimensions: vec![100, 1000],
            ..GeneratorConfig::default()
        };
        let fixtures = plan(&config).unwrap();
        // Only the two square sizes survive a 10x skew.
        assert_eq!(fixtures.len(), 2 * 9 * 3);
        assert!(fixtures.iter().all(|f| f.id.aspect == AspectClass::Square));
    }
}
