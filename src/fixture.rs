use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use image::{DynamicImage, RgbaImage};

use crate::error::{MatrixError, MatrixResult};
use crate::matrix::{AspectClass, Size};
use crate::orientation::Orientation;

/// Encoded output format of a fixture.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum FixtureFormat {
    Jpeg,
    Png,
    WebP,
}

impl FixtureFormat {
    pub const ALL: [FixtureFormat; 3] =
        [FixtureFormat::Jpeg, FixtureFormat::Png, FixtureFormat::WebP];

    pub fn extension(self) -> &'static str {
        match self {
            FixtureFormat::Jpeg => "jpeg",
            FixtureFormat::Png => "png",
            FixtureFormat::WebP => "webp",
        }
    }

    /// Directory segment, e.g. `Format[jpeg]`.
    pub fn segment(self) -> String {
        format!("Format[{}]", self.extension())
    }

    fn encode(self, img: &RgbaImage, path: &Path) -> MatrixResult<()> {
        let result = match self {
            // JPEG has no alpha channel; flatten by dropping it.
            FixtureFormat::Jpeg => DynamicImage::ImageRgba8(img.clone())
                .to_rgb8()
                .save_with_format(path, image::ImageFormat::Jpeg),
            FixtureFormat::Png => img.save_with_format(path, image::ImageFormat::Png),
            FixtureFormat::WebP => img.save_with_format(path, image::ImageFormat::WebP),
        };
        result.map_err(|e| {
            MatrixError::encode(format!("failed to encode '{}': {e}", path.display()))
        })
    }
}

/// The tuple that deterministically names one fixture file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FixtureId {
    pub aspect: AspectClass,
    pub size: Size,
    pub orientation: Orientation,
    pub format: FixtureFormat,
}

impl FixtureId {
    /// `<Aspect>_<w>x<h>_<code>.<ext>` — a pure function of the id. The
    /// size in the name is the pre-transformation size, shared by all nine
    /// orientations of a case.
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}_{}.{}",
            self.aspect,
            self.size,
            self.orientation,
            self.format.extension()
        )
    }
}

impl fmt::Display for FixtureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}

/// Seam for the external metadata-tagging collaborator.
pub trait OrientationTagger {
    fn tag(&self, path: &Path, orientation: Orientation) -> MatrixResult<()>;
}

/// Tags fixtures in place via the system `exiftool` binary.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExiftoolTagger;

pub fn is_exiftool_on_path() -> bool {
    Command::new("exiftool")
        .arg("-ver")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

impl OrientationTagger for ExiftoolTagger {
    fn tag(&self, path: &Path, orientation: Orientation) -> MatrixResult<()> {
        let output = Command::new("exiftool")
            .arg("-overwrite_original")
            .arg(format!("-Orientation={}", orientation.code()))
            .arg("-n")
            .arg(path)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                MatrixError::external_tool(format!(
                    "failed to spawn exiftool (is it installed and on PATH?): {e}"
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MatrixError::external_tool(format!(
                "exiftool exited with status {} tagging '{}': {}",
                output.status,
                path.display(),
                stderr.trim()
            )));
        }
        Ok(())
    }
}

/// Tagger that leaves fixtures untagged. Useful for plumbing tests and for
/// environments without exiftool; the emitted files then only exercise the
/// naming and note-tree behavior.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTagger;

impl OrientationTagger for NoopTagger {
    fn tag(&self, _path: &Path, _orientation: Orientation) -> MatrixResult<()> {
        Ok(())
    }
}

/// Encode `img` at its canonical path under `dir`, overwriting any previous
/// file, and tag it when the orientation is non-trivial. A tagging failure
/// is fatal: an untagged "oriented" fixture silently corrupts the matrix.
pub fn write_fixture(
    img: &RgbaImage,
    id: &FixtureId,
    dir: &Path,
    tagger: &dyn OrientationTagger,
) -> MatrixResult<PathBuf> {
    let path = dir.join(id.file_name());
    id.format.encode(img, &path)?;
    if id.orientation.is_tagged() {
        tagger.tag(&path, id.orientation)?;
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::pattern::render_test_card;

    struct RecordingTagger {
        calls: RefCell<Vec<(PathBuf, u8)>>,
    }

    impl OrientationTagger for RecordingTagger {
        fn tag(&self, path: &Path, orientation: Orientation) -> MatrixResult<()> {
            self.calls
                .borrow_mut()
                .push((path.to_path_buf(), orientation.code()));
            Ok(())
        }
    }

    struct FailingTagger;

    impl OrientationTagger for FailingTagger {
        fn tag(&self, _path: &Path, _orientation: Orientation) -> MatrixResult<()> {
            Err(MatrixError::external_tool("tagger down"))
        }
    }

    fn id(orientation: u8, format: FixtureFormat) -> FixtureId {
        FixtureId {
            aspect: AspectClass::Landscape,
            size: Size::new(64, 48),
            orientation: Orientation::new(orientation).unwrap(),
            format,
        }
    }

    #[test]
    fn canonical_file_name() {
        let id = FixtureId {
            aspect: AspectClass::Landscape,
            size: Size::new(1024, 768),
            orientation: Orientation::new(6).unwrap(),
            format: FixtureFormat::Jpeg,
        };
        assert_eq!(id.file_name(), "Landscape_1024x768_6.jpeg");
    }

    #[test]
    fn zero_orientation_skips_the_tagger() {
        let dir = std::path::PathBuf::from("target").join("fixture_untagged");
        std::fs::create_dir_all(&dir).unwrap();
        let img = render_test_card(64, 48, 8);
        let tagger = RecordingTagger {
            calls: RefCell::new(Vec::new()),
        };
        let path = write_fixture(&img, &id(0, FixtureFormat::Png), &dir, &tagger).unwrap();
        assert!(path.is_file());
        assert!(tagger.calls.borrow().is_empty());
    }

    #[test]
    fn nonzero_orientation_invokes_the_tagger_with_the_exact_code() {
        let dir = std::path::PathBuf::from("target").join("fixture_tagged");
        std::fs::create_dir_all(&dir).unwrap();
        let img = render_test_card(64, 48, 8);
        let tagger = RecordingTagger {
            calls: RefCell::new(Vec::new()),
        };
        let path = write_fixture(&img, &id(6, FixtureFormat::Jpeg), &dir, &tagger).unwrap();
        let calls = tagger.calls.borrow();
        assert_eq!(calls.as_slice(), &[(path, 6u8)]);
    }

    #[test]
    fn tagger_failure_is_fatal_but_leaves_the_file() {
        let dir = std::path::PathBuf::from("target").join("fixture_failing");
        std::fs::create_dir_all(&dir).unwrap();
        let img = render_test_card(64, 48, 8);
        let err = write_fixture(&img, &id(3, FixtureFormat::Png), &dir, &FailingTagger)
            .unwrap_err();
        assert!(matches!(err, MatrixError::ExternalTool(_)));
        assert!(dir.join("Landscape_64x48_3.png").is_file());
    }

    #[test]
    fn rewriting_a_fixture_is_byte_identical() {
        let dir = std::path::PathBuf::from("target").join("fixture_rewrite");
        std::fs::create_dir_all(&dir).unwrap();
        let img = render_test_card(64, 48, 8);
        let fixture = id(0, FixtureFormat::Png);
        let path = write_fixture(&img, &fixture, &dir, &NoopTagger).unwrap();
        let first = std::fs::read(&path).unwrap();
        write_fixture(&img, &fixture, &dir, &NoopTagger).unwrap();
        let second = std::fs::read(&path).unwrap();
        assert_eq!(first, second);
    }
}
