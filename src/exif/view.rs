use std::path::Path;

use exif::Tag;
use tracing::trace;

use super::{
	consts::{FILM_SPEED_SCALE, FULL_FRAME_HEIGHT_MM, FULL_FRAME_WIDTH_MM, METER_CALIBRATION_K},
	unit::ResolutionUnit,
	ExifReader,
};
use crate::{Error, Result};

/// Read-only view over a parsed tag store that derives photographic
/// quantities, filling gaps in what the camera recorded through
/// documented photometric relationships.
///
/// The view holds no state beyond the store itself: every accessor
/// recomputes from the immutable tags on each call, so repeated calls
/// return identical results and a shared view is safe to query from
/// multiple threads.
pub struct ExifView {
	reader: ExifReader,
}

impl ExifView {
	/// Wraps an already-constructed tag store.
	#[must_use]
	pub const fn new(reader: ExifReader) -> Self {
		Self { reader }
	}

	/// Reads the image at `path` and wraps its tag store.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
		ExifReader::from_path(path).map(Self::new)
	}

	/// Parses in-memory container bytes and wraps the tag store.
	pub fn from_slice(bytes: &[u8]) -> Result<Self> {
		ExifReader::from_slice(bytes).map(Self::new)
	}

	/// The underlying tag store.
	#[must_use]
	pub const fn reader(&self) -> &ExifReader {
		&self.reader
	}

	/// The camera manufacturer. No alternate source exists for this tag.
	pub fn make(&self) -> Result<String> {
		self.reader.get_text(Tag::Make)
	}

	/// The camera model. No alternate source exists for this tag.
	pub fn model(&self) -> Result<String> {
		self.reader.get_text(Tag::Model)
	}

	/// The aperture as an f-number.
	///
	/// Prefers the linear `FNumber` tag and otherwise derives it from
	/// the APEX `ApertureValue`, where `F = 2^(Av/2)`.
	pub fn f_number(&self) -> Result<f64> {
		or_alternate(self.reader.get_f64(Tag::FNumber), || {
			self.reader
				.get_f64(Tag::ApertureValue)
				.map(|av| (av * 0.5).exp2())
		})
	}

	/// The exposure time in seconds.
	///
	/// Prefers the linear `ExposureTime` tag and otherwise derives it
	/// from the APEX `ShutterSpeedValue`, where `t = 2^(-Tv)`.
	pub fn exposure_time(&self) -> Result<f64> {
		or_alternate(self.reader.get_f64(Tag::ExposureTime), || {
			self.reader
				.get_f64(Tag::ShutterSpeedValue)
				.map(|tv| (-tv).exp2())
		})
	}

	/// The arithmetic ISO speed, from `PhotographicSensitivity` (named
	/// `ISOSpeedRatings` before Exif 2.3) or the equivalent
	/// `ExposureIndex`.
	pub fn iso(&self) -> Result<f64> {
		or_alternate(self.reader.get_f64(Tag::PhotographicSensitivity), || {
			self.reader.get_f64(Tag::ExposureIndex)
		})
	}

	/// The APEX aperture value, `Av = 2 * log2(F)`.
	pub fn aperture_value(&self) -> Result<f64> {
		or_alternate(self.reader.get_f64(Tag::ApertureValue), || {
			self.reader.get_f64(Tag::FNumber).map(|f| 2.0 * f.log2())
		})
	}

	/// The APEX time value, `Tv = log2(1/t)`.
	pub fn time_value(&self) -> Result<f64> {
		or_alternate(self.reader.get_f64(Tag::ShutterSpeedValue), || {
			self.reader
				.get_f64(Tag::ExposureTime)
				.map(|t| t.recip().log2())
		})
	}

	/// The APEX exposure value, `Ev = Tv + Av`.
	pub fn exposure_value(&self) -> Result<f64> {
		Ok(self.time_value()? + self.aperture_value()?)
	}

	/// The APEX film speed value, `Sv = log2(ISO * N)` with N the Exif
	/// 2.2 calibration constant [`FILM_SPEED_SCALE`].
	///
	/// [`FILM_SPEED_SCALE`]: super::FILM_SPEED_SCALE
	pub fn film_speed_value(&self) -> Result<f64> {
		self.iso().map(|iso| (iso * FILM_SPEED_SCALE).log2())
	}

	/// The APEX brightness value.
	///
	/// Returns the `BrightnessValue` tag when present, otherwise
	/// `Bv = Av + Tv - Sv`. When neither path can be resolved the two
	/// attempts collapse into a single [`Error::InsufficientData`]: the
	/// caller cares that brightness is unobtainable, not which of three
	/// sub-tags was missing.
	pub fn luminance_value(&self) -> Result<f64> {
		match self.reader.get_f64(Tag::BrightnessValue) {
			Ok(bv) => Ok(bv),
			Err(Error::TagNotFound(_)) => {
				trace!("BrightnessValue absent, deriving Bv = Av + Tv - Sv");
				self.aperture_value()
					.and_then(|av| Ok(av + self.time_value()? - self.film_speed_value()?))
					.map_err(|_| Error::InsufficientData("brightness value"))
			}
			Err(e) => Err(e),
		}
	}

	/// Average scene luminance metered back out of the physical exposure
	/// parameters: `B = (F² * K) / (T * S)` with K the reflected-light
	/// calibration constant [`METER_CALIBRATION_K`].
	///
	/// There is no tag-based shortcut for this quantity; any missing
	/// input yields [`Error::InsufficientData`].
	///
	/// [`METER_CALIBRATION_K`]: super::METER_CALIBRATION_K
	pub fn average_luminance(&self) -> Result<f64> {
		self.f_number()
			.and_then(|f| {
				Ok((f * f * METER_CALIBRATION_K) / (self.exposure_time()? * self.iso()?))
			})
			.map_err(|_| Error::InsufficientData("average scene luminance"))
	}

	/// The focal length in millimeters, as recorded.
	pub fn focal_length(&self) -> Result<f64> {
		self.reader.get_f64(Tag::FocalLength)
	}

	/// The focal length normalized to the 36x24mm reference frame.
	///
	/// Returns `FocalLengthIn35mmFilm` when the camera recorded it;
	/// a value of 0 means "unknown" per the Exif specification and falls
	/// through to derivation, like an absent tag. The derived path
	/// reconstructs the physical sensor size from the focal plane
	/// resolution tags and scales the recorded focal length by the ratio
	/// of the reference diagonal to the sensor diagonal.
	///
	/// Non-positive resolutions, unrecognized resolution unit codes and
	/// a zero sensor diagonal are [`Error::InvalidTagValue`] — data that
	/// is present but nonsensical never masquerades as simple absence.
	pub fn focal_length_35mm_equiv(&self) -> Result<f64> {
		match self.reader.get_f64(Tag::FocalLengthIn35mmFilm) {
			Ok(mm) if mm > 0.0 => return Ok(mm),
			Ok(_) | Err(Error::TagNotFound(_)) => {}
			Err(e) => return Err(e),
		}

		trace!("FocalLengthIn35mmFilm unusable, deriving from sensor geometry");
		let focal_length = self.reader.get_f64(Tag::FocalLength)?;
		let unit_mm = self.focal_plane_unit()?.to_millimeters();
		let sensor_width = unit_mm / self.focal_plane_resolution(Tag::FocalPlaneXResolution)?
			* self.reader.get_f64(Tag::PixelXDimension)?;
		let sensor_height = unit_mm / self.focal_plane_resolution(Tag::FocalPlaneYResolution)?
			* self.reader.get_f64(Tag::PixelYDimension)?;

		let diagonal = sensor_width.hypot(sensor_height);
		if diagonal == 0.0 {
			return Err(Error::InvalidTagValue {
				tag: Tag::PixelXDimension,
				reason: "sensor diagonal computes to zero".to_owned(),
			});
		}

		Ok(focal_length * FULL_FRAME_WIDTH_MM.hypot(FULL_FRAME_HEIGHT_MM) / diagonal)
	}

	/// Absolute byte offset of the thumbnail image within the file the
	/// store was parsed from: the recorded thumbnail offset plus the
	/// EXIF-segment base offset.
	pub fn thumbnail_location(&self) -> Result<u64> {
		self.reader
			.thumbnail_offset()
			.map(|offset| self.reader.base_offset() + u64::from(offset))
	}

	fn focal_plane_resolution(&self, tag: Tag) -> Result<f64> {
		let resolution = self.reader.get_f64(tag)?;
		if resolution <= 0.0 {
			return Err(Error::InvalidTagValue {
				tag,
				reason: format!("focal plane resolution must be positive, got {resolution}"),
			});
		}
		Ok(resolution)
	}

	fn focal_plane_unit(&self) -> Result<ResolutionUnit> {
		match self.reader.get_u32(Tag::FocalPlaneResolutionUnit) {
			Ok(code) => ResolutionUnit::try_from(code),
			Err(Error::TagNotFound(_)) => Ok(ResolutionUnit::default()),
			Err(e) => Err(e),
		}
	}
}

/// Retries `alternate` only when the primary lookup failed with
/// [`Error::TagNotFound`]. Any other failure, in particular
/// [`Error::InvalidTagValue`], aborts the chain; the error of a failed
/// alternate attempt is the one reported.
fn or_alternate<T>(primary: Result<T>, alternate: impl FnOnce() -> Result<T>) -> Result<T> {
	match primary {
		Err(Error::TagNotFound(_)) => alternate(),
		other => other,
	}
}
