use std::path::Path;

use tokio::task::spawn_blocking;

mod consts;
mod reader;
mod unit;
mod view;

pub use consts::{
	FILM_SPEED_SCALE, FULL_FRAME_HEIGHT_MM, FULL_FRAME_WIDTH_MM, METER_CALIBRATION_K,
	MM_PER_CENTIMETER, MM_PER_INCH,
};
pub use reader::ExifReader;
pub use unit::ResolutionUnit;
pub use view::ExifView;

use crate::{Error, Result};

/// A serializable snapshot of the derived photographic quantities of one
/// image. Quantities that could not be resolved from the recorded tags
/// are `None`; use [`ExifView`] directly when the failure reason
/// matters.
#[derive(Default, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DerivedMetadata {
	pub device_make: Option<String>,
	pub device_model: Option<String>,
	pub f_number: Option<f64>,
	pub exposure_time: Option<f64>,
	pub iso: Option<f64>,
	pub aperture_value: Option<f64>,
	pub time_value: Option<f64>,
	pub exposure_value: Option<f64>,
	pub film_speed_value: Option<f64>,
	pub luminance_value: Option<f64>,
	pub average_luminance: Option<f64>,
	pub focal_length: Option<f64>,
	pub focal_length_35mm_equiv: Option<f64>,
}

impl DerivedMetadata {
	/// Reads the image at `path` on a blocking thread and snapshots its
	/// derived quantities. Containers without an EXIF segment yield
	/// `Ok(None)`; I/O failures stay errors.
	pub async fn from_path(path: impl AsRef<Path> + Send) -> Result<Option<Self>> {
		match spawn_blocking({
			let path = path.as_ref().to_owned();
			move || ExifReader::from_path(path).map(|reader| Self::from_view(&ExifView::new(reader)))
		})
		.await?
		{
			Ok(data) => Ok(Some(data)),
			Err(Error::Exif(
				exif::Error::NotFound(_) | exif::Error::NotSupported(_) | exif::Error::BlankValue(_),
			)) => Ok(None),
			Err(e) => Err(e),
		}
	}

	/// Snapshots the derived quantities of in-memory container bytes.
	pub fn from_slice(bytes: &[u8]) -> Result<Option<Self>> {
		match ExifReader::from_slice(bytes) {
			Ok(reader) => Ok(Some(Self::from_view(&ExifView::new(reader)))),
			Err(Error::Exif(
				exif::Error::NotFound(_) | exif::Error::NotSupported(_) | exif::Error::BlankValue(_),
			)) => Ok(None),
			Err(e) => Err(e),
		}
	}

	#[must_use]
	pub fn from_view(view: &ExifView) -> Self {
		Self {
			device_make: view.make().ok(),
			device_model: view.model().ok(),
			f_number: view.f_number().ok(),
			exposure_time: view.exposure_time().ok(),
			iso: view.iso().ok(),
			aperture_value: view.aperture_value().ok(),
			time_value: view.time_value().ok(),
			exposure_value: view.exposure_value().ok(),
			film_speed_value: view.film_speed_value().ok(),
			luminance_value: view.luminance_value().ok(),
			average_luminance: view.average_luminance().ok(),
			focal_length: view.focal_length().ok(),
			focal_length_35mm_equiv: view.focal_length_35mm_equiv().ok(),
		}
	}
}
