use exif::Tag;

use super::consts::{MM_PER_CENTIMETER, MM_PER_INCH};
use crate::{Error, Result};

/// Unit of the `FocalPlaneXResolution`/`FocalPlaneYResolution` tags.
///
/// Exif only defines codes 2 (inch) and 3 (centimeter) for
/// `FocalPlaneResolutionUnit`. An absent tag defaults to inch; a present
/// tag with any other code is rejected as invalid data.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ResolutionUnit {
	#[default]
	Inch,
	Centimeter,
}

impl ResolutionUnit {
	/// Millimeters covered by one unit of focal plane resolution.
	#[must_use]
	pub const fn to_millimeters(self) -> f64 {
		match self {
			Self::Inch => MM_PER_INCH,
			Self::Centimeter => MM_PER_CENTIMETER,
		}
	}
}

impl TryFrom<u32> for ResolutionUnit {
	type Error = Error;

	fn try_from(code: u32) -> Result<Self> {
		match code {
			2 => Ok(Self::Inch),
			3 => Ok(Self::Centimeter),
			_ => Err(Error::InvalidTagValue {
				tag: Tag::FocalPlaneResolutionUnit,
				reason: format!("unrecognized resolution unit code {code}"),
			}),
		}
	}
}
