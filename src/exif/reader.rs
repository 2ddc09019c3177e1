use std::{
	fs::File,
	io::{Cursor, Read},
	path::Path,
};

use exif::{Exif, Field, In, Rational, SRational, Tag, Value};

use crate::{Error, Result};

/// Typed query layer over the tag store parsed by the `exif` crate.
///
/// Every derived accessor reads raw data through this wrapper, so a
/// missing tag always surfaces as the same [`Error::TagNotFound`]
/// regardless of which formula asked for it. The store is immutable
/// after construction and all queries are pure reads.
pub struct ExifReader {
	exif: Exif,
	base_offset: u64,
}

impl ExifReader {
	/// Reads and parses the EXIF segment of the image at `path`.
	///
	/// Fails with [`Error::Io`] when the file cannot be read and with
	/// [`Error::Exif`] when the container holds no parsable EXIF data.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let mut bytes = Vec::new();
		File::open(path)
			.and_then(|mut file| file.read_to_end(&mut bytes))
			.map_err(|e| Error::Io(e, path.into()))?;
		Self::from_slice(&bytes)
	}

	/// Parses the EXIF segment out of in-memory container bytes
	/// (JPEG, TIFF, PNG, ...).
	pub fn from_slice(bytes: &[u8]) -> Result<Self> {
		let exif = exif::Reader::new().read_from_container(&mut Cursor::new(bytes))?;
		let base_offset = locate_payload(bytes, exif.buf());
		Ok(Self { exif, base_offset })
	}

	/// Parses a raw TIFF-rooted EXIF payload, with no surrounding
	/// container. The base offset is 0: recorded offsets already address
	/// the payload itself.
	pub fn from_raw(bytes: Vec<u8>) -> Result<Self> {
		let exif = exif::Reader::new().read_raw(bytes)?;
		Ok(Self {
			exif,
			base_offset: 0,
		})
	}

	/// Byte offset of the TIFF header within the container the store was
	/// parsed from. 0 when the payload could not be located (raw
	/// payloads, or containers that re-encode the segment).
	#[must_use]
	pub const fn base_offset(&self) -> u64 {
		self.base_offset
	}

	/// Looks up `tag` on the primary image as a floating-point number.
	///
	/// Accepts any numeric representation a camera may have recorded the
	/// tag in (rationals, floats, or plain integers).
	pub fn get_f64(&self, tag: Tag) -> Result<f64> {
		let field = self.field(tag)?;
		match &field.value {
			Value::Rational(v) => v.first().map(Rational::to_f64),
			Value::SRational(v) => v.first().map(SRational::to_f64),
			Value::Float(v) => v.first().copied().map(f64::from),
			Value::Double(v) => v.first().copied(),
			Value::SShort(v) => v.first().copied().map(f64::from),
			Value::SLong(v) => v.first().copied().map(f64::from),
			_ => field.value.get_uint(0).map(f64::from),
		}
		.ok_or(Error::TagNotFound(tag))
	}

	/// Looks up `tag` on the primary image as an unsigned integer.
	pub fn get_u32(&self, tag: Tag) -> Result<u32> {
		let field = self.field(tag)?;
		field.value.get_uint(0).ok_or(Error::TagNotFound(tag))
	}

	/// Looks up `tag` on the primary image as text, joining multiple
	/// ASCII components with a space.
	pub fn get_text(&self, tag: Tag) -> Result<String> {
		let field = self.field(tag)?;
		match &field.value {
			Value::Ascii(components) if !components.is_empty() => Ok(components
				.iter()
				.map(|bytes| String::from_utf8_lossy(bytes))
				.collect::<Vec<_>>()
				.join(" ")
				.trim()
				.to_owned()),
			_ => Err(Error::TagNotFound(tag)),
		}
	}

	/// The raw `JPEGInterchangeFormat` value of the thumbnail image:
	/// the thumbnail's byte offset relative to the TIFF header.
	pub fn thumbnail_offset(&self) -> Result<u32> {
		self.exif
			.get_field(Tag::JPEGInterchangeFormat, In::THUMBNAIL)
			.and_then(|field| field.value.get_uint(0))
			.ok_or(Error::TagNotFound(Tag::JPEGInterchangeFormat))
	}

	fn field(&self, tag: Tag) -> Result<&Field> {
		self.exif
			.get_field(tag, In::PRIMARY)
			.ok_or(Error::TagNotFound(tag))
	}
}

/// Locates the TIFF payload the parser retained within the container it
/// came from, yielding the EXIF-segment base offset.
fn locate_payload(container: &[u8], payload: &[u8]) -> u64 {
	if payload.is_empty() || payload.len() > container.len() {
		return 0;
	}
	container
		.windows(payload.len())
		.position(|window| window == payload)
		.and_then(|position| u64::try_from(position).ok())
		.unwrap_or(0)
}
