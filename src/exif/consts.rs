/// APEX film-speed scaling constant (N) from the Exif 2.2 specification.
///
/// Relates the arithmetic ISO speed to the APEX speed value:
/// `Sv = log2(ISO * N)`.
pub const FILM_SPEED_SCALE: f64 = 1.0 / 3.125;

/// Reflected-light meter calibration constant (K).
///
/// Used when metering average scene luminance from the physical
/// exposure parameters: `B = (F² * K) / (T * S)`.
pub const METER_CALIBRATION_K: f64 = 12.5;

/// Width of the reference 135-format ("full frame") image, in millimeters.
///
/// The diagonal of this frame normalizes focal lengths across sensor
/// sizes; see [`ExifView::focal_length_35mm_equiv`].
///
/// [`ExifView::focal_length_35mm_equiv`]: super::ExifView::focal_length_35mm_equiv
pub const FULL_FRAME_WIDTH_MM: f64 = 36.0;

/// Height of the reference 135-format image, in millimeters.
pub const FULL_FRAME_HEIGHT_MM: f64 = 24.0;

/// Millimeters per inch, the `FocalPlaneResolutionUnit` code 2 factor.
pub const MM_PER_INCH: f64 = 25.4;

/// Millimeters per centimeter, the `FocalPlaneResolutionUnit` code 3 factor.
pub const MM_PER_CENTIMETER: f64 = 10.0;
