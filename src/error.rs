use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("there was an i/o error {0} at {}", .1.display())]
	Io(std::io::Error, Box<Path>),
	#[error("error from the exif crate: {0}")]
	Exif(#[from] exif::Error),
	#[error("exif tag {0} is not present in the file")]
	TagNotFound(exif::Tag),
	#[error("exif tag {tag} holds an invalid value: {reason}")]
	InvalidTagValue { tag: exif::Tag, reason: String },
	#[error("insufficient exif information to compute {0}")]
	InsufficientData(&'static str),
	#[error("there was an error while joining a blocking task: {0}")]
	Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, Error>;
