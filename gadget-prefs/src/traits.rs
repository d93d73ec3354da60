//! Loading validated documents from JSON sources.

use std::{
    fs::File,
    io::{BufRead, BufReader, Cursor},
    path::Path,
};

use crate::error::Error;

/// A document that only exists once its JSON source has been validated.
///
/// ```rust,no_run
/// use gadget_prefs::{PreferencesDescription, traits::Parser};
/// let description = PreferencesDescription::read_from("clock.prefs.json")?;
/// println!("{} field(s)", description.fields().len());
/// Ok::<(), gadget_prefs::Error>(())
/// ```
pub trait Parser: Sized {
    /// Parses and validates JSON from `reader`.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>;

    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    fn from_str(json: &str) -> Result<Self, Error> {
        Self::from_reader(Cursor::new(json))
    }
}
