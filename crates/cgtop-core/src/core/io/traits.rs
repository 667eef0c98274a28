use crate::core::models::structure::Structure;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing structure file formats.
///
/// Implementors handle format-specific decoding and serialization; the provided
/// path helpers take care of opening files and naming the resulting structure.
pub trait StructureFile {
    /// Information about the read itself (records consumed, where it stopped).
    type Metadata;

    /// Format-specific read options.
    type Options: Default;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a structure from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    /// * `options` - Format-specific read options.
    ///
    /// # Return
    ///
    /// Returns the assembled structure (unnamed) and the read metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reader fails.
    fn read_from(
        reader: &mut impl BufRead,
        options: &Self::Options,
    ) -> Result<(Structure, Self::Metadata), Self::Error>;

    /// Writes a structure to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(structure: &Structure, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads a structure from a file path with the given options.
    ///
    /// The structure is named after `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    fn read_from_path_with<P: AsRef<Path>>(
        path: P,
        options: &Self::Options,
    ) -> Result<(Structure, Self::Metadata), Self::Error> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let (mut structure, metadata) = Self::read_from(&mut reader, options)?;
        structure.set_name(path.to_string_lossy());
        Ok((structure, metadata))
    }

    /// Reads a structure from a file path with default options.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<(Structure, Self::Metadata), Self::Error> {
        Self::read_from_path_with(path, &Self::Options::default())
    }

    /// Writes a structure to a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(structure: &Structure, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(structure, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
