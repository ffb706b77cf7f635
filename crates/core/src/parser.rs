// ABOUTME: Lazy row parser for the tab-separated datasets, plain or gzip-compressed.
// ABOUTME: DatasetParser resolves and opens files; Rows yields one typed record per line and stops at the first error.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use tracing::debug;

use crate::coerce::replace_sentinels;
use crate::error::DatasetError;
use crate::models::{
    DatasetRecord, NameBasics, TitleAkas, TitleBasics, TitleCrew, TitleEpisode,
    TitlePrincipalCrew, TitleRating,
};

/// How a dataset file is stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    #[default]
    Plain,
    /// Gzip, as published. Decoded as a stream.
    Gzip,
}

impl Compression {
    fn extension(self) -> &'static str {
        match self {
            Compression::Plain => "",
            Compression::Gzip => ".gz",
        }
    }
}

/// Opens dataset files and turns them into typed row iterators.
///
/// ```no_run
/// use marquee_core::DatasetParser;
///
/// let parser = DatasetParser::new();
/// for basics in parser.title_basics("/data/imdb", true)? {
///     println!("{}", basics?);
/// }
/// # Ok::<(), marquee_core::DatasetError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DatasetParser {
    use_default_filenames: bool,
    compression: Compression,
}

impl DatasetParser {
    /// A parser that expects a directory holding the uncompressed, published file names.
    pub fn new() -> Self {
        Self {
            use_default_filenames: true,
            compression: Compression::Plain,
        }
    }

    pub fn builder() -> DatasetParserBuilder {
        DatasetParserBuilder::new()
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// The file that will be opened for `T` given the caller's path.
    pub fn resolve_path<T: DatasetRecord>(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if self.use_default_filenames {
            let file_name = format!(
                "{}{}",
                T::DATASET.default_filename(),
                self.compression.extension()
            );
            path.join(file_name)
        } else {
            path.to_path_buf()
        }
    }

    /// Opens the dataset for `T` and returns its rows.
    ///
    /// When `contains_headers` is true the first line is skipped without being
    /// checked. Each call re-opens the file.
    pub fn parse<T: DatasetRecord>(
        &self,
        path: impl AsRef<Path>,
        contains_headers: bool,
    ) -> Result<Rows<T>, DatasetError> {
        let path = self.resolve_path::<T>(path);
        debug!(
            dataset = %T::DATASET,
            path = %path.display(),
            compression = ?self.compression,
            "opening dataset"
        );
        let reader = open_input(&path, self.compression)?;
        Ok(Rows::from_boxed(reader, contains_headers))
    }

    pub fn title_akas(
        &self,
        path: impl AsRef<Path>,
        contains_headers: bool,
    ) -> Result<Rows<TitleAkas>, DatasetError> {
        self.parse(path, contains_headers)
    }

    pub fn title_basics(
        &self,
        path: impl AsRef<Path>,
        contains_headers: bool,
    ) -> Result<Rows<TitleBasics>, DatasetError> {
        self.parse(path, contains_headers)
    }

    pub fn title_crew(
        &self,
        path: impl AsRef<Path>,
        contains_headers: bool,
    ) -> Result<Rows<TitleCrew>, DatasetError> {
        self.parse(path, contains_headers)
    }

    pub fn title_episodes(
        &self,
        path: impl AsRef<Path>,
        contains_headers: bool,
    ) -> Result<Rows<TitleEpisode>, DatasetError> {
        self.parse(path, contains_headers)
    }

    pub fn title_principals(
        &self,
        path: impl AsRef<Path>,
        contains_headers: bool,
    ) -> Result<Rows<TitlePrincipalCrew>, DatasetError> {
        self.parse(path, contains_headers)
    }

    pub fn title_ratings(
        &self,
        path: impl AsRef<Path>,
        contains_headers: bool,
    ) -> Result<Rows<TitleRating>, DatasetError> {
        self.parse(path, contains_headers)
    }

    pub fn name_basics(
        &self,
        path: impl AsRef<Path>,
        contains_headers: bool,
    ) -> Result<Rows<NameBasics>, DatasetError> {
        self.parse(path, contains_headers)
    }
}

impl Default for DatasetParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`DatasetParser`].
#[derive(Debug, Clone)]
pub struct DatasetParserBuilder {
    parser: DatasetParser,
}

impl DatasetParserBuilder {
    pub fn new() -> Self {
        Self {
            parser: DatasetParser::new(),
        }
    }

    /// When true (the default) the path given to each parse call is a directory
    /// and the dataset's published file name is joined onto it. When false the
    /// path names the file itself.
    pub fn use_default_filenames(mut self, enabled: bool) -> Self {
        self.parser.use_default_filenames = enabled;
        self
    }

    /// Set how the files are compressed.
    pub fn compression(mut self, compression: Compression) -> Self {
        self.parser.compression = compression;
        self
    }

    pub fn build(self) -> DatasetParser {
        self.parser
    }
}

impl Default for DatasetParserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

type Input = Box<dyn BufRead>;

fn open_input(path: &Path, compression: Compression) -> Result<Input, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    match compression {
        Compression::Plain => Ok(Box::new(BufReader::new(file))),
        Compression::Gzip => Ok(Box::new(BufReader::new(MultiGzDecoder::new(
            BufReader::new(file),
        )))),
    }
}

/// Parses one data line into a record.
///
/// `line_no` is only used for error reporting. The line must already be free of
/// its terminator; nothing else is trimmed.
pub fn parse_line<T: DatasetRecord>(line: &str, line_no: usize) -> Result<T, DatasetError> {
    let columns: Vec<&str> = line.split('\t').collect();
    let expected = T::DATASET.column_count();
    if columns.len() != expected {
        return Err(DatasetError::InvalidFormat {
            dataset: T::DATASET,
            line: line_no,
            expected,
            found: columns.len(),
        });
    }
    Ok(T::from_fields(&replace_sentinels(&columns)))
}

/// Lazy sequence of records read from one dataset source.
///
/// Yields `Err` at most once: after an I/O failure or a malformed row the source
/// is dropped and the iterator is exhausted.
pub struct Rows<T> {
    lines: Option<Lines<Input>>,
    skip_header: bool,
    line_no: usize,
    _record: PhantomData<fn() -> T>,
}

impl<T: DatasetRecord> Rows<T> {
    /// Reads rows from an already-open source.
    pub fn from_reader<R: BufRead + 'static>(reader: R, contains_headers: bool) -> Self {
        Self::from_boxed(Box::new(reader), contains_headers)
    }

    fn from_boxed(reader: Input, contains_headers: bool) -> Self {
        Self {
            lines: Some(reader.lines()),
            skip_header: contains_headers,
            line_no: 0,
            _record: PhantomData,
        }
    }

    /// Number of lines consumed so far, header included.
    pub fn lines_read(&self) -> usize {
        self.line_no
    }
}

impl<T: DatasetRecord> Iterator for Rows<T> {
    type Item = Result<T, DatasetError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let lines = self.lines.as_mut()?;
            let line = match lines.next() {
                Some(Ok(line)) => line,
                Some(Err(source)) => {
                    self.lines = None;
                    return Some(Err(DatasetError::Read {
                        line: self.line_no + 1,
                        source,
                    }));
                }
                None => {
                    self.lines = None;
                    return None;
                }
            };
            self.line_no += 1;

            if self.skip_header {
                self.skip_header = false;
                continue;
            }

            let parsed = parse_line(&line, self.line_no);
            if parsed.is_err() {
                self.lines = None;
            }
            return Some(parsed);
        }
    }
}

impl<T: DatasetRecord> FusedIterator for Rows<T> {}

impl<T> std::fmt::Debug for Rows<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rows")
            .field("open", &self.lines.is_some())
            .field("line_no", &self.line_no)
            .finish()
    }
}
