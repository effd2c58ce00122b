use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::model::Grid;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unsupported output format {extension:?}, expected .csv or .jsonl")]
    UnsupportedFormat { extension: String },
    #[error("output path {0:?} has no file name")]
    NoFileName(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

/// One exported board. The occupancy string is the row-major `0`/`1`
/// encoding, the same form `Grid::from_occupancy` accepts back.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRecord {
    pub index: usize,
    pub occupancy: String,
    pub height: usize,
    pub width: usize,
}

impl LayoutRecord {
    pub fn new(index: usize, grid: &Grid) -> Self {
        Self {
            index,
            occupancy: grid.occupancy(),
            height: grid.height(),
            width: grid.width(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    JsonLines,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "jsonl" => Ok(ExportFormat::JsonLines),
            _ => Err(ExportError::UnsupportedFormat { extension }),
        }
    }

    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::JsonLines => "jsonl",
        }
    }
}

/// Writes records across numbered chunk files so very large enumerations
/// do not end up in one unmanageable file. For an output path `out.csv`
/// the chunks land at `out/out_1.csv`, `out/out_2.csv`, and so on; when
/// everything fits in a single chunk, `finish` collapses it back to the
/// plain `out.csv`.
pub struct ChunkedWriter {
    target: PathBuf,
    stem: String,
    format: ExportFormat,
    chunk_size: usize,
    chunk_index: usize,
    written_in_chunk: usize,
    chunk_paths: Vec<PathBuf>,
    current: Option<BufWriter<fs::File>>,
}

impl ChunkedWriter {
    pub fn new(target: impl Into<PathBuf>, chunk_size: usize) -> Result<Self, ExportError> {
        let target = target.into();
        let format = ExportFormat::from_path(&target)?;
        let stem = target
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| ExportError::NoFileName(target.clone()))?;
        Ok(Self {
            target,
            stem,
            format,
            chunk_size: chunk_size.max(1),
            chunk_index: 0,
            written_in_chunk: 0,
            chunk_paths: Vec::new(),
            current: None,
        })
    }

    pub fn push(&mut self, record: &LayoutRecord) -> Result<(), ExportError> {
        if self.current.is_none() || self.written_in_chunk == self.chunk_size {
            self.open_next_chunk()?;
        }
        let writer = self.current.as_mut().expect("chunk was just opened");
        match self.format {
            ExportFormat::Csv => writeln!(
                writer,
                "{},{},{},{}",
                record.index, record.occupancy, record.height, record.width
            )?,
            ExportFormat::JsonLines => {
                serde_json::to_writer(&mut *writer, record)?;
                writeln!(writer)?;
            }
        }
        self.written_in_chunk += 1;
        Ok(())
    }

    /// Flushes all chunks and returns the paths written. A single chunk is
    /// renamed to the plain target path.
    pub fn finish(mut self) -> Result<Vec<PathBuf>, ExportError> {
        if let Some(mut writer) = self.current.take() {
            writer.flush()?;
        }
        if self.chunk_paths.len() == 1 {
            let only = self.chunk_paths.remove(0);
            fs::rename(&only, &self.target)?;
            let chunk_dir = self.chunk_dir();
            if fs::read_dir(&chunk_dir)?.next().is_none() {
                fs::remove_dir(&chunk_dir)?;
            }
            return Ok(vec![self.target]);
        }
        Ok(self.chunk_paths)
    }

    fn chunk_dir(&self) -> PathBuf {
        self.target.with_extension("")
    }

    fn open_next_chunk(&mut self) -> Result<(), ExportError> {
        if let Some(mut writer) = self.current.take() {
            writer.flush()?;
        }
        let dir = self.chunk_dir();
        fs::create_dir_all(&dir)?;
        self.chunk_index += 1;
        let path = dir.join(format!(
            "{}_{}.{}",
            self.stem,
            self.chunk_index,
            self.format.extension()
        ));
        let mut writer = BufWriter::new(fs::File::create(&path)?);
        if self.format == ExportFormat::Csv {
            writeln!(writer, "index,occupancy,height,width")?;
        }
        self.chunk_paths.push(path.clone());
        self.current = Some(writer);
        self.written_in_chunk = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Size;
    use std::process;

    fn scratch_path(name: &str, extension: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{}_{}.{}", name, process::id(), extension))
    }

    fn sample_record(index: usize) -> LayoutRecord {
        let size = Size::new(5, 5).unwrap();
        let grid = Grid::from_occupancy("1111110000100001000010000", size).unwrap();
        LayoutRecord::new(index, &grid)
    }

    #[test]
    fn format_follows_the_extension() {
        assert_eq!(
            ExportFormat::from_path(Path::new("boards.csv")).unwrap(),
            ExportFormat::Csv
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("boards.jsonl")).unwrap(),
            ExportFormat::JsonLines
        );
        assert!(matches!(
            ExportFormat::from_path(Path::new("boards.txt")),
            Err(ExportError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            ExportFormat::from_path(Path::new("boards")),
            Err(ExportError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn a_single_chunk_collapses_to_the_plain_path() {
        let target = scratch_path("layouts_single", "csv");
        let mut writer = ChunkedWriter::new(&target, 100).unwrap();
        writer.push(&sample_record(1)).unwrap();
        writer.push(&sample_record(2)).unwrap();
        let paths = writer.finish().unwrap();
        assert_eq!(paths, vec![target.clone()]);

        let contents = fs::read_to_string(&target).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "index,occupancy,height,width");
        assert_eq!(lines[1], "1,1111110000100001000010000,5,5");
        assert_eq!(lines.len(), 3);
        fs::remove_file(&target).unwrap();
    }

    #[test]
    fn overflowing_records_split_into_numbered_chunks() {
        let target = scratch_path("layouts_chunked", "jsonl");
        let mut writer = ChunkedWriter::new(&target, 2).unwrap();
        for index in 1..=5 {
            writer.push(&sample_record(index)).unwrap();
        }
        let paths = writer.finish().unwrap();
        assert_eq!(paths.len(), 3);

        let dir = target.with_extension("");
        let stem = format!("layouts_chunked_{}", process::id());
        for (i, path) in paths.iter().enumerate() {
            assert_eq!(*path, dir.join(format!("{}_{}.jsonl", stem, i + 1)));
        }

        let first = fs::read_to_string(&paths[0]).unwrap();
        assert_eq!(first.lines().count(), 2);
        let value: serde_json::Value = serde_json::from_str(first.lines().next().unwrap()).unwrap();
        assert_eq!(value["index"], 1);
        assert_eq!(value["occupancy"], "1111110000100001000010000");
        let last = fs::read_to_string(&paths[2]).unwrap();
        assert_eq!(last.lines().count(), 1);

        fs::remove_dir_all(&dir).unwrap();
    }
}
