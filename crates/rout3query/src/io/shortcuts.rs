use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::{DataFrame, DataType, ParquetReader, SerReader};
use tracing::debug;

use hexicut::graph::{Shortcut, ShortcutDirection, ShortcutGraph};

use crate::io::Error;

/// Read shortcut records into `graph` from a single Parquet file or from
/// every `*.parquet` file of a directory.
///
/// Rows with nulls in any required column are skipped; an unknown
/// direction tag fails the load, as does an empty result.
pub fn read_shortcuts(path: &Path, graph: &mut ShortcutGraph) -> Result<(), Error> {
    for file in parquet_files(path)? {
        debug!("reading shortcuts from {}", file.display());
        let df = ParquetReader::new(File::open(&file)?).finish()?;
        append_shortcuts(&df, graph)?;
    }
    if graph.num_shortcuts() == 0 {
        return Err(Error::EmptyShortcutSet(path.display().to_string()));
    }
    Ok(())
}

fn parquet_files(path: &Path) -> Result<Vec<PathBuf>, Error> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let entry_path = entry?.path();
        if entry_path.extension().and_then(|ext| ext.to_str()) == Some("parquet") {
            files.push(entry_path);
        }
    }
    // directory iteration order is filesystem-dependent; adjacency order
    // must not be
    files.sort_unstable();
    Ok(files)
}

fn append_shortcuts(df: &DataFrame, graph: &mut ShortcutGraph) -> Result<(), Error> {
    let incoming = df.column("incoming_edge")?.cast(&DataType::Int64)?;
    let outgoing = df.column("outgoing_edge")?.cast(&DataType::Int64)?;
    let via = df.column("via_edge")?.cast(&DataType::Int64)?;
    let cost = df.column("cost")?.cast(&DataType::Float64)?;
    let cell = df.column("cell")?.cast(&DataType::Int64)?;
    let inside = df.column("inside")?.cast(&DataType::Int64)?;

    let incoming = incoming.i64()?;
    let outgoing = outgoing.i64()?;
    let via = via.i64()?;
    let cost = cost.f64()?;
    let cell = cell.i64()?;
    let inside = inside.i64()?;

    for row in 0..df.height() {
        let (Some(from), Some(to), Some(via_edge), Some(cost), Some(cell), Some(inside)) = (
            incoming.get(row),
            outgoing.get(row),
            via.get(row),
            cost.get(row),
            cell.get(row),
            inside.get(row),
        ) else {
            continue;
        };
        let direction = i8::try_from(inside)
            .ok()
            .and_then(|tag| ShortcutDirection::try_from(tag).ok())
            .ok_or(Error::InvalidDirectionTag(inside))?;
        graph.add_shortcut(Shortcut {
            from: from as u32,
            to: to as u32,
            cost,
            via_edge: via_edge as u32,
            cell: cell as u64,
            direction,
        });
    }
    Ok(())
}
