use std::path::Path;

use polars::prelude::{CsvReader, DataFrame, DataType, SerReader};
use tracing::debug;

use hexicut::graph::{EdgeRecord, ShortcutGraph};

use crate::io::Error;

/// Read edge metadata into `graph` from a headered CSV.
///
/// Only the `id`, `incoming_cell`, `outgoing_cell`, `lca_res`, `length`
/// and `cost` columns are consumed; extra columns are ignored and rows
/// with nulls in the consumed ones are skipped silently. An empty result
/// fails the load.
pub fn read_edge_records(path: &Path, graph: &mut ShortcutGraph) -> Result<(), Error> {
    debug!("reading edge metadata from {}", path.display());
    let df = CsvReader::from_path(path)?.has_header(true).finish()?;
    append_edge_records(&df, graph)?;
    if graph.num_edge_records() == 0 {
        return Err(Error::EmptyEdgeMetadata(path.display().to_string()));
    }
    Ok(())
}

fn append_edge_records(df: &DataFrame, graph: &mut ShortcutGraph) -> Result<(), Error> {
    let id = df.column("id")?.cast(&DataType::Int64)?;
    let incoming_cell = df.column("incoming_cell")?.cast(&DataType::Int64)?;
    let outgoing_cell = df.column("outgoing_cell")?.cast(&DataType::Int64)?;
    let lca_res = df.column("lca_res")?.cast(&DataType::Int64)?;
    let length = df.column("length")?.cast(&DataType::Float64)?;
    let cost = df.column("cost")?.cast(&DataType::Float64)?;

    let id = id.i64()?;
    let incoming_cell = incoming_cell.i64()?;
    let outgoing_cell = outgoing_cell.i64()?;
    let lca_res = lca_res.i64()?;
    let length = length.f64()?;
    let cost = cost.f64()?;

    for row in 0..df.height() {
        let (
            Some(id),
            Some(incoming_cell),
            Some(outgoing_cell),
            Some(lca_res),
            Some(length),
            Some(cost),
        ) = (
            id.get(row),
            incoming_cell.get(row),
            outgoing_cell.get(row),
            lca_res.get(row),
            length.get(row),
            cost.get(row),
        )
        else {
            continue;
        };
        graph.add_edge_record(
            id as u32,
            EdgeRecord {
                incoming_cell: incoming_cell as u64,
                outgoing_cell: outgoing_cell as u64,
                lca_res: lca_res as i32,
                length,
                cost,
            },
        );
    }
    Ok(())
}
