pub use path::QueryResult;
pub use search::classic::ShortestPathClassic;
pub use search::multi::ShortestPathMulti;
pub use search::pruned::ShortestPathPruned;

pub mod path;
pub mod search;
