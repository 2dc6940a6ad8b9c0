mod assets;
mod data;
mod routes;

pub use assets::generate_static_html;
pub use data::{GraphData, GraphEdge, GraphGroup, GraphMetadata, GraphNode};
pub use routes::{WatchContext, serve, serve_with_watch};
