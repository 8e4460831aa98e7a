//! IO modules - side effects (object stores, filesystem)

pub mod extract;
pub mod publish;
pub mod source;
pub mod work_area;

pub use extract::{ExtractError, ExtractedEntry, unpack_zip, walk_files};
pub use publish::{PublishError, Publisher, StorePublisher};
pub use source::{ArchiveSource, SourceError, StoreSource};
pub use work_area::WorkArea;
