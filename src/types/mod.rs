pub mod record;
pub mod zone;

pub use record::*;
pub use zone::*;
