pub mod bugreport;
pub mod section;

pub use bugreport::Bugreport;
pub use section::{Section, DUMP_OF_SERVICE_USAGESTATS};
