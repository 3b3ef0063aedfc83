//! CLI command handlers, one file per command.

mod check;
mod extract;
mod featurize;
mod schema;
mod train;

pub use check::run_check;
pub use extract::run_extract;
pub use featurize::run_featurize;
pub use schema::run_schema;
pub use train::{run_train, TrainOverrides};
