// Stochastic workload generation
//
// Builds a labelled job catalog, then synthesizes job-run records around the
// cutover. Every record is causally ordered, bounded by its schedule ceiling
// and, for scheduler submissions, aligned to its schedule grid. The random
// stream is passed in explicitly so a fixed seed reproduces a population.
//
// Pipeline:
//   LabelAssigner -> DurationSampler -> RecordGenerator

mod duration;
mod generator;
mod labels;

pub use duration::DurationSampler;
pub use generator::{
    align_to_grid, is_on_grid, Population, PopulationSplit, RecordGenerator, BEGIN_DELAY_SECS,
};
pub use labels::{Categorical, JobCatalog, LabelAssigner};
