// Weighted categorical labelling of a job catalog
//
// Each job gets a category, an upgrade impact and a schedule class. The three
// mappings are drawn in three separate passes over the job names, so the draw
// order (and therefore a seeded catalog) is stable across runs.

use crate::error::{DriftError, Result};
use crate::job::{JobCategory, JobMetadata, ScheduleClass, UpgradeImpact};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use std::collections::HashMap;

/// Categorical distribution over a closed set of values
#[derive(Debug, Clone)]
pub struct Categorical<T> {
    values: Vec<T>,
    index: WeightedIndex<f64>,
}

impl<T: Copy> Categorical<T> {
    /// Build from a `(value, weight)` table
    pub fn new(table_name: &'static str, table: &[(T, f64)]) -> Result<Self> {
        let index = WeightedIndex::new(table.iter().map(|(_, w)| *w)).map_err(|e| {
            DriftError::InvalidWeights {
                table: table_name,
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            values: table.iter().map(|(v, _)| *v).collect(),
            index,
        })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.values[self.index.sample(rng)]
    }
}

/// Assigns fixed labels to every job in a catalog
#[derive(Debug, Clone)]
pub struct LabelAssigner {
    categories: Categorical<JobCategory>,
    impacts: Categorical<UpgradeImpact>,
    schedules: Categorical<ScheduleClass>,
}

impl LabelAssigner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            categories: Categorical::new("category", &JobCategory::WEIGHTS)?,
            impacts: Categorical::new("impact", &UpgradeImpact::WEIGHTS)?,
            schedules: Categorical::new("schedule", &ScheduleClass::WEIGHTS)?,
        })
    }

    /// Label every job, returning metadata in the order of `job_names`
    pub fn assign<R: Rng + ?Sized>(&self, job_names: &[String], rng: &mut R) -> JobCatalog {
        let categories: Vec<_> = job_names
            .iter()
            .map(|_| self.categories.sample(rng))
            .collect();
        let impacts: Vec<_> = job_names.iter().map(|_| self.impacts.sample(rng)).collect();
        let schedules: Vec<_> = job_names
            .iter()
            .map(|_| self.schedules.sample(rng))
            .collect();

        let jobs = job_names
            .iter()
            .zip(categories)
            .zip(impacts)
            .zip(schedules)
            .map(|(((name, category), impact), schedule)| JobMetadata {
                name: name.clone(),
                category,
                impact,
                schedule,
            })
            .collect();

        JobCatalog::new(jobs)
    }
}

/// Immutable set of labelled jobs with lookup by name
#[derive(Debug, Clone)]
pub struct JobCatalog {
    jobs: Vec<JobMetadata>,
    by_name: HashMap<String, usize>,
}

impl JobCatalog {
    pub fn new(jobs: Vec<JobMetadata>) -> Self {
        let by_name = jobs
            .iter()
            .enumerate()
            .map(|(i, job)| (job.name.clone(), i))
            .collect();
        Self { jobs, by_name }
    }

    pub fn get(&self, name: &str) -> Option<&JobMetadata> {
        self.by_name.get(name).map(|&i| &self.jobs[i])
    }

    pub fn jobs(&self) -> &[JobMetadata] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Pick a job uniformly at random
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&JobMetadata> {
        if self.jobs.is_empty() {
            return None;
        }
        Some(&self.jobs[rng.gen_range(0..self.jobs.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn names(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("JOB_{}", i)).collect()
    }

    #[test]
    fn test_categorical_rejects_zero_weights() {
        let result = Categorical::new("broken", &[(1u8, 0.0), (2u8, 0.0)]);
        assert!(matches!(result, Err(DriftError::InvalidWeights { .. })));
    }

    #[test]
    fn test_categorical_single_value() {
        let dist = Categorical::new("only", &[(7u8, 1.0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!((0..100).all(|_| dist.sample(&mut rng) == 7));
    }

    #[test]
    fn test_assign_labels_every_job_once() {
        let assigner = LabelAssigner::new().unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let catalog = assigner.assign(&names(50), &mut rng);

        assert_eq!(catalog.len(), 50);
        assert_eq!(catalog.jobs()[0].name, "JOB_1");
        assert!(catalog.get("JOB_50").is_some());
        assert!(catalog.get("JOB_51").is_none());
    }

    #[test]
    fn test_assign_is_reproducible() {
        let assigner = LabelAssigner::new().unwrap();
        let a = assigner.assign(&names(30), &mut StdRng::seed_from_u64(11));
        let b = assigner.assign(&names(30), &mut StdRng::seed_from_u64(11));
        assert_eq!(a.jobs(), b.jobs());
    }

    #[test]
    fn test_empty_catalog_choose() {
        let catalog = JobCatalog::new(Vec::new());
        let mut rng = StdRng::seed_from_u64(0);
        assert!(catalog.is_empty());
        assert!(catalog.choose(&mut rng).is_none());
    }
}
