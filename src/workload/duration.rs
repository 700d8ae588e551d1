// Bounded run-duration synthesis
//
// Order matters: the base draw is clamped to the schedule ceiling before the
// impact multiplier, and the result is clamped again to [1, ceiling].

use crate::job::{JobCategory, ScheduleClass, UpgradeImpact};
use rand::Rng;

/// Samples one run duration in seconds
#[derive(Debug, Clone, Copy, Default)]
pub struct DurationSampler;

impl DurationSampler {
    pub fn new() -> Self {
        Self
    }

    pub fn sample<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        category: JobCategory,
        is_post_cutover: bool,
        impact: UpgradeImpact,
        schedule: ScheduleClass,
    ) -> i64 {
        let (lo, hi) = category.base_range_secs();
        let max_for_schedule = schedule.max_duration_secs();

        let mut duration = rng.gen_range(lo..hi).min(max_for_schedule);

        if is_post_cutover {
            if let Some((low, high)) = impact.multiplier_range() {
                let factor: f64 = rng.gen_range(low..high);
                duration = (duration as f64 * factor) as i64;
            }
        }

        duration.clamp(1, max_for_schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const CATEGORIES: [JobCategory; 4] = [
        JobCategory::Short,
        JobCategory::Medium,
        JobCategory::Long,
        JobCategory::VeryLong,
    ];
    const IMPACTS: [UpgradeImpact; 3] = [
        UpgradeImpact::Improved,
        UpgradeImpact::Regressed,
        UpgradeImpact::Unchanged,
    ];
    const SCHEDULES: [ScheduleClass; 4] = [
        ScheduleClass::FixedInterval,
        ScheduleClass::Daily,
        ScheduleClass::Monthly,
        ScheduleClass::Unscheduled,
    ];

    #[test]
    fn test_durations_within_schedule_bounds() {
        let sampler = DurationSampler::new();
        let mut rng = StdRng::seed_from_u64(5);

        for category in CATEGORIES {
            for impact in IMPACTS {
                for schedule in SCHEDULES {
                    for post in [false, true] {
                        for _ in 0..200 {
                            let d = sampler.sample(&mut rng, category, post, impact, schedule);
                            assert!(d >= 1, "{:?}/{:?}/{:?} gave {}", category, impact, schedule, d);
                            assert!(d <= schedule.max_duration_secs());
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_pre_cutover_stays_in_base_range() {
        let sampler = DurationSampler::new();
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..1000 {
            let d = sampler.sample(
                &mut rng,
                JobCategory::Medium,
                false,
                UpgradeImpact::Regressed,
                ScheduleClass::Unscheduled,
            );
            assert!((120..900).contains(&d));
        }
    }

    #[test]
    fn test_long_job_on_fixed_interval_pinned_to_ceiling() {
        // Every long base draw is >= 900s, so the schedule clamp pins it.
        let sampler = DurationSampler::new();
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..100 {
            let d = sampler.sample(
                &mut rng,
                JobCategory::Long,
                false,
                UpgradeImpact::Unchanged,
                ScheduleClass::FixedInterval,
            );
            assert_eq!(d, 900);
        }
    }

    #[test]
    fn test_improved_post_cutover_shrinks() {
        let sampler = DurationSampler::new();
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..500 {
            let d = sampler.sample(
                &mut rng,
                JobCategory::Long,
                true,
                UpgradeImpact::Improved,
                ScheduleClass::FixedInterval,
            );
            // 900 * [0.5, 0.9) truncated
            assert!((450..810).contains(&d), "got {}", d);
        }
    }

    #[test]
    fn test_regressed_post_cutover_clamped_to_ceiling() {
        let sampler = DurationSampler::new();
        let mut rng = StdRng::seed_from_u64(34);
        for _ in 0..100 {
            let d = sampler.sample(
                &mut rng,
                JobCategory::VeryLong,
                true,
                UpgradeImpact::Regressed,
                ScheduleClass::Daily,
            );
            assert_eq!(d, 86_400);
        }
    }

    #[test]
    fn test_unchanged_post_cutover_matches_pre_draw() {
        // No multiplier is drawn for unchanged jobs, so the streams stay aligned.
        let sampler = DurationSampler::new();
        let mut pre_rng = StdRng::seed_from_u64(55);
        let mut post_rng = StdRng::seed_from_u64(55);
        for _ in 0..100 {
            let pre = sampler.sample(
                &mut pre_rng,
                JobCategory::Short,
                false,
                UpgradeImpact::Unchanged,
                ScheduleClass::Daily,
            );
            let post = sampler.sample(
                &mut post_rng,
                JobCategory::Short,
                true,
                UpgradeImpact::Unchanged,
                ScheduleClass::Daily,
            );
            assert_eq!(pre, post);
        }
    }
}
