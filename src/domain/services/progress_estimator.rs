//! Duration estimate from a Terraform plan
//!
//! A UX heuristic, not a prediction. Managed SQL instances take far longer
//! than anything else, so their presence overrides the resource count.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::value_objects::{EstimateBasis, Operation, TimeEstimate};

/// Minutes per Cloud SQL instance
pub const MINUTES_PER_SQL_INSTANCE: u32 = 20;

fn sql_instance_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"#\s*(\S*google_sql_database_instance\.\S+)\s+will be created")
            .expect("static pattern should compile")
    })
}

fn resource_change_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"#\s+(\S+)\s+(?:will|must) be (?:created|destroyed|updated|replaced)")
            .expect("static pattern should compile")
    })
}

/// Estimate how long `operation` will take for this plan text
pub fn estimate(plan: &str, operation: Operation) -> TimeEstimate {
    let instances: BTreeSet<&str> = sql_instance_pattern()
        .captures_iter(plan)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();

    if !instances.is_empty() {
        let count = instances.len();
        return TimeEstimate {
            minutes: MINUTES_PER_SQL_INSTANCE.saturating_mul(count as u32),
            basis: EstimateBasis::ManagedDatabase { instances: count },
            operation,
        };
    }

    let resources = resource_change_pattern().find_iter(plan).count();
    if resources == 0 {
        return TimeEstimate {
            minutes: 1,
            basis: EstimateBasis::NoChanges,
            operation,
        };
    }

    TimeEstimate {
        minutes: tiered_minutes(resources),
        basis: EstimateBasis::ResourceCount { resources },
        operation,
    }
}

/// 1-3 resources: 30s each, 4-8: 2 min each, more: 5 min each
fn tiered_minutes(resources: usize) -> u32 {
    let half_minutes = match resources {
        0..=3 => resources,
        4..=8 => resources * 4,
        _ => resources * 10,
    };
    u32::try_from(half_minutes / 2).unwrap_or(u32::MAX).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn plan_with(n: usize) -> String {
        (0..n)
            .map(|i| format!("  # google_storage_bucket.b{i} will be created\n"))
            .collect()
    }

    #[test]
    fn two_sql_instances_take_forty_minutes() {
        let plan = "\
  # module.db.google_sql_database_instance.main will be created
  + resource \"google_sql_database_instance\" \"main\" {
  # google_sql_database_instance.replica will be created
  # google_storage_bucket.artifacts will be created
";
        let estimate = estimate(plan, Operation::Apply);
        assert_eq!(estimate.minutes, 40);
        assert_eq!(estimate.basis, EstimateBasis::ManagedDatabase { instances: 2 });
        assert_eq!(
            estimate.to_string(),
            "~40 minutes (Cloud SQL/PostgreSQL detected)"
        );
    }

    #[test]
    fn repeated_instance_address_counts_once() {
        let plan = "\
  # google_sql_database_instance.main will be created
  # google_sql_database_instance.main will be created
";
        assert_eq!(estimate(plan, Operation::Apply).minutes, 20);
    }

    #[test]
    fn empty_plan_is_one_minute() {
        let estimate = estimate("No changes. Your infrastructure matches.", Operation::Apply);
        assert_eq!(estimate.basis, EstimateBasis::NoChanges);
        assert_eq!(estimate.to_string(), "~1 minute");
    }

    #[test]
    fn small_plans_floor_to_at_least_one_minute() {
        assert_eq!(estimate(&plan_with(1), Operation::Apply).minutes, 1);
        assert_eq!(estimate(&plan_with(3), Operation::Apply).minutes, 1);
    }

    #[test]
    fn tiers_scale_per_resource() {
        assert_eq!(estimate(&plan_with(4), Operation::Apply).minutes, 8);
        assert_eq!(estimate(&plan_with(8), Operation::Apply).minutes, 16);
        assert_eq!(estimate(&plan_with(9), Operation::Apply).minutes, 45);
    }

    #[test]
    fn counts_every_change_kind() {
        let plan = "\
  # a.one will be created
  # b.two will be destroyed
  # c.three will be updated in-place
  # d.four must be replaced
  # e.five will be read during apply
";
        let estimate = estimate(plan, Operation::Destroy);
        assert_eq!(estimate.basis, EstimateBasis::ResourceCount { resources: 4 });
        assert_eq!(estimate.operation, Operation::Destroy);
    }

    #[test]
    fn sql_instance_being_destroyed_is_counted_as_resource() {
        let plan = "  # google_sql_database_instance.main will be destroyed\n";
        let estimate = estimate(plan, Operation::Destroy);
        assert_eq!(estimate.basis, EstimateBasis::ResourceCount { resources: 1 });
    }

    proptest! {
        #[test]
        fn estimate_is_at_least_one_minute(plan in ".{0,400}") {
            prop_assert!(estimate(&plan, Operation::Apply).minutes >= 1);
        }

        #[test]
        fn more_resources_never_estimate_less(n in 1usize..40) {
            let fewer = estimate(&plan_with(n), Operation::Apply).minutes;
            let more = estimate(&plan_with(n + 1), Operation::Apply).minutes;
            prop_assert!(more >= fewer);
        }
    }
}
