//! # Smoke-Test Scenario
//!
//! Drives one arena through every lifecycle step and records the region
//! chain after each phase.

use strata_core::{Arena, ArenaConfig, ArenaResult, RegionInfo};

/// Region chain captured after one phase of the scenario.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Phase {
    /// Phase name, as printed.
    pub name: &'static str,
    /// Region chain at the end of the phase.
    pub regions: Vec<RegionInfo>,
    /// Rendered arena dump.
    pub dump: String,
}

/// Runs the scenario:
///
/// 1. four allocations of 100 bytes
/// 2. one 8000-byte allocation
/// 3. reset
/// 4. allocations of 300, 400 and 9000 bytes
/// 5. free
///
/// # Errors
///
/// Returns the first allocation error.
pub fn run(config: ArenaConfig) -> ArenaResult<Vec<Phase>> {
    let mut arena = Arena::with_config(config);
    let mut phases = Vec::with_capacity(5);

    for _ in 0..4 {
        arena.alloc(100)?;
    }
    phases.push(snapshot("small alloc", &arena));

    arena.alloc(8000)?;
    phases.push(snapshot("big alloc", &arena));

    arena.reset();
    phases.push(snapshot("reset", &arena));

    for size in [300, 400, 9000] {
        arena.alloc(size)?;
    }
    phases.push(snapshot("allocs after reset", &arena));

    arena.free();
    phases.push(snapshot("free", &arena));

    tracing::debug!(phases = phases.len(), "smoke scenario complete");
    Ok(phases)
}

fn snapshot(name: &'static str, arena: &Arena) -> Phase {
    Phase {
        name,
        regions: arena.regions().collect(),
        dump: arena.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(phase: &Phase) -> Vec<(usize, usize)> {
        phase.regions.iter().map(|r| (r.count, r.capacity)).collect()
    }

    #[test]
    fn test_scenario_with_small_regions() {
        let phases = run(ArenaConfig::with_region_capacity(400)).unwrap();
        assert_eq!(phases.len(), 5);

        assert_eq!(counts(&phases[0]), vec![(400, 400)]);
        assert_eq!(counts(&phases[1]), vec![(400, 400), (8000, 8000)]);
        assert_eq!(counts(&phases[2]), vec![(0, 400), (0, 8000)]);
        assert_eq!(
            counts(&phases[3]),
            vec![(300, 400), (400, 8000), (9000, 9000)]
        );
        assert!(phases[4].regions.is_empty());
    }

    #[test]
    fn test_scenario_with_default_regions() {
        let phases = run(ArenaConfig::default()).unwrap();

        assert_eq!(counts(&phases[0]), vec![(400, 8192)]);
        // 8000 does not fit behind 400 bytes in an 8 KiB region
        assert_eq!(counts(&phases[1]), vec![(400, 8192), (8000, 8192)]);
        assert_eq!(
            counts(&phases[3]),
            vec![(700, 8192), (0, 8192), (9000, 9000)]
        );
    }
}
