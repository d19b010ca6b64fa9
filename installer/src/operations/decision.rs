// File: installer/src/operations/decision.rs
use crate::types::{Decision, InstallState, Plan, SkipReason, SnapshotProbe};

/// Decides what an installation run should do from already gathered facts.
///
/// Touches no files, so every branch can be exercised with a hand-built
/// probe. The returned plan lists the visited states in order.
pub fn decide(probe: &SnapshotProbe) -> Plan {
    let mut states = vec![InstallState::CheckingSource];

    // Step 1: Nothing to install unless the bundled chain is in a known format
    if !probe.source_recognized {
        return abort(states, SkipReason::SourceUnrecognized);
    }

    // Step 2: No installed chain means nothing to protect
    if !probe.target_exists {
        states.push(InstallState::NoExistingTarget);
        return Plan {
            states,
            decision: Decision::Install,
        };
    }

    // Step 3: Only replace an installed chain that is strictly lower
    states.push(InstallState::ComparingHeights);
    let heights = match probe.heights {
        Some(heights) => heights,
        None => return abort(states, SkipReason::HeightsUnreadable),
    };

    if !heights.is_outdated() {
        return abort(states, SkipReason::TargetUpToDate(heights));
    }

    // Step 4: The user gets the final word before overwriting
    states.push(InstallState::AwaitingConfirmation);
    Plan {
        states,
        decision: Decision::Confirm(heights),
    }
}

fn abort(mut states: Vec<InstallState>, reason: SkipReason) -> Plan {
    states.push(InstallState::Aborted);
    Plan {
        states,
        decision: Decision::Skip(reason),
    }
}
