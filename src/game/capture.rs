//! Capture Detection
//!
//! Continuous-space proximity test between hunters and runners.
//! Runs after all motion so both sides' positions are final for the
//! tick.

use crate::game::state::{HunterId, RoundState, RunnerId};

/// A hunter/runner pair within capture range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capture {
    /// Hunter that made the catch
    pub hunter_id: HunterId,
    /// Runner that was caught
    pub runner_id: RunnerId,
}

/// Scan all hunter/runner pairs for a capture.
///
/// Pairs are visited hunters-outer, runners-inner, both in id order,
/// and the first hit wins. Capture requires the Euclidean distance to
/// be STRICTLY below `threshold`; exactly at the threshold is an
/// escape. Compared on squared distances.
pub fn check_captures(state: &RoundState, threshold: f64) -> Option<Capture> {
    let threshold_sq = threshold * threshold;
    for (hunter_id, hunter) in &state.hunters {
        for (runner_id, runner) in &state.runners {
            if hunter.position.distance_squared(runner.position) < threshold_sq {
                return Some(Capture {
                    hunter_id: *hunter_id,
                    runner_id: *runner_id,
                });
            }
        }
    }
    None
}
