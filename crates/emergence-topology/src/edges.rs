//! Edge-count computation.
//!
//! `edge_count` uses closed forms. `edge_count_by_joins` replays the growth
//! model join by join and is kept as the reference the closed forms are
//! checked against.
//!
//! # Hub and Spoke at `k = 0`
//!
//! A hub-and-spoke system with a zero cap has no edges at all, not even
//! spokes to the hub. The cap gates the whole topology, the same way it
//! gates a pipeline.

use crate::topology::Topology;

/// `sum_{j=1..count} min(cap, j)`.
///
/// The number of links formed when joins `1..=count` may each link to at
/// most `cap` predecessors. Saturates at `u64::MAX`.
pub const fn capped_sum(count: u64, cap: u64) -> u64 {
    if cap >= count {
        triangular(count)
    } else {
        triangular(cap).saturating_add(cap.saturating_mul(count - cap))
    }
}

/// `x * (x + 1) / 2`, halving the even factor first.
const fn triangular(x: u64) -> u64 {
    if x % 2 == 0 {
        (x / 2).saturating_mul(x.saturating_add(1))
    } else {
        x.saturating_mul(x / 2 + 1)
    }
}

/// Links formed by agent `i` (1-based) as it joins.
///
/// Agent 1 never forms links.
pub const fn links_on_join(i: u32, k: u32, topology: Topology) -> u64 {
    if i <= 1 {
        return 0;
    }
    let existing = (i - 1) as u64;
    let k = k as u64;
    match topology {
        Topology::BoundedDegree => {
            if k < existing {
                k
            } else {
                existing
            }
        }
        Topology::FullMesh => existing,
        Topology::HubAndSpoke => {
            if k == 0 {
                return 0;
            }
            // Peers are the non-hub agents already present.
            let peers = existing - 1;
            let extra = k - 1;
            1 + if extra < peers { extra } else { peers }
        }
        Topology::Pipeline => {
            if k > 0 {
                1
            } else {
                0
            }
        }
    }
}

/// Total edges for `n` agents with connection cap `k`.
///
/// Total over every `n` and `k`. Callers clamp `k` to `n - 1`
/// beforehand; a larger `k` gives the same result as `n - 1`.
pub const fn edge_count(n: u32, k: u32, topology: Topology) -> u64 {
    if n <= 1 {
        return 0;
    }
    let joins = (n - 1) as u64;
    let k = k as u64;
    match topology {
        Topology::BoundedDegree => capped_sum(joins, k),
        Topology::FullMesh => triangular(joins),
        Topology::HubAndSpoke => {
            if k == 0 {
                0
            } else {
                joins + capped_sum(joins - 1, k - 1)
            }
        }
        Topology::Pipeline => {
            if k > 0 {
                joins
            } else {
                0
            }
        }
    }
}

/// Total edges computed by summing `links_on_join` over every join.
pub fn edge_count_by_joins(n: u32, k: u32, topology: Topology) -> u64 {
    (2..=n).map(|i| links_on_join(i, k, topology)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn capped_sum_saturates() {
        assert_eq!(capped_sum(4, 2), 1 + 2 + 2 + 2);
        assert_eq!(capped_sum(5, 9), 15);
        assert_eq!(capped_sum(u64::MAX, u64::MAX), u64::MAX);
        assert_eq!(capped_sum(u64::MAX, 3), u64::MAX);
        assert_eq!(capped_sum(1 << 32, 1 << 32), (1u64 << 31) * ((1 << 32) + 1));
    }

    #[test]
    fn single_agent_has_no_edges() {
        for topology in Topology::ALL {
            for k in [0, 1, 3, 199, u32::MAX] {
                assert_eq!(edge_count(1, k, topology), 0, "{topology} k={k}");
            }
        }
    }

    #[test]
    fn bounded_reference_scenario() {
        // 27 joins at the cap of 3, plus 1 + 2 for the second and third agents
        assert_eq!(edge_count(30, 3, Topology::BoundedDegree), 84);
    }

    #[test]
    fn bounded_saturates_at_complete_graph() {
        assert_eq!(edge_count(10, 9, Topology::BoundedDegree), 45);
        assert_eq!(edge_count(10, 50, Topology::BoundedDegree), 45);
    }

    #[test]
    fn hub_without_cap_is_empty() {
        for n in 1..=20 {
            assert_eq!(edge_count(n, 0, Topology::HubAndSpoke), 0);
        }
    }

    #[test]
    fn hub_with_cap_one_is_a_star() {
        for n in 1..=20 {
            assert_eq!(edge_count(n, 1, Topology::HubAndSpoke), (n - 1) as u64);
        }
    }

    #[test]
    fn hub_small_values() {
        // i=2: 1, i=3: 1+1, i=4: 1+1
        assert_eq!(edge_count(4, 2, Topology::HubAndSpoke), 5);
        // fully saturated hub is a complete graph
        assert_eq!(edge_count(6, 5, Topology::HubAndSpoke), 15);
    }

    #[test]
    fn pipeline_is_gated_by_cap() {
        assert_eq!(edge_count(10, 0, Topology::Pipeline), 0);
        assert_eq!(edge_count(10, 1, Topology::Pipeline), 9);
        assert_eq!(edge_count(10, 9, Topology::Pipeline), 9);
    }

    #[test]
    fn first_join_forms_nothing() {
        for topology in Topology::ALL {
            assert_eq!(links_on_join(1, 5, topology), 0);
            assert_eq!(links_on_join(0, 5, topology), 0);
        }
    }

    #[test]
    fn capped_sum_values() {
        assert_eq!(capped_sum(0, 3), 0);
        assert_eq!(capped_sum(5, 0), 0);
        assert_eq!(capped_sum(5, 10), 15);
        assert_eq!(capped_sum(29, 3), 84);
    }

    fn any_topology() -> impl Strategy<Value = Topology> {
        prop::sample::select(Topology::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn closed_form_matches_replay(n in 1u32..=200, k in 0u32..=210, t in any_topology()) {
            prop_assert_eq!(edge_count(n, k, t), edge_count_by_joins(n, k, t));
        }

        #[test]
        fn pipeline_law(n in 1u32..=200, k in 0u32..=200) {
            let expected = if k > 0 { (n - 1) as u64 } else { 0 };
            prop_assert_eq!(edge_count(n, k, Topology::Pipeline), expected);
        }

        #[test]
        fn full_mesh_ignores_cap(n in 1u32..=200, k in 0u32..=200) {
            let n64 = n as u64;
            prop_assert_eq!(edge_count(n, k, Topology::FullMesh), n64 * (n64 - 1) / 2);
        }

        #[test]
        fn bounded_zero_cap_is_empty(n in 1u32..=200) {
            prop_assert_eq!(edge_count(n, 0, Topology::BoundedDegree), 0);
        }

        #[test]
        fn non_decreasing_in_cap(n in 1u32..=200, k in 0u32..200, t in any_topology()) {
            prop_assert!(edge_count(n, k, t) <= edge_count(n, k + 1, t));
        }

        #[test]
        fn never_exceeds_complete_graph(n in 1u32..=200, k in 0u32..=200, t in any_topology()) {
            prop_assert!(edge_count(n, k, t) <= crate::complete_edges(n));
        }
    }
}
