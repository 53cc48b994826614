//! End-to-end container scenarios

use powertree::*;
use test_case::test_case;

#[test_case(BalanceMode::Subtree ; "subtree")]
#[test_case(BalanceMode::Path ; "path")]
fn test_shared_power_scenario(mode: BalanceMode) {
    let mut tree = PowerTree::with_mode(mode);
    tree.insert(5, 10);
    tree.insert(5, 20);
    tree.insert(3, 99);

    // Lowest power holds a single identifier
    assert_eq!(tree.extract_min(), Ok(99));
    // Power 5 yields its identifiers smallest first
    assert_eq!(tree.extract_min(), Ok(10));
    assert_eq!(tree.extract_min(), Ok(20));
    assert_eq!(tree.extract_min(), Err(ExtractError::Empty));
}

#[test_case(BalanceMode::Subtree ; "subtree")]
#[test_case(BalanceMode::Path ; "path")]
fn test_monotonic_powers_stay_shallow(mode: BalanceMode) {
    let mut tree = PowerTree::with_mode(mode);
    for power in 1..=1000u64 {
        tree.insert(power, power);
    }

    // AVL height bound: < 1.4405 * log2(n + 2)
    let bound = (1.4405 * (1002f64).log2()).floor() as usize;
    assert!(
        tree.height() <= bound,
        "height {} exceeds AVL bound {}",
        tree.height(),
        bound
    );
    assert!(tree.height() >= 10, "1000 nodes need at least 10 levels");
    assert_eq!(tree.node_count(), 1000);
    tree.check_invariants().expect("tree stays AVL");
}

#[test_case(BalanceMode::Subtree ; "subtree")]
#[test_case(BalanceMode::Path ; "path")]
fn test_extract_max_prefers_smallest_identifier(mode: BalanceMode) {
    let mut tree = PowerTree::with_mode(mode);
    tree.insert(7, 3);
    tree.insert(7, 1);

    assert_eq!(tree.extract_max(), Ok(1));
    assert_eq!(tree.extract_max(), Ok(3));
    assert_eq!(tree.extract_max(), Err(ExtractError::Empty));
}

#[test]
fn test_fresh_container_reports_empty() {
    let mut tree = create_container();
    assert_eq!(tree.extract_min(), Err(ExtractError::Empty));
    assert_eq!(tree.extract_max(), Err(ExtractError::Empty));
    assert_eq!(ExtractError::Empty.to_string(), "container is empty");
}

#[test]
fn test_alternating_extremes_drain_towards_middle() {
    let mut tree = create_container();
    for power in [10u64, 50, 30, 20, 40] {
        tree.insert(power, power + 1);
    }

    assert_eq!(tree.extract_max(), Ok(51));
    assert_eq!(tree.extract_min(), Ok(11));
    assert_eq!(tree.extract_max(), Ok(41));
    assert_eq!(tree.extract_min(), Ok(21));
    assert_eq!(tree.powers(), vec![30]);
    assert_eq!(tree.extract_max(), Ok(31));
    assert!(tree.is_empty());
}

#[test]
fn test_registry_containers_are_independent() {
    let mut registry = ContainerRegistry::new(&EngineConfig::with_containers(4)).unwrap();
    registry.get_mut(1).unwrap().insert(1, 100);
    registry.get_mut(2).unwrap().insert(1, 200);

    assert_eq!(registry.get_mut(2).unwrap().extract_min(), Ok(200));
    assert_eq!(registry.get_mut(2).unwrap().extract_min(), Err(ExtractError::Empty));
    assert_eq!(registry.get_mut(1).unwrap().extract_max(), Ok(100));
}

#[test]
fn test_snapshot_sorts_bucket_contents() {
    let mut tree = create_container();
    tree.insert(2, 9);
    tree.insert(2, 4);
    tree.insert(1, 7);

    let snapshot = tree.snapshot().expect("tree is not empty");
    assert_eq!(snapshot.power, 2);
    assert_eq!(snapshot.identifiers, vec![4, 9]);
    assert_eq!(snapshot.left.as_ref().map(|n| n.power), Some(1));
    assert!(snapshot.right.is_none());
}
