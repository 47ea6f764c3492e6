use bigm_structs::core::Partition;

#[test]
fn test_singletons() {
    let partition = Partition::singletons(3);
    assert_eq!(partition.subsets, vec![vec![0], vec![1], vec![2]]);
    assert_eq!(partition.num_subsets(), 3);
    assert!(partition.validate(3).is_ok());
}

#[test]
fn test_validate() {
    let partition = Partition {
        subsets: vec![vec![0, 2], vec![1]],
    };
    assert!(partition.validate(3).is_ok());
    assert!(partition.validate(2).is_err());

    let duplicated = Partition {
        subsets: vec![vec![0, 1], vec![1]],
    };
    assert!(duplicated.validate(2).is_err());

    let empty = Partition {
        subsets: vec![vec![0], vec![]],
    };
    assert!(empty.validate(1).is_err());
}
