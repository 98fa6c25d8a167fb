// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Integration tests for plain row-set iteration

mod common;

#[cfg(test)]
mod sequential_iter {
    use super::common::{init_logger, row, sequential_table, sequential_value};
    use graphiter::{
        DataSet, Iter, IterConfig, IterError, IterKind, LogicalRow, LogicalRowKind, Row,
        SequentialIter, Value, NULL_BAD_TYPE, NULL_VALUE,
    };
    use std::sync::Arc;

    fn col1(iter: &SequentialIter) -> i64 {
        iter.get_column("col1").as_int().unwrap()
    }

    fn collect_col1(iter: &mut SequentialIter) -> Vec<i64> {
        iter.reset(0).unwrap();
        let mut result = Vec::new();
        while iter.valid() {
            result.push(col1(iter));
            iter.next();
        }
        result
    }

    #[test]
    fn test_iterate_columns() {
        init_logger();
        let mut iter = SequentialIter::new(sequential_value(10)).unwrap();
        assert_eq!(iter.size(), 10);
        let mut i = 0i64;
        while iter.valid() {
            assert_eq!(iter.get_column("col1"), &Value::from(i));
            assert_eq!(iter.get_column("col2"), &Value::from(i.to_string()));
            i += 1;
            iter.next();
        }
        assert_eq!(i, 10);
    }

    #[test]
    fn test_copy_of_copy_starts_over() {
        let mut iter = SequentialIter::new(sequential_value(10)).unwrap();
        iter.next();
        iter.next();
        let copy1 = iter.copy();
        let mut copy2 = copy1.copy();
        assert_eq!(copy2.size(), 10);
        assert_eq!(collect_col1(&mut copy2), (0..10).collect::<Vec<_>>());
        assert!(!copy2.valid());
        assert_eq!(col1(&iter), 2);

        let mut copy3 = iter.copy();
        iter.next();
        iter.next();
        assert_eq!(col1(&iter), 4);
        assert_eq!(col1(&copy3), 0);
        copy3.next();
        assert_eq!(col1(&copy3), 1);
        assert_eq!(col1(&iter), 4);
        assert_eq!(col1(&copy1), 0);
    }

    #[test]
    fn test_erase_preserves_order() {
        init_logger();
        let mut iter = SequentialIter::new(sequential_value(10)).unwrap();
        while iter.valid() {
            if col1(&iter) % 2 == 0 {
                iter.erase();
            } else {
                iter.next();
            }
        }
        assert_eq!(collect_col1(&mut iter), vec![1, 3, 5, 7, 9]);

        let mut count = 5;
        iter.reset(1).unwrap();
        while iter.valid() {
            count -= 1;
            iter.next();
        }
        assert_eq!(count, 1);
    }

    #[test]
    fn test_erase_does_not_touch_shared_rows() {
        init_logger();
        let value = sequential_value(10);
        let mut iter = SequentialIter::new(Arc::clone(&value)).unwrap();
        let mut copy = iter.copy();

        iter.erase();
        iter.erase();
        assert_eq!(iter.size(), 8);
        assert_eq!(col1(&iter), 2);

        assert_eq!(copy.size(), 10);
        assert_eq!(collect_col1(&mut copy), (0..10).collect::<Vec<_>>());
        assert_eq!(value.as_dataset().unwrap().row_size(), 10);
    }

    #[test]
    fn test_unstable_erase_moves_last_row() {
        let mut iter = SequentialIter::new(sequential_value(3)).unwrap();
        iter.unstable_erase();
        assert_eq!(iter.size(), 2);

        let mut result = Vec::new();
        while iter.valid() {
            result.push(row(vec![
                iter.get_column("col1").clone(),
                iter.get_column("col2").clone(),
            ]));
            iter.next();
        }
        assert_eq!(
            result,
            vec![
                row(vec![Value::from(2), Value::from("2")]),
                row(vec![Value::from(1), Value::from("1")]),
            ]
        );
    }

    #[test]
    fn test_unstable_erase_keeps_membership() {
        let mut iter = SequentialIter::new(sequential_value(10)).unwrap();
        while iter.valid() {
            if col1(&iter) % 3 == 0 {
                iter.unstable_erase();
            } else {
                iter.next();
            }
        }
        let mut remaining = collect_col1(&mut iter);
        remaining.sort_unstable();
        assert_eq!(remaining, vec![1, 2, 4, 5, 7, 8]);
    }

    #[test]
    fn test_erase_range_clamps() {
        let mut iter = SequentialIter::new(sequential_value(10)).unwrap();
        iter.erase_range(5, 11).unwrap();
        assert_eq!(iter.size(), 5);
        assert_eq!(collect_col1(&mut iter), vec![0, 1, 2, 3, 4]);

        let mut iter = SequentialIter::new(sequential_value(10)).unwrap();
        iter.erase_range(0, 10).unwrap();
        assert_eq!(iter.size(), 0);
        assert!(!iter.valid());

        let mut iter = SequentialIter::new(sequential_value(10)).unwrap();
        iter.next();
        iter.erase_range(0, 5).unwrap();
        assert_eq!(col1(&iter), 5);
        assert_eq!(collect_col1(&mut iter), vec![5, 6, 7, 8, 9]);

        let mut iter = SequentialIter::new(sequential_value(10)).unwrap();
        iter.erase_range(12, 20).unwrap();
        iter.erase_range(4, 4).unwrap();
        assert_eq!(iter.size(), 10);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut iter = SequentialIter::new(sequential_value(10)).unwrap();
        iter.reset(4).unwrap();
        iter.reset(4).unwrap();
        assert_eq!(col1(&iter), 4);

        assert!(matches!(
            iter.reset(10),
            Err(IterError::PositionOutOfRange { pos: 10, size: 10 })
        ));

        let mut empty = SequentialIter::new(sequential_value(0)).unwrap();
        empty.reset(0).unwrap();
        assert!(!empty.valid());
    }

    #[test]
    fn test_column_lookup_sentinels() {
        let mut iter = SequentialIter::new(sequential_value(1)).unwrap();
        assert_eq!(iter.get_column_by_index(-1), &Value::from("0"));
        assert_eq!(iter.get_column_by_index(-2), &Value::from(0));
        assert_eq!(iter.get_column_by_index(1), &Value::from("0"));
        assert_eq!(iter.get_column_by_index(-3), &NULL_BAD_TYPE);
        assert_eq!(iter.get_column_by_index(i64::MIN), &NULL_BAD_TYPE);
        assert_eq!(iter.get_column_by_index(2), &NULL_BAD_TYPE);
        assert_eq!(iter.get_column("missing"), &NULL_VALUE);

        iter.next();
        assert_eq!(iter.get_column("col1"), &NULL_VALUE);
        assert_eq!(iter.get_column_by_index(0), &NULL_VALUE);
    }

    #[test]
    fn test_projected_props() {
        let mut ds = DataSet::new(["player.name", "like.likeness"]);
        ds.push(vec![Value::from("Tim"), Value::from(90)]);
        let iter = SequentialIter::new(Arc::new(Value::from(ds))).unwrap();
        assert_eq!(iter.get_tag_prop("player", "name"), &Value::from("Tim"));
        assert_eq!(iter.get_edge_prop("like", "likeness"), &Value::from(90));
        assert_eq!(iter.get_tag_prop("player", "age"), &NULL_VALUE);
    }

    #[test]
    fn test_move_row() {
        let mut iter = SequentialIter::new(sequential_value(2)).unwrap();
        let moved = iter.move_row().unwrap();
        assert_eq!(moved, row(vec![Value::from(0), Value::from("0")]));
        assert_eq!(iter.row(), Some(&Row::default()));
        assert_eq!(iter.size(), 2);

        iter.next();
        iter.next();
        assert!(iter.move_row().is_none());
    }

    #[test]
    fn test_logical_row() {
        let iter = SequentialIter::new(sequential_value(2)).unwrap();
        let logical = iter.logical_row().unwrap();
        assert_eq!(logical.kind(), LogicalRowKind::Sequential);
        let expected = row(vec![Value::from(0), Value::from("0")]);
        assert_eq!(logical, LogicalRow::sequential(&expected));
    }

    #[test]
    fn test_select_window() {
        let mut iter = SequentialIter::new(sequential_value(10)).unwrap();
        iter.select(2, 3).unwrap();
        assert_eq!(collect_col1(&mut iter), vec![2, 3, 4]);

        let mut iter = SequentialIter::new(sequential_value(10)).unwrap();
        iter.select(8, 5).unwrap();
        assert_eq!(collect_col1(&mut iter), vec![8, 9]);

        let mut iter = SequentialIter::new(sequential_value(10)).unwrap();
        iter.select(20, 1).unwrap();
        assert_eq!(iter.size(), 0);
    }

    #[test]
    fn test_sample_keeps_order() {
        init_logger();
        let mut rng = IterConfig::default().with_sample_seed(11).rng();
        let mut iter = SequentialIter::new(sequential_value(10)).unwrap();
        iter.sample(4, &mut rng);
        assert_eq!(iter.size(), 4);

        let sampled = collect_col1(&mut iter);
        assert!(sampled.windows(2).all(|w| w[0] < w[1]));
        assert!(sampled.iter().all(|i| (0..10).contains(i)));

        iter.sample(10, &mut rng);
        assert_eq!(iter.size(), 4);
    }

    #[test]
    fn test_through_iter() {
        let mut iter = Iter::from_value(Arc::new(Value::from(sequential_table(5)))).unwrap();
        assert_eq!(iter.kind(), IterKind::Sequential);
        assert_eq!(iter.col_names(), ["col1".to_string(), "col2".to_string()]);
        assert!(iter.row().is_some());
        assert_eq!(iter.get_vertex(), Value::Empty);
        assert_eq!(iter.get_edge(), Value::Empty);

        iter.erase();
        iter.unstable_erase();
        assert_eq!(iter.size(), 3);
        assert_eq!(iter.get_column("col1"), &Value::from(4));

        iter.clear();
        assert!(iter.is_empty());
        assert!(!iter.valid());
    }
}
