// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Integration tests for iteration over a single non-tabular value

mod common;

#[cfg(test)]
mod default_iter {
    use super::common::init_logger;
    use graphiter::{DefaultIter, Iter, IterError, IterKind, Value, NULL_BAD_TYPE};
    use std::sync::Arc;

    #[test]
    fn test_single_value() {
        init_logger();
        let constant = Arc::new(Value::from(1));
        let mut iter = DefaultIter::new(Arc::clone(&constant));
        assert_eq!(iter.size(), 1);

        let mut visited = 0;
        while iter.valid() {
            assert_eq!(iter.value_ptr().as_ref(), constant.as_ref());
            visited += 1;
            iter.next();
        }
        assert_eq!(visited, 1);
    }

    #[test]
    fn test_from_value_picks_default() {
        let iter = Iter::from_value(Arc::new(Value::from("scalar"))).unwrap();
        assert_eq!(iter.kind(), IterKind::Default);
        assert!(iter.is_default());
        assert!(iter.col_names().is_empty());
    }

    #[test]
    fn test_erase_and_reset() {
        init_logger();
        let mut iter = DefaultIter::new(Arc::new(Value::from(7)));
        iter.erase();
        assert!(!iter.valid());
        assert_eq!(iter.size(), 1);

        iter.reset(0).unwrap();
        iter.reset(0).unwrap();
        assert!(iter.valid());

        assert!(matches!(
            iter.reset(1),
            Err(IterError::PositionOutOfRange { pos: 1, size: 1 })
        ));
    }

    #[test]
    fn test_structural_operations_unsupported() {
        init_logger();
        let mut iter = Iter::from(DefaultIter::new(Arc::new(Value::from(7))));
        let err = iter.erase_range(0, 1).unwrap_err();
        assert!(matches!(
            err,
            IterError::Unsupported {
                kind: IterKind::Default,
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "`erase_range' is not supported by default iterator"
        );

        assert!(iter.select(0, 1).is_err());
        let mut rng = fastrand::Rng::with_seed(1);
        assert!(iter.sample(1, &mut rng).is_err());
    }

    #[test]
    fn test_column_access_is_bad_type() {
        init_logger();
        let iter = Iter::from(DefaultIter::new(Arc::new(Value::from(7))));
        assert_eq!(iter.get_column("col"), &NULL_BAD_TYPE);
        assert_eq!(iter.get_column_by_index(0), &NULL_BAD_TYPE);
        assert_eq!(iter.get_tag_prop("tag", "prop"), &NULL_BAD_TYPE);
        assert_eq!(iter.get_edge_prop("edge", "prop"), &NULL_BAD_TYPE);
        assert_eq!(iter.get_vertex(), Value::Empty);
        assert_eq!(iter.get_edge(), Value::Empty);
        assert!(iter.get_vertices().is_empty());
        assert!(iter.get_edges().is_empty());
    }

    #[test]
    fn test_materialize_and_clear() {
        let mut iter = Iter::from(DefaultIter::new(Arc::new(Value::from(7))));
        let row = iter.move_row().unwrap();
        assert_eq!(row.values, vec![Value::from(7)]);

        let copy = iter.copy();
        iter.clear();
        assert!(!iter.valid());
        assert!(iter.materialize_row().is_none());
        assert!(copy.valid());
    }
}
