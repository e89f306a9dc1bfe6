//! Property-based tests for permission equality and lookup.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::{Permission, PermissionCode};
    use proptest::prelude::*;
    use synapsis_core::Maybe;

    fn catalog_code() -> impl Strategy<Value = PermissionCode> {
        prop::sample::select(PermissionCode::ALL.to_vec())
    }

    fn shuffle_case(s: &str, mask: u64) -> String {
        s.chars()
            .enumerate()
            .map(|(i, c)| {
                if (mask >> (i % 64)) & 1 == 1 {
                    c.to_ascii_lowercase()
                } else {
                    c
                }
            })
            .collect()
    }

    proptest! {
        #[test]
        fn test_equality_ignores_order_and_case(
            types in prop::collection::vec("[A-Z_]{1,12}", 0..6),
            mask in any::<u64>(),
        ) {
            let mut reordered: Vec<String> = types.iter().map(|t| shuffle_case(t, mask)).collect();
            reordered.reverse();

            let a = Permission::new("A", "A", types.clone());
            let b = Permission::new("B", "B", reordered);
            prop_assert_eq!(&a, &b);
            prop_assert!(a.equals(&b));
            prop_assert_eq!(a.is_none(), types.is_empty());
        }

        #[test]
        fn test_get_resolves_code_and_types(code in catalog_code(), mask in any::<u64>()) {
            let p = code.permission();
            let by_code = Permission::get(shuffle_case(code.as_str(), mask).as_str(), Maybe::Unset).unwrap();
            prop_assert_eq!(by_code, Some(p));

            let types: Vec<String> = p.access_types().iter().map(|t| shuffle_case(t, mask)).collect();
            let by_types = Permission::get(&types, Maybe::Unset).unwrap();
            prop_assert_eq!(by_types, Some(p));
        }

        #[test]
        fn test_order_matches_catalog_index(a in 0usize..6, b in 0usize..6) {
            let entity = Permission::entity_permissions();
            let ord = entity[a].try_cmp(entity[b]).unwrap();
            prop_assert_eq!(ord, a.cmp(&b));
        }
    }
}
