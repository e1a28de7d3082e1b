use proptest::prelude::*;
use studentorg_core::db::open_db_in_memory;
use studentorg_core::{
    list_records, Organization, PageRequest, RecordRepository, SqliteRecordRepository, PAGE_SIZE,
};

fn org_strategy() -> impl Strategy<Value = (String, Option<String>)> {
    (
        "[a-cA-C]{1,4}",
        proptest::option::of("[a-cA-C ]{0,6}"),
    )
}

fn matches_query(name: &str, description: Option<&str>, query: &str) -> bool {
    let needle = query.to_ascii_lowercase();
    name.to_ascii_lowercase().contains(&needle)
        || description.is_some_and(|text| text.to_ascii_lowercase().contains(&needle))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn pages_concatenate_to_the_filtered_ordering(
        orgs in proptest::collection::vec(org_strategy(), 0..23),
        query in proptest::option::of("[abAB]{1,2}"),
    ) {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteRecordRepository::try_new(&conn).unwrap();

        let mut expected = Vec::new();
        for (name, description) in &orgs {
            let mut org = Organization::new(name.clone(), None);
            if let Some(description) = description {
                org = org.with_description(description.clone());
            }
            let id = repo.create(&org).unwrap();
            let included = query
                .as_deref()
                .map_or(true, |q| matches_query(&org.name, org.description.as_deref(), q));
            if included {
                expected.push((org.name.clone(), id));
            }
        }
        expected.sort();

        let first = list_records::<Organization>(&conn, query.as_deref(), None, PageRequest::Number(1)).unwrap();
        let total = first.meta.total;
        prop_assert_eq!(total, expected.len() as u64);
        prop_assert_eq!(
            u64::from(first.meta.total_pages),
            total.div_ceil(u64::from(PAGE_SIZE))
        );

        let mut seen = Vec::new();
        for page_number in 1..=first.meta.total_pages {
            let page = list_records::<Organization>(
                &conn,
                query.as_deref(),
                None,
                PageRequest::Number(page_number),
            )
            .unwrap();
            prop_assert!(page.items.len() <= PAGE_SIZE as usize);
            prop_assert_eq!(page.meta.has_prev, page_number > 1);
            prop_assert_eq!(page.meta.has_next, page_number < first.meta.total_pages);
            seen.extend(page.items.into_iter().map(|org| (org.record.name, org.id)));
        }

        prop_assert_eq!(seen, expected);
    }
}
